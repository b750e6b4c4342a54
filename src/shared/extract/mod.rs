// 요청 추출기 (validation 단계)
// Request extractors whose rejections become `AppError::BadRequest`
// so malformed bodies, paths and queries get the standard error envelope.
use axum::extract::{FromRequest, FromRequestParts};

use crate::shared::errors::AppError;

/// JSON body 추출기
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path 파라미터 추출기
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string 추출기
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
