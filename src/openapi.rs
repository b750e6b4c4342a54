// OpenAPI 스키마 정의: Swagger 문서 자동 생성
use utoipa::OpenApi;

use crate::domains::auth::models::{
    KakaoCallbackResponse, SigninRequest, SigninResponse, TokenResponse,
};
use crate::domains::maps::models::{SmokingAreaPoint, SmokingAreaResponse, SmokingAreasResponse};
use crate::domains::users::models::{
    NicknameResponse, UpdateNicknameRequest, UpdatePreferredMapRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::auth::handlers::auth_handler::kakao_callback,
        crate::domains::auth::handlers::auth_handler::signin,
        crate::domains::auth::handlers::auth_handler::reissue_token,
        crate::domains::auth::handlers::auth_handler::delete_user,
        crate::domains::users::handlers::user_handler::get_nickname,
        crate::domains::users::handlers::user_handler::update_nickname,
        crate::domains::users::handlers::user_handler::update_preferred_map,
        crate::domains::maps::handlers::map_handler::get_smoking_areas,
        crate::domains::maps::handlers::map_handler::get_smoking_area
    ),
    components(schemas(
        KakaoCallbackResponse,
        SigninRequest,
        SigninResponse,
        TokenResponse,
        NicknameResponse,
        UpdateNicknameRequest,
        UpdatePreferredMapRequest,
        SmokingAreaPoint,
        SmokingAreasResponse,
        SmokingAreaResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Social sign-in, token reissue and account deletion"),
        (name = "Users", description = "Nickname and preferred map"),
        (name = "Maps", description = "Smoking area lookup")
    ),
    info(
        title = "Smoking Area API Server",
        description = "API server for finding nearby smoking areas",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
