// 외부 HTTP API 클라이언트
// Outbound HTTP clients (OAuth providers, routing, error webhook)
pub mod apple;
pub mod kakao;
pub mod osrm;
pub mod slack;

pub use apple::*;
pub use kakao::*;
pub use osrm::*;
pub use slack::*;

use std::time::Duration;

use anyhow::{Context, Result};

/// 모든 클라이언트가 공유하는 reqwest Client
/// Shared HTTP client with a global request timeout
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent("smoking-area-api/1.0")
        .build()
        .context("Failed to create HTTP client")
}
