use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smoking_area_api::shared::clients::build_http_client;
use smoking_area_api::shared::database::Database;
use smoking_area_api::{create_app, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smoking_area_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로딩 (JWT secret 이 없으면 여기서 종료)
    let config = AppConfig::from_env()?;
    tracing::info!(port = config.port, "smoking-area-api starting...");

    // DB 연결 + 마이그레이션
    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let http_client = build_http_client(config.http_timeout_secs)?;
    let port = config.port;
    let app_state = AppState::new(config, &db, http_client);

    let app = create_app(app_state);

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    tracing::info!("Server running on http://localhost:{}", port);
    tracing::info!("Swagger UI available at http://localhost:{}/api", port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
