//! 헬스 체크 endpoint.
//!
//! 감시 루프와 어떤 가변 상태도 공유하지 않는 정적 liveness
//! 응답만 제공합니다. 헤드리스 배포에서는 비활성화할 수 있습니다.

use axum::{response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 서비스 상태 (항상 "running")
    pub status: &'static str,
    /// 버전
    pub version: &'static str,
    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// 헬스 체크 서버를 실행합니다.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let app = Router::new().route("/health", get(health_check));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!(port, "헬스 체크 서버 시작");
    axum::serve(listener, app).await?;
    Ok(())
}
