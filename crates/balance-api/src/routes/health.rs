//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템에서 사용합니다.
//! liveness 응답은 추정기와 무관하게 항상 성공합니다.

use axum::{extract::State, routing::get, Json, Router};
use balance_core::EstimatorConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::{AppState, IMPL_NAME};

/// liveness 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// 항상 "ok"
    pub status: String,
    /// 구현 식별자
    #[serde(rename = "impl")]
    pub implementation: String,
}

/// readiness 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 추정기 상태
    pub estimator: ComponentStatus,

    /// 추정기 설정
    pub estimator_config: EstimatorConfig,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// 상태 ("up" | "down")
    pub status: String,

    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    /// 정보 포함 정상 상태.
    pub fn up_with_info(message: impl Into<String>) -> Self {
        Self {
            status: "up".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// GET /health
pub async fn health_check() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "ok".to_string(),
        implementation: IMPL_NAME.to_string(),
    })
}

/// 상세 헬스 체크 (readiness probe용).
///
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        estimator: ComponentStatus::up_with_info(format!(
            "{} (window {}, min bars {})",
            state.estimator.name(),
            state.estimator_config.window,
            state.estimator_config.min_bars
        )),
        estimator_config: state.estimator_config.clone(),
    })
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(health_ready))
}
