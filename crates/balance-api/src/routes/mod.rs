//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `POST /forecast` - 방향성 신호 예측
//! - `GET /health` - 헬스 체크 (liveness)
//! - `GET /health/ready` - 상세 헬스 체크 (readiness)
//!
//! `/metrics`는 별도 상태(PrometheusHandle)를 사용하므로 바이너리에서 합칩니다.

pub mod forecast;
pub mod health;

pub use forecast::{forecast_router, ForecastMeta, ForecastRequest, ForecastResponse};
pub use health::{health_router, ComponentStatus, HealthResponse, LivenessResponse};

use axum::{
    http::{Method, StatusCode, Uri},
    Json, Router,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiErrorResponse, NOT_FOUND};
use crate::state::AppState;

/// 등록되지 않은 경로에 대한 JSON 404 응답.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(
            ApiErrorResponse::new(NOT_FOUND, format!("경로를 찾을 수 없습니다: {}", uri.path()))
                .with_request_info(&method, &uri),
        ),
    )
}

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_router())
        .merge(forecast_router())
        .fallback(not_found)
}
