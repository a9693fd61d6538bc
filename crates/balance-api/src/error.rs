//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use balance_core::BalanceError;
use serde::{Deserialize, Serialize};

/// 잘못된 요청 본문 에러 코드.
pub const INVALID_PAYLOAD: &str = "INVALID_PAYLOAD";
/// 존재하지 않는 경로 에러 코드.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// 내부 에러 코드.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_PAYLOAD",
///   "message": "잘못된 입력: ohlcv[3]: OHLCV 행에는 최소 5개 값이 필요합니다: 4개 제공",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_PAYLOAD", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// HTTP 메서드
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// 요청 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
            method: None,
            path: None,
        }
    }

    /// 요청 정보(메서드, 경로)를 추가합니다.
    #[must_use]
    pub fn with_request_info(mut self, method: &Method, uri: &Uri) -> Self {
        self.method = Some(method.to_string());
        self.path = Some(uri.path().to_string());
        self
    }

    /// 잘못된 요청 본문 (400).
    pub fn invalid_payload(message: impl Into<String>) -> ApiError {
        (
            StatusCode::BAD_REQUEST,
            Json(Self::new(INVALID_PAYLOAD, message)),
        )
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 핸들러 에러 타입 (상태 코드 + JSON 본문).
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 도메인 에러를 API 에러로 변환합니다.
///
/// 클라이언트 입력 에러는 400, 나머지는 500입니다.
pub fn from_domain_error(err: &BalanceError) -> ApiError {
    if err.is_client_error() {
        ApiErrorResponse::invalid_payload(err.to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new(INTERNAL_ERROR, err.to_string())),
        )
    }
}
