//! 스코어링 시스템의 에러 타입.
//!
//! 수치 계산 자체는 에러를 반환하지 않습니다. 이 모듈의 에러는
//! 설정 로드와 외부 입력(OHLCV 행, JSON) 변환 경계에서만 발생합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type BalanceResult<T> = Result<T, BalanceError>;

impl BalanceError {
    /// 호출자 입력 문제로 발생한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BalanceError::InvalidInput(_) | BalanceError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for BalanceError {
    fn from(err: serde_json::Error) -> Self {
        BalanceError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for BalanceError {
    fn from(err: config::ConfigError) -> Self {
        BalanceError::Config(err.to_string())
    }
}

impl From<std::io::Error> for BalanceError {
    fn from(err: std::io::Error) -> Self {
        BalanceError::Io(err.to_string())
    }
}
