//! 애플리케이션 공유 상태.
//!
//! 모든 핸들러가 `Arc<AppState>`로 공유합니다. 추정기는 상태가 없으므로
//! 잠금 없이 여러 요청에서 동시에 호출됩니다.

use std::sync::Arc;

use balance_analytics::{MomentumSignalEstimator, SignalEstimator};
use balance_core::{BalanceResult, EstimatorConfig};
use chrono::{DateTime, Utc};

/// 응답 메타데이터의 구현 식별자.
pub const IMPL_NAME: &str = "axum";

/// 애플리케이션 공유 상태.
pub struct AppState {
    /// 신호 추정기
    pub estimator: Arc<dyn SignalEstimator>,
    /// 추정기 설정 (readiness 응답용)
    pub estimator_config: EstimatorConfig,
    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
    /// API 버전
    pub version: String,
}

impl AppState {
    /// 추정기 설정으로 상태를 생성합니다. 설정이 유효하지 않으면 에러.
    pub fn new(estimator_config: EstimatorConfig) -> BalanceResult<Self> {
        let estimator = MomentumSignalEstimator::new(estimator_config)?;
        Ok(Self::with_estimator(estimator))
    }

    fn with_estimator(estimator: MomentumSignalEstimator) -> Self {
        Self {
            estimator_config: estimator.config().clone(),
            estimator: Arc::new(estimator),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}

/// 테스트용 상태 (기본 추정기 설정).
pub fn create_test_state() -> AppState {
    AppState::with_estimator(MomentumSignalEstimator::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = create_test_state();
        assert_eq!(state.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(state.estimator.name(), "momentum");
        assert!(state.uptime_secs() >= 0);
    }

    #[test]
    fn test_new_state_rejects_invalid_estimator_config() {
        let config = EstimatorConfig {
            window: 0,
            ..Default::default()
        };
        assert!(AppState::new(config).is_err());

        let state = AppState::new(EstimatorConfig::default()).unwrap();
        assert_eq!(state.estimator_config.window, 200);
    }
}
