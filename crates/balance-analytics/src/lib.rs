//! 스코어링 및 신호 추정 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 모멘텀 신호 추정 (OHLCV 윈도우 → 롱/숏 점수, 신뢰도)
//! - 백테스트 스코어링 정책 (균형형, 엄격 균형형, 보수형)
//! - 균형 지수 및 지표 등급
//! - 거래별 수익률에서 백테스트 요약 생성
//!
//! 모든 계산은 순수 함수이며 I/O를 수행하지 않습니다.
//!
//! # Re-exports
//!
//! - [`scoring`]: 스코어링 정책 (ScoringPolicy, BalancedScoringEngine 등)
//! - [`signal_estimator`]: 신호 추정기 (MomentumSignalEstimator)

pub mod balance_index;
pub mod math;
pub mod scoring;
pub mod signal_estimator;
pub mod summary_builder;

// Scoring 모듈 re-exports
pub use scoring::{
    evaluate_all, policy_for, BalancedPolicy, BalancedScoringEngine, ConservativePolicy,
    DerivedMetrics, ScoringPolicy, StrictBalancedPolicy,
};

// Signal 모듈 re-exports
pub use signal_estimator::{MomentumSignalEstimator, SignalEstimator};

pub use balance_index::{balance_index, MetricGrade, MetricGrades};
pub use summary_builder::SummaryBuilder;
