//! 백테스트 스코어링 엔진.
//!
//! 백테스트 요약을 파라미터 탐색기가 최소화할 단일 손실값으로 변환합니다.
//! 세 가지 정책이 같은 입력 계약을 공유하며, 호출자가 설정으로 선택합니다.
//!
//! | 정책 | 특징 |
//! |---|---|
//! | [`BalancedPolicy`] | 비율 하위 점수 + 빈도 종형 곡선 + 안정성 보너스 + 거부 게이트 |
//! | [`StrictBalancedPolicy`] | 목표치 편차 기반 균형도 |
//! | [`ConservativePolicy`] | 낙폭 통제 우선, 기준 미달 시 0.3배 |
//!
//! 모든 정책은 상태가 없으며 `Send + Sync`입니다. 거래가 없으면 손실 100.0을 반환합니다.
//!
//! # 사용 예시
//!
//! ```
//! use balance_analytics::scoring::BalancedScoringEngine;
//! use balance_core::{BacktestSummary, PolicyKind};
//!
//! let engine = BalancedScoringEngine::new(PolicyKind::Balanced);
//! assert_eq!(engine.score(&BacktestSummary::default()), 100.0);
//! ```

mod balanced;
mod conservative;
pub mod frequency;
pub mod metrics;
mod strict;

pub use balanced::BalancedPolicy;
pub use conservative::ConservativePolicy;
pub use frequency::{
    balanced_frequency_score, sample_sufficiency, strict_frequency_score, trade_floor_multiplier,
};
pub use metrics::DerivedMetrics;
pub use strict::StrictBalancedPolicy;

use balance_core::{BacktestSummary, PolicyKind, ScoreReport, ScoringConfig};

/// 스코어링 정책 trait.
pub trait ScoringPolicy: Send + Sync {
    /// 정책 종류.
    fn kind(&self) -> PolicyKind;

    /// 요약을 평가하여 하위 점수와 거부 사유를 포함한 리포트를 반환합니다.
    fn evaluate(&self, summary: &BacktestSummary) -> ScoreReport;

    /// 손실값 (낮을수록 좋음).
    fn score(&self, summary: &BacktestSummary) -> f64 {
        self.evaluate(summary).loss
    }

    /// 요약과 별도로 전달된 거래 횟수로 손실값을 계산합니다.
    fn hyperopt_loss(&self, summary: &BacktestSummary, trade_count: u32) -> f64 {
        self.score(&summary.with_trade_count(trade_count))
    }
}

static BALANCED: BalancedPolicy = BalancedPolicy;
static STRICT_BALANCED: StrictBalancedPolicy = StrictBalancedPolicy;
static CONSERVATIVE: ConservativePolicy = ConservativePolicy;

/// 정책 종류에 해당하는 구현을 반환합니다.
pub fn policy_for(kind: PolicyKind) -> &'static dyn ScoringPolicy {
    match kind {
        PolicyKind::Balanced => &BALANCED,
        PolicyKind::StrictBalanced => &STRICT_BALANCED,
        PolicyKind::Conservative => &CONSERVATIVE,
    }
}

/// 모든 정책으로 요약을 평가합니다.
pub fn evaluate_all(summary: &BacktestSummary) -> Vec<ScoreReport> {
    PolicyKind::ALL
        .iter()
        .map(|&kind| policy_for(kind).evaluate(summary))
        .collect()
}

/// 설정으로 선택된 정책을 감싸는 스코어링 엔진.
#[derive(Clone, Copy)]
pub struct BalancedScoringEngine {
    policy: &'static dyn ScoringPolicy,
}

impl BalancedScoringEngine {
    /// 정책 종류로 엔진을 생성합니다.
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            policy: policy_for(kind),
        }
    }

    /// 스코어링 설정에서 엔진을 생성합니다.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.policy)
    }

    /// 선택된 정책 종류.
    pub fn kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// 리포트를 반환합니다.
    pub fn evaluate(&self, summary: &BacktestSummary) -> ScoreReport {
        self.policy.evaluate(summary)
    }

    /// 손실값을 반환합니다.
    pub fn score(&self, summary: &BacktestSummary) -> f64 {
        self.policy.score(summary)
    }

    /// 별도 거래 횟수로 손실값을 반환합니다.
    pub fn hyperopt_loss(&self, summary: &BacktestSummary, trade_count: u32) -> f64 {
        self.policy.hyperopt_loss(summary, trade_count)
    }
}

impl Default for BalancedScoringEngine {
    fn default() -> Self {
        Self::new(PolicyKind::default())
    }
}

impl std::fmt::Debug for BalancedScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalancedScoringEngine")
            .field("policy", &self.kind())
            .finish()
    }
}
