//! 균형형 스코어링 정책.
//!
//! 단일 지표의 극단화 대신 승률, 손익비, Profit Factor, 빈도가 고르게
//! 좋은 후보를 찾습니다.
//!
//! - 하위 점수: 목표치 대비 비율 (초과 달성은 상한까지 인정)
//! - 빈도: 주당 5 ~ 15회를 최적으로 하는 종형 곡선
//! - 안정성 보너스: 하위 점수 분산이 작을수록 최대 0.1
//! - 거부 게이트: 순서대로 평가하여 처음 해당하는 값으로 대체

use balance_core::{BacktestSummary, PolicyKind, ScoreReport, VetoReason};
use tracing::debug;

use super::frequency::{balanced_frequency_score, sample_sufficiency};
use super::metrics::DerivedMetrics;
use super::ScoringPolicy;
use crate::math::{clamp, population_std};

const WINRATE_TARGET: f64 = 55.0;
const RR_TARGET: f64 = 1.2;
const PF_TARGET: f64 = 1.3;
const RETURN_TARGET: f64 = 10.0;
const DRAWDOWN_LIMIT: f64 = 20.0;

const SEVERE_LOSS_SCORE: f64 = 0.1;
const REJECTED_SCORE: f64 = 0.2;

/// 균형형 정책.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedPolicy;

impl BalancedPolicy {
    /// 거부 게이트. 처음 해당하는 사유와 대체 점수를 반환합니다.
    fn gate(metrics: &DerivedMetrics) -> Option<(VetoReason, f64)> {
        if metrics.profit_factor <= 0.0 || metrics.total_return_pct <= -10.0 {
            Some((VetoReason::SevereLoss, SEVERE_LOSS_SCORE))
        } else if metrics.win_rate_pct < 20.0 {
            Some((VetoReason::LowWinRate, REJECTED_SCORE))
        } else if metrics.drawdown_pct > 50.0 {
            Some((VetoReason::ExcessiveDrawdown, REJECTED_SCORE))
        } else {
            None
        }
    }
}

impl ScoringPolicy for BalancedPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Balanced
    }

    fn evaluate(&self, summary: &BacktestSummary) -> ScoreReport {
        if summary.has_no_trades() {
            return ScoreReport::no_trades(self.kind());
        }

        let metrics = DerivedMetrics::from_summary(summary);

        let winrate_score = clamp(metrics.win_rate_pct / WINRATE_TARGET, 0.0, 1.5);
        let rr_score = clamp(metrics.risk_reward / RR_TARGET, 0.0, 2.0);
        let pf_score = clamp(metrics.profit_factor / PF_TARGET, 0.0, 2.0);
        let return_score = clamp(metrics.total_return_pct / RETURN_TARGET, 0.0, 1.5);
        let drawdown_score = clamp(1.0 - metrics.drawdown_pct / DRAWDOWN_LIMIT, 0.0, 1.0);
        let frequency_score = balanced_frequency_score(metrics.trades_per_week);

        let spread = population_std(&[
            winrate_score,
            rr_score,
            pf_score,
            drawdown_score,
            frequency_score,
        ]);
        let stability_bonus = (1.0 - spread).max(0.0) * 0.1;
        let sample = sample_sufficiency(metrics.trade_count);

        let weighted = winrate_score * 0.20
            + rr_score * 0.25
            + pf_score * 0.25
            + return_score * 0.15
            + drawdown_score * 0.15;
        let composite = (weighted + stability_bonus) * frequency_score * sample;

        let veto = Self::gate(&metrics);
        let final_score = veto.map_or(composite, |(_, score)| score);

        debug!(
            policy = %self.kind(),
            "WR={:.1}% RR={:.2} PF={:.2} Freq={:.1}/w DD={:.1}% Score={:.3} Loss={:.3}",
            metrics.win_rate_pct,
            metrics.risk_reward,
            metrics.profit_factor,
            metrics.trades_per_week,
            metrics.drawdown_pct,
            final_score,
            -final_score
        );

        ScoreReport::new(self.kind(), final_score)
            .with_component("winrate", winrate_score)
            .with_component("risk_reward", rr_score)
            .with_component("profit_factor", pf_score)
            .with_component("return", return_score)
            .with_component("drawdown", drawdown_score)
            .with_component("frequency", frequency_score)
            .with_component("stability_bonus", stability_bonus)
            .with_component("sample", sample)
            .with_component("weighted", weighted)
            .with_veto(veto.map(|(reason, _)| reason))
    }
}
