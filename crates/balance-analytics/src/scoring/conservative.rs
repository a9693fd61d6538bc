//! 보수형 스코어링 정책.
//!
//! 리스크 통제(낙폭 10% 목표)에 가장 큰 가중치를 두며, 낙폭 20% 초과,
//! 승률 40% 미만, PF 1.0 미만 중 하나라도 해당하면 점수를 0.3배로 감쇠합니다.

use balance_core::{BacktestSummary, PolicyKind, ScoreReport, VetoReason};

use super::metrics::{drawdown_pct, sanitize_profit_factor, win_rate_pct};
use super::ScoringPolicy;
use crate::math::{clamp, finite_or};

const RISK_CONTROL_MULTIPLIER: f64 = 0.3;

/// 보수형 정책.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativePolicy;

impl ScoringPolicy for ConservativePolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Conservative
    }

    fn evaluate(&self, summary: &BacktestSummary) -> ScoreReport {
        if summary.has_no_trades() {
            return ScoreReport::no_trades(self.kind());
        }

        let win_rate = win_rate_pct(summary.win_rate);
        let profit_factor = sanitize_profit_factor(summary.profit_factor);
        let drawdown = drawdown_pct(summary.max_drawdown);
        let total_return = finite_or(summary.total_return_pct, 0.0);

        let risk = clamp(1.0 - drawdown / 10.0, 0.0, 1.0);
        let stability = clamp(win_rate / 60.0, 0.0, 1.0);
        let profit = clamp(profit_factor / 1.2, 0.0, 1.5);
        let return_score = clamp(total_return / 8.0, 0.0, 1.0);

        let weighted = risk * 0.40 + stability * 0.30 + profit * 0.20 + return_score * 0.10;

        let breached = drawdown > 20.0 || win_rate < 40.0 || profit_factor < 1.0;
        let (final_score, veto) = if breached {
            (weighted * RISK_CONTROL_MULTIPLIER, Some(VetoReason::RiskControl))
        } else {
            (weighted, None)
        };

        ScoreReport::new(self.kind(), final_score)
            .with_component("risk", risk)
            .with_component("stability", stability)
            .with_component("profit", profit)
            .with_component("return", return_score)
            .with_veto(veto)
    }
}
