//! 엄격 균형형 스코어링 정책.
//!
//! 목표치(승률 50%, 손익비 1.5, PF 1.3, 낙폭 15%)에서 벗어난 정도를 합산하여
//! 균형도 `1 / (1 + Σ편차)`를 구합니다. 어느 한 지표라도 크게 벗어나면
//! 점수가 급격히 낮아집니다. 거부 게이트는 없습니다.

use balance_core::{BacktestSummary, PolicyKind, ScoreReport};

use super::frequency::{strict_frequency_score, trade_floor_multiplier};
use super::metrics::{
    drawdown_pct, risk_reward_ratio, sanitize_profit_factor, trades_per_week, win_rate_pct,
};
use super::ScoringPolicy;
use crate::math::{clamp, finite_or};

const WINRATE_TARGET: f64 = 50.0;
const RR_TARGET: f64 = 1.5;
const PF_TARGET: f64 = 1.3;
const RETURN_TARGET: f64 = 15.0;
const DRAWDOWN_TARGET: f64 = 15.0;

/// 엄격 균형형 정책.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictBalancedPolicy;

impl ScoringPolicy for StrictBalancedPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::StrictBalanced
    }

    fn evaluate(&self, summary: &BacktestSummary) -> ScoreReport {
        if summary.has_no_trades() {
            return ScoreReport::no_trades(self.kind());
        }

        let win_rate = win_rate_pct(summary.win_rate);
        // 손실 거래가 없으면 손익비 0 (균형형의 대체값 미적용)
        let risk_reward =
            risk_reward_ratio(summary.avg_profit_ratio, summary.avg_loss_ratio).unwrap_or(0.0);
        let profit_factor = sanitize_profit_factor(summary.profit_factor);
        let drawdown = drawdown_pct(summary.max_drawdown);
        let total_return = finite_or(summary.total_return_pct, 0.0);

        let winrate_dev = (win_rate - WINRATE_TARGET).abs() / WINRATE_TARGET;
        let rr_dev = (risk_reward - RR_TARGET).abs() / RR_TARGET;
        let pf_dev = (profit_factor - PF_TARGET).abs() / PF_TARGET;
        // 낙폭은 목표 초과분만 벌점
        let dd_penalty = ((drawdown - DRAWDOWN_TARGET) / DRAWDOWN_TARGET).max(0.0);

        let balance = 1.0 / (1.0 + winrate_dev + rr_dev + pf_dev + dd_penalty);
        let performance = clamp(total_return / RETURN_TARGET, 0.0, 1.0);
        let frequency =
            strict_frequency_score(trades_per_week(summary.trade_count, summary.backtest_days));
        let sample = trade_floor_multiplier(summary.trade_count);

        let final_score = (balance * 0.6 + performance * 0.3 + frequency * 0.1) * sample;

        ScoreReport::new(self.kind(), final_score)
            .with_component("balance", balance)
            .with_component("performance", performance)
            .with_component("frequency", frequency)
            .with_component("sample", sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_target() -> BacktestSummary {
        BacktestSummary {
            win_rate: 0.5,
            avg_profit_ratio: 0.015,
            avg_loss_ratio: -0.01,
            profit_factor: Some(1.3),
            backtest_days: 70.0,
            max_drawdown: 0.10,
            total_return_pct: 15.0,
            trade_count: 75,
        }
    }

    #[test]
    fn test_on_target_scores_near_one() {
        let report = StrictBalancedPolicy.evaluate(&on_target());
        // 편차 0 → 균형도 1, 성과 1, 주당 7.5회 → 빈도 1
        assert!((report.component("balance").unwrap() - 1.0).abs() < 1e-9);
        assert!((report.loss - -1.0).abs() < 1e-9);
        assert!(report.veto.is_none());
    }

    #[test]
    fn test_no_trades() {
        assert_eq!(StrictBalancedPolicy.score(&on_target().with_trade_count(0)), 100.0);
    }

    #[test]
    fn test_few_trades_halved() {
        let base = BacktestSummary {
            backtest_days: 14.0,
            ..on_target().with_trade_count(19)
        };
        let enough = BacktestSummary {
            backtest_days: 14.0 * 20.0 / 19.0,
            ..on_target().with_trade_count(20)
        };
        let halved = StrictBalancedPolicy.evaluate(&base);
        let full = StrictBalancedPolicy.evaluate(&enough);

        assert_eq!(halved.component("sample"), Some(0.5));
        assert_eq!(full.component("sample"), Some(1.0));
        assert!(halved.final_score < full.final_score);
    }

    #[test]
    fn test_no_losses_means_zero_rr() {
        let summary = BacktestSummary {
            avg_loss_ratio: 0.0,
            avg_profit_ratio: 0.03,
            ..on_target()
        };
        let report = StrictBalancedPolicy.evaluate(&summary);
        // RR 0 → 편차 1.0 → 균형도 0.5
        assert!((report.component("balance").unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_below_target_not_penalised() {
        let low = StrictBalancedPolicy.score(&BacktestSummary {
            max_drawdown: 0.02,
            ..on_target()
        });
        let at_target = StrictBalancedPolicy.score(&BacktestSummary {
            max_drawdown: 0.15,
            ..on_target()
        });
        let high = StrictBalancedPolicy.score(&BacktestSummary {
            max_drawdown: 0.30,
            ..on_target()
        });
        assert!((low - at_target).abs() < 1e-9);
        assert!(high > at_target);
    }
}
