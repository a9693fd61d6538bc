//! 요약에서 파생되는 정규화 지표.
//!
//! 모든 정책이 같은 방식으로 입력을 정리하도록 경계에서 한 번 계산합니다.
//! 유한하지 않은 입력은 0으로, 기간은 최소 1일로 보정됩니다.

use balance_core::BacktestSummary;
use serde::Serialize;

use crate::math::finite_or;

/// 손실 거래가 없고 평균 수익이 양수일 때의 손익비 대체값.
pub const NO_LOSS_RISK_REWARD: f64 = 10.0;

/// 손실 거래 없이 이익만 있을 때의 Profit Factor 대체값.
pub const NO_LOSS_PROFIT_FACTOR: f64 = 10.0;

/// 파생 지표.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// 승률 (%)
    pub win_rate_pct: f64,
    /// 손익비 (평균 수익 / |평균 손실|), 무손실 대체값 적용
    pub risk_reward: f64,
    /// Profit Factor (정리됨)
    pub profit_factor: f64,
    /// 주당 거래 횟수
    pub trades_per_week: f64,
    /// 최대 낙폭 (%)
    pub drawdown_pct: f64,
    /// 총 수익률 (%)
    pub total_return_pct: f64,
    /// 거래 횟수
    pub trade_count: u32,
}

impl DerivedMetrics {
    /// 요약에서 파생 지표를 계산합니다.
    pub fn from_summary(summary: &BacktestSummary) -> Self {
        Self {
            win_rate_pct: win_rate_pct(summary.win_rate),
            risk_reward: balanced_risk_reward(summary.avg_profit_ratio, summary.avg_loss_ratio),
            profit_factor: sanitize_profit_factor(summary.profit_factor),
            trades_per_week: trades_per_week(summary.trade_count, summary.backtest_days),
            drawdown_pct: drawdown_pct(summary.max_drawdown),
            total_return_pct: finite_or(summary.total_return_pct, 0.0),
            trade_count: summary.trade_count,
        }
    }
}

/// 평균 손실이 0이 아닐 때의 손익비 `|avg_profit / avg_loss|`.
///
/// 평균 손실이 0(또는 유한하지 않음)이면 None.
pub fn risk_reward_ratio(avg_profit: f64, avg_loss: f64) -> Option<f64> {
    let avg_profit = finite_or(avg_profit, 0.0);
    let avg_loss = finite_or(avg_loss, 0.0);
    if avg_loss == 0.0 {
        return None;
    }
    Some(finite_or((avg_profit / avg_loss).abs(), 0.0))
}

/// 균형형 손익비: 손실이 없으면 평균 수익이 양수일 때 10, 아니면 0.
pub fn balanced_risk_reward(avg_profit: f64, avg_loss: f64) -> f64 {
    risk_reward_ratio(avg_profit, avg_loss).unwrap_or_else(|| {
        if finite_or(avg_profit, 0.0) > 0.0 {
            NO_LOSS_RISK_REWARD
        } else {
            0.0
        }
    })
}

/// Profit Factor 정리: None/NaN/-inf → 0, +inf → 무손실 대체값.
pub fn sanitize_profit_factor(profit_factor: Option<f64>) -> f64 {
    match profit_factor {
        Some(pf) if pf.is_finite() => pf,
        Some(pf) if pf == f64::INFINITY => NO_LOSS_PROFIT_FACTOR,
        _ => 0.0,
    }
}

/// 주당 거래 횟수 `trade_count / max(days, 1) * 7`.
pub fn trades_per_week(trade_count: u32, backtest_days: f64) -> f64 {
    let days = if backtest_days.is_finite() {
        backtest_days.max(1.0)
    } else {
        1.0
    };
    f64::from(trade_count) / days * 7.0
}

/// 부호와 무관한 최대 낙폭 (%).
pub fn drawdown_pct(max_drawdown: f64) -> f64 {
    finite_or(max_drawdown.abs(), 0.0) * 100.0
}

/// 승률 (%).
pub fn win_rate_pct(win_rate: f64) -> f64 {
    finite_or(win_rate, 0.0) * 100.0
}
