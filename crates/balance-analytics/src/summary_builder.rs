//! 거래별 수익률에서 백테스트 요약 생성.

use balance_core::BacktestSummary;
use tracing::warn;

use crate::math::mean;
use crate::scoring::metrics::NO_LOSS_PROFIT_FACTOR;

/// 거래별 수익률(비율)로부터 [`BacktestSummary`]를 만드는 빌더.
///
/// 자산 곡선은 수익률을 복리로 누적하여 계산합니다 (초기 자산 1.0).
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    backtest_days: f64,
    profit_ratios: Vec<f64>,
}

impl SummaryBuilder {
    /// 백테스트 기간(일)으로 빌더를 생성합니다.
    pub fn new(backtest_days: f64) -> Self {
        Self {
            backtest_days,
            profit_ratios: Vec::new(),
        }
    }

    /// 거래 하나의 수익률을 추가합니다. 유한하지 않은 값은 무시합니다.
    pub fn push_trade(&mut self, profit_ratio: f64) -> &mut Self {
        if profit_ratio.is_finite() {
            self.profit_ratios.push(profit_ratio);
        } else {
            warn!(profit_ratio, "Skipping non-finite trade profit ratio");
        }
        self
    }

    /// 여러 거래 수익률을 추가합니다.
    pub fn with_trades<I>(mut self, profit_ratios: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        for ratio in profit_ratios {
            self.push_trade(ratio);
        }
        self
    }

    /// 요약을 생성합니다.
    pub fn build(&self) -> BacktestSummary {
        let trade_count = u32::try_from(self.profit_ratios.len()).unwrap_or(u32::MAX);
        if self.profit_ratios.is_empty() {
            return BacktestSummary {
                backtest_days: self.backtest_days,
                ..BacktestSummary::default()
            };
        }

        let wins: Vec<f64> = self.profit_ratios.iter().copied().filter(|r| *r > 0.0).collect();
        let losses: Vec<f64> = self.profit_ratios.iter().copied().filter(|r| *r < 0.0).collect();

        let gross_profit: f64 = wins.iter().sum();
        let gross_loss: f64 = losses.iter().sum::<f64>().abs();

        let profit_factor = if gross_loss > 0.0 {
            Some(gross_profit / gross_loss)
        } else if gross_profit > 0.0 {
            Some(NO_LOSS_PROFIT_FACTOR)
        } else {
            None
        };

        let (final_equity, max_drawdown) = equity_curve(&self.profit_ratios);

        BacktestSummary {
            win_rate: wins.len() as f64 / self.profit_ratios.len() as f64,
            avg_profit_ratio: mean(&wins),
            avg_loss_ratio: mean(&losses),
            profit_factor,
            backtest_days: self.backtest_days,
            max_drawdown,
            total_return_pct: (final_equity - 1.0) * 100.0,
            trade_count,
        }
    }
}

/// 복리 자산 곡선의 최종 자산과 최대 낙폭(비율).
fn equity_curve(profit_ratios: &[f64]) -> (f64, f64) {
    let mut equity = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut max_drawdown = 0.0_f64;

    for ratio in profit_ratios {
        equity *= 1.0 + ratio;
        peak = peak.max(equity);
        if peak > 0.0 {
            max_drawdown = max_drawdown.max((peak - equity) / peak);
        }
    }

    (equity, max_drawdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_trades() {
        let summary = SummaryBuilder::new(30.0)
            .with_trades([0.1, -0.05, 0.02])
            .build();

        assert_eq!(summary.trade_count, 3);
        assert!((summary.win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!((summary.avg_profit_ratio - 0.06).abs() < 1e-12);
        assert!((summary.avg_loss_ratio - -0.05).abs() < 1e-12);
        assert!((summary.profit_factor.unwrap() - 2.4).abs() < 1e-9);
        // 1.1 → 1.045 → 1.0659
        assert!((summary.total_return_pct - 6.59).abs() < 1e-9);
        assert!((summary.max_drawdown - 0.05).abs() < 1e-12);
        assert_eq!(summary.backtest_days, 30.0);
    }

    #[test]
    fn test_empty_builder() {
        let summary = SummaryBuilder::new(10.0).build();
        assert!(summary.has_no_trades());
        assert!(summary.profit_factor.is_none());
        assert_eq!(summary.backtest_days, 10.0);
    }

    #[test]
    fn test_profit_factor_edge_cases() {
        let only_wins = SummaryBuilder::new(7.0).with_trades([0.01, 0.02]).build();
        assert_eq!(only_wins.profit_factor, Some(NO_LOSS_PROFIT_FACTOR));
        assert_eq!(only_wins.avg_loss_ratio, 0.0);
        assert_eq!(only_wins.max_drawdown, 0.0);

        let flat = SummaryBuilder::new(7.0).with_trades([0.0, 0.0]).build();
        assert!(flat.profit_factor.is_none());
        assert_eq!(flat.win_rate, 0.0);
        assert_eq!(flat.trade_count, 2);
    }

    #[test]
    fn test_skips_non_finite() {
        let mut builder = SummaryBuilder::new(7.0);
        builder.push_trade(0.01).push_trade(f64::NAN).push_trade(-0.01);
        assert_eq!(builder.build().trade_count, 2);
    }

    #[test]
    fn test_drawdown_tracks_running_peak() {
        // 1.2 → 0.96 → 1.152 → 0.864
        let summary = SummaryBuilder::new(7.0)
            .with_trades([0.2, -0.2, 0.2, -0.25])
            .build();
        assert!((summary.max_drawdown - (1.2 - 0.864) / 1.2).abs() < 1e-12);
    }
}
