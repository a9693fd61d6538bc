//! 균형 지수와 지표 등급.
//!
//! 최적화 결과를 비교할 때 지표들이 얼마나 고르게 분포하는지 나타냅니다.
//! 다섯 지표를 0 ~ 1로 정규화한 뒤 `1 - 표본 표준편차`를 지수로 사용합니다.

use serde::Serialize;
use std::fmt;

use crate::math::{clamp01, sample_std};
use crate::scoring::DerivedMetrics;

/// 정규화된 다섯 지표 `[승률, 손익비, PF, 빈도, 낙폭]`.
pub fn normalized_metrics(metrics: &DerivedMetrics) -> [f64; 5] {
    [
        clamp01(metrics.win_rate_pct / 100.0),
        clamp01(metrics.risk_reward / 3.0),
        clamp01(metrics.profit_factor / 2.0),
        clamp01(metrics.trades_per_week / 20.0),
        clamp01(1.0 - metrics.drawdown_pct / 30.0),
    ]
}

/// 균형 지수 (높을수록 고르게 좋음).
pub fn balance_index(metrics: &DerivedMetrics) -> f64 {
    1.0 - sample_std(&normalized_metrics(metrics))
}

/// 지표 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricGrade {
    Good,
    Warning,
    Bad,
}

impl MetricGrade {
    fn from_thresholds(value: f64, good: f64, warning: f64) -> Self {
        if value >= good {
            MetricGrade::Good
        } else if value >= warning {
            MetricGrade::Warning
        } else {
            MetricGrade::Bad
        }
    }

    /// 승률(%) 등급: 50 이상 양호, 40 이상 주의.
    pub fn win_rate(win_rate_pct: f64) -> Self {
        Self::from_thresholds(win_rate_pct, 50.0, 40.0)
    }

    /// 손익비 등급: 1.2 이상 양호, 1.0 이상 주의.
    pub fn risk_reward(risk_reward: f64) -> Self {
        Self::from_thresholds(risk_reward, 1.2, 1.0)
    }

    /// Profit Factor 등급: 1.3 이상 양호, 1.0 이상 주의.
    pub fn profit_factor(profit_factor: f64) -> Self {
        Self::from_thresholds(profit_factor, 1.3, 1.0)
    }
}

impl fmt::Display for MetricGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MetricGrade::Good => "good",
            MetricGrade::Warning => "warning",
            MetricGrade::Bad => "bad",
        };
        write!(f, "{}", label)
    }
}

/// 주요 지표 등급 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricGrades {
    pub win_rate: MetricGrade,
    pub risk_reward: MetricGrade,
    pub profit_factor: MetricGrade,
}

impl MetricGrades {
    pub fn from_metrics(metrics: &DerivedMetrics) -> Self {
        Self {
            win_rate: MetricGrade::win_rate(metrics.win_rate_pct),
            risk_reward: MetricGrade::risk_reward(metrics.risk_reward),
            profit_factor: MetricGrade::profit_factor(metrics.profit_factor),
        }
    }
}
