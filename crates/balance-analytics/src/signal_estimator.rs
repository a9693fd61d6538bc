//! 모멘텀 기반 방향성 신호 추정기.
//!
//! 최근 종가와 기준 평균의 괴리를 평균 절대 변화량으로 정규화한 기울기를
//! 시그모이드로 매핑하여 롱/숏 점수를 산출합니다. 통계적 예측이 아닌
//! 단조적이고 설명 가능한 휴리스틱이며, 동기 요청 경로에서 O(N)으로 동작합니다.
//!
//! # 알고리즘
//!
//! 1. 바 개수가 `min_bars` 미만이면 중립 사전 신호 `{0.5, 0.5, 0.4}`
//! 2. 최근 최대 `window`개 종가 사용 (오래된 순서 유지)
//! 3. `avg` = 마지막 `average_period`개 종가 평균, `last` = 마지막 종가
//! 4. `vol` = 연속 종가 차이 절대값의 평균 (종가 2개 미만 또는 0이면 1.0)
//! 5. `slope = (last - avg) / vol`
//! 6. `long = sigmoid(slope)`, `short = 1 - long`
//! 7. `confidence = 0.4 + 0.5 * clamp01(|slope| / slope_scale) + 0.1 * clamp01(N / depth_bars)`

use balance_core::{BalanceResult, EstimatorConfig, PriceBar, SignalResult};
use tracing::debug;

use crate::math::{clamp01, mean, sigmoid};

/// 신뢰도 기본 항.
const BASE_CONFIDENCE: f64 = 0.4;
/// 추세 크기 항 가중치.
const TREND_WEIGHT: f64 = 0.5;
/// 표본 깊이 항 가중치.
const DEPTH_WEIGHT: f64 = 0.1;

/// 다형성을 위한 신호 추정기 trait.
pub trait SignalEstimator: Send + Sync {
    /// 가격 바 윈도우에서 신호를 추정합니다. 항상 유효한 결과를 반환합니다.
    fn estimate(&self, bars: &[PriceBar]) -> SignalResult;

    /// 추정기 이름.
    fn name(&self) -> &str;
}

/// 모멘텀 신호 추정기.
#[derive(Debug, Clone, Default)]
pub struct MomentumSignalEstimator {
    config: EstimatorConfig,
}

impl MomentumSignalEstimator {
    /// 주어진 설정으로 추정기를 생성합니다.
    ///
    /// 0 기간, 양수가 아닌 `slope_scale`, 범위 밖 `confidence_cap`은
    /// `BalanceError::Config`로 거부합니다.
    pub fn new(config: EstimatorConfig) -> BalanceResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 현재 설정을 반환합니다.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// 가격 바 윈도우에서 신호를 추정합니다.
    pub fn estimate(&self, bars: &[PriceBar]) -> SignalResult {
        let sample_count = bars.len();
        if sample_count < self.config.min_bars {
            return SignalResult::neutral();
        }

        let start = sample_count.saturating_sub(self.config.window);
        let closes: Vec<f64> = bars[start..].iter().map(|bar| bar.close).collect();
        let slope = momentum_slope(&closes, self.config.average_period);

        let long_score = clamp01(sigmoid(slope));
        let short_score = clamp01(1.0 - long_score);

        let trend = clamp01(slope.abs() / self.config.slope_scale);
        let depth = clamp01(sample_count as f64 / self.config.depth_bars as f64);
        let raw_confidence = BASE_CONFIDENCE + TREND_WEIGHT * trend + DEPTH_WEIGHT * depth;
        let confidence = clamp01(raw_confidence.min(self.config.confidence_cap));

        debug!(
            sample_count,
            window = closes.len(),
            slope,
            long_score,
            confidence,
            "Momentum signal estimated"
        );

        SignalResult {
            long_score,
            short_score,
            confidence,
        }
    }
}

impl SignalEstimator for MomentumSignalEstimator {
    fn estimate(&self, bars: &[PriceBar]) -> SignalResult {
        MomentumSignalEstimator::estimate(self, bars)
    }

    fn name(&self) -> &str {
        "momentum"
    }
}

/// 정규화된 모멘텀 기울기 `(last - avg) / vol`.
///
/// 빈 입력이나 NaN 결과는 0.0(중립)입니다.
pub fn momentum_slope(closes: &[f64], average_period: usize) -> f64 {
    let Some(&last) = closes.last() else {
        return 0.0;
    };

    let tail_start = closes.len().saturating_sub(average_period.max(1));
    let average = mean(&closes[tail_start..]);
    let slope = (last - average) / mean_abs_change(closes);

    if slope.is_nan() {
        0.0
    } else {
        slope
    }
}

/// 연속 종가 차이 절대값의 평균 (변동성 대용치).
///
/// 종가가 2개 미만이거나 결과가 0 또는 유한하지 않으면 1.0입니다.
pub fn mean_abs_change(closes: &[f64]) -> f64 {
    if closes.len() < 2 {
        return 1.0;
    }

    let total: f64 = closes.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    let vol = total / (closes.len() - 1) as f64;

    if vol == 0.0 || !vol.is_finite() {
        1.0
    } else {
        vol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new(i as i64 * 60_000, c, c + 1.0, c - 1.0, c, 100.0))
            .collect()
    }

    #[test]
    fn test_insufficient_bars_returns_neutral() {
        let estimator = MomentumSignalEstimator::default();
        for n in 0..10 {
            let bars = bars_from_closes(&vec![100.0; n]);
            assert_eq!(estimator.estimate(&bars), SignalResult::neutral());
        }
    }

    #[test]
    fn test_flat_series_is_balanced() {
        let estimator = MomentumSignalEstimator::default();
        let bars = bars_from_closes(&[100.0; 48]);
        let signal = estimator.estimate(&bars);

        // vol = 0 → 1.0, slope = 0
        assert_eq!(signal.long_score, 0.5);
        assert_eq!(signal.short_score, 0.5);
        // 0.4 + 0 + 0.1 * 48/480
        assert!((signal.confidence - 0.41).abs() < 1e-12);
    }

    #[test]
    fn test_uptrend_favors_long() {
        let estimator = MomentumSignalEstimator::default();
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let signal = estimator.estimate(&bars_from_closes(&closes));

        // avg20 = 119.5, last = 129, vol = 1 → slope = 9.5
        assert!(signal.long_score > 0.99);
        assert!(signal.short_score < 0.01);
        assert!((signal.long_score + signal.short_score - 1.0).abs() < 1e-12);
        // 0.4 + 0.5 * 1 + 0.1 * 30/480
        assert!((signal.confidence - (0.9 + 0.1 * 30.0 / 480.0)).abs() < 1e-12);
    }

    #[test]
    fn test_downtrend_favors_short() {
        let estimator = MomentumSignalEstimator::default();
        let closes: Vec<f64> = (0..30).map(|i| 200.0 - 2.0 * i as f64).collect();
        let signal = estimator.estimate(&bars_from_closes(&closes));

        assert!(signal.short_score > signal.long_score);
        assert!((signal.long_score + signal.short_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_limits_closes() {
        let estimator = MomentumSignalEstimator::default();
        // 앞쪽 300개는 큰 변동, 뒤쪽 200개는 완만한 상승
        let mut closes: Vec<f64> = (0..300)
            .map(|i| if i % 2 == 0 { 100.0 } else { 200.0 })
            .collect();
        closes.extend((0..200).map(|i| 300.0 + i as f64 * 0.5));

        let full = estimator.estimate(&bars_from_closes(&closes));
        let tail = estimator.estimate(&bars_from_closes(&closes[300..]));

        // 롱/숏 점수는 마지막 200개 종가에만 의존
        assert_eq!(full.long_score, tail.long_score);
        // 신뢰도의 깊이 항은 전체 바 개수 사용 (500 → 1.0 포화)
        assert!(full.confidence > tail.confidence);
    }

    #[test]
    fn test_confidence_cap() {
        let estimator = MomentumSignalEstimator::new(EstimatorConfig {
            confidence_cap: 0.9,
            ..Default::default()
        })
        .unwrap();
        let closes: Vec<f64> = (0..500).map(|i| 100.0 + i as f64).collect();
        let signal = estimator.estimate(&bars_from_closes(&closes));
        assert_eq!(signal.confidence, 0.9);

        let uncapped = MomentumSignalEstimator::default().estimate(&bars_from_closes(&closes));
        assert_eq!(uncapped.confidence, 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let zero_depth = EstimatorConfig {
            depth_bars: 0,
            ..Default::default()
        };
        let err = MomentumSignalEstimator::new(zero_depth).unwrap_err();
        assert!(err.to_string().contains("depth_bars"));

        let flat_scale = EstimatorConfig {
            slope_scale: 0.0,
            ..Default::default()
        };
        assert!(MomentumSignalEstimator::new(flat_scale).is_err());

        assert!(MomentumSignalEstimator::new(EstimatorConfig::default()).is_ok());
    }

    #[test]
    fn test_nan_close_stays_balanced() {
        let estimator = MomentumSignalEstimator::default();
        let mut closes = vec![100.0; 20];
        closes.push(f64::NAN);
        let signal = estimator.estimate(&bars_from_closes(&closes));

        assert_eq!(signal.long_score, 0.5);
        assert_eq!(signal.short_score, 0.5);
        assert!((0.0..=1.0).contains(&signal.confidence));
    }

    #[test]
    fn test_mean_abs_change() {
        assert_eq!(mean_abs_change(&[]), 1.0);
        assert_eq!(mean_abs_change(&[5.0]), 1.0);
        assert_eq!(mean_abs_change(&[5.0, 5.0, 5.0]), 1.0);
        assert_eq!(mean_abs_change(&[1.0, 3.0, 2.0]), 1.5);
    }

    #[test]
    fn test_momentum_slope_short_series() {
        // 종가가 평균 기간보다 적으면 전체 평균 사용
        let slope = momentum_slope(&[1.0, 2.0, 3.0], 20);
        // avg = 2, vol = 1 → slope = 1
        assert_eq!(slope, 1.0);
        assert_eq!(momentum_slope(&[], 20), 0.0);
    }

    #[test]
    fn test_trait_object() {
        let estimator: Box<dyn SignalEstimator> = Box::new(MomentumSignalEstimator::default());
        assert_eq!(estimator.name(), "momentum");
        assert_eq!(estimator.estimate(&[]), SignalResult::neutral());
    }
}
