//! 수치 헬퍼.
//!
//! 모든 함수는 순수 함수이며 NaN/무한대를 경계에서 정리합니다.

/// 값을 `[min, max]` 범위로 제한합니다.
///
/// NaN은 `min`으로 처리합니다.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// 값을 `[0, 1]` 범위로 제한합니다.
///
/// 유한하지 않은 값(NaN, ±무한대)은 0.0이 됩니다.
pub fn clamp01(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// 유한한 값이면 그대로, 아니면 `fallback`을 반환합니다.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// 로지스틱 시그모이드 `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// 산술 평균. 빈 슬라이스는 0.0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 모집단 표준편차 (ddof = 0).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// 표본 표준편차 (ddof = 1). 값이 2개 미만이면 0.0.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
