//! 거래 빈도 및 표본 충분성 점수.

/// 균형형 빈도 점수 (종형 곡선).
///
/// | 주당 거래 | 점수 |
/// |---|---|
/// | < 1 | tpw (선형) |
/// | 1 ~ 5 | 0.8 → 1.0 |
/// | 5 ~ 15 | 1.0 |
/// | 15 ~ 20 | 1.0 → 0.8 |
/// | > 20 | max(0.3, 1 - (tpw - 20) / 30) |
pub fn balanced_frequency_score(trades_per_week: f64) -> f64 {
    let tpw = trades_per_week;
    if !tpw.is_finite() {
        return 0.0;
    }

    if tpw < 1.0 {
        tpw.max(0.0)
    } else if tpw > 20.0 {
        (1.0 - (tpw - 20.0) / 30.0).max(0.3)
    } else if (5.0..=15.0).contains(&tpw) {
        1.0
    } else if tpw < 5.0 {
        0.8 + (tpw - 1.0) * 0.05
    } else {
        1.0 - (tpw - 15.0) * 0.04
    }
}

/// 엄격 균형형 빈도 점수.
///
/// 주당 3 ~ 12회는 1.0, 그 밖은 7.5회에서 멀어질수록 감소 (최소 0.3).
pub fn strict_frequency_score(trades_per_week: f64) -> f64 {
    let tpw = trades_per_week;
    if !tpw.is_finite() {
        return 0.3;
    }

    if (3.0..=12.0).contains(&tpw) {
        1.0
    } else {
        (1.0 - (tpw - 7.5).abs() / 15.0).max(0.3)
    }
}

/// 표본 충분성 배수.
///
/// 10회 미만 0.5, 10 ~ 29회 0.7에서 선형 증가, 30회 이상 1.0.
pub fn sample_sufficiency(trade_count: u32) -> f64 {
    match trade_count {
        0..=9 => 0.5,
        10..=29 => 0.7 + f64::from(trade_count - 10) * 0.015,
        _ => 1.0,
    }
}

/// 엄격 균형형 표본 배수. 20회 미만이면 절반.
pub fn trade_floor_multiplier(trade_count: u32) -> f64 {
    if trade_count < 20 {
        0.5
    } else {
        1.0
    }
}
