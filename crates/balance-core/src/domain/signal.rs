//! 방향성 신호 결과.

use serde::{Deserialize, Serialize};

/// 롱/숏 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSide {
    /// 롱 우세
    Long,
    /// 숏 우세
    Short,
    /// 중립
    Neutral,
}

/// 모멘텀 신호 추정 결과.
///
/// `long_score + short_score == 1.0`이며 모든 값은 0.0 ~ 1.0 범위입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    /// 롱 점수
    pub long_score: f64,
    /// 숏 점수
    pub short_score: f64,
    /// 신뢰도
    pub confidence: f64,
}

impl SignalResult {
    /// 중립 롱/숏 점수.
    pub const NEUTRAL_SCORE: f64 = 0.5;
    /// 데이터 부족 시 기본 신뢰도.
    pub const PRIOR_CONFIDENCE: f64 = 0.4;

    /// 데이터 부족 시 반환하는 중립 사전 신호.
    pub const fn neutral() -> Self {
        Self {
            long_score: Self::NEUTRAL_SCORE,
            short_score: Self::NEUTRAL_SCORE,
            confidence: Self::PRIOR_CONFIDENCE,
        }
    }

    /// 우세한 방향을 반환합니다.
    pub fn side(&self) -> SignalSide {
        if self.long_score > self.short_score {
            SignalSide::Long
        } else if self.short_score > self.long_score {
            SignalSide::Short
        } else {
            SignalSide::Neutral
        }
    }
}

impl Default for SignalResult {
    fn default() -> Self {
        Self::neutral()
    }
}
