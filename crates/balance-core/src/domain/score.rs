//! 스코어링 정책 종류와 점수 리포트.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 거래가 없을 때 반환하는 손실값 (최적화기는 "거부"로 취급).
pub const NO_TRADES_LOSS: f64 = 100.0;

/// 스코어링 정책 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// 균형형: 비율 기반 하위 점수 + 빈도 종형 곡선 + 거부 게이트
    #[default]
    Balanced,
    /// 엄격 균형형: 목표치 대비 편차 기반
    #[serde(alias = "strict")]
    StrictBalanced,
    /// 보수형: 낙폭 통제 우선
    Conservative,
}

impl PolicyKind {
    /// 모든 정책 종류.
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Balanced,
        PolicyKind::StrictBalanced,
        PolicyKind::Conservative,
    ];

    /// 정책 식별자.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Balanced => "balanced",
            PolicyKind::StrictBalanced => "strict_balanced",
            PolicyKind::Conservative => "conservative",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "balanced" | "a" => Ok(Self::Balanced),
            "strict_balanced" | "strict" | "b" => Ok(Self::StrictBalanced),
            "conservative" | "c" => Ok(Self::Conservative),
            _ => Err(format!("Unknown scoring policy: {}", s)),
        }
    }
}

/// 합성 점수를 대체하거나 감쇠시킨 거부/감점 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoReason {
    /// 거래 없음 (손실 100.0)
    NoTrades,
    /// 손익비 0 이하 또는 총 수익률 -10% 이하
    SevereLoss,
    /// 승률 20% 미만
    LowWinRate,
    /// 최대 낙폭 50% 초과
    ExcessiveDrawdown,
    /// 보수형 리스크 통제 기준 미달 (점수 x0.3)
    RiskControl,
}

impl fmt::Display for VetoReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VetoReason::NoTrades => "no_trades",
            VetoReason::SevereLoss => "severe_loss",
            VetoReason::LowWinRate => "low_win_rate",
            VetoReason::ExcessiveDrawdown => "excessive_drawdown",
            VetoReason::RiskControl => "risk_control",
        };
        write!(f, "{}", name)
    }
}

/// 정책 평가 결과.
///
/// `loss == -final_score`이며 손실이 낮을수록 좋은 후보입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// 평가 정책
    pub policy: PolicyKind,
    /// 최종 적합도 점수 (높을수록 좋음)
    pub final_score: f64,
    /// 최적화기에 전달할 손실값 (낮을수록 좋음)
    pub loss: f64,
    /// 하위 점수
    pub components: BTreeMap<String, f64>,
    /// 거부/감점 사유
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veto: Option<VetoReason>,
}

impl ScoreReport {
    /// 최종 점수로 리포트를 생성합니다.
    pub fn new(policy: PolicyKind, final_score: f64) -> Self {
        Self {
            policy,
            final_score,
            loss: -final_score,
            components: BTreeMap::new(),
            veto: None,
        }
    }

    /// 거래가 없는 후보의 리포트.
    pub fn no_trades(policy: PolicyKind) -> Self {
        Self {
            veto: Some(VetoReason::NoTrades),
            ..Self::new(policy, -NO_TRADES_LOSS)
        }
    }

    /// 하위 점수를 추가합니다.
    pub fn with_component(mut self, name: impl Into<String>, value: f64) -> Self {
        self.components.insert(name.into(), value);
        self
    }

    /// 거부/감점 사유를 설정합니다.
    pub fn with_veto(mut self, veto: Option<VetoReason>) -> Self {
        self.veto = veto;
        self
    }

    /// 하위 점수를 조회합니다.
    pub fn component(&self, name: &str) -> Option<f64> {
        self.components.get(name).copied()
    }
}
