//! 백테스트 결과 요약.
//!
//! 외부 백테스트/최적화 도구가 평가마다 통째로 전달하는 입력 레코드입니다.
//! 필드 이름은 freqtrade 결과 키(`winrate`, `profit_total_pct`)도 별칭으로 받습니다.

use serde::{Deserialize, Serialize};

use crate::error::BalanceResult;

/// 백테스트 결과 요약.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSummary {
    /// 승률 (0.0 ~ 1.0)
    #[serde(alias = "winrate")]
    pub win_rate: f64,
    /// 평균 수익 거래 수익률
    pub avg_profit_ratio: f64,
    /// 평균 손실 거래 수익률 (보통 음수)
    pub avg_loss_ratio: f64,
    /// 손익비 (총이익 / 총손실). 계산 불가 시 None
    pub profit_factor: Option<f64>,
    /// 백테스트 기간 (일)
    pub backtest_days: f64,
    /// 최대 낙폭 (비율, 부호 무관)
    pub max_drawdown: f64,
    /// 총 수익률 (%)
    #[serde(alias = "profit_total_pct")]
    pub total_return_pct: f64,
    /// 거래 횟수
    pub trade_count: u32,
}

impl Default for BacktestSummary {
    fn default() -> Self {
        Self {
            win_rate: 0.0,
            avg_profit_ratio: 0.0,
            avg_loss_ratio: 0.0,
            profit_factor: None,
            backtest_days: 1.0,
            max_drawdown: 0.0,
            total_return_pct: 0.0,
            trade_count: 0,
        }
    }
}

impl BacktestSummary {
    /// 거래가 하나도 없는지 확인합니다.
    pub fn has_no_trades(&self) -> bool {
        self.trade_count == 0
    }

    /// 거래 횟수를 바꾼 사본을 반환합니다.
    pub fn with_trade_count(mut self, trade_count: u32) -> Self {
        self.trade_count = trade_count;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummaryPayload {
    Many(Vec<BacktestSummary>),
    One(BacktestSummary),
}

/// JSON 문자열에서 요약을 파싱합니다.
///
/// 단일 객체와 객체 배열을 모두 받습니다.
pub fn parse_summaries(json: &str) -> BalanceResult<Vec<BacktestSummary>> {
    let payload: SummaryPayload = serde_json::from_str(json)?;
    Ok(match payload {
        SummaryPayload::Many(summaries) => summaries,
        SummaryPayload::One(summary) => vec![summary],
    })
}
