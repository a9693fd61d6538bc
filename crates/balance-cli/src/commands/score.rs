//! 백테스트 요약 스코어링 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # 설정의 기본 정책으로 평가
//! balance score -i results.json
//!
//! # 모든 정책으로 평가하고 JSON 출력
//! balance score -i results.json -p all --json
//!
//! # 거래별 수익률 로그에서 요약을 만들어 평가
//! balance score -i trades.json --trades
//! ```
//!
//! 입력은 단일 요약 객체 또는 요약 배열입니다. `--trades`를 주면
//! `{"backtest_days": 70, "trades": [0.012, -0.004, ...]}` 형식의 거래 로그
//! (단일 객체 또는 배열)로 해석합니다. 결과는 첫 번째 정책의 손실값
//! 오름차순(좋은 후보 먼저)으로 정렬됩니다.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use balance_analytics::{
    balance_index, policy_for, DerivedMetrics, MetricGrades, ScoringPolicy, SummaryBuilder,
};
use balance_core::{parse_summaries, BacktestSummary, PolicyKind, ScoreReport};

use super::read_input;

/// 평가할 정책 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySelection {
    /// 단일 정책
    One(PolicyKind),
    /// 모든 정책
    All,
}

impl PolicySelection {
    /// 평가 순서대로 정책 목록을 반환합니다.
    pub fn kinds(&self) -> Vec<PolicyKind> {
        match self {
            PolicySelection::One(kind) => vec![*kind],
            PolicySelection::All => PolicyKind::ALL.to_vec(),
        }
    }
}

impl FromStr for PolicySelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(PolicySelection::All)
        } else {
            s.parse().map(PolicySelection::One)
        }
    }
}

/// 스코어 CLI 설정.
#[derive(Debug, Clone)]
pub struct ScoreCliConfig {
    /// 입력 파일 경로 (`-`이면 stdin)
    pub input: PathBuf,
    /// 정책 선택
    pub selection: PolicySelection,
    /// 입력을 거래 로그로 해석할지 여부
    pub trades: bool,
    /// JSON 출력 여부
    pub json: bool,
}

/// 거래별 수익률 로그.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeLog {
    /// 백테스트 기간(일)
    pub backtest_days: f64,
    /// 거래별 수익률 (0.01 = +1%)
    pub trades: Vec<f64>,
}

impl TradeLog {
    /// 거래 로그에서 백테스트 요약을 만듭니다.
    pub fn to_summary(&self) -> BacktestSummary {
        SummaryBuilder::new(self.backtest_days)
            .with_trades(self.trades.iter().copied())
            .build()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TradeLogPayload {
    Many(Vec<TradeLog>),
    One(TradeLog),
}

/// 거래 로그 JSON(단일 객체 또는 배열)을 요약 목록으로 변환합니다.
pub fn summaries_from_trade_logs(json: &str) -> Result<Vec<BacktestSummary>> {
    let payload: TradeLogPayload = serde_json::from_str(json)
        .context("거래 로그는 {backtest_days, trades} 형식이어야 합니다")?;
    let logs = match payload {
        TradeLogPayload::Many(logs) => logs,
        TradeLogPayload::One(log) => vec![log],
    };
    Ok(logs.iter().map(TradeLog::to_summary).collect())
}

/// 요약 하나의 평가 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSummary {
    /// 입력 내 순번 (0부터)
    pub index: usize,
    pub summary: BacktestSummary,
    pub metrics: DerivedMetrics,
    pub balance_index: f64,
    pub grades: MetricGrades,
    /// 선택된 정책별 리포트
    pub reports: Vec<ScoreReport>,
}

impl ScoredSummary {
    /// 정렬 기준 손실값 (첫 번째 정책).
    pub fn primary_loss(&self) -> f64 {
        self.reports.first().map_or(f64::INFINITY, |r| r.loss)
    }
}

/// 요약 목록을 평가하고 손실값 오름차순으로 정렬합니다.
pub fn score_summaries(
    summaries: &[BacktestSummary],
    selection: PolicySelection,
) -> Vec<ScoredSummary> {
    let kinds = selection.kinds();

    let mut results: Vec<ScoredSummary> = summaries
        .iter()
        .enumerate()
        .map(|(index, summary)| {
            let metrics = DerivedMetrics::from_summary(summary);
            ScoredSummary {
                index,
                summary: *summary,
                metrics,
                balance_index: balance_index(&metrics),
                grades: MetricGrades::from_metrics(&metrics),
                reports: kinds
                    .iter()
                    .map(|&kind| policy_for(kind).evaluate(summary))
                    .collect(),
            }
        })
        .collect();

    results.sort_by(|a, b| a.primary_loss().total_cmp(&b.primary_loss()));
    results
}

/// 스코어 명령 실행.
pub fn run_score(config: &ScoreCliConfig) -> Result<Vec<ScoredSummary>> {
    let content = read_input(&config.input)?;
    let summaries = if config.trades {
        summaries_from_trade_logs(&content)
    } else {
        parse_summaries(&content).map_err(Into::into)
    }
    .with_context(|| format!("요약 파싱 실패: {}", config.input.display()))?;

    info!(
        count = summaries.len(),
        policies = ?config.selection.kinds(),
        "Scoring backtest summaries"
    );

    let results = score_summaries(&summaries, config.selection);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results, &config.selection.kinds());
    }

    debug!(count = results.len(), "Scoring finished");
    Ok(results)
}

fn print_table(results: &[ScoredSummary], kinds: &[PolicyKind]) {
    println!("\n📊 스코어링 결과 (손실값 오름차순)");
    println!("═══════════════════════════════════════════════════════════════════════════════");

    let policy_header: Vec<String> = kinds.iter().map(|k| format!("{:>16}", k.as_str())).collect();
    println!(
        "  {:>3} | {:>6} {:>5} {:>5} {:>6} {:>6} | {:>7} |{}",
        "#",
        "WR%",
        "RR",
        "PF",
        "T/W",
        "DD%",
        "Balance",
        policy_header.join("")
    );
    println!("  ─────────────────────────────────────────────────────────────────────────────");

    for result in results {
        let losses: Vec<String> = result
            .reports
            .iter()
            .map(|r| match r.veto {
                Some(veto) => format!("{:>9.3} {:>6}", r.loss, short_veto(&veto.to_string())),
                None => format!("{:>16.3}", r.loss),
            })
            .collect();

        println!(
            "  {:>3} | {:>6.1} {:>5.2} {:>5.2} {:>6.1} {:>6.1} | {:>7.3} |{}",
            result.index,
            result.metrics.win_rate_pct,
            result.metrics.risk_reward,
            result.metrics.profit_factor,
            result.metrics.trades_per_week,
            result.metrics.drawdown_pct,
            result.balance_index,
            losses.join("")
        );
        println!(
            "      | 등급: 승률 {} / 손익비 {} / PF {}",
            result.grades.win_rate, result.grades.risk_reward, result.grades.profit_factor
        );
    }

    println!("═══════════════════════════════════════════════════════════════════════════════");
    println!();
}

fn short_veto(name: &str) -> String {
    name.chars().take(6).collect()
}
