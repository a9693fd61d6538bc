//! OHLCV 파일에서 모멘텀 신호를 추정하는 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # 예측 요청 본문 형식 ({"symbol": ..., "interval": ..., "ohlcv": [...]})
//! balance signal -i request.json
//!
//! # OHLCV 배열만 있는 파일
//! balance signal -i bars.json --json
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use balance_analytics::MomentumSignalEstimator;
use balance_core::{bars_from_rows, EstimatorConfig, SignalSide};

use super::read_input;

const UNKNOWN: &str = "UNKNOWN";

/// 신호 명령 입력 형식.
///
/// 배열이면 OHLCV 행 목록으로, 객체면 예측 요청 본문으로 해석합니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SignalInput {
    Rows(Vec<Vec<f64>>),
    Request {
        #[serde(default)]
        symbol: Option<String>,
        #[serde(default)]
        interval: Option<String>,
        #[serde(default)]
        ohlcv: Option<Vec<Vec<f64>>>,
    },
}

impl SignalInput {
    /// (심볼, 간격, OHLCV 행)으로 분해합니다. 없거나 빈 값은 "UNKNOWN"/빈 목록.
    fn into_parts(self) -> (String, String, Vec<Vec<f64>>) {
        match self {
            SignalInput::Rows(rows) => (UNKNOWN.to_string(), UNKNOWN.to_string(), rows),
            SignalInput::Request {
                symbol,
                interval,
                ohlcv,
            } => (
                or_unknown(symbol),
                or_unknown(interval),
                ohlcv.unwrap_or_default(),
            ),
        }
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// 신호 CLI 설정.
#[derive(Debug, Clone)]
pub struct SignalCliConfig {
    /// 입력 파일 경로 (`-`이면 stdin)
    pub input: PathBuf,
    /// JSON 출력 여부
    pub json: bool,
}

/// 신호 추정 출력.
#[derive(Debug, Clone, Serialize)]
pub struct SignalOutput {
    pub symbol: String,
    pub interval: String,
    /// 입력 바 개수
    pub n: usize,
    pub long_score: f64,
    pub short_score: f64,
    pub confidence: f64,
    pub side: SignalSide,
}

/// JSON 문자열에서 신호를 추정합니다.
pub fn estimate_from_json(content: &str, config: &EstimatorConfig) -> Result<SignalOutput> {
    let input: SignalInput =
        serde_json::from_str(content).context("OHLCV 입력 JSON 파싱 실패")?;
    let (symbol, interval, rows) = input.into_parts();

    let bars = bars_from_rows(&rows)?;
    let signal = MomentumSignalEstimator::new(config.clone())?.estimate(&bars);

    Ok(SignalOutput {
        symbol,
        interval,
        n: bars.len(),
        long_score: signal.long_score,
        short_score: signal.short_score,
        confidence: signal.confidence,
        side: signal.side(),
    })
}

/// 신호 명령 실행.
pub fn run_signal(cli: &SignalCliConfig, estimator: &EstimatorConfig) -> Result<SignalOutput> {
    let content = read_input(&cli.input)?;
    let output = estimate_from_json(&content, estimator)
        .with_context(|| format!("신호 추정 실패: {}", cli.input.display()))?;

    info!(
        symbol = %output.symbol,
        n = output.n,
        side = ?output.side,
        "Signal estimated"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n📈 모멘텀 신호: {} ({})", output.symbol, output.interval);
        println!("═══════════════════════════════════════");
        println!("  바 개수:     {}", output.n);
        println!("  롱 점수:     {:.4}", output.long_score);
        println!("  숏 점수:     {:.4}", output.short_score);
        println!("  신뢰도:      {:.4}", output.confidence);
        println!("  방향:        {:?}", output.side);
        println!("═══════════════════════════════════════\n");
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising_rows(count: usize) -> Vec<Vec<f64>> {
        (0..count)
            .map(|i| {
                let close = 100.0 + i as f64;
                vec![i as f64 * 60_000.0, close, close + 1.0, close - 1.0, close, 10.0]
            })
            .collect()
    }

    #[test]
    fn test_bare_rows_input() {
        let json = serde_json::to_string(&rising_rows(40)).unwrap();
        let output = estimate_from_json(&json, &EstimatorConfig::default()).unwrap();

        assert_eq!(output.symbol, "UNKNOWN");
        assert_eq!(output.n, 40);
        assert_eq!(output.side, SignalSide::Long);
        assert!((output.long_score + output.short_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_request_input_with_few_bars_is_neutral() {
        let json = serde_json::json!({
            "symbol": "BTC/USDT",
            "interval": "5m",
            "ohlcv": rising_rows(3),
        })
        .to_string();
        let output = estimate_from_json(&json, &EstimatorConfig::default()).unwrap();

        assert_eq!(output.symbol, "BTC/USDT");
        assert_eq!(output.interval, "5m");
        assert_eq!(output.n, 3);
        assert_eq!(output.long_score, 0.5);
        assert_eq!(output.confidence, 0.4);
        assert_eq!(output.side, SignalSide::Neutral);
    }

    #[test]
    fn test_request_without_ohlcv() {
        let output = estimate_from_json("{}", &EstimatorConfig::default()).unwrap();
        assert_eq!(output.n, 0);
        assert_eq!(output.interval, "UNKNOWN");

        let output =
            estimate_from_json(r#"{"symbol": "", "interval": ""}"#, &EstimatorConfig::default())
                .unwrap();
        assert_eq!(output.symbol, "UNKNOWN");
        assert_eq!(output.interval, "UNKNOWN");
    }

    #[test]
    fn test_short_row_rejected() {
        let err = estimate_from_json("[[1, 2, 3, 4]]", &EstimatorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("ohlcv[0]"));
    }

    #[test]
    fn test_invalid_estimator_config_rejected() {
        let config = EstimatorConfig {
            average_period: 0,
            ..Default::default()
        };
        let json = serde_json::to_string(&rising_rows(20)).unwrap();
        assert!(estimate_from_json(&json, &config).is_err());
    }

    #[test]
    fn test_run_signal_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.json");
        std::fs::write(&path, serde_json::to_string(&rising_rows(25)).unwrap()).unwrap();

        let cli = SignalCliConfig { input: path, json: true };
        let output = run_signal(&cli, &EstimatorConfig::default()).unwrap();
        assert_eq!(output.n, 25);
    }
}
