//! 밸런스 스코어링 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 하이퍼옵트 결과 요약을 균형형 정책으로 평가
//! balance score -i results.json
//!
//! # 세 정책 모두로 평가
//! balance score -i results.json -p all
//!
//! # 거래별 수익률 로그를 요약으로 변환해 평가
//! balance score -i trades.json --trades
//!
//! # stdin에서 OHLCV를 읽어 신호 추정
//! cat bars.json | balance signal -i - --json
//! ```

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tracing::debug;

use balance_cli::commands::score::{run_score, PolicySelection, ScoreCliConfig};
use balance_cli::commands::signal::{run_signal, SignalCliConfig};
use balance_core::{init_logging, AppConfig, LogConfig, LogFormat, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "balance")]
#[command(about = "Balance scoring CLI - 백테스트 스코어링 및 모멘텀 신호 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 상세 로그 출력 (debug 레벨)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 백테스트 요약을 스코어링 정책으로 평가
    Score {
        /// 요약 JSON 파일 (단일 객체 또는 배열, `-`이면 stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// 정책 (balanced, strict, conservative, all). 기본: 설정의 scoring.policy
        #[arg(short, long)]
        policy: Option<String>,

        /// 입력을 거래 로그({backtest_days, trades})로 해석
        #[arg(long)]
        trades: bool,

        /// JSON 형식으로 출력
        #[arg(long)]
        json: bool,
    },

    /// OHLCV 파일에서 모멘텀 신호 추정
    Signal {
        /// OHLCV JSON 파일 (요청 본문 또는 행 배열, `-`이면 stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// JSON 형식으로 출력
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // 명령 출력을 가리지 않도록 기본은 warn 레벨 (RUST_LOG가 우선)
    let level = if cli.verbose { "debug" } else { "warn" };
    init_logging(
        LogConfig::new(level)
            .with_format(LogFormat::Compact)
            .with_location(false),
    )
    .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    let config = AppConfig::load(&cli.config)?;
    debug!(path = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Score {
            input,
            policy,
            trades,
            json,
        } => {
            let selection = match policy {
                Some(name) => name.parse::<PolicySelection>().map_err(|e| anyhow!(e))?,
                None => PolicySelection::One(config.scoring.policy),
            };

            run_score(&ScoreCliConfig {
                input,
                selection,
                trades,
                json,
            })?;
        }
        Commands::Signal { input, json } => {
            run_signal(&SignalCliConfig { input, json }, &config.estimator)?;
        }
    }

    Ok(())
}
