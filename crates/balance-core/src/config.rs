//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 로드 순서는 기본값 → TOML 파일(선택) → `BALANCE__` 접두사 환경 변수입니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::PolicyKind;
use crate::error::{BalanceError, BalanceResult};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 모멘텀 신호 추정기 설정
    pub estimator: EstimatorConfig,
    /// 스코어링 엔진 설정
    pub scoring: ScoringConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// CORS 허용 origin 목록 (비어 있으면 모든 origin 허용)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8001,
            request_timeout_secs: 30,
            cors_origins: Vec::new(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 모멘텀 신호 추정기 설정.
///
/// 기본값은 표준 추정 규칙을 그대로 재현합니다.
/// `confidence_cap = 0.9`로 두면 신뢰도 상한을 0.9로 고정합니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// 추론에 필요한 최소 바 개수 (미만이면 중립 신호)
    pub min_bars: usize,
    /// 사용할 최근 종가 개수 상한
    pub window: usize,
    /// 기준 평균 기간
    pub average_period: usize,
    /// 기울기 크기 정규화 값 (|slope| / slope_scale)
    pub slope_scale: f64,
    /// 표본 깊이 정규화 값 (N / depth_bars)
    pub depth_bars: usize,
    /// 신뢰도 상한 (0.0 ~ 1.0)
    pub confidence_cap: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_bars: 10,
            window: 200,
            average_period: 20,
            slope_scale: 3.0,
            depth_bars: 480,
            confidence_cap: 1.0,
        }
    }
}

impl EstimatorConfig {
    /// 설정 값의 유효성을 검사합니다.
    pub fn validate(&self) -> BalanceResult<()> {
        if self.window == 0 || self.average_period == 0 || self.depth_bars == 0 {
            return Err(BalanceError::Config(
                "estimator.window, average_period, depth_bars는 0보다 커야 합니다".to_string(),
            ));
        }
        if !(self.slope_scale.is_finite() && self.slope_scale > 0.0) {
            return Err(BalanceError::Config(format!(
                "estimator.slope_scale은 양수여야 합니다: {}",
                self.slope_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_cap) {
            return Err(BalanceError::Config(format!(
                "estimator.confidence_cap은 0.0 ~ 1.0 범위여야 합니다: {}",
                self.confidence_cap
            )));
        }
        Ok(())
    }
}

/// 스코어링 엔진 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// 기본 스코어링 정책
    pub policy: PolicyKind,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> BalanceResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8001)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("BALANCE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.estimator.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> BalanceResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
