//! 방향성 신호 예측 endpoint.
//!
//! `POST /forecast`는 OHLCV 윈도우를 받아 롱/숏 점수와 신뢰도를 반환합니다.
//!
//! # 요청
//!
//! ```json
//! {
//!   "symbol": "BTC/USDT",
//!   "interval": "1h",
//!   "ohlcv": [[1700000000000, 100.0, 101.0, 99.5, 100.5, 1234.0], ...]
//! }
//! ```
//!
//! `symbol`, `interval`이 없거나 빈 문자열이면 `"UNKNOWN"`, `ohlcv`가 없으면
//! 빈 목록입니다. 본문은 Content-Type과 무관하게 JSON으로 파싱하며, 빈 본문은
//! `{}`와 같습니다.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use balance_core::{bars_from_rows, PriceBar};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{from_domain_error, ApiErrorResponse, ApiResult};
use crate::metrics::{record_forecast, record_forecast_bars, ForecastOutcome};
use crate::state::{AppState, IMPL_NAME};

/// 심볼/인터벌 기본값.
pub const UNKNOWN: &str = "UNKNOWN";

/// 예측 요청 본문.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ForecastRequest {
    /// 심볼
    #[serde(default)]
    pub symbol: Option<String>,
    /// 캔들 인터벌
    #[serde(default)]
    pub interval: Option<String>,
    /// `[timestamp_ms, open, high, low, close, volume?]` 행 목록
    #[serde(default)]
    pub ohlcv: Option<Vec<Vec<f64>>>,
}

impl ForecastRequest {
    /// 요청 본문을 파싱합니다. 빈 본문은 기본 요청입니다.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// 심볼 (없거나 비어 있으면 "UNKNOWN").
    pub fn symbol(&self) -> &str {
        non_empty_or_unknown(self.symbol.as_deref())
    }

    /// 인터벌 (없거나 비어 있으면 "UNKNOWN").
    pub fn interval(&self) -> &str {
        non_empty_or_unknown(self.interval.as_deref())
    }

    /// 행 목록을 가격 바로 변환합니다.
    pub fn bars(&self) -> balance_core::BalanceResult<Vec<PriceBar>> {
        match &self.ohlcv {
            Some(rows) => bars_from_rows(rows),
            None => Ok(Vec::new()),
        }
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(UNKNOWN)
}

/// 예측 응답 메타데이터.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastMeta {
    /// 서비스 버전
    pub version: String,
    /// 요청 인터벌
    pub interval: String,
    /// 요청 심볼
    pub symbol: String,
    /// 입력 바 개수
    pub n: usize,
    /// 구현 식별자
    #[serde(rename = "impl")]
    pub implementation: String,
}

/// 예측 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub score_long: f64,
    pub score_short: f64,
    pub confidence: f64,
    pub meta: ForecastMeta,
}

/// POST /forecast
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ForecastResponse>> {
    let request = ForecastRequest::from_body(&body).map_err(|e| {
        warn!(error = %e, "Rejected malformed forecast payload");
        record_forecast(ForecastOutcome::Invalid);
        ApiErrorResponse::invalid_payload(format!("잘못된 요청 본문: {}", e))
    })?;

    let bars = request.bars().map_err(|e| {
        warn!(symbol = request.symbol(), error = %e, "Rejected forecast rows");
        record_forecast(ForecastOutcome::Invalid);
        from_domain_error(&e)
    })?;

    let signal = state.estimator.estimate(&bars);
    let outcome = if bars.len() < state.estimator_config.min_bars {
        ForecastOutcome::Neutral
    } else {
        ForecastOutcome::Ok
    };
    record_forecast(outcome);
    record_forecast_bars(bars.len());

    debug!(
        symbol = request.symbol(),
        interval = request.interval(),
        bars = bars.len(),
        long = signal.long_score,
        confidence = signal.confidence,
        "Forecast computed"
    );

    Ok(Json(ForecastResponse {
        score_long: signal.long_score,
        score_short: signal.short_score,
        confidence: signal.confidence,
        meta: ForecastMeta {
            version: state.version.clone(),
            interval: request.interval().to_string(),
            symbol: request.symbol().to_string(),
            n: bars.len(),
            implementation: IMPL_NAME.to_string(),
        },
    }))
}

/// 예측 라우터 생성.
pub fn forecast_router() -> Router<Arc<AppState>> {
    Router::new().route("/forecast", post(forecast))
}
