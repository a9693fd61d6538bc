//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 예측 요청 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 예측 메트릭
// ============================================================================

/// 예측 요청 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastOutcome {
    /// 정상 추정
    Ok,
    /// 바 부족으로 중립 신호 반환
    Neutral,
    /// 잘못된 요청 본문
    Invalid,
}

impl ForecastOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastOutcome::Ok => "ok",
            ForecastOutcome::Neutral => "neutral",
            ForecastOutcome::Invalid => "invalid",
        }
    }
}

/// 예측 요청 카운터 증가.
pub fn record_forecast(outcome: ForecastOutcome) {
    counter!("forecast_requests_total", "outcome" => outcome.as_str()).increment(1);
}

/// 요청당 바 개수 기록.
pub fn record_forecast_bars(count: usize) {
    histogram!("forecast_bars").record(count as f64);
}

/// 라벨 카디널리티를 제한하기 위해 알려진 경로만 그대로 두고 나머지는 묶습니다.
pub fn normalize_path(path: &str) -> &'static str {
    match path {
        "/forecast" => "/forecast",
        "/health" => "/health",
        "/health/ready" => "/health/ready",
        "/metrics" => "/metrics",
        _ => "other",
    }
}
