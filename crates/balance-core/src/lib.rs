//! # Balance Core
//!
//! 밸런스 스코어링 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 가격 바 (`PriceBar`)
//! - 방향성 신호 결과 (`SignalResult`)
//! - 백테스트 요약 (`BacktestSummary`)
//! - 스코어링 정책 종류와 점수 리포트
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
