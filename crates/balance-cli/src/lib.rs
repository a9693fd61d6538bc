//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 백테스트 요약 스코어링 (`balance score`)
//! - OHLCV 파일 신호 추정 (`balance signal`)

pub mod commands;

pub use commands::*;
