//! 스코어링 및 신호 추정을 위한 도메인 모델.

mod backtest;
mod market_data;
mod score;
mod signal;

pub use backtest::*;
pub use market_data::*;
pub use score::*;
pub use signal::*;
