//! 시장 데이터 타입.
//!
//! - `PriceBar` - OHLCV 가격 바
//! - `bars_from_rows` - `[timestamp_ms, open, high, low, close, volume]` 행 변환

use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, BalanceResult};

/// OHLCV 행에 필요한 최소 값 개수 (timestamp ~ close).
pub const MIN_ROW_LEN: usize = 5;

/// OHLCV 가격 바.
///
/// 호출자가 시간순으로 정렬해 전달하며, 추정기는 읽기 전용으로 빌려 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 바 시작 시간 (Unix epoch 밀리초)
    pub timestamp_ms: i64,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: f64,
}

impl PriceBar {
    /// 새 가격 바를 생성합니다.
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 원시 OHLCV 행에서 가격 바를 생성합니다.
    ///
    /// 행은 최소 `[timestamp_ms, open, high, low, close]`를 포함해야 하며,
    /// 거래량이 없으면 0.0으로 채웁니다.
    pub fn from_row(row: &[f64]) -> BalanceResult<Self> {
        if row.len() < MIN_ROW_LEN {
            return Err(BalanceError::InvalidInput(format!(
                "OHLCV 행에는 최소 {}개 값이 필요합니다: {}개 제공",
                MIN_ROW_LEN,
                row.len()
            )));
        }

        Ok(Self {
            timestamp_ms: row[0] as i64,
            open: row[1],
            high: row[2],
            low: row[3],
            close: row[4],
            volume: row.get(5).copied().unwrap_or(0.0),
        })
    }
}

/// 원시 OHLCV 행 목록을 가격 바로 변환합니다.
///
/// 첫 번째 잘못된 행에서 행 인덱스를 포함한 에러를 반환합니다.
pub fn bars_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> BalanceResult<Vec<PriceBar>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            PriceBar::from_row(row.as_ref()).map_err(|e| match e {
                BalanceError::InvalidInput(msg) => {
                    BalanceError::InvalidInput(format!("ohlcv[{}]: {}", idx, msg))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_full_row() {
        let bar = PriceBar::from_row(&[1_700_000_000_000.0, 10.0, 12.0, 9.0, 11.0, 500.0]).unwrap();
        assert_eq!(bar.timestamp_ms, 1_700_000_000_000);
        assert_eq!(bar.close, 11.0);
        assert_eq!(bar.volume, 500.0);
    }

    #[test]
    fn test_row_without_volume() {
        let bar = PriceBar::from_row(&[0.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(bar.volume, 0.0);
    }

    #[test]
    fn test_short_row_rejected() {
        let err = PriceBar::from_row(&[0.0, 1.0, 2.0]).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_bars_from_rows_reports_index() {
        let rows = vec![vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0], vec![1.0, 2.0]];
        let err = bars_from_rows(&rows).unwrap_err();
        assert!(err.to_string().contains("ohlcv[1]"));

        let rows = vec![vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0]; 3];
        assert_eq!(bars_from_rows(&rows).unwrap().len(), 3);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn row_length_decides_validity(row in prop::collection::vec(-1e6f64..1e6, 0..9)) {
                match PriceBar::from_row(&row) {
                    Ok(bar) => {
                        prop_assert!(row.len() >= MIN_ROW_LEN);
                        prop_assert_eq!(bar.close, row[4]);
                        prop_assert_eq!(bar.volume, row.get(5).copied().unwrap_or(0.0));
                    }
                    Err(_) => prop_assert!(row.len() < MIN_ROW_LEN),
                }
            }

            #[test]
            fn first_short_row_is_reported(valid in 0usize..20, short_len in 0usize..MIN_ROW_LEN) {
                let mut rows = vec![vec![0.0, 1.0, 1.0, 1.0, 1.0]; valid];
                rows.push(vec![1.0; short_len]);
                let err = bars_from_rows(&rows).unwrap_err();
                let expected = format!("ohlcv[{}]", valid);
                prop_assert!(err.to_string().contains(&expected));
            }
        }
    }
}
