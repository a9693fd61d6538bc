//! CLI 명령어 구현 모듈.

pub mod score;
pub mod signal;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// 입력 파일을 읽습니다. 경로가 `-`이면 stdin에서 읽습니다.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("stdin 읽기 실패")?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("입력 파일을 읽을 수 없습니다: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"trade_count\": 1}}").unwrap();
        let content = read_input(file.path()).unwrap();
        assert_eq!(content, "{\"trade_count\": 1}");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("입력 파일을 읽을 수 없습니다"));
    }
}
