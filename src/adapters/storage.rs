use crate::domain::ports::Storage;
use crate::utils::error::{CheckError, Result};
use std::fs;
use std::path::PathBuf;

/// 以 `base_path` 為基準讀寫本機檔案；絕對路徑會直接使用
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 以目前工作目錄為基準
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| CheckError::InputError {
            path: full_path.display().to_string(),
            reason: e.to_string(),
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        // 不自動建立上層目錄，目錄不存在就視為無法寫入
        let full_path = self.resolve(path);
        fs::write(&full_path, data).map_err(|e| CheckError::OutputError {
            path: full_path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        tokio_test::block_on(storage.write_file("numbers.csv", b"+15551234567\n")).unwrap();
        let data = tokio_test::block_on(storage.read_file("numbers.csv")).unwrap();

        assert_eq!(data, b"+15551234567\n");
    }

    #[test]
    fn test_missing_input_is_input_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = tokio_test::block_on(storage.read_file("missing.csv")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_missing_output_dir_is_output_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = tokio_test::block_on(storage.write_file("no/such/dir/out.csv", b"")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Output);
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let absolute = temp_dir.path().join("abs.csv");
        let storage = LocalStorage::new("/definitely/not/here");

        tokio_test::block_on(storage.write_file(absolute.to_str().unwrap(), b"x\n")).unwrap();
        assert_eq!(std::fs::read(&absolute).unwrap(), b"x\n");
    }
}
