use crate::utils::error::{CheckError, Result};
use crate::utils::validation::{self, Validate};
use std::fs;
use std::path::Path;

pub const SERVER_URL_FILE: &str = "credentials.txt";
pub const PASSWORD_FILE: &str = "pwd.txt";

/// relay server 的連線資訊，從兩個單行檔案讀取
#[derive(Clone)]
pub struct Credentials {
    pub server_url: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("server_url", &self.server_url)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    /// 從 `dir` 讀取 `credentials.txt` 與 `pwd.txt`
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let server_url = read_first_line(dir, SERVER_URL_FILE)?;
        let password = read_first_line(dir, PASSWORD_FILE)?;

        tracing::debug!("Loaded credentials from {}", dir.display());
        Ok(Self {
            server_url,
            password,
        })
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        validation::parse_http_url("server_url", &self.server_url)
            .map(|_| ())
            .map_err(|e| CheckError::CredentialError {
                file: SERVER_URL_FILE.to_string(),
                reason: e.to_string(),
            })
    }
}

/// 讀取檔案第一行並去除前後空白，檔案不存在或第一行為空都算錯誤
pub fn read_first_line(dir: &Path, filename: &str) -> Result<String> {
    let path = dir.join(filename);
    let content = fs::read_to_string(&path).map_err(|e| CheckError::CredentialError {
        file: filename.to_string(),
        reason: e.to_string(),
    })?;

    let line = content.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return Err(CheckError::CredentialError {
            file: filename.to_string(),
            reason: format!("Empty {}", filename),
        });
    }

    Ok(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_load_trims_first_line() {
        let dir = TempDir::new().unwrap();
        write(&dir, SERVER_URL_FILE, "  https://relay.example.com  \nignored\n");
        write(&dir, PASSWORD_FILE, "hunter2\n");

        let credentials = Credentials::load(dir.path()).unwrap();

        assert_eq!(credentials.server_url, "https://relay.example.com");
        assert_eq!(credentials.password, "hunter2");
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, SERVER_URL_FILE, "https://relay.example.com\n");

        let err = Credentials::load(dir.path()).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().starts_with("reading pwd.txt"));
    }

    #[test]
    fn test_empty_first_line_is_config_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, SERVER_URL_FILE, "   \nhttps://relay.example.com\n");
        write(&dir, PASSWORD_FILE, "hunter2");

        let err = Credentials::load(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "reading credentials.txt: Empty credentials.txt");
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let credentials = Credentials {
            server_url: "relay.example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let err = credentials.validate().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = Credentials {
            server_url: "https://relay.example.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
