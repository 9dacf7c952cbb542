use crate::adapters::http::{
    ServiceSettings, DEFAULT_AVAILABILITY_PATH, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::core::pacing::{PacingPolicy, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY};
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MAX_DELAY_SECONDS: f64 = 3600.0;
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// 選用的 TOML 設定檔，所有欄位都有預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub pacing: PacingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    pub availability_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacingSection {
    pub min_delay_seconds: Option<f64>,
    pub max_delay_seconds: Option<f64>,
}

impl SettingsFile {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CheckError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${RELAY_USER_AGENT})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.to_string()
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            availability_path: self
                .service
                .availability_path
                .clone()
                .unwrap_or_else(|| DEFAULT_AVAILABILITY_PATH.to_string()),
            timeout: self
                .service
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            user_agent: self
                .service
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }

    pub fn pacing_policy(&self) -> Result<PacingPolicy> {
        let min = self
            .pacing
            .min_delay_seconds
            .unwrap_or(DEFAULT_MIN_DELAY.as_secs_f64());
        let max = self
            .pacing
            .max_delay_seconds
            .unwrap_or(DEFAULT_MAX_DELAY.as_secs_f64());

        for (field, value) in [
            ("pacing.min_delay_seconds", min),
            ("pacing.max_delay_seconds", max),
        ] {
            if !value.is_finite() {
                return Err(CheckError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: "Value must be a finite number".to_string(),
                });
            }
        }
        validation::validate_range("pacing.min_delay_seconds", min, 0.0, MAX_DELAY_SECONDS)?;
        validation::validate_range("pacing.max_delay_seconds", max, min, MAX_DELAY_SECONDS)?;

        PacingPolicy::new(Duration::from_secs_f64(min), Duration::from_secs_f64(max))
    }
}

impl Validate for SettingsFile {
    fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_range("service.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        if let Some(path) = &self.service.availability_path {
            validation::validate_non_empty("service.availability_path", path)?;
            if !path.starts_with('/') {
                return Err(CheckError::InvalidConfigValueError {
                    field: "service.availability_path".to_string(),
                    value: path.clone(),
                    reason: "Path must start with '/'".to_string(),
                });
            }
        }

        if let Some(user_agent) = &self.service.user_agent {
            validation::validate_non_empty("service.user_agent", user_agent)?;
        }

        self.pacing_policy()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = SettingsFile::from_toml_str("").unwrap();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.service_settings(), ServiceSettings::default());
        assert_eq!(settings.pacing_policy().unwrap(), PacingPolicy::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[service]
availability_path = "/api/v2/availability"
timeout_seconds = 30
user_agent = "imessage-filter/0.1"

[pacing]
min_delay_seconds = 1.5
max_delay_seconds = 3
"#;

        let settings = SettingsFile::from_toml_str(toml_content).unwrap();
        assert!(settings.validate().is_ok());

        let service = settings.service_settings();
        assert_eq!(service.availability_path, "/api/v2/availability");
        assert_eq!(service.timeout, Duration::from_secs(30));
        assert_eq!(service.user_agent, "imessage-filter/0.1");

        let pacing = settings.pacing_policy().unwrap();
        assert_eq!(pacing.min_delay(), Duration::from_millis(1500));
        assert_eq!(pacing.max_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("IMESSAGE_FILTER_TEST_UA", "relay-checker");

        let toml_content = r#"
[service]
user_agent = "${IMESSAGE_FILTER_TEST_UA}"
"#;

        let settings = SettingsFile::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.service_settings().user_agent, "relay-checker");

        std::env::remove_var("IMESSAGE_FILTER_TEST_UA");
    }

    #[test]
    fn test_config_validation() {
        let zero_timeout = SettingsFile::from_toml_str("[service]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());

        let huge_timeout =
            SettingsFile::from_toml_str("[service]\ntimeout_seconds = 100000\n").unwrap();
        assert!(huge_timeout.validate().is_err());

        let blank_agent = SettingsFile::from_toml_str("[service]\nuser_agent = \" \"\n").unwrap();
        assert!(blank_agent.validate().is_err());

        let relative_path =
            SettingsFile::from_toml_str("[service]\navailability_path = \"api/v1\"\n").unwrap();
        assert!(relative_path.validate().is_err());

        let inverted = SettingsFile::from_toml_str(
            "[pacing]\nmin_delay_seconds = 10.0\nmax_delay_seconds = 5.0\n",
        )
        .unwrap();
        assert!(inverted.validate().is_err());

        let negative = SettingsFile::from_toml_str("[pacing]\nmin_delay_seconds = -1.0\n").unwrap();
        assert!(negative.validate().is_err());

        let not_a_number = SettingsFile::from_toml_str("[pacing]\nmax_delay_seconds = nan\n").unwrap();
        assert!(not_a_number.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = SettingsFile::from_toml_str("[service]\nretries = 3\n");
        assert!(matches!(result, Err(CheckError::TomlError(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[pacing]\nmin_delay_seconds = 0.0\nmax_delay_seconds = 0.0\n")
            .unwrap();

        let settings = SettingsFile::from_file(temp_file.path()).unwrap();
        assert!(settings.pacing_policy().unwrap().is_disabled());
    }
}
