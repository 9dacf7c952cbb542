pub mod credentials;
pub mod settings;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATH: &str = "imessage_numbers.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "imessage-filter")]
#[command(about = "Check iMessage availability for a list of phone numbers")]
pub struct CliConfig {
    /// CSV file (one phone number per line)
    pub input_csv: String,

    /// Output CSV for iMessage-enabled numbers
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Directory holding credentials.txt and pwd.txt
    #[arg(long, default_value = ".")]
    pub credentials_dir: PathBuf,

    /// Optional TOML file overriding service and pacing settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty("input_csv", &self.input_csv)?;
        validation::validate_non_empty("output", &self.output)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::try_parse_from(["imessage-filter", "numbers.csv"]).unwrap();

        assert_eq!(config.input_csv, "numbers.csv");
        assert_eq!(config.output, "imessage_numbers.csv");
        assert_eq!(config.credentials_dir, PathBuf::from("."));
        assert!(config.config.is_none());
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_short_output_flag() {
        let config =
            CliConfig::try_parse_from(["imessage-filter", "numbers.csv", "-o", "capable.csv", "-v"])
                .unwrap();

        assert_eq!(config.output, "capable.csv");
        assert!(config.verbose);
    }

    #[test]
    fn test_input_is_required() {
        assert!(CliConfig::try_parse_from(["imessage-filter"]).is_err());
    }
}
