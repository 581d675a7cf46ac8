use crate::core::profile::{Profile, DEFAULT_PROFILE};
use crate::core::ConfigProvider;
use crate::domain::model::LineEnding;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "property-etl")]
#[command(about = "Convert property JSON records into a CMS import CSV")]
pub struct CliConfig {
    /// JSON file holding an array of property records
    #[arg(long, default_value = "data/properties.json")]
    pub input: String,

    /// Destination CSV file (overwritten)
    #[arg(long, default_value = "data/content_entries.csv")]
    pub output: String,

    /// Output profile: advanced, standard or minimal
    #[arg(long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Join lines with CRLF instead of LF
    #[arg(long)]
    pub crlf: bool,

    /// Fixed run timestamp (RFC 3339) instead of the current time
    #[arg(long)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Print the built-in profiles and exit
    #[arg(long)]
    pub list_profiles: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn resolve_profile(&self) -> Result<Profile> {
        let profile = Profile::resolve(&self.profile)?;
        profile.validate_for_delimiter(self.delimiter)?;
        Ok(profile)
    }

    pub fn run_started_at(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_else(Utc::now)
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn line_ending(&self) -> LineEnding {
        if self.crlf {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output", &self.output)?;
        validation::validate_delimiter("delimiter", self.delimiter)?;
        validation::validate_non_empty_string("profile", &self.profile)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["property-etl"]);
        assert_eq!(config.input_path(), "data/properties.json");
        assert_eq!(config.output_path(), "data/content_entries.csv");
        assert_eq!(config.profile, "advanced");
        assert_eq!(config.delimiter(), ',');
        assert_eq!(config.line_ending(), LineEnding::Lf);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let config = CliConfig::parse_from([
            "property-etl",
            "--input",
            "in.json",
            "--profile",
            "minimal",
            "--delimiter",
            ";",
            "--crlf",
            "--timestamp",
            "2024-05-01T12:00:00Z",
        ]);
        assert_eq!(config.delimiter(), ';');
        assert_eq!(config.line_ending(), LineEnding::Crlf);
        assert_eq!(
            config.run_started_at().to_rfc3339(),
            "2024-05-01T12:00:00+00:00"
        );
        assert_eq!(config.resolve_profile().unwrap().name, "minimal");
    }

    #[test]
    fn test_unknown_profile() {
        let config = CliConfig::parse_from(["property-etl", "--profile", "legacy"]);
        assert!(matches!(
            config.resolve_profile(),
            Err(EtlError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn test_quote_delimiter_rejected() {
        let config = CliConfig::parse_from(["property-etl", "--delimiter", "\""]);
        assert!(config.validate().is_err());
    }
}
