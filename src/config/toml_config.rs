use crate::core::profile::{Profile, DEFAULT_PROFILE};
use crate::core::ConfigProvider;
use crate::domain::model::LineEnding;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub load: LoadConfig,
    /// Custom profiles, looked up before the built-in ones.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub profile: Option<String>,
    /// RFC 3339 string; the current time when omitted.
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub delimiter: Option<char>,
    pub line_ending: Option<LineEnding>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| EtlError::ConfigValidationError {
                field: "config_file".to_string(),
                message: format!("Cannot read {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn profile_name(&self) -> &str {
        self.transform.profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }

    /// 取得輸出設定檔：先找自訂設定檔，再找內建設定檔
    pub fn resolve_profile(&self) -> Result<Profile> {
        let name = self.profile_name();
        let profile = match self.profiles.get(name) {
            Some(custom) => {
                let mut profile = custom.clone();
                if profile.name.is_empty() {
                    profile.name = name.to_string();
                }
                profile.validate()?;
                profile
            }
            None => Profile::builtin(name).ok_or_else(|| {
                let mut available: Vec<&str> = Profile::builtin_names().to_vec();
                available.extend(self.profiles.keys().map(String::as_str));
                EtlError::UnknownProfile {
                    name: name.to_string(),
                    available: available.join(", "),
                }
            })?,
        };

        profile.validate_for_delimiter(self.delimiter())?;
        Ok(profile)
    }

    pub fn run_started_at(&self) -> DateTime<Utc> {
        self.transform.timestamp.unwrap_or_else(Utc::now)
    }

    pub fn validate_config(&self) -> Result<()> {
        let input_path =
            validation::validate_required_field("source.input_path", &self.source.input_path)?;
        validation::validate_path("source.input_path", input_path)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_delimiter("load.delimiter", self.delimiter())?;

        for (name, profile) in &self.profiles {
            let mut profile = profile.clone();
            if profile.name.is_empty() {
                profile.name = name.clone();
            }
            profile.validate()?;
        }

        self.resolve_profile()?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.source.input_path.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn delimiter(&self) -> char {
        self.load.delimiter.unwrap_or(',')
    }

    fn line_ending(&self) -> LineEnding {
        self.load.line_ending.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
