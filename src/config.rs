//! Configuration management for the interview coach

use crate::error::{InterviewCoachError, Result};
use crate::session::QuestionType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub interview: InterviewConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline key, used only when the environment variable is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub default_duration_minutes: u32,
    pub default_question_type: QuestionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Clamp parsed model scores into [0, 100]. Off by default: the model's
    /// number is reported as given.
    pub clamp_scores: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub ats_report_name: String,
    pub summary_report_name: String,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-2.0-flash".to_string(),
                api_key_env: "GOOGLE_API_KEY".to_string(),
                api_key: None,
                timeout_secs: 60,
                enable_cache: true,
            },
            interview: InterviewConfig {
                default_duration_minutes: 10,
                default_question_type: QuestionType::Technical,
            },
            scoring: ScoringConfig {
                clamp_scores: false,
            },
            output: OutputConfig {
                output_dir: PathBuf::from("."),
                ats_report_name: "ats_analysis.pdf".to_string(),
                summary_report_name: "interview_summary.pdf".to_string(),
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, writing defaults there if it does not exist yet.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::parse(&content)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| InterviewCoachError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            InterviewCoachError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("interview-coach")
            .join("config.toml")
    }

    /// Resolve the gateway credential. The environment wins over the file;
    /// a missing key is a hard configuration error.
    pub fn api_key(&self) -> Result<String> {
        let from_env = std::env::var(&self.gateway.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        from_env
            .or_else(|| self.gateway.api_key.clone().filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| {
                InterviewCoachError::Configuration(format!(
                    "No API key found: set {} (or gateway.api_key in {})",
                    self.gateway.api_key_env,
                    Self::config_path().display()
                ))
            })
    }

    pub fn ats_report_path(&self) -> PathBuf {
        self.output.output_dir.join(&self.output.ats_report_name)
    }

    pub fn summary_report_path(&self) -> PathBuf {
        self.output.output_dir.join(&self.output.summary_report_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();

        assert_eq!(parsed.gateway.model, "gemini-2.0-flash");
        assert_eq!(parsed.interview.default_duration_minutes, 10);
        assert!(!parsed.scoring.clamp_scores);
        assert!(parsed.gateway.api_key.is_none());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = Config::parse("gateway = 3").unwrap_err();
        assert!(matches!(err, InterviewCoachError::Configuration(_)));
    }

    #[test]
    fn test_inline_key_used_when_env_missing() {
        let mut config = Config::default();
        config.gateway.api_key_env = "INTERVIEW_COACH_TEST_UNSET_KEY".to_string();
        config.gateway.api_key = Some("inline-key".to_string());

        assert_eq!(config.api_key().unwrap(), "inline-key");
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let mut config = Config::default();
        config.gateway.api_key_env = "INTERVIEW_COACH_TEST_ALSO_UNSET".to_string();

        let err = config.api_key().unwrap_err();
        assert!(err.to_string().contains("INTERVIEW_COACH_TEST_ALSO_UNSET"));
    }

    #[test]
    fn test_load_from_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.output.summary_report_name, "interview_summary.pdf");
    }
}
