use crate::domain::model::TransformRules;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// One year.
pub const MAX_INTERVAL_MINUTES: u64 = 365 * 24 * 60;

/// Application configuration. Every section and field falls back to the
/// reference configuration, so an empty document is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub transform: TransformConfig,
    pub load: LoadConfig,
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: "periodic-etl".to_string(),
            description: "API + database extraction with discount transform".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Unset means no client-side timeout.
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.exemplo.com/dados".to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub min_value: f64,
    pub discount_factor: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        let rules = TransformRules::default();
        Self {
            min_value: rules.min_value,
            discount_factor: rules.discount_factor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub temp_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            temp_path: "temp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub interval_minutes: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: String,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "processamento.log".to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        if !self.transform.min_value.is_finite() {
            return Err(EtlError::InvalidConfigValueError {
                field: "transform.min_value".to_string(),
                value: self.transform.min_value.to_string(),
                reason: "Value must be a finite number".to_string(),
            });
        }
        if self.transform.discount_factor <= 0.0 {
            return Err(EtlError::InvalidConfigValueError {
                field: "transform.discount_factor".to_string(),
                value: self.transform.discount_factor.to_string(),
                reason: "Value must be greater than 0".to_string(),
            });
        }
        validation::validate_range(
            "transform.discount_factor",
            self.transform.discount_factor,
            0.0,
            1.0,
        )?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_path("load.temp_path", &self.load.temp_path)?;
        validation::validate_range(
            "schedule.interval_minutes",
            self.schedule.interval_minutes,
            1,
            MAX_INTERVAL_MINUTES,
        )?;

        validation::validate_path("logging.file", &self.logging.file)?;
        let levels = ["trace", "debug", "info", "warn", "error"];
        if !levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Unsupported level. Valid levels: {}", levels.join(", ")),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn temp_path(&self) -> &str {
        &self.load.temp_path
    }

    fn transform_rules(&self) -> TransformRules {
        TransformRules {
            min_value: self.transform.min_value,
            discount_factor: self.transform.discount_factor,
        }
    }

    fn run_interval(&self) -> Duration {
        Duration::from_secs(self.schedule.interval_minutes.saturating_mul(60))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
