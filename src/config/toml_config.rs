use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub display: Option<DisplayConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute `${VAR_NAME}` references from the environment. Unset
    /// variables are left verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigValidationError {
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
        crate::utils::validation::validate_path("model.path", &self.model.path)?;
        crate::utils::validation::validate_file_extension("model.path", &self.model.path, &["json"])?;

        if let Some(display) = &self.display {
            if let Some(currency) = &display.currency {
                crate::utils::validation::validate_non_empty_string("display.currency", currency)?;
            }
        }

        Ok(())
    }

    pub fn raw_currency(&self) -> Option<&str> {
        self.display
            .as_ref()
            .and_then(|display| display.currency.as_deref())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring
            .as_ref()
            .map(|monitoring| monitoring.enabled)
            .unwrap_or(false)
    }
}

impl ConfigProvider for AppConfig {
    fn model_path(&self) -> &str {
        &self.model.path
    }

    fn currency(&self) -> &str {
        self.raw_currency().unwrap_or(super::DEFAULT_CURRENCY)
    }

    fn monitoring(&self) -> bool {
        self.monitoring_enabled()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
