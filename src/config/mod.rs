#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_MODEL_PATH: &str = "./data/model.json";
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Effective configuration after merging CLI flags, the optional TOML file
/// and the built-in defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_path: String,
    pub currency: String,
    pub monitor: bool,
}

impl ConfigProvider for ResolvedConfig {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn monitoring(&self) -> bool {
        self.monitor
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("model_path", &self.model_path)?;
        validation::validate_file_extension("model_path", &self.model_path, &["json"])?;
        validation::validate_non_empty_string("currency", &self.currency)?;
        Ok(())
    }
}
