use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::encoding::{FlagColumnStats, NumericColumnStats};
use crate::domain::model::{FeatureSchema, FeatureVector};
use crate::domain::ports::PriceModel;
use crate::utils::error::{PredictError, Result};

/// Artifact layout revision this build understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Preprocessing statistics captured at training time and frozen with the
/// model. The chain is built from these, never from the incoming record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessingStats {
    /// Maximum construction year seen during training; the age feature is
    /// relative to this, not to anything recomputed at inference time.
    pub reference_year: i32,
    pub numeric: BTreeMap<String, NumericColumnStats>,
    pub flags: BTreeMap<String, FlagColumnStats>,
}

/// Regressor parameters. Opaque to the façade; the tagged encoding leaves
/// room for other model families without touching the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear { weights: Vec<f64>, intercept: f64 },
}

impl Regressor {
    pub fn width(&self) -> usize {
        match self {
            Regressor::Linear { weights, .. } => weights.len(),
        }
    }

    fn predict(&self, values: &[f64]) -> f64 {
        match self {
            Regressor::Linear { weights, intercept } => {
                weights.iter().zip(values).map(|(w, x)| w * x).sum::<f64>() + intercept
            }
        }
    }
}

/// The pre-trained model bundle: versioned feature schema, frozen
/// preprocessing statistics, and regressor parameters. Loaded once at
/// startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub trained_at: DateTime<Utc>,
    pub feature_schema: FeatureSchema,
    pub preprocessing: PreprocessingStats,
    pub regressor: Regressor,
}

impl ModelArtifact {
    /// Load an artifact from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_json_str(&content)
    }

    /// Parse an artifact from a JSON string and check its consistency.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(content)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Internal consistency checks: supported layout revision, non-empty
    /// schema, weight count equal to schema width.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(PredictError::ArtifactError {
                message: format!(
                    "unsupported schema_version {} (this build understands {})",
                    self.schema_version, SCHEMA_VERSION
                ),
            });
        }

        if self.feature_schema.width() == 0 {
            return Err(PredictError::ArtifactError {
                message: "artifact declares an empty feature schema".to_string(),
            });
        }

        if self.regressor.width() != self.feature_schema.width() {
            return Err(PredictError::ArtifactError {
                message: format!(
                    "regressor has {} weights but the feature schema declares {} columns",
                    self.regressor.width(),
                    self.feature_schema.width()
                ),
            });
        }

        Ok(())
    }
}

impl PriceModel for ModelArtifact {
    fn feature_schema(&self) -> &FeatureSchema {
        &self.feature_schema
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.width() != self.feature_schema.width() {
            return Err(PredictError::SchemaMismatch {
                message: format!(
                    "feature vector has {} columns, model expects {}",
                    features.width(),
                    self.feature_schema.width()
                ),
            });
        }
        Ok(self.regressor.predict(features.values()))
    }
}
