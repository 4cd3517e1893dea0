pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ListingArgs};
pub use config::toml_config::AppConfig;
pub use config::ResolvedConfig;
pub use crate::core::artifact::ModelArtifact;
pub use crate::core::chain::FeatureChain;
pub use crate::core::engine::PredictionEngine;
pub use domain::model::{FeatureSchema, FeatureVector, Listing, Prediction};
pub use utils::error::{PredictError, Result};
