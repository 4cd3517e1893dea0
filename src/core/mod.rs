pub mod artifact;
pub mod chain;
pub mod encoding;
pub mod engine;
pub mod transformers;

pub use crate::domain::model::{FeatureSchema, FeatureVector, Listing, Prediction};
pub use crate::domain::ports::{ConfigProvider, PriceModel, Transformer};
pub use crate::utils::error::Result;
