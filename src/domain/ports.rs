use crate::domain::model::{FeatureSchema, FeatureVector, Listing};
use crate::utils::error::Result;

/// One column-wise transformation step. Stateless beyond statistics frozen
/// at training time; output column order is part of the contract.
pub trait Transformer: Send + Sync {
    fn name(&self) -> &'static str;
    fn output_columns(&self) -> Vec<String>;
    fn transform(&self, listing: &Listing) -> Result<Vec<f64>>;
}

/// Opaque pre-trained regressor. Parameters are immutable; the façade only
/// sees the trained schema and the predict operation.
pub trait PriceModel: Send + Sync {
    fn feature_schema(&self) -> &FeatureSchema;
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn currency(&self) -> &str;
    fn monitoring(&self) -> bool;
}
