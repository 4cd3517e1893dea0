use crate::core::artifact::PreprocessingStats;
use crate::core::transformers::{
    AgeTransformer, BooleanEncoder, CategoricalOneHot, CityCodeTransformer,
    NumericStandardizer, OwnerCategoryTransformer, RoomSizeTransformer,
};
use crate::domain::model::{FeatureSchema, FeatureVector, Listing};
use crate::domain::ports::Transformer;
use crate::utils::error::{PredictError, Result};

/// Column-wise dispatch: each named subset of input columns is routed to
/// exactly one transformer and the outputs are concatenated in a fixed
/// order. The regressor weights are positionally bound to that order, so
/// the construction below is the single source of it.
pub struct FeatureChain {
    transformers: Vec<Box<dyn Transformer>>,
    schema: FeatureSchema,
}

impl FeatureChain {
    /// Build the chain from the artifact's frozen preprocessing statistics.
    ///
    /// Dispatch order: num → cat → label → room_size → owner → city → age.
    pub fn from_artifact(stats: &PreprocessingStats) -> Result<Self> {
        let transformers: Vec<Box<dyn Transformer>> = vec![
            Box::new(NumericStandardizer::from_stats(stats)?),
            Box::new(CategoricalOneHot::from_stats(stats)?),
            Box::new(BooleanEncoder),
            Box::new(RoomSizeTransformer),
            Box::new(OwnerCategoryTransformer),
            Box::new(CityCodeTransformer),
            Box::new(AgeTransformer::new(stats.reference_year)),
        ];

        let columns = transformers
            .iter()
            .flat_map(|transformer| transformer.output_columns())
            .collect();

        Ok(Self {
            transformers,
            schema: FeatureSchema::new(columns),
        })
    }

    /// The column set and order this chain produces.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Transform one listing into a feature vector aligned with
    /// [`FeatureChain::schema`].
    pub fn transform(&self, listing: &Listing) -> Result<FeatureVector> {
        let mut values = Vec::with_capacity(self.schema.width());

        for transformer in &self.transformers {
            let output = transformer.transform(listing)?;
            tracing::debug!(
                "route '{}' produced {} columns",
                transformer.name(),
                output.len()
            );
            values.extend(output);
        }

        // Transformer outputs must line up one-to-one with the schema columns.
        if values.len() != self.schema.width() {
            return Err(PredictError::ProcessingError {
                message: format!(
                    "transformers produced {} values for {} schema columns",
                    values.len(),
                    self.schema.width()
                ),
            });
        }

        Ok(FeatureVector::new(self.schema.columns().to_vec(), values))
    }
}
