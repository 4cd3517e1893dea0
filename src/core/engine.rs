use crate::core::chain::FeatureChain;
use crate::domain::model::{FeatureSchema, Listing, Prediction};
use crate::domain::ports::PriceModel;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// The prediction façade: one listing in, one price out.
///
/// Construction verifies the schema contract between the chain and the
/// trained model, so a mispredicting column drift cannot survive startup.
pub struct PredictionEngine<M: PriceModel> {
    chain: FeatureChain,
    model: M,
    monitor: SystemMonitor,
}

impl<M: PriceModel> std::fmt::Debug for PredictionEngine<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("schema_width", &self.chain.schema().width())
            .finish()
    }
}

impl<M: PriceModel> PredictionEngine<M> {
    pub fn new(chain: FeatureChain, model: M) -> Result<Self> {
        Self::new_with_monitoring(chain, model, false)
    }

    pub fn new_with_monitoring(
        chain: FeatureChain,
        model: M,
        monitor_enabled: bool,
    ) -> Result<Self> {
        chain.schema().ensure_matches(model.feature_schema())?;
        tracing::debug!(
            "schema contract verified ({} columns)",
            chain.schema().width()
        );

        Ok(Self {
            chain,
            model,
            monitor: SystemMonitor::new(monitor_enabled),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.chain.schema()
    }

    /// Run one end-to-end prediction: transform, invoke the model, wrap the
    /// scalar. Errors propagate unchanged; there is no retry or fallback.
    pub fn predict(&self, listing: &Listing) -> Result<Prediction> {
        tracing::debug!("Assembling features...");
        let features = self.chain.transform(listing)?;
        self.monitor.log_stats("Transform");
        tracing::debug!("Feature vector ready ({} columns)", features.width());

        tracing::debug!("Invoking model...");
        let price = self.model.predict(&features)?;
        self.monitor.log_stats("Predict");
        tracing::debug!("Model returned {}", price);

        Ok(Prediction { price })
    }
}
