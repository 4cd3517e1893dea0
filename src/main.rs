use clap::Parser;
use maison_price::utils::{logger, validation::Validate};
use maison_price::{AppConfig, CliConfig, FeatureChain, ModelArtifact, PredictionEngine};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting maison-price CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let app_config = match &cli.config {
        Some(path) => Some(AppConfig::from_file(path)?),
        None => None,
    };
    let config = cli.resolve(app_config.as_ref());

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let artifact = ModelArtifact::from_file(&config.model_path)?;
    tracing::info!(
        "Loaded model artifact (schema v{}, {} columns, trained {})",
        artifact.schema_version,
        artifact.feature_schema.width(),
        artifact.trained_at
    );

    let chain = FeatureChain::from_artifact(&artifact.preprocessing)?;
    let engine = PredictionEngine::new_with_monitoring(chain, artifact, config.monitor)?;

    let listing = cli.listing.to_listing();

    match engine.predict(&listing) {
        Ok(prediction) => {
            tracing::info!("✅ Prediction completed successfully");
            println!(
                "The predicted price is: {}",
                prediction.display(&config.currency)
            );
        }
        Err(e) => {
            tracing::error!("❌ Prediction failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
