use std::sync::Arc;

use clap::Parser;
use propgpt::server::{router, AppState};
use propgpt::utils::{logger, validation::Validate};
use propgpt::{CliConfig, GroqClient, PropertyPortalClient, SuggestionPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_server_logger(config.verbose);

    tracing::info!("Starting propgpt server");
    if config.verbose {
        tracing::debug!(
            host = %config.host,
            port = config.port,
            model = %config.llm_model,
            portal = %config.portal_base_url,
            "CLI config"
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let extractor = GroqClient::new(&config);
    let portal = PropertyPortalClient::new(&config);
    let pipeline = SuggestionPipeline::new(extractor, portal.clone(), portal);
    let state = Arc::new(AppState { pipeline });

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("propgpt listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
