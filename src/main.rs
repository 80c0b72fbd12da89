use std::path::PathBuf;
use std::sync::Arc;
use terminology_core::RegistryConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AYUSH terminology service.
///
/// Resolves configuration from the environment, builds the immutable
/// terminology registry once and serves the REST API over it. The registry is
/// shared by reference with every request handler; nothing mutates it after
/// this point.
///
/// # Environment Variables
/// - `AYUSH_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `AYUSH_TERMINOLOGY_FILE`: optional JSON catalog file replacing the
///   bundled reference data
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If catalog loading or server startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ayush_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("terminology_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("AYUSH_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let catalog_file = std::env::var("AYUSH_TERMINOLOGY_FILE")
        .ok()
        .map(PathBuf::from);

    let registry = RegistryConfig::new(catalog_file).build_registry()?;

    api_rest::serve(&addr, Arc::new(registry)).await
}
