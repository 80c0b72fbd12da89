//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without the production binary's
//! dotenv handling.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI). Deployments normally run the workspace's main
//! `ayush-run` binary.

use std::path::PathBuf;
use std::sync::Arc;
use terminology_core::RegistryConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Entry point for the standalone terminology REST API server.
///
/// # Environment Variables
/// - `AYUSH_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `AYUSH_TERMINOLOGY_FILE`: optional JSON catalog replacing the bundled data
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a configured catalog file cannot be loaded, or
/// - the HTTP server fails to bind or while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
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
