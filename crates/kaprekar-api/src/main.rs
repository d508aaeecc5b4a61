//! Binary entrypoint for the Kaprekar API server.
use kaprekar_api::{serve, DEFAULT_ADDR};
use kaprekar_core::RoutineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("KAPREKAR_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let config = RoutineConfig::from_env();
    serve(&addr, config).await
}
