pub mod config;
pub mod error;

pub use config::{
    AdvisorConfig, Config, DisplayConfig, GroundOverrideMode, LocationConfig, ProfilePreset,
    ProviderConfig, Thresholds, ValidationResult, MAX_RESULT_COUNT,
};
pub use error::{AppError, NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;

/// Initialize logging for the application.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Lawn Enforcer core initialized");
    Ok(())
}
