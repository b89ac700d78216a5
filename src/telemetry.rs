//! Tracing subscriber setup for the binary

use config::Environment;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::UserHausError;

const DEFAULT_FILTER: &str = "userhaus=info,cache_system=info,store_object=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter;
/// production logs are JSON lines.
pub fn init_tracing(environment: Environment) -> Result<(), UserHausError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if environment.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| UserHausError::Telemetry(e.to_string()))
}
