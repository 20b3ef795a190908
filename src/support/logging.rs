//! Tracing subscriber setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LoggingConfig};

/// Crates whose events follow the configured level; everything else stays at `warn`
const PRICING_TARGETS: [&str; 2] = ["pricing_core", "pricing_cli"];

/// Filter directive built from the logging section
///
/// A plain level such as `debug` is scoped to the pricing crates. Anything
/// else (already a full directive like `info,pricing_core=trace`) is used as is.
pub fn default_directive(logging: &LoggingConfig) -> String {
    let level = logging.level.trim().to_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {
            let scoped: Vec<String> = PRICING_TARGETS
                .iter()
                .map(|target| format!("{target}={level}"))
                .collect();
            format!("warn,{}", scoped.join(","))
        }
        _ => logging.level.clone(),
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. A second call is a no-op.
pub fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.logging)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if config.logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
