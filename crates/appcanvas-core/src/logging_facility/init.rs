//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::core_types::RequestId;

const DEV_FILTER: &str =
    "appcanvas_core=debug,appcanvas_store=debug,appcanvas_engine=debug,appcanvas_cli=debug";
const PROD_FILTER: &str =
    "appcanvas_core=info,appcanvas_store=info,appcanvas_engine=info,appcanvas_cli=info";

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug level
    Development,
    /// JSON lines, info level
    Production,
    /// Bare registry; tests attach a capture layer via `init_test_capture()`
    Test,
}

impl Profile {
    /// Map a `--log-format` value onto a profile
    pub fn from_format(format: &str) -> Option<Self> {
        match format {
            "pretty" => Some(Profile::Development),
            "json" => Some(Profile::Production),
            _ => None,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the global subscriber
///
/// Safe to call more than once; only the first call has an effect.
/// Output goes to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` overrides the profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEV_FILTER)),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(PROD_FILTER)),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

/// Span carrying a request's correlation id
///
/// Every event logged while the span is entered inherits `request_id`.
pub fn request_span(request_id: &RequestId) -> tracing::Span {
    tracing::info_span!("request", request_id = request_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
    }

    #[test]
    fn test_profile_from_format() {
        assert_eq!(Profile::from_format("pretty"), Some(Profile::Development));
        assert_eq!(Profile::from_format("json"), Some(Profile::Production));
        assert_eq!(Profile::from_format("xml"), None);
    }
}
