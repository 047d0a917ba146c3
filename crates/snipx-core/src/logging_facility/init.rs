//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::errors::SnipError;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Human-readable output for development
    #[default]
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl FromStr for Profile {
    type Err = SnipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(SnipError::validation(
                "logging profile",
                format!("unknown profile '{}'", other),
            )),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup. Later calls are no-ops.
///
/// - **Development**: human-readable logs, `snipx=debug` unless `RUST_LOG` is set
/// - **Production**: JSON logs, `snipx=info` unless `RUST_LOG` is set
/// - **Test**: bare registry; use [`init_test_capture`](super::init_test_capture) to assert on events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("snipx=debug")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("snipx=info")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_str() {
        assert_eq!("production".parse::<Profile>().unwrap(), Profile::Production);
        assert_eq!(" Dev ".parse::<Profile>().unwrap(), Profile::Development);
        assert!(matches!(
            "verbose".parse::<Profile>(),
            Err(SnipError::Validation { .. })
        ));
    }

    #[test]
    fn test_profile_default_is_development() {
        assert_eq!(Profile::default(), Profile::Development);
    }
}
