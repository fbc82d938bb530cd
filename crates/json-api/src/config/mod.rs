//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{
    catalog::CatalogConfig,
    db::DatabaseConfig,
    http::HttpConfig,
    observability::{LoggingConfig, TracingConfig},
};

pub(crate) mod catalog;
pub(crate) mod db;
pub(crate) mod http;
pub(crate) mod observability;

/// Dabro JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "dabro-json", about = "Dabro JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Listener settings.
    #[command(flatten)]
    pub http: HttpConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export settings.
    #[command(flatten)]
    pub tracing: TracingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Catalog query settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.http.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use dabro::categories::UnknownCategoryPolicy;
    use testresult::TestResult;

    use crate::config::observability::LogFormat;

    use super::*;

    #[test]
    fn test_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "dabro-json",
            "--database-url",
            "postgres://localhost/dabro",
        ])?;

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8698");
        assert!(matches!(config.logging.log_format, LogFormat::Compact));
        assert!(!config.tracing.enabled, "tracing export is opt-in");
        assert_eq!(
            config.catalog.unknown_category_policy,
            UnknownCategoryPolicy::MatchAll
        );

        Ok(())
    }

    #[test]
    fn test_unknown_category_policy_flag() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "dabro-json",
            "--database-url",
            "postgres://localhost/dabro",
            "--unknown-category-policy",
            "match_none",
        ])?;

        assert_eq!(
            config.catalog.unknown_category_policy,
            UnknownCategoryPolicy::MatchNone
        );

        Ok(())
    }

    #[test]
    fn test_ipv6_host() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "dabro-json",
            "--database-url",
            "postgres://localhost/dabro",
            "--host",
            "::1",
            "--port",
            "9000",
        ])?;

        assert_eq!(config.socket_addr().to_string(), "[::1]:9000");

        Ok(())
    }

    #[test]
    fn test_invalid_unknown_category_policy_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "dabro-json",
            "--database-url",
            "postgres://localhost/dabro",
            "--unknown-category-policy",
            "strict",
        ]);

        assert!(result.is_err(), "unknown policy names should be rejected");
    }
}
