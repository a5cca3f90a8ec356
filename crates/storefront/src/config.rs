//! Storefront configuration, read from CLI flags and environment variables.

use clap::{Args, Parser};
use std::time::Duration;

use crate::model::RootAdmin;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level or filter directives (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

/// Actor runtime settings.
#[derive(Debug, Clone, Args)]
pub struct RuntimeConfig {
    /// Pending requests each actor buffers before senders wait
    #[arg(long, env = "STOREFRONT_MAILBOX_CAPACITY", default_value_t = 32)]
    pub mailbox_capacity: usize,

    /// Per-request timeout in milliseconds for store calls (0 disables)
    #[arg(long, env = "STOREFRONT_REQUEST_TIMEOUT_MS", default_value_t = 5_000)]
    pub request_timeout_ms: u64,
}

impl RuntimeConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            request_timeout_ms: 5_000,
        }
    }
}

/// The account reconciled as root administrator on every start.
#[derive(Debug, Clone, Args)]
pub struct RootAdminConfig {
    /// Root administrator display name
    #[arg(long, env = "STOREFRONT_ROOT_ADMIN_NAME", default_value = "Root Admin")]
    pub root_admin_name: String,

    /// Root administrator e-mail
    #[arg(
        long,
        env = "STOREFRONT_ROOT_ADMIN_EMAIL",
        default_value = "root@storefront.local"
    )]
    pub root_admin_email: String,
}

impl RootAdminConfig {
    #[must_use]
    pub fn root_admin(&self) -> RootAdmin {
        RootAdmin {
            name: self.root_admin_name.clone(),
            email: self.root_admin_email.clone(),
        }
    }
}

impl Default for RootAdminConfig {
    fn default() -> Self {
        Self {
            root_admin_name: "Root Admin".to_string(),
            root_admin_email: "root@storefront.local".to_string(),
        }
    }
}

/// Storefront configuration
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "storefront", about = "Catalog, cart and checkout backend", long_about = None)]
pub struct StorefrontConfig {
    /// Actor runtime settings.
    #[command(flatten)]
    pub runtime: RuntimeConfig,

    /// Root administrator account.
    #[command(flatten)]
    pub root_admin: RootAdminConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = StorefrontConfig::try_parse_from([
            "storefront",
            "--mailbox-capacity",
            "8",
            "--request-timeout-ms",
            "0",
            "--root-admin-email",
            "ops@shop.test",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.runtime.mailbox_capacity, 8);
        assert_eq!(config.runtime.request_timeout(), None);
        assert_eq!(config.root_admin.root_admin().email, "ops@shop.test");
        assert_eq!(config.logging.log_format, LogFormat::Json);
    }

    #[test]
    fn defaults_bound_requests() {
        let config = StorefrontConfig::default();
        assert_eq!(
            config.runtime.request_timeout(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.root_admin.root_admin().name, "Root Admin");
    }
}
