//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `REVIEWD_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `REVIEWD_` override YAML values
//! 3. **DATABASE_URL** - Special case: overrides `database.url` if set
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `REVIEWD_EMAIL__FROM_EMAIL=catalog@example.com` sets the `email.from_email` field.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! REVIEWD_PORT=8080
//!
//! # Set database connection (preferred method)
//! DATABASE_URL="sqlite://reviewd.db"
//!
//! # Override nested values
//! REVIEWD_AUTH__TOKEN_EXPIRY=12h
//! REVIEWD_SECRET_KEY=...
//! ```

use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "REVIEWD_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have sensible defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Username for the initial admin user (created on first startup)
    pub admin_username: String,
    /// Email address for the initial admin user
    pub admin_email: String,
    /// Secret key for bearer token signing (required to issue or verify tokens)
    pub secret_key: Option<String>,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Email configuration for confirmation-code delivery
    pub email: EmailConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database: DatabaseConfig::default(),
            admin_username: "admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            secret_key: None,
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection string, e.g. "sqlite://reviewd.db"
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://reviewd.db".to_string(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Lifetime of issued bearer tokens (humantime format, e.g. "24h")
    #[serde(with = "humantime_serde")]
    pub token_expiry: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_expiry: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Email delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailConfig {
    /// Sender address for outgoing mail
    pub from_email: String,
    /// Sender display name
    pub from_name: String,
    /// Transport used to hand messages off
    pub transport: EmailTransportConfig,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_email: "noreply@reviewd.local".to_string(),
            from_name: "Review Catalog".to_string(),
            transport: EmailTransportConfig::default(),
        }
    }
}

/// Email transport selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmailTransportConfig {
    /// Deliver via an SMTP relay
    Smtp {
        host: String,
        port: u16,
        username: String,
        password: String,
        use_tls: bool,
    },
    /// Write messages to a directory (development/testing)
    File { path: String },
}

impl Default for EmailTransportConfig {
    fn default() -> Self {
        EmailTransportConfig::File {
            path: "./emails".to_string(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins; "*" allows any origin
    pub allowed_origins: Vec<String>,
    /// Whether to allow credentials (ignored when the wildcard origin is used)
    pub allow_credentials: bool,
    /// Preflight cache duration in seconds
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
            max_age: None,
        }
    }
}

impl Config {
    /// Load configuration from the YAML file and environment variables.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let mut config: Config = Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("REVIEWD_").split("__"))
            .extract()?;

        // DATABASE_URL is the conventional override and wins over everything
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
