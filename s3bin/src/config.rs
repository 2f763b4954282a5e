//! Configuration management
//!
//! Values are resolved once at startup. Precedence, highest first:
//! command-line flag, `BINAPP_*` environment variable, config file, default.

use clap::Parser;
use s3bin_relay::storage::S3Options;
use serde::Deserialize;
use thiserror::Error;

/// Config file read when `--config` is not given. Optional.
pub const DEFAULT_CONFIG_FILE: &str = "s3bin.toml";

pub const DEFAULT_USER: &str = "foo";
pub const DEFAULT_PASS: &str = "bar";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Command-line flags. Each one can also be set through its `BINAPP_*`
/// environment variable.
#[derive(Parser, Debug, Default)]
#[command(name = "s3bin")]
#[command(about = "Store posted payloads in an S3 bucket", long_about = None)]
pub struct Args {
    /// Config file (TOML, YAML or JSON)
    #[arg(long, env = "BINAPP_CONFIG")]
    pub config: Option<String>,

    /// Port the app binds to
    #[arg(long, env = "BINAPP_PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "BINAPP_HOST")]
    pub host: Option<String>,

    /// Basic auth user
    #[arg(long, env = "BINAPP_USER")]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(long, env = "BINAPP_PASS", hide_env_values = true)]
    pub pass: Option<String>,

    /// Name of the bucket to be used
    #[arg(long, env = "BINAPP_BUCKET")]
    pub bucket: Option<String>,

    /// Base path / prefix being used
    #[arg(long, env = "BINAPP_PATH")]
    pub path: Option<String>,

    /// AWS region (defaults to the AWS environment, then us-east-1)
    #[arg(long, env = "BINAPP_REGION")]
    pub region: Option<String>,

    /// Endpoint of an S3-compatible service
    #[arg(long, env = "BINAPP_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, env = "BINAPP_FORCE_PATH_STYLE", num_args = 0..=1, default_missing_value = "true")]
    pub force_path_style: Option<bool>,

    /// Realm named in the authentication challenge
    #[arg(long, env = "BINAPP_REALM")]
    pub realm: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BINAPP_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub bucket: String,
    pub path: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    pub realm: String,
    pub log_level: String,
}

impl Config {
    /// Load configuration from defaults, the config file and `args`
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let file = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);

        let config = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000_i64)?
            .set_default("user", DEFAULT_USER)?
            .set_default("pass", DEFAULT_PASS)?
            .set_default("bucket", "dcos-secure-instance-profiles-app")?
            .set_default("path", "/bin")?
            .set_default("force_path_style", false)?
            .set_default("realm", "Restricted")?
            .set_default("log_level", "info")?
            .add_source(config::File::with_name(file).required(args.config.is_some()))
            .set_override_option("host", args.host.clone())?
            .set_override_option("port", args.port.map(i64::from))?
            .set_override_option("user", args.user.clone())?
            .set_override_option("pass", args.pass.clone())?
            .set_override_option("bucket", args.bucket.clone())?
            .set_override_option("path", args.path.clone())?
            .set_override_option("region", args.region.clone())?
            .set_override_option("endpoint_url", args.endpoint_url.clone())?
            .set_override_option("force_path_style", args.force_path_style)?
            .set_override_option("realm", args.realm.clone())?
            .set_override_option("log_level", args.log_level.clone())?
            .build()?;

        let config = config.try_deserialize::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid("bucket must not be empty".to_string()));
        }
        if self.user.contains(':') {
            return Err(ConfigError::Invalid("user must not contain ':'".to_string()));
        }
        Ok(())
    }

    /// Whether the placeholder credentials are still in use
    pub fn uses_default_credentials(&self) -> bool {
        self.user == DEFAULT_USER && self.pass == DEFAULT_PASS
    }

    pub fn s3_options(&self) -> S3Options {
        S3Options {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            force_path_style: self.force_path_style,
        }
    }
}
