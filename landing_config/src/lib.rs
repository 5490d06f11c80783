use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use landing_models::email_address::{EmailAddress, EmailAddressWithName};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of additional config
/// files.
pub const CONFIG_PATHS_VAR: &str = "LANDING_CONFIG";

/// Prefix of environment variables overriding single config values, e.g.
/// `LANDING_EMAIL__TRANSPORT__API_KEY`.
pub const ENV_PREFIX: &str = "LANDING";

/// Load the default config, any files listed in `LANDING_CONFIG` and all
/// `LANDING_*` environment variables, in this order.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Some(extra) = std::env::var_os(CONFIG_PATHS_VAR) {
        paths.extend(std::env::split_paths(&extra).filter(|p| !p.as_os_str().is_empty()));
    }

    builder(&paths, &[])?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Load the given config files and apply the given TOML snippets on top.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    builder(paths, overrides)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn builder(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    Ok(overrides.iter().fold(builder, |builder, &snippet| {
        builder.add_source(File::from_str(snippet, FileFormat::Toml))
    }))
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
    pub form: FormConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub from: EmailAddressWithName,
    pub transport: EmailTransportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmailTransportConfig {
    Smtp {
        url: String,
    },
    Resend {
        api_key: String,
        endpoint_override: Option<Url>,
    },
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub owner: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct FormConfig {
    pub endpoint: Url,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
}
