//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_QA__DATASET_PATH`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

/// `[qa]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QaSettings {
    pub dataset_path: String,
    pub default_top_k: usize,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self { dataset_path: "data/qa_dataset.json".to_string(), default_top_k: 3 }
    }
}

impl QaSettings {
    /// Dataset path with `~`/env vars expanded and relative paths anchored at `base`.
    pub fn resolved_dataset_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.dataset_path)
    }
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// `[qa]` section; missing keys fall back to [`QaSettings::default`].
    pub fn qa(&self) -> anyhow::Result<QaSettings> { self.section("qa") }

    /// `[server]` section. A bare `PORT` env var overrides `server.port`; the
    /// effective port must be non-zero.
    pub fn server(&self) -> anyhow::Result<ServerSettings> {
        let mut server: ServerSettings = self.section("server")?;
        if let Ok(port) = env::var("PORT") {
            server.port = port
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if server.port == 0 {
            return Err(Error::InvalidConfig("server.port must be non-zero".to_string()).into());
        }
        Ok(server)
    }

    fn section<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if self.figment.find_value(key).is_err() {
            return Ok(T::default());
        }
        self.get(key)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let qa = self.qa()?;
        if qa.dataset_path.trim().is_empty() {
            return Err(Error::InvalidConfig("qa.dataset_path must not be empty".to_string()).into());
        }
        self.server()?;
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
