//! Configuration for the pantry CLI.
//!
//! TOML profiles naming catalog instances, layered with `PANTRY_`
//! environment variables, and translated into `pantry_core::CatalogConfig`.
//! The CLI applies its own flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pantry_core::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_CATEGORY};

/// Profile used when neither the config nor the command line names one.
pub const BUILTIN_PROFILE: &str = "world";

/// Prefix for environment overrides; nested keys use `__`
/// (e.g. `PANTRY_DEFAULTS__OUTPUT=json`).
pub const ENV_PREFIX: &str = "PANTRY_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown profile '{name}'")]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named catalog instances.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(BUILTIN_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([(BUILTIN_PROFILE.to_owned(), Profile::world())]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format name understood by the CLI.
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named catalog instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Catalog root (e.g., "https://world.openfoodfacts.org").
    pub base_url: String,

    /// Category browsed when none is given.
    pub default_category: Option<String>,

    /// Search cache time-to-live in seconds.
    pub cache_ttl_secs: Option<u64>,

    /// Override the default timeout.
    pub timeout: Option<u64>,
}

impl Profile {
    /// The public world-wide catalog.
    pub fn world() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            default_category: Some(DEFAULT_CATEGORY.into()),
            cache_ttl_secs: Some(DEFAULT_CACHE_TTL.as_secs()),
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "pantry", "pantry").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("pantry");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, then apply environment overrides.
///
/// A missing file is not an error; defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// Name of the profile to use: explicit choice, then `default_profile`,
    /// then the built-in one.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(BUILTIN_PROFILE)
    }

    /// Look up a profile by name. The built-in profile always resolves,
    /// even when the file does not define it.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        if let Some(profile) = self.profiles.get(name) {
            return Ok(profile.clone());
        }
        if name == BUILTIN_PROFILE {
            return Ok(Profile::world());
        }

        let mut available: Vec<String> = self.profiles.keys().cloned().collect();
        available.sort();
        Err(ConfigError::UnknownProfile {
            name: name.into(),
            available,
        })
    }

    /// Resolve `requested` (or the default) into a `CatalogConfig`.
    pub fn catalog_config(&self, requested: Option<&str>) -> Result<CatalogConfig, ConfigError> {
        let name = self.profile_name(requested);
        let profile = self.profile(name)?;
        profile_to_catalog_config(&profile, &self.defaults)
    }
}

/// Build a `CatalogConfig` from a profile, filling gaps from `defaults`.
pub fn profile_to_catalog_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<CatalogConfig, ConfigError> {
    let base_url: url::Url = profile
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", profile.base_url),
        })?;

    if base_url.cannot_be_a_base() {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("not a base URL: {}", profile.base_url),
        });
    }

    let default_category = profile
        .default_category
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.into());

    let cache_ttl = profile
        .cache_ttl_secs
        .map_or(DEFAULT_CACHE_TTL, Duration::from_secs);

    Ok(CatalogConfig {
        base_url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        default_category,
        cache_ttl,
    })
}
