//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. Project config: `mapwire.toml` next to `Cargo.toml`
//! 3. Environment variables: `MAPWIRE_*`, nested keys split on `__`
//!    (e.g. `MAPWIRE_DI__LIFETIME=transient`)
//!
//! # Example
//!
//! ```toml
//! marker = "mapper"
//! class_policy = "per-method"
//! companion_suffix = "Adapter"
//! root = "crate"
//!
//! [di]
//! detection = "auto"
//! container = "ferrous_di::ServiceCollection"
//! provider = "ferrous_di::ServiceProvider"
//! lifetime = "scoped"
//! ```

use std::ops::Deref;
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Project config file name, resolved relative to the manifest dir.
pub const CONFIG_FILE: &str = "mapwire.toml";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simple name of the marker attribute, matched against the last path segment.
    pub marker: String,
    /// How marked static modules are treated.
    pub class_policy: ClassPolicy,
    /// Suffix appended to companion adapter type names.
    pub companion_suffix: String,
    /// Module path where the generated index is included.
    pub root: String,
    pub di: DiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: "mapper".to_string(),
            class_policy: ClassPolicy::default(),
            companion_suffix: "Adapter".to_string(),
            root: "crate".to_string(),
            di: DiConfig::default(),
        }
    }
}

/// Classification policy for static classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassPolicy {
    /// Classify every method of every marked item.
    #[default]
    PerMethod,
    /// Skip marked static modules entirely.
    InstanceOnly,
}

/// Dependency-injection registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DiConfig {
    pub detection: DiDetection,
    /// Path of the container type the registry extends.
    pub container: String,
    /// Path of the provider type the resolver holds.
    pub provider: String,
    /// Lifetime used for every registration.
    pub lifetime: Lifetime,
}

impl Default for DiConfig {
    fn default() -> Self {
        Self {
            detection: DiDetection::default(),
            container: "ferrous_di::ServiceCollection".to_string(),
            provider: "ferrous_di::ServiceProvider".to_string(),
            lifetime: Lifetime::default(),
        }
    }
}

impl DiConfig {
    /// Crate segment of the container path, if the path is crate-qualified.
    pub fn container_crate(&self) -> Option<&str> {
        let mut segments = self.container.trim_start_matches("::").split("::");
        let first = segments.next()?;
        segments.next()?;
        Some(first)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiDetection {
    /// Emit the registry when the compilation references the container.
    #[default]
    Auto,
    Always,
    Never,
}

/// Container lifetime of registered mappers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    #[default]
    Scoped,
    Transient,
    Singleton,
}

impl Lifetime {
    /// Container method that registers a service with this lifetime.
    pub fn register_method(&self) -> &'static str {
        match self {
            Lifetime::Scoped => "add_scoped",
            Lifetime::Transient => "add_transient",
            Lifetime::Singleton => "add_singleton",
        }
    }
}

impl Config {
    /// Load config with layered resolution (defaults → project → env).
    pub fn load(manifest_dir: &Path) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(manifest_dir.join(CONFIG_FILE)))
            .merge(Env::prefixed("MAPWIRE_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }
}
