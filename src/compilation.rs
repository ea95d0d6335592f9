//! Compilation snapshots.
//!
//! A [`Compilation`] is the immutable input of one generation run: the crate's
//! source units, each tagged with the module path it defines, plus the set of
//! crate names the manifest declares as dependencies.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path};
use std::sync::Arc;

use serde::{Serialize, Serializer};
use walkdir::WalkDir;

use crate::error::GenerateError;

/// Absolute module path inside the crate being generated for, e.g. `crate::mappers`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath(Vec<String>);

impl ModulePath {
    /// The crate root module.
    pub fn crate_root() -> Self {
        Self(vec!["crate".to_string()])
    }

    /// Builds a module path below the crate root from the given segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = Self::crate_root();
        path.0.extend(segments.into_iter().map(Into::into));
        path
    }

    /// Derives the module a file defines from its path relative to `src/`.
    ///
    /// `lib.rs` and `main.rs` at the top level are the crate root, `a/mod.rs`
    /// is `crate::a` and `a/b.rs` is `crate::a::b`. Returns `None` for files
    /// that are not Rust sources.
    pub fn from_source_file(relative: &Path) -> Option<Self> {
        if relative.extension().and_then(|e| e.to_str()) != Some("rs") {
            return None;
        }

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_str()?.to_string()),
                _ => return None,
            }
        }

        let file = segments.pop()?;
        let stem = file.trim_end_matches(".rs");
        let is_root_file = segments.is_empty() && (stem == "lib" || stem == "main");
        if !is_root_file && stem != "mod" {
            segments.push(stem.to_string());
        }

        Some(Self::from_segments(segments))
    }

    /// Returns the path of a nested inline module.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    /// Returns the parent module, or `None` at the crate root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_crate_root(&self) -> bool {
        self.0.len() == 1
    }
}

impl Default for ModulePath {
    fn default() -> Self {
        Self::crate_root()
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("::"))
    }
}

impl Serialize for ModulePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One source file of the compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Stable identifier of the unit, normally the path relative to the manifest dir.
    pub path: String,
    /// Module the file defines.
    pub module: ModulePath,
    pub text: Arc<str>,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, module: ModulePath, text: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            module,
            text: text.into(),
        }
    }

    /// Fingerprint of everything scanning depends on: the module path and the text.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.module.to_string().as_bytes());
        hasher.update(&[0]);
        hasher.update(self.text.as_bytes());
        hasher.finalize()
    }
}

/// Immutable input snapshot of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    pub units: Vec<SourceUnit>,
    /// Crate names as they appear in code (`-` normalized to `_`).
    pub dependencies: BTreeSet<String>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit, replacing any unit with the same path.
    pub fn with_unit(mut self, unit: SourceUnit) -> Self {
        self.units.retain(|u| u.path != unit.path);
        self.units.push(unit);
        self
    }

    pub fn with_dependency(mut self, name: &str) -> Self {
        self.dependencies.insert(normalize_crate_name(name));
        self
    }

    /// Loads the crate at `manifest_dir`: every `.rs` file below `src/`
    /// (except `src/bin/`, which holds separate crate roots) and the
    /// dependency names declared in `Cargo.toml`.
    pub fn load(manifest_dir: &Path) -> Result<Self, GenerateError> {
        let src_dir = manifest_dir.join("src");
        let mut units = Vec::new();

        for entry in WalkDir::new(&src_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| GenerateError::Io {
                path: src_dir.display().to_string(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&src_dir) else {
                continue;
            };
            if relative.starts_with("bin") {
                continue;
            }
            let Some(module) = ModulePath::from_source_file(relative) else {
                continue;
            };

            let text = std::fs::read_to_string(entry.path()).map_err(|e| GenerateError::Io {
                path: entry.path().display().to_string(),
                source: e,
            })?;
            let path = Path::new("src").join(relative);
            units.push(SourceUnit::new(
                path.to_string_lossy().replace('\\', "/"),
                module,
                text,
            ));
        }

        let manifest_path = manifest_dir.join("Cargo.toml");
        let dependencies = if manifest_path.exists() {
            let manifest =
                std::fs::read_to_string(&manifest_path).map_err(|e| GenerateError::Io {
                    path: manifest_path.display().to_string(),
                    source: e,
                })?;
            declared_dependencies(&manifest)?
        } else {
            BTreeSet::new()
        };

        tracing::debug!(
            units = units.len(),
            dependencies = dependencies.len(),
            "Loaded compilation from {}",
            manifest_dir.display()
        );

        Ok(Self {
            units,
            dependencies,
        })
    }
}

/// Collects dependency names from a `Cargo.toml`, including target-specific tables.
pub fn declared_dependencies(manifest: &str) -> Result<BTreeSet<String>, GenerateError> {
    let table: toml::Table = manifest.parse()?;
    let mut names = BTreeSet::new();

    let mut collect = |deps: Option<&toml::Value>| {
        if let Some(deps) = deps.and_then(|d| d.as_table()) {
            names.extend(deps.keys().map(|name| normalize_crate_name(name)));
        }
    };

    collect(table.get("dependencies"));
    if let Some(targets) = table.get("target").and_then(|t| t.as_table()) {
        for target in targets.values() {
            collect(target.get("dependencies"));
        }
    }

    Ok(names)
}

fn normalize_crate_name(name: &str) -> String {
    name.replace('-', "_")
}
