//! Generated source set and its on-disk form.
//!
//! Units are written next to an index file (`mapwire.rs`) that `include!`s
//! each of them, so the consuming crate pulls everything in with one line:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/mapwire.rs"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::emit::GENERATED_HEADER;
use crate::error::GenerateError;
use crate::generator::naming::{INDEX_FILE, UNIT_SUFFIX};
use crate::models::GeneratedUnit;

/// Named units of one run, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSources {
    units: BTreeMap<String, GeneratedUnit>,
}

/// Outcome of writing a source set to a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Files created or changed, index included.
    pub written: Vec<String>,
    /// Files whose content was already up to date.
    pub unchanged: Vec<String>,
    /// Stale units from earlier runs that were deleted.
    pub removed: Vec<String>,
}

impl GeneratedSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit. Two units with the same name abort the run.
    pub fn add(&mut self, unit: GeneratedUnit) -> Result<(), GenerateError> {
        if self.units.contains_key(&unit.name) {
            return Err(GenerateError::UnitNameCollision { name: unit.name });
        }
        self.units.insert(unit.name.clone(), unit);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&GeneratedUnit> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.units.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Index file source: one `include!` per unit, in name order.
    pub fn index_source(&self) -> String {
        let mut source = String::from(GENERATED_HEADER);
        for name in self.units.keys() {
            source.push_str(&format!("include!({:?});\n", name));
        }
        source
    }

    /// Writes every unit and the index into `dir`.
    ///
    /// Files whose content is unchanged are not touched, so their mtimes stay
    /// put. `*.mapwire.rs` files left over from earlier runs are removed.
    pub fn write_to(&self, dir: &Path) -> Result<WriteReport, GenerateError> {
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let mut report = WriteReport::default();
        for unit in self.units.values() {
            write_if_changed(dir, &unit.name, &unit.source, &mut report)?;
        }
        write_if_changed(dir, INDEX_FILE, &self.index_source(), &mut report)?;

        let current: BTreeSet<&str> = self.names().collect();
        let mut stale = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
            let entry = entry.map_err(|e| io_error(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(UNIT_SUFFIX) && !current.contains(name.as_str()) {
                stale.push(name);
            }
        }
        stale.sort();
        for name in stale {
            let path = dir.join(&name);
            fs::remove_file(&path).map_err(|e| io_error(&path, e))?;
            tracing::debug!(unit = %name, "Removed stale unit");
            report.removed.push(name);
        }

        Ok(report)
    }
}

impl<'a> IntoIterator for &'a GeneratedSources {
    type Item = &'a GeneratedUnit;
    type IntoIter = std::collections::btree_map::Values<'a, String, GeneratedUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.values()
    }
}

fn write_if_changed(
    dir: &Path,
    name: &str,
    source: &str,
    report: &mut WriteReport,
) -> Result<(), GenerateError> {
    let path = dir.join(name);
    if fs::read_to_string(&path).is_ok_and(|existing| existing == source) {
        report.unchanged.push(name.to_string());
        return Ok(());
    }
    fs::write(&path, source).map_err(|e| io_error(&path, e))?;
    report.written.push(name.to_string());
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.display().to_string(),
        source,
    }
}
