//! Generated source units.

use serde::Serialize;

/// One named source unit produced by a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GeneratedUnit {
    /// File name of the unit, unique within a run (e.g. `Map.mapwire.rs`).
    pub name: String,
    pub source: String,
}

impl GeneratedUnit {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}
