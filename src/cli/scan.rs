//! Scan command handler.

use std::path::Path;

use color_eyre::Result;
use serde::Serialize;

use crate::compilation::Compilation;
use crate::config::Config;
use crate::generator::Generator;
use crate::models::{ConversionMethodDescriptor, MapImpl};

use super::App;

#[derive(Serialize)]
struct ScanReport<'a> {
    di_present: bool,
    mappers: &'a [ConversionMethodDescriptor],
    map_impls: &'a [MapImpl],
    units: Vec<&'a str>,
}

impl App {
    /// Print the discovered conversion methods without writing any file.
    pub fn run_scan(&self, manifest_dir: &Path) -> Result<()> {
        let config = Config::load(manifest_dir)?;
        let compilation = Compilation::load(manifest_dir)?;
        tracing::debug!(
            "Scanning {} source file(s) with marker #[{}]",
            compilation.units.len(),
            config.marker
        );

        let generation = Generator::new(config).run(&compilation)?;
        let report = ScanReport {
            di_present: generation.di_present,
            mappers: &generation.descriptors,
            map_impls: &generation.map_impls,
            units: generation.sources.names().collect(),
        };

        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
