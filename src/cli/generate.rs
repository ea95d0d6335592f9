//! Generate command handler.

use std::path::Path;

use color_eyre::Result;

use crate::build::generate_into;

use super::App;

/// Output directory used when none is given.
const DEFAULT_OUT_DIR: &str = "target/mapwire";

impl App {
    /// Run generation for the crate at `manifest_dir`.
    pub fn run_generate(&self, manifest_dir: &Path, out_dir: Option<&Path>) -> Result<()> {
        let out_dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => manifest_dir.join(DEFAULT_OUT_DIR),
        };
        tracing::info!("Generating mappers for {}", manifest_dir.display());

        let (generation, report) = generate_into(manifest_dir, &out_dir)?;

        for descriptor in &generation.descriptors {
            tracing::debug!(
                mapper = %descriptor.declaration.qualified_name(),
                method = %descriptor.method_name,
                kind = %descriptor.kind,
                "{} -> {}",
                descriptor.input_type,
                descriptor.output_type
            );
        }

        if report.written.is_empty() && report.removed.is_empty() {
            tracing::info!("All {} units up to date", generation.sources.len());
        } else {
            tracing::info!(
                "Wrote {} file(s), removed {} stale unit(s) in {}",
                report.written.len(),
                report.removed.len(),
                out_dir.display()
            );
        }
        if !generation.di_present {
            tracing::info!("No DI container detected, registry not generated");
        }

        Ok(())
    }
}
