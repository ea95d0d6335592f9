//! Build script entry point.
//!
//! A consuming crate adds `mapwire` as a build dependency and calls
//! [`generate`] from its `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     mapwire::build::generate().unwrap();
//! }
//! ```
//!
//! then includes the result once, usually at the crate root:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/mapwire.rs"));
//! ```

use std::path::{Path, PathBuf};

use crate::compilation::Compilation;
use crate::config::{Config, CONFIG_FILE};
use crate::error::GenerateError;
use crate::generator::{Generation, Generator};
use crate::output::WriteReport;

/// Config keys that can be overridden through `MAPWIRE_*` variables.
const ENV_KEYS: &[&str] = &[
    "MARKER",
    "CLASS_POLICY",
    "COMPANION_SUFFIX",
    "ROOT",
    "DI__DETECTION",
    "DI__CONTAINER",
    "DI__PROVIDER",
    "DI__LIFETIME",
];

/// Generates into `OUT_DIR` for the crate at `CARGO_MANIFEST_DIR`, and tells
/// cargo to rerun when sources, the manifest or the config change.
pub fn generate() -> Result<Generation, GenerateError> {
    let manifest_dir = env_path("CARGO_MANIFEST_DIR")?;
    let out_dir = env_path("OUT_DIR")?;

    println!("cargo:rerun-if-changed={}", manifest_dir.join("src").display());
    println!("cargo:rerun-if-changed={}", manifest_dir.join("Cargo.toml").display());
    println!("cargo:rerun-if-changed={}", manifest_dir.join(CONFIG_FILE).display());
    for var in ENV_KEYS {
        println!("cargo:rerun-if-env-changed=MAPWIRE_{}", var);
    }

    let (generation, _) = generate_into(&manifest_dir, &out_dir)?;
    Ok(generation)
}

/// Loads config and sources from `manifest_dir`, runs one generation and
/// writes the units to `out_dir`.
pub fn generate_into(
    manifest_dir: &Path,
    out_dir: &Path,
) -> Result<(Generation, WriteReport), GenerateError> {
    let config = Config::load(manifest_dir)?;
    let compilation = Compilation::load(manifest_dir)?;

    let generation = Generator::new(config).run(&compilation)?;
    let report = generation.sources.write_to(out_dir)?;

    tracing::info!(
        descriptors = generation.descriptors.len(),
        units = generation.sources.len(),
        written = report.written.len(),
        removed = report.removed.len(),
        di_present = generation.di_present,
        "Generated mappers into {}",
        out_dir.display()
    );

    Ok((generation, report))
}

fn env_path(name: &'static str) -> Result<PathBuf, GenerateError> {
    std::env::var_os(name)
        .map(PathBuf::from)
        .ok_or(GenerateError::MissingEnv(name))
}
