//! Incremental generation pipeline.
//!
//! scan -> classify -> {contract, wrappers} -> registry, with DI detection
//! as an independent sub-pipeline joined only at the registry stage.
//!
//! Every stage is a pure function of its input. [`Generator`] memoizes each
//! stage by structural equality of that input, so an edit to one unit only
//! rescans that unit and only re-emits the wrappers whose descriptors
//! changed. Caches are replaced at the end of a successful run; a run that
//! fails part-way leaves them as they were.

pub mod classify;
pub mod detect;
pub mod naming;
pub mod resolve;
pub mod scan;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::Serialize;

use crate::compilation::Compilation;
use crate::config::{Config, DiConfig, DiDetection};
use crate::emit;
use crate::error::GenerateError;
use crate::models::{ConversionMethodDescriptor, GeneratedUnit, MapImpl, MapperKind};
use crate::output::GeneratedSources;

use self::scan::MapperCandidate;

/// Counters describing how much work a run recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Units parsed and scanned in this run.
    pub units_scanned: usize,
    /// Units whose scan result was reused.
    pub units_reused: usize,
    /// Candidates classified in this run.
    pub candidates_classified: usize,
    /// Wrapper units rendered in this run.
    pub wrappers_emitted: usize,
    /// Wrapper units reused from a previous run.
    pub wrappers_reused: usize,
    /// Units checked for a DI container reference in this run.
    pub units_detected: usize,
    /// Whether the registry units were reused.
    pub registry_reused: bool,
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    pub sources: GeneratedSources,
    /// Every wired conversion method, sorted.
    pub descriptors: Vec<ConversionMethodDescriptor>,
    /// Hand-written `Map` impls, sorted.
    pub map_impls: Vec<MapImpl>,
    pub di_present: bool,
    pub stats: RunStats,
}

#[derive(Debug, Clone)]
struct ScanEntry {
    fingerprint: blake3::Hash,
    candidates: Arc<[MapperCandidate]>,
    map_impls: Arc<[MapImpl]>,
}

#[derive(Debug, Clone, Copy)]
struct DetectEntry {
    fingerprint: blake3::Hash,
    references: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegistryKey {
    descriptors: Vec<ConversionMethodDescriptor>,
    map_impls: Vec<MapImpl>,
    di: DiConfig,
}

/// Incremental generator holding per-stage caches between runs.
#[derive(Debug)]
pub struct Generator {
    config: Config,
    contract: Option<GeneratedUnit>,
    scans: HashMap<String, ScanEntry>,
    classified: HashMap<MapperCandidate, Arc<[ConversionMethodDescriptor]>>,
    wrappers: HashMap<ConversionMethodDescriptor, GeneratedUnit>,
    detections: HashMap<String, DetectEntry>,
    registry: Option<(RegistryKey, Vec<GeneratedUnit>)>,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            contract: None,
            scans: HashMap::new(),
            classified: HashMap::new(),
            wrappers: HashMap::new(),
            detections: HashMap::new(),
            registry: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the pipeline over a compilation snapshot.
    ///
    /// Rerunning on an unchanged snapshot produces identical units.
    pub fn run(&mut self, compilation: &Compilation) -> Result<Generation, GenerateError> {
        let mut stats = RunStats::default();

        // Scan
        let mut scans = HashMap::with_capacity(compilation.units.len());
        let mut candidates = Vec::new();
        let mut map_impls = Vec::new();
        for unit in &compilation.units {
            let fingerprint = unit.fingerprint();
            let entry = match self.scans.get(&unit.path) {
                Some(entry) if entry.fingerprint == fingerprint => {
                    stats.units_reused += 1;
                    entry.clone()
                }
                _ => {
                    stats.units_scanned += 1;
                    let found = scan::scan_unit(unit, &self.config.marker);
                    ScanEntry {
                        fingerprint,
                        candidates: found.candidates.into(),
                        map_impls: found.map_impls.into(),
                    }
                }
            };
            candidates.extend(entry.candidates.iter().cloned());
            map_impls.extend(entry.map_impls.iter().cloned());
            scans.insert(unit.path.clone(), entry);
        }

        // Classify
        let mut classified = HashMap::with_capacity(candidates.len());
        let mut descriptors = Vec::new();
        for candidate in candidates {
            let result = match self.classified.get(&candidate) {
                Some(result) => result.clone(),
                None => {
                    stats.candidates_classified += 1;
                    classify::classify(&candidate, self.config.class_policy).into()
                }
            };
            descriptors.extend(result.iter().cloned());
            classified.insert(candidate, result);
        }
        map_impls.sort();
        descriptors.retain(|descriptor| !implemented_by_hand(descriptor, &map_impls));
        descriptors.sort();

        let mut sources = GeneratedSources::new();

        // Contract
        let contract = match &self.contract {
            Some(contract) => contract.clone(),
            None => emit::emit_contract()?,
        };
        sources.add(contract.clone())?;

        // Wrappers
        let mut wrappers = HashMap::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            let unit = match self.wrappers.get(descriptor) {
                Some(unit) => {
                    stats.wrappers_reused += 1;
                    unit.clone()
                }
                None => {
                    stats.wrappers_emitted += 1;
                    emit::emit_wrapper(
                        descriptor,
                        &self.config.root,
                        &self.config.companion_suffix,
                    )?
                }
            };
            sources.add(unit.clone())?;
            wrappers.insert(descriptor.clone(), unit);
        }
        check_companion_names(&descriptors, &self.config.companion_suffix)?;

        // DI detection, independent of mapper discovery
        let (di_present, detections) = self.detect_container(compilation, &mut stats);

        // Registry
        let registry = if di_present {
            let key = RegistryKey {
                descriptors: descriptors.clone(),
                map_impls: map_impls.clone(),
                di: self.config.di.clone(),
            };
            let units = match &self.registry {
                Some((cached, units)) if *cached == key => {
                    stats.registry_reused = true;
                    units.clone()
                }
                _ => self.emit_registry(&descriptors, &map_impls)?,
            };
            for unit in &units {
                sources.add(unit.clone())?;
            }
            Some((key, units))
        } else {
            None
        };

        self.contract = Some(contract);
        self.scans = scans;
        self.classified = classified;
        self.wrappers = wrappers;
        self.detections = detections;
        self.registry = registry;

        tracing::debug!(?stats, units = sources.len(), di_present, "Generation run complete");

        Ok(Generation {
            sources,
            descriptors,
            map_impls,
            di_present,
            stats,
        })
    }

    fn detect_container(
        &self,
        compilation: &Compilation,
        stats: &mut RunStats,
    ) -> (bool, HashMap<String, DetectEntry>) {
        let di = &self.config.di;
        match di.detection {
            DiDetection::Always => return (true, HashMap::new()),
            DiDetection::Never => return (false, HashMap::new()),
            DiDetection::Auto => {}
        }

        let declared = di
            .container_crate()
            .is_some_and(|name| compilation.dependencies.contains(name));

        let mut detections = HashMap::with_capacity(compilation.units.len());
        let mut referenced = false;
        for unit in &compilation.units {
            let fingerprint = unit.fingerprint();
            let entry = match self.detections.get(&unit.path) {
                Some(entry) if entry.fingerprint == fingerprint => *entry,
                _ => {
                    stats.units_detected += 1;
                    DetectEntry {
                        fingerprint,
                        references: detect::references_container(unit, &di.container),
                    }
                }
            };
            referenced |= entry.references;
            detections.insert(unit.path.clone(), entry);
        }

        (declared || referenced, detections)
    }

    fn emit_registry(
        &self,
        descriptors: &[ConversionMethodDescriptor],
        map_impls: &[MapImpl],
    ) -> Result<Vec<GeneratedUnit>, GenerateError> {
        let root = &self.config.root;
        let entries =
            emit::registry_entries(descriptors, map_impls, root, &self.config.companion_suffix);
        Ok(vec![
            emit::emit_dispatch(root, &self.config.di)?,
            emit::emit_registry(&entries, root, &self.config.di)?,
        ])
    }
}

/// An instance method whose struct already implements `Map` for the same
/// pair by hand would produce a conflicting impl.
fn implemented_by_hand(descriptor: &ConversionMethodDescriptor, map_impls: &[MapImpl]) -> bool {
    let by_hand = descriptor.kind == MapperKind::Instance
        && map_impls.iter().any(|map_impl| {
            map_impl.target == descriptor.declaration.qualified_name()
                && map_impl.input_type == descriptor.input_type
                && map_impl.output_type == descriptor.output_type
        });
    if by_hand {
        tracing::debug!(
            class = %descriptor.declaration.qualified_name(),
            method = %descriptor.method_name,
            "Skipping instance method already implemented by hand"
        );
    }
    by_hand
}

/// Companions share one module, so their names must be distinct.
fn check_companion_names(
    descriptors: &[ConversionMethodDescriptor],
    suffix: &str,
) -> Result<(), GenerateError> {
    let mut seen = BTreeSet::new();
    for name in descriptors
        .iter()
        .filter_map(|descriptor| naming::companion_type_name(descriptor, suffix))
    {
        if seen.contains(&name) {
            return Err(GenerateError::CompanionNameCollision { name });
        }
        seen.insert(name);
    }
    Ok(())
}

/// Runs a fresh generator once.
pub fn generate(config: Config, compilation: &Compilation) -> Result<Generation, GenerateError> {
    Generator::new(config).run(compilation)
}
