//! Naming policy for generated units and companion types.
//!
//! Every name is a pure function of stable inputs (module path, class name,
//! method name, kind), so regenerating an unchanged crate yields the same
//! names. Module and item names are kept verbatim, so two mappers only
//! share a name when they share module, class and method, or when an
//! identifier itself contains the `__` separator of companion names. The
//! generator rejects both cases.

use crate::models::{ConversionMethodDescriptor, MapperKind};

/// File suffix shared by all generated units.
pub const UNIT_SUFFIX: &str = ".mapwire.rs";

/// Index file that `include!`s every generated unit.
pub const INDEX_FILE: &str = "mapwire.rs";

/// Unit holding the `Map<TIn, TOut>` contract.
pub const CONTRACT_UNIT: &str = "Map.mapwire.rs";

/// Unit holding the `Mapper<TIn, TOut>` dispatch contract and `MapResolver`.
pub const DISPATCH_UNIT: &str = "Mapper.mapwire.rs";

/// Unit holding the `AddMappers` container extension.
pub const REGISTRY_UNIT: &str = "AddMappers.mapwire.rs";

/// `{module.path}.{ClassName}.{method_name}.{kind}.mapwire.rs`, with the
/// leading `crate` dropped.
///
/// `.` cannot occur in an identifier, so two units only share a name when
/// two files define the same module, as `lib.rs` and `main.rs` both do.
pub fn wrapper_unit_name(descriptor: &ConversionMethodDescriptor) -> String {
    let mut parts = name_parts(descriptor);
    parts.push(descriptor.kind.tag());
    format!("{}{}", parts.join("."), UNIT_SUFFIX)
}

/// Name of the stateless companion adapter for a static or extension method,
/// `{module}__{ClassName}__{method_name}__{suffix}`.
///
/// Companions are all declared next to the index, so the name carries the
/// whole module path. Instance methods have no companion: the mapper struct
/// itself implements the contract.
pub fn companion_type_name(descriptor: &ConversionMethodDescriptor, suffix: &str) -> Option<String> {
    match descriptor.kind {
        MapperKind::Instance => None,
        MapperKind::Static | MapperKind::Extension => {
            let mut parts = name_parts(descriptor);
            parts.push(suffix);
            Some(parts.join("__"))
        }
    }
}

fn name_parts(descriptor: &ConversionMethodDescriptor) -> Vec<&str> {
    let declaration = &descriptor.declaration;
    declaration
        .namespace
        .segments()
        .iter()
        .skip(1)
        .map(|segment| unraw(segment))
        .chain([
            unraw(&declaration.class_name),
            unraw(&descriptor.method_name),
        ])
        .collect()
}

fn unraw(name: &str) -> &str {
    name.strip_prefix("r#").unwrap_or(name)
}
