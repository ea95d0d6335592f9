//! Registry entries pairing a `(TIn, TOut)` key with a concrete wrapper.

use serde::Serialize;

/// How the container constructs a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WrapperConstruction {
    /// The mapper struct itself, built through `Default`.
    Default,
    /// A stateless unit-struct companion.
    Unit,
}

/// A concrete wrapper registered under its `(TIn, TOut)` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegistryEntry {
    pub input_type: String,
    pub output_type: String,
    /// Crate-absolute path of the wrapper type.
    pub wrapper: String,
    pub construction: WrapperConstruction,
}

/// A user-written `impl Map<TIn, TOut> for Target`.
///
/// The target is registered like an instance mapper, built through
/// `Default`, but no wrapper is generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MapImpl {
    /// Crate-absolute path of the implementing type.
    pub target: String,
    pub input_type: String,
    pub output_type: String,
}
