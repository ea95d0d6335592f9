//! Source emitters.
//!
//! Emitters build token streams with `quote!` and render them through
//! `prettyplease`, so output text is stable across runs.

mod contract;
mod registry;
mod wrapper;

pub use contract::{emit_contract, emit_dispatch};
pub use registry::{emit_registry, registry_entries};
pub use wrapper::emit_wrapper;

use proc_macro2::TokenStream;

use crate::error::GenerateError;
use crate::models::GeneratedUnit;

/// Header prepended to every generated unit.
pub const GENERATED_HEADER: &str = "// @generated by mapwire. Do not edit.\n\n";

/// Formats `tokens` as a Rust file and wraps it into a named unit.
pub fn render(name: &str, tokens: TokenStream) -> Result<GeneratedUnit, GenerateError> {
    let file: syn::File = syn::parse2(tokens).map_err(|source| GenerateError::Render {
        unit: name.to_string(),
        source,
    })?;
    let source = format!("{}{}", GENERATED_HEADER, prettyplease::unparse(&file));
    Ok(GeneratedUnit::new(name, source))
}

/// Parses a configured or discovered string into a syntax node, reporting
/// failures against the unit being emitted.
pub(crate) fn parse_as<T: syn::parse::Parse>(unit: &str, text: &str) -> Result<T, GenerateError> {
    syn::parse_str(text).map_err(|source| GenerateError::Render {
        unit: unit.to_string(),
        source,
    })
}
