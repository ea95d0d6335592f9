//! Mapper declarations, conversion methods and their invocation kinds.

use std::fmt;

use serde::Serialize;

use crate::compilation::ModulePath;

/// A user-written item carrying the mapper marker.
///
/// A marked `struct` is an instance-capable class; a marked inline `mod` is a
/// static class whose functions are called by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MapperDeclaration {
    pub namespace: ModulePath,
    pub class_name: String,
    pub is_static: bool,
}

impl MapperDeclaration {
    /// Crate-absolute path of the declaration, e.g. `crate::mappers::CarMapper`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.namespace, self.class_name)
    }
}

/// How a conversion method is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MapperKind {
    /// `&self` method on a marked struct, called on a live value of that struct.
    Instance,
    /// Associated function or module function, called by path.
    Static,
    /// Module function whose first parameter is a typed `self` receiver,
    /// called with receiver syntax on the input.
    Extension,
}

impl MapperKind {
    /// Classification is a pure function of these two facts.
    pub fn classify(is_static: bool, has_extension_receiver: bool) -> Self {
        match (is_static, has_extension_receiver) {
            (true, true) => MapperKind::Extension,
            (true, false) => MapperKind::Static,
            (false, _) => MapperKind::Instance,
        }
    }

    /// Lowercase tag used in generated unit names.
    pub fn tag(&self) -> &'static str {
        match self {
            MapperKind::Instance => "instance",
            MapperKind::Static => "static",
            MapperKind::Extension => "extension",
        }
    }
}

impl fmt::Display for MapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One discovered conversion method.
///
/// Type names are crate-absolute display strings (`crate::models::Car`,
/// `String`, `Vec<crate::models::Wheel>`), so generated code can name them
/// from anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConversionMethodDescriptor {
    pub declaration: MapperDeclaration,
    pub method_name: String,
    pub input_type: String,
    pub output_type: String,
    pub kind: MapperKind,
}

impl ConversionMethodDescriptor {
    /// The `(TIn, TOut)` key this method satisfies.
    pub fn type_pair(&self) -> (&str, &str) {
        (&self.input_type, &self.output_type)
    }
}
