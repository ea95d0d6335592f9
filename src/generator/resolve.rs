//! Lightweight symbol resolution for conversion method signatures.
//!
//! Generated code lives at the crate root, so every type it names must be
//! crate-absolute. [`ModuleScope`] records what a module can see without
//! type checking: its `use` imports, the types and modules it declares, and
//! the std prelude. Types that cannot be resolved this way are rejected.

use std::collections::{BTreeMap, BTreeSet};

use quote::ToTokens;
use syn::visit_mut::{self, VisitMut};
use syn::{Item, UseTree};

use crate::compilation::ModulePath;

/// Type names usable anywhere without an import.
const PRELUDE_TYPES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64",
    "i128", "isize", "f32", "f64", "String", "Vec", "Option", "Result", "Box",
];

/// Names visible in one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModuleScope {
    pub module: ModulePath,
    /// Local name -> crate-absolute (or extern-crate) path segments.
    imports: BTreeMap<String, Vec<String>>,
    /// Types declared in the module.
    types: BTreeSet<String>,
    /// Child modules declared in the module.
    modules: BTreeSet<String>,
}

impl ModuleScope {
    /// Builds the scope of `module` from its items.
    pub fn from_items(module: ModulePath, items: &[Item]) -> Self {
        let mut scope = Self {
            module,
            ..Self::default()
        };

        // declarations first, so imports through child modules resolve
        // regardless of source order
        for item in items {
            match item {
                Item::Struct(s) => {
                    scope.types.insert(s.ident.to_string());
                }
                Item::Enum(e) => {
                    scope.types.insert(e.ident.to_string());
                }
                Item::Union(u) => {
                    scope.types.insert(u.ident.to_string());
                }
                Item::Type(t) => {
                    scope.types.insert(t.ident.to_string());
                }
                Item::Trait(t) => {
                    scope.types.insert(t.ident.to_string());
                }
                Item::Mod(m) => {
                    scope.modules.insert(m.ident.to_string());
                }
                _ => {}
            }
        }

        for item in items {
            if let Item::Use(u) = item {
                let mut prefix = Vec::new();
                if u.leading_colon.is_some() {
                    prefix.push(String::new());
                }
                scope.collect_use(&u.tree, &mut prefix);
            }
        }

        scope
    }

    fn collect_use(&mut self, tree: &UseTree, prefix: &mut Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.collect_use(&path.tree, prefix);
                prefix.pop();
            }
            UseTree::Name(name) => {
                let ident = name.ident.to_string();
                if ident == "self" {
                    if let Some(last) = prefix.last().cloned() {
                        self.insert_import(last, prefix.clone());
                    }
                } else {
                    let mut full = prefix.clone();
                    full.push(ident.clone());
                    self.insert_import(ident, full);
                }
            }
            UseTree::Rename(rename) => {
                let mut full = prefix.clone();
                if rename.ident != "self" {
                    full.push(rename.ident.to_string());
                }
                self.insert_import(rename.rename.to_string(), full);
            }
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.collect_use(tree, prefix);
                }
            }
            // Glob imports cannot be resolved without the target module.
            UseTree::Glob(_) => {}
        }
    }

    fn insert_import(&mut self, name: String, path: Vec<String>) {
        if let Some(absolute) = self.absolutize(&path) {
            self.imports.insert(name, absolute);
        }
    }

    /// Rewrites a path as seen from this module into a crate-absolute one.
    ///
    /// Paths starting at an extern crate are kept as written.
    fn absolutize(&self, path: &[String]) -> Option<Vec<String>> {
        let (first, rest) = path.split_first()?;
        match first.as_str() {
            // `::name` always names an extern crate
            "" => Some(rest.to_vec()),
            "crate" => Some(path.to_vec()),
            "self" => Some(join(self.module.segments(), rest)),
            "super" => {
                let mut base = self.module.parent()?;
                let mut rest = rest;
                while rest.first().map(String::as_str) == Some("super") {
                    base = base.parent()?;
                    rest = &rest[1..];
                }
                Some(join(base.segments(), rest))
            }
            name if self.modules.contains(name) || self.types.contains(name) => {
                Some(join(self.module.segments(), path))
            }
            name => match self.imports.get(name) {
                Some(import) => Some(join(import, rest)),
                None => Some(path.to_vec()),
            },
        }
    }

    /// Resolves a type to its crate-absolute display name.
    ///
    /// Returns `None` for types that are not visible by name from this
    /// module or cannot appear as a trait argument without extra generics:
    /// references, `impl Trait`, trait objects, `_`, `Self`, `!`, qualified
    /// paths and non-`'static` lifetimes.
    pub fn resolve(&self, ty: &syn::Type) -> Option<String> {
        let mut ty = ty.clone();
        let mut resolver = TypeResolver {
            scope: self,
            resolved: true,
        };
        resolver.visit_type_mut(&mut ty);
        resolver.resolved.then(|| display_type(&ty))
    }

    fn resolve_leading(&self, first: &str, multi_segment: bool) -> Resolution {
        if first == "Self" {
            return Resolution::Unresolved;
        }
        if matches!(first, "crate" | "self" | "super") {
            return Resolution::Relative;
        }
        if let Some(import) = self.imports.get(first) {
            return Resolution::Replace(import.clone());
        }
        if self.types.contains(first) || (multi_segment && self.modules.contains(first)) {
            return Resolution::Replace(join(self.module.segments(), &[first.to_string()]));
        }
        if PRELUDE_TYPES.contains(&first) {
            return Resolution::Keep;
        }
        // `serde_json::Value`, `std::path::PathBuf`: extern prelude
        if multi_segment {
            return Resolution::Keep;
        }
        Resolution::Unresolved
    }
}

enum Resolution {
    Keep,
    Relative,
    Replace(Vec<String>),
    Unresolved,
}

struct TypeResolver<'a> {
    scope: &'a ModuleScope,
    resolved: bool,
}

impl VisitMut for TypeResolver<'_> {
    fn visit_type_mut(&mut self, ty: &mut syn::Type) {
        match ty {
            syn::Type::Reference(_)
            | syn::Type::ImplTrait(_)
            | syn::Type::TraitObject(_)
            | syn::Type::Infer(_)
            | syn::Type::Never(_)
            | syn::Type::Macro(_)
            | syn::Type::Verbatim(_) => self.resolved = false,
            _ => visit_mut::visit_type_mut(self, ty),
        }
    }

    fn visit_type_path_mut(&mut self, type_path: &mut syn::TypePath) {
        if type_path.qself.is_some() {
            self.resolved = false;
            return;
        }

        let path = &mut type_path.path;
        if path.leading_colon.is_none() {
            let Some(first) = path.segments.first() else {
                self.resolved = false;
                return;
            };
            let first_name = first.ident.to_string();
            let multi_segment = path.segments.len() > 1;

            match self.scope.resolve_leading(&first_name, multi_segment) {
                Resolution::Keep => {}
                Resolution::Unresolved => {
                    self.resolved = false;
                    return;
                }
                Resolution::Relative => {
                    let idents: Vec<String> =
                        path.segments.iter().map(|s| s.ident.to_string()).collect();
                    let Some(absolute) = self.scope.absolutize(&idents) else {
                        self.resolved = false;
                        return;
                    };
                    let tail = remaining_after_prefix(&idents);
                    let consumed = idents.len() - tail;
                    replace_prefix(path, consumed, &absolute[..absolute.len() - tail]);
                }
                Resolution::Replace(prefix) => replace_prefix(path, 1, &prefix),
            }
        }

        visit_mut::visit_type_path_mut(self, type_path);
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut syn::Lifetime) {
        if lifetime.ident != "static" {
            self.resolved = false;
        }
    }
}

/// Number of segments left after the leading `crate`/`self`/`super` chain.
fn remaining_after_prefix(idents: &[String]) -> usize {
    let prefix = idents
        .iter()
        .take_while(|s| matches!(s.as_str(), "crate" | "self" | "super"))
        .count();
    idents.len() - prefix
}

/// Replaces the first `count` segments of `path` with plain `segments`.
///
/// Generic arguments of the last replaced segment move to the last new one,
/// so an imported `Pair<u8>` becomes `crate::models::Pair<u8>`.
fn replace_prefix(path: &mut syn::Path, count: usize, segments: &[String]) {
    let arguments = count
        .checked_sub(1)
        .and_then(|last| path.segments.iter().nth(last))
        .map(|segment| segment.arguments.clone())
        .unwrap_or(syn::PathArguments::None);
    let tail: Vec<syn::PathSegment> = path.segments.iter().skip(count).cloned().collect();

    let mut rebuilt: syn::punctuated::Punctuated<syn::PathSegment, syn::Token![::]> =
        segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                syn::PathSegment::from(syn::Ident::new(segment, proc_macro2::Span::call_site()))
            })
            .collect();
    if let Some(last) = rebuilt.last_mut() {
        last.arguments = arguments;
    }
    rebuilt.extend(tail);
    path.segments = rebuilt;
}

fn join(base: &[String], rest: &[String]) -> Vec<String> {
    base.iter().chain(rest).cloned().collect()
}

/// Compact, deterministic rendering of a type, e.g. `Vec<crate::models::Wheel>`.
pub fn display_type(ty: &syn::Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace(" ; ", "; ")
}
