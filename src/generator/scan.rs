//! Declaration scanner.
//!
//! Finds items carrying the mapper marker and extracts their body-less
//! conversion methods. Scanning is purely syntactic: it needs the attribute
//! name and the shape of each declaration, never resolved types.
//!
//! The scanner also picks up hand-written `impl Map<TIn, TOut> for T`
//! blocks, which are registered without a generated wrapper.

use syn::{
    Attribute, ForeignItemFn, GenericArgument, ImplItem, Item, ItemImpl, PathArguments,
    ReturnType, Type,
};

use super::resolve::ModuleScope;
use crate::compilation::{ModulePath, SourceUnit};
use crate::models::{MapImpl, MapperDeclaration};

/// Name of the capability contract trait.
const MAP_TRAIT: &str = "Map";

/// A marked declaration paired with its extracted conversion methods.
///
/// Body-less methods are kept as [`ForeignItemFn`], which is exactly
/// attributes, visibility, signature and `;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapperCandidate {
    pub declaration: MapperDeclaration,
    pub methods: Vec<ForeignItemFn>,
    /// Names visible where the methods are declared.
    pub scope: ModuleScope,
}

/// Everything one unit contributes, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitScan {
    pub candidates: Vec<MapperCandidate>,
    pub map_impls: Vec<MapImpl>,
}

/// Scans one source unit for mapper candidates and hand-written `Map` impls.
///
/// A unit that does not parse yields nothing.
pub fn scan_unit(unit: &SourceUnit, marker: &str) -> UnitScan {
    let file = match syn::parse_file(&unit.text) {
        Ok(file) => file,
        Err(err) => {
            tracing::debug!(path = %unit.path, error = %err, "Skipping unit that does not parse");
            return UnitScan::default();
        }
    };

    let mut scan = UnitScan::default();
    scan_items(&file.items, &unit.module, marker, &mut scan);
    scan
}

fn scan_items(items: &[Item], module: &ModulePath, marker: &str, out: &mut UnitScan) {
    let scope = ModuleScope::from_items(module.clone(), items);

    for item in items {
        match item {
            Item::Impl(item_impl) => {
                if let Some(found) = map_impl(item_impl, &scope) {
                    out.map_impls.push(found);
                }
            }
            Item::Struct(item_struct) if has_marker(&item_struct.attrs, marker) => {
                let class_name = item_struct.ident.to_string();
                let methods = inherent_bodyless_fns(items, &class_name);
                out.candidates.push(MapperCandidate {
                    declaration: MapperDeclaration {
                        namespace: module.clone(),
                        class_name,
                        is_static: false,
                    },
                    methods,
                    scope: scope.clone(),
                });
            }
            Item::Mod(item_mod) => {
                // `mod name;` has its own unit
                let Some((_, content)) = &item_mod.content else {
                    continue;
                };
                let class_name = item_mod.ident.to_string();
                let child = module.child(&class_name);

                if has_marker(&item_mod.attrs, marker) {
                    let methods = content
                        .iter()
                        .filter_map(|item| match item {
                            Item::Verbatim(tokens) => bodyless_fn(tokens),
                            _ => None,
                        })
                        .filter(|method| !is_constructor(method, &class_name))
                        .collect();
                    out.candidates.push(MapperCandidate {
                        declaration: MapperDeclaration {
                            namespace: module.clone(),
                            class_name,
                            is_static: true,
                        },
                        methods,
                        scope: ModuleScope::from_items(child.clone(), content),
                    });
                }

                scan_items(content, &child, marker, out);
            }
            _ => {}
        }
    }
}

/// `impl Map<In, Out> for Target` without impl generics, matched on the
/// last segment of the trait path. All three types must resolve.
fn map_impl(item_impl: &ItemImpl, scope: &ModuleScope) -> Option<MapImpl> {
    let (negative, trait_path, _) = item_impl.trait_.as_ref()?;
    if negative.is_some() || !item_impl.generics.params.is_empty() {
        return None;
    }
    let segment = trait_path.segments.last()?;
    if segment.ident != MAP_TRAIT {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    let types: Vec<&Type> = arguments
        .args
        .iter()
        .filter_map(|argument| match argument {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect();
    let [input, output] = types.as_slice() else {
        return None;
    };

    match (
        scope.resolve(&item_impl.self_ty),
        scope.resolve(input),
        scope.resolve(output),
    ) {
        (Some(target), Some(input_type), Some(output_type)) => Some(MapImpl {
            target,
            input_type,
            output_type,
        }),
        _ => {
            tracing::debug!(
                module = %scope.module,
                "Skipping Map impl with types that do not resolve"
            );
            None
        }
    }
}

/// Matches the marker by the last segment of the attribute path, so both
/// `#[mapper]` and `#[some_crate::mapper]` count.
pub fn has_marker(attrs: &[Attribute], marker: &str) -> bool {
    attrs.iter().any(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == marker)
    })
}

/// Body-less fns from every inherent `impl {class_name}` block among `items`.
fn inherent_bodyless_fns(items: &[Item], class_name: &str) -> Vec<ForeignItemFn> {
    items
        .iter()
        .filter_map(|item| match item {
            Item::Impl(item_impl) if item_impl.trait_.is_none() => Some(item_impl),
            _ => None,
        })
        .filter(|item_impl| names_type(&item_impl.self_ty, class_name))
        .flat_map(|item_impl| item_impl.items.iter())
        .filter_map(|item| match item {
            // syn keeps `fn f(..);` inside impl blocks as verbatim tokens
            ImplItem::Verbatim(tokens) => bodyless_fn(tokens),
            _ => None,
        })
        .filter(|method| !is_constructor(method, class_name))
        .collect()
}

fn bodyless_fn(tokens: &proc_macro2::TokenStream) -> Option<ForeignItemFn> {
    syn::parse2::<ForeignItemFn>(tokens.clone()).ok()
}

fn names_type(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => {
            type_path.qself.is_none()
                && type_path
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == name)
        }
        _ => false,
    }
}

/// A method returning `Self` or the declaring type builds the mapper, it
/// does not convert anything.
fn is_constructor(method: &ForeignItemFn, class_name: &str) -> bool {
    match &method.sig.output {
        ReturnType::Type(_, ty) => names_type(ty, "Self") || names_type(ty, class_name),
        ReturnType::Default => false,
    }
}
