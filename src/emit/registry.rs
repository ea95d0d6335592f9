//! Registry emission: the `AddMappers` container extension.

use quote::{format_ident, quote};

use super::{parse_as, render};
use crate::config::DiConfig;
use crate::error::GenerateError;
use crate::generator::naming::{companion_type_name, REGISTRY_UNIT};
use crate::models::{
    ConversionMethodDescriptor, GeneratedUnit, MapImpl, RegistryEntry, WrapperConstruction,
};

/// Flattens wrappers and hand-written `Map` impls into registry entries.
///
/// Generated wrappers come first, ordered by declaration and method, then
/// hand-written impls ordered by target, so the registry body does not
/// depend on discovery order. Entries with the same `(TIn, TOut)` key are
/// all kept; the container's own semantics decide which registration wins.
pub fn registry_entries(
    descriptors: &[ConversionMethodDescriptor],
    map_impls: &[MapImpl],
    root: &str,
    suffix: &str,
) -> Vec<RegistryEntry> {
    let mut descriptors: Vec<&ConversionMethodDescriptor> = descriptors.iter().collect();
    descriptors.sort();
    let mut map_impls: Vec<&MapImpl> = map_impls.iter().collect();
    map_impls.sort();

    let generated = descriptors.into_iter().map(|descriptor| {
        let (wrapper, construction) = match companion_type_name(descriptor, suffix) {
            Some(companion) => (format!("{}::{}", root, companion), WrapperConstruction::Unit),
            None => (
                descriptor.declaration.qualified_name(),
                WrapperConstruction::Default,
            ),
        };
        RegistryEntry {
            input_type: descriptor.input_type.clone(),
            output_type: descriptor.output_type.clone(),
            wrapper,
            construction,
        }
    });
    let hand_written = map_impls.into_iter().map(|map_impl| RegistryEntry {
        input_type: map_impl.input_type.clone(),
        output_type: map_impl.output_type.clone(),
        wrapper: map_impl.target.clone(),
        construction: WrapperConstruction::Default,
    });

    generated.chain(hand_written).collect()
}

/// Emits `AddMappers`, implemented for the configured container.
///
/// The body registers `MapResolver` once, then every entry under
/// `dyn Map<TIn, TOut>`, all with the configured lifetime, and returns the
/// container for chaining.
pub fn emit_registry(
    entries: &[RegistryEntry],
    root: &str,
    di: &DiConfig,
) -> Result<GeneratedUnit, GenerateError> {
    let root: syn::Path = parse_as(REGISTRY_UNIT, root)?;
    let container: syn::Path = parse_as(REGISTRY_UNIT, &di.container)?;
    let register = format_ident!("{}", di.lifetime.register_method());

    let registrations = entries
        .iter()
        .map(|entry| {
            let input: syn::Type = parse_as(REGISTRY_UNIT, &entry.input_type)?;
            let output: syn::Type = parse_as(REGISTRY_UNIT, &entry.output_type)?;
            let wrapper: syn::Path = parse_as(REGISTRY_UNIT, &entry.wrapper)?;
            let construct = match entry.construction {
                WrapperConstruction::Default => {
                    quote! { <#wrapper as ::core::default::Default>::default() }
                }
                WrapperConstruction::Unit => quote! { #wrapper },
            };
            Ok(quote! {
                self.#register::<dyn #root::Map<#input, #output>>(|_| {
                    ::std::sync::Arc::new(#construct)
                });
            })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    render(
        REGISTRY_UNIT,
        quote! {
            /// Registers every generated mapper with the container.
            pub trait AddMappers {
                fn add_mappers(&mut self) -> &mut Self;
            }

            impl AddMappers for #container {
                fn add_mappers(&mut self) -> &mut Self {
                    self.#register::<#root::MapResolver>(|provider| {
                        ::std::sync::Arc::new(#root::MapResolver::new(provider.clone()))
                    });
                    #(#registrations)*
                    self
                }
            }
        },
    )
}
