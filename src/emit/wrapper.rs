//! Wrapper emission: adapts one conversion method to `Map<TIn, TOut>`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{parse_as, render};
use crate::error::GenerateError;
use crate::generator::naming::{companion_type_name, wrapper_unit_name};
use crate::models::{ConversionMethodDescriptor, GeneratedUnit, MapperKind};

/// Emits the wrapper unit for one descriptor.
///
/// - `Instance`: the mapper struct itself implements the contract and
///   forwards to `self.method(input)`.
/// - `Static`: a stateless companion forwards to `path::method(input)`.
/// - `Extension`: a stateless companion calls `input.method()` with the
///   mapper module's items in scope.
pub fn emit_wrapper(
    descriptor: &ConversionMethodDescriptor,
    root: &str,
    suffix: &str,
) -> Result<GeneratedUnit, GenerateError> {
    let unit = wrapper_unit_name(descriptor);

    let root: syn::Path = parse_as(&unit, root)?;
    let target: syn::Path = parse_as(&unit, &descriptor.declaration.qualified_name())?;
    let method: syn::Ident = parse_as(&unit, &descriptor.method_name)?;
    let input: syn::Type = parse_as(&unit, &descriptor.input_type)?;
    let output: syn::Type = parse_as(&unit, &descriptor.output_type)?;

    let tokens = match descriptor.kind {
        MapperKind::Instance => quote! {
            impl #root::Map<#input, #output> for #target {
                fn map(&self, input: #input) -> #output {
                    self.#method(input)
                }
            }
        },
        MapperKind::Static => companion(
            descriptor,
            suffix,
            &root,
            &input,
            &output,
            quote! { #target::#method(input) },
        ),
        MapperKind::Extension => companion(
            descriptor,
            suffix,
            &root,
            &input,
            &output,
            quote! {
                #[allow(unused_imports)]
                use #target::*;
                input.#method()
            },
        ),
    };

    render(&unit, tokens)
}

fn companion(
    descriptor: &ConversionMethodDescriptor,
    suffix: &str,
    root: &syn::Path,
    input: &syn::Type,
    output: &syn::Type,
    body: TokenStream,
) -> TokenStream {
    let name = companion_type_name(descriptor, suffix).unwrap_or_default();
    let companion = format_ident!("{}", name);
    let doc = format!(
        " Adapts `{}::{}` to `Map`.",
        descriptor.declaration.qualified_name(),
        descriptor.method_name
    );

    quote! {
        #[doc = #doc]
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct #companion;

        impl #root::Map<#input, #output> for #companion {
            fn map(&self, input: #input) -> #output {
                #body
            }
        }
    }
}
