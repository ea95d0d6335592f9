//! Capability contract and dispatch contract emission.

use quote::quote;

use super::{parse_as, render};
use crate::config::DiConfig;
use crate::error::GenerateError;
use crate::generator::naming::{CONTRACT_UNIT, DISPATCH_UNIT};
use crate::models::GeneratedUnit;

/// Emits the `Map<TIn, TOut>` contract every wrapper implements.
///
/// Emitted once per compilation, also when no mapper exists.
pub fn emit_contract() -> Result<GeneratedUnit, GenerateError> {
    render(
        CONTRACT_UNIT,
        quote! {
            /// Converts a `TIn` into a `TOut`.
            ///
            /// Implemented for every discovered conversion method.
            pub trait Map<TIn, TOut> {
                fn map(&self, input: TIn) -> TOut;
            }
        },
    )
}

/// Emits the `Mapper<TIn, TOut>` dispatch contract and `MapResolver`, which
/// looks up the registered `Map<TIn, TOut>` in the container at call time.
///
/// Only emitted when the container is present.
pub fn emit_dispatch(root: &str, di: &DiConfig) -> Result<GeneratedUnit, GenerateError> {
    let root: syn::Path = parse_as(DISPATCH_UNIT, root)?;
    let provider: syn::Path = parse_as(DISPATCH_UNIT, &di.provider)?;

    render(
        DISPATCH_UNIT,
        quote! {
            /// Converts a `TIn` into a `TOut` through whichever `Map` is registered
            /// for that pair.
            pub trait Mapper<TIn, TOut> {
                fn map(&self, input: TIn) -> TOut;
            }

            /// Resolves `Map<TIn, TOut>` implementations from the container.
            ///
            /// Construction never fails; a pair without a registration fails
            /// when it is first mapped.
            #[derive(Clone)]
            pub struct MapResolver {
                provider: #provider,
            }

            impl MapResolver {
                pub fn new(provider: #provider) -> Self {
                    Self { provider }
                }
            }

            impl<TIn: 'static, TOut: 'static> Mapper<TIn, TOut> for MapResolver {
                fn map(&self, input: TIn) -> TOut {
                    let mapper = self.provider.get_required::<dyn #root::Map<TIn, TOut>>();
                    #root::Map::map(&*mapper, input)
                }
            }
        },
    )
}
