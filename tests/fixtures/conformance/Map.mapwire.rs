// @generated by mapwire. Do not edit.

/// Converts a `TIn` into a `TOut`.
///
/// Implemented for every discovered conversion method.
pub trait Map<TIn, TOut> {
    fn map(&self, input: TIn) -> TOut;
}
