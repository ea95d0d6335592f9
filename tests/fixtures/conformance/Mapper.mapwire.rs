// @generated by mapwire. Do not edit.

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
    provider: crate::di::Provider,
}
impl MapResolver {
    pub fn new(provider: crate::di::Provider) -> Self {
        Self { provider }
    }
}
impl<TIn: 'static, TOut: 'static> Mapper<TIn, TOut> for MapResolver {
    fn map(&self, input: TIn) -> TOut {
        let mapper = self.provider.get_required::<dyn crate::Map<TIn, TOut>>();
        crate::Map::map(&*mapper, input)
    }
}
