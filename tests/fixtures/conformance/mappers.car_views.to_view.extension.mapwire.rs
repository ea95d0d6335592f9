// @generated by mapwire. Do not edit.

/// Adapts `crate::mappers::car_views::to_view` to `Map`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default)]
pub struct mappers__car_views__to_view__Adapter;
impl crate::Map<crate::models::Car, crate::models::CarView>
for mappers__car_views__to_view__Adapter {
    fn map(&self, input: crate::models::Car) -> crate::models::CarView {
        #[allow(unused_imports)]
        use crate::mappers::car_views::*;
        input.to_view()
    }
}
