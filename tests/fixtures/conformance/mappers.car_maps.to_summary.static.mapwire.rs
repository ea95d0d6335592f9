// @generated by mapwire. Do not edit.

/// Adapts `crate::mappers::car_maps::to_summary` to `Map`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default)]
pub struct mappers__car_maps__to_summary__Adapter;
impl crate::Map<crate::models::Car, crate::models::CarSummary>
for mappers__car_maps__to_summary__Adapter {
    fn map(&self, input: crate::models::Car) -> crate::models::CarSummary {
        crate::mappers::car_maps::to_summary(input)
    }
}
