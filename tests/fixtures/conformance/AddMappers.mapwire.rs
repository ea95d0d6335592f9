// @generated by mapwire. Do not edit.

/// Registers every generated mapper with the container.
pub trait AddMappers {
    fn add_mappers(&mut self) -> &mut Self;
}
impl AddMappers for crate::di::Services {
    fn add_mappers(&mut self) -> &mut Self {
        self.add_scoped::<crate::MapResolver>(|provider| {
            ::std::sync::Arc::new(crate::MapResolver::new(provider.clone()))
        });
        self.add_scoped::<
                dyn crate::Map<crate::models::Car, crate::models::CarDto>,
            >(|_| {
            ::std::sync::Arc::new(
                <crate::mappers::CarMapper as ::core::default::Default>::default(),
            )
        });
        self.add_scoped::<
                dyn crate::Map<crate::models::Car, crate::models::CarSummary>,
            >(|_| {
            ::std::sync::Arc::new(crate::mappers__car_maps__to_summary__Adapter)
        });
        self.add_scoped::<
                dyn crate::Map<crate::models::Car, crate::models::CarView>,
            >(|_| {
            ::std::sync::Arc::new(crate::mappers__car_views__to_view__Adapter)
        });
        self
    }
}
