// @generated by mapwire. Do not edit.

include!("AddMappers.mapwire.rs");
include!("Map.mapwire.rs");
include!("Mapper.mapwire.rs");
include!("mappers.CarMapper.to_dto.instance.mapwire.rs");
include!("mappers.car_maps.to_summary.static.mapwire.rs");
include!("mappers.car_views.to_view.extension.mapwire.rs");
