use crate::models::{Car, CarDto};

#[mapper]
#[derive(Default)]
pub struct CarMapper;

impl CarMapper {
    pub fn to_dto(&self, car: Car) -> CarDto;
}

#[mapper]
pub mod car_maps {
    use crate::models::{Car, CarSummary};

    pub fn to_summary(car: Car) -> CarSummary;
}

#[mapper]
pub mod car_views {
    use crate::models::{Car, CarView};

    pub fn to_view(self: Car) -> CarView;
}
