// @generated by mapwire. Do not edit.

impl crate::Map<crate::models::Car, crate::models::CarDto> for crate::mappers::CarMapper {
    fn map(&self, input: crate::models::Car) -> crate::models::CarDto {
        self.to_dto(input)
    }
}
