pub mod auth_dto;
pub mod delivery_dto;
pub mod device_dto;
pub mod route_dto;
