pub mod auth_service;
pub mod delivery_service;
pub mod device_service;
pub mod route_service;
pub mod token_service;

pub use delivery_service::DeliveryService;
pub use device_service::DeviceService;
pub use route_service::RouteService;
pub use token_service::TokenService;
