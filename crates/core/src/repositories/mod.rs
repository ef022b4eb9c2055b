pub mod delivery_repository;
pub mod device_repository;
pub mod product_repository;
pub mod route_repository;
pub mod token_repository;
pub mod user_repository;

pub use delivery_repository::DeliveryRepository;
pub use device_repository::DeviceRepository;
pub use product_repository::ProductRepository;
pub use route_repository::RouteRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;
