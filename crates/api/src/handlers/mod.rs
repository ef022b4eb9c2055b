pub mod assign_route;
pub mod available_routes;
pub mod cancel_delivery;
pub mod complete_route;
pub mod confirm_delivery;
pub mod create_delivery;
pub mod current_user;
pub mod devices;
pub mod get_delivery;
pub mod health;
pub mod login;
pub mod my_deliveries;
pub mod password_reset;
pub mod routes;
pub mod signup;
pub mod user_routes;
pub mod verify_email;
pub mod warehouse_packages;
