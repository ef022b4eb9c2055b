pub mod credential_token;
pub mod delivery;
pub mod device;
pub mod product;
pub mod route;
pub mod user;
