pub mod config_service;
pub mod favorite_store;
pub mod traits;
