pub mod controller;
pub mod favorite;
pub mod load_state;
pub mod mortgage;
pub mod notify;
pub mod query;
pub mod services;
