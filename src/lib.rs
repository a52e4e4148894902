pub mod api;
pub mod core;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod stores;
pub mod utils;
pub mod validation;
