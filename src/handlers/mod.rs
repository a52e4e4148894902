pub mod auth;
pub mod fallback;
pub mod gifts;
pub mod health;
pub mod lists;
pub mod users;
