pub mod gift_store;
pub mod memory_store;
pub mod session_store;
pub mod user_directory;
