pub mod api;
pub mod comment;
pub mod gift;
pub mod gift_list;
pub mod user;
