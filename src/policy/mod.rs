//! Who may see which gifts, and what a status change writes.
//!
//! Everything here is pure: callers load records from a [`GiftStore`] and
//! hand them in.
//!
//! [`GiftStore`]: crate::stores::gift_store::GiftStore

pub mod status;
pub mod visibility;
