//! Domain model for the menu catalog.
//!
//! Menu items are owned by the manager role. Orders copy the price of an
//! item when it is added, so catalog edits never rewrite existing orders.

mod error;
mod ids;
mod item;

pub use error::MenuDomainError;
pub use ids::MenuItemId;
pub use item::{Category, ItemName, MenuItem, MenuItemChanges};
