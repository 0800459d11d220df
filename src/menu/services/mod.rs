//! Application services for the menu catalog.

mod catalog;

pub use catalog::{
    AddMenuItemRequest, MenuCatalogService, MenuServiceError, MenuServiceResult,
    UpdateMenuItemRequest,
};
