//! Error types for menu domain validation.

use thiserror::Error;

/// Errors returned while constructing or editing menu values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MenuDomainError {
    /// The item name is empty after trimming.
    #[error("menu item name must not be empty")]
    EmptyItemName,

    /// The category is empty after trimming.
    #[error("menu category must not be empty")]
    EmptyCategory,

    /// The price is zero.
    #[error("menu item price must be greater than zero")]
    NonPositivePrice,
}
