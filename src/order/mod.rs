//! Order lifecycle management.
//!
//! Customers build and confirm orders, cashiers settle counter payments and
//! hand orders over, and the kitchen moves confirmed orders through
//! preparation. The module is layered as:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Role services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
