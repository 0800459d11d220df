//! Menu catalog management.
//!
//! Managers add and edit items; customers browse by category. The module
//! follows the same layering as the order lifecycle:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
