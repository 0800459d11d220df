//! Manager reporting.
//!
//! Reports are derived on demand from stored orders and are never
//! persisted.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
