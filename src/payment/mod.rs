//! Payment capture and payment records.
//!
//! Payment status lives on the order aggregate; this module holds the
//! immutable record written on each successful capture and the processor
//! port used for on-system card payments.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
