//! Adapter implementations for order ports.

pub mod memory;
