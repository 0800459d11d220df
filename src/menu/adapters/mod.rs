//! Adapter implementations for menu ports.

pub mod memory;
