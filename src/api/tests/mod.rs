//! Unit tests for the contract layer.
