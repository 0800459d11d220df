//! Unit tests for payment records and the simulated processor.
