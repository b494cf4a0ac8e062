//! Application layer containing the pricing orchestration.
//!
//! `FareEngine` is the single entry point for pricing a trip. Trip
//! completion and invoicing build on it rather than carrying their own copy
//! of the arithmetic.

pub mod billing;
pub mod engine;
pub mod invoice;
