//! essaylens-core — Essay evaluation engine, data model, and store contracts.
//!
//! The "assessment" produced here is a deterministic heuristic over surface
//! text statistics plus bounded, injectable noise. There is no learned model
//! anywhere in this crate.

pub mod engine;
pub mod error;
pub mod features;
pub mod feedback;
pub mod model;
pub mod query;
pub mod rng;
pub mod scorer;
pub mod statistics;
pub mod traits;
