//! Domain Layer
//!
//! Field descriptors, the declared shape, violations and the constraint
//! engine interface.

pub mod engine;
pub mod field;
pub mod shape;
pub mod violation;
