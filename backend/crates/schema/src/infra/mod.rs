//! Infrastructure Layer
//!
//! Constraint engine implementations.

pub mod native;
