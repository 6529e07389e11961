//! Shared Kernel - Domain error taxonomy
//!
//! This crate contains the "smallest core" of error vocabulary:
//! - The closed set of error kinds and their fixed transport codes
//! - The [`DomainError`](error::domain_error::DomainError) value and result alias
//! - Conversions from common error types and transport adapters
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across every transport.

pub mod error {
    pub mod conversions;
    pub mod domain_error;
    pub mod kind;
    pub mod trace;

    pub use domain_error::{DomainError, DomainResult, OptionExt, ResultExt, is_domain_error};
    pub use kind::ErrorKind;
    pub use trace::{Frame, Trace};
}
