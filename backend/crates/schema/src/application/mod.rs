//! Application Layer - Use Cases
//!
//! Validator configuration and the validate use case.

pub mod config;
pub mod validator;
