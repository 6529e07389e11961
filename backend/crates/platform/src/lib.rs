//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the low-level format checks behind field constraints:
//! - Unicode normalization, case folding and character classes
//! - Domain name and email address syntax
//! - IP address literals and CIDR prefixes
//! - Base64, hex, data URI and payment card number checks

pub mod address;
pub mod encoding;
pub mod network;
pub mod text;
