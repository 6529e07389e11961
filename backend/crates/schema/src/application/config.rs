//! Application Configuration
//!
//! Configuration for validators and the native constraint engine.

use crate::domain::engine::UnknownFields;

/// Validator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Keep top-level keys the shape does not declare (otherwise stripped)
    pub allow_unknown_fields: bool,
}

impl ValidatorConfig {
    /// Strip unknown keys (the default)
    pub fn strict() -> Self {
        Self::default()
    }

    /// Keep unknown top-level keys
    pub fn lenient() -> Self {
        Self {
            allow_unknown_fields: true,
        }
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        if self.allow_unknown_fields {
            UnknownFields::Allow
        } else {
            UnknownFields::Strip
        }
    }
}

/// Native engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Stop at the first violation
    pub abort_early: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { abort_early: true }
    }
}

impl EngineConfig {
    /// Collect every violation
    pub fn exhaustive() -> Self {
        Self { abort_early: false }
    }
}
