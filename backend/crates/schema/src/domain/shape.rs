//! Declared Shape
//!
//! Ordered set of named fields. Declaration order is the order in which the
//! engine visits fields, so it decides which violation comes first.

use std::collections::HashSet;

use crate::domain::field::Field;
use crate::error::{SchemaError, SchemaResult};

/// Immutable field declarations
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<(String, Field)>,
}

impl Shape {
    pub fn builder() -> ShapeBuilder {
        ShapeBuilder::default()
    }

    /// Build from `(name, field)` pairs
    pub fn new<I, K>(fields: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        fields
            .into_iter()
            .fold(Self::builder(), |builder, (name, field)| {
                builder.field(name, field)
            })
            .build()
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, field)| field)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects fields, checking names on `build`
#[derive(Debug, Default)]
pub struct ShapeBuilder {
    fields: Vec<(String, Field)>,
}

impl ShapeBuilder {
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    pub fn build(self) -> SchemaResult<Shape> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for (name, _) in &self.fields {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
        }
        Ok(Shape {
            fields: self.fields,
        })
    }
}
