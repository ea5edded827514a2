//! Artifact domain model.
//!
//! # Responsibility
//! - Define the persisted artifact record and its editable field payload.
//!
//! # Invariants
//! - `id` is assigned by SQLite on insert and never changes afterwards.
//! - Text fields are stored exactly as given: no trimming, no validation.
//!   `None` and `Some("")` are distinct values and both round-trip.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier (`artifacts.id`, an SQLite rowid alias).
pub type ArtifactId = i64;

/// The four free-text fields of an artifact.
///
/// Used as the payload for add, update and import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFields {
    pub name: Option<String>,
    pub collection: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

impl ArtifactFields {
    /// Builds a payload with all four fields present.
    pub fn new(
        name: impl Into<String>,
        collection: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            collection: Some(collection.into()),
            category: Some(category.into()),
            location: Some(location.into()),
        }
    }

    /// Returns field values in column order: name, collection, category, location.
    pub fn values(&self) -> [Option<&str>; 4] {
        [
            self.name.as_deref(),
            self.collection.as_deref(),
            self.category.as_deref(),
            self.location.as_deref(),
        ]
    }
}

/// Persisted artifact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    #[serde(flatten)]
    pub fields: ArtifactFields,
}

impl Artifact {
    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    pub fn collection(&self) -> Option<&str> {
        self.fields.collection.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.fields.category.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.fields.location.as_deref()
    }
}
