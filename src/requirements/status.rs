//! Diagnostic records for unmet requirements.
//!
//! Each unmet descriptor produces an [`UnmetRequirement`] carrying the
//! structured facts plus a rendered, human-readable message. [`Diagnostics`]
//! keeps them in registration order, keyed by requirement id.

use crate::requirements::descriptor::RequirementDescriptor;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Why a requirement is unmet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmetKind {
    /// Present with a known version that is below the minimum.
    BelowMinimum,
    /// Not present, or present without a known version.
    Missing,
}

/// The result of checking a single requirement that did not pass.
///
/// Serializes with its rendered `message` alongside the structured fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetRequirement {
    pub id: String,
    pub kind: UnmetKind,
    pub name: String,
    pub minimum: String,
    pub current: Option<String>,
    pub exists: bool,
}

impl UnmetRequirement {
    /// Build the record for a descriptor, classifying the failure.
    pub fn from_descriptor(descriptor: &RequirementDescriptor) -> Self {
        let kind = if descriptor.exists() && descriptor.current().is_some() {
            UnmetKind::BelowMinimum
        } else {
            UnmetKind::Missing
        };

        Self {
            id: descriptor.id().to_string(),
            kind,
            name: descriptor.name().to_string(),
            minimum: descriptor.minimum().to_string(),
            current: descriptor.current().map(String::from),
            exists: descriptor.exists(),
        }
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> String {
        match self.kind {
            UnmetKind::BelowMinimum => format!(
                "{}: minimum required {} (you have {})",
                self.name,
                self.minimum,
                self.current.as_deref().unwrap_or_default()
            ),
            UnmetKind::Missing => {
                format!("Missing {}: minimum required {}", self.name, self.minimum)
            }
        }
    }
}

impl Serialize for UnmetRequirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("UnmetRequirement", 7)?;
        record.serialize_field("id", &self.id)?;
        record.serialize_field("kind", &self.kind)?;
        record.serialize_field("name", &self.name)?;
        record.serialize_field("minimum", &self.minimum)?;
        record.serialize_field("current", &self.current)?;
        record.serialize_field("exists", &self.exists)?;
        record.serialize_field("message", &self.message())?;
        record.end()
    }
}

/// Ordered diagnostics for every unmet requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<UnmetRequirement>,
}

impl Diagnostics {
    pub fn new(entries: Vec<UnmetRequirement>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the entry for a requirement id.
    pub fn get(&self, id: &str) -> Option<&UnmetRequirement> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Structured records in registration order.
    pub fn records(&self) -> &[UnmetRequirement] {
        &self.entries
    }

    /// `(id, message)` pairs in registration order.
    pub fn messages(&self) -> Vec<(&str, String)> {
        self.entries
            .iter()
            .map(|e| (e.id.as_str(), e.message()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnmetRequirement> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a UnmetRequirement;
    type IntoIter = std::slice::Iter<'a, UnmetRequirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
