//! Diagnostic type classification tag.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Optional classification of the problem domain, selected before start.
///
/// The engine also accepts domains this client does not know about, so
/// unknown tags round-trip through `Other` rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticType {
    Brake,
    Start,
    Sound,
    Other(String),
}

impl DiagnosticType {
    /// Parses an engine-side domain tag.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the tag is empty or whitespace
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("diagnostic_type"));
        }
        Ok(match trimmed {
            "brake" => DiagnosticType::Brake,
            "start" => DiagnosticType::Start,
            "sound" => DiagnosticType::Sound,
            other => DiagnosticType::Other(other.to_string()),
        })
    }

    /// Returns the wire tag.
    pub fn as_wire(&self) -> &str {
        match self {
            DiagnosticType::Brake => "brake",
            DiagnosticType::Start => "start",
            DiagnosticType::Sound => "sound",
            DiagnosticType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for DiagnosticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for DiagnosticType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for DiagnosticType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;

        impl<'de> Visitor<'de> for TagVisitor {
            type Value = DiagnosticType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a diagnostic type tag")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                DiagnosticType::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}
