//! Diagnostic result value objects.
//!
//! The probability table preserves the order in which the engine listed the
//! entries. The engine's own ranking is meaningful, so re-sorting here would
//! fabricate an ordering the engine never asserted.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Mapping from problem label to probability fraction, insertion-ordered.
///
/// # Invariants
///
/// - labels are non-empty and unique
/// - every fraction is finite and in `[0, 1]`
/// - iteration yields entries in the order they were received
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    entries: Vec<(String, f64)>,
}

impl ProbabilityTable {
    /// Builds a table from ordered entries.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if a label is empty
    /// - `InvalidFormat` if a label repeats
    /// - `OutOfRange` if a fraction is outside `[0, 1]` or not finite
    pub fn from_entries(entries: Vec<(String, f64)>) -> Result<Self, ValidationError> {
        for (index, (label, fraction)) in entries.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(ValidationError::empty_field("probability label"));
            }
            if entries[..index].iter().any(|(seen, _)| seen == label) {
                return Err(ValidationError::invalid_format(
                    "probabilities",
                    format!("duplicate label \"{}\"", label),
                ));
            }
            if !fraction.is_finite() || !(0.0..=1.0).contains(fraction) {
                return Err(ValidationError::out_of_range(
                    "probability",
                    0.0,
                    1.0,
                    *fraction,
                ));
            }
        }
        Ok(Self { entries })
    }

    /// Iterates entries in received order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(label, p)| (label.as_str(), *p))
    }

    /// Looks up the fraction for a label.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(seen, _)| seen == label)
            .map(|(_, p)| *p)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ProbabilityTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, fraction) in &self.entries {
            map.serialize_entry(label, fraction)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProbabilityTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ProbabilityTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of problem label to probability fraction")
            }

            // MapAccess yields entries in document order, which is exactly
            // the order the table must preserve.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, fraction)) = access.next_entry::<String, f64>()? {
                    entries.push((label, fraction));
                }
                ProbabilityTable::from_entries(entries).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// The structured outcome of a concluded diagnostic session.
///
/// Never mutated after conclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    most_probable_problem: String,

    probabilities: ProbabilityTable,

    /// Free-form explanatory text from the engine.
    #[serde(rename = "diagnostic_message")]
    narrative: String,
}

impl DiagnosticResult {
    /// Creates a result from its parts.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the problem label or narrative is empty
    pub fn new(
        most_probable_problem: impl Into<String>,
        probabilities: ProbabilityTable,
        narrative: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let most_probable_problem = most_probable_problem.into();
        if most_probable_problem.trim().is_empty() {
            return Err(ValidationError::empty_field("most_probable_problem"));
        }
        let narrative = narrative.into();
        if narrative.trim().is_empty() {
            return Err(ValidationError::empty_field("diagnostic_message"));
        }
        Ok(Self {
            most_probable_problem,
            probabilities,
            narrative,
        })
    }

    /// Returns the most probable problem label.
    pub fn most_probable_problem(&self) -> &str {
        &self.most_probable_problem
    }

    /// Returns the probability table.
    pub fn probabilities(&self) -> &ProbabilityTable {
        &self.probabilities
    }

    /// Returns the explanatory narrative.
    pub fn narrative(&self) -> &str {
        &self.narrative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brake_table() -> ProbabilityTable {
        ProbabilityTable::from_entries(vec![
            ("Worn brake pads".to_string(), 0.62),
            ("Air in brake lines".to_string(), 0.38),
        ])
        .unwrap()
    }

    #[test]
    fn table_preserves_received_order() {
        let table = brake_table();
        let labels: Vec<&str> = table.entries().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Worn brake pads", "Air in brake lines"]);
    }

    #[test]
    fn table_rejects_duplicate_labels() {
        let result = ProbabilityTable::from_entries(vec![
            ("Dead battery".to_string(), 0.5),
            ("Dead battery".to_string(), 0.5),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn table_rejects_out_of_range_fractions() {
        assert!(ProbabilityTable::from_entries(vec![("x".to_string(), 1.5)]).is_err());
        assert!(ProbabilityTable::from_entries(vec![("x".to_string(), -0.1)]).is_err());
        assert!(ProbabilityTable::from_entries(vec![("x".to_string(), f64::NAN)]).is_err());
    }

    #[test]
    fn table_rejects_empty_label() {
        assert!(ProbabilityTable::from_entries(vec![(" ".to_string(), 0.5)]).is_err());
    }

    #[test]
    fn table_deserializes_in_document_order() {
        let json = r#"{"B": 0.3, "A": 0.7}"#;
        let table: ProbabilityTable = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = table.entries().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["B", "A"]);
    }

    #[test]
    fn table_deserialization_rejects_invalid_fraction() {
        let json = r#"{"A": 2.0}"#;
        assert!(serde_json::from_str::<ProbabilityTable>(json).is_err());
    }

    #[test]
    fn table_serializes_in_received_order() {
        let json = serde_json::to_string(&brake_table()).unwrap();
        assert!(json.find("Worn brake pads").unwrap() < json.find("Air in brake lines").unwrap());
    }

    #[test]
    fn result_round_trips_wire_field_names() {
        let result =
            DiagnosticResult::new("Worn brake pads", brake_table(), "Inspect pads.").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["most_probable_problem"], "Worn brake pads");
        assert_eq!(json["diagnostic_message"], "Inspect pads.");

        let back: DiagnosticResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn result_rejects_empty_problem_label() {
        assert!(DiagnosticResult::new("", brake_table(), "n").is_err());
    }

    #[test]
    fn result_rejects_empty_narrative() {
        assert!(DiagnosticResult::new("Worn brake pads", brake_table(), "  ").is_err());
    }
}
