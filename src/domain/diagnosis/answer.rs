//! Answer value object for the yes/no questionnaire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A yes/no answer to a diagnostic question.
///
/// The wire encoding is the literal lowercase string (`"yes"`/`"no"`); the
/// display label is capitalized, matching what the transcript shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Returns the literal wire string.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }

    /// Returns the display label rendered into the transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Answer {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Answer::Yes),
            "no" => Ok(Answer::No),
            other => Err(ValidationError::invalid_format(
                "answer",
                format!("expected \"yes\" or \"no\", got \"{}\"", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_are_lowercase_literals() {
        assert_eq!(Answer::Yes.as_wire(), "yes");
        assert_eq!(Answer::No.as_wire(), "no");
    }

    #[test]
    fn labels_are_capitalized() {
        assert_eq!(Answer::Yes.label(), "Yes");
        assert_eq!(Answer::No.label(), "No");
    }

    #[test]
    fn serializes_as_wire_string() {
        assert_eq!(serde_json::to_string(&Answer::Yes).unwrap(), "\"yes\"");
        assert_eq!(serde_json::to_string(&Answer::No).unwrap(), "\"no\"");
    }

    #[test]
    fn parses_wire_strings_only() {
        assert_eq!("yes".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!("no".parse::<Answer>().unwrap(), Answer::No);
        assert!("Yes".parse::<Answer>().is_err());
        assert!("maybe".parse::<Answer>().is_err());
    }
}
