use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifies a form template, e.g. `"101"`.
    FormId
}

string_id! {
    /// Identifies a section within a template, e.g. `"s1"`.
    SectionId
}

string_id! {
    /// Identifies a question within a template, e.g. `"q7"`.
    ///
    /// Unique across the whole template, not just its section. Used as the
    /// key in `AnswerMap` and `ValidationErrors`.
    QuestionId
}

string_id! {
    /// Identifies the student taking an attempt.
    StudentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_conversion() {
        let id = QuestionId::from("q7");
        assert_eq!(id.to_string(), "q7");
        assert_eq!(id.as_str(), "q7");
        assert_eq!(QuestionId::new(String::from("q7")), id);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = FormId::new("101");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"101\"");
        let back: FormId = serde_json::from_str("\"101\"").unwrap();
        assert_eq!(back, id);
    }
}
