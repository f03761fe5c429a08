use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, FileHandle, QuestionId};

/// Error type for typed answer access.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for question: {0}")]
    MissingAnswer(QuestionId),

    #[error("Type mismatch for question '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The working record of a student's answers, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap {
    values: HashMap<QuestionId, AnswerValue>,
}

impl AnswerMap {
    /// Create a new empty answer map.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<QuestionId>, value: impl Into<AnswerValue>) {
        self.values.insert(id.into(), value.into());
    }

    /// Get the answer for a question.
    pub fn get(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    /// Check if an entry exists for a question (it may still be empty).
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.values.contains_key(id)
    }

    /// Remove the entry for a question.
    pub fn remove(&mut self, id: &QuestionId) -> Option<AnswerValue> {
        self.values.remove(id)
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if the question has a non-empty answer.
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.get(id).is_some_and(|value| !value.is_empty())
    }

    /// Merge another answer map into this one.
    pub fn extend(&mut self, other: AnswerMap) {
        self.values.extend(other.values);
    }

    // === Convenience accessors ===

    fn typed<'a, T>(
        &'a self,
        id: &QuestionId,
        expected: &'static str,
        extract: impl FnOnce(&'a AnswerValue) -> Option<T>,
    ) -> Result<T, AnswerError> {
        let value = self
            .get(id)
            .ok_or_else(|| AnswerError::MissingAnswer(id.clone()))?;
        extract(value).ok_or_else(|| AnswerError::TypeMismatch {
            id: id.clone(),
            expected,
            actual: value.type_name(),
        })
    }

    /// Get a text answer.
    pub fn get_text(&self, id: &QuestionId) -> Result<&str, AnswerError> {
        self.typed(id, "Text", AnswerValue::as_text)
    }

    /// Get a single-choice answer.
    pub fn get_choice(&self, id: &QuestionId) -> Result<&str, AnswerError> {
        self.typed(id, "Choice", AnswerValue::as_choice)
    }

    /// Get a multi-choice answer.
    pub fn get_choices(&self, id: &QuestionId) -> Result<&[String], AnswerError> {
        self.typed(id, "Choices", AnswerValue::as_choices)
    }

    /// Get a true/false answer.
    pub fn get_bool(&self, id: &QuestionId) -> Result<bool, AnswerError> {
        self.typed(id, "Bool", AnswerValue::as_bool)
    }

    /// Get a file answer.
    pub fn get_file(&self, id: &QuestionId) -> Result<&FileHandle, AnswerError> {
        self.typed(id, "File", AnswerValue::as_file)
    }

    /// Get a signature answer.
    pub fn get_signature(&self, id: &QuestionId) -> Result<&str, AnswerError> {
        self.typed(id, "Signature", AnswerValue::as_signature)
    }
}

impl IntoIterator for AnswerMap {
    type Item = (QuestionId, AnswerValue);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnswerMap {
    type Item = (&'a QuestionId, &'a AnswerValue);
    type IntoIter = std::collections::hash_map::Iter<'a, QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut answers = AnswerMap::new();
        answers.insert("q1", AnswerValue::Text("ada@designden.space".into()));
        answers.insert("q5", false);

        assert_eq!(
            answers.get_text(&QuestionId::new("q1")).unwrap(),
            "ada@designden.space"
        );
        assert!(!answers.get_bool(&QuestionId::new("q5")).unwrap());
        assert!(answers.is_answered(&QuestionId::new("q5")));
    }

    #[test]
    fn type_mismatch_error() {
        let mut answers = AnswerMap::new();
        answers.insert("q5", true);

        let result = answers.get_text(&QuestionId::new("q5"));
        assert!(matches!(
            result,
            Err(AnswerError::TypeMismatch {
                expected: "Text",
                actual: "Bool",
                ..
            })
        ));
    }

    #[test]
    fn missing_answer_error() {
        let answers = AnswerMap::new();
        let result = answers.get_signature(&QuestionId::new("q14"));
        assert!(matches!(result, Err(AnswerError::MissingAnswer(_))));
    }

    #[test]
    fn empty_entry_is_not_answered() {
        let mut answers = AnswerMap::new();
        answers.insert("q14", AnswerValue::Unanswered);
        assert!(answers.contains(&QuestionId::new("q14")));
        assert!(!answers.is_answered(&QuestionId::new("q14")));
    }
}
