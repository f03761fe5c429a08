use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, QuestionId};

fn required_by_default() -> bool {
    true
}

/// A single question in a form section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Key of this question's answer in the `AnswerMap`.
    id: QuestionId,

    /// The prompt text shown to the student.
    #[serde(rename = "question")]
    prompt: String,

    /// Whether an empty answer blocks the section.
    #[serde(default = "required_by_default")]
    required: bool,

    /// The kind of question (determines answer shape and validation rule).
    #[serde(flatten)]
    kind: QuestionKind,
}

impl Question {
    /// Create a new required question.
    pub fn new(id: impl Into<QuestionId>, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            required: true,
            kind,
        }
    }

    /// Mark this question as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Get the question id.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Check if an answer is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Set whether an answer is required.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get a mutable reference to the question kind.
    pub fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    /// The value this question's answer starts out with before the student
    /// interacts with it.
    pub fn empty_answer(&self) -> AnswerValue {
        self.kind.empty_answer()
    }
}

/// The kind of question, tagged by `type` in serialized templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one option, or several when `multi_select` is set.
    MultipleChoice(MultipleChoiceQuestion),

    /// True or false. `false` is a real answer, not an empty one.
    TrueFalse(TrueFalseQuestion),

    /// Free text, optionally with a minimum word count.
    Text(TextQuestion),

    /// A single uploaded file.
    FileUpload(FileUploadQuestion),

    /// A hand-drawn signature.
    Signature(SignatureQuestion),
}

impl QuestionKind {
    /// The serialized `type` tag of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::MultipleChoice(_) => "multiple_choice",
            Self::TrueFalse(_) => "true_false",
            Self::Text(_) => "text",
            Self::FileUpload(_) => "file_upload",
            Self::Signature(_) => "signature",
        }
    }

    /// The type-appropriate empty answer.
    pub fn empty_answer(&self) -> AnswerValue {
        match self {
            Self::MultipleChoice(mc) if mc.multi_select => AnswerValue::Choices(Vec::new()),
            Self::MultipleChoice(_) => AnswerValue::Choice(String::new()),
            Self::Text(_) => AnswerValue::Text(String::new()),
            Self::TrueFalse(_) | Self::FileUpload(_) | Self::Signature(_) => {
                AnswerValue::Unanswered
            }
        }
    }

    /// Check whether a value has the shape this kind of question expects.
    ///
    /// `Unanswered` fits every kind.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        match (self, value) {
            (_, AnswerValue::Unanswered) => true,
            (Self::MultipleChoice(mc), AnswerValue::Choices(_)) => mc.multi_select,
            (Self::MultipleChoice(mc), AnswerValue::Choice(_)) => !mc.multi_select,
            (Self::TrueFalse(_), AnswerValue::Bool(_)) => true,
            (Self::Text(_), AnswerValue::Text(_)) => true,
            (Self::FileUpload(_), AnswerValue::File(_)) => true,
            (Self::Signature(_), AnswerValue::Signature(_)) => true,
            _ => false,
        }
    }
}

/// Configuration for a multiple-choice question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceQuestion {
    /// The options, in display order.
    pub options: Vec<String>,

    /// Allow selecting more than one option.
    #[serde(default)]
    pub multi_select: bool,

    /// The correct option for single-select questions. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,

    /// The correct options for multi-select questions. Informational only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correct_answers: Vec<String>,
}

impl MultipleChoiceQuestion {
    /// Create a single-select question with the given options.
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Create a multi-select question with the given options.
    pub fn multi<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            multi_select: true,
            ..Self::new(options)
        }
    }

    /// Set the correct option.
    pub fn with_correct_answer(mut self, answer: impl Into<String>) -> Self {
        self.correct_answer = Some(answer.into());
        self
    }

    /// Set the correct options.
    pub fn with_correct_answers<S: Into<String>>(
        mut self,
        answers: impl IntoIterator<Item = S>,
    ) -> Self {
        self.correct_answers = answers.into_iter().map(Into::into).collect();
        self
    }

    /// Check if `option` is one of the listed options.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Configuration for a true/false question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalseQuestion {
    /// The correct answer. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<bool>,
}

impl TrueFalseQuestion {
    /// Create a new true/false question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a correct answer.
    pub fn with_correct_answer(correct: bool) -> Self {
        Self {
            correct_answer: Some(correct),
        }
    }
}

/// Configuration for a free-text question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextQuestion {
    /// Minimum number of whitespace-separated words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<usize>,
}

impl TextQuestion {
    /// Create a new text question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a minimum word count.
    pub fn with_min_words(min_words: usize) -> Self {
        Self {
            min_words: Some(min_words),
        }
    }
}

/// Configuration for a file upload question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadQuestion {
    /// Accepted MIME types. Empty accepts anything.
    #[serde(default)]
    pub allowed_file_types: BTreeSet<String>,

    /// Maximum file size in megabytes.
    pub max_file_size: u64,
}

impl FileUploadQuestion {
    /// Create a new file upload question.
    pub fn new<S: Into<String>>(
        allowed_file_types: impl IntoIterator<Item = S>,
        max_file_size: u64,
    ) -> Self {
        Self {
            allowed_file_types: allowed_file_types.into_iter().map(Into::into).collect(),
            max_file_size,
        }
    }

    /// The size limit in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_file_size.saturating_mul(1024 * 1024)
    }

    /// Check if a MIME type is accepted.
    pub fn allows(&self, mime_type: &str) -> bool {
        self.allowed_file_types.is_empty() || self.allowed_file_types.contains(mime_type)
    }
}

/// Configuration for a signature question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureQuestion {}

impl SignatureQuestion {
    /// Create a new signature question.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_original_shape() {
        let json = r#"{
            "id": "q6",
            "type": "multiple_choice",
            "question": "I should only use tools if....",
            "options": ["a", "b"],
            "multiSelect": true,
            "correctAnswers": ["a"],
            "required": true
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id().as_str(), "q6");
        assert!(question.is_required());
        match question.kind() {
            QuestionKind::MultipleChoice(mc) => {
                assert!(mc.multi_select);
                assert_eq!(mc.correct_answers, vec!["a".to_string()]);
            }
            other => panic!("Expected multiple choice, got {}", other.type_name()),
        }
    }

    #[test]
    fn required_defaults_to_true() {
        let json = r#"{"id": "q1", "type": "text", "question": "Email Address"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.is_required());
        assert_eq!(question.kind(), &QuestionKind::Text(TextQuestion::new()));
    }

    #[test]
    fn empty_answers_per_kind() {
        let single = QuestionKind::MultipleChoice(MultipleChoiceQuestion::new(["a"]));
        let multi = QuestionKind::MultipleChoice(MultipleChoiceQuestion::multi(["a"]));
        assert_eq!(single.empty_answer(), AnswerValue::Choice(String::new()));
        assert_eq!(multi.empty_answer(), AnswerValue::Choices(Vec::new()));
        assert_eq!(
            QuestionKind::TrueFalse(TrueFalseQuestion::new()).empty_answer(),
            AnswerValue::Unanswered
        );
        assert_eq!(
            QuestionKind::Text(TextQuestion::new()).empty_answer(),
            AnswerValue::Text(String::new())
        );
    }

    #[test]
    fn shape_check() {
        let tf = QuestionKind::TrueFalse(TrueFalseQuestion::new());
        assert!(tf.accepts(&AnswerValue::Bool(false)));
        assert!(tf.accepts(&AnswerValue::Unanswered));
        assert!(!tf.accepts(&AnswerValue::Text("false".into())));

        let single = QuestionKind::MultipleChoice(MultipleChoiceQuestion::new(["a"]));
        assert!(!single.accepts(&AnswerValue::Choices(vec!["a".into()])));
    }

    #[test]
    fn file_upload_limits() {
        let upload = FileUploadQuestion::new(["application/pdf"], 5);
        assert_eq!(upload.max_bytes(), 5 * 1024 * 1024);
        assert!(upload.allows("application/pdf"));
        assert!(!upload.allows("image/png"));
        assert!(FileUploadQuestion::new(Vec::<String>::new(), 1).allows("image/png"));
    }
}
