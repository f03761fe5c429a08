use serde::{Deserialize, Serialize};

/// A file the student selected for a file upload question.
///
/// Only metadata is kept; the engine never touches file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// A single answer value stored in the `AnswerMap`.
///
/// The shape depends on the question kind; `Unanswered` is the shared
/// empty value (null).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// No answer yet.
    #[default]
    Unanswered,

    /// Free text (from Text questions).
    Text(String),

    /// The selected option of a single-select multiple-choice question.
    Choice(String),

    /// The selected options of a multi-select multiple-choice question.
    Choices(Vec<String>),

    /// A true/false answer.
    Bool(bool),

    /// A selected file (from FileUpload questions).
    File(FileHandle),

    /// Serialized signature drawing (opaque).
    Signature(String),
}

impl AnswerValue {
    /// Check if this value counts as "not answered".
    ///
    /// Empty strings and empty selections are empty; `Bool(false)` is not.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unanswered => true,
            Self::Text(s) | Self::Choice(s) | Self::Signature(s) => s.is_empty(),
            Self::Choices(choices) => choices.is_empty(),
            Self::Bool(_) | Self::File(_) => false,
        }
    }

    /// Try to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a single choice.
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a list of choices.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(choices) => Some(choices),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a file handle.
    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    /// Try to get this value as signature data.
    pub fn as_signature(&self) -> Option<&str> {
        match self {
            Self::Signature(data) => Some(data),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unanswered => "Unanswered",
            Self::Text(_) => "Text",
            Self::Choice(_) => "Choice",
            Self::Choices(_) => "Choices",
            Self::Bool(_) => "Bool",
            Self::File(_) => "File",
            Self::Signature(_) => "Signature",
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<FileHandle> for AnswerValue {
    fn from(file: FileHandle) -> Self {
        Self::File(file)
    }
}

impl<T: Into<AnswerValue>> From<Option<T>> for AnswerValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unanswered, Into::into)
    }
}
