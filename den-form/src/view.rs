//! Read-only snapshots of the engine for rendering.

use crate::{AnswerValue, Question, QuestionKind, Section};

/// A full-width message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// The form could not be loaded. Blocking: only navigation away remains.
    LoadFailed(String),
    /// The last submission failed. The attempt can be submitted again.
    SubmissionFailed(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Self::LoadFailed(msg) | Self::SubmissionFailed(msg) => msg,
        }
    }
}

/// Position within the form, for "Section 2 of 4" headers and progress bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 1-based section number.
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f32 / self.total as f32 * 100.0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }
}

/// One question as the host should render it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView<'a> {
    /// 1-based position within the section.
    pub number: usize,
    pub question: &'a Question,
    pub answer: Option<&'a AnswerValue>,
    pub error: Option<&'a str>,
}

impl QuestionView<'_> {
    /// Live word count for text questions with a minimum, as `(count, min)`.
    pub fn word_count(&self) -> Option<(usize, usize)> {
        let QuestionKind::Text(text) = self.question.kind() else {
            return None;
        };
        let min = text.min_words?;
        let count = self
            .answer
            .and_then(AnswerValue::as_text)
            .map_or(0, crate::word_count);
        Some((count, min))
    }
}

/// The section currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView<'a> {
    pub section: &'a Section,
    pub progress: Progress,
    pub questions: Vec<QuestionView<'a>>,
    /// True while a submission is in flight; inputs should be disabled.
    pub read_only: bool,
}

impl SectionView<'_> {
    pub fn title(&self) -> &str {
        &self.section.title
    }

    /// Whether the forward action is "Complete" rather than "Next".
    pub fn is_last(&self) -> bool {
        self.progress.is_last()
    }

    /// Whether "Previous" is available.
    pub fn has_previous(&self) -> bool {
        self.progress.current > 1
    }
}
