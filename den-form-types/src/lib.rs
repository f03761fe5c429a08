//! Core types for the den-form crate.
//!
//! This crate provides the foundational types for certification forms:
//! - `FormTemplate` and `Section` - The static form structure
//! - `Question` and `QuestionKind` - Individual questions and their types
//! - `AnswerMap` and `AnswerValue` - Collected answers keyed by question id
//! - `validate_section` and `ValidationErrors` - Per-type validation rules
//! - `TemplateSource` and `SubmissionSink` traits - The engine's collaborators

mod ids;
pub use ids::{FormId, QuestionId, SectionId, StudentId};

mod answer_value;
pub use answer_value::{AnswerValue, FileHandle};

mod answers;
pub use answers::{AnswerError, AnswerMap};

mod question;
pub use question::{
    FileUploadQuestion, MultipleChoiceQuestion, Question, QuestionKind, SignatureQuestion,
    TextQuestion, TrueFalseQuestion,
};

mod template;
pub use template::{FormTemplate, Section, TemplateError};

mod validation;
pub use validation::{
    SectionValidation, ValidationErrors, validate_answer, validate_section, word_count,
};

pub mod grading;
pub use grading::{Grade, GradedQuestion, grade};

mod session;
pub use session::{Role, Session};

mod error;
pub use error::{LoadError, SubmissionError};

mod traits;
pub use traits::{Receipt, Submission, SubmissionSink, TemplateSource};
