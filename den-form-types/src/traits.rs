use serde::{Deserialize, Serialize};

use crate::{AnswerMap, FormId, FormTemplate, LoadError, StudentId, SubmissionError};

/// Acknowledgement returned by a submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub form_id: FormId,
    pub student_id: StudentId,
    /// Sink-assigned reference for this submission.
    pub reference: String,
}

/// A completed attempt, ready to be handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub form_id: FormId,
    pub student_id: StudentId,
    pub answers: AnswerMap,
}

/// Read-only access to form templates and prior attempts.
pub trait TemplateSource {
    /// Fetch a form template.
    ///
    /// Returns `LoadError::NotFound` when no such form exists.
    fn get_template(&self, form_id: &FormId) -> Result<FormTemplate, LoadError>;

    /// Fetch the answers of a previous, unfinished attempt to resume from.
    ///
    /// The default implementation has no attempt history.
    fn get_attempt(
        &self,
        _student_id: &StudentId,
        _form_id: &FormId,
    ) -> Result<Option<AnswerMap>, LoadError> {
        Ok(None)
    }
}

/// Destination for completed attempts.
///
/// Implementations decide where answers go (a REST service, a queue, a
/// log). Failures are reported, never swallowed; the engine keeps the
/// attempt open for a retry.
pub trait SubmissionSink {
    fn submit(
        &self,
        form_id: &FormId,
        student_id: &StudentId,
        answers: &AnswerMap,
    ) -> Result<Receipt, SubmissionError>;
}

impl<T: TemplateSource + ?Sized> TemplateSource for &T {
    fn get_template(&self, form_id: &FormId) -> Result<FormTemplate, LoadError> {
        (**self).get_template(form_id)
    }

    fn get_attempt(
        &self,
        student_id: &StudentId,
        form_id: &FormId,
    ) -> Result<Option<AnswerMap>, LoadError> {
        (**self).get_attempt(student_id, form_id)
    }
}

impl<T: SubmissionSink + ?Sized> SubmissionSink for &T {
    fn submit(
        &self,
        form_id: &FormId,
        student_id: &StudentId,
        answers: &AnswerMap,
    ) -> Result<Receipt, SubmissionError> {
        (**self).submit(form_id, student_id, answers)
    }
}
