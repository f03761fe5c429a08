//! Submission sink for exercising forms without a real service.
//!
//! `RecordingSink` keeps every submission it accepts and can be scripted to
//! fail, which is how retry behavior is tested.
//!
//! # Example
//!
//! ```rust
//! use den_form::{AnswerMap, FormId, RecordingSink, SinkFailure, StudentId, SubmissionSink};
//!
//! let sink = RecordingSink::new().fail_next(SinkFailure::Unavailable("timeout".into()));
//! let form = FormId::new("101");
//! let student = StudentId::new("D100000001");
//!
//! assert!(sink.submit(&form, &student, &AnswerMap::new()).is_err());
//! assert!(sink.submit(&form, &student, &AnswerMap::new()).is_ok());
//! assert_eq!(sink.submissions().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::{AnswerMap, FormId, Receipt, StudentId, Submission, SubmissionError, SubmissionSink};

/// A scripted failure for `RecordingSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkFailure {
    Unavailable(String),
    Rejected(String),
}

/// A submission sink that records what it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    submissions: RefCell<Vec<Submission>>,
    failures: RefCell<VecDeque<SinkFailure>>,
}

impl RecordingSink {
    /// Create a sink that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next `submit` call.
    ///
    /// Failures are consumed in the order they were queued.
    pub fn fail_next(self, failure: SinkFailure) -> Self {
        self.failures.borrow_mut().push_back(failure);
        self
    }

    /// All accepted submissions, oldest first.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.borrow().clone()
    }

    /// The most recently accepted submission.
    pub fn last_submission(&self) -> Option<Submission> {
        self.submissions.borrow().last().cloned()
    }
}

impl SubmissionSink for RecordingSink {
    fn submit(
        &self,
        form_id: &FormId,
        student_id: &StudentId,
        answers: &AnswerMap,
    ) -> Result<Receipt, SubmissionError> {
        if let Some(failure) = self.failures.borrow_mut().pop_front() {
            return Err(match failure {
                SinkFailure::Unavailable(reason) => {
                    SubmissionError::unavailable(anyhow::anyhow!(reason))
                }
                SinkFailure::Rejected(reason) => SubmissionError::Rejected(reason),
            });
        }

        let mut submissions = self.submissions.borrow_mut();
        submissions.push(Submission {
            form_id: form_id.clone(),
            student_id: student_id.clone(),
            answers: answers.clone(),
        });

        Ok(Receipt {
            form_id: form_id.clone(),
            student_id: student_id.clone(),
            reference: format!("{form_id}-{student_id}-{}", submissions.len()),
        })
    }
}
