//! The certification form state machine.
//!
//! A `FormEngine` owns one student's attempt at one form:
//!
//! ```text
//! Loading ──load──▶ InProgress(0) ──next──▶ InProgress(1) ─ … ─▶ InProgress(last)
//!    │                    ◀──previous──                               │
//!    ▼                                                  complete / begin_submission
//! LoadFailed                                                          ▼
//!                                        InProgress(last) ◀─fail── Submitting ──ok──▶ Completed
//! ```
//!
//! Forward moves are guarded by validation of the section being left.
//! Operations that are not valid in the current state are ignored, so a
//! double-clicked "Complete" submits once.

use crate::view::{Banner, Progress, QuestionView, SectionView};
use crate::{
    AnswerMap, AnswerValue, FormId, FormTemplate, Grade, LoadError, QuestionId, Receipt,
    SectionValidation, Session, SignaturePad, StudentId, Submission, SubmissionError,
    SubmissionSink, TemplateSource, ValidationErrors,
};

/// Where an attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Waiting for the template (and any prior attempt) to arrive.
    Loading,
    /// Showing the section at this index.
    InProgress { section: usize },
    /// The last section passed validation and answers are with the sink.
    Submitting { section: usize },
    /// The sink accepted the attempt. Terminal.
    Completed,
    /// The template could not be loaded. Terminal.
    LoadFailed,
}

/// Outcome of `next` and `previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The engine moved to another section.
    Moved { from: usize, to: usize },
    /// The current section failed validation; errors are populated.
    Blocked,
    /// The move is not possible in the current state.
    Ignored,
}

/// Outcome of `complete` and `finish_submission`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The attempt was accepted.
    Completed(Receipt),
    /// The attempt had already been completed; nothing happened.
    AlreadyCompleted,
    /// The last section failed validation; errors are populated.
    Blocked,
    /// Completion is not possible in the current state.
    Ignored,
}

/// One student's attempt at one certification form.
#[derive(Debug, Clone)]
pub struct FormEngine {
    session: Session,
    form_id: FormId,
    template: Option<FormTemplate>,
    answers: AnswerMap,
    errors: ValidationErrors,
    state: FormState,
    banner: Option<Banner>,
    receipt: Option<Receipt>,
}

impl FormEngine {
    /// Create an engine in the `Loading` state.
    pub fn new(session: Session, form_id: impl Into<FormId>) -> Self {
        Self {
            session,
            form_id: form_id.into(),
            template: None,
            answers: AnswerMap::new(),
            errors: ValidationErrors::new(),
            state: FormState::Loading,
            banner: None,
            receipt: None,
        }
    }

    /// Create an engine and load it in one go.
    pub fn open(
        session: Session,
        form_id: impl Into<FormId>,
        source: &impl TemplateSource,
    ) -> Result<Self, LoadError> {
        let mut engine = Self::new(session, form_id);
        engine.load(source)?;
        Ok(engine)
    }

    /// Fetch the template and any prior attempt, then show the first section.
    ///
    /// On failure the engine enters `LoadFailed` and keeps a blocking banner;
    /// later calls keep failing with `LoadError::PreviouslyFailed`. Does
    /// nothing once the form is loaded.
    pub fn load(&mut self, source: &impl TemplateSource) -> Result<(), LoadError> {
        match self.state {
            FormState::Loading => {}
            FormState::LoadFailed => {
                return Err(LoadError::PreviouslyFailed(self.form_id.clone()));
            }
            _ => {
                tracing::debug!(form_id = %self.form_id, state = ?self.state, "load ignored");
                return Ok(());
            }
        }

        match self.fetch(source) {
            Ok((template, answers)) => {
                tracing::info!(
                    form_id = %self.form_id,
                    student_id = %self.session.user_id,
                    sections = template.len(),
                    "form loaded"
                );
                self.template = Some(template);
                self.answers = answers;
                self.state = FormState::InProgress { section: 0 };
                Ok(())
            }
            Err(err) => {
                tracing::warn!(form_id = %self.form_id, "failed to load form: {err}");
                self.banner = Some(Banner::LoadFailed(match &err {
                    LoadError::NotFound(_) => {
                        "The certification form you're looking for doesn't exist or you don't have access to it."
                            .to_string()
                    }
                    other => other.to_string(),
                }));
                self.state = FormState::LoadFailed;
                Err(err)
            }
        }
    }

    fn fetch(&self, source: &impl TemplateSource) -> Result<(FormTemplate, AnswerMap), LoadError> {
        let template = source.get_template(&self.form_id)?;
        template.check().map_err(|source| LoadError::Malformed {
            form_id: self.form_id.clone(),
            source,
        })?;

        let mut answers = template.initial_answers();
        if let Some(prior) = source.get_attempt(&self.session.user_id, &self.form_id)? {
            let mut resumed = 0;
            for (id, value) in prior {
                match template.question(&id) {
                    Some(question) if question.kind().accepts(&value) => {
                        answers.insert(id, value);
                        resumed += 1;
                    }
                    _ => tracing::debug!(question_id = %id, "dropping stale prior answer"),
                }
            }
            tracing::debug!(form_id = %self.form_id, resumed, "resumed prior attempt");
        }

        Ok((template, answers))
    }

    // === Accessors ===

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    pub fn student_id(&self) -> &StudentId {
        &self.session.user_id
    }

    /// The loaded template, once `Loading` is over.
    pub fn template(&self) -> Option<&FormTemplate> {
        self.template.as_ref()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answer(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.answers.get(id)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, id: &QuestionId) -> Option<&str> {
        self.errors.get(id)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// The sink's receipt once the attempt is completed.
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// Index of the section on screen.
    pub fn current_section_index(&self) -> Option<usize> {
        match self.state {
            FormState::InProgress { section } | FormState::Submitting { section } => Some(section),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting { .. })
    }

    pub fn is_completed(&self) -> bool {
        self.state == FormState::Completed
    }

    /// Whether the last submission failed and may be retried.
    pub fn can_retry(&self) -> bool {
        matches!(self.banner, Some(Banner::SubmissionFailed(_)))
            && matches!(self.state, FormState::InProgress { .. })
    }

    fn section_count(&self) -> usize {
        self.template.as_ref().map_or(0, FormTemplate::len)
    }

    fn is_last(&self, section: usize) -> bool {
        section + 1 == self.section_count()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.current_section_index().map(|section| Progress {
            current: section + 1,
            total: self.section_count(),
        })
    }

    /// Snapshot of the section on screen, for rendering.
    pub fn view(&self) -> Option<SectionView<'_>> {
        let index = self.current_section_index()?;
        let section = self.template.as_ref()?.section(index)?;
        let progress = self.progress()?;

        let questions = section
            .questions()
            .iter()
            .enumerate()
            .map(|(i, question)| QuestionView {
                number: i + 1,
                question,
                answer: self.answers.get(question.id()),
                error: self.errors.get(question.id()),
            })
            .collect();

        Some(SectionView {
            section,
            progress,
            questions,
            read_only: self.is_submitting(),
        })
    }

    // === Answering ===

    /// Record an answer and clear that question's error, if any.
    ///
    /// Ignored unless a section is on screen and editable. Unknown question
    /// ids are ignored with a warning.
    pub fn set_answer(&mut self, id: impl Into<QuestionId>, value: impl Into<AnswerValue>) {
        let id = id.into();
        let value = value.into();

        if !matches!(self.state, FormState::InProgress { .. }) {
            tracing::debug!(question_id = %id, state = ?self.state, "answer ignored, form is read-only");
            return;
        }
        let Some(question) = self.template.as_ref().and_then(|t| t.question(&id)) else {
            tracing::warn!(question_id = %id, form_id = %self.form_id, "answer for unknown question ignored");
            return;
        };
        if !question.kind().accepts(&value) {
            tracing::warn!(
                question_id = %id,
                expected = question.kind().type_name(),
                actual = value.type_name(),
                "answer shape does not fit question"
            );
        }

        tracing::debug!(question_id = %id, kind = value.type_name(), "answer updated");
        self.errors.remove(&id);
        self.answers.insert(id, value);
    }

    /// Commit the pad's current stroke and store the drawing as the answer.
    pub fn end_signature_stroke(&mut self, id: impl Into<QuestionId>, pad: &mut SignaturePad) {
        pad.end_stroke();
        self.set_answer(id, pad.to_data_uri().map(AnswerValue::Signature));
    }

    /// Wipe the pad and reset the answer to unanswered.
    pub fn clear_signature(&mut self, id: impl Into<QuestionId>, pad: &mut SignaturePad) {
        pad.clear();
        self.set_answer(id, AnswerValue::Unanswered);
    }

    // === Validation and navigation ===

    /// Validate one section and replace the error map with its failures.
    ///
    /// Errors previously shown for other sections are dropped. Returns `None`
    /// for an unknown index or when the form is not editable.
    pub fn validate_section(&mut self, index: usize) -> Option<SectionValidation> {
        if !matches!(self.state, FormState::InProgress { .. }) {
            return None;
        }
        let section = self.template.as_ref()?.section(index)?;
        let result = crate::validate_section(section, &self.answers);
        tracing::debug!(
            form_id = %self.form_id,
            section = index,
            errors = result.errors.len(),
            "section validated"
        );
        self.errors = result.errors.clone();
        Some(result)
    }

    /// Move to the next section if the current one validates.
    pub fn next(&mut self) -> Step {
        let FormState::InProgress { section } = self.state else {
            return Step::Ignored;
        };
        if self.is_last(section) {
            return Step::Ignored;
        }
        if !self.validate_section(section).is_some_and(|v| v.valid) {
            return Step::Blocked;
        }

        let to = section + 1;
        self.state = FormState::InProgress { section: to };
        tracing::info!(form_id = %self.form_id, from = section, to, "advanced to next section");
        Step::Moved { from: section, to }
    }

    /// Move back one section. Never validates and never clears answers.
    pub fn previous(&mut self) -> Step {
        let FormState::InProgress { section } = self.state else {
            return Step::Ignored;
        };
        if section == 0 {
            return Step::Ignored;
        }

        let to = section - 1;
        self.state = FormState::InProgress { section: to };
        tracing::info!(form_id = %self.form_id, from = section, to, "went back a section");
        Step::Moved { from: section, to }
    }

    // === Submission ===

    fn try_begin_submission(&mut self) -> Result<Submission, Completion> {
        let section = match self.state {
            FormState::InProgress { section } if self.is_last(section) => section,
            FormState::Completed => return Err(Completion::AlreadyCompleted),
            _ => return Err(Completion::Ignored),
        };
        if !self.validate_section(section).is_some_and(|v| v.valid) {
            return Err(Completion::Blocked);
        }

        self.banner = None;
        self.state = FormState::Submitting { section };
        tracing::info!(form_id = %self.form_id, student_id = %self.session.user_id, "submitting attempt");
        Ok(Submission {
            form_id: self.form_id.clone(),
            student_id: self.session.user_id.clone(),
            answers: self.answers.clone(),
        })
    }

    /// First half of completion, for hosts whose sink is asynchronous.
    ///
    /// Validates the last section and enters `Submitting`. Returns the
    /// submission to hand to the sink, or `None` if the engine is not on the
    /// last section, is already submitting, or validation failed.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        self.try_begin_submission().ok()
    }

    /// Second half of completion: record the sink's answer.
    ///
    /// On success the engine is `Completed`. On failure it returns to the
    /// last section with answers intact and a retry banner, and the error is
    /// handed back.
    pub fn finish_submission(
        &mut self,
        result: Result<Receipt, SubmissionError>,
    ) -> Result<Completion, SubmissionError> {
        let FormState::Submitting { section } = self.state else {
            tracing::debug!(state = ?self.state, "submission result ignored");
            return Ok(Completion::Ignored);
        };

        match result {
            Ok(receipt) => {
                tracing::info!(
                    form_id = %self.form_id,
                    reference = %receipt.reference,
                    "attempt completed"
                );
                self.state = FormState::Completed;
                self.errors.clear();
                self.receipt = Some(receipt.clone());
                Ok(Completion::Completed(receipt))
            }
            Err(err) => {
                tracing::warn!(form_id = %self.form_id, "submission failed: {err}");
                self.state = FormState::InProgress { section };
                self.banner = Some(Banner::SubmissionFailed(format!(
                    "We couldn't submit your certification: {err}. Your answers are saved, please try again."
                )));
                Err(err)
            }
        }
    }

    /// Validate the last section and submit the attempt to `sink`.
    ///
    /// Idempotent once completed: later calls return `AlreadyCompleted`
    /// without touching the sink.
    pub fn complete(&mut self, sink: &impl SubmissionSink) -> Result<Completion, SubmissionError> {
        let submission = match self.try_begin_submission() {
            Ok(submission) => submission,
            Err(outcome) => return Ok(outcome),
        };
        let result = sink.submit(
            &submission.form_id,
            &submission.student_id,
            &submission.answers,
        );
        self.finish_submission(result)
    }

    /// Grade the current answers against the template's correct answers.
    pub fn grade(&self) -> Option<Grade> {
        self.template
            .as_ref()
            .map(|template| crate::grade(template, &self.answers))
    }
}
