//! # den-form
//!
//! Multi-section certification forms for the Design Den workshop.
//!
//! A `FormTemplate` is an ordered list of sections, each holding typed
//! questions (multiple choice, true/false, text, file upload, signature).
//! `FormEngine` walks one student through one template: it tracks answers
//! and per-question validation errors, only lets the student move forward
//! when the current section validates, and hands the finished attempt to a
//! `SubmissionSink`.
//!
//! ## Usage
//!
//! ```rust
//! use den_form::{
//!     Completion, FormEngine, FormTemplate, MemoryCatalog, Question,
//!     QuestionKind, RecordingSink, Section, Session, TrueFalseQuestion,
//! };
//!
//! let template = FormTemplate::new("101", "Hot Glue Gun Safety Quiz").with_section(
//!     Section::new(
//!         "s1",
//!         "Safety Questions",
//!         vec![Question::new(
//!             "q9",
//!             "True or False: Hot glue can cause burns",
//!             QuestionKind::TrueFalse(TrueFalseQuestion::with_correct_answer(true)),
//!         )],
//!     ),
//! );
//! let catalog = MemoryCatalog::new().with_template(template);
//! let sink = RecordingSink::new();
//!
//! let mut engine = FormEngine::open(Session::student("token", "D100000001"), "101", &catalog)?;
//! engine.set_answer("q9", true);
//! let outcome = engine.complete(&sink)?;
//! assert!(matches!(outcome, Completion::Completed(_)));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Collaborators
//!
//! - `TemplateSource` - where templates and prior attempts come from
//!   (`MemoryCatalog` keeps them in memory or loads a directory of JSON)
//! - `SubmissionSink` - where completed attempts go (`RecordingSink` records
//!   them and can be scripted to fail)
//!
//! Sinks that are asynchronous drive the engine with `begin_submission` and
//! `finish_submission` instead of `complete`.

// Re-export all types from den-form-types
pub use den_form_types::*;

mod engine;
pub use engine::{Completion, FormEngine, FormState, Step};

mod view;
pub use view::{Banner, Progress, QuestionView, SectionView};

mod signature;
pub use signature::{Point, SignaturePad};

mod catalog;
pub use catalog::MemoryCatalog;

// Test sink for exercising forms without a submission service
mod recording_sink;
pub use recording_sink::{RecordingSink, SinkFailure};
