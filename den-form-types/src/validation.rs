use std::collections::HashMap;

use crate::{AnswerMap, AnswerValue, Question, QuestionId, QuestionKind, Section};

/// Validation errors keyed by question id.
///
/// A question id is present iff its answer failed the last validation pass
/// (or has not been corrected since).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: HashMap<QuestionId, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: QuestionId, message: impl Into<String>) {
        self.errors.insert(id, message.into());
    }

    pub fn get(&self, id: &QuestionId) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.errors.contains_key(id)
    }

    pub fn remove(&mut self, id: &QuestionId) -> Option<String> {
        self.errors.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.errors.iter().map(|(id, msg)| (id, msg.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Result of validating one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionValidation {
    pub valid: bool,
    pub errors: ValidationErrors,
}

/// Count whitespace-delimited words. Runs of whitespace count once.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn unanswered_message(kind: &QuestionKind) -> String {
    match kind {
        QuestionKind::MultipleChoice(_) => "Please select an answer".to_string(),
        QuestionKind::TrueFalse(_) => "Please select true or false".to_string(),
        QuestionKind::Text(text) => match text.min_words {
            Some(min) => format!("Please enter at least {min} words"),
            None => "Please enter a response".to_string(),
        },
        QuestionKind::FileUpload(_) => "Please upload a file".to_string(),
        QuestionKind::Signature(_) => "Please provide your signature".to_string(),
    }
}

/// Validate a single answer against its question.
///
/// A value whose shape does not fit the question kind counts as unanswered.
/// Optional questions accept an empty answer, but a non-empty one is still
/// checked against the kind's rules.
pub fn validate_answer(question: &Question, answer: Option<&AnswerValue>) -> Result<(), String> {
    let kind = question.kind();
    let Some(answer) = answer.filter(|value| kind.accepts(value) && !value.is_empty()) else {
        if question.is_required() {
            return Err(unanswered_message(kind));
        }
        return Ok(());
    };

    match (kind, answer) {
        (QuestionKind::MultipleChoice(mc), AnswerValue::Choice(choice)) => {
            if !mc.has_option(choice) {
                return Err("Please select one of the listed options".into());
            }
        }
        (QuestionKind::MultipleChoice(mc), AnswerValue::Choices(choices)) => {
            if choices.iter().any(|choice| !mc.has_option(choice)) {
                return Err("Please select one of the listed options".into());
            }
        }
        (QuestionKind::Text(text), AnswerValue::Text(value)) => {
            if let Some(min) = text.min_words
                && word_count(value) < min
            {
                return Err(unanswered_message(kind));
            }
        }
        (QuestionKind::FileUpload(upload), AnswerValue::File(file)) => {
            if !upload.allows(&file.mime_type) {
                let types: Vec<&str> = upload
                    .allowed_file_types
                    .iter()
                    .map(String::as_str)
                    .collect();
                return Err(format!("File type must be one of: {}", types.join(", ")));
            }
            if file.size_bytes > upload.max_bytes() {
                return Err(format!(
                    "File must be at most {} MB",
                    upload.max_file_size
                ));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Validate every question of a section against the answers.
///
/// The returned error map contains exactly the failing questions of this
/// section.
pub fn validate_section(section: &Section, answers: &AnswerMap) -> SectionValidation {
    let mut errors = ValidationErrors::new();
    for question in section.questions() {
        if let Err(message) = validate_answer(question, answers.get(question.id())) {
            errors.insert(question.id().clone(), message);
        }
    }
    SectionValidation {
        valid: errors.is_empty(),
        errors,
    }
}
