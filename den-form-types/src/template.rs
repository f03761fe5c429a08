use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{AnswerMap, FormId, Question, QuestionId, QuestionKind, SectionId};

/// Ways a form template can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Form {0} has no sections")]
    NoSections(FormId),

    #[error("Section {0} has no questions")]
    EmptySection(SectionId),

    #[error("Question id {0} is used more than once")]
    DuplicateQuestion(QuestionId),

    #[error("Multiple-choice question {0} has no options")]
    NoOptions(QuestionId),

    #[error("Correct answer '{answer}' of question {id} is not one of its options")]
    UnknownCorrectAnswer { id: QuestionId, answer: String },

    #[error("Question {0} uses correctAnswer with multiSelect, or correctAnswers without it")]
    MismatchedCorrectAnswer(QuestionId),
}

/// An ordered group of questions shown together as one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Section {
    /// Create a new section with the given questions.
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions,
        }
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Find a question in this section.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }
}

/// A certification form: metadata plus sections presented in order.
///
/// Templates are static data. They deserialize from the JSON shape used by
/// the course catalog (camelCase keys, snake_case `type` tags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub id: FormId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub sections: Vec<Section>,
}

impl FormTemplate {
    /// Create a new template with no sections.
    pub fn new(id: impl Into<FormId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            sections: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Parse a template from JSON and check that it is well-formed.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let template: Self = serde_json::from_str(json)?;
        template.check()?;
        Ok(template)
    }

    /// Get the sections.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Get a section by index.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Get the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the template has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over every question in template order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Find a question anywhere in the template.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions().find(|q| q.id() == id)
    }

    /// Index of the section containing a question.
    pub fn section_of(&self, id: &QuestionId) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.question(id).is_some())
    }

    /// An answer map with a type-appropriate empty value for every question.
    pub fn initial_answers(&self) -> AnswerMap {
        self.questions()
            .map(|q| (q.id().clone(), q.empty_answer()))
            .collect()
    }

    /// Check the structural invariants the form engine relies on.
    pub fn check(&self) -> Result<(), TemplateError> {
        if self.sections.is_empty() {
            return Err(TemplateError::NoSections(self.id.clone()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.questions.is_empty() {
                return Err(TemplateError::EmptySection(section.id.clone()));
            }
            for question in &section.questions {
                if !seen.insert(question.id()) {
                    return Err(TemplateError::DuplicateQuestion(question.id().clone()));
                }
                if let QuestionKind::MultipleChoice(mc) = question.kind() {
                    if mc.options.is_empty() {
                        return Err(TemplateError::NoOptions(question.id().clone()));
                    }
                    let mismatched = if mc.multi_select {
                        mc.correct_answer.is_some()
                    } else {
                        !mc.correct_answers.is_empty()
                    };
                    if mismatched {
                        return Err(TemplateError::MismatchedCorrectAnswer(
                            question.id().clone(),
                        ));
                    }
                    let unknown = mc
                        .correct_answer
                        .iter()
                        .chain(&mc.correct_answers)
                        .find(|answer| !mc.has_option(answer));
                    if let Some(answer) = unknown {
                        return Err(TemplateError::UnknownCorrectAnswer {
                            id: question.id().clone(),
                            answer: answer.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
