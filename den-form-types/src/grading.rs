//! Informational grading against the correct answers stored in a template.
//!
//! Grading never gates navigation or submission.

use std::collections::BTreeSet;

use crate::{AnswerMap, AnswerValue, FormTemplate, Question, QuestionId, QuestionKind};

/// Outcome for one gradable question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedQuestion {
    pub id: QuestionId,
    pub correct: bool,
}

/// Grading result for a whole attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grade {
    /// Gradable questions, in template order.
    pub questions: Vec<GradedQuestion>,
}

impl Grade {
    /// Number of correctly answered questions.
    pub fn correct(&self) -> usize {
        self.questions.iter().filter(|q| q.correct).count()
    }

    /// Number of questions that carry a correct answer.
    pub fn gradable(&self) -> usize {
        self.questions.len()
    }

    /// Check if every gradable question was answered correctly.
    pub fn is_perfect(&self) -> bool {
        self.questions.iter().all(|q| q.correct)
    }

    /// Look up the outcome for one question.
    pub fn outcome(&self, id: &QuestionId) -> Option<bool> {
        self.questions.iter().find(|q| &q.id == id).map(|q| q.correct)
    }
}

/// Returns `None` when the question carries no correct answer.
fn grade_question(question: &Question, answer: Option<&AnswerValue>) -> Option<bool> {
    match question.kind() {
        QuestionKind::MultipleChoice(mc) if mc.multi_select => {
            // A lone correctAnswer on a multi-select question is a one-element key.
            let expected: BTreeSet<&str> = if mc.correct_answers.is_empty() {
                mc.correct_answer.iter().map(String::as_str).collect()
            } else {
                mc.correct_answers.iter().map(String::as_str).collect()
            };
            if expected.is_empty() {
                return None;
            }
            let given: BTreeSet<&str> = answer
                .and_then(AnswerValue::as_choices)
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect();
            Some(expected == given)
        }
        QuestionKind::MultipleChoice(mc) => {
            let expected = mc.correct_answer.as_deref()?;
            Some(answer.and_then(AnswerValue::as_choice) == Some(expected))
        }
        QuestionKind::TrueFalse(tf) => {
            let expected = tf.correct_answer?;
            Some(answer.and_then(AnswerValue::as_bool) == Some(expected))
        }
        QuestionKind::Text(_) | QuestionKind::FileUpload(_) | QuestionKind::Signature(_) => None,
    }
}

/// Grade the answers against every question that has a correct answer.
pub fn grade(template: &FormTemplate, answers: &AnswerMap) -> Grade {
    let questions = template
        .questions()
        .filter_map(|question| {
            grade_question(question, answers.get(question.id())).map(|correct| GradedQuestion {
                id: question.id().clone(),
                correct,
            })
        })
        .collect();
    Grade { questions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MultipleChoiceQuestion, Section, TextQuestion, TrueFalseQuestion};

    fn template() -> FormTemplate {
        FormTemplate::new("101", "Safety").with_section(Section::new(
            "s3",
            "Safety Questions",
            vec![
                Question::new(
                    "q5",
                    "Happy dance?",
                    QuestionKind::TrueFalse(TrueFalseQuestion::with_correct_answer(false)),
                ),
                Question::new(
                    "q7",
                    "Before using the tool...",
                    QuestionKind::MultipleChoice(
                        MultipleChoiceQuestion::multi(["goggles", "stool rides", "tie back hair"])
                            .with_correct_answers(["goggles", "tie back hair"]),
                    ),
                ),
                Question::new(
                    "q8",
                    "Glue stick too big?",
                    QuestionKind::MultipleChoice(
                        MultipleChoiceQuestion::new(["trim", "check the bin"])
                            .with_correct_answer("check the bin"),
                    ),
                ),
                Question::new("q13", "Full name", QuestionKind::Text(TextQuestion::new())),
            ],
        ))
    }

    #[test]
    fn grades_only_questions_with_answers_key() {
        let grade = grade(&template(), &template().initial_answers());
        assert_eq!(grade.gradable(), 3);
        assert_eq!(grade.correct(), 0);
        assert_eq!(grade.outcome(&QuestionId::new("q13")), None);
    }

    #[test]
    fn multi_select_matches_as_set() {
        let mut answers = template().initial_answers();
        answers.insert("q5", false);
        answers.insert(
            "q7",
            AnswerValue::Choices(vec!["tie back hair".into(), "goggles".into()]),
        );
        answers.insert("q8", AnswerValue::Choice("check the bin".into()));

        let grade = grade(&template(), &answers);
        assert!(grade.is_perfect());
        assert_eq!(grade.correct(), 3);
    }

    #[test]
    fn wrong_answers_are_reported() {
        let mut answers = template().initial_answers();
        answers.insert("q5", true);
        answers.insert("q7", AnswerValue::Choices(vec!["goggles".into()]));

        let grade = grade(&template(), &answers);
        assert_eq!(grade.outcome(&QuestionId::new("q5")), Some(false));
        assert_eq!(grade.outcome(&QuestionId::new("q7")), Some(false));
        assert!(!grade.is_perfect());
    }

    #[test]
    fn multi_select_with_single_correct_answer_grades_as_set() {
        let template = FormTemplate::new("102", "Laser").with_section(Section::new(
            "s1",
            "Materials",
            vec![Question::new(
                "l2",
                "Which material is safe to cut?",
                QuestionKind::MultipleChoice(
                    MultipleChoiceQuestion::multi(["Plywood", "PVC"]).with_correct_answer("Plywood"),
                ),
            )],
        ));
        let mut answers = template.initial_answers();
        answers.insert("l2", AnswerValue::Choices(vec!["Plywood".into()]));
        assert_eq!(
            grade(&template, &answers).outcome(&QuestionId::new("l2")),
            Some(true)
        );

        answers.insert("l2", AnswerValue::Choices(vec!["Plywood".into(), "PVC".into()]));
        assert_eq!(
            grade(&template, &answers).outcome(&QuestionId::new("l2")),
            Some(false)
        );
    }
}
