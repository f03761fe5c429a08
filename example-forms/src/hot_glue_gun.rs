use den_form::{AnswerMap, AnswerValue, FormTemplate};

/// The Hot Glue Gun Safety Quiz, as served by the course catalog.
pub const HOT_GLUE_GUN_JSON: &str = include_str!("../templates/hot-glue-gun-safety.json");

pub const HOT_GLUE_GUN_FORM_ID: &str = "101";

/// Parse the Hot Glue Gun Safety Quiz template.
pub fn hot_glue_gun_safety() -> anyhow::Result<FormTemplate> {
    FormTemplate::from_json(HOT_GLUE_GUN_JSON)
}

fn correct_choice(template: &FormTemplate, id: &str) -> Option<String> {
    match template.question(&id.into())?.kind() {
        den_form::QuestionKind::MultipleChoice(mc) => mc.correct_answer.clone(),
        _ => None,
    }
}

fn correct_choices(template: &FormTemplate, id: &str) -> Vec<String> {
    match template.question(&id.into()).map(|q| q.kind()) {
        Some(den_form::QuestionKind::MultipleChoice(mc)) => mc.correct_answers.clone(),
        _ => Vec::new(),
    }
}

/// A complete, fully correct set of answers for the quiz.
pub fn passing_answers(template: &FormTemplate) -> AnswerMap {
    let mut answers = template.initial_answers();
    answers.insert("q1", AnswerValue::Text("ada@designden.space".into()));
    answers.insert("q2", AnswerValue::Text("Ada".into()));
    answers.insert("q3", AnswerValue::Text("Lovelace".into()));
    answers.insert("q4", AnswerValue::Choice("MAKE".into()));
    answers.insert("q5", false);
    answers.insert("q6", AnswerValue::Choices(correct_choices(template, "q6")));
    answers.insert("q7", AnswerValue::Choices(correct_choices(template, "q7")));
    for id in ["q8", "q11", "q12"] {
        answers.insert(id, correct_choice(template, id).map(AnswerValue::Choice));
    }
    answers.insert("q9", true);
    answers.insert("q10", true);
    answers.insert("q13", AnswerValue::Text("Ada Lovelace".into()));
    answers.insert(
        "q14",
        AnswerValue::Signature("data:image/svg+xml;utf8,<svg/>".into()),
    );
    answers
}

#[cfg(test)]
mod tests {
    use super::*;
    use den_form::{QuestionId, validate_section};

    #[test]
    fn template_parses() {
        let template = hot_glue_gun_safety().unwrap();
        assert_eq!(template.id.as_str(), HOT_GLUE_GUN_FORM_ID);
        assert_eq!(template.len(), 4);
        assert_eq!(template.questions().count(), 14);
        assert_eq!(template.section_of(&QuestionId::new("q14")), Some(3));
    }

    #[test]
    fn passing_answers_validate_and_grade_perfectly() {
        let template = hot_glue_gun_safety().unwrap();
        let answers = passing_answers(&template);
        for section in template.sections() {
            let result = validate_section(section, &answers);
            assert!(result.valid, "section {} failed: {:?}", section.id, result.errors);
        }

        let grade = den_form::grade(&template, &answers);
        assert_eq!(grade.gradable(), 8);
        assert!(grade.is_perfect());
    }
}
