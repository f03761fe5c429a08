use den_form::{
    FileUploadQuestion, FormTemplate, MultipleChoiceQuestion, Question, QuestionKind, Section,
    SignatureQuestion, TextQuestion, TrueFalseQuestion,
};

pub const LASER_CUTTER_FORM_ID: &str = "102";

/// Laser cutter certification: uses every question kind.
pub fn laser_cutter_certification() -> FormTemplate {
    FormTemplate::new(LASER_CUTTER_FORM_ID, "Laser Cutter Certification")
        .with_description("Certification for safe laser cutter operation")
        .with_section(Section::new(
            "s1",
            "Safety Knowledge",
            vec![
                Question::new(
                    "l1",
                    "True or False: The laser cutter may be left running unattended",
                    QuestionKind::TrueFalse(TrueFalseQuestion::with_correct_answer(false)),
                ),
                Question::new(
                    "l2",
                    "Which materials are safe to cut? (check all that apply)",
                    QuestionKind::MultipleChoice(
                        MultipleChoiceQuestion::multi(["Plywood", "Acrylic", "PVC", "Cardboard"])
                            .with_correct_answers(["Plywood", "Acrylic", "Cardboard"]),
                    ),
                ),
                Question::new(
                    "l3",
                    "Describe what you do if a flame appears in the bed",
                    QuestionKind::Text(TextQuestion::with_min_words(10)),
                ),
            ],
        ))
        .with_section(Section::new(
            "s2",
            "Project",
            vec![
                Question::new(
                    "l4",
                    "Upload your first cut file",
                    QuestionKind::FileUpload(FileUploadQuestion::new(
                        ["image/svg+xml", "application/pdf"],
                        10,
                    )),
                ),
                Question::new(
                    "l5",
                    "Anything the instructor should know?",
                    QuestionKind::Text(TextQuestion::new()),
                )
                .optional(),
                Question::new(
                    "l6",
                    "Sign to certify you will follow the laser cutter rules",
                    QuestionKind::Signature(SignatureQuestion::new()),
                ),
            ],
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_well_formed() {
        let template = laser_cutter_certification();
        assert_eq!(template.check(), Ok(()));
        let kinds: Vec<_> = template.questions().map(|q| q.kind().type_name()).collect();
        for kind in ["multiple_choice", "true_false", "text", "file_upload", "signature"] {
            assert!(kinds.contains(&kind), "missing {kind}");
        }
    }
}
