//! Integration tests for den-form

use den_form::{
    AnswerValue, Banner, Completion, FileHandle, FormEngine, FormState, FormTemplate,
    MemoryCatalog, MultipleChoiceQuestion, Question, QuestionId, QuestionKind, RecordingSink,
    Section, Session, SinkFailure, Step, SubmissionSink, TrueFalseQuestion,
};
use example_forms::{
    HOT_GLUE_GUN_FORM_ID, LASER_CUTTER_FORM_ID, hot_glue_gun_safety, passing_answers,
};

fn student() -> Session {
    Session::student("token", "D100000013")
}

fn two_section_template() -> FormTemplate {
    FormTemplate::new("tf-then-mc", "Two Sections")
        .with_section(Section::new(
            "s1",
            "Safety",
            vec![Question::new(
                "tf",
                "True or False: Hot glue can cause burns",
                QuestionKind::TrueFalse(TrueFalseQuestion::new()),
            )],
        ))
        .with_section(Section::new(
            "s2",
            "Course",
            vec![Question::new(
                "mc",
                "Which class is requiring you to take this quiz?",
                QuestionKind::MultipleChoice(MultipleChoiceQuestion::new(["MAKE", "Rover"])),
            )],
        ))
}

fn answer_section(engine: &mut FormEngine, answers: &den_form::AnswerMap) {
    let ids: Vec<QuestionId> = engine
        .view()
        .unwrap()
        .questions
        .iter()
        .map(|q| q.question.id().clone())
        .collect();
    for id in ids {
        let value = answers.get(&id).cloned().unwrap_or_default();
        engine.set_answer(id, value);
    }
}

#[test]
fn test_false_is_an_answer_end_to_end() {
    let catalog = MemoryCatalog::new().with_template(two_section_template());
    let mut engine = FormEngine::open(student(), "tf-then-mc", &catalog).unwrap();

    engine.set_answer("tf", false);
    assert_eq!(engine.next(), Step::Moved { from: 0, to: 1 });
    assert_eq!(engine.current_section_index(), Some(1));
    assert!(engine.errors().is_empty());
}

#[test]
fn test_hot_glue_gun_quiz_walkthrough() {
    let catalog = example_forms::catalog().unwrap();
    let sink = RecordingSink::new();
    let mut engine = FormEngine::open(student(), HOT_GLUE_GUN_FORM_ID, &catalog).unwrap();
    let answers = passing_answers(engine.template().unwrap());

    for expected in 0..3 {
        assert_eq!(engine.current_section_index(), Some(expected));
        assert_eq!(engine.next(), Step::Blocked);
        answer_section(&mut engine, &answers);
        assert_eq!(
            engine.next(),
            Step::Moved {
                from: expected,
                to: expected + 1
            }
        );
    }

    assert!(engine.view().unwrap().is_last());
    answer_section(&mut engine, &answers);
    let outcome = engine.complete(&sink).unwrap();
    let Completion::Completed(receipt) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(receipt.student_id.as_str(), "D100000013");
    assert_eq!(engine.state(), FormState::Completed);

    let submitted = sink.last_submission().unwrap();
    assert_eq!(submitted.form_id.as_str(), HOT_GLUE_GUN_FORM_ID);
    assert_eq!(submitted.answers, answers);
    assert!(engine.grade().unwrap().is_perfect());
}

#[test]
fn test_complete_is_idempotent() {
    let catalog = MemoryCatalog::new().with_template(two_section_template());
    let sink = RecordingSink::new();
    let mut engine = FormEngine::open(student(), "tf-then-mc", &catalog).unwrap();
    engine.set_answer("tf", true);
    engine.next();
    engine.set_answer("mc", AnswerValue::Choice("Rover".into()));

    assert!(matches!(
        engine.complete(&sink).unwrap(),
        Completion::Completed(_)
    ));
    for _ in 0..3 {
        assert_eq!(engine.complete(&sink).unwrap(), Completion::AlreadyCompleted);
    }
    assert_eq!(sink.submissions().len(), 1);
}

#[test]
fn test_rejected_submission_can_be_retried() {
    let catalog = MemoryCatalog::new().with_template(two_section_template());
    let sink = RecordingSink::new()
        .fail_next(SinkFailure::Rejected("attempt window closed".into()))
        .fail_next(SinkFailure::Unavailable("connection reset".into()));
    let mut engine = FormEngine::open(student(), "tf-then-mc", &catalog).unwrap();
    engine.set_answer("tf", true);
    engine.next();
    engine.set_answer("mc", AnswerValue::Choice("Rover".into()));

    let err = engine.complete(&sink).unwrap_err();
    assert!(err.is_rejected());
    assert!(matches!(engine.banner(), Some(Banner::SubmissionFailed(_))));
    assert!(engine.can_retry());

    assert!(engine.complete(&sink).is_err());
    assert_eq!(engine.state(), FormState::InProgress { section: 1 });
    assert_eq!(
        engine.answers().get_choice(&QuestionId::new("mc")).unwrap(),
        "Rover"
    );

    assert!(matches!(
        engine.complete(&sink).unwrap(),
        Completion::Completed(_)
    ));
    assert!(!engine.can_retry());
}

#[test]
fn test_async_style_submission() {
    let catalog = MemoryCatalog::new().with_template(two_section_template());
    let sink = RecordingSink::new();
    let mut engine = FormEngine::open(student(), "tf-then-mc", &catalog).unwrap();
    engine.set_answer("tf", false);
    engine.next();
    engine.set_answer("mc", AnswerValue::Choice("MAKE".into()));

    let submission = engine.begin_submission().unwrap();
    // A second click while the request is in flight does nothing.
    assert!(engine.begin_submission().is_none());
    assert_eq!(engine.complete(&sink).unwrap(), Completion::Ignored);

    let result = sink.submit(
        &submission.form_id,
        &submission.student_id,
        &submission.answers,
    );
    assert!(matches!(
        engine.finish_submission(result).unwrap(),
        Completion::Completed(_)
    ));
    assert_eq!(sink.submissions().len(), 1);
}

#[test]
fn test_laser_cutter_file_rules() {
    let catalog = example_forms::catalog().unwrap();
    let mut engine = FormEngine::open(student(), LASER_CUTTER_FORM_ID, &catalog).unwrap();

    engine.set_answer("l1", false);
    engine.set_answer(
        "l2",
        AnswerValue::Choices(vec!["Plywood".into(), "Acrylic".into()]),
    );
    engine.set_answer(
        "l3",
        AnswerValue::Text("stop the job keep the lid closed and call the instructor right away".into()),
    );
    assert_eq!(engine.next(), Step::Moved { from: 0, to: 1 });

    engine.set_answer("l4", FileHandle::new("cut.dxf", "image/vnd.dxf", 1024));
    engine.set_answer("l6", AnswerValue::Signature("data:sig".into()));
    let sink = RecordingSink::new();
    assert_eq!(engine.complete(&sink).unwrap(), Completion::Blocked);
    assert_eq!(
        engine.error(&QuestionId::new("l4")),
        Some("File type must be one of: application/pdf, image/svg+xml")
    );
    // The optional note may stay empty.
    assert!(engine.error(&QuestionId::new("l5")).is_none());

    engine.set_answer("l4", FileHandle::new("cut.svg", "image/svg+xml", 1024));
    assert!(matches!(
        engine.complete(&sink).unwrap(),
        Completion::Completed(_)
    ));
}

#[test]
fn test_catalog_loads_sample_directory() {
    let catalog = MemoryCatalog::load_dir(example_forms::templates_dir()).unwrap();
    let engine = FormEngine::open(student(), HOT_GLUE_GUN_FORM_ID, &catalog).unwrap();
    assert_eq!(engine.template().unwrap(), &hot_glue_gun_safety().unwrap());
}

#[test]
fn test_unknown_form_blocks_engine() {
    let catalog = example_forms::catalog().unwrap();
    let mut engine = FormEngine::new(student(), "404");
    assert!(engine.load(&catalog).is_err());
    assert_eq!(engine.state(), FormState::LoadFailed);
    assert!(engine.view().is_none());
    assert_eq!(engine.previous(), Step::Ignored);
    assert_eq!(
        engine.complete(&RecordingSink::new()).unwrap(),
        Completion::Ignored
    );
}
