//! Drives an engine through a form with prepared answers, the way a host UI
//! would with a student at the keyboard.

use den_form::{
    AnswerMap, AnswerValue, Completion, FormEngine, Point, Receipt, SignaturePad, Step,
    SubmissionSink,
};

/// How many times a failed submission is sent again before giving up.
pub const MAX_SUBMIT_ATTEMPTS: usize = 3;

fn describe_errors(engine: &FormEngine) -> String {
    let mut errors: Vec<String> = engine
        .errors()
        .iter()
        .map(|(id, message)| format!("{id}: {message}"))
        .collect();
    errors.sort();
    errors.join("; ")
}

fn fill_section(engine: &mut FormEngine, answers: &AnswerMap) {
    let Some(view) = engine.view() else { return };
    let ids: Vec<_> = view
        .questions
        .iter()
        .map(|q| q.question.id().clone())
        .collect();

    for id in ids {
        match answers.get(&id) {
            // Signatures go through the pad like a real drawing would.
            Some(AnswerValue::Signature(_)) => {
                let mut pad = SignaturePad::default();
                pad.begin_stroke(Point::new(10.0, 80.0));
                pad.extend_stroke(Point::new(120.0, 40.0));
                pad.extend_stroke(Point::new(240.0, 90.0));
                engine.end_signature_stroke(id, &mut pad);
            }
            Some(value) => engine.set_answer(id, value.clone()),
            None => {}
        }
    }
}

/// Answer every section from `answers` and submit the attempt to `sink`.
///
/// Fails when a section does not validate, or when the sink still refuses
/// the attempt after `MAX_SUBMIT_ATTEMPTS` tries.
pub fn walk_form(
    engine: &mut FormEngine,
    answers: &AnswerMap,
    sink: &impl SubmissionSink,
) -> anyhow::Result<Receipt> {
    let mut attempts = 0;

    loop {
        let Some(view) = engine.view() else {
            anyhow::bail!("form {} is not open for answering", engine.form_id());
        };
        tracing::info!(
            section = view.progress.current,
            total = view.progress.total,
            title = view.title(),
            "answering section"
        );
        let is_last = view.is_last();
        fill_section(engine, answers);

        if !is_last {
            if engine.next() == Step::Blocked {
                anyhow::bail!("section did not validate: {}", describe_errors(engine));
            }
            continue;
        }

        attempts += 1;
        match engine.complete(sink) {
            Ok(Completion::Completed(receipt)) => return Ok(receipt),
            Ok(Completion::Blocked) => {
                anyhow::bail!("last section did not validate: {}", describe_errors(engine));
            }
            Ok(other) => anyhow::bail!("attempt could not be completed: {other:?}"),
            Err(err) if attempts < MAX_SUBMIT_ATTEMPTS => {
                tracing::warn!(attempt = attempts, "submission failed ({err}), retrying");
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("submission failed after {attempts} attempts")));
            }
        }
    }
}
