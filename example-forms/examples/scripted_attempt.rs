//! Walks a student through the Hot Glue Gun Safety Quiz without a UI.
//!
//! Templates are read from the directory in `DEN_FORM_TEMPLATES` when set,
//! otherwise the built-in samples are used. Set `RUST_LOG=debug` to watch
//! every answer and validation pass. The walk stops with an error when a
//! section does not validate or the sink keeps failing.

use den_form::{FormEngine, MemoryCatalog, RecordingSink, Session, SinkFailure};
use example_forms::{HOT_GLUE_GUN_FORM_ID, passing_answers, walk_form};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = match std::env::var("DEN_FORM_TEMPLATES") {
        Ok(dir) => MemoryCatalog::load_dir(dir)?,
        Err(_) => {
            tracing::info!("DEN_FORM_TEMPLATES not set, using built-in forms");
            example_forms::catalog()?
        }
    };
    // The first submission times out so the retry path is visible.
    let sink = RecordingSink::new().fail_next(SinkFailure::Unavailable("request timed out".into()));

    let session = Session::student("demo-token", "D100000001");
    let mut engine = FormEngine::open(session, HOT_GLUE_GUN_FORM_ID, &catalog)?;
    let template = engine
        .template()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("form did not load"))?;
    let answers = passing_answers(&template);

    let receipt = walk_form(&mut engine, &answers, &sink)?;
    println!("Certification completed, receipt {}", receipt.reference);

    if let Some(grade) = engine.grade() {
        println!("Score: {}/{}", grade.correct(), grade.gradable());
    }
    Ok(())
}
