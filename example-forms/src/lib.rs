//! Sample certification forms from the Design Den workshop.

pub mod hot_glue_gun;
pub mod laser_cutter;
pub mod script;

use std::path::Path;

use den_form::MemoryCatalog;

pub use hot_glue_gun::{
    HOT_GLUE_GUN_FORM_ID, HOT_GLUE_GUN_JSON, hot_glue_gun_safety, passing_answers,
};
pub use laser_cutter::{LASER_CUTTER_FORM_ID, laser_cutter_certification};
pub use script::{MAX_SUBMIT_ATTEMPTS, walk_form};

/// A catalog holding every sample form.
pub fn catalog() -> anyhow::Result<MemoryCatalog> {
    Ok(MemoryCatalog::new()
        .with_template(hot_glue_gun_safety()?)
        .with_template(laser_cutter_certification()))
}

/// The directory holding the sample JSON templates.
pub fn templates_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}
