//! In-memory form catalog.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::{AnswerMap, FormId, FormTemplate, LoadError, StudentId, TemplateSource};

/// A `TemplateSource` backed by in-memory maps.
///
/// Templates can be added one by one or loaded from a directory of JSON
/// files.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    templates: HashMap<FormId, FormTemplate>,
    attempts: HashMap<(StudentId, FormId), AnswerMap>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, replacing any template with the same id.
    pub fn with_template(mut self, template: FormTemplate) -> Self {
        self.insert_template(template);
        self
    }

    /// Add a prior attempt for a student.
    pub fn with_attempt(
        mut self,
        student_id: impl Into<StudentId>,
        form_id: impl Into<FormId>,
        answers: AnswerMap,
    ) -> Self {
        self.attempts
            .insert((student_id.into(), form_id.into()), answers);
        self
    }

    pub fn insert_template(&mut self, template: FormTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Load every `*.json` file in `dir` as a form template.
    ///
    /// Each file must hold one well-formed template.
    pub fn load_dir(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read template directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let template = FormTemplate::from_json(&json)
                .with_context(|| format!("Invalid form template {}", path.display()))?;
            tracing::debug!(form_id = %template.id, path = %path.display(), "loaded form template");
            catalog.insert_template(template);
        }

        Ok(catalog)
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over the ids of all templates.
    pub fn form_ids(&self) -> impl Iterator<Item = &FormId> {
        self.templates.keys()
    }
}

impl TemplateSource for MemoryCatalog {
    fn get_template(&self, form_id: &FormId) -> Result<FormTemplate, LoadError> {
        self.templates
            .get(form_id)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(form_id.clone()))
    }

    fn get_attempt(
        &self,
        student_id: &StudentId,
        form_id: &FormId,
    ) -> Result<Option<AnswerMap>, LoadError> {
        Ok(self
            .attempts
            .get(&(student_id.clone(), form_id.clone()))
            .cloned())
    }
}
