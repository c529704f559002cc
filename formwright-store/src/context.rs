//! FormsContext - both stores opened over one data directory.

use std::fs;
use std::path::{Path, PathBuf};

use formwright_fields::{FormData, TemplateId};
use tracing::debug;

use crate::blob::{FileBlobStore, StorageFormat};
use crate::error::Result;
use crate::submissions::{Submission, SubmissionStore};
use crate::templates::TemplateStore;

/// Builder for `FormsContext`. Created by `FormsContext::open()`.
pub struct FormsContextBuilder {
    root: PathBuf,
    format: StorageFormat,
}

impl FormsContextBuilder {
    /// Encoding for the collection files. Defaults to JSON.
    pub fn with_format(mut self, format: StorageFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the context: create the data directory and load both collections.
    pub fn build(self) -> Result<FormsContext> {
        fs::create_dir_all(&self.root)?;
        let blobs = FileBlobStore::new(&self.root, self.format);

        let templates = TemplateStore::load(blobs.clone())?;
        let submissions = SubmissionStore::load(blobs)?;

        debug!(
            root = %self.root.display(),
            templates = templates.len(),
            submissions = submissions.len(),
            "forms context opened"
        );

        Ok(FormsContext {
            root: self.root,
            templates,
            submissions,
        })
    }
}

/// Template and submission stores backed by files in a single directory.
pub struct FormsContext {
    root: PathBuf,
    templates: TemplateStore<FileBlobStore>,
    submissions: SubmissionStore<FileBlobStore>,
}

impl FormsContext {
    /// Open a context rooted at `root`.
    ///
    /// ```ignore
    /// let ctx = FormsContext::open(".formwright/data")
    ///     .with_format(StorageFormat::Yaml)
    ///     .build()?;
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> FormsContextBuilder {
        FormsContextBuilder {
            root: root.into(),
            format: StorageFormat::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn templates(&self) -> &TemplateStore<FileBlobStore> {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateStore<FileBlobStore> {
        &mut self.templates
    }

    pub fn submissions(&self) -> &SubmissionStore<FileBlobStore> {
        &self.submissions
    }

    pub fn submissions_mut(&mut self) -> &mut SubmissionStore<FileBlobStore> {
        &mut self.submissions
    }

    /// Submit values against a stored template. `None` if the template is gone.
    pub fn submit(
        &mut self,
        template_id: &TemplateId,
        values: &FormData,
    ) -> Result<Option<Submission>> {
        let Some(template) = self.templates.get(template_id) else {
            debug!(template = %template_id, "submit: template not found");
            return Ok(None);
        };
        self.submissions.submit(template, values).map(Some)
    }
}
