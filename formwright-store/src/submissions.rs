//! SubmissionStore - validated form submissions, append-only.

use formwright_fields::{
    is_empty_value, validate_form, FormData, FormSubmission, SubmissionId, Template, TemplateId,
    ValidationError,
};
use tracing::{debug, warn};

use crate::blob::{load_list, save_list, BlobStore, SUBMISSIONS_KEY};
use crate::error::{Result, StoreError};
use crate::outcome::Outcome;

/// The result of [`SubmissionStore::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Stored with only the non-empty values of the template's fields
    Accepted(FormSubmission),
    /// Nothing was stored
    Rejected(Vec<ValidationError>),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Accepted(_) => &[],
            Self::Rejected(errors) => errors,
        }
    }
}

/// Validate `values` against every submittable field of `template`, in
/// display order.
pub fn validate_values(template: &Template, values: &FormData) -> Vec<ValidationError> {
    let fields = template.fields_in_order();
    validate_form(fields.into_iter().filter(|f| f.is_submittable()), values)
}

/// Owns the submission list and persists it under [`SUBMISSIONS_KEY`].
pub struct SubmissionStore<S: BlobStore> {
    blobs: S,
    submissions: Vec<FormSubmission>,
}

impl<S: BlobStore> SubmissionStore<S> {
    pub fn load(blobs: S) -> Result<Self> {
        let submissions: Vec<FormSubmission> = load_list(&blobs, SUBMISSIONS_KEY)?;
        debug!(submissions = submissions.len(), "submission store loaded");
        Ok(Self { blobs, submissions })
    }

    /// Every submission, oldest first.
    pub fn all(&self) -> &[FormSubmission] {
        &self.submissions
    }

    pub fn get(&self, id: &SubmissionId) -> Option<&FormSubmission> {
        self.submissions.iter().find(|s| &s.id == id)
    }

    pub fn submissions_for_template(&self, template_id: &TemplateId) -> Vec<&FormSubmission> {
        self.submissions
            .iter()
            .filter(|s| &s.template_id == template_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    pub fn into_blobs(self) -> S {
        self.blobs
    }

    /// Validate and store a filled-in form.
    ///
    /// Values for unknown or label fields and empty values are dropped before
    /// storing. If nothing is left the call fails with
    /// [`StoreError::EmptySubmission`].
    pub fn submit(&mut self, template: &Template, values: &FormData) -> Result<Submission> {
        let errors = validate_values(template, values);
        if !errors.is_empty() {
            warn!(
                template = %template.id,
                errors = errors.len(),
                "submission rejected"
            );
            return Ok(Submission::Rejected(errors));
        }

        let data: FormData = template
            .fields_in_order()
            .into_iter()
            .filter(|f| f.is_submittable())
            .filter_map(|f| {
                let value = values.get(&f.id);
                if is_empty_value(value) {
                    None
                } else {
                    value.map(|v| (f.id, v.clone()))
                }
            })
            .collect();
        if data.is_empty() {
            return Err(StoreError::EmptySubmission);
        }

        let submission = FormSubmission::new(template.id, data);
        let mut next = self.submissions.clone();
        next.push(submission.clone());
        self.commit(next)?;

        debug!(
            submission = %submission.id,
            template = %template.id,
            values = submission.data.len(),
            "stored submission"
        );
        Ok(Submission::Accepted(submission))
    }

    /// Remove a submission. Unknown ids are ignored.
    pub fn delete(&mut self, id: &SubmissionId) -> Result<Outcome> {
        if self.get(id).is_none() {
            debug!(submission = %id, "delete submission: not found, ignoring");
            return Ok(Outcome::Unchanged);
        }
        let next: Vec<FormSubmission> = self
            .submissions
            .iter()
            .filter(|s| &s.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        debug!(submission = %id, "deleted submission");
        Ok(Outcome::Applied(()))
    }

    fn commit(&mut self, next: Vec<FormSubmission>) -> Result<()> {
        save_list(&mut self.blobs, SUBMISSIONS_KEY, &next)?;
        self.submissions = next;
        Ok(())
    }
}
