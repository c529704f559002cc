//! Template and submission stores for Formwright
//!
//! `formwright-store` owns the two persisted collections: the ordered list of
//! form templates and the ordered list of form submissions.
//!
//! # Architecture
//!
//! - **Whole-collection writes**: each collection lives under one key and is
//!   rewritten after every mutation
//! - **Write, then commit**: the next collection is persisted before it
//!   replaces the in-memory copy, so a failed write changes nothing
//! - **Stale ids are not errors**: mutations addressed to a missing template,
//!   section or field return [`Outcome::Unchanged`]
//! - **Pluggable bytes**: [`BlobStore`] is implemented in memory and as one
//!   file per key, JSON or YAML

pub mod blob;
pub mod context;
pub mod error;
pub mod outcome;
pub mod submissions;
pub mod templates;

pub use blob::{
    BlobStore, FileBlobStore, MemoryBlobStore, StorageFormat, SUBMISSIONS_KEY, TEMPLATES_KEY,
};
pub use context::{FormsContext, FormsContextBuilder};
pub use error::{Result, StoreError};
pub use outcome::Outcome;
pub use submissions::{validate_values, Submission, SubmissionStore};
pub use templates::{
    FieldDraft, FieldUpdate, SectionUpdate, TemplateStore, TemplateUpdate, MAX_TEMPLATES,
};
