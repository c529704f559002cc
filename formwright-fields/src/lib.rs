//! Form template data model and field validation engine
//!
//! `formwright-fields` is a pure, schema-only crate. It defines what a form
//! template looks like and how submitted values are checked against it. It
//! performs no I/O; storage and mutation live in `formwright-store`.
//!
//! # Architecture
//!
//! - **Discriminated fields**: [`FieldKind`] is a tagged union, so a field can
//!   only carry the attributes of its own kind
//! - **Order is data**: sections and fields carry an explicit `order`; display
//!   order comes from sorting on it, not from vector position
//! - **Validation is data**: [`validate_form`] returns a list of
//!   [`ValidationError`] values and never fails

pub mod error;
pub mod ids;
pub mod types;
pub mod validation;

pub use error::{FieldsError, Result};
pub use ids::{FieldId, OptionId, SectionId, SubmissionId, TemplateId};
pub use types::{
    BooleanVariant, Field, FieldKind, FieldOption, FormData, FormSubmission, LabelSize, Section,
    Template,
};
pub use validation::{is_empty_value, validate_field, validate_form, ValidationError};
