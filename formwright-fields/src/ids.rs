//! ID wrapper types for type-safe identifiers.
//!
//! Every entity in a template gets its own ULID-backed newtype so a section
//! id can never be passed where a field id is expected.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::FieldsError;

macro_rules! ulid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            pub fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            pub fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = FieldsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_string(s)
                    .map(Self)
                    .map_err(|source| FieldsError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                        source,
                    })
            }
        }
    };
}

ulid_id!(
    /// Identifier of a template.
    TemplateId,
    "template"
);
ulid_id!(
    /// Identifier of a section within a template.
    SectionId,
    "section"
);
ulid_id!(
    /// Identifier of a field within a section. Also the key of submitted values.
    FieldId,
    "field"
);
ulid_id!(
    /// Identifier of one option of an enum field.
    OptionId,
    "option"
);
ulid_id!(
    /// Identifier of a stored form submission.
    SubmissionId,
    "submission"
);
