//! Result of a mutation that tolerates stale ids.

/// Whether a mutation changed anything.
///
/// Mutations addressed to a template, section or field that no longer
/// exists are not errors; they report `Unchanged` and leave state alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The mutation was committed, carrying its product (e.g. a new id)
    Applied(T),
    /// The target was missing; nothing was written
    Unchanged,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The product of an applied mutation.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Unchanged => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Applied(value) => Outcome::Applied(f(value)),
            Self::Unchanged => Outcome::Unchanged,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Applied(v),
            None => Self::Unchanged,
        }
    }
}
