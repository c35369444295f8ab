use std::fmt;

use crate::NavId;

pub type NavResult<T> = Result<T, NavError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The id is part of neither the target nor the current snapshot.
    EntryNotFound { id: NavId },
    /// A scoped holder was requested for a scope the entry's destination does
    /// not map to. Both fields carry the `Debug` rendering of the values.
    ScopeNotAssociated { scope: String, destination: String },
    /// A scoped holder was requested from a host built without a scope spec.
    ScopingDisabled,
    /// An operation needed a top entry but the backstack is empty.
    EmptyBackstack,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::EntryNotFound { id } => {
                write!(f, "host entry {id} is not part of the target or current snapshot")
            }
            NavError::ScopeNotAssociated { scope, destination } => write!(
                f,
                "scope ({scope}) is not associated with the destination ({destination}); add it to the scope spec"
            ),
            NavError::ScopingDisabled => {
                write!(f, "scoped holders requested from a host without a scope spec")
            }
            NavError::EmptyBackstack => write!(f, "backstack is empty"),
        }
    }
}

impl std::error::Error for NavError {}
