//! Pipeline construction errors.

use std::error::Error;
use std::fmt;

/// Errors detected while building an [`ActionList`](crate::ActionList) or
/// [`AbortList`](crate::AbortList).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// The same action type was registered twice.
    DuplicateAction {
        /// Name of the repeated action.
        name: String,
    },
    /// The same abort-condition type was registered twice.
    DuplicateAbort {
        /// Name of the repeated condition.
        name: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAction { name } => {
                write!(f, "action '{name}' registered more than once")
            }
            Self::DuplicateAbort { name } => {
                write!(f, "abort condition '{name}' registered more than once")
            }
        }
    }
}

impl Error for PipelineError {}
