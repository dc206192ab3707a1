//! Selection errors

use super::candidate::SelectorKind;
use crate::ecs::ControllerId;
use thiserror::Error;

/// Faults raised by selection arbitration
///
/// Finding nothing to select is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A candidate was handed to a manager with no selector of its kind
    #[error("no {0} selector registered to handle the candidate")]
    UnsupportedCandidate(SelectorKind),

    /// The manager's controller is not registered in the world
    #[error("controller {0} is not registered")]
    UnknownController(ControllerId),
}
