use thiserror::Error;

use crate::types::NodeRef;

pub type DomResult<T> = Result<T, DomError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Handle refers to an element that left the document (or a previous page).
    #[error("node {0} is no longer attached")]
    StaleNode(NodeRef),

    #[error("unsupported selector '{0}'")]
    Selector(String),

    #[error("{operation} is not supported on node {node}")]
    Unsupported {
        node: NodeRef,
        operation: &'static str,
    },

    /// The in-page half of a remote implementation failed.
    #[error("page bridge failure: {0}")]
    Bridge(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

impl DomError {
    /// Errors caused by the page changing under us rather than by the caller.
    pub fn is_page_state(&self) -> bool {
        matches!(self, DomError::StaleNode(_) | DomError::Bridge(_))
    }
}
