use dom_port::DomError;
use thiserror::Error;

pub type FillResult<T> = Result<T, FillError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FillError {
    /// A DOM read or write failed.
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// A fill run is already in progress on this page.
    #[error("a fill run is already in progress")]
    AlreadyRunning,

    #[error("unsupported trigger action: {0}")]
    UnsupportedAction(String),

    /// The trigger payload could not be parsed.
    #[error("malformed trigger message: {0}")]
    MalformedTrigger(String),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl FillError {
    /// Errors that concern the trigger rather than the page.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            FillError::AlreadyRunning
                | FillError::UnsupportedAction(_)
                | FillError::MalformedTrigger(_)
        )
    }
}
