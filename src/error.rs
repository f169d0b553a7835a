//! Failure taxonomy for user-initiated commands.

use crate::remote::RequestError;

/// Every failure path of a command resolves to one of these and a log entry;
/// none of them halts the client.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Rejected locally before any round trip.
    #[error("{0}")]
    InvalidInput(String),

    /// Non-2xx status, connection failure, timeout or unreadable body.
    #[error(transparent)]
    RequestFailed(#[from] RequestError),

    /// The simulator answered but reported a business-level failure.
    #[error("{0}")]
    DomainFailure(String),
}

impl CommandError {
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::InvalidInput(_) => "InvalidInput",
            CommandError::RequestFailed(_) => "RequestFailed",
            CommandError::DomainFailure(_) => "DomainFailure",
        }
    }
}

/// What happened to a command that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The round trip completed and the store was updated.
    Applied,
    /// Another command held the gate; nothing was sent.
    Skipped,
}

pub type CommandResult = Result<Outcome, CommandError>;
