//! Flow states and failure kinds.

use crate::notify::Notice;

/// Terminal failure of one invocation. None are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("invalid URL")]
    InvalidUrl,
    /// Any transport, storage or otherwise unclassified fault.
    #[error("download failed")]
    DownloadError,
    #[error("not an image")]
    NotAnImage,
}

impl FailureKind {
    pub fn notice(self) -> Notice {
        match self {
            FailureKind::InvalidUrl => Notice::InvalidUrl,
            FailureKind::DownloadError => Notice::DownloadFailed,
            FailureKind::NotAnImage => Notice::NotAnImage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    Downloading,
    Probing,
    Success,
    Failed(FailureKind),
    /// The screen was destroyed before the worker finished; its result was dropped.
    Abandoned,
}

impl FlowState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FlowState::Success | FlowState::Failed(_) | FlowState::Abandoned
        )
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_advance_to(self, next: FlowState) -> bool {
        use FailureKind::*;
        use FlowState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Failed(InvalidUrl))
                | (Validating, Downloading)
                | (Downloading, Failed(DownloadError))
                | (Downloading, Probing)
                | (Downloading, Abandoned)
                | (Probing, Failed(NotAnImage))
                // share handoff could not be built or dispatched
                | (Probing, Failed(DownloadError))
                | (Probing, Success)
                | (Probing, Abandoned)
        )
    }
}
