//! What a screen shows: [`ViewState`] and the snapshot the controller publishes.

use thiserror::Error;

/// The one message customers see for any failed screen.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Why a fetch cycle failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    /// The route key resolved to nothing (unknown slug, unknown order).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A backend call failed or the cycle timed out. Retrying may succeed.
    #[error("Temporarily unavailable: {0}")]
    Transient(String),

    /// The fetch itself broke (panicked).
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl ViewError {
    /// Text for the failed screen. Deliberately the same for every kind.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ViewError::Transient(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<D> {
    /// Fetching, or waiting for a usable route key. Shows no data.
    Pending,
    Ready(D),
    Failed(ViewError),
}

impl<D> ViewState<D> {
    pub fn is_pending(&self) -> bool {
        matches!(self, ViewState::Pending)
    }

    pub fn data(&self) -> Option<&D> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// The controller's published state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSnapshot<K, D> {
    /// Route key of the current cycle; `None` before the first `initiate`.
    pub key: Option<K>,
    /// Current cycle number, starting at 1 with the first `initiate`.
    pub cycle: u64,
    pub state: ViewState<D>,
    /// Results from superseded cycles that arrived and were dropped.
    pub discarded: u64,
}

impl<K, D> Default for ScreenSnapshot<K, D> {
    fn default() -> Self {
        Self {
            key: None,
            cycle: 0,
            state: ViewState::Pending,
            discarded: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_shows_the_same_message() {
        let errors = [
            ViewError::NotFound("missing".into()),
            ViewError::Transient("timeout".into()),
            ViewError::Unexpected("panic".into()),
        ];
        for e in &errors {
            assert_eq!(e.user_message(), GENERIC_FAILURE_MESSAGE);
        }
        assert!(errors[1].is_retryable());
        assert!(!errors[0].is_retryable());
    }

    #[test]
    fn test_only_ready_exposes_data() {
        assert_eq!(ViewState::Ready(3).data(), Some(&3));
        assert_eq!(ViewState::<u8>::Pending.data(), None);
        assert!(ViewState::<u8>::Failed(ViewError::NotFound("x".into())).data().is_none());
    }
}
