//! Errors raised by navigation operations.

use thiserror::Error;

/// Precondition violations reported by the navigator.
///
/// These are programmer errors: the call that triggered them did not take
/// effect and nothing is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Navigator not initialized. Use start_with(screen, animator) to show your first screen")]
    NotInitialized,

    #[error("Backstack is empty")]
    EmptyBackstack,

    #[error("No candidate screens given to pop to")]
    NoCandidates,

    #[error("Completion already called for this transition")]
    TransitionAlreadyCompleted,

    #[error("Navigator was dropped before the transition completed")]
    NavigatorDropped,

    #[error("Host reference is not set. Call set_host(host) first")]
    NoHost,

    #[error("Listener is not set. Call set_listener(listener) first")]
    NoListener,

    #[error("No activity result listener registered for request code {0}")]
    UnknownRequestCode(u32),
}
