//! Navigation operations and the transition queue.
//!
//! This module is the imperative shell around [`crate::core`]: it plans
//! operations against the committed backstack, talks to the listener and
//! host, and commits new backstacks when transitions complete.
//!
//! # Key Concepts
//!
//! - **Navigator**: public operation surface, owns the committed backstack
//! - **Transitions**: one per operation, executed strictly one at a time
//! - **Completion**: the listener's handle for ending a transition
//! - **Host**: optional, weakly held capability for starting activities

mod controller;
mod host;
mod listener;
mod transition;

pub use controller::Navigator;
pub use host::{ActivityResult, ActivityResultListener, Host, Intent, RequestCode, ResultCode};
pub use listener::Listener;
pub use transition::{Completion, TransitionId};
