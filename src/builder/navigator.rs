//! Builder for constructing navigators.

use crate::core::{Backstack, Screen, TransitionHistory};
use crate::navigator::{Host, Listener, Navigator};
use std::rc::{Rc, Weak};

/// Builder for configuring a [`Navigator`] with a fluent API.
///
/// Every setting is optional. A navigator built with a non-empty backstack
/// counts as initialized, so `start_with` is ignored on it.
pub struct NavigatorBuilder<S: Screen> {
    backstack: Backstack<S>,
    listener: Option<Rc<dyn Listener<S>>>,
    host: Option<Weak<dyn Host>>,
    history_limit: usize,
}

impl<S: Screen> NavigatorBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            backstack: Backstack::empty(),
            listener: None,
            host: None,
            history_limit: TransitionHistory::DEFAULT_LIMIT,
        }
    }

    /// Set the initial backstack. It is committed as is, without notifying
    /// the listener.
    pub fn backstack(mut self, backstack: Backstack<S>) -> Self {
        self.backstack = backstack;
        self
    }

    pub fn listener(mut self, listener: Rc<dyn Listener<S>>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Set the host. Only a weak reference is kept.
    pub fn host(mut self, host: &Rc<dyn Host>) -> Self {
        self.host = Some(Rc::downgrade(host));
        self
    }

    /// Number of committed transitions to remember. Zero disables history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn build(self) -> Navigator<S> {
        Navigator::from_parts(
            self.backstack,
            self.listener,
            self.host,
            self.history_limit,
        )
    }
}

impl<S: Screen> Default for NavigatorBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
