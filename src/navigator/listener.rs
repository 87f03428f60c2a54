//! The rendering layer's side of the navigator.

use crate::core::{Animator, Screen};
use crate::navigator::transition::Completion;

/// Receives navigation notifications and performs the visual screen change.
///
/// `screen_pushed` and `screen_popped` are fire-and-forget. Each of
/// `forward`, `backward` and `replace` hands over a [`Completion`] that must
/// be completed exactly once, either before returning or later when the
/// animation ends. Until it is completed the new backstack is not committed
/// and every later operation waits in the queue.
///
/// The navigator holds no borrow while calling a listener, so
/// implementations may call back into it.
pub trait Listener<S: Screen> {
    /// A screen was added to the backstack.
    fn screen_pushed(&self, screen: &S);

    /// A screen was removed from the backstack.
    fn screen_popped(&self, screen: &S);

    /// Show `screen` as a step forward.
    fn forward(&self, screen: &S, animator: Option<&Animator>, completion: Completion<S>);

    /// Show `screen` as a step back.
    fn backward(&self, screen: &S, animator: Option<&Animator>, completion: Completion<S>);

    /// Show `screen` in place of the current one.
    fn replace(&self, screen: &S, animator: Option<&Animator>, completion: Completion<S>);
}
