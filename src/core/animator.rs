//! Opaque transition animator handles.

use std::fmt::Debug;
use std::rc::Rc;

/// An animation the rendering layer should use for a transition.
///
/// The navigator never runs animators itself. It stores them next to the
/// screen they were pushed with and hands them back to the
/// [`Listener`](crate::navigator::Listener).
pub trait TransitionAnimator: Debug {
    /// Name of the animation, for matching and logging.
    fn name(&self) -> &str;
}

/// Shared handle to an animator.
pub type Animator = Rc<dyn TransitionAnimator>;
