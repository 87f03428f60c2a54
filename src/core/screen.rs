//! Core Screen trait for navigable screens.
//!
//! A screen is an opaque value the navigator stores and compares. Rendering,
//! view state and lifecycle belong to the listener, not to this trait.

use std::fmt::Debug;

/// Trait for screens held in a [`Backstack`](crate::core::Backstack).
///
/// Screens are compared with `PartialEq` when the navigator looks one up
/// (see [`Navigator::pop_to`](crate::navigator::Navigator::pop_to)). Types
/// that need identity semantics can implement `PartialEq` with
/// `Rc::ptr_eq`.
///
/// # Required Traits
///
/// - `Clone`: screens are handed to the listener by reference and copied into
///   new backstacks when pushed
/// - `PartialEq`: lookup by value for pop-to
/// - `Debug`: diagnostics and logging
///
/// # Example
///
/// ```rust
/// use backstack::core::Screen;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum AppScreen {
///     Notes,
///     EditNote { id: u64 },
/// }
///
/// impl Screen for AppScreen {
///     fn name(&self) -> &str {
///         match self {
///             Self::Notes => "Notes",
///             Self::EditNote { .. } => "EditNote",
///         }
///     }
/// }
///
/// assert_eq!(AppScreen::EditNote { id: 3 }.name(), "EditNote");
/// assert!(!AppScreen::Notes.on_back_pressed());
/// ```
pub trait Screen: Clone + PartialEq + Debug + 'static {
    /// Get the screen's name for display/logging.
    fn name(&self) -> &str;

    /// Give the screen a chance to consume a back press.
    ///
    /// Returning `true` stops [`Navigator::handle_back`](crate::navigator::Navigator::handle_back)
    /// from popping the backstack.
    ///
    /// Default implementation returns `false`.
    fn on_back_pressed(&self) -> bool {
        false
    }
}
