//! Core navigation value types.
//!
//! This module contains the pure part of the navigator:
//! - Screen definitions via the `Screen` trait
//! - The immutable `Backstack` and its `BackstackBuilder`
//! - Bounded history of committed transitions
//!
//! Nothing in this module performs side effects or talks to a listener.

mod animator;
mod backstack;
mod history;
mod screen;

pub use animator::{Animator, TransitionAnimator};
pub use backstack::{Backstack, BackstackBuilder, Entry};
pub use history::{TransitionHistory, TransitionKind, TransitionRecord};
pub use screen::Screen;
