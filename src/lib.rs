//! Backstack: screen history and single-flight navigation transitions
//!
//! Backstack splits navigation into a pure core and an imperative shell.
//! The core is an immutable [`Backstack`](core::Backstack) of screens; the
//! shell is a [`Navigator`](navigator::Navigator) that turns operations such
//! as `go_to` or `pop_to` into ordered listener notifications and commits the
//! new backstack only once the rendering layer reports its animation done.
//!
//! # Core Concepts
//!
//! - **Screen**: anything navigable, via the `Screen` trait
//! - **Backstack**: immutable history, rebuilt for every change
//! - **Transitions**: queued strictly FIFO, exactly one in flight
//! - **Completion**: the rendering layer's exactly-once "animation finished"
//!
//! # Example
//!
//! ```rust
//! use backstack::core::{Animator, Backstack};
//! use backstack::navigator::{Completion, Listener, Navigator};
//! use backstack::screen_enum;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! screen_enum! {
//!     enum Page {
//!         Home,
//!         List,
//!         Detail,
//!     }
//! }
//!
//! // Holds completions until the "animation" ends.
//! #[derive(Default)]
//! struct Deferred {
//!     pending: RefCell<Vec<Completion<Page>>>,
//! }
//!
//! impl Listener<Page> for Deferred {
//!     fn screen_pushed(&self, _: &Page) {}
//!     fn screen_popped(&self, _: &Page) {}
//!     fn forward(&self, _: &Page, _: Option<&Animator>, done: Completion<Page>) {
//!         self.pending.borrow_mut().push(done);
//!     }
//!     fn backward(&self, _: &Page, _: Option<&Animator>, done: Completion<Page>) {
//!         self.pending.borrow_mut().push(done);
//!     }
//!     fn replace(&self, _: &Page, _: Option<&Animator>, done: Completion<Page>) {
//!         self.pending.borrow_mut().push(done);
//!     }
//! }
//!
//! let listener = Rc::new(Deferred::default());
//! let navigator = Navigator::<Page>::new();
//! navigator.set_listener(Some(listener.clone()));
//!
//! navigator.start_with(Page::Home, None).unwrap();
//! navigator.go_to(Page::List, None).unwrap(); // queued behind start_with
//! assert!(navigator.backstack().is_empty());
//!
//! loop {
//!     let next = listener.pending.borrow_mut().pop();
//!     match next {
//!         Some(done) => done.complete().unwrap(),
//!         None => break,
//!     }
//! }
//! assert_eq!(navigator.backstack(), Backstack::of([Page::Home, Page::List]));
//! # let _ = Page::Detail;
//! ```

pub mod builder;
pub mod core;
pub mod error;
pub mod navigator;

// Re-export commonly used types
pub use builder::NavigatorBuilder;
pub use crate::core::{Animator, Backstack, BackstackBuilder, Entry, Screen, TransitionAnimator, TransitionKind};
pub use error::NavigationError;
pub use navigator::{Completion, Listener, Navigator};
