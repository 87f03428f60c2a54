//! Immutable screen history.
//!
//! A [`Backstack`] is never mutated once built. Every navigation operation
//! derives a [`BackstackBuilder`] from the current value and builds a new
//! one, leaving the source untouched.

use super::animator::Animator;
use super::screen::Screen;
use std::collections::VecDeque;
use std::rc::Rc;

/// A screen together with the animator it was pushed with.
///
/// Entries are shared between backstack snapshots through `Rc`, so an entry
/// that survives an operation is the same allocation before and after it.
#[derive(Debug)]
pub struct Entry<S: Screen> {
    /// The screen at this position
    pub screen: S,
    /// Animator to use when this entry is shown or popped
    pub animator: Option<Animator>,
}

impl<S: Screen> Entry<S> {
    pub fn new(screen: S, animator: Option<Animator>) -> Self {
        Self { screen, animator }
    }
}

/// Ordered, immutable history of screens. The top entry is the current one.
///
/// Entries are stored top-first. Cloning is cheap: clones share storage.
///
/// # Example
///
/// ```rust
/// use backstack::core::{Backstack, Screen};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Page { Home, List, Detail }
///
/// impl Screen for Page {
///     fn name(&self) -> &str {
///         match self {
///             Self::Home => "Home",
///             Self::List => "List",
///             Self::Detail => "Detail",
///         }
///     }
/// }
///
/// let backstack = Backstack::of([Page::Home, Page::List]);
///
/// let mut builder = backstack.build_upon();
/// builder.push(Page::Detail, None);
/// let next = builder.build();
///
/// assert_eq!(backstack.len(), 2); // Original unchanged
/// assert_eq!(next.current_screen(), Some(&Page::Detail));
/// assert_eq!(
///     next.iter().collect::<Vec<_>>(),
///     vec![&Page::Home, &Page::List, &Page::Detail]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Backstack<S: Screen> {
    entries: Rc<VecDeque<Rc<Entry<S>>>>,
}

impl<S: Screen> Default for Backstack<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Screen> Backstack<S> {
    /// Create an empty backstack.
    pub fn empty() -> Self {
        Self {
            entries: Rc::new(VecDeque::new()),
        }
    }

    /// Create a builder with no entries.
    pub fn empty_builder() -> BackstackBuilder<S> {
        BackstackBuilder::new()
    }

    /// Create a backstack holding a single screen.
    pub fn single(screen: S, animator: Option<Animator>) -> Self {
        let mut builder = BackstackBuilder::new();
        builder.push(screen, animator);
        builder.build()
    }

    /// Create a backstack from screens given bottom to top.
    pub fn of<I>(screens: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut builder = BackstackBuilder::new();
        for screen in screens {
            builder.push(screen, None);
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The top entry, or `None` when the backstack is empty.
    pub fn current(&self) -> Option<&Rc<Entry<S>>> {
        self.entries.front()
    }

    /// The top screen, or `None` when the backstack is empty.
    pub fn current_screen(&self) -> Option<&S> {
        self.current().map(|entry| &entry.screen)
    }

    /// Screens from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &S> + ExactSizeIterator + '_ {
        self.entries.iter().rev().map(|entry| &entry.screen)
    }

    /// Screens from top to bottom.
    pub fn iter_rev(&self) -> impl DoubleEndedIterator<Item = &S> + ExactSizeIterator + '_ {
        self.entries.iter().map(|entry| &entry.screen)
    }

    /// Entries from bottom to top.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Rc<Entry<S>>> + ExactSizeIterator + '_ {
        self.entries.iter().rev()
    }

    /// Entries from top to bottom.
    pub fn entries_rev(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Rc<Entry<S>>> + ExactSizeIterator + '_ {
        self.entries.iter()
    }

    /// Number of entries above the first match for `screen`, scanning from
    /// the top. `Some(0)` means `screen` is current.
    pub fn position_from_top(&self, screen: &S) -> Option<usize> {
        self.entries.iter().position(|entry| entry.screen == *screen)
    }

    pub fn contains(&self, screen: &S) -> bool {
        self.position_from_top(screen).is_some()
    }

    /// Reduce several pop-to candidates to a single target.
    ///
    /// The candidate closest to the top wins; on equal depth the later
    /// candidate wins. If none is on the backstack the first candidate is
    /// returned. Returns `None` only for an empty slice.
    pub fn resolve_pop_target<'a>(&self, candidates: &'a [S]) -> Option<&'a S> {
        let mut closest: Option<(usize, &'a S)> = None;
        for candidate in candidates {
            if let Some(depth) = self.position_from_top(candidate) {
                if closest.map_or(true, |(best, _)| depth <= best) {
                    closest = Some((depth, candidate));
                }
            }
        }

        closest
            .map(|(_, candidate)| candidate)
            .or_else(|| candidates.first())
    }

    /// Create a builder seeded with a copy of this backstack's entries.
    ///
    /// The entries themselves are shared, not cloned.
    pub fn build_upon(&self) -> BackstackBuilder<S> {
        BackstackBuilder {
            entries: (*self.entries).clone(),
        }
    }
}

/// Backstacks compare by their screens, bottom to top. Animators are ignored.
impl<S: Screen> PartialEq for Backstack<S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

/// Mutable staging area for a new [`Backstack`].
#[derive(Debug, Clone)]
pub struct BackstackBuilder<S: Screen> {
    entries: VecDeque<Rc<Entry<S>>>,
}

impl<S: Screen> Default for BackstackBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Screen> BackstackBuilder<S> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Push a new top entry.
    pub fn push(&mut self, screen: S, animator: Option<Animator>) -> &mut Self {
        self.push_entry(Rc::new(Entry::new(screen, animator)))
    }

    /// Push an existing entry, keeping its identity.
    pub fn push_entry(&mut self, entry: Rc<Entry<S>>) -> &mut Self {
        self.entries.push_front(entry);
        self
    }

    /// Remove and return the top entry, or `None` if there is nothing to pop.
    pub fn pop(&mut self) -> Option<Rc<Entry<S>>> {
        self.entries.pop_front()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot the staged entries. The builder stays usable afterwards.
    pub fn build(&self) -> Backstack<S> {
        Backstack {
            entries: Rc::new(self.entries.clone()),
        }
    }
}
