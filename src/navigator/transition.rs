//! Queued navigation operations and their completion handles.

use crate::core::{Animator, Backstack, Screen, TransitionKind};
use crate::error::NavigationError;
use crate::navigator::controller::{self, Inner};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Weak;

/// Monotonic identifier of a transition within one navigator.
pub type TransitionId = u64;

/// A navigation request, planned against whatever backstack is current when
/// it reaches the front of the queue.
#[derive(Clone, Debug)]
pub(crate) enum Operation<S: Screen> {
    StartWith(Backstack<S>),
    GoTo { screen: S, animator: Option<Animator> },
    ShowCurrent,
    PopTo { screen: S, animator: Option<Animator> },
    PopToAny { candidates: Vec<S>, animator: Option<Animator> },
    ReplaceWith { screen: S, animator: Option<Animator> },
    GoBack,
    Forward(Backstack<S>),
    Backward(Backstack<S>),
    Replace(Backstack<S>),
}

/// The listener calls an operation resolves to.
#[derive(Debug)]
pub(crate) struct Plan<S: Screen> {
    /// Screens to report popped, in order
    pub popped: Vec<S>,
    /// Screens to report pushed, in order
    pub pushed: Vec<S>,
    /// `None` when the operation is a no-op that completes itself
    pub change: Option<Change<S>>,
}

#[derive(Debug)]
pub(crate) struct Change<S: Screen> {
    pub kind: TransitionKind,
    pub backstack: Backstack<S>,
    pub animator: Option<Animator>,
}

impl<S: Screen> Plan<S> {
    fn noop() -> Self {
        Self {
            popped: Vec::new(),
            pushed: Vec::new(),
            change: None,
        }
    }

    fn wholesale(
        current: &Backstack<S>,
        next: &Backstack<S>,
        kind: TransitionKind,
    ) -> Result<Self, NavigationError> {
        let top = next.current().ok_or(NavigationError::EmptyBackstack)?;
        let animator = match kind {
            TransitionKind::Backward => None,
            TransitionKind::Forward | TransitionKind::Replace => top.animator.clone(),
        };

        Ok(Self {
            popped: current.iter_rev().cloned().collect(),
            pushed: next.iter().cloned().collect(),
            change: Some(Change {
                kind,
                backstack: next.clone(),
                animator,
            }),
        })
    }
}

impl<S: Screen> Operation<S> {
    /// Resolve this operation against `current` (pure).
    pub(crate) fn plan(&self, current: &Backstack<S>) -> Result<Plan<S>, NavigationError> {
        match self {
            Self::StartWith(backstack) => {
                Plan::wholesale(&Backstack::empty(), backstack, TransitionKind::Forward)
            }

            Self::GoTo { screen, animator } => {
                let next = current
                    .build_upon()
                    .push(screen.clone(), animator.clone())
                    .build();
                Ok(Plan {
                    popped: Vec::new(),
                    pushed: vec![screen.clone()],
                    change: Some(Change {
                        kind: TransitionKind::Forward,
                        backstack: next,
                        animator: animator.clone(),
                    }),
                })
            }

            Self::ShowCurrent => {
                let Some(top) = current.current() else {
                    return Ok(Plan::noop());
                };
                Ok(Plan {
                    popped: Vec::new(),
                    pushed: Vec::new(),
                    change: Some(Change {
                        kind: TransitionKind::Forward,
                        animator: top.animator.clone(),
                        backstack: current.clone(),
                    }),
                })
            }

            Self::PopTo { screen, animator } => Ok(plan_pop_to(current, screen, animator)),

            Self::PopToAny { candidates, animator } => {
                let target = current
                    .resolve_pop_target(candidates)
                    .ok_or(NavigationError::NoCandidates)?;
                Ok(plan_pop_to(current, target, animator))
            }

            Self::ReplaceWith { screen, animator } => {
                let mut builder = current.build_upon();
                let replaced = builder.pop().ok_or(NavigationError::EmptyBackstack)?;
                builder.push(screen.clone(), animator.clone());
                Ok(Plan {
                    popped: vec![replaced.screen.clone()],
                    pushed: vec![screen.clone()],
                    change: Some(Change {
                        kind: TransitionKind::Replace,
                        backstack: builder.build(),
                        animator: animator.clone(),
                    }),
                })
            }

            Self::GoBack => {
                if current.len() <= 1 {
                    return Ok(Plan::noop());
                }
                let mut builder = current.build_upon();
                let popped = builder.pop().ok_or(NavigationError::EmptyBackstack)?;
                Ok(Plan {
                    popped: vec![popped.screen.clone()],
                    pushed: Vec::new(),
                    change: Some(Change {
                        kind: TransitionKind::Backward,
                        backstack: builder.build(),
                        animator: popped.animator.clone(),
                    }),
                })
            }

            Self::Forward(next) => Plan::wholesale(current, next, TransitionKind::Forward),
            Self::Backward(next) => Plan::wholesale(current, next, TransitionKind::Backward),
            Self::Replace(next) => Plan::wholesale(current, next, TransitionKind::Replace),
        }
    }
}

fn plan_pop_to<S: Screen>(
    current: &Backstack<S>,
    screen: &S,
    animator: &Option<Animator>,
) -> Plan<S> {
    match current.position_from_top(screen) {
        Some(0) => Plan::noop(),
        Some(depth) => {
            // The found entry stays in place so the original instance survives.
            let mut builder = current.build_upon();
            let mut popped = Vec::with_capacity(depth);
            for _ in 0..depth {
                if let Some(entry) = builder.pop() {
                    popped.push(entry.screen.clone());
                }
            }
            Plan {
                popped,
                pushed: Vec::new(),
                change: Some(Change {
                    kind: TransitionKind::Backward,
                    backstack: builder.build(),
                    animator: animator.clone(),
                }),
            }
        }
        None => Plan {
            popped: Vec::new(),
            pushed: vec![screen.clone()],
            change: Some(Change {
                kind: TransitionKind::Forward,
                backstack: current
                    .build_upon()
                    .push(screen.clone(), animator.clone())
                    .build(),
                animator: animator.clone(),
            }),
        },
    }
}

/// One entry of the navigator's FIFO.
#[derive(Debug)]
pub(crate) struct Transition<S: Screen> {
    pub id: TransitionId,
    pub operation: Operation<S>,
    pub finished: bool,
    /// Kind notified to the listener, once executed
    pub kind: Option<TransitionKind>,
    /// Backstack to commit on completion
    pub next_backstack: Option<Backstack<S>>,
}

impl<S: Screen> Transition<S> {
    pub(crate) fn new(id: TransitionId, operation: Operation<S>) -> Self {
        Self {
            id,
            operation,
            finished: false,
            kind: None,
            next_backstack: None,
        }
    }
}

/// Handle the listener uses to report that a transition's animation ended.
///
/// Completing commits the transition's backstack and starts the next queued
/// transition before returning. A second call returns
/// [`NavigationError::TransitionAlreadyCompleted`].
pub struct Completion<S: Screen> {
    navigator: Weak<RefCell<Inner<S>>>,
    id: TransitionId,
    completed: Cell<bool>,
}

impl<S: Screen> Completion<S> {
    pub(crate) fn new(navigator: Weak<RefCell<Inner<S>>>, id: TransitionId) -> Self {
        Self {
            navigator,
            id,
            completed: Cell::new(false),
        }
    }

    /// The transition this handle completes.
    pub fn transition_id(&self) -> TransitionId {
        self.id
    }

    pub fn complete(&self) -> Result<(), NavigationError> {
        if self.completed.replace(true) {
            return Err(NavigationError::TransitionAlreadyCompleted);
        }
        let navigator = self
            .navigator
            .upgrade()
            .ok_or(NavigationError::NavigatorDropped)?;
        controller::finish(&navigator, self.id)
    }
}

impl<S: Screen> fmt::Debug for Completion<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("id", &self.id)
            .field("completed", &self.completed.get())
            .finish()
    }
}
