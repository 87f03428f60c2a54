//! Navigator that serializes navigation operations.
//!
//! Every operation becomes a [`Transition`] in a FIFO queue. Only the front
//! transition is active: it is planned against the committed backstack, the
//! listener is notified, and the new backstack is committed once the
//! listener completes the [`Completion`] it was given. Only then does the
//! next transition start.

use crate::core::{
    Animator, Backstack, Entry, Screen, TransitionHistory, TransitionKind, TransitionRecord,
};
use crate::error::NavigationError;
use crate::navigator::host::{ActivityResult, ActivityResultListener, Host, Intent, RequestCode};
use crate::navigator::listener::Listener;
use crate::navigator::transition::{Completion, Operation, Transition, TransitionId};
use chrono::Utc;
use log::{debug, trace, warn};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

pub(crate) struct Inner<S: Screen> {
    backstack: Backstack<S>,
    listener: Option<Rc<dyn Listener<S>>>,
    host: Option<Weak<dyn Host>>,
    active: Option<Transition<S>>,
    queue: VecDeque<Transition<S>>,
    history: TransitionHistory,
    result_listeners: HashMap<RequestCode, Box<dyn ActivityResultListener>>,
    next_request_code: RequestCode,
    next_transition_id: TransitionId,
    /// Set while `advance` is starting queued transitions
    draining: bool,
}

impl<S: Screen> Inner<S> {
    fn is_transitioning(&self) -> bool {
        self.active.as_ref().is_some_and(|t| !t.finished)
    }

    /// Whether a screen has been shown or is about to be.
    fn is_initialized(&self) -> bool {
        !self.backstack.is_empty() || self.active.is_some() || !self.queue.is_empty()
    }

    /// Entry the user is looking at: the target of the running transition,
    /// otherwise the committed top.
    fn shown_entry(&self) -> Option<Rc<Entry<S>>> {
        self.active
            .as_ref()
            .filter(|t| !t.finished)
            .and_then(|t| t.next_backstack.as_ref())
            .and_then(Backstack::current)
            .or_else(|| self.backstack.current())
            .cloned()
    }

    fn ensure_initialized(&self) -> Result<(), NavigationError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(NavigationError::NotInitialized)
        }
    }
}

/// Holds the committed backstack and exposes the operations that change it.
///
/// The navigator is single-threaded: it is neither `Send` nor `Sync`, and
/// all operations and completions must happen on the thread that owns it.
///
/// # Example
///
/// ```rust
/// use backstack::core::{Animator, Screen};
/// use backstack::navigator::{Completion, Listener, Navigator};
/// use backstack::screen_enum;
/// use std::rc::Rc;
///
/// screen_enum! {
///     enum Page {
///         Notes,
///         EditNote,
///     }
/// }
///
/// struct Immediate;
///
/// impl Listener<Page> for Immediate {
///     fn screen_pushed(&self, _: &Page) {}
///     fn screen_popped(&self, _: &Page) {}
///     fn forward(&self, _: &Page, _: Option<&Animator>, done: Completion<Page>) {
///         done.complete().unwrap();
///     }
///     fn backward(&self, _: &Page, _: Option<&Animator>, done: Completion<Page>) {
///         done.complete().unwrap();
///     }
///     fn replace(&self, _: &Page, _: Option<&Animator>, done: Completion<Page>) {
///         done.complete().unwrap();
///     }
/// }
///
/// let navigator = Navigator::<Page>::new();
/// navigator.set_listener(Some(Rc::new(Immediate)));
///
/// navigator.start_with(Page::Notes, None).unwrap();
/// navigator.go_to(Page::EditNote, None).unwrap();
/// assert_eq!(navigator.backstack().len(), 2);
///
/// assert!(navigator.go_back().unwrap());
/// assert_eq!(navigator.backstack().current_screen(), Some(&Page::Notes));
/// ```
pub struct Navigator<S: Screen> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S: Screen> Default for Navigator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Screen> Navigator<S> {
    /// Create a navigator with an empty backstack and no listener or host.
    pub fn new() -> Self {
        Self::from_parts(
            Backstack::empty(),
            None,
            None,
            TransitionHistory::DEFAULT_LIMIT,
        )
    }

    pub(crate) fn from_parts(
        backstack: Backstack<S>,
        listener: Option<Rc<dyn Listener<S>>>,
        host: Option<Weak<dyn Host>>,
        history_limit: usize,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                backstack,
                listener,
                host,
                active: None,
                queue: VecDeque::new(),
                history: TransitionHistory::with_limit(history_limit),
                result_listeners: HashMap::new(),
                next_request_code: 0,
                next_transition_id: 0,
                draining: false,
            })),
        }
    }

    /// The committed backstack.
    pub fn backstack(&self) -> Backstack<S> {
        self.inner.borrow().backstack.clone()
    }

    /// Whether a transition is waiting for its completion.
    pub fn is_transitioning(&self) -> bool {
        self.inner.borrow().is_transitioning()
    }

    /// Number of operations queued behind the active transition.
    pub fn pending_transitions(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Transitions committed so far, oldest first.
    pub fn history(&self) -> TransitionHistory {
        self.inner.borrow().history.clone()
    }

    pub fn set_listener(&self, listener: Option<Rc<dyn Listener<S>>>) {
        self.inner.borrow_mut().listener = listener;
    }

    /// Set the host used to start activities. Only a weak reference is kept.
    pub fn set_host(&self, host: Option<&Rc<dyn Host>>) {
        self.inner.borrow_mut().host = host.map(Rc::downgrade);
    }

    /// Show the first screen, keeping `animator` with its entry.
    ///
    /// Ignored unless the backstack is empty and no operation has been
    /// issued yet.
    pub fn start_with(&self, screen: S, animator: Option<Animator>) -> Result<(), NavigationError> {
        self.start_with_backstack(Backstack::single(screen, animator))
    }

    /// Show a whole initial backstack, pushing its screens bottom to top.
    ///
    /// Ignored unless the backstack is empty and no operation has been
    /// issued yet.
    pub fn start_with_backstack(&self, backstack: Backstack<S>) -> Result<(), NavigationError> {
        if backstack.is_empty() {
            return Err(NavigationError::EmptyBackstack);
        }
        if self.inner.borrow().is_initialized() {
            debug!("start_with ignored, navigator already initialized");
            return Ok(());
        }
        self.submit(Operation::StartWith(backstack))
    }

    /// Push `screen` onto the backstack.
    pub fn go_to(&self, screen: S, animator: Option<Animator>) -> Result<(), NavigationError> {
        self.inner.borrow().ensure_initialized()?;
        self.submit(Operation::GoTo { screen, animator })
    }

    /// Show the current screen again without changing the backstack.
    pub fn show_current(&self) -> Result<(), NavigationError> {
        self.inner.borrow().ensure_initialized()?;
        self.submit(Operation::ShowCurrent)
    }

    /// Pop the backstack until `screen` is on top.
    ///
    /// Entries above the closest match are popped and the matching entry is
    /// kept as is. If `screen` is not on the backstack it is pushed instead.
    /// Does nothing if `screen` is already current.
    pub fn pop_to(&self, screen: S, animator: Option<Animator>) -> Result<(), NavigationError> {
        self.inner.borrow().ensure_initialized()?;
        self.submit(Operation::PopTo { screen, animator })
    }

    /// Pop to whichever candidate is closest to the top.
    ///
    /// When its turn comes, the candidates are reduced with
    /// [`Backstack::resolve_pop_target`] against the backstack of that moment
    /// and the result is handled like [`pop_to`](Self::pop_to).
    pub fn pop_to_any(
        &self,
        candidates: &[S],
        animator: Option<Animator>,
    ) -> Result<(), NavigationError> {
        self.inner.borrow().ensure_initialized()?;
        if candidates.is_empty() {
            return Err(NavigationError::NoCandidates);
        }
        self.submit(Operation::PopToAny {
            candidates: candidates.to_vec(),
            animator,
        })
    }

    /// Replace the current screen with `screen`.
    pub fn replace_with(&self, screen: S, animator: Option<Animator>) -> Result<(), NavigationError> {
        self.inner.borrow().ensure_initialized()?;
        self.submit(Operation::ReplaceWith { screen, animator })
    }

    /// Pop the current screen. Does nothing if it is the last one.
    ///
    /// Returns whether a transition will actually run.
    pub fn go_back(&self) -> Result<bool, NavigationError> {
        let can_go_back = {
            let inner = self.inner.borrow();
            inner.ensure_initialized()?;
            inner.backstack.len() > 1 || inner.is_transitioning()
        };
        self.submit(Operation::GoBack)?;
        Ok(can_go_back)
    }

    /// Let the shown screen consume a back press, otherwise go back.
    ///
    /// While a transition runs, the screen it is moving to is asked. The
    /// entry itself is asked, not a copy, so it may change its own state.
    /// Returns `false` when the press was not handled.
    pub fn handle_back(&self) -> Result<bool, NavigationError> {
        let (shown, initialized) = {
            let inner = self.inner.borrow();
            (inner.shown_entry(), inner.is_initialized())
        };
        if shown.is_some_and(|entry| entry.screen.on_back_pressed()) {
            return Ok(true);
        }
        if !initialized {
            return Ok(false);
        }
        self.go_back()
    }

    /// Replace the whole backstack, moving forward to its top.
    pub fn forward(&self, backstack: Backstack<S>) -> Result<(), NavigationError> {
        self.submit_wholesale(Operation::Forward, backstack)
    }

    /// Replace the whole backstack, moving backward to its top.
    pub fn backward(&self, backstack: Backstack<S>) -> Result<(), NavigationError> {
        self.submit_wholesale(Operation::Backward, backstack)
    }

    /// Replace the whole backstack, replacing the current screen with its top.
    pub fn replace(&self, backstack: Backstack<S>) -> Result<(), NavigationError> {
        self.submit_wholesale(Operation::Replace, backstack)
    }

    fn submit_wholesale(
        &self,
        operation: fn(Backstack<S>) -> Operation<S>,
        backstack: Backstack<S>,
    ) -> Result<(), NavigationError> {
        self.inner.borrow().ensure_initialized()?;
        if backstack.is_empty() {
            return Err(NavigationError::EmptyBackstack);
        }
        self.submit(operation(backstack))
    }

    fn host(&self) -> Result<Rc<dyn Host>, NavigationError> {
        self.inner
            .borrow()
            .host
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(NavigationError::NoHost)
    }

    /// Whether the host can handle `intent`. `false` without a host.
    pub fn can_start(&self, intent: &Intent) -> bool {
        self.host().is_ok_and(|host| host.can_start(intent))
    }

    pub fn start_activity(&self, intent: &Intent) -> Result<(), NavigationError> {
        let host = self.host()?;
        host.start_activity(intent);
        Ok(())
    }

    /// Start an activity and register `listener` for its result.
    ///
    /// Returns the request code the host must report the result with.
    pub fn start_activity_for_result<L>(
        &self,
        intent: &Intent,
        listener: L,
    ) -> Result<RequestCode, NavigationError>
    where
        L: ActivityResultListener + 'static,
    {
        let host = self.host()?;
        let request_code = {
            let mut inner = self.inner.borrow_mut();
            let request_code = inner.next_request_code;
            inner.next_request_code = request_code.wrapping_add(1);
            inner
                .result_listeners
                .insert(request_code, Box::new(listener));
            request_code
        };
        debug!("starting activity '{}' for result {request_code}", intent.action);
        host.start_activity_for_result(intent, request_code);
        Ok(request_code)
    }

    /// Deliver an activity result to the listener registered for
    /// `request_code`, then forget that listener.
    pub fn on_activity_result(
        &self,
        request_code: RequestCode,
        result: ActivityResult,
    ) -> Result<(), NavigationError> {
        let listener = self
            .inner
            .borrow_mut()
            .result_listeners
            .remove(&request_code);
        match listener {
            Some(listener) => {
                listener.on_activity_result(result);
                Ok(())
            }
            None => {
                warn!("activity result for unknown request code {request_code}");
                Err(NavigationError::UnknownRequestCode(request_code))
            }
        }
    }

    fn submit(&self, operation: Operation<S>) -> Result<(), NavigationError> {
        {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_transition_id;
            inner.next_transition_id += 1;
            if inner.is_transitioning() {
                debug!(
                    "queueing transition {id} behind {} others",
                    inner.queue.len() + 1
                );
            }
            inner.queue.push_back(Transition::new(id, operation));
        }
        advance(&self.inner)
    }
}

/// Start queued transitions until one waits for its completion.
///
/// Re-entrant calls, from a listener completing synchronously, return at
/// once and leave the work to the outer loop.
fn advance<S: Screen>(navigator: &Rc<RefCell<Inner<S>>>) -> Result<(), NavigationError> {
    {
        let mut inner = navigator.borrow_mut();
        if inner.draining {
            return Ok(());
        }
        inner.draining = true;
    }
    let result = drain(navigator);
    navigator.borrow_mut().draining = false;
    result
}

fn drain<S: Screen>(navigator: &Rc<RefCell<Inner<S>>>) -> Result<(), NavigationError> {
    loop {
        let (id, operation, current) = {
            let mut inner = navigator.borrow_mut();
            if inner.is_transitioning() {
                return Ok(());
            }
            let Some(transition) = inner.queue.pop_front() else {
                return Ok(());
            };
            let id = transition.id;
            let operation = transition.operation.clone();
            inner.active = Some(transition);
            (id, operation, inner.backstack.clone())
        };

        debug!("starting transition {id}: {operation:?}");
        match execute(navigator, id, &operation, &current) {
            Ok(Step::Unchanged) => commit(navigator, id)?,
            Ok(Step::Notified) => {}
            Err(error) => {
                warn!("transition {id} abandoned: {error}");
                let mut inner = navigator.borrow_mut();
                if inner
                    .active
                    .as_ref()
                    .is_some_and(|t| t.id == id && !t.finished)
                {
                    inner.active = None;
                }
                return Err(error);
            }
        }
    }
}

/// What `execute` left the active transition waiting for.
enum Step {
    /// Nothing to show; the transition completes itself
    Unchanged,
    /// The listener holds the completion
    Notified,
}

fn execute<S: Screen>(
    navigator: &Rc<RefCell<Inner<S>>>,
    id: TransitionId,
    operation: &Operation<S>,
    current: &Backstack<S>,
) -> Result<Step, NavigationError> {
    let plan = operation.plan(current)?;
    let Some(change) = plan.change else {
        return Ok(Step::Unchanged);
    };
    let screen = change
        .backstack
        .current_screen()
        .cloned()
        .ok_or(NavigationError::EmptyBackstack)?;
    let listener = navigator
        .borrow()
        .listener
        .clone()
        .ok_or(NavigationError::NoListener)?;

    for popped in &plan.popped {
        trace!("screen popped: {}", popped.name());
        listener.screen_popped(popped);
    }
    for pushed in &plan.pushed {
        trace!("screen pushed: {}", pushed.name());
        listener.screen_pushed(pushed);
    }

    {
        let mut inner = navigator.borrow_mut();
        if let Some(active) = inner.active.as_mut().filter(|t| t.id == id) {
            active.kind = Some(change.kind);
            active.next_backstack = Some(change.backstack);
        }
    }

    trace!("{} to {}", change.kind, screen.name());
    let completion = Completion::new(Rc::downgrade(navigator), id);
    let animator = change.animator.as_ref();
    match change.kind {
        TransitionKind::Forward => listener.forward(&screen, animator, completion),
        TransitionKind::Backward => listener.backward(&screen, animator, completion),
        TransitionKind::Replace => listener.replace(&screen, animator, completion),
    }
    Ok(Step::Notified)
}

/// Commit transition `id` and start the next queued one.
pub(crate) fn finish<S: Screen>(
    navigator: &Rc<RefCell<Inner<S>>>,
    id: TransitionId,
) -> Result<(), NavigationError> {
    commit(navigator, id)?;
    advance(navigator)
}

/// Mark transition `id` finished and commit its backstack, if it has one.
fn commit<S: Screen>(
    navigator: &Rc<RefCell<Inner<S>>>,
    id: TransitionId,
) -> Result<(), NavigationError> {
    let mut guard = navigator.borrow_mut();
    let inner = &mut *guard;
    let Some(active) = inner
        .active
        .as_mut()
        .filter(|t| t.id == id && !t.finished)
    else {
        return Err(NavigationError::TransitionAlreadyCompleted);
    };
    active.finished = true;

    if let (Some(next), Some(kind)) = (active.next_backstack.take(), active.kind) {
        let record = TransitionRecord {
            kind,
            from: inner
                .backstack
                .current_screen()
                .map(|screen| screen.name().to_string()),
            to: next
                .current_screen()
                .map(|screen| screen.name().to_string())
                .unwrap_or_default(),
            depth: next.len(),
            timestamp: Utc::now(),
        };
        inner.history.push(record);
        inner.backstack = next;
    }
    debug!(
        "transition {id} finished, backstack depth {}",
        inner.backstack.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionAnimator;
    use crate::navigator::host::ResultCode;
    use std::cell::Cell;

    crate::screen_enum! {
        enum TestScreen {
            A,
            B,
            C,
            D,
            Drawer,
        }
        consumes_back: [Drawer]
    }

    use TestScreen::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Pushed(TestScreen),
        Popped(TestScreen),
        Forward(TestScreen),
        Backward(TestScreen),
        Replace(TestScreen),
    }

    #[derive(Debug)]
    struct Slide;

    impl TransitionAnimator for Slide {
        fn name(&self) -> &str {
            "slide"
        }
    }

    /// Records every notification. Completes immediately unless deferred.
    #[derive(Default)]
    struct Recording {
        deferred: Cell<bool>,
        events: RefCell<Vec<Event>>,
        animators: RefCell<Vec<Option<String>>>,
        pending: RefCell<VecDeque<Completion<TestScreen>>>,
    }

    impl Recording {
        fn deferred() -> Self {
            let recording = Self::default();
            recording.deferred.set(true);
            recording
        }

        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        fn clear(&self) {
            self.events.borrow_mut().clear();
            self.animators.borrow_mut().clear();
        }

        fn take_completion(&self) -> Completion<TestScreen> {
            self.pending
                .borrow_mut()
                .pop_front()
                .expect("a transition should be waiting")
        }

        fn flush(&self) {
            loop {
                let next = self.pending.borrow_mut().pop_front();
                match next {
                    Some(completion) => completion.complete().unwrap(),
                    None => break,
                }
            }
        }

        fn transition(
            &self,
            event: Event,
            animator: Option<&Animator>,
            completion: Completion<TestScreen>,
        ) {
            self.events.borrow_mut().push(event);
            self.animators
                .borrow_mut()
                .push(animator.map(|a| a.name().to_string()));
            if self.deferred.get() {
                self.pending.borrow_mut().push_back(completion);
            } else {
                completion.complete().unwrap();
            }
        }
    }

    impl Listener<TestScreen> for Recording {
        fn screen_pushed(&self, screen: &TestScreen) {
            self.events.borrow_mut().push(Event::Pushed(*screen));
        }

        fn screen_popped(&self, screen: &TestScreen) {
            self.events.borrow_mut().push(Event::Popped(*screen));
        }

        fn forward(&self, screen: &TestScreen, animator: Option<&Animator>, done: Completion<TestScreen>) {
            self.transition(Event::Forward(*screen), animator, done);
        }

        fn backward(&self, screen: &TestScreen, animator: Option<&Animator>, done: Completion<TestScreen>) {
            self.transition(Event::Backward(*screen), animator, done);
        }

        fn replace(&self, screen: &TestScreen, animator: Option<&Animator>, done: Completion<TestScreen>) {
            self.transition(Event::Replace(*screen), animator, done);
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        started: RefCell<Vec<(String, Option<RequestCode>)>>,
    }

    impl Host for RecordingHost {
        fn start_activity(&self, intent: &Intent) {
            self.started.borrow_mut().push((intent.action.clone(), None));
        }

        fn start_activity_for_result(&self, intent: &Intent, request_code: RequestCode) {
            self.started
                .borrow_mut()
                .push((intent.action.clone(), Some(request_code)));
        }

        fn can_start(&self, intent: &Intent) -> bool {
            intent.action != "unsupported"
        }
    }

    fn with_listener(listener: Recording) -> (Navigator<TestScreen>, Rc<Recording>) {
        let listener = Rc::new(listener);
        let navigator = Navigator::<TestScreen>::new();
        navigator.set_listener(Some(listener.clone()));
        (navigator, listener)
    }

    fn started_with(screens: &[TestScreen]) -> (Navigator<TestScreen>, Rc<Recording>) {
        let (navigator, listener) = with_listener(Recording::default());
        navigator
            .start_with_backstack(Backstack::of(screens.iter().copied()))
            .unwrap();
        listener.clear();
        (navigator, listener)
    }

    #[test]
    fn start_with_shows_first_screen_once() {
        let (navigator, listener) = with_listener(Recording::default());

        navigator.start_with(A, None).unwrap();
        assert_eq!(listener.events(), vec![Event::Pushed(A), Event::Forward(A)]);
        assert_eq!(navigator.backstack(), Backstack::of([A]));

        navigator.start_with(B, None).unwrap();
        assert_eq!(listener.events().len(), 2);
        assert_eq!(navigator.backstack(), Backstack::of([A]));
    }

    #[test]
    fn start_with_keeps_animator_on_first_entry() {
        let (navigator, listener) = with_listener(Recording::default());
        let slide: Animator = Rc::new(Slide);

        navigator.start_with(A, Some(slide.clone())).unwrap();

        assert_eq!(*listener.animators.borrow(), vec![Some("slide".to_string())]);
        let backstack = navigator.backstack();
        let animator = backstack.current().and_then(|entry| entry.animator.as_ref());
        assert!(animator.is_some_and(|animator| Rc::ptr_eq(animator, &slide)));
    }

    #[test]
    fn start_with_backstack_pushes_bottom_to_top() {
        let (navigator, listener) = with_listener(Recording::default());

        navigator.start_with_backstack(Backstack::of([A, B])).unwrap();

        assert_eq!(
            listener.events(),
            vec![Event::Pushed(A), Event::Pushed(B), Event::Forward(B)]
        );
        assert_eq!(navigator.backstack(), Backstack::of([A, B]));
    }

    #[test]
    fn start_with_empty_backstack_fails() {
        let (navigator, _) = with_listener(Recording::default());
        assert_eq!(
            navigator.start_with_backstack(Backstack::empty()),
            Err(NavigationError::EmptyBackstack)
        );
    }

    #[test]
    fn start_without_listener_fails_and_can_be_retried() {
        let navigator = Navigator::<TestScreen>::new();

        assert_eq!(navigator.start_with(A, None), Err(NavigationError::NoListener));
        assert!(navigator.backstack().is_empty());
        assert!(!navigator.is_transitioning());

        let listener = Rc::new(Recording::default());
        navigator.set_listener(Some(listener.clone()));
        navigator.start_with(A, None).unwrap();

        assert_eq!(navigator.backstack(), Backstack::of([A]));
    }

    #[test]
    fn operations_before_start_are_rejected() {
        let (navigator, listener) = with_listener(Recording::default());
        let not_initialized = Err(NavigationError::NotInitialized);

        assert_eq!(navigator.go_to(A, None), not_initialized);
        assert_eq!(navigator.show_current(), not_initialized);
        assert_eq!(navigator.pop_to(A, None), not_initialized);
        assert_eq!(navigator.pop_to_any(&[A], None), not_initialized);
        assert_eq!(navigator.replace_with(A, None), not_initialized);
        assert_eq!(navigator.go_back(), Err(NavigationError::NotInitialized));
        assert_eq!(navigator.forward(Backstack::of([A])), not_initialized);
        assert_eq!(navigator.backward(Backstack::of([A])), not_initialized);
        assert_eq!(navigator.replace(Backstack::of([A])), not_initialized);
        assert_eq!(navigator.handle_back(), Ok(false));

        assert!(listener.events().is_empty());
    }

    #[test]
    fn go_to_pushes_and_moves_forward() {
        let (navigator, listener) = started_with(&[A]);

        navigator.go_to(B, None).unwrap();

        assert_eq!(listener.events(), vec![Event::Pushed(B), Event::Forward(B)]);
        assert_eq!(navigator.backstack(), Backstack::of([A, B]));
    }

    #[test]
    fn pop_to_keeps_the_original_entry() {
        let (navigator, listener) = started_with(&[A, B, C]);
        let original = navigator.backstack().entries().nth(1).unwrap().clone();

        navigator.pop_to(B, None).unwrap();

        assert_eq!(listener.events(), vec![Event::Popped(C), Event::Backward(B)]);
        let backstack = navigator.backstack();
        assert_eq!(backstack, Backstack::of([A, B]));
        assert!(Rc::ptr_eq(backstack.current().unwrap(), &original));
    }

    #[test]
    fn pop_to_missing_screen_pushes_it() {
        let (navigator, listener) = started_with(&[A, B, C]);

        navigator.pop_to(D, None).unwrap();

        assert_eq!(listener.events(), vec![Event::Pushed(D), Event::Forward(D)]);
        assert_eq!(navigator.backstack(), Backstack::of([A, B, C, D]));
    }

    #[test]
    fn pop_to_current_screen_does_nothing() {
        let (navigator, listener) = started_with(&[A, B]);

        navigator.pop_to(B, None).unwrap();

        assert!(listener.events().is_empty());
        assert!(!navigator.is_transitioning());
        assert_eq!(navigator.backstack(), Backstack::of([A, B]));
    }

    #[test]
    fn pop_to_any_picks_closest_candidate() {
        let (navigator, listener) = started_with(&[A, B, C, D]);

        navigator.pop_to_any(&[B, C], None).unwrap();

        assert_eq!(listener.events(), vec![Event::Popped(D), Event::Backward(C)]);
        assert_eq!(navigator.backstack(), Backstack::of([A, B, C]));
        assert_eq!(
            navigator.pop_to_any(&[], None),
            Err(NavigationError::NoCandidates)
        );
    }

    #[test]
    fn replace_with_pops_then_pushes() {
        let (navigator, listener) = started_with(&[A, B]);

        navigator.replace_with(C, None).unwrap();

        assert_eq!(
            listener.events(),
            vec![Event::Popped(B), Event::Pushed(C), Event::Replace(C)]
        );
        assert_eq!(navigator.backstack(), Backstack::of([A, C]));
    }

    #[test]
    fn show_current_only_notifies_forward() {
        let (navigator, listener) = started_with(&[A, B]);

        navigator.show_current().unwrap();

        assert_eq!(listener.events(), vec![Event::Forward(B)]);
        assert_eq!(navigator.backstack(), Backstack::of([A, B]));
    }

    #[test]
    fn go_back_on_last_screen_is_noop() {
        let (navigator, listener) = started_with(&[A]);

        assert!(!navigator.go_back().unwrap());
        assert!(listener.events().is_empty());
        assert_eq!(navigator.backstack(), Backstack::of([A]));
    }

    #[test]
    fn go_back_pops_current_screen() {
        let (navigator, listener) = started_with(&[A, B]);

        assert!(navigator.go_back().unwrap());
        assert_eq!(listener.events(), vec![Event::Popped(B), Event::Backward(A)]);
        assert_eq!(navigator.backstack(), Backstack::of([A]));
    }

    #[test]
    fn handle_back_lets_screen_consume_the_press() {
        let (navigator, listener) = started_with(&[A, Drawer]);

        assert!(navigator.handle_back().unwrap());
        assert!(listener.events().is_empty());
        assert_eq!(navigator.backstack(), Backstack::of([A, Drawer]));

        navigator.replace_with(B, None).unwrap();
        listener.clear();
        assert!(navigator.handle_back().unwrap());
        assert_eq!(navigator.backstack(), Backstack::of([A]));
        assert!(!navigator.handle_back().unwrap());
    }

    #[derive(Clone, PartialEq, Debug)]
    enum Panel {
        Home,
        Drawer { open: Cell<bool> },
    }

    impl Screen for Panel {
        fn name(&self) -> &str {
            match self {
                Self::Home => "Home",
                Self::Drawer { .. } => "Drawer",
            }
        }

        fn on_back_pressed(&self) -> bool {
            match self {
                Self::Home => false,
                Self::Drawer { open } => open.replace(false),
            }
        }
    }

    struct Immediate;

    impl Listener<Panel> for Immediate {
        fn screen_pushed(&self, _: &Panel) {}
        fn screen_popped(&self, _: &Panel) {}
        fn forward(&self, _: &Panel, _: Option<&Animator>, done: Completion<Panel>) {
            done.complete().unwrap();
        }
        fn backward(&self, _: &Panel, _: Option<&Animator>, done: Completion<Panel>) {
            done.complete().unwrap();
        }
        fn replace(&self, _: &Panel, _: Option<&Animator>, done: Completion<Panel>) {
            done.complete().unwrap();
        }
    }

    #[test]
    fn handle_back_keeps_state_changed_by_the_screen() {
        let navigator = Navigator::<Panel>::new();
        navigator.set_listener(Some(Rc::new(Immediate)));
        navigator
            .start_with_backstack(Backstack::of([
                Panel::Home,
                Panel::Drawer {
                    open: Cell::new(true),
                },
            ]))
            .unwrap();

        assert!(navigator.handle_back().unwrap());
        assert_eq!(navigator.backstack().len(), 2);

        assert!(navigator.handle_back().unwrap());
        assert_eq!(navigator.backstack().current_screen(), Some(&Panel::Home));
        assert!(!navigator.handle_back().unwrap());
    }

    #[test]
    fn wholesale_changes_pop_everything_then_push_everything() {
        let (navigator, listener) = started_with(&[A, B]);

        navigator.forward(Backstack::of([C, D])).unwrap();
        assert_eq!(
            listener.events(),
            vec![
                Event::Popped(B),
                Event::Popped(A),
                Event::Pushed(C),
                Event::Pushed(D),
                Event::Forward(D),
            ]
        );

        listener.clear();
        navigator.backward(Backstack::of([A])).unwrap();
        assert_eq!(
            listener.events(),
            vec![Event::Popped(D), Event::Popped(C), Event::Pushed(A), Event::Backward(A)]
        );

        listener.clear();
        navigator.replace(Backstack::of([B])).unwrap();
        assert_eq!(
            listener.events(),
            vec![Event::Popped(A), Event::Pushed(B), Event::Replace(B)]
        );
        assert_eq!(navigator.backstack(), Backstack::of([B]));
        assert_eq!(
            navigator.forward(Backstack::empty()),
            Err(NavigationError::EmptyBackstack)
        );
    }

    #[test]
    fn animators_reach_the_listener() {
        let (navigator, listener) = started_with(&[A]);
        let slide: Animator = Rc::new(Slide);

        navigator.go_to(B, Some(slide.clone())).unwrap();
        navigator.go_back().unwrap();
        navigator.replace_with(C, None).unwrap();

        assert_eq!(
            *listener.animators.borrow(),
            vec![Some("slide".to_string()), Some("slide".to_string()), None]
        );
    }

    #[test]
    fn transitions_run_one_at_a_time_in_order() {
        let (navigator, listener) = with_listener(Recording::deferred());

        navigator.start_with(A, None).unwrap();
        navigator.go_to(B, None).unwrap();
        navigator.go_to(C, None).unwrap();

        assert!(navigator.is_transitioning());
        assert_eq!(navigator.pending_transitions(), 2);
        assert_eq!(listener.events(), vec![Event::Pushed(A), Event::Forward(A)]);
        assert!(navigator.backstack().is_empty());

        listener.take_completion().complete().unwrap();
        assert_eq!(navigator.backstack(), Backstack::of([A]));
        assert_eq!(navigator.pending_transitions(), 1);
        assert_eq!(listener.events().last(), Some(&Event::Forward(B)));

        listener.flush();
        assert!(!navigator.is_transitioning());
        assert_eq!(navigator.backstack(), Backstack::of([A, B, C]));
        assert_eq!(
            listener.events(),
            vec![
                Event::Pushed(A),
                Event::Forward(A),
                Event::Pushed(B),
                Event::Forward(B),
                Event::Pushed(C),
                Event::Forward(C),
            ]
        );
    }

    #[test]
    fn queued_operations_see_the_backstack_of_their_turn() {
        let (navigator, listener) = with_listener(Recording::deferred());

        navigator.start_with(A, None).unwrap();
        navigator.go_to(B, None).unwrap();
        navigator.pop_to(A, None).unwrap();
        listener.flush();

        assert_eq!(navigator.backstack(), Backstack::of([A]));
        assert_eq!(listener.events().last(), Some(&Event::Backward(A)));
    }

    #[test]
    fn pop_to_any_sees_the_backstack_of_its_turn() {
        let (navigator, listener) = with_listener(Recording::deferred());
        navigator.start_with_backstack(Backstack::of([A, B, C])).unwrap();
        listener.flush();

        navigator.go_to(D, None).unwrap();
        navigator.pop_to_any(&[D, B], None).unwrap();
        listener.flush();

        assert_eq!(navigator.backstack(), Backstack::of([A, B, C, D]));
        assert_eq!(listener.events().last(), Some(&Event::Forward(D)));
        assert!(!listener.events().contains(&Event::Popped(C)));
    }

    #[test]
    fn handle_back_asks_the_screen_being_shown() {
        let (navigator, listener) = with_listener(Recording::deferred());
        navigator.start_with(A, None).unwrap();
        listener.flush();

        navigator.go_to(Drawer, None).unwrap();
        assert!(navigator.handle_back().unwrap());
        assert_eq!(navigator.pending_transitions(), 0);

        listener.flush();
        assert_eq!(navigator.backstack(), Backstack::of([A, Drawer]));
    }

    #[test]
    fn many_queued_noops_complete_without_deep_recursion() {
        let (navigator, listener) = with_listener(Recording::deferred());
        navigator.start_with(A, None).unwrap();

        for _ in 0..10_000 {
            navigator.go_back().unwrap();
            navigator.pop_to(A, None).unwrap();
        }
        assert_eq!(navigator.pending_transitions(), 20_000);

        listener.take_completion().complete().unwrap();

        assert_eq!(navigator.pending_transitions(), 0);
        assert!(!navigator.is_transitioning());
        assert_eq!(navigator.backstack(), Backstack::of([A]));
        assert_eq!(listener.events(), vec![Event::Pushed(A), Event::Forward(A)]);
    }

    #[test]
    fn synchronous_completions_drain_queue_iteratively() {
        let (navigator, listener) = with_listener(Recording::deferred());
        navigator.start_with(A, None).unwrap();
        for _ in 0..5_000 {
            navigator.go_to(B, None).unwrap();
            navigator.go_back().unwrap();
        }

        listener.deferred.set(false);
        listener.take_completion().complete().unwrap();

        assert_eq!(navigator.pending_transitions(), 0);
        assert_eq!(navigator.backstack(), Backstack::of([A]));
        assert_eq!(listener.events().len(), 2 + 5_000 * 4);
    }

    #[test]
    fn stalled_transition_keeps_backstack_unchanged() {
        let (navigator, listener) = with_listener(Recording::deferred());
        navigator.start_with(A, None).unwrap();
        listener.flush();

        navigator.go_to(B, None).unwrap();
        assert_eq!(navigator.backstack(), Backstack::of([A]));

        // A back press while animating is reported as handled.
        assert!(navigator.go_back().unwrap());
        assert_eq!(navigator.backstack(), Backstack::of([A]));

        listener.flush();
        assert_eq!(navigator.backstack(), Backstack::of([A]));
        assert!(!navigator.is_transitioning());
    }

    #[test]
    fn completing_twice_is_rejected() {
        let (navigator, listener) = with_listener(Recording::deferred());
        navigator.start_with(A, None).unwrap();

        let completion = listener.take_completion();
        completion.complete().unwrap();

        assert_eq!(
            completion.complete(),
            Err(NavigationError::TransitionAlreadyCompleted)
        );
        assert_eq!(navigator.backstack(), Backstack::of([A]));
    }

    #[test]
    fn completing_after_navigator_dropped_fails() {
        let (navigator, listener) = with_listener(Recording::deferred());
        navigator.start_with(A, None).unwrap();
        let completion = listener.take_completion();

        drop(navigator);

        assert_eq!(completion.complete(), Err(NavigationError::NavigatorDropped));
    }

    #[test]
    fn history_records_committed_transitions() {
        let (navigator, _) = with_listener(Recording::default());

        navigator.start_with(A, None).unwrap();
        navigator.go_to(B, None).unwrap();
        navigator.go_back().unwrap();
        navigator.pop_to(A, None).unwrap();

        let history = navigator.history();
        assert_eq!(history.path(), vec!["A", "B", "A"]);
        let kinds: Vec<_> = history.records().map(|record| record.kind).collect();
        assert_eq!(
            kinds,
            vec![TransitionKind::Forward, TransitionKind::Forward, TransitionKind::Backward]
        );
        let last = history.last().unwrap();
        assert_eq!(last.from.as_deref(), Some("B"));
        assert_eq!(last.depth, 1);
    }

    #[test]
    fn host_operations_require_a_host() {
        let navigator = Navigator::<TestScreen>::new();
        let intent = Intent::new("camera");

        assert!(!navigator.can_start(&intent));
        assert_eq!(navigator.start_activity(&intent), Err(NavigationError::NoHost));
        assert_eq!(
            navigator.start_activity_for_result(&intent, |_: ActivityResult| {}),
            Err(NavigationError::NoHost)
        );
    }

    #[test]
    fn activity_results_reach_their_listener_once() {
        let recording = Rc::new(RecordingHost::default());
        let host: Rc<dyn Host> = recording.clone();
        let navigator = Navigator::<TestScreen>::new();
        navigator.set_host(Some(&host));

        assert!(navigator.can_start(&Intent::new("camera")));
        assert!(!navigator.can_start(&Intent::new("unsupported")));

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        let first = navigator
            .start_activity_for_result(&Intent::new("camera"), move |result: ActivityResult| {
                sink.borrow_mut().push(("camera", result.code))
            })
            .unwrap();
        let sink = received.clone();
        let second = navigator
            .start_activity_for_result(&Intent::new("contacts"), move |result: ActivityResult| {
                sink.borrow_mut().push(("contacts", result.code))
            })
            .unwrap();

        assert!(second > first);
        assert_eq!(
            *recording.started.borrow(),
            vec![
                ("camera".to_string(), Some(first)),
                ("contacts".to_string(), Some(second)),
            ]
        );

        navigator
            .on_activity_result(second, ActivityResult::new(ResultCode::Canceled, None))
            .unwrap();
        navigator
            .on_activity_result(first, ActivityResult::new(ResultCode::Ok, None))
            .unwrap();
        assert_eq!(
            *received.borrow(),
            vec![("contacts", ResultCode::Canceled), ("camera", ResultCode::Ok)]
        );

        assert_eq!(
            navigator.on_activity_result(first, ActivityResult::new(ResultCode::Ok, None)),
            Err(NavigationError::UnknownRequestCode(first))
        );
    }
}
