//! Committed transition history.
//!
//! Provides immutable tracking of the transitions a navigator has committed,
//! following functional programming principles. Records hold screen names
//! rather than screens so they serialize regardless of the screen type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Direction of a screen change, as signalled to the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    Forward,
    Backward,
    Replace,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Replace => "replace",
        };
        f.write_str(name)
    }
}

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use backstack::core::{TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     kind: TransitionKind::Forward,
///     from: Some("Notes".to_string()),
///     to: "EditNote".to_string(),
///     depth: 2,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.kind, TransitionKind::Forward);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Direction of the transition
    pub kind: TransitionKind,
    /// Name of the screen that was current before, if any
    pub from: Option<String>,
    /// Name of the screen that is current after
    pub to: String,
    /// Backstack size after the commit
    pub depth: usize,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of committed transitions.
///
/// History is immutable - the `record` method returns a new history with
/// the transition added. Once `limit` records are held, the oldest one is
/// dropped for every new record. A limit of zero keeps nothing.
///
/// # Example
///
/// ```rust
/// use backstack::core::{TransitionHistory, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let history = TransitionHistory::with_limit(2);
/// let record = |to: &str| TransitionRecord {
///     kind: TransitionKind::Forward,
///     from: None,
///     to: to.to_string(),
///     depth: 1,
///     timestamp: Utc::now(),
/// };
///
/// let history = history.record(record("A")).record(record("B")).record(record("C"));
///
/// assert_eq!(history.path(), vec!["B", "C"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: VecDeque<TransitionRecord>,
    limit: usize,
}

impl TransitionHistory {
    /// Default number of records kept by a navigator.
    pub const DEFAULT_LIMIT: usize = 64;

    /// Create an empty history with the default limit.
    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut history = self.clone();
        history.push(record);
        history
    }

    /// Append in place, dropping the oldest record once `limit` is reached.
    pub(crate) fn push(&mut self, record: TransitionRecord) {
        if self.limit == 0 {
            return;
        }
        if self.records.len() == self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Names of the screens transitioned to, oldest first.
    pub fn path(&self) -> Vec<&str> {
        self.records.iter().map(|record| record.to.as_str()).collect()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Records in commit order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for TransitionHistory {
    fn default() -> Self {
        Self::new()
    }
}
