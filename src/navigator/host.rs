//! Host capability for leaving the navigator's screens.
//!
//! The host is whatever owns the window the navigator renders into. The
//! navigator only keeps a weak reference to it, so a torn-down host is
//! treated the same as a missing one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Correlates a result with the request that started it.
pub type RequestCode = u32;

/// Description of an external activity to start.
///
/// # Example
///
/// ```rust
/// use backstack::navigator::Intent;
///
/// let intent = Intent::new("pick_contact").with_extra("filter", "starred");
/// assert_eq!(intent.extra("filter"), Some("starred"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub action: String,
    pub extras: BTreeMap<String, String>,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            extras: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

/// Outcome reported by a finished activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    Ok,
    Canceled,
    Custom(i32),
}

/// Result delivered to an [`ActivityResultListener`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResult {
    pub code: ResultCode,
    pub data: Option<Intent>,
}

impl ActivityResult {
    pub fn new(code: ResultCode, data: Option<Intent>) -> Self {
        Self { code, data }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResultCode::Ok
    }
}

/// The window owner that can launch external activities.
pub trait Host {
    fn start_activity(&self, intent: &Intent);

    /// Start an activity whose result will be reported back through
    /// [`Navigator::on_activity_result`](crate::navigator::Navigator::on_activity_result)
    /// with `request_code`.
    fn start_activity_for_result(&self, intent: &Intent, request_code: RequestCode);

    /// Whether anything can handle `intent`.
    ///
    /// Default implementation returns `true`.
    fn can_start(&self, _intent: &Intent) -> bool {
        true
    }
}

/// One-shot receiver for an activity result.
pub trait ActivityResultListener {
    fn on_activity_result(self: Box<Self>, result: ActivityResult);
}

impl<F> ActivityResultListener for F
where
    F: FnOnce(ActivityResult),
{
    fn on_activity_result(self: Box<Self>, result: ActivityResult) {
        (*self)(result)
    }
}
