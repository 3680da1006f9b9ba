//! Two-factor test dialog view-model.
//!
//! State machine:
//!
//! ```text
//!   idle ──test_code()──▶ testing ──apply_response()──▶ result known
//!    ▲                                                      │
//!    └────────────── on_show() / on_hide() ◀────────────────┘
//! ```
//!
//! `test_code` is guarded by [`TwoFactorTestView::can_test`]; a trigger while
//! the guard is false is a no-op. Each trigger and each reset bumps a
//! generation counter, and replies carrying an older generation are dropped,
//! so a reply that lands after the dialog was reset cannot resurrect state.

use super::{Registration, ViewModel, ViewPosition};
use crate::model::two_factor::RemoteReply;
use crate::remote::TwoFactorRemote;

/// Field that changed, queued for the host to re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChange {
    Code,
    Focused,
    Status,
    Testing,
}

/// A test request the host must deliver to the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoFactorRequest {
    pub generation: u64,
    pub code: String,
}

/// State of the two-factor test popup.
#[derive(Debug, Default)]
pub struct TwoFactorTestView {
    code: String,
    code_focused: bool,
    /// `None` until a test completes, then pass/fail.
    code_status: Option<bool>,
    testing: bool,
    generation: u64,
    changes: Vec<DialogChange>,
}

impl TwoFactorTestView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn code_focused(&self) -> bool {
        self.code_focused
    }

    pub fn code_status(&self) -> Option<bool> {
        self.code_status
    }

    /// A request is in flight.
    pub fn testing(&self) -> bool {
        self.testing
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if self.code != code {
            self.code = code;
            self.changes.push(DialogChange::Code);
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.code.push(c);
        self.changes.push(DialogChange::Code);
    }

    pub fn pop_char(&mut self) {
        if self.code.pop().is_some() {
            self.changes.push(DialogChange::Code);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        if self.code_focused != focused {
            self.code_focused = focused;
            self.changes.push(DialogChange::Focused);
        }
    }

    fn set_status(&mut self, status: Option<bool>) {
        if self.code_status != status {
            self.code_status = status;
            self.changes.push(DialogChange::Status);
        }
    }

    fn set_testing(&mut self, testing: bool) {
        if self.testing != testing {
            self.testing = testing;
            self.changes.push(DialogChange::Testing);
        }
    }

    /// Drain queued change notifications.
    pub fn take_changes(&mut self) -> Vec<DialogChange> {
        std::mem::take(&mut self.changes)
    }

    /// The test action is enabled.
    pub fn can_test(&self) -> bool {
        !self.code.is_empty() && !self.testing
    }

    /// Trigger the test action. Returns the request to send, or `None` when
    /// the action is disabled.
    pub fn test_code(&mut self) -> Option<TwoFactorRequest> {
        if !self.can_test() {
            tracing::debug!("Two-factor test ignored: action disabled");
            return None;
        }
        self.generation += 1;
        self.set_testing(true);
        tracing::debug!(generation = self.generation, "Two-factor test started");
        Some(TwoFactorRequest {
            generation: self.generation,
            code: self.code.clone(),
        })
    }

    /// Apply the remote reply for `request`. Returns `false` if the reply is
    /// stale and was discarded.
    pub fn apply_response(&mut self, request: &TwoFactorRequest, reply: &RemoteReply) -> bool {
        if request.generation != self.generation || !self.testing {
            tracing::debug!(
                request = request.generation,
                current = self.generation,
                "Discarding stale two-factor reply"
            );
            return false;
        }
        let passed = reply.passed();
        self.set_testing(false);
        self.set_status(Some(passed));
        tracing::info!(status = %reply.status, passed, "Two-factor test finished");
        true
    }

    /// Trigger the test and wait for `remote` to answer. Returns the new
    /// status, or `None` when the action was disabled.
    pub fn run_test(&mut self, remote: &dyn TwoFactorRemote) -> Option<bool> {
        let request = self.test_code()?;
        let reply = remote.test_two_factor(&request.code);
        self.apply_response(&request, &reply);
        self.code_status
    }

    /// Reset every field to its default and invalidate in-flight requests.
    pub fn clear_popup(&mut self) {
        self.generation += 1;
        self.set_code(String::new());
        self.set_focused(false);
        self.set_status(None);
        self.set_testing(false);
    }
}

impl ViewModel for TwoFactorTestView {
    fn registration(&self) -> Registration {
        Registration {
            position: ViewPosition::Popups,
            template: "PopupsTwoFactorTest",
            name: "PopupsTwoFactorTestViewModel",
        }
    }

    fn on_show(&mut self) {
        self.clear_popup();
    }

    fn on_hide(&mut self) {
        self.clear_popup();
    }

    fn on_focus(&mut self) {
        self.set_focused(true);
    }
}
