//! State of a user-triggered action whose outcome is reported in a toast.
//!
//! ```text
//! Idle ──begin──▶ Pending ──succeed──▶ Succeeded ──dismiss──▶ Idle
//!   │                └─────fail─────▶ Failed ─────dismiss──▶ Idle
//!   └──────────────reject──────────────▲
//! ```
//!
//! Every transition into a terminal state bumps `epoch`. A dismissal carries
//! the epoch it was scheduled for and is ignored once a newer outcome exists.
//! `cancel` drops back to `Idle` from any state and also bumps `epoch`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Returned when an action is started while another one is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight;

impl std::fmt::Display for InFlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("an action is already in flight")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionState {
    status: ActionStatus,
    message: Option<String>,
    epoch: u64,
}

impl ActionState {
    pub fn status(&self) -> ActionStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_pending(&self) -> bool {
        self.status == ActionStatus::Pending
    }

    /// Whether a toast should currently be shown.
    pub fn is_settled(&self) -> bool {
        matches!(self.status, ActionStatus::Succeeded | ActionStatus::Failed)
    }

    pub fn begin(&mut self) -> Result<(), InFlight> {
        if self.is_pending() {
            return Err(InFlight);
        }
        self.status = ActionStatus::Pending;
        self.message = None;
        Ok(())
    }

    /// Fail validation without ever entering `Pending`.
    pub fn reject(&mut self, message: impl Into<String>) -> Result<u64, InFlight> {
        if self.is_pending() {
            return Err(InFlight);
        }
        Ok(self.settle(ActionStatus::Failed, message.into()))
    }

    pub fn succeed(&mut self, message: impl Into<String>) -> u64 {
        self.settle(ActionStatus::Succeeded, message.into())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> u64 {
        self.settle(ActionStatus::Failed, message.into())
    }

    /// Clear the toast scheduled for `epoch`. Returns whether anything changed.
    pub fn dismiss(&mut self, epoch: u64) -> bool {
        if !self.is_settled() || self.epoch != epoch {
            return false;
        }
        self.status = ActionStatus::Idle;
        self.message = None;
        true
    }

    /// Abandon a pending action or take down its toast early.
    ///
    /// Any dismissal scheduled before this becomes stale.
    pub fn cancel(&mut self) {
        if self.status != ActionStatus::Idle {
            self.epoch += 1;
        }
        self.status = ActionStatus::Idle;
        self.message = None;
    }

    fn settle(&mut self, status: ActionStatus, message: String) -> u64 {
        self.epoch += 1;
        self.status = status;
        self.message = Some(message);
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_submit_runs_full_cycle() {
        let mut state = ActionState::default();
        assert_eq!(state.status(), ActionStatus::Idle);

        state.begin().unwrap();
        assert_eq!(state.status(), ActionStatus::Pending);

        let epoch = state.succeed("User added successfully");
        assert_eq!(state.status(), ActionStatus::Succeeded);
        assert_eq!(state.message(), Some("User added successfully"));

        assert!(state.dismiss(epoch));
        assert_eq!(state.status(), ActionStatus::Idle);
        assert_eq!(state.message(), None);
    }

    #[test]
    fn rejection_skips_pending() {
        let mut state = ActionState::default();
        state.reject("Name and mobile number are required").unwrap();
        assert_eq!(state.status(), ActionStatus::Failed);
        assert_eq!(state.message(), Some("Name and mobile number are required"));
    }

    #[test]
    fn pending_refuses_second_begin() {
        let mut state = ActionState::default();
        state.begin().unwrap();
        assert_eq!(state.begin(), Err(InFlight));
        assert_eq!(state.reject("nope"), Err(InFlight));
        assert!(state.is_pending());
    }

    #[test]
    fn stale_dismiss_keeps_newer_toast() {
        let mut state = ActionState::default();
        let first = state.reject("first").unwrap();
        state.begin().unwrap();
        let second = state.succeed("second");

        assert!(!state.dismiss(first));
        assert_eq!(state.message(), Some("second"));
        assert!(state.dismiss(second));
    }

    #[test]
    fn dismiss_does_not_touch_pending() {
        let mut state = ActionState::default();
        let epoch = state.fail("boom");
        state.begin().unwrap();
        assert!(!state.dismiss(epoch));
        assert!(state.is_pending());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut state = ActionState::default();
        state.begin().unwrap();
        state.cancel();
        assert_eq!(state.status(), ActionStatus::Idle);
        state.begin().unwrap();
    }

    #[test]
    fn cancel_clears_a_settled_toast() {
        let mut state = ActionState::default();
        let epoch = state.succeed("Reminder sent successfully");
        state.cancel();
        assert_eq!(state.status(), ActionStatus::Idle);
        assert_eq!(state.message(), None);
        assert!(state.epoch() > epoch);

        let failed = state.fail("boom");
        state.cancel();
        assert!(!state.dismiss(failed));
        assert_eq!(state.status(), ActionStatus::Idle);
    }
}
