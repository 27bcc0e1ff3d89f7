//! Drives a form submission or fetch through [`ActionState`] and its toast.

use std::future::Future;

use api::CONFIG;
use dioxus::{core::Task, prelude::*};
use types::{ActionState, Result};

/// Somewhere an [`ActionState`] lives. Components use a signal.
pub trait ActionSink {
    fn with_state<R>(&mut self, f: impl FnOnce(&mut ActionState) -> R) -> R;
}

impl ActionSink for Signal<ActionState> {
    fn with_state<R>(&mut self, f: impl FnOnce(&mut ActionState) -> R) -> R {
        f(&mut self.write())
    }
}

/// How a submission ended. `value` is set only on success.
#[derive(Debug)]
pub struct Settled<T> {
    pub value: Option<T>,
    pub epoch: u64,
}

/// Validate, then run `work` between `Pending` and its outcome.
///
/// A failed validation settles as `Failed` without entering `Pending` and
/// `work` is never polled. Returns `None` if another submission is pending.
pub async fn run<S, T, F>(sink: &mut S, validation: Result<()>, success: &str, work: F) -> Option<Settled<T>>
where
    S: ActionSink,
    F: Future<Output = Result<T>>,
{
    if let Err(error) = validation {
        let epoch = sink.with_state(|s| s.reject(error.message())).ok()?;
        return Some(Settled { value: None, epoch });
    }

    if sink.with_state(ActionState::begin).is_err() {
        tracing::debug!("action already pending, submit ignored");
        return None;
    }

    match work.await {
        Ok(value) => {
            let epoch = sink.with_state(|s| s.succeed(success));
            Some(Settled {
                value: Some(value),
                epoch,
            })
        }
        Err(error) => {
            tracing::warn!(%error, "action failed");
            let epoch = sink.with_state(|s| s.fail(error.message()));
            Some(Settled { value: None, epoch })
        }
    }
}

/// Clear the toast for `epoch` once the display window has passed.
pub async fn dismiss_after<S: ActionSink>(sink: &mut S, epoch: u64) {
    api::sleep(CONFIG.toast_window()).await;
    sink.with_state(|s| s.dismiss(epoch));
}

/// Handle returned by [`use_action`]. Copy it into event handlers freely.
#[derive(Clone, Copy, PartialEq)]
pub struct AsyncAction {
    state: Signal<ActionState>,
    task: Signal<Option<Task>>,
}

pub fn use_action() -> AsyncAction {
    AsyncAction {
        state: use_signal(ActionState::default),
        task: use_signal(|| None),
    }
}

impl AsyncAction {
    pub fn state(&self) -> ActionState {
        self.state.read().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state.read().is_pending()
    }

    /// Run `work` as this action and call `on_success` with its value.
    ///
    /// The task belongs to the calling component and stops when it unmounts.
    pub fn submit<T, F>(
        &self,
        validation: Result<()>,
        success: impl Into<String>,
        work: F,
        on_success: impl FnOnce(T) + 'static,
    ) where
        T: 'static,
        F: Future<Output = Result<T>> + 'static,
    {
        if self.is_pending() {
            tracing::debug!("action already pending, submit ignored");
            return;
        }

        let mut state = self.state;
        let mut slot = self.task;
        let success = success.into();

        // The previous task is only waiting out its toast by now.
        if let Some(previous) = slot.take() {
            previous.cancel();
        }

        let task = spawn(async move {
            let Some(settled) = run(&mut state, validation, &success, work).await else {
                return;
            };
            if let Some(value) = settled.value {
                on_success(value);
            }
            dismiss_after(&mut state, settled.epoch).await;
            slot.set(None);
        });
        slot.set(Some(task));
    }

    /// Stop the running task, if any, and drop back to idle.
    ///
    /// Also clears a toast that is still on screen.
    pub fn cancel(&self) {
        let mut slot = self.task;
        if let Some(task) = slot.take() {
            task.cancel();
        }
        let mut state = self.state;
        state.write().cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        rc::Rc,
        time::Duration,
    };
    use dioxus::core::NoOpMutations;
    use tokio::time::Instant;
    use types::{ActionStatus, err, validate};

    #[derive(Default)]
    struct Recorder {
        state: ActionState,
        seen: Vec<ActionStatus>,
    }

    impl ActionSink for Recorder {
        fn with_state<R>(&mut self, f: impl FnOnce(&mut ActionState) -> R) -> R {
            let result = f(&mut self.state);
            self.seen.push(self.state.status());
            result
        }
    }

    #[tokio::test(start_paused = true)]
    async fn missing_field_fails_without_pending() {
        let mut sink = Recorder::default();
        let polled = Rc::new(Cell::new(false));
        let flag = polled.clone();

        let settled = run(
            &mut sink,
            validate::required(&["", "+91 9876543210"], "Name and mobile number are required"),
            "User added successfully",
            async move {
                flag.set(true);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert!(settled.value.is_none());
        assert_eq!(sink.seen, vec![ActionStatus::Failed]);
        assert_eq!(sink.state.message(), Some("Name and mobile number are required"));
        assert!(!polled.get());
    }

    #[tokio::test(start_paused = true)]
    async fn valid_submit_cycles_back_to_idle() {
        let mut sink = Recorder::default();
        let started = Instant::now();

        let settled = run(&mut sink, Ok(()), "User updated successfully", async {
            api::sleep(Duration::from_millis(1500)).await;
            Ok(7)
        })
        .await
        .unwrap();

        assert_eq!(settled.value, Some(7));
        assert_eq!(sink.seen, vec![ActionStatus::Pending, ActionStatus::Succeeded]);
        assert_eq!(sink.state.message(), Some("User updated successfully"));

        dismiss_after(&mut sink, settled.epoch).await;
        assert_eq!(sink.state.status(), ActionStatus::Idle);
        assert!(started.elapsed() >= Duration::from_millis(1500) + CONFIG.toast_window());
    }

    #[tokio::test(start_paused = true)]
    async fn backend_error_settles_as_failed() {
        let mut sink = Recorder::default();
        let settled = run(&mut sink, Ok(()), "Logged in", async {
            Err::<(), _>(err!("Invalid credentials. Use a@gmail.com / a"))
        })
        .await
        .unwrap();

        assert!(settled.value.is_none());
        assert_eq!(sink.state.status(), ActionStatus::Failed);
        assert_eq!(sink.state.message(), Some("Invalid credentials. Use a@gmail.com / a"));
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_while_pending_is_refused() {
        let mut sink = Recorder::default();
        sink.state.begin().unwrap();

        let polled = Rc::new(Cell::new(false));
        let flag = polled.clone();
        let settled = run(&mut sink, Ok(()), "Sent", async move {
            flag.set(true);
            Ok(())
        })
        .await;

        assert!(settled.is_none());
        assert!(!polled.get());
        assert!(sink.state.is_pending());
    }

    fn harness() -> Element {
        let action = use_action();
        use_context_provider(|| action);
        rsx! {}
    }

    fn mount() -> (VirtualDom, AsyncAction) {
        let mut dom = VirtualDom::new(harness);
        dom.rebuild_in_place();
        let action = dom.in_scope(ScopeId::APP, consume_context::<AsyncAction>);
        (dom, action)
    }

    /// Let the dom's tasks run while the paused clock moves forward by `by`.
    async fn advance(dom: &mut VirtualDom, by: Duration) {
        let until = Instant::now() + by;
        loop {
            tokio::select! {
                _ = dom.wait_for_work() => dom.render_immediate(&mut NoOpMutations),
                _ = tokio::time::sleep_until(until) => return,
            }
        }
    }

    fn submit_slow(dom: &VirtualDom, action: AsyncAction, work: Duration, ran: Rc<Cell<bool>>) {
        dom.in_scope(ScopeId::APP, || {
            action.submit(
                Ok(()),
                "Reminder sent successfully",
                async move {
                    api::sleep(work).await;
                    Ok(())
                },
                move |()| ran.set(true),
            )
        });
    }

    fn status(dom: &VirtualDom, action: AsyncAction) -> ActionStatus {
        dom.in_scope(ScopeId::APP, || action.state().status())
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_while_pending_skips_on_success() {
        let (mut dom, action) = mount();
        let ran = Rc::new(Cell::new(false));

        submit_slow(&dom, action, Duration::from_secs(5), ran.clone());
        advance(&mut dom, Duration::from_secs(1)).await;
        assert_eq!(status(&dom, action), ActionStatus::Pending);

        dom.in_scope(ScopeId::APP, || action.cancel());
        advance(&mut dom, Duration::from_secs(10)).await;

        assert_eq!(status(&dom, action), ActionStatus::Idle);
        assert!(!ran.get());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_toast_window_clears_it() {
        let (mut dom, action) = mount();
        let ran = Rc::new(Cell::new(false));

        submit_slow(&dom, action, Duration::ZERO, ran.clone());
        advance(&mut dom, Duration::from_millis(10)).await;
        assert_eq!(status(&dom, action), ActionStatus::Succeeded);
        assert!(ran.get());

        dom.in_scope(ScopeId::APP, || action.cancel());
        assert_eq!(status(&dom, action), ActionStatus::Idle);

        advance(&mut dom, Duration::from_secs(10)).await;
        let state = dom.in_scope(ScopeId::APP, || action.state());
        assert_eq!(state.status(), ActionStatus::Idle);
        assert_eq!(state.message(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn resubmit_during_toast_window_can_still_be_cancelled() {
        let (mut dom, action) = mount();
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));

        submit_slow(&dom, action, Duration::ZERO, first.clone());
        advance(&mut dom, Duration::from_secs(1)).await;
        assert_eq!(status(&dom, action), ActionStatus::Succeeded);

        submit_slow(&dom, action, Duration::from_secs(5), second.clone());
        advance(&mut dom, Duration::from_secs(3)).await;
        assert_eq!(status(&dom, action), ActionStatus::Pending);

        dom.in_scope(ScopeId::APP, || action.cancel());
        advance(&mut dom, Duration::from_secs(10)).await;

        assert_eq!(status(&dom, action), ActionStatus::Idle);
        assert!(first.get());
        assert!(!second.get());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_dismissal_keeps_newer_toast() {
        let mut sink = Recorder::default();
        let first = run(&mut sink, Ok(()), "first", async { Ok(()) }).await.unwrap();
        let second = run(&mut sink, Err(err!("second")), "unused", async { Ok(()) })
            .await
            .unwrap();

        dismiss_after(&mut sink, first.epoch).await;
        assert_eq!(sink.state.status(), ActionStatus::Failed);
        assert_eq!(sink.state.message(), Some("second"));

        dismiss_after(&mut sink, second.epoch).await;
        assert_eq!(sink.state.status(), ActionStatus::Idle);
    }
}
