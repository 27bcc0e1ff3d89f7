use dioxus::prelude::*;
use types::ActionStatus;

use crate::AsyncAction;

/// The outcome of `action`, shown until its display window passes.
#[component]
pub fn Toast(action: AsyncAction) -> Element {
    let state = action.state();
    let class = match state.status() {
        ActionStatus::Succeeded => "toast toast-success",
        ActionStatus::Failed => "toast toast-error",
        ActionStatus::Idle | ActionStatus::Pending => return rsx! {},
    };

    rsx! {
        div { class, role: "status",
            span { class: "toast-icon",
                if state.status() == ActionStatus::Succeeded { "✓" } else { "!" }
            }
            span { class: "toast-message", {state.message().unwrap_or_default().to_string()} }
        }
    }
}
