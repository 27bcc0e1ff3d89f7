use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Positive,
    Warning,
    Negative,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Self::Neutral => "tone-neutral",
            Self::Positive => "tone-positive",
            Self::Warning => "tone-warning",
            Self::Negative => "tone-negative",
        }
    }
}

#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        div { class: "page-header",
            div { class: "page-header-content",
                h1 { class: "page-title", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }
            div { class: "page-header-actions", {children} }
        }
    }
}

#[component]
pub fn Loading(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "loading", "{label}" }
    }
}

#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] detail: Option<String>,
    #[props(default)] tone: Tone,
) -> Element {
    rsx! {
        div { class: "card stat-card {tone.class()}",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
            if let Some(detail) = detail {
                span { class: "stat-detail", "{detail}" }
            }
        }
    }
}

#[component]
pub fn StatusBadge(label: String, #[props(default)] tone: Tone) -> Element {
    rsx! {
        span { class: "badge {tone.class()}", "{label}" }
    }
}

/// A modal asking the user to confirm something destructive.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| if !busy { on_cancel.call(()) },
            div { class: "modal modal-sm", onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "{title}" }
                }
                div { class: "modal-body",
                    p { "{message}" }
                }
                div { class: "modal-footer",
                    button {
                        class: "btn btn-secondary",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Working..." } else { "{confirm_label}" }
                    }
                }
            }
        }
    }
}
