use api::CONFIG;
use dioxus::prelude::*;
use jiff::{Timestamp, civil::Date};

pub fn format_date(date: Date) -> String {
    date.strftime("%d %b %Y").to_string()
}

pub fn format_timestamp(at: Timestamp) -> String {
    at.strftime("%d %b %Y, %H:%M").to_string()
}

/// Run `then` once the success toast has been up for the redirect delay.
pub fn after_redirect_delay(then: impl FnOnce() + 'static) {
    spawn(async move {
        api::sleep(CONFIG.redirect_delay()).await;
        then();
    });
}

/// Parse an `<input type="date">` value; blank means no bound.
pub fn parse_date(value: &str) -> Option<Date> {
    value.trim().parse().ok()
}

/// A labelled single-line input bound to `value`.
#[component]
pub fn TextField(
    id: String,
    label: String,
    value: Signal<String>,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
    #[props(default)] required: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "{id}",
                "{label}"
                if required { " *" }
            }
            input {
                id: "{id}",
                class: if error.is_some() { "form-input form-input-error" } else { "form-input" },
                r#type: "{kind}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |e| value.set(e.value()),
            }
            if let Some(error) = &error {
                p { class: "form-error", "{error}" }
            }
        }
    }
}

#[component]
pub fn TextArea(id: String, label: String, value: Signal<String>, #[props(default)] required: bool) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "{id}",
                "{label}"
                if required { " *" }
            }
            textarea {
                id: "{id}",
                class: "form-input",
                rows: "3",
                value: "{value}",
                oninput: move |e| value.set(e.value()),
            }
        }
    }
}

/// Start and end date inputs. Blank ends are open.
#[component]
pub fn DateRangeFields(start: Signal<String>, end: Signal<String>) -> Element {
    rsx! {
        div { class: "date-range",
            TextField { id: "range-start", label: "From", kind: "date", value: start }
            TextField { id: "range-end", label: "To", kind: "date", value: end }
        }
    }
}

#[component]
pub fn Pagination(page: Signal<usize>, total_pages: usize) -> Element {
    let current = page();
    if total_pages <= 1 {
        return rsx! {};
    }

    rsx! {
        div { class: "pagination",
            button {
                class: "btn btn-secondary",
                disabled: current <= 1,
                onclick: move |_| page.set(current.saturating_sub(1).max(1)),
                "Previous"
            }
            span { class: "pagination-info", "Page {current} of {total_pages}" }
            button {
                class: "btn btn-secondary",
                disabled: current >= total_pages,
                onclick: move |_| page.set((current + 1).min(total_pages)),
                "Next"
            }
        }
    }
}
