use dioxus::prelude::*;

/// A failure shown in the page banner, with its context chain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorInfo {
    pub message: String,
    pub chain: Vec<String>,
}

impl From<&types::Error> for ErrorInfo {
    fn from(error: &types::Error) -> Self {
        Self {
            message: error.message().to_string(),
            chain: error.chain().to_vec(),
        }
    }
}

/// Page-level error state. Use [`use_error`] to reach it.
#[derive(Clone, Copy)]
pub struct ErrorState(Signal<Option<ErrorInfo>>);

impl ErrorState {
    pub fn set(&mut self, error: &types::Error) {
        tracing::warn!(%error, "showing error banner");
        self.0.set(Some(ErrorInfo::from(error)));
    }

    pub fn clear(&mut self) {
        self.0.set(None);
    }
}

pub fn provide_error() -> ErrorState {
    use_context_provider(|| ErrorState(Signal::new(None)))
}

pub fn use_error() -> ErrorState {
    use_context::<ErrorState>()
}

#[component]
pub fn ErrorBanner() -> Element {
    let mut error_state = use_error();
    let error = error_state.0.read();

    let Some(err) = error.as_ref() else {
        return rsx! {};
    };
    let has_chain = err.chain.len() > 1;

    rsx! {
        div { class: "error-banner",
            div { class: "error-banner-content",
                div { class: "error-banner-header",
                    span { class: "error-banner-message", "{err.message}" }
                    button {
                        class: "error-banner-close",
                        onclick: move |_| error_state.clear(),
                        "×"
                    }
                }
                if has_chain {
                    ol { class: "error-chain-list",
                        for (i, msg) in err.chain.iter().enumerate() {
                            li { key: "{i}", class: "error-chain-item", "{msg}" }
                        }
                    }
                }
            }
        }
    }
}
