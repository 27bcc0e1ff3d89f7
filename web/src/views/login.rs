use dioxus::prelude::*;
use types::{Credentials, LoginMethod};
use ui::{Toast, use_action, use_session};

use crate::{Route, views::components::TextField};

#[component]
pub fn Login() -> Element {
    let mut session = use_session();
    let action = use_action();
    let mut method = use_signal(|| LoginMethod::Email);
    let email = use_signal(String::new);
    let mobile = use_signal(String::new);
    let password = use_signal(String::new);
    let otp = use_signal(String::new);
    let mut remember_me = use_signal(|| false);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let credentials = match method() {
            LoginMethod::Email => Credentials::email(email(), password()),
            LoginMethod::Mobile => Credentials::mobile(mobile(), otp()),
        }
        .remember(remember_me());

        action.submit(Ok(()), "Signed in", api::login(credentials), move |signed_in| {
            session.sign_in(signed_in);
            navigator().replace(Route::Dashboard {});
        });
    };

    let tab_class = move |tab: LoginMethod| if method() == tab { "tab tab-active" } else { "tab" };

    rsx! {
        div { class: "login-page",
            Toast { action }
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "Leader Login" }
                    p { class: "login-subtitle", "Sign in to access your admin panel" }
                }
                div { class: "tabs",
                    button {
                        class: tab_class(LoginMethod::Email),
                        onclick: move |_| method.set(LoginMethod::Email),
                        "Email"
                    }
                    button {
                        class: tab_class(LoginMethod::Mobile),
                        onclick: move |_| method.set(LoginMethod::Mobile),
                        "Mobile"
                    }
                }
                form { onsubmit: submit,
                    {match method() {
                        LoginMethod::Email => rsx! {
                            TextField { id: "email", label: "Email Address", kind: "email", value: email, placeholder: "a@gmail.com" }
                            TextField { id: "password", label: "Password", kind: "password", value: password }
                        },
                        LoginMethod::Mobile => rsx! {
                            TextField { id: "mobile", label: "Mobile Number", kind: "tel", value: mobile, placeholder: "+91 9876543210" }
                            TextField { id: "otp", label: "OTP", value: otp }
                        },
                    }}
                    label { class: "checkbox-label",
                        input {
                            r#type: "checkbox",
                            checked: remember_me(),
                            onchange: move |e| remember_me.set(e.checked()),
                        }
                        span { "Remember me" }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary login-btn",
                        disabled: action.is_pending(),
                        if action.is_pending() { "Signing in..." } else { "Sign in" }
                    }
                }
                p { class: "text-muted login-hint", "Demo account: a@gmail.com / a" }
            }
        }
    }
}
