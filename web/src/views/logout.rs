use api::CONFIG;
use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn Logout() -> Element {
    let mut session = use_session();

    use_effect(move || {
        session.sign_out();
        spawn(async move {
            api::sleep(CONFIG.logout_delay()).await;
            navigator().replace(Route::Login {});
        });
    });

    rsx! {
        div { class: "login-page",
            div { class: "login-card logout-card",
                div { class: "spinner" }
                h2 { class: "login-title", "Logging Out" }
                p { class: "login-subtitle", "Thank you for using Leader Admin Panel" }
            }
        }
    }
}
