use dioxus::prelude::*;

mod gate;
mod views;

use gate::Access;
use types::MemberId;
use ui::{ErrorBanner, Loading, provide_error, provide_session, provide_theme, use_session};
use views::{
    AddMember, AddTransaction, Alerts, Dashboard, EditMember, Help, Loans, Login, Logout,
    MemberLedger, Members, Notifications, Profile, Reports, SeniorAmount,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Gatekeeper)]
        #[route("/")]
        Root {},
        #[route("/login")]
        Login {},
        #[route("/logout")]
        Logout {},
        #[nest("/leader")]
            #[layout(MainLayout)]
                #[route("/dashboard")]
                Dashboard {},
                #[route("/users")]
                Members {},
                #[route("/users/add")]
                AddMember {},
                #[route("/users/:id/edit")]
                EditMember { id: MemberId },
                #[route("/users/:id/ledger")]
                MemberLedger { id: MemberId },
                #[route("/transactions/add?:user_id&:kind")]
                AddTransaction { user_id: Option<String>, kind: Option<String> },
                #[route("/reports")]
                Reports {},
                #[route("/notifications?:user_id")]
                Notifications { user_id: Option<String> },
                #[route("/alerts")]
                Alerts {},
                #[route("/profile")]
                Profile {},
                #[route("/help")]
                Help {},
                #[route("/senior-amount")]
                SeniorAmount {},
                #[route("/loans")]
                Loans {},
            #[end_layout]
        #[end_nest]
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    pub fn ledger(id: MemberId) -> Self {
        Route::MemberLedger { id }
    }

    pub fn edit_member(id: MemberId) -> Self {
        Route::EditMember { id }
    }

    pub fn add_transaction(user_id: Option<MemberId>, kind: Option<types::TransactionKind>) -> Self {
        Route::AddTransaction {
            user_id: user_id.map(|id| id.to_string()),
            kind: kind.map(|k| k.as_str().to_string()),
        }
    }

    pub fn remind(user_id: MemberId) -> Self {
        Route::Notifications {
            user_id: Some(user_id.to_string()),
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    backend::init_tracing();

    #[cfg(target_arch = "wasm32")]
    dioxus::logger::initialize_default();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    provide_session();
    provide_theme();

    rsx! {
        document::Title { "Leader Admin Panel" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        ErrorBoundary {
            handle_error: |errors: ErrorContext| {
                tracing::error!(?errors, "render failed");
                rsx! {
                    div { class: "fatal-error",
                        h2 { "Something went wrong." }
                    }
                }
            },
            Router::<Route> {}
        }
    }
}

/// Wraps every route and applies the auth gate before anything renders.
#[component]
fn Gatekeeper() -> Element {
    let session = use_session();
    let route = use_route::<Route>();

    match route.gate(&session.state()) {
        Access::Allow => rsx! { Outlet::<Route> {} },
        Access::Redirect(target) => {
            tracing::debug!(from = %route, to = %target, "redirecting");
            navigator().replace(target);
            rsx! {
                Loading { label: "Redirecting..." }
            }
        }
    }
}

// The gate redirects these before they render.
#[component]
fn Root() -> Element {
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    rsx! {}
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = current_route.section() == to.section();

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

#[component]
fn MainLayout() -> Element {
    provide_error();
    let session = use_session();
    let Some(leader) = session.leader() else {
        return rsx! {
            Loading { label: "Redirecting to login..." }
        };
    };
    let initials = leader.initials();

    rsx! {
        div { class: "app-layout",
            aside { class: "sidebar",
                div { class: "sidebar-header",
                    span { class: "sidebar-logo", "Leader Panel" }
                }
                nav { class: "sidebar-nav",
                    NavLink { to: Route::Dashboard {}, "Dashboard" }
                    NavLink { to: Route::Members {}, "Users" }
                    NavLink { to: Route::add_transaction(None, None), "Add Transaction" }
                    NavLink { to: Route::Loans {}, "Loans" }
                    NavLink { to: Route::SeniorAmount {}, "Senior Amount" }
                    NavLink { to: Route::Reports {}, "Reports" }
                    NavLink { to: Route::Notifications { user_id: None }, "Notifications" }
                    NavLink { to: Route::Alerts {}, "Alerts" }
                    NavLink { to: Route::Profile {}, "Profile" }
                    NavLink { to: Route::Help {}, "Help & Support" }
                }
                div { class: "sidebar-footer",
                    div { class: "sidebar-user",
                        div { class: "sidebar-avatar", "{initials}" }
                        div { class: "sidebar-user-info",
                            div { class: "sidebar-user-name", "{leader.display_name}" }
                            div { class: "sidebar-user-role", "{leader.login}" }
                        }
                    }
                    Link { to: Route::Logout {}, class: "sidebar-logout", "Sign out" }
                }
            }
            div { class: "main-column",
                header { class: "top-bar",
                    span { class: "top-bar-title", "Leader Admin Panel" }
                    div { class: "top-bar-actions",
                        Link { to: Route::Profile {}, class: "top-bar-avatar", "{initials}" }
                    }
                }
                main { class: "main-content",
                    ErrorBanner {}
                    Outlet::<Route> {}
                }
            }
        }
    }
}
