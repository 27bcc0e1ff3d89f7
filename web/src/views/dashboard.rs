use dioxus::prelude::*;
use types::{TransactionKind, report::Dashboard as Overview};
use ui::{Loading, PageHeader, StatCard, StatusBadge, ThemeToggle, Tone, use_error};

use crate::{Route, views::components::format_date};

#[component]
pub fn Dashboard() -> Element {
    let mut overview = use_signal(|| None::<Overview>);
    let mut error_state = use_error();

    use_effect(move || {
        spawn(async move {
            match api::dashboard().await {
                Ok(loaded) => overview.set(Some(loaded)),
                Err(e) => error_state.set(&e),
            }
        });
    });

    let Some(overview) = overview() else {
        return rsx! {
            Loading { label: "Loading dashboard..." }
        };
    };
    let stats = overview.stats;

    rsx! {
        div {
            PageHeader { title: "Dashboard", subtitle: "Overview of members, credit and loans.",
                ThemeToggle {}
                Link { to: Route::AddMember {}, class: "btn btn-primary", "Add User" }
            }

            div { class: "grid grid-cols-4",
                StatCard {
                    label: "Users",
                    value: "{stats.members}",
                    detail: "{stats.inactive_members} inactive",
                }
                StatCard {
                    label: "Outstanding Credit",
                    value: "{stats.outstanding}",
                    tone: Tone::Warning,
                }
                StatCard {
                    label: "Recovered This Month",
                    value: "{stats.recovered}",
                    tone: Tone::Positive,
                }
                StatCard {
                    label: "Active Loans",
                    value: "{stats.active_loans}",
                    detail: "{stats.overdue_loans} overdue",
                    tone: if stats.overdue_loans > 0 { Tone::Negative } else { Tone::Neutral },
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Recent Transactions" }
                }
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                th { "User" }
                                th { "Date" }
                                th { "Type" }
                                th { "Amount" }
                                th { "Note" }
                            }
                        }
                        tbody {
                            for recent in overview.recent.iter() {
                                {
                                    let tx = &recent.transaction;
                                    let member_id = tx.member_id;
                                    let (label, tone) = match tx.kind {
                                        TransactionKind::Credit => ("Credit", Tone::Positive),
                                        TransactionKind::Debit => ("Debit", Tone::Negative),
                                    };
                                    rsx! {
                                        tr {
                                            key: "{tx.id}",
                                            onclick: move |_| {
                                                navigator().push(Route::ledger(member_id));
                                            },
                                            td { "{recent.member_name}" }
                                            td { {format_date(tx.date)} }
                                            td { StatusBadge { label: "{label}", tone } }
                                            td { "{tx.amount}" }
                                            td { "{tx.note}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
