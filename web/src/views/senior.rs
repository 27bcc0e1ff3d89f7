use dioxus::prelude::*;
use types::senior::{SeniorAccount, SeniorStatus, SeniorTotals, search_seniors};
use ui::{Loading, PageHeader, StatCard, StatusBadge, Tone, use_error};

use crate::views::components::format_date;

#[component]
pub fn SeniorAmount() -> Element {
    let mut error_state = use_error();
    let mut accounts = use_signal(|| None::<Vec<SeniorAccount>>);
    let mut search = use_signal(String::new);

    use_effect(move || {
        spawn(async move {
            match api::seniors().await {
                Ok(loaded) => accounts.set(Some(loaded)),
                Err(e) => error_state.set(&e),
            }
        });
    });

    let Some(accounts) = accounts() else {
        return rsx! {
            Loading { label: "Loading senior accounts..." }
        };
    };
    let totals = SeniorTotals::from_accounts(&accounts);
    let query = search();
    let shown = search_seniors(&accounts, &query);

    rsx! {
        div {
            PageHeader { title: "Senior Amount", subtitle: "Amounts owed to and paid by senior members." }

            div { class: "grid grid-cols-3",
                StatCard { label: "Total Amount", value: "{totals.total}", detail: "{totals.count} members" }
                StatCard { label: "Paid", value: "{totals.paid}", tone: Tone::Positive }
                StatCard { label: "Pending", value: "{totals.pending}", tone: Tone::Warning }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Members" }
                    input {
                        class: "form-input",
                        placeholder: "Search by name or ID",
                        value: "{search}",
                        oninput: move |e| search.set(e.value()),
                    }
                }
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                th { "ID" }
                                th { "Name" }
                                th { "Total" }
                                th { "Paid" }
                                th { "Pending" }
                                th { "Last Payment" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for account in shown {
                                tr { key: "{account.id}",
                                    td { "{account.id}" }
                                    td { "{account.name}" }
                                    td { "{account.total}" }
                                    td { "{account.paid}" }
                                    td { "{account.pending()}" }
                                    td { {format_date(account.last_payment)} }
                                    td {
                                        StatusBadge {
                                            label: "{account.status.label()}",
                                            tone: match account.status {
                                                SeniorStatus::Active => Tone::Positive,
                                                SeniorStatus::Pending => Tone::Warning,
                                                SeniorStatus::Inactive => Tone::Neutral,
                                            },
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
