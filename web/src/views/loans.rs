use dioxus::prelude::*;
use types::loan::{Loan, LoanQuery, LoanSortKey, LoanStats, LoanStatus};
use ui::{Loading, PageHeader, StatCard, StatusBadge, Tone, use_error};

use crate::{Route, views::components::format_date};

const SORT_KEYS: [(LoanSortKey, &str, &str); 4] = [
    (LoanSortKey::Id, "id", "Loan ID"),
    (LoanSortKey::Amount, "amount", "Amount"),
    (LoanSortKey::Cibil, "cibil", "CIBIL Score"),
    (LoanSortKey::AppliedOn, "applied", "Applied On"),
];

fn sort_key(value: &str) -> LoanSortKey {
    SORT_KEYS
        .iter()
        .find(|(_, key, _)| *key == value)
        .map(|(sort, _, _)| *sort)
        .unwrap_or_default()
}

fn loan_tone(status: LoanStatus) -> Tone {
    match status {
        LoanStatus::Active => Tone::Warning,
        LoanStatus::Completed => Tone::Positive,
        LoanStatus::Overdue => Tone::Negative,
    }
}

#[component]
pub fn Loans() -> Element {
    let mut error_state = use_error();
    let mut loans = use_signal(|| None::<Vec<Loan>>);
    let mut search = use_signal(String::new);
    let mut status = use_signal(String::new);
    let mut sort = use_signal(|| "id".to_string());
    let mut descending = use_signal(|| false);

    use_effect(move || {
        spawn(async move {
            match api::loans().await {
                Ok(loaded) => loans.set(Some(loaded)),
                Err(e) => error_state.set(&e),
            }
        });
    });

    let Some(all) = loans() else {
        return rsx! {
            Loading { label: "Loading loans..." }
        };
    };

    let stats = LoanStats::from_loans(&all);
    let query = LoanQuery {
        search: search(),
        status: status().parse().ok(),
        sort: sort_key(&sort()),
        descending: descending(),
    };
    let shown = query.apply(&all);

    rsx! {
        div {
            PageHeader { title: "Loans", subtitle: "Loan book across all members." }

            div { class: "grid grid-cols-4",
                StatCard {
                    label: "Total Loans",
                    value: "{stats.total}",
                    detail: "{stats.active} active, {stats.completed} completed",
                }
                StatCard { label: "Amount Disbursed", value: "{stats.total_amount}" }
                StatCard { label: "Recovered", value: "{stats.recovered_amount}", tone: Tone::Positive }
                StatCard {
                    label: "Overdue",
                    value: "{stats.overdue_amount}",
                    detail: "{stats.overdue} loans, average CIBIL {stats.average_cibil}",
                    tone: Tone::Negative,
                }
            }

            div { class: "card filters",
                input {
                    class: "form-input",
                    placeholder: "Search by member name or ID",
                    value: "{search}",
                    oninput: move |e| search.set(e.value()),
                }
                select {
                    class: "form-input",
                    value: "{status}",
                    onchange: move |e| status.set(e.value()),
                    option { value: "", "All statuses" }
                    for s in [LoanStatus::Active, LoanStatus::Completed, LoanStatus::Overdue] {
                        option { value: s.as_str(), "{s.label()}" }
                    }
                }
                select {
                    class: "form-input",
                    value: "{sort}",
                    onchange: move |e| sort.set(e.value()),
                    for (_, key, label) in SORT_KEYS {
                        option { value: key, "Sort by {label}" }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| descending.toggle(),
                    if descending() { "Descending" } else { "Ascending" }
                }
            }

            div { class: "card",
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                th { "Loan" }
                                th { "Member" }
                                th { "Type" }
                                th { "Amount" }
                                th { "EMI" }
                                th { "Paid" }
                                th { "CIBIL" }
                                th { "Status" }
                                th { "Last Payment" }
                            }
                        }
                        tbody {
                            for loan in shown.iter() {
                                tr { key: "{loan.id}",
                                    td { "#{loan.id}" }
                                    td {
                                        Link { to: Route::ledger(loan.member_id), "{loan.member_name}" }
                                    }
                                    td { "{loan.loan_type.label()}" }
                                    td { "{loan.amount}" }
                                    td { "{loan.emi}" }
                                    td { "{loan.paid_installments}/{loan.tenure_months}" }
                                    td { "{loan.cibil_score}" }
                                    td {
                                        StatusBadge { label: "{loan.status.label()}", tone: loan_tone(loan.status) }
                                    }
                                    td { {format_date(loan.last_payment)} }
                                }
                            }
                        }
                    }
                }
                if shown.is_empty() {
                    p { class: "text-muted", "No loans match these filters." }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_falls_back_to_id() {
        assert_eq!(sort_key("cibil"), LoanSortKey::Cibil);
        assert_eq!(sort_key("bogus"), LoanSortKey::Id);
    }
}
