use dioxus::prelude::*;
use jiff::Zoned;
use types::{
    Member, MemberId, Result, TransactionKind, err,
    ledger::{DateRange, Ledger, MemberFilter, NewTransaction},
    validate,
};
use ui::{Loading, PageHeader, StatCard, StatusBadge, Toast, Tone, use_action, use_error};

use crate::{
    Route,
    views::components::{DateRangeFields, TextArea, TextField, after_redirect_delay, format_date, parse_date},
};

const INVALID_TRANSACTION: &str = "Please select a user and enter a valid amount";

fn kind_badge(kind: TransactionKind) -> (&'static str, Tone) {
    match kind {
        TransactionKind::Credit => ("Credit", Tone::Positive),
        TransactionKind::Debit => ("Debit", Tone::Negative),
    }
}

#[component]
pub fn MemberLedger(id: ReadSignal<MemberId>) -> Element {
    let mut ledger = use_signal(|| None::<Ledger>);
    let mut error_state = use_error();
    let start = use_signal(String::new);
    let end = use_signal(String::new);

    use_effect(move || {
        let id = id();
        let range = DateRange {
            start: parse_date(&start()),
            end: parse_date(&end()),
        };
        spawn(async move {
            match api::ledger(id, range).await {
                Ok(loaded) => ledger.set(Some(loaded)),
                Err(e) => error_state.set(&e),
            }
        });
    });

    let Some(ledger) = ledger() else {
        return rsx! {
            Loading { label: "Loading ledger..." }
        };
    };
    let member = &ledger.member;
    let summary = ledger.summary();

    rsx! {
        div {
            PageHeader { title: "{member.name}", subtitle: "{member.mobile}",
                Link {
                    to: Route::add_transaction(Some(member.id), Some(TransactionKind::Credit)),
                    class: "btn btn-primary",
                    "Add Credit"
                }
                Link {
                    to: Route::add_transaction(Some(member.id), Some(TransactionKind::Debit)),
                    class: "btn btn-secondary",
                    "Record Payment"
                }
                Link { to: Route::edit_member(member.id), class: "btn btn-secondary", "Edit" }
            }

            div { class: "grid grid-cols-4",
                StatCard { label: "Total Credit", value: "{summary.credit}", tone: Tone::Warning }
                StatCard { label: "Total Paid", value: "{summary.debit}", tone: Tone::Positive }
                StatCard { label: "Net for Period", value: "{summary.balance}" }
                StatCard {
                    label: "Current Balance",
                    value: "{member.balance}",
                    tone: if member.balance.is_positive() { Tone::Negative } else { Tone::Positive },
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Transactions" }
                    DateRangeFields { start, end }
                }
                if ledger.transactions.is_empty() {
                    p { class: "text-muted", "No transactions in this period." }
                } else {
                    div { class: "table-container",
                        table {
                            thead {
                                tr {
                                    th { "Date" }
                                    th { "Type" }
                                    th { "Amount" }
                                    th { "Note" }
                                }
                            }
                            tbody {
                                for tx in ledger.transactions.iter() {
                                    {
                                        let (label, tone) = kind_badge(tx.kind);
                                        rsx! {
                                            tr { key: "{tx.id}",
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
}

/// Resolve the form into a transaction, or the message to show.
fn build_transaction(
    member: Option<MemberId>,
    amount: &str,
    kind: TransactionKind,
    date: &str,
    note: &str,
) -> Result<NewTransaction> {
    let Some(member_id) = member else {
        return Err(err!("{INVALID_TRANSACTION}"));
    };
    let amount = validate::positive_amount(amount, INVALID_TRANSACTION)?;
    let date = parse_date(date).ok_or_else(|| err!("Please pick a transaction date"))?;

    Ok(NewTransaction {
        member_id,
        amount,
        kind,
        date,
        note: note.trim().to_string(),
    })
}

#[component]
pub fn AddTransaction(user_id: ReadSignal<Option<String>>, kind: ReadSignal<Option<String>>) -> Element {
    let action = use_action();
    let mut error_state = use_error();
    let mut members = use_signal(Vec::<Member>::new);
    let mut search = use_signal(String::new);

    let prefilled = use_memo(move || user_id().and_then(|id| id.parse::<MemberId>().ok()));
    let mut selected = use_signal(|| None::<MemberId>);
    let mut tx_kind = use_signal(TransactionKind::default);
    let mut amount = use_signal(String::new);
    let date = use_signal(|| Zoned::now().date().to_string());
    let mut note = use_signal(String::new);

    use_effect(move || {
        spawn(async move {
            match api::members().await {
                Ok(loaded) => members.set(loaded),
                Err(e) => error_state.set(&e),
            }
        });
    });

    // Follow the query when it changes.
    use_effect(move || {
        selected.set(prefilled());
        tx_kind.set(kind().and_then(|k| k.parse().ok()).unwrap_or_default());
    });

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let built = build_transaction(selected(), &amount.read(), tx_kind(), &date.read(), &note.read());
        let validation = built.as_ref().map(|_| ()).map_err(Clone::clone);
        let return_to = prefilled();

        action.submit(
            validation,
            "Transaction added successfully",
            async move { api::add_transaction(built?).await },
            move |tx| {
                tracing::info!(member = %tx.member_id, id = tx.id, "transaction recorded");
                match return_to {
                    Some(id) => {
                        after_redirect_delay(move || {
                            navigator().push(Route::ledger(id));
                        });
                    }
                    None => {
                        selected.set(None);
                        amount.set(String::new());
                        note.set(String::new());
                        search.set(String::new());
                    }
                }
            },
        );
    };

    let filter = MemberFilter {
        search: search(),
        ..MemberFilter::default()
    };
    let candidates: Vec<Member> = filter
        .apply(&members.read())
        .into_iter()
        .take(8)
        .cloned()
        .collect();
    let chosen = selected().and_then(|id| members.read().iter().find(|m| m.id == id).cloned());

    rsx! {
        div {
            Toast { action }
            PageHeader { title: "Add Transaction", subtitle: "Record credit given or a payment received." }

            div { class: "card",
                form { onsubmit: submit,
                    div { class: "form-group",
                        label { class: "form-label", "User *" }
                        if let Some(member) = chosen {
                            div { class: "selected-member",
                                span { "{member.name} ({member.mobile})" }
                                span { class: "text-muted", "Balance {member.balance}" }
                                button {
                                    r#type: "button",
                                    class: "btn btn-secondary btn-sm",
                                    onclick: move |_| selected.set(None),
                                    "Change"
                                }
                            }
                        } else {
                            input {
                                class: "form-input",
                                placeholder: "Search by name or mobile",
                                value: "{search}",
                                oninput: move |e| search.set(e.value()),
                            }
                            ul { class: "member-picker",
                                for member in candidates {
                                    {
                                        let id = member.id;
                                        rsx! {
                                            li { key: "{id}",
                                                onclick: move |_| selected.set(Some(id)),
                                                "{member.name}"
                                                span { class: "text-muted", " {member.mobile}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div { class: "form-group",
                        label { class: "form-label", "Type" }
                        div { class: "tabs",
                            for choice in [TransactionKind::Credit, TransactionKind::Debit] {
                                {
                                    let (label, _) = kind_badge(choice);
                                    rsx! {
                                        button {
                                            r#type: "button",
                                            class: if tx_kind() == choice { "tab tab-active" } else { "tab" },
                                            onclick: move |_| tx_kind.set(choice),
                                            "{label}"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    TextField { id: "amount", label: "Amount", kind: "number", value: amount, required: true }
                    TextField { id: "date", label: "Date", kind: "date", value: date, required: true }
                    TextArea { id: "note", label: "Note", value: note }

                    div { class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: action.is_pending(),
                            if action.is_pending() { "Saving..." } else { "Add Transaction" }
                        }
                    }
                }
            }
        }
    }
}
