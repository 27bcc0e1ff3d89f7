use dioxus::prelude::*;
use types::{
    Amount, Member, MemberId, Result, TransactionKind,
    ledger::{GeneratedCredentials, MemberFilter, MemberStatus, MemberUpdate, NewMember, PAGE_SIZE, paginate},
    validate,
};
use ui::{ConfirmDialog, Loading, PageHeader, StatusBadge, Toast, Tone, use_action, use_error};

use crate::{
    Route,
    views::components::{Pagination, TextArea, TextField, after_redirect_delay, format_date},
};

fn status_tone(status: MemberStatus) -> Tone {
    match status {
        MemberStatus::Active => Tone::Positive,
        MemberStatus::Inactive => Tone::Neutral,
    }
}

#[component]
pub fn Members() -> Element {
    let mut members = use_signal(Vec::<Member>::new);
    let mut loading = use_signal(|| true);
    let mut error_state = use_error();
    let action = use_action();

    let mut search = use_signal(String::new);
    let mut status = use_signal(String::new);
    let mut min_balance = use_signal(String::new);
    let mut page = use_signal(|| 1usize);
    let mut pending_delete = use_signal(|| None::<Member>);

    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match api::members().await {
                Ok(loaded) => members.set(loaded),
                Err(e) => error_state.set(&e),
            }
            loading.set(false);
        });
    });

    let filter = MemberFilter {
        search: search(),
        status: status().parse().ok(),
        min_balance: Amount::parse(&min_balance()).ok(),
    };
    let filtered: Vec<Member> = filter.apply(&members.read()).into_iter().cloned().collect();
    let shown = paginate(&filtered, page(), PAGE_SIZE);
    let total_pages = shown.total_pages;

    let confirm_delete = move |_: ()| {
        let Some(member) = pending_delete() else {
            return;
        };
        action.submit(
            Ok(()),
            "User deleted successfully",
            api::delete_member(member.id),
            move |removed: Member| {
                members.write().retain(|m| m.id != removed.id);
                pending_delete.set(None);
            },
        );
    };

    rsx! {
        div {
            Toast { action }
            PageHeader { title: "Users", subtitle: "Search, review and manage your members.",
                Link { to: Route::AddMember {}, class: "btn btn-primary", "Add User" }
            }

            if let Some(member) = pending_delete() {
                ConfirmDialog {
                    title: "Delete User",
                    message: "Delete {member.name}? Their ledger will be removed too.",
                    busy: action.is_pending(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }

            div { class: "card filters",
                input {
                    class: "form-input",
                    placeholder: "Search by name or mobile",
                    value: "{search}",
                    oninput: move |e| {
                        search.set(e.value());
                        page.set(1);
                    },
                }
                select {
                    class: "form-input",
                    value: "{status}",
                    onchange: move |e| {
                        status.set(e.value());
                        page.set(1);
                    },
                    option { value: "", "All statuses" }
                    option { value: MemberStatus::Active.as_str(), "Active" }
                    option { value: MemberStatus::Inactive.as_str(), "Inactive" }
                }
                input {
                    class: "form-input",
                    r#type: "number",
                    placeholder: "Minimum balance",
                    value: "{min_balance}",
                    oninput: move |e| {
                        min_balance.set(e.value());
                        page.set(1);
                    },
                }
            }

            if loading() {
                Loading { label: "Loading users..." }
            } else {
                div { class: "card",
                    div { class: "card-header",
                        h2 { class: "card-title", "{filtered.len()} users" }
                    }
                    div { class: "table-container",
                        table {
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Mobile" }
                                    th { "Balance" }
                                    th { "Status" }
                                    th { "Last Transaction" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for member in shown.items {
                                    {
                                        let id = member.id;
                                        let row = member.clone();
                                        rsx! {
                                            tr { key: "{id}",
                                                td { "{member.name}" }
                                                td { "{member.mobile}" }
                                                td { "{member.balance}" }
                                                td {
                                                    StatusBadge {
                                                        label: "{member.status.label()}",
                                                        tone: status_tone(member.status),
                                                    }
                                                }
                                                td { {format_date(member.last_transaction)} }
                                                td { class: "row-actions",
                                                    Link { to: Route::ledger(id), class: "btn btn-secondary btn-sm", "Ledger" }
                                                    Link { to: Route::edit_member(id), class: "btn btn-secondary btn-sm", "Edit" }
                                                    button {
                                                        class: "btn btn-danger btn-sm",
                                                        onclick: move |_| pending_delete.set(Some(row.clone())),
                                                        "Delete"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Pagination { page, total_pages }
                }
            }
        }
    }
}

const INVALID_CREDIT: &str = "Please enter a valid initial credit amount";

/// Resolve the add-user form. A blank initial credit means none.
fn build_member(name: &str, mobile: &str, initial_credit: &str, notes: &str) -> Result<NewMember> {
    validate::required(&[name, mobile], "Name and mobile number are required")?;
    let initial_credit = match initial_credit.trim() {
        "" => None,
        credit => Some(validate::positive_amount(credit, INVALID_CREDIT)?),
    };

    Ok(NewMember {
        name: name.trim().to_string(),
        mobile: mobile.trim().to_string(),
        initial_credit,
        notes: notes.to_string(),
    })
}

#[component]
pub fn AddMember() -> Element {
    let action = use_action();
    let mut name = use_signal(String::new);
    let mut mobile = use_signal(String::new);
    let mut initial_credit = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut issued = use_signal(|| None::<GeneratedCredentials>);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let built = build_member(&name.read(), &mobile.read(), &initial_credit.read(), &notes.read());
        let validation = built.as_ref().map(|_| ()).map_err(Clone::clone);

        action.submit(
            validation,
            "User added successfully",
            async move { api::add_member(built?).await },
            move |(member, credentials): (Member, GeneratedCredentials)| {
                tracing::info!(id = %member.id, "member added");
                issued.set(Some(credentials));
                name.set(String::new());
                mobile.set(String::new());
                initial_credit.set(String::new());
                notes.set(String::new());
            },
        );
    };

    rsx! {
        div {
            Toast { action }
            PageHeader { title: "Add User", subtitle: "Register a new member and issue their login.",
                Link { to: Route::Members {}, class: "btn btn-secondary", "Back to Users" }
            }

            if let Some(credentials) = issued() {
                div { class: "card credentials-card",
                    h2 { class: "card-title", "Login credentials" }
                    p { class: "text-muted", "Share these with the member. They are shown only once." }
                    dl {
                        dt { "Username" }
                        dd { code { "{credentials.username}" } }
                        dt { "Password" }
                        dd { code { "{credentials.password}" } }
                    }
                    button {
                        class: "btn btn-secondary btn-sm",
                        onclick: move |_| issued.set(None),
                        "Dismiss"
                    }
                }
            }

            div { class: "card",
                form { onsubmit: submit,
                    TextField { id: "name", label: "Full Name", value: name, required: true }
                    TextField {
                        id: "mobile",
                        label: "Mobile Number",
                        kind: "tel",
                        value: mobile,
                        placeholder: "+91 9876543210",
                        required: true,
                    }
                    TextField {
                        id: "initial-credit",
                        label: "Initial Credit",
                        kind: "number",
                        value: initial_credit,
                        placeholder: "0",
                    }
                    TextArea { id: "notes", label: "Notes", value: notes }
                    div { class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: action.is_pending(),
                            if action.is_pending() { "Adding..." } else { "Add User" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn EditMember(id: ReadSignal<MemberId>) -> Element {
    let action = use_action();
    let mut error_state = use_error();
    let mut loaded = use_signal(|| None::<Member>);
    let mut name = use_signal(String::new);
    let mut mobile = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut status = use_signal(MemberStatus::default);

    use_effect(move || {
        let id = id();
        spawn(async move {
            match api::member(id).await {
                Ok(member) => {
                    name.set(member.name.clone());
                    mobile.set(member.mobile.clone());
                    notes.set(member.notes.clone());
                    status.set(member.status);
                    loaded.set(Some(member));
                }
                Err(e) => error_state.set(&e),
            }
        });
    });

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let validation = validate::required(
            &[name.read().as_str(), mobile.read().as_str()],
            "Name and mobile number are required",
        );
        let update = MemberUpdate {
            name: name().trim().to_string(),
            mobile: mobile().trim().to_string(),
            notes: notes(),
            status: status(),
        };

        action.submit(
            validation,
            "User updated successfully",
            api::update_member(id(), update),
            move |member: Member| {
                loaded.set(Some(member));
                after_redirect_delay(|| {
                    navigator().push(Route::Members {});
                });
            },
        );
    };

    let Some(member) = loaded() else {
        return rsx! {
            Loading { label: "Loading user..." }
        };
    };

    rsx! {
        div {
            Toast { action }
            PageHeader { title: "Edit User", subtitle: "{member.name}",
                Link { to: Route::ledger(member.id), class: "btn btn-secondary", "View Ledger" }
                Link {
                    to: Route::add_transaction(Some(member.id), Some(TransactionKind::Credit)),
                    class: "btn btn-primary",
                    "Add Credit"
                }
            }

            div { class: "card",
                form { onsubmit: submit,
                    TextField { id: "name", label: "Full Name", value: name, required: true }
                    TextField { id: "mobile", label: "Mobile Number", kind: "tel", value: mobile, required: true }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "status", "Status" }
                        select {
                            id: "status",
                            class: "form-input",
                            value: status().as_str(),
                            onchange: move |e| {
                                if let Ok(parsed) = e.value().parse() {
                                    status.set(parsed);
                                }
                            },
                            option { value: MemberStatus::Active.as_str(), "Active" }
                            option { value: MemberStatus::Inactive.as_str(), "Inactive" }
                        }
                    }
                    TextArea { id: "notes", label: "Notes", value: notes }
                    p { class: "text-muted", "Current balance: {member.balance}" }
                    div { class: "form-actions",
                        Link { to: Route::Members {}, class: "btn btn-secondary", "Cancel" }
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: action.is_pending(),
                            if action.is_pending() { "Saving..." } else { "Save Changes" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_credit_is_optional_but_must_be_positive() {
        let member = build_member(" Asha Rao ", "+91 9000000001", "  ", "").unwrap();
        assert_eq!(member.name, "Asha Rao");
        assert_eq!(member.initial_credit, None);

        let member = build_member("Asha Rao", "+91 9000000001", "1,500", "").unwrap();
        assert_eq!(member.initial_credit, Some(Amount::from_rupees(1500)));

        for credit in ["0", "-20", "abc"] {
            let error = build_member("Asha Rao", "+91 9000000001", credit, "").unwrap_err();
            assert_eq!(error.message(), INVALID_CREDIT);
        }

        let error = build_member("", "+91 9000000001", "100", "").unwrap_err();
        assert_eq!(error.message(), "Name and mobile number are required");
    }
}
