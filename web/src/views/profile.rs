use dioxus::prelude::*;
use types::{
    profile::{LoginRecord, Profile as Details},
    validate::{self, PasswordChange, PasswordErrors},
};
use ui::{Loading, PageHeader, Toast, use_action, use_error};

use crate::views::components::TextField;

const LANGUAGES: [(&str, &str); 5] = [
    ("english", "English"),
    ("hindi", "Hindi"),
    ("marathi", "Marathi"),
    ("gujarati", "Gujarati"),
    ("tamil", "Tamil"),
];

#[component]
pub fn Profile() -> Element {
    let mut error_state = use_error();
    let mut saved = use_signal(|| None::<Details>);
    let mut history = use_signal(Vec::<LoginRecord>::new);

    use_effect(move || {
        spawn(async move {
            match api::account().await {
                Ok(account) => {
                    saved.set(Some(account.profile));
                    history.set(account.login_history);
                }
                Err(e) => error_state.set(&e),
            }
        });
    });

    let Some(details) = saved() else {
        return rsx! {
            Loading { label: "Loading profile..." }
        };
    };

    rsx! {
        div {
            PageHeader { title: "Profile", subtitle: "Your details, password and sign-in activity." }
            div { class: "grid grid-cols-2",
                ProfileForm { details, on_saved: move |updated| saved.set(Some(updated)) }
                PasswordForm {}
            }
            LoginHistory { records: history() }
        }
    }
}

#[component]
fn ProfileForm(details: Details, on_saved: EventHandler<Details>) -> Element {
    let action = use_action();
    let mut editing = use_signal(|| false);
    let mut name = use_signal(|| details.name.clone());
    let mut mobile = use_signal(|| details.mobile.clone());
    let mut email = use_signal(|| details.email.clone());
    let mut language = use_signal(|| details.language.clone());
    let mut notifications = use_signal(|| details.notifications_enabled);

    let original = details.clone();
    let mut reset = move || {
        name.set(original.name.clone());
        mobile.set(original.mobile.clone());
        email.set(original.email.clone());
        language.set(original.language.clone());
        notifications.set(original.notifications_enabled);
        editing.set(false);
    };

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let validation = validate::required(
            &[name.read().as_str(), mobile.read().as_str()],
            "Name and mobile number are required",
        );
        let profile = Details {
            name: name().trim().to_string(),
            mobile: mobile().trim().to_string(),
            email: email().trim().to_string(),
            language: language(),
            notifications_enabled: notifications(),
        };

        action.submit(
            validation,
            "Profile updated successfully",
            api::save_profile(profile),
            move |updated: Details| {
                editing.set(false);
                on_saved.call(updated);
            },
        );
    };

    rsx! {
        div { class: "card",
            Toast { action }
            div { class: "card-header",
                h2 { class: "card-title", "Personal Information" }
                if !editing() {
                    button { class: "btn btn-secondary btn-sm", onclick: move |_| editing.set(true), "Edit" }
                }
            }
            form { onsubmit: submit,
                fieldset { disabled: !editing(),
                    TextField { id: "profile-name", label: "Full Name", value: name, required: true }
                    TextField { id: "profile-mobile", label: "Mobile Number", kind: "tel", value: mobile, required: true }
                    TextField { id: "profile-email", label: "Email Address", kind: "email", value: email }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "language", "Language Preference" }
                        select {
                            id: "language",
                            class: "form-input",
                            value: "{language}",
                            onchange: move |e| language.set(e.value()),
                            for (value, label) in LANGUAGES {
                                option { value, "{label}" }
                            }
                        }
                    }
                    label { class: "checkbox-label",
                        input {
                            r#type: "checkbox",
                            checked: notifications(),
                            onchange: move |e| notifications.set(e.checked()),
                        }
                        span { "Receive notifications" }
                    }
                }
                if editing() {
                    div { class: "form-actions",
                        button {
                            r#type: "button",
                            class: "btn btn-secondary",
                            onclick: move |_| {
                                action.cancel();
                                reset();
                            },
                            "Cancel"
                        }
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

#[component]
fn PasswordForm() -> Element {
    let action = use_action();
    let mut current = use_signal(String::new);
    let mut new = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut errors = use_signal(PasswordErrors::default);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let change = PasswordChange {
            current: current(),
            new: new(),
            confirm: confirm(),
        };
        // Problems show inline under each field rather than as a toast.
        if let Err(found) = change.validate() {
            errors.set(found);
            return;
        }
        errors.set(PasswordErrors::default());

        action.submit(Ok(()), "Password changed successfully", api::change_password(change), move |()| {
            current.set(String::new());
            new.set(String::new());
            confirm.set(String::new());
        });
    };

    let shown = errors();

    rsx! {
        div { class: "card",
            Toast { action }
            div { class: "card-header",
                h2 { class: "card-title", "Change Password" }
            }
            form { onsubmit: submit,
                TextField {
                    id: "current-password",
                    label: "Current Password",
                    kind: "password",
                    value: current,
                    required: true,
                    error: shown.current.map(str::to_string),
                }
                TextField {
                    id: "new-password",
                    label: "New Password",
                    kind: "password",
                    value: new,
                    required: true,
                    error: shown.new.map(str::to_string),
                }
                TextField {
                    id: "confirm-password",
                    label: "Confirm New Password",
                    kind: "password",
                    value: confirm,
                    required: true,
                    error: shown.confirm.map(str::to_string),
                }
                div { class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: action.is_pending(),
                        if action.is_pending() { "Updating..." } else { "Update Password" }
                    }
                }
            }
        }
    }
}

#[component]
fn LoginHistory(records: Vec<LoginRecord>) -> Element {
    rsx! {
        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "Login History" }
            }
            div { class: "table-container",
                table {
                    thead {
                        tr {
                            th { "Date & Time" }
                            th { "Device" }
                            th { "Location" }
                            th { "IP Address" }
                        }
                    }
                    tbody {
                        for record in records {
                            tr { key: "{record.id}",
                                td { "{record.at}" }
                                td { "{record.device}" }
                                td { "{record.location}" }
                                td { "{record.ip}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
