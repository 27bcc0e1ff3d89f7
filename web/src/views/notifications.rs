use dioxus::prelude::*;
use types::{
    Member, MemberId,
    notification::{Channel, DeliveryStatus, NewReminder, Notification, ReminderFrequency, ReminderSettings},
    validate,
};
use ui::{Loading, PageHeader, StatusBadge, Toast, Tone, use_action, use_error};

use crate::views::components::{TextArea, format_timestamp};

fn delivery_tone(status: DeliveryStatus) -> Tone {
    match status {
        DeliveryStatus::Pending => Tone::Warning,
        DeliveryStatus::Sent | DeliveryStatus::Delivered => Tone::Positive,
        DeliveryStatus::Failed => Tone::Negative,
    }
}

fn default_message(member: Option<&Member>) -> String {
    match member {
        Some(member) => format!(
            "Dear {}, your outstanding balance is {}. Please clear it at the earliest.",
            member.name, member.balance
        ),
        None => String::new(),
    }
}

#[component]
pub fn Notifications(user_id: ReadSignal<Option<String>>) -> Element {
    let mut error_state = use_error();
    let mut history = use_signal(Vec::<Notification>::new);
    let mut members = use_signal(Vec::<Member>::new);
    let mut settings = use_signal(ReminderSettings::default);
    let mut loading = use_signal(|| true);

    let send = use_action();
    let resend = use_action();
    let save = use_action();

    let mut recipient = use_signal(String::new);
    let mut channel = use_signal(Channel::default);
    let mut message = use_signal(String::new);

    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match (api::notifications().await, api::members().await) {
                (Ok(center), Ok(loaded)) => {
                    history.set(center.history);
                    settings.set(center.settings);
                    channel.set(center.settings.preferred_channel);
                    members.set(loaded);
                }
                (Err(e), _) | (_, Err(e)) => error_state.set(&e),
            }
            loading.set(false);
        });
    });

    // A link from the alerts page preselects the member and drafts a message.
    use_effect(move || {
        let Some(id) = user_id() else {
            return;
        };
        let wanted = id.parse::<MemberId>().ok();
        let members = members.read();
        let member = members.iter().find(|m| Some(m.id) == wanted);
        if member.is_some() {
            recipient.set(id);
            message.set(default_message(member));
        }
    });

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let validation = validate::required(
            &[recipient.read().as_str(), message.read().as_str()],
            "Please select a user and enter a message",
        );
        let reminder = NewReminder {
            member_id: recipient().parse().unwrap_or(MemberId(0)),
            message: message().trim().to_string(),
            channel: channel(),
        };

        send.submit(validation, "Reminder sent successfully", api::send_reminder(reminder), move |sent| {
            history.write().insert(0, sent);
            recipient.set(String::new());
            message.set(String::new());
        });
    };

    let save_settings = move |_: MouseEvent| {
        save.submit(
            Ok(()),
            "Settings saved successfully",
            api::save_reminder_settings(settings()),
            |_| {},
        );
    };

    if loading() {
        return rsx! {
            Loading { label: "Loading notifications..." }
        };
    }

    let current = settings();

    rsx! {
        div {
            Toast { action: send }
            Toast { action: resend }
            Toast { action: save }
            PageHeader { title: "Notifications", subtitle: "Send payment reminders and review delivery." }

            div { class: "grid grid-cols-2",
                div { class: "card",
                    div { class: "card-header",
                        h2 { class: "card-title", "Send Reminder" }
                    }
                    form { onsubmit: submit,
                        div { class: "form-group",
                            label { class: "form-label", r#for: "recipient", "User *" }
                            select {
                                id: "recipient",
                                class: "form-input",
                                value: "{recipient}",
                                onchange: move |e| {
                                    let value = e.value();
                                    let drafted = {
                                        let members = members.read();
                                        let wanted = value.parse::<MemberId>().ok();
                                        default_message(members.iter().find(|m| Some(m.id) == wanted))
                                    };
                                    if message.read().trim().is_empty() {
                                        message.set(drafted);
                                    }
                                    recipient.set(value);
                                },
                                option { value: "", "Select a user" }
                                for member in members.read().iter() {
                                    option { key: "{member.id}", value: "{member.id}", "{member.name} ({member.balance})" }
                                }
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-label", "Channel" }
                            div { class: "tabs",
                                for choice in [Channel::Sms, Channel::Whatsapp] {
                                    button {
                                        r#type: "button",
                                        class: if channel() == choice { "tab tab-active" } else { "tab" },
                                        onclick: move |_| channel.set(choice),
                                        "{choice.label()}"
                                    }
                                }
                            }
                        }
                        TextArea { id: "message", label: "Message", value: message, required: true }
                        div { class: "form-actions",
                            button {
                                r#type: "submit",
                                class: "btn btn-primary",
                                disabled: send.is_pending(),
                                if send.is_pending() { "Sending..." } else { "Send Reminder" }
                            }
                        }
                    }
                }

                div { class: "card",
                    div { class: "card-header",
                        h2 { class: "card-title", "Reminder Settings" }
                    }
                    label { class: "checkbox-label",
                        input {
                            r#type: "checkbox",
                            checked: current.auto_reminders,
                            onchange: move |e| settings.write().auto_reminders = e.checked(),
                        }
                        span { "Send automatic reminders" }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "preferred-channel", "Preferred channel" }
                        select {
                            id: "preferred-channel",
                            class: "form-input",
                            value: current.preferred_channel.as_str(),
                            onchange: move |e| {
                                if let Ok(parsed) = e.value().parse() {
                                    settings.write().preferred_channel = parsed;
                                }
                            },
                            option { value: Channel::Sms.as_str(), "SMS" }
                            option { value: Channel::Whatsapp.as_str(), "WhatsApp" }
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "frequency", "Frequency" }
                        select {
                            id: "frequency",
                            class: "form-input",
                            value: current.frequency.as_str(),
                            onchange: move |e| {
                                if let Ok(parsed) = e.value().parse() {
                                    settings.write().frequency = parsed;
                                }
                            },
                            option { value: ReminderFrequency::Daily.as_str(), "Daily" }
                            option { value: ReminderFrequency::Weekly.as_str(), "Weekly" }
                            option { value: ReminderFrequency::Monthly.as_str(), "Monthly" }
                        }
                    }
                    div { class: "form-actions",
                        button {
                            class: "btn btn-primary",
                            disabled: save.is_pending(),
                            onclick: save_settings,
                            if save.is_pending() { "Saving..." } else { "Save Settings" }
                        }
                    }
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "History" }
                }
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                th { "User" }
                                th { "Message" }
                                th { "Channel" }
                                th { "Status" }
                                th { "Sent" }
                                th { "" }
                            }
                        }
                        tbody {
                            for notification in history.read().iter() {
                                {
                                    let id = notification.id;
                                    let status = notification.status;
                                    rsx! {
                                        tr { key: "{id}",
                                            td { "{notification.member_name}" }
                                            td { class: "message-cell", "{notification.message}" }
                                            td { "{notification.channel.label()}" }
                                            td {
                                                StatusBadge { label: "{status.label()}", tone: delivery_tone(status) }
                                            }
                                            td { {format_timestamp(notification.sent_at)} }
                                            td {
                                                if matches!(status, DeliveryStatus::Pending | DeliveryStatus::Failed) {
                                                    button {
                                                        class: "btn btn-secondary btn-sm",
                                                        disabled: resend.is_pending(),
                                                        onclick: move |_| {
                                                            resend.submit(
                                                                Ok(()),
                                                                "Notification resent",
                                                                api::resend_notification(id),
                                                                move |updated: Notification| {
                                                                    if let Some(row) = history.write().iter_mut().find(|n| n.id == updated.id) {
                                                                        *row = updated;
                                                                    }
                                                                },
                                                            );
                                                        },
                                                        "Resend"
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
    }
}
