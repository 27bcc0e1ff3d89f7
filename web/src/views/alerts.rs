use dioxus::prelude::*;
use types::{
    Amount,
    alert::{Alert, AlertKind, AlertSettings, RiskLevel},
    err,
};
use ui::{Loading, PageHeader, StatCard, StatusBadge, Toast, Tone, use_action, use_error};

use crate::{Route, views::components::TextField};

fn risk_tone(risk: RiskLevel) -> Tone {
    match risk {
        RiskLevel::Low => Tone::Neutral,
        RiskLevel::Medium => Tone::Warning,
        RiskLevel::High => Tone::Negative,
    }
}

#[component]
pub fn Alerts() -> Element {
    let mut error_state = use_error();
    let action = use_action();
    let mut alerts = use_signal(|| None::<Vec<Alert>>);

    let mut overdue_days = use_signal(String::new);
    let mut high_balance = use_signal(String::new);
    let mut auto_alerts = use_signal(|| true);

    let mut show_settings = move |settings: AlertSettings| {
        overdue_days.set(settings.overdue_threshold_days.to_string());
        high_balance.set(settings.high_risk_threshold.rupees().to_string());
        auto_alerts.set(settings.auto_alerts);
    };

    use_effect(move || {
        spawn(async move {
            match api::alerts().await {
                Ok(overview) => {
                    show_settings(overview.settings);
                    alerts.set(Some(overview.alerts));
                }
                Err(e) => error_state.set(&e),
            }
        });
    });

    let save = move |e: FormEvent| {
        e.prevent_default();
        let days = overdue_days.read().trim().parse::<u32>();
        let threshold = Amount::parse(&high_balance.read());
        let (validation, settings) = match (days, threshold) {
            (Ok(days), Ok(threshold)) if threshold.is_positive() => (
                Ok(()),
                AlertSettings {
                    overdue_threshold_days: days,
                    high_risk_threshold: threshold,
                    auto_alerts: auto_alerts(),
                },
            ),
            _ => (
                Err(err!("Please enter valid thresholds")),
                AlertSettings::default(),
            ),
        };

        action.submit(
            validation,
            "Alert settings saved",
            api::save_alert_settings(settings),
            move |overview| {
                show_settings(overview.settings);
                alerts.set(Some(overview.alerts));
            },
        );
    };

    let Some(raised) = alerts() else {
        return rsx! {
            Loading { label: "Loading alerts..." }
        };
    };
    let count = |kind: AlertKind| raised.iter().filter(|a| a.kind == kind).count();
    let overdue = count(AlertKind::Overdue);
    let high = count(AlertKind::HighBalance);
    let inactive = count(AlertKind::Inactive);

    rsx! {
        div {
            Toast { action }
            PageHeader { title: "Risk Alerts", subtitle: "Members who need a follow-up." }

            div { class: "grid grid-cols-3",
                StatCard { label: "Overdue", value: "{overdue}", tone: Tone::Negative }
                StatCard { label: "High Balance", value: "{high}", tone: Tone::Warning }
                StatCard { label: "Inactive", value: "{inactive}" }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Alert Settings" }
                }
                form { onsubmit: save,
                    TextField { id: "overdue-days", label: "Overdue after (days)", kind: "number", value: overdue_days }
                    TextField { id: "high-balance", label: "High balance threshold", kind: "number", value: high_balance }
                    label { class: "checkbox-label",
                        input {
                            r#type: "checkbox",
                            checked: auto_alerts(),
                            onchange: move |e| auto_alerts.set(e.checked()),
                        }
                        span { "Raise alerts automatically" }
                    }
                    div { class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: action.is_pending(),
                            if action.is_pending() { "Saving..." } else { "Save Settings" }
                        }
                    }
                }
            }

            div { class: "card",
                if raised.is_empty() {
                    p { class: "text-muted", "No alerts under the current thresholds." }
                }
                for alert in raised.iter() {
                    div { key: "{alert.id}", class: "alert-row",
                        div { class: "alert-info",
                            StatusBadge { label: "{alert.risk.label()}", tone: risk_tone(alert.risk) }
                            strong { "{alert.kind.label()}" }
                            span { "{alert.member_name}" }
                            span { class: "text-muted",
                                "{alert.amount} outstanding, {alert.days_since_payment} days since last payment"
                            }
                        }
                        div { class: "row-actions",
                            Link { to: Route::ledger(alert.member_id), class: "btn btn-secondary btn-sm", "View Ledger" }
                            Link { to: Route::remind(alert.member_id), class: "btn btn-primary btn-sm", "Send Reminder" }
                        }
                    }
                }
            }
        }
    }
}
