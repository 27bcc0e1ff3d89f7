use dioxus::prelude::*;
use types::{
    profile::{Faq, SupportTicket, TicketPriority},
    validate,
};
use ui::{PageHeader, Toast, use_action};

use crate::views::components::{TextArea, TextField};

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Faqs,
    Contact,
}

fn search_faqs<'a>(faqs: &'a [Faq], query: &str) -> Vec<&'a Faq> {
    let query = query.trim().to_lowercase();
    faqs.iter()
        .filter(|faq| {
            query.is_empty()
                || faq.question.to_lowercase().contains(&query)
                || faq.answer.to_lowercase().contains(&query)
        })
        .collect()
}

#[component]
pub fn Help() -> Element {
    let mut tab = use_signal(|| Tab::Faqs);
    let tab_class = move |t: Tab| if tab() == t { "tab tab-active" } else { "tab" };

    rsx! {
        div {
            PageHeader { title: "Help & Support", subtitle: "Answers to common questions, or reach the support team." }
            div { class: "tabs",
                button { class: tab_class(Tab::Faqs), onclick: move |_| tab.set(Tab::Faqs), "FAQs" }
                button { class: tab_class(Tab::Contact), onclick: move |_| tab.set(Tab::Contact), "Contact Support" }
            }
            if tab() == Tab::Faqs {
                FaqList {}
            } else {
                ContactSupport {}
            }
        }
    }
}

#[component]
fn FaqList() -> Element {
    let faqs = use_hook(api::faqs);
    let mut query = use_signal(String::new);
    let mut open = use_signal(|| None::<usize>);

    let found = search_faqs(&faqs, &query.read());

    rsx! {
        div { class: "card",
            input {
                class: "form-input",
                placeholder: "Search FAQs",
                value: "{query}",
                oninput: move |e| {
                    query.set(e.value());
                    open.set(None);
                },
            }
            if found.is_empty() {
                p { class: "text-muted", "No FAQs match your search." }
            }
            for (index, faq) in found.into_iter().enumerate() {
                div { key: "{faq.question}", class: "faq",
                    button {
                        class: "faq-question",
                        onclick: move |_| open.set(if open() == Some(index) { None } else { Some(index) }),
                        "{faq.question}"
                    }
                    if open() == Some(index) {
                        p { class: "faq-answer", "{faq.answer}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ContactSupport() -> Element {
    let action = use_action();
    let mut subject = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut priority = use_signal(TicketPriority::default);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let validation = validate::required(
            &[subject.read().as_str(), description.read().as_str()],
            "Please fill in all required fields",
        );
        let ticket = SupportTicket {
            subject: subject().trim().to_string(),
            description: description().trim().to_string(),
            priority: priority(),
        };

        action.submit(
            validation,
            "Support ticket submitted successfully",
            api::submit_ticket(ticket),
            move |()| {
                subject.set(String::new());
                description.set(String::new());
                priority.set(TicketPriority::default());
            },
        );
    };

    rsx! {
        div { class: "grid grid-cols-2",
            Toast { action }
            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Submit a Ticket" }
                }
                form { onsubmit: submit,
                    TextField { id: "subject", label: "Subject", value: subject, required: true }
                    TextArea { id: "description", label: "Description", value: description, required: true }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "priority", "Priority" }
                        select {
                            id: "priority",
                            class: "form-input",
                            value: priority().as_str(),
                            onchange: move |e| {
                                if let Ok(parsed) = e.value().parse() {
                                    priority.set(parsed);
                                }
                            },
                            option { value: "low", "Low" }
                            option { value: "medium", "Medium" }
                            option { value: "high", "High" }
                        }
                    }
                    div { class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: action.is_pending(),
                            if action.is_pending() { "Submitting..." } else { "Submit Ticket" }
                        }
                    }
                }
            }
            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Other ways to reach us" }
                }
                p { "Email us and we will reply within 24 hours." }
                a { href: "mailto:support@leaderadmin.com", "support@leaderadmin.com" }
                p { "Call us Monday to Saturday, 9am to 6pm." }
                a { href: "tel:+919876543210", "+91 9876 543 210" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_search_looks_at_questions_and_answers() {
        let faqs = api::faqs();
        assert_eq!(search_faqs(&faqs, "").len(), faqs.len());

        let reminders = search_faqs(&faqs, "REMINDER");
        assert!(!reminders.is_empty());
        assert!(reminders.len() < faqs.len());

        assert!(search_faqs(&faqs, "zzz-no-such-topic").is_empty());
    }
}
