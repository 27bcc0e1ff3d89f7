use dioxus::prelude::*;
use types::{
    ledger::DateRange,
    report::Report,
};
use ui::{Loading, PageHeader, StatCard, Toast, Tone, use_action, use_error};

use crate::views::components::{DateRangeFields, format_date, parse_date};

/// Percentage of `value` within `max`, for bar widths.
fn share(value: i64, max: i64) -> i64 {
    if max <= 0 {
        return 0;
    }
    (value * 100 / max).clamp(0, 100)
}

#[component]
pub fn Reports() -> Element {
    let mut error_state = use_error();
    let action = use_action();
    let mut report = use_signal(|| None::<Report>);
    let start = use_signal(String::new);
    let end = use_signal(String::new);

    use_effect(move || {
        spawn(async move {
            match api::report().await {
                Ok(loaded) => report.set(Some(loaded)),
                Err(e) => error_state.set(&e),
            }
        });
    });

    let generate = move |_: MouseEvent| {
        let range = DateRange {
            start: parse_date(&start.read()),
            end: parse_date(&end.read()),
        };
        action.submit(
            Ok(()),
            "Report generated successfully",
            api::generate_report(range),
            move |generated| report.set(Some(generated)),
        );
    };

    let Some(report) = report() else {
        return rsx! {
            Loading { label: "Loading reports..." }
        };
    };

    let peak = report
        .weeks
        .iter()
        .map(|w| w.credit.paise().max(w.recovery.paise()))
        .max()
        .unwrap_or(0);
    let top_credit = report
        .top_borrowers
        .iter()
        .map(|b| b.credit.paise())
        .max()
        .unwrap_or(0);
    let period = match (report.from, report.to) {
        (Some(from), Some(to)) => format!("{} to {}", format_date(from), format_date(to)),
        (Some(from), None) => format!("From {}", format_date(from)),
        (None, Some(to)) => format!("Until {}", format_date(to)),
        (None, None) => "Last four weeks".to_string(),
    };
    let active_share = report.active_share();

    rsx! {
        div {
            Toast { action }
            PageHeader { title: "Reports", subtitle: "{period}",
                DateRangeFields { start, end }
                button {
                    class: "btn btn-primary",
                    disabled: action.is_pending(),
                    onclick: generate,
                    if action.is_pending() { "Generating..." } else { "Generate Report" }
                }
            }

            div { class: "grid grid-cols-3",
                StatCard { label: "Credit Given", value: "{report.total_credit()}", tone: Tone::Warning }
                StatCard { label: "Recovered", value: "{report.total_recovery()}", tone: Tone::Positive }
                StatCard { label: "Recovery Rate", value: "{report.recovery_rate()}%" }
            }

            div { class: "grid grid-cols-2",
                div { class: "card",
                    div { class: "card-header",
                        h2 { class: "card-title", "Credit vs Recovery" }
                    }
                    for week in report.weeks.iter() {
                        div { key: "{week.week}", class: "chart-row",
                            span { class: "chart-label", "{week.week}" }
                            div { class: "chart-bars",
                                div {
                                    class: "bar bar-credit",
                                    style: "width: {share(week.credit.paise(), peak)}%",
                                    title: "{week.credit}",
                                }
                                div {
                                    class: "bar bar-recovery",
                                    style: "width: {share(week.recovery.paise(), peak)}%",
                                    title: "{week.recovery}",
                                }
                            }
                            span { class: "text-muted", "{week.new_members} new" }
                        }
                    }
                }

                div { class: "card",
                    div { class: "card-header",
                        h2 { class: "card-title", "Member Status" }
                    }
                    div { class: "status-split",
                        div { class: "bar bar-active", style: "width: {active_share}%" }
                    }
                    p { "{report.active_members} active, {report.inactive_members} inactive ({active_share}% active)" }
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Top Borrowers" }
                }
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                th { "#" }
                                th { "Name" }
                                th { "Credit" }
                                th { "" }
                            }
                        }
                        tbody {
                            for (rank, borrower) in report.top_borrowers.iter().enumerate() {
                                tr { key: "{borrower.name}",
                                    td { "{rank + 1}" }
                                    td { "{borrower.name}" }
                                    td { "{borrower.credit}" }
                                    td {
                                        div {
                                            class: "bar bar-credit",
                                            style: "width: {share(borrower.credit.paise(), top_credit)}%",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_share_is_clamped() {
        assert_eq!(share(50, 200), 25);
        assert_eq!(share(300, 200), 100);
        assert_eq!(share(10, 0), 0);
    }
}
