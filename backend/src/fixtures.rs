//! Deterministic demo data.
//!
//! Every generator draws from its own stream of a seeded [`StdRng`], so adding
//! a generator never shifts the data produced by another.

use jiff::{SignedDuration, Span, Timestamp, civil::Date};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use types::{
    Amount, Member, MemberId, Result, Transaction, TransactionKind,
    alert::{Alert, AlertKind, RiskLevel},
    ledger::MemberStatus,
    loan::{Loan, LoanStatus, LoanType},
    notification::{Channel, DeliveryStatus, Notification, sort_newest_first},
    profile::{Faq, LoginRecord, Profile},
    report::{Report, TopBorrower, WeeklySummary},
    senior::{SeniorAccount, SeniorStatus},
};

pub const MEMBER_COUNT: u32 = 50;
pub const LEDGER_LENGTH: i64 = 20;
pub const NOTIFICATION_COUNT: u32 = 15;
pub const LOAN_COUNT: u32 = 25;
pub const SENIOR_COUNT: u32 = 8;

fn rng(seed: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_mul(0x9e37_79b9_7f4a_7c15).wrapping_add(stream))
}

fn days_before(today: Date, days: i64) -> Result<Date> {
    Ok(today.checked_sub(Span::new().days(days))?)
}

fn mobile(rng: &mut StdRng) -> String {
    format!("+91 9{:09}", rng.gen_range(0..1_000_000_000u32))
}

pub fn members(seed: u64, today: Date) -> Result<Vec<Member>> {
    let mut rng = rng(seed, 1);

    (1..=MEMBER_COUNT)
        .map(|id| {
            Ok(Member {
                id: MemberId(id),
                name: format!("User {id}"),
                mobile: mobile(&mut rng),
                balance: Amount::from_rupees(rng.gen_range(0..20_000)),
                status: if rng.gen_bool(0.8) {
                    MemberStatus::Active
                } else {
                    MemberStatus::Inactive
                },
                last_transaction: days_before(today, rng.gen_range(0..30))?,
                notes: String::new(),
            })
        })
        .collect()
}

/// The last [`LEDGER_LENGTH`] days of activity for `member`, newest first.
///
/// Transaction ids start at `first_id`.
pub fn ledger(seed: u64, member: MemberId, today: Date, first_id: u32) -> Result<Vec<Transaction>> {
    let mut rng = rng(seed, 100 + u64::from(member.0));

    (0..LEDGER_LENGTH)
        .map(|day| {
            let kind = if rng.gen_bool(0.6) {
                TransactionKind::Credit
            } else {
                TransactionKind::Debit
            };
            Ok(Transaction {
                id: first_id + day as u32,
                member_id: member,
                date: days_before(today, day)?,
                amount: Amount::from_rupees(rng.gen_range(100..5100)),
                kind,
                note: match kind {
                    TransactionKind::Credit => "Credit added",
                    TransactionKind::Debit => "Payment received",
                }
                .to_string(),
            })
        })
        .collect()
}

pub fn notifications(seed: u64, members: &[Member], now: Timestamp) -> Result<Vec<Notification>> {
    let mut rng = rng(seed, 2);
    let week = SignedDuration::from_hours(7 * 24).as_secs();

    let mut notifications = Vec::new();
    for id in 1..=NOTIFICATION_COUNT {
        let Some(member) = members.choose(&mut rng) else {
            break;
        };
        let message = match id % 3 {
            1 => "Payment reminder: Your credit balance is due",
            2 => "New transaction added to your account",
            _ => "Thank you for your recent payment",
        };
        let status = match id % 4 {
            1 => DeliveryStatus::Pending,
            2 => DeliveryStatus::Sent,
            3 => DeliveryStatus::Delivered,
            _ => DeliveryStatus::Failed,
        };
        notifications.push(Notification {
            id,
            member_id: member.id,
            member_name: member.name.clone(),
            message: message.to_string(),
            channel: if id % 2 == 1 { Channel::Sms } else { Channel::Whatsapp },
            status,
            sent_at: now.checked_sub(SignedDuration::from_secs(rng.gen_range(0..week)))?,
        });
    }

    sort_newest_first(&mut notifications);
    Ok(notifications)
}

pub fn alerts() -> Vec<Alert> {
    [
        (AlertKind::Overdue, "Rahul Sharma", 8500, 45, RiskLevel::High),
        (AlertKind::Overdue, "Priya Patel", 6200, 38, RiskLevel::Medium),
        (AlertKind::HighBalance, "Amit Kumar", 12_500, 15, RiskLevel::High),
        (AlertKind::Inactive, "Neha Singh", 3200, 60, RiskLevel::Medium),
        (AlertKind::Overdue, "Vikram Mehta", 7800, 32, RiskLevel::Medium),
        (AlertKind::HighBalance, "Ananya Gupta", 9500, 25, RiskLevel::High),
        (AlertKind::Inactive, "Rajesh Verma", 4200, 55, RiskLevel::Low),
    ]
    .into_iter()
    .zip(1..)
    .map(|((kind, name, rupees, days, risk), id)| Alert {
        id,
        kind,
        member_id: MemberId(id * 7),
        member_name: name.to_string(),
        amount: Amount::from_rupees(rupees),
        days_since_payment: days,
        risk,
    })
    .collect()
}

pub fn loans(seed: u64, today: Date) -> Result<Vec<Loan>> {
    let mut rng = rng(seed, 3);
    let statuses = [LoanStatus::Active, LoanStatus::Completed, LoanStatus::Overdue];

    (1..=LOAN_COUNT)
        .map(|id| {
            let amount = Amount::from_rupees(rng.gen_range(10_000..60_000));
            let rate_basis_points: i64 = rng.gen_range(1000..1500);
            let tenure_months: u32 = rng.gen_range(6..18);
            let emi = Amount::from_paise(
                amount.paise() * (10_000 + rate_basis_points) / 10_000 / i64::from(tenure_months),
            );
            let status = statuses[rng.gen_range(0..statuses.len())];
            let paid_installments = match status {
                LoanStatus::Completed => tenure_months,
                _ => rng.gen_range(0..tenure_months),
            };
            let member = rng.gen_range(1..=100);

            Ok(Loan {
                id,
                member_id: MemberId(1000 + member),
                member_name: format!("User {member}"),
                amount,
                emi,
                tenure_months,
                paid_installments,
                cibil_score: rng.gen_range(500..800),
                status,
                loan_type: LoanType::ALL[rng.gen_range(0..LoanType::ALL.len())],
                applied_on: days_before(today, rng.gen_range(0..90))?,
                last_payment: days_before(today, rng.gen_range(0..30))?,
            })
        })
        .collect()
}

pub fn seniors(seed: u64, today: Date) -> Result<Vec<SeniorAccount>> {
    let mut rng = rng(seed, 4);

    (1..=SENIOR_COUNT)
        .map(|id| {
            let total = Amount::from_rupees(rng.gen_range(30_000..80_000));
            let paid = Amount::from_rupees(rng.gen_range(20_000..50_000)).min(total);
            Ok(SeniorAccount {
                id,
                name: format!("Senior Member {id}"),
                total,
                paid,
                last_payment: days_before(today, rng.gen_range(0..30))?,
                status: match id % 3 {
                    1 => SeniorStatus::Active,
                    2 => SeniorStatus::Pending,
                    _ => SeniorStatus::Inactive,
                },
            })
        })
        .collect()
}

pub fn report(from: Option<Date>, to: Option<Date>) -> Report {
    let weeks = [
        (12, 12_500, 8200),
        (8, 14_800, 9600),
        (15, 10_300, 7800),
        (10, 15_600, 11_200),
    ]
    .into_iter()
    .zip(1..)
    .map(|((new_members, credit, recovery), week)| WeeklySummary {
        week: format!("Week {week}"),
        new_members,
        credit: Amount::from_rupees(credit),
        recovery: Amount::from_rupees(recovery),
    })
    .collect();

    let top_borrowers = [
        ("Rahul Sharma", 12_500),
        ("Priya Patel", 9800),
        ("Amit Kumar", 8700),
        ("Neha Singh", 7200),
        ("Vikram Mehta", 6500),
        ("Ananya Gupta", 5900),
        ("Rajesh Verma", 5200),
        ("Sunita Rao", 4800),
        ("Kiran Joshi", 4300),
        ("Deepak Malhotra", 3900),
    ]
    .into_iter()
    .map(|(name, credit)| TopBorrower {
        name: name.to_string(),
        credit: Amount::from_rupees(credit),
    })
    .collect();

    Report {
        from,
        to,
        weeks,
        top_borrowers,
        active_members: 645,
        inactive_members: 144,
    }
}

pub fn profile() -> Profile {
    Profile {
        name: "Rajesh Kumar".to_string(),
        mobile: "+91 9876543210".to_string(),
        email: "rajesh.kumar@example.com".to_string(),
        language: "english".to_string(),
        notifications_enabled: true,
    }
}

pub fn login_history() -> Vec<LoginRecord> {
    [
        ("2023-06-15 14:32:10", "iPhone 13", "Mumbai, India", "192.168.1.1"),
        ("2023-06-14 09:15:22", "Chrome on Windows", "Mumbai, India", "192.168.1.1"),
        ("2023-06-12 18:45:30", "Safari on MacBook", "Delhi, India", "192.168.2.5"),
        ("2023-06-10 11:20:15", "Chrome on Android", "Pune, India", "192.168.3.8"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((at, device, location, ip), id)| LoginRecord {
        id,
        at: at.to_string(),
        device: device.to_string(),
        location: location.to_string(),
        ip: ip.to_string(),
    })
    .collect()
}

pub fn faqs() -> Vec<Faq> {
    [
        (
            "How do I add a new member?",
            "Open Members and choose Add Member. Name and mobile number are required; an initial credit is optional.",
        ),
        (
            "How do I record a transaction?",
            "Use Add Transaction, or open a member's ledger and choose Add Credit or Add Debit. Enter a positive amount, pick the type and submit.",
        ),
        (
            "How can I send payment reminders?",
            "On the Notifications page pick a member, write a message, choose SMS or WhatsApp and send. Automatic reminders are configured in the same place.",
        ),
        (
            "How do I generate reports?",
            "Open Reports, choose a date range and select Generate Report to see credit against recovery, top borrowers and weekly summaries.",
        ),
        (
            "What are alerts?",
            "Alerts flag overdue payments, high balances and inactive members. Thresholds are set from the Alerts page.",
        ),
        (
            "How do I change my password?",
            "Open Profile, enter your current password and the new one twice, then select Change Password.",
        ),
        (
            "How do I delete a member?",
            "Find the member on the Members page and choose Delete. You are asked to confirm first.",
        ),
        (
            "How secure is my data?",
            "Data stays in this browser. Sign out on shared devices.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| Faq {
        question: question.to_string(),
        answer: answer.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    const SEED: u64 = 7;

    fn today() -> Date {
        date(2024, 6, 15)
    }

    #[test]
    fn same_seed_same_members() {
        let first = members(SEED, today()).unwrap();
        let second = members(SEED, today()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), MEMBER_COUNT as usize);
        assert_ne!(first, members(SEED + 1, today()).unwrap());
    }

    #[test]
    fn members_look_plausible() {
        for member in members(SEED, today()).unwrap() {
            assert!(member.mobile.starts_with("+91 9"));
            assert_eq!(member.mobile.len(), "+91 9".len() + 9);
            assert!(member.balance >= Amount::ZERO);
            assert!(member.last_transaction <= today());
        }
    }

    #[test]
    fn ledger_runs_back_one_day_at_a_time() {
        let txs = ledger(SEED, MemberId(3), today(), 1).unwrap();
        assert_eq!(txs.len(), LEDGER_LENGTH as usize);
        assert_eq!(txs[0].date, today());
        assert_eq!(txs[19].date, date(2024, 5, 27));
        assert!(txs.iter().all(|t| t.amount.is_positive() && t.member_id == MemberId(3)));
    }

    #[test]
    fn notifications_are_newest_first() {
        let members = members(SEED, today()).unwrap();
        let now = Timestamp::from_second(1_718_400_000).unwrap();
        let notifications = notifications(SEED, &members, now).unwrap();

        assert_eq!(notifications.len(), NOTIFICATION_COUNT as usize);
        assert!(notifications.windows(2).all(|w| w[0].sent_at >= w[1].sent_at));
        assert!(notifications.iter().all(|n| n.sent_at <= now));
    }

    #[test]
    fn completed_loans_are_fully_paid() {
        for loan in loans(SEED, today()).unwrap() {
            assert!((500..800).contains(&loan.cibil_score));
            if loan.status == LoanStatus::Completed {
                assert_eq!(loan.outstanding_installments(), 0);
            }
        }
    }

    #[test]
    fn seniors_never_overpay() {
        let seniors = seniors(SEED, today()).unwrap();
        assert_eq!(seniors.len(), SENIOR_COUNT as usize);
        assert!(seniors.iter().all(|s| s.pending() >= Amount::ZERO));
    }
}
