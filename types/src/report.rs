use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, Member, Transaction,
    ledger::MemberStatus,
    loan::{Loan, LoanStatus},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week: String,
    pub new_members: u32,
    pub credit: Amount,
    pub recovery: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopBorrower {
    pub name: String,
    pub credit: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub weeks: Vec<WeeklySummary>,
    pub top_borrowers: Vec<TopBorrower>,
    pub active_members: u32,
    pub inactive_members: u32,
}

impl Report {
    pub fn total_credit(&self) -> Amount {
        self.weeks.iter().map(|w| w.credit).sum()
    }

    pub fn total_recovery(&self) -> Amount {
        self.weeks.iter().map(|w| w.recovery).sum()
    }

    /// Recovered share of extended credit, in whole percent.
    pub fn recovery_rate(&self) -> u32 {
        let credit = self.total_credit().paise();
        if credit <= 0 {
            return 0;
        }
        ((self.total_recovery().paise() * 100) / credit) as u32
    }

    pub fn active_share(&self) -> u32 {
        let total = self.active_members + self.inactive_members;
        if total == 0 {
            return 0;
        }
        self.active_members * 100 / total
    }
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub members: usize,
    pub inactive_members: usize,
    /// Sum of positive member balances.
    pub outstanding: Amount,
    /// Loan instalments paid in the current calendar month.
    pub recovered: Amount,
    pub active_loans: usize,
    pub overdue_loans: usize,
}

impl DashboardStats {
    pub fn from_parts(members: &[Member], loans: &[Loan], today: Date) -> Self {
        Self {
            members: members.len(),
            inactive_members: members
                .iter()
                .filter(|m| m.status == MemberStatus::Inactive)
                .count(),
            outstanding: members
                .iter()
                .map(|m| m.balance)
                .filter(|b| b.is_positive())
                .sum(),
            recovered: loans
                .iter()
                .filter(|l| l.paid_installments > 0 && same_month(l.last_payment, today))
                .map(|l| l.emi)
                .sum(),
            active_loans: loans.iter().filter(|l| l.status == LoanStatus::Active).count(),
            overdue_loans: loans.iter().filter(|l| l.status == LoanStatus::Overdue).count(),
        }
    }
}

fn same_month(a: Date, b: Date) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub member_name: String,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent: Vec<RecentTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemberId, loan::LoanType};
    use jiff::civil::date;

    fn loan(id: u32, last_payment: Date, paid: u32) -> Loan {
        Loan {
            id,
            member_id: MemberId(id),
            member_name: format!("User {id}"),
            amount: Amount::from_rupees(24_000),
            emi: Amount::from_rupees(2000),
            tenure_months: 12,
            paid_installments: paid,
            cibil_score: 720,
            status: LoanStatus::Active,
            loan_type: LoanType::Business,
            applied_on: date(2024, 1, 10),
            last_payment,
        }
    }

    #[test]
    fn recovered_counts_only_this_months_payments() {
        let member = Member {
            id: MemberId(1),
            name: "User 1".into(),
            mobile: "+91 9876500001".into(),
            balance: Amount::from_rupees(1500),
            status: MemberStatus::Active,
            last_transaction: date(2024, 6, 2),
            notes: String::new(),
        };
        let loans = [
            loan(1, date(2024, 6, 3), 5),
            loan(2, date(2024, 5, 28), 4),
            loan(3, date(2023, 6, 3), 9),
            loan(4, date(2024, 6, 1), 0),
        ];

        let stats = DashboardStats::from_parts(&[member], &loans, date(2024, 6, 15));
        assert_eq!(stats.recovered, Amount::from_rupees(2000));
        assert_eq!(stats.outstanding, Amount::from_rupees(1500));
        assert_eq!(stats.active_loans, 4);
    }

    #[test]
    fn rates_are_whole_percentages() {
        let report = Report {
            from: None,
            to: None,
            weeks: vec![
                WeeklySummary {
                    week: "Week 1".into(),
                    new_members: 12,
                    credit: Amount::from_rupees(12_500),
                    recovery: Amount::from_rupees(8200),
                },
                WeeklySummary {
                    week: "Week 2".into(),
                    new_members: 8,
                    credit: Amount::from_rupees(14_800),
                    recovery: Amount::from_rupees(9600),
                },
            ],
            top_borrowers: Vec::new(),
            active_members: 645,
            inactive_members: 144,
        };

        assert_eq!(report.total_credit(), Amount::from_rupees(27_300));
        assert_eq!(report.recovery_rate(), 65);
        assert_eq!(report.active_share(), 81);
    }
}
