use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Amount, Error, MemberId, err};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Completed,
    Overdue,
}

impl LoanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

impl FromStr for LoanStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            other => Err(err!("unknown loan status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    Personal,
    Business,
    Home,
    Education,
}

impl LoanType {
    pub const ALL: [Self; 4] = [Self::Personal, Self::Business, Self::Home, Self::Education];

    pub fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Business => "Business",
            Self::Home => "Home",
            Self::Education => "Education",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: u32,
    pub member_id: MemberId,
    pub member_name: String,
    pub amount: Amount,
    pub emi: Amount,
    pub tenure_months: u32,
    pub paid_installments: u32,
    pub cibil_score: u32,
    pub status: LoanStatus,
    pub loan_type: LoanType,
    pub applied_on: Date,
    pub last_payment: Date,
}

impl Loan {
    pub fn recovered(&self) -> Amount {
        Amount::from_paise(self.emi.paise().saturating_mul(i64::from(self.paid_installments)))
    }

    pub fn outstanding_installments(&self) -> u32 {
        self.tenure_months.saturating_sub(self.paid_installments)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
    pub total_amount: Amount,
    pub recovered_amount: Amount,
    pub overdue_amount: Amount,
    pub average_cibil: u32,
}

impl LoanStats {
    pub fn from_loans(loans: &[Loan]) -> Self {
        let count = |status: LoanStatus| loans.iter().filter(|l| l.status == status).count();
        let overdue_amount: Amount = loans
            .iter()
            .filter(|l| l.status == LoanStatus::Overdue)
            .map(|l| Amount::from_paise(l.emi.paise().saturating_mul(i64::from(l.outstanding_installments()))))
            .sum();
        let average_cibil = match loans.len() {
            0 => 0,
            n => {
                let total: u32 = loans.iter().map(|l| l.cibil_score).sum();
                (f64::from(total) / n as f64).round() as u32
            }
        };

        Self {
            total: loans.len(),
            active: count(LoanStatus::Active),
            completed: count(LoanStatus::Completed),
            overdue: count(LoanStatus::Overdue),
            total_amount: loans.iter().map(|l| l.amount).sum(),
            recovered_amount: loans.iter().map(Loan::recovered).sum(),
            overdue_amount,
            average_cibil,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoanSortKey {
    #[default]
    Id,
    Amount,
    Cibil,
    AppliedOn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanQuery {
    pub search: String,
    pub status: Option<LoanStatus>,
    pub sort: LoanSortKey,
    pub descending: bool,
}

impl LoanQuery {
    pub fn apply(&self, loans: &[Loan]) -> Vec<Loan> {
        let search = self.search.trim().to_lowercase();
        let mut found: Vec<Loan> = loans
            .iter()
            .filter(|l| {
                search.is_empty()
                    || l.member_name.to_lowercase().contains(&search)
                    || l.member_id.to_string().contains(&search)
            })
            .filter(|l| self.status.is_none_or(|s| l.status == s))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            let ord = match self.sort {
                LoanSortKey::Id => a.id.cmp(&b.id),
                LoanSortKey::Amount => a.amount.cmp(&b.amount),
                LoanSortKey::Cibil => a.cibil_score.cmp(&b.cibil_score),
                LoanSortKey::AppliedOn => a.applied_on.cmp(&b.applied_on),
            };
            if self.descending { ord.reverse() } else { ord }
        });
        found
    }
}
