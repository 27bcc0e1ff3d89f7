use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorStatus {
    Active,
    Pending,
    Inactive,
}

impl SeniorStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorAccount {
    pub id: u32,
    pub name: String,
    pub total: Amount,
    pub paid: Amount,
    pub last_payment: Date,
    pub status: SeniorStatus,
}

impl SeniorAccount {
    pub fn pending(&self) -> Amount {
        self.total - self.paid
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorTotals {
    pub total: Amount,
    pub paid: Amount,
    pub pending: Amount,
    pub count: usize,
}

impl SeniorTotals {
    pub fn from_accounts(accounts: &[SeniorAccount]) -> Self {
        Self {
            total: accounts.iter().map(|a| a.total).sum(),
            paid: accounts.iter().map(|a| a.paid).sum(),
            pending: accounts.iter().map(SeniorAccount::pending).sum(),
            count: accounts.len(),
        }
    }
}

pub fn search_seniors<'a>(accounts: &'a [SeniorAccount], query: &str) -> Vec<&'a SeniorAccount> {
    let query = query.trim().to_lowercase();
    accounts
        .iter()
        .filter(|a| {
            query.is_empty() || a.name.to_lowercase().contains(&query) || a.id.to_string().contains(&query)
        })
        .collect()
}
