use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{Amount, Error, err};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub u32);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for MemberId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(err!("unknown member status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub mobile: String,
    pub balance: Amount,
    pub status: MemberStatus,
    pub last_transaction: Date,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub mobile: String,
    pub initial_credit: Option<Amount>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberUpdate {
    pub name: String,
    pub mobile: String,
    pub notes: String,
    pub status: MemberStatus,
}

/// Login generated for a newly added member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(err!("unknown transaction type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    pub member_id: MemberId,
    pub date: Date,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub member_id: MemberId,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub date: Date,
    pub note: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub credit: Amount,
    pub debit: Amount,
    pub balance: Amount,
}

impl LedgerSummary {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (credit, debit) = transactions.into_iter().fold(
            (Amount::ZERO, Amount::ZERO),
            |(credit, debit), t| match t.kind {
                TransactionKind::Credit => (credit + t.amount, debit),
                TransactionKind::Debit => (credit, debit + t.amount),
            },
        );

        Self {
            credit,
            debit,
            balance: credit - debit,
        }
    }
}

/// Inclusive date filter used by the ledger page. Open ends match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub member: Member,
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_transactions(&self.transactions)
    }

    pub fn within(&self, range: DateRange) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| range.contains(t.date))
            .cloned()
            .collect()
    }
}

/// Search and filter state of the member list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub search: String,
    pub status: Option<MemberStatus>,
    pub min_balance: Option<Amount>,
}

impl MemberFilter {
    pub fn matches(&self, member: &Member) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || member.name.to_lowercase().contains(&search)
            || member.mobile.contains(&search);

        matches_search
            && self.status.is_none_or(|status| member.status == status)
            && self.min_balance.is_none_or(|min| member.balance >= min)
    }

    pub fn apply<'a>(&self, members: &'a [Member]) -> Vec<&'a Member> {
        members.iter().filter(|m| self.matches(m)).collect()
    }
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
}

pub const PAGE_SIZE: usize = 10;

/// Slice out page `number` (1-based), clamped to the available pages.
pub fn paginate<T: Clone>(items: &[T], number: usize, per_page: usize) -> Page<T> {
    let total_pages = items.len().div_ceil(per_page.max(1));
    let number = number.clamp(1, total_pages.max(1));
    let start = (number - 1) * per_page;

    Page {
        items: items.iter().skip(start).take(per_page).cloned().collect(),
        number,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn member(id: u32, name: &str, balance: i64, status: MemberStatus) -> Member {
        Member {
            id: MemberId(id),
            name: name.to_string(),
            mobile: format!("+91 98765{id:05}"),
            balance: Amount::from_rupees(balance),
            status,
            last_transaction: date(2024, 6, 1),
            notes: String::new(),
        }
    }

    fn tx(id: u32, day: i8, kind: TransactionKind, rupees: i64) -> Transaction {
        Transaction {
            id,
            member_id: MemberId(1),
            date: date(2024, 6, day),
            amount: Amount::from_rupees(rupees),
            kind,
            note: String::new(),
        }
    }

    #[test]
    fn summary_nets_credit_against_debit() {
        let txs = [
            tx(1, 1, TransactionKind::Credit, 1000),
            tx(2, 2, TransactionKind::Debit, 300),
            tx(3, 3, TransactionKind::Credit, 50),
        ];
        let summary = LedgerSummary::from_transactions(&txs);
        assert_eq!(summary.credit, Amount::from_rupees(1050));
        assert_eq!(summary.debit, Amount::from_rupees(300));
        assert_eq!(summary.balance, Amount::from_rupees(750));
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange {
            start: Some(date(2024, 6, 2)),
            end: Some(date(2024, 6, 3)),
        };
        assert!(!range.contains(date(2024, 6, 1)));
        assert!(range.contains(date(2024, 6, 2)));
        assert!(range.contains(date(2024, 6, 3)));
        assert!(DateRange::default().contains(date(1999, 1, 1)));
    }

    #[test]
    fn filter_combines_search_status_and_balance() {
        let members = [
            member(1, "Asha Rao", 5000, MemberStatus::Active),
            member(2, "Ravi Das", 200, MemberStatus::Active),
            member(3, "asha menon", 9000, MemberStatus::Inactive),
        ];

        let filter = MemberFilter {
            search: "ASHA".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&members).len(), 2);

        let filter = MemberFilter {
            search: "asha".into(),
            status: Some(MemberStatus::Active),
            min_balance: Some(Amount::from_rupees(1000)),
        };
        let found = filter.apply(&members);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, MemberId(1));

        let by_mobile = MemberFilter {
            search: "00002".into(),
            ..Default::default()
        };
        assert_eq!(by_mobile.apply(&members)[0].id, MemberId(2));
    }

    #[test]
    fn pagination_clamps_page_number() {
        let items: Vec<u32> = (1..=25).collect();

        let page = paginate(&items, 3, PAGE_SIZE);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);

        let page = paginate(&items, 9, PAGE_SIZE);
        assert_eq!(page.number, 3);

        let empty = paginate::<u32>(&[], 1, PAGE_SIZE);
        assert!(empty.items.is_empty());
        assert_eq!(empty.number, 1);
        assert_eq!(empty.total_pages, 0);
    }
}
