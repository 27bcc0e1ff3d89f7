//! The in-memory member directory behind every data page.
//!
//! Seeded from [`fixtures`] on first use; edits live until the page reloads.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use jiff::{Timestamp, Zoned, civil::Date};
use rand::{Rng, SeedableRng, rngs::StdRng};
use types::{
    Amount, Member, MemberId, Result, Transaction, TransactionKind,
    alert::{Alert, AlertSettings},
    err,
    ledger::{GeneratedCredentials, Ledger, MemberStatus, MemberUpdate, NewMember, NewTransaction},
    loan::Loan,
    notification::{DeliveryStatus, NewReminder, Notification, ReminderSettings},
    profile::Profile,
    report::{Dashboard, DashboardStats, RecentTransaction},
    senior::SeniorAccount,
};

use crate::{CONFIG, fixtures};

const RECENT_TRANSACTIONS: usize = 7;
const PASSWORD_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";
const USERNAME_SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

static DIRECTORY: Mutex<Option<Directory>> = Mutex::new(None);

/// Run `f` against the shared directory, seeding it on first use.
pub fn with_directory<T>(f: impl FnOnce(&mut Directory) -> Result<T>) -> Result<T> {
    let mut guard = DIRECTORY.lock().unwrap_or_else(PoisonError::into_inner);

    if guard.is_none() {
        let directory = Directory::seeded(CONFIG.fixture_seed, Zoned::now().date(), Timestamp::now())?;
        tracing::debug!(members = directory.members.len(), "seeded member directory");
        *guard = Some(directory);
    }

    let Some(directory) = guard.as_mut() else {
        return Err(err!("member directory unavailable"));
    };
    f(directory)
}

#[derive(Debug)]
pub struct Directory {
    seed: u64,
    today: Date,
    rng: StdRng,
    members: Vec<Member>,
    /// Filled lazily; a member without an entry has its fixture ledger pending.
    ledgers: HashMap<MemberId, Vec<Transaction>>,
    notifications: Vec<Notification>,
    loans: Vec<Loan>,
    seniors: Vec<SeniorAccount>,
    alert_settings: AlertSettings,
    reminder_settings: ReminderSettings,
    profile: Profile,
    next_member: u32,
    next_transaction: u32,
    next_notification: u32,
}

impl Directory {
    pub fn seeded(seed: u64, today: Date, now: Timestamp) -> Result<Self> {
        let members = fixtures::members(seed, today)?;
        let notifications = fixtures::notifications(seed, &members, now)?;
        let next_member = members.iter().map(|m| m.id.0).max().unwrap_or(0) + 1;
        let next_notification = notifications.iter().map(|n| n.id).max().unwrap_or(0) + 1;

        Ok(Self {
            seed,
            today,
            rng: StdRng::seed_from_u64(seed),
            members,
            ledgers: HashMap::new(),
            notifications,
            loans: fixtures::loans(seed, today)?,
            seniors: fixtures::seniors(seed, today)?,
            alert_settings: AlertSettings::default(),
            reminder_settings: ReminderSettings::default(),
            profile: fixtures::profile(),
            next_member,
            next_transaction: 1,
            next_notification,
        })
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: MemberId) -> Result<&Member> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| err!("member {id} not found"))
    }

    fn member_mut(&mut self, id: MemberId) -> Result<&mut Member> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| err!("member {id} not found"))
    }

    pub fn add_member(&mut self, new: NewMember) -> Result<(Member, GeneratedCredentials)> {
        let id = MemberId(self.next_member);
        self.next_member += 1;

        let member = Member {
            id,
            name: new.name.trim().to_string(),
            mobile: new.mobile.trim().to_string(),
            balance: Amount::ZERO,
            status: MemberStatus::Active,
            last_transaction: self.today,
            notes: new.notes,
        };
        let credentials = self.generate_credentials(&member.name);

        self.members.push(member);
        self.ledgers.insert(id, Vec::new());

        if let Some(amount) = new.initial_credit.filter(|a| a.is_positive()) {
            self.add_transaction(NewTransaction {
                member_id: id,
                amount,
                kind: TransactionKind::Credit,
                date: self.today,
                note: "Initial credit".to_string(),
            })?;
        }

        let member = self.member(id)?.clone();
        tracing::info!(member = %member.id, "member added");
        Ok((member, credentials))
    }

    fn generate_credentials(&mut self, name: &str) -> GeneratedCredentials {
        let first_name = name
            .split_whitespace()
            .next()
            .unwrap_or("member")
            .to_lowercase();
        let suffix: String = (0..4)
            .map(|_| char::from(USERNAME_SUFFIX_CHARS[self.rng.gen_range(0..USERNAME_SUFFIX_CHARS.len())]))
            .collect();
        let password: String = (0..10)
            .map(|_| char::from(PASSWORD_CHARS[self.rng.gen_range(0..PASSWORD_CHARS.len())]))
            .collect();

        GeneratedCredentials {
            username: format!("{first_name}{suffix}"),
            password,
        }
    }

    pub fn update_member(&mut self, id: MemberId, update: MemberUpdate) -> Result<Member> {
        let member = self.member_mut(id)?;
        member.name = update.name.trim().to_string();
        member.mobile = update.mobile.trim().to_string();
        member.notes = update.notes;
        member.status = update.status;
        Ok(member.clone())
    }

    pub fn delete_member(&mut self, id: MemberId) -> Result<Member> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| err!("member {id} not found"))?;

        self.ledgers.remove(&id);
        let member = self.members.remove(index);
        tracing::info!(member = %member.id, "member deleted");
        Ok(member)
    }

    fn transactions(&mut self, id: MemberId) -> Result<&mut Vec<Transaction>> {
        self.member(id)?;

        if !self.ledgers.contains_key(&id) {
            let transactions = fixtures::ledger(self.seed, id, self.today, self.next_transaction)?;
            self.next_transaction += transactions.len() as u32;
            self.ledgers.insert(id, transactions);
        }

        self.ledgers
            .get_mut(&id)
            .ok_or_else(|| err!("ledger for member {id} missing"))
    }

    /// The member with their transactions, newest first.
    pub fn ledger(&mut self, id: MemberId) -> Result<Ledger> {
        let transactions = self.transactions(id)?.clone();
        Ok(Ledger {
            member: self.member(id)?.clone(),
            transactions,
        })
    }

    /// Record a transaction and move the member's balance with it.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        if !new.amount.is_positive() {
            return Err(err!("amount must be greater than zero"));
        }

        // Load the fixture ledger first so its ids come before this one.
        self.transactions(new.member_id)?;

        let member = self.member(new.member_id)?;
        let balance = match new.kind {
            TransactionKind::Credit => member.balance.checked_add(new.amount),
            TransactionKind::Debit => member.balance.checked_sub(new.amount),
        }
        .ok_or_else(|| err!("balance for {} would overflow", member.name))?;

        let transaction = Transaction {
            id: self.next_transaction,
            member_id: new.member_id,
            date: new.date,
            amount: new.amount,
            kind: new.kind,
            note: new.note,
        };
        self.next_transaction += 1;

        let transactions = self.transactions(new.member_id)?;
        let position = transactions
            .iter()
            .position(|t| t.date <= transaction.date)
            .unwrap_or(transactions.len());
        transactions.insert(position, transaction.clone());

        let member = self.member_mut(new.member_id)?;
        member.balance = balance;
        member.last_transaction = member.last_transaction.max(transaction.date);

        tracing::info!(
            member = %transaction.member_id,
            kind = transaction.kind.as_str(),
            amount = %transaction.amount,
            "transaction recorded"
        );
        Ok(transaction)
    }

    pub fn dashboard(&mut self) -> Result<Dashboard> {
        let recent_members: Vec<MemberId> =
            self.members.iter().take(RECENT_TRANSACTIONS).map(|m| m.id).collect();
        for id in recent_members {
            self.transactions(id)?;
        }

        let names: HashMap<MemberId, &str> =
            self.members.iter().map(|m| (m.id, m.name.as_str())).collect();
        let mut recent: Vec<RecentTransaction> = self
            .ledgers
            .values()
            .flatten()
            .filter_map(|t| {
                Some(RecentTransaction {
                    member_name: names.get(&t.member_id)?.to_string(),
                    transaction: t.clone(),
                })
            })
            .collect();
        recent.sort_by(|a, b| {
            b.transaction
                .date
                .cmp(&a.transaction.date)
                .then(b.transaction.id.cmp(&a.transaction.id))
        });
        recent.truncate(RECENT_TRANSACTIONS);

        Ok(Dashboard {
            stats: DashboardStats::from_parts(&self.members, &self.loans, self.today),
            recent,
        })
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Queue a reminder. It shows up first in the history as pending.
    pub fn send_reminder(&mut self, reminder: NewReminder, now: Timestamp) -> Result<Notification> {
        let member = self.member(reminder.member_id)?;
        let notification = Notification {
            id: self.next_notification,
            member_id: member.id,
            member_name: member.name.clone(),
            message: reminder.message.trim().to_string(),
            channel: reminder.channel,
            status: DeliveryStatus::Pending,
            sent_at: now,
        };

        self.next_notification += 1;
        self.notifications.insert(0, notification.clone());
        tracing::info!(
            member = %notification.member_id,
            channel = notification.channel.as_str(),
            "reminder queued"
        );
        Ok(notification)
    }

    pub fn resend(&mut self, id: u32) -> Result<Notification> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| err!("notification {id} not found"))?;

        notification.status = DeliveryStatus::Sent;
        Ok(notification.clone())
    }

    pub fn reminder_settings(&self) -> ReminderSettings {
        self.reminder_settings
    }

    pub fn set_reminder_settings(&mut self, settings: ReminderSettings) {
        self.reminder_settings = settings;
    }

    /// Alerts still raised under the current settings, riskiest first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alert_settings.apply(&fixtures::alerts())
    }

    pub fn alert_settings(&self) -> AlertSettings {
        self.alert_settings
    }

    pub fn set_alert_settings(&mut self, settings: AlertSettings) {
        self.alert_settings = settings;
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn seniors(&self) -> &[SeniorAccount] {
        &self.seniors
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use types::notification::Channel;

    fn directory() -> Directory {
        Directory::seeded(11, date(2024, 6, 15), Timestamp::from_second(1_718_400_000).unwrap()).unwrap()
    }

    #[test]
    fn added_member_gets_credentials_and_initial_credit() {
        let mut dir = directory();
        let (member, credentials) = dir
            .add_member(NewMember {
                name: " Asha Rao ".into(),
                mobile: "+91 9000000001".into(),
                initial_credit: Some(Amount::from_rupees(500)),
                notes: String::new(),
            })
            .unwrap();

        assert_eq!(member.id, MemberId(fixtures::MEMBER_COUNT + 1));
        assert_eq!(member.name, "Asha Rao");
        assert_eq!(member.balance, Amount::from_rupees(500));
        assert!(credentials.username.starts_with("asha"));
        assert_eq!(credentials.username.len(), "asha".len() + 4);
        assert_eq!(credentials.password.len(), 10);

        let ledger = dir.ledger(member.id).unwrap();
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.summary().balance, Amount::from_rupees(500));
    }

    #[test]
    fn unknown_member_is_an_error() {
        let mut dir = directory();
        let error = dir.ledger(MemberId(999)).unwrap_err();
        assert_eq!(error.message(), "member 999 not found");
        assert!(dir.delete_member(MemberId(999)).is_err());
    }

    #[test]
    fn update_and_delete() {
        let mut dir = directory();
        let updated = dir
            .update_member(
                MemberId(2),
                MemberUpdate {
                    name: "Ravi Das".into(),
                    mobile: "+91 9111111111".into(),
                    notes: "moved".into(),
                    status: MemberStatus::Inactive,
                },
            )
            .unwrap();
        assert_eq!(dir.member(MemberId(2)).unwrap(), &updated);

        dir.delete_member(MemberId(2)).unwrap();
        assert!(dir.member(MemberId(2)).is_err());
        assert_eq!(dir.members().len(), fixtures::MEMBER_COUNT as usize - 1);
    }

    #[test]
    fn transactions_move_the_balance() {
        let mut dir = directory();
        let before = dir.member(MemberId(4)).unwrap().balance;

        dir.add_transaction(NewTransaction {
            member_id: MemberId(4),
            amount: Amount::from_rupees(300),
            kind: TransactionKind::Debit,
            date: date(2024, 6, 15),
            note: String::new(),
        })
        .unwrap();

        assert_eq!(dir.member(MemberId(4)).unwrap().balance, before - Amount::from_rupees(300));
        let ledger = dir.ledger(MemberId(4)).unwrap();
        assert_eq!(ledger.transactions.len(), fixtures::LEDGER_LENGTH as usize + 1);
        assert_eq!(ledger.transactions[0].amount, Amount::from_rupees(300));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut dir = directory();
        let result = dir.add_transaction(NewTransaction {
            member_id: MemberId(1),
            amount: Amount::ZERO,
            kind: TransactionKind::Credit,
            date: date(2024, 6, 15),
            note: String::new(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn overflowing_balance_is_an_error_and_leaves_member_alone() {
        let mut dir = directory();
        let ledger_before = dir.ledger(MemberId(1)).unwrap().transactions.len();
        let near_limit = Amount::from_paise(i64::MAX - 100);
        dir.member_mut(MemberId(1)).unwrap().balance = near_limit;

        let error = dir
            .add_transaction(NewTransaction {
                member_id: MemberId(1),
                amount: Amount::MAX,
                kind: TransactionKind::Credit,
                date: date(2024, 6, 15),
                note: String::new(),
            })
            .unwrap_err();

        assert!(error.message().contains("would overflow"));
        assert_eq!(dir.member(MemberId(1)).unwrap().balance, near_limit);
        assert_eq!(dir.ledger(MemberId(1)).unwrap().transactions.len(), ledger_before);
    }

    #[test]
    fn reminder_is_prepended_as_pending_and_resend_marks_sent() {
        let mut dir = directory();
        let now = Timestamp::from_second(1_718_500_000).unwrap();
        let sent = dir
            .send_reminder(
                NewReminder {
                    member_id: MemberId(5),
                    message: "Balance due".into(),
                    channel: Channel::Whatsapp,
                },
                now,
            )
            .unwrap();

        assert_eq!(dir.notifications()[0], sent);
        assert_eq!(sent.status, DeliveryStatus::Pending);
        assert_eq!(sent.member_name, "User 5");

        let resent = dir.resend(sent.id).unwrap();
        assert_eq!(resent.status, DeliveryStatus::Sent);
        assert!(dir.resend(9999).is_err());
    }

    #[test]
    fn dashboard_lists_latest_transactions() {
        let mut dir = directory();
        let dashboard = dir.dashboard().unwrap();

        assert_eq!(dashboard.stats.members, fixtures::MEMBER_COUNT as usize);
        assert_eq!(dashboard.recent.len(), RECENT_TRANSACTIONS);
        assert!(dashboard.recent.iter().all(|r| r.transaction.date == date(2024, 6, 15)));
    }

    #[test]
    fn alert_settings_filter_alerts() {
        let mut dir = directory();
        let all = dir.alerts().len();

        dir.set_alert_settings(AlertSettings {
            overdue_threshold_days: 90,
            high_risk_threshold: Amount::from_rupees(100_000),
            auto_alerts: true,
        });
        assert!(dir.alerts().is_empty());
        assert!(all > 0);
    }
}
