//! Async calls the pages make. Each one waits the configured latency before
//! touching the in-memory backend, the way a network round trip would.

use std::time::Duration;

pub use backend::CONFIG;

use backend::{directory::with_directory, fixtures, storage};
use jiff::Timestamp;
use types::{
    Credentials, Member, MemberId, Result, Session, SessionState, Theme, Transaction,
    alert::{AlertOverview, AlertSettings},
    err,
    ledger::{DateRange, GeneratedCredentials, Ledger, MemberUpdate, NewMember, NewTransaction},
    loan::Loan,
    notification::{NewReminder, Notification, NotificationCenter, ReminderSettings},
    profile::{Account, Faq, Profile, SupportTicket},
    report::{Dashboard, Report},
    senior::SeniorAccount,
    validate,
};

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;

    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

async fn fetch_latency() {
    sleep(CONFIG.fetch_delay()).await;
}

async fn action_latency() {
    sleep(CONFIG.action_delay()).await;
}

/// Read the persisted session. Runs once at startup, without latency.
pub fn restore_session() -> SessionState {
    backend::restore_session()
}

pub async fn login(credentials: Credentials) -> Result<Session> {
    action_latency().await;
    backend::login(&credentials)
}

/// Drop the persisted session immediately.
pub fn logout() -> SessionState {
    backend::logout();
    SessionState::Anonymous
}

pub fn theme() -> Theme {
    storage::Preferences::new(storage::platform_store()).theme()
}

pub fn set_theme(theme: Theme) {
    storage::Preferences::new(storage::platform_store()).set_theme(theme);
}

pub async fn dashboard() -> Result<Dashboard> {
    fetch_latency().await;
    with_directory(|dir| dir.dashboard())
}

pub async fn members() -> Result<Vec<Member>> {
    fetch_latency().await;
    with_directory(|dir| Ok(dir.members().to_vec()))
}

pub async fn member(id: MemberId) -> Result<Member> {
    fetch_latency().await;
    with_directory(|dir| Ok(dir.member(id)?.clone()))
}

pub async fn add_member(new: NewMember) -> Result<(Member, GeneratedCredentials)> {
    action_latency().await;
    with_directory(|dir| dir.add_member(new))
}

pub async fn update_member(id: MemberId, update: MemberUpdate) -> Result<Member> {
    action_latency().await;
    with_directory(|dir| dir.update_member(id, update))
}

pub async fn delete_member(id: MemberId) -> Result<Member> {
    action_latency().await;
    with_directory(|dir| dir.delete_member(id))
}

/// A member's ledger, restricted to `range`.
pub async fn ledger(id: MemberId, range: DateRange) -> Result<Ledger> {
    fetch_latency().await;
    let mut ledger = with_directory(|dir| dir.ledger(id))?;
    if !range.is_open() {
        ledger.transactions = ledger.within(range);
    }
    Ok(ledger)
}

pub async fn add_transaction(new: NewTransaction) -> Result<Transaction> {
    action_latency().await;
    with_directory(|dir| dir.add_transaction(new))
}

pub async fn notifications() -> Result<NotificationCenter> {
    fetch_latency().await;
    with_directory(|dir| {
        Ok(NotificationCenter {
            history: dir.notifications().to_vec(),
            settings: dir.reminder_settings(),
        })
    })
}

pub async fn send_reminder(reminder: NewReminder) -> Result<Notification> {
    action_latency().await;
    with_directory(|dir| dir.send_reminder(reminder, Timestamp::now()))
}

pub async fn resend_notification(id: u32) -> Result<Notification> {
    action_latency().await;
    with_directory(|dir| dir.resend(id))
}

pub async fn save_reminder_settings(settings: ReminderSettings) -> Result<()> {
    action_latency().await;
    with_directory(|dir| {
        dir.set_reminder_settings(settings);
        Ok(())
    })
}

pub async fn alerts() -> Result<AlertOverview> {
    fetch_latency().await;
    with_directory(|dir| {
        Ok(AlertOverview {
            alerts: dir.alerts(),
            settings: dir.alert_settings(),
        })
    })
}

/// Store new thresholds and return the alerts they raise.
pub async fn save_alert_settings(settings: AlertSettings) -> Result<AlertOverview> {
    action_latency().await;
    with_directory(|dir| {
        dir.set_alert_settings(settings);
        Ok(AlertOverview {
            alerts: dir.alerts(),
            settings,
        })
    })
}

pub async fn loans() -> Result<Vec<Loan>> {
    fetch_latency().await;
    with_directory(|dir| Ok(dir.loans().to_vec()))
}

pub async fn seniors() -> Result<Vec<SeniorAccount>> {
    fetch_latency().await;
    with_directory(|dir| Ok(dir.seniors().to_vec()))
}

pub async fn report() -> Result<Report> {
    fetch_latency().await;
    Ok(fixtures::report(None, None))
}

pub async fn generate_report(range: DateRange) -> Result<Report> {
    action_latency().await;
    if let (Some(start), Some(end)) = (range.start, range.end) {
        if start > end {
            return Err(err!("Start date must be before end date"));
        }
    }
    Ok(fixtures::report(range.start, range.end))
}

pub async fn account() -> Result<Account> {
    fetch_latency().await;
    with_directory(|dir| {
        Ok(Account {
            profile: dir.profile().clone(),
            login_history: fixtures::login_history(),
        })
    })
}

pub async fn save_profile(profile: Profile) -> Result<Profile> {
    action_latency().await;
    validate::required(&[profile.name.as_str(), profile.mobile.as_str()], "Name and mobile number are required")?;
    with_directory(|dir| {
        dir.set_profile(profile.clone());
        Ok(profile)
    })
}

pub async fn change_password(change: validate::PasswordChange) -> Result<()> {
    action_latency().await;
    if let Err(errors) = change.validate() {
        let message = [errors.current, errors.new, errors.confirm]
            .into_iter()
            .flatten()
            .next()
            .unwrap_or("Invalid password");
        return Err(err!("{message}"));
    }
    tracing::info!("password changed");
    Ok(())
}

pub async fn submit_ticket(ticket: SupportTicket) -> Result<()> {
    action_latency().await;
    validate::required(
        &[ticket.subject.as_str(), ticket.description.as_str()],
        "Please fill in all required fields",
    )?;
    tracing::info!(
        subject = %ticket.subject,
        priority = ticket.priority.as_str(),
        "support ticket submitted"
    );
    Ok(())
}

pub fn faqs() -> Vec<Faq> {
    fixtures::faqs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;
    use types::{LoginMethod, session::AUTH_TOKEN_KEY};

    // The only test touching the shared session store.
    #[tokio::test(start_paused = true)]
    async fn session_lifecycle() {
        use storage::KeyValueStore;

        let started = Instant::now();
        let error = login(Credentials::email("a@gmail.com", "wrong")).await.unwrap_err();
        assert_eq!(error.message(), "Invalid credentials. Use a@gmail.com / a");
        assert!(started.elapsed() >= CONFIG.action_delay());

        let session = login(Credentials::email("a@gmail.com", "a").remember(true))
            .await
            .unwrap();
        assert_eq!(session.leader.method, LoginMethod::Email);
        assert!(restore_session().is_authenticated());

        let mobile = login(Credentials::mobile("", "")).await.unwrap();
        assert_eq!(mobile.leader.method, LoginMethod::Mobile);

        assert_eq!(logout(), SessionState::Anonymous);
        assert_eq!(storage::platform_store().get(AUTH_TOKEN_KEY), None);
        assert_eq!(restore_session(), SessionState::Anonymous);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_member_fails_after_latency() {
        let started = Instant::now();
        let error = member(MemberId(100_000)).await.unwrap_err();
        assert_eq!(error.message(), "member 100000 not found");
        assert!(started.elapsed() >= CONFIG.fetch_delay());
    }

    #[tokio::test(start_paused = true)]
    async fn reversed_report_range_is_rejected() {
        let range = DateRange {
            start: Some(jiff::civil::date(2024, 6, 30)),
            end: Some(jiff::civil::date(2024, 6, 1)),
        };
        assert!(generate_report(range).await.is_err());
        assert!(generate_report(DateRange::default()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn password_change_reports_first_problem() {
        let change = validate::PasswordChange {
            current: "old".into(),
            new: "short".into(),
            confirm: "short".into(),
        };
        let error = change_password(change).await.unwrap_err();
        assert_eq!(error.message(), "Password must be at least 8 characters");
    }
}
