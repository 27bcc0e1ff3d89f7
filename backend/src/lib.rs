pub mod auth;
mod config;
pub mod directory;
pub mod fixtures;
pub mod storage;
pub mod token;

use jiff::Timestamp;
use types::{Credentials, Result, Session, SessionState};

pub use crate::config::{CONFIG, Config};
use crate::{
    auth::DemoAccount,
    storage::{SessionStore, platform_store},
};

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Err(error) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        tracing::debug!(%error, "tracing already initialised");
    }
}

fn sessions() -> SessionStore<storage::PlatformStore> {
    SessionStore::new(platform_store())
}

/// The session persisted by an earlier visit, if it is still valid.
pub fn restore_session() -> SessionState {
    sessions().restore(&CONFIG.signing_secret, Timestamp::now())
}

/// Check `credentials` against the demo account and persist a new session.
pub fn login(credentials: &Credentials) -> Result<Session> {
    let account = DemoAccount {
        email: &CONFIG.demo_email,
        password: &CONFIG.demo_password,
    };
    let leader = account.authenticate(credentials)?;
    let session = sessions().open(leader, credentials.remember_me, &CONFIG.signing_secret)?;

    tracing::info!(
        leader = %session.leader.login,
        expires_at = %session.expires_at,
        "leader signed in"
    );
    Ok(session)
}

pub fn logout() {
    sessions().clear();
    tracing::info!("leader signed out");
}
