use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{sync::LazyLock, time::Duration};
use types::Result;

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|error| {
        tracing::error!(%error, "invalid configuration, falling back to defaults");
        Config::default()
    })
});

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Artificial latency of list and detail fetches.
    pub fetch_delay_ms: u64,
    /// Artificial latency of form submissions.
    pub action_delay_ms: u64,
    /// How long an action's toast stays up.
    pub toast_window_ms: u64,
    /// Pause between a success toast and the navigation that follows it.
    pub redirect_delay_ms: u64,
    pub logout_delay_ms: u64,
    pub session_ttl_hours: u32,
    pub remember_ttl_days: u32,
    pub demo_email: String,
    pub demo_password: SecretString,
    pub signing_secret: SecretString,
    pub fixture_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 1000,
            action_delay_ms: 1500,
            toast_window_ms: 3000,
            redirect_delay_ms: 2000,
            logout_delay_ms: 1500,
            session_ttl_hours: 12,
            remember_ttl_days: 30,
            demo_email: "a@gmail.com".to_string(),
            demo_password: "a".into(),
            signing_secret: "leader-panel-demo-signing-secret".into(),
            fixture_seed: 20_240_615,
        }
    }
}

impl Config {
    /// Defaults, then `leader.toml` (native only), then `LEADER_*` variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let builder = config::Config::builder()
            .set_default("fetch_delay_ms", defaults.fetch_delay_ms)?
            .set_default("action_delay_ms", defaults.action_delay_ms)?
            .set_default("toast_window_ms", defaults.toast_window_ms)?
            .set_default("redirect_delay_ms", defaults.redirect_delay_ms)?
            .set_default("logout_delay_ms", defaults.logout_delay_ms)?
            .set_default("session_ttl_hours", defaults.session_ttl_hours)?
            .set_default("remember_ttl_days", defaults.remember_ttl_days)?
            .set_default("demo_email", defaults.demo_email.as_str())?
            .set_default("demo_password", defaults.demo_password.expose_secret())?
            .set_default("signing_secret", defaults.signing_secret.expose_secret())?
            .set_default("fixture_seed", defaults.fixture_seed)?;

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.add_source(config::File::with_name("leader").required(false));

        let config = builder
            .add_source(config::Environment::with_prefix("LEADER").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    pub fn toast_window(&self) -> Duration {
        Duration::from_millis(self.toast_window_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn logout_delay(&self) -> Duration {
        Duration::from_millis(self.logout_delay_ms)
    }

    /// Lifetime of a freshly minted session token.
    pub fn session_ttl(&self, remember_me: bool) -> jiff::SignedDuration {
        if remember_me {
            jiff::SignedDuration::from_hours(i64::from(self.remember_ttl_days) * 24)
        } else {
            jiff::SignedDuration::from_hours(i64::from(self.session_ttl_hours))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_overrides_matches_defaults() {
        let config = Config::load().unwrap();
        let defaults = Config::default();

        assert_eq!(config.action_delay_ms, defaults.action_delay_ms);
        assert_eq!(config.demo_email, defaults.demo_email);
        assert_eq!(
            config.signing_secret.expose_secret(),
            defaults.signing_secret.expose_secret()
        );
    }

    #[test]
    fn remember_me_extends_ttl() {
        let config = Config::default();
        assert_eq!(config.session_ttl(false), jiff::SignedDuration::from_hours(12));
        assert_eq!(config.session_ttl(true), jiff::SignedDuration::from_hours(720));
    }
}
