use jiff::Timestamp;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Local storage key for the signed session token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Local storage key for the signed-in leader's identity.
pub const USER_DATA_KEY: &str = "userData";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    #[default]
    Email,
    Mobile,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub method: LoginMethod,
    /// Email address or mobile number, depending on `method`.
    pub identifier: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl Credentials {
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            method: LoginMethod::Email,
            identifier: email.into(),
            password: SecretString::from(password.into()),
            remember_me: false,
        }
    }

    pub fn mobile(mobile: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            method: LoginMethod::Mobile,
            identifier: mobile.into(),
            password: SecretString::from(password.into()),
            remember_me: false,
        }
    }

    pub fn remember(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub display_name: String,
    pub login: String,
    pub method: LoginMethod,
}

impl Leader {
    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "LP".to_string()
        } else {
            initials
        }
    }
}

/// The opaque value persisted under [`AUTH_TOKEN_KEY`].
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: SessionToken,
    pub leader: Leader,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Anonymous => None,
        }
    }

    pub fn leader(&self) -> Option<&Leader> {
        self.session().map(|s| &s.leader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(name: &str) -> Leader {
        Leader {
            display_name: name.to_string(),
            login: "a@gmail.com".to_string(),
            method: LoginMethod::Email,
        }
    }

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(leader("rajesh kumar singh").initials(), "RK");
        assert_eq!(leader("Leader").initials(), "L");
        assert_eq!(leader("   ").initials(), "LP");
    }

    #[test]
    fn anonymous_has_no_leader() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert!(state.leader().is_none());
    }

    #[test]
    fn authenticated_exposes_leader() {
        let state = SessionState::Authenticated(Session {
            token: SessionToken::new("t".into()),
            leader: leader("Rajesh Kumar"),
            expires_at: Timestamp::UNIX_EPOCH,
        });
        assert!(state.is_authenticated());
        assert_eq!(state.leader().map(|l| l.initials()), Some("RK".into()));
    }
}
