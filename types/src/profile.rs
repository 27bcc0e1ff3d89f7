use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, err};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub language: String,
    pub notifications_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub id: u32,
    pub at: String,
    pub device: String,
    pub location: String,
    pub ip: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TicketPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for TicketPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(err!("unknown priority '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportTicket {
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// The profile page: editable details plus recent sign-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub profile: Profile,
    pub login_history: Vec<LoginRecord>,
}
