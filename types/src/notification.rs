use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, MemberId, err};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Sms,
    Whatsapp,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Whatsapp => "whatsapp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Whatsapp => "WhatsApp",
        }
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(Self::Sms),
            "whatsapp" => Ok(Self::Whatsapp),
            other => Err(err!("unknown channel '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Sent => "Sent",
            Self::Delivered => "Delivered",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub member_id: MemberId,
    pub member_name: String,
    pub message: String,
    pub channel: Channel,
    pub status: DeliveryStatus,
    pub sent_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub member_id: MemberId,
    pub message: String,
    pub channel: Channel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl ReminderFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for ReminderFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(err!("unknown frequency '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub auto_reminders: bool,
    pub preferred_channel: Channel,
    pub frequency: ReminderFrequency,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            auto_reminders: true,
            preferred_channel: Channel::Sms,
            frequency: ReminderFrequency::Weekly,
        }
    }
}

/// Everything the notifications page loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCenter {
    pub history: Vec<Notification>,
    pub settings: ReminderSettings,
}

/// Newest first.
pub fn sort_newest_first(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
}
