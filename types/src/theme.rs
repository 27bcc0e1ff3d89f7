use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, err};

/// Local storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(err!("unknown theme '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_storage_value() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
