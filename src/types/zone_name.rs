// ABOUTME: Validated zone name accepted by zonecfg and zoneadm.
// ABOUTME: Enforces the character set and length rules of the zone name namespace.

use std::fmt;
use thiserror::Error;

/// Longest name zonecfg accepts.
pub const MAX_ZONE_NAME_LEN: usize = 63;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneNameError {
    #[error("zone name cannot be empty")]
    Empty,

    #[error("zone name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("zone name must start with a letter or digit, found '{0}'")]
    InvalidStart(char),

    #[error("invalid character in zone name: '{0}'")]
    InvalidChar(char),

    #[error("zone name '{0}' is reserved")]
    Reserved(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneName(String);

impl ZoneName {
    pub fn new(value: &str) -> Result<Self, ZoneNameError> {
        let mut chars = value.chars();

        let first = chars.next().ok_or(ZoneNameError::Empty)?;
        if !first.is_ascii_alphanumeric() {
            return Err(ZoneNameError::InvalidStart(first));
        }

        if value.len() > MAX_ZONE_NAME_LEN {
            return Err(ZoneNameError::TooLong);
        }

        for c in chars {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(ZoneNameError::InvalidChar(c));
            }
        }

        if value == "global" {
            return Err(ZoneNameError::Reserved(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ZoneName {
    type Err = ZoneNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneName::new(s)
    }
}

impl<'de> serde::Deserialize<'de> for ZoneName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ZoneName::new(&s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for ZoneName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
