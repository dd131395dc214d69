//! Billing platform identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The native billing platform a purchase originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple StoreKit 2.
    Ios,
    /// Google Play Billing.
    Android,
}

impl Platform {
    /// Returns the lowercase wire name (`"ios"` / `"android"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    /// Returns the receipt field carrying the app identity on this platform.
    #[must_use]
    pub const fn identity_field(&self) -> &'static str {
        match self {
            Self::Ios => "bundleId",
            Self::Android => "packageName",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized platform name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);
