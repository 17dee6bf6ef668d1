//! Client domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalize;

/// Client standing with the bank.
///
/// Transitions are unrestricted: any status is reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Client in good standing.
    Active,
    /// Client blocked from all operations.
    Blocked,
    /// Client temporarily suspended.
    Suspended,
}

impl ClientStatus {
    /// String form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            "suspended" => Ok(Self::Suspended),
            _ => Err(format!("Unknown client status: {s}")),
        }
    }
}

/// Normalized input for creating a client.
///
/// Construction runs the normalization rules so a `NewClient` can only hold
/// storable values; the id and creation timestamp are assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Client name, trimmed.
    pub name: String,
    /// Email, trimmed and lowercased; unique across all clients.
    pub email: String,
    /// Phone number, trimmed.
    pub phone: String,
    /// Initial status; always `Active`.
    pub status: ClientStatus,
}

impl NewClient {
    /// Builds a new-client record from raw (pre-validated) input.
    #[must_use]
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: normalize::name(name),
            email: normalize::email(email),
            phone: normalize::phone(phone),
            status: ClientStatus::Active,
        }
    }
}

/// Partial update for a client's contact fields.
///
/// `None` means "leave the stored value untouched"; `Some` overwrites.
/// Status changes go through their own operation, and the creation
/// timestamp is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    /// Replacement name, if provided.
    pub name: Option<String>,
    /// Replacement email, if provided; re-normalized like a create.
    pub email: Option<String>,
    /// Replacement phone, if provided.
    pub phone: Option<String>,
}

impl ClientPatch {
    /// Returns the patch with normalization applied to every provided field.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| normalize::name(&n)),
            email: self.email.map(|e| normalize::email(&e)),
            phone: self.phone.map(|p| normalize::phone(&p)),
        }
    }

    /// True when no field is provided (the update is a no-op).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}
