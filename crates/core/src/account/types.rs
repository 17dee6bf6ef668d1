//! Account domain types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account lifecycle state.
///
/// `Closed` is terminal; see [`super::lifecycle`] for the transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account accepts status and plan changes.
    Active,
    /// Account is closed; terminal.
    Closed,
}

impl AccountStatus {
    /// String form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Unknown account status: {s}")),
        }
    }
}

/// Product category of an account; immutable after opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Standard debit account.
    Debit,
    /// Credit line account.
    Credit,
    /// Interest-bearing savings account.
    Savings,
}

impl AccountType {
    /// String form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Savings => "savings",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            "savings" => Ok(Self::Savings),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// Service plan attached to an account; mutable while the account is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountPlan {
    /// Entry-level plan assigned to every new account.
    #[default]
    Basic,
    /// Mid-tier plan.
    Standard,
    /// Top-tier plan.
    Premium,
}

impl AccountPlan {
    /// String form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for AccountPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            _ => Err(format!("Unknown account plan: {s}")),
        }
    }
}

/// Initial state of a freshly opened account.
///
/// The id and creation timestamp are assigned by storage; everything else is
/// fixed here so an account can only ever start in one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Owning client id.
    pub client_id: i32,
    /// Generated opaque account number; globally unique, immutable.
    pub account_number: String,
    /// Product category; immutable after opening.
    pub account_type: AccountType,
    /// Service plan; starts at the default tier.
    pub plan: AccountPlan,
    /// Opening balance; always zero.
    pub balance: Decimal,
    /// Lifecycle state; always `Active`.
    pub status: AccountStatus,
}

impl NewAccount {
    /// Opens an account for `client_id` with a freshly generated number.
    #[must_use]
    pub fn open(client_id: i32, account_type: AccountType) -> Self {
        Self {
            client_id,
            account_number: Uuid::new_v4().to_string(),
            account_type,
            plan: AccountPlan::default(),
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_open_starts_active_with_zero_balance() {
        let account = NewAccount::open(7, AccountType::Debit);

        assert_eq!(account.client_id, 7);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.plan, AccountPlan::Basic);
        assert_eq!(account.account_type, AccountType::Debit);
        assert!(!account.account_number.is_empty());
    }

    #[test]
    fn test_open_generates_distinct_numbers() {
        let a = NewAccount::open(1, AccountType::Savings);
        let b = NewAccount::open(1, AccountType::Savings);

        assert_ne!(a.account_number, b.account_number);
    }

    #[rstest]
    #[case(AccountStatus::Active, "active")]
    #[case(AccountStatus::Closed, "closed")]
    fn test_status_round_trips(#[case] status: AccountStatus, #[case] s: &str) {
        assert_eq!(status.as_str(), s);
        assert_eq!(s.parse::<AccountStatus>().unwrap(), status);
    }

    #[rstest]
    #[case(AccountType::Debit, "debit")]
    #[case(AccountType::Credit, "credit")]
    #[case(AccountType::Savings, "savings")]
    fn test_type_round_trips(#[case] kind: AccountType, #[case] s: &str) {
        assert_eq!(kind.as_str(), s);
        assert_eq!(s.parse::<AccountType>().unwrap(), kind);
    }

    #[rstest]
    #[case(AccountPlan::Basic, "basic")]
    #[case(AccountPlan::Standard, "standard")]
    #[case(AccountPlan::Premium, "premium")]
    fn test_plan_round_trips(#[case] plan: AccountPlan, #[case] s: &str) {
        assert_eq!(plan.as_str(), s);
        assert_eq!(s.parse::<AccountPlan>().unwrap(), plan);
    }

    #[test]
    fn test_default_plan_is_basic() {
        assert_eq!(AccountPlan::default(), AccountPlan::Basic);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!("frozen".parse::<AccountStatus>().is_err());
        assert!("checking".parse::<AccountType>().is_err());
        assert!("platinum".parse::<AccountPlan>().is_err());
    }
}
