//! `SeaORM` active enums mapping the Postgres enum types.
//!
//! Each enum mirrors a domain enum from `krona-core`; the `From` impls keep
//! the two in lockstep so repositories convert at the storage boundary and
//! the rest of the system only sees the core types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use krona_core::account::{
    AccountPlan as CoreAccountPlan, AccountStatus as CoreAccountStatus,
    AccountType as CoreAccountType,
};
use krona_core::client::ClientStatus as CoreClientStatus;

/// Client standing, stored as the `client_status` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "client_status")]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Client in good standing.
    #[sea_orm(string_value = "active")]
    Active,
    /// Client blocked from all operations.
    #[sea_orm(string_value = "blocked")]
    Blocked,
    /// Client temporarily suspended.
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// Account lifecycle state, stored as the `account_status` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account accepts mutation.
    #[sea_orm(string_value = "active")]
    Active,
    /// Account is closed; terminal.
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// Account product category, stored as the `account_type` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Standard debit account.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit line account.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Interest-bearing savings account.
    #[sea_orm(string_value = "savings")]
    Savings,
}

/// Account service plan, stored as the `account_plan` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_plan")]
#[serde(rename_all = "snake_case")]
pub enum AccountPlan {
    /// Entry-level plan.
    #[sea_orm(string_value = "basic")]
    Basic,
    /// Mid-tier plan.
    #[sea_orm(string_value = "standard")]
    Standard,
    /// Top-tier plan.
    #[sea_orm(string_value = "premium")]
    Premium,
}

impl From<CoreClientStatus> for ClientStatus {
    fn from(value: CoreClientStatus) -> Self {
        match value {
            CoreClientStatus::Active => Self::Active,
            CoreClientStatus::Blocked => Self::Blocked,
            CoreClientStatus::Suspended => Self::Suspended,
        }
    }
}

impl From<ClientStatus> for CoreClientStatus {
    fn from(value: ClientStatus) -> Self {
        match value {
            ClientStatus::Active => Self::Active,
            ClientStatus::Blocked => Self::Blocked,
            ClientStatus::Suspended => Self::Suspended,
        }
    }
}

impl From<CoreAccountStatus> for AccountStatus {
    fn from(value: CoreAccountStatus) -> Self {
        match value {
            CoreAccountStatus::Active => Self::Active,
            CoreAccountStatus::Closed => Self::Closed,
        }
    }
}

impl From<AccountStatus> for CoreAccountStatus {
    fn from(value: AccountStatus) -> Self {
        match value {
            AccountStatus::Active => Self::Active,
            AccountStatus::Closed => Self::Closed,
        }
    }
}

impl From<CoreAccountType> for AccountType {
    fn from(value: CoreAccountType) -> Self {
        match value {
            CoreAccountType::Debit => Self::Debit,
            CoreAccountType::Credit => Self::Credit,
            CoreAccountType::Savings => Self::Savings,
        }
    }
}

impl From<AccountType> for CoreAccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Debit => Self::Debit,
            AccountType::Credit => Self::Credit,
            AccountType::Savings => Self::Savings,
        }
    }
}

impl From<CoreAccountPlan> for AccountPlan {
    fn from(value: CoreAccountPlan) -> Self {
        match value {
            CoreAccountPlan::Basic => Self::Basic,
            CoreAccountPlan::Standard => Self::Standard,
            CoreAccountPlan::Premium => Self::Premium,
        }
    }
}

impl From<AccountPlan> for CoreAccountPlan {
    fn from(value: AccountPlan) -> Self {
        match value {
            AccountPlan::Basic => Self::Basic,
            AccountPlan::Standard => Self::Standard,
            AccountPlan::Premium => Self::Premium,
        }
    }
}
