//! Account records and the Active/Closed lifecycle.
//!
//! The lifecycle rules live here so storage and transport layers consult one
//! place: `Closed` is terminal, and only the close transition itself may be
//! re-applied to a closed account.

pub mod error;
pub mod lifecycle;
pub mod types;

pub use error::LifecycleError;
pub use types::{AccountPlan, AccountStatus, AccountType, NewAccount};
