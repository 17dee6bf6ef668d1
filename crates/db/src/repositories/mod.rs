//! Repository abstractions for data access.

pub mod account;
pub mod client;

pub use account::{AccountError, AccountRepository};
pub use client::{ClientError, ClientRepository};
