//! Core business logic for Krona.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, normalization rules, and lifecycle transitions live here.
//!
//! # Modules
//!
//! - `client` - Client records, status, and input normalization
//! - `account` - Account records and the Active/Closed lifecycle

pub mod account;
pub mod client;
