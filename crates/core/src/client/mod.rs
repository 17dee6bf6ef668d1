//! Client records, status, and input normalization.

pub mod normalize;
pub mod types;

pub use types::{ClientPatch, ClientStatus, NewClient};
