//! Account state machine rules.
//!
//! States: `Active` and `Closed`, starting at `Active`. An active account may
//! change status or plan freely; a closed account accepts nothing except
//! another close, which is a no-op. Callers that persist state are expected
//! to run these checks on a fresh snapshot and to re-assert the closed guard
//! atomically in the write itself.

use super::error::LifecycleError;
use super::types::AccountStatus;

/// Checks that an account in `status` may accept a status or plan change.
///
/// # Errors
///
/// Returns [`LifecycleError::Closed`] when the account is closed.
pub const fn ensure_mutable(status: AccountStatus) -> Result<(), LifecycleError> {
    match status {
        AccountStatus::Active => Ok(()),
        AccountStatus::Closed => Err(LifecycleError::Closed),
    }
}

/// Resolves a requested status change against the current status.
///
/// An active account may move to any status, including `Closed`. A closed
/// account rejects every request, even `Closed` itself; idempotent closing
/// goes through [`close`], not through a status update.
///
/// # Errors
///
/// Returns [`LifecycleError::Closed`] when the current status is `Closed`.
pub const fn apply_status(
    current: AccountStatus,
    requested: AccountStatus,
) -> Result<AccountStatus, LifecycleError> {
    match current {
        AccountStatus::Active => Ok(requested),
        AccountStatus::Closed => Err(LifecycleError::Closed),
    }
}

/// The close transition. Always lands on `Closed`, whatever the current
/// status, so re-closing a closed account succeeds without change.
#[must_use]
pub const fn close(_current: AccountStatus) -> AccountStatus {
    AccountStatus::Closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_active_is_mutable() {
        assert_eq!(ensure_mutable(AccountStatus::Active), Ok(()));
    }

    #[test]
    fn test_closed_rejects_mutation() {
        assert_eq!(
            ensure_mutable(AccountStatus::Closed),
            Err(LifecycleError::Closed)
        );
    }

    #[rstest]
    #[case(AccountStatus::Active, AccountStatus::Active, Ok(AccountStatus::Active))]
    #[case(AccountStatus::Active, AccountStatus::Closed, Ok(AccountStatus::Closed))]
    #[case(AccountStatus::Closed, AccountStatus::Active, Err(LifecycleError::Closed))]
    #[case(AccountStatus::Closed, AccountStatus::Closed, Err(LifecycleError::Closed))]
    fn test_status_transition_table(
        #[case] current: AccountStatus,
        #[case] requested: AccountStatus,
        #[case] expected: Result<AccountStatus, LifecycleError>,
    ) {
        assert_eq!(apply_status(current, requested), expected);
    }

    #[rstest]
    #[case(AccountStatus::Active)]
    #[case(AccountStatus::Closed)]
    fn test_close_is_idempotent(#[case] current: AccountStatus) {
        let once = close(current);
        assert_eq!(once, AccountStatus::Closed);
        assert_eq!(close(once), AccountStatus::Closed);
    }
}
