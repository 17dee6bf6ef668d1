//! Account repository for database operations.
//!
//! Every mutating lookup is scoped by `(account_id, client_id)`; an account
//! id under the wrong client behaves as absent. Status and plan writes take a
//! row lock so the closed-is-terminal rule holds under concurrent requests.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use krona_core::account::{AccountPlan, AccountStatus, NewAccount, lifecycle};

use crate::entities::{accounts, clients};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found under the given client.
    #[error("Account not found: {0}")]
    NotFound(i32),

    /// Account is closed; closed accounts reject every mutation.
    #[error("Account {0} is closed and cannot be modified")]
    Closed(i32),

    /// Owning client does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(i32),

    /// Generated account number collided with an existing one.
    #[error("Account number '{0}' already exists")]
    DuplicateNumber(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens an account for an existing client.
    ///
    /// The owning client is checked first; the restrictive foreign key and
    /// the unique index on `account_number` backstop concurrent writers.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::ClientNotFound`] when the client is absent and
    /// [`AccountError::DuplicateNumber`] when the generated number collides.
    pub async fn create(&self, input: NewAccount) -> Result<accounts::Model, AccountError> {
        let NewAccount {
            client_id,
            account_number,
            account_type,
            plan,
            balance,
            status,
        } = input;

        let client = clients::Entity::find_by_id(client_id).one(&self.db).await?;
        if client.is_none() {
            return Err(AccountError::ClientNotFound(client_id));
        }

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: NotSet,
            account_number: Set(account_number.clone()),
            balance: Set(balance),
            status: Set(status.into()),
            account_type: Set(account_type.into()),
            plan: Set(plan.into()),
            created_at: Set(now),
            client_id: Set(client_id),
        };

        match account.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AccountError::DuplicateNumber(account_number))
                }
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(AccountError::ClientNotFound(client_id))
                }
                _ => Err(AccountError::Database(e)),
            },
        }
    }

    /// Finds an account scoped by its owning client.
    ///
    /// An existing account queried under a different client id comes back as
    /// `None`, exactly like a missing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        account_id: i32,
        client_id: i32,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(account_id)
            .filter(accounts::Column::ClientId.eq(client_id))
            .one(&self.db)
            .await
    }

    /// Lists a client's accounts, most recently created first.
    ///
    /// The ordering is a contract: `created_at` descending, ids breaking
    /// ties. See [`listing_order`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_client(&self, client_id: i32) -> Result<Vec<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::ClientId.eq(client_id))
            .order_by_desc(accounts::Column::CreatedAt)
            .order_by_desc(accounts::Column::Id)
            .all(&self.db)
            .await
    }

    /// Sets an account's status after the lifecycle check.
    ///
    /// The row is locked for the duration of the transaction, so a close
    /// landing from another request cannot slip between the check and the
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] when the account is absent under
    /// this client and [`AccountError::Closed`] when it is closed.
    pub async fn update_status(
        &self,
        account_id: i32,
        client_id: i32,
        status: AccountStatus,
    ) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;

        let Some(account) = accounts::Entity::find_by_id(account_id)
            .filter(accounts::Column::ClientId.eq(client_id))
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Err(AccountError::NotFound(account_id));
        };

        let current = AccountStatus::from(account.status.clone());
        let next = lifecycle::apply_status(current, status)
            .map_err(|_| AccountError::Closed(account_id))?;

        let mut active: accounts::ActiveModel = account.into();
        active.status = Set(next.into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Sets an account's plan after the lifecycle check.
    ///
    /// Same locking discipline as [`Self::update_status`].
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] when the account is absent under
    /// this client and [`AccountError::Closed`] when it is closed.
    pub async fn update_plan(
        &self,
        account_id: i32,
        client_id: i32,
        plan: AccountPlan,
    ) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;

        let Some(account) = accounts::Entity::find_by_id(account_id)
            .filter(accounts::Column::ClientId.eq(client_id))
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Err(AccountError::NotFound(account_id));
        };

        let current = AccountStatus::from(account.status.clone());
        lifecycle::ensure_mutable(current).map_err(|_| AccountError::Closed(account_id))?;

        let mut active: accounts::ActiveModel = account.into();
        active.plan = Set(plan.into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Closes an account. Idempotent: closing a closed account succeeds and
    /// leaves it closed.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] when the account is absent under
    /// this client.
    pub async fn close(
        &self,
        account_id: i32,
        client_id: i32,
    ) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;

        let Some(account) = accounts::Entity::find_by_id(account_id)
            .filter(accounts::Column::ClientId.eq(client_id))
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Err(AccountError::NotFound(account_id));
        };

        let target = lifecycle::close(account.status.clone().into());

        let mut active: accounts::ActiveModel = account.into();
        active.status = Set(target.into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }
}

// ============================================================================
// Pure ordering functions for property testing
// ============================================================================

/// Sort key for an account row in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingKey {
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row id, assigned in insertion order.
    pub id: i32,
}

/// Ordering contract for account listings: newest first, with the higher id
/// first among equal timestamps so the order is total.
///
/// This is a pure function that can be tested without database access; the
/// SQL in [`AccountRepository::list_for_client`] mirrors it.
#[must_use]
pub fn listing_order(a: &ListingKey, b: &ListingKey) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
