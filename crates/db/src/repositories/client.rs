//! Client repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use krona_core::client::{ClientPatch, ClientStatus, NewClient};

use crate::entities::{accounts, clients, sea_orm_active_enums};

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("Client not found: {0}")]
    NotFound(i32),

    /// Email already registered to another client.
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Client still owns accounts and cannot be deleted.
    #[error("Client has {0} account(s) and cannot be deleted")]
    HasAccounts(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Client repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a client from normalized input.
    ///
    /// The email is pre-checked for availability; the unique index on
    /// `clients.email` backstops concurrent writers racing past the check.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::DuplicateEmail`] when the email is taken, or a
    /// database error if the insert fails.
    pub async fn create(&self, input: NewClient) -> Result<clients::Model, ClientError> {
        let NewClient {
            name,
            email,
            phone,
            status,
        } = input;

        if self.email_exists(&email).await? {
            return Err(ClientError::DuplicateEmail(email));
        }

        let now = chrono::Utc::now().into();
        let client = clients::ActiveModel {
            id: NotSet,
            name: Set(name),
            email: Set(email.clone()),
            phone: Set(phone),
            status: Set(status.into()),
            create_date: Set(now),
        };

        match client.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(ClientError::DuplicateEmail(email))
                }
                _ => Err(ClientError::Database(e)),
            },
        }
    }

    /// Finds a client by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<clients::Model>, DbErr> {
        clients::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a client by exact name.
    ///
    /// Names are not unique; when several clients share one, the client with
    /// the lowest id wins so the result is deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<clients::Model>, DbErr> {
        clients::Entity::find()
            .filter(clients::Column::Name.eq(name))
            .order_by_asc(clients::Column::Id)
            .one(&self.db)
            .await
    }

    /// Lists all clients in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<clients::Model>, DbErr> {
        clients::Entity::find()
            .order_by_asc(clients::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists clients whose status is `Active`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<clients::Model>, DbErr> {
        clients::Entity::find()
            .filter(clients::Column::Status.eq(sea_orm_active_enums::ClientStatus::Active))
            .order_by_asc(clients::Column::Id)
            .all(&self.db)
            .await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = clients::Entity::find()
            .filter(clients::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies a partial update to a client's contact fields.
    ///
    /// Provided fields overwrite the stored values; omitted fields are left
    /// untouched. An empty patch returns the stored record unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the client is absent and
    /// [`ClientError::DuplicateEmail`] when the new email is taken.
    pub async fn update(&self, id: i32, patch: ClientPatch) -> Result<clients::Model, ClientError> {
        let ClientPatch { name, email, phone } = patch.normalized();

        let Some(existing) = self.find_by_id(id).await? else {
            return Err(ClientError::NotFound(id));
        };

        if name.is_none() && email.is_none() && phone.is_none() {
            return Ok(existing);
        }

        let mut active: clients::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(email) = &email {
            active.email = Set(email.clone());
        }
        if let Some(phone) = phone {
            active.phone = Set(phone);
        }

        match active.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) => match (e.sql_err(), email) {
                (Some(SqlErr::UniqueConstraintViolation(_)), Some(email)) => {
                    Err(ClientError::DuplicateEmail(email))
                }
                _ => Err(ClientError::Database(e)),
            },
        }
    }

    /// Sets a client's status. Any status is reachable from any other.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the client is absent.
    pub async fn update_status(
        &self,
        id: i32,
        status: ClientStatus,
    ) -> Result<clients::Model, ClientError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Err(ClientError::NotFound(id));
        };

        let mut active: clients::ActiveModel = existing.into();
        active.status = Set(status.into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a client that owns no accounts.
    ///
    /// The account count is pre-checked; the restrictive foreign key on
    /// `accounts.client_id` backstops a concurrently opened account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the client is absent and
    /// [`ClientError::HasAccounts`] when accounts still reference it.
    pub async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let count = self.count_accounts(id).await?;
        if count > 0 {
            return Err(ClientError::HasAccounts(count));
        }

        match clients::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) if result.rows_affected == 0 => Err(ClientError::NotFound(id)),
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    let count = self.count_accounts(id).await?;
                    Err(ClientError::HasAccounts(count))
                }
                _ => Err(ClientError::Database(e)),
            },
        }
    }

    /// Counts the accounts owned by a client.
    async fn count_accounts(&self, client_id: i32) -> Result<u64, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::ClientId.eq(client_id))
            .count(&self.db)
            .await
    }
}

// ============================================================================
// Pure validation functions for property testing
// ============================================================================

/// Checks whether a candidate email is free given the stored emails.
///
/// Stored emails are already normalized; the candidate is normalized here, so
/// two addresses differing only in case or surrounding whitespace collide.
///
/// This is a pure function that can be tested without database access.
#[must_use]
pub fn email_available<S: std::hash::BuildHasher>(
    stored_emails: &std::collections::HashSet<String, S>,
    candidate: &str,
) -> bool {
    !stored_emails.contains(&krona_core::client::normalize::email(candidate))
}
