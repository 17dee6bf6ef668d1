//! Repository-error to HTTP-response mapping.
//!
//! Handlers convert repository errors into [`ApiError`] at the boundary;
//! every error response keeps the shape `{"error": code, "message": ...}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde_json::json;
use tracing::{error, warn};
use validator::ValidationErrors;

use krona_db::repositories::{AccountError, ClientError};
use krona_shared::AppError;

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(AppError);

impl ApiError {
    /// 400 response carrying a single validation message.
    #[must_use]
    pub const fn bad_request(message: String) -> Self {
        Self(AppError::Validation(message))
    }

    /// 404 response for an entity that is absent in the caller's scope.
    #[must_use]
    pub const fn not_found(message: String) -> Self {
        Self(AppError::NotFound(message))
    }

    /// Flattens `validator` failures into a single 400 response.
    ///
    /// Messages are sorted by field so the output is deterministic.
    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    let detail = e
                        .message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string);
                    format!("{field}: {detail}")
                })
            })
            .collect();
        messages.sort();
        Self(AppError::Validation(messages.join("; ")))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let app = match err {
            ClientError::NotFound(id) => AppError::NotFound(format!("Client {id} not found")),
            ClientError::DuplicateEmail(email) => {
                AppError::Conflict(format!("A client with email '{email}' already exists"))
            }
            ClientError::HasAccounts(count) => AppError::Conflict(format!(
                "Client still owns {count} account(s) and cannot be deleted"
            )),
            ClientError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let app = match err {
            AccountError::NotFound(id) => AppError::NotFound(format!("Account {id} not found")),
            // Closed accounts are reported exactly like missing ones; the
            // distinction only survives in the log.
            AccountError::Closed(id) => {
                warn!(account_id = id, "Rejected mutation of closed account");
                AppError::NotFound(format!("Account {id} not found"))
            }
            AccountError::ClientNotFound(id) => {
                AppError::NotFound(format!("Client {id} not found"))
            }
            AccountError::DuplicateNumber(number) => {
                AppError::Conflict(format!("Account number '{number}' already exists"))
            }
            AccountError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(err) = self;
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if status.is_server_error() {
            error!(error = %err, "Request failed");
            "An error occurred".to_string()
        } else {
            err.message().to_string()
        };
        (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn inner(err: ApiError) -> AppError {
        err.0
    }

    #[test]
    fn test_client_not_found_maps_to_404() {
        let app = inner(ApiError::from(ClientError::NotFound(7)));
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.error_code(), "NOT_FOUND");
        assert_eq!(app.message(), "Client 7 not found");
    }

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let app = inner(ApiError::from(ClientError::DuplicateEmail(
            "user@example.com".to_string(),
        )));
        assert_eq!(app.status_code(), 409);
        assert_eq!(app.error_code(), "CONFLICT");
    }

    #[test]
    fn test_has_accounts_maps_to_conflict() {
        let app = inner(ApiError::from(ClientError::HasAccounts(2)));
        assert_eq!(app.status_code(), 409);
        assert!(app.message().contains("2 account(s)"));
    }

    #[test]
    fn test_closed_account_surfaces_as_not_found() {
        let app = inner(ApiError::from(AccountError::Closed(42)));
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.error_code(), "NOT_FOUND");
        assert_eq!(app.message(), "Account 42 not found");
    }

    #[test]
    fn test_duplicate_number_maps_to_conflict() {
        let app = inner(ApiError::from(AccountError::DuplicateNumber(
            "abc".to_string(),
        )));
        assert_eq!(app.status_code(), 409);
    }

    #[test]
    fn test_validation_errors_flatten_sorted() {
        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "must not be empty"))]
            name: String,
            #[validate(length(min = 1, message = "must not be empty"))]
            email: String,
        }

        let probe = Probe {
            name: String::new(),
            email: String::new(),
        };
        let errors = probe.validate().expect_err("probe should fail");
        let app = inner(ApiError::validation(&errors));
        assert_eq!(app.status_code(), 400);
        assert_eq!(
            app.message(),
            "email: must not be empty; name: must not be empty"
        );
    }
}
