//! Account management routes.
//!
//! Account routes nest under the owning client, so every lookup is scoped by
//! `(client_id, account_id)` and an account under the wrong client behaves as
//! missing.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError};
use krona_core::account::{AccountPlan, AccountStatus, AccountType, NewAccount};
use krona_db::{AccountRepository, entities::accounts};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/{client_id}/accounts", post(create_account))
        .route("/clients/{client_id}/accounts", get(list_accounts))
        .route(
            "/clients/{client_id}/accounts/{account_id}",
            get(get_account),
        )
        .route(
            "/clients/{client_id}/accounts/{account_id}/status",
            patch(update_account_status),
        )
        .route(
            "/clients/{client_id}/accounts/{account_id}/plan",
            patch(update_account_plan),
        )
        .route(
            "/clients/{client_id}/accounts/{account_id}/close",
            post(close_account),
        )
}

/// Request body for opening an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account type: debit, credit, savings.
    #[serde(rename = "type")]
    pub account_type: String,
}

/// Request body for setting an account's status.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountStatusRequest {
    /// Target status: active, closed.
    pub status: String,
}

/// Request body for switching an account's plan.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountPlanRequest {
    /// Target plan: basic, standard, premium.
    pub plan: String,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: i32,
    /// Globally unique account number.
    pub account_number: String,
    /// Current balance, rendered as a decimal string.
    pub balance: String,
    /// Lifecycle status.
    pub status: String,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: String,
    /// Pricing plan.
    pub plan: String,
    /// Opening timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// Owning client ID.
    pub client_id: i32,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            account_number: model.account_number,
            balance: model.balance.to_string(),
            status: AccountStatus::from(model.status).as_str().to_string(),
            account_type: AccountType::from(model.account_type).as_str().to_string(),
            plan: AccountPlan::from(model.plan).as_str().to_string(),
            created_at: model.created_at,
            client_id: model.client_id,
        }
    }
}

/// POST `/clients/{client_id}/accounts` - Open an account for a client.
///
/// The account number is generated server-side; balance starts at zero and
/// the plan at basic.
async fn create_account(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let account_type = match payload.account_type.parse::<AccountType>() {
        Ok(t) => t,
        Err(message) => return ApiError::bad_request(message).into_response(),
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo.create(NewAccount::open(client_id, account_type)).await {
        Ok(account) => {
            info!(
                client_id = client_id,
                account_id = account.id,
                account_number = %account.account_number,
                "Account opened"
            );
            (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/clients/{client_id}/accounts` - List a client's accounts, newest
/// first.
async fn list_accounts(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_for_client(client_id).await {
        Ok(accounts) => {
            let response: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": response }))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/clients/{client_id}/accounts/{account_id}` - Get one account.
async fn get_account(
    State(state): State<AppState>,
    Path((client_id, account_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.find_by_id(account_id, client_id).await {
        Ok(Some(account)) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Ok(None) => ApiError::not_found(format!("Account {account_id} not found")).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PATCH `/clients/{client_id}/accounts/{account_id}/status` - Set an
/// account's status. Closed accounts reject the update.
async fn update_account_status(
    State(state): State<AppState>,
    Path((client_id, account_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateAccountStatusRequest>,
) -> impl IntoResponse {
    let status = match payload.status.parse::<AccountStatus>() {
        Ok(s) => s,
        Err(message) => return ApiError::bad_request(message).into_response(),
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo.update_status(account_id, client_id, status).await {
        Ok(account) => {
            info!(
                account_id = account.id,
                status = status.as_str(),
                "Account status updated"
            );
            (StatusCode::OK, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PATCH `/clients/{client_id}/accounts/{account_id}/plan` - Switch an
/// account's plan. Closed accounts reject the update.
async fn update_account_plan(
    State(state): State<AppState>,
    Path((client_id, account_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateAccountPlanRequest>,
) -> impl IntoResponse {
    let plan = match payload.plan.parse::<AccountPlan>() {
        Ok(p) => p,
        Err(message) => return ApiError::bad_request(message).into_response(),
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo.update_plan(account_id, client_id, plan).await {
        Ok(account) => {
            info!(
                account_id = account.id,
                plan = plan.as_str(),
                "Account plan updated"
            );
            (StatusCode::OK, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/clients/{client_id}/accounts/{account_id}/close` - Close an
/// account. Closing an already-closed account succeeds and changes nothing.
async fn close_account(
    State(state): State<AppState>,
    Path((client_id, account_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.close(account_id, client_id).await {
        Ok(account) => {
            info!(account_id = account.id, "Account closed");
            (StatusCode::OK, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
