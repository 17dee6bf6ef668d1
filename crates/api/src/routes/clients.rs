//! Client management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::{AppState, error::ApiError, validation};
use krona_core::client::{ClientPatch, ClientStatus, NewClient};
use krona_db::{ClientRepository, entities::clients};

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", post(create_client))
        .route("/clients", get(list_clients))
        .route("/clients/active", get(list_active_clients))
        .route("/clients/by-name/{name}", get(get_client_by_name))
        .route("/clients/{client_id}", get(get_client))
        .route("/clients/{client_id}", put(update_client))
        .route("/clients/{client_id}", delete(delete_client))
        .route("/clients/{client_id}/status", post(update_client_status))
}

/// Request body for registering a client.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    /// Display name (1-50 characters).
    #[validate(custom(function = validation::client_name, message = "Name must be 1-50 characters"))]
    pub name: String,
    /// Contact email (unique across clients).
    #[validate(custom(function = validation::client_email, message = "Email address is not valid"))]
    pub email: String,
    /// Contact phone in international format.
    #[validate(custom(function = validation::client_phone, message = "Phone must be + followed by 10-15 digits"))]
    pub phone: String,
}

/// Request body for updating a client.
///
/// All fields are optional; omitted fields keep their stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    /// New display name.
    #[validate(custom(function = validation::client_name, message = "Name must be 1-50 characters"))]
    pub name: Option<String>,
    /// New contact email.
    #[validate(custom(function = validation::client_email, message = "Email address is not valid"))]
    pub email: Option<String>,
    /// New contact phone.
    #[validate(custom(function = validation::client_phone, message = "Phone must be + followed by 10-15 digits"))]
    pub phone: Option<String>,
}

/// Request body for setting a client's status.
#[derive(Debug, Deserialize)]
pub struct UpdateClientStatusRequest {
    /// Target status: active, blocked, suspended.
    pub status: String,
}

/// Response for a client.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client ID.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Contact email (stored lowercase).
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Lifecycle status.
    pub status: String,
    /// Registration timestamp.
    pub create_date: DateTime<FixedOffset>,
}

impl From<clients::Model> for ClientResponse {
    fn from(model: clients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            status: ClientStatus::from(model.status).as_str().to_string(),
            create_date: model.create_date,
        }
    }
}

/// POST /clients - Register a new client.
async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return ApiError::validation(&e).into_response();
    }

    let repo = ClientRepository::new((*state.db).clone());
    let input = NewClient::new(&payload.name, &payload.email, &payload.phone);

    match repo.create(input).await {
        Ok(client) => {
            info!(client_id = client.id, email = %client.email, "Client created");
            (StatusCode::CREATED, Json(ClientResponse::from(client))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /clients - List all clients in registration order.
async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.list_all().await {
        Ok(clients) => {
            let response: Vec<ClientResponse> =
                clients.into_iter().map(ClientResponse::from).collect();
            (StatusCode::OK, Json(json!({ "clients": response }))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /clients/active - List clients whose status is active.
async fn list_active_clients(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.list_active().await {
        Ok(clients) => {
            let response: Vec<ClientResponse> =
                clients.into_iter().map(ClientResponse::from).collect();
            (StatusCode::OK, Json(json!({ "clients": response }))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/clients/by-name/{name}` - Look up a client by exact name.
///
/// When several clients share the name, the oldest registration (lowest id)
/// wins.
async fn get_client_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.find_by_name(&name).await {
        Ok(Some(client)) => (StatusCode::OK, Json(ClientResponse::from(client))).into_response(),
        Ok(None) => ApiError::not_found(format!("Client '{name}' not found")).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/clients/{client_id}` - Get a client by id.
async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.find_by_id(client_id).await {
        Ok(Some(client)) => (StatusCode::OK, Json(ClientResponse::from(client))).into_response(),
        Ok(None) => ApiError::not_found(format!("Client {client_id} not found")).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT `/clients/{client_id}` - Update a client's contact fields.
async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
    Json(payload): Json<UpdateClientRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return ApiError::validation(&e).into_response();
    }

    let repo = ClientRepository::new((*state.db).clone());
    let patch = ClientPatch {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
    };

    match repo.update(client_id, patch).await {
        Ok(client) => {
            info!(client_id = client.id, "Client updated");
            (StatusCode::OK, Json(ClientResponse::from(client))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/clients/{client_id}/status` - Set a client's status.
///
/// Client status transitions are unrestricted; any status may be set at any
/// time.
async fn update_client_status(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
    Json(payload): Json<UpdateClientStatusRequest>,
) -> impl IntoResponse {
    let status = match payload.status.parse::<ClientStatus>() {
        Ok(s) => s,
        Err(message) => return ApiError::bad_request(message).into_response(),
    };

    let repo = ClientRepository::new((*state.db).clone());

    match repo.update_status(client_id, status).await {
        Ok(client) => {
            info!(client_id = client.id, status = status.as_str(), "Client status updated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// DELETE `/clients/{client_id}` - Delete a client that owns no accounts.
async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.delete(client_id).await {
        Ok(()) => {
            info!(client_id = client_id, "Client deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
