use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::{
    error::{self, ApiError},
    state::AppState,
    users::{
        dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
        password,
        repo::User,
        service::{self, LoginOutcome},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "registration for existing email");
        return Err(ApiError::Rejected("User already exists".to_string()));
    }

    let hash = password::hash_password(&payload.password)?;
    let profile = Value::Object(payload.profile);

    match User::create(&state.db, &payload.email, &hash, &profile).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "user registered");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    success: true,
                    message: state.config.messages.register_success.clone(),
                }),
            ))
        }
        // Another registration may have won between the lookup and the
        // insert; the unique index settles it.
        Err(e) => match error::duplicate_field(&e, "User") {
            Some(duplicate) => {
                warn!(email = %payload.email, "registration lost duplicate race");
                Err(duplicate)
            }
            None => Err(ApiError::Db(e)),
        },
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let messages = &state.config.messages;

    let outcome = service::verify_credentials(
        &state.db,
        &payload.email,
        &payload.password,
        &messages.login_error,
    )
    .await;

    match outcome {
        LoginOutcome::Verified(user) => {
            let token = service::issue_token();
            user.set_access_token(&state.db, &token).await?;
            info!(user_id = %user.id, email = %user.email, "user logged in");
            Ok(Json(LoginResponse {
                success: true,
                message: messages.login_success.clone(),
                access_token: token,
            }))
        }
        LoginOutcome::Rejected(message) => {
            warn!(email = %payload.email, "login rejected");
            Err(ApiError::Rejected(message))
        }
        LoginOutcome::Fault(e) => {
            error!(email = %payload.email, error = %e, "credential verification fault");
            Err(ApiError::AuthFault {
                err: e.to_string(),
                message: messages.auth_error.clone(),
            })
        }
    }
}
