//! Login and registration endpoints

use api_types::user::{Login, Register, UserSummary};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use engine::{RegisterCmd, User};

use crate::{ServerError, server::ServerState};

fn summary(user: User) -> UserSummary {
    UserSummary {
        id: user.id,
        username: user.username,
        email: user.email,
        name: user.name,
    }
}

/// Handle login requests
pub async fn login(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<Login>, ServerError>,
) -> Result<Json<UserSummary>, ServerError> {
    let user = state
        .engine
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(summary(user)))
}

/// Handle requests for creating a new user
pub async fn register(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<Register>, ServerError>,
) -> Result<(StatusCode, Json<UserSummary>), ServerError> {
    let user = state
        .engine
        .register(RegisterCmd {
            username: payload.username,
            password: payload.password,
            email: payload.email,
            name: payload.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(summary(user))))
}
