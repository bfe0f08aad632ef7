use api_types::health::{DatabaseStatus, Health};
use axum::{Json, extract::State};

use crate::server::ServerState;

/// Liveness check. Reports which backend is serving requests.
pub async fn get(State(state): State<ServerState>) -> Json<Health> {
    let status = state.engine.store_status();

    Json(Health {
        status: "OK".to_string(),
        message: "SpendWise API is running!".to_string(),
        database: DatabaseStatus {
            kind: status.backend.as_str().to_string(),
            connected: status.connected,
            message: status.message,
        },
    })
}
