use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ServerStatus {
    pub id: u16,
    pub description: String,
    pub current_connections: usize,
    pub maximum_connections: usize,
}

#[derive(Serialize)]
pub struct GatewayStatus {
    pub description: String,
    pub current_connections: usize,
    pub maximum_connections: usize,
}

pub async fn get_health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn list_servers(State(state): State<AppState>) -> Json<Vec<ServerStatus>> {
    let statuses = state
        .registry
        .primary_servers()
        .values()
        .map(|server| ServerStatus {
            id: server.id(),
            description: server.description(),
            current_connections: server.current_connections(),
            maximum_connections: server.maximum_connections(),
        })
        .collect();

    Json(statuses)
}

pub async fn list_gateways(State(state): State<AppState>) -> Json<Vec<GatewayStatus>> {
    let statuses = state
        .registry
        .gateways()
        .iter()
        .map(|gateway| GatewayStatus {
            description: gateway.description(),
            current_connections: gateway.current_connections(),
            maximum_connections: gateway.maximum_connections(),
        })
        .collect();

    Json(statuses)
}
