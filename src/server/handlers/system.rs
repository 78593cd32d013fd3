use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::{error::MessageBody, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub health: &'static str,
    pub expenses: &'static str,
    pub salaries: &'static str,
    pub predefined_expenses: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Welcome {
    pub message: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub hash: &'static str,
    pub status: &'static str,
    pub timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            hash: env!("BUDGET_TRACKER_BUILD_HASH"),
            status: env!("BUDGET_TRACKER_BUILD_STATUS"),
            timestamp: env!("BUDGET_TRACKER_BUILD_TIMESTAMP"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub environment: String,
    pub build: BuildInfo,
}

pub async fn root() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to Budget Tracker API",
        endpoints: Endpoints {
            health: "/api/health",
            expenses: "/api/expenses",
            salaries: "/api/salaries",
            predefined_expenses: "/api/predefined-expenses",
        },
    })
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "OK",
        message: "Budget Tracker API is running",
        timestamp: state.clock.now(),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        build: BuildInfo::current(),
    })
}

pub async fn not_found() -> (StatusCode, Json<MessageBody>) {
    (StatusCode::NOT_FOUND, Json(MessageBody::new("Route not found")))
}
