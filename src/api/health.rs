//! Liveness and readiness endpoints.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::services::AvatarService;

/// Liveness response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: String,
}

/// Readiness of the store and of avatar storage.
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    database: &'static str,
    /// Migrations not yet applied; `null` when the store is unreachable.
    pending_migrations: Option<usize>,
    avatar_storage: &'static str,
}

/// The process is up.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Ready when the schema is fully migrated and the avatar directory is usable.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Ready to serve school records", body = ReadyResponse),
        (status = 503, description = "Store unreachable, schema behind, or avatar storage missing", body = ReadyResponse)
    )
)]
#[get("/ready")]
pub async fn ready(pool: web::Data<DbPool>, avatars: web::Data<AvatarService>) -> HttpResponse {
    let pending_migrations = match pool.pending_migrations().await {
        Ok(pending) => Some(pending),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            None
        }
    };
    let storage_ok = avatars.storage_available().await;

    let database = match pending_migrations {
        None => "unreachable",
        Some(0) => "migrated",
        Some(_) => "migrations pending",
    };
    let is_ready = pending_migrations == Some(0) && storage_ok;

    let body = ReadyResponse {
        status: if is_ready { "ready" } else { "not ready" },
        database,
        pending_migrations,
        avatar_storage: if storage_ok { "available" } else { "missing" },
    };

    if is_ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Configure health routes.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
