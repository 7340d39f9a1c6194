use actix_web::{get, web, HttpResponse, Responder};
use deadpool_redis::{redis, Pool};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    redis: &'static str,
}

/// Liveness check, no I/O.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

fn status_label(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "unhealthy"
    }
}

async fn database_ok(db: &DatabaseConnection) -> bool {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1");
    match db.execute(ping).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Readiness: database check failed");
            false
        }
    }
}

async fn redis_ok(pool: &Pool) -> bool {
    let mut conn = match pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "Readiness: redis pool unavailable");
            return false;
        }
    };

    match redis::cmd("PING").query_async::<String>(&mut conn).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Readiness: redis PING failed");
            false
        }
    }
}

/// Readiness check: database and Redis must both answer.
#[get("/ready")]
pub async fn readiness(
    db: web::Data<Arc<DatabaseConnection>>,
    redis: web::Data<Arc<Pool>>,
) -> impl Responder {
    let database = database_ok(db.get_ref()).await;
    let cache = redis_ok(redis.get_ref()).await;

    let body = ReadinessResponse {
        status: status_label(database && cache),
        database: status_label(database),
        redis: status_label(cache),
    };

    if database && cache {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
