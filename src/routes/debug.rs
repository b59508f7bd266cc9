use axum::{extract::State, Json};
use serde_json::{json, Value};
use sqlx::PgPool;

/// GET /debug/health - Check that the database answers
pub async fn health_check(State(pool): State<PgPool>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    // Check database
    match sqlx::query("SELECT 1").fetch_one(&pool).await {
        Ok(_) => {
            status["checks"]["database"] = json!("ok");
        }
        Err(e) => {
            status["checks"]["database"] = json!({"error": e.to_string()});
            status["status"] = json!("error");
        }
    }

    // Check location count
    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations")
        .fetch_one(&pool)
        .await
    {
        Ok(count) => {
            status["checks"]["location_count"] = json!(count);
        }
        Err(e) => {
            status["checks"]["location_count"] = json!({"error": e.to_string()});
        }
    }

    Json(status)
}
