use sqlx::PgPool;

use crate::models::AuditLog;

pub async fn create(
    pool: &PgPool,
    console_id: i32,
    console_serial_number: &str,
    event_type: &str,
    event_description: &str,
) -> Result<AuditLog, sqlx::Error> {
    sqlx::query_as::<_, AuditLog>(
        "INSERT INTO audit_logs (console_id, console_serial_number, event_type, event_description)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(console_id)
    .bind(console_serial_number)
    .bind(event_type)
    .bind(event_description)
    .fetch_one(pool)
    .await
}

pub async fn list_by_console(pool: &PgPool, console_id: i32) -> Result<Vec<AuditLog>, sqlx::Error> {
    sqlx::query_as::<_, AuditLog>(
        "SELECT * FROM audit_logs WHERE console_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(console_id)
    .fetch_all(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_logs")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
