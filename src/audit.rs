use sqlx::PgPool;

use crate::db;
use crate::error::AppError;
use crate::models::{AuditEventType, AuditLog, Console};

/// Append a lifecycle event for `console`. Called after the mutation has been
/// persisted; a failure here is logged and never fails the caller.
pub async fn record(pool: &PgPool, console: &Console, event: AuditEventType, description: &str) {
    if let Err(e) = db::audit_logs::create(
        pool,
        console.id,
        &console.serial_number,
        event.as_str(),
        description,
    )
    .await
    {
        tracing::error!(
            console_id = console.id,
            event = %event,
            "Failed to record audit log: {e}"
        );
    }
}

/// Audit trail of one console, newest first.
pub async fn list_for_console(pool: &PgPool, console_id: i32) -> Result<Vec<AuditLog>, AppError> {
    db::consoles::find_by_id(pool, console_id)
        .await?
        .ok_or_else(AppError::console_not_found)?;

    Ok(db::audit_logs::list_by_console(pool, console_id).await?)
}
