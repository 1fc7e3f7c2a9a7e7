//! Console lifecycle: create, partial update, soft deactivation and
//! permanent removal.
//!
//! Serial-number uniqueness is ultimately enforced by the unique index on
//! `consoles.serial_number`; a losing concurrent writer surfaces here as a
//! unique violation and becomes [`AppError::Conflict`].

use sqlx::PgPool;

use crate::audit;
use crate::config::DeleteMode;
use crate::db;
use crate::error::{AppError, is_unique_violation};
use crate::models::{AuditEventType, Console, ConsolePatch, NewConsole};

/// Column width of the text fields in the `consoles` table.
const MAX_FIELD_LEN: usize = 255;

/// Result of `DELETE /api/consoles/{id}` under the configured [`DeleteMode`].
#[derive(Debug)]
pub enum DeleteOutcome {
    Deactivated(Console),
    Removed { id: i32 },
}

pub async fn create(pool: &PgPool, input: NewConsole) -> Result<Console, AppError> {
    let serial_number = required_text(input.serial_number.as_deref(), "serialNumber")?;
    let name = required_text(input.name.as_deref(), "name")?;
    let manufacturer = required_text(input.manufacturer.as_deref(), "manufacturer")?;

    let console = db::consoles::create(pool, name, manufacturer, serial_number)
        .await
        .map_err(write_error)?;

    tracing::info!(
        console_id = console.id,
        serial_number = %console.serial_number,
        "Console created"
    );

    audit::record(
        pool,
        &console,
        AuditEventType::Creation,
        &format!("Console '{}' ({}) created.", console.name, console.serial_number),
    )
    .await;

    Ok(console)
}

pub async fn get(pool: &PgPool, id: i32) -> Result<Console, AppError> {
    db::consoles::find_by_id(pool, id)
        .await?
        .ok_or_else(AppError::console_not_found)
}

/// Merge `patch` into the stored console. Fields absent from the patch keep
/// their stored value.
pub async fn update(pool: &PgPool, id: i32, patch: ConsolePatch) -> Result<Console, AppError> {
    let current = get(pool, id).await?;

    let name = match &patch.name {
        None => current.name.clone(),
        Some(value) => required_text(value.as_deref(), "name")?.to_string(),
    };

    let manufacturer = match &patch.manufacturer {
        None => current.manufacturer.clone(),
        Some(value) => required_text(value.as_deref(), "manufacturer")?.to_string(),
    };

    let serial_number = match &patch.serial_number {
        None => current.serial_number.clone(),
        Some(value) => {
            let serial = required_text(value.as_deref(), "serialNumber")?;
            // Keeping the current serial must not collide with itself.
            if serial != current.serial_number {
                if let Some(other) = db::consoles::find_by_serial(pool, serial).await? {
                    if other.id != current.id {
                        return Err(AppError::duplicate_serial());
                    }
                }
            }
            serial.to_string()
        }
    };

    let is_active = match patch.is_active {
        None => current.is_active,
        Some(Some(flag)) => flag,
        Some(None) => {
            return Err(AppError::Validation("isActive cannot be null".to_string()));
        }
    };

    let updated = db::consoles::update(pool, id, &name, &manufacturer, &serial_number, is_active)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::console_not_found(),
            e => write_error(e),
        })?;

    let changed = changed_fields(&current, &updated);
    tracing::info!(console_id = updated.id, changed = ?changed, "Console updated");

    if !changed.is_empty() {
        let event = match (current.is_active, updated.is_active) {
            (true, false) => AuditEventType::Deactivated,
            (false, true) => AuditEventType::Reactivated,
            _ => AuditEventType::Update,
        };
        audit::record(
            pool,
            &updated,
            event,
            &format!(
                "Console '{}' ({}) updated: {}.",
                updated.name,
                updated.serial_number,
                changed.join(", ")
            ),
        )
        .await;
    }

    Ok(updated)
}

/// Soft delete. Not idempotent: deactivating an inactive console is a conflict.
pub async fn deactivate(pool: &PgPool, id: i32) -> Result<Console, AppError> {
    let Some(console) = db::consoles::deactivate(pool, id).await? else {
        // The conditional update matched nothing: either missing or already inactive.
        return match db::consoles::find_by_id(pool, id).await? {
            None => Err(AppError::console_not_found()),
            Some(_) => Err(AppError::Conflict("Console is already deactivated".to_string())),
        };
    };

    tracing::info!(
        console_id = console.id,
        serial_number = %console.serial_number,
        "Console deactivated"
    );

    audit::record(
        pool,
        &console,
        AuditEventType::Deactivated,
        &format!("Console '{}' ({}) marked inactive.", console.name, console.serial_number),
    )
    .await;

    Ok(console)
}

/// Hard delete. The console's audit trail is removed with it.
pub async fn destroy(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let removed = db::consoles::delete(pool, id).await?;
    if removed == 0 {
        return Err(AppError::console_not_found());
    }

    tracing::info!(console_id = id, "Console permanently deleted");
    Ok(())
}

pub async fn delete(pool: &PgPool, mode: DeleteMode, id: i32) -> Result<DeleteOutcome, AppError> {
    match mode {
        DeleteMode::Soft => deactivate(pool, id).await.map(DeleteOutcome::Deactivated),
        DeleteMode::Hard => destroy(pool, id).await.map(|()| DeleteOutcome::Removed { id }),
    }
}

/// Trimmed, non-blank text that fits the column.
fn required_text<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::Validation(format!(
            "{field} is required and cannot be blank"
        )));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(value)
}

fn write_error(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        AppError::duplicate_serial()
    } else {
        AppError::Database(err)
    }
}

fn changed_fields(before: &Console, after: &Console) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if before.name != after.name {
        changed.push("name");
    }
    if before.manufacturer != after.manufacturer {
        changed.push("manufacturer");
    }
    if before.serial_number != after.serial_number {
        changed.push("serialNumber");
    }
    if before.is_active != after.is_active {
        changed.push("isActive");
    }
    changed
}
