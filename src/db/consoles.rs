use sqlx::PgPool;

use crate::models::Console;
use crate::query::ConsoleQuery;

pub async fn create(
    pool: &PgPool,
    name: &str,
    manufacturer: &str,
    serial_number: &str,
) -> Result<Console, sqlx::Error> {
    sqlx::query_as::<_, Console>(
        "INSERT INTO consoles (name, manufacturer, serial_number, is_active)
         VALUES ($1, $2, $3, TRUE) RETURNING *",
    )
    .bind(name)
    .bind(manufacturer)
    .bind(serial_number)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Console>, sqlx::Error> {
    sqlx::query_as::<_, Console>("SELECT * FROM consoles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_serial(
    pool: &PgPool,
    serial_number: &str,
) -> Result<Option<Console>, sqlx::Error> {
    sqlx::query_as::<_, Console>("SELECT * FROM consoles WHERE serial_number = $1")
        .bind(serial_number)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool, query: &ConsoleQuery) -> Result<Vec<Console>, sqlx::Error> {
    let sql = query.select_sql();
    let mut q = sqlx::query_as::<_, Console>(&sql);

    if let Some(is_active) = query.filter.is_active {
        q = q.bind(is_active);
    }
    if let Some(pattern) = query.filter.search_pattern() {
        q = q.bind(pattern);
    }

    q.bind(query.per_page)
        .bind(query.offset())
        .fetch_all(pool)
        .await
}

/// Rows matching the filter of `query`, ignoring its page window.
pub async fn count(pool: &PgPool, query: &ConsoleQuery) -> Result<i64, sqlx::Error> {
    let sql = query.count_sql();
    let mut q = sqlx::query_as::<_, (i64,)>(&sql);

    if let Some(is_active) = query.filter.is_active {
        q = q.bind(is_active);
    }
    if let Some(pattern) = query.filter.search_pattern() {
        q = q.bind(pattern);
    }

    let row = q.fetch_one(pool).await?;
    Ok(row.0)
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM consoles")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Writes every mutable column; callers pass the merged record.
pub async fn update(
    pool: &PgPool,
    id: i32,
    name: &str,
    manufacturer: &str,
    serial_number: &str,
    is_active: bool,
) -> Result<Console, sqlx::Error> {
    sqlx::query_as::<_, Console>(
        "UPDATE consoles
         SET name = $2, manufacturer = $3, serial_number = $4, is_active = $5, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(manufacturer)
    .bind(serial_number)
    .bind(is_active)
    .fetch_one(pool)
    .await
}

/// Flips an active console to inactive. Returns `None` when the row is
/// missing or already inactive.
pub async fn deactivate(pool: &PgPool, id: i32) -> Result<Option<Console>, sqlx::Error> {
    sqlx::query_as::<_, Console>(
        "UPDATE consoles SET is_active = FALSE, updated_at = now()
         WHERE id = $1 AND is_active RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Permanent removal; audit rows go with it via `ON DELETE CASCADE`.
pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM consoles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
