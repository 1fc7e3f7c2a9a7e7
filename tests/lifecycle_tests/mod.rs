use crate::common;

use console_inventory::error::AppError;
use console_inventory::models::{ConsolePatch, NewConsole};
use console_inventory::{db, lifecycle, seed};

fn new_console(name: &str, manufacturer: &str, serial: &str) -> NewConsole {
    NewConsole {
        name: Some(name.to_string()),
        manufacturer: Some(manufacturer.to_string()),
        serial_number: Some(serial.to_string()),
    }
}

#[tokio::test]
async fn racing_creates_store_one_console() {
    let (pool, db_name, _) = common::spawn_db().await;

    let (a, b) = tokio::join!(
        lifecycle::create(&pool, new_console("Atari 2600", "Atari", "AT26-Q7R-8S9")),
        lifecycle::create(&pool, new_console("Atari 2600 Jr", "Atari", "AT26-Q7R-8S9")),
    );

    let outcomes = [a.is_ok(), b.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, AppError::Conflict(_)), "got {loser}");

    assert_eq!(db::consoles::count_all(&pool).await.unwrap(), 1);

    common::drop_db(pool, &db_name).await;
}

#[tokio::test]
async fn racing_deactivations_succeed_once() {
    let (pool, db_name, _) = common::spawn_db().await;
    let console = lifecycle::create(&pool, new_console("NES", "Nintendo", "NES-N4O-5P6"))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        lifecycle::deactivate(&pool, console.id),
        lifecycle::deactivate(&pool, console.id),
    );

    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, AppError::Conflict(_)), "got {loser}");

    common::drop_db(pool, &db_name).await;
}

#[tokio::test]
async fn racing_serial_changes_keep_serials_unique() {
    let (pool, db_name, _) = common::spawn_db().await;
    let first = lifecycle::create(&pool, new_console("Xbox One", "Microsoft", "XONE-1"))
        .await
        .unwrap();
    let second = lifecycle::create(&pool, new_console("Xbox 360", "Microsoft", "X360-1"))
        .await
        .unwrap();

    let patch = || ConsolePatch {
        serial_number: Some(Some("XBOX-SHARED".to_string())),
        ..Default::default()
    };

    let (a, b) = tokio::join!(
        lifecycle::update(&pool, first.id, patch()),
        lifecycle::update(&pool, second.id, patch()),
    );

    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, AppError::Conflict(_)), "got {loser}");

    common::drop_db(pool, &db_name).await;
}

#[tokio::test]
async fn empty_patch_keeps_record_and_writes_no_audit_entry() {
    let (pool, db_name, _) = common::spawn_db().await;
    let created = lifecycle::create(&pool, new_console("Nintendo 64", "Nintendo", "N64-Y7Z-8A9"))
        .await
        .unwrap();

    let updated = lifecycle::update(&pool, created.id, ConsolePatch::default())
        .await
        .unwrap();
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.serial_number, created.serial_number);
    assert!(updated.updated_at >= created.updated_at);

    let logs = db::audit_logs::list_by_console(&pool, created.id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].event_type, "CREATION");

    common::drop_db(pool, &db_name).await;
}

#[tokio::test]
async fn reactivation_is_recorded() {
    let (pool, db_name, _) = common::spawn_db().await;
    let console = lifecycle::create(&pool, new_console("Sega Genesis", "Sega", "SGN-H7I-8J9"))
        .await
        .unwrap();
    lifecycle::deactivate(&pool, console.id).await.unwrap();

    let patch = ConsolePatch {
        is_active: Some(Some(true)),
        ..Default::default()
    };
    let reactivated = lifecycle::update(&pool, console.id, patch).await.unwrap();
    assert!(reactivated.is_active);

    let logs = db::audit_logs::list_by_console(&pool, console.id).await.unwrap();
    assert_eq!(logs[0].event_type, "REACTIVATED");
    assert_eq!(logs[1].event_type, "DEACTIVATED");

    common::drop_db(pool, &db_name).await;
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let (pool, db_name, _) = common::spawn_db().await;

    let first = seed::run(&pool).await.unwrap();
    assert_eq!(first.consoles, 25);
    assert_eq!(first.audit_logs, 5);

    let second = seed::run(&pool).await.unwrap();
    assert_eq!(second, seed::SeedReport::default());
    assert_eq!(db::consoles::count_all(&pool).await.unwrap(), 25);

    let ps4 = db::consoles::find_by_serial(&pool, "PS4-GHI-123")
        .await
        .unwrap()
        .unwrap();
    assert!(!ps4.is_active);
    let logs = db::audit_logs::list_by_console(&pool, ps4.id).await.unwrap();
    assert_eq!(logs.len(), 2);

    common::drop_db(pool, &db_name).await;
}
