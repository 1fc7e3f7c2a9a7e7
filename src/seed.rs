//! Sample inventory for demos and local development. Each table is only
//! seeded while it is empty, so running this twice is harmless.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db;
use crate::models::AuditEventType;

/// (name, manufacturer, serial number, active)
const CONSOLES: &[(&str, &str, &str, bool)] = &[
    ("PlayStation 5", "Sony", "PS5-001-XYZ", true),
    ("Xbox Series X", "Microsoft", "XSX-ABC-789", true),
    ("Nintendo Switch", "Nintendo", "NSW-DEF-456", true),
    ("PlayStation 4", "Sony", "PS4-GHI-123", false),
    ("Steam Deck", "Valve", "SD-JKL-007", true),
    ("Nintendo 3DS", "Nintendo", "N3DS-A1B-2C3", true),
    ("PlayStation 3", "Sony", "PS3-D4E-5F6", false),
    ("Xbox One", "Microsoft", "XONE-G7H-8I9", true),
    ("Wii U", "Nintendo", "WIU-J1K-2L3", false),
    ("PlayStation 2", "Sony", "PS2-M4N-5O6", true),
    ("Xbox 360", "Microsoft", "X360-P7Q-8R9", true),
    ("Nintendo Wii", "Nintendo", "WII-S1T-2U3", true),
    ("Sega Dreamcast", "Sega", "SDC-V4W-5X6", false),
    ("Nintendo 64", "Nintendo", "N64-Y7Z-8A9", true),
    ("PlayStation (PS1)", "Sony", "PS1-B1C-2D3", true),
    ("Xbox (Original)", "Microsoft", "XBOX-E4F-5G6", true),
    ("Sega Genesis", "Sega", "SGN-H7I-8J9", false),
    ("Super Nintendo", "Nintendo", "SNES-K1L-2M3", true),
    ("NES", "Nintendo", "NES-N4O-5P6", true),
    ("Atari 2600", "Atari", "AT26-Q7R-8S9", true),
    ("Xbox Series S", "Microsoft", "XSS-T1U-2V3", true),
    ("Nintendo Switch Lite", "Nintendo", "NSW-L-W4X-5Y6", true),
    ("PlayStation Portable (PSP)", "Sony", "PSP-Z7A-8B9", false),
    ("Nintendo DS", "Nintendo", "NDS-C1D-2E3", true),
    ("Game Boy Advance", "Nintendo", "GBA-F4G-5H6", true),
];

/// (serial number, event, description suffix)
const AUDIT_EVENTS: &[(&str, AuditEventType, &str)] = &[
    ("PS5-001-XYZ", AuditEventType::Creation, "created by seeder"),
    ("PS5-001-XYZ", AuditEventType::Update, "updated with initial details"),
    ("XSX-ABC-789", AuditEventType::Creation, "created by seeder"),
    ("PS4-GHI-123", AuditEventType::Creation, "created by seeder"),
    ("PS4-GHI-123", AuditEventType::Deactivated, "marked inactive by seeder"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub consoles: u64,
    pub audit_logs: u64,
}

pub async fn run(pool: &PgPool) -> Result<SeedReport, sqlx::Error> {
    let mut report = SeedReport::default();

    if db::consoles::count_all(pool).await? > 0 {
        tracing::info!("Consoles table already has data, skipping console seed");
    } else {
        // One statement so the whole batch shares created_at and ids follow list order.
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO consoles (name, manufacturer, serial_number, is_active) ");
        builder.push_values(CONSOLES, |mut row, (name, manufacturer, serial, active)| {
            row.push_bind(*name)
                .push_bind(*manufacturer)
                .push_bind(*serial)
                .push_bind(*active);
        });
        report.consoles = builder.build().execute(pool).await?.rows_affected();
        tracing::info!(count = report.consoles, "Seeded consoles");
    }

    if db::audit_logs::count_all(pool).await? > 0 {
        tracing::info!("Audit log table already has data, skipping audit seed");
        return Ok(report);
    }

    for (serial, event, suffix) in AUDIT_EVENTS {
        let Some(console) = db::consoles::find_by_serial(pool, serial).await? else {
            tracing::warn!(serial_number = serial, "Seed console missing, skipping its audit events");
            continue;
        };
        let description = format!("Console '{}' ({}) {suffix}.", console.name, console.serial_number);
        db::audit_logs::create(pool, console.id, &console.serial_number, event.as_str(), &description)
            .await?;
        report.audit_logs += 1;
    }

    tracing::info!(count = report.audit_logs, "Seeded audit logs");
    Ok(report)
}
