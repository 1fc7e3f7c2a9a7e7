use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i32,
    pub console_id: i32,
    pub console_serial_number: String,
    pub event_type: String,
    pub event_description: String,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle events written by the service. The column is free text, so
/// rows written by other tools may carry other values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEventType {
    Creation,
    Update,
    Deactivated,
    Reactivated,
}

impl AuditEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditEventType::Creation => "CREATION",
            AuditEventType::Update => "UPDATE",
            AuditEventType::Deactivated => "DEACTIVATED",
            AuditEventType::Reactivated => "REACTIVATED",
        }
    }
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
