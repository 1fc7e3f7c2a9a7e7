pub mod audit_log;
pub mod console;

pub use audit_log::{AuditEventType, AuditLog};
pub use console::{Console, ConsolePatch, NewConsole};
