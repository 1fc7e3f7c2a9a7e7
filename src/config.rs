use std::net::IpAddr;

use crate::models::console::parse_flag;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub max_connections: u32,
    pub max_body_size: usize,
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub delete_mode: DeleteMode,
    pub seed_on_start: bool,
}

/// Which lifecycle operation backs `DELETE /api/consoles/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Flip `is_active` to false; a second call is a conflict.
    Soft,
    /// Remove the row and, by cascade, its audit trail.
    Hard,
}

impl DeleteMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "soft" | "deactivate" => Some(DeleteMode::Soft),
            "hard" | "permanent" => Some(DeleteMode::Hard),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("INVENTORY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid INVENTORY_HOST: {e}"))?;

        let port: u16 = env_or("INVENTORY_PORT", "3333")
            .parse()
            .map_err(|e| format!("Invalid INVENTORY_PORT: {e}"))?;

        let log_level = env_or("INVENTORY_LOG_LEVEL", "info");

        let max_connections: u32 = env_or("INVENTORY_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid INVENTORY_MAX_CONNECTIONS: {e}"))?;

        let max_body_size: usize = env_or("INVENTORY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid INVENTORY_MAX_BODY_SIZE: {e}"))?;

        let default_page_size: i64 = env_or("INVENTORY_DEFAULT_PAGE_SIZE", "10")
            .parse()
            .map_err(|e| format!("Invalid INVENTORY_DEFAULT_PAGE_SIZE: {e}"))?;

        let max_page_size: i64 = env_or("INVENTORY_MAX_PAGE_SIZE", "100")
            .parse()
            .map_err(|e| format!("Invalid INVENTORY_MAX_PAGE_SIZE: {e}"))?;

        if default_page_size < 1 || max_page_size < default_page_size {
            return Err(format!(
                "Page sizes must satisfy 1 <= INVENTORY_DEFAULT_PAGE_SIZE ({default_page_size}) \
                 <= INVENTORY_MAX_PAGE_SIZE ({max_page_size})"
            ));
        }

        let delete_mode_raw = env_or("INVENTORY_DELETE_MODE", "soft");
        let delete_mode = DeleteMode::parse(&delete_mode_raw).ok_or_else(|| {
            format!("Invalid INVENTORY_DELETE_MODE '{delete_mode_raw}': expected 'soft' or 'hard'")
        })?;

        let seed_on_start = seed_flag(&env_or("INVENTORY_SEED", "false"))
            .ok_or_else(|| "Invalid INVENTORY_SEED: expected true or false".to_string())?;

        Ok(Config {
            database_url,
            host,
            port,
            log_level,
            max_connections,
            max_body_size,
            default_page_size,
            max_page_size,
            delete_mode,
            seed_on_start,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// A set but blank `INVENTORY_SEED` means off.
fn seed_flag(value: &str) -> Option<bool> {
    if value.trim().is_empty() {
        return Some(false);
    }
    parse_flag(value)
}
