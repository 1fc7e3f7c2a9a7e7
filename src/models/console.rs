use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// A tracked console unit. Serialized in camelCase; columns are snake_case.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Console {
    pub id: i32,
    pub name: String,
    pub manufacturer: String,
    pub serial_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/consoles`. Fields are optional here so that a missing
/// field is reported as a validation error rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsole {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(alias = "serial_number")]
    pub serial_number: Option<String>,
}

/// Body of `PUT /api/consoles/{id}`.
///
/// Each field is tri-state: `None` when the key is absent, `Some(None)` for an
/// explicit `null`, `Some(Some(v))` for a value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, alias = "serial_number", deserialize_with = "present")]
    pub serial_number: Option<Option<String>>,
    #[serde(default, alias = "is_active", deserialize_with = "present_flag")]
    pub is_active: Option<Option<bool>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn present_flag<'de, D>(deserializer: D) -> Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Truthy>::deserialize(deserializer).map(|flag| Some(flag.map(|Truthy(b)| b)))
}

/// Parses the loose boolean spellings clients send for flags.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A boolean that also accepts `1`/`0` and their string forms.
struct Truthy(bool);

impl<'de> Deserialize<'de> for Truthy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TruthyVisitor;

        impl Visitor<'_> for TruthyVisitor {
            type Value = Truthy;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean, 0/1, or \"true\"/\"false\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Truthy, E> {
                Ok(Truthy(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Truthy, E> {
                match v {
                    0 => Ok(Truthy(false)),
                    1 => Ok(Truthy(true)),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Truthy, E> {
                match v {
                    0 => Ok(Truthy(false)),
                    1 => Ok(Truthy(true)),
                    _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Truthy, E> {
                parse_flag(v)
                    .map(Truthy)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(TruthyVisitor)
    }
}
