//! Turns the optional list parameters of `GET /api/consoles` into a checked
//! [`ConsoleQuery`]: active-state filter, search, sort and page window.
//!
//! Only allow-listed column names ever reach the SQL text; user input is
//! always bound as a parameter.

use serde::Deserialize;

use crate::error::AppError;
use crate::models::console::parse_flag;

/// Raw query string of the list endpoint. Wire names are the ones the
/// dashboard sends; snake_case and camelCase spellings are both accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy", alias = "sort_by")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder", alias = "sort_order")]
    pub sort_order: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "is_active", alias = "isActive")]
    pub is_active: Option<String>,
    #[serde(rename = "includeInactive", alias = "include_inactive")]
    pub include_inactive: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    Id,
    Name,
    Manufacturer,
    SerialNumber,
    IsActive,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "id" => Some(SortColumn::Id),
            "name" => Some(SortColumn::Name),
            "manufacturer" => Some(SortColumn::Manufacturer),
            "serialNumber" | "serial_number" => Some(SortColumn::SerialNumber),
            "isActive" | "is_active" => Some(SortColumn::IsActive),
            "createdAt" | "created_at" => Some(SortColumn::CreatedAt),
            "updatedAt" | "updated_at" => Some(SortColumn::UpdatedAt),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::Manufacturer => "manufacturer",
            SortColumn::SerialNumber => "serial_number",
            SortColumn::IsActive => "is_active",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Row filter shared by the page query and the count query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleFilter {
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

impl ConsoleFilter {
    /// `WHERE` clause (with leading space) and the number of placeholders it
    /// uses. Bind order: `is_active`, then the search pattern.
    pub fn where_clause(&self) -> (String, usize) {
        let mut conditions = Vec::new();
        let mut param_count = 0;

        if self.is_active.is_some() {
            param_count += 1;
            conditions.push(format!("is_active = ${param_count}"));
        }

        if self.search.is_some() {
            param_count += 1;
            conditions.push(format!(
                "(name ILIKE ${p} OR manufacturer ILIKE ${p} OR serial_number ILIKE ${p})",
                p = param_count
            ));
        }

        if conditions.is_empty() {
            (String::new(), 0)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), param_count)
        }
    }

    /// `ILIKE` pattern matching the search text as a literal substring.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|s| format!("%{}%", escape_like(s)))
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleQuery {
    pub filter: ConsoleFilter,
    pub sort: SortColumn,
    pub order: SortOrder,
    pub page: i64,
    pub per_page: i64,
}

impl ConsoleQuery {
    /// Resolves defaults and bounds. Unknown sort columns and directions fall
    /// back to `createdAt DESC`; malformed numbers and active-state flags are
    /// rejected. Empty values count as absent.
    pub fn resolve(
        params: &ListParams,
        default_limit: i64,
        max_limit: i64,
    ) -> Result<Self, AppError> {
        let page = parse_optional_number("page", params.page.as_deref())?
            .unwrap_or(1)
            .max(1);
        let per_page = parse_optional_number("limit", params.limit.as_deref())?
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1));

        let sort = match params.sort_by.as_deref() {
            Some(raw) => SortColumn::parse(raw).unwrap_or_else(|| {
                tracing::debug!(sort_by = raw, "unknown sort column, using createdAt");
                SortColumn::default()
            }),
            None => SortColumn::default(),
        };
        let order = params
            .sort_order
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or_default();

        let is_active = resolve_active_filter(
            params.is_active.as_deref(),
            params.include_inactive.as_deref(),
        )?;

        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(ConsoleQuery {
            filter: ConsoleFilter { is_active, search },
            sort,
            order,
            page,
            per_page,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Page query. `LIMIT` and `OFFSET` are bound after the filter params.
    pub fn select_sql(&self) -> String {
        let (where_clause, n) = self.filter.where_clause();
        let tie_break = if self.sort == SortColumn::Id { "" } else { ", id ASC" };
        format!(
            "SELECT * FROM consoles{where_clause} ORDER BY {} {}{tie_break} LIMIT ${} OFFSET ${}",
            self.sort.column(),
            self.order.as_sql(),
            n + 1,
            n + 2,
        )
    }

    pub fn count_sql(&self) -> String {
        let (where_clause, _) = self.filter.where_clause();
        format!("SELECT COUNT(*) FROM consoles{where_clause}")
    }
}

/// An explicit `is_active` wins; otherwise `includeInactive=false` narrows to
/// active consoles; otherwise both states are listed.
pub fn resolve_active_filter(
    is_active: Option<&str>,
    include_inactive: Option<&str>,
) -> Result<Option<bool>, AppError> {
    if let Some(flag) = parse_optional_flag("is_active", is_active)? {
        return Ok(Some(flag));
    }
    match parse_optional_flag("includeInactive", include_inactive)? {
        Some(false) => Ok(Some(true)),
        _ => Ok(None),
    }
}

fn parse_optional_flag(name: &str, raw: Option<&str>) -> Result<Option<bool>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_flag(value).map(Some).ok_or_else(|| {
            AppError::Validation(format!("{name} must be a boolean (1/0 or true/false)"))
        }),
    }
}

fn parse_optional_number(name: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{name} must be an integer"))),
    }
}
