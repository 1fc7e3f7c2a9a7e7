use serde::Serialize;

/// Pagination block returned next to a page of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
    pub first_page: i64,
    pub first_page_url: String,
    pub last_page_url: String,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
    pub path: String,
}

impl PageMeta {
    /// `path` is the request path without query; `raw_query` is the incoming
    /// query string, whose other parameters are carried into every link.
    pub fn new(total: i64, current_page: i64, per_page: i64, path: &str, raw_query: Option<&str>) -> Self {
        let last_page = last_page(total, per_page);
        let link = |page: i64| page_url(path, raw_query, page, per_page);

        PageMeta {
            total,
            per_page,
            current_page,
            last_page,
            first_page: 1,
            first_page_url: link(1),
            last_page_url: link(last_page),
            next_page_url: (current_page < last_page).then(|| link(current_page + 1)),
            prev_page_url: (current_page > 1).then(|| link((current_page - 1).min(last_page))),
            path: path.to_string(),
        }
    }
}

/// `ceil(total / per_page)`, never less than 1.
pub fn last_page(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 || total <= 0 {
        return 1;
    }
    ((total + per_page - 1) / per_page).max(1)
}

/// Rebuilds the query string with `page` and `limit` replaced.
pub fn page_url(path: &str, raw_query: Option<&str>, page: i64, per_page: i64) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &page.to_string());
    query.append_pair("limit", &per_page.to_string());

    if let Some(raw) = raw_query {
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if key != "page" && key != "limit" {
                query.append_pair(&key, &value);
            }
        }
    }

    format!("{path}?{}", query.finish())
}
