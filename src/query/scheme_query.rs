use serde::Deserialize;

use crate::config::PaginationConfig;

use super::pagination::Page;

/// Expression index target backing the ranked public search. Must stay in
/// sync with the GIN index created in `database::schema`.
const SEARCH_VECTOR: &str =
    "to_tsvector('english', name || ' ' || description || ' ' || category || ' ' || ministry)";

/// Raw query-string parameters accepted by the scheme listings.
///
/// Numeric fields arrive as strings on purpose: a malformed `page` or
/// `limit` falls back to its default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub state: Option<String>,
    pub ministry: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// A fully assembled listing query: WHERE conditions with positional binds,
/// an ORDER BY clause, and the resolved page window. The count query reuses
/// the same conditions and binds so the total is always computed against
/// the identical predicate.
#[derive(Debug)]
pub struct SchemeQuery {
    conditions: Vec<String>,
    binds: Vec<String>,
    order_by: String,
    page: Page,
}

impl SchemeQuery {
    /// Public listing: pinned to active schemes, ranked full-text search,
    /// caller-selected sort.
    pub fn public(params: &ListParams, config: &PaginationConfig) -> Self {
        let mut query = Self {
            conditions: vec!["is_active = TRUE".to_string()],
            binds: vec![],
            order_by: String::new(),
            page: Page::resolve(
                params.page.as_deref(),
                params.limit.as_deref(),
                config.default_limit,
                config,
            ),
        };

        let mut search_param = None;
        if let Some(search) = trimmed(&params.search) {
            let n = query.bind(search);
            query
                .conditions
                .push(format!("{} @@ plainto_tsquery('english', ${})", SEARCH_VECTOR, n));
            search_param = Some(n);
        }

        if let Some(category) = trimmed(&params.category).filter(|c| *c != "All") {
            let n = query.bind(category);
            query.conditions.push(format!("category = ${}", n));
        }

        if let Some(state) = trimmed(&params.state).filter(|s| *s != "All") {
            let n = query.bind(state);
            query.conditions.push(format!("state = ${}", n));
        }

        if let Some(ministry) = trimmed(&params.ministry) {
            let n = query.bind(ministry);
            query
                .conditions
                .push(format!("ministry ILIKE '%' || ${} || '%'", n));
        }

        let sort = format!(
            "{} {}",
            sort_column(params.sort_by.as_deref()),
            sort_direction(params.sort_order.as_deref())
        );
        // Relevance ranks ahead of the requested sort whenever a search term
        // is present; the admin listing never ranks.
        query.order_by = match search_param {
            Some(n) => format!(
                "ts_rank({}, plainto_tsquery('english', ${})) DESC, {}",
                SEARCH_VECTOR, n, sort
            ),
            None => sort,
        };

        query
    }

    /// Admin listing: sees inactive records unless filtered, unranked
    /// substring search over name or category, fixed newest-first order.
    pub fn admin(params: &ListParams, config: &PaginationConfig) -> Self {
        let mut query = Self {
            conditions: vec![],
            binds: vec![],
            order_by: "created_at DESC".to_string(),
            page: Page::resolve(
                params.page.as_deref(),
                params.limit.as_deref(),
                config.admin_default_limit,
                config,
            ),
        };

        if let Some(search) = trimmed(&params.search) {
            let n = query.bind(search);
            query.conditions.push(format!(
                "(name ILIKE '%' || ${} || '%' OR category ILIKE '%' || ${} || '%')",
                n, n
            ));
        }

        match params.status.as_deref() {
            Some("active") => query.conditions.push("is_active = TRUE".to_string()),
            Some("inactive") => query.conditions.push("is_active = FALSE".to_string()),
            _ => {}
        }

        if let Some(category) = trimmed(&params.category).filter(|c| *c != "All") {
            let n = query.bind(category);
            query.conditions.push(format!("category = ${}", n));
        }

        query
    }

    fn bind(&mut self, value: &str) -> usize {
        self.binds.push(value.to_string());
        self.binds.len()
    }

    pub fn where_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn order_sql(&self) -> String {
        format!("ORDER BY {}", self.order_by)
    }

    pub fn limit_sql(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.page.limit, self.page.offset())
    }

    pub fn binds(&self) -> &[String] {
        &self.binds
    }

    pub fn page(&self) -> Page {
        self.page
    }
}

/// Map the wire-level camelCase sort key onto a column. Unknown keys fall
/// back to the default rather than erroring, matching the lenient numeric
/// handling above.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("name") => "name",
        Some("viewCount") => "view_count",
        Some("launchDate") => "launch_date",
        Some("updatedAt") => "updated_at",
        Some("category") => "category",
        Some("state") => "state",
        _ => "created_at",
    }
}

/// Ascending only on the literal "asc"; anything else is descending.
fn sort_direction(sort_order: Option<&str>) -> &'static str {
    match sort_order {
        Some("asc") => "ASC",
        _ => "DESC",
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig {
            default_limit: 10,
            admin_default_limit: 20,
            max_limit: 100,
        }
    }

    #[test]
    fn public_defaults() {
        let query = SchemeQuery::public(&ListParams::default(), &config());
        assert_eq!(query.where_sql(), "WHERE is_active = TRUE");
        assert_eq!(query.order_sql(), "ORDER BY created_at DESC");
        assert_eq!(query.limit_sql(), "LIMIT 10 OFFSET 0");
        assert!(query.binds().is_empty());
    }

    #[test]
    fn public_search_is_ranked_full_text() {
        let params = ListParams {
            search: Some("crop insurance".into()),
            ..Default::default()
        };
        let query = SchemeQuery::public(&params, &config());
        assert!(query.where_sql().contains("plainto_tsquery('english', $1)"));
        assert!(query.order_sql().starts_with("ORDER BY ts_rank("));
        assert_eq!(query.binds(), ["crop insurance"]);
    }

    #[test]
    fn public_filters_compose_in_order() {
        let params = ListParams {
            search: Some("seed".into()),
            category: Some("Subsidy".into()),
            state: Some("Bihar".into()),
            ministry: Some("agriculture".into()),
            ..Default::default()
        };
        let query = SchemeQuery::public(&params, &config());
        let where_sql = query.where_sql();
        assert!(where_sql.contains("category = $2"));
        assert!(where_sql.contains("state = $3"));
        assert!(where_sql.contains("ministry ILIKE '%' || $4 || '%'"));
        assert_eq!(query.binds(), ["seed", "Subsidy", "Bihar", "agriculture"]);
    }

    #[test]
    fn literal_all_skips_category_and_state() {
        let params = ListParams {
            category: Some("All".into()),
            state: Some("All".into()),
            ..Default::default()
        };
        let query = SchemeQuery::public(&params, &config());
        assert_eq!(query.where_sql(), "WHERE is_active = TRUE");
        assert!(query.binds().is_empty());
    }

    #[test]
    fn sort_whitelist_and_fallback() {
        let params = ListParams {
            sort_by: Some("viewCount".into()),
            sort_order: Some("asc".into()),
            ..Default::default()
        };
        let query = SchemeQuery::public(&params, &config());
        assert_eq!(query.order_sql(), "ORDER BY view_count ASC");

        let params = ListParams {
            sort_by: Some("password_hash".into()),
            sort_order: Some("ASC".into()),
            ..Default::default()
        };
        let query = SchemeQuery::public(&params, &config());
        // Unknown column falls back; only the lowercase literal selects ASC
        assert_eq!(query.order_sql(), "ORDER BY created_at DESC");
    }

    #[test]
    fn admin_defaults_see_everything() {
        let query = SchemeQuery::admin(&ListParams::default(), &config());
        assert_eq!(query.where_sql(), "");
        assert_eq!(query.order_sql(), "ORDER BY created_at DESC");
        assert_eq!(query.limit_sql(), "LIMIT 20 OFFSET 0");
    }

    #[test]
    fn admin_search_is_unranked_substring() {
        let params = ListParams {
            search: Some("kisan".into()),
            ..Default::default()
        };
        let query = SchemeQuery::admin(&params, &config());
        assert_eq!(
            query.where_sql(),
            "WHERE (name ILIKE '%' || $1 || '%' OR category ILIKE '%' || $1 || '%')"
        );
        assert!(!query.order_sql().contains("ts_rank"));
    }

    #[test]
    fn admin_status_filter() {
        let params = ListParams {
            status: Some("inactive".into()),
            ..Default::default()
        };
        let query = SchemeQuery::admin(&params, &config());
        assert_eq!(query.where_sql(), "WHERE is_active = FALSE");

        let params = ListParams {
            status: Some("all".into()),
            ..Default::default()
        };
        let query = SchemeQuery::admin(&params, &config());
        assert_eq!(query.where_sql(), "");
    }

    #[test]
    fn admin_pagination_uses_admin_default() {
        let params = ListParams {
            page: Some("2".into()),
            ..Default::default()
        };
        let query = SchemeQuery::admin(&params, &config());
        assert_eq!(query.limit_sql(), "LIMIT 20 OFFSET 20");
    }
}
