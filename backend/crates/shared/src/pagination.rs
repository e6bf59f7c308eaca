//! Paginated listing primitives
//!
//! `page` is 1-based; `offset = (page - 1) * limit`. The page envelope
//! always reports the full match count for the filter set, independent of
//! the requested window.

use serde::{Deserialize, Serialize};

use crate::validation::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const VALUES: &'static [&'static str] = &["asc", "desc"];

    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Per-resource fallbacks for omitted query members.
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub limit: u32,
    pub sort_field: &'static str,
    pub sort_order: SortOrder,
}

/// Resolved listing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub sort_field: String,
    pub sort_order: SortOrder,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32, sort_field: impl Into<String>, sort_order: SortOrder) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            sort_field: sort_field.into(),
            sort_order,
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }
}

/// Raw paging members of a listing query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "sortField")]
    pub sort_field: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<SortOrder>,
}

impl PageQuery {
    pub fn resolve(self, defaults: PageDefaults) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(defaults.limit),
            self.sort_field
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| defaults.sort_field.to_string()),
            self.sort_order.unwrap_or(defaults.sort_order),
        )
    }

    /// Schema members shared by every listing query.
    pub fn fields() -> [Field; 4] {
        [
            Field::integer("page").min(1, "page debe ser mayor o igual a 1"),
            Field::integer("limit").min(1, "limit debe ser mayor o igual a 1"),
            Field::string("sortField"),
            Field::string("sortOrder").one_of(SortOrder::VALUES, "sortOrder debe ser asc o desc"),
        ]
    }
}

/// Page envelope: `{ data, total, page, limit }`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            data,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    pub fn total_pages(&self) -> u64 {
        let total = u64::try_from(self.total).unwrap_or(0);
        total.div_ceil(u64::from(self.limit.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: PageDefaults = PageDefaults {
        limit: 10,
        sort_field: "created_at",
        sort_order: SortOrder::Desc,
    };

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10, "orden", SortOrder::Asc).offset(), 0);
        assert_eq!(PageRequest::new(3, 20, "orden", SortOrder::Asc).offset(), 40);
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let req = PageQuery::default().resolve(DEFAULTS);
        assert_eq!(req, PageRequest::new(1, 10, "created_at", SortOrder::Desc));

        let req = PageQuery {
            page: Some(2),
            limit: Some(5),
            sort_field: Some("nombre".into()),
            sort_order: Some(SortOrder::Asc),
        }
        .resolve(DEFAULTS);
        assert_eq!(req.offset(), 5);
        assert_eq!(req.sort_field, "nombre");
        assert_eq!(req.sort_order.as_sql(), "ASC");
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest::new(1, 10, "fecha", SortOrder::Desc);
        assert_eq!(Page::<()>::new(vec![], 0, &req).total_pages(), 0);
        assert_eq!(Page::<()>::new(vec![], 10, &req).total_pages(), 1);
        assert_eq!(Page::<()>::new(vec![], 11, &req).total_pages(), 2);
    }

    #[test]
    fn test_envelope_shape() {
        let req = PageRequest::new(2, 1, "orden", SortOrder::Asc);
        let json = serde_json::to_value(Page::new(vec!["b"], 3, &req)).unwrap();
        assert_eq!(json, serde_json::json!({ "data": ["b"], "total": 3, "page": 2, "limit": 1 }));
    }
}
