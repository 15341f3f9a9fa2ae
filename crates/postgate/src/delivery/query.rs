//! Typed entry queries and their wire parameters.

use url::Url;

/// Content type discriminator for blog posts.
pub const POST_CONTENT_TYPE: &str = "blogPost";
/// Order key: newest publish date first.
pub const ORDER_NEWEST_FIRST: &str = "-fields.date";
/// Largest page the backend will return.
pub const MAX_LIMIT: u32 = 1000;

/// A query against the entries collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub content_type: String,
    pub order: Option<String>,
    pub limit: u32,
    /// Offset; only sent when set, so lookups carry no `skip` parameter.
    pub skip: Option<u64>,
    /// Equality filters as `(field, value)`, sent as `fields.<field>=<value>`.
    pub field_equals: Vec<(String, String)>,
}

impl EntryQuery {
    /// A query over posts with no ordering, window, or filter set.
    pub fn posts() -> Self {
        Self {
            content_type: POST_CONTENT_TYPE.to_string(),
            order: None,
            limit: 100,
            skip: None,
            field_equals: Vec::new(),
        }
    }

    /// Order by descending publish date.
    pub fn newest_first(mut self) -> Self {
        self.order = Some(ORDER_NEWEST_FIRST.to_string());
        self
    }

    /// Set the window size, capped at [`MAX_LIMIT`].
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Add an exact-match filter on a field.
    pub fn field_eq(mut self, field: &str, value: &str) -> Self {
        self.field_equals.push((field.to_string(), value.to_string()));
        self
    }

    /// Query parameters in the order they are sent.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("content_type".to_string(), self.content_type.clone())];
        if let Some(ref order) = self.order {
            params.push(("order".to_string(), order.clone()));
        }
        for (field, value) in &self.field_equals {
            params.push((format!("fields.{field}"), value.clone()));
        }
        params.push(("limit".to_string(), self.limit.to_string()));
        if let Some(skip) = self.skip {
            params.push(("skip".to_string(), skip.to_string()));
        }
        params
    }

    /// Append this query's parameters to an endpoint URL.
    pub fn apply_to(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(self.params());
        url
    }
}
