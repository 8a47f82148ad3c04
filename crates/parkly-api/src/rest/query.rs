// Row filter builder for PostgREST-style query strings.
//
// Filters are encoded as `column=op.value` pairs; ordering and limits use
// the reserved `order` and `limit` keys. Every read selects all columns.

use std::fmt::Display;

/// A typed set of query-string parameters for a table request.
///
/// Built fluently and consumed by the [`RestClient`](super::client::RestClient)
/// verbs. The final parameter list is stable (insertion order) so it can be
/// asserted on in tests and logged verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column=eq.value`
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "eq", value)
    }

    /// `column=gte.value`
    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "gte", value)
    }

    /// `column=is.null`
    pub fn is_null(mut self, column: &str) -> Self {
        self.filters.push((column.to_owned(), "is.null".to_owned()));
        self
    }

    /// `column=in.(a,b,c)`
    pub fn in_list<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.filters.push((column.to_owned(), format!("in.({joined})")));
        self
    }

    /// Append `column.asc` to the ordering.
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push(format!("{column}.asc"));
        self
    }

    /// Append `column.desc` to the ordering.
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push(format!("{column}.desc"));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn filter(mut self, column: &str, op: &str, value: impl Display) -> Self {
        self.filters.push((column.to_owned(), format!("{op}.{value}")));
        self
    }

    /// Render into `(key, value)` pairs for `reqwest::RequestBuilder::query`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        params.push(("select".to_owned(), "*".to_owned()));
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            params.push(("order".to_owned(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_owned(), limit.to_string()));
        }
        params
    }

    /// The filter pairs only, for verbs that take no `select`/`order` (PATCH, DELETE).
    pub(crate) fn filter_params(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }
}
