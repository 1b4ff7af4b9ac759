//! Response pages, query parameters, and the page-or-stream result type.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::PageStream;
use crate::{Error, Result};

/// One decoded response from a list or entity endpoint.
///
/// The JSON object is kept exactly as the server sent it; the accessors
/// only read from it. Field names such as `docs`, `page` and `pages` are
/// defined by the server.
///
/// # Example
///
/// ```
/// use theoneapi_rs::models::Page;
///
/// let page: Page = serde_json::from_value(serde_json::json!({
///     "docs": [{"_id": "1", "name": "The Two Towers"}],
///     "total": 8, "limit": 1, "offset": 0, "page": 1, "pages": 8
/// })).unwrap();
///
/// assert_eq!(page.page(), Some(1));
/// assert_eq!(page.pages(), Some(8));
/// assert_eq!(page.docs().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page(Map<String, Value>);

impl Page {
    /// Wrap a decoded JSON object.
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// The documents in this page, empty if the field is missing.
    pub fn docs(&self) -> &[Value] {
        self.0
            .get("docs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Decode the documents in this page into typed models.
    pub fn docs_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.docs()
            .iter()
            .map(|doc| T::deserialize(doc).map_err(Error::from))
            .collect()
    }

    /// Current page number as reported by the server.
    pub fn page(&self) -> Option<i64> {
        self.number("page")
    }

    /// Total number of pages as reported by the server.
    pub fn pages(&self) -> Option<i64> {
        self.number("pages")
    }

    /// Total number of documents across all pages.
    pub fn total(&self) -> Option<i64> {
        self.number("total")
    }

    /// Page size.
    pub fn limit(&self) -> Option<i64> {
        self.number("limit")
    }

    /// Offset of the first document in this page.
    pub fn offset(&self) -> Option<i64> {
        self.number("offset")
    }

    /// Look up an arbitrary top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn number(&self, key: &str) -> Option<i64> {
        let value = self.0.get(key)?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }
}

impl From<Map<String, Value>> for Page {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Page {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Query parameters for a request.
///
/// Keys are passed to the server untouched, so comparison filters can be
/// written directly as the key (e.g. `budgetInMillions>2900`). Insertion
/// order is preserved on the wire.
///
/// # Example
///
/// ```
/// use theoneapi_rs::QueryParams;
///
/// let params = QueryParams::new()
///     .page(2)
///     .limit(10)
///     .sort("name:desc")
///     .filter("budgetInMillions>2900", "");
///
/// assert_eq!(params.get("limit"), Some("10"));
/// assert_eq!(params.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Any `Display` value is accepted; numbers render
    /// in their usual decimal form.
    pub fn insert(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Starting page.
    pub fn page(self, page: u32) -> Self {
        self.insert("page", page)
    }

    /// Page size.
    pub fn limit(self, limit: u32) -> Self {
        self.insert("limit", limit)
    }

    /// Offset into the result set.
    pub fn offset(self, offset: u32) -> Self {
        self.insert("offset", offset)
    }

    /// Sort expression such as `name:asc`.
    pub fn sort(self, sort: impl fmt::Display) -> Self {
        self.insert("sort", sort)
    }

    /// Filter parameter. The key may carry the comparison operator, as in
    /// `runtimeInMinutes<200`, with an empty value.
    pub fn filter(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value)
    }

    /// Value of the first parameter with this key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |params, (k, v)| params.insert(k, v))
    }
}

/// Result of a resource accessor: a single page, or a lazy stream of pages.
///
/// Which variant comes back is decided by the `paginated` flag passed to
/// the accessor.
pub enum Fetched {
    /// A single decoded response.
    Page(Page),
    /// A lazy stream yielding every page in turn.
    Pages(PageStream),
}

impl Fetched {
    /// Returns `true` if this is a stream of pages.
    pub fn is_paginated(&self) -> bool {
        matches!(self, Fetched::Pages(_))
    }

    /// Unwrap the single page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if this is a stream.
    pub fn into_page(self) -> Result<Page> {
        match self {
            Fetched::Page(page) => Ok(page),
            Fetched::Pages(_) => Err(Error::InvalidInput(
                "expected a single page, got a paginated stream".to_string(),
            )),
        }
    }

    /// Unwrap the page stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if this is a single page.
    pub fn into_stream(self) -> Result<PageStream> {
        match self {
            Fetched::Pages(stream) => Ok(stream),
            Fetched::Page(_) => Err(Error::InvalidInput(
                "expected a paginated stream, got a single page".to_string(),
            )),
        }
    }
}

impl fmt::Debug for Fetched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fetched::Page(page) => f.debug_tuple("Page").field(page).finish(),
            Fetched::Pages(_) => f.debug_tuple("Pages").field(&"..").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_accessors() {
        let page = Page::try_from(json!({
            "docs": [{"_id": "a"}, {"_id": "b"}],
            "total": 2, "limit": 1000, "offset": 0, "page": 1, "pages": 1
        }))
        .unwrap();

        assert_eq!(page.docs().len(), 2);
        assert_eq!(page.total(), Some(2));
        assert_eq!(page.limit(), Some(1000));
        assert_eq!(page.offset(), Some(0));
        assert_eq!(page.page(), Some(1));
        assert_eq!(page.pages(), Some(1));
    }

    #[test]
    fn test_page_missing_fields() {
        let page = Page::try_from(json!({"message": "hello"})).unwrap();
        assert!(page.docs().is_empty());
        assert_eq!(page.page(), None);
        assert_eq!(page.get("message"), Some(&json!("hello")));
    }

    #[test]
    fn test_page_float_counters() {
        let page = Page::try_from(json!({"page": 2.0, "pages": 3.0})).unwrap();
        assert_eq!(page.page(), Some(2));
        assert_eq!(page.pages(), Some(3));
    }

    #[test]
    fn test_page_fractional_counters_are_missing() {
        let page = Page::try_from(json!({"page": 2.5, "pages": "3"})).unwrap();
        assert_eq!(page.page(), None);
        assert_eq!(page.pages(), None);
    }

    #[test]
    fn test_page_rejects_non_object() {
        let err = Page::try_from(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn test_page_serializes_unchanged() {
        let body = json!({"docs": [], "page": 1, "pages": 1, "extra": {"a": true}});
        let page = Page::try_from(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&page).unwrap(), body);
    }

    #[test]
    fn test_query_params_order_and_rendering() {
        let params = QueryParams::new()
            .limit(10)
            .page(2)
            .insert("academyAwardWins>", 0)
            .filter("name", "/towers/i");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("limit", "10"),
                ("page", "2"),
                ("academyAwardWins>", "0"),
                ("name", "/towers/i"),
            ]
        );
    }

    #[test]
    fn test_query_params_from_iter() {
        let params: QueryParams = [("page", 2), ("limit", 10)].into_iter().collect();
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("missing"), None);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_fetched_unwrap() {
        let fetched = Fetched::Page(Page::default());
        assert!(!fetched.is_paginated());
        assert!(fetched.into_page().is_ok());

        let fetched = Fetched::Page(Page::default());
        assert!(matches!(fetched.into_stream(), Err(Error::InvalidInput(_))));
    }
}
