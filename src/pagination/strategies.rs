//! Pagination strategy implementations

use super::types::Paginator;
use serde_json::Value;

/// Hypermedia (HATEOAS) paginator
///
/// Follows `{"links": {"next": "<url>"}}`. See
/// <https://developers.transifex.com/reference/api-pagination>.
#[derive(Debug, Clone, Copy, Default)]
pub struct HateoasPaginator;

impl HateoasPaginator {
    /// Create a new paginator
    pub fn new() -> Self {
        Self
    }
}

impl Paginator for HateoasPaginator {
    fn get_next_url(&self, response: &Value) -> Option<String> {
        response
            .get("links")
            .and_then(|links| links.get("next"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}
