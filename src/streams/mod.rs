//! Stream definitions
//!
//! Each Transifex resource type is described by a [`Stream`]: endpoint,
//! primary key, schema, and the hooks the sync engine calls while walking
//! the API.
//!
//! # Hooks
//!
//! - `get_url_params` - query parameters for one request of a chain
//! - `paginator` - decides whether another page exists
//! - `generate_child_contexts` - scopes child chains to a parent record

mod context;
mod i18n_formats;
mod languages;
mod organizations;

pub use context::{OrganizationContext, StreamContext};
pub use i18n_formats::{I18nFormats, ORGANIZATION_FILTER};
pub use languages::Languages;
pub use organizations::Organizations;

use crate::auth::BearerTokenAuthenticator;
use crate::error::Result;
use crate::pagination::{HateoasPaginator, PageToken, Paginator};
use crate::schema::Schema;
use crate::tap::TapHandle;
use crate::types::{QueryParams, ReplicationMethod};
use serde_json::Value;
use std::collections::BTreeMap;

/// Path to the records inside every response body
pub const RECORDS_JSONPATH: &str = "$.data[*]";

/// Path to the next-page link inside every response body
pub const NEXT_PAGE_TOKEN_JSONPATH: &str = "$.links.next";

/// One extractable resource type
pub trait Stream: Send + Sync + std::fmt::Debug {
    /// Stream name, as it appears in the catalog
    fn name(&self) -> &'static str;

    /// Endpoint path relative to the API base URL
    fn path(&self) -> &'static str;

    /// Static record schema
    fn schema(&self) -> &'static Schema;

    /// Tap this stream is bound to
    fn tap(&self) -> &TapHandle;

    /// Fields uniquely identifying a record
    fn primary_keys(&self) -> &'static [&'static str] {
        &["id"]
    }

    /// Incremental cursor field; `None` means full-table replication
    fn replication_key(&self) -> Option<&'static str> {
        None
    }

    /// Replication method derived from the replication key
    fn replication_method(&self) -> ReplicationMethod {
        ReplicationMethod::from_replication_key(self.replication_key())
    }

    /// JSONPath selecting records in a response body
    fn records_jsonpath(&self) -> &'static str {
        RECORDS_JSONPATH
    }

    /// JSONPath of the next-page link; mirrors what the paginator reads
    fn next_page_token_jsonpath(&self) -> &'static str {
        NEXT_PAGE_TOKEN_JSONPATH
    }

    /// Paginator for this stream's chains
    fn paginator(&self) -> Box<dyn Paginator> {
        Box::new(HateoasPaginator::new())
    }

    /// API base URL
    fn url_base(&self) -> &str {
        self.tap().config().base_url()
    }

    /// Full endpoint URL
    fn url(&self) -> String {
        format!("{}{}", self.url_base().trim_end_matches('/'), self.path())
    }

    /// Bearer credential derived from the tap config
    fn authenticator(&self) -> Result<BearerTokenAuthenticator> {
        BearerTokenAuthenticator::from_config(self.tap().config())
    }

    /// Headers sent with every request
    fn http_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), self.tap().user_agent());
        headers
    }

    /// Query parameters for one request
    ///
    /// The base behaviour reuses the query string of the next-page URL.
    fn get_url_params(
        &self,
        _context: Option<&StreamContext>,
        next_page_token: Option<&PageToken>,
    ) -> QueryParams {
        base_url_params(next_page_token)
    }

    /// Name of the parent stream, for child streams
    fn parent_stream(&self) -> Option<&'static str> {
        None
    }

    /// Whether records of this stream scope child streams
    fn is_parent(&self) -> bool {
        false
    }

    /// Contexts for child chains derived from one emitted record, in order
    fn generate_child_contexts(
        &self,
        _record: &Value,
        _context: Option<&StreamContext>,
    ) -> Result<Vec<StreamContext>> {
        Ok(Vec::new())
    }

    /// Copy context fields onto a record, without overwriting payload fields
    fn annotate_record(&self, mut record: Value, context: Option<&StreamContext>) -> Value {
        if let (Some(context), Value::Object(map)) = (context, &mut record) {
            for (key, value) in context.to_map() {
                map.entry(key).or_insert(value);
            }
        }
        record
    }
}

/// Query parameters carried by a page locator
pub fn base_url_params(next_page_token: Option<&PageToken>) -> QueryParams {
    next_page_token.map(PageToken::query_pairs).unwrap_or_default()
}
