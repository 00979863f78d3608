//! Pagination types and traits

use crate::error::Result;
use crate::types::QueryParams;
use serde_json::Value;
use url::Url;

/// Locator for the next page of a pagination chain
///
/// Wraps the parsed `next` URL. Only its query string is reused: the request
/// path always comes from the stream definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken {
    url: Url,
}

impl PageToken {
    /// Parse a next-page URL
    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
        })
    }

    /// The full next-page URL
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Decoded query parameters, in URL order
    ///
    /// Parameters with an empty value (`cursor=`) are dropped.
    pub fn query_pairs(&self) -> QueryParams {
        self.url
            .query_pairs()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Decides, from one response body, whether another page exists
pub trait Paginator: Send + Sync {
    /// Next-page URL, or `None` when the chain is complete
    ///
    /// Must not fail on missing keys: an absent link means "no next page".
    fn get_next_url(&self, response: &Value) -> Option<String>;

    /// Parse the next-page URL into a [`PageToken`]
    fn next_page_token(&self, response: &Value) -> Result<Option<PageToken>> {
        self.get_next_url(response)
            .map(|url| PageToken::parse(&url))
            .transpose()
    }
}
