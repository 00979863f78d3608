// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # tap-transifex
//!
//! A Singer tap extracting data from the Transifex REST API.
//!
//! ## Streams
//!
//! - `languages` - every language known to Transifex
//! - `organizations` - organizations visible to the API token
//! - `i18n_formats` - file formats per organization (child of `organizations`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_transifex::{HttpClient, MessageWriter, SyncEngine, Tap, TapConfig};
//!
//! #[tokio::main]
//! async fn main() -> tap_transifex::Result<()> {
//!     let tap = Tap::new(TapConfig::with_token("1/abc..."))?;
//!     let client = HttpClient::new()?
//!         .with_authenticator(tap_transifex::auth::BearerTokenAuthenticator::from_config(tap.config())?);
//!
//!     let mut out = MessageWriter::stdout();
//!     SyncEngine::new(client).sync(&tap, None, &mut out).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Tap                                  │
//! │  discover_streams() → [languages, organizations, i18n_formats]  │
//! │  catalog() → Catalog              about() → settings            │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Engine   │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Bearer   │ GET       │ links.next    │ Parent →  │ SCHEMA      │
//! │          │ Retry     │ (HATEOAS)     │  child    │ RECORD      │
//! │          │ Rate Limit│               │ Validate  │ STATE       │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap settings
pub mod config;

/// Bearer token authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Static record schemas and validation
pub mod schema;

/// Stream definitions
pub mod streams;

/// Tap root
pub mod tap;

/// Singer catalog
pub mod catalog;

/// Sync bookmarks
pub mod state;

/// Singer message output
pub mod output;

/// Main execution engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::TapConfig;
pub use engine::{SyncConfig, SyncEngine, SyncStats};
pub use http::{HttpClient, RequestExecutor};
pub use output::{Message, MessageWriter};
pub use state::State;
pub use streams::{Stream, StreamContext};
pub use tap::Tap;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
