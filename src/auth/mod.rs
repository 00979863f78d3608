//! Authentication module
//!
//! Transifex uses a static API token sent as a bearer credential.

mod authenticator;

pub use authenticator::BearerTokenAuthenticator;
