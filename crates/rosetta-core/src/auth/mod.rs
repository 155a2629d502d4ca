//! Authentication for the Rosetta API.
//!
//! This module provides:
//! - `Authenticator`: OAuth 2.0 client-credentials token cache that injects
//!   bearer tokens into outgoing requests
//! - `CachedToken`: a token with its (margin-adjusted) expiry
//! - `CredentialStore`: OS keychain storage for client secrets
//!
//! Tokens are refreshed 5 minutes before the provider says they expire.

pub mod authenticator;
pub mod credentials;
pub mod token;

pub use authenticator::Authenticator;
pub use credentials::CredentialStore;
pub use token::{CachedToken, Clock, SystemClock, DEFAULT_EXPIRES_IN_SECS, TOKEN_EXPIRY_MARGIN_SECS};
