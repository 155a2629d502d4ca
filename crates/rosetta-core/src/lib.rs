//! Typed client for the UC Davis IAM Rosetta API.
//!
//! ```no_run
//! use rosetta_core::{PeopleQuery, RosettaClient, RosettaClientOptions};
//!
//! # async fn example() -> rosetta_core::Result<()> {
//! let options = RosettaClientOptions::new(
//!     "https://iam.example.edu/api/{version}",
//!     "https://auth.example.edu/oauth/token",
//!     "my-client-id",
//!     "my-client-secret",
//! );
//! let client = RosettaClient::new(options)?;
//! let people = client.fetch_people(&PeopleQuery::by_email("aggie@ucdavis.edu")).await?;
//! println!("found {} people", people.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{
    AccountQuery, CampaignContactsQuery, FileResponse, IdentityQuery, PeopleQuery, ResponseSnapshot,
    Result, RosettaClient, RosettaError,
};
pub use auth::{Authenticator, CachedToken, Clock, CredentialStore, SystemClock};
pub use config::{DebugLimit, RosettaClientOptions};
pub use tokio_util::sync::CancellationToken;
