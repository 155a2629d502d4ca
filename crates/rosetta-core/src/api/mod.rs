//! REST API client module for the UC Davis IAM Rosetta API.
//!
//! This module provides the `RosettaClient` for fetching identities, people,
//! accounts, employees, students, reference data, and campaign contact exports.
//!
//! The API uses OAuth 2.0 client-credentials bearer tokens obtained through
//! the configured token endpoint (see `crate::auth`).

pub mod client;
pub mod debug;
pub mod error;
pub mod file;
pub mod params;

pub use client::RosettaClient;
pub use debug::ResponseSnapshot;
pub use error::{Result, RosettaError};
pub use file::{BodyStream, FileResponse};
pub use params::{AccountQuery, CampaignContactsQuery, IdentityQuery, PeopleQuery};
