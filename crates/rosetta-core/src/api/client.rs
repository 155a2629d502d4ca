//! API client for the UC Davis IAM Rosetta REST API.
//!
//! `RosettaClient` exposes one typed method per endpoint. Every request goes
//! through the shared `Authenticator`, which attaches a cached bearer token.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::debug::ResponseSnapshot;
use super::file::FileResponse;
use super::params::{
    AccountQuery, CampaignContactsQuery, IdentityQuery, NoQuery, PeopleQuery,
};
use super::{Result, RosettaError};
use crate::auth::Authenticator;
use crate::config::{DebugLimit, ResponseInspector, RosettaClientOptions};
use crate::models::{
    collect_records, Account, BaseProfile, College, Employee, EmploymentStatus, Entitlement, Group,
    Identity, Major, Me, Organization, Person, Role, Student, StudentAssociation,
};

/// API client for Rosetta.
/// Clone is cheap - the connection pool and token cache are shared.
#[derive(Clone)]
pub struct RosettaClient {
    http: Client,
    auth: Arc<Authenticator>,
    base_url: Url,
    debug_limit: DebugLimit,
    inspector: Option<ResponseInspector>,
}

impl std::fmt::Debug for RosettaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosettaClient")
            .field("base_url", &self.base_url.as_str())
            .field("debug_limit", &self.debug_limit)
            .finish_non_exhaustive()
    }
}

impl RosettaClient {
    /// Create a client with its own connection pool and token cache.
    pub fn new(options: RosettaClientOptions) -> Result<Self> {
        options.validate()?;
        let http = Client::builder().timeout(options.timeout()).build()?;
        Self::with_http_client(http, options)
    }

    /// Create a client on a caller-supplied `reqwest::Client`; the caller owns
    /// its pool and timeout settings.
    pub fn with_http_client(http: Client, options: RosettaClientOptions) -> Result<Self> {
        let auth = Arc::new(Authenticator::new(&options)?);
        Self::build(http, options, auth)
    }

    /// Create a client that shares an existing token cache.
    pub fn with_authenticator(
        options: RosettaClientOptions,
        auth: Arc<Authenticator>,
    ) -> Result<Self> {
        options.validate()?;
        let http = Client::builder().timeout(options.timeout()).build()?;
        Self::build(http, options, auth)
    }

    fn build(
        http: Client,
        options: RosettaClientOptions,
        auth: Arc<Authenticator>,
    ) -> Result<Self> {
        let resolved = options.resolved_base_url();
        let base_url = Url::parse(&resolved).map_err(|e| {
            RosettaError::InvalidConfiguration(format!(
                "BaseUrl '{}' is not a valid URL: {}",
                resolved, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RosettaError::InvalidConfiguration(format!(
                "BaseUrl '{}' cannot be used as a base URL",
                resolved
            )));
        }

        Ok(Self {
            http,
            auth,
            base_url,
            debug_limit: options.debug_limit(),
            inspector: options.response_inspector,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn authenticator(&self) -> &Arc<Authenticator> {
        &self.auth
    }

    /// 0 disables debug output, -1 prints full bodies, a positive value truncates.
    pub fn set_debug_response_max_length(&mut self, max_length: i64) {
        self.debug_limit = DebugLimit::from_max_length(max_length);
    }

    /// Run an operation until it completes or `cancel` fires, whichever is first.
    /// A cancelled operation drops its in-flight request.
    pub async fn cancellable<T, F>(cancel: &CancellationToken, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RosettaError::Cancelled),
            result = operation => result,
        }
    }

    // ===== Request plumbing =====

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RosettaError::InvalidConfiguration("BaseUrl cannot be a base".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<Q: Serialize + ?Sized>(&self, segments: &[&str], query: &Q) -> Result<Response> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "GET");

        let request = self.auth.authorize(self.http.get(url).query(query)).await?;
        Ok(request.send().await?)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(RosettaError::from_status(status, body))
        }
    }

    /// Buffer a successful JSON response, showing it first when debug output is on.
    async fn fetch_body<Q: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> Result<Vec<u8>> {
        let response = Self::check_response(self.send(segments, query).await?).await?;

        let snapshot_head = (self.debug_limit != DebugLimit::Disabled || self.inspector.is_some())
            .then(|| {
                let url = response.url();
                let path_and_query = match url.query() {
                    Some(q) => format!("{}?{}", url.path(), q),
                    None => url.path().to_string(),
                };
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                (path_and_query, response.status().as_u16(), content_type)
            });

        let body = response.bytes().await?.to_vec();

        if let Some((path_and_query, status, content_type)) = snapshot_head {
            self.inspect(ResponseSnapshot {
                method: "GET".to_string(),
                path_and_query,
                status,
                content_type,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    fn inspect(&self, snapshot: ResponseSnapshot) {
        if let Some(ref inspector) = self.inspector {
            inspector(&snapshot);
        } else if let Some(rendered) = snapshot.render(self.debug_limit) {
            eprintln!("{}", rendered);
        }
    }

    async fn get<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let body = self.fetch_body(segments, query).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Collection endpoints tolerate a single object in place of an array.
    async fn get_list<T, Q>(&self, segments: &[&str], query: &Q) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let body = self.fetch_body(segments, query).await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        collect_records(value)
    }

    async fn get_file<Q: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> Result<FileResponse> {
        let response = self.send(segments, query).await?;
        match response.status() {
            StatusCode::OK | StatusCode::PARTIAL_CONTENT => {
                Ok(FileResponse::from_response(response))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(RosettaError::from_status(status, body))
            }
        }
    }

    // ===== People =====

    /// Information about the client the token was issued to
    pub async fn fetch_me(&self) -> Result<Me> {
        self.get(&["me"], &NoQuery::default()).await
    }

    /// Fetch identities (most recently modified first, as returned by the API)
    pub async fn fetch_identities(&self, query: &IdentityQuery) -> Result<Vec<Identity>> {
        self.get_list(&["identities"], query).await
    }

    /// Search people by IAM ID and/or email
    pub async fn fetch_people(&self, query: &PeopleQuery) -> Result<Vec<Person>> {
        self.get_list(&["people"], query).await
    }

    pub async fn fetch_person(&self, id: &str) -> Result<Person> {
        self.get(&["people", id], &NoQuery::default()).await
    }

    pub async fn fetch_accounts(&self, query: &AccountQuery) -> Result<Vec<Account>> {
        self.get_list(&["accounts"], query).await
    }

    pub async fn fetch_account(&self, id: &str) -> Result<Account> {
        self.get(&["accounts", id], &NoQuery::default()).await
    }

    pub async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        self.get_list(&["employees"], &NoQuery::default()).await
    }

    pub async fn fetch_employee(&self, id: &str) -> Result<Employee> {
        self.get(&["employees", id], &NoQuery::default()).await
    }

    pub async fn fetch_students(&self) -> Result<Vec<Student>> {
        self.get_list(&["students"], &NoQuery::default()).await
    }

    pub async fn fetch_student(&self, id: &str) -> Result<Student> {
        self.get(&["students", id], &NoQuery::default()).await
    }

    // ===== Reference data =====

    pub async fn fetch_groups(&self) -> Result<Vec<Group>> {
        self.get_list(&["groups"], &NoQuery::default()).await
    }

    pub async fn fetch_organizations(&self) -> Result<Vec<Organization>> {
        self.get_list(&["organizations"], &NoQuery::default()).await
    }

    pub async fn fetch_roles(&self) -> Result<Vec<Role>> {
        self.get_list(&["roles"], &NoQuery::default()).await
    }

    pub async fn fetch_colleges(&self) -> Result<Vec<College>> {
        self.get_list(&["colleges"], &NoQuery::default()).await
    }

    pub async fn fetch_majors(&self) -> Result<Vec<Major>> {
        self.get_list(&["majors"], &NoQuery::default()).await
    }

    pub async fn fetch_base_profiles(&self) -> Result<Vec<BaseProfile>> {
        self.get_list(&["baseprofiles"], &NoQuery::default()).await
    }

    pub async fn fetch_employment_statuses(&self) -> Result<Vec<EmploymentStatus>> {
        self.get_list(&["employmentstatus"], &NoQuery::default()).await
    }

    /// UCPath entitlements
    pub async fn fetch_entitlements(&self) -> Result<Vec<Entitlement>> {
        self.get_list(&["ucpathentitlements"], &NoQuery::default()).await
    }

    pub async fn fetch_student_associations(&self) -> Result<Vec<StudentAssociation>> {
        self.get_list(&["studentassociations"], &NoQuery::default()).await
    }

    // ===== Campaign contact exports (CSV) =====

    /// Download the campaign contacts export. The server may answer 206 with a partial file.
    pub async fn download_campaign_contacts(
        &self,
        query: &CampaignContactsQuery,
    ) -> Result<FileResponse> {
        self.get_file(&["campaign", "contacts"], query).await
    }

    /// Download contacts modified since the last export.
    pub async fn download_campaign_contacts_modified(&self) -> Result<FileResponse> {
        self.get_file(&["campaign", "contacts", "modified"], &NoQuery::default())
            .await
    }
}
