//! Client configuration management.
//!
//! `RosettaClientOptions` is built once (from a JSON settings file, `ROSETTA_*`
//! environment variables, and optionally the OS keychain for the secret) and
//! is immutable once handed to a client.
//!
//! The default settings file lives at `~/.config/rosetta-client/config.json`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::api::debug::ResponseSnapshot;
use crate::api::{Result, RosettaError};
use crate::auth::CredentialStore;

/// Application name used for the config directory path
const APP_NAME: &str = "rosetta-client";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Settings files may nest the options under this section name.
const CONFIG_SECTION: &str = "RosettaClient";

/// Placeholder in `BaseUrl` replaced by `ApiVersion`.
const VERSION_PLACEHOLDER: &str = "{version}";

const ENV_PREFIX: &str = "ROSETTA_";

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Callback invoked with every buffered JSON response when debug output is on.
pub type ResponseInspector = Arc<dyn Fn(&ResponseSnapshot) + Send + Sync>;

/// How much of each response body the debug output shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLimit {
    Disabled,
    Unlimited,
    Chars(usize),
}

impl DebugLimit {
    /// 0 disables, any negative value is unlimited, a positive value truncates.
    pub fn from_max_length(max_length: i64) -> Self {
        match max_length {
            0 => DebugLimit::Disabled,
            n if n < 0 => DebugLimit::Unlimited,
            n => DebugLimit::Chars(n as usize),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RosettaClientOptions {
    /// Base URL of the API, may contain a `{version}` placeholder.
    pub base_url: String,
    /// OAuth 2.0 token endpoint.
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_version: String,
    pub timeout_seconds: u64,
    /// 0 disables debug output, -1 prints full bodies, a positive value truncates.
    pub debug_response_max_length: i64,
    #[serde(skip)]
    pub response_inspector: Option<ResponseInspector>,
}

impl Default for RosettaClientOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            debug_response_max_length: 0,
            response_inspector: None,
        }
    }
}

impl fmt::Debug for RosettaClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosettaClientOptions")
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("debug_response_max_length", &self.debug_response_max_length)
            .field("response_inspector", &self.response_inspector.is_some())
            .finish()
    }
}

impl RosettaClientOptions {
    pub fn new(
        base_url: impl Into<String>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_debug_response_max_length(mut self, max_length: i64) -> Self {
        self.debug_response_max_length = max_length;
        self
    }

    pub fn with_response_inspector<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&ResponseSnapshot) + Send + Sync + 'static,
    {
        self.response_inspector = Some(Arc::new(inspector));
        self
    }

    /// Load options the way the console example does: settings file at the
    /// default location (if present), then `ROSETTA_*` environment variables,
    /// then the keychain for a missing secret.
    pub fn load() -> Result<Self> {
        let mut options = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        options.apply_env()?;

        if options.client_secret.trim().is_empty() && !options.client_id.trim().is_empty() {
            if let Ok(secret) = CredentialStore::get_secret(&options.client_id) {
                debug!(client_id = %options.client_id, "Using client secret from keychain");
                options.client_secret = secret;
            }
        }

        Ok(options)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse options from JSON, accepting either the bare options object or
    /// a settings document with a `RosettaClient` section.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| RosettaError::InvalidConfiguration(format!("settings file: {e}")))?;

        if let Some(section) = value.get_mut(CONFIG_SECTION) {
            value = section.take();
        }

        serde_json::from_value(value)
            .map_err(|e| RosettaError::InvalidConfiguration(format!("settings file: {e}")))
    }

    /// Overlay `ROSETTA_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay variables supplied by `lookup`. Numeric variables that do not
    /// parse are rejected with the variable's name.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = var("TOKEN_URL") {
            self.token_url = v;
        }
        if let Some(v) = var("CLIENT_ID") {
            self.client_id = v;
        }
        if let Some(v) = var("CLIENT_SECRET") {
            self.client_secret = v;
        }
        if let Some(v) = var("API_VERSION") {
            self.api_version = v;
        }
        if let Some(v) = var("TIMEOUT_SECONDS") {
            self.timeout_seconds = parse_env_int("TIMEOUT_SECONDS", &v)?;
        }
        if let Some(v) = var("DEBUG_RESPONSE_MAX_LENGTH") {
            self.debug_response_max_length = parse_env_int("DEBUG_RESPONSE_MAX_LENGTH", &v)?;
        }

        Ok(())
    }

    /// Fail fast on the first missing required field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("BaseUrl", &self.base_url),
            ("TokenUrl", &self.token_url),
            ("ClientId", &self.client_id),
            ("ClientSecret", &self.client_secret),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(RosettaError::Configuration { field });
            }
        }

        if self.timeout_seconds == 0 {
            return Err(RosettaError::InvalidConfiguration(
                "RosettaClientOptions.TimeoutSeconds must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL with `{version}` substituted and no trailing slash.
    pub fn resolved_base_url(&self) -> String {
        let version = if self.api_version.trim().is_empty() {
            DEFAULT_API_VERSION
        } else {
            self.api_version.trim()
        };
        self.base_url
            .trim()
            .replace(VERSION_PLACEHOLDER, version)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn debug_limit(&self) -> DebugLimit {
        DebugLimit::from_max_length(self.debug_response_max_length)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

fn parse_env_int<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        RosettaError::InvalidConfiguration(format!(
            "{ENV_PREFIX}{name} must be an integer, got '{value}'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn valid() -> RosettaClientOptions {
        RosettaClientOptions::new(
            "https://iam.example.edu/api/{version}",
            "https://auth.example.edu/oauth/token",
            "client",
            "secret",
        )
    }

    #[test]
    fn test_defaults() {
        let options = RosettaClientOptions::default();
        assert_eq!(options.api_version, "v1");
        assert_eq!(options.timeout_seconds, 30);
        assert_eq!(options.debug_limit(), DebugLimit::Disabled);
    }

    #[test]
    fn test_validate_names_first_missing_field() {
        assert!(valid().validate().is_ok());

        let mut options = valid();
        options.base_url = String::new();
        options.client_id = String::new();
        match options.validate() {
            Err(RosettaError::Configuration { field }) => assert_eq!(field, "BaseUrl"),
            other => panic!("unexpected result: {other:?}"),
        }

        let mut options = valid();
        options.client_secret = "   ".to_string();
        match options.validate() {
            Err(RosettaError::Configuration { field }) => assert_eq!(field, "ClientSecret"),
            other => panic!("unexpected result: {other:?}"),
        }

        let options = valid().with_timeout_seconds(0);
        assert!(matches!(
            options.validate(),
            Err(RosettaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_resolved_base_url() {
        assert_eq!(valid().resolved_base_url(), "https://iam.example.edu/api/v1");
        assert_eq!(
            valid().with_api_version("v2").resolved_base_url(),
            "https://iam.example.edu/api/v2"
        );

        let mut options = valid();
        options.base_url = "https://iam.example.edu/api/v1/".to_string();
        assert_eq!(options.resolved_base_url(), "https://iam.example.edu/api/v1");
    }

    #[test]
    fn test_from_json_with_section() {
        let json = r#"{
            "Logging": { "LogLevel": "Information" },
            "RosettaClient": {
                "BaseUrl": "https://iam.example.edu/api/{version}",
                "TokenUrl": "https://auth.example.edu/token",
                "ClientId": "abc",
                "ClientSecret": "xyz",
                "TimeoutSeconds": 60
            }
        }"#;
        let options = RosettaClientOptions::from_json_str(json).unwrap();
        assert_eq!(options.client_id, "abc");
        assert_eq!(options.timeout_seconds, 60);
        assert_eq!(options.api_version, "v1");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json_bare_object() {
        let json = r#"{"BaseUrl": "https://x", "ApiVersion": "v3"}"#;
        let options = RosettaClientOptions::from_json_str(json).unwrap();
        assert_eq!(options.base_url, "https://x");
        assert_eq!(options.api_version, "v3");
        assert!(matches!(
            options.validate(),
            Err(RosettaError::Configuration { field: "TokenUrl" })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROSETTA_CLIENT_ID", "from-env"),
            ("ROSETTA_TIMEOUT_SECONDS", "45"),
            ("ROSETTA_DEBUG_RESPONSE_MAX_LENGTH", "-1"),
        ]
        .into_iter()
        .collect();

        let mut options = valid();
        options
            .apply_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(options.client_id, "from-env");
        assert_eq!(options.client_secret, "secret");
        assert_eq!(options.timeout(), Duration::from_secs(45));
        assert_eq!(options.debug_limit(), DebugLimit::Unlimited);
    }

    #[test]
    fn test_unparseable_numeric_env_is_rejected() {
        for (key, bad) in [
            ("ROSETTA_TIMEOUT_SECONDS", "soon"),
            ("ROSETTA_TIMEOUT_SECONDS", "-5"),
            ("ROSETTA_DEBUG_RESPONSE_MAX_LENGTH", "lots"),
            ("ROSETTA_DEBUG_RESPONSE_MAX_LENGTH", "1.5"),
        ] {
            let mut options = valid();
            let err = options
                .apply_env_from(|k| (k == key).then(|| bad.to_string()))
                .unwrap_err();
            match err {
                RosettaError::InvalidConfiguration(msg) => {
                    assert!(msg.contains(key), "{msg}");
                    assert!(msg.contains(bad), "{msg}");
                }
                other => panic!("{key}={bad}: unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", valid());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"secret\""));
    }
}
