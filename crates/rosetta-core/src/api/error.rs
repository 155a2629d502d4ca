use thiserror::Error;

use crate::utils::truncate_with_note;

/// Maximum length of a response body rendered into an error message.
/// The full body is always kept on the variant itself.
const MAX_ERROR_BODY_LENGTH: usize = 500;

pub type Result<T> = std::result::Result<T, RosettaError>;

#[derive(Error, Debug)]
pub enum RosettaError {
    #[error("Configuration error: RosettaClientOptions.{field} is required")]
    Configuration { field: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to obtain OAuth token. Status: {status}, Error: {}", display_body(.body))]
    Authentication { status: u16, body: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("HTTP {status} from Rosetta API: {}", display_body(.body))]
    Http { status: u16, body: String },

    #[error("Unexpected response format: {0}")]
    Format(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_body(body: &str) -> String {
    truncate_with_note(body, MAX_ERROR_BODY_LENGTH)
}

impl RosettaError {
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        RosettaError::Http {
            status: status.as_u16(),
            body,
        }
    }

    /// Status code carried by token or business endpoint failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            RosettaError::Authentication { status, .. } | RosettaError::Http { status, .. } => {
                Some(*status)
            }
            RosettaError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RosettaError::Cancelled)
    }
}

impl From<serde_json::Error> for RosettaError {
    fn from(err: serde_json::Error) -> Self {
        RosettaError::Format(err.to_string())
    }
}
