//! Query parameter sets, one per filterable endpoint.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, Serialize)]
pub struct IdentityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl IdentityQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self { limit: Some(limit) }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PeopleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iamid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PeopleQuery {
    pub fn by_iam_id(iam_id: impl Into<String>) -> Self {
        Self {
            iamid: Some(iam_id.into()),
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iamid: Option<String>,
    /// Sent as a single comma-separated value.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "comma_joined")]
    pub iamids: Vec<String>,
}

impl AccountQuery {
    pub fn by_iam_id(iam_id: impl Into<String>) -> Self {
        Self {
            iamid: Some(iam_id.into()),
            ..Self::default()
        }
    }

    pub fn by_iam_ids<I, S>(iam_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            iamid: None,
            iamids: iam_ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignContactsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Ask the server to also retain the generated export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<bool>,
}

impl CampaignContactsQuery {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn save(mut self, save: bool) -> Self {
        self.save = Some(save);
        self
    }
}

/// Endpoints without filters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub(crate) struct NoQuery {}

fn comma_joined<S: Serializer>(ids: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ids.join(","))
}
