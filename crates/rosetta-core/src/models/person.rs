use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The client/user the current token was issued to (`/me`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Me {
    #[serde(rename = "clientId", alias = "client_id", default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub scopes: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "iamId", alias = "iamid", default)]
    pub iam_id: Option<String>,
    #[serde(rename = "displayName", alias = "displayname", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "modifyDate", alias = "modifydate", default)]
    pub modify_date: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub affiliations: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "iamId", alias = "iamid", default)]
    pub iam_id: Option<String>,
    #[serde(rename = "firstName", alias = "firstname", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", alias = "lastname", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub affiliations: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Person {
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "iamId", alias = "iamid", default)]
    pub iam_id: Option<String>,
    #[serde(rename = "loginId", alias = "loginid", default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub roles: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "iamId", alias = "iamid", default)]
    pub iam_id: Option<String>,
    #[serde(rename = "employeeId", alias = "employeeid", default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub appointments: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "iamId", alias = "iamid", default)]
    pub iam_id: Option<String>,
    #[serde(rename = "studentId", alias = "studentid", default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub majors: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}
