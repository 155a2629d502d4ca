use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub members: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "parentCode", alias = "parentcode", default)]
    pub parent_code: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct College {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Major {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "collegeCode", alias = "collegecode", default)]
    pub college_code: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseProfile {
    #[serde(rename = "iamId", alias = "iamid", default)]
    pub iam_id: Option<String>,
    #[serde(rename = "displayName", alias = "displayname", default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::flexible::deserialize")]
    pub affiliations: Vec<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmploymentStatus {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// UCPath entitlement reference entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entitlement {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentAssociation {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_group_members_shapes() {
        let group: Group = serde_json::from_value(json!({
            "id": "g1",
            "name": "IT Staff",
            "members": "   "
        }))
        .unwrap();
        assert!(group.members.is_empty());

        let group: Group = serde_json::from_value(json!({
            "id": "g2",
            "members": [{"iamId": "1"}, {"iamId": "2"}, {"iamId": "3"}]
        }))
        .unwrap();
        assert_eq!(group.members.len(), 3);
        assert_eq!(group.members[2], json!({"iamId": "3"}));
    }

    #[test]
    fn test_group_members_rejects_number() {
        let result = serde_json::from_value::<Group>(json!({"members": 12}));
        assert!(result.is_err());
    }

    #[test]
    fn test_major_passthrough() {
        let major: Major = serde_json::from_value(json!({
            "code": "ECS",
            "name": "Computer Science",
            "collegeCode": "EN",
            "cip": "11.0701"
        }))
        .unwrap();
        assert_eq!(major.college_code.as_deref(), Some("EN"));
        assert_eq!(major.attributes.get("cip"), Some(&json!("11.0701")));
    }
}
