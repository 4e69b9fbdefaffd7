//! GitLab API request and response types
//!
//! Only the fields the operations actually read are modelled. Listed
//! issues and merge requests are passed through untouched as JSON values.

use serde::{Deserialize, Serialize};

/// Any GitLab resource we only need the numeric ID of
/// (project, group, user)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IdRef {
    pub id: u64,
}

/// Body for creating or updating a project/group membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberPayload {
    pub user_id: u64,
    pub access_level: u32,
}

/// Error body returned by GitLab on failed requests
///
/// `message` is usually a string, but validation failures return an
/// object keyed by field name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ApiMessage {
    /// Human-readable rendering of the message, if there is one
    pub fn text(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Kind of membership target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberTarget {
    Project,
    Group,
}

impl MemberTarget {
    /// API collection the target lives under
    pub fn collection(self) -> &'static str {
        match self {
            MemberTarget::Project => "projects",
            MemberTarget::Group => "groups",
        }
    }

    /// Singular noun used in messages
    pub fn noun(self) -> &'static str {
        match self {
            MemberTarget::Project => "project",
            MemberTarget::Group => "group",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_ref_ignores_other_fields() {
        let project: IdRef = serde_json::from_value(json!({
            "id": 42,
            "path_with_namespace": "group/project"
        }))
        .unwrap();
        assert_eq!(project.id, 42);
    }

    #[test]
    fn test_api_message_text() {
        let msg: ApiMessage = serde_json::from_str(r#"{"message": "403 Forbidden"}"#).unwrap();
        assert_eq!(msg.text().as_deref(), Some("403 Forbidden"));

        let msg: ApiMessage =
            serde_json::from_str(r#"{"message": {"access_level": ["is invalid"]}}"#).unwrap();
        assert_eq!(
            msg.text().as_deref(),
            Some(r#"{"access_level":["is invalid"]}"#)
        );

        let msg: ApiMessage = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert_eq!(msg.text(), None);
    }

    #[test]
    fn test_member_payload_serialization() {
        let payload = MemberPayload {
            user_id: 5,
            access_level: 30,
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({"user_id": 5, "access_level": 30})
        );
    }
}
