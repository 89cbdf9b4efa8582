//! # User identity
//!
//! [`User`] is the client's view of who is signed in. It is built from one of two
//! sources and is never edited in between:
//!
//! - the claims of a verified bearer token (see the session crate's token codec), or
//! - the JSON body of `GET /auth/me`.
//!
//! The identity endpoint emits `user_id` while the persisted client record uses
//! `userId`; both spellings deserialize into [`User::user_id`], and serialisation always
//! writes `userId`.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl User {
    /// Name to show in the header: name, then username, then email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.email)
    }

    /// Whether the user has filled in the company profile used by the reports.
    pub fn has_company_info(&self) -> bool {
        self.company_name.as_deref().is_some_and(|s| !s.is_empty())
            && self.industry_type.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            user_id: "u1".to_string(),
            email: "a@b.com".to_string(),
            username: None,
            name: None,
            company_name: None,
            industry_type: None,
            picture: None,
        }
    }

    #[test]
    fn test_accepts_identity_endpoint_shape() {
        let body = r#"{
            "user_id": "42",
            "email": "kim@example.com",
            "name": "Kim",
            "company_name": "Acme Steel",
            "industry_type": "manufacturing",
            "picture": null
        }"#;
        let user: User = serde_json::from_str(body).unwrap();
        assert_eq!(user.user_id, "42");
        assert_eq!(user.name.as_deref(), Some("Kim"));
        assert!(user.picture.is_none());
        assert!(user.has_company_info());
    }

    #[test]
    fn test_serializes_user_id_as_camel_case() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["userId"], "u1");
        assert!(json.get("user_id").is_none());
        // Absent optionals are omitted
        assert!(json.get("name").is_none());

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut u = user();
        assert_eq!(u.display_name(), "a@b.com");
        u.username = Some("kim01".to_string());
        assert_eq!(u.display_name(), "kim01");
        u.name = Some("Kim".to_string());
        assert_eq!(u.display_name(), "Kim");
    }

    #[test]
    fn test_company_info_requires_both_fields() {
        let mut u = user();
        u.company_name = Some("Acme".to_string());
        assert!(!u.has_company_info());
        u.industry_type = Some(String::new());
        assert!(!u.has_company_info());
        u.industry_type = Some("energy".to_string());
        assert!(u.has_company_info());
    }
}
