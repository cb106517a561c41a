use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

/// Document in the "users" collection. Created on first sign-in; `role` stays
/// absent until an admin promotes the account.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl CreateUserRequest {
    pub fn into_user(self) -> Result<User, crate::utils::AppError> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(crate::utils::AppError::Validation(
                "a valid email is required".to_string(),
            ));
        }
        Ok(User {
            id: None,
            email: self.email,
            name: self.name,
            photo_url: self.photo_url,
            role: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Instructor).unwrap(),
            "\"instructor\""
        );
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            name: None,
            photo_url: None,
        };
        assert!(req.into_user().is_err());
    }

    #[test]
    fn test_user_without_role_omits_field() {
        let user = User {
            id: None,
            email: "a@x.com".to_string(),
            name: Some("A".to_string()),
            photo_url: None,
            role: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("role").is_none());
        assert!(json.get("_id").is_none());
    }
}
