use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Pending,
    Approved,
    Denied,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Pending => "pending",
            ClassStatus::Approved => "approved",
            ClassStatus::Denied => "denied",
        }
    }
}

/// Document in the "classes" collection.
///
/// `status` is absent on instructor submissions until an admin approves or
/// denies the class; only approved classes show up on the public listing.
/// Approve/deny are unconditional writes, so a denied class can later be
/// re-approved.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Class {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub ins_email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ins_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<f64>,
    pub available_seats: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<ClassStatus>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_by: Option<String>,
}

/// Instructor class submission. Inserted as-is; the admin approval flow sets
/// `status` later.
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub ins_email: String,
    #[serde(default)]
    pub ins_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub available_seats: i64,
    #[serde(default)]
    pub status: Option<ClassStatus>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl CreateClassRequest {
    pub fn into_class(self) -> Result<Class, crate::utils::AppError> {
        if self.name.trim().is_empty() {
            return Err(crate::utils::AppError::Validation(
                "class name is required".to_string(),
            ));
        }
        if self.available_seats < 0 {
            return Err(crate::utils::AppError::Validation(
                "available_seats cannot be negative".to_string(),
            ));
        }
        Ok(Class {
            id: None,
            name: self.name,
            ins_email: self.ins_email,
            ins_name: self.ins_name,
            image: self.image,
            price: self.price,
            available_seats: self.available_seats,
            status: self.status,
            feedback: None,
            created_by: self.created_by,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ClassStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&ClassStatus::Denied).unwrap(),
            "\"denied\""
        );
        assert_eq!(
            serde_json::to_string(&ClassStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_submission_keeps_status_absent() {
        let req: CreateClassRequest = serde_json::from_value(serde_json::json!({
            "name": "Street Photography 101",
            "ins_email": "ins@x.com",
            "available_seats": 10
        }))
        .unwrap();
        let class = req.into_class().unwrap();
        assert!(class.status.is_none());
        let doc = serde_json::to_value(&class).unwrap();
        assert!(doc.get("status").is_none());
    }

    #[test]
    fn test_negative_seats_rejected() {
        let req: CreateClassRequest = serde_json::from_value(serde_json::json!({
            "name": "X",
            "ins_email": "ins@x.com",
            "available_seats": -1
        }))
        .unwrap();
        assert!(req.into_class().is_err());
    }
}
