use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the "instructors" collection. Read-only reference listing;
/// there is no write path for it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Instructor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_classes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_students: Option<i64>,
}
