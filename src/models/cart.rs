use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the "carts" collection. Field names stay camelCase because the
/// front end reads these documents back verbatim.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub class_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartRequest {
    pub email: String,
    pub class_id: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl AddCartRequest {
    pub fn into_item(self) -> Result<CartItem, crate::utils::AppError> {
        // The referenced class id must at least be a well-formed ObjectId,
        // otherwise checkout can never resolve it.
        ObjectId::parse_str(&self.class_id)?;
        Ok(CartItem {
            id: None,
            email: self.email,
            class_id: self.class_id,
            class_name: self.class_name,
            image: self.image,
            price: self.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_wire_names_are_camel_case() {
        let item = CartItem {
            id: None,
            email: "a@x.com".to_string(),
            class_id: "64b0c0ffee0ddeadbeef0001".to_string(),
            class_name: Some("Portraits".to_string()),
            image: None,
            price: Some(49.0),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("classId").is_some());
        assert!(json.get("className").is_some());
        assert!(json.get("class_id").is_none());
    }

    #[test]
    fn test_add_cart_rejects_malformed_class_id() {
        let req = AddCartRequest {
            email: "a@x.com".to_string(),
            class_id: "not-an-oid".to_string(),
            class_name: None,
            image: None,
            price: None,
        };
        assert!(req.into_item().is_err());
    }
}
