use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// Document in the "payments" collection. Immutable once written; `date` is
/// stored as the ISO-8601 string the client sends and sorted lexicographically.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transaction_id: Option<String>,
    pub date: String,
    pub cart_items: Vec<String>,
    pub class_items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub class_names: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub email: String,
    pub price: f64,
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub date: String,
    pub cart_items: Vec<String>,
    pub class_items: Vec<String>,
    #[serde(default)]
    pub class_names: Option<Vec<String>>,
}

impl RecordPaymentRequest {
    /// Validates the referenced ids up front and returns the payment document
    /// together with the parsed cart and class ObjectIds.
    pub fn into_parts(self) -> Result<(Payment, Vec<ObjectId>, Vec<ObjectId>), AppError> {
        if self.class_items.is_empty() {
            return Err(AppError::Validation(
                "payment references no classes".to_string(),
            ));
        }
        let cart_ids = parse_ids(&self.cart_items, "cartItems")?;
        let class_ids = parse_ids(&self.class_items, "classItems")?;
        let payment = Payment {
            id: None,
            email: self.email,
            price: self.price,
            transaction_id: self.transaction_id,
            date: self.date,
            cart_items: self.cart_items,
            class_items: self.class_items,
            class_names: self.class_names,
        };
        Ok((payment, cart_ids, class_ids))
    }
}

fn parse_ids(ids: &[String], field: &str) -> Result<Vec<ObjectId>, AppError> {
    ids.iter()
        .map(|id| {
            ObjectId::parse_str(id)
                .map_err(|_| AppError::Validation(format!("malformed id in {}", field)))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_wire_names_are_camel_case() {
        let payment = Payment {
            id: None,
            email: "a@x.com".to_string(),
            price: 49.0,
            transaction_id: Some("pi_123".to_string()),
            date: "2023-07-14T10:00:00Z".to_string(),
            cart_items: vec![],
            class_items: vec![],
            class_names: None,
        };
        let json = serde_json::to_value(&payment).unwrap();
        assert!(json.get("cartItems").is_some());
        assert!(json.get("classItems").is_some());
        assert!(json.get("transactionId").is_some());
    }

    #[test]
    fn test_record_payment_rejects_malformed_ids() {
        let req: RecordPaymentRequest = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "price": 49.0,
            "date": "2023-07-14T10:00:00Z",
            "cartItems": ["nope"],
            "classItems": ["64b0c0ffee0ddeadbeef0001"]
        }))
        .unwrap();
        assert!(req.into_parts().is_err());
    }

    #[test]
    fn test_record_payment_parses_ids() {
        let req: RecordPaymentRequest = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "price": 49.0,
            "date": "2023-07-14T10:00:00Z",
            "cartItems": ["64b0c0ffee0ddeadbeef0001", "64b0c0ffee0ddeadbeef0002"],
            "classItems": ["64b0c0ffee0ddeadbeef0003"]
        }))
        .unwrap();
        let (payment, cart_ids, class_ids) = req.into_parts().unwrap();
        assert_eq!(cart_ids.len(), 2);
        assert_eq!(class_ids.len(), 1);
        assert_eq!(payment.cart_items.len(), 2);
    }
}
