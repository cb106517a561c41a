use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::ClientSession;
use serde::Serialize;

use crate::database::MongoDB;
use crate::models::Payment;
use crate::utils::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordResult {
    pub inserted_id: String,
    pub deleted_cart_items: u64,
    pub updated_classes: u64,
}

/// Records a checkout as one transactional unit: insert the payment, clear the
/// purchased cart items, decrement each class's seat count. Requires the
/// deployment to support sessions (replica set).
pub async fn record_payment(
    db: &MongoDB,
    payment: Payment,
    cart_ids: Vec<ObjectId>,
    class_ids: Vec<ObjectId>,
) -> Result<PaymentRecordResult, AppError> {
    let mut session = db.client().start_session().await?;
    session.start_transaction().await?;

    match apply_checkout(db, &mut session, &payment, cart_ids, class_ids).await {
        Ok(result) => {
            session.commit_transaction().await?;
            log::info!(
                "✅ Payment recorded for {}: {} cart items, {} classes",
                payment.email,
                result.deleted_cart_items,
                result.updated_classes
            );
            Ok(result)
        }
        Err(e) => {
            log::warn!("⚠️ Checkout aborted for {}: {}", payment.email, e);
            session.abort_transaction().await.ok();
            Err(e)
        }
    }
}

async fn apply_checkout(
    db: &MongoDB,
    session: &mut ClientSession,
    payment: &Payment,
    cart_ids: Vec<ObjectId>,
    class_ids: Vec<ObjectId>,
) -> Result<PaymentRecordResult, AppError> {
    let class_count = class_ids.len() as u64;

    let insert = db
        .payments()
        .insert_one(payment)
        .session(&mut *session)
        .await?;

    let delete = db
        .carts()
        .delete_many(doc! { "_id": { "$in": cart_ids } })
        .session(&mut *session)
        .await?;

    // Seat floor: only classes with seats left match, so an exhausted class
    // makes the count come up short and the whole checkout aborts.
    let update = db
        .classes()
        .update_many(
            doc! { "_id": { "$in": class_ids }, "available_seats": { "$gt": 0 } },
            doc! { "$inc": { "available_seats": -1 } },
        )
        .session(&mut *session)
        .await?;

    if update.modified_count < class_count {
        return Err(AppError::OutOfSeats);
    }

    Ok(PaymentRecordResult {
        inserted_id: insert
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_default(),
        deleted_cart_items: delete.deleted_count,
        updated_classes: update.modified_count,
    })
}

/// All payments for an email, newest first. `date` is compared as stored, the
/// ISO strings the front end sends sort correctly without parsing.
pub async fn history(db: &MongoDB, email: &str) -> Result<Vec<Payment>, AppError> {
    let payments = db
        .payments()
        .find(doc! { "email": email })
        .sort(doc! { "date": -1 })
        .await?
        .try_collect()
        .await?;
    Ok(payments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordPaymentRequest;

    fn seed_request(email: &str) -> RecordPaymentRequest {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "price": 49.0,
            "date": "2023-07-14T10:00:00Z",
            "cartItems": [],
            "classItems": ["64b0c0ffee0ddeadbeef0003"]
        }))
        .unwrap()
    }

    #[tokio::test]
    #[ignore] // Requires a MongoDB replica set
    async fn test_record_payment_clears_cart_and_decrements_seats() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "booking_test").await.unwrap();

        let (payment, cart_ids, class_ids) = seed_request("a@x.com").into_parts().unwrap();
        let result = record_payment(&db, payment, cart_ids, class_ids).await;

        // With no seeded class the guarded update matches nothing and the
        // transaction must abort instead of recording a dangling payment.
        assert!(matches!(result, Err(AppError::OutOfSeats)));
        let left = history(&db, "a@x.com").await.unwrap();
        assert!(left.is_empty());
    }
}
