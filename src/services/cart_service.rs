use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::MongoDB;
use crate::models::CartItem;
use crate::utils::AppError;

pub async fn list_for_email(db: &MongoDB, email: &str) -> Result<Vec<CartItem>, AppError> {
    let items = db
        .carts()
        .find(doc! { "email": email })
        .await?
        .try_collect()
        .await?;
    Ok(items)
}

pub async fn add(db: &MongoDB, item: CartItem) -> Result<String, AppError> {
    let result = db.carts().insert_one(&item).await?;
    let id = result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(id)
}

/// Deletes by id scoped to the owner's email, so one user cannot remove
/// another user's cart entry even with a guessed id.
pub async fn remove(db: &MongoDB, id: &str, email: &str) -> Result<u64, AppError> {
    let oid = ObjectId::parse_str(id)?;
    let result = db
        .carts()
        .delete_one(doc! { "_id": oid, "email": email })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!("cart item {}", id)));
    }
    Ok(result.deleted_count)
}
