use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::MongoDB;
use crate::models::{Role, User};
use crate::utils::AppError;

pub enum CreateUserOutcome {
    AlreadyExists,
    Created(String),
}

/// Idempotent by email: a second sign-in with the same email is a no-op.
pub async fn create_user(db: &MongoDB, user: User) -> Result<CreateUserOutcome, AppError> {
    let collection = db.users();

    let existing = collection.find_one(doc! { "email": &user.email }).await?;
    if existing.is_some() {
        return Ok(CreateUserOutcome::AlreadyExists);
    }

    let result = collection.insert_one(&user).await?;
    let id = result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    log::info!("✅ User created: {}", user.email);
    Ok(CreateUserOutcome::Created(id))
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let users = db.users().find(doc! {}).await?.try_collect().await?;
    Ok(users)
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, AppError> {
    let user = db.users().find_one(doc! { "email": email }).await?;
    Ok(user)
}

/// Unconditional role overwrite; promotion and demotion both go through here.
pub async fn set_role(db: &MongoDB, id: &str, role: Role) -> Result<u64, AppError> {
    let oid = ObjectId::parse_str(id)?;
    let result = db
        .users()
        .update_one(
            doc! { "_id": oid },
            doc! { "$set": { "role": role.as_str() } },
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    Ok(result.modified_count)
}

/// Role guard for admin/instructor routes. The role lives in the users
/// collection, not in the token, so promotions take effect immediately.
pub async fn require_role(db: &MongoDB, email: &str, role: Role) -> Result<(), AppError> {
    let user = find_by_email(db, email).await?;
    match user {
        Some(u) if u.role == Some(role) => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_create_user_is_idempotent_by_email() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "booking_test").await.unwrap();

        let email = format!("{}@idempotence.test", ObjectId::new().to_hex());
        let user = User {
            id: None,
            email: email.clone(),
            name: Some("Test".to_string()),
            photo_url: None,
            role: None,
        };

        let first = create_user(&db, user.clone()).await.unwrap();
        assert!(matches!(first, CreateUserOutcome::Created(_)));

        let second = create_user(&db, user).await.unwrap();
        assert!(matches!(second, CreateUserOutcome::AlreadyExists));

        let count = db
            .users()
            .count_documents(doc! { "email": &email })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
