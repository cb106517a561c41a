use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::MongoDB;
use crate::models::{Class, ClassStatus};
use crate::utils::AppError;

/// Public catalog: only approved classes are visible.
pub async fn list_approved(db: &MongoDB) -> Result<Vec<Class>, AppError> {
    let classes = db
        .classes()
        .find(doc! { "status": ClassStatus::Approved.as_str() })
        .await?
        .try_collect()
        .await?;
    Ok(classes)
}

pub async fn find_by_id(db: &MongoDB, id: &str) -> Result<Class, AppError> {
    let oid = ObjectId::parse_str(id)?;
    db.classes()
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("class {}", id)))
}

pub async fn list_by_instructor(db: &MongoDB, email: &str) -> Result<Vec<Class>, AppError> {
    let classes = db
        .classes()
        .find(doc! { "ins_email": email })
        .await?
        .try_collect()
        .await?;
    Ok(classes)
}

/// Admin review queue: instructor-submitted classes regardless of status.
pub async fn list_instructor_submitted(db: &MongoDB) -> Result<Vec<Class>, AppError> {
    let classes = db
        .classes()
        .find(doc! { "created_by": "instructor" })
        .await?
        .try_collect()
        .await?;
    Ok(classes)
}

pub async fn create(db: &MongoDB, class: Class) -> Result<String, AppError> {
    let result = db.classes().insert_one(&class).await?;
    let id = result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    log::info!("✅ Class submitted by {}: {}", class.ins_email, class.name);
    Ok(id)
}

/// Unconditional status write. Approve-after-deny and deny-after-approve are
/// both allowed; there is no terminal state.
pub async fn set_status(db: &MongoDB, id: &str, status: ClassStatus) -> Result<u64, AppError> {
    let oid = ObjectId::parse_str(id)?;
    let result = db
        .classes()
        .update_one(
            doc! { "_id": oid },
            doc! { "$set": { "status": status.as_str() } },
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("class {}", id)));
    }
    Ok(result.modified_count)
}

pub async fn set_feedback(db: &MongoDB, id: &str, feedback: &str) -> Result<u64, AppError> {
    let oid = ObjectId::parse_str(id)?;
    let result = db
        .classes()
        .update_one(doc! { "_id": oid }, doc! { "$set": { "feedback": feedback } })
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("class {}", id)));
    }
    Ok(result.modified_count)
}
