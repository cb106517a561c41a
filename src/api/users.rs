use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::CreateUserRequest;
use crate::services::user_service::{self, CreateUserOutcome};
use crate::utils::AppError;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// GET /users - all users, any authenticated caller.
pub async fn list_users(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let users = user_service::list_users(&db).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users - idempotent by email; called on every front-end sign-in.
pub async fn create_user(
    db: web::Data<MongoDB>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = request.into_inner().into_user()?;

    match user_service::create_user(&db, user).await? {
        CreateUserOutcome::AlreadyExists => {
            Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "user already exists" })))
        }
        CreateUserOutcome::Created(id) => {
            Ok(HttpResponse::Ok().json(serde_json::json!({ "insertedId": id })))
        }
    }
}

/// GET /checkuser?email= - one user by email, null when absent.
pub async fn check_user(
    db: web::Data<MongoDB>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::find_by_email(&db, &query.email).await?;
    Ok(HttpResponse::Ok().json(user))
}
