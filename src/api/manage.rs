use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{ClassStatus, FeedbackRequest, Role};
use crate::services::{class_service, token_service::Claims, user_service};
use crate::utils::AppError;

/// GET /manageclasses - admin review queue of instructor submissions.
pub async fn manage_classes(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
) -> Result<HttpResponse, AppError> {
    user_service::require_role(&db, &claims.email, Role::Admin).await?;

    let classes = class_service::list_instructor_submitted(&db).await?;
    Ok(HttpResponse::Ok().json(classes))
}

/// PATCH /manageclass/approve/{id}
pub async fn approve_class(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    set_class_status(&claims, &db, &id, ClassStatus::Approved).await
}

/// PATCH /manageclass/deny/{id}
pub async fn deny_class(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    set_class_status(&claims, &db, &id, ClassStatus::Denied).await
}

async fn set_class_status(
    claims: &Claims,
    db: &MongoDB,
    id: &str,
    status: ClassStatus,
) -> Result<HttpResponse, AppError> {
    user_service::require_role(db, &claims.email, Role::Admin).await?;

    let modified = class_service::set_status(db, id, status).await?;
    log::info!("✅ Class {} set to {}", id, status.as_str());
    Ok(HttpResponse::Ok().json(serde_json::json!({ "modifiedCount": modified })))
}

/// GET /feedback/{id} - public read of a class, feedback included.
pub async fn get_feedback(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let class = class_service::find_by_id(&db, &id).await?;
    Ok(HttpResponse::Ok().json(class))
}

/// PATCH /feedback/{id} - overwrites the feedback field unconditionally.
pub async fn set_feedback(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    request: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, AppError> {
    user_service::require_role(&db, &claims.email, Role::Admin).await?;

    let modified = class_service::set_feedback(&db, &id, &request.feedback).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "modifiedCount": modified })))
}

/// GET /manageusers - admin listing of every account.
pub async fn manage_users(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
) -> Result<HttpResponse, AppError> {
    user_service::require_role(&db, &claims.email, Role::Admin).await?;

    let users = user_service::list_users(&db).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// PATCH /manageusers/instructor/{id}
pub async fn make_instructor(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    set_user_role(&claims, &db, &id, Role::Instructor).await
}

/// PATCH /manageusers/admin/{id}
pub async fn make_admin(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    set_user_role(&claims, &db, &id, Role::Admin).await
}

async fn set_user_role(
    claims: &Claims,
    db: &MongoDB,
    id: &str,
    role: Role,
) -> Result<HttpResponse, AppError> {
    user_service::require_role(db, &claims.email, Role::Admin).await?;

    let modified = user_service::set_role(db, id, role).await?;
    log::info!("✅ User {} promoted to {}", id, role.as_str());
    Ok(HttpResponse::Ok().json(serde_json::json!({ "modifiedCount": modified })))
}
