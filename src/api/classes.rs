use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{CreateClassRequest, Role};
use crate::services::{class_service, token_service::Claims, user_service};
use crate::utils::AppError;

use super::users::EmailQuery;

/// GET /classes - public catalog, approved classes only.
pub async fn list_classes(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let classes = class_service::list_approved(&db).await?;
    Ok(HttpResponse::Ok().json(classes))
}

/// GET /classes/{id} - public class detail.
pub async fn class_detail(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let class = class_service::find_by_id(&db, &id).await?;
    Ok(HttpResponse::Ok().json(class))
}

/// GET /myclasses?email= - an instructor's own submissions, approved or not.
pub async fn my_classes(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    claims.require_email(&query.email)?;

    let classes = class_service::list_by_instructor(&db, &query.email).await?;
    Ok(HttpResponse::Ok().json(classes))
}

/// POST /classes - instructor submission, inserted as-is.
pub async fn create_class(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<CreateClassRequest>,
) -> Result<HttpResponse, AppError> {
    user_service::require_role(&db, &claims.email, Role::Instructor).await?;

    let class = request.into_inner().into_class()?;
    claims.require_email(&class.ins_email)?;

    let id = class_service::create(&db, class).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "insertedId": id })))
}
