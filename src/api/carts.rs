use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::AddCartRequest;
use crate::services::{cart_service, token_service::Claims};
use crate::utils::AppError;

use super::users::EmailQuery;

/// GET /carts?email= - the caller's own cart only.
pub async fn get_cart(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    claims.require_email(&query.email)?;

    let items = cart_service::list_for_email(&db, &query.email).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// POST /carts - add a class to the caller's cart.
pub async fn add_to_cart(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<AddCartRequest>,
) -> Result<HttpResponse, AppError> {
    let item = request.into_inner().into_item()?;
    claims.require_email(&item.email)?;

    let id = cart_service::add(&db, item).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "insertedId": id })))
}

/// DELETE /carts/{id} - remove one item; the delete filter is scoped to the
/// token email so the id alone is not enough.
pub async fn remove_cart_item(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deleted = cart_service::remove(&db, &id, &claims.email).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deletedCount": deleted })))
}
