use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use mongodb::bson::doc;

use crate::database::MongoDB;
use crate::models::Instructor;
use crate::utils::AppError;

/// GET /instructors - read-only reference listing.
pub async fn list_instructors(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let instructors: Vec<Instructor> = db.instructors().find(doc! {}).await?.try_collect().await?;
    Ok(HttpResponse::Ok().json(instructors))
}
