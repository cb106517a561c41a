use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::services::token_service;
use crate::utils::AppError;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// POST /jwt - issues a one-hour bearer token for the posted identity.
pub async fn issue_token(request: web::Json<TokenRequest>) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let token = token_service::issue(request.email, request.name)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token })))
}
