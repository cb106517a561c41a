use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{PaymentIntentRequest, PaymentIntentResponse, RecordPaymentRequest};
use crate::services::stripe_service::{self, StripeClient};
use crate::services::{payment_service, token_service::Claims};
use crate::utils::AppError;

use super::users::EmailQuery;

/// POST /create-payment-intent - body `{price}`, responds `{clientSecret}`.
pub async fn create_payment_intent(
    stripe: web::Data<StripeClient>,
    request: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    let price = request.price;
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::Validation("price must be positive".to_string()));
    }

    let amount = stripe_service::to_minor_units(price);
    let intent = stripe.create_payment_intent(amount, "usd").await?;

    Ok(HttpResponse::Ok().json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// POST /payments - records the checkout transactionally.
pub async fn record_payment(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let (payment, cart_ids, class_ids) = request.into_inner().into_parts()?;
    claims.require_email(&payment.email)?;

    let result = payment_service::record_payment(&db, payment, cart_ids, class_ids).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /paymenthistory?email= - the caller's payments, newest first.
pub async fn payment_history(
    claims: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    claims.require_email(&query.email)?;

    let payments = payment_service::history(&db, &query.email).await?;
    Ok(HttpResponse::Ok().json(payments))
}
