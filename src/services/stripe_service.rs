use serde::Deserialize;

use crate::utils::AppError;

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Thin adapter over Stripe's payment-intent REST endpoint. The service only
/// needs the client secret back; confirmation happens client-side.
#[derive(Clone)]
pub struct StripeClient {
    secret_key: String,
    api_base: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

/// Converts a decimal price into integer minor units the way the front end
/// expects: multiply by 100 and truncate.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0) as i64
}

impl StripeClient {
    pub fn new(secret_key: String, api_base: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            secret_key,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            client,
        }
    }

    pub fn from_env() -> Self {
        let secret_key = std::env::var("PAYMENT_SECRET_KEY").unwrap_or_default();
        if secret_key.is_empty() {
            log::warn!("⚠️ PAYMENT_SECRET_KEY is not set, payment intents will fail");
        }
        Self::new(secret_key, std::env::var("STRIPE_API_BASE").ok())
    }

    /// Creates a card payment intent and returns its client secret. No retry;
    /// a gateway failure surfaces as a 500 to the caller.
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, AppError> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let form_params = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| AppError::GatewayError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::GatewayError(e.to_string()))?;

        if !status.is_success() {
            log::error!("❌ Stripe API error: status={}, body={}", status, body);
            if let Ok(err) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(AppError::GatewayError(err.error.message));
            }
            return Err(AppError::GatewayError(format!("HTTP {}", status)));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::GatewayError(format!("unexpected Stripe response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minor_units_truncates() {
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(12.345), 1234);
        assert_eq!(to_minor_units(0.0), 0);
    }

    #[test]
    fn test_stripe_error_body_decodes() {
        let body = r#"{"error":{"message":"Invalid API Key provided","type":"invalid_request_error"}}"#;
        let parsed: StripeErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Invalid API Key provided");
    }

    #[test]
    fn test_payment_intent_body_decodes() {
        let body = r#"{"id":"pi_123","client_secret":"pi_123_secret_abc","amount":4900}"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.client_secret, "pi_123_secret_abc");
    }
}
