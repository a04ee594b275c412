//! Payment collaborator
//!
//! Hosted-checkout session creation and webhook signature verification.
//! The gateway captures funds on its own pages and later delivers a signed
//! confirmation callback; nothing in the capacity path ever blocks on it.

use async_trait::async_trait;
use ring::hmac;
use serde::Deserialize;
use shared::CheckoutMetadata;

use crate::utils::{AppError, AppResult};

/// Handle returned by session creation
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Gateway session id; becomes the order's idempotency key
    pub session_id: String,
    /// Where to send the customer to pay
    pub redirect_url: String,
}

/// Payment gateway contract
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout session for an amount in minor units,
    /// attaching the metadata bundle the confirmation will echo back
    async fn create_session(
        &self,
        amount_cents: i64,
        currency: &str,
        metadata: &CheckoutMetadata,
        success_url: &str,
        cancel_url: &str,
    ) -> AppResult<CheckoutSession>;
}

/// HTTP gateway client (hosted checkout API)
pub struct HostedCheckoutGateway {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl HostedCheckoutGateway {
    pub fn new(api_base: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: String,
}

#[async_trait]
impl PaymentGateway for HostedCheckoutGateway {
    async fn create_session(
        &self,
        amount_cents: i64,
        currency: &str,
        metadata: &CheckoutMetadata,
        success_url: &str,
        cancel_url: &str,
    ) -> AppResult<CheckoutSession> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("success_url".into(), success_url.into()),
            ("cancel_url".into(), cancel_url.into()),
            ("line_items[0][quantity]".into(), "1".into()),
            (
                "line_items[0][price_data][currency]".into(),
                currency.into(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                format!(
                    "Laundry pickup ({} bag{})",
                    metadata.est_bags,
                    if metadata.est_bags > 1 { "s" } else { "" }
                ),
            ),
        ];
        for (key, value) in metadata.to_map() {
            form.push((format!("metadata[{key}]"), value));
        }

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.api_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::external(format!("Payment session request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external(format!(
                "Payment gateway returned {status}: {body}"
            )));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| AppError::external(format!("Malformed payment session response: {e}")))?;

        Ok(CheckoutSession {
            session_id: session.id,
            redirect_url: session.url,
        })
    }
}

/// Placeholder gateway used when no API key is configured
///
/// Checkout drafts fail loudly instead of pretending funds were captured;
/// confirmation (webhook) paths do not touch the gateway at all.
pub struct DisabledGateway;

#[async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_session(
        &self,
        _amount_cents: i64,
        _currency: &str,
        _metadata: &CheckoutMetadata,
        _success_url: &str,
        _cancel_url: &str,
    ) -> AppResult<CheckoutSession> {
        Err(AppError::external("Payment gateway is not configured"))
    }
}

/// Webhook signature verifier
///
/// The confirmation callback is the single highest-value attack surface of
/// the system: anyone who can forge it mints paid orders. Signature header
/// format: `t=<unix seconds>,v1=<hex hmac-sha256 of "t.raw_body">`, with a
/// bounded tolerance against replay.
pub struct SignatureVerifier {
    key: hmac::Key,
    tolerance_secs: i64,
}

impl SignatureVerifier {
    pub fn new(secret: &str, tolerance_secs: i64) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
            tolerance_secs,
        }
    }

    /// Verify a signature header against the raw request body
    pub fn verify(&self, header: &str, raw_body: &[u8], now_unix: i64) -> AppResult<()> {
        let mut timestamp: Option<i64> = None;
        let mut signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = value.parse().ok(),
                Some(("v1", value)) => signature = hex::decode(value).ok(),
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| AppError::invalid("Malformed signature header"))?;
        let signature =
            signature.ok_or_else(|| AppError::invalid("Malformed signature header"))?;

        if (now_unix - timestamp).abs() > self.tolerance_secs {
            return Err(AppError::invalid("Signature timestamp outside tolerance"));
        }

        let mut signed_payload = Vec::with_capacity(raw_body.len() + 16);
        signed_payload.extend_from_slice(timestamp.to_string().as_bytes());
        signed_payload.push(b'.');
        signed_payload.extend_from_slice(raw_body);

        hmac::verify(&self.key, &signed_payload, &signature)
            .map_err(|_| AppError::invalid("Bad signature"))
    }

    /// Produce a valid header for a body (test tooling and the gateway
    /// simulator in dev)
    pub fn sign(&self, raw_body: &[u8], now_unix: i64) -> String {
        let mut signed_payload = Vec::with_capacity(raw_body.len() + 16);
        signed_payload.extend_from_slice(now_unix.to_string().as_bytes());
        signed_payload.push(b'.');
        signed_payload.extend_from_slice(raw_body);
        let tag = hmac::sign(&self.key, &signed_payload);
        format!("t={},v1={}", now_unix, hex::encode(tag.as_ref()))
    }
}
