//! Receipt payload parsing.
//!
//! Raw payloads are JSON objects emitted by the platform billing stack.
//! The minimum shape is `productId`, `purchaseTime`, and a transaction
//! identifier (`transactionId` on iOS, `purchaseToken` on Android).
//! The app-identity field is `bundleId` (iOS) or `packageName`
//! (Android) and may be absent on malformed receipts.

use crate::error::{VerifyError, VerifyResult};
use purchasekit_types::Platform;
use serde_json::Value;

/// The structurally validated content of a receipt payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptPayload {
    pub product_id: String,
    /// Purchase time (milliseconds since Unix epoch).
    pub purchase_time: i64,
    pub transaction_id: String,
    /// Embedded app identity, when the receipt carries one.
    pub app_id: Option<String>,
}

impl ReceiptPayload {
    /// Parses and structurally validates a raw payload string.
    ///
    /// # Errors
    ///
    /// Any malformed JSON or missing/mistyped required field is a
    /// [`VerifyError::Decoding`] with a message that does not echo the
    /// payload content.
    pub fn parse(raw: &str, platform: Platform) -> VerifyResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|_| VerifyError::Decoding("payload is not valid JSON"))?;

        let obj = value
            .as_object()
            .ok_or(VerifyError::Decoding("payload is not a JSON object"))?;

        let product_id = non_empty_string(obj.get("productId"))
            .ok_or(VerifyError::Decoding("missing required field: productId"))?;

        let purchase_time = obj
            .get("purchaseTime")
            .and_then(Value::as_i64)
            .ok_or(VerifyError::Decoding("missing required field: purchaseTime"))?;

        // iOS receipts carry transactionId; Android carries purchaseToken.
        // Either satisfies the transaction-identifier requirement.
        let transaction_id = non_empty_string(obj.get("transactionId"))
            .or_else(|| non_empty_string(obj.get("purchaseToken")))
            .ok_or(VerifyError::Decoding("missing transaction identifier"))?;

        let app_id = non_empty_string(obj.get(platform.identity_field()));

        Ok(Self {
            product_id,
            purchase_time,
            transaction_id,
            app_id,
        })
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
