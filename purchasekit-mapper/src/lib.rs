//! Platform purchase-error mapping for PurchaseKit.
//!
//! Three independently-versioned SDKs report purchase failures in three
//! different shapes:
//! - Google Play Billing: an object with a numeric `responseCode`
//! - the purchase-relay SDK (RevenueCat): an object with a numeric `code`
//! - StoreKit 2: an object with a string `code`
//!
//! Each shape has its own mapper; [`map_purchase_error`] structurally
//! detects the shape and delegates. Mapping never fails: anything
//! unrecognized degrades to `UNKNOWN_ERROR`.
//!
//! Message-content network detection takes priority over structural
//! mapping. Connectivity failures are the one category that must always
//! be retried, so an error whose message looks like a network failure is
//! classified `NETWORK_ERROR` even when it also carries a recognizable
//! platform code. A `retryable` flag on the incoming raw error is
//! ignored; the canonical taxonomy decides retryability.

mod play_billing;
mod revenuecat;
mod storekit;

pub use play_billing::map_google_play_billing_error;
pub use revenuecat::map_revenuecat_error;
pub use storekit::map_storekit2_error;

use purchasekit_types::PurchaseError;
use serde_json::Value;

/// Message substrings that mark an error as a connectivity failure.
const NETWORK_MARKERS: [&str; 4] = ["network", "timeout", "connection", "offline"];

/// Returns true if `message` reads like a connectivity failure.
#[must_use]
pub fn is_network_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    NETWORK_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Maps an arbitrary raw SDK error value into the canonical taxonomy.
///
/// Never panics and never returns an error; malformed input degrades to
/// [`PurchaseError::UnknownError`].
#[must_use]
pub fn map_purchase_error(raw: &Value) -> PurchaseError {
    let message = extract_message(raw);

    // Network heuristics win over structural mapping.
    if let Some(msg) = &message {
        if is_network_message(msg) {
            return PurchaseError::NetworkError { message: msg.clone() };
        }
    }

    let Some(obj) = raw.as_object() else {
        return PurchaseError::UnknownError {
            message: message.unwrap_or_else(|| "unclassified purchase error".to_string()),
        };
    };

    let message = message.unwrap_or_default();

    let mapped = if let Some(response_code) = obj.get("responseCode").and_then(Value::as_i64) {
        map_google_play_billing_error(response_code, &message)
    } else {
        match obj.get("code") {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(code) => map_revenuecat_error(code, &message),
                None => PurchaseError::UnknownError { message },
            },
            Some(Value::String(code)) => map_storekit2_error(code, &message),
            _ => PurchaseError::UnknownError { message },
        }
    };

    attach_product_id(mapped, obj)
}

/// The typed mappers cannot know the product id; when the raw object
/// carries one, attach it to a `ProductUnavailable` verdict.
fn attach_product_id(error: PurchaseError, obj: &serde_json::Map<String, Value>) -> PurchaseError {
    match error {
        PurchaseError::ProductUnavailable { product_id } if product_id.is_empty() => {
            let from_raw = obj
                .get("productId")
                .and_then(Value::as_str)
                .unwrap_or_default();
            PurchaseError::ProductUnavailable { product_id: from_raw.to_string() }
        }
        other => other,
    }
}

fn extract_message(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => ["message", "debugMessage", "underlyingErrorMessage"]
            .iter()
            .find_map(|field| obj.get(*field).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
