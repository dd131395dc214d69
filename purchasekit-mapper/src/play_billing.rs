//! Google Play Billing response-code mapping.

use crate::is_network_message;
use purchasekit_types::{InvalidReason, PurchaseError};

/// Maps a Play Billing `BillingResponseCode` and debug message.
///
/// Pinned classifications:
/// - `1` (USER_CANCELED) is always `PURCHASE_CANCELLED`, non-retryable.
/// - `2` (SERVICE_UNAVAILABLE) is always `NETWORK_ERROR`, retryable.
#[must_use]
pub fn map_google_play_billing_error(response_code: i64, debug_message: &str) -> PurchaseError {
    if is_network_message(debug_message) {
        return PurchaseError::NetworkError { message: debug_message.to_string() };
    }

    match response_code {
        1 => PurchaseError::PurchaseCancelled,
        2 | 12 => PurchaseError::NetworkError { message: debug_message.to_string() },
        // SERVICE_DISCONNECTED, BILLING_UNAVAILABLE, ERROR
        -1 | 3 | 6 => PurchaseError::StoreProblemError { message: debug_message.to_string() },
        // ITEM_UNAVAILABLE; the dispatcher attaches the product id.
        4 => PurchaseError::ProductUnavailable { product_id: String::new() },
        // DEVELOPER_ERROR: misconfigured request or wrong package signing.
        5 => PurchaseError::PurchaseInvalid { reason: InvalidReason::BundleMismatch },
        _ => PurchaseError::UnknownError {
            message: if debug_message.is_empty() {
                format!("unmapped billing response code {response_code}")
            } else {
                debug_message.to_string()
            },
        },
    }
}
