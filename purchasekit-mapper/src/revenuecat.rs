//! Purchase-relay SDK (RevenueCat) numeric-code mapping.

use crate::is_network_message;
use purchasekit_types::{InvalidReason, PurchaseError};

/// Maps a RevenueCat `PurchasesErrorCode` and message.
#[must_use]
pub fn map_revenuecat_error(code: i64, message: &str) -> PurchaseError {
    if is_network_message(message) {
        return PurchaseError::NetworkError { message: message.to_string() };
    }

    match code {
        1 => PurchaseError::PurchaseCancelled,
        2 => PurchaseError::StoreProblemError { message: message.to_string() },
        4 => PurchaseError::PurchaseInvalid { reason: InvalidReason::SignatureMismatch },
        // ProductNotAvailableForPurchaseError; product id attached by
        // the dispatcher when present.
        5 => PurchaseError::ProductUnavailable { product_id: String::new() },
        // NetworkError and OfflineConnectionError.
        10 | 35 => PurchaseError::NetworkError { message: message.to_string() },
        _ => PurchaseError::UnknownError {
            message: if message.is_empty() {
                format!("unmapped relay error code {code}")
            } else {
                message.to_string()
            },
        },
    }
}
