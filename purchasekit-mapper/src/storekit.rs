//! StoreKit 2 string-code mapping.

use crate::is_network_message;
use purchasekit_types::{InvalidReason, PurchaseError};

/// Maps a StoreKit 2 error case name and message.
#[must_use]
pub fn map_storekit2_error(code: &str, message: &str) -> PurchaseError {
    if is_network_message(message) || is_network_message(code) {
        return PurchaseError::NetworkError { message: message.to_string() };
    }

    match code {
        "userCancelled" => PurchaseError::PurchaseCancelled,
        "systemError" | "notEntitled" | "serviceUnavailable" => {
            PurchaseError::StoreProblemError { message: message.to_string() }
        }
        "verificationFailed" | "invalidSignature" => {
            PurchaseError::PurchaseInvalid { reason: InvalidReason::SignatureMismatch }
        }
        "revoked" | "refundedOrRevoked" => {
            PurchaseError::PurchaseInvalid { reason: InvalidReason::Revoked }
        }
        "productUnavailable" | "unknownProduct" => {
            PurchaseError::ProductUnavailable { product_id: String::new() }
        }
        _ => PurchaseError::UnknownError {
            message: if message.is_empty() {
                format!("unmapped StoreKit error case {code}")
            } else {
                message.to_string()
            },
        },
    }
}
