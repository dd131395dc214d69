use pretty_assertions::assert_eq;
use purchasekit_mapper::{
    map_google_play_billing_error, map_purchase_error, map_revenuecat_error,
    map_storekit2_error,
};
use purchasekit_types::{InvalidReason, PurchaseError, PurchaseErrorCode};
use serde_json::json;

// ── Google Play Billing (pinned classifications) ─────────────────

#[test]
fn play_billing_user_canceled_is_deterministic() {
    for msg in ["", "User pressed back", "whatever"] {
        let err = map_google_play_billing_error(1, msg);
        assert_eq!(err, PurchaseError::PurchaseCancelled);
        assert!(!err.is_retryable());
    }
}

#[test]
fn play_billing_service_unavailable_is_network() {
    let err = map_google_play_billing_error(2, "Service unavailable");
    assert_eq!(err.code(), PurchaseErrorCode::NetworkError);
    assert!(err.is_retryable());
}

#[test]
fn play_billing_code_table() {
    assert_eq!(
        map_google_play_billing_error(-1, "disconnected").code(),
        PurchaseErrorCode::StoreProblemError
    );
    assert_eq!(
        map_google_play_billing_error(3, "billing unavailable").code(),
        PurchaseErrorCode::StoreProblemError
    );
    assert_eq!(
        map_google_play_billing_error(4, "item gone").code(),
        PurchaseErrorCode::ProductUnavailable
    );
    assert_eq!(
        map_google_play_billing_error(5, "developer error"),
        PurchaseError::PurchaseInvalid { reason: InvalidReason::BundleMismatch }
    );
    assert_eq!(
        map_google_play_billing_error(6, "internal error").code(),
        PurchaseErrorCode::StoreProblemError
    );
    assert_eq!(
        map_google_play_billing_error(12, "no network").code(),
        PurchaseErrorCode::NetworkError
    );
}

#[test]
fn play_billing_unmapped_degrades_to_unknown() {
    let err = map_google_play_billing_error(99, "");
    assert_eq!(err.code(), PurchaseErrorCode::UnknownError);
    assert!(!err.is_retryable());
}

// ── RevenueCat ───────────────────────────────────────────────────

#[test]
fn revenuecat_code_table() {
    assert_eq!(map_revenuecat_error(1, "").code(), PurchaseErrorCode::PurchaseCancelled);
    assert_eq!(map_revenuecat_error(2, "store down").code(), PurchaseErrorCode::StoreProblemError);
    assert_eq!(
        map_revenuecat_error(4, "bad receipt"),
        PurchaseError::PurchaseInvalid { reason: InvalidReason::SignatureMismatch }
    );
    assert_eq!(map_revenuecat_error(5, "not for sale").code(), PurchaseErrorCode::ProductUnavailable);
    assert_eq!(map_revenuecat_error(10, "").code(), PurchaseErrorCode::NetworkError);
    assert_eq!(map_revenuecat_error(35, "").code(), PurchaseErrorCode::NetworkError);
    assert_eq!(map_revenuecat_error(777, "??").code(), PurchaseErrorCode::UnknownError);
}

// ── StoreKit 2 ───────────────────────────────────────────────────

#[test]
fn storekit_code_table() {
    assert_eq!(map_storekit2_error("userCancelled", "").code(), PurchaseErrorCode::PurchaseCancelled);
    assert_eq!(
        map_storekit2_error("verificationFailed", ""),
        PurchaseError::PurchaseInvalid { reason: InvalidReason::SignatureMismatch }
    );
    assert_eq!(
        map_storekit2_error("revoked", ""),
        PurchaseError::PurchaseInvalid { reason: InvalidReason::Revoked }
    );
    assert_eq!(map_storekit2_error("systemError", "boom").code(), PurchaseErrorCode::StoreProblemError);
    assert_eq!(map_storekit2_error("unknownProduct", "").code(), PurchaseErrorCode::ProductUnavailable);
    assert_eq!(map_storekit2_error("somethingNew", "").code(), PurchaseErrorCode::UnknownError);
}

#[test]
fn storekit_network_case_is_network() {
    assert_eq!(map_storekit2_error("networkError", "").code(), PurchaseErrorCode::NetworkError);
}

// ── Network heuristics beat platform codes ───────────────────────

#[test]
fn network_message_overrides_cancelled_code() {
    // Even a "cancelled" code is classified as network when the message
    // says the connection dropped; connectivity must always retry.
    let err = map_google_play_billing_error(1, "connection reset by peer");
    assert_eq!(err.code(), PurchaseErrorCode::NetworkError);
    assert!(err.is_retryable());
}

#[test]
fn network_heuristics_are_case_insensitive() {
    for msg in ["Request TIMEOUT", "device is Offline", "no NetWork available"] {
        let err = map_revenuecat_error(4, msg);
        assert_eq!(err.code(), PurchaseErrorCode::NetworkError, "message {msg:?}");
    }
}

// ── Structural dispatch ──────────────────────────────────────────

#[test]
fn dispatch_detects_play_billing_shape() {
    let raw = json!({"responseCode": 1, "debugMessage": "User canceled"});
    assert_eq!(map_purchase_error(&raw), PurchaseError::PurchaseCancelled);
}

#[test]
fn dispatch_detects_revenuecat_shape() {
    let raw = json!({"code": 2, "message": "There was a problem with the store"});
    assert_eq!(map_purchase_error(&raw).code(), PurchaseErrorCode::StoreProblemError);
}

#[test]
fn dispatch_detects_storekit_shape() {
    let raw = json!({"code": "userCancelled", "message": "cancelled"});
    assert_eq!(map_purchase_error(&raw), PurchaseError::PurchaseCancelled);
}

#[test]
fn dispatch_attaches_product_id() {
    let raw = json!({"responseCode": 4, "debugMessage": "gone", "productId": "pro_annual"});
    assert_eq!(
        map_purchase_error(&raw),
        PurchaseError::ProductUnavailable { product_id: "pro_annual".into() }
    );
}

#[test]
fn dispatch_network_message_wins_over_shape() {
    let raw = json!({"responseCode": 1, "debugMessage": "network unreachable"});
    assert_eq!(map_purchase_error(&raw).code(), PurchaseErrorCode::NetworkError);
}

#[test]
fn dispatch_ignores_caller_retryable_flag() {
    // Upstream flags the error non-retryable; the canonical taxonomy
    // still classifies by code.
    let raw = json!({"responseCode": 2, "debugMessage": "store hiccup", "retryable": false});
    let err = map_purchase_error(&raw);
    assert_eq!(err.code(), PurchaseErrorCode::NetworkError);
    assert!(err.is_retryable());
}

// ── Malformed input degrades, never panics ───────────────────────

#[test]
fn dispatch_malformed_inputs_degrade_to_unknown() {
    let cases = vec![
        json!(null),
        json!(42),
        json!([1, 2, 3]),
        json!({}),
        json!({"code": true}),
        json!({"code": 3.5}),
        json!({"unrelated": "fields"}),
    ];
    for raw in cases {
        let err = map_purchase_error(&raw);
        assert_eq!(err.code(), PurchaseErrorCode::UnknownError, "raw {raw}");
        assert!(!err.is_retryable());
    }
}

#[test]
fn dispatch_bare_string_uses_heuristics() {
    assert_eq!(
        map_purchase_error(&json!("connection timed out")).code(),
        PurchaseErrorCode::NetworkError
    );
    assert_eq!(
        map_purchase_error(&json!("something odd")).code(),
        PurchaseErrorCode::UnknownError
    );
}
