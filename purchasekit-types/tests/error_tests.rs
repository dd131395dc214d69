use purchasekit_types::{InvalidReason, PurchaseError, PurchaseErrorCode};

// ── Codes ────────────────────────────────────────────────────────

#[test]
fn code_mapping() {
    let cases = vec![
        (
            PurchaseError::NetworkError { message: "timeout".into() },
            PurchaseErrorCode::NetworkError,
        ),
        (
            PurchaseError::StoreProblemError { message: "503".into() },
            PurchaseErrorCode::StoreProblemError,
        ),
        (PurchaseError::PurchaseCancelled, PurchaseErrorCode::PurchaseCancelled),
        (
            PurchaseError::PurchaseInvalid { reason: InvalidReason::Revoked },
            PurchaseErrorCode::PurchaseInvalid,
        ),
        (
            PurchaseError::ProductUnavailable { product_id: "pro".into() },
            PurchaseErrorCode::ProductUnavailable,
        ),
        (
            PurchaseError::UnknownError { message: "?".into() },
            PurchaseErrorCode::UnknownError,
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code);
    }
}

#[test]
fn code_wire_names() {
    assert_eq!(PurchaseErrorCode::NetworkError.as_str(), "NETWORK_ERROR");
    assert_eq!(PurchaseErrorCode::StoreProblemError.as_str(), "STORE_PROBLEM_ERROR");
    assert_eq!(PurchaseErrorCode::PurchaseCancelled.as_str(), "PURCHASE_CANCELLED");
    assert_eq!(PurchaseErrorCode::PurchaseInvalid.as_str(), "PURCHASE_INVALID");
    assert_eq!(PurchaseErrorCode::ProductUnavailable.as_str(), "PRODUCT_UNAVAILABLE");
    assert_eq!(PurchaseErrorCode::UnknownError.as_str(), "UNKNOWN_ERROR");
}

// ── Retryability ─────────────────────────────────────────────────

#[test]
fn only_transient_infrastructure_retries() {
    assert!(PurchaseError::NetworkError { message: "x".into() }.is_retryable());
    assert!(PurchaseError::StoreProblemError { message: "x".into() }.is_retryable());

    assert!(!PurchaseError::PurchaseCancelled.is_retryable());
    assert!(
        !PurchaseError::PurchaseInvalid { reason: InvalidReason::SignatureMismatch }
            .is_retryable()
    );
    assert!(
        !PurchaseError::ProductUnavailable { product_id: "p".into() }.is_retryable()
    );
    assert!(!PurchaseError::UnknownError { message: "x".into() }.is_retryable());
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn error_serde_roundtrip() {
    let err = PurchaseError::ProductUnavailable { product_id: "annual_pro".into() };
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("PRODUCT_UNAVAILABLE"));
    let parsed: PurchaseError = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, err);
}

#[test]
fn invalid_reason_serde() {
    let err = PurchaseError::PurchaseInvalid { reason: InvalidReason::BundleMismatch };
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("bundle_mismatch"));
}

#[test]
fn display_never_empty() {
    let errors = vec![
        PurchaseError::NetworkError { message: "m".into() },
        PurchaseError::StoreProblemError { message: "m".into() },
        PurchaseError::PurchaseCancelled,
        PurchaseError::PurchaseInvalid { reason: InvalidReason::Revoked },
        PurchaseError::ProductUnavailable { product_id: "p".into() },
        PurchaseError::UnknownError { message: "m".into() },
    ];
    for e in errors {
        assert!(!e.to_string().is_empty());
    }
}
