//! Restore-purchases error classification for PurchaseKit.
//!
//! The single place where a canonical error code becomes user-facing
//! text and a retry/support affordance. Domain and storage components
//! return codes only; centralizing message generation here keeps the
//! policy testable independent of storage logic.
//!
//! Retry policy is fixed per classification, not per call site:
//! retryable codes get three attempts with a 1s base backoff (the
//! caller applies the exponential curve), everything else gets none.

mod messages;

use chrono::Utc;
use purchasekit_mapper::map_purchase_error;
use purchasekit_types::{PurchaseError, PurchaseErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum automatic retries for transient failures.
pub const MAX_RETRIES: u32 = 3;
/// Base backoff between retries, in milliseconds.
pub const RETRY_BACKOFF_MS: u64 = 1_000;

/// How serious a restore failure is for alerting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Transient; a retry is expected to resolve it.
    Warning,
    /// Permanent; user or support intervention is required.
    Critical,
}

/// A fully resolved restore-failure presentation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestorePlan {
    pub code: PurchaseErrorCode,
    pub user_message: String,
    pub suggestion_message: String,
    pub retryable: bool,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub show_retry_button: bool,
    pub show_support_button: bool,
}

/// Diagnostic metadata extracted from a restore failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetadata {
    pub code: PurchaseErrorCode,
    pub message: String,
    pub original_message: String,
    /// When the failure was classified (milliseconds since Unix epoch).
    pub timestamp: i64,
    pub severity: Severity,
}

/// Classifies a canonical purchase error into a presentation plan.
///
/// `locale` selects the message language; unknown or absent locales
/// fall back to English.
#[must_use]
pub fn classify(error: &PurchaseError, locale: Option<&str>) -> RestorePlan {
    let code = error.code();
    let retryable = error.is_retryable();
    let (user_message, suggestion_message) = messages::for_code(code, locale);

    RestorePlan {
        code,
        user_message,
        suggestion_message,
        retryable,
        max_retries: if retryable { MAX_RETRIES } else { 0 },
        retry_backoff_ms: if retryable { RETRY_BACKOFF_MS } else { 0 },
        show_retry_button: retryable,
        // Permanent failures the user cannot fix alone get a support
        // affordance; a plain cancellation does not.
        show_support_button: matches!(
            code,
            PurchaseErrorCode::PurchaseInvalid | PurchaseErrorCode::UnknownError
        ),
    }
}

/// Classifies a raw SDK error value, mapping it through the canonical
/// taxonomy first.
///
/// Defensive by design: null, scalar, or missing-field input degrades
/// to `UNKNOWN_ERROR` with a non-empty default message. Any `retryable`
/// flag carried by the raw value is ignored; the canonical
/// code-to-retryable mapping always wins, even when an upstream layer
/// mislabeled a network failure as non-retryable.
#[must_use]
pub fn classify_raw(raw: &Value, locale: Option<&str>) -> RestorePlan {
    classify(&map_purchase_error(raw), locale)
}

/// Extracts diagnostic metadata for logging and support tickets.
#[must_use]
pub fn extract_metadata(error: &PurchaseError) -> ErrorMetadata {
    let code = error.code();
    let severity = if error.is_retryable() {
        Severity::Warning
    } else {
        Severity::Critical
    };

    ErrorMetadata {
        code,
        message: code.as_str().to_string(),
        original_message: error.to_string(),
        timestamp: Utc::now().timestamp_millis(),
        severity,
    }
}
