//! User-facing message catalog.
//!
//! English only for now; the locale parameter is the extension point
//! for translated catalogs. Every code maps to non-empty text.

use purchasekit_types::PurchaseErrorCode;

/// Returns `(user_message, suggestion_message)` for a code and locale.
pub(crate) fn for_code(code: PurchaseErrorCode, locale: Option<&str>) -> (String, String) {
    // Only the language subtag matters; "en-GB" selects "en". Until
    // translated catalogs exist, every language falls back to English.
    let _lang = locale
        .map(|l| l.split(['-', '_']).next().unwrap_or(l))
        .unwrap_or("en");

    let (user, suggestion) = english(code);
    (user.to_string(), suggestion.to_string())
}

const fn english(code: PurchaseErrorCode) -> (&'static str, &'static str) {
    match code {
        PurchaseErrorCode::NetworkError => (
            "We couldn't reach the store. Check your connection and try again.",
            "Restoring will retry automatically once you're back online.",
        ),
        PurchaseErrorCode::StoreProblemError => (
            "The app store is having trouble right now.",
            "This is usually temporary. Please try again in a few minutes.",
        ),
        PurchaseErrorCode::PurchaseCancelled => (
            "The restore was cancelled.",
            "You can restore your purchases any time from Settings.",
        ),
        PurchaseErrorCode::PurchaseInvalid => (
            "We couldn't confirm this purchase.",
            "If you believe this purchase is valid, please contact support.",
        ),
        PurchaseErrorCode::ProductUnavailable => (
            "This product is no longer available.",
            "Your other purchases are unaffected.",
        ),
        PurchaseErrorCode::UnknownError => (
            "Something went wrong while restoring purchases.",
            "Please try again later, or contact support if it keeps happening.",
        ),
    }
}
