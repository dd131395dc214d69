//! Shared test helpers for receipt verification tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signer, SigningKey};
use purchasekit_keys::KeyManager;
use purchasekit_secure::MemorySecureStore;
use purchasekit_types::Platform;
use purchasekit_verify::{ReceiptVerifier, VerifierConfig};
use std::sync::Arc;

pub const APP_ID: &str = "com.example.app";

/// Returns a deterministic Ed25519 key pair from a fixed seed, with the
/// public half base64url-encoded the way the key manager stores it.
pub fn test_keypair() -> (SigningKey, String) {
    let seed: [u8; 32] = [
        7, 1, 7, 2, 7, 3, 7, 4, 7, 5, 7, 6, 7, 7, 7, 8, 7, 9, 7, 10, 7, 11, 7, 12,
        7, 13, 7, 14, 7, 15, 7, 16,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let pub_b64 = URL_SAFE_NO_PAD.encode(signing_key.verifying_key().to_bytes());
    (signing_key, pub_b64)
}

/// Signs a payload string, returning the detached base64url signature.
pub fn sign_payload(signing_key: &SigningKey, payload: &str) -> String {
    let signature = signing_key.sign(payload.as_bytes());
    URL_SAFE_NO_PAD.encode(signature.to_bytes())
}

/// A well-formed Android receipt payload for `APP_ID`.
pub fn android_payload(token: &str, product_id: &str) -> String {
    format!(
        r#"{{"productId":"{product_id}","purchaseTime":1700000000000,"purchaseToken":"{token}","packageName":"{APP_ID}"}}"#
    )
}

/// A well-formed iOS receipt payload for `APP_ID`.
pub fn ios_payload(transaction_id: &str, product_id: &str) -> String {
    format!(
        r#"{{"productId":"{product_id}","purchaseTime":1700000000000,"transactionId":"{transaction_id}","bundleId":"{APP_ID}"}}"#
    )
}

/// Builds a verifier whose key manager already holds `pub_b64` for both
/// platforms.
pub async fn verifier_with_key(pub_b64: &str, config: VerifierConfig) -> ReceiptVerifier {
    let keys = KeyManager::new(Arc::new(MemorySecureStore::new()));
    keys.cache_key(Platform::Ios, pub_b64).await.unwrap();
    keys.cache_key(Platform::Android, pub_b64).await.unwrap();
    ReceiptVerifier::new(keys, config)
}
