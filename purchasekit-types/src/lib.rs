//! Core type definitions for PurchaseKit.
//!
//! This crate defines the fundamental, component-agnostic types used
//! throughout the purchase-verification core:
//! - Billing platform identifiers (iOS / Android)
//! - Purchase records and their creation inputs
//! - Verification provenance metadata
//! - The canonical purchase error taxonomy with fixed retryability
//!
//! All storage-specific and crypto-specific types belong in their
//! respective crates, not here.

mod error;
mod metadata;
mod platform;
mod purchase;

pub use error::{InvalidReason, PurchaseError, PurchaseErrorCode};
pub use metadata::VerificationMetadata;
pub use platform::{Platform, UnknownPlatform};
pub use purchase::{NewPurchase, Purchase};
