//! SQLite purchase persistence for PurchaseKit.
//!
//! One row per platform transaction, with an ordered feature-association
//! table that cascades on delete. Verification gating reads go through
//! [`PurchaseStore::get_all_purchases`], which returns verified rows
//! only; [`PurchaseStore::get_purchase`] returns any row and leaves the
//! filtering to the caller.

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::PurchaseStore;
