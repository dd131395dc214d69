//! Durable purchase persistence over SQLite.

use crate::error::{StoreError, StoreResult};
use purchasekit_types::{NewPurchase, Purchase};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Schema applied on every open. The feature table cascades with its
/// purchase, so callers never clean up orphan feature rows.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS purchases (
    transaction_id   TEXT PRIMARY KEY,
    product_id       TEXT NOT NULL,
    purchased_at     INTEGER NOT NULL,
    price            REAL NOT NULL,
    currency_code    TEXT NOT NULL,
    is_verified      INTEGER NOT NULL DEFAULT 0,
    verification_key TEXT,
    is_synced        INTEGER NOT NULL DEFAULT 0,
    synced_at        INTEGER
);

CREATE TABLE IF NOT EXISTS purchase_features (
    transaction_id TEXT NOT NULL REFERENCES purchases(transaction_id) ON DELETE CASCADE,
    feature_id     TEXT NOT NULL,
    position       INTEGER NOT NULL,
    PRIMARY KEY (transaction_id, feature_id)
);

CREATE INDEX IF NOT EXISTS idx_purchases_verified ON purchases(is_verified);
";

/// Durable CRUD over purchase records and their unlocked-feature
/// associations.
///
/// Purchases are created once, mutated only through the two narrow
/// status setters, and destroyed only through a hard cascading delete.
/// The store holds no state beyond the connection it wraps; concurrent
/// status updates are last-write-wins single statements.
#[derive(Clone)]
pub struct PurchaseStore {
    conn: Arc<Mutex<Connection>>,
}

impl PurchaseStore {
    /// Opens (or creates) the purchase database at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] if the database cannot be
    /// opened or the schema cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    /// Opens an in-memory store, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_millis(5_000))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Records a new purchase together with its unlocked features, in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidInput`] for blank ids, blank currency,
    ///   non-finite or negative price, or features on an unverified
    ///   record.
    /// - [`StoreError::Database`] with `retryable: false` on a
    ///   duplicate `transaction_id`.
    pub async fn record_purchase(&self, input: NewPurchase) -> StoreResult<Purchase> {
        validate_id(&input.transaction_id)?;
        if input.product_id.trim().is_empty() {
            return Err(StoreError::InvalidInput("product_id is empty".to_string()));
        }
        if input.currency_code.trim().is_empty() {
            return Err(StoreError::InvalidInput("currency_code is empty".to_string()));
        }
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(StoreError::InvalidInput("price must be a non-negative number".to_string()));
        }
        if input.purchased_at <= 0 {
            return Err(StoreError::InvalidInput("purchased_at must be positive".to_string()));
        }
        if !input.is_verified && !input.unlocked_features.is_empty() {
            return Err(StoreError::InvalidInput(
                "an unverified purchase cannot unlock features".to_string(),
            ));
        }
        if input.unlocked_features.iter().any(|f| f.trim().is_empty()) {
            return Err(StoreError::InvalidInput("feature id is empty".to_string()));
        }

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO purchases (transaction_id, product_id, purchased_at, price,
                                    currency_code, is_verified, verification_key,
                                    is_synced, synced_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, NULL)",
            params![
                input.transaction_id,
                input.product_id,
                input.purchased_at,
                input.price,
                input.currency_code,
                input.is_verified,
                input.verification_key,
            ],
        )?;
        for (position, feature_id) in input.unlocked_features.iter().enumerate() {
            tx.execute(
                "INSERT INTO purchase_features (transaction_id, feature_id, position)
                 VALUES (?1, ?2, ?3)",
                params![input.transaction_id, feature_id, position as i64],
            )?;
        }
        tx.commit()?;

        debug!(
            transaction_id = %input.transaction_id,
            verified = input.is_verified,
            "purchase recorded"
        );

        Ok(Purchase {
            transaction_id: input.transaction_id,
            product_id: input.product_id,
            purchased_at: input.purchased_at,
            price: input.price,
            currency_code: input.currency_code,
            is_verified: input.is_verified,
            verification_key: input.verification_key,
            is_synced: false,
            synced_at: None,
            unlocked_features: input.unlocked_features,
        })
    }

    /// Fetches a purchase by transaction id, regardless of verification
    /// state. Absence is a normal query outcome, not an error;
    /// verification filtering is the feature-gating caller's job.
    pub async fn get_purchase(&self, transaction_id: &str) -> StoreResult<Option<Purchase>> {
        validate_id(transaction_id)?;

        let conn = self.conn.lock().await;
        let row = conn
            .query_row(
                "SELECT transaction_id, product_id, purchased_at, price, currency_code,
                        is_verified, verification_key, is_synced, synced_at
                 FROM purchases WHERE transaction_id = ?1",
                params![transaction_id],
                purchase_from_row,
            )
            .optional()?;

        match row {
            Some(mut purchase) => {
                purchase.unlocked_features = load_features(&conn, transaction_id)?;
                Ok(Some(purchase))
            }
            None => Ok(None),
        }
    }

    /// Returns all verified purchases, oldest first. An empty result is
    /// success.
    pub async fn get_all_purchases(&self) -> StoreResult<Vec<Purchase>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT transaction_id, product_id, purchased_at, price, currency_code,
                    is_verified, verification_key, is_synced, synced_at
             FROM purchases WHERE is_verified = 1 ORDER BY purchased_at, transaction_id",
        )?;
        let rows = stmt.query_map([], purchase_from_row)?;

        let mut purchases = Vec::new();
        for row in rows {
            let mut purchase = row?;
            purchase.unlocked_features = load_features(&conn, &purchase.transaction_id)?;
            purchases.push(purchase);
        }
        Ok(purchases)
    }

    /// Sets the verification flag. Idempotent: setting the same value
    /// twice leaves the record identical to a single call. Touches only
    /// `is_verified`.
    pub async fn update_verification_status(
        &self,
        transaction_id: &str,
        is_verified: bool,
    ) -> StoreResult<()> {
        validate_id(transaction_id)?;

        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "UPDATE purchases SET is_verified = ?2 WHERE transaction_id = ?1",
            params![transaction_id, is_verified],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(transaction_id.to_string()));
        }
        debug!(transaction_id, is_verified, "verification status updated");
        Ok(())
    }

    /// Sets the sync flag. The sync timestamp is stamped (or cleared)
    /// in the same statement as the flag, so `is_synced = true` with a
    /// missing `synced_at` is never observable, even transiently.
    pub async fn update_sync_status(
        &self,
        transaction_id: &str,
        is_synced: bool,
    ) -> StoreResult<()> {
        validate_id(transaction_id)?;

        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "UPDATE purchases
             SET is_synced = ?2,
                 synced_at = CASE WHEN ?2 THEN ?3 ELSE NULL END
             WHERE transaction_id = ?1",
            params![transaction_id, is_synced, now],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(transaction_id.to_string()));
        }
        debug!(transaction_id, is_synced, "sync status updated");
        Ok(())
    }

    /// Hard, irreversible delete. Feature associations cascade in the
    /// same statement; ids match case-sensitively with no
    /// normalization.
    pub async fn delete_purchase(&self, transaction_id: &str) -> StoreResult<()> {
        validate_id(transaction_id)?;

        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "DELETE FROM purchases WHERE transaction_id = ?1",
            params![transaction_id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(transaction_id.to_string()));
        }
        debug!(transaction_id, "purchase deleted");
        Ok(())
    }

    /// Counts feature rows for a transaction. Exposed for cascade
    /// verification in tests and privacy-erasure audits.
    pub async fn feature_count(&self, transaction_id: &str) -> StoreResult<i64> {
        validate_id(transaction_id)?;

        let conn = self.conn.lock().await;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM purchase_features WHERE transaction_id = ?1",
            params![transaction_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn validate_id(transaction_id: &str) -> StoreResult<()> {
    if transaction_id.trim().is_empty() {
        return Err(StoreError::InvalidInput("transaction_id is empty".to_string()));
    }
    Ok(())
}

fn purchase_from_row(row: &Row<'_>) -> rusqlite::Result<Purchase> {
    Ok(Purchase {
        transaction_id: row.get(0)?,
        product_id: row.get(1)?,
        purchased_at: row.get(2)?,
        price: row.get(3)?,
        currency_code: row.get(4)?,
        is_verified: row.get(5)?,
        verification_key: row.get(6)?,
        is_synced: row.get(7)?,
        synced_at: row.get(8)?,
        unlocked_features: Vec::new(),
    })
}

fn load_features(conn: &Connection, transaction_id: &str) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT feature_id FROM purchase_features
         WHERE transaction_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![transaction_id], |row| row.get(0))?;
    let mut features = Vec::new();
    for feature in rows {
        features.push(feature?);
    }
    Ok(features)
}
