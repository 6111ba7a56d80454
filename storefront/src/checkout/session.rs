//! Pending external payment record
//!
//! Written right before the shopper leaves for the payment page and read
//! back when they return, so an approved payment turns into exactly one
//! order even across restarts or repeated return visits.

use super::totals::Totals;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::models::{CartItem, OrderDraft, PaymentMethod};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSessionState {
    Initiated,
    ReturnedSuccess,
    ReturnedPending,
    ReturnedFailure,
    /// The order exists; further approved returns are ignored
    Finalized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: Uuid,
    pub draft: OrderDraft,
    pub draft_hash: String,
    pub cart: Vec<CartItem>,
    pub payment_method: Option<PaymentMethod>,
    pub totals: Totals,
    pub preference_id: Option<String>,
    pub payment_id: Option<String>,
    pub order_id: Option<i64>,
    pub state: PaymentSessionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// sha256 hex digest of the draft JSON
pub fn draft_hash(draft: &OrderDraft) -> Result<String, SessionStoreError> {
    let bytes = serde_json::to_vec(draft)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

impl PaymentSession {
    pub fn new(
        draft: OrderDraft,
        cart: Vec<CartItem>,
        payment_method: Option<PaymentMethod>,
        totals: Totals,
        preference_id: Option<String>,
    ) -> Result<Self, SessionStoreError> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            draft_hash: draft_hash(&draft)?,
            draft,
            cart,
            payment_method,
            totals,
            preference_id,
            payment_id: None,
            order_id: None,
            state: PaymentSessionState::Initiated,
            created_at: now,
            updated_at: now,
        })
    }

    /// The stored draft is the one that was hashed at creation
    pub fn draft_intact(&self) -> bool {
        draft_hash(&self.draft).is_ok_and(|h| h == self.draft_hash)
    }

    pub fn is_finalized(&self) -> bool {
        self.state == PaymentSessionState::Finalized
    }

    pub fn mark(&mut self, state: PaymentSessionState) {
        tracing::debug!(session = %self.id, from = ?self.state, to = ?state, "Payment session state");
        self.state = state;
        self.updated_at = Utc::now();
    }

    /// Record the ids the provider sent back
    pub fn record_return(&mut self, payment_id: Option<&str>, preference_id: Option<&str>) {
        if let Some(id) = payment_id {
            self.payment_id = Some(id.to_string());
        }
        if self.preference_id.is_none() {
            self.preference_id = preference_id.map(str::to_string);
        }
    }
}

pub trait PaymentSessionStore: Send + Sync {
    fn load(&self) -> Result<Option<PaymentSession>, SessionStoreError>;
    fn save(&self, session: &PaymentSession) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FilePaymentSessionStore {
    path: PathBuf,
}

impl FilePaymentSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl PaymentSessionStore for FilePaymentSessionStore {
    fn load(&self) -> Result<Option<PaymentSession>, SessionStoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, session: &PaymentSession) -> Result<(), SessionStoreError> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        // write-then-rename: readers never see a partial record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryPaymentSessionStore {
    session: Mutex<Option<PaymentSession>>,
}

impl MemoryPaymentSessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentSessionStore for MemoryPaymentSessionStore {
    fn load(&self) -> Result<Option<PaymentSession>, SessionStoreError> {
        Ok(self.session.lock().clone())
    }

    fn save(&self, session: &PaymentSession) -> Result<(), SessionStoreError> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.session.lock() = None;
        Ok(())
    }
}
