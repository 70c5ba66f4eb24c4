use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DbErr, TransactionTrait};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::db::DbConn;
use crate::models::customer_status::{self, DonationStatus, NewStatusRecord};
use crate::services::clock::now_to_second;
use crate::services::onboarding::{map_choice, Route};

/// Insert one status record in its own transaction.
///
/// The transaction is rolled back before the insert error is returned, so a
/// failed call leaves nothing behind.
pub async fn insert_status_record(
    db: &DbConn,
    record: NewStatusRecord,
    default_now: impl FnOnce() -> DateTime<Utc>,
) -> Result<customer_status::Model, DbErr> {
    let active = record.into_active_model(default_now);

    let txn = db.begin().await?;
    match active.insert(&txn).await {
        Ok(model) => {
            txn.commit().await?;
            Ok(model)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback after failed insert also failed");
            }
            Err(e)
        }
    }
}

/// Running totals of completion submissions.
///
/// Failures never reach the client, so these counters (and the matching log
/// events) are the only place they show up.
#[derive(Clone, Default)]
pub struct CompletionStats {
    persisted: Arc<AtomicU64>,
    failed: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionStatsSnapshot {
    pub persisted: u64,
    pub failed: u64,
}

impl CompletionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_persisted(&self) {
        self.persisted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CompletionStatsSnapshot {
        CompletionStatsSnapshot {
            persisted: self.persisted.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Result of a completion submission
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub status: DonationStatus,
    /// Id of the committed row
    pub record_id: Option<i32>,
    /// Cause of the failure when nothing was committed
    pub error: Option<String>,
}

impl CompletionOutcome {
    pub fn is_persisted(&self) -> bool {
        self.record_id.is_some()
    }

    /// Where the client goes next; the same whether or not the write succeeded
    pub fn redirect(&self) -> Route {
        Route::Complete
    }
}

/// Final step of the wizard: map the choice and persist it
#[derive(Clone)]
pub struct CompletionService {
    db: DbConn,
    stats: CompletionStats,
}

impl CompletionService {
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            stats: CompletionStats::new(),
        }
    }

    pub fn stats(&self) -> &CompletionStats {
        &self.stats
    }

    pub async fn submit_completion(&self, choice: Option<&str>) -> CompletionOutcome {
        self.submit_completion_at(choice, None).await
    }

    /// Submit with an explicit timestamp; `None` falls back to the clock
    pub async fn submit_completion_at(
        &self,
        choice: Option<&str>,
        timestamp: Option<DateTime<Utc>>,
    ) -> CompletionOutcome {
        let status = map_choice(choice);

        let mut record = NewStatusRecord::placeholder(status);
        record.timestamp = timestamp;

        match insert_status_record(&self.db, record, now_to_second).await {
            Ok(model) => {
                self.stats.record_persisted();
                tracing::info!(
                    status = %status,
                    record_id = model.id,
                    "Donation status saved"
                );
                CompletionOutcome {
                    status,
                    record_id: Some(model.id),
                    error: None,
                }
            }
            Err(e) => {
                self.stats.record_failed();
                tracing::error!(
                    status = %status,
                    error = %e,
                    "Failed to save donation status, transaction rolled back"
                );
                CompletionOutcome {
                    status,
                    record_id: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
