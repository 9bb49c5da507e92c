//! Batch relocation of pending files.
//!
//! Each object moves in two phases, copy then delete, and the pair is not
//! transactional. A failed copy leaves the source untouched; a failed delete
//! leaves the object in both places (`MovePhase::Copied`). The first failure
//! aborts the call, batches completed before it stay moved, and nothing is
//! rolled back.

use tracing::{error, info};

use crate::adapters::object_store::ObjectStore;
use crate::error::MoveError;
use crate::runtime::batching::{plan_batches, BatchPlan};
use crate::services::lister::list_files;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    /// Copy has not succeeded; the source is untouched.
    Pending,
    /// Present at both source and destination.
    Copied,
    Moved,
}

impl MovePhase {
    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Copied => "copied",
            Self::Moved => "moved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub source_key: String,
    pub destination_key: String,
    pub phase: MovePhase,
    pub error: Option<String>,
}

impl MoveOutcome {
    fn started(source_key: &str, destination_key: &str) -> Self {
        Self {
            source_key: source_key.to_string(),
            destination_key: destination_key.to_string(),
            phase: MovePhase::Pending,
            error: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.phase == MovePhase::Moved
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}` -> `{}` stopped at {}",
            self.source_key,
            self.destination_key,
            self.phase.as_str()
        )?;
        if let Some(error) = &self.error {
            write!(f, ": {error}")?;
        }
        Ok(())
    }
}

/// Notified as objects and batches move. Resume or audit logic can hook in
/// here; every method defaults to a no-op.
pub trait MoveObserver {
    fn object_copied(&mut self, _outcome: &MoveOutcome) {}

    fn object_moved(&mut self, _outcome: &MoveOutcome) {}

    fn batch_completed(&mut self, _batch: &BatchPlan) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMoveObserver;

impl MoveObserver for NoopMoveObserver {}

/// Returns the destination prefix of each batch, in sequence order.
pub fn move_files_in_batches(
    store: &impl ObjectStore,
    bucket: &str,
    source_prefix: &str,
    dest_prefix: &str,
    batch_size: usize,
) -> Result<Vec<String>, MoveError> {
    move_files_in_batches_with_observer(
        store,
        bucket,
        source_prefix,
        dest_prefix,
        batch_size,
        &mut NoopMoveObserver,
    )
}

pub fn move_files_in_batches_with_observer(
    store: &impl ObjectStore,
    bucket: &str,
    source_prefix: &str,
    dest_prefix: &str,
    batch_size: usize,
    observer: &mut dyn MoveObserver,
) -> Result<Vec<String>, MoveError> {
    let files = list_files(store, bucket, source_prefix)?;
    let plans = plan_batches(&files, batch_size, dest_prefix)?;
    info!(
        bucket,
        files = files.len(),
        source_prefix,
        dest_prefix,
        batch_size,
        batches = plans.len(),
        "moving files in batches"
    );

    let mut completed_batches = Vec::with_capacity(plans.len());
    for plan in &plans {
        for source_key in &plan.keys {
            let destination_key = plan.destination_key(source_key);
            let outcome = move_object(store, bucket, source_key, &destination_key, observer);
            if !outcome.succeeded() {
                error!(
                    bucket,
                    batch = %plan.label,
                    source_key = %outcome.source_key,
                    destination_key = %outcome.destination_key,
                    phase = outcome.phase.as_str(),
                    error = outcome.error.as_deref().unwrap_or_default(),
                    completed_batches = completed_batches.len(),
                    "move aborted"
                );
                return Err(MoveError::Object {
                    batch_prefix: plan.prefix.clone(),
                    outcome,
                    completed_batches,
                });
            }
        }

        info!(
            batch = %plan.label,
            files = plan.keys.len(),
            batch_prefix = %plan.prefix,
            "moved batch"
        );
        observer.batch_completed(plan);
        completed_batches.push(plan.prefix.clone());
    }

    Ok(completed_batches)
}

/// Copy, then delete the source. Stops at the first failing phase.
pub fn move_object(
    store: &impl ObjectStore,
    bucket: &str,
    source_key: &str,
    destination_key: &str,
    observer: &mut dyn MoveObserver,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::started(source_key, destination_key);

    if let Err(message) = store.copy_object(bucket, source_key, destination_key) {
        outcome.error = Some(message);
        return outcome;
    }
    outcome.phase = MovePhase::Copied;
    observer.object_copied(&outcome);

    if let Err(message) = store.delete_object(bucket, source_key) {
        outcome.error = Some(message);
        return outcome;
    }
    outcome.phase = MovePhase::Moved;
    observer.object_moved(&outcome);

    outcome
}
