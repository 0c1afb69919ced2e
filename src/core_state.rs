//! Shared application state for the REST layer.
//!
//! `CoreState` is built once at startup and wrapped in `Arc`. It owns the
//! loaded configuration, the analysis dispatcher and the set of patients
//! with an analysis currently running.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use uuid::Uuid;

use crate::analysis::AnalysisDispatcher;
use crate::config::AppConfig;
use crate::db;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    pub config: AppConfig,
    dispatcher: Arc<AnalysisDispatcher>,
    /// Patients with an analysis in progress. At most one per patient.
    in_flight: Mutex<HashSet<Uuid>>,
}

impl CoreState {
    /// Build state from configuration, selecting the analysis backend.
    pub fn new(config: AppConfig) -> Self {
        let dispatcher = AnalysisDispatcher::from_config(&config.analysis);
        Self::with_dispatcher(config, dispatcher)
    }

    pub fn with_dispatcher(config: AppConfig, dispatcher: AnalysisDispatcher) -> Self {
        tracing::info!(
            db_path = %config.db_path.display(),
            backend = %dispatcher.backend_kind(),
            "Core state initialized"
        );
        Self {
            config,
            dispatcher: Arc::new(dispatcher),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.config.db_path
    }

    /// Open a connection to the clinic database (migrations applied).
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        Ok(db::open_database(&self.config.db_path)?)
    }

    pub fn dispatcher(&self) -> Arc<AnalysisDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Mark an analysis as running for `patient_id`.
    ///
    /// Returns `Ok(None)` if one is already running for that patient. The
    /// returned guard clears the mark when dropped.
    pub fn try_begin_analysis(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<AnalysisGuard<'_>>, CoreError> {
        let mut running = self.in_flight.lock().map_err(|_| CoreError::LockPoisoned)?;
        if !running.insert(patient_id) {
            return Ok(None);
        }
        Ok(Some(AnalysisGuard {
            state: self,
            patient_id,
        }))
    }

    pub fn is_analyzing(&self, patient_id: &Uuid) -> bool {
        self.in_flight
            .lock()
            .map(|running| running.contains(patient_id))
            .unwrap_or(false)
    }

    fn finish_analysis(&self, patient_id: &Uuid) {
        if let Ok(mut running) = self.in_flight.lock() {
            running.remove(patient_id);
        }
    }
}

// ═══════════════════════════════════════════════════════════
// AnalysisGuard: RAII in-flight marker
// ═══════════════════════════════════════════════════════════

/// Held for the duration of one patient's analysis.
pub struct AnalysisGuard<'a> {
    state: &'a CoreState,
    patient_id: Uuid,
}

impl Drop for AnalysisGuard<'_> {
    fn drop(&mut self) {
        self.state.finish_analysis(&self.patient_id);
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
    #[error("Background task failed: {0}")]
    Task(String),
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
