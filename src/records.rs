//! Best score and best survival time
//!
//! Compares finished runs against the stored records. Where the records are
//! kept (LocalStorage, a file) is the embedding layer's business; this type
//! only round-trips through JSON.

use serde::{Deserialize, Serialize};

use crate::sim::RunSummary;

/// Which records a finished run improved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub new_best_score: bool,
    pub new_best_time: bool,
}

impl RecordUpdate {
    pub fn any(&self) -> bool {
        self.new_best_score || self.new_best_time
    }
}

/// Best score and longest run so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BestRecords {
    pub best_score: u64,
    pub best_time_secs: f32,
}

impl BestRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the records
    pub fn submit(&mut self, summary: &RunSummary) -> RecordUpdate {
        let mut update = RecordUpdate::default();
        if summary.final_score > self.best_score {
            self.best_score = summary.final_score;
            update.new_best_score = true;
        }
        if summary.elapsed_secs > self.best_time_secs {
            self.best_time_secs = summary.elapsed_secs;
            update.new_best_time = true;
        }
        if update.any() {
            log::info!(
                "New records: score={} time={:.1}s",
                self.best_score,
                self.best_time_secs
            );
        }
        update
    }

    /// Parse stored records, starting fresh if they are missing or corrupt
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<BestRecords>(json) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Discarding unreadable records: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
