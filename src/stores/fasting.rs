// ABOUTME: Fasting tracker for the running session and completed fasting history
// ABOUTME: Computes elapsed whole hours and the consecutive-day fasting streak
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use crate::errors::{AppError, AppResult};
use crate::storage::LocalStorage;
use chrono::{DateTime, Duration, Utc};
use ketoflow_core::constants::storage_keys;
use ketoflow_core::models::{FastingProtocol, FastingSession, FastingSessionUpdate, FastingStage};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Running fast and completed fasting history
///
/// Every clock-dependent operation has an `_at` form taking the current
/// instant, with a convenience wrapper that uses `Utc::now()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FastingTracker {
    current_session: Option<FastingSession>,
    fasting_history: Vec<FastingSession>,
}

impl FastingTracker {
    /// Tracker with no sessions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Running session, if any
    #[must_use]
    pub const fn current_session(&self) -> Option<&FastingSession> {
        self.current_session.as_ref()
    }

    /// Completed sessions, oldest first
    #[must_use]
    pub fn history(&self) -> &[FastingSession] {
        &self.fasting_history
    }

    /// Start a fast at `now` planned to last `duration_hours`
    ///
    /// A running session is replaced, not ended.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the duration is negative or not finite
    pub fn start_fasting_at(
        &mut self,
        protocol: FastingProtocol,
        duration_hours: f64,
        now: DateTime<Utc>,
    ) -> AppResult<&FastingSession> {
        if !duration_hours.is_finite() || duration_hours < 0.0 {
            return Err(AppError::invalid_input(format!(
                "Fasting duration must be a non-negative number of hours, got {duration_hours}"
            )));
        }
        // Bounded by the finiteness check; absurd durations saturate
        let planned = Duration::milliseconds((duration_hours * 3_600_000.0).round() as i64);
        let planned_end_time = now
            .checked_add_signed(planned)
            .ok_or_else(|| AppError::invalid_input("Fasting duration is too long"))?;

        if let Some(previous) = &self.current_session {
            debug!(session_id = %previous.id, "Replacing running fasting session");
        }
        let session = self.current_session.insert(FastingSession {
            id: Uuid::new_v4().to_string(),
            start_time: now,
            planned_end_time,
            actual_end_time: None,
            protocol,
            current_stage: FastingStage::Digestion,
        });
        Ok(session)
    }

    /// Start a fast now
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the duration is negative or not finite
    pub fn start_fasting(
        &mut self,
        protocol: FastingProtocol,
        duration_hours: f64,
    ) -> AppResult<&FastingSession> {
        self.start_fasting_at(protocol, duration_hours, Utc::now())
    }

    /// End the running fast at `now` and move it into history
    ///
    /// Returns the completed session, or `None` when no fast was running.
    pub fn end_fasting_at(&mut self, now: DateTime<Utc>) -> Option<&FastingSession> {
        let mut session = self.current_session.take()?;
        session.actual_end_time = Some(now);
        self.fasting_history.push(session);
        self.fasting_history.last()
    }

    /// End the running fast now
    pub fn end_fasting(&mut self) -> Option<&FastingSession> {
        self.end_fasting_at(Utc::now())
    }

    /// Apply an update to the running session; false when none is running
    pub fn update_current_session(&mut self, update: &FastingSessionUpdate) -> bool {
        self.current_session.as_mut().is_some_and(|session| {
            update.apply_to(session);
            true
        })
    }

    /// Whole hours since the running fast started, rounded down; 0 without one
    #[must_use]
    pub fn current_duration_hours_at(&self, now: DateTime<Utc>) -> i64 {
        self.current_session.as_ref().map_or(0, |session| {
            (now - session.start_time)
                .num_milliseconds()
                .div_euclid(MILLIS_PER_HOUR)
        })
    }

    /// Whole hours since the running fast started
    #[must_use]
    pub fn current_duration_hours(&self) -> i64 {
        self.current_duration_hours_at(Utc::now())
    }

    /// Consecutive days, counting back from `now`, with a completed fast
    ///
    /// Walks history newest first. A session ended `n` whole days before
    /// `now` extends a streak of length `n`; the first session that does not
    /// stops the count. Sessions without an end time are skipped.
    #[must_use]
    pub fn fasting_streak_at(&self, now: DateTime<Utc>) -> u32 {
        let mut streak: u32 = 0;
        for end in self
            .fasting_history
            .iter()
            .rev()
            .filter_map(|session| session.actual_end_time)
        {
            let days_ago = (now - end).num_milliseconds().div_euclid(MILLIS_PER_DAY);
            if days_ago == i64::from(streak) {
                streak += 1;
            } else {
                break;
            }
        }
        streak
    }

    /// Current fasting streak
    #[must_use]
    pub fn fasting_streak(&self) -> u32 {
        self.fasting_streak_at(Utc::now())
    }

    /// Save the tracker under the fasting storage key
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails
    pub async fn persist(&self, storage: &LocalStorage) -> AppResult<()> {
        storage.set_item(storage_keys::FASTING, self).await
    }

    /// Load a saved tracker, or an empty one if nothing was stored
    ///
    /// # Errors
    ///
    /// Returns an error if the stored tracker cannot be read or decoded
    pub async fn load(storage: &LocalStorage) -> AppResult<Self> {
        Ok(storage
            .get_item(storage_keys::FASTING)
            .await?
            .unwrap_or_default())
    }
}
