// ABOUTME: Fasting session record with protocol and metabolic stage
// ABOUTME: Sessions move from current to history when the fast ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fasting schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FastingProtocol {
    /// 16 hours fasting, 8 hour eating window
    #[serde(rename = "16:8")]
    SixteenEight,
    /// 18 hours fasting, 6 hour eating window
    #[serde(rename = "18:6")]
    EighteenSix,
    /// One meal a day
    #[serde(rename = "OMAD")]
    Omad,
    /// User-chosen duration
    #[serde(rename = "custom")]
    Custom,
}

/// Metabolic stage shown for a running fast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FastingStage {
    /// Still digesting the last meal
    #[default]
    Digestion,
    /// Burning stored fat
    FatBurning,
    /// Ketone production
    Ketosis,
    /// Cellular cleanup
    Autophagy,
}

/// One fast, running or completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingSession {
    /// Session identifier
    pub id: String,
    /// When the fast started
    pub start_time: DateTime<Utc>,
    /// When the fast is planned to end
    pub planned_end_time: DateTime<Utc>,
    /// When the fast actually ended, once it has
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<DateTime<Utc>>,
    /// Schedule
    pub protocol: FastingProtocol,
    /// Current stage
    pub current_stage: FastingStage,
}

/// Partial update of the running session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingSessionUpdate {
    /// New planned end
    pub planned_end_time: Option<DateTime<Utc>>,
    /// New protocol
    pub protocol: Option<FastingProtocol>,
    /// New stage
    pub current_stage: Option<FastingStage>,
}

impl FastingSessionUpdate {
    /// Apply the set fields to a session
    pub fn apply_to(&self, session: &mut FastingSession) {
        if let Some(end) = self.planned_end_time {
            session.planned_end_time = end;
        }
        if let Some(protocol) = self.protocol {
            session.protocol = protocol;
        }
        if let Some(stage) = self.current_stage {
            session.current_stage = stage;
        }
    }
}
