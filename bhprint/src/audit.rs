// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Audit events recording the outcome of card generation runs.
//!
//! The pipeline emits exactly one event per invocation, success or failure;
//! the event identifiers come from the fixed tables below.

use serde::{Deserialize, Serialize};

/// API name under which card generation events are audited.
pub const API_NAME: &str = "AUDIT";

const SUCCESS_DESCRIPTION: &str = "Card artifacts generated and sent to print stage";
const SUCCESS_EVENT_ID: &str = "RPR_402";
const SUCCESS_EVENT_NAME: &str = "UPDATE";
const SUCCESS_EVENT_TYPE: &str = "BUSINESS";

const FAILURE_DESCRIPTION: &str = "Card artifacts were not generated for the uin card template";
const FAILURE_EVENT_ID: &str = "RPR_405";
const FAILURE_EVENT_NAME: &str = "EXCEPTION";
const FAILURE_EVENT_TYPE: &str = "SYSTEM";

/// One auditable event, delivered fire-and-forget to the configured
/// [`AuditSink`][crate::traits::AuditSink].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Human-readable outcome description.
    pub description: String,
    /// Platform event identifier.
    pub event_id: String,
    /// Platform event name.
    pub event_name: String,
    /// Platform event type.
    pub event_type: String,
    /// The subject the run was for, when it was resolved before the outcome.
    pub subject_id: Option<String>,
    /// Always [`API_NAME`].
    pub api_name: String,
}

impl AuditEvent {
    /// Builds the outcome event for one pipeline invocation from the fixed
    /// success/failure lookup tables.
    pub fn outcome(success: bool, subject_id: Option<&str>) -> Self {
        let (description, event_id, event_name, event_type) = if success {
            (
                SUCCESS_DESCRIPTION,
                SUCCESS_EVENT_ID,
                SUCCESS_EVENT_NAME,
                SUCCESS_EVENT_TYPE,
            )
        } else {
            (
                FAILURE_DESCRIPTION,
                FAILURE_EVENT_ID,
                FAILURE_EVENT_NAME,
                FAILURE_EVENT_TYPE,
            )
        };

        Self {
            description: description.to_owned(),
            event_id: event_id.to_owned(),
            event_name: event_name.to_owned(),
            event_type: event_type.to_owned(),
            subject_id: subject_id.map(str::to_owned),
            api_name: API_NAME.to_owned(),
        }
    }
}
