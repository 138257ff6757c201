//! # Ingestion Diagnostics
//!
//! Row-level and member-level problems are recovered, not fatal: a partial
//! structural model is preferable to a hard failure. This module makes
//! those recoveries observable. Every skipped row or member produces one
//! [`Diagnostic`] that is kept on the snapshot and logged via `log::warn!`,
//! so "the model looks thin" is always explainable after the fact.

use serde::{Deserialize, Serialize};

use crate::ids::{FrameId, NodeId};

/// One recovered problem encountered during ingestion or discretization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A data row was dropped (missing fields, non-numeric id, wrong type)
    SkippedRow {
        sheet: String,
        row: usize,
        reason: String,
    },

    /// A section-assignment row repeated an id already collected
    DuplicateSection { name: String },

    /// A member whose two endpoints coincide; cannot be discretized
    DegenerateMember { frame: FrameId },

    /// A member referencing a node id absent from the node map
    MissingEndpoint { frame: FrameId, node: NodeId },

    /// A member with no entry in the combination force index
    MissingForces { frame: FrameId },

    /// A member reporting fewer than two force stations
    TooFewStations { frame: FrameId, count: usize },

    /// A load case whose station set differs from the member's first case
    DivergentStations { frame: FrameId, case: String },

    /// A station label that does not parse as a distance
    UnparsableStation { frame: FrameId, station: String },
}

impl Diagnostic {
    /// Human-readable message, also used as the log line
    pub fn message(&self) -> String {
        match self {
            Diagnostic::SkippedRow { sheet, row, reason } => {
                format!("sheet '{}' row {}: skipped ({})", sheet, row, reason)
            }
            Diagnostic::DuplicateSection { name } => {
                format!("section '{}' has duplicate assignment rows; ignoring repeats", name)
            }
            Diagnostic::DegenerateMember { frame } => {
                format!("member {} has zero length; skipping discretization", frame)
            }
            Diagnostic::MissingEndpoint { frame, node } => {
                format!("member {} references missing node {}; skipping", frame, node)
            }
            Diagnostic::MissingForces { frame } => {
                format!("member {} has no combination forces; skipping", frame)
            }
            Diagnostic::TooFewStations { frame, count } => {
                format!("member {} has {} station(s); need at least 2", frame, count)
            }
            Diagnostic::DivergentStations { frame, case } => format!(
                "member {} case '{}' reports a different station set; skipping member",
                frame, case
            ),
            Diagnostic::UnparsableStation { frame, station } => format!(
                "member {} station label '{}' is not a distance; skipping member",
                frame, station
            ),
        }
    }

    /// Record this diagnostic: push onto the list and emit a warning
    pub fn record(self, sink: &mut Vec<Diagnostic>) {
        log::warn!("{}", self.message());
        sink.push(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_subject() {
        let d = Diagnostic::DegenerateMember { frame: FrameId(31) };
        assert!(d.message().contains("31"));

        let d = Diagnostic::SkippedRow {
            sheet: "Beam Object Connectivity".to_string(),
            row: 4,
            reason: "non-numeric unique name".to_string(),
        };
        assert!(d.message().contains("row 4"));
    }

    #[test]
    fn test_serialization_tags_by_kind() {
        let d = Diagnostic::MissingForces { frame: FrameId(9) };
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("missing_forces"));
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
