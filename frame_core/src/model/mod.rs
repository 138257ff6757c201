//! # Structural Model Graph
//!
//! Converts the joint, connectivity, and section-assignment tables of an
//! export into the node/member/section graph. Extraction here is
//! best-effort by design: a row with partial or invalid data is dropped
//! and recorded as a [`Diagnostic`], never fatal. A sheet with zero usable
//! rows simply produces an empty map.
//!
//! # Overview
//!
//! - [`Node`] - a joint with global coordinates, immutable once built
//! - [`Frame`] - a straight member between two node ids
//! - [`Section`] - a named profile with the ordered member ids it covers
//! - [`build_nodes`] / [`build_frames`] / [`build_sections`] - the builders
//! - [`prune_dangling_frames`] - referential-integrity pass over the graph

pub mod context;
pub mod entities;

pub use entities::Entities;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::ids::{FrameId, NodeId};
use crate::workbook::Sheet;

/// A joint of the structural model with global coordinates.
///
/// Nodes are immutable after construction; discretization creates new
/// nodes with fresh ids rather than moving existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    /// Straight-line distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A straight member connecting two nodes.
///
/// Length is always derived from the endpoint coordinates, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub node_i: NodeId,
    pub node_j: NodeId,
}

/// A named section profile and the members it is assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub frame_ids: Vec<FrameId>,
}

/// Build the node map from the joints sheet.
///
/// Keeps rows typed `Object Type == "Joint"` with a numeric id and all
/// three coordinates present; everything else is skipped with a diagnostic.
pub fn build_nodes(
    joints: &Sheet,
    diagnostics: &mut Vec<Diagnostic>,
) -> HashMap<NodeId, Node> {
    let mut nodes = HashMap::new();

    for row in joints.rows() {
        if row.text("Object Type") != Some("Joint") {
            continue;
        }
        let id = match row.id("Object Name") {
            Some(id) => NodeId(id),
            None => {
                Diagnostic::SkippedRow {
                    sheet: joints.name.clone(),
                    row: row.index,
                    reason: "joint id missing or non-numeric".to_string(),
                }
                .record(diagnostics);
                continue;
            }
        };
        let (x, y, z) = match (
            row.f64("Global X"),
            row.f64("Global Y"),
            row.f64("Global Z"),
        ) {
            (Some(x), Some(y), Some(z)) => (x, y, z),
            _ => {
                Diagnostic::SkippedRow {
                    sheet: joints.name.clone(),
                    row: row.index,
                    reason: format!("joint {} missing a coordinate", id),
                }
                .record(diagnostics);
                continue;
            }
        };
        nodes.insert(id, Node { id, x, y, z });
    }

    nodes
}

/// Build the member map from the beam and column connectivity sheets.
///
/// The two sheets share a schema and are unioned. Rows whose unique-name
/// cell is text are sentinel leakage from the export (the literal "Global"
/// shows up in data position) and are filtered, not parsed.
pub fn build_frames(
    beams: &Sheet,
    columns: &Sheet,
    diagnostics: &mut Vec<Diagnostic>,
) -> HashMap<FrameId, Frame> {
    let mut frames = HashMap::new();
    for sheet in [columns, beams] {
        collect_frames(sheet, &mut frames, diagnostics);
    }
    frames
}

fn collect_frames(
    sheet: &Sheet,
    frames: &mut HashMap<FrameId, Frame>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for row in sheet.rows() {
        // Text in the id column is header/sentinel leakage; silently
        // filtered per the export's conventions, but still counted.
        let id = match row.id("Unique Name") {
            Some(id) => FrameId(id),
            None => {
                if row.get("Unique Name").is_some_and(|c| !c.is_empty()) {
                    Diagnostic::SkippedRow {
                        sheet: sheet.name.clone(),
                        row: row.index,
                        reason: "non-numeric unique name".to_string(),
                    }
                    .record(diagnostics);
                }
                continue;
            }
        };
        let (node_i, node_j) = match (row.id("UniquePtI"), row.id("UniquePtJ")) {
            (Some(i), Some(j)) => (NodeId(i), NodeId(j)),
            _ => {
                Diagnostic::SkippedRow {
                    sheet: sheet.name.clone(),
                    row: row.index,
                    reason: format!("member {} missing an end node id", id),
                }
                .record(diagnostics);
                continue;
            }
        };
        if node_i == node_j {
            Diagnostic::SkippedRow {
                sheet: sheet.name.clone(),
                row: row.index,
                reason: format!("member {} connects node {} to itself", id, node_i),
            }
            .record(diagnostics);
            continue;
        }
        frames.insert(
            id,
            Frame {
                id,
                node_i,
                node_j,
            },
        );
    }
}

/// Drop members whose endpoints are missing from the node map.
///
/// Connectivity rows can reference joints the joints sheet never defined;
/// keeping such a member would hand the rendering sink a dangling node id.
pub fn prune_dangling_frames(
    frames: &mut HashMap<FrameId, Frame>,
    nodes: &HashMap<NodeId, Node>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut dangling: Vec<(FrameId, NodeId)> = frames
        .values()
        .filter_map(|f| {
            if !nodes.contains_key(&f.node_i) {
                Some((f.id, f.node_i))
            } else if !nodes.contains_key(&f.node_j) {
                Some((f.id, f.node_j))
            } else {
                None
            }
        })
        .collect();
    dangling.sort();
    for (frame, node) in dangling {
        frames.remove(&frame);
        Diagnostic::MissingEndpoint { frame, node }.record(diagnostics);
    }
}

/// Group the section-assignment sheet by section name.
///
/// Member ids are collected in sheet order. A row repeating an id already
/// collected for the same section is dropped with a diagnostic.
pub fn build_sections(
    assigns: &Sheet,
    diagnostics: &mut Vec<Diagnostic>,
) -> HashMap<String, Section> {
    let mut sections: HashMap<String, Section> = HashMap::new();

    for row in assigns.rows() {
        let name = match row.text("Section Property") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let frame_id = match row.id("UniqueName") {
            Some(id) => FrameId(id),
            None => continue,
        };
        let section = sections.entry(name.clone()).or_insert_with(|| Section {
            name: name.clone(),
            frame_ids: Vec::new(),
        });
        if section.frame_ids.contains(&frame_id) {
            Diagnostic::DuplicateSection { name }.record(diagnostics);
            continue;
        }
        section.frame_ids.push(frame_id);
    }

    sections
}

/// Name of the section a member is assigned to, if any
pub fn section_for_frame<'a>(
    sections: &'a HashMap<String, Section>,
    frame_id: FrameId,
) -> Option<&'a str> {
    sections
        .values()
        .find(|s| s.frame_ids.contains(&frame_id))
        .map(|s| s.name.as_str())
}
