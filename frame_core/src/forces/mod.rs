//! # Internal Force and Displacement Indexing
//!
//! Builds the nested lookup structures the visualization tools run on:
//!
//! - force index: member id -> load case -> station label -> force samples
//! - displacement index: node id -> load case -> displacement samples
//!
//! Only `Case Type == "Combination"` rows are indexed for forces; single
//! "Case" rows are excluded by design (design checks run on combinations,
//! not raw cases). Station labels are kept as strings - they are ordered by
//! their numeric parse at the point of use, see [`discretize`].
//!
//! # Example
//!
//! ```rust
//! use frame_core::forces::{ForceComponent, ForceEntry};
//!
//! let entry = ForceEntry { p: -850.0, v2: 12.0, v3: 0.0, t: 0.0, m2: 0.0, m3: 64.0 };
//! assert_eq!(ForceComponent::P.value(&entry), -850.0);
//! assert_eq!(ForceComponent::M3.value(&entry), 64.0);
//! ```

pub mod discretize;

pub use discretize::{discretize, DiscretizedModel};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::ids::{FrameId, NodeId};
use crate::workbook::Sheet;

/// Case-type marker for combination rows in the force tables
const CASE_TYPE_COMBINATION: &str = "Combination";

/// One internal force sample at a (member, load case, station)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceEntry {
    /// Axial force
    pub p: f64,
    /// In-plane shear
    pub v2: f64,
    /// Out-of-plane shear
    pub v3: f64,
    /// Torsion
    pub t: f64,
    /// Minor-axis bending moment
    pub m2: f64,
    /// Major-axis bending moment
    pub m3: f64,
}

/// One joint displacement sample for a load case
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DispEntry {
    pub ux: f64,
    pub uy: f64,
    pub uz: f64,
}

impl DispEntry {
    /// Resultant displacement magnitude
    pub fn magnitude(&self) -> f64 {
        (self.ux * self.ux + self.uy * self.uy + self.uz * self.uz).sqrt()
    }
}

/// Station label -> force samples at that station.
///
/// Multiple samples per station are possible when the source repeats a
/// station row; the first sample is load-bearing for downstream lookups,
/// all are kept.
pub type StationForces = HashMap<String, Vec<ForceEntry>>;

/// Load case name -> station-keyed forces
pub type CaseForces = HashMap<String, StationForces>;

/// Member id -> per-case station forces
pub type ForceIndex = HashMap<FrameId, CaseForces>;

/// Node id -> load case name -> displacement samples
pub type DispIndex = HashMap<NodeId, HashMap<String, Vec<DispEntry>>>;

/// The internal-force components a tool can ask for.
///
/// The conversational layer names components in its own convention: its
/// `V1`/`V2` are the in-plane and out-of-plane shears (`v2`/`v3` in the
/// export's axes) and `M1` is the warping moment, which the export does not
/// carry and always reads as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceComponent {
    P,
    V1,
    V2,
    T,
    M1,
    M2,
    M3,
}

impl ForceComponent {
    /// Scalar value of this component in a force sample
    pub fn value(&self, entry: &ForceEntry) -> f64 {
        match self {
            ForceComponent::P => entry.p,
            ForceComponent::V1 => entry.v2,
            ForceComponent::V2 => entry.v3,
            ForceComponent::T => entry.t,
            ForceComponent::M1 => 0.0,
            ForceComponent::M2 => entry.m2,
            ForceComponent::M3 => entry.m3,
        }
    }

    /// Axis label for the rendering sink's colorbar
    pub fn label(&self) -> &'static str {
        match self {
            ForceComponent::P => "P [kN]",
            ForceComponent::V1 => "V1 [kN]",
            ForceComponent::V2 => "V2 [kN]",
            ForceComponent::T => "T [kN-m]",
            ForceComponent::M1 => "M1 [kN-m]",
            ForceComponent::M2 => "M2 [kN-m]",
            ForceComponent::M3 => "M3 [kN-m]",
        }
    }
}

/// Build the force index from the beam and column force sheets.
///
/// The two sheets are concatenated, filtered to combination rows, and
/// grouped by (member, output case, station). Member ids and station
/// labels are canonicalized once here; rows missing any grouping key are
/// skipped with a diagnostic.
pub fn build_force_index(
    beams: &Sheet,
    columns: &Sheet,
    diagnostics: &mut Vec<Diagnostic>,
) -> ForceIndex {
    let mut index = ForceIndex::new();
    for sheet in [beams, columns] {
        collect_forces(sheet, &mut index, diagnostics);
    }
    index
}

fn collect_forces(sheet: &Sheet, index: &mut ForceIndex, diagnostics: &mut Vec<Diagnostic>) {
    for row in sheet.rows() {
        if row.text("Case Type") != Some(CASE_TYPE_COMBINATION) {
            continue;
        }
        let frame_id = match row.id("Unique Name") {
            Some(id) => FrameId(id),
            None => {
                // Sentinel/header leakage in the id column; filtered.
                continue;
            }
        };
        let case = match row.text("Output Case") {
            Some(case) if !case.is_empty() => case.to_string(),
            _ => continue,
        };
        let station = match row.get("Station") {
            Some(cell) if !cell.is_empty() => cell.display(),
            _ => {
                Diagnostic::SkippedRow {
                    sheet: sheet.name.clone(),
                    row: row.index,
                    reason: format!("member {} force row has no station", frame_id),
                }
                .record(diagnostics);
                continue;
            }
        };
        let entry = ForceEntry {
            p: row.f64("P").unwrap_or(0.0),
            v2: row.f64("V2").unwrap_or(0.0),
            v3: row.f64("V3").unwrap_or(0.0),
            t: row.f64("T").unwrap_or(0.0),
            m2: row.f64("M2").unwrap_or(0.0),
            m3: row.f64("M3").unwrap_or(0.0),
        };
        index
            .entry(frame_id)
            .or_default()
            .entry(case)
            .or_default()
            .entry(station)
            .or_default()
            .push(entry);
    }
}

/// Build the displacement index from the joint-displacements sheet,
/// grouped by (node id, output case).
pub fn build_disp_index(sheet: &Sheet, diagnostics: &mut Vec<Diagnostic>) -> DispIndex {
    let mut index = DispIndex::new();

    for row in sheet.rows() {
        let node_id = match row.id("Unique Name") {
            Some(id) => NodeId(id),
            None => continue,
        };
        let case = match row.text("Output Case") {
            Some(case) if !case.is_empty() => case.to_string(),
            _ => continue,
        };
        let entry = match (row.f64("Ux"), row.f64("Uy"), row.f64("Uz")) {
            (Some(ux), Some(uy), Some(uz)) => DispEntry { ux, uy, uz },
            _ => {
                Diagnostic::SkippedRow {
                    sheet: sheet.name.clone(),
                    row: row.index,
                    reason: format!("node {} displacement row incomplete", node_id),
                }
                .record(diagnostics);
                continue;
            }
        };
        index
            .entry(node_id)
            .or_default()
            .entry(case)
            .or_default()
            .push(entry);
    }

    index
}

/// Unique combination load-case names in first-seen order.
///
/// Read from the frame joint-forces sheet, which lists every combination
/// the analysis produced results for.
pub fn load_combos(joint_forces: &Sheet) -> Vec<String> {
    let mut combos: Vec<String> = Vec::new();
    for row in joint_forces.rows() {
        if row.text("Case Type") != Some(CASE_TYPE_COMBINATION) {
            continue;
        }
        if let Some(case) = row.text("Output Case") {
            if !case.is_empty() && !combos.iter().any(|c| c == case) {
                combos.push(case.to_string());
            }
        }
    }
    combos
}

/// Unique group names with at least one assigned object
pub fn group_names(groups: &Sheet) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in groups.rows() {
        let assigned = row
            .get("Object Unique Name")
            .is_some_and(|c| !c.is_empty());
        if !assigned {
            continue;
        }
        if let Some(name) = row.text("Group Name") {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
