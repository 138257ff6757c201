//! # Station Discretization
//!
//! Internal force results are reported at discrete stations along each
//! member (0, 0.5L, 1.0L, ...). To render a continuous, per-segment colored
//! force diagram, each member is split into one sub-member per inter-station
//! interval, carrying a single worst-case force value instead of a
//! station-keyed series.
//!
//! ## Algorithm Overview
//!
//! Per member with combination forces:
//!
//! 1. Derive the direction vector and length from the endpoint nodes;
//!    zero-length members are skipped.
//! 2. Take the station labels of one representative load case and order
//!    them by their numeric parse. All other cases must report the same
//!    station set; a divergent case disqualifies the member rather than
//!    silently misaligning its segments.
//! 3. Replace the member with one new sub-member per adjacent-station
//!    interval. Interior stations become new nodes at the interpolated
//!    position; the outermost stations reuse the original endpoints.
//! 4. For every load case and every interval, aggregate the two bounding
//!    stations' samples into one envelope value per force component
//!    (largest absolute magnitude, sign preserved).
//!
//! New node and member ids are allocated strictly above the running maxima,
//! shared across the whole pass. A member that cannot be discretized is
//! omitted from the output geometry entirely; each skip is recorded as a
//! [`Diagnostic`]. The input maps are never mutated - the caller's snapshot
//! stays valid and can be discretized again.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::forces::{ForceEntry, ForceIndex};
use crate::ids::{FrameId, NodeId};
use crate::model::{Frame, Node};

/// The re-segmented geometry and per-segment envelope forces.
///
/// `nodes` and `frames` are supersets of the input maps minus the replaced
/// (or skipped) originals; `forces` is a brand-new index keyed only by the
/// newly created member ids - the original member ids are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscretizedModel {
    pub nodes: HashMap<NodeId, Node>,
    pub frames: HashMap<FrameId, Frame>,
    /// New member id -> load case -> aggregated envelope sample
    pub forces: HashMap<FrameId, HashMap<String, ForceEntry>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Envelope-aggregate two stations' samples into one entry.
///
/// Per force component independently, picks the value with the largest
/// absolute magnitude across both sample lists, keeping its sign. An exact
/// magnitude tie resolves to the earlier sample. Empty input yields zero.
///
/// # Example
///
/// ```rust
/// use frame_core::forces::ForceEntry;
/// use frame_core::forces::discretize::aggregate_force_entries;
///
/// let a = ForceEntry { p: -120.0, m3: 10.0, ..Default::default() };
/// let b = ForceEntry { p: 80.0, m3: -35.0, ..Default::default() };
/// let env = aggregate_force_entries(&[a], &[b]);
/// assert_eq!(env.p, -120.0);
/// assert_eq!(env.m3, -35.0);
/// ```
pub fn aggregate_force_entries(a: &[ForceEntry], b: &[ForceEntry]) -> ForceEntry {
    fn abs_max(candidates: impl Iterator<Item = f64>) -> f64 {
        let mut best = 0.0_f64;
        let mut seen = false;
        for v in candidates {
            if !seen || v.abs() > best.abs() {
                best = v;
                seen = true;
            }
        }
        best
    }

    let both = || a.iter().chain(b.iter());
    ForceEntry {
        p: abs_max(both().map(|e| e.p)),
        v2: abs_max(both().map(|e| e.v2)),
        v3: abs_max(both().map(|e| e.v3)),
        t: abs_max(both().map(|e| e.t)),
        m2: abs_max(both().map(|e| e.m2)),
        m3: abs_max(both().map(|e| e.m3)),
    }
}

/// Split every member with combination forces into per-station segments.
///
/// Takes the snapshot's maps by reference and returns fresh maps; the
/// caller's data is never aliased or mutated.
pub fn discretize(
    nodes: &HashMap<NodeId, Node>,
    frames: &HashMap<FrameId, Frame>,
    comb_forces: &ForceIndex,
) -> DiscretizedModel {
    let mut out = DiscretizedModel {
        nodes: nodes.clone(),
        frames: frames.clone(),
        forces: HashMap::new(),
        diagnostics: Vec::new(),
    };

    // Running maxima shared across the whole pass, never reset per member.
    let mut next_node_id = nodes.keys().map(|id| id.0).max().unwrap_or(0);
    let mut next_frame_id = frames.keys().map(|id| id.0).max().unwrap_or(0);

    // Sorted for a reproducible allocation order.
    let mut original_ids: Vec<FrameId> = frames.keys().copied().collect();
    original_ids.sort();

    for frame_id in original_ids {
        let frame = frames[&frame_id].clone();

        let cases = match comb_forces.get(&frame_id) {
            Some(cases) if !cases.is_empty() => cases,
            _ => {
                Diagnostic::MissingForces { frame: frame_id }.record(&mut out.diagnostics);
                out.frames.remove(&frame_id);
                continue;
            }
        };

        let (node_i, node_j) = match (nodes.get(&frame.node_i), nodes.get(&frame.node_j)) {
            (Some(i), Some(j)) => (i, j),
            (i, _) => {
                let missing = if i.is_none() {
                    frame.node_i
                } else {
                    frame.node_j
                };
                Diagnostic::MissingEndpoint {
                    frame: frame_id,
                    node: missing,
                }
                .record(&mut out.diagnostics);
                out.frames.remove(&frame_id);
                continue;
            }
        };

        let length = node_i.distance_to(node_j);
        if length == 0.0 {
            Diagnostic::DegenerateMember { frame: frame_id }.record(&mut out.diagnostics);
            out.frames.remove(&frame_id);
            continue;
        }
        let unit = (
            (node_j.x - node_i.x) / length,
            (node_j.y - node_i.y) / length,
            (node_j.z - node_i.z) / length,
        );

        // Station set from a representative case; the smallest case name
        // keeps the choice deterministic across runs.
        let mut case_names: Vec<&String> = cases.keys().collect();
        case_names.sort();
        let representative = &cases[case_names[0]];

        let stations = match sorted_stations(frame_id, representative, &mut out.diagnostics) {
            Some(stations) => stations,
            None => {
                out.frames.remove(&frame_id);
                continue;
            }
        };
        if stations.len() < 2 {
            Diagnostic::TooFewStations {
                frame: frame_id,
                count: stations.len(),
            }
            .record(&mut out.diagnostics);
            out.frames.remove(&frame_id);
            continue;
        }

        // Every other case must report the same station set, otherwise its
        // segments would silently misalign with the representative's.
        let reference: HashSet<&str> = stations.iter().map(|(_, l)| l.as_str()).collect();
        let divergent = case_names.iter().find(|name| {
            let set: HashSet<&str> = cases[**name].keys().map(String::as_str).collect();
            set != reference
        });
        if let Some(case) = divergent {
            Diagnostic::DivergentStations {
                frame: frame_id,
                case: (*case).clone(),
            }
            .record(&mut out.diagnostics);
            out.frames.remove(&frame_id);
            continue;
        }

        // The member is replaced entirely by its segments.
        out.frames.remove(&frame_id);

        let num_segments = stations.len() - 1;

        // Envelope per (case, segment), cases in sorted order.
        let mut aggregated: Vec<(&String, Vec<ForceEntry>)> = Vec::with_capacity(cases.len());
        for name in &case_names {
            let station_data = &cases[*name];
            let seg_forces: Vec<ForceEntry> = (0..num_segments)
                .map(|i| {
                    aggregate_force_entries(
                        &station_data[&stations[i].1],
                        &station_data[&stations[i + 1].1],
                    )
                })
                .collect();
            aggregated.push((*name, seg_forces));
        }

        // New nodes for interior stations only; the first and last station
        // coincide with the original endpoints.
        let mut interior: HashMap<usize, NodeId> = HashMap::new();
        for (idx, (distance, _)) in stations
            .iter()
            .enumerate()
            .take(stations.len() - 1)
            .skip(1)
        {
            next_node_id += 1;
            let id = NodeId(next_node_id);
            out.nodes.insert(
                id,
                Node {
                    id,
                    x: node_i.x + distance * unit.0,
                    y: node_i.y + distance * unit.1,
                    z: node_i.z + distance * unit.2,
                },
            );
            interior.insert(idx, id);
        }

        for i in 0..num_segments {
            let start = if i == 0 {
                frame.node_i
            } else {
                interior[&i]
            };
            let end = match interior.get(&(i + 1)) {
                Some(id) => *id,
                None => frame.node_j,
            };

            next_frame_id += 1;
            let id = FrameId(next_frame_id);
            out.frames.insert(
                id,
                Frame {
                    id,
                    node_i: start,
                    node_j: end,
                },
            );

            let segment_forces: HashMap<String, ForceEntry> = aggregated
                .iter()
                .map(|(name, seg_forces)| ((*name).clone(), seg_forces[i]))
                .collect();
            out.forces.insert(id, segment_forces);
        }
    }

    log::info!(
        "discretization done: {} members in, {} segments out, {} skipped",
        frames.len(),
        out.forces.len(),
        out.diagnostics.len()
    );
    out
}

/// Station labels of one case, parsed and ordered by distance.
///
/// Returns `None` (with a diagnostic) when any label fails to parse as a
/// finite distance.
fn sorted_stations(
    frame_id: FrameId,
    station_data: &HashMap<String, Vec<ForceEntry>>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Vec<(f64, String)>> {
    let mut stations: Vec<(f64, String)> = Vec::with_capacity(station_data.len());
    for label in station_data.keys() {
        match label.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => stations.push((value, label.clone())),
            _ => {
                Diagnostic::UnparsableStation {
                    frame: frame_id,
                    station: label.clone(),
                }
                .record(diagnostics);
                return None;
            }
        }
    }
    stations.sort_by(|a, b| a.0.total_cmp(&b.0));
    Some(stations)
}
