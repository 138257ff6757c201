//! # Foundation Pad Sizing
//!
//! Sizes square spread footings from vertical support reactions and an
//! allowable soil bearing pressure. Two modes:
//!
//! - single case: size every support for one named load case
//! - envelope: size every support location for the worst absolute vertical
//!   reaction observed across all load cases
//!
//! ## Units
//!
//! Reactions in kN, bearing pressure in kPa, coordinates in mm. The
//! required area `|FZ| / q` comes out in m²; the pad side is rounded to
//! 0.1 m and carried in millimeters (so it plots directly against the
//! model's mm coordinates). Display as meters = `side_mm / 1000`.
//!
//! # Example
//!
//! ```rust
//! use frame_core::foundation::{pad_side_mm, DEFAULT_MIN_PAD_MM};
//!
//! // 120 kN on 100 kPa soil: 1.2 m2 -> 1.1 m square pad
//! assert_eq!(pad_side_mm(-120.0, 100.0, DEFAULT_MIN_PAD_MM), 1100.0);
//!
//! // Tiny loads clamp up to the practical minimum
//! assert_eq!(pad_side_mm(5.0, 200.0, DEFAULT_MIN_PAD_MM), 1000.0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, ModelResult};
use crate::reactions::ReactionRecord;

/// Practical minimum pad side (mm); smaller results clamp up to this
pub const DEFAULT_MIN_PAD_MM: f64 = 1000.0;

/// One sized pad at a support location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationPad {
    /// Pad center, global X (mm)
    pub x: f64,
    /// Pad center, global Y (mm)
    pub y: f64,
    /// Governing axial load (kN); sign preserved from the source row
    pub axial: f64,
    /// Required square side (mm)
    pub side_mm: f64,
}

impl FoundationPad {
    /// Pad side in meters, the display convention
    pub fn side_m(&self) -> f64 {
        self.side_mm / 1000.0
    }
}

/// Required square pad side in mm for one axial load.
///
/// `side = round(sqrt(|axial| / pressure), 0.1 m) * 1000`, clamped up to
/// `min_size_mm`.
pub fn pad_side_mm(axial: f64, bearing_pressure: f64, min_size_mm: f64) -> f64 {
    let area = axial.abs() / bearing_pressure;
    let side = (area.sqrt() * 10.0).round() / 10.0 * 1000.0;
    if side > min_size_mm {
        side
    } else {
        min_size_mm
    }
}

/// Size pads for every support reaction of one load case.
///
/// Fails with [`ModelError::EmptyFilter`] when the case matches no rows -
/// the caller relays that as a conversational message instead of rendering
/// an empty plan.
pub fn design_for_case(
    records: &[ReactionRecord],
    load_case: &str,
    soil_pressure: f64,
) -> ModelResult<Vec<FoundationPad>> {
    check_pressure(soil_pressure)?;

    let pads: Vec<FoundationPad> = records
        .iter()
        .filter(|r| r.case == load_case)
        .map(|r| FoundationPad {
            x: r.x,
            y: r.y,
            axial: r.fz,
            side_mm: pad_side_mm(r.fz, soil_pressure, DEFAULT_MIN_PAD_MM),
        })
        .collect();

    if pads.is_empty() {
        return Err(ModelError::empty_filter("load case", load_case));
    }
    Ok(pads)
}

/// Size pads for the envelope of all load cases.
///
/// Groups reactions by exact (x, y) location, keeps the maximum absolute
/// vertical reaction per location, and sizes from that worst case.
pub fn design_envelope(
    records: &[ReactionRecord],
    soil_pressure: f64,
) -> ModelResult<Vec<FoundationPad>> {
    check_pressure(soil_pressure)?;
    if records.is_empty() {
        return Err(ModelError::empty_filter("reaction rows", "envelope"));
    }

    // Exact-bits coordinate key: locations merge only when the export
    // repeats them verbatim, matching the grouping of the source data.
    let mut worst: HashMap<(u64, u64), (f64, f64, f64)> = HashMap::new();
    for r in records {
        let key = (r.x.to_bits(), r.y.to_bits());
        let entry = worst.entry(key).or_insert((r.x, r.y, 0.0));
        if r.fz.abs() > entry.2.abs() {
            entry.2 = r.fz;
        }
    }

    let mut pads: Vec<FoundationPad> = worst
        .into_values()
        .map(|(x, y, fz)| FoundationPad {
            x,
            y,
            axial: fz,
            side_mm: pad_side_mm(fz, soil_pressure, DEFAULT_MIN_PAD_MM),
        })
        .collect();
    // Stable output order for golden comparisons
    pads.sort_by(|a, b| (a.x, a.y).partial_cmp(&(b.x, b.y)).unwrap_or(std::cmp::Ordering::Equal));
    Ok(pads)
}

fn check_pressure(soil_pressure: f64) -> ModelResult<()> {
    if !(soil_pressure > 0.0) {
        return Err(ModelError::invalid_parameter(
            "soil_pressure",
            soil_pressure.to_string(),
            "bearing pressure must be positive",
        ));
    }
    Ok(())
}
