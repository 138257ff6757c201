//! # Support Reactions
//!
//! Joins the joint-reactions sheet to the joint coordinates sheet on the
//! shared unique-name key, producing a flat record list. Flat by design:
//! the reaction and foundation tools filter per row on scalar fields, they
//! never need a hierarchical lookup. Rows without a matching joint are
//! dropped silently (inner join).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ModelResult;
use crate::ids::NodeId;
use crate::workbook::Sheet;

/// One reaction row merged with its joint's global coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub node: NodeId,
    pub case: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub fx: f64,
    pub fy: f64,
    /// Vertical reaction; the component foundation sizing runs on
    pub fz: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
}

/// The joined reaction payload for one snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionTable {
    /// Unique output-case names in first-seen order (from the reaction
    /// rows, whether or not each row joined to a coordinate)
    pub cases: Vec<String>,
    pub records: Vec<ReactionRecord>,
}

impl ReactionTable {
    /// Records belonging to one output case
    pub fn for_case<'a>(&'a self, load_case: &'a str) -> impl Iterator<Item = &'a ReactionRecord> {
        self.records.iter().filter(move |r| r.case == load_case)
    }
}

/// Join reaction rows to joint coordinates.
///
/// The coordinate table keys joints by `Object Name`; reaction rows key
/// them by `Unique Name`. Both are canonicalized to [`NodeId`] and joined
/// on it. `FZ` is required per row; the remaining components default to
/// zero when the export omits their columns.
pub fn process_reactions(reactions: &Sheet, joints: &Sheet) -> ModelResult<ReactionTable> {
    // Coordinates keyed by joint id. Rows need both the object and element
    // identifiers plus all three coordinates to participate in the join.
    let mut coords: HashMap<NodeId, (f64, f64, f64)> = HashMap::new();
    for row in joints.rows() {
        let element_present = row.get("Element Name").is_some_and(|c| !c.is_empty());
        if !element_present {
            continue;
        }
        let id = match row.id("Object Name") {
            Some(id) => NodeId(id),
            None => continue,
        };
        if let (Some(x), Some(y), Some(z)) = (
            row.f64("Global X"),
            row.f64("Global Y"),
            row.f64("Global Z"),
        ) {
            coords.insert(id, (x, y, z));
        }
    }

    let mut table = ReactionTable::default();
    for row in reactions.rows() {
        let case = match row.text("Output Case") {
            Some(case) if !case.is_empty() => case.to_string(),
            _ => continue,
        };
        let id = match row.id("Unique Name") {
            Some(id) => NodeId(id),
            None => continue,
        };
        if !table.cases.iter().any(|c| *c == case) {
            table.cases.push(case.clone());
        }
        let fz = match row.f64("FZ") {
            Some(fz) => fz,
            None => continue,
        };
        // Inner join: reaction rows without a coordinate match are dropped.
        let (x, y, z) = match coords.get(&id) {
            Some(c) => *c,
            None => continue,
        };
        table.records.push(ReactionRecord {
            node: id,
            case,
            x,
            y,
            z,
            fx: row.f64("FX").unwrap_or(0.0),
            fy: row.f64("FY").unwrap_or(0.0),
            fz,
            mx: row.f64("MX").unwrap_or(0.0),
            my: row.f64("MY").unwrap_or(0.0),
            mz: row.f64("MZ").unwrap_or(0.0),
        });
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::CellValue;

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn joints_sheet() -> Sheet {
        Sheet::new(
            "Objects and Elements - Joints",
            vec![
                "Object Name",
                "Element Name",
                "Global X",
                "Global Y",
                "Global Z",
            ],
            vec![
                vec![num(1.0), num(1.0), num(0.0), num(0.0), num(0.0)],
                vec![num(2.0), num(2.0), num(6000.0), num(0.0), num(0.0)],
                // No element name: excluded from the join
                vec![num(3.0), CellValue::Empty, num(0.0), num(6000.0), num(0.0)],
            ],
        )
    }

    fn reactions_sheet(rows: Vec<Vec<CellValue>>) -> Sheet {
        Sheet::new(
            "Joint Reactions",
            vec!["Unique Name", "Output Case", "FX", "FY", "FZ"],
            rows,
        )
    }

    #[test]
    fn test_inner_join_on_joint_id() {
        let reactions = reactions_sheet(vec![
            vec![num(1.0), text("EQX"), num(1.0), num(2.0), num(-120.0)],
            vec![num(2.0), text("EQX"), num(0.0), num(0.0), num(-85.0)],
            // Node 99 has no coordinates: dropped silently
            vec![num(99.0), text("EQX"), num(0.0), num(0.0), num(-10.0)],
        ]);
        let table = process_reactions(&reactions, &joints_sheet()).unwrap();

        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].node, NodeId(1));
        assert_eq!(table.records[1].x, 6000.0);
        assert_eq!(table.records[0].fz, -120.0);
    }

    #[test]
    fn test_cases_listed_even_when_join_fails() {
        let reactions = reactions_sheet(vec![vec![
            num(99.0),
            text("EQY"),
            num(0.0),
            num(0.0),
            num(-10.0),
        ]]);
        let table = process_reactions(&reactions, &joints_sheet()).unwrap();
        assert_eq!(table.cases, vec!["EQY"]);
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_joint_without_element_name_excluded() {
        let reactions = reactions_sheet(vec![vec![
            num(3.0),
            text("EQX"),
            num(0.0),
            num(0.0),
            num(-50.0),
        ]]);
        let table = process_reactions(&reactions, &joints_sheet()).unwrap();
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_missing_moment_columns_default_to_zero() {
        let reactions = reactions_sheet(vec![vec![
            num(1.0),
            text("Dead"),
            num(0.5),
            num(0.0),
            num(-30.0),
        ]]);
        let table = process_reactions(&reactions, &joints_sheet()).unwrap();
        assert_eq!(table.records[0].mx, 0.0);
        assert_eq!(table.records[0].fx, 0.5);
    }

    #[test]
    fn test_for_case_filter() {
        let reactions = reactions_sheet(vec![
            vec![num(1.0), text("EQX"), num(0.0), num(0.0), num(-120.0)],
            vec![num(1.0), text("EQY"), num(0.0), num(0.0), num(80.0)],
        ]);
        let table = process_reactions(&reactions, &joints_sheet()).unwrap();
        let eqx: Vec<_> = table.for_case("EQX").collect();
        assert_eq!(eqx.len(), 1);
        assert_eq!(eqx[0].fz, -120.0);
    }
}
