//! # Model Snapshot
//!
//! [`Entities`] is the single immutable snapshot produced by one ingestion
//! pass over an export: geometry, force and displacement indexes, reaction
//! table, load-combination and group lists, the conversational summary, and
//! every diagnostic recovered along the way. All tool calls for a session
//! run against one snapshot; re-ingesting produces a new one with a fresh
//! id rather than mutating the old.
//!
//! # Example
//!
//! ```rust,no_run
//! use frame_core::model::Entities;
//!
//! let entities = Entities::from_path("model.xlsx")?;
//! println!(
//!     "{} nodes, {} members, {} combinations",
//!     entities.nodes.len(),
//!     entities.frames.len(),
//!     entities.load_combos.len()
//! );
//! # Ok::<(), frame_core::errors::ModelError>(())
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::diagnostics::Diagnostic;
use crate::errors::ModelResult;
use crate::forces::{self, DispIndex, ForceIndex};
use crate::ids::{FrameId, NodeId};
use crate::model::context;
use crate::model::{
    build_frames, build_nodes, build_sections, prune_dangling_frames, Frame, Node, Section,
};
use crate::reactions::{self, ReactionTable};
use crate::workbook::Workbook;

/// Everything extracted from one export, ready for tool dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entities {
    /// Identity of this snapshot; fresh per ingestion pass
    pub snapshot_id: Uuid,
    /// When the ingestion pass ran
    pub ingested_at: DateTime<Utc>,

    pub nodes: HashMap<NodeId, Node>,
    pub frames: HashMap<FrameId, Frame>,
    pub sections: HashMap<String, Section>,

    /// Member -> combination case -> station forces
    pub internal_loads: ForceIndex,
    /// Node -> output case -> displacement samples
    pub joint_disp: DispIndex,

    /// Combination load-case names in first-seen order
    pub load_combos: Vec<String>,
    /// Group names with at least one assigned object
    pub groups: Vec<String>,

    pub reactions: ReactionTable,

    /// Markdown summary handed to the conversational layer
    pub model_context: String,

    /// Every row or member recovered (not ingested) during the pass
    pub diagnostics: Vec<Diagnostic>,
}

impl Entities {
    /// Run the full ingestion pass over an extracted workbook.
    pub fn from_workbook(workbook: &Workbook) -> ModelResult<Entities> {
        let mut diagnostics = Vec::new();

        let joints = workbook.sheet("Objects and Elements - Joints")?;
        let nodes = build_nodes(joints, &mut diagnostics);

        let beam_conn = workbook.sheet("Beam Object Connectivity")?;
        let column_conn = workbook.sheet("Column Object Connectivity")?;
        let mut frames = build_frames(beam_conn, column_conn, &mut diagnostics);
        prune_dangling_frames(&mut frames, &nodes, &mut diagnostics);

        let assigns = workbook.sheet("Frame Assigns - Sect Prop")?;
        let sections = build_sections(assigns, &mut diagnostics);

        let beam_forces = workbook.sheet("Element Forces - Beams")?;
        let column_forces = workbook.sheet("Element Forces - Columns")?;
        let internal_loads =
            forces::build_force_index(beam_forces, column_forces, &mut diagnostics);

        let displacements = workbook.sheet("Joint Displacements")?;
        let joint_disp = forces::build_disp_index(displacements, &mut diagnostics);

        let joint_forces = workbook.sheet("Element Joint Forces - Frame")?;
        let load_combos = forces::load_combos(joint_forces);

        let groups = forces::group_names(workbook.sheet("Group Assignments")?);

        let reactions = reactions::process_reactions(
            workbook.sheet("Joint Reactions")?,
            joints,
        )?;

        let model_context = context::build_context(
            workbook.sheet("Modal Periods And Frequencies")?,
            workbook.sheet("Material List by Section Prop")?,
            &load_combos,
        );

        let entities = Entities {
            snapshot_id: Uuid::new_v4(),
            ingested_at: Utc::now(),
            nodes,
            frames,
            sections,
            internal_loads,
            joint_disp,
            load_combos,
            groups,
            reactions,
            model_context,
            diagnostics,
        };

        log::info!(
            "snapshot {}: {} nodes, {} members, {} sections, {} combinations, {} diagnostics",
            entities.snapshot_id,
            entities.nodes.len(),
            entities.frames.len(),
            entities.sections.len(),
            entities.load_combos.len(),
            entities.diagnostics.len()
        );

        Ok(entities)
    }

    /// Extract and ingest from raw workbook bytes.
    pub fn from_bytes(bytes: &[u8]) -> ModelResult<Entities> {
        let workbook = Workbook::from_bytes(bytes)?;
        Entities::from_workbook(&workbook)
    }

    /// Extract and ingest from a workbook file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ModelResult<Entities> {
        let workbook = Workbook::from_path(path)?;
        Entities::from_workbook(&workbook)
    }

    /// Whether a combination case appears anywhere in the force index
    pub fn has_combination(&self, load_case: &str) -> bool {
        self.load_combos.iter().any(|c| c == load_case)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::workbook::{CellValue, Sheet};

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    /// A minimal but complete workbook: a single beam between two
    /// supported joints, one combination, one reaction per support.
    pub(crate) fn fixture_workbook() -> Workbook {
        Workbook::from_sheets(fixture_sheets())
    }

    /// The fixture's sheets, for tests that perturb one before ingesting
    pub(crate) fn fixture_sheets() -> Vec<Sheet> {
        let joints = Sheet::new(
            "Objects and Elements - Joints",
            vec![
                "Object Name",
                "Object Type",
                "Element Name",
                "Global X",
                "Global Y",
                "Global Z",
            ],
            vec![
                vec![num(1.0), text("Joint"), num(1.0), num(0.0), num(0.0), num(0.0)],
                vec![
                    num(2.0),
                    text("Joint"),
                    num(2.0),
                    num(6000.0),
                    num(0.0),
                    num(0.0),
                ],
            ],
        );
        let groups = Sheet::new(
            "Group Assignments",
            vec!["Group Name", "Object Unique Name"],
            vec![vec![text("Beams"), num(10.0)]],
        );
        let beam_conn = Sheet::new(
            "Beam Object Connectivity",
            vec!["Unique Name", "UniquePtI", "UniquePtJ"],
            vec![vec![num(10.0), num(1.0), num(2.0)]],
        );
        let column_conn = Sheet::new(
            "Column Object Connectivity",
            vec!["Unique Name", "UniquePtI", "UniquePtJ"],
            vec![],
        );
        let assigns = Sheet::new(
            "Frame Assigns - Sect Prop",
            vec!["UniqueName", "Section Property"],
            vec![vec![num(10.0), text("W14X30")]],
        );
        let force_headers = vec![
            "Unique Name",
            "Output Case",
            "Case Type",
            "Station",
            "P",
            "V2",
            "V3",
            "T",
            "M2",
            "M3",
        ];
        let beam_forces = Sheet::new(
            "Element Forces - Beams",
            force_headers.clone(),
            vec![
                vec![
                    num(10.0),
                    text("COMB1"),
                    text("Combination"),
                    num(0.0),
                    num(-50.0),
                    num(12.0),
                    num(0.0),
                    num(0.0),
                    num(0.0),
                    num(30.0),
                ],
                vec![
                    num(10.0),
                    text("COMB1"),
                    text("Combination"),
                    num(6000.0),
                    num(-50.0),
                    num(-12.0),
                    num(0.0),
                    num(0.0),
                    num(0.0),
                    num(-28.0),
                ],
            ],
        );
        let column_forces = Sheet::new("Element Forces - Columns", force_headers, vec![]);
        let joint_forces = Sheet::new(
            "Element Joint Forces - Frame",
            vec!["Output Case", "Case Type"],
            vec![vec![text("COMB1"), text("Combination")]],
        );
        let displacements = Sheet::new(
            "Joint Displacements",
            vec!["Unique Name", "Output Case", "Ux", "Uy", "Uz"],
            vec![
                vec![num(1.0), text("COMB1"), num(0.0), num(0.0), num(0.0)],
                vec![num(2.0), text("COMB1"), num(1.2), num(0.0), num(-3.5)],
            ],
        );
        let reactions = Sheet::new(
            "Joint Reactions",
            vec!["Unique Name", "Output Case", "FX", "FY", "FZ"],
            vec![
                vec![num(1.0), text("COMB1"), num(0.0), num(0.0), num(-120.0)],
                vec![num(2.0), text("COMB1"), num(0.0), num(0.0), num(-120.0)],
            ],
        );
        let modal = Sheet::new(
            "Modal Periods And Frequencies",
            vec!["Case", "Mode", "Period"],
            vec![vec![text("Modal"), num(1.0), num(0.82)]],
        );
        let materials = Sheet::new(
            "Material List by Section Prop",
            vec!["Section", "Total Weight"],
            vec![vec![text("W14X30"), num(268.0)]],
        );

        vec![
            joints,
            groups,
            beam_conn,
            column_conn,
            assigns,
            beam_forces,
            column_forces,
            joint_forces,
            displacements,
            reactions,
            modal,
            materials,
        ]
    }

    #[test]
    fn test_full_ingestion_pass() {
        let entities = Entities::from_workbook(&fixture_workbook()).unwrap();

        assert_eq!(entities.nodes.len(), 2);
        assert_eq!(entities.frames.len(), 1);
        assert_eq!(entities.sections["W14X30"].frame_ids, vec![FrameId(10)]);
        assert_eq!(entities.load_combos, vec!["COMB1"]);
        assert_eq!(entities.groups, vec!["Beams"]);
        assert_eq!(entities.reactions.records.len(), 2);
        assert!(entities.model_context.contains("- COMB1"));
        assert!(entities.diagnostics.is_empty());

        let stations = &entities.internal_loads[&FrameId(10)]["COMB1"];
        assert_eq!(stations.len(), 2);

        // Every member's endpoints resolve in the node map
        for frame in entities.frames.values() {
            assert!(entities.nodes.contains_key(&frame.node_i));
            assert!(entities.nodes.contains_key(&frame.node_j));
        }
    }

    #[test]
    fn test_dangling_member_pruned_with_diagnostic() {
        let mut sheets = fixture_sheets();
        let beams = sheets
            .iter_mut()
            .find(|s| s.name == "Beam Object Connectivity")
            .unwrap();
        // References node 99, which the joints sheet never defines
        beams.rows.push(vec![num(11.0), num(1.0), num(99.0)]);

        let entities = Entities::from_workbook(&Workbook::from_sheets(sheets)).unwrap();

        assert!(!entities.frames.contains_key(&FrameId(11)));
        assert!(entities.diagnostics.contains(&Diagnostic::MissingEndpoint {
            frame: FrameId(11),
            node: NodeId(99),
        }));
        for frame in entities.frames.values() {
            assert!(entities.nodes.contains_key(&frame.node_i));
            assert!(entities.nodes.contains_key(&frame.node_j));
        }
    }

    #[test]
    fn test_snapshots_have_distinct_ids() {
        let wb = fixture_workbook();
        let a = Entities::from_workbook(&wb).unwrap();
        let b = Entities::from_workbook(&wb).unwrap();
        assert_ne!(a.snapshot_id, b.snapshot_id);
        // Same source, same content
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.frames, b.frames);
    }

    #[test]
    fn test_has_combination() {
        let entities = Entities::from_workbook(&fixture_workbook()).unwrap();
        assert!(entities.has_combination("COMB1"));
        assert!(!entities.has_combination("WIND"));
    }

    #[test]
    fn test_snapshot_round_trips_as_json() {
        let entities = Entities::from_workbook(&fixture_workbook()).unwrap();
        let json = serde_json::to_string(&entities).unwrap();
        let back: Entities = serde_json::from_str(&json).unwrap();
        assert_eq!(back.snapshot_id, entities.snapshot_id);
        assert_eq!(back.frames, entities.frames);
        assert_eq!(back.reactions, entities.reactions);
    }
}
