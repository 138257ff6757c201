//! # Tool Intents and Dispatch
//!
//! The conversational layer drives the engine through typed tool intents:
//! JSON objects tagged by tool name, deserialized here and dispatched
//! against one [`Entities`] snapshot. Every intent is a pure function of
//! the snapshot; outputs are serializable payloads for the rendering sink.
//!
//! # Example
//!
//! ```rust
//! use frame_core::tools::ToolIntent;
//!
//! let intent: ToolIntent = serde_json::from_str(
//!     r#"{"tool": "plot_internal_forces", "load_case": "COMB1", "force_component": "M3"}"#,
//! ).unwrap();
//! assert!(matches!(intent, ToolIntent::PlotInternalForces { .. }));
//! ```

pub mod scene;

pub use scene::{ScenePayload, DEFAULT_DEFORMED_SCALE};

use serde::{Deserialize, Serialize};

use crate::errors::ModelResult;
use crate::forces::ForceComponent;
use crate::foundation::{self, FoundationPad};
use crate::model::Entities;
use crate::reactions::ReactionRecord;

/// One tool call requested by the conversational layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolIntent {
    /// Render the undeformed model geometry
    PlotModel,

    /// Render the support reactions of one load case
    PlotReactions { load_case: String },

    /// Render the displaced geometry of one load case
    PlotDeformedShape {
        load_case: String,
        /// Magnification; [`DEFAULT_DEFORMED_SCALE`] when omitted
        #[serde(default)]
        scale_factor: Option<f64>,
    },

    /// Render one internal-force component as a colored diagram
    PlotInternalForces {
        load_case: String,
        force_component: ForceComponent,
    },

    /// Size foundation pads for one load case
    DesignFoundationForCase {
        load_case: String,
        /// Allowable soil bearing pressure (kPa)
        soil_pressure: f64,
    },

    /// Size foundation pads for the worst case at every support
    DesignFoundationEnvelope { soil_pressure: f64 },
}

/// The reaction arrows of one load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionMapPayload {
    pub load_case: String,
    pub records: Vec<ReactionRecord>,
}

/// A sized foundation layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationPlanPayload {
    /// The case name, or `"envelope"`
    pub label: String,
    pub soil_pressure: f64,
    pub pads: Vec<FoundationPad>,
}

/// The result of one dispatched intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum ToolOutput {
    Scene(ScenePayload),
    ReactionMap(ReactionMapPayload),
    FoundationPlan(FoundationPlanPayload),
}

/// Run one intent against a snapshot.
pub fn dispatch(entities: &Entities, intent: &ToolIntent) -> ModelResult<ToolOutput> {
    log::debug!("dispatching {:?}", intent);
    match intent {
        ToolIntent::PlotModel => Ok(ToolOutput::Scene(scene::model_scene(entities))),

        ToolIntent::PlotReactions { load_case } => {
            let records: Vec<ReactionRecord> =
                entities.reactions.for_case(load_case).cloned().collect();
            if records.is_empty() {
                return Err(crate::errors::ModelError::empty_filter(
                    "load case", load_case,
                ));
            }
            Ok(ToolOutput::ReactionMap(ReactionMapPayload {
                load_case: load_case.clone(),
                records,
            }))
        }

        ToolIntent::PlotDeformedShape {
            load_case,
            scale_factor,
        } => {
            let scale = scale_factor.unwrap_or(DEFAULT_DEFORMED_SCALE);
            Ok(ToolOutput::Scene(scene::deformed_scene(
                entities, load_case, scale,
            )?))
        }

        ToolIntent::PlotInternalForces {
            load_case,
            force_component,
        } => Ok(ToolOutput::Scene(scene::force_scene(
            entities,
            load_case,
            *force_component,
        )?)),

        ToolIntent::DesignFoundationForCase {
            load_case,
            soil_pressure,
        } => {
            let pads = foundation::design_for_case(
                &entities.reactions.records,
                load_case,
                *soil_pressure,
            )?;
            Ok(ToolOutput::FoundationPlan(FoundationPlanPayload {
                label: load_case.clone(),
                soil_pressure: *soil_pressure,
                pads,
            }))
        }

        ToolIntent::DesignFoundationEnvelope { soil_pressure } => {
            let pads =
                foundation::design_envelope(&entities.reactions.records, *soil_pressure)?;
            Ok(ToolOutput::FoundationPlan(FoundationPlanPayload {
                label: "envelope".to_string(),
                soil_pressure: *soil_pressure,
                pads,
            }))
        }
    }
}
