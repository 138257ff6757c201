//! # Scene Payloads
//!
//! Rendering-sink-agnostic 3D scene descriptions. A scene is a flat node
//! list plus a member list; each member optionally carries one scalar that
//! the sink maps onto a color scale. All lists are sorted by id so the
//! serialized payload is reproducible for a given snapshot.

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, ModelResult};
use crate::forces::{discretize, ForceComponent};
use crate::ids::{FrameId, NodeId};
use crate::model::Entities;

/// One point of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One line of a scene, referencing scene nodes by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMember {
    pub id: FrameId,
    pub node_i: NodeId,
    pub node_j: NodeId,
    /// Scalar for the sink's color scale; `None` renders uncolored
    pub value: Option<f64>,
}

/// A complete renderable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePayload {
    /// Colorbar / legend label
    pub label: String,
    pub nodes: Vec<SceneNode>,
    pub members: Vec<SceneMember>,
}

/// The undeformed geometry, uncolored.
pub fn model_scene(entities: &Entities) -> ScenePayload {
    let mut nodes: Vec<SceneNode> = entities
        .nodes
        .values()
        .map(|n| SceneNode {
            id: n.id,
            x: n.x,
            y: n.y,
            z: n.z,
        })
        .collect();
    nodes.sort_by_key(|n| n.id);

    let mut members: Vec<SceneMember> = entities
        .frames
        .values()
        .map(|f| SceneMember {
            id: f.id,
            node_i: f.node_i,
            node_j: f.node_j,
            value: None,
        })
        .collect();
    members.sort_by_key(|m| m.id);

    ScenePayload {
        label: "Model".to_string(),
        nodes,
        members,
    }
}

/// The discretized geometry colored by one internal-force component.
///
/// Members are the per-station segments of [`discretize`]; each carries the
/// requested component's envelope value for the load case. A segment whose
/// case entry is absent (the member had forces, just not for this case)
/// renders as zero rather than dropping out of the scene.
pub fn force_scene(
    entities: &Entities,
    load_case: &str,
    component: ForceComponent,
) -> ModelResult<ScenePayload> {
    // Gate on the index this scene renders from: a combination listed in
    // the joint-forces sheet can still be absent from the force tables.
    let any_data = entities
        .internal_loads
        .values()
        .any(|cases| cases.contains_key(load_case));
    if !any_data {
        return Err(ModelError::empty_filter("load case", load_case));
    }

    let model = discretize(&entities.nodes, &entities.frames, &entities.internal_loads);

    let mut nodes: Vec<SceneNode> = model
        .nodes
        .values()
        .map(|n| SceneNode {
            id: n.id,
            x: n.x,
            y: n.y,
            z: n.z,
        })
        .collect();
    nodes.sort_by_key(|n| n.id);

    let mut members: Vec<SceneMember> = model
        .frames
        .values()
        .map(|f| {
            let value = model
                .forces
                .get(&f.id)
                .and_then(|cases| cases.get(load_case))
                .map(|entry| component.value(entry))
                .unwrap_or(0.0);
            SceneMember {
                id: f.id,
                node_i: f.node_i,
                node_j: f.node_j,
                value: Some(value),
            }
        })
        .collect();
    members.sort_by_key(|m| m.id);

    Ok(ScenePayload {
        label: component.label().to_string(),
        nodes,
        members,
    })
}

/// Default magnification for displaced geometry
pub const DEFAULT_DEFORMED_SCALE: f64 = 80.0;

/// The geometry displaced by one load case's joint displacements.
///
/// Node positions are offset by `scale * (ux, uy, uz)` from the case's
/// first displacement sample; nodes without a sample for the case stay at
/// their undeformed position. Members are colored by the mean resultant
/// displacement of their two endpoints.
pub fn deformed_scene(
    entities: &Entities,
    load_case: &str,
    scale: f64,
) -> ModelResult<ScenePayload> {
    let any_data = entities
        .joint_disp
        .values()
        .any(|cases| cases.contains_key(load_case));
    if !any_data {
        return Err(ModelError::empty_filter("load case", load_case));
    }

    let sample = |id: NodeId| {
        entities
            .joint_disp
            .get(&id)
            .and_then(|cases| cases.get(load_case))
            .and_then(|samples| samples.first())
            .copied()
    };

    let mut nodes: Vec<SceneNode> = entities
        .nodes
        .values()
        .map(|n| {
            let d = sample(n.id).unwrap_or_default();
            SceneNode {
                id: n.id,
                x: n.x + scale * d.ux,
                y: n.y + scale * d.uy,
                z: n.z + scale * d.uz,
            }
        })
        .collect();
    nodes.sort_by_key(|n| n.id);

    let mut members: Vec<SceneMember> = entities
        .frames
        .values()
        .map(|f| {
            let mag_i = sample(f.node_i).map(|d| d.magnitude()).unwrap_or(0.0);
            let mag_j = sample(f.node_j).map(|d| d.magnitude()).unwrap_or(0.0);
            SceneMember {
                id: f.id,
                node_i: f.node_i,
                node_j: f.node_j,
                value: Some((mag_i + mag_j) / 2.0),
            }
        })
        .collect();
    members.sort_by_key(|m| m.id);

    Ok(ScenePayload {
        label: format!("Deformed shape - {} (x{})", load_case, scale),
        nodes,
        members,
    })
}
