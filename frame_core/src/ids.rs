//! # Canonical Identifiers
//!
//! Newtype wrappers for node and member ids. The source spreadsheets mix
//! integer and text representations of the same identifier from sheet to
//! sheet, which is an easy way to miss a lookup. Everything inside
//! frame_core converts to these newtypes once, at extraction time, and
//! uses them everywhere a node or member is keyed.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::ids::{NodeId, FrameId};
//!
//! let n = NodeId(14);
//! let f = FrameId(203);
//! assert_eq!(n.to_string(), "14");
//! assert_ne!(f.0, n.0 as u64);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a joint/node, unique within one model snapshot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Identifier of a frame (member), unique within one model snapshot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FrameId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
