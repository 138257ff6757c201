//! # frame_core - Structural Model Extraction and Visualization Engine
//!
//! `frame_core` turns a structural-analysis result workbook (`.xlsx`) into
//! an immutable, queryable model snapshot and answers typed tool intents
//! against it with a clean, LLM-friendly API. All inputs and outputs are
//! JSON-serializable, making it ideal for driving from an AI assistant.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: ingest once, then pure functions of the snapshot
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Recoverable Ingestion**: bad rows become diagnostics, not failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frame_core::model::Entities;
//! use frame_core::tools::{dispatch, ToolIntent};
//!
//! let entities = Entities::from_path("model.xlsx")?;
//! let output = dispatch(&entities, &ToolIntent::PlotModel)?;
//! let json = serde_json::to_string_pretty(&output).unwrap();
//! # Ok::<(), frame_core::errors::ModelError>(())
//! ```
//!
//! ## Modules
//!
//! - [`workbook`] - sheet extraction from `.xlsx` exports
//! - [`model`] - the node/member/section graph and the [`model::Entities`] snapshot
//! - [`forces`] - force/displacement indexing and station discretization
//! - [`reactions`] - support reactions joined to joint coordinates
//! - [`foundation`] - spread-footing pad sizing
//! - [`tools`] - tool intents, payloads, and dispatch
//! - [`errors`] - structured error types
//! - [`diagnostics`] - recovered ingestion problems

pub mod diagnostics;
pub mod errors;
pub mod forces;
pub mod foundation;
pub mod ids;
pub mod model;
pub mod reactions;
pub mod tools;
pub mod workbook;

// Re-export commonly used types at crate root for convenience
pub use diagnostics::Diagnostic;
pub use errors::{ModelError, ModelResult};
pub use ids::{FrameId, NodeId};
pub use model::Entities;
pub use tools::{dispatch, ToolIntent, ToolOutput};
pub use workbook::Workbook;
