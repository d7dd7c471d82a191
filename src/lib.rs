#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

//! # Examples
//! ```
//! use festokes::{
//!     CountingSolver, FieldSummary, InflowProfile, Pane, ResultRenderer, Session, SlotId,
//!     StatusView, StructuredBuilder, TriangleMesh, ValidateOutcome,
//! };
//!
//! #[derive(Default)]
//! struct Quiet {
//!     score: Option<i32>,
//! }
//!
//! impl ResultRenderer<TriangleMesh, FieldSummary> for Quiet {
//!     fn draw_mesh(&mut self, _: Pane, _: &TriangleMesh) {}
//!     fn draw_field(&mut self, _: Pane, _: &FieldSummary, _: &TriangleMesh) {}
//!     fn clear(&mut self, _: Pane) {}
//! }
//!
//! impl StatusView for Quiet {
//!     fn set_busy(&mut self, _: bool) {}
//!     fn warn(&mut self, _: &str) {}
//!     fn show_score(&mut self, score: Option<i32>) {
//!         self.score = score;
//!     }
//! }
//!
//! let mut session = Session::new(
//!     StructuredBuilder::default(),
//!     CountingSolver,
//!     Quiet::default(),
//!     InflowProfile::default(),
//! );
//! session.select(SlotId::Mesh, "Type One Mesh")?;
//! session.select(SlotId::Velocity, "P2")?;
//! session.select(SlotId::Pressure, "P1")?;
//! assert_eq!(session.validate(), ValidateOutcome::Solved);
//! assert_eq!(session.view().score, Some(6));
//! # Ok::<(), festokes::SelectionError>(())
//! ```

mod builder;
mod catalog;
mod config;
mod errors;
mod geometry;
mod mesh;
mod problem;
mod recipe;
mod render;
mod scoring;
mod selection;
mod session;
mod slot;
mod solver;

pub use builder::{ProblemBuilder, StructuredBuilder};
pub use catalog::{
    CardOption, Catalog, SlotKind, EXTRA_CATALOG, MESH_CATALOG, NONE, PRESSURE_CATALOG,
    VELOCITY_CATALOG,
};
pub use config::{AssetConfig, Config, InflowConfig, LogConfig, StructuredConfig, DEFAULT_CONFIG_FILE};
pub use errors::{BuildError, ConfigError, SelectionError, SolveError, ValidateError};
pub use geometry::{unit_square_side, BoundaryName, InflowProfile};
pub use mesh::{GridPattern, TriangleMesh};
pub use problem::{StokesProblem, DIRICHLET_BOUNDARIES, INFLOW_BOUNDARY};
pub use recipe::{
    pressure_space, velocity_space, MeshCategory, MeshRecipe, Refinement, SpaceFamily,
    SpaceRecipe, BUBBLE_EXTRA, CURVE_ORDER,
};
pub use render::{Pane, ResultRenderer, StatusView};
pub use scoring::score;
pub use selection::{SelectionPanel, SelectionState, SlotId};
pub use session::{Phase, Session, ValidateOutcome};
pub use slot::{ChangeObserver, Slot};
pub use solver::{CountingSolver, FieldSummary, StokesSolution, StokesSolver};
