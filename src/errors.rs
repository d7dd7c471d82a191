//! Error types produced while selecting options or validating a pairing.

use thiserror::Error;

use crate::catalog::SlotKind;
use crate::recipe::MeshCategory;

/// Error returned when a selection does not fit the panel.
///
/// These are programming-level failures: a user interface only offers
/// catalog members, so reaching one of them means the caller passed a value
/// it did not obtain from a catalog.
///
/// # Examples
///
/// ```
/// use festokes::{SelectionError, SelectionPanel, SlotId, SlotKind};
///
/// let mut panel = SelectionPanel::new();
/// let error = panel
///     .select(SlotId::Mesh, "Hexahedral Mesh")
///     .expect_err("unknown mesh is rejected");
/// assert_eq!(
///     error,
///     SelectionError::InvalidOption {
///         kind: SlotKind::Mesh,
///         name: "Hexahedral Mesh".to_string(),
///     }
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Returned when an option is not a member of the slot's catalog.
    #[error("{name:?} is not a {kind} option")]
    InvalidOption {
        /// Catalog the option was checked against.
        kind: SlotKind,
        /// Name of the rejected option.
        name: String,
    },
    /// Returned when an extra slot index does not exist.
    #[error("extra slot {0} does not exist")]
    UnknownSlot(usize),
}

/// Error returned when the mesh for a pairing cannot be built.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
    /// Returned when a builder has no way to generate the requested category.
    #[error("{0} meshes are not supported by this builder")]
    UnsupportedMesh(MeshCategory),
    /// Returned when a structured grid has no cells.
    #[error("structured grid needs at least one cell in each direction (received {nx}x{ny})")]
    EmptyGrid {
        /// Number of cells along x.
        nx: usize,
        /// Number of cells along y.
        ny: usize,
    },
    /// Returned when a triangle encloses no area.
    #[error("triangle {0} is degenerate")]
    DegenerateTriangle(usize),
    /// Returned when a triangle names a vertex that was not supplied.
    #[error("triangle {triangle} refers to unknown vertex {vertex}")]
    UnknownVertex {
        /// Index of the offending triangle.
        triangle: usize,
        /// Vertex index it refers to.
        vertex: usize,
    },
    /// Returned by third-party builders.
    #[error("{0}")]
    External(String),
}

/// Error returned when the Stokes system for a pairing cannot be solved.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned when the saddle-point matrix is singular by dimension count.
    #[error(
        "saddle point system is singular: {pressure} pressure unknowns against \
         {velocity} free velocity unknowns"
    )]
    Singular {
        /// Number of pressure unknowns.
        pressure: usize,
        /// Number of velocity unknowns left after boundary conditions.
        velocity: usize,
    },
    /// Returned when the boundary segment carrying the inflow is missing.
    #[error("boundary segment {0:?} does not exist on this mesh")]
    MissingBoundary(&'static str),
    /// Returned by third-party solvers.
    #[error("{0}")]
    External(String),
}

/// Failure caught at the validate boundary.
///
/// The display text is shown to the user unchanged.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidateError {
    /// The mesh could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// The system could not be solved.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Error returned when the configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Location of the configuration file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid YAML for [`Config`](crate::Config).
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Location of the configuration file.
        path: String,
        /// Underlying parser failure.
        #[source]
        source: serde_yaml::Error,
    },
    /// `log.level` is not a tracing level.
    #[error("unknown log level {0:?} (expected trace, debug, info, warn or error)")]
    LogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_error_shows_inner_message_verbatim() {
        let solve = SolveError::Singular {
            pressure: 242,
            velocity: 200,
        };
        let error = ValidateError::from(solve.clone());
        assert_eq!(error.to_string(), solve.to_string());

        let build = BuildError::UnsupportedMesh(MeshCategory::Channel);
        assert_eq!(
            ValidateError::from(build).to_string(),
            "channel meshes are not supported by this builder"
        );
    }

    #[test]
    fn singular_message_names_both_counts() {
        let message = SolveError::Singular {
            pressure: 121,
            velocity: 98,
        }
        .to_string();
        assert!(message.contains("121 pressure unknowns"));
        assert!(message.contains("98 free velocity unknowns"));
    }
}
