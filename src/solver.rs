//! Stokes solvers.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::SolveError;
use crate::mesh::TriangleMesh;
use crate::problem::{StokesProblem, DIRICHLET_BOUNDARIES, INFLOW_BOUNDARY};
use crate::recipe::{SpaceFamily, SpaceRecipe};

/// Velocity and pressure fields of a solved system.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StokesSolution<F> {
    /// Velocity field, bubble component included.
    pub velocity: F,
    /// Pressure field.
    pub pressure: F,
}

/// Assembles and solves the saddle-point system on a domain.
pub trait StokesSolver<D> {
    /// Field object handed to the renderer.
    type Field;

    /// Build the spaces, assemble, apply the inflow and solve.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] for singular systems or unsupported combinations.
    fn solve(
        &mut self,
        domain: &D,
        problem: &StokesProblem,
    ) -> Result<StokesSolution<Self::Field>, SolveError>;
}

/// What the counting solver reports for each field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSummary {
    /// Description of the space, e.g. `continuous P2`.
    pub space: String,
    /// Unknowns of the space.
    pub unknowns: usize,
    /// Unknowns left after Dirichlet conditions.
    pub free_unknowns: usize,
    /// Largest inward normal velocity prescribed at an inflow vertex, velocity
    /// only. Vertices above the profile height carry backflow and do not count.
    pub peak_inflow: Option<f64>,
}

/// Checks the dimension count of a pairing instead of assembling it.
///
/// The saddle-point matrix can only be invertible when the pressure space has
/// no more unknowns than the free velocity space, so a pairing failing the
/// count is reported exactly like a singular solve. Passing the count does
/// not prove stability.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountingSolver;

impl StokesSolver<TriangleMesh> for CountingSolver {
    type Field = FieldSummary;

    fn solve(
        &mut self,
        mesh: &TriangleMesh,
        problem: &StokesProblem,
    ) -> Result<StokesSolution<FieldSummary>, SolveError> {
        if !mesh.has_boundary(INFLOW_BOUNDARY) {
            return Err(SolveError::MissingBoundary(INFLOW_BOUNDARY.as_str()));
        }
        let counts = EntityCounts::of(mesh);

        let (mut unknowns, constrained) = velocity_unknowns(&problem.velocity, &counts);
        if problem.bubble {
            // Bubbles vanish on every edge, so none of them is constrained.
            debug!("adding cubic bubbles to the velocity space");
            unknowns += 2 * counts.triangles;
        }
        let free_velocity = unknowns - constrained;
        let pressure_unknowns = scalar_unknowns(&problem.pressure, &counts);
        info!(
            velocity = %problem.velocity,
            pressure = %problem.pressure,
            free_velocity,
            pressure_unknowns,
            "spaces sized"
        );
        if pressure_unknowns > free_velocity {
            return Err(SolveError::Singular {
                pressure: pressure_unknowns,
                velocity: free_velocity,
            });
        }

        // The profile points in +x, which is the inward normal on the left side.
        let peak_inflow = mesh
            .boundary_vertices(&[INFLOW_BOUNDARY])
            .into_iter()
            .filter_map(|node| mesh.vertex(node))
            .map(|at| problem.inflow.velocity(at).x)
            .reduce(f64::max);

        Ok(StokesSolution {
            velocity: FieldSummary {
                space: describe(&problem.velocity, problem.bubble),
                unknowns,
                free_unknowns: free_velocity,
                peak_inflow,
            },
            pressure: FieldSummary {
                space: problem.pressure.to_string(),
                unknowns: pressure_unknowns,
                free_unknowns: pressure_unknowns,
                peak_inflow: None,
            },
        })
    }
}

/// Mesh entity counts the space dimensions depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EntityCounts {
    /// All vertices.
    vertices: usize,
    /// All edges.
    edges: usize,
    /// All triangles.
    triangles: usize,
    /// Vertices on a Dirichlet segment.
    dirichlet_vertices: usize,
    /// Edges on a Dirichlet segment.
    dirichlet_edges: usize,
}

impl EntityCounts {
    /// Count the entities of a mesh.
    fn of(mesh: &TriangleMesh) -> Self {
        Self {
            vertices: mesh.vertex_count(),
            edges: mesh.edge_count(),
            triangles: mesh.triangle_count(),
            dirichlet_vertices: mesh.boundary_vertices(&DIRICHLET_BOUNDARIES).len(),
            dirichlet_edges: mesh.boundary_edge_count(&DIRICHLET_BOUNDARIES),
        }
    }
}

/// Unknowns of a scalar space.
fn scalar_unknowns(space: &SpaceRecipe, counts: &EntityCounts) -> usize {
    let k = space.order as usize;
    match space.family {
        SpaceFamily::Lagrange if space.continuous && k > 0 => {
            counts.vertices
                + (k - 1) * counts.edges
                + (k - 1) * k.saturating_sub(2) / 2 * counts.triangles
        }
        SpaceFamily::Lagrange => (k + 1) * (k + 2) / 2 * counts.triangles,
        SpaceFamily::CrouzeixRaviart => counts.edges,
        SpaceFamily::Bdm => (k + 1) * counts.edges + (k - 1) * (k + 1) * counts.triangles,
    }
}

/// Scalar unknowns sitting on Dirichlet segments.
fn scalar_constrained(space: &SpaceRecipe, counts: &EntityCounts) -> usize {
    let k = space.order as usize;
    match space.family {
        SpaceFamily::Lagrange if space.continuous && k > 0 => {
            counts.dirichlet_vertices + (k - 1) * counts.dirichlet_edges
        }
        SpaceFamily::CrouzeixRaviart => counts.dirichlet_edges,
        _ => 0,
    }
}

/// Velocity unknowns and how many of them the boundary condition fixes.
fn velocity_unknowns(space: &SpaceRecipe, counts: &EntityCounts) -> (usize, usize) {
    match space.family {
        // BDM is vector valued already and carries no essential condition.
        SpaceFamily::Bdm => (scalar_unknowns(space, counts), 0),
        _ => (
            2 * scalar_unknowns(space, counts),
            2 * scalar_constrained(space, counts),
        ),
    }
}

/// Space description including bubble enrichment.
fn describe(space: &SpaceRecipe, bubble: bool) -> String {
    if bubble {
        format!("{space} + cubic bubbles")
    } else {
        space.to_string()
    }
}
