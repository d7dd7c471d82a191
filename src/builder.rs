//! Mesh builders.

use tracing::info;

use crate::errors::BuildError;
use crate::mesh::{GridPattern, TriangleMesh};
use crate::recipe::{MeshCategory, MeshRecipe, Refinement};

/// Produces a domain from a mesh recipe.
///
/// Implementations wrap a meshing library. The returned domain is opaque to
/// the session; it is only passed on to the solver and renderer.
pub trait ProblemBuilder {
    /// Mesh handle produced by the builder.
    type Domain;

    /// Generate the base mesh, apply the refinements in order, then curve it.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the recipe cannot be realised.
    fn build(&mut self, recipe: &MeshRecipe) -> Result<Self::Domain, BuildError>;
}

/// Builds the structured unit-square meshes without an external mesher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructuredBuilder {
    /// Cells along x.
    nx: usize,
    /// Cells along y.
    ny: usize,
}

impl Default for StructuredBuilder {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl StructuredBuilder {
    /// Create a builder for an `nx` by `ny` grid.
    #[must_use]
    pub const fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }
}

impl ProblemBuilder for StructuredBuilder {
    type Domain = TriangleMesh;

    /// Channel meshes need a CAD kernel and are rejected. Curving only
    /// applies to the channel, so structured meshes are never curved.
    ///
    /// # Examples
    /// ```
    /// use festokes::{MeshCategory, MeshRecipe, ProblemBuilder, Refinement, StructuredBuilder};
    ///
    /// let recipe = MeshRecipe {
    ///     category: MeshCategory::TypeOne,
    ///     curve_order: None,
    ///     refinements: vec![Refinement::Alfeld],
    /// };
    /// let mesh = StructuredBuilder::new(2, 2).build(&recipe).expect("structured");
    /// assert_eq!(mesh.triangle_count(), 24);
    /// ```
    fn build(&mut self, recipe: &MeshRecipe) -> Result<TriangleMesh, BuildError> {
        let pattern = match recipe.category {
            MeshCategory::TypeOne => GridPattern::TypeOne,
            MeshCategory::CrissCross => GridPattern::CrissCross,
            MeshCategory::Channel => return Err(BuildError::UnsupportedMesh(recipe.category)),
        };
        let mut mesh = TriangleMesh::structured(self.nx, self.ny, pattern)?;
        for refinement in &recipe.refinements {
            mesh = match refinement {
                Refinement::Alfeld => mesh.split_alfeld()?,
                Refinement::PowellSabin => mesh.split_powell_sabin()?,
            };
        }
        info!(
            category = %recipe.category,
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            triangles = mesh.triangle_count(),
            "mesh built"
        );
        Ok(mesh)
    }
}
