//! Triangle meshes on the unit square and the macro-element splits.

use std::collections::{HashMap, HashSet};

use nalgebra::Point2;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use tracing::debug;

use crate::errors::BuildError;
use crate::geometry::{unit_square_side, BoundaryName};

/// Internal representation of a mesh edge.
#[derive(Clone, Debug)]
struct MeshEdge {
    /// Boundary segment the edge lies on, `None` for interior edges.
    boundary: Option<BoundaryName>,
}

/// How each cell of a structured grid is cut into triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridPattern {
    /// One diagonal per cell, two triangles.
    TypeOne,
    /// Both diagonals per cell, four triangles meeting at the cell centre.
    CrissCross,
}

/// Conforming triangulation stored as a vertex/edge graph plus a triangle list.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    /// Vertices as nodes, mesh edges as graph edges.
    graph: UnGraph<Point2<f64>, MeshEdge>,
    /// Counter-clockwise vertex triples.
    triangles: Vec<[NodeIndex; 3]>,
}

impl TriangleMesh {
    /// Build a mesh of the unit square from vertex coordinates and triangles.
    ///
    /// Edges used by exactly one triangle are tagged with the side of the square
    /// they lie on. Triangles are reoriented counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownVertex`] when a triangle refers to a vertex
    /// index past the end of `vertices`, and [`BuildError::DegenerateTriangle`]
    /// for a triangle with zero area.
    pub fn from_triangles(
        vertices: Vec<Point2<f64>>,
        triangles: &[[usize; 3]],
    ) -> Result<Self, BuildError> {
        let mut graph = UnGraph::with_capacity(vertices.len(), triangles.len() * 2);
        let nodes: Vec<NodeIndex> = vertices.into_iter().map(|v| graph.add_node(v)).collect();

        let mut oriented = Vec::with_capacity(triangles.len());
        let mut uses: HashMap<EdgeIndex, usize> = HashMap::new();
        for (idx, corners) in triangles.iter().enumerate() {
            let mut resolved = [NodeIndex::end(); 3];
            for (slot, &vertex) in resolved.iter_mut().zip(corners) {
                *slot = *nodes.get(vertex).ok_or(BuildError::UnknownVertex {
                    triangle: idx,
                    vertex,
                })?;
            }
            let [a, b, c] = resolved;
            let area = signed_area(&graph[a], &graph[b], &graph[c]);
            if area.abs() < f64::EPSILON {
                return Err(BuildError::DegenerateTriangle(idx));
            }
            let triangle = if area > 0.0 { [a, b, c] } else { [a, c, b] };
            for (start, end) in triangle_edges(&triangle) {
                let edge = graph
                    .find_edge(start, end)
                    .unwrap_or_else(|| graph.add_edge(start, end, MeshEdge { boundary: None }));
                *uses.entry(edge).or_insert(0) += 1;
            }
            oriented.push(triangle);
        }

        for (edge, count) in uses {
            if count == 1 {
                if let Some((start, end)) = graph.edge_endpoints(edge) {
                    let midpoint = nalgebra::center(&graph[start], &graph[end]);
                    graph[edge].boundary = unit_square_side(&midpoint);
                }
            }
        }

        Ok(Self {
            graph,
            triangles: oriented,
        })
    }

    /// Structured mesh of the unit square with `nx` by `ny` cells.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyGrid`] when either dimension is zero.
    ///
    /// # Examples
    /// ```
    /// use festokes::{GridPattern, TriangleMesh};
    ///
    /// let mesh = TriangleMesh::structured(2, 2, GridPattern::TypeOne).expect("non-empty grid");
    /// assert_eq!(mesh.vertex_count(), 9);
    /// assert_eq!(mesh.triangle_count(), 8);
    /// ```
    pub fn structured(nx: usize, ny: usize, pattern: GridPattern) -> Result<Self, BuildError> {
        if nx == 0 || ny == 0 {
            return Err(BuildError::EmptyGrid { nx, ny });
        }
        let corner = |i: usize, j: usize| j * (nx + 1) + i;
        let mut vertices: Vec<Point2<f64>> = (0..=ny)
            .flat_map(|j| (0..=nx).map(move |i| Point2::new(i as f64 / nx as f64, j as f64 / ny as f64)))
            .collect();
        let mut triangles = Vec::new();
        for j in 0..ny {
            for i in 0..nx {
                let sw = corner(i, j);
                let se = corner(i + 1, j);
                let nw = corner(i, j + 1);
                let ne = corner(i + 1, j + 1);
                match pattern {
                    GridPattern::TypeOne => {
                        triangles.push([sw, se, ne]);
                        triangles.push([sw, ne, nw]);
                    }
                    GridPattern::CrissCross => {
                        let centre = vertices.len();
                        vertices.push(nalgebra::center(&vertices[sw], &vertices[ne]));
                        triangles.push([sw, se, centre]);
                        triangles.push([se, ne, centre]);
                        triangles.push([ne, nw, centre]);
                        triangles.push([nw, sw, centre]);
                    }
                }
            }
        }
        debug!(nx, ny, ?pattern, "structured mesh generated");
        Self::from_triangles(vertices, &triangles)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Coordinates of a vertex.
    #[must_use]
    pub fn vertex(&self, node: NodeIndex) -> Option<&Point2<f64>> {
        self.graph.node_weight(node)
    }

    /// Return `true` when at least one edge lies on `name`.
    #[must_use]
    pub fn has_boundary(&self, name: BoundaryName) -> bool {
        self.graph
            .edge_weights()
            .any(|edge| edge.boundary == Some(name))
    }

    /// Number of edges on any of the listed segments.
    #[must_use]
    pub fn boundary_edge_count(&self, names: &[BoundaryName]) -> usize {
        self.graph
            .edge_weights()
            .filter(|edge| edge.boundary.map_or(false, |b| names.contains(&b)))
            .count()
    }

    /// Vertices touching an edge on any of the listed segments.
    #[must_use]
    pub fn boundary_vertices(&self, names: &[BoundaryName]) -> Vec<NodeIndex> {
        let mut seen = HashSet::new();
        for edge in self.graph.edge_indices() {
            let on_segment = self.graph[edge]
                .boundary
                .map_or(false, |b| names.contains(&b));
            if let (true, Some((start, end))) = (on_segment, self.graph.edge_endpoints(edge)) {
                seen.insert(start);
                seen.insert(end);
            }
        }
        let mut vertices: Vec<_> = seen.into_iter().collect();
        vertices.sort();
        vertices
    }

    /// Total area covered by the triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| signed_area(&self.graph[a], &self.graph[b], &self.graph[c]))
            .sum()
    }

    /// Alfeld split: connect every triangle's barycentre to its three corners.
    ///
    /// # Errors
    ///
    /// Propagates [`BuildError::DegenerateTriangle`] from rebuilding the mesh.
    pub fn split_alfeld(&self) -> Result<Self, BuildError> {
        let mut vertices = self.vertex_list();
        let mut triangles = Vec::with_capacity(self.triangles.len() * 3);
        for &[a, b, c] in &self.triangles {
            let centre = vertices.len();
            vertices.push(barycentre(&self.graph[a], &self.graph[b], &self.graph[c]));
            let (a, b, c) = (a.index(), b.index(), c.index());
            triangles.push([a, b, centre]);
            triangles.push([b, c, centre]);
            triangles.push([c, a, centre]);
        }
        debug!(triangles = triangles.len(), "Alfeld split applied");
        Self::from_triangles(vertices, &triangles)
    }

    /// Powell-Sabin split: connect every triangle's barycentre to its corners
    /// and edge midpoints. Midpoints are shared with the neighbouring triangle.
    ///
    /// # Errors
    ///
    /// Propagates [`BuildError::DegenerateTriangle`] from rebuilding the mesh.
    pub fn split_powell_sabin(&self) -> Result<Self, BuildError> {
        let mut vertices = self.vertex_list();
        let mut midpoints: HashMap<EdgeIndex, usize> = HashMap::new();
        for edge in self.graph.edge_indices() {
            if let Some((start, end)) = self.graph.edge_endpoints(edge) {
                midpoints.insert(edge, vertices.len());
                vertices.push(nalgebra::center(&self.graph[start], &self.graph[end]));
            }
        }

        let mut triangles = Vec::with_capacity(self.triangles.len() * 6);
        for triangle in &self.triangles {
            let [a, b, c] = *triangle;
            let centre = vertices.len();
            vertices.push(barycentre(&self.graph[a], &self.graph[b], &self.graph[c]));
            for (start, end) in triangle_edges(triangle) {
                let midpoint = self
                    .graph
                    .find_edge(start, end)
                    .and_then(|edge| midpoints.get(&edge).copied())
                    .ok_or_else(|| {
                        BuildError::External(format!(
                            "edge {}-{} missing from mesh graph",
                            start.index(),
                            end.index()
                        ))
                    })?;
                triangles.push([start.index(), midpoint, centre]);
                triangles.push([midpoint, end.index(), centre]);
            }
        }
        debug!(triangles = triangles.len(), "Powell-Sabin split applied");
        Self::from_triangles(vertices, &triangles)
    }

    /// Vertex coordinates in node index order.
    fn vertex_list(&self) -> Vec<Point2<f64>> {
        self.graph.node_weights().copied().collect()
    }
}

/// Twice-halved cross product: positive for counter-clockwise corners.
fn signed_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    0.5 * (b - a).perp(&(c - a))
}

/// Arithmetic mean of three corners.
fn barycentre(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Point2<f64> {
    Point2::from((a.coords + b.coords + c.coords) / 3.0)
}

/// The three edges of a triangle as ordered corner pairs.
fn triangle_edges(triangle: &[NodeIndex; 3]) -> [(NodeIndex, NodeIndex); 3] {
    let [a, b, c] = *triangle;
    [(a, b), (b, c), (c, a)]
}
