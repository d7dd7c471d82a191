//! Tables mapping card names to mesh and finite element space recipes.

use std::fmt;

use serde::Serialize;

use crate::selection::SelectionState;

/// Polynomial order used to curve the channel mesh.
pub const CURVE_ORDER: u32 = 5;

/// Name of the extra that enriches the velocity space with cubic bubbles.
pub const BUBBLE_EXTRA: &str = "P3 Bubble";

/// How the base mesh is generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeshCategory {
    /// Unstructured triangulation of the channel with a circular obstacle.
    Channel,
    /// Structured unit square, every cell cut by one diagonal.
    TypeOne,
    /// Structured unit square, every cell cut by both diagonals.
    CrissCross,
}

impl fmt::Display for MeshCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MeshCategory::Channel => "channel",
            MeshCategory::TypeOne => "type one",
            MeshCategory::CrissCross => "criss-cross",
        })
    }
}

/// Macro-element split applied after the base mesh is generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Refinement {
    /// Split every triangle into three at its barycentre.
    Alfeld,
    /// Split every triangle into six through its barycentre and edge midpoints.
    PowellSabin,
}

/// Everything a builder needs to produce the mesh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MeshRecipe {
    /// Base mesh generator.
    pub category: MeshCategory,
    /// Curve the boundary with this polynomial order after refinement.
    pub curve_order: Option<u32>,
    /// Splits to apply, in extras order.
    pub refinements: Vec<Refinement>,
}

/// Mesh card name to `(category, curved)`.
const MESH_TABLE: &[(&str, MeshCategory, bool)] = &[
    ("Unstructured Mesh", MeshCategory::Channel, false),
    ("Curved Mesh", MeshCategory::Channel, true),
    ("Type One Mesh", MeshCategory::TypeOne, false),
    ("Singular Vertex Mesh", MeshCategory::CrissCross, false),
];

/// Extra card name to the split it requests.
const REFINEMENT_TABLE: &[(&str, Refinement)] = &[
    ("Alfeld Split", Refinement::Alfeld),
    ("Powell-Sabin Split", Refinement::PowellSabin),
];

impl MeshRecipe {
    /// Derive the mesh recipe, or `None` while no mesh card is selected.
    ///
    /// # Examples
    /// ```
    /// use festokes::{MeshCategory, MeshRecipe, Refinement, SelectionPanel, SlotId};
    ///
    /// let mut panel = SelectionPanel::new();
    /// assert!(MeshRecipe::from_state(&panel.state()).is_none());
    ///
    /// panel.select(SlotId::Mesh, "Type One Mesh").expect("listed");
    /// let extra = panel.add_extra();
    /// panel.select(extra, "Powell-Sabin Split").expect("listed");
    /// let recipe = MeshRecipe::from_state(&panel.state()).expect("mesh selected");
    /// assert_eq!(recipe.category, MeshCategory::TypeOne);
    /// assert_eq!(recipe.refinements, vec![Refinement::PowellSabin]);
    /// ```
    #[must_use]
    pub fn from_state(state: &SelectionState) -> Option<Self> {
        let (_, category, curved) = MESH_TABLE
            .iter()
            .find(|(name, _, _)| *name == state.mesh.name)?;
        let refinements = state
            .extras
            .iter()
            .filter_map(|extra| {
                REFINEMENT_TABLE
                    .iter()
                    .find(|(name, _)| *name == extra.name)
                    .map(|(_, refinement)| *refinement)
            })
            .collect();
        Some(Self {
            category: *category,
            curve_order: curved.then_some(CURVE_ORDER),
            refinements,
        })
    }
}

/// Family of a finite element space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpaceFamily {
    /// Piecewise polynomials of total degree `order`.
    Lagrange,
    /// Nonconforming linears continuous at edge midpoints.
    CrouzeixRaviart,
    /// Brezzi-Douglas-Marini, normal components continuous across edges.
    Bdm,
}

impl fmt::Display for SpaceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpaceFamily::Lagrange => "Lagrange",
            SpaceFamily::CrouzeixRaviart => "Crouzeix-Raviart",
            SpaceFamily::Bdm => "BDM",
        })
    }
}

/// A finite element space request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SpaceRecipe {
    /// Element family.
    pub family: SpaceFamily,
    /// Polynomial order.
    pub order: u32,
    /// Fully continuous across element boundaries (H1-conforming).
    pub continuous: bool,
}

impl SpaceRecipe {
    /// Construct a recipe.
    #[must_use]
    pub const fn new(family: SpaceFamily, order: u32, continuous: bool) -> Self {
        Self {
            family,
            order,
            continuous,
        }
    }
}

impl fmt::Display for SpaceRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            SpaceFamily::Lagrange if self.continuous => write!(f, "continuous P{}", self.order),
            SpaceFamily::Lagrange => write!(f, "discontinuous P{}", self.order),
            family => write!(f, "{family} order {}", self.order),
        }
    }
}

/// Shorthand for the tables below.
const fn lagrange(order: u32, continuous: bool) -> SpaceRecipe {
    SpaceRecipe::new(SpaceFamily::Lagrange, order, continuous)
}

/// Shorthand for the tables below.
const fn bdm(order: u32) -> SpaceRecipe {
    SpaceRecipe::new(SpaceFamily::Bdm, order, false)
}

/// Velocity card name to vector-valued space.
const VELOCITY_TABLE: &[(&str, SpaceRecipe)] = &[
    ("P1", lagrange(1, true)),
    ("P1*", lagrange(1, false)),
    ("BDM1", bdm(1)),
    (
        "Crouzeix-Raviart",
        SpaceRecipe::new(SpaceFamily::CrouzeixRaviart, 1, false),
    ),
    ("P2", lagrange(2, true)),
    ("P2*", lagrange(2, false)),
    ("BDM2", bdm(2)),
    ("P3", lagrange(3, true)),
    ("P3*", lagrange(3, false)),
    ("BDM3", bdm(3)),
    ("BDM4", bdm(4)),
    ("P4", lagrange(4, true)),
    ("P4*", lagrange(4, false)),
];

/// Pressure card name to scalar space.
const PRESSURE_TABLE: &[(&str, SpaceRecipe)] = &[
    ("P0", lagrange(0, false)),
    ("P1", lagrange(1, true)),
    ("P1*", lagrange(1, false)),
    ("P2", lagrange(2, true)),
    ("P2*", lagrange(2, false)),
    ("P3", lagrange(3, true)),
    ("P3*", lagrange(3, false)),
];

/// Velocity space for a velocity card, `None` for the sentinel.
#[must_use]
pub fn velocity_space(name: &str) -> Option<SpaceRecipe> {
    lookup(VELOCITY_TABLE, name)
}

/// Pressure space for a pressure card, `None` for the sentinel.
#[must_use]
pub fn pressure_space(name: &str) -> Option<SpaceRecipe> {
    lookup(PRESSURE_TABLE, name)
}

/// Find `name` in a space table.
fn lookup(table: &[(&str, SpaceRecipe)], name: &str) -> Option<SpaceRecipe> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, recipe)| *recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MESH_CATALOG, PRESSURE_CATALOG, VELOCITY_CATALOG};
    use crate::selection::{SelectionPanel, SlotId};

    #[test]
    fn every_card_except_the_sentinel_has_a_recipe() {
        for option in VELOCITY_CATALOG.options() {
            assert_eq!(velocity_space(option.name).is_some(), !option.is_none());
        }
        for option in PRESSURE_CATALOG.options() {
            assert_eq!(pressure_space(option.name).is_some(), !option.is_none());
        }
        for option in MESH_CATALOG.options() {
            let listed = MESH_TABLE.iter().any(|(name, _, _)| *name == option.name);
            assert_eq!(listed, !option.is_none());
        }
    }

    #[test]
    fn starred_cards_are_discontinuous() {
        assert_eq!(velocity_space("P3*"), Some(lagrange(3, false)));
        assert_eq!(velocity_space("P3"), Some(lagrange(3, true)));
        assert_eq!(pressure_space("P2*"), Some(lagrange(2, false)));
        assert_eq!(pressure_space("P0"), Some(lagrange(0, false)));
    }

    #[test]
    fn bdm_order_comes_from_the_table() {
        let space = velocity_space("BDM4").expect("listed");
        assert_eq!(space.family, SpaceFamily::Bdm);
        assert_eq!(space.order, 4);
        assert_eq!(space.to_string(), "BDM order 4");
    }

    #[test]
    fn curved_mesh_requests_curving() {
        let mut panel = SelectionPanel::new();
        panel.select(SlotId::Mesh, "Curved Mesh").expect("listed");
        let recipe = MeshRecipe::from_state(&panel.state()).expect("mesh selected");
        assert_eq!(recipe.category, MeshCategory::Channel);
        assert_eq!(recipe.curve_order, Some(CURVE_ORDER));

        panel.select(SlotId::Mesh, "Unstructured Mesh").expect("listed");
        let recipe = MeshRecipe::from_state(&panel.state()).expect("mesh selected");
        assert_eq!(recipe.curve_order, None);
    }

    #[test]
    fn refinements_follow_extras_order() {
        let mut panel = SelectionPanel::new();
        panel.select(SlotId::Mesh, "Singular Vertex Mesh").expect("listed");
        for name in ["Alfeld Split", "Interior Penalty", "Powell-Sabin Split", "Alfeld Split"] {
            let extra = panel.add_extra();
            panel.select(extra, name).expect("listed");
        }
        let recipe = MeshRecipe::from_state(&panel.state()).expect("mesh selected");
        assert_eq!(
            recipe.refinements,
            vec![
                Refinement::Alfeld,
                Refinement::PowellSabin,
                Refinement::Alfeld
            ]
        );
    }
}
