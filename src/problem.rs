//! The Stokes problem handed to a solver.

use serde::Serialize;

use crate::geometry::{BoundaryName, InflowProfile};
use crate::recipe::{pressure_space, velocity_space, SpaceFamily, SpaceRecipe, BUBBLE_EXTRA};
use crate::selection::SelectionState;

/// Segment carrying the inflow profile.
pub const INFLOW_BOUNDARY: BoundaryName = BoundaryName::Left;

/// Segments where the velocity is prescribed; the remaining ones are outflow.
pub const DIRICHLET_BOUNDARIES: [BoundaryName; 2] = [BoundaryName::Top, BoundaryName::Left];

/// Spaces and boundary data of one Stokes solve.
///
/// The bilinear form is fixed: `(grad u, grad v) + (div u, q) + (div v, p)`
/// with the bubble component added to `u` and `v` when enrichment is on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StokesProblem {
    /// Vector-valued velocity space.
    pub velocity: SpaceRecipe,
    /// Scalar pressure space.
    pub pressure: SpaceRecipe,
    /// Enrich the velocity with cubic element bubbles.
    pub bubble: bool,
    /// Profile prescribed on [`INFLOW_BOUNDARY`].
    pub inflow: InflowProfile,
}

impl StokesProblem {
    /// Derive the problem, or `None` while the velocity or pressure card is unset.
    ///
    /// # Examples
    /// ```
    /// use festokes::{InflowProfile, SelectionPanel, SlotId, StokesProblem};
    ///
    /// let mut panel = SelectionPanel::new();
    /// panel.select(SlotId::Velocity, "P2").expect("listed");
    /// assert!(StokesProblem::from_state(&panel.state(), InflowProfile::default()).is_none());
    ///
    /// panel.select(SlotId::Pressure, "P1").expect("listed");
    /// let problem = StokesProblem::from_state(&panel.state(), InflowProfile::default())
    ///     .expect("both spaces chosen");
    /// assert_eq!(problem.velocity.order, 2);
    /// assert!(!problem.bubble);
    /// ```
    #[must_use]
    pub fn from_state(state: &SelectionState, inflow: InflowProfile) -> Option<Self> {
        Some(Self {
            velocity: velocity_space(state.velocity.name)?,
            pressure: pressure_space(state.pressure.name)?,
            bubble: state.has_extra(BUBBLE_EXTRA),
            inflow,
        })
    }

    /// Polynomial order of the velocity including bubble enrichment.
    #[must_use]
    pub fn velocity_order(&self) -> u32 {
        if self.bubble {
            self.velocity.order.max(3)
        } else {
            self.velocity.order
        }
    }

    /// Whether discretely divergence-free velocities are exactly divergence free.
    ///
    /// This holds when the velocity is H(div)-conforming and the pressure space
    /// is discontinuous and contains the divergence of every discrete velocity,
    /// which makes the velocity error independent of the pressure.
    #[must_use]
    pub fn is_pressure_robust(&self) -> bool {
        let hdiv_conforming = match self.velocity.family {
            SpaceFamily::Bdm => true,
            SpaceFamily::Lagrange => self.velocity.continuous,
            SpaceFamily::CrouzeixRaviart => false,
        };
        let divergence_order = self.velocity_order().saturating_sub(1);
        hdiv_conforming && !self.pressure.continuous && self.pressure.order >= divergence_order
    }

    /// Whether the velocity and pressure errors decay at the same rate.
    ///
    /// A velocity of order `k` converges with order `k` in the energy norm and
    /// a pressure of order `m` with order `m + 1` in L2, so the pair is balanced
    /// when `m + 1 == k`. Bubbles stabilize but do not raise the approximation
    /// order, so they are not counted here.
    #[must_use]
    pub fn has_optimal_convergence(&self) -> bool {
        self.pressure.order + 1 == self.velocity.order
    }
}
