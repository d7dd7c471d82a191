//! One user session: the selection panel plus the validate state machine.

use tracing::{debug, info, warn};

use crate::builder::ProblemBuilder;
use crate::catalog::CardOption;
use crate::errors::{SelectionError, ValidateError};
use crate::geometry::InflowProfile;
use crate::problem::StokesProblem;
use crate::recipe::MeshRecipe;
use crate::render::{Pane, ResultRenderer, StatusView};
use crate::scoring::score;
use crate::selection::{SelectionPanel, SelectionState, SlotId};
use crate::solver::StokesSolver;

/// Where the validate state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a validate request.
    Idle,
    /// The builder is producing the mesh.
    Building,
    /// The solver is running.
    Solving,
    /// The last request completed and its results are displayed.
    Done,
    /// The last request failed; only seen while the failure is reported.
    Failed,
}

/// Result of one validate request.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidateOutcome {
    /// No mesh selected, nothing happened.
    Skipped,
    /// A request was already running and this one was dropped.
    Busy,
    /// Velocity or pressure unset; only the mesh was drawn.
    MeshOnly,
    /// Both fields were solved and drawn.
    Solved,
    /// Building or solving failed; the message was shown to the user.
    Failed(ValidateError),
}

/// Successful end states of a run.
enum Completed {
    /// Mesh drawn, no solve.
    MeshOnly,
    /// Fields drawn.
    Solved,
}

/// A selection panel wired to a builder, a solver and a view.
#[derive(Debug)]
pub struct Session<B, S, V> {
    /// The cards.
    panel: SelectionPanel,
    /// Mesh generation backend.
    builder: B,
    /// Stokes backend.
    solver: S,
    /// Result panes and status widgets.
    view: V,
    /// Inflow data of every solve.
    inflow: InflowProfile,
    /// State machine position.
    phase: Phase,
}

impl<B, S, V> Session<B, S, V>
where
    B: ProblemBuilder,
    S: StokesSolver<B::Domain>,
    V: ResultRenderer<B::Domain, S::Field> + StatusView,
{
    /// Create an idle session with every card unset.
    pub fn new(builder: B, solver: S, view: V, inflow: InflowProfile) -> Self {
        Self {
            panel: SelectionPanel::new(),
            builder,
            solver,
            view,
            inflow,
            phase: Phase::Idle,
        }
    }

    /// Current state machine position.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The selection panel.
    #[must_use]
    pub fn panel(&self) -> &SelectionPanel {
        &self.panel
    }

    /// Mutable access to the panel, e.g. to register slot observers.
    pub fn panel_mut(&mut self) -> &mut SelectionPanel {
        &mut self.panel
    }

    /// The view the session draws into.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Snapshot of the current selections.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.panel.state()
    }

    /// Select an option on one of the cards.
    ///
    /// # Errors
    ///
    /// See [`SelectionPanel::select`].
    pub fn select(&mut self, id: SlotId, name: &str) -> Result<&'static CardOption, SelectionError> {
        self.panel.select(id, name)
    }

    /// Append an extra card.
    pub fn add_extra(&mut self) -> SlotId {
        self.panel.add_extra()
    }

    /// Reset every card, drop the extras and blank the results.
    pub fn clear(&mut self) {
        self.panel.clear();
        for pane in Pane::ALL {
            self.view.clear(pane);
        }
        self.view.show_score(None);
        self.view.show_pressure_robustness(None);
        self.view.show_optimal_convergence(None);
        self.phase = Phase::Idle;
        debug!("session cleared");
    }

    /// Build, solve and display the current pairing.
    ///
    /// Without a mesh this does nothing. Failures are shown on the view and
    /// returned in the outcome; the selections are kept either way. The score
    /// is refreshed after every solve attempt.
    pub fn validate(&mut self) -> ValidateOutcome {
        if matches!(self.phase, Phase::Building | Phase::Solving) {
            warn!("validate requested while a run is in progress; ignored");
            return ValidateOutcome::Busy;
        }
        let state = self.panel.state();
        let Some(recipe) = MeshRecipe::from_state(&state) else {
            debug!("validate without a mesh; nothing to do");
            return ValidateOutcome::Skipped;
        };
        info!(
            mesh = state.mesh.name,
            velocity = state.velocity.name,
            pressure = state.pressure.name,
            extras = state.extras.len(),
            "validating pairing"
        );

        self.view.set_busy(true);
        let result = self.run(&state, &recipe);
        let outcome = match result {
            Ok(Completed::MeshOnly) => {
                self.phase = Phase::Done;
                self.view.set_busy(false);
                return ValidateOutcome::MeshOnly;
            }
            Ok(Completed::Solved) => {
                self.phase = Phase::Done;
                self.view.set_busy(false);
                ValidateOutcome::Solved
            }
            Err(error) => {
                self.phase = Phase::Failed;
                warn!(%error, "validation failed");
                for pane in Pane::ALL {
                    self.view.clear(pane);
                }
                self.view.warn(&error.to_string());
                self.view.set_busy(false);
                self.phase = Phase::Idle;
                ValidateOutcome::Failed(error)
            }
        };

        let points = score(&state);
        let problem = StokesProblem::from_state(&state, self.inflow);
        let robust = problem.as_ref().map(StokesProblem::is_pressure_robust);
        let optimal = problem.as_ref().map(StokesProblem::has_optimal_convergence);
        self.view.show_score(Some(points));
        self.view.show_pressure_robustness(robust);
        self.view.show_optimal_convergence(optimal);
        info!(points, ?robust, ?optimal, "pairing scored");
        outcome
    }

    /// The Building and Solving phases.
    fn run(&mut self, state: &SelectionState, recipe: &MeshRecipe) -> Result<Completed, ValidateError> {
        self.phase = Phase::Building;
        let domain = self.builder.build(recipe)?;

        let Some(problem) = StokesProblem::from_state(state, self.inflow) else {
            debug!("velocity or pressure unset; drawing the mesh only");
            for pane in Pane::ALL {
                self.view.draw_mesh(pane, &domain);
            }
            return Ok(Completed::MeshOnly);
        };

        self.phase = Phase::Solving;
        let solution = self.solver.solve(&domain, &problem)?;
        self.view
            .draw_field(Pane::Velocity, &solution.velocity, &domain);
        self.view
            .draw_field(Pane::Pressure, &solution.pressure, &domain);
        Ok(Completed::Solved)
    }
}
