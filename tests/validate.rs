use std::cell::RefCell;
use std::rc::Rc;

use festokes::{
    score, CountingSolver, FieldSummary, InflowProfile, Pane, Phase, ProblemBuilder,
    ResultRenderer, Session, SlotId, SlotKind, SolveError, StatusView, StokesProblem,
    StokesSolution, StokesSolver, StructuredBuilder, TriangleMesh, ValidateError, ValidateOutcome,
};

/// Everything the session showed, in order.
#[derive(Debug, Default)]
struct Screen {
    velocity: Option<String>,
    pressure: Option<String>,
    busy: bool,
    busy_toggles: Vec<bool>,
    warnings: Vec<String>,
    score: Option<i32>,
    pressure_robust: Option<bool>,
    optimal_convergence: Option<bool>,
}

impl Screen {
    fn pane(&mut self, pane: Pane) -> &mut Option<String> {
        match pane {
            Pane::Velocity => &mut self.velocity,
            Pane::Pressure => &mut self.pressure,
        }
    }
}

impl ResultRenderer<TriangleMesh, FieldSummary> for Screen {
    fn draw_mesh(&mut self, pane: Pane, mesh: &TriangleMesh) {
        *self.pane(pane) = Some(format!("mesh {}", mesh.triangle_count()));
    }

    fn draw_field(&mut self, pane: Pane, field: &FieldSummary, _mesh: &TriangleMesh) {
        *self.pane(pane) = Some(field.space.clone());
    }

    fn clear(&mut self, pane: Pane) {
        *self.pane(pane) = None;
    }
}

impl StatusView for Screen {
    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.busy_toggles.push(busy);
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn show_score(&mut self, score: Option<i32>) {
        self.score = score;
    }

    fn show_pressure_robustness(&mut self, robust: Option<bool>) {
        self.pressure_robust = robust;
    }

    fn show_optimal_convergence(&mut self, optimal: Option<bool>) {
        self.optimal_convergence = optimal;
    }
}

/// Wraps the structured builder and counts invocations.
#[derive(Default)]
struct CountingBuilder {
    inner: StructuredBuilder,
    calls: Rc<RefCell<usize>>,
}

impl ProblemBuilder for CountingBuilder {
    type Domain = TriangleMesh;

    fn build(&mut self, recipe: &festokes::MeshRecipe) -> Result<TriangleMesh, festokes::BuildError> {
        *self.calls.borrow_mut() += 1;
        self.inner.build(recipe)
    }
}

/// Wraps the counting solver and counts invocations.
#[derive(Default)]
struct TrackedSolver {
    calls: Rc<RefCell<usize>>,
}

impl StokesSolver<TriangleMesh> for TrackedSolver {
    type Field = FieldSummary;

    fn solve(
        &mut self,
        mesh: &TriangleMesh,
        problem: &StokesProblem,
    ) -> Result<StokesSolution<FieldSummary>, SolveError> {
        *self.calls.borrow_mut() += 1;
        CountingSolver.solve(mesh, problem)
    }
}

struct Harness {
    session: Session<CountingBuilder, TrackedSolver, Screen>,
    builds: Rc<RefCell<usize>>,
    solves: Rc<RefCell<usize>>,
}

fn harness() -> Harness {
    let builder = CountingBuilder::default();
    let solver = TrackedSolver::default();
    let builds = Rc::clone(&builder.calls);
    let solves = Rc::clone(&solver.calls);
    Harness {
        session: Session::new(builder, solver, Screen::default(), InflowProfile::default()),
        builds,
        solves,
    }
}

#[test]
fn validate_without_mesh_is_a_no_op() {
    let mut h = harness();
    h.session.select(SlotId::Velocity, "P2").expect("listed");
    h.session.select(SlotId::Pressure, "P1").expect("listed");

    assert_eq!(h.session.validate(), ValidateOutcome::Skipped);
    assert_eq!(h.session.phase(), Phase::Idle);
    assert_eq!(*h.builds.borrow(), 0);
    assert_eq!(*h.solves.borrow(), 0);
    assert!(h.session.view().busy_toggles.is_empty());
    assert_eq!(h.session.view().score, None);
}

#[test]
fn mesh_without_spaces_draws_the_mesh_only() {
    let mut h = harness();
    h.session.select(SlotId::Mesh, "Type One Mesh").expect("listed");
    h.session.select(SlotId::Velocity, "P2").expect("listed");

    assert_eq!(h.session.validate(), ValidateOutcome::MeshOnly);
    let screen = h.session.view();
    assert_eq!(*h.builds.borrow(), 1);
    assert_eq!(*h.solves.borrow(), 0);
    assert_eq!(screen.busy_toggles, [true, false]);
    assert!(screen.warnings.is_empty());
    assert_eq!(screen.velocity.as_deref(), Some("mesh 200"));
    assert_eq!(screen.pressure.as_deref(), Some("mesh 200"));
    assert_eq!(screen.score, None);
    assert_eq!(screen.pressure_robust, None);
    assert_eq!(h.session.phase(), Phase::Done);
}

#[test]
fn mesh_with_only_a_pressure_draws_the_mesh_only() {
    let mut h = harness();
    h.session
        .select(SlotId::Mesh, "Singular Vertex Mesh")
        .expect("listed");
    h.session.select(SlotId::Pressure, "P1").expect("listed");

    assert_eq!(h.session.validate(), ValidateOutcome::MeshOnly);
    let screen = h.session.view();
    assert_eq!(*h.builds.borrow(), 1);
    assert_eq!(*h.solves.borrow(), 0);
    assert_eq!(screen.busy_toggles, [true, false]);
    assert_eq!(screen.velocity.as_deref(), Some("mesh 400"));
    assert_eq!(screen.pressure.as_deref(), Some("mesh 400"));
    assert_eq!(screen.score, None);
    assert_eq!(screen.optimal_convergence, None);
}

#[test]
fn mesh_only_run_leaves_an_earlier_score_in_place() {
    let mut h = harness();
    h.session.select(SlotId::Mesh, "Type One Mesh").expect("listed");
    h.session.select(SlotId::Velocity, "P2").expect("listed");
    h.session.select(SlotId::Pressure, "P1").expect("listed");
    assert_eq!(h.session.validate(), ValidateOutcome::Solved);
    assert_eq!(h.session.view().score, Some(6));

    h.session.select(SlotId::Velocity, "None").expect("sentinel");
    assert_eq!(h.session.validate(), ValidateOutcome::MeshOnly);
    assert_eq!(h.session.view().score, Some(6));
    assert_eq!(h.session.view().velocity.as_deref(), Some("mesh 200"));
}

#[test]
fn stable_pair_is_solved_and_scored() {
    let mut h = harness();
    h.session
        .select(SlotId::Mesh, "Singular Vertex Mesh")
        .expect("listed");
    h.session.select(SlotId::Velocity, "P2").expect("listed");
    h.session.select(SlotId::Pressure, "P1*").expect("listed");

    assert_eq!(h.session.validate(), ValidateOutcome::Solved);
    let screen = h.session.view();
    assert_eq!(screen.velocity.as_deref(), Some("continuous P2"));
    assert_eq!(screen.pressure.as_deref(), Some("discontinuous P1"));
    assert_eq!(screen.score, Some(3 + 3 + 2));
    assert_eq!(screen.pressure_robust, Some(true));
    assert_eq!(screen.optimal_convergence, Some(true));
    assert!(!screen.busy);
}

#[test]
fn failure_warns_clears_and_recovers() {
    let mut h = harness();
    h.session.select(SlotId::Mesh, "Type One Mesh").expect("listed");
    h.session.select(SlotId::Velocity, "P2").expect("listed");
    h.session.select(SlotId::Pressure, "P1").expect("listed");
    assert_eq!(h.session.validate(), ValidateOutcome::Solved);
    assert!(h.session.view().velocity.is_some());

    h.session.select(SlotId::Velocity, "P1").expect("listed");
    h.session.select(SlotId::Pressure, "P1*").expect("listed");
    let expected = ValidateError::Solve(SolveError::Singular {
        pressure: 600,
        velocity: 200,
    });
    assert_eq!(
        h.session.validate(),
        ValidateOutcome::Failed(expected.clone())
    );
    {
        let screen = h.session.view();
        assert_eq!(screen.warnings, [expected.to_string()]);
        assert_eq!(screen.velocity, None);
        assert_eq!(screen.pressure, None);
        assert_eq!(screen.score, Some(1 + 4 + 2));
        assert!(!screen.busy);
    }
    assert_eq!(h.session.phase(), Phase::Idle);
    assert_eq!(h.session.state().velocity.name, "P1");

    h.session.select(SlotId::Pressure, "P0").expect("listed");
    assert_eq!(h.session.validate(), ValidateOutcome::Solved);
    assert_eq!(h.session.view().warnings.len(), 1);
    assert_eq!(h.session.view().score, Some(1 + 4 + 1));
}

#[test]
fn channel_mesh_failure_surfaces_through_the_warning() {
    let mut h = harness();
    h.session.select(SlotId::Mesh, "Curved Mesh").expect("listed");
    h.session.select(SlotId::Velocity, "P2").expect("listed");
    h.session.select(SlotId::Pressure, "P1").expect("listed");

    assert!(matches!(h.session.validate(), ValidateOutcome::Failed(_)));
    assert_eq!(*h.solves.borrow(), 0);
    let screen = h.session.view();
    assert_eq!(
        screen.warnings,
        ["channel meshes are not supported by this builder"]
    );
    assert_eq!(screen.score, Some(9));
    assert_eq!(screen.busy_toggles, [true, false]);
}

#[test]
fn splits_and_bubbles_reach_builder_and_solver() {
    let mut h = harness();
    h.session.select(SlotId::Mesh, "Type One Mesh").expect("listed");
    h.session.select(SlotId::Velocity, "P1").expect("listed");
    h.session.select(SlotId::Pressure, "P0").expect("listed");
    for name in ["Alfeld Split", "P3 Bubble"] {
        let extra = h.session.add_extra();
        h.session.select(extra, name).expect("listed");
    }

    assert_eq!(h.session.validate(), ValidateOutcome::Solved);
    let screen = h.session.view();
    assert_eq!(
        screen.velocity.as_deref(),
        Some("continuous P1 + cubic bubbles")
    );
    assert_eq!(screen.score, Some(1 + 1 + 4 - 1 - 1));
}

#[test]
fn clear_resets_cards_results_and_score() {
    let mut h = harness();
    h.session.select(SlotId::Mesh, "Type One Mesh").expect("listed");
    h.session.select(SlotId::Velocity, "P2").expect("listed");
    h.session.select(SlotId::Pressure, "P1").expect("listed");
    for _ in 0..3 {
        h.session.add_extra();
    }
    assert_eq!(h.session.panel().extra_count(), 3);
    h.session.validate();

    h.session.clear();

    let state = h.session.state();
    assert!(state.mesh.is_none() && state.velocity.is_none() && state.pressure.is_none());
    assert!(state.extras.is_empty());
    assert_eq!(score(&state), 0);
    let screen = h.session.view();
    assert_eq!(screen.velocity, None);
    assert_eq!(screen.pressure, None);
    assert_eq!(screen.score, None);
    assert_eq!(screen.pressure_robust, None);
    assert_eq!(screen.optimal_convergence, None);
}

#[test]
fn every_selection_stays_in_its_catalog() {
    let mut h = harness();
    for (id, kind) in [
        (SlotId::Mesh, SlotKind::Mesh),
        (SlotId::Pressure, SlotKind::Pressure),
        (SlotId::Velocity, SlotKind::Velocity),
    ] {
        for option in kind.catalog().options() {
            h.session.select(id, option.name).expect("catalog member");
            let slot = h.session.panel().slot(id).expect("singleton slot");
            assert!(kind.catalog().contains(slot.selected()));
            assert_eq!(slot.asset(), option.asset);
        }
        assert!(h.session.select(id, "Q2-P1").is_err());
        let slot = h.session.panel().slot(id).expect("singleton slot");
        assert!(kind.catalog().contains(slot.selected()));
    }
}
