use std::fmt::Write;

use festokes::{
    FieldSummary, Pane, ResultRenderer, SelectionState, SlotKind, StatusView, TriangleMesh,
    ValidateOutcome,
};
use serde::Serialize;

/// Terminal stand-in for the result panes and status widgets.
#[derive(Debug, Default, Serialize)]
pub struct TextView {
    /// What the velocity pane shows.
    velocity: Option<String>,
    /// What the pressure pane shows.
    pressure: Option<String>,
    /// How many times the busy overlay was raised.
    busy_runs: usize,
    /// Whether the busy overlay is up.
    busy: bool,
    /// Last warning shown.
    warning: Option<String>,
    /// Basic points readout.
    score: Option<i32>,
    /// Pressure robustness readout.
    pressure_robust: Option<bool>,
    /// Optimal convergence readout.
    optimal_convergence: Option<bool>,
}

impl TextView {
    /// Mutable access to a pane's content.
    fn pane(&mut self, pane: Pane) -> &mut Option<String> {
        match pane {
            Pane::Velocity => &mut self.velocity,
            Pane::Pressure => &mut self.pressure,
        }
    }
}

/// One line describing a mesh.
fn describe_mesh(mesh: &TriangleMesh) -> String {
    format!(
        "mesh with {} vertices, {} edges, {} triangles",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.triangle_count()
    )
}

impl ResultRenderer<TriangleMesh, FieldSummary> for TextView {
    fn draw_mesh(&mut self, pane: Pane, mesh: &TriangleMesh) {
        *self.pane(pane) = Some(describe_mesh(mesh));
    }

    fn draw_field(&mut self, pane: Pane, field: &FieldSummary, mesh: &TriangleMesh) {
        let mut text = format!(
            "{} with {} unknowns ({} free) on a {}",
            field.space,
            field.unknowns,
            field.free_unknowns,
            describe_mesh(mesh)
        );
        if let Some(peak) = field.peak_inflow {
            write!(&mut text, ", peak inflow {peak:.3}").expect("writing to string cannot fail");
        }
        *self.pane(pane) = Some(text);
    }

    fn clear(&mut self, pane: Pane) {
        *self.pane(pane) = None;
    }
}

impl StatusView for TextView {
    fn set_busy(&mut self, busy: bool) {
        if busy {
            self.busy_runs += 1;
        }
        self.busy = busy;
    }

    fn warn(&mut self, message: &str) {
        self.warning = Some(message.to_string());
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

/// Short label for a validate outcome.
pub fn outcome_label(outcome: &ValidateOutcome) -> &'static str {
    match outcome {
        ValidateOutcome::Skipped => "skipped (no mesh selected)",
        ValidateOutcome::Busy => "ignored (already running)",
        ValidateOutcome::MeshOnly => "mesh only",
        ValidateOutcome::Solved => "solved",
        ValidateOutcome::Failed(_) => "failed",
    }
}

/// Render the selection and the view as plain text.
#[must_use]
pub fn render_summary(state: &SelectionState, view: &TextView, outcome: &ValidateOutcome) -> String {
    let mut output = String::new();

    writeln!(&mut output, "Mesh:     {}", state.mesh.name).expect("writing to string cannot fail");
    writeln!(&mut output, "Pressure: {}", state.pressure.name)
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Velocity: {}", state.velocity.name)
        .expect("writing to string cannot fail");
    for (idx, extra) in state.extras.iter().enumerate() {
        writeln!(&mut output, "Extra {}:  {}", idx + 1, extra.name)
            .expect("writing to string cannot fail");
    }
    writeln!(&mut output, "Outcome:  {}", outcome_label(outcome))
        .expect("writing to string cannot fail");

    if let Some(warning) = &view.warning {
        writeln!(&mut output, "Error in calculation! {warning}")
            .expect("writing to string cannot fail");
    }
    for (pane, content) in [(Pane::Velocity, &view.velocity), (Pane::Pressure, &view.pressure)] {
        if let Some(content) = content {
            writeln!(&mut output, "{pane} pane: {content}")
                .expect("writing to string cannot fail");
        }
    }

    let score = view
        .score
        .map_or_else(|| "---".to_string(), |score| score.to_string());
    writeln!(
        &mut output,
        "Basic points: {score} | Optimal convergence: {} | Pressure robustness: {}",
        yes_no(view.optimal_convergence),
        yes_no(view.pressure_robust)
    )
    .expect("writing to string cannot fail");

    output
}

/// Readout for a yes/no property, `---` while unknown.
fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "---",
    }
}

/// JSON document printed with `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Selections that were validated.
    pub selection: &'a SelectionState,
    /// Outcome label.
    pub outcome: &'static str,
    /// Everything the view displays.
    pub view: &'a TextView,
}

/// List every catalog with its scores.
#[must_use]
pub fn render_catalogs() -> String {
    let mut output = String::new();
    for kind in [
        SlotKind::Mesh,
        SlotKind::Pressure,
        SlotKind::Velocity,
        SlotKind::Extra,
    ] {
        writeln!(&mut output, "{}:", kind.label()).expect("writing to string cannot fail");
        for option in kind.catalog().options() {
            writeln!(&mut output, "  {:<22} {:>3}", option.name, option.score)
                .expect("writing to string cannot fail");
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use festokes::{GridPattern, SelectionPanel, SlotId, SolveError, ValidateError};

    #[test]
    fn failed_run_shows_warning_and_score() {
        let mut panel = SelectionPanel::new();
        panel.select(SlotId::Mesh, "Type One Mesh").expect("listed");
        panel.select(SlotId::Velocity, "P1").expect("listed");
        panel.select(SlotId::Pressure, "P1*").expect("listed");

        let mut view = TextView::default();
        view.set_busy(true);
        view.warn("saddle point system is singular");
        view.set_busy(false);
        view.show_score(Some(7));
        view.show_pressure_robustness(Some(false));
        view.show_optimal_convergence(Some(true));

        let error = ValidateError::Solve(SolveError::External("singular".to_string()));
        let report = render_summary(&panel.state(), &view, &ValidateOutcome::Failed(error));
        assert!(report.contains("Outcome:  failed"));
        assert!(report.contains("Error in calculation! saddle point system is singular"));
        assert!(report.contains(
            "Basic points: 7 | Optimal convergence: yes | Pressure robustness: no"
        ));
        assert!(report.contains("Velocity: P1\n"));
        assert!(!report.contains("Velocity pane:"));
    }

    #[test]
    fn mesh_only_run_draws_both_panes() {
        let mesh = TriangleMesh::structured(1, 1, GridPattern::TypeOne).expect("grid");
        let mut view = TextView::default();
        for pane in Pane::ALL {
            view.draw_mesh(pane, &mesh);
        }
        let report = render_summary(
            &SelectionPanel::new().state(),
            &view,
            &ValidateOutcome::MeshOnly,
        );
        assert!(report.contains("Velocity pane: mesh with 4 vertices, 5 edges, 2 triangles"));
        assert!(report.contains("Velocity: None\n"));
        assert!(report.contains(
            "Basic points: --- | Optimal convergence: --- | Pressure robustness: ---"
        ));
    }

    #[test]
    fn catalog_listing_includes_negative_scores() {
        let listing = render_catalogs();
        assert!(listing.contains("Brezzi-Pitkäranta"));
        assert!(listing.contains(" -2"));
    }
}
