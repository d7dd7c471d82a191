//! Output surfaces driven by a session.

use std::fmt;

use serde::Serialize;

/// One of the two result panes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    /// Velocity result.
    Velocity,
    /// Pressure result.
    Pressure,
}

impl Pane {
    /// Both panes, velocity first.
    pub const ALL: [Pane; 2] = [Pane::Velocity, Pane::Pressure];
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pane::Velocity => "Velocity",
            Pane::Pressure => "Pressure",
        })
    }
}

/// Draws meshes and fields into the result panes.
pub trait ResultRenderer<D, F> {
    /// Show the bare mesh.
    fn draw_mesh(&mut self, pane: Pane, domain: &D);

    /// Show a solved field on its mesh.
    fn draw_field(&mut self, pane: Pane, field: &F, domain: &D);

    /// Discard whatever the pane shows.
    fn clear(&mut self, pane: Pane);
}

/// Status widgets around the result panes.
pub trait StatusView {
    /// Toggle the busy overlay.
    fn set_busy(&mut self, busy: bool);

    /// Show a warning message to the user.
    fn warn(&mut self, message: &str);

    /// Update the basic points readout; `None` shows a placeholder.
    fn show_score(&mut self, score: Option<i32>);

    /// Update the pressure robustness readout; `None` shows a placeholder.
    fn show_pressure_robustness(&mut self, _robust: Option<bool>) {}

    /// Update the optimal convergence readout; `None` shows a placeholder.
    fn show_optimal_convergence(&mut self, _optimal: Option<bool>) {}
}
