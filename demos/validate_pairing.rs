use festokes::{
    CountingSolver, FieldSummary, InflowProfile, Pane, ResultRenderer, Session, SlotId,
    StatusView, StructuredBuilder, TriangleMesh, ValidateOutcome,
};

/// Prints whatever the session would display.
struct Console;

impl ResultRenderer<TriangleMesh, FieldSummary> for Console {
    fn draw_mesh(&mut self, pane: Pane, mesh: &TriangleMesh) {
        println!("{pane}: mesh with {} triangles", mesh.triangle_count());
    }

    fn draw_field(&mut self, pane: Pane, field: &FieldSummary, _mesh: &TriangleMesh) {
        println!("{pane}: {} ({} unknowns)", field.space, field.unknowns);
    }

    fn clear(&mut self, pane: Pane) {
        println!("{pane}: cleared");
    }
}

impl StatusView for Console {
    fn set_busy(&mut self, _busy: bool) {}

    fn warn(&mut self, message: &str) {
        println!("Error in calculation! {message}");
    }

    fn show_score(&mut self, score: Option<i32>) {
        if let Some(score) = score {
            println!("Basic points: {score}");
        }
    }

    fn show_optimal_convergence(&mut self, optimal: Option<bool>) {
        if let Some(optimal) = optimal {
            println!("Optimal convergence: {optimal}");
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(
        StructuredBuilder::default(),
        CountingSolver,
        Console,
        InflowProfile::default(),
    );

    // Equal-order P1/P1* has far more pressure than velocity unknowns.
    session.select(SlotId::Mesh, "Type One Mesh")?;
    session.select(SlotId::Velocity, "P1")?;
    session.select(SlotId::Pressure, "P1*")?;
    let outcome = session.validate();
    assert!(matches!(outcome, ValidateOutcome::Failed(_)));

    // Scott-Vogelius on an Alfeld split mesh passes.
    session.select(SlotId::Velocity, "P2")?;
    let extra = session.add_extra();
    session.select(extra, "Alfeld Split")?;
    session.validate();

    Ok(())
}
