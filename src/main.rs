mod args;
mod report;

use std::path::Path;
use std::process::ExitCode;

use args::{usage, Options};
use festokes::{Config, CountingSolver, SelectionError, Session, SlotId, StructuredBuilder};
use report::{outcome_label, render_catalogs, render_summary, JsonReport, TextView};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

type CliSession = Session<StructuredBuilder, CountingSolver, TextView>;

/// Log each card's new image the way the card widget would load it.
fn watch_slot(session: &mut CliSession, id: SlotId, root: &Path) -> Result<(), SelectionError> {
    let slot = session.panel_mut().slot_mut(id)?;
    let label = slot.label().to_string();
    let root = root.to_path_buf();
    slot.on_change(move |option| {
        info!(card = %label, asset = %option.asset_path(&root).display(), "card image updated");
    });
    Ok(())
}

/// Apply the command-line selections to the session.
fn apply_selections(
    session: &mut CliSession,
    options: &Options,
    root: &Path,
) -> Result<(), SelectionError> {
    for id in [SlotId::Mesh, SlotId::Pressure, SlotId::Velocity] {
        watch_slot(session, id, root)?;
    }
    if let Some(name) = &options.mesh {
        session.select(SlotId::Mesh, name)?;
    }
    if let Some(name) = &options.pressure {
        session.select(SlotId::Pressure, name)?;
    }
    if let Some(name) = &options.velocity {
        session.select(SlotId::Velocity, name)?;
    }
    for name in &options.extras {
        let id = session.add_extra();
        watch_slot(session, id, root)?;
        session.select(id, name)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", usage());
            return ExitCode::from(2);
        }
    };

    let config = match Config::load(&options.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::from(1);
        }
    };

    // Logs go to stderr so `--json` output stays machine readable.
    let level = match config.log_level() {
        Ok(level) => level,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::from(1);
        }
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if options.list {
        print!("{}", render_catalogs());
        return ExitCode::SUCCESS;
    }

    let mut session: CliSession = Session::new(
        config.structured_builder(),
        CountingSolver,
        TextView::default(),
        config.inflow_profile(),
    );
    if let Err(err) = apply_selections(&mut session, &options, &config.assets.root) {
        eprintln!("selection error: {err}");
        return ExitCode::from(1);
    }

    let outcome = session.validate();
    let state = session.state();
    if options.json {
        let report = JsonReport {
            selection: &state,
            outcome: outcome_label(&outcome),
            view: session.view(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to encode report: {err}");
                return ExitCode::from(1);
            }
        }
    } else {
        print!("{}", render_summary(&state, session.view(), &outcome));
    }
    ExitCode::SUCCESS
}
