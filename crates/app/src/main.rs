//! Headless Ember host: opens sessions and graphs given on the command line
//! and prints the resulting mixer layout.

mod host;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ember_core::{
    Command, HeadlessGui, SaveChoice, Session, SessionController, Settings, keybindings,
    load_session_metadata,
};

use crate::host::{LoggingEngine, LoggingMenuBar};

#[derive(Parser)]
#[command(name = "ember", about = "Ember session host")]
struct Cli {
    /// Session (.els) or graph (.elg) files to open, in order
    files: Vec<PathBuf>,

    /// Print the command table and key bindings, then exit
    #[arg(long)]
    commands: bool,

    /// Print a summary of a session file without opening it
    #[arg(long, value_name = "FILE")]
    info: Option<PathBuf>,

    /// Use this settings file instead of the platform default
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.commands {
        print_commands();
        return Ok(());
    }

    if let Some(path) = &cli.info {
        let meta = load_session_metadata(path)
            .with_context(|| format!("reading {}", path.display()))?;
        println!(
            "{}: {} graphs, {} nodes, {} controllers",
            meta.name, meta.graph_count, meta.node_count, meta.controller_count
        );
        return Ok(());
    }

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let last_session = settings.last_session().map(PathBuf::from);

    let gui = HeadlessGui::new(Box::new(LoggingMenuBar), SaveChoice::Discard);
    let mut controller = SessionController::new(settings, LoggingEngine::default(), gui);
    controller.activate(Session::default());

    if cli.files.is_empty() {
        match last_session.filter(|p| p.is_file()) {
            Some(path) => {
                log::info!("restoring last session {}", path.display());
                controller.open_file(&path)?;
            }
            None => controller.open_default_session()?,
        }
    } else {
        for path in &cli.files {
            if !controller.open_file(path)? {
                log::warn!("skipped {}", path.display());
            }
        }
    }

    print_mixer(&controller);
    log::debug!("engine saw {} reloads", controller.engine().reloads());

    controller.deactivate()?;
    Ok(())
}

fn print_commands() {
    for command in Command::ALL {
        let info = command.info();
        let key = info.default_key.map(|k| k.to_string()).unwrap_or_default();
        let disabled = if info.disabled { " (disabled)" } else { "" };
        println!(
            "{:#06x}  {:<16} {:<22} {:<14} {}{}",
            command.id(),
            info.category,
            info.short_name,
            key,
            info.description,
            disabled
        );
    }

    println!();
    for (key, command) in keybindings() {
        println!("{:<16} {}", key.to_string(), command.info().short_name);
    }
}

fn print_mixer(controller: &SessionController<LoggingEngine, HeadlessGui>) {
    let Some(session) = controller.session() else {
        return;
    };
    let graph_name = session.active_graph().map(|g| g.name.as_str()).unwrap_or("-");
    println!("{} / {}", session.name(), graph_name);

    let mixer = controller.gui().mixer();
    if let Some(text) = mixer.placeholder_text() {
        println!("  {text}");
        return;
    }
    for (index, row) in mixer.model().rows().iter().enumerate() {
        let lock = if row.name_editable { "" } else { " [io]" };
        println!("  {index:>2}  {}{lock}", row.name);
    }
}
