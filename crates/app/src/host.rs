use ember_core::{EngineController, Graph, Menu, MenuHost, MenuItem, Session};

/// Stands in for the audio engine and reports what it would have done.
#[derive(Debug, Default)]
pub struct LoggingEngine {
    reloads: usize,
}

impl LoggingEngine {
    pub fn reloads(&self) -> usize {
        self.reloads
    }
}

impl EngineController for LoggingEngine {
    fn session_reloaded(&mut self, session: &Session) {
        self.reloads += 1;
        log::info!(
            target: "engine",
            "session '{}' reloaded with {} graphs",
            session.name(),
            session.graph_count()
        );
    }

    fn graph_added(&mut self, graph: &Graph) {
        log::info!(target: "engine", "graph '{}' added ({} nodes)", graph.name, graph.len());
    }
}

/// Main window menu bar that only logs what it would show.
pub struct LoggingMenuBar;

impl MenuHost for LoggingMenuBar {
    fn refresh_menu(&mut self, menus: &[Menu]) {
        for menu in menus {
            let checked: Vec<&str> = menu
                .items
                .iter()
                .filter_map(|item| match item {
                    MenuItem::Command {
                        command,
                        checked: true,
                    } => Some(command.info().short_name),
                    _ => None,
                })
                .collect();
            log::debug!(target: "windows", "menu '{}': {} items, checked {:?}", menu.name, menu.items.len(), checked);
        }
    }
}
