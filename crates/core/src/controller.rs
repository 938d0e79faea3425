//! Session lifecycle: activation, opening files, new/default sessions, save
//! and graph import/export.

use std::path::Path;

use ember_model::{Graph, Session};
use ember_project::{FileKind, load_graph, save_graph};

use crate::SessionError;
use crate::document::{SavePrompt, SessionDocument};
use crate::settings::Settings;

/// Audio engine side of a session reload.
pub trait EngineController {
    /// The whole session was replaced.
    fn session_reloaded(&mut self, session: &Session);

    fn graph_added(&mut self, graph: &Graph);
}

pub trait GuiController: SavePrompt {
    fn close_all_plugin_windows(&mut self);

    /// Rebuild whatever content views mirror the session.
    fn stabilize_content(&mut self, session: &Session);
}

enum State {
    Inactive,
    Active {
        session: Session,
        document: SessionDocument,
    },
}

pub struct SessionController<E: EngineController, G: GuiController> {
    settings: Settings,
    engine: E,
    gui: G,
    state: State,
}

impl<E: EngineController, G: GuiController> SessionController<E, G> {
    pub fn new(settings: Settings, engine: E, gui: G) -> Self {
        Self {
            settings,
            engine,
            gui,
            state: State::Inactive,
        }
    }

    /// Take ownership of `session` and open an untitled document over it.
    pub fn activate(&mut self, session: Session) {
        if let Err(e) = self.deactivate() {
            log::warn!(target: "settings", "failed to save settings: {e}");
        }
        let document = SessionDocument::new(&session);
        log::debug!(target: "session", "activated '{}'", session.name());
        self.state = State::Active { session, document };
    }

    /// Remember the current file as `lastSession`, then clear and release the
    /// session.
    ///
    /// The controller is inactive afterwards even when writing the settings
    /// fails.
    pub fn deactivate(&mut self) -> Result<(), SessionError> {
        let State::Active {
            mut session,
            document,
        } = std::mem::replace(&mut self.state, State::Inactive)
        else {
            return Ok(());
        };

        if let Some(file) = document.file().filter(|f| f.is_file()) {
            self.settings.set_last_session(file);
        }
        session.clear();
        log::debug!(target: "session", "deactivated");

        self.settings.save()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Open a graph or session file. Returns `Ok(false)` when the extension is
    /// not recognized or the user cancelled the save prompt.
    ///
    /// Load failures leave the session untouched and are only logged.
    pub fn open_file(&mut self, path: &Path) -> Result<bool, SessionError> {
        let Some(kind) = FileKind::from_path(path) else {
            log::debug!(target: "session", "ignoring {}", path.display());
            return Ok(false);
        };
        let State::Active { session, document } = &mut self.state else {
            return Err(SessionError::NotActive);
        };

        match kind {
            FileKind::Graph => match load_graph(path) {
                Ok(graph) => {
                    log::info!(target: "session", "add graph to session: {}", graph.name);
                    merge_graph(session, graph, &mut self.engine);
                }
                Err(e) => {
                    log::warn!(target: "session", "rejected graph {}: {e}", path.display());
                }
            },
            FileKind::Session => {
                log::info!(target: "session", "opening session {}", path.display());
                let outcome = document.save_if_needed_and_user_agrees(session, &mut self.gui)?;
                if !outcome.should_proceed() {
                    return Ok(false);
                }
                if let Some(saved) = document.file().filter(|_| outcome.is_saved()) {
                    self.settings.add_recent_file(saved);
                }

                match document.load_from(path, session) {
                    Ok(()) => {
                        session.set_changes_frozen(true);
                        self.gui.close_all_plugin_windows();
                        self.engine.session_reloaded(session);
                        session.set_changes_frozen(false);
                        if let Some(file) = document.file() {
                            self.settings.add_recent_file(file);
                        }
                    }
                    Err(e) => {
                        log::warn!(target: "session", "failed to load {}: {e}", path.display());
                    }
                }
            }
        }

        self.gui.stabilize_content(session);
        Ok(true)
    }

    /// Replace the session with the default template after asking whether to
    /// save pending changes. Returns `Ok(false)` if the user cancelled, in
    /// which case nothing changed.
    pub fn new_session(&mut self) -> Result<bool, SessionError> {
        let State::Active { session, document } = &mut self.state else {
            return Err(SessionError::NotActive);
        };

        let outcome = document.save_if_needed_and_user_agrees(session, &mut self.gui)?;
        if !outcome.should_proceed() {
            log::debug!(target: "session", "new session cancelled");
            return Ok(false);
        }
        if let Some(saved) = document.file().filter(|_| outcome.is_saved()) {
            self.settings.add_recent_file(saved);
        }

        self.gui.close_all_plugin_windows();
        reset_to_default(session, &mut self.engine, &mut self.gui);
        *document = SessionDocument::new(session);
        session.set_changes_frozen(false);
        Ok(true)
    }

    /// Like [`Self::new_session`] without asking first.
    pub fn open_default_session(&mut self) -> Result<(), SessionError> {
        let State::Active { session, document } = &mut self.state else {
            return Err(SessionError::NotActive);
        };

        self.gui.close_all_plugin_windows();
        reset_to_default(session, &mut self.engine, &mut self.gui);
        *document = SessionDocument::new(session);
        session.set_changes_frozen(false);
        Ok(())
    }

    /// Returns `Ok(false)` when the user declined to pick a file.
    pub fn save_session(&mut self, save_as: bool) -> Result<bool, SessionError> {
        let State::Active { session, document } = &mut self.state else {
            return Err(SessionError::NotActive);
        };

        let saved = if save_as {
            document.save_as(session, &mut self.gui)?
        } else {
            document.save(session, &mut self.gui)?
        };
        if saved {
            if let Some(file) = document.file() {
                log::info!(target: "session", "saved {}", file.display());
                self.settings.add_recent_file(file);
            }
        }
        Ok(saved)
    }

    /// Write `graph` to `target`. The target is replaced atomically.
    pub fn export_graph(&self, graph: &Graph, target: &Path) -> Result<(), SessionError> {
        save_graph(target, graph)?;
        log::info!(target: "session", "exported graph '{}' to {}", graph.name, target.display());
        Ok(())
    }

    pub fn import_graph(&mut self, path: &Path) -> Result<bool, SessionError> {
        self.open_file(path)
    }

    pub fn close_session(&mut self) {
        log::debug!(target: "session", "close session");
    }

    /// Add `graph` to the session, make it active and hand it to the engine.
    pub fn add_graph(&mut self, graph: Graph) -> Result<usize, SessionError> {
        let State::Active { session, .. } = &mut self.state else {
            return Err(SessionError::NotActive);
        };
        Ok(merge_graph(session, graph, &mut self.engine))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            State::Active { session, .. } => Some(session),
            State::Inactive => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.state {
            State::Active { session, .. } => Some(session),
            State::Inactive => None,
        }
    }

    pub fn document(&self) -> Option<&SessionDocument> {
        match &self.state {
            State::Active { document, .. } => Some(document),
            State::Inactive => None,
        }
    }

    /// The session together with the GUI, for views that edit the session
    /// directly.
    pub fn session_and_gui_mut(&mut self) -> Option<(&mut Session, &mut G)> {
        match &mut self.state {
            State::Active { session, .. } => Some((session, &mut self.gui)),
            State::Inactive => None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn gui(&self) -> &G {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut G {
        &mut self.gui
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn merge_graph(session: &mut Session, graph: Graph, engine: &mut impl EngineController) -> usize {
    let index = session.add_graph(graph, true);
    if let Some(graph) = session.graph(index) {
        engine.graph_added(graph);
    }
    index
}

/// Clear `session` and install the default graph with changes frozen. The
/// caller unfreezes once the new document is in place.
fn reset_to_default(
    session: &mut Session,
    engine: &mut impl EngineController,
    gui: &mut impl GuiController,
) {
    session.set_changes_frozen(true);
    session.clear();
    session.add_graph(Graph::default_graph(), true);
    engine.session_reloaded(session);
    gui.stabilize_content(session);
}
