//! A GUI controller with no toolkit behind it, for the binary and tests.

use std::path::{Path, PathBuf};

use ember_model::Session;

use crate::controller::GuiController;
use crate::document::{SaveChoice, SavePrompt};
use crate::menus::MenuHost;
use crate::mixer::GraphMixerView;
use crate::windows::{Window, WindowKind, WindowManager};

#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    kind: WindowKind,
    title: String,
    visible: bool,
}

impl HeadlessWindow {
    pub fn new(kind: WindowKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            visible: false,
        }
    }
}

impl Window for HeadlessWindow {
    fn kind(&self) -> WindowKind {
        self.kind
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Answers save prompts with fixed choices and keeps a mixer view in step
/// with the session.
pub struct HeadlessGui {
    windows: WindowManager,
    mixer: GraphMixerView,
    save_choice: SaveChoice,
    save_path: Option<PathBuf>,
    stabilized: usize,
}

impl HeadlessGui {
    pub fn new(main: Box<dyn MenuHost>, save_choice: SaveChoice) -> Self {
        Self {
            windows: WindowManager::new(main),
            mixer: GraphMixerView::default(),
            save_choice,
            save_path: None,
            stabilized: 0,
        }
    }

    pub fn set_save_choice(&mut self, choice: SaveChoice) {
        self.save_choice = choice;
    }

    /// Where "save as" prompts should point. `None` cancels them.
    pub fn set_save_path(&mut self, path: Option<PathBuf>) {
        self.save_path = path;
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager {
        &mut self.windows
    }

    pub fn mixer(&self) -> &GraphMixerView {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut GraphMixerView {
        &mut self.mixer
    }

    /// How many times content was rebuilt from the session.
    pub fn stabilize_count(&self) -> usize {
        self.stabilized
    }
}

impl SavePrompt for HeadlessGui {
    fn confirm_save_changes(&mut self) -> SaveChoice {
        self.save_choice
    }

    fn choose_save_path(&mut self, _current: Option<&Path>) -> Option<PathBuf> {
        self.save_path.clone()
    }
}

impl GuiController for HeadlessGui {
    fn close_all_plugin_windows(&mut self) {
        let closed = self.windows.close_plugin_windows();
        if closed > 0 {
            log::debug!(target: "windows", "closed {closed} plugin windows");
        }
    }

    fn stabilize_content(&mut self, session: &Session) {
        self.mixer.stabilize(session);
        self.stabilized += 1;
    }
}
