//! Top-level windows opened beside the main window.

use ember_model::NodeId;

use crate::commands::Command;
use crate::menus::{MenuHost, app_menus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    PluginEditor(NodeId),
    Preferences,
    PluginManager,
    SessionSettings,
    GraphSettings,
    About,
}

impl WindowKind {
    pub fn is_plugin_editor(&self) -> bool {
        matches!(self, WindowKind::PluginEditor(_))
    }

    /// The "Show X" command that opens this kind of window.
    pub fn show_command(&self) -> Option<Command> {
        match self {
            WindowKind::PluginEditor(_) => None,
            WindowKind::Preferences => Some(Command::ShowPreferences),
            WindowKind::PluginManager => Some(Command::ShowPluginManager),
            WindowKind::SessionSettings => Some(Command::ShowSessionConfig),
            WindowKind::GraphSettings => Some(Command::ShowGraphConfig),
            WindowKind::About => Some(Command::ShowAbout),
        }
    }
}

/// A window handle supplied by the host toolkit.
pub trait Window {
    fn kind(&self) -> WindowKind;
    fn title(&self) -> &str;
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Window {0:?} is not tracked")]
    NotTracked(WindowId),
}

/// Owns every open top-level window. Closing a window drops it and asks the
/// main window to rebuild its menu so the "Show X" toggles stay in step.
pub struct WindowManager {
    main: Box<dyn MenuHost>,
    windows: Vec<(WindowId, Box<dyn Window>)>,
    next_id: u64,
}

impl WindowManager {
    pub fn new(main: Box<dyn MenuHost>) -> Self {
        Self {
            main,
            windows: Vec::new(),
            next_id: 1,
        }
    }

    /// Track and show `window`. A window of the same kind that is already
    /// open is shown instead and `window` is dropped.
    pub fn show(&mut self, mut window: Box<dyn Window>) -> WindowId {
        let kind = window.kind();
        if let Some((id, existing)) = self.windows.iter_mut().find(|(_, w)| w.kind() == kind) {
            existing.set_visible(true);
            return *id;
        }

        let id = WindowId(self.next_id);
        self.next_id += 1;
        window.set_visible(true);
        log::debug!(target: "windows", "opened '{}' as {:?}", window.title(), id);
        self.windows.push((id, window));
        self.refresh_menu();
        id
    }

    /// Hide and release a tracked window, then refresh the main menu.
    pub fn on_window_closed(&mut self, id: WindowId) -> Result<(), WindowError> {
        let index = self
            .windows
            .iter()
            .position(|(wid, _)| *wid == id)
            .ok_or(WindowError::NotTracked(id))?;

        let (_, mut window) = self.windows.remove(index);
        window.set_visible(false);
        log::debug!(target: "windows", "closed '{}'", window.title());
        drop(window);

        self.refresh_menu();
        Ok(())
    }

    /// Close every plugin editor. Returns how many were closed.
    pub fn close_plugin_windows(&mut self) -> usize {
        let before = self.windows.len();
        self.windows.retain_mut(|(_, window)| {
            if window.kind().is_plugin_editor() {
                window.set_visible(false);
                false
            } else {
                true
            }
        });

        let closed = before - self.windows.len();
        if closed > 0 {
            self.refresh_menu();
        }
        closed
    }

    pub fn is_showing(&self, kind: WindowKind) -> bool {
        self.windows
            .iter()
            .any(|(_, w)| w.kind() == kind && w.is_visible())
    }

    pub fn window(&self, id: WindowId) -> Option<&dyn Window> {
        self.windows
            .iter()
            .find(|(wid, _)| *wid == id)
            .map(|(_, w)| w.as_ref())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn refresh_menu(&mut self) {
        let menus = app_menus(self);
        self.main.refresh_menu(&menus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::HeadlessWindow;
    use crate::menus::{Menu, MenuItem};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingMenuHost {
        refreshes: Rc<RefCell<Vec<Vec<Menu>>>>,
    }

    impl MenuHost for RecordingMenuHost {
        fn refresh_menu(&mut self, menus: &[Menu]) {
            self.refreshes.borrow_mut().push(menus.to_vec());
        }
    }

    fn manager() -> (WindowManager, Rc<RefCell<Vec<Vec<Menu>>>>) {
        let host = RecordingMenuHost::default();
        let refreshes = host.refreshes.clone();
        (WindowManager::new(Box::new(host)), refreshes)
    }

    fn preferences_checked(menus: &[Menu]) -> Option<bool> {
        menus.iter().flat_map(|m| m.items.iter()).find_map(|item| match item {
            MenuItem::Command {
                command: Command::ShowPreferences,
                checked,
            } => Some(*checked),
            _ => None,
        })
    }

    #[test]
    fn test_show_tracks_and_refreshes() {
        let (mut windows, refreshes) = manager();
        let id = windows.show(Box::new(HeadlessWindow::new(WindowKind::Preferences, "Prefs")));

        assert_eq!(windows.len(), 1);
        assert!(windows.is_showing(WindowKind::Preferences));
        assert!(windows.window(id).is_some_and(|w| w.is_visible()));
        let last = refreshes.borrow().last().cloned().expect("refresh");
        assert_eq!(preferences_checked(&last), Some(true));
    }

    #[test]
    fn test_show_same_kind_reuses_window() {
        let (mut windows, _) = manager();
        let first = windows.show(Box::new(HeadlessWindow::new(WindowKind::About, "About")));
        let second = windows.show(Box::new(HeadlessWindow::new(WindowKind::About, "About")));
        assert_eq!(first, second);
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn test_close_releases_and_refreshes_menu() {
        let (mut windows, refreshes) = manager();
        let id = windows.show(Box::new(HeadlessWindow::new(WindowKind::Preferences, "Prefs")));
        let count = refreshes.borrow().len();

        windows.on_window_closed(id).expect("close");

        assert!(windows.is_empty());
        assert!(!windows.is_showing(WindowKind::Preferences));
        assert_eq!(refreshes.borrow().len(), count + 1);
        let last = refreshes.borrow().last().cloned().expect("refresh");
        assert_eq!(preferences_checked(&last), Some(false));
    }

    #[test]
    fn test_close_untracked_window_fails() {
        let (mut windows, refreshes) = manager();
        let result = windows.on_window_closed(WindowId(77));
        assert!(matches!(result, Err(WindowError::NotTracked(WindowId(77)))));
        assert!(refreshes.borrow().is_empty());
    }

    #[test]
    fn test_close_plugin_windows_keeps_others() {
        let (mut windows, _) = manager();
        windows.show(Box::new(HeadlessWindow::new(
            WindowKind::PluginEditor(NodeId(1)),
            "Synth",
        )));
        windows.show(Box::new(HeadlessWindow::new(
            WindowKind::PluginEditor(NodeId(2)),
            "Reverb",
        )));
        windows.show(Box::new(HeadlessWindow::new(WindowKind::PluginManager, "Plugins")));

        assert_eq!(windows.close_plugin_windows(), 2);
        assert_eq!(windows.len(), 1);
        assert!(windows.is_showing(WindowKind::PluginManager));
        assert_eq!(windows.close_plugin_windows(), 0);
    }
}
