use crate::commands::Command;
use crate::windows::{WindowKind, WindowManager};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub name: &'static str,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Command { command: Command, checked: bool },
    Separator,
}

impl MenuItem {
    pub fn command(command: Command) -> Self {
        MenuItem::Command {
            command,
            checked: false,
        }
    }

    pub fn toggle(command: Command, checked: bool) -> Self {
        MenuItem::Command { command, checked }
    }

    pub fn separator() -> Self {
        MenuItem::Separator
    }
}

/// The window that owns the application menu bar.
pub trait MenuHost {
    fn refresh_menu(&mut self, menus: &[Menu]);
}

fn show_toggle(windows: &WindowManager, kind: WindowKind) -> MenuItem {
    match kind.show_command() {
        Some(command) => MenuItem::toggle(command, windows.is_showing(kind)),
        None => MenuItem::separator(),
    }
}

pub fn app_menus(windows: &WindowManager) -> Vec<Menu> {
    vec![
        Menu {
            name: "File",
            items: vec![
                MenuItem::command(Command::SessionNew),
                MenuItem::command(Command::SessionOpen),
                MenuItem::separator(),
                MenuItem::command(Command::SessionSave),
                MenuItem::command(Command::SessionSaveAs),
                MenuItem::separator(),
                MenuItem::command(Command::ImportGraph),
                MenuItem::command(Command::ExportGraph),
                MenuItem::separator(),
                MenuItem::command(Command::Quit),
            ],
        },
        Menu {
            name: "Session",
            items: vec![
                MenuItem::command(Command::SessionAddGraph),
                MenuItem::command(Command::SessionDuplicateGraph),
                MenuItem::command(Command::SessionDeleteGraph),
                MenuItem::separator(),
                MenuItem::command(Command::SessionInsertPlugin),
            ],
        },
        Menu {
            name: "View",
            items: vec![
                MenuItem::command(Command::ShowGraphEditor),
                MenuItem::command(Command::ShowPatchBay),
                MenuItem::command(Command::RotateContentView),
                MenuItem::separator(),
                MenuItem::command(Command::ShowAllPluginWindows),
                MenuItem::command(Command::HideAllPluginWindows),
                MenuItem::command(Command::ToggleVirtualKeyboard),
            ],
        },
        Menu {
            name: "Window",
            items: vec![
                show_toggle(windows, WindowKind::PluginManager),
                show_toggle(windows, WindowKind::SessionSettings),
                show_toggle(windows, WindowKind::GraphSettings),
                MenuItem::separator(),
                show_toggle(windows, WindowKind::Preferences),
                show_toggle(windows, WindowKind::About),
            ],
        },
        Menu {
            name: "Transport",
            items: vec![
                MenuItem::command(Command::TransportPlay),
                MenuItem::command(Command::TransportStop),
                MenuItem::command(Command::TransportRecord),
                MenuItem::separator(),
                MenuItem::command(Command::TransportRewind),
                MenuItem::command(Command::TransportForward),
                MenuItem::command(Command::TransportSeekZero),
            ],
        },
    ]
}
