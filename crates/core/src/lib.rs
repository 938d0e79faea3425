pub mod commands;
pub mod controller;
pub mod document;
pub mod gui;
pub mod menus;
pub mod mixer;
pub mod settings;
pub mod windows;

pub use commands::{
    Command, CommandInfo, Key, KeyPress, Modifiers, command_info, fill_command_info, keybindings,
};
pub use controller::{EngineController, GuiController, SessionController};
pub use document::{SaveChoice, SaveOutcome, SavePrompt, SessionDocument};
pub use gui::{HeadlessGui, HeadlessWindow};
pub use menus::{Menu, MenuHost, MenuItem, app_menus};
pub use mixer::{GraphMixerModel, GraphMixerView, MixerRow, STRIP_DRAG_DESCRIPTION, StripDragState};
pub use settings::{Settings, SettingsError};
pub use windows::{Window, WindowError, WindowId, WindowKind, WindowManager};

pub use ember_model::{
    AssetType, Connection, Control, ControlToggleMode, ControllerDevice, ControllerMap,
    EventType, Graph, MidiMessage, Node, NodeId, NodeKind, Session,
};
pub use ember_project::{FileKind, ProjectError, SessionMetadata, load_session_metadata};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No session is active")]
    NotActive,

    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}
