//! Command identifiers, their display info and default key chords.
//!
//! Ids are a flat `u32` namespace grouped by range: show/view and media
//! from `0x0100`, session from `0x0300`, export/import from `0x0400`,
//! version check and account from `0x0500`, transport from `0x0600`.
//! Standard application commands sit at `0x1001..`.

use std::fmt;

pub mod categories {
    pub const APPLICATION: &str = "Application";
    pub const SESSION: &str = "Session";
    pub const MEDIA: &str = "Session Media";
    pub const EXPORTING: &str = "Exporting";
    pub const ENGINE: &str = "Engine";
    pub const INTERFACES: &str = "Interfaces";
    pub const WINDOWS: &str = "Windows";
    pub const VIEW: &str = "View";
    pub const PLAYBACK: &str = "Playback";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Backspace,
    F1,
    F2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Cmd on macOS, Ctrl elsewhere
    pub command: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        command: false,
        shift: false,
        alt: false,
    };
    pub const COMMAND: Modifiers = Modifiers {
        command: true,
        shift: false,
        alt: false,
    };
    pub const COMMAND_SHIFT: Modifiers = Modifiers {
        command: true,
        shift: true,
        alt: false,
    };
    pub const COMMAND_ALT: Modifiers = Modifiers {
        command: true,
        shift: false,
        alt: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    const fn cmd(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::COMMAND)
    }

    const fn cmd_shift(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::COMMAND_SHIFT)
    }

    const fn cmd_alt(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::COMMAND_ALT)
    }

    const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Renders as `cmd-shift-s`, `cmd-alt-p`, `space`, `f1`.
impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.command {
            f.write_str("cmd-")?;
        }
        if self.modifiers.alt {
            f.write_str("alt-")?;
        }
        if self.modifiers.shift {
            f.write_str("shift-")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("space"),
            Key::Backspace => f.write_str("backspace"),
            Key::F1 => f.write_str("f1"),
            Key::F2 => f.write_str("f2"),
        }
    }
}

/// Display info for a command. The default value is the unset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandInfo {
    pub short_name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub default_key: Option<KeyPress>,
    pub disabled: bool,
}

impl CommandInfo {
    const fn new(short_name: &'static str, description: &'static str, category: &'static str) -> Self {
        Self {
            short_name,
            description,
            category,
            default_key: None,
            disabled: false,
        }
    }

    const fn key(mut self, key: KeyPress) -> Self {
        self.default_key = Some(key);
        self
    }

    const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn is_set(&self) -> bool {
        !self.short_name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Command {
    ShowAbout = 0x0100,
    ShowLegacyView,
    ShowPluginManager,
    ShowPreferences,
    ShowSessionConfig,
    ShowGraphConfig,
    ShowPatchBay,
    ShowGraphEditor,
    ShowLastContentView,
    ShowAllPluginWindows,
    HideAllPluginWindows,
    ToggleVirtualKeyboard,
    RotateContentView,
    MediaClose,
    MediaOpen,
    MediaNew,
    MediaSave,
    MediaSaveAs,

    SessionClose = 0x0300,
    SessionOpen,
    SessionNew,
    SessionSave,
    SessionSaveAs,
    SessionAddGraph,
    SessionDuplicateGraph = 900,
    SessionDeleteGraph = 901,
    SessionInsertPlugin = 902,

    ExportAudio = 0x0400,
    ExportMidi,
    ExportGraph,
    ImportGraph,
    Panic,

    CheckNewerVersion = 0x0500,
    SignIn,
    SignOut,

    TransportRewind = 0x0600,
    TransportForward,
    TransportPlay,
    TransportRecord,
    TransportSeekZero,
    TransportStop,

    Quit = 0x1001,
    Cut = 0x1003,
    Copy = 0x1004,
    Paste = 0x1005,
    SelectAll = 0x1006,
    Undo = 0x1008,
    Redo = 0x1009,
}

impl Command {
    pub const ALL: [Command; 48] = [
        Command::ShowAbout,
        Command::ShowLegacyView,
        Command::ShowPluginManager,
        Command::ShowPreferences,
        Command::ShowSessionConfig,
        Command::ShowGraphConfig,
        Command::ShowPatchBay,
        Command::ShowGraphEditor,
        Command::ShowLastContentView,
        Command::ShowAllPluginWindows,
        Command::HideAllPluginWindows,
        Command::ToggleVirtualKeyboard,
        Command::RotateContentView,
        Command::MediaClose,
        Command::MediaOpen,
        Command::MediaNew,
        Command::MediaSave,
        Command::MediaSaveAs,
        Command::SessionClose,
        Command::SessionOpen,
        Command::SessionNew,
        Command::SessionSave,
        Command::SessionSaveAs,
        Command::SessionAddGraph,
        Command::SessionDuplicateGraph,
        Command::SessionDeleteGraph,
        Command::SessionInsertPlugin,
        Command::ExportAudio,
        Command::ExportMidi,
        Command::ExportGraph,
        Command::ImportGraph,
        Command::Panic,
        Command::CheckNewerVersion,
        Command::SignIn,
        Command::SignOut,
        Command::TransportRewind,
        Command::TransportForward,
        Command::TransportPlay,
        Command::TransportRecord,
        Command::TransportSeekZero,
        Command::TransportStop,
        Command::Quit,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::SelectAll,
        Command::Undo,
        Command::Redo,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Command> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    pub fn info(self) -> CommandInfo {
        use categories::*;

        match self {
            Command::ExportAudio => {
                CommandInfo::new("Export Audio", "Export to an audio file", EXPORTING)
            }
            Command::ExportMidi => CommandInfo::new("Export MIDI", "Export to a MIDI file", EXPORTING),
            Command::ImportGraph => {
                CommandInfo::new("Import Graph", "Import graph to current session", EXPORTING)
            }
            Command::ExportGraph => CommandInfo::new("Export Graph", "Export graph to file", EXPORTING),
            Command::Panic => {
                CommandInfo::new("Panic", "Sends all notes off to the engine", ENGINE)
                    .key(KeyPress::cmd_alt('p'))
            }

            Command::SessionClose => {
                CommandInfo::new("Close Session", "Close the current session", SESSION)
            }
            Command::SessionNew => CommandInfo::new("New Session", "Create a new session", SESSION)
                .key(KeyPress::cmd('n')),
            Command::SessionOpen => {
                CommandInfo::new("Open Session", "Open an existing session", SESSION)
                    .key(KeyPress::cmd('o'))
            }
            Command::SessionSave => {
                CommandInfo::new("Save Session", "Save the current session", SESSION)
                    .key(KeyPress::cmd('s'))
            }
            Command::SessionSaveAs => CommandInfo::new(
                "Save Session As",
                "Save the current session with a new name",
                SESSION,
            )
            .key(KeyPress::cmd_shift('s')),
            Command::SessionAddGraph => {
                CommandInfo::new("Add Graph", "Add a new graph to the session", SESSION)
                    .key(KeyPress::cmd_shift('n'))
            }
            Command::SessionDuplicateGraph => {
                CommandInfo::new("Duplicate Graph", "Duplicate the current graph", SESSION)
                    .key(KeyPress::cmd_shift('d'))
            }
            Command::SessionDeleteGraph => {
                CommandInfo::new("Delete Graph", "Deletes the current graph", SESSION)
                    .key(KeyPress::new(Key::Backspace, Modifiers::COMMAND))
            }
            Command::SessionInsertPlugin => {
                CommandInfo::new("Insert Plugin", "Add a plugin in the current graph", SESSION)
                    .key(KeyPress::cmd('p'))
                    .disabled()
            }

            Command::MediaNew => CommandInfo::new("New Media", "Create new media", APPLICATION),
            Command::MediaClose => {
                CommandInfo::new("Close Media", "Close the current media", APPLICATION)
            }
            Command::MediaOpen => {
                CommandInfo::new("Open Media", "Opens a type of supported media", MEDIA)
            }
            Command::MediaSave => {
                CommandInfo::new("Save Media", "Saves the currently viewed object", MEDIA)
            }
            Command::MediaSaveAs => CommandInfo::new(
                "Save Media As",
                "Saves the current object with another name",
                MEDIA,
            )
            .key(KeyPress::cmd_shift('s')),

            Command::ShowPreferences => {
                CommandInfo::new("Show Preferences", "Application preferences", APPLICATION)
                    .key(KeyPress::cmd(','))
            }
            Command::ShowAbout => CommandInfo::new("Show About", "About this program", APPLICATION),
            Command::ShowLegacyView => {
                CommandInfo::new("Legacy View", "Shows the legacy interface", INTERFACES)
            }
            Command::ShowPluginManager => {
                CommandInfo::new("Plugin Manager", "Plugin management", APPLICATION)
            }
            Command::ShowSessionConfig => {
                CommandInfo::new("Session Settings", "Session Settings", SESSION)
            }
            Command::ShowGraphConfig => CommandInfo::new("Graph Settings", "Graph Settings", SESSION),
            Command::ShowPatchBay => CommandInfo::new("Patch Bay", "Show the patch bay", SESSION)
                .key(KeyPress::plain(Key::F1)),
            Command::ShowGraphEditor => {
                CommandInfo::new("Graph Editor", "Show the graph editor", SESSION)
                    .key(KeyPress::plain(Key::F2))
            }
            Command::ShowLastContentView => {
                CommandInfo::new("Last View", "Show the previous content view", VIEW)
            }
            Command::ShowAllPluginWindows => {
                CommandInfo::new("Show Plugin Windows", "Show all plugin windows", WINDOWS)
            }
            Command::HideAllPluginWindows => {
                CommandInfo::new("Hide Plugin Windows", "Hide all plugin windows", WINDOWS)
            }
            Command::ToggleVirtualKeyboard => {
                CommandInfo::new("Virtual Keyboard", "Toggle the virtual keyboard", SESSION)
            }
            Command::RotateContentView => {
                CommandInfo::new("Rotate View...", "Rotate the content view", SESSION)
                    .key(KeyPress::cmd_alt('r'))
            }

            Command::CheckNewerVersion => {
                CommandInfo::new("Check For Updates", "Check newer version", APPLICATION)
            }
            Command::SignIn => CommandInfo::new("Sign In", "Sign in to your account", APPLICATION),
            Command::SignOut => {
                CommandInfo::new("Sign Out", "Sign out of your account", APPLICATION)
            }

            Command::Quit => {
                CommandInfo::new("Quit", "Quit the app", APPLICATION).key(KeyPress::cmd('q'))
            }
            Command::Undo => CommandInfo::new("Undo", "Undo the last operation", APPLICATION),
            Command::Redo => CommandInfo::new("Redo", "Redo the last operation", APPLICATION),
            Command::Cut => CommandInfo::new("Cut", "Cut", APPLICATION),
            Command::Copy => CommandInfo::new("Copy", "Copy", APPLICATION)
                .key(KeyPress::cmd('c'))
                .disabled(),
            Command::Paste => CommandInfo::new("Paste", "Paste", APPLICATION)
                .key(KeyPress::cmd('v'))
                .disabled(),
            Command::SelectAll => CommandInfo::new("Select All", "Select all", APPLICATION),

            Command::TransportRewind => CommandInfo::new("Rewind", "Transport Rewind", PLAYBACK)
                .key(KeyPress::plain(Key::Char('j'))),
            Command::TransportForward => {
                CommandInfo::new("Forward", "Transport Fast Forward", PLAYBACK)
                    .key(KeyPress::plain(Key::Char('l')))
            }
            Command::TransportPlay => CommandInfo::new("Play", "Transport Play", PLAYBACK)
                .key(KeyPress::plain(Key::Space)),
            Command::TransportRecord => CommandInfo::new("Record", "Transport Record", PLAYBACK),
            Command::TransportSeekZero => {
                CommandInfo::new("Seek Start", "Seek to Beginning", PLAYBACK)
            }
            Command::TransportStop => CommandInfo::new("Stop", "Transport Stop", PLAYBACK),
        }
    }
}

/// Info for a command id, or `None` for ids no command uses.
///
/// Every [`Command`] has a filled-in record, including the plugin window
/// and last-view commands. "Unset" only ever means an unassigned id such as
/// `0x1002` or `0x1007`. Paste defaults to `cmd-v`.
pub fn command_info(id: u32) -> Option<CommandInfo> {
    Command::from_id(id).map(Command::info)
}

/// Fill `result` for `id`. Unknown ids leave `result` as it was.
pub fn fill_command_info(id: u32, result: &mut CommandInfo) {
    if let Some(info) = command_info(id) {
        *result = info;
    }
}

/// Every default chord, in command order. Some chords are shared between
/// commands that are never enabled at the same time.
pub fn keybindings() -> Vec<(KeyPress, Command)> {
    Command::ALL
        .iter()
        .filter_map(|&command| command.info().default_key.map(|key| (key, command)))
        .collect()
}
