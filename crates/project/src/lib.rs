mod load;
mod save;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub use load::{SessionMetadata, load_graph, load_session, load_session_metadata};
pub use save::{save_graph, save_session};

/// Newest document version this build reads and the version it writes.
pub const FORMAT_VERSION: u32 = 1;

pub const SESSION_EXTENSION: &str = "els";
pub const GRAPH_EXTENSION: &str = "elg";

/// The two document kinds, told apart by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Full session, replaces the live session when opened
    Session,
    /// Single graph, merged into the live session when opened
    Graph,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case(SESSION_EXTENSION) {
            Some(FileKind::Session)
        } else if ext.eq_ignore_ascii_case(GRAPH_EXTENSION) {
            Some(FileKind::Graph)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Session => SESSION_EXTENSION,
            FileKind::Graph => GRAPH_EXTENSION,
        }
    }
}

/// Type tag stored in every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Session,
    Graph,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Session => f.write_str("session"),
            DocumentKind::Graph => f.write_str("graph"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active_graph: usize,
    #[serde(default)]
    pub graphs: Vec<GraphData>,
    #[serde(default)]
    pub controllers: Vec<ControllerDeviceData>,
    #[serde(default)]
    pub maps: Vec<ControllerMapData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub version: u32,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub connections: Vec<ConnectionData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKindData {
    Plugin,
    AudioInput,
    AudioOutput,
    MidiInput,
    MidiOutput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: u64,
    pub name: String,
    pub kind: NodeKindData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub bypassed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionData {
    pub source: u64,
    pub source_port: u32,
    pub target: u64,
    pub target_port: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerDeviceData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub input_device: String,
    #[serde(default)]
    pub controls: Vec<ControlData>,
}

/// Persisted control. Every property is optional on disk; missing ones
/// take the control defaults when loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub midi_channel: Option<i64>,
    #[serde(default)]
    pub toggle_value: Option<i32>,
    #[serde(default)]
    pub inverse_toggle: Option<bool>,
    #[serde(default)]
    pub toggle_mode: Option<String>,
    /// Raw MIDI bytes from older files. Read once, never written.
    #[serde(default, skip_serializing)]
    pub mapping_data: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerMapData {
    pub controller: String,
    pub control: String,
    pub node: u64,
    #[serde(default = "no_parameter")]
    pub parameter: i32,
}

fn no_parameter() -> i32 {
    -1
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] rmp_serde::decode::Error),

    #[error("Expected a {expected} document, found a {found} document")]
    WrongDocumentKind {
        expected: DocumentKind,
        found: DocumentKind,
    },

    #[error("Unsupported document version {0}")]
    UnsupportedVersion(u32),

    #[error("Failed to replace target file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
