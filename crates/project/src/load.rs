use crate::{
    ControlData, ControllerDeviceData, DocumentKind, FORMAT_VERSION, GraphData, NodeKindData,
    ProjectError, SessionData,
};
use ember_model::{
    Connection, Control, ControlToggleMode, ControllerDevice, ControllerMap, EventType, Graph,
    MidiMessage, Node, NodeId, NodeKind, Session, Uuid,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SessionMetadata {
    pub name: String,
    pub graph_count: usize,
    pub node_count: usize,
    pub controller_count: usize,
}

#[derive(Deserialize)]
struct DocumentHeader {
    #[serde(rename = "type")]
    kind: DocumentKind,
    version: u32,
}

// Try JSON first, fall back to MessagePack
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProjectError> {
    serde_json::from_slice(bytes)
        .or_else(|_| rmp_serde::decode::from_slice(bytes).map_err(ProjectError::from))
}

/// Read `path` and check its type tag before decoding the body.
fn load_document<T: DeserializeOwned>(path: &Path, expected: DocumentKind) -> Result<T, ProjectError> {
    let bytes = std::fs::read(path)?;

    let header: DocumentHeader = decode(&bytes)?;
    if header.kind != expected {
        return Err(ProjectError::WrongDocumentKind {
            expected,
            found: header.kind,
        });
    }
    if header.version > FORMAT_VERSION {
        return Err(ProjectError::UnsupportedVersion(header.version));
    }

    decode(&bytes)
}

pub fn load_session(path: &Path) -> Result<Session, ProjectError> {
    let data: SessionData = load_document(path, DocumentKind::Session)?;
    log::debug!(target: "project", "loaded session '{}' from {}", data.name, path.display());
    Ok(session_from_data(data))
}

/// Load a graph fragment. Anything not tagged as a graph is rejected.
pub fn load_graph(path: &Path) -> Result<Graph, ProjectError> {
    let data: GraphData = load_document(path, DocumentKind::Graph)?;
    Ok(graph_from_data(data))
}

pub fn load_session_metadata(path: &Path) -> Result<SessionMetadata, ProjectError> {
    let data: SessionData = load_document(path, DocumentKind::Session)?;

    let node_count: usize = data.graphs.iter().map(|g| g.nodes.len()).sum();

    Ok(SessionMetadata {
        name: data.name,
        graph_count: data.graphs.len(),
        node_count,
        controller_count: data.controllers.len(),
    })
}

pub(crate) fn session_from_data(data: SessionData) -> Session {
    let mut session = Session::new(data.name);

    for graph in data.graphs {
        session.add_graph(graph_from_data(graph), false);
    }
    if !session.set_active_graph(data.active_graph) && session.graph_count() > 0 {
        log::warn!(target: "project", "active graph {} out of range", data.active_graph);
    }

    for device in data.controllers {
        session.add_controller(device_from_data(device));
    }

    for map in data.maps {
        match (parse_uuid(&map.controller), parse_uuid(&map.control)) {
            (Some(controller), Some(control)) => {
                session.add_map(ControllerMap::new(
                    controller,
                    control,
                    NodeId(map.node),
                    map.parameter,
                ));
            }
            _ => log::warn!(target: "project", "dropping controller map with a malformed uuid"),
        }
    }

    session
}

pub(crate) fn graph_from_data(data: GraphData) -> Graph {
    let nodes = data
        .nodes
        .into_iter()
        .map(|node| {
            let kind = match node.kind {
                NodeKindData::Plugin => NodeKind::Plugin {
                    format: node.format.unwrap_or_default(),
                    identifier: node.identifier.unwrap_or_default(),
                },
                NodeKindData::AudioInput => NodeKind::AudioInput,
                NodeKindData::AudioOutput => NodeKind::AudioOutput,
                NodeKindData::MidiInput => NodeKind::MidiInput,
                NodeKindData::MidiOutput => NodeKind::MidiOutput,
            };
            Node {
                id: NodeId(node.id),
                name: node.name,
                kind,
                bypassed: node.bypassed,
            }
        })
        .collect();

    let connections = data
        .connections
        .into_iter()
        .map(|c| Connection {
            source: NodeId(c.source),
            source_port: c.source_port,
            target: NodeId(c.target),
            target_port: c.target_port,
        })
        .collect();

    let uuid = parse_uuid(&data.uuid).unwrap_or_else(Uuid::new_v4);
    Graph::from_parts(uuid, data.name, nodes, connections)
}

fn device_from_data(data: ControllerDeviceData) -> ControllerDevice {
    let uuid = parse_uuid(&data.uuid).unwrap_or_else(Uuid::new_v4);
    let mut device = ControllerDevice::with_uuid(uuid, data.name);
    device.input_device = data.input_device;
    for control in data.controls {
        device.add_control(control_from_data(control));
    }
    device
}

/// Build a control, filling in defaults for missing properties.
///
/// Older files describe the mapping as raw MIDI bytes under `mappingData`.
/// Those bytes win over `eventType`/`eventId` when they decode to a note or
/// controller event; otherwise they are dropped and the defaults stand.
fn control_from_data(data: ControlData) -> Control {
    let mut control = Control::new(data.name.unwrap_or_else(|| "Control".to_string()));
    if let Some(uuid) = data.uuid.as_deref().and_then(parse_uuid) {
        control.uuid = uuid;
    }

    let mut event_type = data.event_type.as_deref().and_then(EventType::from_name);
    let mut event_id = data.event_id;

    if let Some(bytes) = data.mapping_data.as_deref() {
        match MidiMessage::from_bytes(bytes) {
            Some(msg) if msg.is_note_on_or_off() => {
                event_type = Some(EventType::Note);
                event_id = msg.note_number().map(i64::from);
            }
            Some(msg) if msg.is_controller() => {
                event_type = Some(EventType::Controller);
                event_id = msg.controller_number().map(i64::from);
            }
            _ => log::debug!(
                target: "project",
                "ignoring unusable mapping data on control '{}'",
                control.name
            ),
        }
    }

    control.event_type = event_type.unwrap_or_default();
    control.event_id = event_id.map_or(0, |id| id.clamp(0, 127) as u8);
    control.midi_channel = data.midi_channel.map_or(0, |ch| ch.clamp(0, 16) as u8);
    if let Some(value) = data.toggle_value {
        control.toggle_value = value;
    }
    control.inverse_toggle = data.inverse_toggle.unwrap_or(false);
    control.toggle_mode = data
        .toggle_mode
        .as_deref()
        .map(ControlToggleMode::from_name)
        .unwrap_or_default();
    control
}

fn parse_uuid(text: &str) -> Option<Uuid> {
    Uuid::parse_str(text).ok()
}
