use crate::{
    ConnectionData, ControlData, ControllerDeviceData, ControllerMapData, DocumentKind,
    FORMAT_VERSION, GraphData, NodeData, NodeKindData, ProjectError, SessionData,
};
use ember_model::{Control, ControllerDevice, Graph, NodeKind, Session};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn save_session(path: &Path, session: &Session) -> Result<(), ProjectError> {
    let data = session_to_data(session);
    write_document(path, &data)?;
    log::info!(target: "project", "saved session '{}' to {}", data.name, path.display());
    Ok(())
}

/// Write a single graph as a standalone fragment.
pub fn save_graph(path: &Path, graph: &Graph) -> Result<(), ProjectError> {
    write_document(path, &graph_to_data(graph))?;
    log::info!(target: "project", "exported graph '{}' to {}", graph.name, path.display());
    Ok(())
}

/// Serialize next to the target and move over it, so a failed write never
/// leaves a truncated document behind.
fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), ProjectError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
    }
    file.persist(path)?;
    Ok(())
}

pub(crate) fn session_to_data(session: &Session) -> SessionData {
    SessionData {
        kind: DocumentKind::Session,
        version: FORMAT_VERSION,
        name: session.name().to_string(),
        active_graph: session.active_graph_index(),
        graphs: session.graphs().iter().map(graph_to_data).collect(),
        controllers: session.controllers().iter().map(device_to_data).collect(),
        maps: session
            .maps()
            .iter()
            .map(|map| ControllerMapData {
                controller: map.controller.to_string(),
                control: map.control.to_string(),
                node: map.node.0,
                parameter: map.parameter,
            })
            .collect(),
    }
}

pub(crate) fn graph_to_data(graph: &Graph) -> GraphData {
    GraphData {
        kind: DocumentKind::Graph,
        version: FORMAT_VERSION,
        uuid: graph.uuid.to_string(),
        name: graph.name.clone(),
        nodes: graph
            .nodes()
            .iter()
            .map(|node| {
                let (kind, format, identifier) = match &node.kind {
                    NodeKind::Plugin { format, identifier } => (
                        NodeKindData::Plugin,
                        Some(format.clone()),
                        Some(identifier.clone()),
                    ),
                    NodeKind::AudioInput => (NodeKindData::AudioInput, None, None),
                    NodeKind::AudioOutput => (NodeKindData::AudioOutput, None, None),
                    NodeKind::MidiInput => (NodeKindData::MidiInput, None, None),
                    NodeKind::MidiOutput => (NodeKindData::MidiOutput, None, None),
                };
                NodeData {
                    id: node.id.0,
                    name: node.name.clone(),
                    kind,
                    format,
                    identifier,
                    bypassed: node.bypassed,
                }
            })
            .collect(),
        connections: graph
            .connections()
            .iter()
            .map(|c| ConnectionData {
                source: c.source.0,
                source_port: c.source_port,
                target: c.target.0,
                target_port: c.target_port,
            })
            .collect(),
    }
}

fn device_to_data(device: &ControllerDevice) -> ControllerDeviceData {
    ControllerDeviceData {
        name: device.name.clone(),
        uuid: device.uuid.to_string(),
        input_device: device.input_device.clone(),
        controls: device.controls().iter().map(control_to_data).collect(),
    }
}

fn control_to_data(control: &Control) -> ControlData {
    ControlData {
        name: Some(control.name.clone()),
        uuid: Some(control.uuid.to_string()),
        event_type: Some(control.event_type.as_str().to_string()),
        event_id: Some(i64::from(control.event_id)),
        midi_channel: Some(i64::from(control.midi_channel)),
        toggle_value: Some(control.toggle_value),
        inverse_toggle: Some(control.inverse_toggle),
        toggle_mode: Some(control.toggle_mode.as_str().to_string()),
        mapping_data: None,
    }
}
