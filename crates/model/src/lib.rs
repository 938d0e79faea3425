mod asset;
mod controller;
mod graph;
mod midi;
mod session;

pub use asset::AssetType;
pub use controller::{Control, ControlToggleMode, ControllerDevice, ControllerMap, EventType};
pub use graph::{Connection, Graph, Node, NodeId, NodeKind};
pub use midi::MidiMessage;
pub use session::Session;

pub use uuid::Uuid;
