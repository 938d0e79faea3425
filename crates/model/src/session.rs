use uuid::Uuid;

use crate::controller::{Control, ControllerDevice, ControllerMap};
use crate::graph::Graph;

/// Root project state: the graphs plus controller devices and their mappings.
///
/// Every mutating accessor bumps [`Session::revision`] unless changes are
/// frozen. Documents compare revisions to decide whether there is anything
/// to save. Freezing is a cooperative guard for bulk edits on a single
/// thread; it does not synchronize anything.
#[derive(Debug, Clone, Default)]
pub struct Session {
    name: String,
    graphs: Vec<Graph>,
    active_graph: usize,
    controllers: Vec<ControllerDevice>,
    maps: Vec<ControllerMap>,
    revision: u64,
    changes_frozen: bool,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn changes_frozen(&self) -> bool {
        self.changes_frozen
    }

    pub fn set_changes_frozen(&mut self, frozen: bool) {
        self.changes_frozen = frozen;
    }

    /// Record a change. Ignored while changes are frozen.
    pub fn touch(&mut self) {
        if !self.changes_frozen {
            self.revision += 1;
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.graphs.clear();
        self.active_graph = 0;
        self.controllers.clear();
        self.maps.clear();
        self.touch();
    }

    pub fn add_graph(&mut self, graph: Graph, make_active: bool) -> usize {
        self.graphs.push(graph);
        let index = self.graphs.len() - 1;
        if make_active {
            self.active_graph = index;
        }
        self.touch();
        index
    }

    pub fn remove_graph(&mut self, index: usize) -> Option<Graph> {
        if index >= self.graphs.len() {
            return None;
        }
        let graph = self.graphs.remove(index);
        if self.active_graph >= self.graphs.len() || self.active_graph > index {
            self.active_graph = self.active_graph.saturating_sub(1);
        }
        self.touch();
        Some(graph)
    }

    /// Append a copy of graph `index` and make it active.
    pub fn duplicate_graph(&mut self, index: usize) -> Option<usize> {
        let copy = self.graphs.get(index)?.duplicate();
        Some(self.add_graph(copy, true))
    }

    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    pub fn graph(&self, index: usize) -> Option<&Graph> {
        self.graphs.get(index)
    }

    pub fn graph_mut(&mut self, index: usize) -> Option<&mut Graph> {
        if index >= self.graphs.len() {
            return None;
        }
        self.touch();
        self.graphs.get_mut(index)
    }

    pub fn active_graph_index(&self) -> usize {
        self.active_graph
    }

    pub fn active_graph(&self) -> Option<&Graph> {
        self.graphs.get(self.active_graph)
    }

    pub fn active_graph_mut(&mut self) -> Option<&mut Graph> {
        self.graph_mut(self.active_graph)
    }

    pub fn set_active_graph(&mut self, index: usize) -> bool {
        if index >= self.graphs.len() {
            return false;
        }
        if index != self.active_graph {
            self.active_graph = index;
            self.touch();
        }
        true
    }

    pub fn add_controller(&mut self, device: ControllerDevice) {
        self.controllers.push(device);
        self.touch();
    }

    pub fn remove_controller(&mut self, uuid: Uuid) -> Option<ControllerDevice> {
        let index = self.controllers.iter().position(|d| d.uuid == uuid)?;
        self.maps.retain(|m| m.controller != uuid);
        self.touch();
        Some(self.controllers.remove(index))
    }

    pub fn controllers(&self) -> &[ControllerDevice] {
        &self.controllers
    }

    pub fn controller(&self, uuid: Uuid) -> Option<&ControllerDevice> {
        self.controllers.iter().find(|d| d.uuid == uuid)
    }

    /// The device `control` belongs to.
    pub fn controller_for(&self, control: &Control) -> Option<&ControllerDevice> {
        self.controller(control.device_id())
    }

    pub fn add_map(&mut self, map: ControllerMap) {
        self.maps.push(map);
        self.touch();
    }

    pub fn maps(&self) -> &[ControllerMap] {
        &self.maps
    }
}
