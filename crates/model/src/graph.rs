use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Plugin { format: String, identifier: String },
    AudioInput,
    AudioOutput,
    MidiInput,
    MidiOutput,
}

impl NodeKind {
    pub fn is_io(&self) -> bool {
        !matches!(self, NodeKind::Plugin { .. })
    }

    pub fn is_midi_io(&self) -> bool {
        matches!(self, NodeKind::MidiInput | NodeKind::MidiOutput)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub bypassed: bool,
}

impl Node {
    pub fn is_io(&self) -> bool {
        self.kind.is_io()
    }

    pub fn is_midi_io(&self) -> bool {
        self.kind.is_midi_io()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub source: NodeId,
    pub source_port: u32,
    pub target: NodeId,
    pub target_port: u32,
}

/// A named, ordered collection of processing nodes and their connections.
///
/// Node order is meaningful: it is the order the mixer shows strips in.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub uuid: Uuid,
    pub name: String,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    next_node_id: u64,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
            next_node_id: 1,
        }
    }

    /// Rebuild a graph from persisted parts. Node ids are kept as-is.
    pub fn from_parts(
        uuid: Uuid,
        name: String,
        nodes: Vec<Node>,
        connections: Vec<Connection>,
    ) -> Self {
        let next_node_id = nodes.iter().map(|n| n.id.0 + 1).max().unwrap_or(1);
        Self {
            uuid,
            name,
            nodes,
            connections,
            next_node_id,
        }
    }

    /// The template installed by a new session: stereo audio and MIDI I/O,
    /// each input wired straight through to its output.
    pub fn default_graph() -> Self {
        let mut graph = Graph::new("Graph");
        let audio_in = graph.add_node("Audio In", NodeKind::AudioInput);
        let audio_out = graph.add_node("Audio Out", NodeKind::AudioOutput);
        let midi_in = graph.add_node("MIDI In", NodeKind::MidiInput);
        let midi_out = graph.add_node("MIDI Out", NodeKind::MidiOutput);

        for port in 0..2 {
            graph.connect(audio_in, port, audio_out, port);
        }
        graph.connect(midi_in, 0, midi_out, 0);
        graph
    }

    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node {
            id,
            name: name.into(),
            kind,
            bypassed: false,
        });
        id
    }

    /// Removes the node and every connection touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.index_of(id)?;
        self.connections.retain(|c| c.source != id && c.target != id);
        Some(self.nodes.remove(index))
    }

    /// Returns `false` if either endpoint is not in this graph or the
    /// connection already exists.
    pub fn connect(
        &mut self,
        source: NodeId,
        source_port: u32,
        target: NodeId,
        target_port: u32,
    ) -> bool {
        if self.index_of(source).is_none() || self.index_of(target).is_none() {
            return false;
        }
        let connection = Connection {
            source,
            source_port,
            target,
            target_port,
        };
        if self.connections.contains(&connection) {
            return false;
        }
        self.connections.push(connection);
        true
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes shown as mixer strips, in index order. MIDI I/O is never a strip.
    pub fn mixer_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| !n.is_midi_io())
    }

    /// Move the node at `from` so it ends up at `to`. A `to` past the end
    /// moves the node last. Returns `false` when `from` is out of range.
    pub fn move_node(&mut self, from: usize, to: usize) -> bool {
        if from >= self.nodes.len() {
            return false;
        }
        let to = to.min(self.nodes.len() - 1);
        if from != to {
            let node = self.nodes.remove(from);
            self.nodes.insert(to, node);
        }
        true
    }

    /// Move `source` to the index currently held by `target`.
    ///
    /// No-op returning `false` unless both nodes belong to this graph and
    /// are distinct.
    pub fn move_node_to(&mut self, source: NodeId, target: NodeId) -> bool {
        match (self.index_of(source), self.index_of(target)) {
            (Some(from), Some(to)) if from != to => self.move_node(from, to),
            _ => false,
        }
    }

    /// Deep copy under a fresh uuid.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.uuid = Uuid::new_v4();
        copy.name = format!("{} (copy)", self.name);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(name: &str) -> NodeKind {
        NodeKind::Plugin {
            format: "LV2".to_string(),
            identifier: format!("urn:test:{name}"),
        }
    }

    fn names(graph: &Graph) -> Vec<&str> {
        graph.nodes().iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_default_graph_layout() {
        let graph = Graph::default_graph();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.connections().len(), 3);
        assert!(graph.nodes().iter().all(|n| n.is_io()));
        assert_eq!(graph.mixer_nodes().count(), 2);
    }

    #[test]
    fn test_node_ids_are_unique() {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", plugin("a"));
        let b = graph.add_node("B", plugin("b"));
        graph.remove_node(a);
        let c = graph.add_node("C", plugin("c"));
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_remove_node_drops_connections() {
        let mut graph = Graph::default_graph();
        let audio_in = graph.nodes()[0].id;
        let removed = graph.remove_node(audio_in).expect("node");
        assert_eq!(removed.name, "Audio In");
        assert_eq!(graph.connections().len(), 1);
        assert!(graph.remove_node(audio_in).is_none());
    }

    #[test]
    fn test_connect_rejects_unknown_and_duplicate() {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", plugin("a"));
        let b = graph.add_node("B", plugin("b"));
        assert!(graph.connect(a, 0, b, 0));
        assert!(!graph.connect(a, 0, b, 0));
        assert!(!graph.connect(a, 0, NodeId(999), 0));
    }

    #[test]
    fn test_move_node_to_forward_and_backward() {
        let mut graph = Graph::new("Test");
        let ids: Vec<NodeId> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|n| graph.add_node(*n, plugin(n)))
            .collect();

        // A (0) onto D (3)
        assert!(graph.move_node_to(ids[0], ids[3]));
        assert_eq!(names(&graph), vec!["B", "C", "D", "A", "E"]);
        assert_eq!(graph.index_of(ids[0]), Some(3));

        // E (4) onto B (0)
        assert!(graph.move_node_to(ids[4], ids[1]));
        assert_eq!(names(&graph), vec!["E", "B", "C", "D", "A"]);
    }

    #[test]
    fn test_move_node_to_invalid_is_noop() {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", plugin("a"));
        let b = graph.add_node("B", plugin("b"));
        let before = graph.clone();

        assert!(!graph.move_node_to(a, a));
        assert!(!graph.move_node_to(a, NodeId(42)));
        assert!(!graph.move_node_to(NodeId(42), b));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_move_node_clamps_target() {
        let mut graph = Graph::new("Test");
        for n in ["A", "B", "C"] {
            graph.add_node(n, plugin(n));
        }
        assert!(graph.move_node(0, 10));
        assert_eq!(names(&graph), vec!["B", "C", "A"]);
        assert!(!graph.move_node(3, 0));
    }

    #[test]
    fn test_mixer_nodes_skip_midi_io() {
        let mut graph = Graph::default_graph();
        graph.add_node("Synth", plugin("synth"));
        let mixer: Vec<&str> = graph.mixer_nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(mixer, vec!["Audio In", "Audio Out", "Synth"]);
    }

    #[test]
    fn test_from_parts_continues_ids() {
        let nodes = vec![Node {
            id: NodeId(7),
            name: "Seven".to_string(),
            kind: NodeKind::AudioOutput,
            bypassed: false,
        }];
        let mut graph = Graph::from_parts(Uuid::new_v4(), "Loaded".to_string(), nodes, vec![]);
        assert_eq!(graph.add_node("Next", plugin("next")), NodeId(8));
    }

    #[test]
    fn test_node_mut_edits_in_place() {
        let mut graph = Graph::default_graph();
        let id = graph.add_node("Synth", plugin("synth"));
        if let Some(node) = graph.node_mut(id) {
            node.name = "Lead".to_string();
            node.bypassed = true;
        }
        let node = graph.node(id).expect("node");
        assert_eq!(node.name, "Lead");
        assert!(node.bypassed);
        assert!(graph.node_mut(NodeId(999)).is_none());
    }

    #[test]
    fn test_duplicate_gets_new_uuid() {
        let graph = Graph::default_graph();
        let copy = graph.duplicate();
        assert_ne!(copy.uuid, graph.uuid);
        assert_eq!(copy.name, "Graph (copy)");
        assert_eq!(copy.nodes(), graph.nodes());
    }
}
