//! Mixer strip list for the active graph.

use ember_model::{NodeId, Session};

/// Drag payload carried by a mixer strip.
pub const STRIP_DRAG_DESCRIPTION: &str = "graphMixerStrip";

pub const EMPTY_PLACEHOLDER: &str = "No channels to display";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerRow {
    pub node: NodeId,
    pub name: String,
    pub name_editable: bool,
}

/// Rows mirror the active graph's mixer nodes in index order. The model is a
/// snapshot; call [`GraphMixerModel::refresh`] after the graph changes.
#[derive(Debug, Clone, Default)]
pub struct GraphMixerModel {
    rows: Vec<MixerRow>,
}

impl GraphMixerModel {
    pub fn new(session: &Session) -> Self {
        let mut model = Self::default();
        model.refresh(session);
        model
    }

    pub fn refresh(&mut self, session: &Session) {
        self.rows = session
            .active_graph()
            .map(|graph| {
                graph
                    .mixer_nodes()
                    .map(|node| MixerRow {
                        node: node.id,
                        name: node.name.clone(),
                        name_editable: !node.kind.is_io(),
                    })
                    .collect()
            })
            .unwrap_or_default();
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn node(&self, row: usize) -> Option<NodeId> {
        self.rows.get(row).map(|r| r.node)
    }

    pub fn row_of(&self, node: NodeId) -> Option<usize> {
        self.rows.iter().position(|r| r.node == node)
    }

    pub fn row_name_editable(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.name_editable)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MixerRow] {
        &self.rows
    }
}

/// Mouse and drag-hover state of a single strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripDragState {
    down: bool,
    dragging: bool,
    hover: bool,
}

impl StripDragState {
    pub fn mouse_down(&mut self) {
        self.down = true;
        self.dragging = false;
    }

    /// Returns the drag description on the first motion after a press.
    pub fn mouse_drag(&mut self) -> Option<&'static str> {
        if self.down && !self.dragging {
            self.dragging = true;
            return Some(STRIP_DRAG_DESCRIPTION);
        }
        None
    }

    pub fn mouse_up(&mut self) {
        self.down = false;
        self.dragging = false;
        self.hover = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_interested(&self, description: &str) -> bool {
        description == STRIP_DRAG_DESCRIPTION
    }

    pub fn drag_enter(&mut self, description: &str) {
        self.hover = self.is_interested(description) && !self.dragging;
    }

    pub fn drag_exit(&mut self) {
        self.hover = false;
    }

    /// Only a strip hovered by another strip's drag is highlighted.
    pub fn should_highlight(&self) -> bool {
        self.hover && !self.dragging && !self.down
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphMixerView {
    model: GraphMixerModel,
    strips: Vec<StripDragState>,
}

impl GraphMixerView {
    pub fn new(session: &Session) -> Self {
        let mut view = Self::default();
        view.stabilize(session);
        view
    }

    /// Rebuild rows and strip states from the session.
    pub fn stabilize(&mut self, session: &Session) {
        self.model.refresh(session);
        self.strips = vec![StripDragState::default(); self.model.num_rows()];
    }

    pub fn model(&self) -> &GraphMixerModel {
        &self.model
    }

    pub fn strip(&self, row: usize) -> Option<&StripDragState> {
        self.strips.get(row)
    }

    pub fn strip_mut(&mut self, row: usize) -> Option<&mut StripDragState> {
        self.strips.get_mut(row)
    }

    pub fn placeholder_text(&self) -> Option<&'static str> {
        self.model.is_empty().then_some(EMPTY_PLACEHOLDER)
    }

    /// Move the node under `source_row` to the index of the node under
    /// `target_row`, then refresh. Anything that does not resolve to two
    /// distinct nodes of the active graph is ignored.
    pub fn drop_strip(
        &mut self,
        session: &mut Session,
        source_row: usize,
        target_row: usize,
        description: &str,
    ) -> bool {
        if let Some(strip) = self.strips.get_mut(target_row) {
            strip.drag_exit();
        }
        if description != STRIP_DRAG_DESCRIPTION {
            return false;
        }

        let (Some(source), Some(target)) = (self.model.node(source_row), self.model.node(target_row))
        else {
            log::debug!(target: "mixer", "ignoring drop {source_row} -> {target_row}");
            return false;
        };

        // `active_graph_mut` bumps the revision, so resolve first.
        let valid = session.active_graph().is_some_and(|graph| {
            matches!(
                (graph.index_of(source), graph.index_of(target)),
                (Some(from), Some(to)) if from != to
            )
        });
        if !valid {
            log::debug!(target: "mixer", "ignoring drop {source:?} -> {target:?}");
            return false;
        }

        if let Some(graph) = session.active_graph_mut() {
            graph.move_node_to(source, target);
        }

        self.stabilize(session);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_model::{Graph, NodeKind};

    fn plugin(graph: &mut Graph, name: &str) -> NodeId {
        graph.add_node(
            name,
            NodeKind::Plugin {
                format: "LV2".to_string(),
                identifier: format!("urn:test:{name}"),
            },
        )
    }

    fn session_with_plugins() -> (Session, Vec<NodeId>) {
        let mut graph = Graph::default_graph();
        let ids = vec![
            plugin(&mut graph, "Synth"),
            plugin(&mut graph, "Delay"),
            plugin(&mut graph, "Reverb"),
        ];
        let mut session = Session::new("Mix");
        session.add_graph(graph, true);
        (session, ids)
    }

    fn row_names(view: &GraphMixerView) -> Vec<&str> {
        view.model().rows().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_rows_exclude_midi_io() {
        let (session, _) = session_with_plugins();
        let view = GraphMixerView::new(&session);

        assert_eq!(
            row_names(&view),
            vec!["Audio In", "Audio Out", "Synth", "Delay", "Reverb"]
        );
        let graph = session.active_graph().expect("graph");
        for row in view.model().rows() {
            let node = graph.node(row.node).expect("node");
            assert!(!node.is_midi_io());
        }
    }

    #[test]
    fn test_io_rows_are_not_renamable() {
        let (session, _) = session_with_plugins();
        let model = GraphMixerModel::new(&session);
        assert!(!model.row_name_editable(0));
        assert!(model.row_name_editable(2));
        assert!(!model.row_name_editable(99));
    }

    #[test]
    fn test_drop_moves_source_to_target_index() {
        let (mut session, ids) = session_with_plugins();
        let mut view = GraphMixerView::new(&session);
        let graph = session.active_graph().expect("graph");
        let target_index = graph.index_of(ids[0]).expect("synth");
        let before: Vec<NodeId> = graph.nodes().iter().map(|n| n.id).collect();

        let source_row = view.model().row_of(ids[2]).expect("reverb row");
        let target_row = view.model().row_of(ids[0]).expect("synth row");
        assert!(view.drop_strip(&mut session, source_row, target_row, STRIP_DRAG_DESCRIPTION));

        let graph = session.active_graph().expect("graph");
        assert_eq!(graph.index_of(ids[2]), Some(target_index));
        let after: Vec<NodeId> = graph.nodes().iter().map(|n| n.id).collect();
        let others = |order: &[NodeId]| -> Vec<NodeId> {
            order.iter().copied().filter(|id| *id != ids[2]).collect()
        };
        assert_eq!(others(&before), others(&after));
        assert_eq!(row_names(&view)[2], "Reverb");
    }

    #[test]
    fn test_invalid_drops_are_ignored() {
        let (mut session, _) = session_with_plugins();
        let mut view = GraphMixerView::new(&session);
        let revision = session.revision();

        assert!(!view.drop_strip(&mut session, 1, 1, STRIP_DRAG_DESCRIPTION));
        assert!(!view.drop_strip(&mut session, 0, 42, STRIP_DRAG_DESCRIPTION));
        assert!(!view.drop_strip(&mut session, 0, 1, "somethingElse"));
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn test_stale_rows_do_not_touch_other_graph() {
        let (mut session, _) = session_with_plugins();
        let mut view = GraphMixerView::new(&session);
        session.add_graph(Graph::new("Empty"), true);

        assert!(!view.drop_strip(&mut session, 0, 1, STRIP_DRAG_DESCRIPTION));
        view.stabilize(&session);
        assert_eq!(view.placeholder_text(), Some(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_drag_starts_once_after_press() {
        let mut strip = StripDragState::default();
        assert_eq!(strip.mouse_drag(), None);

        strip.mouse_down();
        assert_eq!(strip.mouse_drag(), Some(STRIP_DRAG_DESCRIPTION));
        assert_eq!(strip.mouse_drag(), None);
        assert!(strip.is_dragging());

        strip.mouse_up();
        assert!(!strip.is_dragging());
    }

    #[test]
    fn test_hover_highlight() {
        let mut strip = StripDragState::default();
        strip.drag_enter("files");
        assert!(!strip.should_highlight());

        strip.drag_enter(STRIP_DRAG_DESCRIPTION);
        assert!(strip.should_highlight());
        strip.drag_exit();
        assert!(!strip.should_highlight());

        strip.mouse_down();
        strip.mouse_drag();
        strip.drag_enter(STRIP_DRAG_DESCRIPTION);
        assert!(!strip.should_highlight());
    }

    #[test]
    fn test_mouse_up_clears_highlight() {
        let mut strip = StripDragState::default();
        strip.drag_enter(STRIP_DRAG_DESCRIPTION);
        assert!(strip.should_highlight());

        strip.mouse_up();
        assert!(!strip.should_highlight());
    }

    #[test]
    fn test_pressed_strip_is_not_highlighted() {
        let mut strip = StripDragState::default();
        strip.drag_enter(STRIP_DRAG_DESCRIPTION);
        strip.mouse_down();
        assert!(!strip.should_highlight());
    }

    #[test]
    fn test_any_drop_clears_target_highlight() {
        let (mut session, _) = session_with_plugins();
        let mut view = GraphMixerView::new(&session);

        for (source, target, description) in [
            (1, 1, STRIP_DRAG_DESCRIPTION),
            (0, 1, "somethingElse"),
            (42, 1, STRIP_DRAG_DESCRIPTION),
        ] {
            view.strip_mut(target).expect("strip").drag_enter(STRIP_DRAG_DESCRIPTION);
            assert!(!view.drop_strip(&mut session, source, target, description));
            assert!(!view.strip(target).expect("strip").should_highlight());
        }
    }
}
