//! In-memory renderer.
//!
//! Keeps an ordered node list per projection, the way a DOM container would,
//! so the projector can run without a presentation layer (tests, CLI probe).

use crate::model::student::{StudentId, StudentRecord};
use crate::view::preview::Avatar;
use crate::view::renderer::{Projection, Renderer};

/// One rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessNode {
    pub id: StudentId,
    /// Text content of the node.
    pub text: String,
    /// Card avatar; `None` for table rows.
    pub avatar: Option<Avatar>,
    pub visible: bool,
}

/// Renderer that records nodes in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    cards: Vec<HeadlessNode>,
    rows: Vec<HeadlessNode>,
    calls: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self, projection: Projection) -> &[HeadlessNode] {
        match projection {
            Projection::Card => &self.cards,
            Projection::Table => &self.rows,
        }
    }

    pub fn node(&self, id: StudentId, projection: Projection) -> Option<&HeadlessNode> {
        self.nodes(projection).iter().find(|node| node.id == id)
    }

    /// Ids in display order, hidden nodes included.
    pub fn ids(&self, projection: Projection) -> Vec<StudentId> {
        self.nodes(projection).iter().map(|node| node.id).collect()
    }

    pub fn visible_ids(&self, projection: Projection) -> Vec<StudentId> {
        self.nodes(projection)
            .iter()
            .filter(|node| node.visible)
            .map(|node| node.id)
            .collect()
    }

    /// Total renderer calls received.
    pub fn call_count(&self) -> usize {
        self.calls
    }

    /// Simulates a card photo failing to load.
    pub fn fail_photo(&mut self, record: &StudentRecord) {
        if let Some(node) = self.cards.iter_mut().find(|node| node.id == record.id()) {
            if matches!(node.avatar, Some(Avatar::Photo(_))) {
                node.avatar = Some(Avatar::fallback(record));
            }
        }
    }

    fn nodes_mut(&mut self, projection: Projection) -> &mut Vec<HeadlessNode> {
        match projection {
            Projection::Card => &mut self.cards,
            Projection::Table => &mut self.rows,
        }
    }

    fn insert(&mut self, projection: Projection, node: HeadlessNode, index: usize) {
        let nodes = self.nodes_mut(projection);
        nodes.retain(|existing| existing.id != node.id);
        let index = index.min(nodes.len());
        nodes.insert(index, node);
    }
}

impl Renderer for HeadlessRenderer {
    fn create_card_node(&mut self, record: &StudentRecord, index: usize) {
        self.calls += 1;
        let node = HeadlessNode {
            id: record.id(),
            text: format!("{} <{}>", record.display_name(), record.email()),
            avatar: Some(Avatar::for_record(record)),
            visible: true,
        };
        self.insert(Projection::Card, node, index);
    }

    fn create_row_node(&mut self, record: &StudentRecord, index: usize) {
        self.calls += 1;
        let node = HeadlessNode {
            id: record.id(),
            text: format!(
                "{} | {} | Year {} | {}",
                record.display_name(),
                record.programme(),
                record.year(),
                record.interests().join(", ")
            ),
            avatar: None,
            visible: true,
        };
        self.insert(Projection::Table, node, index);
    }

    fn remove_node(&mut self, id: StudentId, projection: Projection) {
        self.calls += 1;
        self.nodes_mut(projection).retain(|node| node.id != id);
    }

    fn set_visible(&mut self, id: StudentId, projection: Projection, visible: bool) {
        self.calls += 1;
        if let Some(node) = self
            .nodes_mut(projection)
            .iter_mut()
            .find(|node| node.id == id)
        {
            node.visible = visible;
        }
    }
}
