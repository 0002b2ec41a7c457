//! Renderer collaborator contract.

use crate::model::student::{StudentId, StudentRecord};

/// Visual projection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Projection {
    /// Profile card grid, in roster order.
    Card,
    /// Summary table, newest record first.
    Table,
}

impl Projection {
    pub const ALL: [Projection; 2] = [Projection::Card, Projection::Table];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Table => "table",
        }
    }
}

/// Presentation layer that owns the actual visual nodes.
///
/// Nodes are addressed by record id plus projection. Every call must be
/// idempotent: creating an existing node replaces it, removing or toggling a
/// missing node is a no-op. Newly created nodes start visible.
pub trait Renderer {
    /// Creates a card node at position `index` of the card grid.
    fn create_card_node(&mut self, record: &StudentRecord, index: usize);
    /// Creates a table row at position `index` of the table body.
    fn create_row_node(&mut self, record: &StudentRecord, index: usize);
    fn remove_node(&mut self, id: StudentId, projection: Projection);
    fn set_visible(&mut self, id: StudentId, projection: Projection, visible: bool);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn create_card_node(&mut self, record: &StudentRecord, index: usize) {
        (**self).create_card_node(record, index);
    }

    fn create_row_node(&mut self, record: &StudentRecord, index: usize) {
        (**self).create_row_node(record, index);
    }

    fn remove_node(&mut self, id: StudentId, projection: Projection) {
        (**self).remove_node(id, projection);
    }

    fn set_visible(&mut self, id: StudentId, projection: Projection, visible: bool) {
        (**self).set_visible(id, projection, visible);
    }
}
