//! Projection reconciliation.
//!
//! # Responsibility
//! - Keep an id→node table per projection mirroring what the renderer shows.
//! - Diff a roster snapshot plus filter against those tables and issue the
//!   minimal renderer calls.
//!
//! # Invariants
//! - After `reconcile`, each table holds exactly the snapshot ids, in the
//!   projection's order, with visibility equal to the filter match.
//! - A record whose value changed, or that was marked updated through
//!   `invalidate`, is removed and recreated, never patched.
//! - Reconciling an unchanged snapshot with an unchanged filter issues no
//!   renderer calls.

use crate::model::student::{StudentId, StudentRecord};
use crate::view::filter::{count_label, StudentFilter};
use crate::view::renderer::{Projection, Renderer};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Renderer calls issued for one projection during one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionChanges {
    pub created: usize,
    pub replaced: usize,
    pub removed: usize,
    pub shown: usize,
    pub hidden: usize,
}

impl ProjectionChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Summary of one reconcile pass over both projections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub cards: ProjectionChanges,
    pub rows: ProjectionChanges,
    pub matched: usize,
    pub total: usize,
}

impl ReconcileReport {
    /// Whether the pass issued no renderer calls at all.
    pub fn is_noop(&self) -> bool {
        self.cards.is_empty() && self.rows.is_empty()
    }
}

#[derive(Debug, Clone)]
struct ProjectionNode {
    rendered: StudentRecord,
    visible: bool,
}

#[derive(Debug, Clone)]
struct ProjectionTable {
    projection: Projection,
    nodes: HashMap<StudentId, ProjectionNode>,
    order: Vec<StudentId>,
    stale: HashSet<StudentId>,
}

impl ProjectionTable {
    fn new(projection: Projection) -> Self {
        Self {
            projection,
            nodes: HashMap::new(),
            order: Vec::new(),
            stale: HashSet::new(),
        }
    }

    fn reconcile<R: Renderer>(
        &mut self,
        desired: &[&StudentRecord],
        filter: &StudentFilter,
        renderer: &mut R,
    ) -> ProjectionChanges {
        let mut changes = ProjectionChanges::default();
        let projection = self.projection;
        let desired_by_id: HashMap<StudentId, &StudentRecord> =
            desired.iter().map(|record| (record.id(), *record)).collect();

        // Drop nodes for vanished records and for records whose value changed.
        let mut replaced = HashSet::new();
        for id in &self.order {
            let stale = match desired_by_id.get(id) {
                None => {
                    changes.removed += 1;
                    true
                }
                Some(record) => {
                    let changed = self.stale.contains(id)
                        || self
                            .nodes
                            .get(id)
                            .is_some_and(|node| node.rendered != **record);
                    if changed {
                        replaced.insert(*id);
                    }
                    changed
                }
            };
            if stale {
                renderer.remove_node(*id, projection);
                self.nodes.remove(id);
            }
        }

        // Surviving nodes must already be in projection order; otherwise the
        // snapshot was reordered and the survivors are rebuilt.
        let survivors: Vec<StudentId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.nodes.contains_key(id))
            .collect();
        let expected: Vec<StudentId> = desired
            .iter()
            .map(|record| record.id())
            .filter(|id| self.nodes.contains_key(id))
            .collect();
        if survivors != expected {
            debug!(
                "event=projection_rebuild module=view projection={} nodes={}",
                projection.as_str(),
                survivors.len()
            );
            for id in survivors {
                renderer.remove_node(id, projection);
                self.nodes.remove(&id);
                replaced.insert(id);
            }
        }

        for (index, record) in desired.iter().enumerate() {
            let id = record.id();
            let matched = filter.matches(record);
            match self.nodes.get_mut(&id) {
                Some(node) => {
                    if node.visible != matched {
                        renderer.set_visible(id, projection, matched);
                        node.visible = matched;
                        if matched {
                            changes.shown += 1;
                        } else {
                            changes.hidden += 1;
                        }
                    }
                }
                None => {
                    match projection {
                        Projection::Card => renderer.create_card_node(record, index),
                        Projection::Table => renderer.create_row_node(record, index),
                    }
                    if !matched {
                        renderer.set_visible(id, projection, false);
                    }
                    self.nodes.insert(
                        id,
                        ProjectionNode {
                            rendered: (*record).clone(),
                            visible: matched,
                        },
                    );
                    if replaced.contains(&id) {
                        changes.replaced += 1;
                    } else {
                        changes.created += 1;
                    }
                }
            }
        }

        self.order = desired.iter().map(|record| record.id()).collect();
        self.stale.clear();
        changes
    }

    fn visible(&self, id: StudentId) -> Option<bool> {
        self.nodes.get(&id).map(|node| node.visible)
    }
}

/// Owner of both projections' node tables and the active filter.
#[derive(Debug, Clone)]
pub struct ViewProjector {
    cards: ProjectionTable,
    rows: ProjectionTable,
    filter: StudentFilter,
    matched: usize,
    total: usize,
}

impl Default for ViewProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewProjector {
    pub fn new() -> Self {
        Self {
            cards: ProjectionTable::new(Projection::Card),
            rows: ProjectionTable::new(Projection::Table),
            filter: StudentFilter::default(),
            matched: 0,
            total: 0,
        }
    }

    /// Brings both projections in line with `snapshot` under `filter`.
    pub fn reconcile<R: Renderer>(
        &mut self,
        snapshot: &[StudentRecord],
        filter: &str,
        renderer: &mut R,
    ) -> ReconcileReport {
        self.filter = StudentFilter::new(filter);

        let card_order: Vec<&StudentRecord> = snapshot.iter().collect();
        let row_order: Vec<&StudentRecord> = snapshot.iter().rev().collect();
        let cards = self.cards.reconcile(&card_order, &self.filter, renderer);
        let rows = self.rows.reconcile(&row_order, &self.filter, renderer);

        self.total = snapshot.len();
        self.matched = snapshot
            .iter()
            .filter(|record| self.filter.matches(record))
            .count();

        let report = ReconcileReport {
            cards,
            rows,
            matched: self.matched,
            total: self.total,
        };
        debug!(
            "event=projection_reconcile module=view matched={} total={} noop={}",
            report.matched,
            report.total,
            report.is_noop()
        );
        report
    }

    /// Marks `id` as updated so the next `reconcile` recreates its nodes even
    /// when the stored values are unchanged.
    pub fn invalidate(&mut self, id: StudentId) {
        if self.cards.nodes.contains_key(&id) {
            self.cards.stale.insert(id);
        }
        if self.rows.nodes.contains_key(&id) {
            self.rows.stale.insert(id);
        }
    }

    /// Active normalized filter.
    pub fn filter(&self) -> &StudentFilter {
        &self.filter
    }

    pub fn matched_count(&self) -> usize {
        self.matched
    }

    pub fn total_count(&self) -> usize {
        self.total
    }

    /// Matched count while a filter is active, total roster size otherwise.
    pub fn display_count(&self) -> usize {
        if self.filter.is_empty() {
            self.total
        } else {
            self.matched
        }
    }

    pub fn count_label(&self) -> String {
        count_label(self.display_count())
    }

    /// Node ids of `projection` in display order, hidden nodes included.
    pub fn node_order(&self, projection: Projection) -> &[StudentId] {
        &self.table(projection).order
    }

    /// Visibility of the node for `id`, or `None` when no node exists.
    pub fn is_visible(&self, id: StudentId, projection: Projection) -> Option<bool> {
        self.table(projection).visible(id)
    }

    fn table(&self, projection: Projection) -> &ProjectionTable {
        match projection {
            Projection::Card => &self.cards,
            Projection::Table => &self.rows,
        }
    }
}
