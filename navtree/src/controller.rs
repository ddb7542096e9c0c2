//! Expand/collapse controller.
//!
//! Each node is a two-state machine, `Collapsed` and `Expanded`. Expanding an
//! unmaterialized node first builds its child rows; collapsing only hides
//! them, so re-expanding shows the same rows again without rebuilding.

use std::collections::HashSet;

use crate::catalog::{CatalogStore, EntryRef};
use crate::config::NavTreeConfig;
use crate::glyph::{RowIcon, glyph, row_icons};
use crate::node::{ExpandState, LiveNode, NodeArena, NodeId};
use crate::surface::{HostSurface, RowLabel, Transition};

/// A row currently shown by the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    /// Depth in the tree (top-level rows = 1).
    pub depth: u16,
}

/// A lazily materialized, navigable outline over a [`CatalogStore`].
#[derive(Debug)]
pub struct NavTree {
    pub(crate) store: CatalogStore,
    pub(crate) config: NavTreeConfig,
    pub(crate) nodes: NodeArena,
    /// The one highlighted row, if any.
    pub(crate) selected: Option<NodeId>,
    /// Nodes whose animated expand should recenter on completion.
    pub(crate) recenter_pending: HashSet<NodeId>,
}

impl NavTree {
    /// Create an outline over `store`. Nothing is drawn until
    /// [`initialize`](Self::initialize) is called.
    pub fn new(store: CatalogStore, config: NavTreeConfig) -> Self {
        Self {
            store,
            config,
            nodes: NodeArena::new(),
            selected: None,
            recenter_pending: HashSet::new(),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn config(&self) -> &NavTreeConfig {
        &self.config
    }

    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&LiveNode> {
        self.nodes.get(id)
    }

    /// The catalog entry behind a row. `None` for the root.
    pub fn entry(&self, id: NodeId) -> Option<EntryRef<'_>> {
        self.nodes.entry(&self.store, id)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(LiveNode::is_expanded)
    }

    // -------------------------------------------------------------------------
    // State transitions
    // -------------------------------------------------------------------------

    /// Flip a node between collapsed and expanded, as a click does.
    ///
    /// Uses the configured user transition. Leaves and the root are ignored.
    pub fn toggle<S: HostSurface + ?Sized>(&mut self, surface: &mut S, id: NodeId) {
        if id.is_root() {
            return;
        }
        let Some(node) = self.nodes.get(id) else {
            log::warn!("toggle({id}): no such node");
            return;
        };
        if node.is_expanded() {
            self.collapse(surface, id);
        } else {
            let transition = self.config.user_transition();
            if self.expand(surface, id, transition)
                && matches!(transition, Transition::Animated(_))
                && self.config.recenter_after_expand
            {
                self.recenter_pending.insert(id);
            }
        }
    }

    /// Expand a node if it is collapsed; a no-op otherwise.
    ///
    /// With `immediate` the container is shown synchronously, which is what
    /// reveal needs to open a whole path before the first paint.
    pub fn force_expand<S: HostSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        id: NodeId,
        immediate: bool,
    ) {
        let transition = if immediate {
            Transition::Immediate
        } else {
            self.config.user_transition()
        };
        self.expand(surface, id, transition);
    }

    /// Collapse a node if it is expanded; a no-op otherwise.
    ///
    /// Child rows stay materialized.
    pub fn collapse<S: HostSurface + ?Sized>(&mut self, surface: &mut S, id: NodeId) {
        if id.is_root() {
            return;
        }
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.is_expanded() {
            log::trace!("collapse({id}) skipped: already collapsed");
            return;
        }
        let kind = glyph(node);

        surface.hide_container(id, self.config.user_transition());
        surface.set_row_icon(id, RowIcon::new(kind, false));
        self.nodes.set_state(id, ExpandState::Collapsed);
        log::debug!("Collapsed {id}");
    }

    /// Returns `true` if the node went from collapsed to expanded.
    fn expand<S: HostSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        id: NodeId,
        transition: Transition,
    ) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if !node.is_expandable() || node.is_expanded() {
            log::trace!("expand({id}) skipped");
            return false;
        }
        let kind = glyph(node);

        self.materialize(surface, id);
        surface.show_container(id, transition);
        if !id.is_root() {
            surface.set_row_icon(id, RowIcon::new(kind, true));
        }
        self.nodes.set_state(id, ExpandState::Expanded);
        log::debug!("Expanded {id} ({transition:?})");
        true
    }

    /// Materialize `parent` and create a row for each new child.
    pub(crate) fn materialize<S: HostSurface + ?Sized>(&mut self, surface: &mut S, parent: NodeId) {
        if !self.nodes.materialize(&self.store, parent) {
            return;
        }
        let children = self
            .nodes
            .get(parent)
            .map(|node| node.children().to_vec())
            .unwrap_or_default();

        for child in children {
            surface.create_row(child, &row_icons(&self.nodes, child));
            if let Some(entry) = self.nodes.entry(&self.store, child) {
                surface.set_row_label(child, &RowLabel::for_entry(&entry, &self.config.relpath));
            }
            surface.append_row(parent, child);
        }
    }

    // -------------------------------------------------------------------------
    // Selection and scrolling
    // -------------------------------------------------------------------------

    /// Make `id` the only selected row.
    pub fn select<S: HostSurface + ?Sized>(&mut self, surface: &mut S, id: NodeId) {
        if id.is_root() || self.nodes.get(id).is_none() || self.selected == Some(id) {
            return;
        }
        if let Some(previous) = self.selected.take() {
            surface.set_row_selected(previous, false);
        }
        surface.set_row_selected(id, true);
        self.selected = Some(id);
        log::debug!("Selected {id}");
    }

    /// Scroll the selected row to the vertical center of the content area.
    pub fn recenter<S: HostSurface + ?Sized>(&self, surface: &mut S) {
        let Some(id) = self.selected else {
            return;
        };
        let content = surface.viewport().content_height();
        let offset = -(i32::from(content) / 2);
        log::trace!("Recentering {id} at offset {offset}");
        surface.scroll_to(id, offset);
    }

    /// Completion notification for an animated show of `id`'s container.
    ///
    /// A finished user expand recenters the selection, unless disabled in
    /// the config. Notifications for anything else are ignored.
    pub fn transition_finished<S: HostSurface + ?Sized>(&mut self, surface: &mut S, id: NodeId) {
        if self.recenter_pending.remove(&id) {
            self.recenter(surface);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Rows currently shown, in display order.
    ///
    /// This is the logical view: rows inside a container that is still
    /// sliding in already count as shown.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        if self.nodes.root().is_expanded() {
            self.collect_visible(NodeId::ROOT, &mut rows);
        }
        rows
    }

    fn collect_visible(&self, parent: NodeId, rows: &mut Vec<VisibleRow>) {
        let Some(node) = self.nodes.get(parent) else {
            return;
        };
        for &child in node.children() {
            let Some(child_node) = self.nodes.get(child) else {
                continue;
            };
            rows.push(VisibleRow {
                id: child,
                depth: child_node.depth(),
            });
            if child_node.is_expanded() {
                self.collect_visible(child, rows);
            }
        }
    }

    /// Sibling-index path of a live node.
    pub fn path_of(&self, id: NodeId) -> Vec<usize> {
        self.nodes.path_of(id)
    }

    /// The live node at `path`, if every step is already materialized.
    pub fn node_at_path(&self, path: &[usize]) -> Option<NodeId> {
        path.iter()
            .try_fold(NodeId::ROOT, |current, &index| self.nodes.child_at(current, index))
    }
}
