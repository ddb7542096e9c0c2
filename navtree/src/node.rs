//! Live nodes and the node materializer.
//!
//! A [`LiveNode`] is the stateful counterpart of one catalog entry. Nodes are
//! created the first time their parent is expanded and are never dropped for
//! the lifetime of the [`NodeArena`]. The arena owns every node; parents refer
//! to children and children back to parents by [`NodeId`].

use crate::catalog::{CatalogStore, Entries, EntryId, EntryRef};

/// Identifier of a live node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The invisible root that owns the top-level rows.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Visual state of a node's child container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpandState {
    #[default]
    Collapsed,
    Expanded,
}

/// Runtime state for one visited catalog entry.
#[derive(Debug, Clone)]
pub struct LiveNode {
    /// Entry this node was built from. `None` only for the root.
    entry: Option<EntryId>,
    /// Parent node. `None` only for the root.
    parent: Option<NodeId>,
    /// Depth in the tree (root = 0, top-level rows = 1).
    depth: u16,
    /// Position among siblings.
    sibling_index: usize,
    is_last_sibling: bool,
    /// Whether the entry has a (possibly empty) children list.
    expandable: bool,
    state: ExpandState,
    materialized: bool,
    children: Vec<NodeId>,
}

impl LiveNode {
    pub fn entry(&self) -> Option<EntryId> {
        self.entry
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> u16 {
        self.depth
    }

    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    pub fn is_last_sibling(&self) -> bool {
        self.is_last_sibling
    }

    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    pub fn state(&self) -> ExpandState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == ExpandState::Expanded
    }

    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Child nodes in display order. Empty until materialized.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owner of every live node.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<LiveNode>,
}

impl NodeArena {
    /// Create an arena holding only the root node.
    ///
    /// The root starts collapsed and unmaterialized like any other node.
    pub fn new() -> Self {
        Self {
            nodes: vec![LiveNode {
                entry: None,
                parent: None,
                depth: 0,
                sibling_index: 0,
                is_last_sibling: true,
                expandable: true,
                state: ExpandState::Collapsed,
                materialized: false,
                children: Vec::new(),
            }],
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&LiveNode> {
        self.nodes.get(id.0)
    }

    pub fn root(&self) -> &LiveNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn set_state(&mut self, id: NodeId, state: ExpandState) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.state = state;
        }
    }

    /// The catalog entry a node was built from.
    pub fn entry<'s>(&self, store: &'s CatalogStore, id: NodeId) -> Option<EntryRef<'s>> {
        self.get(id)?.entry.and_then(|entry| store.entry(entry))
    }

    /// The catalog children a node materializes from.
    fn child_entries<'s>(&self, store: &'s CatalogStore, id: NodeId) -> Option<Entries<'s>> {
        if id.is_root() {
            return Some(store.roots());
        }
        self.entry(store, id)?.children()
    }

    /// Build the child nodes of `parent` from its catalog children.
    ///
    /// Returns `true` if children were built by this call. Calling it again
    /// on a materialized node, or on a leaf, changes nothing and returns
    /// `false`.
    pub fn materialize(&mut self, store: &CatalogStore, parent: NodeId) -> bool {
        let Some(node) = self.get(parent) else {
            return false;
        };
        if node.materialized || !node.expandable {
            log::trace!("materialize({parent}) skipped");
            return false;
        }
        let Some(entries) = self.child_entries(store, parent) else {
            return false;
        };

        let depth = node.depth + 1;
        let last = entries.len().saturating_sub(1);
        let mut children = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let id = NodeId(self.nodes.len());
            self.nodes.push(LiveNode {
                entry: Some(entry.id()),
                parent: Some(parent),
                depth,
                sibling_index: index,
                is_last_sibling: index == last,
                expandable: entry.is_expandable(),
                state: ExpandState::Collapsed,
                materialized: false,
                children: Vec::new(),
            });
            children.push(id);
        }

        log::debug!("Materialized {parent} with {} children", children.len());
        let node = &mut self.nodes[parent.0];
        node.children = children;
        node.materialized = true;
        true
    }

    /// The child at sibling position `index`, if materialized.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.get(parent)?.children.get(index).copied()
    }

    /// Ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.get(id).and_then(LiveNode::parent),
        }
    }

    /// Sibling indices from the root down to `id`. Empty for the root.
    pub fn path_of(&self, id: NodeId) -> Vec<usize> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        let mut path: Vec<usize> = self
            .ancestors(id)
            .filter_map(|ancestor| self.get(ancestor))
            .filter(|ancestor| !ancestor.is_root())
            .map(LiveNode::sibling_index)
            .collect();
        path.reverse();
        if !node.is_root() {
            path.push(node.sibling_index);
        }
        path
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's ancestors.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.get(current).and_then(LiveNode::parent);
        Some(current)
    }
}
