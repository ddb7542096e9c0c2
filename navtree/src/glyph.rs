//! Row glyphs: the connector and expand icons drawn in front of each label.
//!
//! A row's indentation is one connector per visible ancestor followed by the
//! row's own icon. Connectors only continue a vertical line under ancestors
//! that still have siblings below them, which is what makes the outline read
//! as a tree.

use crate::node::{LiveNode, NodeArena, NodeId};

/// Icon shape for one indentation cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    /// The row's own icon: expandable, last among its siblings.
    RootExpandableLast,
    /// The row's own icon: expandable, more siblings follow.
    RootExpandableMid,
    /// The row's own icon: leaf, last among its siblings.
    RootLeafLast,
    /// The row's own icon: leaf, more siblings follow.
    RootLeafMid,
    /// Ancestor connector under an ancestor with no siblings below.
    NestedBlank,
    /// Ancestor connector under an ancestor with siblings below.
    NestedLine,
}

impl GlyphKind {
    /// Whether this is a row's own expand toggle.
    pub fn is_expandable(self) -> bool {
        matches!(self, Self::RootExpandableLast | Self::RootExpandableMid)
    }

    /// Image asset name, in the expanded or collapsed variant.
    pub fn asset(self, expanded: bool) -> &'static str {
        match (self, expanded) {
            (Self::RootExpandableLast, false) => "ftv2plastnode.png",
            (Self::RootExpandableLast, true) => "ftv2mlastnode.png",
            (Self::RootExpandableMid, false) => "ftv2pnode.png",
            (Self::RootExpandableMid, true) => "ftv2mnode.png",
            (Self::RootLeafLast, _) => "ftv2lastnode.png",
            (Self::RootLeafMid, _) => "ftv2node.png",
            (Self::NestedBlank, _) => "ftv2blank.png",
            (Self::NestedLine, _) => "ftv2vertline.png",
        }
    }

    /// Three-column box-drawing rendition for text hosts.
    pub fn symbol(self, expanded: bool) -> &'static str {
        match (self, expanded) {
            (Self::RootExpandableLast, false) => "└▸ ",
            (Self::RootExpandableLast, true) => "└▾ ",
            (Self::RootExpandableMid, false) => "├▸ ",
            (Self::RootExpandableMid, true) => "├▾ ",
            (Self::RootLeafLast, _) => "└─ ",
            (Self::RootLeafMid, _) => "├─ ",
            (Self::NestedBlank, _) => "   ",
            (Self::NestedLine, _) => "│  ",
        }
    }
}

/// A glyph plus the expand state it should be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowIcon {
    pub kind: GlyphKind,
    pub expanded: bool,
}

impl RowIcon {
    pub fn new(kind: GlyphKind, expanded: bool) -> Self {
        Self { kind, expanded }
    }

    /// Asset path with `relpath` prepended.
    pub fn asset(&self, relpath: &str) -> String {
        format!("{relpath}{}", self.kind.asset(self.expanded))
    }

    pub fn symbol(&self) -> &'static str {
        self.kind.symbol(self.expanded)
    }
}

/// The decision table behind every glyph.
///
/// `level` counts upward from the row: 0 is the row's own icon, anything
/// above is the connector contributed by an ancestor.
pub fn glyph_at(level: usize, is_last_sibling: bool, has_children: bool) -> GlyphKind {
    match (level, is_last_sibling, has_children) {
        (0, true, true) => GlyphKind::RootExpandableLast,
        (0, false, true) => GlyphKind::RootExpandableMid,
        (0, true, false) => GlyphKind::RootLeafLast,
        (0, false, false) => GlyphKind::RootLeafMid,
        (_, true, _) => GlyphKind::NestedBlank,
        (_, false, _) => GlyphKind::NestedLine,
    }
}

/// A row's own icon.
pub fn glyph(node: &LiveNode) -> GlyphKind {
    glyph_at(0, node.is_last_sibling(), node.is_expandable())
}

/// The connector an ancestor contributes to a descendant row.
pub fn connector(ancestor: &LiveNode) -> GlyphKind {
    glyph_at(1, ancestor.is_last_sibling(), ancestor.is_expandable())
}

/// Full indentation for a row: ancestor connectors from the outermost
/// inward, then the row's own icon. Empty for the root, which has no row.
pub fn indent(nodes: &NodeArena, id: NodeId) -> Vec<GlyphKind> {
    let Some(node) = nodes.get(id) else {
        return Vec::new();
    };
    if node.is_root() {
        return Vec::new();
    }

    let mut glyphs: Vec<GlyphKind> = nodes
        .ancestors(id)
        .filter_map(|ancestor| nodes.get(ancestor))
        .filter(|ancestor| !ancestor.is_root())
        .map(connector)
        .collect();
    glyphs.reverse();
    glyphs.push(glyph(node));
    glyphs
}

/// [`indent`] with the row's own icon in its current expand state.
pub fn row_icons(nodes: &NodeArena, id: NodeId) -> Vec<RowIcon> {
    let expanded = nodes.get(id).is_some_and(LiveNode::is_expanded);
    let mut icons: Vec<RowIcon> = indent(nodes, id)
        .into_iter()
        .map(|kind| RowIcon::new(kind, false))
        .collect();
    if let Some(own) = icons.last_mut() {
        own.expanded = expanded;
    }
    icons
}
