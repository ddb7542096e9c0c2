//! The host surface the outline view draws into.
//!
//! The view never builds widgets itself. It issues row and container
//! operations against a [`HostSurface`], which can be a DOM, a terminal, or
//! a recorder in tests. Rows and containers are identified by [`NodeId`]:
//! every non-root node has one row, and every node owns at most one child
//! container holding its children's rows. The root's container is the
//! outline itself.

use std::time::Duration;

use crate::catalog::EntryRef;
use crate::glyph::RowIcon;
use crate::node::NodeId;

/// How a container is shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Apply at once, before the next paint.
    Immediate,
    /// Time-boxed slide. The host reports completion of a show through
    /// [`NavTree::transition_finished`](crate::NavTree::transition_finished).
    Animated(Duration),
}

/// Text and link of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabel {
    pub text: String,
    /// Navigation target, already prefixed with the configured relpath.
    pub href: Option<String>,
    /// Activating the label toggles the row instead of navigating.
    pub toggles: bool,
}

impl RowLabel {
    /// Label for a catalog entry.
    ///
    /// Grouping entries (no link) with children get a label that toggles.
    pub fn for_entry(entry: &EntryRef<'_>, relpath: &str) -> Self {
        let href = entry.link().map(|link| format!("{relpath}{link}"));
        let toggles = href.is_none() && entry.is_expandable();
        Self {
            text: entry.label().to_string(),
            href,
            toggles,
        }
    }
}

/// Vertical space available to the outline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Total height of the host window.
    pub height: u16,
    /// Height taken by the host's header above the outline.
    pub header: u16,
    /// Height taken by the host's footer below the outline.
    pub footer: u16,
}

impl Viewport {
    pub fn new(height: u16, header: u16, footer: u16) -> Self {
        Self {
            height,
            header,
            footer,
        }
    }

    /// Height left for rows once header and footer are subtracted.
    pub fn content_height(&self) -> u16 {
        self.height
            .saturating_sub(self.header)
            .saturating_sub(self.footer)
    }
}

/// Operations the outline view needs from its host.
///
/// Child containers start hidden. The root container is shown once during
/// initialization and never hidden.
pub trait HostSurface {
    /// Create the row for `row` with its full indentation, outermost first.
    fn create_row(&mut self, row: NodeId, icons: &[RowIcon]);

    /// Append `row` to the child container owned by `container`.
    fn append_row(&mut self, container: NodeId, row: NodeId);

    /// Replace the row's own (innermost) icon.
    fn set_row_icon(&mut self, row: NodeId, icon: RowIcon);

    fn set_row_label(&mut self, row: NodeId, label: &RowLabel);

    /// Add or remove the selection highlight.
    fn set_row_selected(&mut self, row: NodeId, selected: bool);

    fn show_container(&mut self, container: NodeId, transition: Transition);

    fn hide_container(&mut self, container: NodeId, transition: Transition);

    fn viewport(&self) -> Viewport;

    /// Scroll the content area to start `offset` rows after the top of
    /// `row`. A negative offset leaves `row` that many rows below the top
    /// edge.
    fn scroll_to(&mut self, row: NodeId, offset: i32);
}
