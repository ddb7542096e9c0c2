//! Retained row model behind the terminal outline.
//!
//! The outline controller only talks to [`TermSurface`] through
//! [`HostSurface`]. Rows and child containers are kept here, and the screen
//! is drawn from [`TermSurface::lines`] on every frame.

use std::collections::HashMap;
use std::time::Instant;

use navtree::{HostSurface, NodeId, RowIcon, RowLabel, Transition, Viewport};

use crate::slide::{Easing, Slide, SlideDirection};

/// Header and footer are one line each.
pub const HEADER_HEIGHT: u16 = 1;
pub const FOOTER_HEIGHT: u16 = 1;

/// A drawn row.
#[derive(Debug, Clone)]
pub struct TermRow {
    /// Indentation, outermost first. The last icon is the row's own.
    pub icons: Vec<RowIcon>,
    pub label: RowLabel,
    pub selected: bool,
}

#[derive(Debug, Default)]
struct Container {
    rows: Vec<NodeId>,
    shown: bool,
    slide: Option<Slide>,
}

impl Container {
    /// A hidden container still takes space while it slides up.
    fn takes_space(&self) -> bool {
        self.shown || self.slide.is_some()
    }
}

#[derive(Debug)]
pub struct TermSurface {
    rows: HashMap<NodeId, TermRow>,
    containers: HashMap<NodeId, Container>,
    width: u16,
    height: u16,
    /// First line of the outline shown at the top of the content area.
    scroll: usize,
    easing: Easing,
    now: Instant,
}

impl TermSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            rows: HashMap::new(),
            containers: HashMap::new(),
            width,
            height,
            scroll: 0,
            easing: Easing::default(),
            now: Instant::now(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp_scroll();
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn row(&self, id: NodeId) -> Option<&TermRow> {
        self.rows.get(&id)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Rows of the outline in display order, as they are on screen now.
    ///
    /// Containers that are mid-slide contribute only their visible part.
    pub fn lines(&self) -> Vec<NodeId> {
        let mut lines = Vec::new();
        self.collect(NodeId::ROOT, &mut lines);
        lines
    }

    fn collect(&self, container: NodeId, out: &mut Vec<NodeId>) {
        let Some(c) = self.containers.get(&container) else {
            return;
        };
        if !c.takes_space() {
            return;
        }
        let mut subtree = Vec::new();
        for &row in &c.rows {
            subtree.push(row);
            self.collect(row, &mut subtree);
        }
        if let Some(slide) = c.slide {
            subtree.truncate(slide.visible_rows(subtree.len(), self.now));
        }
        out.extend(subtree);
    }

    pub fn is_animating(&self) -> bool {
        self.containers.values().any(|c| c.slide.is_some())
    }

    /// Advance the clock and retire finished slides.
    ///
    /// Returns the containers whose slide-down completed, for
    /// [`NavTree::transition_finished`](navtree::NavTree::transition_finished).
    pub fn tick(&mut self, now: Instant) -> Vec<NodeId> {
        self.now = now;
        let mut finished = Vec::new();
        let mut retired = false;
        for (&id, container) in &mut self.containers {
            if let Some(slide) = container.slide
                && slide.is_finished(now)
            {
                container.slide = None;
                retired = true;
                if slide.direction == SlideDirection::Down {
                    finished.push(id);
                }
            }
        }
        if retired {
            log::trace!("Slides retired, shows finished: {finished:?}");
            self.clamp_scroll();
        }
        finished
    }

    /// Scroll just enough to bring line `index` into the content area.
    pub fn scroll_into_view(&mut self, index: usize) {
        let content = self.viewport().content_height().max(1) as usize;
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + content {
            self.scroll = index + 1 - content;
        }
    }

    fn max_scroll(&self) -> usize {
        let content = self.viewport().content_height() as usize;
        self.lines().len().saturating_sub(content)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn set_slide(&mut self, container: NodeId, shown: bool, transition: Transition) {
        let now = self.now;
        let easing = self.easing;
        let c = self.containers.entry(container).or_default();
        c.shown = shown;
        c.slide = match transition {
            Transition::Immediate => None,
            Transition::Animated(duration) => {
                let direction = if shown {
                    SlideDirection::Down
                } else {
                    SlideDirection::Up
                };
                Some(Slide::new(direction, now, duration).with_easing(easing))
            }
        };
    }
}

impl HostSurface for TermSurface {
    fn create_row(&mut self, row: NodeId, icons: &[RowIcon]) {
        self.rows.insert(
            row,
            TermRow {
                icons: icons.to_vec(),
                label: RowLabel {
                    text: String::new(),
                    href: None,
                    toggles: false,
                },
                selected: false,
            },
        );
    }

    fn append_row(&mut self, container: NodeId, row: NodeId) {
        self.containers.entry(container).or_default().rows.push(row);
    }

    fn set_row_icon(&mut self, row: NodeId, icon: RowIcon) {
        if let Some(r) = self.rows.get_mut(&row)
            && let Some(own) = r.icons.last_mut()
        {
            *own = icon;
        }
    }

    fn set_row_label(&mut self, row: NodeId, label: &RowLabel) {
        if let Some(r) = self.rows.get_mut(&row) {
            r.label = label.clone();
        }
    }

    fn set_row_selected(&mut self, row: NodeId, selected: bool) {
        if let Some(r) = self.rows.get_mut(&row) {
            r.selected = selected;
        }
    }

    fn show_container(&mut self, container: NodeId, transition: Transition) {
        self.set_slide(container, true, transition);
    }

    fn hide_container(&mut self, container: NodeId, transition: Transition) {
        self.set_slide(container, false, transition);
        self.clamp_scroll();
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.height, HEADER_HEIGHT, FOOTER_HEIGHT)
    }

    fn scroll_to(&mut self, row: NodeId, offset: i32) {
        let Some(index) = self.lines().iter().position(|&id| id == row) else {
            log::debug!("scroll_to({row}): row not on screen");
            return;
        };
        let target = (index as i64 + i64::from(offset)).max(0) as usize;
        self.scroll = target.min(self.max_scroll());
        log::trace!("Scrolled to line {} for {row}", self.scroll);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use navtree::{CatalogEntry, CatalogStore, NavTree, NavTreeConfig};

    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::new(vec![
            CatalogEntry::branch(
                "A",
                Some("a.html"),
                (0..4)
                    .map(|i| CatalogEntry::leaf(format!("A{i}"), format!("a{i}.html")))
                    .collect(),
            ),
            CatalogEntry::leaf("B", "b.html"),
            CatalogEntry::branch(
                "C",
                None,
                (0..30)
                    .map(|i| CatalogEntry::leaf(format!("C{i}"), format!("c{i}.html")))
                    .collect(),
            ),
        ])
    }

    fn labels(surface: &TermSurface) -> Vec<String> {
        surface
            .lines()
            .into_iter()
            .filter_map(|id| surface.row(id).map(|r| r.label.text.clone()))
            .collect()
    }

    /// Surface with the top level drawn and nothing selected.
    fn setup(height: u16) -> (NavTree, TermSurface) {
        let config = NavTreeConfig::default()
            .with_default_target(None)
            .with_animation(Duration::from_millis(100));
        let mut tree = NavTree::new(store(), config);
        let mut surface = TermSurface::new(40, height).with_easing(Easing::Linear);
        tree.initialize(&mut surface, "missing.html");
        (tree, surface)
    }

    #[test]
    fn test_initial_lines() {
        let (_, surface) = setup(20);
        assert_eq!(labels(&surface), vec!["A", "B", "C"]);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_row_icons_and_labels() {
        let (tree, surface) = setup(20);
        let c = tree.node_at_path(&[2]).unwrap();
        let row = surface.row(c).unwrap();
        assert_eq!(row.icons.len(), 1);
        assert_eq!(row.icons[0].symbol(), "└▸ ");
        assert!(row.label.toggles);
        assert_eq!(row.label.href, None);
    }

    #[test]
    fn test_slide_down_reveals_progressively() {
        let (mut tree, mut surface) = setup(20);
        let a = tree.node_at_path(&[0]).unwrap();
        let start = surface.now;

        tree.toggle(&mut surface, a);
        assert!(surface.is_animating());
        assert_eq!(labels(&surface), vec!["A", "B", "C"]);
        assert_eq!(surface.row(a).unwrap().icons[0].symbol(), "├▾ ");

        assert!(surface.tick(start + Duration::from_millis(50)).is_empty());
        assert_eq!(labels(&surface), vec!["A", "A0", "A1", "B", "C"]);

        let finished = surface.tick(start + Duration::from_millis(100));
        assert_eq!(finished, vec![a]);
        assert_eq!(labels(&surface), vec!["A", "A0", "A1", "A2", "A3", "B", "C"]);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_slide_up_keeps_rows_until_done() {
        let (mut tree, mut surface) = setup(20);
        let a = tree.node_at_path(&[0]).unwrap();
        tree.force_expand(&mut surface, a, true);
        let start = surface.now;

        tree.toggle(&mut surface, a);
        assert_eq!(labels(&surface).len(), 7);

        surface.tick(start + Duration::from_millis(50));
        assert_eq!(labels(&surface), vec!["A", "A0", "A1", "B", "C"]);

        let finished = surface.tick(start + Duration::from_millis(100));
        assert!(finished.is_empty());
        assert_eq!(labels(&surface), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_finished_slide_recenters_selection() {
        let (mut tree, mut surface) = setup(12);
        let c = tree.node_at_path(&[2]).unwrap();
        tree.force_expand(&mut surface, c, true);
        let c20 = tree.node_at_path(&[2, 20]).unwrap();
        tree.select(&mut surface, c20);

        let a = tree.node_at_path(&[0]).unwrap();
        let start = surface.now;
        tree.toggle(&mut surface, a);
        for id in surface.tick(start + Duration::from_millis(100)) {
            tree.transition_finished(&mut surface, id);
        }

        // A + 4 children + B + C + 20 rows above C20; content height is 10.
        let index = surface.lines().iter().position(|&id| id == c20).unwrap();
        assert_eq!(index, 27);
        assert_eq!(surface.scroll(), 22);
    }

    #[test]
    fn test_scroll_to_clamps() {
        let (mut tree, mut surface) = setup(12);
        let a = tree.node_at_path(&[0]).unwrap();
        surface.scroll_to(a, -5);
        assert_eq!(surface.scroll(), 0);

        let c = tree.node_at_path(&[2]).unwrap();
        tree.force_expand(&mut surface, c, true);
        let last = tree.node_at_path(&[2, 29]).unwrap();
        surface.scroll_to(last, 0);
        // 33 lines, 10 visible.
        assert_eq!(surface.scroll(), 23);
    }

    #[test]
    fn test_collapse_clamps_scroll() {
        let (mut tree, mut surface) = setup(12);
        let c = tree.node_at_path(&[2]).unwrap();
        tree.force_expand(&mut surface, c, true);
        surface.scroll_into_view(32);
        assert_eq!(surface.scroll(), 23);

        tree.collapse(&mut surface, c);
        let start = surface.now;
        surface.tick(start + Duration::from_millis(100));
        assert_eq!(surface.scroll(), 0);
    }

    #[test]
    fn test_scroll_into_view() {
        let (mut tree, mut surface) = setup(12);
        let c = tree.node_at_path(&[2]).unwrap();
        tree.force_expand(&mut surface, c, true);

        surface.scroll_into_view(15);
        assert_eq!(surface.scroll(), 6);
        surface.scroll_into_view(9);
        assert_eq!(surface.scroll(), 6);
        surface.scroll_into_view(2);
        assert_eq!(surface.scroll(), 2);
    }

    #[test]
    fn test_viewport() {
        let surface = TermSurface::new(80, 24);
        assert_eq!(surface.viewport().content_height(), 22);
    }
}
