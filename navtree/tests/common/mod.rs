//! Recording host surface shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use navtree::{CatalogEntry, CatalogStore, HostSurface, NodeId, RowIcon, RowLabel, Transition, Viewport};

/// One surface operation, in the order it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateRow(NodeId, Vec<RowIcon>),
    AppendRow { container: NodeId, row: NodeId },
    SetIcon(NodeId, RowIcon),
    SetLabel(NodeId, RowLabel),
    SetSelected(NodeId, bool),
    Show(NodeId, Transition),
    Hide(NodeId, Transition),
    ScrollTo(NodeId, i32),
}

#[derive(Debug, Clone, Default)]
pub struct Row {
    pub icons: Vec<RowIcon>,
    pub label: Option<RowLabel>,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Container {
    pub rows: Vec<NodeId>,
    pub shown: bool,
}

/// A host surface that records every call and keeps a minimal row model.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
    pub rows: HashMap<NodeId, Row>,
    pub containers: HashMap<NodeId, Container>,
    pub viewport: Viewport,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(40, 4, 2),
            ..Default::default()
        }
    }

    /// Rows reachable from the root through shown containers, in order.
    pub fn shown_rows(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_shown(NodeId::ROOT, &mut out);
        out
    }

    fn collect_shown(&self, container: NodeId, out: &mut Vec<NodeId>) {
        let Some(c) = self.containers.get(&container) else {
            return;
        };
        if !c.shown {
            return;
        }
        for &row in &c.rows {
            out.push(row);
            self.collect_shown(row, out);
        }
    }

    pub fn selected_rows(&self) -> Vec<NodeId> {
        let mut rows: Vec<_> = self
            .rows
            .iter()
            .filter(|(_, row)| row.selected)
            .map(|(&id, _)| id)
            .collect();
        rows.sort();
        rows
    }

    /// The row's own (innermost) icon.
    pub fn own_icon(&self, row: NodeId) -> Option<RowIcon> {
        self.rows.get(&row).and_then(|r| r.icons.last().copied())
    }

    pub fn label(&self, row: NodeId) -> Option<&str> {
        self.rows.get(&row)?.label.as_ref().map(|l| l.text.as_str())
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn last_scroll(&self) -> Option<(NodeId, i32)> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::ScrollTo(row, offset) => Some((*row, *offset)),
            _ => None,
        })
    }
}

impl HostSurface for RecordingSurface {
    fn create_row(&mut self, row: NodeId, icons: &[RowIcon]) {
        self.calls.push(Call::CreateRow(row, icons.to_vec()));
        self.rows.insert(
            row,
            Row {
                icons: icons.to_vec(),
                ..Default::default()
            },
        );
    }

    fn append_row(&mut self, container: NodeId, row: NodeId) {
        self.calls.push(Call::AppendRow { container, row });
        self.containers.entry(container).or_default().rows.push(row);
    }

    fn set_row_icon(&mut self, row: NodeId, icon: RowIcon) {
        self.calls.push(Call::SetIcon(row, icon));
        if let Some(own) = self.rows.get_mut(&row).and_then(|r| r.icons.last_mut()) {
            *own = icon;
        }
    }

    fn set_row_label(&mut self, row: NodeId, label: &RowLabel) {
        self.calls.push(Call::SetLabel(row, label.clone()));
        self.rows.entry(row).or_default().label = Some(label.clone());
    }

    fn set_row_selected(&mut self, row: NodeId, selected: bool) {
        self.calls.push(Call::SetSelected(row, selected));
        self.rows.entry(row).or_default().selected = selected;
    }

    fn show_container(&mut self, container: NodeId, transition: Transition) {
        self.calls.push(Call::Show(container, transition));
        self.containers.entry(container).or_default().shown = true;
    }

    fn hide_container(&mut self, container: NodeId, transition: Transition) {
        self.calls.push(Call::Hide(container, transition));
        self.containers.entry(container).or_default().shown = false;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, row: NodeId, offset: i32) {
        self.calls.push(Call::ScrollTo(row, offset));
    }
}

/// `[A(children=[B, C(children=[D])])]`
pub fn abcd() -> CatalogStore {
    CatalogStore::new(vec![CatalogEntry::branch(
        "A",
        Some("a.html"),
        vec![
            CatalogEntry::branch("B", Some("b.html"), vec![CatalogEntry::leaf("B1", "b1.html")]),
            CatalogEntry::branch("C", Some("c.html"), vec![CatalogEntry::leaf("D", "d.html")]),
        ],
    )])
}

/// A wider catalog with an `index.html` landing entry.
pub fn docs() -> CatalogStore {
    CatalogStore::new(vec![CatalogEntry::branch(
        "Project",
        Some("index.html"),
        vec![
            CatalogEntry::branch(
                "Class List",
                Some("annotated.html"),
                vec![
                    CatalogEntry::leaf("Add", "add.html"),
                    CatalogEntry::leaf("And", "and.html"),
                    CatalogEntry::leaf("Base", "base.html"),
                ],
            ),
            CatalogEntry::branch(
                "Namespaces",
                None,
                vec![CatalogEntry::branch(
                    "Madara",
                    None,
                    vec![CatalogEntry::leaf("Utility", "utility.html")],
                )],
            ),
            CatalogEntry::leaf("File Members", "globals.html"),
        ],
    )])
}
