//! Event loop and key handling for the terminal outline.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use navtree::{HostSurface, NavTree, NodeId};

use crate::error::AppError;
use crate::surface::TermSurface;
use crate::terminal::Terminal;
use crate::theme::Theme;
use crate::view::{self, View};

/// Redraw interval while a slide is running.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    tree: NavTree,
    surface: TermSurface,
    /// Highlighted row. Distinct from the tree's selection, which marks the
    /// revealed or last opened entry.
    cursor: Option<NodeId>,
    title: String,
    /// Links are resolved against this directory.
    base_dir: PathBuf,
    status: Option<String>,
    theme: Theme,
}

impl App {
    pub fn new(tree: NavTree, surface: TermSurface, title: String, base_dir: PathBuf) -> Self {
        Self {
            tree,
            surface,
            cursor: None,
            title,
            base_dir,
            status: None,
            theme: Theme::default(),
        }
    }

    /// Draw the top level and reveal `target`. The cursor starts on the
    /// revealed row, or on the first row if nothing matched.
    pub fn start(&mut self, target: &str) {
        let selected = self.tree.initialize(&mut self.surface, target);
        self.cursor = selected.or_else(|| self.tree.visible_rows().first().map(|row| row.id));
        if selected.is_none() {
            self.status = Some(format!("{target} not found"));
        }
    }

    pub fn run(mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let mut loaded = false;
        loop {
            let (width, height) = terminal.refresh_size()?;
            self.surface.resize(width, height);
            for id in self.surface.tick(Instant::now()) {
                self.tree.transition_finished(&mut self.surface, id);
            }

            terminal.draw(|buf| {
                view::draw(
                    buf,
                    &View {
                        surface: &self.surface,
                        cursor: self.cursor,
                        title: &self.title,
                        status: self.status.as_deref(),
                        theme: &self.theme,
                    },
                );
            })?;

            // The first frame has been laid out.
            if !loaded {
                loaded = true;
                self.tree.surface_loaded(&mut self.surface);
                continue;
            }

            let timeout = self.surface.is_animating().then_some(FRAME_INTERVAL);
            for event in terminal.poll(timeout)? {
                if let Event::Key(key) = event
                    && key.kind == KeyEventKind::Press
                    && self.handle_key(key) == Flow::Quit
                {
                    log::debug!("Quit requested");
                    return Ok(());
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        self.status = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-self.page()),
            KeyCode::PageDown => self.move_cursor(self.page()),
            KeyCode::Home | KeyCode::Char('g') => self.move_cursor(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => self.move_cursor(isize::MAX),
            KeyCode::Right | KeyCode::Char('l') => self.expand_or_descend(),
            KeyCode::Left | KeyCode::Char('h') => self.collapse_or_ascend(),
            KeyCode::Char(' ') => self.toggle_cursor(),
            KeyCode::Enter => self.activate(),
            KeyCode::Char('c') => self.tree.recenter(&mut self.surface),
            _ => {}
        }
        Flow::Continue
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    fn page(&self) -> isize {
        self.surface.viewport().content_height().max(1) as isize
    }

    fn move_cursor(&mut self, delta: isize) {
        let rows = self.tree.visible_rows();
        if rows.is_empty() {
            return;
        }
        let current = self
            .cursor
            .and_then(|id| rows.iter().position(|row| row.id == id))
            .unwrap_or(0);
        let last = rows.len() - 1;
        let next = current.saturating_add_signed(delta).min(last);
        self.cursor = Some(rows[next].id);
        self.follow_cursor();
    }

    /// Keep the cursor on a shown row after a collapse hid it.
    fn sync_cursor(&mut self) {
        let Some(mut id) = self.cursor else {
            return;
        };
        let rows = self.tree.visible_rows();
        while !rows.iter().any(|row| row.id == id) {
            match self.tree.node(id).and_then(|node| node.parent()) {
                Some(parent) if !parent.is_root() => id = parent,
                _ => {
                    self.cursor = rows.first().map(|row| row.id);
                    return;
                }
            }
        }
        self.cursor = Some(id);
    }

    fn follow_cursor(&mut self) {
        let Some(id) = self.cursor else {
            return;
        };
        if let Some(index) = self.surface.lines().iter().position(|&line| line == id) {
            self.surface.scroll_into_view(index);
        }
    }

    // =========================================================================
    // Expand, collapse and open
    // =========================================================================

    fn toggle_cursor(&mut self) {
        if let Some(id) = self.cursor {
            self.tree.toggle(&mut self.surface, id);
            self.sync_cursor();
        }
    }

    fn expand_or_descend(&mut self) {
        let Some(id) = self.cursor else {
            return;
        };
        let Some(node) = self.tree.node(id) else {
            return;
        };
        if !node.is_expandable() {
            return;
        }
        if node.is_expanded() {
            if let Some(&first) = node.children().first() {
                self.cursor = Some(first);
                self.follow_cursor();
            }
        } else {
            self.tree.toggle(&mut self.surface, id);
        }
    }

    fn collapse_or_ascend(&mut self) {
        let Some(id) = self.cursor else {
            return;
        };
        let Some(node) = self.tree.node(id) else {
            return;
        };
        if node.is_expanded() {
            self.tree.collapse(&mut self.surface, id);
        } else if let Some(parent) = node.parent()
            && !parent.is_root()
        {
            self.cursor = Some(parent);
            self.follow_cursor();
        }
    }

    /// Enter: grouping rows toggle, linked rows become the selection and
    /// open in the system viewer.
    fn activate(&mut self) {
        let Some(id) = self.cursor else {
            return;
        };
        let Some(label) = self.surface.row(id).map(|row| row.label.clone()) else {
            return;
        };
        let Some(href) = label.href else {
            if label.toggles {
                self.toggle_cursor();
            }
            return;
        };

        self.tree.select(&mut self.surface, id);
        // Fragments address a spot inside the page, not a file.
        let file = href.split('#').next().unwrap_or_default();
        let path = self.base_dir.join(file);
        log::debug!("Opening {}", path.display());
        self.status = Some(match open::that(&path) {
            Ok(()) => format!("Opened {href}"),
            Err(e) => {
                log::warn!("Failed to open {}: {e}", path.display());
                format!("Failed to open {href}: {e}")
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use navtree::{CatalogEntry, CatalogStore, NavTreeConfig};

    use super::*;

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn cursor_path(app: &App) -> Vec<usize> {
        app.tree.path_of(app.cursor.unwrap())
    }

    /// Group(none)[Add, And[Deep]], Files, with immediate toggles.
    fn app(target: &str) -> App {
        let store = CatalogStore::new(vec![
            CatalogEntry::branch(
                "Group",
                None,
                vec![
                    CatalogEntry::leaf("Add", "add.html"),
                    CatalogEntry::branch(
                        "And",
                        Some("and.html"),
                        vec![CatalogEntry::leaf("Deep", "deep.html#a1")],
                    ),
                ],
            ),
            CatalogEntry::leaf("Files", "files.html"),
        ]);
        let config = NavTreeConfig::default()
            .with_default_target(None)
            .with_animation(Duration::ZERO);
        let tree = NavTree::new(store, config);
        let mut app = App::new(tree, TermSurface::new(80, 10), "test".into(), PathBuf::new());
        app.start(target);
        app
    }

    #[test]
    fn test_start_puts_cursor_on_revealed_row() {
        let app = app("deep.html#a1");
        assert_eq!(cursor_path(&app), vec![0, 1, 0]);
        assert_eq!(app.tree.selected(), app.cursor);
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_start_without_match() {
        let app = app("nowhere.html");
        assert_eq!(cursor_path(&app), vec![0]);
        assert_eq!(app.tree.selected(), None);
        assert_eq!(app.status.as_deref(), Some("nowhere.html not found"));
    }

    #[test]
    fn test_cursor_moves_over_visible_rows() {
        let mut app = app("nowhere.html");
        press(&mut app, KeyCode::Down);
        assert_eq!(cursor_path(&app), vec![1]);
        press(&mut app, KeyCode::Down);
        assert_eq!(cursor_path(&app), vec![1]);
        press(&mut app, KeyCode::Home);
        assert_eq!(cursor_path(&app), vec![0]);
        press(&mut app, KeyCode::End);
        assert_eq!(cursor_path(&app), vec![1]);
        press(&mut app, KeyCode::Up);
        assert_eq!(cursor_path(&app), vec![0]);
    }

    #[test]
    fn test_right_expands_then_descends() {
        let mut app = app("nowhere.html");
        press(&mut app, KeyCode::Right);
        assert!(app.tree.is_expanded(app.cursor.unwrap()));
        assert_eq!(cursor_path(&app), vec![0]);

        press(&mut app, KeyCode::Right);
        assert_eq!(cursor_path(&app), vec![0, 0]);

        // Leaves ignore Right.
        press(&mut app, KeyCode::Right);
        assert_eq!(cursor_path(&app), vec![0, 0]);
    }

    #[test]
    fn test_left_collapses_then_ascends() {
        let mut app = app("and.html");
        assert_eq!(cursor_path(&app), vec![0, 1]);
        assert!(app.tree.is_expanded(app.cursor.unwrap()));

        press(&mut app, KeyCode::Left);
        assert!(!app.tree.is_expanded(app.cursor.unwrap()));
        assert_eq!(cursor_path(&app), vec![0, 1]);

        press(&mut app, KeyCode::Left);
        assert_eq!(cursor_path(&app), vec![0]);

        press(&mut app, KeyCode::Left);
        assert!(!app.tree.is_expanded(app.cursor.unwrap()));
        press(&mut app, KeyCode::Left);
        assert_eq!(cursor_path(&app), vec![0]);
    }

    #[test]
    fn test_collapsing_ancestor_moves_cursor_up() {
        let mut app = app("deep.html#a1");
        let group = app.tree.node_at_path(&[0]).unwrap();
        app.tree.collapse(&mut app.surface, group);
        app.sync_cursor();
        assert_eq!(app.cursor, Some(group));
    }

    #[test]
    fn test_space_toggles_and_keeps_cursor_visible() {
        let mut app = app("nowhere.html");
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        assert_eq!(cursor_path(&app), vec![0, 0]);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.tree.visible_rows().len(), 2);
        assert_eq!(cursor_path(&app), vec![0]);
    }

    #[test]
    fn test_enter_on_grouping_row_toggles() {
        let mut app = app("nowhere.html");
        press(&mut app, KeyCode::Enter);
        assert!(app.tree.is_expanded(app.cursor.unwrap()));
        assert_eq!(app.tree.selected(), None);
        press(&mut app, KeyCode::Enter);
        assert!(!app.tree.is_expanded(app.cursor.unwrap()));
    }

    #[test]
    fn test_page_keys_clamp() {
        let mut app = app("deep.html#a1");
        press(&mut app, KeyCode::PageUp);
        assert_eq!(cursor_path(&app), vec![0]);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(cursor_path(&app), vec![1]);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app("nowhere.html");
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
        assert_eq!(press(&mut app, KeyCode::Esc), Flow::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
        assert_eq!(press(&mut app, KeyCode::Char('c')), Flow::Continue);
    }
}
