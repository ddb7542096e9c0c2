//! Drawing the header, the outline rows and the footer into a [`Buffer`].

use navtree::NodeId;
use unicode_width::UnicodeWidthStr;

use crate::buffer::{Buffer, Cell};
use crate::surface::{FOOTER_HEIGHT, HEADER_HEIGHT, TermRow, TermSurface};
use crate::theme::{TextStyle, Theme};

const KEY_HINTS: &str = "↑↓ move  ←→ fold  ⏎ open  c center  q quit";

/// Everything a frame needs.
pub struct View<'a> {
    pub surface: &'a TermSurface,
    pub cursor: Option<NodeId>,
    pub title: &'a str,
    /// Overrides the footer's link display.
    pub status: Option<&'a str>,
    pub theme: &'a Theme,
}

pub fn draw(buf: &mut Buffer, view: &View<'_>) {
    let theme = view.theme;
    buf.clear(theme.background);
    if buf.height() < HEADER_HEIGHT + FOOTER_HEIGHT + 1 {
        return;
    }

    draw_header(buf, view);
    draw_rows(buf, view);
    draw_footer(buf, view);
}

fn draw_header(buf: &mut Buffer, view: &View<'_>) {
    let theme = view.theme;
    buf.fill_line(0, theme.bar_bg);
    let pen = Cell::default()
        .with_fg(theme.text)
        .with_bg(theme.bar_bg)
        .with_style(TextStyle::bold());
    buf.put_str(1, 0, view.title, buf.width(), pen);
}

fn draw_rows(buf: &mut Buffer, view: &View<'_>) {
    let surface = view.surface;
    let content = buf.height() - HEADER_HEIGHT - FOOTER_HEIGHT;
    let lines = surface.lines();

    for (i, &id) in lines.iter().skip(surface.scroll()).take(content as usize).enumerate() {
        let Some(row) = surface.row(id) else {
            continue;
        };
        let y = HEADER_HEIGHT + i as u16;
        draw_row(buf, y, row, view.cursor == Some(id), view.theme);
    }
}

fn draw_row(buf: &mut Buffer, y: u16, row: &TermRow, is_cursor: bool, theme: &Theme) {
    let bg = if is_cursor {
        theme.cursor_bg
    } else {
        theme.background
    };
    buf.fill_line(y, bg);

    let width = buf.width();
    let mut x = 0;
    let Some((own, connectors)) = row.icons.split_last() else {
        return;
    };

    let connector_pen = Cell::default().with_fg(theme.connector).with_bg(bg);
    for icon in connectors {
        x = buf.put_str(x, y, icon.symbol(), width, connector_pen);
    }
    let own_fg = if own.kind.is_expandable() {
        theme.text
    } else {
        theme.connector
    };
    x = buf.put_str(x, y, own.symbol(), width, connector_pen.with_fg(own_fg));

    let label_pen = if row.selected {
        Cell::default()
            .with_fg(theme.selected)
            .with_style(TextStyle::bold())
    } else if row.label.href.is_some() {
        Cell::default().with_fg(theme.link)
    } else {
        Cell::default().with_fg(theme.text)
    };
    buf.put_str(x, y, &row.label.text, width, label_pen.with_bg(bg));
}

fn draw_footer(buf: &mut Buffer, view: &View<'_>) {
    let theme = view.theme;
    let y = buf.height() - FOOTER_HEIGHT;
    let width = buf.width();
    buf.fill_line(y, theme.bar_bg);

    let hints_width = KEY_HINTS.width() as u16;
    let hints_x = width.saturating_sub(hints_width + 1);
    let text_end = if hints_x > 1 {
        let pen = Cell::default()
            .with_fg(theme.muted)
            .with_bg(theme.bar_bg)
            .with_style(TextStyle::dim());
        buf.put_str(hints_x, y, KEY_HINTS, width, pen);
        hints_x.saturating_sub(1)
    } else {
        width
    };

    let link = view
        .cursor
        .and_then(|id| view.surface.row(id))
        .and_then(|row| row.label.href.as_deref());
    let text = view.status.or(link).unwrap_or_default();
    let pen = Cell::default().with_fg(theme.text).with_bg(theme.bar_bg);
    buf.put_str(1, y, text, text_end, pen);
}
