//! Entry list for the mounted tracker

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use tracker_core::ListRow;

use crate::ui::theme::Theme;

/// Summary list of a tracker's entries, two lines per row
pub struct EntryListWidget<'a> {
    rows: &'a [(usize, ListRow)],
    cursor: usize,
    theme: &'a Theme,
    title: &'a str,
    focused: bool,
}

impl<'a> EntryListWidget<'a> {
    pub fn new(rows: &'a [(usize, ListRow)], theme: &'a Theme, title: &'a str) -> Self {
        Self {
            rows,
            cursor: 0,
            theme,
            title,
            focused: false,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for EntryListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ({}) ", self.title, self.rows.len()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            let lines = vec![
                Line::from(Span::styled("No entries yet.", self.theme.missing_style())),
                Line::from(Span::styled(
                    "Press 'a' to add one.",
                    self.theme.hint_style(),
                )),
            ];
            Paragraph::new(lines).render(inner, buf);
            return;
        }

        // Two lines per row; keep the cursor row in view
        let visible_rows = (inner.height as usize / 2).max(1);
        let first = self
            .cursor
            .saturating_sub(visible_rows.saturating_sub(1))
            .min(self.rows.len().saturating_sub(visible_rows.min(self.rows.len())));

        let mut lines: Vec<Line> = Vec::new();
        for (position, (_, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(first)
            .take(visible_rows)
        {
            let is_cursor = self.focused && position == self.cursor;
            let title_style = if is_cursor {
                self.theme.cursor_style()
            } else {
                self.theme.value_style()
            };
            let marker = if is_cursor { "> " } else { "  " };

            let mut first_line = vec![Span::styled(format!("{marker}{}", row.title), title_style)];
            if !row.tag.is_empty() {
                first_line.push(Span::raw("  "));
                first_line.push(Span::styled(
                    row.tag.clone(),
                    ratatui::style::Style::default().fg(self.theme.row_tag),
                ));
            }
            lines.push(Line::from(first_line));
            lines.push(Line::from(Span::styled(
                format!("    {}", row.meta),
                ratatui::style::Style::default().fg(self.theme.row_meta),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
