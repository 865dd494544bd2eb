//! Tracker navigation sidebar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use tracker_core::trackers::TrackerKind;

use crate::ui::theme::Theme;

/// Sidebar listing every tracker; Enter mounts the one under the cursor
pub struct NavWidget<'a> {
    theme: &'a Theme,
    cursor: usize,
    selected: TrackerKind,
    focused: bool,
}

impl<'a> NavWidget<'a> {
    pub fn new(theme: &'a Theme, cursor: usize, selected: TrackerKind) -> Self {
        Self {
            theme,
            cursor,
            selected,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for NavWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Trackers ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = TrackerKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let marker = if *kind == self.selected { "* " } else { "  " };
                let style = if self.focused && i == self.cursor {
                    self.theme.cursor_style()
                } else if *kind == self.selected {
                    self.theme.label_style()
                } else {
                    self.theme.value_style()
                };
                Line::from(Span::styled(format!("{marker}{}", kind.title()), style))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
