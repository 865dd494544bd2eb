//! Generic edit form: renders the active frame of a `FormState`.
//!
//! One widget serves every tracker; the field list comes from the
//! descriptor's form spec. Group fields expand into row lists whose rows
//! open as sub-frames.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use tracker_core::form::{FieldKind, FieldSpec, FormValues};

use crate::app::{EditBuffer, FormState};
use crate::ui::theme::Theme;

pub struct FormWidget<'a> {
    state: &'a FormState,
    theme: &'a Theme,
}

impl<'a> FormWidget<'a> {
    pub fn new(state: &'a FormState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for FormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let frame = self.state.frame();
        let title = if self.state.frames.len() > 1 {
            format!(" {} / {} ", self.state.frames[0].title, frame.title)
        } else {
            format!(" {} ", frame.title)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        let mut focus_line = 0usize;

        for (i, field) in frame.spec.iter().enumerate() {
            let focused = i == frame.cursor;
            if focused {
                focus_line = lines.len();
            }
            self.field_lines(&mut lines, field, focused, frame);
        }

        let height = inner.height as usize;
        let scroll = focus_line.saturating_sub(height.saturating_sub(4));
        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(inner, buf);
    }
}

impl FormWidget<'_> {
    fn label_style(&self, field: &FieldSpec, focused: bool) -> Style {
        if self.state.invalid_key == Some(field.key) {
            self.theme.error_style()
        } else if focused {
            self.theme.cursor_style()
        } else {
            self.theme.label_style()
        }
    }

    fn label_text(&self, field: &FieldSpec, focused: bool) -> String {
        let marker = if focused { "> " } else { "  " };
        let required = if field.required { "*" } else { "" };
        format!("{marker}{}{required}", field.label)
    }

    fn field_lines(
        &self,
        lines: &mut Vec<Line<'static>>,
        field: &FieldSpec,
        focused: bool,
        frame: &crate::app::FormFrame,
    ) {
        let editing = focused && frame.editing;
        let label = Span::styled(
            self.label_text(field, focused),
            self.label_style(field, focused),
        );

        match field.kind {
            FieldKind::Text | FieldKind::Number | FieldKind::Date => {
                let mut spans = vec![label, Span::raw(": ")];
                if editing {
                    spans.extend(single_line_buffer(&frame.buffer, self.theme));
                } else {
                    spans.push(Span::styled(
                        frame.values.text(field.key).to_string(),
                        self.theme.value_style(),
                    ));
                }
                lines.push(Line::from(spans));
            }
            FieldKind::Select(_) => {
                lines.push(Line::from(vec![
                    label,
                    Span::raw(": "),
                    Span::styled(
                        format!("< {} >", frame.values.text(field.key)),
                        self.theme.value_style(),
                    ),
                ]));
            }
            FieldKind::Flag => {
                let mark = if frame.values.flag(field.key) { "[x]" } else { "[ ]" };
                lines.push(Line::from(vec![
                    label,
                    Span::raw(": "),
                    Span::styled(mark.to_string(), self.theme.value_style()),
                ]));
            }
            FieldKind::Multiline | FieldKind::Lines => {
                if editing {
                    lines.push(Line::from(label));
                    lines.extend(multi_line_buffer(&frame.buffer, self.theme));
                } else if focused {
                    lines.push(Line::from(label));
                    let text = frame.values.text(field.key);
                    if text.is_empty() {
                        lines.push(Line::from(Span::styled(
                            "    (empty)",
                            self.theme.missing_style(),
                        )));
                    } else {
                        for raw in text.lines() {
                            lines.push(Line::from(Span::styled(
                                format!("    {raw}"),
                                self.theme.value_style(),
                            )));
                        }
                    }
                } else {
                    let text = frame.values.text(field.key);
                    let mut preview: String = text.lines().next().unwrap_or("").to_string();
                    if text.lines().count() > 1 {
                        preview.push_str(" ...");
                    }
                    lines.push(Line::from(vec![
                        label,
                        Span::raw(": "),
                        Span::styled(preview, self.theme.value_style()),
                    ]));
                }
            }
            FieldKind::Group(sub_spec) => {
                let rows = frame.values.group(field.key);
                if focused {
                    lines.push(Line::from(vec![
                        label,
                        Span::raw("  "),
                        Span::styled(
                            "(Enter edit, a add, d remove, h/l select)",
                            self.theme.hint_style(),
                        ),
                    ]));
                    if rows.is_empty() {
                        lines.push(Line::from(Span::styled(
                            "    (none)",
                            self.theme.missing_style(),
                        )));
                    }
                    for (r, row) in rows.iter().enumerate() {
                        let style = if r == frame.group_cursor {
                            self.theme.cursor_style()
                        } else {
                            self.theme.value_style()
                        };
                        lines.push(Line::from(Span::styled(
                            format!("    {}. {}", r + 1, row_summary(sub_spec, row)),
                            style,
                        )));
                    }
                } else {
                    let noun = if rows.len() == 1 { "item" } else { "items" };
                    lines.push(Line::from(vec![
                        label,
                        Span::raw(": "),
                        Span::styled(
                            format!("{} {noun}", rows.len()),
                            self.theme.value_style(),
                        ),
                    ]));
                }
            }
        }
    }
}

/// Short label for a nested row: its first two non-empty text values
fn row_summary(spec: &[FieldSpec], values: &FormValues) -> String {
    let parts: Vec<&str> = spec
        .iter()
        .filter_map(|field| {
            let text = values.text(field.key);
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
        .take(2)
        .collect();
    if parts.is_empty() {
        "(blank)".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Render a single-line buffer with a block cursor
fn single_line_buffer(buffer: &EditBuffer, theme: &Theme) -> Vec<Span<'static>> {
    let before: String = buffer.text.chars().take(buffer.cursor).collect();
    let at = buffer
        .text
        .chars()
        .nth(buffer.cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = if buffer.cursor < buffer.text.chars().count() {
        buffer.text.chars().skip(buffer.cursor + 1).collect()
    } else {
        String::new()
    };
    vec![
        Span::styled(before, theme.value_style()),
        Span::styled(at, theme.cursor_style()),
        Span::styled(after, theme.value_style()),
    ]
}

/// Render a multi-line buffer with the cursor on the right line
fn multi_line_buffer(buffer: &EditBuffer, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut index = 0usize;
    let mut placed = false;
    let raw_lines: Vec<&str> = buffer.text.split('\n').collect();

    for raw in &raw_lines {
        let len = raw.chars().count();
        let start = index;
        let end = index + len;

        if !placed && buffer.cursor >= start && buffer.cursor <= end {
            placed = true;
            let col = buffer.cursor - start;
            let before: String = raw.chars().take(col).collect();
            let at = raw
                .chars()
                .nth(col)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after: String = if col < len {
                raw.chars().skip(col + 1).collect()
            } else {
                String::new()
            };
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(before, theme.value_style()),
                Span::styled(at, theme.cursor_style()),
                Span::styled(after, theme.value_style()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(raw.to_string(), theme.value_style()),
            ]));
        }

        index = end + 1;
    }

    lines
}
