//! Status bar and hotkey bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::{EditBuffer, InputMode};
use crate::ui::theme::Theme;

/// Bottom status bar: command input, status message, or a default hint
pub struct StatusBarWidget<'a> {
    theme: &'a Theme,
    input_mode: InputMode,
    command: &'a EditBuffer,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(theme: &'a Theme, input_mode: InputMode, command: &'a EditBuffer) -> Self {
        Self {
            theme,
            input_mode,
            command,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.input_mode == InputMode::Command));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.input_mode == InputMode::Command {
            command_line(self.command, self.theme)
        } else if let Some(message) = self.message {
            Line::from(Span::styled(message.to_string(), self.theme.success_style()))
        } else {
            Line::from(Span::styled(
                "Press '?' for help, ':' for commands",
                self.theme.hint_style(),
            ))
        };

        Paragraph::new(line).render(inner, buf);
    }
}

/// Render the : command buffer with a block cursor (unicode-safe)
fn command_line<'a>(command: &EditBuffer, theme: &'a Theme) -> Line<'a> {
    let content = &command.text;
    let cursor = command.cursor;

    let before: String = content.chars().take(cursor).collect();
    let at = content
        .chars()
        .nth(cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = if cursor < content.chars().count() {
        content.chars().skip(cursor + 1).collect()
    } else {
        String::new()
    };

    Line::from(vec![
        Span::styled(before, theme.value_style()),
        Span::styled(
            at,
            theme
                .value_style()
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
        ),
        Span::styled(after, theme.value_style()),
    ])
}

/// One-line bar of context-sensitive key hints
pub struct HotkeyBarWidget<'a> {
    theme: &'a Theme,
    hints: &'a str,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(theme: &'a Theme, hints: &'a str) -> Self {
        Self { theme, hints }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(Span::styled(self.hints.to_string(), self.theme.hint_style()));
        Paragraph::new(line).render(area, buf);
    }
}
