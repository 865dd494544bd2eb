//! Color theme and styling for the tracker TUI

use ratatui::style::{Color, Modifier, Style};

/// UI color theme
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Theme {
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // List rows
    pub row_title: Color,
    pub row_tag: Color,
    pub row_meta: Color,

    // Detail and form text
    pub label: Color,
    pub value: Color,
    pub missing: Color,

    // Feedback
    pub success: Color,
    pub error: Color,
    pub warning: Color,

    // Chrome
    pub title_bar: Color,
    pub hint: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            row_title: Color::White,
            row_tag: Color::Yellow,
            row_meta: Color::DarkGray,

            label: Color::Cyan,
            value: Color::White,
            missing: Color::DarkGray,

            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            title_bar: Color::White,
            hint: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Border style for a panel depending on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title_bar)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label).add_modifier(Modifier::BOLD)
    }

    pub fn value_style(&self) -> Style {
        Style::default().fg(self.value)
    }

    /// Dimmed style for absent values ("N/A") and placeholders
    pub fn missing_style(&self) -> Style {
        Style::default()
            .fg(self.missing)
            .add_modifier(Modifier::DIM)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint).add_modifier(Modifier::DIM)
    }

    /// Highlight for the row or field under the cursor
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }
}
