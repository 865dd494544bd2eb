//! Markdown rendering for detail views.
//!
//! Free-text fields are markdown-capable; this folds pulldown-cmark events
//! into styled lines. Pure text in, styled lines out.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

/// Render a markdown string into styled lines
pub fn to_lines(markdown: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut renderer = Renderer::new(theme);
    for event in Parser::new(markdown) {
        renderer.event(event);
    }
    renderer.finish()
}

struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    base: Style,
    bold: usize,
    italic: usize,
    heading: bool,
    // One counter per open list; None for unordered
    list_counters: Vec<Option<u64>>,
}

impl Renderer {
    fn new(theme: &Theme) -> Self {
        Self {
            lines: Vec::new(),
            spans: Vec::new(),
            base: theme.value_style(),
            bold: 0,
            italic: 0,
            heading: false,
            list_counters: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        let mut style = self.base;
        if self.heading || self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.heading {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    fn blank(&mut self) {
        self.flush();
        if !self.lines.is_empty() {
            self.lines.push(Line::from(""));
        }
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                self.flush();
                self.heading = true;
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush();
                self.heading = false;
            }
            Event::End(TagEnd::Paragraph) => self.blank(),
            Event::Start(Tag::Strong) => self.bold += 1,
            Event::End(TagEnd::Strong) => self.bold = self.bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.italic += 1,
            Event::End(TagEnd::Emphasis) => self.italic = self.italic.saturating_sub(1),
            Event::Start(Tag::List(start)) => self.list_counters.push(start),
            Event::End(TagEnd::List(_)) => {
                self.list_counters.pop();
                if self.list_counters.is_empty() {
                    self.blank();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let depth = self.list_counters.len().saturating_sub(1);
                let marker = match self.list_counters.last_mut() {
                    Some(Some(counter)) => {
                        let label = format!("{}{}. ", "  ".repeat(depth), counter);
                        *counter += 1;
                        label
                    }
                    _ => format!("{}- ", "  ".repeat(depth)),
                };
                self.spans.push(Span::styled(marker, self.base));
            }
            Event::End(TagEnd::Item) => self.flush(),
            Event::Text(text) => {
                let style = self.style();
                // Keep embedded newlines as separate lines
                let mut first = true;
                for part in text.split('\n') {
                    if !first {
                        self.flush();
                    }
                    first = false;
                    if !part.is_empty() {
                        self.spans.push(Span::styled(part.to_string(), style));
                    }
                }
            }
            Event::Code(code) => {
                self.spans.push(Span::styled(
                    code.to_string(),
                    self.base.fg(Color::Yellow),
                ));
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from("---"));
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while matches!(self.lines.last(), Some(line) if line.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}
