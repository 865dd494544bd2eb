//! Render orchestration for the tracker TUI

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use tracker_core::trackers::{ops, DetailField};

use crate::app::{App, EditBuffer, FocusedPanel, InputMode, Overlay};
use crate::ui::layout::{centered_rect, centered_rect_fixed, AppLayout};
use crate::ui::markdown;
use crate::ui::theme::Theme;
use crate::ui::widgets::{EntryListWidget, FormWidget, HotkeyBarWidget, NavWidget, StatusBarWidget};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let nav = NavWidget::new(&app.theme, app.nav_cursor, app.selected_tracker)
        .focused(app.focused_panel == FocusedPanel::Nav && !app.has_overlay());
    frame.render_widget(nav, layout.nav_area);

    render_content(frame, app, layout.content_area);

    let status = StatusBarWidget::new(&app.theme, app.input_mode, &app.command)
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    let hints = hotkey_hints(app);
    frame.render_widget(HotkeyBarWidget::new(&app.theme, &hints), layout.hotkey_bar);

    // Overlays render bottom-up so a confirm or alert sits on whatever
    // opened it
    for overlay in app.overlays() {
        render_overlay(frame, app, overlay, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let campaign = app.registry.current_name().unwrap_or("(none)");
    let count = app.registry.len();
    let plural = if count == 1 { "campaign" } else { "campaigns" };
    let title = format!(" TTRPG Campaign Tracker | Campaign: {campaign} | {count} {plural} ");
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(title, app.theme.title_style()))),
        area,
    );
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let tracker_ops = ops(app.selected_tracker);
    let focused = app.focused_panel == FocusedPanel::Content && !app.has_overlay();

    let Some(campaign) = app.registry.current() else {
        let block = Block::default()
            .title(format!(" {} ", tracker_ops.title()))
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(focused));
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No campaign selected.",
                app.theme.missing_style(),
            )),
            Line::from(Span::styled(
                "Press 'C' to choose one or 'c' to create one.",
                app.theme.hint_style(),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    if tracker_ops.is_document() {
        let block = Block::default()
            .title(format!(" {} ", tracker_ops.title()))
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(focused));
        let mut lines = detail_lines(&tracker_ops.overview(campaign), &app.theme);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press 'e' to edit.",
            app.theme.hint_style(),
        )));
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
        );
        return;
    }

    let rows = app.rows();
    let list = EntryListWidget::new(&rows, &app.theme, tracker_ops.title())
        .cursor(app.list_cursor)
        .focused(focused);
    frame.render_widget(list, area);
}

/// Labeled fields for detail and overview panels; empty values show as
/// a dim "N/A"
fn detail_lines(fields: &[DetailField], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for field in fields {
        lines.push(Line::from(Span::styled(
            format!("{}:", field.label),
            theme.label_style(),
        )));
        if field.value.trim().is_empty() {
            lines.push(Line::from(Span::styled("  N/A", theme.missing_style())));
        } else if field.markdown {
            for line in markdown::to_lines(&field.value, theme) {
                let mut spans = vec![Span::raw("  ")];
                spans.extend(line.spans);
                lines.push(Line::from(spans));
            }
        } else {
            for raw in field.value.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {raw}"),
                    theme.value_style(),
                )));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help(frame, app, area),
        Overlay::Detail {
            tracker,
            index,
            scroll,
        } => render_detail(frame, app, *tracker, *index, *scroll, area),
        Overlay::Form(state) => {
            let popup = centered_rect(80, 85, area);
            frame.render_widget(FormWidget::new(state, &app.theme), popup);
        }
        Overlay::Confirm { title, message, .. } => {
            render_dialog(frame, app, title, message, "[y] Yes   [n] No", area);
        }
        Overlay::Alert { title, message } => {
            render_dialog(frame, app, title, message, "[Enter] OK", area);
        }
        Overlay::CampaignPicker { cursor } => render_picker(frame, app, *cursor, area),
        Overlay::NewCampaign { input } => render_new_campaign(frame, app, input, area),
    }
}

fn render_detail(
    frame: &mut Frame,
    app: &App,
    tracker: tracker_core::TrackerKind,
    index: usize,
    scroll: usize,
    area: Rect,
) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let detail = app
        .registry
        .current()
        .and_then(|campaign| ops(tracker).detail(campaign, index));

    let (title, lines) = match detail {
        Some((header, fields)) => (
            format!(" View {header} "),
            detail_lines(&fields, &app.theme),
        ),
        // Deleted out from under the view; degrade to a notice
        None => (
            " Not Found ".to_string(),
            vec![Line::from(Span::styled(
                "Could not find the selected entry.",
                app.theme.missing_style(),
            ))],
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0))
        .block(block);
    frame.render_widget(paragraph, popup);
}

fn render_dialog(
    frame: &mut Frame,
    app: &App,
    title: &str,
    message: &str,
    footer: &str,
    area: Rect,
) {
    let popup = centered_rect_fixed(60, 9, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), app.theme.value_style())),
        Line::from(""),
        Line::from(Span::styled(footer.to_string(), app.theme.hint_style())),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        popup,
    );
}

fn render_picker(frame: &mut Frame, app: &App, cursor: usize, area: Rect) {
    let names = app.registry.names();
    let height = (names.len() as u16 + 4).max(5).min(area.height);
    let popup = centered_rect_fixed(44, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Select Campaign ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let lines: Vec<Line> = if names.is_empty() {
        vec![Line::from(Span::styled(
            "No campaigns yet. Press 'c' to create one.",
            app.theme.missing_style(),
        ))]
    } else {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == cursor {
                    app.theme.cursor_style()
                } else {
                    app.theme.value_style()
                };
                let marker = if Some(*name) == app.registry.current_name() {
                    "* "
                } else {
                    "  "
                };
                Line::from(Span::styled(format!("{marker}{name}"), style))
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_new_campaign(frame: &mut Frame, app: &App, input: &EditBuffer, area: Rect) {
    let popup = centered_rect_fixed(50, 7, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" New Campaign ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let before: String = input.text.chars().take(input.cursor).collect();
    let at = input
        .text
        .chars()
        .nth(input.cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = if input.cursor < input.text.chars().count() {
        input.text.chars().skip(input.cursor + 1).collect()
    } else {
        String::new()
    };

    let lines = vec![
        Line::from(Span::styled(
            "Enter new campaign name:",
            app.theme.label_style(),
        )),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(before, app.theme.value_style()),
            Span::styled(
                at,
                app.theme
                    .value_style()
                    .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            ),
            Span::styled(after, app.theme.value_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] create   [Esc] cancel",
            app.theme.hint_style(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_fixed(58, 24, area);
    frame.render_widget(Clear, popup);

    let help_text = vec![
        Line::from(Span::styled(
            " TTRPG Campaign Tracker - Help ",
            app.theme.title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation:",
            app.theme.value_style().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  Tab            Switch between nav and content"),
        Line::from("  j/k or arrows  Move cursor"),
        Line::from("  Enter          Mount tracker / view entry"),
        Line::from(""),
        Line::from(Span::styled(
            "Entries:",
            app.theme.value_style().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  a       Add entry"),
        Line::from("  e       Edit entry (or document tracker)"),
        Line::from("  d       Delete entry (with confirmation)"),
        Line::from(""),
        Line::from(Span::styled(
            "Campaigns:",
            app.theme.value_style().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  c       Create campaign"),
        Line::from("  C       Choose campaign"),
        Line::from("  D       Delete selected campaign"),
        Line::from(""),
        Line::from(Span::styled(
            "Commands:",
            app.theme.value_style().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  :new <name>  :delete  :export [dir]  :import <file>"),
        Line::from("  :w save      :q quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            app.theme.hint_style(),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    frame.render_widget(
        Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

/// Context-sensitive hints for the bottom bar
fn hotkey_hints(app: &App) -> String {
    match app.overlay() {
        Some(Overlay::Form(state)) => {
            if state.frame().editing {
                "[Esc] done editing   [Enter] commit / newline".to_string()
            } else {
                "[j/k] field   [Enter] edit   [s] save   [Esc] cancel".to_string()
            }
        }
        Some(Overlay::Detail { .. }) => "[e] edit   [j/k] scroll   [Esc] close".to_string(),
        Some(Overlay::Confirm { .. }) => "[y] confirm   [n] cancel".to_string(),
        Some(Overlay::Alert { .. }) => "[Enter] dismiss".to_string(),
        Some(Overlay::CampaignPicker { .. }) => {
            "[j/k] move   [Enter] select   [Esc] close".to_string()
        }
        Some(Overlay::NewCampaign { .. }) => "[Enter] create   [Esc] cancel".to_string(),
        Some(Overlay::Help) => "[Esc] close".to_string(),
        None if app.input_mode == InputMode::Command => "[Enter] run   [Esc] cancel".to_string(),
        None => {
            "Tab focus | Enter open | a add | e edit | d delete | c/C campaigns | ? help | q quit"
                .to_string()
        }
    }
}
