//! Event handling for the tracker TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use tracker_core::form::FieldKind;
use tracker_core::trackers::{ops, TrackerKind};

use crate::app::{App, FocusedPanel, FormState, InputMode, Overlay};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            scroll(app, -3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            scroll(app, 3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn scroll(app: &mut App, delta: i32) {
    if let Some(Overlay::Detail { scroll, .. }) = app.overlay_mut() {
        *scroll = scroll.saturating_add_signed(delta as isize);
        return;
    }
    if app.has_overlay() {
        return;
    }
    let len = app.rows().len();
    let cursor = app.list_cursor.saturating_add_signed(delta as isize);
    app.list_cursor = if len == 0 { 0 } else { cursor.min(len - 1) };
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcut (always works)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // Overlays capture input first
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

/// Handle keys in NORMAL mode (navigation and hotkeys)
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char(':') => {
            app.enter_command_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,

        // Panel focus
        KeyCode::Tab | KeyCode::BackTab => {
            app.focused_panel = match app.focused_panel {
                FocusedPanel::Nav => FocusedPanel::Content,
                FocusedPanel::Content => FocusedPanel::Nav,
            };
            EventResult::NeedsRedraw
        }

        // Campaign management
        KeyCode::Char('c') => {
            app.push_overlay(Overlay::NewCampaign {
                input: crate::app::EditBuffer::default(),
            });
            EventResult::NeedsRedraw
        }
        KeyCode::Char('C') => {
            app.push_overlay(Overlay::CampaignPicker { cursor: 0 });
            EventResult::NeedsRedraw
        }
        KeyCode::Char('D') => {
            app.confirm_delete_campaign();
            EventResult::NeedsRedraw
        }

        // Movement
        KeyCode::Char('j') | KeyCode::Down => {
            move_cursor(app, 1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_cursor(app, -1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') => {
            jump_cursor(app, true);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') => {
            jump_cursor(app, false);
            EventResult::NeedsRedraw
        }

        KeyCode::Enter => handle_activate(app),

        // Content actions
        KeyCode::Char('a') => {
            if !current_is_document(app) && app.registry.current().is_some() {
                app.open_form(None, false);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('e') => {
            if app.registry.current().is_some() {
                if current_is_document(app) {
                    app.open_form(None, false);
                } else if let Some(index) = app.selected_entry_index() {
                    app.open_form(Some(index), false);
                }
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') => {
            app.confirm_delete_entry();
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

fn current_is_document(app: &App) -> bool {
    ops(app.selected_tracker).is_document()
}

fn move_cursor(app: &mut App, delta: i32) {
    match app.focused_panel {
        FocusedPanel::Nav => {
            let len = TrackerKind::ALL.len();
            let cursor = app.nav_cursor.saturating_add_signed(delta as isize);
            app.nav_cursor = cursor.min(len - 1);
        }
        FocusedPanel::Content => {
            let len = app.rows().len();
            let cursor = app.list_cursor.saturating_add_signed(delta as isize);
            app.list_cursor = if len == 0 { 0 } else { cursor.min(len - 1) };
        }
    }
}

fn jump_cursor(app: &mut App, top: bool) {
    match app.focused_panel {
        FocusedPanel::Nav => {
            app.nav_cursor = if top { 0 } else { TrackerKind::ALL.len() - 1 };
        }
        FocusedPanel::Content => {
            let len = app.rows().len();
            app.list_cursor = if top || len == 0 { 0 } else { len - 1 };
        }
    }
}

fn handle_activate(app: &mut App) -> EventResult {
    match app.focused_panel {
        FocusedPanel::Nav => {
            let kind = TrackerKind::ALL[app.nav_cursor.min(TrackerKind::ALL.len() - 1)];
            app.select_tracker(kind);
            app.focused_panel = FocusedPanel::Content;
        }
        FocusedPanel::Content => {
            if current_is_document(app) {
                if app.registry.current().is_some() {
                    app.open_form(None, false);
                }
            } else {
                app.open_detail();
            }
        }
    }
    EventResult::NeedsRedraw
}

/// Handle keys in COMMAND mode (: commands)
fn handle_command_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.enter_normal_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            let command = app.command.text.clone();
            app.enter_normal_mode();
            if command.len() > 1 {
                app.process_command(&command);
            }
            if app.should_quit {
                EventResult::Quit
            } else {
                EventResult::NeedsRedraw
            }
        }
        KeyCode::Left => {
            if app.command.cursor > 1 {
                app.command.left();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.command.right();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            if app.command.cursor > 1 {
                app.command.backspace();
            } else {
                // Backspace on just ":" exits command mode
                app.enter_normal_mode();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.command.insert(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle key when an overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match app.overlay() {
        Some(Overlay::Form(_)) => handle_form_key(app, key),
        Some(Overlay::Confirm { .. }) => handle_confirm_key(app, key),
        Some(Overlay::Alert { .. }) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q') => {
                app.pop_overlay();
                EventResult::NeedsRedraw
            }
            _ => EventResult::Continue,
        },
        Some(Overlay::Detail { .. }) => handle_detail_key(app, key),
        Some(Overlay::CampaignPicker { .. }) => handle_picker_key(app, key),
        Some(Overlay::NewCampaign { .. }) => handle_new_campaign_key(app, key),
        Some(Overlay::Help) => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
                app.pop_overlay();
                EventResult::NeedsRedraw
            }
            _ => EventResult::Continue,
        },
        None => EventResult::Continue,
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            let action = match app.overlay() {
                Some(Overlay::Confirm { action, .. }) => Some(action.clone()),
                _ => None,
            };
            app.pop_overlay();
            if let Some(action) = action {
                app.apply_confirm(action);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
            app.pop_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.pop_overlay();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('e') => {
            let target = match app.overlay() {
                Some(Overlay::Detail { index, .. }) => Some(*index),
                _ => None,
            };
            if let Some(index) = target {
                app.open_form(Some(index), true);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(Overlay::Detail { scroll, .. }) = app.overlay_mut() {
                *scroll = scroll.saturating_add(1);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(Overlay::Detail { scroll, .. }) = app.overlay_mut() {
                *scroll = scroll.saturating_sub(1);
            }
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) -> EventResult {
    let len = app.registry.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.pop_overlay();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(Overlay::CampaignPicker { cursor }) = app.overlay_mut() {
                if len > 0 {
                    *cursor = (*cursor + 1).min(len - 1);
                }
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(Overlay::CampaignPicker { cursor }) = app.overlay_mut() {
                *cursor = cursor.saturating_sub(1);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            let name = match app.overlay() {
                Some(Overlay::CampaignPicker { cursor }) => app
                    .registry
                    .names()
                    .get(*cursor)
                    .map(|name| name.to_string()),
                _ => None,
            };
            app.pop_overlay();
            if let Some(name) = name {
                app.select_campaign(&name);
            }
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_new_campaign_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.pop_overlay();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            let name = match app.overlay() {
                Some(Overlay::NewCampaign { input }) => input.text.trim().to_string(),
                _ => String::new(),
            };
            app.pop_overlay();
            if name.is_empty() {
                app.set_status("Campaign name cannot be empty");
            } else {
                app.pending
                    .push_back(crate::app::PendingOp::CreateCampaign(name));
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            if let Some(Overlay::NewCampaign { input }) = app.overlay_mut() {
                input.backspace();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            if let Some(Overlay::NewCampaign { input }) = app.overlay_mut() {
                input.left();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            if let Some(Overlay::NewCampaign { input }) = app.overlay_mut() {
                input.right();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            if let Some(Overlay::NewCampaign { input }) = app.overlay_mut() {
                input.insert(c);
            }
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle keys inside the edit form
fn handle_form_key(app: &mut App, key: KeyEvent) -> EventResult {
    let (editing, kind, multiline) = match app.overlay() {
        Some(Overlay::Form(state)) => {
            let frame = state.frame();
            let kind = frame.field().kind;
            let multiline = matches!(kind, FieldKind::Multiline | FieldKind::Lines);
            (frame.editing, kind, multiline)
        }
        _ => return EventResult::Continue,
    };

    if editing {
        return handle_field_edit_key(app, key, multiline);
    }

    match key.code {
        KeyCode::Esc => {
            app.cancel_form();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('s') => {
            app.save_form();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            with_form(app, |state| state.frame_mut().cursor_down());
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            with_form(app, |state| state.frame_mut().cursor_up());
            EventResult::NeedsRedraw
        }
        KeyCode::Enter | KeyCode::Char('i') => {
            match kind {
                FieldKind::Select(_) => with_form(app, |state| state.frame_mut().cycle_select(true)),
                FieldKind::Flag => with_form(app, |state| state.frame_mut().toggle_flag()),
                FieldKind::Group(_) => app.open_group_row(false),
                _ => with_form(app, |state| state.frame_mut().start_editing()),
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char(' ') => {
            match kind {
                FieldKind::Select(_) => with_form(app, |state| state.frame_mut().cycle_select(true)),
                FieldKind::Flag => with_form(app, |state| state.frame_mut().toggle_flag()),
                _ => {}
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Left | KeyCode::Char('h') => {
            match kind {
                FieldKind::Select(_) => {
                    with_form(app, |state| state.frame_mut().cycle_select(false))
                }
                FieldKind::Group(_) => with_form(app, |state| {
                    let frame = state.frame_mut();
                    frame.group_cursor = frame.group_cursor.saturating_sub(1);
                }),
                _ => {}
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Right | KeyCode::Char('l') => {
            match kind {
                FieldKind::Select(_) => {
                    with_form(app, |state| state.frame_mut().cycle_select(true))
                }
                FieldKind::Group(_) => with_form(app, |state| {
                    let frame = state.frame_mut();
                    let key = frame.field().key;
                    let len = frame.values.group(key).len();
                    if len > 0 {
                        frame.group_cursor = (frame.group_cursor + 1).min(len - 1);
                    }
                }),
                _ => {}
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('a') => {
            if matches!(kind, FieldKind::Group(_)) {
                app.open_group_row(true);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') => {
            if matches!(kind, FieldKind::Group(_)) {
                app.delete_group_row();
            }
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle keys while typing into a form field
fn handle_field_edit_key(app: &mut App, key: KeyEvent, multiline: bool) -> EventResult {
    match key.code {
        // Esc commits the buffer and leaves editing; cancel of the whole
        // form is an explicit second Esc from field navigation.
        KeyCode::Esc => {
            with_form(app, |state| state.frame_mut().commit_edit());
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            with_form(app, |state| {
                let frame = state.frame_mut();
                if multiline {
                    frame.buffer.insert('\n');
                } else {
                    frame.commit_edit();
                }
            });
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            with_form(app, |state| state.frame_mut().buffer.backspace());
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            with_form(app, |state| state.frame_mut().buffer.delete());
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            with_form(app, |state| state.frame_mut().buffer.left());
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            with_form(app, |state| state.frame_mut().buffer.right());
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            with_form(app, |state| state.frame_mut().buffer.home());
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            with_form(app, |state| state.frame_mut().buffer.end());
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            with_form(app, |state| state.frame_mut().buffer.insert(c));
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn with_form(app: &mut App, f: impl FnOnce(&mut FormState)) {
    if let Some(Overlay::Form(state)) = app.overlay_mut() {
        f(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ConfirmAction;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tracker_core::{CampaignCollection, CampaignRegistry, CampaignStore};

    fn app() -> App {
        let store = CampaignStore::new("test_campaigns.json");
        App::new(
            CampaignRegistry::new(store, CampaignCollection::new()),
            None,
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_q_quits_from_normal_mode() {
        let mut app = app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        app.toggle_help();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, event), EventResult::Quit);
    }

    #[test]
    fn test_nav_enter_mounts_the_tracker_under_the_cursor() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('j')));
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.selected_tracker, TrackerKind::ALL[1]);
        assert_eq!(app.focused_panel, FocusedPanel::Content);
    }

    #[test]
    fn test_colon_enters_command_mode_and_esc_leaves() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char(':')));
        assert_eq!(app.input_mode, InputMode::Command);
        handle_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.has_overlay());
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_confirm_no_leaves_state_alone() {
        let mut app = app();
        app.push_overlay(Overlay::Confirm {
            title: "Delete".to_string(),
            message: "sure?".to_string(),
            action: ConfirmAction::DeleteCampaign("X".to_string()),
        });
        handle_event(&mut app, key(KeyCode::Char('n')));
        assert!(!app.has_overlay());
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_confirm_yes_queues_the_campaign_delete() {
        let mut app = app();
        app.push_overlay(Overlay::Confirm {
            title: "Delete".to_string(),
            message: "sure?".to_string(),
            action: ConfirmAction::DeleteCampaign("X".to_string()),
        });
        handle_event(&mut app, key(KeyCode::Char('y')));
        assert!(!app.has_overlay());
        assert_eq!(app.pending.len(), 1);
    }
}
