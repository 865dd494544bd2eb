//! Main application state and logic.
//!
//! The app owns the campaign registry and the transient view state: which
//! tracker is mounted, which campaign is selected, the overlay (modal)
//! stack, and the status line. Mutations that need to touch disk are
//! queued as [`PendingOp`]s and drained by the run loop between frames.

use std::collections::VecDeque;
use std::path::PathBuf;

use tracker_core::form::{FieldKind, FieldSpec, FormValues};
use tracker_core::store::StoreError;
use tracker_core::trackers::{ops, TrackerKind};
use tracker_core::{CampaignRegistry, ListRow};

use crate::ui::theme::Theme;

/// Input modes for the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and hotkeys (default)
    #[default]
    Normal,
    /// Entering a : command
    Command,
}

/// Which panel has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Nav,
    Content,
}

/// A destructive action waiting on the user's confirmation
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteCampaign(String),
    DeleteEntry { tracker: TrackerKind, index: usize },
}

/// Store operations executed by the run loop between frames
#[derive(Debug, Clone)]
pub enum PendingOp {
    Persist,
    CreateCampaign(String),
    DeleteCampaign(String),
    Export(PathBuf),
    Import(PathBuf),
}

/// A text buffer with a character-based cursor (unicode-safe)
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    pub text: String,
    pub cursor: usize,
}

impl EditBuffer {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = self
            .text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if let Some((byte_pos, ch)) = self.text.char_indices().nth(self.cursor) {
                self.text.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.text.char_indices().nth(self.cursor) {
            self.text.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Where a sub-form came from, so saving writes the row back and
/// cancelling a freshly added row removes it again
#[derive(Debug, Clone)]
pub struct SubOrigin {
    pub key: &'static str,
    pub row: usize,
    pub added: bool,
}

/// One level of the form: the entry itself, or a nested record opened
/// from a Group field
#[derive(Debug, Clone)]
pub struct FormFrame {
    pub title: String,
    pub spec: &'static [FieldSpec],
    pub values: FormValues,
    pub cursor: usize,
    pub editing: bool,
    pub buffer: EditBuffer,
    /// Selected row of the focused Group field
    pub group_cursor: usize,
    pub origin: Option<SubOrigin>,
}

impl FormFrame {
    pub fn new(title: impl Into<String>, spec: &'static [FieldSpec], values: FormValues) -> Self {
        Self {
            title: title.into(),
            spec,
            values,
            cursor: 0,
            editing: false,
            buffer: EditBuffer::default(),
            group_cursor: 0,
            origin: None,
        }
    }

    pub fn field(&self) -> &FieldSpec {
        &self.spec[self.cursor]
    }

    /// Begin editing the focused text-like field
    pub fn start_editing(&mut self) {
        let key = self.field().key;
        self.buffer = EditBuffer::with_text(self.values.text(key));
        self.editing = true;
    }

    /// Commit the edit buffer back into the values
    pub fn commit_edit(&mut self) {
        if self.editing {
            let key = self.field().key;
            self.values.set_text(key, self.buffer.text.clone());
            self.editing = false;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.group_cursor = 0;
    }

    pub fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1).min(self.spec.len().saturating_sub(1));
        self.group_cursor = 0;
    }

    /// Cycle a Select field to the adjacent option
    pub fn cycle_select(&mut self, forward: bool) {
        let field = *self.field();
        if let FieldKind::Select(options) = field.kind {
            if options.is_empty() {
                return;
            }
            let current = self.values.text(field.key);
            let position = options.iter().position(|&o| o == current).unwrap_or(0);
            let next = if forward {
                (position + 1) % options.len()
            } else {
                (position + options.len() - 1) % options.len()
            };
            self.values.set_text(field.key, options[next]);
        }
    }

    pub fn toggle_flag(&mut self) {
        let field = *self.field();
        if field.kind == FieldKind::Flag {
            let current = self.values.flag(field.key);
            self.values.set_flag(field.key, !current);
        }
    }
}

/// Modal form state: the tracker being edited plus a stack of frames
/// (the entry form, then any open Group sub-forms)
#[derive(Debug, Clone)]
pub struct FormState {
    pub tracker: TrackerKind,
    /// `None` is "add new" (or the whole document for document trackers)
    pub index: Option<usize>,
    pub from_detail: bool,
    /// Field that failed required validation, marked in the form
    pub invalid_key: Option<&'static str>,
    pub frames: Vec<FormFrame>,
}

impl FormState {
    pub fn frame(&self) -> &FormFrame {
        self.frames.last().expect("form always has a root frame")
    }

    pub fn frame_mut(&mut self) -> &mut FormFrame {
        self.frames.last_mut().expect("form always has a root frame")
    }
}

/// Overlay (modal) types, stacked: an alert can sit on top of a form
#[derive(Debug, Clone)]
pub enum Overlay {
    Help,
    Detail {
        tracker: TrackerKind,
        index: usize,
        scroll: usize,
    },
    Form(FormState),
    Confirm {
        title: String,
        message: String,
        action: ConfirmAction,
    },
    Alert {
        title: String,
        message: String,
    },
    CampaignPicker {
        cursor: usize,
    },
    NewCampaign {
        input: EditBuffer,
    },
}

/// How long a status message stays up, in 100ms ticks
const STATUS_TICKS: u8 = 30;

/// Main application state
pub struct App {
    pub registry: CampaignRegistry,
    pub theme: Theme,

    // View state
    pub focused_panel: FocusedPanel,
    pub selected_tracker: TrackerKind,
    pub nav_cursor: usize,
    pub list_cursor: usize,
    overlays: Vec<Overlay>,

    // Input state
    pub input_mode: InputMode,
    pub command: EditBuffer,

    // Status
    status_message: Option<String>,
    status_ticks: u8,
    pub should_quit: bool,

    // Store operations for the run loop
    pub pending: VecDeque<PendingOp>,
}

impl App {
    pub fn new(registry: CampaignRegistry, load_error: Option<StoreError>) -> Self {
        let mut app = Self {
            registry,
            theme: Theme::default(),
            focused_panel: FocusedPanel::default(),
            selected_tracker: TrackerKind::GameExpectations,
            nav_cursor: 0,
            list_cursor: 0,
            overlays: Vec::new(),
            input_mode: InputMode::Normal,
            command: EditBuffer::default(),
            status_message: None,
            status_ticks: 0,
            should_quit: false,
            pending: VecDeque::new(),
        };

        if let Some(error) = load_error {
            app.push_overlay(Overlay::Alert {
                title: "Load Error".to_string(),
                message: format!(
                    "Error loading stored data: {error}. Starting with an empty collection; \
                     your previous data file was left untouched."
                ),
            });
        }

        app
    }

    // =========================================================================
    // Overlay stack
    // =========================================================================

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlays.last_mut()
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn has_overlay(&self) -> bool {
        !self.overlays.is_empty()
    }

    pub fn push_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn pop_overlay(&mut self) {
        self.overlays.pop();
    }

    pub fn close_all_overlays(&mut self) {
        self.overlays.clear();
    }

    pub fn toggle_help(&mut self) {
        if matches!(self.overlays.last(), Some(Overlay::Help)) {
            self.overlays.pop();
        } else {
            self.overlays.push(Overlay::Help);
        }
    }

    pub fn alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_overlay(Overlay::Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    // =========================================================================
    // Status line
    // =========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Tick for the status fade-out
    pub fn tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Mount a tracker into the content region. Whatever was on screen
    /// (including unsaved form state) is discarded.
    pub fn select_tracker(&mut self, kind: TrackerKind) {
        self.selected_tracker = kind;
        self.list_cursor = 0;
        self.close_all_overlays();
    }

    /// Select a campaign and re-render the active tracker against it
    pub fn select_campaign(&mut self, name: &str) {
        match self.registry.select(name) {
            Ok(()) => {
                self.list_cursor = 0;
                self.set_status(format!("Selected campaign: {name}"));
            }
            Err(error) => self.set_status(error.to_string()),
        }
    }

    /// Rows of the mounted tracker, in display order
    pub fn rows(&self) -> Vec<(usize, ListRow)> {
        match self.registry.current() {
            Some(campaign) => ops(self.selected_tracker).rows(campaign),
            None => Vec::new(),
        }
    }

    /// Entry index addressed by the list cursor
    pub fn selected_entry_index(&self) -> Option<usize> {
        self.rows().get(self.list_cursor).map(|(index, _)| *index)
    }

    pub fn clamp_list_cursor(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.list_cursor = 0;
        } else {
            self.list_cursor = self.list_cursor.min(len - 1);
        }
    }

    // =========================================================================
    // Detail view
    // =========================================================================

    /// Open the read-only detail view for the selected row. A stale index
    /// degrades to a notice and the list stays mounted.
    pub fn open_detail(&mut self) {
        let Some(campaign) = self.registry.current() else {
            return;
        };
        let tracker = self.selected_tracker;
        let Some(index) = self.selected_entry_index() else {
            return;
        };

        if ops(tracker).detail(campaign, index).is_some() {
            self.push_overlay(Overlay::Detail {
                tracker,
                index,
                scroll: 0,
            });
        } else {
            self.alert("Not Found", "Could not find the selected entry.");
            self.clamp_list_cursor();
        }
    }

    // =========================================================================
    // Form flow
    // =========================================================================

    /// Open the edit form. `index == None` is "add new" for list trackers
    /// and "edit the document" for document trackers.
    pub fn open_form(&mut self, index: Option<usize>, from_detail: bool) {
        let tracker = self.selected_tracker;
        let tracker_ops = ops(tracker);
        let Some(campaign) = self.registry.current() else {
            self.set_status("No campaign selected");
            return;
        };

        let Some(values) = tracker_ops.form_values(campaign, index) else {
            self.alert("Not Found", "Could not find the selected entry.");
            return;
        };

        let title = if tracker_ops.is_document() {
            format!("Edit {}", tracker_ops.title())
        } else {
            match index {
                Some(i) => match tracker_ops.detail(campaign, i) {
                    Some((header, _)) => format!("Edit {header}"),
                    None => format!("Edit {}", tracker_ops.noun()),
                },
                None => format!("Add {}", tracker_ops.noun()),
            }
        };

        self.push_overlay(Overlay::Form(FormState {
            tracker,
            index,
            from_detail,
            invalid_key: None,
            frames: vec![FormFrame::new(title, tracker_ops.form_spec(), values)],
        }));
    }

    /// Save the active form. Validation failures keep the form open with
    /// the offending field marked.
    pub fn save_form(&mut self) {
        let Some(Overlay::Form(state)) = self.overlays.last_mut() else {
            return;
        };
        state.frame_mut().commit_edit();

        // Sub-forms save into their parent frame, not into the campaign.
        if state.frames.len() > 1 {
            if let Some(child) = state.frames.pop() {
                if let Some(origin) = child.origin {
                    let parent = state.frame_mut();
                    if let Some(tracker_core::FormValue::Group(rows)) =
                        parent.values.get_mut(origin.key)
                    {
                        if origin.row < rows.len() {
                            rows[origin.row] = child.values;
                        }
                    }
                }
            }
            return;
        }

        let tracker = state.tracker;
        let index = state.index;
        let values = state.frame().values.clone();
        let tracker_ops = ops(tracker);

        if let Err(field) = tracker_ops.validate(&values) {
            state.invalid_key = Some(field.key);
            let label = field.label;
            self.alert(
                "Validation Error",
                format!("{label} is required. Please fill it in before saving."),
            );
            return;
        }

        let Some(campaign) = self.registry.current_mut() else {
            return;
        };
        match tracker_ops.save_form(campaign, index, &values) {
            Ok(outcome) => {
                let noun = tracker_ops.noun();
                if tracker_ops.is_document() {
                    self.set_status(format!("{noun} saved"));
                } else if outcome.created {
                    self.set_status(format!("{noun} \"{}\" added", outcome.title));
                } else {
                    self.set_status(format!("{noun} \"{}\" saved", outcome.title));
                }
                // The list view reflects the latest saved state; any detail
                // view underneath is dropped along with the form.
                self.close_all_overlays();
                self.clamp_list_cursor();
                self.pending.push_back(PendingOp::Persist);
            }
            Err(error) => {
                self.alert("Save Error", format!("Could not save: {error}"));
            }
        }
    }

    /// Cancel the active form frame. Cancelling the root frame returns to
    /// the detail view when the form was opened from it.
    pub fn cancel_form(&mut self) {
        let Some(Overlay::Form(state)) = self.overlays.last_mut() else {
            return;
        };

        if state.frames.len() > 1 {
            let Some(child) = state.frames.pop() else {
                return;
            };
            if let Some(origin) = child.origin {
                if origin.added {
                    let parent = state.frame_mut();
                    if let Some(tracker_core::FormValue::Group(rows)) =
                        parent.values.get_mut(origin.key)
                    {
                        if origin.row < rows.len() {
                            rows.remove(origin.row);
                        }
                    }
                }
            }
            return;
        }

        let from_detail = state.from_detail && state.index.is_some();
        self.pop_overlay();
        if from_detail {
            // The detail overlay is still on the stack beneath the form
            // and takes over again.
            return;
        }
        // Back to the list view.
        self.close_all_overlays();
    }

    /// Open a sub-form for the focused Group field's selected row, or for
    /// a freshly appended row
    pub fn open_group_row(&mut self, add_new: bool) {
        let Some(Overlay::Form(state)) = self.overlays.last_mut() else {
            return;
        };
        let frame = state.frame_mut();
        let field = *frame.field();
        let FieldKind::Group(sub_spec) = field.kind else {
            return;
        };

        let (row, values, added) = if add_new {
            let blank = FormValues::blank(sub_spec);
            if let Some(tracker_core::FormValue::Group(rows)) = frame.values.get_mut(field.key) {
                rows.push(blank.clone());
                (rows.len() - 1, blank, true)
            } else {
                frame.values.set_group(field.key, vec![blank.clone()]);
                (0, blank, true)
            }
        } else {
            let rows = frame.values.group(field.key);
            if rows.is_empty() {
                return;
            }
            let row = frame.group_cursor.min(rows.len() - 1);
            (row, rows[row].clone(), false)
        };

        let mut child = FormFrame::new(format!("{} {}", field.label, row + 1), sub_spec, values);
        child.origin = Some(SubOrigin {
            key: field.key,
            row,
            added,
        });
        state.frames.push(child);
    }

    /// Remove the focused Group field's selected row
    pub fn delete_group_row(&mut self) {
        let Some(Overlay::Form(state)) = self.overlays.last_mut() else {
            return;
        };
        let frame = state.frame_mut();
        let field = *frame.field();
        if !matches!(field.kind, FieldKind::Group(_)) {
            return;
        }
        let cursor = frame.group_cursor;
        if let Some(tracker_core::FormValue::Group(rows)) = frame.values.get_mut(field.key) {
            if cursor < rows.len() {
                rows.remove(cursor);
            }
            let len = rows.len();
            frame.group_cursor = if len == 0 { 0 } else { cursor.min(len - 1) };
        }
    }

    // =========================================================================
    // Destructive actions
    // =========================================================================

    /// Ask before deleting the selected entry
    pub fn confirm_delete_entry(&mut self) {
        let Some(campaign) = self.registry.current() else {
            return;
        };
        let tracker = self.selected_tracker;
        let tracker_ops = ops(tracker);
        if tracker_ops.is_document() {
            return;
        }
        let Some(index) = self.selected_entry_index() else {
            return;
        };
        let title = tracker_ops
            .detail(campaign, index)
            .map(|(header, _)| header)
            .unwrap_or_else(|| tracker_ops.noun().to_string());

        self.push_overlay(Overlay::Confirm {
            title: format!("Delete {}", tracker_ops.noun()),
            message: format!(
                "Are you sure you want to delete {title}? This action cannot be undone."
            ),
            action: ConfirmAction::DeleteEntry { tracker, index },
        });
    }

    /// Ask before deleting the selected campaign (destroys all its
    /// tracker data)
    pub fn confirm_delete_campaign(&mut self) {
        let Some(name) = self.registry.current_name() else {
            self.set_status("No campaign selected");
            return;
        };
        let name = name.to_string();
        self.push_overlay(Overlay::Confirm {
            title: "Delete Campaign".to_string(),
            message: format!(
                "Delete campaign '{name}'? All of its tracker data will be lost."
            ),
            action: ConfirmAction::DeleteCampaign(name),
        });
    }

    /// Run a confirmed action
    pub fn apply_confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteCampaign(name) => {
                self.pending.push_back(PendingOp::DeleteCampaign(name));
            }
            ConfirmAction::DeleteEntry { tracker, index } => {
                let tracker_ops = ops(tracker);
                let Some(campaign) = self.registry.current_mut() else {
                    return;
                };
                match tracker_ops.delete(campaign, index) {
                    Ok(Some(title)) => {
                        self.set_status(format!("{} \"{title}\" deleted", tracker_ops.noun()));
                        self.pending.push_back(PendingOp::Persist);
                    }
                    Ok(None) => {
                        self.alert("Not Found", "The entry was already gone.");
                    }
                    Err(error) => {
                        self.alert("Delete Error", format!("Could not delete: {error}"));
                    }
                }
                self.clamp_list_cursor();
            }
        }
    }

    // =========================================================================
    // Command mode
    // =========================================================================

    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.clear();
        self.command.insert(':');
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.clear();
    }

    /// Process a colon command
    pub fn process_command(&mut self, command: &str) {
        let cmd = command.trim_start_matches(':');
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        if parts.is_empty() {
            return;
        }

        match parts[0] {
            "q" | "quit" | "exit" => {
                self.should_quit = true;
            }
            "w" | "save" => {
                self.set_status("Saving...");
                self.pending.push_back(PendingOp::Persist);
            }
            "new" => {
                if parts.len() > 1 {
                    let name = parts[1..].join(" ");
                    self.pending.push_back(PendingOp::CreateCampaign(name));
                } else {
                    self.push_overlay(Overlay::NewCampaign {
                        input: EditBuffer::default(),
                    });
                }
            }
            "delete" => {
                self.confirm_delete_campaign();
            }
            "export" => {
                let dir = if parts.len() > 1 {
                    PathBuf::from(parts[1..].join(" "))
                } else {
                    PathBuf::from(".")
                };
                self.set_status("Exporting...");
                self.pending.push_back(PendingOp::Export(dir));
            }
            "import" => {
                if parts.len() > 1 {
                    let path = PathBuf::from(parts[1..].join(" "));
                    self.set_status("Importing...");
                    self.pending.push_back(PendingOp::Import(path));
                } else {
                    self.set_status("Usage: :import <file.json>");
                }
            }
            "help" | "h" => {
                self.toggle_help();
            }
            _ => {
                self.set_status(format!("Unknown command: {}", parts[0]));
            }
        }
    }

    // =========================================================================
    // Pending store operations
    // =========================================================================

    /// Execute one queued store operation. Called by the run loop between
    /// frames; every failure degrades to a message, never a crash.
    pub async fn run_pending_op(&mut self, op: PendingOp) {
        use tracker_core::CampaignStore;

        match op {
            PendingOp::Persist => {
                if let Err(error) = self.registry.persist().await {
                    self.alert(
                        "Save Error",
                        format!("Failed to save data: {error}. No changes were saved."),
                    );
                }
            }
            PendingOp::CreateCampaign(name) => match self.registry.create(&name).await {
                Ok(()) => {
                    let _ = self.registry.select(name.trim());
                    self.list_cursor = 0;
                    self.set_status("Campaign created!");
                }
                Err(error) => self.set_status(error.to_string()),
            },
            PendingOp::DeleteCampaign(name) => match self.registry.delete(&name).await {
                Ok(()) => {
                    self.list_cursor = 0;
                    self.set_status("Campaign deleted!");
                }
                Err(error) => self.set_status(error.to_string()),
            },
            PendingOp::Export(dir) => {
                match CampaignStore::export(self.registry.collection(), &dir).await {
                    Ok(path) => self.set_status(format!("Exported to {}", path.display())),
                    Err(error) => {
                        self.alert("Export Error", format!("Export failed: {error}"));
                    }
                }
            }
            PendingOp::Import(path) => {
                let store = self.registry.store().clone();
                match store.import_file(&path).await {
                    Ok(collection) => {
                        // Reload application state from scratch, like the
                        // page reload after a browser import.
                        self.registry.replace_all(collection);
                        self.selected_tracker = TrackerKind::GameExpectations;
                        self.nav_cursor = 0;
                        self.list_cursor = 0;
                        self.close_all_overlays();
                        self.alert("Import Successful", "Campaign data was replaced.");
                    }
                    Err(error) => {
                        self.alert("Import Error", format!("Import failed: {error}"));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::{CampaignCollection, CampaignStore};

    fn app() -> App {
        let store = CampaignStore::new("test_campaigns.json");
        App::new(
            CampaignRegistry::new(store, CampaignCollection::new()),
            None,
        )
    }

    #[test]
    fn test_edit_buffer_is_unicode_safe() {
        let mut buffer = EditBuffer::with_text("héllo");
        assert_eq!(buffer.cursor, 5);
        buffer.left();
        buffer.backspace();
        assert_eq!(buffer.text, "hélo");
        buffer.insert('x');
        assert_eq!(buffer.text, "hélxo");
    }

    #[test]
    fn test_selecting_a_tracker_discards_overlays() {
        let mut app = app();
        app.push_overlay(Overlay::Help);
        app.select_tracker(TrackerKind::Npcs);
        assert!(!app.has_overlay());
        assert_eq!(app.selected_tracker, TrackerKind::Npcs);
    }

    #[test]
    fn test_status_fades_after_ticks() {
        let mut app = app();
        app.set_status("hello");
        for _ in 0..STATUS_TICKS {
            app.tick();
        }
        assert_eq!(app.status_message(), None);
    }

    #[test]
    fn test_unknown_command_reports() {
        let mut app = app();
        app.process_command(":frobnicate");
        assert!(app.status_message().unwrap().contains("Unknown command"));
    }

    #[test]
    fn test_quit_command() {
        let mut app = app();
        app.process_command(":q");
        assert!(app.should_quit);
    }

    #[test]
    fn test_import_command_requires_a_path() {
        let mut app = app();
        app.process_command(":import");
        assert!(app.status_message().unwrap().starts_with("Usage"));
        assert!(app.pending.is_empty());
    }
}
