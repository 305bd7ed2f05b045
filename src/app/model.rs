use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::dispatch::{ActionRequest, Command, RequestToken, TokenSequence};
use crate::editor::EditorBuffer;
use crate::selection::{Anchor, Selection, SelectionTracker};

use super::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Page currently shown
    pub route: Route,
    /// Text typed into the login form
    pub login_input: String,
    /// Name entered on the login page
    pub user: Option<String>,
    /// The dashboard's editable text
    pub editor: EditorBuffer,
    /// Index of the first visible editor line
    pub editor_scroll: usize,
    /// Terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// Stored selection and popup anchor
    pub tracker: SelectionTracker,
    /// Request tokens; only the latest issued may apply its result
    pub tokens: TokenSequence,
    /// Command of the dispatch still awaited, for the status bar
    pub in_flight: Option<Command>,
    /// Request built by `update`, waiting for the event loop to send it
    outgoing: Option<(RequestToken, ActionRequest)>,
    /// Whether a mouse press started inside the editor and is still held
    pub pointer_held: bool,
    /// Endpoint shown in the status bar
    pub endpoint: String,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("route", &self.route)
            .field("editor", &self.editor)
            .field("selection", &self.tracker.current())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model on the entry route.
    pub fn new(terminal_size: (u16, u16)) -> Self {
        Self {
            terminal_size,
            ..Self::default()
        }
    }

    /// Start on `route` (after redirects).
    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route.resolve();
        self
    }

    /// Screen rectangle holding the editor text.
    pub fn editor_area(&self) -> Rect {
        let (width, height) = self.terminal_size;
        crate::ui::editor_text_area(Rect::new(0, 0, width, height))
    }

    /// The popup is visible iff a selection is stored.
    pub const fn popup_visible(&self) -> bool {
        self.tracker.is_active()
    }

    pub const fn selection(&self) -> Option<&Selection> {
        self.tracker.current()
    }

    pub fn popup_anchor(&self) -> Option<Anchor> {
        self.tracker.anchor()
    }

    /// Build the request for `command` from the stored selection.
    ///
    /// Returns the token it was issued under, or `None` without a selection.
    pub(super) fn queue_action(&mut self, command: Command) -> Option<RequestToken> {
        let text = self.tracker.current()?.text.clone();
        let token = self.tokens.issue();
        self.outgoing = Some((token, ActionRequest::new(text, command)));
        self.in_flight = Some(command);
        Some(token)
    }

    /// Hand the queued request to the caller that will send it.
    pub fn take_outgoing(&mut self) -> Option<(RequestToken, ActionRequest)> {
        self.outgoing.take()
    }

    /// Keep the cursor line inside the editor viewport.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor_line = self.editor.cursor().line;
        let visible_height = usize::from(self.editor_area().height);
        if visible_height == 0 {
            self.editor_scroll = cursor_line;
            return;
        }
        if cursor_line < self.editor_scroll {
            self.editor_scroll = cursor_line;
        } else if cursor_line >= self.editor_scroll + visible_height {
            self.editor_scroll = cursor_line + 1 - visible_height;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            route: Route::Entry.resolve(),
            login_input: String::new(),
            user: None,
            editor: EditorBuffer::empty(),
            editor_scroll: 0,
            terminal_size: (80, 24),
            tracker: SelectionTracker::new(),
            tokens: TokenSequence::new(),
            in_flight: None,
            outgoing: None,
            pointer_held: false,
            endpoint: crate::dispatch::DEFAULT_ENDPOINT.to_string(),
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            toast: None,
            should_quit: false,
        }
    }
}
