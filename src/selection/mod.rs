//! Selection tracking for the action popup.
//!
//! The tracker reacts to pointer-release events only. It asks a
//! [`SelectionProvider`] for the active selection and, when the selection
//! holds visible text, stores it together with the anchor point where the
//! action popup is drawn.

mod editor;

pub use editor::BufferSelection;

/// Vertical distance between the top of a selection and its popup anchor.
pub const ANCHOR_OFFSET: i32 = 10;

/// Bounding rectangle of a selection range, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Where the action popup is drawn, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    /// Anchor for a selection rectangle at the given vertical scroll offset.
    pub const fn for_rect(rect: SelectionRect, scroll_y: i32) -> Self {
        Self {
            x: rect.left,
            y: rect.top + scroll_y + ANCHOR_OFFSET,
        }
    }
}

/// The stored selection: its text and the popup anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub anchor: Anchor,
}

/// Read access to the platform's active text selection.
pub trait SelectionProvider {
    /// Text of the active selection, if any.
    fn selected_text(&self) -> Option<String>;

    /// Bounding rectangle of the first selection range.
    fn first_range_rect(&self) -> Option<SelectionRect>;
}

/// Holds at most one [`Selection`]. The popup is visible iff one is stored.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    current: Option<Selection>,
}

impl SelectionTracker {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Re-read the selection after a pointer release.
    ///
    /// Stores the selection when its trimmed text is non-empty and the
    /// provider reports a range; clears it otherwise.
    pub fn on_pointer_up(
        &mut self,
        provider: &dyn SelectionProvider,
        scroll_y: i32,
    ) -> Option<&Selection> {
        let text = provider
            .selected_text()
            .filter(|text| !text.trim().is_empty());
        let Some((text, rect)) = text.zip(provider.first_range_rect()) else {
            if self.current.take().is_some() {
                tracing::debug!("selection cleared");
            }
            return None;
        };
        let anchor = Anchor::for_rect(rect, scroll_y);
        tracing::debug!(
            chars = text.chars().count(),
            x = anchor.x,
            y = anchor.y,
            "selection stored"
        );
        self.current = Some(Selection { text, anchor });
        self.current.as_ref()
    }

    pub const fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.current.as_ref().map(|sel| sel.anchor)
    }

    pub const fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct FakeSelection {
        text: Option<String>,
        rect: Option<SelectionRect>,
    }

    impl SelectionProvider for FakeSelection {
        fn selected_text(&self) -> Option<String> {
            self.text.clone()
        }

        fn first_range_rect(&self) -> Option<SelectionRect> {
            self.rect
        }
    }

    fn fake(text: &str, left: i32, top: i32) -> FakeSelection {
        FakeSelection {
            text: Some(text.to_string()),
            rect: Some(SelectionRect {
                left,
                top,
                width: 5,
                height: 1,
            }),
        }
    }

    #[test]
    fn test_selection_is_stored_with_offset_anchor() {
        let mut tracker = SelectionTracker::new();
        let sel = tracker.on_pointer_up(&fake("hello", 4, 2), 3).cloned();
        assert_eq!(
            sel,
            Some(Selection {
                text: "hello".to_string(),
                anchor: Anchor { x: 4, y: 15 },
            })
        );
        assert!(tracker.is_active());
    }

    #[test]
    fn test_whitespace_selection_clears_previous() {
        let mut tracker = SelectionTracker::new();
        tracker.on_pointer_up(&fake("hello", 0, 0), 0);
        assert!(tracker.on_pointer_up(&fake("  \n\t", 0, 0), 0).is_none());
        assert!(tracker.anchor().is_none());
    }

    #[test]
    fn test_missing_range_clears_selection() {
        let mut tracker = SelectionTracker::new();
        tracker.on_pointer_up(&fake("hello", 0, 0), 0);
        let provider = FakeSelection {
            text: Some("hello".to_string()),
            rect: None,
        };
        assert!(tracker.on_pointer_up(&provider, 0).is_none());
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_stored_text_keeps_surrounding_whitespace() {
        let mut tracker = SelectionTracker::new();
        tracker.on_pointer_up(&fake(" word ", 0, 0), 0);
        assert_eq!(tracker.current().map(|s| s.text.as_str()), Some(" word "));
    }

    proptest! {
        #[test]
        fn prop_anchor_tracks_rect_and_scroll(
            text in "[a-z]{1,12}",
            left in 0i32..500,
            top in 0i32..500,
            scroll in 0i32..10_000,
        ) {
            let mut tracker = SelectionTracker::new();
            tracker.on_pointer_up(&fake(&text, left, top), scroll);
            prop_assert_eq!(tracker.anchor(), Some(Anchor { x: left, y: top + scroll + 10 }));
        }

        #[test]
        fn prop_blank_selection_hides_popup(blank in "[ \t\n]{0,8}", scroll in 0i32..100) {
            let mut tracker = SelectionTracker::new();
            tracker.on_pointer_up(&fake("seed", 1, 1), 0);
            tracker.on_pointer_up(&fake(&blank, 1, 1), scroll);
            prop_assert!(tracker.anchor().is_none());
        }
    }
}
