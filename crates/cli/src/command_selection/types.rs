//! Type definitions for spell selection and UI state.

use std::fmt::{Display, Formatter};

use grimoire_core::spells::SpellEntry;

/// Represents the user's choice in the spell picker.
pub enum SpellChoice {
    /// Index into the displayed spell list.
    Index(usize),
    Quit,
}

/// Direction to cycle through spells in the selection UI.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// A spell as presented by the picker: the record filename plus its entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellForDisplay {
    pub filename: String,
    pub entry: SpellEntry,
}

impl Display for SpellForDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.entry.name.is_empty() {
            // Fall back to the filename for records without a name field.
            f.write_str(&self.filename)
        } else {
            write!(f, "{}", self.entry)
        }
    }
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the spell list when there are more spells
/// than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the spell selection interface.
///
/// Maintains all state needed to render and interact with the picker,
/// including current selection, viewport, and filter state.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Currently selected position in the displayed list
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}
