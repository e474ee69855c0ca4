//! Global grid display settings.
//!
//! [`DisplaySettings`] is shared by every grid on the page: the three
//! overlay toggles apply uniformly, and only line-name highlighting can be
//! overridden per grid.  The [`DisplaySettingsController`] is the single
//! owner of the value and the only place it changes.
//!
//! [`HighlighterSettings`] is the other side of the coin: a read-only mirror
//! of what the highlighter reports as active, pushed in from outside.

use crate::grid::GridId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the global boolean overlay toggles.
///
/// On the wire these are the snake_case names (`"show_grid_areas"`, …); any
/// other name fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayFlag {
    ShowGridAreas,
    ShowGridLineNumbers,
    ShowInfiniteLines,
}

impl DisplayFlag {
    pub const ALL: [DisplayFlag; 3] = [
        DisplayFlag::ShowGridAreas,
        DisplayFlag::ShowGridLineNumbers,
        DisplayFlag::ShowInfiniteLines,
    ];
}

impl fmt::Display for DisplayFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayFlag::ShowGridAreas => write!(f, "show_grid_areas"),
            DisplayFlag::ShowGridLineNumbers => write!(f, "show_grid_line_numbers"),
            DisplayFlag::ShowInfiniteLines => write!(f, "show_infinite_lines"),
        }
    }
}

/// Session-wide visualisation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub show_grid_areas: bool,
    pub show_grid_line_numbers: bool,
    pub show_infinite_lines: bool,
    /// Per-grid line-name highlighting overrides.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub line_names: BTreeMap<GridId, bool>,
}

impl DisplaySettings {
    pub fn get(&self, flag: DisplayFlag) -> bool {
        match flag {
            DisplayFlag::ShowGridAreas => self.show_grid_areas,
            DisplayFlag::ShowGridLineNumbers => self.show_grid_line_numbers,
            DisplayFlag::ShowInfiniteLines => self.show_infinite_lines,
        }
    }

    /// A copy with exactly `flag` flipped.
    pub fn toggled(&self, flag: DisplayFlag) -> Self {
        let mut next = self.clone();
        match flag {
            DisplayFlag::ShowGridAreas => next.show_grid_areas = !next.show_grid_areas,
            DisplayFlag::ShowGridLineNumbers => {
                next.show_grid_line_numbers = !next.show_grid_line_numbers
            }
            DisplayFlag::ShowInfiniteLines => next.show_infinite_lines = !next.show_infinite_lines,
        }
        next
    }

    /// A copy with the line-name override for `id` set, or cleared when
    /// `enabled` is `None`.
    pub fn with_line_names_override(&self, id: GridId, enabled: Option<bool>) -> Self {
        let mut next = self.clone();
        match enabled {
            Some(on) => {
                next.line_names.insert(id, on);
            }
            None => {
                next.line_names.remove(&id);
            }
        }
        next
    }

    /// Whether line names are highlighted for grid `id`.
    ///
    /// Without an override, line names follow `show_grid_line_numbers`.
    pub fn line_names_highlighted(&self, id: GridId) -> bool {
        self.line_names
            .get(&id)
            .copied()
            .unwrap_or(self.show_grid_line_numbers)
    }
}

/// Single owner of the current [`DisplaySettings`].
///
/// Every operation replaces the held value with a new one and returns it.
#[derive(Debug, Clone, Default)]
pub struct DisplaySettingsController {
    current: DisplaySettings,
}

impl DisplaySettingsController {
    pub fn new(initial: DisplaySettings) -> Self {
        Self { current: initial }
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.current
    }

    pub fn toggle(&mut self, flag: DisplayFlag) -> &DisplaySettings {
        self.current = self.current.toggled(flag);
        &self.current
    }

    pub fn toggle_show_grid_areas(&mut self) -> &DisplaySettings {
        self.toggle(DisplayFlag::ShowGridAreas)
    }

    pub fn toggle_show_grid_line_numbers(&mut self) -> &DisplaySettings {
        self.toggle(DisplayFlag::ShowGridLineNumbers)
    }

    pub fn toggle_show_infinite_lines(&mut self) -> &DisplaySettings {
        self.toggle(DisplayFlag::ShowInfiniteLines)
    }

    pub fn set_line_names_override(&mut self, id: GridId, enabled: Option<bool>) -> &DisplaySettings {
        self.current = self.current.with_line_names_override(id, enabled);
        &self.current
    }

    /// Drop line-name overrides for grids not accepted by `keep`.
    ///
    /// Returns `true` if anything was removed.
    pub fn retain_overrides<F>(&mut self, keep: F) -> bool
    where
        F: Fn(GridId) -> bool,
    {
        if self.current.line_names.keys().all(|id| keep(*id)) {
            return false;
        }
        let mut next = self.current.clone();
        next.line_names.retain(|id, _| keep(*id));
        self.current = next;
        true
    }
}

/// What the highlighter currently reports as active.
///
/// Owned by the highlighter service; the panel only mirrors it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlighterSettings {
    pub show_grid_areas_overlay: bool,
    pub show_grid_line_numbers: bool,
    pub show_infinite_lines: bool,
}

impl HighlighterSettings {
    pub fn get(&self, flag: DisplayFlag) -> bool {
        match flag {
            DisplayFlag::ShowGridAreas => self.show_grid_areas_overlay,
            DisplayFlag::ShowGridLineNumbers => self.show_grid_line_numbers,
            DisplayFlag::ShowInfiniteLines => self.show_infinite_lines,
        }
    }
}
