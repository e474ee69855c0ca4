//! The per-frame view handed to a renderer.
//!
//! A [`PanelView`] is either the empty-state message or the populated panel
//! (grid list, display settings, outline).  It is plain data: a renderer
//! draws it and sends user actions back as [`Command`](crate::command::Command)s.

use crate::list::GridRow;
use crate::outline::OutlineGrid;
use crate::settings::{DisplayFlag, DisplaySettings, HighlighterSettings};
use serde::Serialize;

/// Shown instead of the panel when the page has no grid containers.
pub const NO_GRIDS_MESSAGE: &str = "CSS Grid is not in use on this page";

/// One checkbox of the display-settings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsToggle {
    pub flag: DisplayFlag,
    pub enabled: bool,
    /// The highlighter has not yet reported this value.
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsView {
    pub toggles: Vec<SettingsToggle>,
}

impl SettingsView {
    /// Checkbox state from the local settings, compared against the
    /// highlighter's mirrored snapshot.
    pub fn new(settings: &DisplaySettings, highlighter: &HighlighterSettings) -> Self {
        let toggles = DisplayFlag::ALL
            .iter()
            .map(|&flag| {
                let enabled = settings.get(flag);
                SettingsToggle {
                    flag,
                    enabled,
                    pending: enabled != highlighter.get(flag),
                }
            })
            .collect();
        Self { toggles }
    }

    pub fn toggle(&self, flag: DisplayFlag) -> Option<&SettingsToggle> {
        self.toggles.iter().find(|t| t.flag == flag)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PanelView {
    Empty {
        message: String,
    },
    Populated {
        grids: Vec<GridRow>,
        settings: SettingsView,
        outline: Vec<OutlineGrid>,
    },
}

impl PanelView {
    pub fn empty() -> Self {
        PanelView::Empty {
            message: NO_GRIDS_MESSAGE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PanelView::Empty { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_view_lists_every_flag_in_order() {
        let view = SettingsView::new(&DisplaySettings::default(), &HighlighterSettings::default());
        let flags: Vec<DisplayFlag> = view.toggles.iter().map(|t| t.flag).collect();
        assert_eq!(flags, DisplayFlag::ALL.to_vec());
        assert!(view.toggles.iter().all(|t| !t.enabled && !t.pending));
    }

    #[test]
    fn settings_view_marks_unconfirmed_values() {
        let settings = DisplaySettings::default().toggled(DisplayFlag::ShowGridAreas);
        let view = SettingsView::new(&settings, &HighlighterSettings::default());
        let areas = view.toggle(DisplayFlag::ShowGridAreas).unwrap();
        assert!(areas.enabled);
        assert!(areas.pending);

        let confirmed = HighlighterSettings {
            show_grid_areas_overlay: true,
            ..Default::default()
        };
        let view = SettingsView::new(&settings, &confirmed);
        assert!(!view.toggle(DisplayFlag::ShowGridAreas).unwrap().pending);
    }

    #[test]
    fn empty_view_serializes_message() {
        let json = serde_json::to_string(&PanelView::empty()).unwrap();
        assert_eq!(json, r#"{"Empty":{"message":"CSS Grid is not in use on this page"}}"#);
    }
}
