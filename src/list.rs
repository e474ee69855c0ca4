//! Grid list view model.
//!
//! One [`GridRow`] per known grid, in store order, each carrying the state
//! of its overlay toggle.  [`GridList`] holds the row actions: it is the
//! only surface that turns overlays on or off, recolours them, or selects
//! the grid's node.

use crate::grid::{Color, GridDescriptor, GridId, GridStore};
use crate::settings::DisplaySettings;
use crate::traits::HighlighterBridge;
use log::debug;
use serde::Serialize;

/// Display data for one row of the grid list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub id: GridId,
    pub color: Color,
    pub highlighted: bool,
    pub label: String,
    pub line_names_highlighted: bool,
}

/// Rows for every grid in `store`, in store order.
pub fn rows(store: &GridStore, settings: &DisplaySettings) -> Vec<GridRow> {
    store
        .iter()
        .map(|grid| GridRow {
            id: grid.id,
            color: grid.color,
            highlighted: grid.highlighted,
            label: grid.label(),
            line_names_highlighted: settings.line_names_highlighted(grid.id),
        })
        .collect()
}

/// Row actions, backed by a highlighter bridge.
///
/// Every action that changes a grid returns the replacement descriptor; the
/// caller decides where it goes.
pub struct GridList<'a, B: HighlighterBridge> {
    bridge: &'a B,
}

impl<'a, B: HighlighterBridge> GridList<'a, B> {
    pub fn new(bridge: &'a B) -> Self {
        Self { bridge }
    }

    /// Request the overlay if it is off, cancel it if it is on.
    ///
    /// Exactly one bridge call is made.  After a request the new
    /// `highlighted` value is whatever the bridge acknowledged.
    pub fn toggle(&self, grid: &GridDescriptor) -> Result<GridDescriptor, B::Error> {
        if grid.highlighted {
            debug!("cancel overlay {}", grid.id);
            self.bridge.cancel_overlay(grid.id)?;
            Ok(grid.with_highlighted(false))
        } else {
            debug!("request overlay {} ({})", grid.id, grid.color);
            let active = self.bridge.request_overlay(grid.id, grid.color)?;
            Ok(grid.with_highlighted(active))
        }
    }

    /// Recolour the overlay.  The active state is left alone.
    pub fn set_color(&self, grid: &GridDescriptor, color: Color) -> Result<GridDescriptor, B::Error> {
        debug!("set overlay {} colour {}", grid.id, color);
        self.bridge.set_overlay_color(grid.id, color)?;
        Ok(grid.with_color(color))
    }

    pub fn select(&self, grid: &GridDescriptor) -> Result<(), B::Error> {
        self.bridge.select_node(&grid.node)
    }

    pub fn hover(&self, grid: &GridDescriptor) -> Result<(), B::Error> {
        self.bridge.show_box_model(&grid.node)
    }

    pub fn leave(&self) -> Result<(), B::Error> {
        self.bridge.hide_box_model()
    }
}
