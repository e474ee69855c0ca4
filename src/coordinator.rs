//! The orchestrator that ties the grid store, the display settings and the
//! highlighter bridge together.
//!
//! [`GridCoordinator`] owns the [`GridStore`] and the
//! [`DisplaySettingsController`], reacts to [`Command`]s, and routes every
//! user action to the right [`HighlighterBridge`] call.
//!
//! # States
//!
//! The panel is [`PanelState::Empty`] while the store is empty and
//! [`PanelState::Populated`] otherwise.  Replacing a populated store with an
//! empty one cancels the overlay of every grid that was highlighted just
//! before, so no overlay is left orphaned on the page.  While empty, the
//! coordinator makes no other bridge calls.

use crate::command::Command;
use crate::grid::{Color, GridDescriptor, GridId, GridStore};
use crate::list::{self, GridList};
use crate::outline::{self, OutlineHover, DEFAULT_MAX_CELLS};
use crate::settings::{DisplayFlag, DisplaySettings, DisplaySettingsController, HighlighterSettings};
use crate::traits::{HighlighterBridge, Region};
use crate::view::{PanelView, SettingsView};
use log::{debug, info, warn};
use std::fmt;

/// Fatal errors from the coordinator.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// The input broke an invariant (e.g. duplicate grid ids).  Nothing was
    /// changed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// The highlighter bridge returned an error.  Local state is unchanged.
    #[error("highlighter bridge error: {0}")]
    Bridge(String),
}

/// Whether there is anything to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Empty,
    Populated,
}

/// Why an action was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The grid id is not in the current store.
    UnknownGrid,
    /// The grid exists but has no such area or cell.
    UnknownRegion,
    /// The panel is empty, so nothing is sent to the highlighter.
    PanelEmpty,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::UnknownGrid => write!(f, "unknown grid"),
            IgnoreReason::UnknownRegion => write!(f, "unknown region"),
            IgnoreReason::PanelEmpty => write!(f, "panel is empty"),
        }
    }
}

/// The user action behind an [`IgnoredCall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleGrid,
    SetGridColor,
    SelectNode,
    HoverRow,
    LeaveRow,
    ToggleDisplay,
    SetLineNamesOverride,
    HoverOutline,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::ToggleGrid => "toggle grid",
            Action::SetGridColor => "set colour",
            Action::SelectNode => "select node",
            Action::HoverRow => "hover row",
            Action::LeaveRow => "leave row",
            Action::ToggleDisplay => "toggle display",
            Action::SetLineNamesOverride => "line names",
            Action::HoverOutline => "hover outline",
        };
        f.write_str(name)
    }
}

/// A dropped action.  Non-fatal: logged and counted, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredCall {
    pub action: Action,
    pub grid: Option<GridId>,
    pub reason: IgnoreReason,
}

/// Result of a non-failing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoredCall),
}

/// Orchestrates grid overlays for one inspector panel.
///
/// Generic over any [`HighlighterBridge`], so it has no idea whether the
/// highlighter is in-process, behind a socket, or a test recorder.
///
/// # Typical usage
///
/// ```ignore
/// let mut coordinator = GridCoordinator::new(bridge, DisplaySettings::default());
/// coordinator.update_grids(grids_from_page)?;
/// coordinator.handle(Command::ToggleGrid(GridId(1)))?;
/// let frame = coordinator.view();
/// ```
pub struct GridCoordinator<B: HighlighterBridge> {
    bridge: B,
    store: GridStore,
    settings: DisplaySettingsController,
    highlighter: HighlighterSettings,
    outline_max_cells: usize,
    ignored: usize,
}

impl<B: HighlighterBridge> GridCoordinator<B> {
    /// Create an empty coordinator with the given initial display settings.
    pub fn new(bridge: B, initial: DisplaySettings) -> Self {
        Self {
            bridge,
            store: GridStore::default(),
            settings: DisplaySettingsController::new(initial),
            highlighter: HighlighterSettings::default(),
            outline_max_cells: DEFAULT_MAX_CELLS,
            ignored: 0,
        }
    }

    /// Cap on cells per grid before the outline reports it as too large.
    pub fn set_outline_max_cells(&mut self, max_cells: usize) {
        self.outline_max_cells = max_cells;
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn settings(&self) -> &DisplaySettings {
        self.settings.settings()
    }

    pub fn highlighter_settings(&self) -> &HighlighterSettings {
        &self.highlighter
    }

    pub fn state(&self) -> PanelState {
        if self.store.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Populated
        }
    }

    /// Number of actions dropped so far.
    pub fn ignored_count(&self) -> usize {
        self.ignored
    }

    /// Process a single [`Command`].
    ///
    /// [`Command::Render`] changes nothing; call [`view`](Self::view) for the
    /// frame.
    pub fn handle(&mut self, cmd: Command) -> Result<Outcome, CoordinatorError> {
        match cmd {
            Command::UpdateGrids(grids) => {
                self.update_grids(grids)?;
                Ok(Outcome::Applied)
            }
            Command::UpdateHighlighterSettings(snapshot) => {
                self.update_highlighter_settings(snapshot);
                Ok(Outcome::Applied)
            }
            Command::ToggleGrid(id) => self.toggle_grid(id),
            Command::SetGridColor { id, color } => self.set_grid_color(id, color),
            Command::SelectNode(id) => self.select_node(id),
            Command::HoverRow(id) => self.hover_row(id),
            Command::LeaveRow => self.leave_row(),
            Command::ToggleDisplay(flag) => self.toggle_display(flag),
            Command::SetLineNamesOverride { id, enabled } => {
                self.set_line_names_override(id, enabled)
            }
            Command::HoverArea { id, area } => {
                self.hover_region(id, Some(Region::Area { name: area }))
            }
            Command::HoverCell {
                id,
                fragment,
                row,
                column,
            } => self.hover_region(
                id,
                Some(Region::Cell {
                    fragment,
                    row,
                    column,
                }),
            ),
            Command::LeaveOutline(id) => self.hover_region(id, None),
            Command::Render => Ok(Outcome::Applied),
        }
    }

    //  Pushes

    /// Replace the full list of grid containers.
    ///
    /// Duplicate ids reject the whole list and leave the previous store in
    /// place.  Moving from populated to empty cancels every overlay that was
    /// highlighted before the replacement; a cancel that fails is logged and
    /// the sweep carries on.
    ///
    /// The current display settings are pushed to the bridge when the panel
    /// becomes populated, and again whenever line-name overrides are dropped
    /// for grids that vanished.
    pub fn update_grids(&mut self, grids: Vec<GridDescriptor>) -> Result<PanelState, CoordinatorError> {
        let next = GridStore::new(grids).map_err(|e| {
            warn!("rejected grid list: {}", e);
            CoordinatorError::InvariantViolation(e.to_string())
        })?;

        let before = self.state();
        if next.is_empty() && before == PanelState::Populated {
            for id in self.store.highlighted_ids() {
                debug!("cancel orphaned overlay {}", id);
                if let Err(e) = self.bridge.cancel_overlay(id) {
                    warn!("cancel overlay {} failed: {}", id, e);
                }
            }
        }

        self.store = next;
        let store = &self.store;
        let pruned = self.settings.retain_overrides(|id| store.contains(id));
        if pruned {
            debug!("dropped line-name overrides for vanished grids");
        }

        let after = self.state();
        if before != after {
            info!("panel {:?} -> {:?}", before, after);
        }
        // An empty panel stays silent; the next populated push resyncs.
        if after == PanelState::Populated && (before == PanelState::Empty || pruned) {
            if let Err(e) = self.bridge.update_display_settings(self.settings.settings()) {
                warn!("display settings push failed: {}", e);
            }
        }
        debug!("{} grid(s), {} highlighted", self.store.count(), self.store.highlighted_ids().len());
        Ok(after)
    }

    /// Replace the mirrored highlighter snapshot.
    pub fn update_highlighter_settings(&mut self, snapshot: HighlighterSettings) {
        debug!("highlighter settings {:?}", snapshot);
        self.highlighter = snapshot;
    }

    //  Grid list

    /// Request the grid's overlay if it is off, cancel it if it is on.
    pub fn toggle_grid(&mut self, id: GridId) -> Result<Outcome, CoordinatorError> {
        let Some(grid) = self.store.find_by_id(id) else {
            return Ok(self.ignore(Action::ToggleGrid, Some(id), IgnoreReason::UnknownGrid));
        };
        let updated = GridList::new(&self.bridge)
            .toggle(grid)
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        info!("grid {} overlay {}", id, if updated.highlighted { "on" } else { "off" });
        self.replace_descriptor(updated);
        Ok(Outcome::Applied)
    }

    /// Recolour the grid's overlay without turning it on or off.
    pub fn set_grid_color(&mut self, id: GridId, color: Color) -> Result<Outcome, CoordinatorError> {
        let Some(grid) = self.store.find_by_id(id) else {
            return Ok(self.ignore(Action::SetGridColor, Some(id), IgnoreReason::UnknownGrid));
        };
        let updated = GridList::new(&self.bridge)
            .set_color(grid, color)
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        self.replace_descriptor(updated);
        Ok(Outcome::Applied)
    }

    pub fn select_node(&mut self, id: GridId) -> Result<Outcome, CoordinatorError> {
        let Some(grid) = self.store.find_by_id(id) else {
            return Ok(self.ignore(Action::SelectNode, Some(id), IgnoreReason::UnknownGrid));
        };
        GridList::new(&self.bridge)
            .select(grid)
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        Ok(Outcome::Applied)
    }

    pub fn hover_row(&mut self, id: GridId) -> Result<Outcome, CoordinatorError> {
        let Some(grid) = self.store.find_by_id(id) else {
            return Ok(self.ignore(Action::HoverRow, Some(id), IgnoreReason::UnknownGrid));
        };
        GridList::new(&self.bridge)
            .hover(grid)
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        Ok(Outcome::Applied)
    }

    pub fn leave_row(&mut self) -> Result<Outcome, CoordinatorError> {
        if self.state() == PanelState::Empty {
            return Ok(self.ignore(Action::LeaveRow, None, IgnoreReason::PanelEmpty));
        }
        GridList::new(&self.bridge)
            .leave()
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        Ok(Outcome::Applied)
    }

    //  Display settings

    /// Flip one global display toggle and pass the new settings on.
    pub fn toggle_display(&mut self, flag: DisplayFlag) -> Result<Outcome, CoordinatorError> {
        if self.state() == PanelState::Empty {
            return Ok(self.ignore(Action::ToggleDisplay, None, IgnoreReason::PanelEmpty));
        }
        // The bridge sees the new value first; it is adopted only if that
        // call succeeds.
        let next = self.settings.settings().toggled(flag);
        self.bridge
            .update_display_settings(&next)
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        self.settings.toggle(flag);
        info!("{} -> {}", flag, self.settings().get(flag));
        Ok(Outcome::Applied)
    }

    pub fn toggle_show_grid_areas(&mut self) -> Result<Outcome, CoordinatorError> {
        self.toggle_display(DisplayFlag::ShowGridAreas)
    }

    pub fn toggle_show_grid_line_numbers(&mut self) -> Result<Outcome, CoordinatorError> {
        self.toggle_display(DisplayFlag::ShowGridLineNumbers)
    }

    pub fn toggle_show_infinite_lines(&mut self) -> Result<Outcome, CoordinatorError> {
        self.toggle_display(DisplayFlag::ShowInfiniteLines)
    }

    /// Set or clear the line-name override of one grid.
    pub fn set_line_names_override(
        &mut self,
        id: GridId,
        enabled: Option<bool>,
    ) -> Result<Outcome, CoordinatorError> {
        if !self.store.contains(id) {
            return Ok(self.ignore(Action::SetLineNamesOverride, Some(id), IgnoreReason::UnknownGrid));
        }
        let next = self.settings.settings().with_line_names_override(id, enabled);
        self.bridge
            .update_display_settings(&next)
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        self.settings.set_line_names_override(id, enabled);
        Ok(Outcome::Applied)
    }

    //  Outline

    /// Preview part of a grid, or clear the preview with `None`.
    pub fn hover_region(&mut self, id: GridId, region: Option<Region>) -> Result<Outcome, CoordinatorError> {
        let Some(grid) = self.store.find_by_id(id) else {
            return Ok(self.ignore(Action::HoverOutline, Some(id), IgnoreReason::UnknownGrid));
        };
        if let Some(region) = &region {
            if !outline::region_exists(grid, region) {
                return Ok(self.ignore(Action::HoverOutline, Some(id), IgnoreReason::UnknownRegion));
            }
        }
        OutlineHover::new(&self.bridge)
            .preview(grid, region.as_ref())
            .map_err(|e| CoordinatorError::Bridge(e.to_string()))?;
        Ok(Outcome::Applied)
    }

    //  Rendering

    /// The frame for the current state.
    pub fn view(&self) -> PanelView {
        if self.store.is_empty() {
            return PanelView::empty();
        }
        let settings = self.settings.settings();
        PanelView::Populated {
            grids: list::rows(&self.store, settings),
            settings: SettingsView::new(settings, &self.highlighter),
            outline: outline::build(&self.store, self.outline_max_cells),
        }
    }

    //  Internal helpers

    fn replace_descriptor(&mut self, updated: GridDescriptor) {
        let id = updated.id;
        if let Some(next) = self.store.with_updated(id, |_| updated) {
            self.store = next;
        }
    }

    fn ignore(&mut self, action: Action, grid: Option<GridId>, reason: IgnoreReason) -> Outcome {
        match grid {
            Some(id) => warn!("ignored {} for grid {}: {}", action, id, reason),
            None => warn!("ignored {}: {}", action, reason),
        }
        self.ignored += 1;
        Outcome::Ignored(IgnoredCall {
            action,
            grid,
            reason,
        })
    }
}

//  Tests
