//! The events gridlens reacts to.
//!
//! A [`Command`] is either a push from the page side (a fresh grid list, a
//! fresh highlighter snapshot) or a user action on one of the panel's views.
//! Commands arrive as externally tagged JSON, one per line:
//!
//! ```json
//! {"UpdateGrids":[{"id":1,"node":"actor-1","color":"#9400ff"}]}
//! {"ToggleGrid":1}
//! {"SetGridColor":{"id":1,"color":"#ff0000"}}
//! {"ToggleDisplay":"show_grid_areas"}
//! {"HoverCell":{"id":1,"fragment":0,"row":2,"column":1}}
//! "LeaveRow"
//! ```

use crate::grid::{Color, GridDescriptor, GridId};
use crate::settings::{DisplayFlag, HighlighterSettings};
use serde::{Deserialize, Serialize};

/// Every input the coordinator accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    //  Pushes from the page side

    /// Replace the full list of grid containers.
    UpdateGrids(Vec<GridDescriptor>),

    /// Replace the mirrored highlighter snapshot.
    UpdateHighlighterSettings(HighlighterSettings),

    //  Grid list

    /// Turn the overlay of a grid on if it is off, off if it is on.
    ToggleGrid(GridId),

    /// Change the overlay tint of a grid, whether or not it is showing.
    SetGridColor { id: GridId, color: Color },

    /// Select the grid's node in the inspector.
    SelectNode(GridId),

    /// Pointer entered a grid row: preview the node's box model.
    HoverRow(GridId),

    /// Pointer left the grid rows.
    LeaveRow,

    //  Display settings

    /// Flip one of the global display toggles.
    ToggleDisplay(DisplayFlag),

    /// Set (`Some`) or clear (`None`) the line-name override of one grid.
    SetLineNamesOverride {
        id: GridId,
        #[serde(default)]
        enabled: Option<bool>,
    },

    //  Outline

    /// Pointer entered a named area in the outline.
    HoverArea { id: GridId, area: String },

    /// Pointer entered a cell in the outline.
    HoverCell {
        id: GridId,
        fragment: usize,
        row: u32,
        column: u32,
    },

    /// Pointer left the outline of a grid.
    LeaveOutline(GridId),

    /// Emit the current frame.  The coordinator's state does not change.
    Render,
}
