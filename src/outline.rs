//! Outline view model.
//!
//! A compact grid → areas → cells summary derived purely from each grid's
//! fragments.  The outline never toggles overlays or selects nodes; the only
//! thing it may ask of the highlighter is a transient hover preview, and
//! [`OutlineHover`] is the only handle it gets for that.

use crate::grid::{Color, GridDescriptor, GridFragment, GridId, GridStore};
use crate::traits::{HighlighterBridge, Region};
use serde::Serialize;

/// Default cap on cells per grid before the outline gives up.
pub const DEFAULT_MAX_CELLS: usize = 1000;

/// Outline of one grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineGrid {
    pub id: GridId,
    pub color: Color,
    /// Set when the grid has more cells than the outline will draw;
    /// `fragments` is then empty.
    pub too_large: bool,
    pub fragments: Vec<OutlineFragment>,
}

/// Outline of one fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineFragment {
    pub index: usize,
    pub rows: usize,
    pub cols: usize,
    pub areas: Vec<OutlineArea>,
    /// Row-major.
    pub cells: Vec<OutlineCell>,
}

/// A named area and the cells it covers, as 1-based `(row, column)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineArea {
    pub name: String,
    pub cells: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineCell {
    pub row: u32,
    pub column: u32,
    /// Name of the area this cell belongs to.
    pub area: Option<String>,
}

/// Outline of every grid in `store`, in store order.
pub fn build(store: &GridStore, max_cells: usize) -> Vec<OutlineGrid> {
    store.iter().map(|grid| outline_grid(grid, max_cells)).collect()
}

fn outline_grid(grid: &GridDescriptor, max_cells: usize) -> OutlineGrid {
    let too_large = grid.cell_count() > max_cells;
    let fragments = if too_large {
        Vec::new()
    } else {
        grid.fragments
            .iter()
            .enumerate()
            .map(|(index, fragment)| outline_fragment(index, fragment))
            .collect()
    };
    OutlineGrid {
        id: grid.id,
        color: grid.color,
        too_large,
        fragments,
    }
}

fn outline_fragment(index: usize, fragment: &GridFragment) -> OutlineFragment {
    let rows = fragment.rows.len() as u32;
    let cols = fragment.cols.len() as u32;

    let mut cells = Vec::with_capacity(fragment.cell_count());
    for row in 1..=rows {
        for column in 1..=cols {
            cells.push(OutlineCell {
                row,
                column,
                area: fragment.area_at(row, column).map(|a| a.name.clone()),
            });
        }
    }

    // Areas reaching past the explicit tracks are clipped to them.
    let areas = fragment
        .areas
        .iter()
        .map(|area| OutlineArea {
            name: area.name.clone(),
            cells: cells
                .iter()
                .filter(|c| area.contains(c.row, c.column))
                .map(|c| (c.row, c.column))
                .collect(),
        })
        .collect();

    OutlineFragment {
        index,
        rows: rows as usize,
        cols: cols as usize,
        areas,
        cells,
    }
}

/// Whether `region` names something that exists in `grid`.
pub fn region_exists(grid: &GridDescriptor, region: &Region) -> bool {
    match region {
        Region::Area { name } => grid.fragments.iter().any(|f| f.area(name).is_some()),
        Region::Cell {
            fragment,
            row,
            column,
        } => grid
            .fragments
            .get(*fragment)
            .is_some_and(|f| f.has_cell(*row, *column)),
    }
}

/// Hover previews for the outline.
pub struct OutlineHover<'a, B: HighlighterBridge> {
    bridge: &'a B,
}

impl<'a, B: HighlighterBridge> OutlineHover<'a, B> {
    pub fn new(bridge: &'a B) -> Self {
        Self { bridge }
    }

    /// Preview `region` of `grid`, or clear the preview with `None`.
    pub fn preview(&self, grid: &GridDescriptor, region: Option<&Region>) -> Result<(), B::Error> {
        self.bridge.request_cell_or_area_highlight(grid.id, region)
    }
}
