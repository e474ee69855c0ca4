//! Grid containers known to the panel.
//!
//! A [`GridDescriptor`] describes one CSS grid container on the inspected
//! page.  The [`GridStore`] holds the complete, ordered set of descriptors
//! pushed by the page side.  The store is never edited in place: every
//! change (a new push, or a single descriptor's `highlighted` flag flipping)
//! produces a fresh store value, so a reader always sees either the old
//! complete list or the new one.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Page-stable identifier of a grid container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridId(pub u32);

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque lookup key for the page element behind a grid.
///
/// The panel never owns the element; it only hands this key back to the
/// highlighter when asking it to select or preview the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(pub String);

impl NodeRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Overlay tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Tint used when the page side does not assign one.
    pub const DEFAULT: Color = Color::rgb(0x94, 0x00, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error from parsing a `#rrggbb` / `#rgb` colour string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour: {0:?}")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#rrggbb` or the short `#rgb` form (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // `#abc` is shorthand for `#aabbcc`.
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 0x11);
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

//  Geometry

/// One row or column track of a grid fragment, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTrack {
    pub start: f64,
    pub breadth: f64,
}

/// A named grid area.
///
/// Bounds are CSS grid line numbers: 1-based, end-exclusive.  An area with
/// `row_start: 1, row_end: 3` covers rows 1 and 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridArea {
    pub name: String,
    pub row_start: u32,
    pub row_end: u32,
    pub column_start: u32,
    pub column_end: u32,
}

impl GridArea {
    /// Whether the cell at 1-based `(row, column)` lies inside this area.
    pub fn contains(&self, row: u32, column: u32) -> bool {
        (self.row_start..self.row_end).contains(&row)
            && (self.column_start..self.column_end).contains(&column)
    }
}

/// Geometry of one fragment of a grid container.
///
/// A grid split across columns or pages has several fragments.  The panel
/// only iterates these for the outline; it never computes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridFragment {
    pub rows: Vec<GridTrack>,
    pub cols: Vec<GridTrack>,
    pub areas: Vec<GridArea>,
}

impl GridFragment {
    /// Number of cells (`rows × cols`).
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    /// Whether 1-based `(row, column)` addresses a cell of this fragment.
    pub fn has_cell(&self, row: u32, column: u32) -> bool {
        row >= 1 && column >= 1 && row as usize <= self.rows.len() && column as usize <= self.cols.len()
    }

    pub fn area(&self, name: &str) -> Option<&GridArea> {
        self.areas.iter().find(|a| a.name == name)
    }

    /// The area covering 1-based `(row, column)`, if any.
    pub fn area_at(&self, row: u32, column: u32) -> Option<&GridArea> {
        self.areas.iter().find(|a| a.contains(row, column))
    }
}

//  Descriptor

/// One grid container on the inspected page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDescriptor {
    pub id: GridId,
    pub node: NodeRef,
    /// Display name of the node (e.g. `div#page.main`), when the page side
    /// provides one.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Color,
    /// Whether this grid's overlay is currently requested.
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub fragments: Vec<GridFragment>,
}

impl GridDescriptor {
    pub fn new(id: GridId, node: NodeRef) -> Self {
        Self {
            id,
            node,
            name: None,
            color: Color::DEFAULT,
            highlighted: false,
            fragments: Vec::new(),
        }
    }

    /// Copy of this descriptor with `highlighted` set to `on`.
    pub fn with_highlighted(&self, on: bool) -> Self {
        Self {
            highlighted: on,
            ..self.clone()
        }
    }

    /// Copy of this descriptor with a new overlay tint.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// Row label: the node's display name, or `grid <id>` when unknown.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("grid {}", self.id),
        }
    }

    /// Total cells across all fragments.
    pub fn cell_count(&self) -> usize {
        self.fragments.iter().map(GridFragment::cell_count).sum()
    }
}

//  Store

/// Errors raised when building a [`GridStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate grid id {0}")]
    DuplicateId(GridId),
}

/// The complete, ordered set of known grid containers.
///
/// Order is the order the descriptors were pushed in and is never changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridStore {
    grids: Vec<GridDescriptor>,
}

impl GridStore {
    /// Build a store from a full descriptor list.
    ///
    /// Fails without building anything if two descriptors share an id.
    pub fn new(grids: Vec<GridDescriptor>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(grids.len());
        for grid in &grids {
            if !seen.insert(grid.id) {
                return Err(StoreError::DuplicateId(grid.id));
            }
        }
        Ok(Self { grids })
    }

    pub fn count(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Descriptors in push order.
    pub fn iter(&self) -> impl Iterator<Item = &GridDescriptor> {
        self.grids.iter()
    }

    pub fn find_by_id(&self, id: GridId) -> Option<&GridDescriptor> {
        self.grids.iter().find(|g| g.id == id)
    }

    pub fn contains(&self, id: GridId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Ids of every descriptor whose overlay is currently requested.
    pub fn highlighted_ids(&self) -> Vec<GridId> {
        self.grids
            .iter()
            .filter(|g| g.highlighted)
            .map(|g| g.id)
            .collect()
    }

    /// A new store where the descriptor `id` is replaced by `update(old)`.
    ///
    /// Returns `None` if `id` is unknown.  The replacement keeps its
    /// position; its id must not change.
    pub fn with_updated<F>(&self, id: GridId, update: F) -> Option<Self>
    where
        F: FnOnce(&GridDescriptor) -> GridDescriptor,
    {
        let index = self.grids.iter().position(|g| g.id == id)?;
        let mut grids = self.grids.clone();
        let replacement = update(&grids[index]);
        debug_assert_eq!(replacement.id, id);
        grids[index] = replacement;
        Some(Self { grids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(id: u32, highlighted: bool) -> GridDescriptor {
        GridDescriptor {
            highlighted,
            ..GridDescriptor::new(GridId(id), NodeRef::new(format!("node-{}", id)))
        }
    }

    #[test]
    fn store_preserves_push_order() {
        let store = GridStore::new(vec![grid(3, false), grid(1, true), grid(2, false)]).unwrap();
        let ids: Vec<u32> = store.iter().map(|g| g.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(store.count(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn store_rejects_duplicate_ids() {
        let err = GridStore::new(vec![grid(1, false), grid(2, false), grid(1, true)]).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(GridId(1)));
    }

    #[test]
    fn empty_store() {
        let store = GridStore::default();
        assert!(store.is_empty());
        assert_eq!(store.count(), 0);
        assert!(store.find_by_id(GridId(1)).is_none());
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let store = GridStore::new(vec![grid(1, false), grid(2, true)]).unwrap();
        assert!(store.find_by_id(GridId(2)).unwrap().highlighted);
        assert!(store.find_by_id(GridId(9)).is_none());
    }

    #[test]
    fn with_updated_leaves_original_untouched() {
        let store = GridStore::new(vec![grid(1, false), grid(2, false)]).unwrap();
        let next = store
            .with_updated(GridId(2), |g| g.with_highlighted(true))
            .unwrap();
        assert!(!store.find_by_id(GridId(2)).unwrap().highlighted);
        assert!(next.find_by_id(GridId(2)).unwrap().highlighted);
        assert_eq!(next.highlighted_ids(), vec![GridId(2)]);
        assert!(store.with_updated(GridId(7), |g| g.clone()).is_none());
    }

    #[test]
    fn color_parse_and_display() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("#FF8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("#f80".parse::<Color>().unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::rgb(1, 2, 255).to_string(), "#0102ff");
        assert!("ff8000".parse::<Color>().is_err());
        assert!("#ff80".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn descriptor_defaults_from_json() {
        let json = r#"{ "id": 4, "node": "actor-4" }"#;
        let d: GridDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.id, GridId(4));
        assert_eq!(d.node, NodeRef::new("actor-4"));
        assert_eq!(d.color, Color::DEFAULT);
        assert!(!d.highlighted);
        assert!(d.fragments.is_empty());
        assert_eq!(d.label(), "grid 4");
    }

    #[test]
    fn label_prefers_node_name() {
        let d = GridDescriptor {
            name: Some("div#page".into()),
            ..grid(1, false)
        };
        assert_eq!(d.label(), "div#page");
    }

    #[test]
    fn area_bounds_are_end_exclusive() {
        let area = GridArea {
            name: "header".into(),
            row_start: 1,
            row_end: 2,
            column_start: 1,
            column_end: 4,
        };
        assert!(area.contains(1, 1));
        assert!(area.contains(1, 3));
        assert!(!area.contains(1, 4));
        assert!(!area.contains(2, 1));
    }

    #[test]
    fn fragment_cell_addressing() {
        let track = GridTrack { start: 0.0, breadth: 10.0 };
        let frag = GridFragment {
            rows: vec![track; 2],
            cols: vec![track; 3],
            areas: vec![],
        };
        assert_eq!(frag.cell_count(), 6);
        assert!(frag.has_cell(2, 3));
        assert!(!frag.has_cell(0, 1));
        assert!(!frag.has_cell(3, 1));
    }
}
