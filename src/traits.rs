//! Core traits that decouple gridlens from the highlighter service and from
//! the transport that delivers page events.
//!
//! The [`GridCoordinator`](crate::coordinator::GridCoordinator) only depends
//! on these abstractions.  Concrete implementations live in
//! [`bridge`](crate::bridge) and [`ipc`](crate::ipc).

use crate::command::Command;
use crate::grid::{Color, GridId, NodeRef};
use crate::settings::DisplaySettings;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;

/// Part of a grid to preview while the pointer hovers the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// A named grid area.
    Area { name: String },
    /// One cell of a fragment.  `row` and `column` are 1-based.
    Cell {
        fragment: usize,
        row: u32,
        column: u32,
    },
}

/// The capability set used to paint and clear overlays on the live page.
///
/// The highlighter service lives outside this crate (often in another
/// process).  Implementations may be asynchronous underneath; in that case
/// the acknowledgement returned by [`request_overlay`] is optimistic and
/// gets reconciled when the next full grid list is pushed.
///
/// Whether several overlays may be visible at once is the bridge's call.
/// The coordinator tracks every grid's state independently.
///
/// [`request_overlay`]: HighlighterBridge::request_overlay
pub trait HighlighterBridge {
    /// The error type produced by this bridge.
    type Error: std::error::Error + Send + 'static;

    /// Ask the highlighter to paint grid `id` tinted with `color`.
    ///
    /// Returns the overlay's new active state as acknowledged by the
    /// highlighter.
    fn request_overlay(&self, id: GridId, color: Color) -> Result<bool, Self::Error>;

    /// Remove the overlay of grid `id`.
    ///
    /// Idempotent: cancelling an inactive overlay is a no-op, never an error.
    fn cancel_overlay(&self, id: GridId) -> Result<(), Self::Error>;

    /// Ask the inspector to select `node`.  Fire-and-forget.
    fn select_node(&self, node: &NodeRef) -> Result<(), Self::Error>;

    /// Transient hover highlight of part of grid `id`.
    ///
    /// Each call supersedes the previous one; `None` clears it.
    fn request_cell_or_area_highlight(
        &self,
        id: GridId,
        region: Option<&Region>,
    ) -> Result<(), Self::Error>;

    /// Change the tint of grid `id` without toggling its overlay.
    fn set_overlay_color(&self, id: GridId, color: Color) -> Result<(), Self::Error>;

    /// Hand the full display settings to the highlighter so active overlays
    /// repaint with them.
    fn update_display_settings(&self, settings: &DisplaySettings) -> Result<(), Self::Error>;

    /// Preview `node` with the box-model highlighter.
    fn show_box_model(&self, node: &NodeRef) -> Result<(), Self::Error>;

    /// Clear the box-model preview.
    fn hide_box_model(&self) -> Result<(), Self::Error>;
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (a Unix socket, an in-memory
/// channel, a test harness, …) and forward parsed commands into the
/// provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridId;
    use std::sync::mpsc;

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    #[test]
    fn region_wire_format() {
        let area: Region = serde_json::from_str(r#"{"Area":{"name":"header"}}"#).unwrap();
        assert_eq!(area, Region::Area { name: "header".into() });
        let cell: Region =
            serde_json::from_str(r#"{"Cell":{"fragment":0,"row":2,"column":3}}"#).unwrap();
        assert_eq!(
            cell,
            Region::Cell {
                fragment: 0,
                row: 2,
                column: 3
            }
        );
    }

    //  Mock CommandSource

    struct MockSource {
        commands: Vec<Command>,
    }

    impl CommandSource for MockSource {
        type Error = MockError;

        fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), MockError> {
            for cmd in self.commands.drain(..) {
                let _ = sink.send(cmd);
            }
            Ok(())
        }
    }

    #[test]
    fn mock_source_emits_commands() {
        let mut src = MockSource {
            commands: vec![Command::ToggleGrid(GridId(2)), Command::UpdateGrids(vec![])],
        };
        let (tx, rx) = mpsc::channel();
        src.run(tx).unwrap();
        let cmds: Vec<Command> = rx.try_iter().collect();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0], Command::ToggleGrid(GridId(2)));
        assert_eq!(cmds[1], Command::UpdateGrids(vec![]));
    }
}
