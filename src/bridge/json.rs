//! [`HighlighterBridge`] that writes every request as a line of JSON.
//!
//! The highlighter lives in another process; this bridge only serializes
//! requests onto a byte stream (stdout in the daemon) and never waits for a
//! reply.  Overlay requests are therefore acknowledged optimistically: the
//! real state comes back with the next full grid list.
//!
//! # Wire format
//!
//! ```json
//! {"RequestOverlay":{"id":1,"color":"#9400ff"}}
//! {"CancelOverlay":{"id":1}}
//! {"SelectNode":{"node":"actor-7"}}
//! {"HighlightRegion":{"id":1,"region":{"Area":{"name":"header"}}}}
//! {"HighlightRegion":{"id":1,"region":null}}
//! {"SetOverlayColor":{"id":1,"color":"#ff0000"}}
//! {"DisplaySettings":{"show_grid_areas":true,"show_grid_line_numbers":false,"show_infinite_lines":false}}
//! {"ShowBoxModel":{"node":"actor-7"}}
//! "HideBoxModel"
//! ```

use crate::grid::{Color, GridId, NodeRef};
use crate::settings::DisplaySettings;
use crate::traits::{HighlighterBridge, Region};
use log::debug;
use serde::Serialize;
use std::cell::RefCell;
use std::io::Write;

/// One outgoing request.
#[derive(Debug, Serialize)]
enum Request<'a> {
    RequestOverlay { id: GridId, color: Color },
    CancelOverlay { id: GridId },
    SelectNode { node: &'a NodeRef },
    HighlightRegion { id: GridId, region: Option<&'a Region> },
    SetOverlayColor { id: GridId, color: Color },
    DisplaySettings(&'a DisplaySettings),
    ShowBoxModel { node: &'a NodeRef },
    HideBoxModel,
}

/// Errors that can occur while writing a request.
#[derive(Debug, thiserror::Error)]
pub enum JsonBridgeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bridge that writes newline-delimited JSON requests to `W`.
pub struct JsonLinesBridge<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> JsonLinesBridge<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn send(&self, request: &Request<'_>) -> Result<(), JsonBridgeError> {
        let line = serde_json::to_string(request)?;
        debug!("bridge -> {}", line);
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write> HighlighterBridge for JsonLinesBridge<W> {
    type Error = JsonBridgeError;

    fn request_overlay(&self, id: GridId, color: Color) -> Result<bool, Self::Error> {
        self.send(&Request::RequestOverlay { id, color })?;
        Ok(true)
    }

    fn cancel_overlay(&self, id: GridId) -> Result<(), Self::Error> {
        self.send(&Request::CancelOverlay { id })
    }

    fn select_node(&self, node: &NodeRef) -> Result<(), Self::Error> {
        self.send(&Request::SelectNode { node })
    }

    fn request_cell_or_area_highlight(
        &self,
        id: GridId,
        region: Option<&Region>,
    ) -> Result<(), Self::Error> {
        self.send(&Request::HighlightRegion { id, region })
    }

    fn set_overlay_color(&self, id: GridId, color: Color) -> Result<(), Self::Error> {
        self.send(&Request::SetOverlayColor { id, color })
    }

    fn update_display_settings(&self, settings: &DisplaySettings) -> Result<(), Self::Error> {
        self.send(&Request::DisplaySettings(settings))
    }

    fn show_box_model(&self, node: &NodeRef) -> Result<(), Self::Error> {
        self.send(&Request::ShowBoxModel { node })
    }

    fn hide_box_model(&self) -> Result<(), Self::Error> {
        self.send(&Request::HideBoxModel)
    }
}
