//! **gridlens** — coordinates CSS grid overlays for a page inspector panel.
//!
//! The page side pushes the complete list of grid containers whenever the
//! layout changes.  gridlens keeps that list, the panel's display settings,
//! and the per-grid overlay state consistent with an external highlighter
//! service it does not control, and derives one view per frame: either an
//! empty-state message or the grid list, the display settings and an
//! outline.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::HighlighterBridge`]: the capability set used to paint and
//!   clear overlays and to select nodes, so the coordination logic is not
//!   coupled to any highlighter transport.
//! * [`traits::CommandSource`]: abstracts the transport that delivers
//!   grid pushes and user actions.
//!
//! [`coordinator::GridCoordinator`] composes the [`grid::GridStore`], the
//! [`settings::DisplaySettingsController`] and the view models in
//! [`list`], [`outline`] and [`view`].  Concrete implementations of the
//! traits live in [`bridge`] (JSON lines on a writer) and [`ipc`]
//! (Unix-socket command listener).

pub mod bridge;
pub mod command;
pub mod config;
pub mod coordinator;
pub mod grid;
pub mod ipc;
pub mod list;
pub mod outline;
pub mod settings;
pub mod traits;
pub mod view;
