//! Transport for page events and user actions.
//!
//! The page-side agent and the panel front end connect to a Unix socket and
//! send newline-delimited JSON [`Command`](crate::command::Command)s.

pub mod listener;
