//! Concrete [`HighlighterBridge`](crate::traits::HighlighterBridge)
//! implementations.
//!
//! Nothing outside this module should know how requests reach the
//! highlighter.

pub mod json;
