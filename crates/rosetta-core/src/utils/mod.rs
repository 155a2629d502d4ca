//! Utility functions for rendering response bodies in messages.

pub mod format;

pub use format::{take_chars, truncate_with_note};
