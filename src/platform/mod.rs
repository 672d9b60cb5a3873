//! Platform abstraction layer
//!
//! Translates browser events into simulation inputs. Kept free of
//! `web_sys` types so the translation is testable on native.

pub mod input;

pub use input::{PointerEvent, PointerState};
