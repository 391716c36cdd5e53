//! winit-backed host.
//!
//! Owns the `winit` event loop and a single window, and turns redraw requests
//! into scheduler ticks.

mod host;
mod runtime;

pub use host::{WindowBounds, WinitHost};
pub use runtime::{Runtime, RuntimeConfig};
