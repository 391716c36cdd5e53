//! Screen geometry.
//!
//! Values are CSS pixels with a top-left origin, matching what a host reports
//! for element bounding boxes.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
