//! Ready-made callbacks meant to be registered with a
//! [`FrameScheduler`](crate::FrameScheduler).

mod tether;

pub use tether::{tether, BoundingRect, StyleTarget};
