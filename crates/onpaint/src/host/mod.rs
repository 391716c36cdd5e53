//! Frame hosts.
//!
//! A host is the environment's "run this once before the next frame is drawn"
//! primitive. The scheduler only ever asks for one frame at a time and queues
//! the next request from inside the continuation.

mod manual;

pub use manual::ManualHost;

/// Continuation handed to a host; invoked once, with no arguments.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Capability to schedule one continuation at the next rendering opportunity.
pub trait FrameHost {
    fn request_frame(&self, frame: FrameCallback);
}
