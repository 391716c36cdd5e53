//! onpaint: run callbacks once per display refresh.
//!
//! A [`FrameScheduler`] keeps a registry of callbacks and drives them from a
//! [`FrameHost`], the environment's "call me before the next frame" primitive.
//! Callbacks can be paused, resumed and deleted through the
//! [`CallbackHandle`] returned at registration; the loop stops by itself once
//! nothing is active.
//!
//! ```rust,ignore
//! let host = Rc::new(ManualHost::new());
//! let scheduler = FrameScheduler::new(host.clone());
//!
//! let spin = scheduler.register(move || angle.set(angle.get() + 0.1));
//! host.advance(); // one refresh
//! scheduler.pause(&spin);
//! ```

pub mod config;
pub mod coords;
pub mod error;
pub mod fns;
pub mod handle;
pub mod host;
pub mod logging;
pub mod report;
pub mod scheduler;
pub mod window;

pub use config::SchedulerConfig;
pub use error::{Op, ScheduleError};
pub use handle::CallbackHandle;
pub use host::{FrameCallback, FrameHost, ManualHost};
pub use report::{LogReporter, Reporter};
pub use scheduler::{FrameScheduler, Registration};
