use std::fmt;

use crate::handle::CallbackHandle;

/// Registry operation that looked up a handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Op {
    Pause,
    Resume,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Pause  => "pause",
            Op::Resume => "resume",
        }
    }
}

/// Conditions reported by [`FrameScheduler`](crate::FrameScheduler).
///
/// These are never returned as `Err`. The scheduler hands them to its
/// [`Reporter`](crate::Reporter) and leaves the registry untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// A registration arrived without a callable.
    InvalidCallback,
    /// `pause`/`resume` targeted a handle missing from the expected set.
    HandleNotFound { op: Op, handle: CallbackHandle },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidCallback => {
                write!(f, "register: can only register a callable")
            }
            ScheduleError::HandleNotFound { op, handle } => {
                write!(f, "{}: key [{handle}] not found", op.as_str())
            }
        }
    }
}

impl std::error::Error for ScheduleError {}
