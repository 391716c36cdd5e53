use std::cell::RefCell;
use std::collections::VecDeque;

use super::{FrameCallback, FrameHost};

/// Queue-backed host for callers that own their frame loop.
///
/// `request_frame` only enqueues. Each [`advance`](Self::advance) call is one
/// display refresh: it runs the continuations that were pending when it was
/// called. Anything queued while advancing waits for the next refresh.
#[derive(Default)]
pub struct ManualHost {
    queue: RefCell<VecDeque<FrameCallback>>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of continuations waiting for the next refresh.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    /// Runs one refresh and returns how many continuations fired.
    pub fn advance(&self) -> usize {
        // Take the batch first: continuations re-enter `request_frame`.
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let n = batch.len();

        for frame in batch {
            frame();
        }

        n
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&self, frame: FrameCallback) {
        self.queue.borrow_mut().push_back(frame);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn advance_runs_pending_in_order() {
        let host = ManualHost::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            host.request_frame(Box::new(move || log.borrow_mut().push(i)));
        }

        assert_eq!(host.pending(), 3);
        assert_eq!(host.advance(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert!(!host.has_pending());
    }

    #[test]
    fn requests_made_while_advancing_wait_a_frame() {
        let host = Rc::new(ManualHost::new());
        let hits = Rc::new(Cell::new(0));

        let inner_host = host.clone();
        let inner_hits = hits.clone();
        host.request_frame(Box::new(move || {
            inner_hits.set(inner_hits.get() + 1);
            let hits = inner_hits.clone();
            inner_host.request_frame(Box::new(move || hits.set(hits.get() + 10)));
        }));

        assert_eq!(host.advance(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(host.pending(), 1);

        assert_eq!(host.advance(), 1);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn advance_on_empty_queue_is_noop() {
        assert_eq!(ManualHost::new().advance(), 0);
    }
}
