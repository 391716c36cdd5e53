use std::cell::RefCell;
use std::rc::Rc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

use crate::coords::Rect;
use crate::fns::BoundingRect;
use crate::host::{FrameCallback, FrameHost, ManualHost};

/// Frame host backed by winit redraws.
///
/// Requests are queued and a redraw is asked of the attached window; the
/// runtime drains one batch per `RedrawRequested`. Before a window is
/// attached requests only queue.
#[derive(Default)]
pub struct WinitHost {
    queue:  ManualHost,
    window: RefCell<Option<Rc<Window>>>,
}

impl WinitHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, window: Rc<Window>) {
        if self.queue.has_pending() {
            window.request_redraw();
        }
        *self.window.borrow_mut() = Some(window);
    }

    pub(crate) fn detach(&self) {
        self.window.borrow_mut().take();
    }

    pub fn has_pending(&self) -> bool {
        self.queue.has_pending()
    }

    /// Runs the frames queued before this redraw.
    pub(crate) fn redraw(&self) -> usize {
        self.queue.advance()
    }
}

impl FrameHost for WinitHost {
    fn request_frame(&self, frame: FrameCallback) {
        self.queue.request_frame(frame);

        if let Some(window) = self.window.borrow().as_ref() {
            window.request_redraw();
        }
    }
}

/// Inner area of a window in logical pixels, in desktop coordinates.
///
/// Implements [`BoundingRect`] so overlays can be tethered to a window.
#[derive(Clone)]
pub struct WindowBounds(pub Rc<Window>);

impl BoundingRect for WindowBounds {
    fn bounding_rect(&self) -> Rect {
        let pos = self
            .0
            .inner_position()
            .unwrap_or(PhysicalPosition::new(0, 0));

        logical_rect(pos, self.0.inner_size(), self.0.scale_factor())
    }
}

fn logical_rect(pos: PhysicalPosition<i32>, size: PhysicalSize<u32>, scale: f64) -> Rect {
    let pos = pos.to_logical::<f64>(scale);
    let size = size.to_logical::<f64>(scale);
    Rect::new(pos.x as f32, pos.y as f32, size.width as f32, size.height as f32)
}
