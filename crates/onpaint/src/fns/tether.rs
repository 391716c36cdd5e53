use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::coords::Rect;

/// Something with an on-screen box, read fresh on every call.
pub trait BoundingRect {
    fn bounding_rect(&self) -> Rect;
}

/// Something that accepts inline style text.
pub trait StyleTarget {
    fn set_css_text(&self, css: &str);
}

impl<T: BoundingRect + ?Sized> BoundingRect for Rc<T> {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }
}

impl<T: StyleTarget + ?Sized> StyleTarget for Rc<T> {
    fn set_css_text(&self, css: &str) {
        (**self).set_css_text(css)
    }
}

impl BoundingRect for Cell<Rect> {
    fn bounding_rect(&self) -> Rect {
        self.get()
    }
}

impl StyleTarget for RefCell<String> {
    fn set_css_text(&self, css: &str) {
        let mut style = self.borrow_mut();
        style.clear();
        style.push_str(css);
    }
}

/// Makes `target` follow `anchor`.
///
/// Each call copies the anchor's current top/left/width/height onto the
/// target as positioning styles. Register the result to keep the two in sync
/// every frame:
///
/// ```rust,ignore
/// let handle = scheduler.register(tether(tooltip_anchor, tooltip));
/// ```
pub fn tether<A, T>(anchor: A, target: T) -> impl FnMut() + 'static
where
    A: BoundingRect + 'static,
    T: StyleTarget + 'static,
{
    move || {
        let rect = anchor.bounding_rect();
        target.set_css_text(&rect.to_css());
    }
}
