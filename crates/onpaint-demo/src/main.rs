use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use winit::window::Window;

use onpaint::fns::{tether, StyleTarget};
use onpaint::logging::{init_logging, LoggingConfig};
use onpaint::window::{Runtime, RuntimeConfig, WindowBounds};
use onpaint::{CallbackHandle, FrameScheduler, Registration};

/// Frames the spinner runs before handing over to the blinker.
const SPIN_FRAMES: u32 = 180;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "onpaint demo".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, setup)
}

fn setup(scheduler: &FrameScheduler, window: &Rc<Window>) -> Result<()> {
    log::info!("close the window to quit");

    // Overlay box that follows the window around the desktop.
    let overlay = Rc::new(Overlay::default());
    scheduler.register_with(
        Registration::new()
            .callback(tether(WindowBounds(window.clone()), overlay))
            .label("tether"),
    );

    // Paused until the spinner finishes.
    let blink_on = Rc::new(Cell::new(false));
    let blinker = {
        let blink_on = blink_on.clone();
        let mut frame = 0u32;
        scheduler.register_with(
            Registration::new()
                .callback(move || {
                    frame = frame.wrapping_add(1);
                    if frame % 30 == 0 {
                        blink_on.set(!blink_on.get());
                        log::info!("blink {}", if blink_on.get() { "on" } else { "off" });
                    }
                })
                .label("blinker")
                .paused(true),
        )
    };

    let spinner: Rc<RefCell<Option<CallbackHandle>>> = Rc::new(RefCell::new(None));
    let handle = {
        let sched = scheduler.clone();
        let me = spinner.clone();
        let mut angle = 0.0f32;
        let mut frames = 0u32;
        scheduler.register_with(
            Registration::new()
                .callback(move || {
                    angle = (angle + 2.0) % 360.0;
                    frames += 1;
                    if frames % 60 == 0 {
                        log::info!("spinner at {angle:.0} deg");
                    }
                    if frames == SPIN_FRAMES {
                        if let Some(me) = me.borrow().as_ref() {
                            sched.delete(me);
                        }
                        if let Some(blinker) = &blinker {
                            sched.resume(blinker);
                        }
                    }
                })
                .label("spinner"),
        )
    };
    *spinner.borrow_mut() = handle;

    Ok(())
}

/// Stand-in for a positioned overlay element; logs its style when it moves.
#[derive(Default)]
struct Overlay {
    css: RefCell<String>,
}

impl StyleTarget for Overlay {
    fn set_css_text(&self, css: &str) {
        if *self.css.borrow() == css {
            return;
        }
        log::debug!("overlay -> {css}");
        *self.css.borrow_mut() = css.to_string();
    }
}
