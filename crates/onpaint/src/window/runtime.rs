use anyhow::{Context, Result};
use std::rc::Rc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::SchedulerConfig;
use crate::report::LogReporter;
use crate::scheduler::FrameScheduler;

use super::host::WinitHost;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub scheduler: SchedulerConfig,
    /// Leave the event loop once the scheduler stops on its own.
    pub exit_when_idle: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "onpaint".to_string(),
            initial_size: LogicalSize::new(640.0, 360.0),
            scheduler: SchedulerConfig::from_env(),
            exit_when_idle: false,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens a window, hands a scheduler driven by its redraws to `setup`, and
    /// runs until the window closes.
    ///
    /// `setup` runs once, after the window exists.
    pub fn run<F>(config: RuntimeConfig, setup: F) -> Result<()>
    where
        F: FnOnce(&FrameScheduler, &Rc<Window>) -> Result<()> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, setup);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct AppState<F> {
    config: RuntimeConfig,
    setup: Option<F>,

    host: Rc<WinitHost>,
    scheduler: FrameScheduler,
    window: Option<Rc<Window>>,

    frames: u64,
    failure: Option<anyhow::Error>,
}

impl<F> AppState<F>
where
    F: FnOnce(&FrameScheduler, &Rc<Window>) -> Result<()>,
{
    fn new(config: RuntimeConfig, setup: F) -> Self {
        let host = Rc::new(WinitHost::new());
        let scheduler =
            FrameScheduler::with_parts(host.clone(), Rc::new(LogReporter::new()), config.scheduler);

        Self {
            config,
            setup: Some(setup),
            host,
            scheduler,
            window: None,
            frames: 0,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Rc<Window>> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        Ok(Rc::new(window))
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.scheduler.clear();
        self.host.detach();
        self.window = None;
        log::debug!("runtime exiting after {} frames", self.frames);
        event_loop.exit();
    }
}

impl<F> ApplicationHandler for AppState<F>
where
    F: FnOnce(&FrameScheduler, &Rc<Window>) -> Result<()>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(w) => w,
            Err(e) => return self.fail(event_loop, e),
        };

        self.host.attach(window.clone());
        self.window = Some(window.clone());

        if let Some(setup) = self.setup.take() {
            if let Err(e) = setup(&self.scheduler, &window) {
                self.fail(event_loop, e.context("runtime setup failed"));
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        let Some(window) = &self.window else {
            return;
        };

        if self.host.has_pending() {
            window.request_redraw();
        } else if self.config.exit_when_idle && !self.scheduler.is_running() {
            log::info!("scheduler idle; exiting");
            self.shutdown(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::RedrawRequested => {
                if let Some(window) = &self.window {
                    window.pre_present_notify();
                }
                if self.host.redraw() > 0 {
                    self.frames = self.frames.wrapping_add(1);
                }
            }

            _ => {}
        }
    }
}
