//! Per-frame callback registry and the loop that drives it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::SchedulerConfig;
use crate::error::{Op, ScheduleError};
use crate::handle::CallbackHandle;
use crate::host::FrameHost;
use crate::report::{LogReporter, Reporter};

type SharedCallback = Rc<RefCell<Box<dyn FnMut()>>>;

struct Entry {
    handle:   CallbackHandle,
    callback: SharedCallback,
}

/// Active and paused entries, each kept in insertion order.
///
/// A handle lives in at most one of the two lists.
#[derive(Default)]
struct Registry {
    active: Vec<Entry>,
    paused: Vec<Entry>,
}

impl Registry {
    fn take(list: &mut Vec<Entry>, handle: &CallbackHandle) -> Option<Entry> {
        let idx = list.iter().position(|e| &e.handle == handle)?;
        Some(list.remove(idx))
    }
}

struct Inner {
    host:       Rc<dyn FrameHost>,
    reporter:   Rc<dyn Reporter>,
    config:     Cell<SchedulerConfig>,
    registry:   RefCell<Registry>,
    running:    Cell<bool>,
    /// Bumped on every false -> true transition of `running`.
    generation: Cell<u64>,
    next_id:    Cell<u64>,
}

// ── Registration ──────────────────────────────────────────────────────────

/// General registration request.
///
/// [`FrameScheduler::register`] covers the common case. This builder exists
/// for embedders that assemble registrations at runtime (script bindings,
/// config-driven setups) where the callable may be missing.
///
/// ```rust,ignore
/// let h = scheduler.register_with(
///     Registration::new()
///         .callback(move || spin.step())
///         .label("spinner")
///         .paused(true),
/// );
/// ```
#[derive(Default)]
pub struct Registration {
    callback:     Option<Box<dyn FnMut()>>,
    label:        Option<String>,
    start_paused: bool,
}

impl Registration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(mut self, f: impl FnMut() + 'static) -> Self {
        self.callback = Some(Box::new(f));
        self
    }

    /// Sets an already-boxed callable, or clears it with `None`.
    pub fn boxed(mut self, f: Option<Box<dyn FnMut()>>) -> Self {
        self.callback = f;
        self
    }

    /// Human-readable name used in diagnostics and timing records.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Store the callback paused instead of active.
    pub fn paused(mut self, start_paused: bool) -> Self {
        self.start_paused = start_paused;
        self
    }
}

// ── FrameScheduler ────────────────────────────────────────────────────────

/// Runs every active callback once per display refresh.
///
/// Cloning is cheap and every clone drives the same registry, so callbacks can
/// capture a clone to pause or delete registrations from inside a tick.
///
/// The loop only keeps requesting frames while at least one callback is
/// active. Once the active set drains, the next tick stops the loop instead of
/// queueing an empty frame.
///
/// A callback that captures a clone keeps the scheduler alive until it is
/// deleted or [`clear`](Self::clear) is called.
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<Inner>,
}

impl FrameScheduler {
    /// Creates an idle scheduler reporting through the `log` facade.
    pub fn new(host: Rc<dyn FrameHost>) -> Self {
        Self::with_parts(host, Rc::new(LogReporter::new()), SchedulerConfig::default())
    }

    pub fn with_parts(
        host: Rc<dyn FrameHost>,
        reporter: Rc<dyn Reporter>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                reporter,
                config:     Cell::new(config),
                registry:   RefCell::new(Registry::default()),
                running:    Cell::new(false),
                generation: Cell::new(0),
                next_id:    Cell::new(0),
            }),
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Registers an active callback and starts the loop if needed.
    pub fn register(&self, f: impl FnMut() + 'static) -> CallbackHandle {
        self.insert(Box::new(f), None, false)
    }

    /// Registers a callback that stays paused until [`resume`](Self::resume).
    pub fn register_paused(&self, f: impl FnMut() + 'static) -> CallbackHandle {
        self.insert(Box::new(f), None, true)
    }

    /// Registers from a [`Registration`].
    ///
    /// Returns `None` and reports [`ScheduleError::InvalidCallback`] when the
    /// registration carries no callable; nothing else changes in that case.
    pub fn register_with(&self, reg: Registration) -> Option<CallbackHandle> {
        let Some(callback) = reg.callback else {
            self.report(ScheduleError::InvalidCallback);
            return None;
        };

        Some(self.insert(callback, reg.label, reg.start_paused))
    }

    fn insert(
        &self,
        callback: Box<dyn FnMut()>,
        label: Option<String>,
        start_paused: bool,
    ) -> CallbackHandle {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));

        let handle = CallbackHandle::new(id, label.map(Rc::from));
        let entry = Entry {
            handle:   handle.clone(),
            callback: Rc::new(RefCell::new(callback)),
        };

        {
            let mut reg = self.inner.registry.borrow_mut();
            if start_paused {
                reg.paused.push(entry);
            } else {
                reg.active.push(entry);
            }
        }

        log::trace!("onpaint: registered [{handle}] (paused: {start_paused})");

        if !start_paused {
            self.run();
        }

        handle
    }

    // ── Per-handle lifecycle ──────────────────────────────────────────────

    /// Removes `handle` from both sets. Unknown handles are ignored.
    pub fn delete(&self, handle: &CallbackHandle) {
        // Removed closures are dropped after the borrow ends.
        let _removed = {
            let mut reg = self.inner.registry.borrow_mut();
            (
                Registry::take(&mut reg.active, handle),
                Registry::take(&mut reg.paused, handle),
            )
        };
    }

    /// Moves an active callback to the paused set.
    ///
    /// Returns `false` and reports [`ScheduleError::HandleNotFound`] when the
    /// handle is not active. Never touches the running flag.
    pub fn pause(&self, handle: &CallbackHandle) -> bool {
        let moved = {
            let mut reg = self.inner.registry.borrow_mut();
            match Registry::take(&mut reg.active, handle) {
                Some(entry) => {
                    reg.paused.push(entry);
                    true
                }
                None => false,
            }
        };

        if !moved {
            self.report(ScheduleError::HandleNotFound {
                op:     Op::Pause,
                handle: handle.clone(),
            });
        }

        moved
    }

    /// Moves a paused callback back to the end of the active set and starts
    /// the loop if needed.
    ///
    /// Returns `false` and reports [`ScheduleError::HandleNotFound`] when the
    /// handle is not paused.
    pub fn resume(&self, handle: &CallbackHandle) -> bool {
        let moved = {
            let mut reg = self.inner.registry.borrow_mut();
            match Registry::take(&mut reg.paused, handle) {
                Some(entry) => {
                    reg.active.push(entry);
                    true
                }
                None => false,
            }
        };

        if moved {
            self.run();
        } else {
            self.report(ScheduleError::HandleNotFound {
                op:     Op::Resume,
                handle: handle.clone(),
            });
        }

        moved
    }

    // ── Global lifecycle ──────────────────────────────────────────────────

    /// Starts the loop. No-op while already running.
    pub fn run(&self) {
        if self.inner.running.get() {
            return;
        }

        self.inner.running.set(true);
        self.inner
            .generation
            .set(self.inner.generation.get().wrapping_add(1));

        log::debug!("onpaint: loop started");
        self.schedule();
    }

    /// Stops the loop at the next tick boundary. Registrations are kept.
    pub fn stop(&self) {
        if self.inner.running.replace(false) {
            log::debug!("onpaint: loop stopped");
        }
    }

    /// Stops the loop and drops every registration.
    pub fn clear(&self) {
        self.stop();

        let _removed = {
            let mut reg = self.inner.registry.borrow_mut();
            (std::mem::take(&mut reg.active), std::mem::take(&mut reg.paused))
        };
    }

    // ── Configuration ─────────────────────────────────────────────────────

    pub fn config(&self) -> SchedulerConfig {
        self.inner.config.get()
    }

    /// Toggles per-callback timing. Takes effect on the next tick.
    pub fn set_log_performance(&self, enabled: bool) {
        let mut cfg = self.inner.config.get();
        cfg.log_performance = enabled;
        self.inner.config.set(cfg);
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn is_active(&self, handle: &CallbackHandle) -> bool {
        self.inner
            .registry
            .borrow()
            .active
            .iter()
            .any(|e| &e.handle == handle)
    }

    pub fn is_paused(&self, handle: &CallbackHandle) -> bool {
        self.inner
            .registry
            .borrow()
            .paused
            .iter()
            .any(|e| &e.handle == handle)
    }

    pub fn active_len(&self) -> usize {
        self.inner.registry.borrow().active.len()
    }

    pub fn paused_len(&self) -> usize {
        self.inner.registry.borrow().paused.len()
    }

    /// Active handles in the order they run.
    pub fn active_handles(&self) -> Vec<CallbackHandle> {
        self.inner
            .registry
            .borrow()
            .active
            .iter()
            .map(|e| e.handle.clone())
            .collect()
    }

    pub fn paused_handles(&self) -> Vec<CallbackHandle> {
        self.inner
            .registry
            .borrow()
            .paused
            .iter()
            .map(|e| e.handle.clone())
            .collect()
    }

    // ── Loop ──────────────────────────────────────────────────────────────

    /// Queues the next tick, or stops the loop when nothing is active.
    fn schedule(&self) {
        if self.inner.registry.borrow().active.is_empty() {
            log::trace!("onpaint: active set empty");
            self.stop();
            return;
        }

        let generation = self.inner.generation.get();
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);

        self.inner.host.request_frame(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                FrameScheduler { inner }.tick(generation);
            }
        }));
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.running.get() && self.inner.generation.get() == generation
    }

    fn tick(&self, generation: u64) {
        if !self.is_current(generation) {
            log::trace!("onpaint: dropping frame from a stopped run");
            return;
        }

        // Mutations made by callbacks hit the live registry, not this list.
        let snapshot: Vec<(CallbackHandle, SharedCallback)> = self
            .inner
            .registry
            .borrow()
            .active
            .iter()
            .map(|e| (e.handle.clone(), e.callback.clone()))
            .collect();

        let timed = self.inner.config.get().log_performance;
        for (handle, callback) in &snapshot {
            self.invoke(handle, callback, timed);
        }

        // A callback may have stopped (or stopped and restarted) the loop.
        if self.is_current(generation) {
            self.schedule();
        }
    }

    fn invoke(&self, handle: &CallbackHandle, callback: &SharedCallback, timed: bool) {
        let Ok(mut f) = callback.try_borrow_mut() else {
            log::warn!("onpaint: [{handle}] is already running, skipped");
            return;
        };
        let f: &mut dyn FnMut() = &mut **f;

        if timed {
            let label = handle.timing_label();
            self.inner.reporter.time_start(&label);
            f();
            self.inner.reporter.time_end(&label);
        } else {
            f();
        }
    }

    fn report(&self, err: ScheduleError) {
        self.inner.reporter.error(&err);
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.inner.registry.borrow();
        f.debug_struct("FrameScheduler")
            .field("running", &self.inner.running.get())
            .field("active", &reg.active.len())
            .field("paused", &reg.paused.len())
            .field("config", &self.inner.config.get())
            .finish()
    }
}
