//! In-memory reference backend.
//!
//! [`HeadlessApplication`] creates [`HeadlessBackend`]s: surfaces with no
//! native window behind them. Geometry, title and visibility are tracked in
//! memory and the backend honours the full emission contract:
//!
//! - `initialize` when the backend is created
//! - `resize` synchronously when `set_size` changes the size
//! - `paint` for each canvas with a pending update, delivered by
//!   [`HeadlessApplication::process_events`] (the "next turn" of the loop)
//! - `close` once, on the first `close()`
//!
//! Setting the backend option `"embedded": true` in
//! [`CanvasConfig::extra`] makes the surface behave like a widget embedded
//! in a parent window: title changes are ignored and moving it is
//! unsupported.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use easel_core::{EaselError, Event, Geometry, PaintEvent, ResizeEvent, Result};

use crate::application::Application;
use crate::backend::{BackendCapabilities, CanvasBackend, CanvasHandle};
use crate::config::CanvasConfig;

const BACKEND_NAME: &str = "headless";

type PaintQueue = Rc<RefCell<VecDeque<CanvasHandle>>>;

/// Application whose "event loop" is an explicit call to
/// [`process_events`](Self::process_events).
#[derive(Default)]
pub struct HeadlessApplication {
    active: Cell<bool>,
    native_ready: Cell<bool>,
    backends_created: Cell<usize>,
    paint_queue: PaintQueue,
}

impl HeadlessApplication {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// `true` once a canvas has asked for the native loop.
    #[must_use]
    pub fn has_native_loop(&self) -> bool {
        self.native_ready.get()
    }

    #[must_use]
    pub fn backends_created(&self) -> usize {
        self.backends_created.get()
    }

    /// Number of canvases waiting for a paint.
    #[must_use]
    pub fn pending_paints(&self) -> usize {
        self.paint_queue.borrow().len()
    }

    /// Runs one turn of the loop: delivers the queued paints and returns how
    /// many were delivered to live canvases.
    pub fn process_events(&self) -> usize {
        let pending: Vec<CanvasHandle> = self.paint_queue.borrow_mut().drain(..).collect();
        let mut delivered = 0;
        for canvas in pending {
            if canvas
                .with_events(|events| events.paint.emit(&PaintEvent::new("paint")))
                .is_some()
            {
                delivered += 1;
            }
        }
        delivered
    }
}

impl Application for HeadlessApplication {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn activate(&self) -> Result<()> {
        self.active.set(true);
        Ok(())
    }

    fn ensure_native(&self) -> Result<()> {
        if !self.native_ready.replace(true) {
            log::debug!("headless event loop created");
        }
        Ok(())
    }

    fn create_backend(
        &self,
        canvas: CanvasHandle,
        config: &CanvasConfig,
    ) -> Result<Box<dyn CanvasBackend>> {
        let backend = HeadlessBackend::new(canvas, config, Rc::clone(&self.paint_queue));
        self.backends_created.set(self.backends_created.get() + 1);
        backend.canvas.emit_initialize(&Event::new("initialize"));
        Ok(Box::new(backend))
    }
}

/// Surface kept entirely in memory.
pub struct HeadlessBackend {
    canvas: CanvasHandle,
    capabilities: BackendCapabilities,
    title: String,
    geometry: Geometry,
    visible: bool,
    closed: bool,
    paint_queue: PaintQueue,
}

impl HeadlessBackend {
    fn new(canvas: CanvasHandle, config: &CanvasConfig, paint_queue: PaintQueue) -> Self {
        let capabilities = if config.extra_flag("embedded") {
            BackendCapabilities::RESIZE
        } else {
            BackendCapabilities::TITLE | BackendCapabilities::LOCATION | BackendCapabilities::RESIZE
        };
        let (x, y) = config.position.unwrap_or((0, 0));
        let (width, height) = config.size;

        Self {
            canvas,
            capabilities,
            title: config.title.clone(),
            geometry: Geometry::new(x, y, width, height),
            visible: config.show,
            closed: false,
            paint_queue,
        }
    }

    /// Title as last applied to the surface.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        if self.closed {
            return Err(EaselError::Backend(format!(
                "`{operation}` on a closed headless surface"
            )));
        }
        Ok(())
    }
}

impl CanvasBackend for HeadlessBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    fn set_current(&mut self) -> Result<()> {
        Err(EaselError::not_implemented(BACKEND_NAME, "set_current"))
    }

    fn swap_buffers(&mut self) -> Result<()> {
        // single-buffered
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        if self.capabilities.contains(BackendCapabilities::TITLE) {
            self.title = title.to_owned();
        }
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.ensure_open("set_size")?;
        if self.geometry.size() == (width, height) {
            return Ok(());
        }
        self.geometry.width = width;
        self.geometry.height = height;
        self.canvas
            .emit_resize(&ResizeEvent::new("resize", width, height));
        Ok(())
    }

    fn set_location(&mut self, x: i32, y: i32) -> Result<()> {
        if !self.capabilities.contains(BackendCapabilities::LOCATION) {
            return Err(EaselError::unsupported(BACKEND_NAME, "set_location"));
        }
        self.ensure_open("set_location")?;
        self.geometry.x = x;
        self.geometry.y = y;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.ensure_open("set_visible")?;
        self.visible = visible;
        Ok(())
    }

    fn request_update(&mut self) -> Result<()> {
        self.ensure_open("request_update")?;
        let mut queue = self.paint_queue.borrow_mut();
        // at most one pending paint per canvas
        if !queue.iter().any(|c| c.id() == self.canvas.id()) {
            queue.push_back(self.canvas.clone());
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.visible = false;
        self.paint_queue
            .borrow_mut()
            .retain(|c| c.id() != self.canvas.id());
        self.canvas.emit_close(&Event::new("close"));
        Ok(())
    }

    fn geometry(&self) -> Result<Geometry> {
        Ok(self.geometry)
    }

    fn native(&self) -> &dyn Any {
        self
    }
}
