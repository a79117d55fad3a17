//! Winit backend
//!
//! [`WinitCanvasBackend`] drives a canvas with a
//! [winit](https://crates.io/crates/winit) window. Winit only creates windows
//! from inside a running event loop, so the application integration creates
//! the window (using [`window_attributes`] for the canvas's config), wraps it
//! in this backend from its `create_backend`, and forwards each
//! `WindowEvent` for that window to a [`WinitEventTranslator`] obtained from
//! [`WinitCanvasBackend::translator`].
//!
//! ```rust,ignore
//! fn create_backend(&self, canvas: CanvasHandle, config: &CanvasConfig)
//!     -> Result<Box<dyn CanvasBackend>>
//! {
//!     let window = self.event_loop().create_window(window_attributes(config))
//!         .map_err(|e| EaselError::Backend(e.to_string()))?;
//!     let backend = WinitCanvasBackend::new(canvas, Arc::new(window));
//!     self.register(backend.window_id(), backend.translator());
//!     Ok(Box::new(backend))
//! }
//! ```

use std::any::Any;
use std::sync::Arc;

use raw_window_handle::{HandleError, HasWindowHandle, WindowHandle};
use winit::dpi::{PhysicalPosition, PhysicalSize};
pub use winit::window::{Window, WindowAttributes, WindowId};

use easel_core::{EaselError, Event, Geometry, ResizeEvent, Result};

use crate::backend::{BackendCapabilities, CanvasBackend, CanvasHandle};
use crate::config::CanvasConfig;

pub mod input_adapter;

pub use input_adapter::WinitEventTranslator;

const BACKEND_NAME: &str = "winit";

/// Window attributes matching a canvas configuration.
#[must_use]
pub fn window_attributes(config: &CanvasConfig) -> WindowAttributes {
    let (width, height) = config.size;
    let mut attributes = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(width, height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorate)
        .with_visible(config.show);

    if let Some((x, y)) = config.position {
        attributes = attributes.with_position(PhysicalPosition::new(x, y));
    }
    attributes
}

fn surface_capabilities(position: Option<PhysicalPosition<i32>>) -> BackendCapabilities {
    let mut capabilities = BackendCapabilities::TITLE | BackendCapabilities::RESIZE;
    if position.is_some() {
        capabilities |= BackendCapabilities::LOCATION;
    }
    capabilities
}

fn surface_geometry(position: Option<PhysicalPosition<i32>>, size: PhysicalSize<u32>) -> Geometry {
    let (x, y) = position.map_or((0, 0), |p| (p.x, p.y));
    Geometry::new(x, y, size.width, size.height)
}

/// Emits `resize` for a size change winit applied synchronously. Otherwise
/// the `Resized` event reaches the canvas via the translator.
fn report_applied_size(canvas: &CanvasHandle, applied: Option<PhysicalSize<u32>>) {
    if let Some(size) = applied {
        canvas.emit_resize(&ResizeEvent::new("resize", size.width, size.height));
    }
}

/// Canvas backend wrapping a winit window.
///
/// Platforms that do not expose window positions (Wayland) get a backend
/// without [`BackendCapabilities::LOCATION`]; its geometry reports `(0, 0)`
/// as the position.
pub struct WinitCanvasBackend {
    canvas: CanvasHandle,
    window_id: WindowId,
    window: Option<Arc<Window>>,
    capabilities: BackendCapabilities,
}

impl WinitCanvasBackend {
    #[must_use]
    pub fn new(canvas: CanvasHandle, window: Arc<Window>) -> Self {
        let capabilities = surface_capabilities(window.outer_position().ok());
        Self {
            canvas,
            window_id: window.id(),
            window: Some(window),
            capabilities,
        }
    }

    #[must_use]
    pub fn window_id(&self) -> WindowId {
        self.window_id
    }

    /// The window, until the backend is closed.
    #[must_use]
    pub fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    /// A translator emitting onto the same canvas as this backend.
    #[must_use]
    pub fn translator(&self) -> WinitEventTranslator {
        WinitEventTranslator::new(self.canvas.clone())
    }

    fn live_window(&self, operation: &'static str) -> Result<&Window> {
        self.window
            .as_deref()
            .ok_or_else(|| EaselError::Backend(format!("`{operation}` on a closed winit window")))
    }
}

impl CanvasBackend for WinitCanvasBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    fn set_current(&mut self) -> Result<()> {
        // No graphics context is attached to a bare winit window.
        Err(EaselError::not_implemented(BACKEND_NAME, "set_current"))
    }

    fn swap_buffers(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.live_window("set_title")?.set_title(title);
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        let applied = self
            .live_window("set_size")?
            .request_inner_size(PhysicalSize::new(width, height));
        report_applied_size(&self.canvas, applied);
        Ok(())
    }

    fn set_location(&mut self, x: i32, y: i32) -> Result<()> {
        if !self.capabilities.contains(BackendCapabilities::LOCATION) {
            return Err(EaselError::unsupported(BACKEND_NAME, "set_location"));
        }
        self.live_window("set_location")?
            .set_outer_position(PhysicalPosition::new(x, y));
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.live_window("set_visible")?.set_visible(visible);
        Ok(())
    }

    fn request_update(&mut self) -> Result<()> {
        self.live_window("request_update")?.request_redraw();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the last reference destroys the native window.
        if self.window.take().is_some() {
            log::debug!("winit window {:?} closed", self.window_id);
            self.canvas.emit_close(&Event::new("close"));
        }
        Ok(())
    }

    fn geometry(&self) -> Result<Geometry> {
        let window = self.live_window("geometry")?;
        Ok(surface_geometry(
            window.outer_position().ok(),
            window.inner_size(),
        ))
    }

    fn native(&self) -> &dyn Any {
        match &self.window {
            Some(window) => &**window,
            None => self,
        }
    }
}

impl HasWindowHandle for WinitCanvasBackend {
    fn window_handle(&self) -> std::result::Result<WindowHandle<'_>, HandleError> {
        self.window
            .as_deref()
            .ok_or(HandleError::Unavailable)?
            .window_handle()
    }
}
