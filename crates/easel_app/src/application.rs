//! Application collaborator.
//!
//! The application owns toolkit selection and the native event loop. A canvas
//! only needs it to activate the toolkit, make sure its loop exists, and build
//! one backend.
//!
//! Canvases take an explicit application, or fall back to the process-wide
//! default installed with [`set_default_app`]. The default lives in
//! thread-local storage: applications are single-threaded and tied to the
//! thread running the toolkit loop.

use std::cell::RefCell;
use std::rc::Rc;

use easel_core::{EaselError, Result};

use crate::backend::{CanvasBackend, CanvasHandle};
use crate::config::CanvasConfig;

/// The application/event-loop object a canvas is built on.
pub trait Application {
    /// Toolkit name, e.g. `"headless"` or `"winit"`.
    fn name(&self) -> &str;

    /// Makes this application's toolkit the active one.
    fn activate(&self) -> Result<()>;

    /// Ensures the native event loop exists.
    fn ensure_native(&self) -> Result<()>;

    /// Instantiates the toolkit's backend for `canvas`.
    fn create_backend(
        &self,
        canvas: CanvasHandle,
        config: &CanvasConfig,
    ) -> Result<Box<dyn CanvasBackend>>;
}

thread_local! {
    static DEFAULT_APP: RefCell<Option<Rc<dyn Application>>> = const { RefCell::new(None) };
}

/// Installs the default application, returning the previous one.
pub fn set_default_app(app: Rc<dyn Application>) -> Option<Rc<dyn Application>> {
    log::debug!("installing default application `{}`", app.name());
    DEFAULT_APP.with(|slot| slot.borrow_mut().replace(app))
}

/// Removes the default application.
pub fn clear_default_app() -> Option<Rc<dyn Application>> {
    DEFAULT_APP.with(|slot| slot.borrow_mut().take())
}

/// The default application used by canvases built without one.
pub fn default_app() -> Result<Rc<dyn Application>> {
    DEFAULT_APP
        .with(|slot| slot.borrow().clone())
        .ok_or(EaselError::NoDefaultApplication)
}
