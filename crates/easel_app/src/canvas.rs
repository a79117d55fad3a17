//! The Canvas facade.
//!
//! A [`Canvas`] is one on-screen drawing surface, independent of the toolkit
//! that implements it. It owns the event hub and, once realized, exactly one
//! [`CanvasBackend`]. Property changes are forwarded to the backend; native
//! events come back as typed emissions on [`Canvas::events`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut canvas = Canvas::builder()
//!     .with_app(app)
//!     .with_config(CanvasConfig::new().with_title("Plot"))
//!     .build()?;
//!
//! canvas.events().resize.connect(|e| println!("resized to {:?}", e.size()));
//! canvas.set_geometry((10, 10, 640, 480))?;
//! canvas.show(true)?;
//! ```

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use easel_core::{CanvasEvents, EaselError, Geometry, GeometryRequest, Result};

use crate::application::{default_app, Application};
use crate::backend::{BackendCapabilities, CanvasBackend, CanvasHandle, CanvasId};
use crate::config::CanvasConfig;

/// Holds the construction arguments until the backend replaces them.
enum BackendSlot {
    Unrealized(CanvasConfig),
    Realized(Box<dyn CanvasBackend>),
}

/// Toolkit-independent drawing surface.
pub struct Canvas {
    id: CanvasId,
    events: Rc<CanvasEvents>,
    app: Rc<dyn Application>,
    slot: BackendSlot,
    title: String,
}

/// Builder for [`Canvas`].
pub struct CanvasBuilder {
    app: Option<Rc<dyn Application>>,
    config: CanvasConfig,
    create_widget: bool,
}

impl CanvasBuilder {
    /// Uses `app` instead of the process-wide default.
    #[must_use]
    pub fn with_app(mut self, app: Rc<dyn Application>) -> Self {
        self.app = Some(app);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether to realize the canvas during [`build`](Self::build)
    /// (default `true`).
    #[must_use]
    pub fn create_widget(mut self, create: bool) -> Self {
        self.create_widget = create;
        self
    }

    pub fn build(self) -> Result<Canvas> {
        let app = match self.app {
            Some(app) => app,
            None => default_app()?,
        };

        let mut canvas = Canvas {
            id: CanvasId::next(),
            events: Rc::new(CanvasEvents::new()),
            app,
            title: self.config.title.clone(),
            slot: BackendSlot::Unrealized(self.config),
        };

        if self.create_widget {
            canvas.create_widget()?;
        }
        Ok(canvas)
    }
}

impl Canvas {
    #[must_use]
    pub fn builder() -> CanvasBuilder {
        CanvasBuilder {
            app: None,
            config: CanvasConfig::default(),
            create_widget: true,
        }
    }

    /// Creates and realizes a canvas on the default application.
    pub fn new(config: CanvasConfig) -> Result<Self> {
        Self::builder().with_config(config).build()
    }

    /// Creates the native widget if that has not happened yet.
    ///
    /// The construction arguments are released once the backend exists. If
    /// backend creation fails they are kept, so the call can be retried.
    pub fn create_widget(&mut self) -> Result<()> {
        let BackendSlot::Unrealized(config) = &self.slot else {
            return Ok(());
        };

        self.app.activate()?;
        self.app.ensure_native()?;

        let backend = self
            .app
            .create_backend(self.handle(), config)
            .inspect_err(|e| log::warn!("{} failed to realize: {e}", self.id))?;

        log::info!(
            "{} realized with `{}` backend of application `{}`",
            self.id,
            backend.name(),
            self.app.name()
        );
        self.slot = BackendSlot::Realized(backend);
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> CanvasId {
        self.id
    }

    /// The application this canvas is built on.
    #[must_use]
    pub fn app(&self) -> &Rc<dyn Application> {
        &self.app
    }

    /// The event hub. Subscribe per channel, e.g. `events().paint.connect(..)`.
    #[must_use]
    pub fn events(&self) -> &CanvasEvents {
        &self.events
    }

    /// A back-reference suitable for handing to a backend.
    #[must_use]
    pub fn handle(&self) -> CanvasHandle {
        CanvasHandle::new(self.id, &self.events)
    }

    #[must_use]
    pub fn is_realized(&self) -> bool {
        matches!(self.slot, BackendSlot::Realized(_))
    }

    /// `true` until the construction arguments have been consumed.
    #[must_use]
    pub fn has_pending_config(&self) -> bool {
        matches!(self.slot, BackendSlot::Unrealized(_))
    }

    fn backend(&self, operation: &'static str) -> Result<&dyn CanvasBackend> {
        match &self.slot {
            BackendSlot::Realized(backend) => Ok(&**backend),
            BackendSlot::Unrealized(_) => Err(EaselError::NotRealized { operation }),
        }
    }

    fn backend_mut(&mut self, operation: &'static str) -> Result<&mut dyn CanvasBackend> {
        match &mut self.slot {
            BackendSlot::Realized(backend) => Ok(&mut **backend),
            BackendSlot::Unrealized(_) => Err(EaselError::NotRealized { operation }),
        }
    }

    /// The toolkit-native widget.
    pub fn native(&self) -> Result<&dyn Any> {
        Ok(self.backend("native")?.native())
    }

    pub fn capabilities(&self) -> Result<BackendCapabilities> {
        Ok(self.backend("capabilities")?.capabilities())
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Location and size in window coordinates.
    pub fn geometry(&self) -> Result<Geometry> {
        self.backend("geometry")?.geometry()
    }

    /// Applies a geometry change with the fewest backend calls.
    ///
    /// `(x, y)` always moves. `(x, y, w, h)` reads the current geometry once,
    /// then moves only if the position differs and resizes only if the size
    /// differs; a pair containing `None` (see [`GeometryRequest::Full`]) is
    /// left untouched.
    pub fn set_geometry(&mut self, request: impl Into<GeometryRequest>) -> Result<()> {
        let request = request.into();
        let backend = self.backend_mut("set_geometry")?;

        let plan = request.plan(|| backend.geometry())?;
        log::debug!("geometry {request:?} -> {plan:?}");

        if let Some((x, y)) = plan.location {
            backend.set_location(x, y)?;
        }
        if let Some((w, h)) = plan.size {
            backend.set_size(w, h)?;
        }
        Ok(())
    }

    /// Like [`set_geometry`](Self::set_geometry) for an untyped `(x, y)` or
    /// `(x, y, w, h)` sequence. Other lengths are rejected before any
    /// backend call.
    pub fn set_geometry_values(&mut self, values: &[Option<i64>]) -> Result<()> {
        let request = GeometryRequest::from_values(values)?;
        self.set_geometry(request)
    }

    pub fn position(&self) -> Result<(i32, i32)> {
        Ok(self.geometry()?.position())
    }

    pub fn size(&self) -> Result<(u32, u32)> {
        Ok(self.geometry()?.size())
    }

    /// Resizes the canvas to `width` x `height` pixels.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.backend_mut("resize")?.set_size(width, height)
    }

    /// Moves the canvas to `(x, y)`.
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.backend_mut("move_to")?.set_location(x, y)
    }

    // ========================================================================
    // Title
    // ========================================================================

    /// The last title set. Kept locally since not every backend can report it.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Caches `title`, then pushes it to the backend even if unchanged.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let BackendSlot::Realized(backend) = &mut self.slot else {
            return Err(EaselError::NotRealized {
                operation: "set_title",
            });
        };
        self.title = title.into();
        backend.set_title(&self.title)
    }

    // ========================================================================
    // Visibility, painting and lifecycle
    // ========================================================================

    /// Shows or hides the canvas.
    pub fn show(&mut self, visible: bool) -> Result<()> {
        self.backend_mut("show")?.set_visible(visible)
    }

    /// Asks for a repaint. Painting happens later, when the backend emits
    /// `paint`.
    pub fn update(&mut self) -> Result<()> {
        self.backend_mut("update")?.request_update()
    }

    /// Asks the backend to close the surface. The `close` event is emitted by
    /// the backend, not here.
    pub fn close(&mut self) -> Result<()> {
        log::debug!("{} close requested", self.id);
        self.backend_mut("close")?.close()
    }

    /// Makes the rendering context current.
    pub fn make_current(&mut self) -> Result<()> {
        self.backend_mut("make_current")?.set_current()
    }

    pub fn swap_buffers(&mut self) -> Result<()> {
        self.backend_mut("swap_buffers")?.swap_buffers()
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backend = match &self.slot {
            BackendSlot::Realized(backend) => backend.name(),
            BackendSlot::Unrealized(_) => "<unrealized>",
        };
        f.debug_struct("Canvas")
            .field("id", &self.id)
            .field("app", &self.app.name())
            .field("backend", &backend)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
