//! Toolkit backend contract.
//!
//! Defines the [`CanvasBackend`] trait that decouples the [`Canvas`] facade
//! from any specific GUI toolkit. Every toolkit integration provides one type
//! implementing it; the canvas owns exactly one such instance once realized.
//!
//! All operations are required trait methods, so a backend missing one does
//! not compile. A backend that cannot honor an operation at runtime reports
//! it explicitly with [`EaselError::NotImplemented`] or
//! [`EaselError::Unsupported`]; the only permitted silent no-op is
//! [`set_title`](CanvasBackend::set_title) on surfaces without a title bar.
//!
//! Besides these methods, a backend must translate every native input or
//! lifecycle notification into exactly one emission on the matching canvas
//! channel, through the [`CanvasHandle`] it was created with.
//!
//! [`Canvas`]: crate::canvas::Canvas
//! [`EaselError::NotImplemented`]: easel_core::EaselError::NotImplemented
//! [`EaselError::Unsupported`]: easel_core::EaselError::Unsupported

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

use easel_core::{
    CanvasEvents, Channel, Event, EventArgs, Geometry, KeyEvent, MouseEvent, PaintEvent,
    ResizeEvent, Result,
};

bitflags! {
    /// What a backend's surface can actually do.
    ///
    /// Lets callers find out in advance whether, for example, moving the
    /// surface is meaningful, instead of learning it from an error.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BackendCapabilities: u32 {
        /// The surface has a title that `set_title` changes.
        const TITLE = 1 << 0;
        /// `set_location` moves the surface.
        const LOCATION = 1 << 1;
        /// `set_size` resizes the surface.
        const RESIZE = 1 << 2;
        /// `swap_buffers` presents a back buffer.
        const DOUBLE_BUFFERED = 1 << 3;
        /// `set_current` activates a rendering context.
        const GL_CONTEXT = 1 << 4;
    }
}

/// Per-toolkit adapter implementing the operations the canvas delegates.
pub trait CanvasBackend {
    /// Short toolkit name used in logs and errors.
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> BackendCapabilities;

    /// Makes the canvas's rendering context current for subsequent draw calls.
    fn set_current(&mut self) -> Result<()>;

    /// Presents the back buffer; a no-op on single-buffered surfaces.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Sets the native window title. May be a no-op for embedded widgets.
    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Resizes the surface to exactly `width` x `height` pixels.
    fn set_size(&mut self, width: u32, height: u32) -> Result<()>;

    /// Moves the surface to exactly `(x, y)`.
    ///
    /// Surfaces without [`BackendCapabilities::LOCATION`] must return
    /// [`Unsupported`](easel_core::EaselError::Unsupported).
    fn set_location(&mut self, x: i32, y: i32) -> Result<()>;

    fn set_visible(&mut self, visible: bool) -> Result<()>;

    /// Schedules a repaint. A `paint` emission must follow once the
    /// toolkit's paint cycle runs.
    fn request_update(&mut self) -> Result<()>;

    /// Shuts the surface down. Must eventually cause a `close` emission and
    /// must tolerate being called more than once.
    fn close(&mut self) -> Result<()>;

    /// Current `(x, y, width, height)` in the coordinate space used by
    /// `set_size` and `set_location`.
    fn geometry(&self) -> Result<Geometry>;

    /// The toolkit-native widget. Backends without one return themselves.
    fn native(&self) -> &dyn Any;
}

// ============================================================================
// CanvasHandle
// ============================================================================

/// Unique identity of a canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanvasId(u64);

impl CanvasId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "canvas#{}", self.0)
    }
}

/// A backend's reference back to the canvas that owns it.
///
/// Holds the canvas's event hub weakly: the canvas owns the backend, not the
/// other way round. Emissions after the canvas is gone are discarded.
#[derive(Clone)]
pub struct CanvasHandle {
    id: CanvasId,
    events: Weak<CanvasEvents>,
}

macro_rules! emit_methods {
    ($($(#[$meta:meta])* $method:ident => $field:ident : $ty:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $method(&self, event: &$ty) {
                self.with_events(|events| events.$field.emit(event));
            }
        )*
    };
}

impl CanvasHandle {
    pub(crate) fn new(id: CanvasId, events: &Rc<CanvasEvents>) -> Self {
        Self {
            id,
            events: Rc::downgrade(events),
        }
    }

    #[must_use]
    pub fn id(&self) -> CanvasId {
        self.id
    }

    /// `false` once the canvas has been dropped.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.events.strong_count() > 0
    }

    /// Runs `f` against the canvas's hub, if the canvas still exists.
    pub fn with_events<R>(&self, f: impl FnOnce(&CanvasEvents) -> R) -> Option<R> {
        if let Some(events) = self.events.upgrade() {
            Some(f(&events))
        } else {
            log::debug!("{} is gone; discarding emission", self.id);
            None
        }
    }

    emit_methods! {
        emit_initialize => initialize: Event,
        emit_resize => resize: ResizeEvent,
        emit_paint => paint: PaintEvent,
        emit_mouse_press => mouse_press: MouseEvent,
        emit_mouse_release => mouse_release: MouseEvent,
        emit_mouse_move => mouse_move: MouseEvent,
        emit_mouse_wheel => mouse_wheel: MouseEvent,
        emit_key_press => key_press: KeyEvent,
        emit_key_release => key_release: KeyEvent,
        emit_stylus => stylus: Event,
        emit_touch => touch: Event,
        emit_close => close: Event,
    }

    /// Builds the channel's payload from loosely-typed native data and emits
    /// it. Construction errors are returned and nothing is emitted, whether
    /// or not the canvas still exists.
    pub fn emit_args(&self, channel: Channel, args: EventArgs) -> Result<()> {
        match self.events.upgrade() {
            Some(events) => events.emit_args(channel, args),
            None => {
                channel.check_args(args)?;
                log::debug!("{} is gone; discarding `{channel}`", self.id);
                Ok(())
            }
        }
    }
}

impl fmt::Debug for CanvasHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasHandle")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}
