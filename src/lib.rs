#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! # Easel
//!
//! A toolkit-independent drawing surface. A [`Canvas`] forwards title,
//! geometry, visibility and lifecycle requests to exactly one
//! [`CanvasBackend`], and every backend reports native input through the same
//! twelve typed event channels.
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use easel::prelude::*;
//!
//! let app = Rc::new(HeadlessApplication::new());
//! let mut canvas = Canvas::builder().with_app(app.clone()).build()?;
//! canvas.events().paint.connect(|_| println!("paint"));
//! canvas.update()?;
//! app.process_events();
//! ```

pub use easel_app::{
    clear_default_app, default_app, set_default_app, Application, BackendCapabilities, Canvas,
    CanvasBackend, CanvasBuilder, CanvasConfig, CanvasHandle, CanvasId, HeadlessApplication,
    HeadlessBackend,
};
pub use easel_core::{
    CanvasEvents, Channel, EaselError, Event, EventArgs, EventEmitter, Geometry, GeometryRequest,
    HandlerId, Key, KeyEvent, Modifier, MouseButton, MouseEvent, NativeEvent, PaintEvent, Payload,
    ResizeEvent, Result, Value,
};

#[cfg(feature = "winit")]
pub use easel_app::winit;

/// Commonly used items.
pub mod prelude {
    pub use crate::{
        Application, BackendCapabilities, Canvas, CanvasBackend, CanvasConfig, CanvasHandle,
        Channel, EaselError, Event, EventArgs, Geometry, GeometryRequest, HeadlessApplication,
        KeyEvent, Modifier, MouseButton, MouseEvent, PaintEvent, Payload, ResizeEvent, Value,
    };
}
