//! Core types for Easel.
//!
//! - [`errors`]: the shared [`EaselError`] type
//! - [`value`]: loosely-typed values and constructor arguments
//! - [`input`]: key, modifier and mouse-button identifiers
//! - [`event`]: typed event payloads
//! - [`emitter`]: the per-canvas event hub
//! - [`geometry`]: canvas geometry and update reconciliation

pub mod emitter;
pub mod errors;
pub mod event;
pub mod geometry;
pub mod input;
pub mod value;

pub use emitter::{CanvasEvents, Channel, EventEmitter, HandlerId};
pub use errors::{EaselError, Result};
pub use event::{Event, KeyEvent, MouseEvent, NativeEvent, PaintEvent, Payload, Region, ResizeEvent};
pub use geometry::{Geometry, GeometryPlan, GeometryRequest};
pub use input::{Key, Modifier, Modifiers, MouseButton};
pub use value::{EventArgs, Extras, Value};
