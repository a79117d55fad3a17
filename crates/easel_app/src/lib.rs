//! Canvas facade and backend contract for Easel.
//!
//! - [`canvas`]: the toolkit-independent [`Canvas`]
//! - [`backend`]: the [`CanvasBackend`] trait every toolkit implements
//! - [`application`]: the [`Application`] collaborator and the default provider
//! - [`config`]: canvas construction arguments
//! - [`headless`]: an in-memory reference backend
//! - `winit`: a winit-based backend and event translator (feature `winit`)

pub mod application;
pub mod backend;
pub mod canvas;
pub mod config;
pub mod headless;
#[cfg(feature = "winit")]
pub mod winit;

pub use application::{clear_default_app, default_app, set_default_app, Application};
pub use backend::{BackendCapabilities, CanvasBackend, CanvasHandle, CanvasId};
pub use canvas::{Canvas, CanvasBuilder};
pub use config::CanvasConfig;
pub use headless::{HeadlessApplication, HeadlessBackend};
