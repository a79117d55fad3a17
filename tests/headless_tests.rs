//! Headless Backend Tests
//!
//! Tests for:
//! - Backend creation through the default application
//! - Synchronous resize and deferred paint delivery
//! - Close semantics
//! - Embedded surfaces
//! - Canvas configuration loading

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use easel::{
    BackendCapabilities, Canvas, CanvasConfig, Channel, EaselError, EventArgs, Geometry,
    HeadlessApplication, HeadlessBackend, MouseButton,
};

fn headless_canvas(config: CanvasConfig) -> (Rc<HeadlessApplication>, Canvas) {
    let app = Rc::new(HeadlessApplication::new());
    let canvas = Canvas::builder()
        .with_app(app.clone())
        .with_config(config)
        .build()
        .unwrap();
    (app, canvas)
}

fn counter() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    (count.clone(), count)
}

// ============================================================================
// Realization
// ============================================================================

#[test]
fn realization_activates_app_and_emits_initialize() {
    let app = Rc::new(HeadlessApplication::new());
    let mut canvas = Canvas::builder()
        .with_app(app.clone())
        .create_widget(false)
        .build()
        .unwrap();

    let (initialized, c) = counter();
    canvas
        .events()
        .initialize
        .connect(move |_| c.set(c.get() + 1));

    assert!(!app.is_active());
    canvas.create_widget().unwrap();
    canvas.create_widget().unwrap();

    assert!(app.is_active());
    assert!(app.has_native_loop());
    assert_eq!(app.backends_created(), 1);
    assert_eq!(initialized.get(), 1);
}

#[test]
fn initial_geometry_comes_from_config() {
    let (_app, canvas) =
        headless_canvas(CanvasConfig::new().with_size(320, 240).with_position(5, 6));
    assert_eq!(canvas.geometry().unwrap(), Geometry::new(5, 6, 320, 240));
    assert_eq!(canvas.size().unwrap(), (320, 240));
    assert_eq!(canvas.position().unwrap(), (5, 6));
}

#[test]
fn native_widget_is_the_headless_backend() {
    let (_app, mut canvas) = headless_canvas(CanvasConfig::new().with_title("native"));
    canvas.show(true).unwrap();

    let backend = canvas
        .native()
        .unwrap()
        .downcast_ref::<HeadlessBackend>()
        .unwrap();
    assert_eq!(backend.title(), "native");
    assert!(backend.is_visible());
}

#[test]
fn context_operations() {
    let (_app, mut canvas) = headless_canvas(CanvasConfig::new());
    assert!(matches!(
        canvas.make_current(),
        Err(EaselError::NotImplemented {
            backend: "headless",
            operation: "set_current"
        })
    ));
    assert!(canvas.swap_buffers().is_ok());
}

// ============================================================================
// Resize and paint
// ============================================================================

#[test]
fn resize_is_emitted_once_with_new_size() {
    let (_app, mut canvas) = headless_canvas(CanvasConfig::new().with_size(100, 100));
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let s = sizes.clone();
    canvas
        .events()
        .resize
        .connect(move |e| s.borrow_mut().push(e.size()));

    canvas.set_geometry((0, 0, 800, 600)).unwrap();
    canvas.set_geometry((0, 0, 800, 600)).unwrap();
    canvas.resize(800, 600).unwrap();

    assert_eq!(*sizes.borrow(), vec![(800, 600)]);
}

#[test]
fn paint_is_delivered_on_the_next_turn() {
    let (app, mut canvas) = headless_canvas(CanvasConfig::new());
    let (paints, c) = counter();
    canvas.events().paint.connect(move |_| c.set(c.get() + 1));

    canvas.update().unwrap();
    canvas.update().unwrap();
    assert_eq!(paints.get(), 0);
    assert_eq!(app.pending_paints(), 1);

    assert_eq!(app.process_events(), 1);
    assert_eq!(paints.get(), 1);
    assert_eq!(app.process_events(), 0);
}

#[test]
fn paints_are_queued_per_canvas() {
    let app = Rc::new(HeadlessApplication::new());
    let mut a = Canvas::builder().with_app(app.clone()).build().unwrap();
    let mut b = Canvas::builder().with_app(app.clone()).build().unwrap();

    a.update().unwrap();
    b.update().unwrap();
    a.update().unwrap();

    assert_eq!(app.pending_paints(), 2);
    assert_eq!(app.process_events(), 2);
}

#[test]
fn paint_for_a_dropped_canvas_is_discarded() {
    let (app, mut canvas) = headless_canvas(CanvasConfig::new());
    canvas.update().unwrap();
    drop(canvas);

    assert_eq!(app.pending_paints(), 1);
    assert_eq!(app.process_events(), 0);
}

// ============================================================================
// Close
// ============================================================================

#[test]
fn close_emits_once_and_cancels_pending_paint() {
    let (app, mut canvas) = headless_canvas(CanvasConfig::new().with_visible(true));
    let (closes, c) = counter();
    canvas.events().close.connect(move |_| c.set(c.get() + 1));

    canvas.update().unwrap();
    canvas.close().unwrap();
    canvas.close().unwrap();

    assert_eq!(closes.get(), 1);
    assert_eq!(app.pending_paints(), 0);

    let backend = canvas
        .native()
        .unwrap()
        .downcast_ref::<HeadlessBackend>()
        .unwrap();
    assert!(backend.is_closed());
    assert!(!backend.is_visible());
}

#[test]
fn closed_surface_rejects_changes() {
    let (_app, mut canvas) = headless_canvas(CanvasConfig::new());
    canvas.close().unwrap();

    assert!(matches!(canvas.resize(1, 1), Err(EaselError::Backend(_))));
    assert!(matches!(canvas.update(), Err(EaselError::Backend(_))));
    assert!(matches!(canvas.show(true), Err(EaselError::Backend(_))));
}

// ============================================================================
// Embedded surfaces
// ============================================================================

#[test]
fn embedded_surface_capabilities() {
    let (_app, mut canvas) =
        headless_canvas(CanvasConfig::new().with_title("outer").with_extra("embedded", true));

    let caps = canvas.capabilities().unwrap();
    assert!(caps.contains(BackendCapabilities::RESIZE));
    assert!(!caps.contains(BackendCapabilities::TITLE));
    assert!(!caps.contains(BackendCapabilities::LOCATION));

    // Title changes are cached but not applied.
    canvas.set_title("inner").unwrap();
    assert_eq!(canvas.title(), "inner");
    let backend = canvas
        .native()
        .unwrap()
        .downcast_ref::<HeadlessBackend>()
        .unwrap();
    assert_eq!(backend.title(), "outer");

    assert!(matches!(
        canvas.move_to(1, 1),
        Err(EaselError::Unsupported {
            operation: "set_location",
            ..
        })
    ));
    assert!(canvas.set_geometry_values(&[None, None, Some(50), Some(60)]).is_ok());
    assert_eq!(canvas.size().unwrap(), (50, 60));
}

#[test]
fn top_level_surface_capabilities() {
    let (_app, canvas) = headless_canvas(CanvasConfig::new());
    let caps = canvas.capabilities().unwrap();
    assert!(caps.contains(BackendCapabilities::TITLE | BackendCapabilities::LOCATION));
    assert!(!caps.contains(BackendCapabilities::GL_CONTEXT));
}

// ============================================================================
// Backend emission through the handle
// ============================================================================

#[test]
fn handle_emits_typed_events() {
    let (_app, canvas) = headless_canvas(CanvasConfig::new());
    let seen = Rc::new(RefCell::new(None));
    let s = seen.clone();
    canvas
        .events()
        .mouse_press
        .connect(move |e| *s.borrow_mut() = Some((e.pos(), e.mouse_button())));

    canvas
        .handle()
        .emit_args(
            Channel::MousePress,
            EventArgs::new().with("pos", (7, 8)).with("button", 1),
        )
        .unwrap();

    assert_eq!(*seen.borrow(), Some(((7, 8), Some(MouseButton::Left))));
}

#[test]
fn handle_outliving_canvas_is_inert() {
    let (_app, canvas) = headless_canvas(CanvasConfig::new());
    let handle = canvas.handle();
    assert!(handle.is_alive());

    drop(canvas);
    assert!(!handle.is_alive());
    assert!(handle
        .emit_args(Channel::Close, EventArgs::new())
        .is_ok());
}

#[test]
fn handle_reports_malformed_args_after_canvas_is_gone() {
    let (_app, canvas) = headless_canvas(CanvasConfig::new());
    let handle = canvas.handle();
    drop(canvas);

    let err = handle
        .emit_args(Channel::Resize, EventArgs::new().with("size", vec![1, 2, 3]))
        .unwrap_err();
    assert!(matches!(err, EaselError::Arity { field: "size", .. }));
    assert!(handle
        .emit_args(Channel::KeyPress, EventArgs::new())
        .is_err());
    assert!(handle
        .emit_args(Channel::Resize, EventArgs::new().with("size", (2, 2)))
        .is_ok());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_defaults() {
    let config = CanvasConfig::default();
    assert_eq!(config.size, (800, 600));
    assert_eq!(config.position, None);
    assert!(!config.show);
    assert!(config.resizable);
    assert!(config.decorate);
    assert!(!config.extra_flag("embedded"));
}

#[test]
fn config_from_json_fills_missing_fields() {
    let config = CanvasConfig::from_json_str(
        r#"{ "title": "Plot", "size": [640, 480], "extra": { "embedded": true } }"#,
    )
    .unwrap();

    assert_eq!(config.title, "Plot");
    assert_eq!(config.size, (640, 480));
    assert!(config.resizable);
    assert!(config.extra_flag("embedded"));
}

#[test]
fn config_round_trips_through_json() {
    let config = CanvasConfig::new()
        .with_title("T")
        .with_position(1, 2)
        .with_vsync(true);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(CanvasConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn malformed_config_is_reported() {
    let err = CanvasConfig::from_json_str(r#"{ "size": "big" }"#).unwrap_err();
    assert!(matches!(err, EaselError::Config(_)));
}
