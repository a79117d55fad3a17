//! Drives a canvas on the headless backend and logs every event it emits.
//!
//! Run with `RUST_LOG=debug cargo run --example headless_canvas`.

use std::cell::Cell;
use std::rc::Rc;

use easel::prelude::*;
use easel::{set_default_app, EventArgs};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app = Rc::new(HeadlessApplication::new());
    set_default_app(app.clone());

    let mut canvas = Canvas::builder()
        .with_config(
            CanvasConfig::new()
                .with_title("Headless demo")
                .with_size(640, 480),
        )
        .create_widget(false)
        .build()?;

    let events = canvas.events();
    events
        .initialize
        .connect(|e| log::info!("{}: backend ready", e.kind()));
    events
        .resize
        .connect(|e| log::info!("{}: {:?}", e.kind(), e.size()));
    let paints = Rc::new(Cell::new(0));
    let counter = paints.clone();
    events.paint.connect(move |e| {
        counter.set(counter.get() + 1);
        log::info!("{}: region {:?}", e.kind(), e.region());
    });
    events.mouse_press.connect(|e| {
        log::info!(
            "{}: button {:?} at {:?} with {:?}",
            e.kind(),
            e.mouse_button(),
            e.pos(),
            e.modifiers()
        );
    });
    events.close.connect(|e| log::info!("{}", e.kind()));

    canvas.create_widget()?;
    canvas.set_title("Headless demo (running)")?;
    canvas.set_geometry((20, 20, 800, 600))?;
    canvas.set_geometry_values(&[None, None, Some(1024), Some(768)])?;
    canvas.show(true)?;

    canvas.update()?;
    canvas.update()?;
    app.process_events();

    // What a toolkit backend does with a native click.
    canvas.handle().emit_args(
        Channel::MousePress,
        EventArgs::new()
            .with("pos", (120, 80))
            .with("button", 1)
            .with("modifiers", vec!["Shift"])
            .with("device", "trackpad"),
    )?;

    log::info!("final geometry {:?}, title {:?}", canvas.geometry()?, canvas.title());
    canvas.close()?;
    canvas.close()?;

    log::info!("{} paint event(s) delivered", paints.get());
    Ok(())
}
