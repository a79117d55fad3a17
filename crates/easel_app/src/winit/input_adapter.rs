//! Winit event adapter
//!
//! Translates winit window events into canvas emissions, one emission per
//! native notification that has a canvas channel.

use winit::event::{ElementState, MouseScrollDelta, Touch, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, NativeKeyCode, PhysicalKey};

use easel_core::{
    Channel, Event, Key, KeyEvent, Modifier, Modifiers, MouseButton, MouseEvent, NativeEvent,
    PaintEvent, ResizeEvent,
};

use crate::backend::CanvasHandle;

/// Pixel scroll distance counted as one wheel step.
const PIXELS_PER_LINE: f64 = 20.0;

/// Converts a winit physical key into a canvas [`Key`].
///
/// Keys without a canvas name keep winit's key code name as [`Key::Other`]
/// (e.g. `"F13"`). Keys winit cannot identify become [`Key::Code`] with the
/// platform scan code, or `0` when there is none.
#[must_use]
pub fn translate_key(physical_key: PhysicalKey) -> Key {
    let code = match physical_key {
        PhysicalKey::Code(code) => code,
        PhysicalKey::Unidentified(native) => return Key::Code(native_code(native)),
    };

    match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Key0,
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Key1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Key2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Key3,
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Key4,
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Key5,
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Key6,
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Key7,
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Key8,
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Key9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        KeyCode::Space => Key::Space,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Super,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::Comma => Key::Comma,
        KeyCode::Period | KeyCode::NumpadDecimal => Key::Period,
        KeyCode::Slash | KeyCode::NumpadDivide => Key::Slash,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Quote => Key::Quote,
        KeyCode::BracketLeft => Key::BracketLeft,
        KeyCode::BracketRight => Key::BracketRight,
        KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,
        KeyCode::Equal => Key::Equal,
        KeyCode::Backquote => Key::Grave,

        other => Key::Other(format!("{other:?}")),
    }
}

fn native_code(native: NativeKeyCode) -> u32 {
    match native {
        NativeKeyCode::Android(code) | NativeKeyCode::Xkb(code) => code,
        NativeKeyCode::MacOS(code) | NativeKeyCode::Windows(code) => u32::from(code),
        NativeKeyCode::Unidentified => 0,
    }
}

#[must_use]
pub fn translate_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Back,
        winit::event::MouseButton::Forward => MouseButton::Forward,
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// Modifier set in Shift, Control, Alt, Super order.
#[must_use]
pub fn translate_modifiers(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::new();
    if state.shift_key() {
        modifiers.push(Modifier::Shift);
    }
    if state.control_key() {
        modifiers.push(Modifier::Control);
    }
    if state.alt_key() {
        modifiers.push(Modifier::Alt);
    }
    if state.super_key() {
        modifiers.push(Modifier::Super);
    }
    modifiers
}

fn wheel_steps(delta: MouseScrollDelta) -> i32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE).round() as i32,
    }
}

fn touch_event(touch: &Touch) -> Event {
    Event::new(Channel::Touch.name())
        .with_extra("id", touch.id as i64)
        .with_extra("phase", format!("{:?}", touch.phase).to_lowercase())
        .with_extra(
            "pos",
            (touch.location.x.round() as i64, touch.location.y.round() as i64),
        )
        .with_extra("pressure", touch.force.map(|f| f.normalized()))
}

/// Per-window translation state.
///
/// Winit reports cursor position and modifier state as separate events,
/// while canvas mouse and key payloads carry both; the translator keeps the
/// latest values.
#[derive(Debug)]
pub struct WinitEventTranslator {
    canvas: CanvasHandle,
    cursor: (i32, i32),
    modifiers: Modifiers,
}

impl WinitEventTranslator {
    #[must_use]
    pub fn new(canvas: CanvasHandle) -> Self {
        Self {
            canvas,
            cursor: (0, 0),
            modifiers: Modifiers::new(),
        }
    }

    /// Last known cursor position in window coordinates.
    #[must_use]
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    fn mouse_event(&self, channel: Channel, native: &WindowEvent) -> MouseEvent {
        MouseEvent::new(channel.name())
            .with_pos(self.cursor.0, self.cursor.1)
            .with_modifiers(self.modifiers.iter().copied())
            .with_native(NativeEvent::new(native.clone()))
    }

    /// Emits the canvas event corresponding to `event`, returning the channel
    /// used, or `None` for events with no canvas counterpart.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<Channel> {
        match event {
            WindowEvent::Resized(size) => {
                let payload = ResizeEvent::new(Channel::Resize.name(), size.width, size.height)
                    .with_native(NativeEvent::new(event.clone()));
                self.canvas.emit_resize(&payload);
                Some(Channel::Resize)
            }

            WindowEvent::RedrawRequested => {
                let payload = PaintEvent::new(Channel::Paint.name())
                    .with_native(NativeEvent::new(event.clone()));
                self.canvas.emit_paint(&payload);
                Some(Channel::Paint)
            }

            // A request only; the integration answers it with `Canvas::close`,
            // whose backend emits `close` once the window is gone.
            WindowEvent::CloseRequested => None,

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = translate_modifiers(modifiers.state());
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x.round() as i32, position.y.round() as i32);
                let payload = self.mouse_event(Channel::MouseMove, event);
                self.canvas.emit_mouse_move(&payload);
                Some(Channel::MouseMove)
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = translate_mouse_button(*button);
                match state {
                    ElementState::Pressed => {
                        let payload = self
                            .mouse_event(Channel::MousePress, event)
                            .with_button(button);
                        self.canvas.emit_mouse_press(&payload);
                        Some(Channel::MousePress)
                    }
                    ElementState::Released => {
                        let payload = self
                            .mouse_event(Channel::MouseRelease, event)
                            .with_button(button);
                        self.canvas.emit_mouse_release(&payload);
                        Some(Channel::MouseRelease)
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let payload = self
                    .mouse_event(Channel::MouseWheel, event)
                    .with_delta(wheel_steps(*delta));
                self.canvas.emit_mouse_wheel(&payload);
                Some(Channel::MouseWheel)
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let channel = match key_event.state {
                    ElementState::Pressed => Channel::KeyPress,
                    ElementState::Released => Channel::KeyRelease,
                };
                let payload = KeyEvent::new(channel.name(), translate_key(key_event.physical_key))
                    .with_text(key_event.text.as_deref().unwrap_or_default())
                    .with_modifiers(self.modifiers.iter().copied())
                    .with_auto_repeat(key_event.repeat)
                    .with_native(NativeEvent::new(event.clone()));
                match channel {
                    Channel::KeyPress => self.canvas.emit_key_press(&payload),
                    _ => self.canvas.emit_key_release(&payload),
                }
                Some(channel)
            }

            WindowEvent::Touch(touch) => {
                let payload = touch_event(touch).with_native(NativeEvent::new(event.clone()));
                self.canvas.emit_touch(&payload);
                Some(Channel::Touch)
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use winit::dpi::{PhysicalPosition, PhysicalSize};

    use easel_core::{CanvasEvents, Payload};

    use super::*;
    use crate::backend::CanvasId;

    /// Translator on a fresh hub, plus a count of emissions on any channel.
    fn translator() -> (Rc<CanvasEvents>, WinitEventTranslator, Rc<Cell<usize>>) {
        let events = Rc::new(CanvasEvents::new());
        let count = Rc::new(Cell::new(0));
        macro_rules! count_on {
            ($($field:ident),*) => {
                $(
                    let c = count.clone();
                    events.$field.connect(move |_| c.set(c.get() + 1));
                )*
            };
        }
        count_on!(
            initialize, resize, paint, mouse_press, mouse_release, mouse_move, mouse_wheel,
            key_press, key_release, stylus, touch, close
        );
        let translator = WinitEventTranslator::new(CanvasHandle::new(CanvasId::next(), &events));
        (events, translator, count)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[test]
    fn named_keys_are_translated() {
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Q);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::Numpad7)), Key::Key7);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::ArrowLeft)), Key::ArrowLeft);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::Backquote)), Key::Grave);
    }

    #[test]
    fn unnamed_keys_stay_distinguishable() {
        let keys: Vec<Key> = [KeyCode::F13, KeyCode::CapsLock, KeyCode::NumpadMultiply]
            .into_iter()
            .map(|code| translate_key(PhysicalKey::Code(code)))
            .collect();

        assert_eq!(keys[0], Key::Other("F13".into()));
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        assert_ne!(keys[0], keys[2]);
    }

    #[test]
    fn unidentified_keys_keep_the_native_code() {
        let key = translate_key(PhysicalKey::Unidentified(NativeKeyCode::Xkb(77)));
        assert_eq!(key, Key::Code(77));
        let key = translate_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified));
        assert_eq!(key, Key::Code(0));
    }

    #[test]
    fn modifiers_have_a_fixed_order() {
        let all = ModifiersState::SUPER
            | ModifiersState::ALT
            | ModifiersState::CONTROL
            | ModifiersState::SHIFT;
        assert_eq!(
            translate_modifiers(all).as_slice(),
            &[Modifier::Shift, Modifier::Control, Modifier::Alt, Modifier::Super]
        );
        assert_eq!(
            translate_modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT).as_slice(),
            &[Modifier::Shift, Modifier::Control]
        );
        assert!(translate_modifiers(ModifiersState::empty()).is_empty());
    }

    #[test]
    fn wheel_steps_from_lines_and_pixels() {
        assert_eq!(wheel_steps(MouseScrollDelta::LineDelta(0.0, 2.0)), 2);
        assert_eq!(wheel_steps(MouseScrollDelta::LineDelta(0.0, -1.4)), -1);
        assert_eq!(
            wheel_steps(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 60.0))),
            3
        );
        assert_eq!(
            wheel_steps(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -5.0))),
            0
        );
    }

    #[test]
    fn button_translation() {
        assert_eq!(
            translate_mouse_button(winit::event::MouseButton::Right),
            MouseButton::Right
        );
        assert_eq!(
            translate_mouse_button(winit::event::MouseButton::Other(8)),
            MouseButton::Other(8)
        );
    }

    // ========================================================================
    // Translator
    // ========================================================================

    #[test]
    fn resized_emits_one_resize() {
        let (events, mut translator, count) = translator();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let s = sizes.clone();
        events.resize.connect(move |e| {
            assert!(e.native().is_some());
            s.borrow_mut().push(e.size());
        });

        let channel = translator.translate(&WindowEvent::Resized(PhysicalSize::new(800, 600)));

        assert_eq!(channel, Some(Channel::Resize));
        assert_eq!(*sizes.borrow(), vec![(800, 600)]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn redraw_emits_one_paint() {
        let (events, mut translator, count) = translator();
        let regions = Rc::new(RefCell::new(Vec::new()));
        let r = regions.clone();
        events.paint.connect(move |e| r.borrow_mut().push(e.region()));

        let channel = translator.translate(&WindowEvent::RedrawRequested);

        assert_eq!(channel, Some(Channel::Paint));
        assert_eq!(*regions.borrow(), vec![None]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn modifier_changes_update_state_silently() {
        let (_events, mut translator, count) = translator();
        let state = ModifiersState::SHIFT | ModifiersState::ALT;

        let channel = translator.translate(&WindowEvent::ModifiersChanged(state.into()));

        assert_eq!(channel, None);
        assert_eq!(count.get(), 0);
        assert_eq!(
            translator.modifiers.as_slice(),
            &[Modifier::Shift, Modifier::Alt]
        );
    }

    #[test]
    fn close_request_emits_nothing() {
        let (_events, mut translator, count) = translator();
        assert_eq!(translator.translate(&WindowEvent::CloseRequested), None);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let (_events, mut translator, count) = translator();
        assert_eq!(translator.translate(&WindowEvent::Focused(true)), None);
        assert_eq!(translator.cursor(), (0, 0));
        assert_eq!(count.get(), 0);
    }
}
