//! Event payloads
//!
//! Typed records carried by one emission on one canvas channel:
//!
//! - [`Event`]: the base record (kind tag, native event, extras). Used as-is
//!   for `initialize`, `stylus`, `touch` and `close`.
//! - [`MouseEvent`], [`KeyEvent`], [`ResizeEvent`], [`PaintEvent`]: the base
//!   record plus well-known typed fields.
//!
//! Every payload has two constructors: a typed builder (`new(kind)` followed
//! by `with_*` calls) and [`Payload::from_args`], the normalization point that
//! coerces loosely-typed native data into the strict field types. Arguments
//! `from_args` does not recognise are kept as extras and can be read back with
//! [`Payload::extra`].

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::errors::{EaselError, Result};
use crate::input::{modifiers_from_value, Key, Modifier, Modifiers, MouseButton};
use crate::value::{EventArgs, Extras, Value};

/// Opaque handle to the toolkit event a payload was built from.
#[derive(Clone)]
pub struct NativeEvent(Rc<dyn Any>);

impl NativeEvent {
    pub fn new<T: Any>(event: T) -> Self {
        Self(Rc::new(event))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for NativeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeEvent(..)")
    }
}

/// Common behaviour of all payload types.
pub trait Payload: Sized + fmt::Debug + 'static {
    /// Builds the payload from loosely-typed arguments.
    fn from_args(kind: &str, args: EventArgs) -> Result<Self>;

    /// The base record shared by every payload.
    fn base(&self) -> &Event;

    /// Event-kind tag, e.g. `"mouse_press"`.
    fn kind(&self) -> &str {
        self.base().kind()
    }

    fn native(&self) -> Option<&NativeEvent> {
        self.base().native()
    }

    /// Extra attribute attached at construction time.
    fn extra(&self, name: &str) -> Option<&Value> {
        self.base().extras.get(name)
    }

    fn extras(&self) -> &Extras {
        &self.base().extras
    }
}

// ============================================================================
// Event
// ============================================================================

/// The base event record.
#[derive(Debug, Clone)]
pub struct Event {
    kind: String,
    native: Option<NativeEvent>,
    extras: Extras,
}

impl Event {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            native: None,
            extras: Extras::default(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn native(&self) -> Option<&NativeEvent> {
        self.native.as_ref()
    }

    #[must_use]
    pub fn with_native(mut self, native: NativeEvent) -> Self {
        self.native = Some(native);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(name.into(), value.into());
        self
    }

    /// Consumes what is left of `args` after the typed fields were taken.
    fn finish(kind: &str, mut args: EventArgs) -> Self {
        let native = args.take_native();
        Self {
            kind: kind.to_owned(),
            native,
            extras: args.into_extras(),
        }
    }
}

impl Payload for Event {
    fn from_args(kind: &str, args: EventArgs) -> Result<Self> {
        Ok(Self::finish(kind, args))
    }

    fn base(&self) -> &Event {
        self
    }
}

fn pair_i32(value: &Value, field: &'static str) -> Result<(i32, i32)> {
    let items = value.to_tuple(field, 2)?;
    Ok((items[0].to_i32(field)?, items[1].to_i32(field)?))
}

fn required(value: Value, field: &'static str, expected: &'static str) -> Result<Value> {
    if value.is_none() {
        return Err(EaselError::Coercion {
            field,
            expected,
            found: "nothing".into(),
        });
    }
    Ok(value)
}

// ============================================================================
// MouseEvent
// ============================================================================

/// Mouse press, release, move and wheel events.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    base: Event,
    pos: (i32, i32),
    button: Option<i32>,
    modifiers: Modifiers,
    delta: i32,
}

impl MouseEvent {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            base: Event::new(kind),
            pos: (0, 0),
            button: None,
            modifiers: Modifiers::new(),
            delta: 0,
        }
    }

    #[must_use]
    pub fn with_pos(mut self, x: i32, y: i32) -> Self {
        self.pos = (x, y);
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button.code());
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_delta(mut self, delta: i32) -> Self {
        self.delta = delta;
        self
    }

    #[must_use]
    pub fn with_native(mut self, native: NativeEvent) -> Self {
        self.base = self.base.with_native(native);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base = self.base.with_extra(name, value);
        self
    }

    /// Mouse position in screen coordinates.
    #[must_use]
    pub fn pos(&self) -> (i32, i32) {
        self.pos
    }

    /// Button code (left=1, right=2, middle=3), if the event concerns one.
    #[must_use]
    pub fn button(&self) -> Option<i32> {
        self.button
    }

    #[must_use]
    pub fn mouse_button(&self) -> Option<MouseButton> {
        self.button.and_then(MouseButton::from_code)
    }

    /// Modifier keys held down when the event occurred.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Amount of scrolling.
    #[must_use]
    pub fn delta(&self) -> i32 {
        self.delta
    }
}

impl Payload for MouseEvent {
    fn from_args(kind: &str, mut args: EventArgs) -> Result<Self> {
        let pos = match args.take("pos") {
            Value::None => (0, 0),
            v => pair_i32(&v, "pos")?,
        };
        let button = match args.take("button") {
            Value::None => None,
            v => Some(v.to_i32("button")?),
        };
        let modifiers = modifiers_from_value(&args.take("modifiers"))?;
        let delta = match args.take("delta") {
            Value::None => 0,
            v => v.to_i32("delta")?,
        };

        Ok(Self {
            base: Event::finish(kind, args),
            pos,
            button,
            modifiers,
            delta,
        })
    }

    fn base(&self) -> &Event {
        &self.base
    }
}

// ============================================================================
// KeyEvent
// ============================================================================

/// Key press and release events.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    base: Event,
    key: Key,
    text: String,
    modifiers: Modifiers,
    auto_repeat: bool,
}

impl KeyEvent {
    #[must_use]
    pub fn new(kind: impl Into<String>, key: Key) -> Self {
        Self {
            base: Event::new(kind),
            key,
            text: String::new(),
            modifiers: Modifiers::new(),
            auto_repeat: false,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_auto_repeat(mut self, auto_repeat: bool) -> Self {
        self.auto_repeat = auto_repeat;
        self
    }

    #[must_use]
    pub fn with_native(mut self, native: NativeEvent) -> Self {
        self.base = self.base.with_native(native);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base = self.base.with_extra(name, value);
        self
    }

    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Text representation of the key; may be empty.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// `true` if generated by the key being held down.
    #[must_use]
    pub fn auto_repeat(&self) -> bool {
        self.auto_repeat
    }
}

impl Payload for KeyEvent {
    fn from_args(kind: &str, mut args: EventArgs) -> Result<Self> {
        let key = Key::from_value(&required(args.take("key"), "key", "a key code or key name")?)?;
        let text = args.take("text").to_text("text")?;
        let modifiers = modifiers_from_value(&args.take("modifiers"))?;
        let auto_repeat = match args.take("auto_repeat") {
            Value::None => false,
            v => v.to_bool("auto_repeat")?,
        };

        Ok(Self {
            base: Event::finish(kind, args),
            key,
            text,
            modifiers,
            auto_repeat,
        })
    }

    fn base(&self) -> &Event {
        &self.base
    }
}

// ============================================================================
// ResizeEvent
// ============================================================================

/// The canvas changed size.
#[derive(Debug, Clone)]
pub struct ResizeEvent {
    base: Event,
    size: (u32, u32),
}

impl ResizeEvent {
    #[must_use]
    pub fn new(kind: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            base: Event::new(kind),
            size: (width, height),
        }
    }

    #[must_use]
    pub fn with_native(mut self, native: NativeEvent) -> Self {
        self.base = self.base.with_native(native);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base = self.base.with_extra(name, value);
        self
    }

    /// New `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl Payload for ResizeEvent {
    fn from_args(kind: &str, mut args: EventArgs) -> Result<Self> {
        let value = required(args.take("size"), "size", "a (width, height) tuple")?;
        let items = value.to_tuple("size", 2)?;
        let size = (items[0].to_u32("size")?, items[1].to_u32("size")?);

        Ok(Self {
            base: Event::finish(kind, args),
            size,
        })
    }

    fn base(&self) -> &Event {
        &self.base
    }
}

// ============================================================================
// PaintEvent
// ============================================================================

/// Damaged area as `(x, y, width, height)`.
pub type Region = (i32, i32, u32, u32);

/// All or part of the canvas needs repainting.
#[derive(Debug, Clone)]
pub struct PaintEvent {
    base: Event,
    region: Option<Region>,
}

impl PaintEvent {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            base: Event::new(kind),
            region: None,
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    #[must_use]
    pub fn with_native(mut self, native: NativeEvent) -> Self {
        self.base = self.base.with_native(native);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base = self.base.with_extra(name, value);
        self
    }

    /// Region to repaint; `None` means the entire surface.
    #[must_use]
    pub fn region(&self) -> Option<Region> {
        self.region
    }
}

impl Payload for PaintEvent {
    fn from_args(kind: &str, mut args: EventArgs) -> Result<Self> {
        let region = match args.take("region") {
            Value::None => None,
            v => {
                let items = v.to_tuple("region", 4)?;
                Some((
                    items[0].to_i32("region")?,
                    items[1].to_i32("region")?,
                    items[2].to_u32("region")?,
                    items[3].to_u32("region")?,
                ))
            }
        };

        Ok(Self {
            base: Event::finish(kind, args),
            region,
        })
    }

    fn base(&self) -> &Event {
        &self.base
    }
}
