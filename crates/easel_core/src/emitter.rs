//! Canvas event hub
//!
//! [`CanvasEvents`] groups one [`EventEmitter`] per [`Channel`]. Emission is
//! synchronous: every handler connected to the channel at the moment of the
//! call runs, in registration order, before `emit` returns. Nothing is
//! buffered or deduplicated.
//!
//! The handler list is snapshotted before fan-out, so a handler may connect,
//! disconnect or emit again (nested, on any channel) while being invoked.
//! Unbounded recursion is the caller's problem.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::errors::{EaselError, Result};
use crate::event::{Event, KeyEvent, MouseEvent, PaintEvent, Payload, ResizeEvent};
use crate::value::EventArgs;

/// The fixed set of canvas event channels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Initialize,
    Resize,
    Paint,
    MousePress,
    MouseRelease,
    MouseMove,
    MouseWheel,
    KeyPress,
    KeyRelease,
    Stylus,
    Touch,
    Close,
}

impl Channel {
    pub const ALL: [Channel; 12] = [
        Channel::Initialize,
        Channel::Resize,
        Channel::Paint,
        Channel::MousePress,
        Channel::MouseRelease,
        Channel::MouseMove,
        Channel::MouseWheel,
        Channel::KeyPress,
        Channel::KeyRelease,
        Channel::Stylus,
        Channel::Touch,
        Channel::Close,
    ];

    /// Fixed channel identifier, also used as the default event kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Channel::Initialize => "initialize",
            Channel::Resize => "resize",
            Channel::Paint => "paint",
            Channel::MousePress => "mouse_press",
            Channel::MouseRelease => "mouse_release",
            Channel::MouseMove => "mouse_move",
            Channel::MouseWheel => "mouse_wheel",
            Channel::KeyPress => "key_press",
            Channel::KeyRelease => "key_release",
            Channel::Stylus => "stylus",
            Channel::Touch => "touch",
            Channel::Close => "close",
        }
    }
}

impl Channel {
    /// Builds this channel's payload from `args` without emitting it.
    pub fn check_args(self, args: EventArgs) -> Result<()> {
        let kind = self.name();
        match self {
            Channel::Initialize | Channel::Stylus | Channel::Touch | Channel::Close => {
                Event::from_args(kind, args).map(drop)
            }
            Channel::Resize => ResizeEvent::from_args(kind, args).map(drop),
            Channel::Paint => PaintEvent::from_args(kind, args).map(drop),
            Channel::MousePress
            | Channel::MouseRelease
            | Channel::MouseMove
            | Channel::MouseWheel => MouseEvent::from_args(kind, args).map(drop),
            Channel::KeyPress | Channel::KeyRelease => KeyEvent::from_args(kind, args).map(drop),
        }
    }
}

impl FromStr for Channel {
    type Err = EaselError;

    fn from_str(s: &str) -> Result<Self> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| EaselError::UnknownChannel(s.to_owned()))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a connected handler for later disconnection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

// ============================================================================
// EventEmitter
// ============================================================================

/// One emission point carrying payloads of type `E`.
pub struct EventEmitter<E> {
    channel: Channel,
    handlers: RefCell<Vec<(HandlerId, Handler<E>)>>,
    next_id: Cell<u64>,
}

impl<E: Payload> EventEmitter<E> {
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Appends a handler; it runs after every handler connected before it.
    pub fn connect<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&E) + 'static,
    {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Returns `false` if the handler was not connected.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(hid, _)| *hid != id);
        handlers.len() != before
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Delivers `event` to every currently connected handler.
    pub fn emit(&self, event: &E) {
        let snapshot: SmallVec<[Handler<E>; 4]> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();

        log::trace!(
            "emit `{}` ({}) to {} handler(s)",
            self.channel,
            event.kind(),
            snapshot.len()
        );

        for handler in snapshot {
            handler(event);
        }
    }

    /// Builds the payload from loosely-typed arguments and emits it.
    ///
    /// Nothing is emitted if construction fails.
    pub fn emit_args(&self, kind: &str, args: EventArgs) -> Result<()> {
        let event = E::from_args(kind, args)?;
        self.emit(&event);
        Ok(())
    }
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("channel", &self.channel)
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

// ============================================================================
// CanvasEvents
// ============================================================================

/// The emitter group owned by every canvas.
#[derive(Debug)]
pub struct CanvasEvents {
    pub initialize: EventEmitter<Event>,
    pub resize: EventEmitter<ResizeEvent>,
    pub paint: EventEmitter<PaintEvent>,
    pub mouse_press: EventEmitter<MouseEvent>,
    pub mouse_release: EventEmitter<MouseEvent>,
    pub mouse_move: EventEmitter<MouseEvent>,
    pub mouse_wheel: EventEmitter<MouseEvent>,
    pub key_press: EventEmitter<KeyEvent>,
    pub key_release: EventEmitter<KeyEvent>,
    pub stylus: EventEmitter<Event>,
    pub touch: EventEmitter<Event>,
    pub close: EventEmitter<Event>,
}

impl CanvasEvents {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initialize: EventEmitter::new(Channel::Initialize),
            resize: EventEmitter::new(Channel::Resize),
            paint: EventEmitter::new(Channel::Paint),
            mouse_press: EventEmitter::new(Channel::MousePress),
            mouse_release: EventEmitter::new(Channel::MouseRelease),
            mouse_move: EventEmitter::new(Channel::MouseMove),
            mouse_wheel: EventEmitter::new(Channel::MouseWheel),
            key_press: EventEmitter::new(Channel::KeyPress),
            key_release: EventEmitter::new(Channel::KeyRelease),
            stylus: EventEmitter::new(Channel::Stylus),
            touch: EventEmitter::new(Channel::Touch),
            close: EventEmitter::new(Channel::Close),
        }
    }

    /// Constructs the channel's payload from `args` and emits it, using the
    /// channel name as the event kind.
    pub fn emit_args(&self, channel: Channel, args: EventArgs) -> Result<()> {
        let kind = channel.name();
        match channel {
            Channel::Initialize => self.initialize.emit_args(kind, args),
            Channel::Resize => self.resize.emit_args(kind, args),
            Channel::Paint => self.paint.emit_args(kind, args),
            Channel::MousePress => self.mouse_press.emit_args(kind, args),
            Channel::MouseRelease => self.mouse_release.emit_args(kind, args),
            Channel::MouseMove => self.mouse_move.emit_args(kind, args),
            Channel::MouseWheel => self.mouse_wheel.emit_args(kind, args),
            Channel::KeyPress => self.key_press.emit_args(kind, args),
            Channel::KeyRelease => self.key_release.emit_args(kind, args),
            Channel::Stylus => self.stylus.emit_args(kind, args),
            Channel::Touch => self.touch.emit_args(kind, args),
            Channel::Close => self.close.emit_args(kind, args),
        }
    }

    /// Like [`emit_args`](Self::emit_args) but addressed by channel name.
    pub fn emit_named(&self, channel: &str, args: EventArgs) -> Result<()> {
        self.emit_args(channel.parse()?, args)
    }

    #[must_use]
    pub fn handler_count(&self, channel: Channel) -> usize {
        match channel {
            Channel::Initialize => self.initialize.handler_count(),
            Channel::Resize => self.resize.handler_count(),
            Channel::Paint => self.paint.handler_count(),
            Channel::MousePress => self.mouse_press.handler_count(),
            Channel::MouseRelease => self.mouse_release.handler_count(),
            Channel::MouseMove => self.mouse_move.handler_count(),
            Channel::MouseWheel => self.mouse_wheel.handler_count(),
            Channel::KeyPress => self.key_press.handler_count(),
            Channel::KeyRelease => self.key_release.handler_count(),
            Channel::Stylus => self.stylus.handler_count(),
            Channel::Touch => self.touch.handler_count(),
            Channel::Close => self.close.handler_count(),
        }
    }
}

impl Default for CanvasEvents {
    fn default() -> Self {
        Self::new()
    }
}
