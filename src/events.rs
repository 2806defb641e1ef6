//! Events and listeners.

use crate::view::ViewId;
use cgmath::Point2;
use core::fmt;
use parking_lot::Mutex;
use std::any::type_name;
use std::sync::Arc;

/// Pointer event phases, as delivered by the surface.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchKind {
    /// The pointer went down.
    Press = 0,
    /// The pointer went up.
    Release = 1,
    /// The pointer moved while down.
    Drag = 2,
    /// The pointer moved while up.
    Move = 3,
    /// The pointer entered a view (or the surface).
    Enter = 4,
    /// The pointer left a view (or the surface).
    Exit = 5,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchKind,

    /// Event location in the window coordinate system.
    pub location: Point2<f64>,
}

impl TouchEvent {
    pub fn new(kind: TouchKind, x: f64, y: f64) -> TouchEvent {
        TouchEvent {
            kind,
            location: Point2::new(x, y),
        }
    }

    pub fn press(x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(TouchKind::Press, x, y)
    }

    pub fn release(x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(TouchKind::Release, x, y)
    }

    pub fn drag(x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(TouchKind::Drag, x, y)
    }

    pub fn moved(x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(TouchKind::Move, x, y)
    }

    pub fn enter(x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(TouchKind::Enter, x, y)
    }

    pub fn exit(x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(TouchKind::Exit, x, y)
    }

    /// Returns a copy of this event with a different kind.
    pub fn with_kind(self, kind: TouchKind) -> TouchEvent {
        TouchEvent { kind, ..self }
    }
}

/// Whether a view was just connected to or disconnected from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachEvent {
    Attached,
    Detached,
}

/// A shared callback.
///
/// Listeners are called with the tree borrowed, so they cannot touch the tree directly; use a
/// [`Poster`](crate::Poster) to queue changes for the next tick.
pub struct Listener<A, R = ()>(Arc<Mutex<dyn FnMut(A) -> R + Send>>);

impl<A, R> Clone for Listener<A, R> {
    fn clone(&self) -> Self {
        Listener(Arc::clone(&self.0))
    }
}

impl<A, R> Listener<A, R> {
    pub fn new<F: 'static + FnMut(A) -> R + Send>(handler: F) -> Self {
        Listener(Arc::new(Mutex::new(handler)))
    }

    pub fn call(&self, arg: A) -> R {
        let mut handler = self.0.lock();
        (&mut *handler)(arg)
    }
}

impl<A, R> fmt::Debug for Listener<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Listener<{}>", type_name::<A>())
    }
}

pub type ClickListener = Listener<ViewId>;
/// Returns true if the long click was handled. The release after a long press never clicks.
pub type LongClickListener = Listener<ViewId, bool>;
/// Returns true to consume the event before the view's own handling.
pub type TouchListener = Listener<(ViewId, TouchEvent), bool>;
pub type FocusListener = Listener<(ViewId, bool)>;
pub type AttachListener = Listener<(ViewId, AttachEvent)>;
