use crate::canvas::Canvas;
use crate::events::TouchEvent;
use crate::rect::Rect;
use crate::tree::ViewTree;
use cgmath::{Point2, Vector2};
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use std::time::Instant;

/// An event from the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    Pointer(TouchEvent),
    /// The surface changed size.
    Resize(Vector2<f64>),
    /// The surface was closed by the user.
    Close,
}

/// What a call to [`Host::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub laid_out: bool,
    pub drawn: bool,
}

/// Connects a view tree to a drawing surface.
///
/// The surface pushes [`SurfaceEvent`]s through a sender from any thread; the UI thread calls
/// [`poll`](Self::poll) to apply them and repaint.
#[derive(Debug)]
pub struct Host {
    pub tree: ViewTree,
    size: Vector2<f64>,
    closed: bool,
    event_send: Sender<SurfaceEvent>,
    event_recv: Receiver<SurfaceEvent>,
}

impl Host {
    /// Creates a new Host.
    ///
    /// The tree won’t be laid out or drawn until you call `poll`.
    pub fn new(tree: ViewTree, size: Vector2<f64>) -> Host {
        let (event_send, event_recv) = channel::unbounded();
        Host {
            tree,
            size,
            closed: false,
            event_send,
            event_recv,
        }
    }

    /// A sender the surface uses to deliver events.
    pub fn sender(&self) -> Sender<SurfaceEvent> {
        self.event_send.clone()
    }

    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    /// True once the surface has sent [`SurfaceEvent::Close`].
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Receives all queued events, advances the tree to `now` and repaints if anything asked for
    /// it.
    ///
    /// Any number of layout and redraw requests made since the last poll result in at most one
    /// measure and layout of the root at the surface size, and one draw.
    pub fn poll(&mut self, now: Instant, canvas: &mut dyn Canvas) -> Frame {
        loop {
            match self.event_recv.try_recv() {
                Ok(event) => self.recv_event(event),
                // the host holds a sender, so the channel is never disconnected
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if self.closed {
            return Frame::default();
        }

        self.tree.tick(now);

        let requests = self.tree.take_requests();
        let mut frame = Frame::default();
        if self.size.x <= 0. || self.size.y <= 0. {
            return frame;
        }
        if requests.layout {
            self.tree.layout_root(self.size);
            frame.laid_out = true;
        }
        if requests.redraw || requests.layout {
            canvas.clear_rect(Rect::new(Point2::new(0., 0.), self.size));
            self.tree.draw(canvas);
            frame.drawn = true;
        }
        frame
    }

    fn recv_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Pointer(event) => {
                self.tree.dispatch_touch_event(event);
            }
            SurfaceEvent::Resize(size) => {
                if size != self.size {
                    self.size = size;
                    let root = self.tree.root();
                    self.tree.request_layout(root);
                }
            }
            SurfaceEvent::Close => {
                tracing::debug!("surface closed");
                self.closed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, Recorder};
    use crate::events::Listener;
    use crate::params::{Dimension, LayoutParams};
    use crate::view::View;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn requests_are_coalesced() {
        let mut tree = ViewTree::new();
        let view = tree.create(View::new().with_params(LayoutParams::new(
            Dimension::MatchParent,
            Dimension::MatchParent,
        )));
        tree.add_view(tree.root(), view).unwrap();
        let mut host = Host::new(tree, Vector2::new(300., 200.));
        let now = Instant::now();

        let mut canvas = Recorder::new();
        assert_eq!(
            host.poll(now, &mut canvas),
            Frame {
                laid_out: true,
                drawn: true
            }
        );
        assert_eq!(canvas.ops[0], DrawOp::Clear(Rect::from_edges(0., 0., 300., 200.)));
        assert_eq!(host.tree.view(view).unwrap().width(), 300.);

        let mut canvas = Recorder::new();
        assert_eq!(host.poll(now, &mut canvas), Frame::default());
        assert!(canvas.ops.is_empty());

        for _ in 0..3 {
            host.tree.request_layout(view);
            host.tree.invalidate(view);
        }
        host.sender()
            .send(SurfaceEvent::Resize(Vector2::new(120., 80.)))
            .unwrap();
        let mut canvas = Recorder::new();
        assert!(host.poll(now, &mut canvas).laid_out);
        assert_eq!(canvas.ops.iter().filter(|op| matches!(op, DrawOp::Clear(_))).count(), 1);
        assert_eq!(host.tree.view(view).unwrap().height(), 80.);
    }

    #[test]
    fn pointer_events_from_another_thread() {
        let clicks = Arc::new(Mutex::new(0));
        let mut tree = ViewTree::new();
        let button = {
            let clicks = Arc::clone(&clicks);
            tree.create(
                View::new()
                    .with_params(LayoutParams::new(Dimension::Exact(40.), Dimension::Exact(40.)))
                    .with_on_click(Listener::new(move |_| *clicks.lock() += 1)),
            )
        };
        tree.add_view(tree.root(), button).unwrap();
        let mut host = Host::new(tree, Vector2::new(100., 100.));
        host.poll(Instant::now(), &mut Recorder::new());

        let sender = host.sender();
        thread::spawn(move || {
            sender
                .send(SurfaceEvent::Pointer(TouchEvent::press(5., 5.)))
                .unwrap();
            sender
                .send(SurfaceEvent::Pointer(TouchEvent::release(5., 5.)))
                .unwrap();
            sender.send(SurfaceEvent::Close).unwrap();
        })
        .join()
        .unwrap();

        host.poll(Instant::now(), &mut Recorder::new());
        assert_eq!(*clicks.lock(), 1);
        assert!(host.is_closed());
    }
}
