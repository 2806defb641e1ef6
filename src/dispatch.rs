//! Touch dispatch and the press/long-press/click state machine.

use crate::events::{TouchEvent, TouchKind};
use crate::timer::{Task, TimerId};
use crate::tree::ViewTree;
use crate::view::ViewId;
use cgmath::Point2;

impl ViewTree {
    /// Delivers a pointer event from the surface, in root coordinates.
    ///
    /// A view that consumes a press captures the pointer: the following drags and the release go
    /// straight to it. Moves update the hovered view. Returns whether any view consumed the event.
    pub fn dispatch_touch_event(&mut self, event: TouchEvent) -> bool {
        match event.kind {
            TouchKind::Press => {
                self.touch_target = None;
                let root = self.root();
                self.dispatch_touch(root, &event)
            }
            TouchKind::Drag | TouchKind::Release => {
                let target = self.touch_target.filter(|target| self.contains(*target));
                match target {
                    Some(target) => {
                        if event.kind == TouchKind::Release {
                            self.touch_target = None;
                        }
                        self.on_touch_event(target, &event)
                    }
                    None => {
                        self.touch_target = None;
                        let root = self.root();
                        self.dispatch_touch(root, &event)
                    }
                }
            }
            TouchKind::Move | TouchKind::Enter => {
                self.update_hover(event.location);
                if event.kind == TouchKind::Enter {
                    return false;
                }
                let root = self.root();
                self.dispatch_touch(root, &event)
            }
            TouchKind::Exit => {
                let mut consumed = false;
                if let Some(target) = self.touch_target.take() {
                    self.cancel_press(target);
                    consumed = true;
                }
                if let Some(hovered) = self.hovered {
                    consumed |= self.on_touch_event(hovered, &event);
                    self.set_hovered(hovered, false);
                }
                consumed
            }
        }
    }

    /// Offers an event to a view and its subtree.
    ///
    /// A container may intercept the event. Otherwise subviews are tried topmost first, and the
    /// first one under the event's location that consumes it wins. If none does, the view handles
    /// the event itself.
    pub fn dispatch_touch(&mut self, id: ViewId, event: &TouchEvent) -> bool {
        let intercepted = match self
            .nodes
            .get_mut(&id)
            .and_then(|node| node.view.layout.as_deref_mut())
        {
            Some(layout) => layout.intercept_touch(event),
            None => false,
        };
        if intercepted {
            tracing::trace!(view = %id, kind = ?event.kind, "touch intercepted");
            return self.on_touch_event(id, event);
        }

        let subviews = self.subviews(id).to_vec();
        for subview in subviews.into_iter().rev() {
            if self.hit_test(subview, event.location) && self.dispatch_touch(subview, event) {
                return true;
            }
        }
        self.on_touch_event(id, event)
    }

    /// Runs a view's own touch handling: the touch listener first, then the click state machine.
    pub fn on_touch_event(&mut self, id: ViewId, event: &TouchEvent) -> bool {
        let consumed = self.handle_touch(id, event);
        if consumed && event.kind == TouchKind::Press {
            self.touch_target = Some(id);
        }
        consumed
    }

    fn handle_touch(&mut self, id: ViewId, event: &TouchEvent) -> bool {
        let (listener, handles_clicks, pressed) = match self.nodes.get(&id) {
            Some(node) if node.view.is_visible() && node.view.enabled => (
                node.view.on_touch.clone(),
                node.view.handles_clicks(),
                node.view.pressed,
            ),
            _ => return false,
        };

        if let Some(listener) = listener {
            if listener.call((id, *event)) {
                return true;
            }
        }
        if !handles_clicks {
            return false;
        }

        match event.kind {
            TouchKind::Press => {
                self.press(id);
                true
            }
            TouchKind::Release => {
                self.release(id, event.location);
                true
            }
            TouchKind::Drag => {
                if pressed && !self.hit_test(id, event.location) {
                    self.cancel_press(id);
                }
                true
            }
            TouchKind::Move => false,
            TouchKind::Enter => {
                self.set_hovered(id, true);
                true
            }
            TouchKind::Exit => {
                self.cancel_press(id);
                self.set_hovered(id, false);
                true
            }
        }
    }

    fn press(&mut self, id: ViewId) {
        let timeout = self.config().long_press_timeout;
        let deadline = self.now() + timeout;
        let previous = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.view.pressed = true;
                node.view.long_press_fired = false;
                node.view.refresh_drawable_state();
                node.view.long_press_timer.take()
            }
            None => return,
        };
        if let Some(timer) = previous {
            self.timers.cancel(timer);
        }

        let timer = self.timers.schedule(deadline, Task::LongPress(id));
        if let Some(node) = self.nodes.get_mut(&id) {
            node.view.long_press_timer = Some(timer);
        }
        tracing::trace!(view = %id, "pressed");
        self.invalidate(id);
    }

    fn release(&mut self, id: ViewId, location: Point2<f64>) {
        let (was_pressed, long_pressed) = match self.nodes.get(&id) {
            Some(node) => (node.view.pressed, node.view.long_press_fired),
            None => return,
        };
        let inside = self.hit_test(id, location);
        self.cancel_press(id);
        if was_pressed && inside && !long_pressed {
            self.perform_click(id);
        }
    }

    /// Leaves the pressed state without clicking and cancels a pending long press.
    pub(crate) fn cancel_press(&mut self, id: ViewId) {
        let timer = match self.nodes.get_mut(&id) {
            Some(node) => {
                let was_pressed = node.view.pressed;
                node.view.pressed = false;
                node.view.refresh_drawable_state();
                if !was_pressed && node.view.long_press_timer.is_none() {
                    return;
                }
                node.view.long_press_timer.take()
            }
            None => return,
        };
        if let Some(timer) = timer {
            self.timers.cancel(timer);
        }
        self.invalidate(id);
    }

    pub(crate) fn set_hovered(&mut self, id: ViewId, hovered: bool) {
        if hovered {
            self.hovered = Some(id);
        } else if self.hovered == Some(id) {
            self.hovered = None;
        }
        let changed = match self.nodes.get_mut(&id) {
            Some(node) if node.view.hovered != hovered => {
                node.view.hovered = hovered;
                node.view.refresh_drawable_state();
                true
            }
            _ => false,
        };
        if changed {
            self.invalidate(id);
        }
    }

    /// Synthesizes enter/exit when the pointer moves onto a different view.
    fn update_hover(&mut self, location: Point2<f64>) {
        let root = self.root();
        let target = self.hover_target(root, location);
        if target == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered {
            self.on_touch_event(previous, &TouchEvent::exit(location.x, location.y));
            self.set_hovered(previous, false);
        }
        if let Some(target) = target {
            self.on_touch_event(target, &TouchEvent::enter(location.x, location.y));
        }
        self.hovered = target;
    }

    /// The topmost, deepest view under `location` that reacts to touches.
    fn hover_target(&self, id: ViewId, location: Point2<f64>) -> Option<ViewId> {
        for subview in self.subviews(id).iter().rev() {
            if self.hit_test(*subview, location) {
                if let Some(target) = self.hover_target(*subview, location) {
                    return Some(target);
                }
            }
        }
        let view = self.view(id).ok()?;
        let interactive = view.enabled && (view.handles_clicks() || view.on_touch.is_some());
        if interactive && id != self.root() && self.hit_test(id, location) {
            Some(id)
        } else {
            None
        }
    }

    /// Invokes a view's click listener. Returns whether it had one.
    pub fn perform_click(&mut self, id: ViewId) -> bool {
        let listener = match self.nodes.get(&id) {
            Some(node) => node.view.on_click.clone(),
            None => return false,
        };
        match listener {
            Some(listener) => {
                tracing::debug!(view = %id, "click");
                listener.call(id);
                true
            }
            None => false,
        }
    }

    pub(crate) fn fire_long_press(&mut self, id: ViewId, timer: TimerId) {
        let listener = match self.nodes.get_mut(&id) {
            Some(node) if node.view.pressed && node.view.long_press_timer == Some(timer) => {
                node.view.long_press_timer = None;
                node.view.long_press_fired = true;
                node.view.on_long_click.clone()
            }
            _ => return,
        };
        tracing::debug!(view = %id, "long press");
        if let Some(listener) = listener {
            listener.call(id);
        }
    }
}
