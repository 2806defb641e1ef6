use crate::animation::{Animation, AnimationId, AnimationListener, Animator, Transforms};
use crate::canvas::Canvas;
use crate::config::ViewConfig;
use crate::drawable::Drawable;
use crate::error::{Error, Result};
use crate::events::AttachEvent;
use crate::layout::{Group, Layout, LayoutContext};
use crate::measure::MeasureSpec;
use crate::params::{Dimension, LayoutParams};
use crate::rect::{Insets, Rect};
use crate::text::{ApproximateMetrics, TextMeasure};
use crate::timer::{Task, TaskQueue};
use crate::view::{Transform, View, ViewId, Visibility};
use crate::widgets::Widget;
use cgmath::{Point2, Vector2, Zero};
use core::any::type_name;
use core::fmt;
use core::mem;
use crossbeam::channel::{self, Receiver, Sender};
use std::collections::HashMap;
use std::time::Instant;

type PostedTask = Box<dyn FnOnce(&mut ViewTree) + Send>;

/// Queues work against a tree from places that cannot borrow it, such as listeners.
///
/// Posted tasks run at the start of the next [`ViewTree::tick`].
#[derive(Clone)]
pub struct Poster {
    sender: Sender<PostedTask>,
}

impl Poster {
    pub fn post<F: 'static + FnOnce(&mut ViewTree) + Send>(&self, task: F) {
        // the tree owns the receiver; a send error means it is gone
        let _ = self.sender.send(Box::new(task));
    }
}

impl fmt::Debug for Poster {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Poster {{ pending: {} }}", self.sender.len())
    }
}

/// Layout and redraw requests that have reached the root since they were last taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requests {
    pub layout: bool,
    pub redraw: bool,
}

impl Requests {
    pub fn is_empty(&self) -> bool {
        !self.layout && !self.redraw
    }
}

#[derive(Debug)]
pub(crate) struct TreeNode {
    pub(crate) view: View,
    pub(crate) superview: Option<ViewId>,
    pub(crate) subviews: Vec<ViewId>,
}

impl Transforms for HashMap<ViewId, TreeNode> {
    fn transform_mut(&mut self, view: ViewId) -> Option<&mut Transform> {
        self.get_mut(&view).map(|node| &mut node.view.transform)
    }
}

/// A tree of views.
///
/// The tree owns every view it has created, whether attached or not. Views are addressed by
/// [`ViewId`]; the root is a plain group that fills the surface.
#[derive(Debug)]
pub struct ViewTree {
    config: ViewConfig,
    pub(crate) nodes: HashMap<ViewId, TreeNode>,
    root: ViewId,
    metrics: Box<dyn TextMeasure>,
    pub(crate) timers: TaskQueue,
    animator: Animator,
    now: Instant,
    pub(crate) focused: Option<ViewId>,
    pub(crate) touch_target: Option<ViewId>,
    pub(crate) hovered: Option<ViewId>,
    requests: Requests,
    post_send: Sender<PostedTask>,
    post_recv: Receiver<PostedTask>,
}

impl Default for ViewTree {
    fn default() -> Self {
        ViewTree::new()
    }
}

impl ViewTree {
    pub fn new() -> ViewTree {
        ViewTree::with_config(ViewConfig::default())
    }

    pub fn with_config(config: ViewConfig) -> ViewTree {
        let root = ViewId::new();
        let mut view = View::container(Group).with_params(LayoutParams::new(
            Dimension::MatchParent,
            Dimension::MatchParent,
        ));
        view.attached = true;

        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            TreeNode {
                view,
                superview: None,
                subviews: Vec::new(),
            },
        );
        let (post_send, post_recv) = channel::unbounded();

        ViewTree {
            config,
            nodes,
            root,
            metrics: Box::new(ApproximateMetrics),
            timers: TaskQueue::new(),
            animator: Animator::new(),
            now: Instant::now(),
            focused: None,
            touch_target: None,
            hovered: None,
            requests: Requests {
                layout: true,
                redraw: true,
            },
            post_send,
            post_recv,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The root view. It is always attached and cannot be removed.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// The time of the last tick.
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        &*self.metrics
    }

    /// Replaces the text metrics used to measure widgets and requests a new layout.
    pub fn set_text_measure(&mut self, metrics: Box<dyn TextMeasure>) {
        self.metrics = metrics;
        self.request_layout(self.root);
    }

    /// A handle for posting tasks from listeners.
    pub fn poster(&self) -> Poster {
        Poster {
            sender: self.post_send.clone(),
        }
    }

    /// Adds a detached view to the tree.
    pub fn create(&mut self, view: View) -> ViewId {
        let id = ViewId::new();
        self.nodes.insert(
            id,
            TreeNode {
                view,
                superview: None,
                subviews: Vec::new(),
            },
        );
        id
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn node(&self, id: ViewId) -> Result<&TreeNode> {
        self.nodes.get(&id).ok_or(Error::NoSuchView(id))
    }

    fn node_mut(&mut self, id: ViewId) -> Result<&mut TreeNode> {
        self.nodes.get_mut(&id).ok_or(Error::NoSuchView(id))
    }

    pub fn view(&self, id: ViewId) -> Result<&View> {
        self.node(id).map(|node| &node.view)
    }

    /// Mutable access to a view.
    ///
    /// Changes made through this reference do not request layout or redraw by themselves.
    pub fn view_mut(&mut self, id: ViewId) -> Result<&mut View> {
        self.node_mut(id).map(|node| &mut node.view)
    }

    pub fn superview(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|node| node.superview)
    }

    /// The subviews of a view in drawing order. Empty for unknown views.
    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(&id)
            .map(|node| &node.subviews[..])
            .unwrap_or(&[])
    }

    pub fn child_count(&self, id: ViewId) -> usize {
        self.subviews(id).len()
    }

    pub fn child_at(&self, id: ViewId, index: usize) -> Option<ViewId> {
        self.subviews(id).get(index).copied()
    }

    pub fn index_of(&self, parent: ViewId, child: ViewId) -> Option<usize> {
        self.subviews(parent).iter().position(|id| *id == child)
    }

    /// True if `ancestor` is `id` or one of its superviews.
    pub fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut current = Some(id);
        while let Some(view) = current {
            if view == ancestor {
                return true;
            }
            current = self.superview(view);
        }
        false
    }

    /// The view and all of its descendants, parents before children.
    pub fn descendants(&self, id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(view) = stack.pop() {
            if let Some(node) = self.nodes.get(&view) {
                out.push(view);
                stack.extend(node.subviews.iter().rev());
            }
        }
        out
    }

    /// Appends a subview, keeping the params the child already carries.
    pub fn add_view(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        self.insert_view(parent, child, None, None)
    }

    /// Appends a subview with the given params.
    pub fn add_view_with_params(
        &mut self,
        parent: ViewId,
        child: ViewId,
        params: LayoutParams,
    ) -> Result<()> {
        self.insert_view(parent, child, None, Some(params))
    }

    /// Inserts a subview at `index` (clamped to the number of subviews).
    pub fn add_view_at(&mut self, parent: ViewId, child: ViewId, index: usize) -> Result<()> {
        self.insert_view(parent, child, Some(index), None)
    }

    fn insert_view(
        &mut self,
        parent: ViewId,
        child: ViewId,
        index: Option<usize>,
        params: Option<LayoutParams>,
    ) -> Result<()> {
        let child_node = self.node(child)?;
        if child_node.superview.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if child == self.root {
            return Err(Error::Configuration(
                "the root view cannot be added to another view".into(),
            ));
        }
        let params = params.unwrap_or(child_node.view.params);

        let parent_node = self.node(parent)?;
        let layout = parent_node
            .view
            .layout
            .as_deref()
            .ok_or(Error::NotAContainer(parent))?;
        if self.is_ancestor(child, parent) {
            return Err(Error::Cycle { parent, child });
        }
        let params = layout.adapt_params(params)?;
        let parent_attached = parent_node.view.attached;

        if let Some(node) = self.nodes.get_mut(&child) {
            node.view.params = params;
            node.superview = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            let index = index.unwrap_or(node.subviews.len()).min(node.subviews.len());
            node.subviews.insert(index, child);
        }
        tracing::debug!(%parent, %child, "added subview");

        if parent_attached {
            self.dispatch_attached(child);
        }
        self.request_layout(parent);
        self.invalidate(parent);
        Ok(())
    }

    /// Removes a subview. The child stays in the tree, detached, and may be added again.
    pub fn remove_view(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        self.node(child)?;
        let index = self
            .node(parent)?
            .subviews
            .iter()
            .position(|id| *id == child)
            .ok_or(Error::NotAChild { parent, child })?;
        self.detach_subview(parent, index);
        self.request_layout(parent);
        self.invalidate(parent);
        Ok(())
    }

    /// Removes every subview of a view.
    pub fn remove_all_views(&mut self, parent: ViewId) -> Result<()> {
        let count = self.node(parent)?.subviews.len();
        if count == 0 {
            return Ok(());
        }
        for index in (0..count).rev() {
            self.detach_subview(parent, index);
        }
        self.request_layout(parent);
        self.invalidate(parent);
        Ok(())
    }

    fn detach_subview(&mut self, parent: ViewId, index: usize) {
        let child = match self.nodes.get_mut(&parent) {
            Some(node) if index < node.subviews.len() => node.subviews.remove(index),
            _ => return,
        };
        let was_attached = match self.nodes.get_mut(&child) {
            Some(node) => {
                node.superview = None;
                node.view.attached
            }
            None => false,
        };
        tracing::debug!(%parent, %child, "removed subview");
        if was_attached {
            self.dispatch_detached(child);
        }
    }

    /// Removes a view and all of its descendants from the tree.
    pub fn destroy(&mut self, id: ViewId) -> Result<()> {
        if id == self.root {
            return Err(Error::Configuration("the root view cannot be destroyed".into()));
        }
        if let Some(parent) = self.node(id)?.superview {
            self.remove_view(parent, id)?;
        }
        for view in self.descendants(id) {
            self.timers.cancel_view(view);
            self.animator.cancel_view(view);
            self.nodes.remove(&view);
        }
        tracing::debug!(view = %id, "destroyed view");
        Ok(())
    }

    fn dispatch_attached(&mut self, id: ViewId) {
        for view in self.descendants(id) {
            let listener = match self.nodes.get_mut(&view) {
                Some(node) => {
                    node.view.attached = true;
                    node.view.on_attach_state.clone()
                }
                None => continue,
            };
            tracing::debug!(%view, "attached");
            if let Some(listener) = listener {
                listener.call((view, AttachEvent::Attached));
            }
        }
    }

    fn dispatch_detached(&mut self, id: ViewId) {
        for view in self.descendants(id).into_iter().rev() {
            self.timers.cancel_view(view);
            self.animator.cancel_view(view);
            if self.touch_target == Some(view) {
                self.touch_target = None;
            }
            if self.hovered == Some(view) {
                self.hovered = None;
            }
            let lost_focus = self.focused == Some(view);
            if lost_focus {
                self.focused = None;
            }

            let (focus_listener, attach_listener) = match self.nodes.get_mut(&view) {
                Some(node) => {
                    let view = &mut node.view;
                    view.attached = false;
                    view.pressed = false;
                    view.hovered = false;
                    view.long_press_fired = false;
                    view.long_press_timer = None;
                    view.focused = false;
                    view.refresh_drawable_state();
                    (
                        view.on_focus_change.clone().filter(|_| lost_focus),
                        view.on_attach_state.clone(),
                    )
                }
                None => continue,
            };
            tracing::debug!(%view, "detached");
            if let Some(listener) = focus_listener {
                listener.call((view, false));
            }
            if let Some(listener) = attach_listener {
                listener.call((view, AttachEvent::Detached));
            }
        }
    }

    /// Borrows the widget of a view as a concrete type.
    pub fn widget<W: Widget>(&self, id: ViewId) -> Option<&W> {
        self.nodes
            .get(&id)
            .and_then(|node| node.view.widget.as_deref())
            .and_then(|widget| widget.as_any().downcast_ref::<W>())
    }

    /// Changes the widget of a view, then requests layout and redraw.
    pub fn update_widget<W: Widget, R>(
        &mut self,
        id: ViewId,
        update: impl FnOnce(&mut W) -> R,
    ) -> Result<R> {
        let widget = self
            .node_mut(id)?
            .view
            .widget
            .as_deref_mut()
            .and_then(|widget| widget.as_any_mut().downcast_mut::<W>())
            .ok_or_else(|| {
                Error::Configuration(format!("view {} has no {} widget", id, type_name::<W>()))
            })?;
        let result = update(widget);
        self.request_layout(id);
        self.invalidate(id);
        Ok(result)
    }

    /// Borrows the layout of a container as a concrete type.
    pub fn layout_of<L: Layout>(&self, id: ViewId) -> Option<&L> {
        self.nodes
            .get(&id)
            .and_then(|node| node.view.layout.as_deref())
            .and_then(|layout| layout.as_any().downcast_ref::<L>())
    }

    /// Changes the layout of a container, then requests layout.
    pub fn update_layout<L: Layout, R>(
        &mut self,
        id: ViewId,
        update: impl FnOnce(&mut L) -> R,
    ) -> Result<R> {
        let layout = self
            .node_mut(id)?
            .view
            .layout
            .as_deref_mut()
            .and_then(|layout| layout.as_any_mut().downcast_mut::<L>())
            .ok_or_else(|| {
                Error::Configuration(format!("view {} has no {} layout", id, type_name::<L>()))
            })?;
        let result = update(layout);
        self.request_layout(id);
        self.invalidate(id);
        Ok(result)
    }

    pub fn set_visibility(&mut self, id: ViewId, visibility: Visibility) -> Result<()> {
        let view = &mut self.node_mut(id)?.view;
        if view.visibility == visibility {
            return Ok(());
        }
        view.visibility = visibility;
        if visibility != Visibility::Visible {
            self.cancel_press(id);
            if self.hovered == Some(id) {
                self.set_hovered(id, false);
            }
        }
        self.request_layout(id);
        self.invalidate(id);
        Ok(())
    }

    /// Enables or disables a view. Disabled views ignore touches and show their disabled state.
    pub fn set_enabled(&mut self, id: ViewId, enabled: bool) -> Result<()> {
        let view = &mut self.node_mut(id)?.view;
        if view.enabled == enabled {
            return Ok(());
        }
        view.enabled = enabled;
        view.refresh_drawable_state();
        if !enabled {
            self.cancel_press(id);
        }
        self.invalidate(id);
        Ok(())
    }

    pub fn set_padding(&mut self, id: ViewId, padding: Insets) -> Result<()> {
        self.node_mut(id)?.view.padding = padding;
        self.request_layout(id);
        self.invalidate(id);
        Ok(())
    }

    pub fn set_background(&mut self, id: ViewId, background: Option<Box<dyn Drawable>>) -> Result<()> {
        let view = &mut self.node_mut(id)?.view;
        view.background = background;
        view.refresh_drawable_state();
        self.request_layout(id);
        self.invalidate(id);
        Ok(())
    }

    /// Replaces a view's layout params, adapting them to its superview's layout if it has one.
    pub fn set_layout_params(&mut self, id: ViewId, params: LayoutParams) -> Result<()> {
        let node = self.node(id)?;
        let params = match node
            .superview
            .and_then(|parent| self.nodes.get(&parent))
            .and_then(|parent| parent.view.layout.as_deref())
        {
            Some(layout) => layout.adapt_params(params)?,
            None => params.validate()?,
        };
        self.node_mut(id)?.view.params = params;
        self.request_layout(id);
        Ok(())
    }

    pub fn set_transform(&mut self, id: ViewId, transform: Transform) -> Result<()> {
        self.node_mut(id)?.view.transform = transform;
        self.invalidate(id);
        Ok(())
    }

    /// Offsets a view's content and subviews.
    pub fn scroll_to(&mut self, id: ViewId, x: f64, y: f64) -> Result<()> {
        let view = &mut self.node_mut(id)?.view;
        let scroll = Vector2::new(x, y);
        if view.scroll != scroll {
            view.scroll = scroll;
            self.invalidate(id);
        }
        Ok(())
    }

    pub fn scroll_by(&mut self, id: ViewId, dx: f64, dy: f64) -> Result<()> {
        let scroll = self.node(id)?.view.scroll;
        self.scroll_to(id, scroll.x + dx, scroll.y + dy)
    }

    /// Measures a view and its subtree. Read the result with [`View::measured_size`].
    pub fn measure(&mut self, id: ViewId, width: MeasureSpec, height: MeasureSpec) -> Result<()> {
        self.node(id)?;
        self.measure_node(id, width, height);
        Ok(())
    }

    pub(crate) fn measure_node(&mut self, id: ViewId, width: MeasureSpec, height: MeasureSpec) {
        let layout = match self.nodes.get_mut(&id) {
            Some(node) => node.view.layout.take(),
            None => return,
        };

        let measured = match layout {
            Some(mut layout) => {
                let size = layout.measure(&mut LayoutContext::new(self, id), width, height);
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.view.layout = Some(layout);
                }
                size
            }
            None => {
                let view = match self.nodes.get(&id) {
                    Some(node) => &node.view,
                    None => return,
                };
                let content = view
                    .widget
                    .as_deref()
                    .map(|widget| widget.content_size(&*self.metrics))
                    .unwrap_or_else(Vector2::zero);
                let desired = view.suggested_minimum_size(content);
                Vector2::new(width.resolve(desired.x), height.resolve(desired.y))
            }
        };

        if let Some(node) = self.nodes.get_mut(&id) {
            node.view.measured = measured;
        }
        tracing::trace!(view = %id, ?width, ?height, w = measured.x, h = measured.y, "measured");
    }

    /// Assigns a view its bounds in its superview's coordinates and lays out its subtree.
    pub fn layout(&mut self, id: ViewId, left: f64, top: f64, right: f64, bottom: f64) -> Result<()> {
        self.node(id)?;
        self.layout_node(id, Rect::from_edges(left, top, right, bottom));
        Ok(())
    }

    pub(crate) fn layout_node(&mut self, id: ViewId, frame: Rect) {
        let layout = match self.nodes.get_mut(&id) {
            Some(node) => {
                let view = &mut node.view;
                view.left = frame.left();
                view.top = frame.top();
                view.right = frame.right();
                view.bottom = frame.bottom();
                view.layout.take()
            }
            None => return,
        };
        tracing::trace!(view = %id, ?frame, "laid out");

        if let Some(mut layout) = layout {
            layout.layout(&mut LayoutContext::new(self, id), frame.size);
            if let Some(node) = self.nodes.get_mut(&id) {
                node.view.layout = Some(layout);
            }
        }
    }

    /// Measures the root at exactly the given size and lays it out to fill it.
    pub fn layout_root(&mut self, size: Vector2<f64>) {
        let (width, height) = (size.x.max(0.), size.y.max(0.));
        self.measure_node(self.root, MeasureSpec::exactly(width), MeasureSpec::exactly(height));
        self.layout_node(self.root, Rect::from_edges(0., 0., width, height));
    }

    /// Draws the whole tree.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_node(self.root, canvas);
    }

    /// Draws one view and its subtree in its superview's coordinate system.
    pub fn draw_view(&self, id: ViewId, canvas: &mut dyn Canvas) -> Result<()> {
        self.node(id)?;
        self.draw_node(id, canvas);
        Ok(())
    }

    fn draw_node(&self, id: ViewId, canvas: &mut dyn Canvas) {
        let node = match self.nodes.get(&id) {
            Some(node) => node,
            None => return,
        };
        let view = &node.view;
        if view.visibility() == Visibility::Gone {
            return;
        }

        canvas.save();
        let transform = &view.transform;
        canvas.translate(
            view.left + transform.translation.x,
            view.top + transform.translation.y,
        );
        if !transform.is_rigid() {
            let center = Vector2::new(view.width() / 2., view.height() / 2.);
            canvas.translate(center.x, center.y);
            canvas.rotate(transform.rotation);
            canvas.scale(transform.scale.x, transform.scale.y);
            canvas.translate(-center.x, -center.y);
        }
        if transform.opacity < 1. {
            canvas.multiply_alpha(transform.opacity.max(0.));
        }

        let bounds = view.local_bounds();
        if let Some(background) = &view.background {
            background.draw(canvas, bounds);
        }

        canvas.translate(-view.scroll.x, -view.scroll.y);
        if let Some(widget) = &view.widget {
            widget.draw(canvas, bounds, view.content_bounds());
        }
        if view.clip_children {
            canvas.clip_rect(bounds + view.scroll);
        }
        for subview in &node.subviews {
            self.draw_node(*subview, canvas);
        }
        canvas.restore();
    }

    /// Marks a view as needing layout. The request bubbles up to the root.
    pub fn request_layout(&mut self, id: ViewId) {
        if self.is_ancestor(self.root, id) {
            tracing::trace!(view = %id, "layout requested");
            self.requests.layout = true;
            self.requests.redraw = true;
        }
    }

    /// Marks a view as needing redraw. The request bubbles up to the root.
    pub fn invalidate(&mut self, id: ViewId) {
        if self.is_ancestor(self.root, id) {
            self.requests.redraw = true;
        }
    }

    /// Pending requests, without clearing them.
    pub fn requests(&self) -> Requests {
        self.requests
    }

    /// Takes and clears the pending requests.
    pub fn take_requests(&mut self) -> Requests {
        mem::take(&mut self.requests)
    }

    /// The view's origin in root coordinates, including translations and ancestor scroll.
    pub fn location_in_window(&self, id: ViewId) -> Result<Point2<f64>> {
        self.node(id)?;
        let mut location = Point2::new(0., 0.);
        let mut current = Some(id);
        while let Some(view) = current {
            let node = match self.nodes.get(&view) {
                Some(node) => node,
                None => break,
            };
            location.x += node.view.left + node.view.transform.translation.x;
            location.y += node.view.top + node.view.transform.translation.y;
            if let Some(parent) = node.superview.and_then(|parent| self.nodes.get(&parent)) {
                location.x -= parent.view.scroll.x;
                location.y -= parent.view.scroll.y;
            }
            current = node.superview;
        }
        Ok(location)
    }

    /// True if the point (in root coordinates) falls on a visible view with a non-zero area.
    pub fn hit_test(&self, id: ViewId, point: Point2<f64>) -> bool {
        let view = match self.nodes.get(&id) {
            Some(node) => &node.view,
            None => return false,
        };
        if !view.is_visible() {
            return false;
        }
        match self.location_in_window(id) {
            Ok(origin) => {
                let rect = Rect::new(origin, Vector2::new(view.width(), view.height()));
                !rect.is_empty() && rect.contains(point)
            }
            Err(_) => false,
        }
    }

    /// Advances the tree to `now`: runs posted tasks, fires due timers and steps animations.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;

        while let Ok(task) = self.post_recv.try_recv() {
            task(self);
        }

        for (timer, task) in self.timers.collect(now) {
            match task {
                Task::LongPress(view) => self.fire_long_press(view, timer),
            }
        }

        let mut touched = self.animator.tick(now, &mut self.nodes);
        touched.sort();
        touched.dedup();
        for view in touched {
            self.invalidate(view);
        }
    }

    /// When the next tick has work to do, if any is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.animator.is_empty() {
            return Some(self.now);
        }
        self.timers.next_deadline()
    }

    /// Gives a focusable view the focus, taking it from the previously focused view.
    ///
    /// Returns whether the view is focused afterwards.
    pub fn request_focus(&mut self, id: ViewId) -> Result<bool> {
        let view = &self.node(id)?.view;
        if !view.focusable || !view.is_visible() || !view.enabled {
            return Ok(false);
        }
        if self.focused == Some(id) {
            return Ok(true);
        }
        if let Some(previous) = self.focused {
            self.clear_focus(previous)?;
        }
        self.set_focus(id, true);
        Ok(true)
    }

    /// Removes the focus from a view if it has it.
    pub fn clear_focus(&mut self, id: ViewId) -> Result<()> {
        self.node(id)?;
        if self.focused == Some(id) {
            self.set_focus(id, false);
        }
        Ok(())
    }

    /// The focused view, if any.
    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    fn set_focus(&mut self, id: ViewId, focused: bool) {
        self.focused = if focused { Some(id) } else { None };
        let listener = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.view.focused = focused;
                node.view.on_focus_change.clone()
            }
            None => return,
        };
        tracing::debug!(view = %id, focused, "focus changed");
        if let Some(listener) = listener {
            listener.call((id, focused));
        }
        self.invalidate(id);
    }

    /// Starts an animation on a view's render transform.
    pub fn animate(&mut self, id: ViewId, animation: &Animation) -> Result<AnimationId> {
        self.start_animation(id, animation, None)
    }

    pub fn animate_with_listener(
        &mut self,
        id: ViewId,
        animation: &Animation,
        listener: AnimationListener,
    ) -> Result<AnimationId> {
        self.start_animation(id, animation, Some(listener))
    }

    fn start_animation(
        &mut self,
        id: ViewId,
        animation: &Animation,
        listener: Option<AnimationListener>,
    ) -> Result<AnimationId> {
        self.node(id)?;
        let animation_id = self.animator.start(
            id,
            animation,
            self.config.animation_duration,
            self.now,
            listener,
        );
        self.invalidate(id);
        Ok(animation_id)
    }

    pub fn cancel_animation(&mut self, id: AnimationId) -> bool {
        self.animator.cancel(id)
    }

    /// Cancels every animation running on a view.
    pub fn cancel_animations(&mut self, id: ViewId) -> bool {
        self.animator.cancel_view(id)
    }

    pub fn is_animating(&self, id: ViewId) -> bool {
        self.animator.is_animating(id)
    }
}
