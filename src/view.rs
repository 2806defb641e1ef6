use crate::drawable::{Drawable, DrawableState};
use crate::events::{
    AttachListener, ClickListener, FocusListener, LongClickListener, TouchListener,
};
use crate::layout::Layout;
use crate::params::LayoutParams;
use crate::rect::{Insets, Rect};
use crate::timer::TimerId;
use crate::widgets::Widget;
use cgmath::{Point2, Vector2, Zero};
use core::fmt;
use uuid::Uuid;

/// Unique identifier of a view in a [`ViewTree`](crate::ViewTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    pub(crate) fn new() -> ViewId {
        ViewId(Uuid::new_v4())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Whether a view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    /// Drawn and laid out, but never hit.
    Invisible,
    /// Not drawn and not hit. Unlike Android, still measured and laid out.
    Gone,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Visible
    }
}

/// Render-time transform; independent of layout bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector2<f64>,
    /// Clockwise rotation in degrees around the view center.
    pub rotation: f64,
    /// Scale around the view center.
    pub scale: Vector2<f64>,
    pub opacity: f64,
}

impl Transform {
    pub fn identity() -> Transform {
        Transform {
            translation: Vector2::zero(),
            rotation: 0.,
            scale: Vector2::new(1., 1.),
            opacity: 1.,
        }
    }

    /// True if rotation and scale leave the view untouched.
    pub fn is_rigid(&self) -> bool {
        self.rotation == 0. && self.scale == Vector2::new(1., 1.)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

/// A single node of the view tree: geometry, state and listeners.
///
/// Structure (superview and subviews) is owned by the tree. A view becomes a container by
/// carrying a [`Layout`], and draws content by carrying a [`Widget`].
#[derive(Debug)]
pub struct View {
    pub(crate) params: LayoutParams,
    pub(crate) padding: Insets,
    pub(crate) visibility: Visibility,
    pub(crate) enabled: bool,
    pub(crate) clickable: bool,
    pub(crate) focusable: bool,
    pub(crate) focused: bool,
    pub(crate) clip_children: bool,
    pub(crate) minimum_size: Vector2<f64>,
    pub(crate) background: Option<Box<dyn Drawable>>,
    pub(crate) scroll: Vector2<f64>,
    pub(crate) transform: Transform,

    pub(crate) measured: Vector2<f64>,
    pub(crate) left: f64,
    pub(crate) top: f64,
    pub(crate) right: f64,
    pub(crate) bottom: f64,

    pub(crate) layout: Option<Box<dyn Layout>>,
    pub(crate) widget: Option<Box<dyn Widget>>,

    pub(crate) pressed: bool,
    pub(crate) hovered: bool,
    pub(crate) long_press_fired: bool,
    pub(crate) long_press_timer: Option<TimerId>,
    pub(crate) attached: bool,

    pub(crate) on_click: Option<ClickListener>,
    pub(crate) on_long_click: Option<LongClickListener>,
    pub(crate) on_touch: Option<TouchListener>,
    pub(crate) on_focus_change: Option<FocusListener>,
    pub(crate) on_attach_state: Option<AttachListener>,
}

impl Default for View {
    fn default() -> Self {
        View {
            params: LayoutParams::default(),
            padding: Insets::zero(),
            visibility: Visibility::Visible,
            enabled: true,
            clickable: false,
            focusable: false,
            focused: false,
            clip_children: false,
            minimum_size: Vector2::zero(),
            background: None,
            scroll: Vector2::zero(),
            transform: Transform::identity(),
            measured: Vector2::zero(),
            left: 0.,
            top: 0.,
            right: 0.,
            bottom: 0.,
            layout: None,
            widget: None,
            pressed: false,
            hovered: false,
            long_press_fired: false,
            long_press_timer: None,
            attached: false,
            on_click: None,
            on_long_click: None,
            on_touch: None,
            on_focus_change: None,
            on_attach_state: None,
        }
    }
}

impl View {
    /// A plain leaf view.
    pub fn new() -> View {
        View::default()
    }

    /// A container using the given layout.
    pub fn container<L: Layout>(layout: L) -> View {
        View {
            layout: Some(Box::new(layout)),
            ..View::default()
        }
    }

    /// A leaf that draws the given widget. Widgets may make the view clickable or give it a
    /// background.
    pub fn widget<W: Widget>(widget: W) -> View {
        let mut view = View::default();
        widget.configure(&mut view);
        view.widget = Some(Box::new(widget));
        view
    }

    pub fn with_params(mut self, params: LayoutParams) -> View {
        self.params = params;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> View {
        self.padding = padding;
        self
    }

    pub fn with_background<D: Drawable + 'static>(mut self, background: D) -> View {
        self.background = Some(Box::new(background));
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> View {
        self.visibility = visibility;
        self
    }

    pub fn with_minimum_size(mut self, width: f64, height: f64) -> View {
        self.minimum_size = Vector2::new(width.max(0.), height.max(0.));
        self
    }

    pub fn with_clickable(mut self, clickable: bool) -> View {
        self.clickable = clickable;
        self
    }

    pub fn with_focusable(mut self, focusable: bool) -> View {
        self.focusable = focusable;
        self
    }

    /// Clips subviews to this view's bounds when drawing.
    pub fn with_clip_children(mut self, clip: bool) -> View {
        self.clip_children = clip;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> View {
        self.transform = transform;
        self
    }

    pub fn with_on_click(mut self, listener: ClickListener) -> View {
        self.set_on_click(Some(listener));
        self
    }

    pub fn with_on_long_click(mut self, listener: LongClickListener) -> View {
        self.set_on_long_click(Some(listener));
        self
    }

    pub fn with_on_touch(mut self, listener: TouchListener) -> View {
        self.on_touch = Some(listener);
        self
    }

    pub fn with_on_focus_change(mut self, listener: FocusListener) -> View {
        self.on_focus_change = Some(listener);
        self
    }

    pub fn with_on_attach_state(mut self, listener: AttachListener) -> View {
        self.on_attach_state = Some(listener);
        self
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True while the view is connected to the tree root.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_container(&self) -> bool {
        self.layout.is_some()
    }

    pub fn background(&self) -> Option<&dyn Drawable> {
        self.background.as_deref()
    }

    pub fn scroll(&self) -> Vector2<f64> {
        self.scroll
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the render transform. Callers should invalidate afterwards.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn minimum_size(&self) -> Vector2<f64> {
        self.minimum_size
    }

    pub fn measured_size(&self) -> Vector2<f64> {
        self.measured
    }

    pub fn measured_width(&self) -> f64 {
        self.measured.x
    }

    pub fn measured_height(&self) -> f64 {
        self.measured.y
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Bounds in the superview's coordinate system.
    pub fn frame(&self) -> Rect {
        Rect::from_edges(self.left, self.top, self.right, self.bottom)
    }

    /// Bounds in the view's own coordinate system.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(Point2::new(0., 0.), Vector2::new(self.width(), self.height()))
    }

    /// Local bounds minus padding.
    pub fn content_bounds(&self) -> Rect {
        self.local_bounds().inset(self.padding)
    }

    pub fn set_clickable(&mut self, clickable: bool) {
        self.clickable = clickable;
    }

    /// Setting a focusable view to not focusable does not clear its focus; use
    /// [`ViewTree::clear_focus`](crate::ViewTree::clear_focus).
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    pub fn set_minimum_size(&mut self, width: f64, height: f64) {
        self.minimum_size = Vector2::new(width.max(0.), height.max(0.));
    }

    pub fn set_clip_children(&mut self, clip: bool) {
        self.clip_children = clip;
    }

    /// Setting a click listener makes the view clickable.
    pub fn set_on_click(&mut self, listener: Option<ClickListener>) {
        if listener.is_some() {
            self.clickable = true;
        }
        self.on_click = listener;
    }

    pub fn set_on_long_click(&mut self, listener: Option<LongClickListener>) {
        self.on_long_click = listener;
    }

    pub fn set_on_touch(&mut self, listener: Option<TouchListener>) {
        self.on_touch = listener;
    }

    pub fn set_on_focus_change(&mut self, listener: Option<FocusListener>) {
        self.on_focus_change = listener;
    }

    pub fn set_on_attach_state(&mut self, listener: Option<AttachListener>) {
        self.on_attach_state = listener;
    }

    /// The state a background drawable should show.
    pub fn drawable_state(&self) -> DrawableState {
        if !self.enabled {
            DrawableState::Disabled
        } else if self.pressed {
            DrawableState::Pressed
        } else if self.hovered {
            DrawableState::Hover
        } else {
            DrawableState::Normal
        }
    }

    /// Pushes the current interaction state into the background.
    pub(crate) fn refresh_drawable_state(&mut self) {
        let state = self.drawable_state();
        if let Some(background) = &mut self.background {
            background.set_state(state);
        }
    }

    /// Whether the view wants press/release handling at all.
    pub(crate) fn handles_clicks(&self) -> bool {
        self.clickable || self.on_long_click.is_some()
    }

    /// Size the view wants when unconstrained: its minimum size, or its content plus padding.
    pub(crate) fn suggested_minimum_size(&self, content: Vector2<f64>) -> Vector2<f64> {
        let background = self
            .background
            .as_ref()
            .and_then(|background| background.intrinsic_size())
            .unwrap_or_else(Vector2::zero);
        Vector2::new(
            self.minimum_size
                .x
                .max(background.x)
                .max(content.x + self.padding.horizontal()),
            self.minimum_size
                .y
                .max(background.y)
                .max(content.y + self.padding.vertical()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::drawable::{ColorDrawable, StateDrawable};
    use crate::events::Listener;

    #[test]
    fn drawable_state_precedence() {
        let mut view = View::new();
        assert_eq!(view.drawable_state(), DrawableState::Normal);
        view.hovered = true;
        assert_eq!(view.drawable_state(), DrawableState::Hover);
        view.pressed = true;
        assert_eq!(view.drawable_state(), DrawableState::Pressed);
        view.enabled = false;
        assert_eq!(view.drawable_state(), DrawableState::Disabled);
    }

    #[test]
    fn refresh_pushes_state_to_background() {
        let mut view = View::new().with_background(
            StateDrawable::new(Box::new(ColorDrawable(Color::WHITE)))
                .with_pressed(Box::new(ColorDrawable(Color::BLACK))),
        );
        view.pressed = true;
        view.refresh_drawable_state();
        let mut canvas = crate::canvas::Recorder::new();
        if let Some(background) = view.background() {
            background.draw(&mut canvas, Rect::from_edges(0., 0., 1., 1.));
        }
        assert_eq!(canvas.fills(), vec![Color::BLACK]);
    }

    #[test]
    fn click_listener_makes_clickable() {
        let view = View::new().with_on_click(Listener::new(|_| ()));
        assert!(view.is_clickable());
        assert!(view.handles_clicks());

        let view = View::new().with_on_long_click(Listener::new(|_| true));
        assert!(!view.is_clickable());
        assert!(view.handles_clicks());
    }

    #[test]
    fn suggested_minimum_includes_padding() {
        let view = View::new()
            .with_padding(Insets::new(2., 4., 6., 8.))
            .with_minimum_size(5., 100.);
        assert_eq!(
            view.suggested_minimum_size(Vector2::new(10., 10.)),
            Vector2::new(18., 100.)
        );
    }
}
