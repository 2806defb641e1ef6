//! Layout algorithms.
//!
//! A view becomes a container by carrying a [`Layout`]. The tree calls into it during the measure
//! and layout passes with a [`LayoutContext`] that gives access to the container's subviews.

mod frame;
mod linear;

pub use frame::FrameLayout;
pub use linear::{LinearLayout, Orientation};

use crate::error::Result;
use crate::events::TouchEvent;
use crate::measure::{child_measure_spec, MeasureSpec};
use crate::params::{LayoutParams, ParamsTag};
use crate::rect::{Insets, Rect};
use crate::text::TextMeasure;
use crate::tree::ViewTree;
use crate::view::ViewId;
use cgmath::{Point2, Vector2, Zero};
use core::any::Any;
use core::fmt;

/// For downcasting trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A layout delegate for a container view.
///
/// The default methods implement a plain group: subviews are measured against the container's
/// spec, the container wraps the largest of them, and each is placed at the content origin offset
/// by its margins.
pub trait Layout: AsAny + fmt::Debug {
    /// The params variant this layout reads, or `None` if it accepts any.
    fn params_tag(&self) -> Option<ParamsTag> {
        None
    }

    /// Checks and converts params supplied for a new subview.
    ///
    /// Params of the wrong variant are coerced, keeping width, height and margins.
    fn adapt_params(&self, params: LayoutParams) -> Result<LayoutParams> {
        let params = params.validate()?;
        match self.params_tag() {
            Some(tag) if tag != params.tag() => {
                tracing::warn!(from = ?params.tag(), to = ?tag, "coercing layout params");
                Ok(params.coerce(tag))
            }
            _ => Ok(params),
        }
    }

    /// Measures the subviews and returns the container's own measured size.
    fn measure(
        &mut self,
        cx: &mut LayoutContext,
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> Vector2<f64> {
        let mut content = Vector2::zero();
        for child in cx.subviews() {
            let size = cx.measure_child(child, width, height);
            let margins = cx.params(child).margins;
            content.x = f64::max(content.x, size.x + margins.horizontal());
            content.y = f64::max(content.y, size.y + margins.vertical());
        }
        let desired = cx.suggested_minimum_size(content);
        Vector2::new(width.resolve(desired.x), height.resolve(desired.y))
    }

    /// Positions the subviews inside a container of the given size.
    fn layout(&mut self, cx: &mut LayoutContext, size: Vector2<f64>) {
        let _ = size;
        let padding = cx.padding();
        for child in cx.subviews() {
            let margins = cx.params(child).margins;
            let origin = Point2::new(padding.left + margins.left, padding.top + margins.top);
            let size = cx.measured_size(child);
            cx.place(child, Rect::new(origin, size));
        }
    }

    /// Return true to take an event away from the subviews and handle it on the container.
    fn intercept_touch(&mut self, event: &TouchEvent) -> bool {
        let _ = event;
        false
    }
}

/// The plain group layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Group;

impl Layout for Group {}

/// Access to the tree from inside a layout pass.
pub struct LayoutContext<'a> {
    tree: &'a mut ViewTree,
    id: ViewId,
}

impl<'a> LayoutContext<'a> {
    pub(crate) fn new(tree: &'a mut ViewTree, id: ViewId) -> LayoutContext<'a> {
        LayoutContext { tree, id }
    }

    /// The container being laid out.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// The container's subviews in order.
    pub fn subviews(&self) -> Vec<ViewId> {
        self.tree.subviews(self.id).to_vec()
    }

    pub fn padding(&self) -> Insets {
        self.tree
            .view(self.id)
            .map(|view| view.padding())
            .unwrap_or_default()
    }

    pub fn params(&self, child: ViewId) -> LayoutParams {
        self.tree
            .view(child)
            .map(|view| *view.params())
            .unwrap_or_default()
    }

    pub fn measured_size(&self, child: ViewId) -> Vector2<f64> {
        self.tree
            .view(child)
            .map(|view| view.measured_size())
            .unwrap_or_else(|_| Vector2::zero())
    }

    /// The container's minimum size given the extent of its content.
    pub fn suggested_minimum_size(&self, content: Vector2<f64>) -> Vector2<f64> {
        self.tree
            .view(self.id)
            .map(|view| view.suggested_minimum_size(content))
            .unwrap_or(content)
    }

    /// Measures a subview with explicit specs.
    pub fn measure(&mut self, child: ViewId, width: MeasureSpec, height: MeasureSpec) -> Vector2<f64> {
        self.tree.measure_node(child, width, height);
        self.measured_size(child)
    }

    /// Measures a subview against the container's specs, reserving the container's padding and
    /// the subview's margins.
    pub fn measure_child(
        &mut self,
        child: ViewId,
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> Vector2<f64> {
        let padding = self.padding();
        let params = self.params(child);
        let width = child_measure_spec(
            width,
            padding.horizontal() + params.margins.horizontal(),
            params.width,
        );
        let height = child_measure_spec(
            height,
            padding.vertical() + params.margins.vertical(),
            params.height,
        );
        self.measure(child, width, height)
    }

    /// Measures every subview with [`measure_child`](Self::measure_child).
    pub fn measure_children(&mut self, width: MeasureSpec, height: MeasureSpec) {
        for child in self.subviews() {
            self.measure_child(child, width, height);
        }
    }

    /// Assigns a subview its frame in the container's coordinate system.
    pub fn place(&mut self, child: ViewId, frame: Rect) {
        self.tree.layout_node(child, frame);
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.tree.text_measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Alignment, Dimension, Gravity};
    use crate::view::View;

    fn fixed(width: f64, height: f64) -> View {
        View::new().with_params(LayoutParams::new(
            Dimension::Exact(width),
            Dimension::Exact(height),
        ))
    }

    #[test]
    fn group_wraps_largest_child() {
        let mut tree = ViewTree::new();
        let group = tree.create(View::container(Group).with_padding(Insets::uniform(5.)));
        let a = tree.create(View::new().with_params(
            LayoutParams::new(Dimension::Exact(40.), Dimension::Exact(10.))
                .with_margins(Insets::new(2., 0., 2., 0.)),
        ));
        let b = tree.create(fixed(20., 30.));
        tree.add_view(group, a).unwrap();
        tree.add_view(group, b).unwrap();

        tree.measure(group, MeasureSpec::unspecified(), MeasureSpec::at_most(100.))
            .unwrap();
        assert_eq!(tree.view(group).unwrap().measured_size(), Vector2::new(54., 40.));

        tree.layout(group, 0., 0., 54., 40.).unwrap();
        assert_eq!(tree.view(a).unwrap().frame(), Rect::from_edges(7., 5., 47., 15.));
        assert_eq!(tree.view(b).unwrap().frame(), Rect::from_edges(5., 5., 25., 35.));
    }

    #[test]
    fn exactly_spec_is_honored() {
        let mut tree = ViewTree::new();
        let group = tree.create(View::container(Group));
        let child = tree.create(fixed(500., 500.));
        tree.add_view(group, child).unwrap();

        tree.measure(group, MeasureSpec::exactly(120.), MeasureSpec::exactly(80.))
            .unwrap();
        assert_eq!(tree.view(group).unwrap().measured_size(), Vector2::new(120., 80.));
    }

    #[test]
    fn group_accepts_any_params() {
        let params = LayoutParams::frame(Dimension::MatchParent, Dimension::WrapContent, Alignment::Center);
        assert_eq!(Group.adapt_params(params), Ok(params));

        let linear = LinearLayout::new(Orientation::Vertical);
        let adapted = linear.adapt_params(params).unwrap();
        assert_eq!(adapted.tag(), ParamsTag::Linear);
        assert_eq!(adapted.width, Dimension::MatchParent);
        assert_eq!(adapted.gravity(), Gravity::Start);
    }
}
