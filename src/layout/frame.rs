use super::{Layout, LayoutContext};
use crate::params::ParamsTag;
use crate::rect::Rect;
use cgmath::{Point2, Vector2};

/// Stacks subviews on top of each other, each anchored by its alignment.
///
/// Measurement is the plain group's: the frame wraps its largest subview.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameLayout;

impl Layout for FrameLayout {
    fn params_tag(&self) -> Option<ParamsTag> {
        Some(ParamsTag::Frame)
    }

    fn layout(&mut self, cx: &mut LayoutContext, size: Vector2<f64>) {
        let padding = cx.padding();
        let content = Vector2::new(
            (size.x - padding.horizontal()).max(0.),
            (size.y - padding.vertical()).max(0.),
        );

        for child in cx.subviews() {
            let params = cx.params(child);
            let measured = cx.measured_size(child);
            let margins = params.margins;
            let alignment = params.alignment();

            let x = alignment
                .horizontal()
                .offset(content.x, measured.x, margins.left, margins.right);
            let y = alignment
                .vertical()
                .offset(content.y, measured.y, margins.top, margins.bottom);
            let origin = Point2::new(padding.left + x, padding.top + y);
            cx.place(child, Rect::new(origin, measured));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MeasureSpec;
    use crate::params::{Alignment, Dimension, LayoutParams};
    use crate::rect::Insets;
    use crate::tree::ViewTree;
    use crate::view::View;

    fn square(alignment: Alignment) -> View {
        View::new().with_params(LayoutParams::frame(
            Dimension::Exact(20.),
            Dimension::Exact(20.),
            alignment,
        ))
    }

    #[test]
    fn nine_point_alignment() {
        let mut tree = ViewTree::new();
        let frame = tree.create(View::container(FrameLayout).with_padding(Insets::uniform(10.)));
        let top_left = tree.create(square(Alignment::TopLeft));
        let center = tree.create(square(Alignment::Center));
        let bottom_right = tree.create(square(Alignment::BottomRight));
        let bottom_center = tree.create(
            View::new().with_params(
                LayoutParams::frame(Dimension::Exact(20.), Dimension::Exact(20.), Alignment::BottomCenter)
                    .with_margins(Insets::new(0., 0., 0., 4.)),
            ),
        );
        for id in [top_left, center, bottom_right, bottom_center] {
            tree.add_view(frame, id).unwrap();
        }

        tree.measure(frame, MeasureSpec::exactly(120.), MeasureSpec::exactly(100.))
            .unwrap();
        tree.layout(frame, 0., 0., 120., 100.).unwrap();

        let frame_of = |id| tree.view(id).unwrap().frame();
        assert_eq!(frame_of(top_left), Rect::from_edges(10., 10., 30., 30.));
        assert_eq!(frame_of(center), Rect::from_edges(50., 40., 70., 60.));
        assert_eq!(frame_of(bottom_right), Rect::from_edges(90., 70., 110., 90.));
        assert_eq!(frame_of(bottom_center), Rect::from_edges(50., 66., 70., 86.));
    }

    #[test]
    fn wraps_largest_child() {
        let mut tree = ViewTree::new();
        let frame = tree.create(View::container(FrameLayout));
        let small = tree.create(square(Alignment::Center));
        let tall = tree.create(View::new().with_params(LayoutParams::frame(
            Dimension::Exact(10.),
            Dimension::Exact(60.),
            Alignment::TopLeft,
        )));
        tree.add_view(frame, small).unwrap();
        tree.add_view(frame, tall).unwrap();

        tree.measure(frame, MeasureSpec::at_most(500.), MeasureSpec::at_most(500.))
            .unwrap();
        assert_eq!(tree.view(frame).unwrap().measured_size(), Vector2::new(20., 60.));
    }

    #[test]
    fn mismatched_params_are_coerced() {
        let mut tree = ViewTree::new();
        let frame = tree.create(View::container(FrameLayout));
        let child = tree.create(View::new().with_params(
            LayoutParams::linear(Dimension::Exact(30.), Dimension::MatchParent, 2.)
                .with_margins(Insets::uniform(3.)),
        ));
        tree.add_view(frame, child).unwrap();

        let params = *tree.view(child).unwrap().params();
        assert_eq!(params.tag(), ParamsTag::Frame);
        assert_eq!(params.width, Dimension::Exact(30.));
        assert_eq!(params.height, Dimension::MatchParent);
        assert_eq!(params.margins, Insets::uniform(3.));
        assert_eq!(params.alignment(), Alignment::TopLeft);
    }
}
