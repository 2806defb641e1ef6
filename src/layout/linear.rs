use super::{Layout, LayoutContext};
use crate::measure::{child_measure_spec, MeasureMode, MeasureSpec};
use crate::params::{Dimension, LayoutParams, ParamsTag};
use crate::rect::{Insets, Rect};
use cgmath::{Point2, Vector2};

/// The axis a linear layout stacks its subviews along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Splits an (x, y) pair into (main, cross).
    fn split<T>(self, x: T, y: T) -> (T, T) {
        match self {
            Orientation::Horizontal => (x, y),
            Orientation::Vertical => (y, x),
        }
    }

    /// Joins a (main, cross) pair back into (x, y).
    fn join<T>(self, main: T, cross: T) -> (T, T) {
        // the mapping is its own inverse
        self.split(main, cross)
    }

    /// Leading and trailing insets as ((main lead, main trail), (cross lead, cross trail)).
    fn insets(self, insets: Insets) -> ((f64, f64), (f64, f64)) {
        self.split(
            (insets.left, insets.right),
            (insets.top, insets.bottom),
        )
    }

    fn dimensions(self, params: &LayoutParams) -> (Dimension, Dimension) {
        self.split(params.width, params.height)
    }
}

/// Stacks subviews along one axis.
///
/// Subviews with a positive weight share whatever main-axis space the others leave over, in
/// proportion to their weights. Cross-axis placement follows each subview's gravity.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearLayout {
    pub orientation: Orientation,
    /// Gap inserted between consecutive subviews.
    pub spacing: f64,
}

impl LinearLayout {
    pub fn new(orientation: Orientation) -> LinearLayout {
        LinearLayout {
            orientation,
            spacing: 0.,
        }
    }

    pub fn horizontal() -> LinearLayout {
        LinearLayout::new(Orientation::Horizontal)
    }

    pub fn vertical() -> LinearLayout {
        LinearLayout::new(Orientation::Vertical)
    }

    pub fn with_spacing(mut self, spacing: f64) -> LinearLayout {
        self.spacing = spacing.max(0.);
        self
    }

    fn total_spacing(&self, count: usize) -> f64 {
        self.spacing * count.saturating_sub(1) as f64
    }
}

impl Layout for LinearLayout {
    fn params_tag(&self) -> Option<ParamsTag> {
        Some(ParamsTag::Linear)
    }

    fn measure(
        &mut self,
        cx: &mut LayoutContext,
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> Vector2<f64> {
        let orientation = self.orientation;
        let (main_spec, cross_spec) = orientation.split(width, height);
        let ((pad_lead, pad_trail), (pad_cross_lead, pad_cross_trail)) =
            orientation.insets(cx.padding());
        let pad_main = pad_lead + pad_trail;
        let pad_cross = pad_cross_lead + pad_cross_trail;

        let children = cx.subviews();
        // weighted space is only distributed when there is a bound to distribute
        let distribute = main_spec.mode() != MeasureMode::Unspecified;

        let mut total_weight = 0.;
        let mut weighted = Vec::new();
        let mut weighted_margins = 0.;
        let mut fixed_main = 0.;
        let mut max_cross: f64 = 0.;

        for &child in &children {
            let params = cx.params(child);
            let size = cx.measure_child(child, width, height);
            let (size_main, size_cross) = orientation.split(size.x, size.y);
            let ((m_lead, m_trail), (m_cross_lead, m_cross_trail)) =
                orientation.insets(params.margins);

            let weight = f64::from(params.weight());
            if distribute && weight > 0. {
                total_weight += weight;
                weighted_margins += m_lead + m_trail;
                weighted.push((child, weight, params));
            } else {
                fixed_main += size_main + m_lead + m_trail;
            }
            max_cross = max_cross.max(size_cross + m_cross_lead + m_cross_trail);
        }

        let spacing = self.total_spacing(children.len());
        let mut main = fixed_main + spacing;

        if total_weight > 0. {
            let content_main = main_spec.size() - pad_main;
            let remaining = (content_main - fixed_main - spacing - weighted_margins).max(0.);
            tracing::trace!(total_weight, remaining, "distributing weighted space");

            for (child, weight, params) in weighted {
                let ((_, _), (m_cross_lead, m_cross_trail)) = orientation.insets(params.margins);
                let (_, cross_dim) = orientation.dimensions(&params);

                let main_child = MeasureSpec::exactly(weight / total_weight * remaining);
                let cross_reserved = pad_cross + m_cross_lead + m_cross_trail;
                let cross_parent = match cross_spec.mode() {
                    MeasureMode::Unspecified => cross_spec,
                    _ => MeasureSpec::at_most(cross_spec.size()),
                };
                let cross_child = child_measure_spec(cross_parent, cross_reserved, cross_dim);
                let (w, h) = orientation.join(main_child, cross_child);
                let size = cx.measure(child, w, h);
                let (_, size_cross) = orientation.split(size.x, size.y);
                max_cross = max_cross.max(size_cross + m_cross_lead + m_cross_trail);
            }
            main += remaining + weighted_margins;
        }

        let (x, y) = orientation.join(main, max_cross);
        let desired = cx.suggested_minimum_size(Vector2::new(x, y));
        Vector2::new(width.resolve(desired.x), height.resolve(desired.y))
    }

    fn layout(&mut self, cx: &mut LayoutContext, size: Vector2<f64>) {
        let orientation = self.orientation;
        let ((pad_lead, _), (pad_cross_lead, pad_cross_trail)) =
            orientation.insets(cx.padding());
        let (_, cross_size) = orientation.split(size.x, size.y);
        let content_cross = (cross_size - pad_cross_lead - pad_cross_trail).max(0.);

        let mut cursor = pad_lead;
        for (i, child) in cx.subviews().into_iter().enumerate() {
            if i > 0 {
                cursor += self.spacing;
            }
            let params = cx.params(child);
            let measured = cx.measured_size(child);
            let (size_main, size_cross) = orientation.split(measured.x, measured.y);
            let ((m_lead, m_trail), (m_cross_lead, m_cross_trail)) =
                orientation.insets(params.margins);

            cursor += m_lead;
            let cross = pad_cross_lead
                + params
                    .gravity()
                    .offset(content_cross, size_cross, m_cross_lead, m_cross_trail);
            let (x, y) = orientation.join(cursor, cross);
            cx.place(child, Rect::new(Point2::new(x, y), measured));
            cursor += size_main + m_trail;
        }
    }
}
