//! Drawables: things that know how to paint themselves into a rectangle.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::params::Alignment;
use crate::rect::{Insets, Rect};
use crate::resources::Image;
use cgmath::{Point2, Vector2};
use core::fmt;
use std::sync::Arc;

/// Interaction state a drawable may reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableState {
    Normal,
    Hover,
    Pressed,
    Disabled,
}

impl Default for DrawableState {
    fn default() -> Self {
        DrawableState::Normal
    }
}

/// Something that can be painted into a rectangle.
pub trait Drawable: fmt::Debug {
    /// Paints into `bounds`, given in the canvas' current coordinate space.
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect);

    /// The natural size of the content, if it has one.
    fn intrinsic_size(&self) -> Option<Vector2<f64>> {
        self.image().map(|image| image.size())
    }

    /// The image backing this drawable, if any.
    fn image(&self) -> Option<&Image> {
        None
    }

    /// Updates the interaction state. Most drawables ignore it.
    fn set_state(&mut self, state: DrawableState) {
        let _ = state;
    }
}

/// Fills its bounds with a solid color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDrawable(pub Color);

impl Drawable for ColorDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        canvas.fill_rect(bounds, self.0);
    }
}

/// Stretches an image over its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDrawable {
    image: Arc<Image>,
}

impl ImageDrawable {
    pub fn new(image: Arc<Image>) -> ImageDrawable {
        ImageDrawable { image }
    }
}

impl Drawable for ImageDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        canvas.draw_image(&self.image, None, bounds);
    }

    fn image(&self) -> Option<&Image> {
        Some(&self.image)
    }
}

/// Draws another drawable at a fraction of the bounds, positioned by an alignment.
#[derive(Debug)]
pub struct ScaleDrawable {
    inner: Box<dyn Drawable>,
    scale: Vector2<f64>,
    alignment: Alignment,
}

impl ScaleDrawable {
    pub fn new(inner: Box<dyn Drawable>, scale: Vector2<f64>, alignment: Alignment) -> Self {
        ScaleDrawable {
            inner,
            scale,
            alignment,
        }
    }
}

impl Drawable for ScaleDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        let size = Vector2::new(bounds.size.x * self.scale.x, bounds.size.y * self.scale.y);
        let x = self
            .alignment
            .horizontal()
            .offset(bounds.size.x, size.x, 0., 0.);
        let y = self.alignment.vertical().offset(bounds.size.y, size.y, 0., 0.);
        let origin = Point2::new(bounds.origin.x + x, bounds.origin.y + y);
        self.inner.draw(canvas, Rect::new(origin, size));
    }

    fn image(&self) -> Option<&Image> {
        self.inner.image()
    }

    fn set_state(&mut self, state: DrawableState) {
        self.inner.set_state(state);
    }
}

/// Picks one of several drawables depending on the interaction state.
///
/// States without a drawable of their own fall back to the normal one.
#[derive(Debug)]
pub struct StateDrawable {
    normal: Box<dyn Drawable>,
    hover: Option<Box<dyn Drawable>>,
    pressed: Option<Box<dyn Drawable>>,
    disabled: Option<Box<dyn Drawable>>,
    state: DrawableState,
}

impl StateDrawable {
    pub fn new(normal: Box<dyn Drawable>) -> StateDrawable {
        StateDrawable {
            normal,
            hover: None,
            pressed: None,
            disabled: None,
            state: DrawableState::Normal,
        }
    }

    pub fn with_hover(mut self, drawable: Box<dyn Drawable>) -> Self {
        self.hover = Some(drawable);
        self
    }

    pub fn with_pressed(mut self, drawable: Box<dyn Drawable>) -> Self {
        self.pressed = Some(drawable);
        self
    }

    pub fn with_disabled(mut self, drawable: Box<dyn Drawable>) -> Self {
        self.disabled = Some(drawable);
        self
    }

    pub fn state(&self) -> DrawableState {
        self.state
    }

    fn current(&self) -> &dyn Drawable {
        let selected = match self.state {
            DrawableState::Normal => None,
            DrawableState::Hover => self.hover.as_ref(),
            DrawableState::Pressed => self.pressed.as_ref(),
            DrawableState::Disabled => self.disabled.as_ref(),
        };
        selected.unwrap_or(&self.normal).as_ref()
    }
}

impl Drawable for StateDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        self.current().draw(canvas, bounds);
    }

    fn image(&self) -> Option<&Image> {
        self.current().image()
    }

    fn set_state(&mut self, state: DrawableState) {
        self.state = state;
    }
}

/// Stretches an image while keeping its borders unscaled.
///
/// The insets mark the fixed border of the source image. Corners are copied as-is, edges stretch
/// along one axis and the center stretches along both. Drawables without an image are drawn
/// stretched over the whole bounds.
#[derive(Debug)]
pub struct NinePatchDrawable {
    inner: Box<dyn Drawable>,
    insets: Insets,
}

impl NinePatchDrawable {
    pub fn new(inner: Box<dyn Drawable>, insets: Insets) -> NinePatchDrawable {
        NinePatchDrawable { inner, insets }
    }

    /// Splits one axis into three (offset, length) pairs for source and destination.
    fn slices(source: f64, dest: f64, lead: f64, trail: f64) -> [((f64, f64), (f64, f64)); 3] {
        let lead = lead.max(0.).min((source - 1.).max(0.));
        let trail = trail.max(0.).min((source - lead - 1.).max(0.));
        let source_mid = source - lead - trail;
        let dest_mid = (dest - lead - trail).max(0.);
        [
            ((0., lead), (0., lead)),
            ((lead, source_mid), (lead, dest_mid)),
            ((source - trail, trail), (lead + dest_mid, trail)),
        ]
    }
}

impl Drawable for NinePatchDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        let image = match self.inner.image() {
            Some(image) => image,
            None => return self.inner.draw(canvas, bounds),
        };

        let columns = Self::slices(image.width, bounds.size.x, self.insets.left, self.insets.right);
        let rows = Self::slices(image.height, bounds.size.y, self.insets.top, self.insets.bottom);

        for &((sy, sh), (dy, dh)) in &rows {
            for &((sx, sw), (dx, dw)) in &columns {
                if sw <= 0. || sh <= 0. || dw <= 0. || dh <= 0. {
                    continue;
                }
                let source = Rect::new(Point2::new(sx, sy), Vector2::new(sw, sh));
                let dest = Rect::new(
                    Point2::new(bounds.origin.x + dx, bounds.origin.y + dy),
                    Vector2::new(dw, dh),
                );
                canvas.draw_image(image, Some(source), dest);
            }
        }
    }

    fn image(&self) -> Option<&Image> {
        self.inner.image()
    }

    fn set_state(&mut self, state: DrawableState) {
        self.inner.set_state(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, Recorder};
    use crate::resources::tests::test_image;

    fn rect(l: f64, t: f64, r: f64, b: f64) -> Rect {
        Rect::from_edges(l, t, r, b)
    }

    #[test]
    fn state_drawable_falls_back_to_normal() {
        let red = Color::rgb(1., 0., 0.);
        let blue = Color::rgb(0., 0., 1.);
        let mut drawable = StateDrawable::new(Box::new(ColorDrawable(red)))
            .with_pressed(Box::new(ColorDrawable(blue)));

        let mut canvas = Recorder::new();
        drawable.set_state(DrawableState::Hover);
        drawable.draw(&mut canvas, rect(0., 0., 1., 1.));
        drawable.set_state(DrawableState::Pressed);
        drawable.draw(&mut canvas, rect(0., 0., 1., 1.));
        assert_eq!(canvas.fills(), vec![red, blue]);
    }

    #[test]
    fn scale_drawable_alignment() {
        let drawable = ScaleDrawable::new(
            Box::new(ColorDrawable(Color::BLACK)),
            Vector2::new(0.5, 0.5),
            Alignment::BottomRight,
        );
        let mut canvas = Recorder::new();
        drawable.draw(&mut canvas, rect(10., 10., 110., 50.));
        assert_eq!(
            canvas.ops,
            vec![DrawOp::FillRect(rect(60., 30., 110., 50.), Color::BLACK)]
        );
    }

    #[test]
    fn nine_patch_keeps_corners() {
        let image = test_image("bubble.png", 30., 30.);
        let drawable = NinePatchDrawable::new(
            Box::new(ImageDrawable::new(image)),
            Insets::uniform(10.),
        );
        let mut canvas = Recorder::new();
        drawable.draw(&mut canvas, rect(0., 0., 100., 50.));

        let images: Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { source, dest, .. } => Some((source.unwrap(), *dest)),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 9);
        // top-left corner is copied 1:1
        assert_eq!(images[0], (rect(0., 0., 10., 10.), rect(0., 0., 10., 10.)));
        // center stretches
        assert_eq!(images[4], (rect(10., 10., 20., 20.), rect(10., 10., 90., 40.)));
        // bottom-right corner is pinned to the far edges
        assert_eq!(images[8], (rect(20., 20., 30., 30.), rect(90., 40., 100., 50.)));
    }

    #[test]
    fn image_drawable_reports_intrinsic_size() {
        let drawable = ImageDrawable::new(test_image("logo.png", 48., 24.));
        assert_eq!(drawable.intrinsic_size(), Some(Vector2::new(48., 24.)));
        assert_eq!(ColorDrawable(Color::WHITE).intrinsic_size(), None);
    }
}
