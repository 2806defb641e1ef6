//! Leaf widgets: content drawn inside a view's padding.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::drawable::{ColorDrawable, Drawable};
use crate::layout::AsAny;
use crate::params::Gravity;
use crate::rect::Rect;
use crate::text::{Font, TextMeasure};
use crate::view::View;
use cgmath::{Point2, Vector2, Zero};
use core::fmt;

/// Content of a leaf view.
pub trait Widget: AsAny + fmt::Debug {
    /// Adjusts the hosting view when the widget is installed, e.g. to make it clickable.
    fn configure(&self, view: &mut View) {
        let _ = view;
    }

    /// Natural size of the content, excluding padding.
    fn content_size(&self, metrics: &dyn TextMeasure) -> Vector2<f64>;

    /// Draws the content.
    ///
    /// - `bounds`: the whole view in local coordinates
    /// - `content`: `bounds` minus padding
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect, content: Rect);
}

fn anchor(gravity: Gravity, start: f64, end: f64) -> f64 {
    match gravity {
        Gravity::Start => start,
        Gravity::Center => (start + end) / 2.,
        Gravity::End => end,
    }
}

/// A single line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextView {
    pub text: String,
    pub font: Font,
    pub color: Color,
    /// Horizontal placement inside the content area.
    pub gravity: Gravity,
    /// Vertical placement inside the content area.
    pub vertical_gravity: Gravity,
}

impl TextView {
    pub fn new(text: impl Into<String>) -> TextView {
        TextView {
            text: text.into(),
            font: Font::default(),
            color: Color::BLACK,
            gravity: Gravity::Start,
            vertical_gravity: Gravity::Center,
        }
    }

    pub fn with_size(mut self, size: f64) -> TextView {
        self.font.size = size;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> TextView {
        self.font.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> TextView {
        self.font.italic = italic;
        self
    }

    pub fn with_color(mut self, color: Color) -> TextView {
        self.color = color;
        self
    }

    pub fn with_gravity(mut self, horizontal: Gravity, vertical: Gravity) -> TextView {
        self.gravity = horizontal;
        self.vertical_gravity = vertical;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for TextView {
    fn content_size(&self, metrics: &dyn TextMeasure) -> Vector2<f64> {
        metrics.measure(&self.text, &self.font)
    }

    fn draw(&self, canvas: &mut dyn Canvas, _bounds: Rect, content: Rect) {
        if self.text.is_empty() {
            return;
        }
        let x = anchor(self.gravity, content.left(), content.right());
        let y = anchor(self.vertical_gravity, content.top(), content.bottom());
        canvas.fill_text(
            &self.text,
            Point2::new(x, y),
            &self.font,
            self.color,
            self.gravity,
            self.vertical_gravity,
        );
    }
}

/// Shows a drawable at a fixed size.
#[derive(Debug)]
pub struct ImageView {
    drawable: Option<Box<dyn Drawable>>,
    image_size: Vector2<f64>,
}

impl Default for ImageView {
    fn default() -> Self {
        ImageView {
            drawable: None,
            image_size: Vector2::new(50., 50.),
        }
    }
}

impl ImageView {
    pub fn new<D: Drawable + 'static>(drawable: D) -> ImageView {
        ImageView {
            drawable: Some(Box::new(drawable)),
            ..ImageView::default()
        }
    }

    pub fn with_image_size(mut self, width: f64, height: f64) -> ImageView {
        self.set_image_size(width, height);
        self
    }

    pub fn drawable(&self) -> Option<&dyn Drawable> {
        self.drawable.as_deref()
    }

    pub fn set_drawable(&mut self, drawable: Option<Box<dyn Drawable>>) {
        self.drawable = drawable;
    }

    pub fn image_size(&self) -> Vector2<f64> {
        self.image_size
    }

    pub fn set_image_size(&mut self, width: f64, height: f64) {
        self.image_size = Vector2::new(width.max(0.), height.max(0.));
    }
}

impl Widget for ImageView {
    fn content_size(&self, _metrics: &dyn TextMeasure) -> Vector2<f64> {
        match self.drawable {
            Some(_) => self.image_size,
            None => Vector2::zero(),
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, _bounds: Rect, content: Rect) {
        if let Some(drawable) = &self.drawable {
            drawable.draw(canvas, content);
        }
    }
}

/// Default button background.
pub const BUTTON_COLOR: u32 = 0x3498db;

/// Space a button adds around its label.
const BUTTON_CHROME: Vector2<f64> = Vector2 { x: 24., y: 12. };

/// A clickable text label.
///
/// Installing a button makes the view clickable and gives it a flat blue background unless the
/// view already has one. Use a [`StateDrawable`](crate::drawable::StateDrawable) background for
/// pressed and hover feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub text: String,
    pub font: Font,
    pub color: Color,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Button {
        Button {
            text: text.into(),
            font: Font::default(),
            color: Color::WHITE,
        }
    }

    pub fn with_size(mut self, size: f64) -> Button {
        self.font.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Button {
        self.color = color;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Button {
    fn configure(&self, view: &mut View) {
        view.clickable = true;
        if view.background.is_none() {
            view.background = Some(Box::new(ColorDrawable(Color::from_hex(BUTTON_COLOR))));
        }
    }

    fn content_size(&self, metrics: &dyn TextMeasure) -> Vector2<f64> {
        metrics.measure(&self.text, &self.font) + BUTTON_CHROME
    }

    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect, _content: Rect) {
        if self.text.is_empty() {
            return;
        }
        canvas.fill_text(
            &self.text,
            bounds.center(),
            &self.font,
            self.color,
            Gravity::Center,
            Gravity::Center,
        );
    }
}
