//! The drawing surface the view tree paints into.

use crate::color::Color;
use crate::params::Gravity;
use crate::rect::Rect;
use crate::resources::Image;
use crate::text::Font;
use cgmath::Point2;

/// An immediate-mode 2D drawing context supplied by the host.
///
/// Transforms and opacity are cumulative and scoped by `save`/`restore`.
pub trait Canvas {
    /// Pushes the current transform, opacity and clip.
    fn save(&mut self);

    /// Pops the state pushed by the matching `save`.
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64);

    /// Rotates by `degrees` clockwise around the current origin.
    fn rotate(&mut self, degrees: f64);

    fn scale(&mut self, x: f64, y: f64);

    /// Multiplies the current opacity.
    fn multiply_alpha(&mut self, alpha: f64);

    fn clip_rect(&mut self, rect: Rect);

    /// Clears a rectangle to transparent.
    fn clear_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws one line of text.
    ///
    /// `anchor` is interpreted through `align` (horizontal) and `baseline` (vertical): start puts
    /// the text's left/top edge on the anchor, center its middle, end its right/bottom edge.
    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point2<f64>,
        font: &Font,
        color: Color,
        align: Gravity,
        baseline: Gravity,
    );

    /// Draws `source` (the whole image if `None`) of an image into `dest`.
    fn draw_image(&mut self, image: &Image, source: Option<Rect>, dest: Rect);
}

/// A recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    Alpha(f64),
    Clip(Rect),
    Clear(Rect),
    FillRect(Rect, Color),
    Text {
        text: String,
        anchor: Point2<f64>,
        size: f64,
        color: Color,
    },
    Image {
        key: String,
        source: Option<Rect>,
        dest: Rect,
    },
}

/// A canvas that records every call; used for headless rendering and tests.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    /// Returns true if every save has a matching restore.
    pub fn is_balanced(&self) -> bool {
        let mut depth: i64 = 0;
        for op in &self.ops {
            match op {
                DrawOp::Save => depth += 1,
                DrawOp::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => (),
            }
        }
        depth == 0
    }

    /// Fill colors in paint order.
    pub fn fills(&self) -> Vec<Color> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(_, color) => Some(*color),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for Recorder {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }
    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }
    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::Translate(x, y));
    }
    fn rotate(&mut self, degrees: f64) {
        self.ops.push(DrawOp::Rotate(degrees));
    }
    fn scale(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::Scale(x, y));
    }
    fn multiply_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }
    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clip(rect));
    }
    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear(rect));
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }
    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point2<f64>,
        font: &Font,
        color: Color,
        _align: Gravity,
        _baseline: Gravity,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            anchor,
            size: font.size,
            color,
        });
    }
    fn draw_image(&mut self, image: &Image, source: Option<Rect>, dest: Rect) {
        self.ops.push(DrawOp::Image {
            key: image.key.clone(),
            source,
            dest,
        });
    }
}
