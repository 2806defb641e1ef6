//! Layout parameters: what a subview asks of the container it is placed in.

use crate::error::{Error, Result};
use crate::rect::Insets;

/// A requested width or height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// A fixed, non-negative size in pixels.
    Exact(f64),
    /// As large as the superview allows.
    MatchParent,
    /// As large as the view's content.
    WrapContent,
}

impl Dimension {
    /// Raw sentinel for [`Dimension::MatchParent`].
    pub const MATCH_PARENT: i32 = -1;
    /// Raw sentinel for [`Dimension::WrapContent`].
    pub const WRAP_CONTENT: i32 = -2;

    /// Converts a raw dimension: a pixel count or one of the two sentinels.
    pub fn from_raw(raw: i32) -> Result<Dimension> {
        match raw {
            Dimension::MATCH_PARENT => Ok(Dimension::MatchParent),
            Dimension::WRAP_CONTENT => Ok(Dimension::WrapContent),
            px if px >= 0 => Ok(Dimension::Exact(f64::from(px))),
            other => Err(Error::Configuration(format!("invalid dimension {}", other))),
        }
    }

    fn validate(self) -> Result<Dimension> {
        match self {
            Dimension::Exact(px) if !(px >= 0.) => Err(Error::Configuration(format!(
                "exact dimension must be non-negative, got {}",
                px
            ))),
            dim => Ok(dim),
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::WrapContent
    }
}

/// Alignment along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gravity {
    Start,
    Center,
    End,
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::Start
    }
}

impl Gravity {
    /// Offset of an item of size `item` inside `available` space, respecting leading and trailing
    /// margins.
    pub fn offset(self, available: f64, item: f64, lead: f64, trail: f64) -> f64 {
        match self {
            Gravity::Start => lead,
            Gravity::Center => lead + (available - lead - trail - item) / 2.,
            Gravity::End => available - item - trail,
        }
    }
}

/// One of nine anchor points inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::TopLeft
    }
}

impl Alignment {
    pub fn horizontal(self) -> Gravity {
        match self {
            Alignment::TopLeft | Alignment::CenterLeft | Alignment::BottomLeft => Gravity::Start,
            Alignment::TopCenter | Alignment::Center | Alignment::BottomCenter => Gravity::Center,
            Alignment::TopRight | Alignment::CenterRight | Alignment::BottomRight => Gravity::End,
        }
    }

    pub fn vertical(self) -> Gravity {
        match self {
            Alignment::TopLeft | Alignment::TopCenter | Alignment::TopRight => Gravity::Start,
            Alignment::CenterLeft | Alignment::Center | Alignment::CenterRight => Gravity::Center,
            Alignment::BottomLeft | Alignment::BottomCenter | Alignment::BottomRight => Gravity::End,
        }
    }
}

/// Container-specific part of the layout params.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamsKind {
    /// Plain params understood by every container.
    Base,
    /// Params for a linear layout.
    Linear {
        /// Share of the leftover main-axis space; zero means the view is not flexible.
        weight: f32,
        /// Cross-axis placement.
        gravity: Gravity,
    },
    /// Params for a frame layout.
    Frame { alignment: Alignment },
}

/// Which [`ParamsKind`] variant a container expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamsTag {
    Base,
    Linear,
    Frame,
}

/// Layout request of a single view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutParams {
    pub width: Dimension,
    pub height: Dimension,
    pub margins: Insets,
    pub kind: ParamsKind,
}

impl Default for ParamsKind {
    fn default() -> Self {
        ParamsKind::Base
    }
}

impl LayoutParams {
    pub fn new(width: Dimension, height: Dimension) -> LayoutParams {
        LayoutParams {
            width,
            height,
            margins: Insets::zero(),
            kind: ParamsKind::Base,
        }
    }

    /// Params for a subview of a linear layout.
    pub fn linear(width: Dimension, height: Dimension, weight: f32) -> LayoutParams {
        LayoutParams {
            kind: ParamsKind::Linear {
                weight,
                gravity: Gravity::Start,
            },
            ..LayoutParams::new(width, height)
        }
    }

    /// Params for a subview of a frame layout.
    pub fn frame(width: Dimension, height: Dimension, alignment: Alignment) -> LayoutParams {
        LayoutParams {
            kind: ParamsKind::Frame { alignment },
            ..LayoutParams::new(width, height)
        }
    }

    pub fn with_margins(mut self, margins: Insets) -> LayoutParams {
        self.margins = margins;
        self
    }

    /// Sets the cross-axis gravity. Non-linear params are turned into linear ones first.
    pub fn with_gravity(mut self, gravity: Gravity) -> LayoutParams {
        self.kind = ParamsKind::Linear {
            weight: self.weight(),
            gravity,
        };
        self
    }

    pub fn tag(&self) -> ParamsTag {
        match self.kind {
            ParamsKind::Base => ParamsTag::Base,
            ParamsKind::Linear { .. } => ParamsTag::Linear,
            ParamsKind::Frame { .. } => ParamsTag::Frame,
        }
    }

    /// Linear weight, or zero for other kinds.
    pub fn weight(&self) -> f32 {
        match self.kind {
            ParamsKind::Linear { weight, .. } => weight,
            _ => 0.,
        }
    }

    /// Linear cross-axis gravity, or start for other kinds.
    pub fn gravity(&self) -> Gravity {
        match self.kind {
            ParamsKind::Linear { gravity, .. } => gravity,
            _ => Gravity::Start,
        }
    }

    /// Frame alignment, or top-left for other kinds.
    pub fn alignment(&self) -> Alignment {
        match self.kind {
            ParamsKind::Frame { alignment } => alignment,
            _ => Alignment::TopLeft,
        }
    }

    /// Checks the values themselves, independent of the container.
    pub fn validate(self) -> Result<LayoutParams> {
        self.width.validate()?;
        self.height.validate()?;
        if let ParamsKind::Linear { weight, .. } = self.kind {
            if !(weight >= 0.) {
                return Err(Error::Configuration(format!(
                    "weight must be non-negative, got {}",
                    weight
                )));
            }
        }
        Ok(self)
    }

    /// Converts to the given kind, keeping width, height and margins.
    ///
    /// Params that already have the requested kind are returned unchanged.
    pub fn coerce(self, tag: ParamsTag) -> LayoutParams {
        if self.tag() == tag {
            return self;
        }
        let kind = match tag {
            ParamsTag::Base => ParamsKind::Base,
            ParamsTag::Linear => ParamsKind::Linear {
                weight: 0.,
                gravity: Gravity::Start,
            },
            ParamsTag::Frame => ParamsKind::Frame {
                alignment: Alignment::TopLeft,
            },
        };
        LayoutParams { kind, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_dimensions() {
        assert_eq!(Dimension::from_raw(-1), Ok(Dimension::MatchParent));
        assert_eq!(Dimension::from_raw(-2), Ok(Dimension::WrapContent));
        assert_eq!(Dimension::from_raw(0), Ok(Dimension::Exact(0.)));
        assert_eq!(Dimension::from_raw(120), Ok(Dimension::Exact(120.)));
        assert!(Dimension::from_raw(-3).is_err());
    }

    #[test]
    fn coerce_keeps_size_and_margins() {
        let params = LayoutParams::frame(Dimension::Exact(10.), Dimension::MatchParent, Alignment::Center)
            .with_margins(Insets::uniform(4.));
        let linear = params.coerce(ParamsTag::Linear);
        assert_eq!(linear.width, Dimension::Exact(10.));
        assert_eq!(linear.height, Dimension::MatchParent);
        assert_eq!(linear.margins, Insets::uniform(4.));
        assert_eq!(linear.weight(), 0.);
        assert_eq!(linear.gravity(), Gravity::Start);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let params = LayoutParams::linear(Dimension::WrapContent, Dimension::WrapContent, -1.);
        assert!(matches!(params.validate(), Err(Error::Configuration(_))));
        let params = LayoutParams::linear(Dimension::WrapContent, Dimension::WrapContent, f32::NAN);
        assert!(params.validate().is_err());
    }

    #[test]
    fn alignment_axes() {
        assert_eq!(Alignment::BottomCenter.horizontal(), Gravity::Center);
        assert_eq!(Alignment::BottomCenter.vertical(), Gravity::End);
        assert_eq!(Alignment::CenterLeft.horizontal(), Gravity::Start);
        assert_eq!(Alignment::CenterLeft.vertical(), Gravity::Center);
    }

    #[test]
    fn gravity_offsets() {
        assert_eq!(Gravity::Start.offset(100., 20., 5., 5.), 5.);
        assert_eq!(Gravity::Center.offset(100., 20., 5., 5.), 40.);
        assert_eq!(Gravity::End.offset(100., 20., 5., 5.), 75.);
    }
}
