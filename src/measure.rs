//! Measure specs: the constraint a superview hands to a subview during measurement.

use crate::error::{Error, Result};
use crate::params::Dimension;

/// Measurement mode.
///
/// The discriminants are the values stored in the two mode bits of a packed spec.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    /// No constraint; the view reports its natural size.
    Unspecified = 0,
    /// The size is fixed by the superview.
    Exactly = 1,
    /// The size is an upper bound.
    AtMost = 2,
}

const MODE_SHIFT: u32 = 30;
const MODE_MASK: u32 = 0x3 << MODE_SHIFT;

/// Largest size that survives [`MeasureSpec::pack`].
pub const MAX_PACKED_SIZE: u32 = !MODE_MASK;

/// A (mode, size) pair.
///
/// Sizes are kept as `f64` while the tree is measured so weighted space can be split without
/// rounding; [`pack`](Self::pack) and [`unpack`](Self::unpack) convert to the classic single-integer
/// encoding with the mode in the top two bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureSpec {
    mode: MeasureMode,
    size: f64,
}

impl MeasureSpec {
    /// Creates a spec. Negative (or NaN) sizes become zero.
    pub fn new(size: f64, mode: MeasureMode) -> MeasureSpec {
        MeasureSpec {
            mode,
            size: size.max(0.),
        }
    }

    pub fn exactly(size: f64) -> MeasureSpec {
        MeasureSpec::new(size, MeasureMode::Exactly)
    }

    pub fn at_most(size: f64) -> MeasureSpec {
        MeasureSpec::new(size, MeasureMode::AtMost)
    }

    pub fn unspecified() -> MeasureSpec {
        MeasureSpec::new(0., MeasureMode::Unspecified)
    }

    pub fn mode(self) -> MeasureMode {
        self.mode
    }

    pub fn size(self) -> f64 {
        self.size
    }

    /// Clamps a desired size against this spec.
    ///
    /// Exactly yields the spec size, at-most yields the smaller of the two, and unspecified yields
    /// the desired size unchanged.
    pub fn resolve(self, desired: f64) -> f64 {
        match self.mode {
            MeasureMode::Exactly => self.size,
            MeasureMode::AtMost => desired.min(self.size),
            MeasureMode::Unspecified => desired,
        }
    }

    /// Packs this spec into one integer. Sizes are rounded and saturate at [`MAX_PACKED_SIZE`].
    pub fn pack(self) -> u32 {
        let size = self.size.round().min(f64::from(MAX_PACKED_SIZE)) as u32;
        size | ((self.mode as u32) << MODE_SHIFT)
    }

    /// Unpacks an integer produced by [`pack`](Self::pack).
    pub fn unpack(bits: u32) -> Result<MeasureSpec> {
        let mode = match (bits & MODE_MASK) >> MODE_SHIFT {
            0 => MeasureMode::Unspecified,
            1 => MeasureMode::Exactly,
            2 => MeasureMode::AtMost,
            _ => return Err(Error::InvalidMeasureSpec(bits)),
        };
        Ok(MeasureSpec::new(f64::from(bits & !MODE_MASK), mode))
    }
}

/// Derives the spec for a subview from its superview's spec.
///
/// - `reserved`: space the subview cannot use (superview padding plus subview margins)
/// - `dimension`: what the subview asked for in its layout params
pub fn child_measure_spec(parent: MeasureSpec, reserved: f64, dimension: Dimension) -> MeasureSpec {
    let available = (parent.size() - reserved).max(0.);

    match dimension {
        Dimension::Exact(size) => MeasureSpec::exactly(size),
        Dimension::MatchParent => match parent.mode() {
            MeasureMode::Exactly => MeasureSpec::exactly(available),
            MeasureMode::AtMost => MeasureSpec::at_most(available),
            MeasureMode::Unspecified => MeasureSpec::unspecified(),
        },
        Dimension::WrapContent => match parent.mode() {
            MeasureMode::Exactly | MeasureMode::AtMost => MeasureSpec::at_most(available),
            MeasureMode::Unspecified => MeasureSpec::unspecified(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn match_parent_keeps_mode() {
        let spec = child_measure_spec(MeasureSpec::exactly(100.), 0., Dimension::MatchParent);
        assert_eq!(spec, MeasureSpec::exactly(100.));

        let spec = child_measure_spec(MeasureSpec::at_most(100.), 20., Dimension::MatchParent);
        assert_eq!(spec, MeasureSpec::at_most(80.));

        let spec = child_measure_spec(MeasureSpec::unspecified(), 0., Dimension::MatchParent);
        assert_eq!(spec, MeasureSpec::unspecified());
    }

    #[test]
    fn wrap_content_becomes_at_most() {
        let spec = child_measure_spec(MeasureSpec::at_most(100.), 0., Dimension::WrapContent);
        assert_eq!(spec, MeasureSpec::at_most(100.));

        let spec = child_measure_spec(MeasureSpec::exactly(100.), 0., Dimension::WrapContent);
        assert_eq!(spec, MeasureSpec::at_most(100.));

        let spec = child_measure_spec(MeasureSpec::unspecified(), 0., Dimension::WrapContent);
        assert_eq!(spec.mode(), MeasureMode::Unspecified);
        assert_eq!(spec.size(), 0.);
    }

    #[test]
    fn exact_dimension_ignores_parent() {
        for parent in [
            MeasureSpec::exactly(10.),
            MeasureSpec::at_most(10.),
            MeasureSpec::unspecified(),
        ] {
            let spec = child_measure_spec(parent, 5., Dimension::Exact(40.));
            assert_eq!(spec, MeasureSpec::exactly(40.));
        }
        let spec = child_measure_spec(MeasureSpec::exactly(10.), 0., Dimension::Exact(0.));
        assert_eq!(spec, MeasureSpec::exactly(0.));
    }

    #[test]
    fn reserved_space_never_goes_negative() {
        let spec = child_measure_spec(MeasureSpec::exactly(10.), 25., Dimension::MatchParent);
        assert_eq!(spec, MeasureSpec::exactly(0.));
    }

    #[test]
    fn resolve() {
        assert_eq!(MeasureSpec::exactly(50.).resolve(80.), 50.);
        assert_eq!(MeasureSpec::at_most(50.).resolve(80.), 50.);
        assert_eq!(MeasureSpec::at_most(50.).resolve(20.), 20.);
        assert_eq!(MeasureSpec::unspecified().resolve(80.), 80.);
    }

    #[test]
    fn packed_mode_constants() {
        assert_eq!(MeasureSpec::unspecified().pack() >> 30, 0);
        assert_eq!(MeasureSpec::exactly(1.).pack() >> 30, 1);
        assert_eq!(MeasureSpec::at_most(1.).pack() >> 30, 2);
        assert_eq!(
            MeasureSpec::unpack(3 << 30),
            Err(Error::InvalidMeasureSpec(3 << 30))
        );
    }

    proptest! {
        #[test]
        fn pack_round_trip(size in 0..=MAX_PACKED_SIZE, mode in 0u8..3) {
            let mode = match mode {
                0 => MeasureMode::Unspecified,
                1 => MeasureMode::Exactly,
                _ => MeasureMode::AtMost,
            };
            let spec = MeasureSpec::new(f64::from(size), mode);
            let unpacked = MeasureSpec::unpack(spec.pack()).unwrap();
            prop_assert_eq!(unpacked.size(), f64::from(size));
            prop_assert_eq!(unpacked.mode(), mode);
        }
    }
}
