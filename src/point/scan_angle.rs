const SCALED_DEGREES_PER_STEP: f32 = 0.006;

/// The angle at which the laser pulse was emitted.
///
/// Legacy formats store a rank, whole degrees from -90 to 90. Extended formats store a scaled
/// value with increments of 0.006 degrees.
///
/// # Examples
///
/// ```
/// use las_reader::point::ScanAngle;
/// assert_eq!(-12., ScanAngle::Rank(-12).degrees());
/// assert!((ScanAngle::Scaled(15_000).degrees() - 90.).abs() < 1e-3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanAngle {
    /// Whole degrees, point formats zero through five.
    Rank(i8),
    /// 0.006 degree steps, point formats six through ten.
    Scaled(i16),
}

impl ScanAngle {
    /// Returns this scan angle in degrees.
    pub fn degrees(&self) -> f32 {
        match *self {
            ScanAngle::Rank(n) => f32::from(n),
            ScanAngle::Scaled(n) => f32::from(n) * SCALED_DEGREES_PER_STEP,
        }
    }
}

impl Default for ScanAngle {
    fn default() -> ScanAngle {
        ScanAngle::Rank(0)
    }
}
