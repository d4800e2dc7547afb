/// The direction at which the scanner mirror was traveling at the time of pulse output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanDirection {
    /// The scan is moving from the right to the left, a cleared bit.
    #[default]
    RightToLeft,
    /// The scan is moving from the left to the right, a set bit.
    LeftToRight,
}
