use crate::Vector;

/// Minimum and maximum bounds in three dimensions, in real-world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// The minimum values.
    pub min: Vector<f64>,

    /// The maximum values.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Returns true if this position lies within these bounds, edges included.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::{Bounds, Vector};
    /// let bounds = Bounds {
    ///     min: Vector { x: 0., y: 0., z: 0. },
    ///     max: Vector { x: 1., y: 1., z: 1. },
    /// };
    /// assert!(bounds.contains(&Vector { x: 1., y: 0.5, z: 0. }));
    /// assert!(!bounds.contains(&Vector { x: 1.5, y: 0.5, z: 0. }));
    /// ```
    pub fn contains(&self, position: &Vector<f64>) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
            && (self.min.z..=self.max.z).contains(&position.z)
    }
}
