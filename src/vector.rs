/// An xyz collection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector<T> {
    /// X
    pub x: T,
    /// Y
    pub y: T,
    /// Z
    pub z: T,
}

impl<T> From<Vector<T>> for (T, T, T) {
    fn from(vector: Vector<T>) -> (T, T, T) {
        (vector.x, vector.y, vector.z)
    }
}
