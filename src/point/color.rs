/// The red, green, and blue channels of a point.
///
/// Values are normalized to 16 bits by the writer, so an eight-bit camera stores `value * 256`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub red: u16,
    /// Green channel.
    pub green: u16,
    /// Blue channel.
    pub blue: u16,
}

impl Color {
    /// Creates a new color.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::Color;
    /// let color = Color::new(1, 2, 3);
    /// assert_eq!(2, color.green);
    /// ```
    pub fn new(red: u16, green: u16, blue: u16) -> Color {
        Color { red, green, blue }
    }
}
