use crate::{
    layout::{self, PointLayout},
    Error, Result,
};
use std::fmt;

const EXTENDED_FORMAT_MIN: u8 = 6;
const LEGACY_RETURN_MAX: u8 = 5;
const EXTENDED_RETURN_MAX: u8 = 15;

/// Point record format, zero through ten.
///
/// A format can only be built from a supported id, so every method is infallible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Format(u8);

impl Format {
    /// Creates a new point format.
    ///
    /// The id must be the bare format number, without any compression bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::Format;
    /// let format = Format::new(3).unwrap();
    /// assert!(format.has_gps_time());
    /// assert!(format.has_color());
    /// assert!(Format::new(11).is_err());
    /// ```
    pub fn new(id: u8) -> Result<Format> {
        if layout::record_size(id).is_some() {
            Ok(Format(id))
        } else {
            Err(Error::UnsupportedPointFormat(id))
        }
    }

    /// Returns this format's id.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Does this format carry a gps time?
    pub fn has_gps_time(&self) -> bool {
        self.layout().gps_time.is_some()
    }

    /// Does this format carry red, green, and blue channels?
    pub fn has_color(&self) -> bool {
        self.layout().color.is_some()
    }

    /// Does this format carry a near infrared channel?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::Format;
    /// assert!(!Format::new(7).unwrap().has_nir());
    /// assert!(Format::new(8).unwrap().has_nir());
    /// ```
    pub fn has_nir(&self) -> bool {
        self.layout().nir.is_some()
    }

    /// Does this format carry waveform packet fields?
    pub fn has_waveform(&self) -> bool {
        self.layout().waveform.is_some()
    }

    /// Is this one of the extended formats (six through ten) introduced in las 1.4?
    ///
    /// Extended formats use a 16-bit return mask and a 16-bit scan angle.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::Format;
    /// assert!(!Format::new(5).unwrap().is_extended());
    /// assert!(Format::new(6).unwrap().is_extended());
    /// ```
    pub fn is_extended(&self) -> bool {
        self.0 >= EXTENDED_FORMAT_MIN
    }

    /// Returns the number of bytes in a record of this format, not counting extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().len());
    /// assert_eq!(67, Format::new(10).unwrap().len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u16 {
        self.layout().size
    }

    /// Returns the largest return number this format can encode.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::Format;
    /// assert_eq!(5, Format::new(1).unwrap().return_max());
    /// assert_eq!(15, Format::new(6).unwrap().return_max());
    /// ```
    pub fn return_max(&self) -> u8 {
        if self.is_extended() {
            EXTENDED_RETURN_MAX
        } else {
            LEGACY_RETURN_MAX
        }
    }

    pub(crate) fn layout(&self) -> &'static PointLayout {
        &layout::POINT_LAYOUTS[usize::from(self.0)]
    }
}

impl Default for Format {
    fn default() -> Format {
        Format(0)
    }
}

impl From<Format> for u8 {
    fn from(format: Format) -> u8 {
        format.0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! point_format {
        ($name:ident, $id:expr, $gps:expr, $color:expr, $nir:expr, $waveform:expr, $len:expr) => {
            mod $name {
                use super::*;

                #[test]
                fn flags() {
                    let format = Format::new($id).unwrap();
                    assert_eq!($gps, format.has_gps_time());
                    assert_eq!($color, format.has_color());
                    assert_eq!($nir, format.has_nir());
                    assert_eq!($waveform, format.has_waveform());
                }

                #[test]
                fn len() {
                    assert_eq!($len, Format::new($id).unwrap().len());
                }
            }
        };
    }

    point_format!(format_0, 0, false, false, false, false, 20);
    point_format!(format_1, 1, true, false, false, false, 28);
    point_format!(format_2, 2, false, true, false, false, 26);
    point_format!(format_3, 3, true, true, false, false, 34);
    point_format!(format_4, 4, true, false, false, true, 57);
    point_format!(format_5, 5, true, true, false, true, 63);
    point_format!(format_6, 6, true, false, false, false, 30);
    point_format!(format_7, 7, true, true, false, false, 36);
    point_format!(format_8, 8, true, true, true, false, 38);
    point_format!(format_9, 9, true, false, false, true, 59);
    point_format!(format_10, 10, true, true, true, true, 67);

    #[test]
    fn unsupported() {
        assert!(matches!(
            Format::new(11),
            Err(Error::UnsupportedPointFormat(11))
        ));
        assert!(Format::new(0x83).is_err());
    }

    #[test]
    fn display() {
        assert_eq!("7", Format::new(7).unwrap().to_string());
    }
}
