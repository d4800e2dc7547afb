use std::fmt;

const GPS_TIME_TYPE: u16 = 0x0001;
const WAVEFORM_DATA_PACKETS_INTERNAL: u16 = 0x0002;
const WAVEFORM_DATA_PACKETS_EXTERNAL: u16 = 0x0004;
const SYNTHETIC_RETURN_NUMBERS: u16 = 0x0008;
const WKT: u16 = 0x0010;

/// The global encoding bit field of a las 1.2 and later header.
///
/// Earlier versions reserve this field, and their headers report a global encoding of zero.
///
/// # Examples
///
/// ```
/// use las_reader::{GlobalEncoding, GpsTimeType};
/// let global_encoding = GlobalEncoding::from(0b10001);
/// assert_eq!(GpsTimeType::Standard, global_encoding.gps_time_type());
/// assert!(global_encoding.is_wkt());
/// assert!(!global_encoding.has_synthetic_return_numbers());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalEncoding(u16);

/// The meaning of GPS time in the point records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GpsTimeType {
    /// GPS week time, seconds since the start of the week.
    #[default]
    Week,
    /// Standard GPS time minus 1e9.
    Standard,
}

impl GlobalEncoding {
    /// Returns the gps time type of the point records.
    pub fn gps_time_type(&self) -> GpsTimeType {
        if self.is_set(GPS_TIME_TYPE) {
            GpsTimeType::Standard
        } else {
            GpsTimeType::Week
        }
    }

    /// Are waveform data packets stored inside this file?
    pub fn has_internal_waveform_data_packets(&self) -> bool {
        self.is_set(WAVEFORM_DATA_PACKETS_INTERNAL)
    }

    /// Are waveform data packets stored in an external file?
    pub fn has_external_waveform_data_packets(&self) -> bool {
        self.is_set(WAVEFORM_DATA_PACKETS_EXTERNAL)
    }

    /// Were the return numbers generated synthetically?
    pub fn has_synthetic_return_numbers(&self) -> bool {
        self.is_set(SYNTHETIC_RETURN_NUMBERS)
    }

    /// Is the coordinate reference system stored as WKT rather than GeoTIFF keys?
    pub fn is_wkt(&self) -> bool {
        self.is_set(WKT)
    }

    fn is_set(&self, mask: u16) -> bool {
        self.0 & mask == mask
    }
}

impl From<u16> for GlobalEncoding {
    fn from(n: u16) -> GlobalEncoding {
        GlobalEncoding(n)
    }
}

impl From<GlobalEncoding> for u16 {
    fn from(global_encoding: GlobalEncoding) -> u16 {
        global_encoding.0
    }
}

impl GpsTimeType {
    /// Returns true if this time type is gps standard time.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::GpsTimeType;
    /// assert!(!GpsTimeType::Week.is_standard());
    /// assert!(GpsTimeType::Standard.is_standard());
    /// ```
    pub fn is_standard(&self) -> bool {
        *self == GpsTimeType::Standard
    }
}

impl fmt::Display for GpsTimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GpsTimeType::Week => write!(f, "GPS week time"),
            GpsTimeType::Standard => write!(f, "GPS standard time"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gps_time_type() {
        assert_eq!(GpsTimeType::Week, GlobalEncoding::from(0).gps_time_type());
        assert_eq!(GpsTimeType::Standard, GlobalEncoding::from(1).gps_time_type());
    }

    #[test]
    fn waveform_bits() {
        let global_encoding = GlobalEncoding::from(0b0110);
        assert!(global_encoding.has_internal_waveform_data_packets());
        assert!(global_encoding.has_external_waveform_data_packets());
        assert!(!global_encoding.is_wkt());
    }

    #[test]
    fn roundtrip_bits() {
        assert_eq!(0xFFFFu16, GlobalEncoding::from(0xFFFF).into());
    }

    #[test]
    fn display() {
        assert_eq!("GPS standard time", GpsTimeType::Standard.to_string());
    }
}
