//! Byte sizes and field offsets of every structure in a las file.
//!
//! Everything in here is a constant taken from the ASPRS las 1.0 through 1.4 specifications. The
//! decoders in [raw](crate::raw) and [point](crate::point) walk their structures field by field,
//! and their tests check that they consume exactly the number of bytes listed here.

/// The number of bytes needed to learn the version of any las header.
///
/// The las 1.0 header is a strict prefix of every later header, so reading this many bytes is
/// always enough to find the version fields (bytes 24 and 25).
pub const HEADER_PREFIX_SIZE: usize = 227;

/// Header sizes for las 1.0, 1.1, 1.2, 1.3, and 1.4, indexed by minor version.
pub const HEADER_SIZES: [u16; 5] = [227, 227, 227, 235, 375];

/// Offset of the version major byte in the header.
pub const VERSION_MAJOR_OFFSET: usize = 24;

/// Offset of the version minor byte in the header.
pub const VERSION_MINOR_OFFSET: usize = 25;

/// The size of a regular vlr header, before its payload.
pub const VLR_HEADER_SIZE: u64 = 54;

/// The size of an extended vlr header, before its payload.
pub const EVLR_HEADER_SIZE: u64 = 60;

/// The value of the first vlr field in las 1.0 files.
pub const VLR_SIGNATURE_1_0: u16 = 0xAABB;

/// Point record sizes for formats 0 through 10, without extra bytes.
pub const RECORD_SIZES: [u16; 11] = [20, 28, 26, 34, 57, 63, 30, 36, 38, 59, 67];

/// The size of the fields common to formats 0 through 5.
pub const LEGACY_CORE_SIZE: u16 = 20;

/// The size of the fields common to formats 6 through 10.
pub const EXTENDED_CORE_SIZE: u16 = 22;

/// The size of a gps time field.
pub const GPS_TIME_SIZE: u16 = 8;

/// The size of the red, green, and blue fields.
pub const COLOR_SIZE: u16 = 6;

/// The size of a near infrared field.
pub const NIR_SIZE: u16 = 2;

/// The size of the waveform packet fields.
pub const WAVEFORM_SIZE: u16 = 29;

/// Where each optional block lives inside a point record of a given format.
///
/// `None` means the format does not carry that block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLayout {
    /// Offset of the gps time.
    pub gps_time: Option<u16>,
    /// Offset of the red channel (green and blue follow).
    pub color: Option<u16>,
    /// Offset of the near infrared channel.
    pub nir: Option<u16>,
    /// Offset of the wave packet descriptor index.
    pub waveform: Option<u16>,
    /// Total size of the record.
    pub size: u16,
}

/// Field offsets for point formats 0 through 10.
pub const POINT_LAYOUTS: [PointLayout; 11] = [
    PointLayout {
        gps_time: None,
        color: None,
        nir: None,
        waveform: None,
        size: 20,
    },
    PointLayout {
        gps_time: Some(20),
        color: None,
        nir: None,
        waveform: None,
        size: 28,
    },
    PointLayout {
        gps_time: None,
        color: Some(20),
        nir: None,
        waveform: None,
        size: 26,
    },
    PointLayout {
        gps_time: Some(20),
        color: Some(28),
        nir: None,
        waveform: None,
        size: 34,
    },
    PointLayout {
        gps_time: Some(20),
        color: None,
        nir: None,
        waveform: Some(28),
        size: 57,
    },
    PointLayout {
        gps_time: Some(20),
        color: Some(28),
        nir: None,
        waveform: Some(34),
        size: 63,
    },
    PointLayout {
        gps_time: Some(22),
        color: None,
        nir: None,
        waveform: None,
        size: 30,
    },
    PointLayout {
        gps_time: Some(22),
        color: Some(30),
        nir: None,
        waveform: None,
        size: 36,
    },
    PointLayout {
        gps_time: Some(22),
        color: Some(30),
        nir: Some(36),
        waveform: None,
        size: 38,
    },
    PointLayout {
        gps_time: Some(22),
        color: None,
        nir: None,
        waveform: Some(30),
        size: 59,
    },
    PointLayout {
        gps_time: Some(22),
        color: Some(30),
        nir: Some(36),
        waveform: Some(38),
        size: 67,
    },
];

/// Returns the header size for a las 1.x minor version, or `None` if we don't know it.
///
/// # Examples
///
/// ```
/// use las_reader::layout;
/// assert_eq!(Some(227), layout::header_size(2));
/// assert_eq!(Some(375), layout::header_size(4));
/// assert_eq!(None, layout::header_size(5));
/// ```
pub fn header_size(minor: u8) -> Option<u16> {
    HEADER_SIZES.get(usize::from(minor)).copied()
}

/// Returns the record size of a point format, or `None` if the format is not 0 through 10.
///
/// # Examples
///
/// ```
/// use las_reader::layout;
/// assert_eq!(Some(20), layout::record_size(0));
/// assert_eq!(Some(67), layout::record_size(10));
/// assert_eq!(None, layout::record_size(11));
/// ```
pub fn record_size(format: u8) -> Option<u16> {
    RECORD_SIZES.get(usize::from(format)).copied()
}
