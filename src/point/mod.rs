//! Point records and the pieces they are made of.
//!
//! A [Point] holds one record exactly as stored: unscaled integer coordinates, the packed return
//! mask, and whichever optional blocks its [Format] carries. Use [Point::scaled] (or
//! [LidarFile::get_scaled_xyz](crate::LidarFile::get_scaled_xyz)) to get real-world
//! coordinates.
//!
//! ```
//! use las_reader::point::{Format, Point};
//! let mut bytes = vec![0u8; 20];
//! bytes[0..4].copy_from_slice(&42i32.to_le_bytes());
//! bytes[14] = 0b0001_0001; // return 1 of 2
//! bytes[15] = 2; // ground
//! let point = Point::decode(&bytes, Format::new(0).unwrap()).unwrap();
//! assert_eq!(42, point.x);
//! assert_eq!(1, point.return_number());
//! assert_eq!(2, point.class_code());
//! ```

mod color;
mod format;
mod return_info;
mod scan_angle;
mod scan_direction;
mod waveform;

pub use self::color::Color;
pub use self::format::Format;
pub use self::return_info::ReturnInfo;
pub use self::scan_angle::ScanAngle;
pub use self::scan_direction::ScanDirection;
pub use self::waveform::Waveform;

use crate::{Error, Result, Transform, Vector};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

const LEGACY_CLASS_MASK: u8 = 0b0001_1111;
const LEGACY_SYNTHETIC: u8 = 0b0010_0000;
const LEGACY_KEY_POINT: u8 = 0b0100_0000;
const LEGACY_WITHHELD: u8 = 0b1000_0000;
const OVERLAP_CLASSIFICATION_CODE: u8 = 12;

const SYNTHETIC: u8 = 0b0001;
const KEY_POINT: u8 = 0b0010;
const WITHHELD: u8 = 0b0100;
const OVERLAP: u8 = 0b1000;

/// A point record, as stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// The unscaled x coordinate.
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The integer representation of the pulse return magnitude.
    pub intensity: u16,

    /// Return number, number of returns, and flags.
    pub return_info: ReturnInfo,

    /// The classification byte.
    ///
    /// In formats zero through five the low five bits are the class and the high three are the
    /// synthetic, key-point, and withheld flags. Use [Point::class_code] to get the class alone.
    pub classification: u8,

    #[allow(missing_docs)]
    pub scan_angle: ScanAngle,

    /// This field may be used at the user's discretion.
    pub user_data: u8,

    /// The file from which this point originated, zero meaning this file.
    pub point_source_id: u16,

    /// The time tag at which the point was acquired.
    ///
    /// Either GPS week time or adjusted standard GPS time, see
    /// [Header::gps_time_type](crate::Header::gps_time_type).
    pub gps_time: Option<f64>,

    #[allow(missing_docs)]
    pub color: Option<Color>,

    /// The near infrared channel.
    pub nir: Option<u16>,

    #[allow(missing_docs)]
    pub waveform: Option<Waveform>,

    /// Any bytes past the end of the format's fields.
    pub extra_bytes: Vec<u8>,
}

impl Point {
    /// Decodes a point record from a byte slice.
    ///
    /// Bytes past [Format::len] are kept as extra bytes. A slice shorter than the format fails
    /// with [Error::ShortRead].
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::{Format, Point};
    /// let format = Format::new(1).unwrap();
    /// let point = Point::decode(&[0; 30], format).unwrap();
    /// assert_eq!(Some(0.), point.gps_time);
    /// assert_eq!(vec![0, 0], point.extra_bytes);
    /// assert!(Point::decode(&[0; 20], format).is_err());
    /// ```
    pub fn decode(bytes: &[u8], format: Format) -> Result<Point> {
        let len = usize::from(format.len());
        if bytes.len() < len {
            return Err(Error::ShortRead {
                expected: len as u64,
                actual: bytes.len() as u64,
            });
        }
        let mut read = Cursor::new(bytes);
        let x = read.read_i32::<LittleEndian>()?;
        let y = read.read_i32::<LittleEndian>()?;
        let z = read.read_i32::<LittleEndian>()?;
        let intensity = read.read_u16::<LittleEndian>()?;
        let (return_info, classification, scan_angle, user_data) = if format.is_extended() {
            let return_info = ReturnInfo::Extended(read.read_u16::<LittleEndian>()?);
            let classification = read.read_u8()?;
            let user_data = read.read_u8()?;
            let scan_angle = ScanAngle::Scaled(read.read_i16::<LittleEndian>()?);
            (return_info, classification, scan_angle, user_data)
        } else {
            let return_info = ReturnInfo::Legacy(read.read_u8()?);
            let classification = read.read_u8()?;
            let scan_angle = ScanAngle::Rank(read.read_i8()?);
            let user_data = read.read_u8()?;
            (return_info, classification, scan_angle, user_data)
        };
        let point_source_id = read.read_u16::<LittleEndian>()?;

        let layout = format.layout();
        let gps_time = layout
            .gps_time
            .map(|offset| {
                read.set_position(offset.into());
                read.read_f64::<LittleEndian>()
            })
            .transpose()?;
        let color = layout
            .color
            .map(|offset| {
                read.set_position(offset.into());
                Ok::<_, std::io::Error>(Color::new(
                    read.read_u16::<LittleEndian>()?,
                    read.read_u16::<LittleEndian>()?,
                    read.read_u16::<LittleEndian>()?,
                ))
            })
            .transpose()?;
        let nir = layout
            .nir
            .map(|offset| {
                read.set_position(offset.into());
                read.read_u16::<LittleEndian>()
            })
            .transpose()?;
        let waveform = match layout.waveform {
            Some(offset) => {
                read.set_position(offset.into());
                Some(Waveform::read_from(&mut read)?)
            }
            None => None,
        };
        Ok(Point {
            x,
            y,
            z,
            intensity,
            return_info,
            classification,
            scan_angle,
            user_data,
            point_source_id,
            gps_time,
            color,
            nir,
            waveform,
            extra_bytes: bytes[len..].to_vec(),
        })
    }

    /// Returns an all-zero record of the given format.
    ///
    /// This is what a point read past the end of the point data decodes to.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::{Format, Point, ReturnInfo};
    /// let point = Point::zeroed(Format::new(7).unwrap(), 38);
    /// assert_eq!(0, point.x);
    /// assert_eq!(ReturnInfo::Extended(0), point.return_info);
    /// assert_eq!(2, point.extra_bytes.len());
    /// ```
    pub fn zeroed(format: Format, record_length: u16) -> Point {
        let (return_info, scan_angle) = if format.is_extended() {
            (ReturnInfo::Extended(0), ScanAngle::Scaled(0))
        } else {
            (ReturnInfo::Legacy(0), ScanAngle::Rank(0))
        };
        Point {
            x: 0,
            y: 0,
            z: 0,
            intensity: 0,
            return_info,
            classification: 0,
            scan_angle,
            user_data: 0,
            point_source_id: 0,
            gps_time: format.has_gps_time().then_some(0.),
            color: format.has_color().then(Color::default),
            nir: format.has_nir().then_some(0),
            waveform: format.has_waveform().then(Waveform::default),
            extra_bytes: vec![0; usize::from(record_length.saturating_sub(format.len()))],
        }
    }

    /// Applies per-axis scales and offsets to this point's coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::{point::{Format, Point}, Transform, Vector};
    /// let mut point = Point::zeroed(Format::new(0).unwrap(), 20);
    /// point.x = 2;
    /// let transform = Transform { scale: 0.5, offset: 10. };
    /// let scaled = point.scaled(&Vector { x: transform, y: transform, z: transform });
    /// assert_eq!(11., scaled.x);
    /// assert_eq!(10., scaled.y);
    /// ```
    pub fn scaled(&self, transforms: &Vector<Transform>) -> Vector<f64> {
        Vector {
            x: transforms.x.direct(self.x),
            y: transforms.y.direct(self.y),
            z: transforms.z.direct(self.z),
        }
    }

    /// Returns the class of this point, without any flag bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::{Format, Point};
    /// let mut point = Point::zeroed(Format::new(0).unwrap(), 20);
    /// point.classification = 0b1000_0010;
    /// assert_eq!(2, point.class_code());
    /// assert!(point.is_withheld());
    /// ```
    pub fn class_code(&self) -> u8 {
        match self.return_info {
            ReturnInfo::Legacy(_) => self.classification & LEGACY_CLASS_MASK,
            ReturnInfo::Extended(_) => self.classification,
        }
    }

    /// Returns the return number.
    pub fn return_number(&self) -> u8 {
        self.return_info.return_number()
    }

    /// Returns the number of returns of this point's pulse.
    pub fn number_of_returns(&self) -> u8 {
        self.return_info.number_of_returns()
    }

    /// Was this point created by a technique other than lidar collection?
    pub fn is_synthetic(&self) -> bool {
        self.flag(LEGACY_SYNTHETIC, SYNTHETIC)
    }

    /// Is this point a model key-point?
    pub fn is_key_point(&self) -> bool {
        self.flag(LEGACY_KEY_POINT, KEY_POINT)
    }

    /// Should this point be left out of processing?
    pub fn is_withheld(&self) -> bool {
        self.flag(LEGACY_WITHHELD, WITHHELD)
    }

    /// Is this point in the overlap region of two or more swaths?
    ///
    /// Legacy formats have no overlap bit, so the overlap class code (12) is used instead.
    pub fn is_overlap(&self) -> bool {
        match self.return_info.classification_flags() {
            Some(flags) => flags & OVERLAP == OVERLAP,
            None => self.class_code() == OVERLAP_CLASSIFICATION_CODE,
        }
    }

    fn flag(&self, legacy: u8, extended: u8) -> bool {
        match self.return_info.classification_flags() {
            Some(flags) => flags & extended == extended,
            None => self.classification & legacy == legacy,
        }
    }
}
