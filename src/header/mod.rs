//! Version-normalized file metadata.
//!
//! A [Header] is built once, when a file is opened, from the [raw::Header] read off disk. Fields
//! whose meaning changed between las versions are resolved here, so callers never have to check
//! the version themselves:
//!
//! - The file source id is zero for las 1.0, where the field is reserved.
//! - The global encoding is zero for las 1.0 and 1.1.
//! - The point count comes from the 64-bit field in las 1.4, and the 32-bit field otherwise.

mod global_encoding;

pub use self::global_encoding::{GlobalEncoding, GpsTimeType};

use crate::{
    feature::{FileSourceId, GpsStandardTime},
    point::Format,
    raw,
    utils::AsLasStr,
    Bounds, Error, Result, Transform, Vector, Version,
};
use chrono::NaiveDate;
use std::fmt;
use uuid::Uuid;

const POINT_FORMAT_ID_MASK: u8 = 0x3F;

/// Metadata describing the layout and interpretation of the points.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    version: Version,
    file_source_id: u16,
    global_encoding: GlobalEncoding,
    guid: Uuid,
    system_identifier: String,
    generating_software: String,
    file_creation_day_of_year: u16,
    file_creation_year: u16,
    header_size: u16,
    offset_to_point_data: u32,
    number_of_variable_length_records: u32,
    point_format: Format,
    is_compressed: bool,
    point_data_record_length: u16,
    number_of_points: u64,
    number_of_points_by_return: Vec<u64>,
    transforms: Vector<Transform>,
    bounds: Bounds,
    start_of_waveform_data_packet_record: Option<u64>,
    start_of_first_evlr: Option<u64>,
    number_of_evlrs: u32,
}

impl Header {
    /// Creates a header from a raw header.
    ///
    /// Fails if the point format is not zero through ten (after masking off the laszip
    /// compression bits), or if the point data record length is shorter than the format demands.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::{raw, Header};
    /// let header = Header::from_raw(raw::Header::default()).unwrap();
    /// assert_eq!(0, header.point_format().id());
    ///
    /// let raw_header = raw::Header { point_data_format_id: 11, ..Default::default() };
    /// assert!(Header::from_raw(raw_header).is_err());
    /// ```
    pub fn from_raw(raw_header: raw::Header) -> Result<Header> {
        let version = raw_header.version;
        version.verify()?;
        let point_format = Format::new(raw_header.point_data_format_id & POINT_FORMAT_ID_MASK)?;
        if raw_header.point_data_record_length < point_format.len() {
            return Err(Error::PointDataRecordLength {
                format: point_format,
                length: raw_header.point_data_record_length,
            });
        }
        let (number_of_points, number_of_points_by_return) = match raw_header.large_file {
            Some(large_file) => {
                let legacy = u64::from(raw_header.number_of_point_records);
                if legacy != 0 && legacy != large_file.number_of_point_records {
                    log::warn!(
                        "legacy point count {} disagrees with extended point count {}, using the extended count",
                        legacy,
                        large_file.number_of_point_records
                    );
                }
                (
                    large_file.number_of_point_records,
                    large_file.number_of_points_by_return.to_vec(),
                )
            }
            None => (
                u64::from(raw_header.number_of_point_records),
                raw_header
                    .number_of_points_by_return
                    .iter()
                    .map(|&n| u64::from(n))
                    .collect(),
            ),
        };
        let file_source_id = if version.supports::<FileSourceId>() {
            raw_header.file_source_id
        } else {
            0
        };
        let global_encoding = if version.supports::<GpsStandardTime>() {
            GlobalEncoding::from(raw_header.global_encoding)
        } else {
            GlobalEncoding::default()
        };
        if version == Version::new(1, 1) && raw_header.number_of_variable_length_records == 0 {
            log::warn!("las 1.1 requires at least one variable length record, but there are none");
        }
        let header = Header {
            version,
            file_source_id,
            global_encoding,
            guid: Uuid::from_bytes_le(raw_header.guid),
            system_identifier: raw_header.system_identifier.as_las_string(),
            generating_software: raw_header.generating_software.as_las_string(),
            file_creation_day_of_year: raw_header.file_creation_day_of_year,
            file_creation_year: raw_header.file_creation_year,
            header_size: raw_header.header_size,
            offset_to_point_data: raw_header.offset_to_point_data,
            number_of_variable_length_records: raw_header.number_of_variable_length_records,
            point_format,
            is_compressed: raw_header.is_compressed(),
            point_data_record_length: raw_header.point_data_record_length,
            number_of_points,
            number_of_points_by_return,
            transforms: Vector {
                x: Transform {
                    scale: raw_header.x_scale_factor,
                    offset: raw_header.x_offset,
                },
                y: Transform {
                    scale: raw_header.y_scale_factor,
                    offset: raw_header.y_offset,
                },
                z: Transform {
                    scale: raw_header.z_scale_factor,
                    offset: raw_header.z_offset,
                },
            },
            bounds: Bounds {
                min: Vector {
                    x: raw_header.min_x,
                    y: raw_header.min_y,
                    z: raw_header.min_z,
                },
                max: Vector {
                    x: raw_header.max_x,
                    y: raw_header.max_y,
                    z: raw_header.max_z,
                },
            },
            start_of_waveform_data_packet_record: raw_header.start_of_waveform_data_packet_record,
            start_of_first_evlr: raw_header.evlr.map(|evlr| evlr.start_of_first_evlr),
            number_of_evlrs: raw_header.evlr.map_or(0, |evlr| evlr.number_of_evlrs),
        };
        log::debug!(
            "las {} header: point format {}, {} points, {} vlrs, {} evlrs",
            header.version,
            header.point_format,
            header.number_of_points,
            header.number_of_variable_length_records,
            header.number_of_evlrs
        );
        Ok(header)
    }

    /// Returns this header's version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the file source id, zero for las 1.0.
    pub fn file_source_id(&self) -> u16 {
        self.file_source_id
    }

    /// Returns the global encoding bits.
    pub fn global_encoding(&self) -> GlobalEncoding {
        self.global_encoding
    }

    /// Returns the meaning of the gps time in the point records.
    ///
    /// Always [GpsTimeType::Week] before las 1.2.
    pub fn gps_time_type(&self) -> GpsTimeType {
        self.global_encoding.gps_time_type()
    }

    /// Returns the project id.
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Returns the system identifier, with any padding removed.
    pub fn system_identifier(&self) -> &str {
        &self.system_identifier
    }

    /// Returns the generating software, with any padding removed.
    pub fn generating_software(&self) -> &str {
        &self.generating_software
    }

    /// Returns the creation day of year and year, as stored.
    pub fn file_creation(&self) -> (u16, u16) {
        (self.file_creation_day_of_year, self.file_creation_year)
    }

    /// Returns the file creation date.
    ///
    /// Returns `None` if either field is zero or the pair does not name a real day.
    pub fn date(&self) -> Option<NaiveDate> {
        if self.file_creation_day_of_year == 0 || self.file_creation_year == 0 {
            None
        } else {
            NaiveDate::from_yo_opt(
                i32::from(self.file_creation_year),
                u32::from(self.file_creation_day_of_year),
            )
        }
    }

    /// Returns the size of the header, in bytes.
    pub fn header_size(&self) -> u16 {
        self.header_size
    }

    /// Returns the byte offset from the start of the file to the first point record.
    pub fn offset_to_point_data(&self) -> u32 {
        self.offset_to_point_data
    }

    /// Returns the number of variable length records the header declares.
    pub fn number_of_variable_length_records(&self) -> u32 {
        self.number_of_variable_length_records
    }

    /// Returns the point format.
    pub fn point_format(&self) -> Format {
        self.point_format
    }

    /// Were the laszip compression bits set on the point format id?
    pub fn is_compressed(&self) -> bool {
        self.is_compressed
    }

    /// Returns the size of one point record, extra bytes included.
    pub fn point_data_record_length(&self) -> u16 {
        self.point_data_record_length
    }

    /// Returns the number of bytes each record carries past its format's fields.
    pub fn extra_bytes_len(&self) -> u16 {
        self.point_data_record_length - self.point_format.len()
    }

    /// Returns the number of points.
    ///
    /// For las 1.4 this is the 64-bit count, even if the legacy 32-bit count says otherwise.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns the number of points of each return number, starting with return one.
    ///
    /// Five counts before las 1.4, fifteen after.
    pub fn number_of_points_by_return(&self) -> &[u64] {
        &self.number_of_points_by_return
    }

    /// Returns the scale and offset of each axis.
    pub fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Returns the bounds, in real-world coordinates.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the offset to the waveform data packet record, las 1.3 and later.
    pub fn start_of_waveform_data_packet_record(&self) -> Option<u64> {
        self.start_of_waveform_data_packet_record
    }

    /// Returns the offset to the first extended variable length record, las 1.4 only.
    pub fn start_of_first_evlr(&self) -> Option<u64> {
        self.start_of_first_evlr
    }

    /// Returns the number of extended variable length records, zero before las 1.4.
    pub fn number_of_evlrs(&self) -> u32 {
        self.number_of_evlrs
    }

    /// Returns the byte offset of a point record, if it fits in a u64.
    pub(crate) fn point_offset(&self, index: u64) -> Option<u64> {
        index
            .checked_mul(u64::from(self.point_data_record_length))?
            .checked_add(u64::from(self.offset_to_point_data))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version: {}", self.version)?;
        writeln!(f, "file source id: {}", self.file_source_id)?;
        writeln!(
            f,
            "global encoding: {:#06x} ({} gps time)",
            u16::from(self.global_encoding),
            self.gps_time_type()
        )?;
        writeln!(f, "guid: {}", self.guid)?;
        writeln!(f, "system identifier: {}", self.system_identifier)?;
        writeln!(f, "generating software: {}", self.generating_software)?;
        match self.date() {
            Some(date) => writeln!(f, "file creation: {}", date)?,
            None => writeln!(
                f,
                "file creation: day {} of {}",
                self.file_creation_day_of_year, self.file_creation_year
            )?,
        }
        writeln!(f, "header size: {}", self.header_size)?;
        writeln!(f, "offset to point data: {}", self.offset_to_point_data)?;
        writeln!(
            f,
            "variable length records: {}",
            self.number_of_variable_length_records
        )?;
        writeln!(
            f,
            "point format: {}{}",
            self.point_format,
            if self.is_compressed { " (compressed)" } else { "" }
        )?;
        writeln!(f, "point data record length: {}", self.point_data_record_length)?;
        writeln!(f, "number of points: {}", self.number_of_points)?;
        writeln!(
            f,
            "number of points by return: {:?}",
            self.number_of_points_by_return
        )?;
        writeln!(
            f,
            "scale: {} {} {}",
            self.transforms.x.scale, self.transforms.y.scale, self.transforms.z.scale
        )?;
        writeln!(
            f,
            "offset: {} {} {}",
            self.transforms.x.offset, self.transforms.y.offset, self.transforms.z.offset
        )?;
        writeln!(
            f,
            "min: {} {} {}",
            self.bounds.min.x, self.bounds.min.y, self.bounds.min.z
        )?;
        writeln!(
            f,
            "max: {} {} {}",
            self.bounds.max.x, self.bounds.max.y, self.bounds.max.z
        )?;
        if let Some(start) = self.start_of_waveform_data_packet_record {
            writeln!(f, "start of waveform data packet record: {}", start)?;
        }
        if let Some(start) = self.start_of_first_evlr {
            writeln!(f, "start of first evlr: {}", start)?;
        }
        write!(f, "extended variable length records: {}", self.number_of_evlrs)
    }
}
