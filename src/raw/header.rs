//! Raw file metadata.

use super::{read_exactly, LASF};
use crate::{
    feature::{Evlrs, LargeFiles, Waveforms},
    layout, Error, Result, Version,
};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read, Seek, SeekFrom};

const IS_COMPRESSED_MASK: u8 = 0x80;

/// A las header, exactly as it is laid out on disk.
///
/// The documentation for each member is taken from the las 1.2 spec, except in cases where the
/// field's usage has changed, in which case notes about its uses over versions are included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
    /// The file signature must contain the four characters “LASF”.
    pub file_signature: [u8; 4],

    /// **las 1.1 and later**: the file source id. **las 1.0**: reserved.
    pub file_source_id: u16,

    /// **las 1.2 and later**: a bit field of global properties. **las 1.0 and 1.1**: reserved.
    ///
    /// | Bits | Field name | las versions |
    /// | ---- | ---------- | ------------ |
    /// | 0 | GPS time type | 1.2 and above |
    /// | 1 | Waveform data packets internal | 1.3 and above |
    /// | 2 | Waveform data packets external | 1.3 and above |
    /// | 3 | Return numbers have been synthetically generated | 1.3 and above |
    /// | 4 | WKT | 1.4 |
    pub global_encoding: u16,

    /// Project id, stored as a GUID.
    pub guid: [u8; 16],

    /// The las version.
    pub version: Version,

    /// The hardware or operation that produced this file.
    pub system_identifier: [u8; 32],

    /// The software that generated this file.
    pub generating_software: [u8; 32],

    /// Day, expressed as an unsigned short, on which this file was created.
    ///
    /// **las 1.0**: the julian day of the flight.
    pub file_creation_day_of_year: u16,

    /// The year, expressed as a four digit number, in which the file was created.
    pub file_creation_year: u16,

    /// The size, in bytes, of the Public Header Block itself.
    pub header_size: u16,

    /// The number of bytes from the beginning of the file to the first point record.
    pub offset_to_point_data: u32,

    /// The number of variable length records.
    pub number_of_variable_length_records: u32,

    /// The point data format id, possibly with the laszip compression bits set.
    pub point_data_format_id: u8,

    /// The size, in bytes, of the Point Data Record.
    pub point_data_record_length: u16,

    /// The legacy (32-bit) number of point records.
    pub number_of_point_records: u32,

    /// The legacy number of points for returns one through five.
    pub number_of_points_by_return: [u32; 5],

    #[allow(missing_docs)]
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,
    #[allow(missing_docs)]
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,
    #[allow(missing_docs)]
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,

    /// **las 1.3 and 1.4**: the offset, in bytes, from the beginning of the file to the first
    /// byte of the waveform data package record.
    pub start_of_waveform_data_packet_record: Option<u64>,

    /// **las 1.4**: extended variable length record bookkeeping.
    pub evlr: Option<Evlr>,

    /// **las 1.4**: 64-bit point counts.
    pub large_file: Option<LargeFile>,
}

/// Extended variable length record bookkeeping, las 1.4 only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Evlr {
    /// The offset, in bytes, from the beginning of the file to the first byte of the first evlr.
    pub start_of_first_evlr: u64,

    /// The number of evlrs stored after the point records.
    pub number_of_evlrs: u32,
}

/// 64-bit point counts, las 1.4 only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LargeFile {
    /// The total number of point records in the file.
    pub number_of_point_records: u64,

    /// The number of points for returns one through fifteen.
    pub number_of_points_by_return: [u64; 15],
}

impl Header {
    /// Reads a raw header from the start of a `Read`.
    ///
    /// First the las 1.0 prefix is read to learn the version, then the reader is rewound and the
    /// exact header for that version is read. The signature, version, and header size field are
    /// checked; nothing else is.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_reader::{raw::Header, Error};
    /// let err = Header::read_from(Cursor::new(vec![0u8; 375])).unwrap_err();
    /// assert!(matches!(err, Error::InvalidSignature(_)));
    /// ```
    pub fn read_from<R: Read + Seek>(mut read: R) -> Result<Header> {
        let _ = read.seek(SeekFrom::Start(0))?;
        let mut prefix = Vec::with_capacity(layout::HEADER_PREFIX_SIZE);
        let _ = read
            .by_ref()
            .take(layout::HEADER_PREFIX_SIZE as u64)
            .read_to_end(&mut prefix)?;
        if prefix.len() < LASF.len() {
            return Err(Error::ShortRead {
                expected: layout::HEADER_PREFIX_SIZE as u64,
                actual: prefix.len() as u64,
            });
        }
        let mut file_signature = [0; 4];
        file_signature.copy_from_slice(&prefix[0..4]);
        if file_signature != LASF {
            return Err(Error::InvalidSignature(file_signature));
        }
        if prefix.len() < layout::HEADER_PREFIX_SIZE {
            return Err(Error::ShortRead {
                expected: layout::HEADER_PREFIX_SIZE as u64,
                actual: prefix.len() as u64,
            });
        }
        let version = Version::new(
            prefix[layout::VERSION_MAJOR_OFFSET],
            prefix[layout::VERSION_MINOR_OFFSET],
        );
        let expected = version.header_size()?;
        log::debug!("las {} header, reading {} bytes", version, expected);

        let _ = read.seek(SeekFrom::Start(0))?;
        let bytes = read_exactly(&mut read, u64::from(expected))?;
        let mut cursor = Cursor::new(bytes.as_slice());
        let header = Header::read_fields(&mut cursor, version)?;
        debug_assert_eq!(u64::from(expected), cursor.position());
        if header.header_size != expected {
            return Err(Error::HeaderSizeMismatch {
                version,
                declared: header.header_size,
                expected,
            });
        }
        Ok(header)
    }

    fn read_fields<R: Read>(mut read: R, version: Version) -> Result<Header> {
        let mut file_signature = [0; 4];
        read.read_exact(&mut file_signature)?;
        let file_source_id = read.read_u16::<LittleEndian>()?;
        let global_encoding = read.read_u16::<LittleEndian>()?;
        let mut guid = [0; 16];
        read.read_exact(&mut guid)?;
        let _version_major = read.read_u8()?;
        let _version_minor = read.read_u8()?;
        let mut system_identifier = [0; 32];
        read.read_exact(&mut system_identifier)?;
        let mut generating_software = [0; 32];
        read.read_exact(&mut generating_software)?;
        let file_creation_day_of_year = read.read_u16::<LittleEndian>()?;
        let file_creation_year = read.read_u16::<LittleEndian>()?;
        let header_size = read.read_u16::<LittleEndian>()?;
        let offset_to_point_data = read.read_u32::<LittleEndian>()?;
        let number_of_variable_length_records = read.read_u32::<LittleEndian>()?;
        let point_data_format_id = read.read_u8()?;
        let point_data_record_length = read.read_u16::<LittleEndian>()?;
        let number_of_point_records = read.read_u32::<LittleEndian>()?;
        let mut number_of_points_by_return = [0; 5];
        for n in number_of_points_by_return.iter_mut() {
            *n = read.read_u32::<LittleEndian>()?;
        }
        let x_scale_factor = read.read_f64::<LittleEndian>()?;
        let y_scale_factor = read.read_f64::<LittleEndian>()?;
        let z_scale_factor = read.read_f64::<LittleEndian>()?;
        let x_offset = read.read_f64::<LittleEndian>()?;
        let y_offset = read.read_f64::<LittleEndian>()?;
        let z_offset = read.read_f64::<LittleEndian>()?;
        let max_x = read.read_f64::<LittleEndian>()?;
        let min_x = read.read_f64::<LittleEndian>()?;
        let max_y = read.read_f64::<LittleEndian>()?;
        let min_y = read.read_f64::<LittleEndian>()?;
        let max_z = read.read_f64::<LittleEndian>()?;
        let min_z = read.read_f64::<LittleEndian>()?;
        let start_of_waveform_data_packet_record = if version.supports::<Waveforms>() {
            Some(read.read_u64::<LittleEndian>()?)
        } else {
            None
        };
        let evlr = if version.supports::<Evlrs>() {
            Some(Evlr::read_from(&mut read)?)
        } else {
            None
        };
        let large_file = if version.supports::<LargeFiles>() {
            Some(LargeFile::read_from(&mut read)?)
        } else {
            None
        };
        Ok(Header {
            file_signature,
            file_source_id,
            global_encoding,
            guid,
            version,
            system_identifier,
            generating_software,
            file_creation_day_of_year,
            file_creation_year,
            header_size,
            offset_to_point_data,
            number_of_variable_length_records,
            point_data_format_id,
            point_data_record_length,
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor,
            y_scale_factor,
            z_scale_factor,
            x_offset,
            y_offset,
            z_offset,
            max_x,
            min_x,
            max_y,
            min_y,
            max_z,
            min_z,
            start_of_waveform_data_packet_record,
            evlr,
            large_file,
        })
    }

    /// Returns true if this raw header is for compressed las data.
    ///
    /// Though this isn't part of the las spec, the two high bits of the point data format id have
    /// been used to indicate compressed data, though only the high bit is currently used.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::raw::Header;
    /// let mut header = Header::default();
    /// assert!(!header.is_compressed());
    /// header.point_data_format_id = 131;
    /// assert!(header.is_compressed());
    /// ```
    pub fn is_compressed(&self) -> bool {
        (self.point_data_format_id & IS_COMPRESSED_MASK) == IS_COMPRESSED_MASK
    }
}

impl Default for Header {
    fn default() -> Header {
        let header_size = layout::HEADER_SIZES[2];
        Header {
            file_signature: LASF,
            file_source_id: 0,
            global_encoding: 0,
            guid: [0; 16],
            version: Version::new(1, 2),
            system_identifier: [0; 32],
            generating_software: [0; 32],
            file_creation_day_of_year: 0,
            file_creation_year: 0,
            header_size,
            offset_to_point_data: u32::from(header_size),
            number_of_variable_length_records: 0,
            point_data_format_id: 0,
            point_data_record_length: layout::RECORD_SIZES[0],
            number_of_point_records: 0,
            number_of_points_by_return: [0; 5],
            x_scale_factor: 0.001,
            y_scale_factor: 0.001,
            z_scale_factor: 0.001,
            x_offset: 0.,
            y_offset: 0.,
            z_offset: 0.,
            max_x: 0.,
            min_x: 0.,
            max_y: 0.,
            min_y: 0.,
            max_z: 0.,
            min_z: 0.,
            start_of_waveform_data_packet_record: None,
            evlr: None,
            large_file: None,
        }
    }
}

impl Evlr {
    fn read_from<R: Read>(mut read: R) -> Result<Evlr> {
        Ok(Evlr {
            start_of_first_evlr: read.read_u64::<LittleEndian>()?,
            number_of_evlrs: read.read_u32::<LittleEndian>()?,
        })
    }
}

impl LargeFile {
    fn read_from<R: Read>(mut read: R) -> Result<LargeFile> {
        let number_of_point_records = read.read_u64::<LittleEndian>()?;
        let mut number_of_points_by_return = [0; 15];
        for n in &mut number_of_points_by_return {
            *n = read.read_u64::<LittleEndian>()?;
        }
        Ok(LargeFile {
            number_of_point_records,
            number_of_points_by_return,
        })
    }
}
