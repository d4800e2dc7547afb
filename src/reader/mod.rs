//! Random access to the records of a las or laz file.
//!
//! A [PointSource] hands out the header, variable length records, and point records of one open
//! file. There are two:
//!
//! - [RawByteSource] decodes uncompressed las data straight from the bytes on disk.
//! - [CompressedSource] (with the `laz` feature) hands the point data to a laszip decompressor
//!   and decodes what comes out with the same decoder.
//!
//! Most users want [LidarFile](crate::LidarFile), which picks the source by file extension.
//!
//! Nothing is cached: every call seeks and reads. The exception is the vlr offset table, which
//! can be kept with [Options::with_vlr_offset_cache](crate::Options::with_vlr_offset_cache).

#[cfg(feature = "laz")]
mod laz;
mod las;

#[cfg(feature = "laz")]
pub use self::laz::CompressedSource;
pub use self::las::RawByteSource;

use crate::{layout, raw, Error, Header, Point, Result, Version, Vlr};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

const RECORD_LENGTH_OFFSET: u64 = 20;

/// The accessors shared by every backend.
pub trait PointSource {
    /// Returns the header, parsed when the source was opened.
    fn header(&self) -> &Header;

    /// Reads a variable length record.
    ///
    /// Fails with [Error::VlrIndex](crate::Error::VlrIndex) if there is no such record.
    fn vlr(&mut self, index: u32) -> Result<Vlr>;

    /// Reads an extended variable length record.
    ///
    /// Fails with [Error::EvlrIndex](crate::Error::EvlrIndex) if there is no such record.
    fn evlr(&mut self, index: u32) -> Result<Vlr>;

    /// Reads a point record.
    ///
    /// An index past the last point, or a record cut short by the end of the file, is logged and
    /// decodes to [Point::zeroed]. Any other io error is returned.
    fn point(&mut self, index: u64) -> Result<Point>;
}

/// Reads the raw header from the start of `read` and normalizes it.
pub fn read_header<R: Read + Seek>(read: &mut R) -> Result<Header> {
    let raw_header = raw::Header::read_from(&mut *read)?;
    Header::from_raw(raw_header)
}

/// Finds variable length records by walking the chain of records before them.
#[derive(Debug)]
pub(crate) struct RecordWalk {
    start: u64,
    count: u32,
    extended: bool,
    version: Version,
    cache: bool,
    offsets: Vec<u64>,
}

impl RecordWalk {
    pub(crate) fn vlrs(header: &Header, cache: bool) -> RecordWalk {
        RecordWalk {
            start: u64::from(header.header_size()),
            count: header.number_of_variable_length_records(),
            extended: false,
            version: header.version(),
            cache,
            offsets: Vec::new(),
        }
    }

    pub(crate) fn evlrs(header: &Header, cache: bool) -> RecordWalk {
        RecordWalk {
            start: header.start_of_first_evlr().unwrap_or(0),
            count: header.number_of_evlrs(),
            extended: true,
            version: header.version(),
            cache,
            offsets: Vec::new(),
        }
    }

    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    /// Reads record `index`, which must be less than the count.
    pub(crate) fn read<R: Read + Seek>(&mut self, read: &mut R, index: u32) -> Result<Vlr> {
        debug_assert!(index < self.count);
        let offset = if self.cache {
            self.cached_offset(read, index)?
        } else {
            self.walk(read, index)?
        };
        log::trace!(
            "reading {} {} at byte {}",
            if self.extended { "evlr" } else { "vlr" },
            index,
            offset
        );
        let _ = read.seek(SeekFrom::Start(offset))?;
        let raw_vlr = raw::Vlr::read_from(read, self.extended)?;
        let vlr = Vlr::new(raw_vlr);
        if !self.extended && vlr.has_bad_signature(self.version) {
            log::warn!(
                "vlr {} has signature {:#06x}, expected 0xaabb",
                index,
                vlr.reserved
            );
        }
        Ok(vlr)
    }

    /// Returns the offset of record `index`, walking on from the last offset already known.
    fn cached_offset<R: Read + Seek>(&mut self, read: &mut R, index: u32) -> Result<u64> {
        let index = index as usize;
        while self.offsets.len() <= index {
            let offset = match self.offsets.last() {
                Some(&previous) => self.next(read, previous)?,
                None => self.start,
            };
            self.offsets.push(offset);
        }
        Ok(self.offsets[index])
    }

    /// Returns the offset of record `index`, walking from the first record.
    fn walk<R: Read + Seek>(&self, read: &mut R, index: u32) -> Result<u64> {
        let mut offset = self.start;
        for _ in 0..index {
            offset = self.next(read, offset)?;
        }
        Ok(offset)
    }

    /// Reads the length field of the record at `offset` and returns the offset of the one after.
    fn next<R: Read + Seek>(&self, read: &mut R, offset: u64) -> Result<u64> {
        let header_size = if self.extended {
            layout::EVLR_HEADER_SIZE
        } else {
            layout::VLR_HEADER_SIZE
        };
        let _ = read.seek(SeekFrom::Start(offset.saturating_add(RECORD_LENGTH_OFFSET)))?;
        let length = if self.extended {
            read.read_u64::<LittleEndian>()?
        } else {
            u64::from(read.read_u16::<LittleEndian>()?)
        };
        offset
            .checked_add(header_size)
            .and_then(|end| end.checked_add(length))
            .ok_or_else(|| {
                Error::from(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "the record at byte {} claims {} bytes, past any possible end of file",
                        offset, length
                    ),
                ))
            })
    }
}

/// Turns the result of filling a point buffer into a point.
///
/// A short read becomes a zeroed record, everything else is passed along.
pub(crate) fn decode_or_zero(
    result: std::io::Result<()>,
    buffer: &[u8],
    header: &Header,
    index: u64,
) -> Result<Point> {
    match result {
        Ok(()) => Point::decode(buffer, header.point_format()),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
            log::warn!(
                "point {} was cut short by the end of the data, returning a zeroed record",
                index
            );
            Ok(zeroed(header))
        }
        Err(err) => Err(err.into()),
    }
}

/// Returns a zeroed record if `index` is past the last point.
pub(crate) fn out_of_range(header: &Header, index: u64) -> Option<Point> {
    if index < header.number_of_points() {
        None
    } else {
        log::warn!(
            "point {} is past the last point (there are {}), returning a zeroed record",
            index,
            header.number_of_points()
        );
        Some(zeroed(header))
    }
}

/// Returns the byte offset of point `index`, or a zeroed record if the offset can't be addressed.
pub(crate) fn point_offset(header: &Header, index: u64) -> std::result::Result<u64, Point> {
    header.point_offset(index).ok_or_else(|| {
        log::warn!(
            "point {} lies past any possible end of file, returning a zeroed record",
            index
        );
        zeroed(header)
    })
}

fn zeroed(header: &Header) -> Point {
    Point::zeroed(header.point_format(), header.point_data_record_length())
}
