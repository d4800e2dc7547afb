use super::{decode_or_zero, out_of_range, point_offset, PointSource, RecordWalk};
use crate::{Error, Header, Options, Point, Result, Vlr};
use std::io::{Read, Seek, SeekFrom};

/// Reads uncompressed las data directly from its bytes.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use las_reader::{reader::{self, PointSource, RawByteSource}, Options};
/// # let bytes = {
/// #     let mut bytes = vec![0u8; 227];
/// #     bytes[..4].copy_from_slice(b"LASF");
/// #     bytes[24] = 1;
/// #     bytes[25] = 2;
/// #     bytes[94..96].copy_from_slice(&227u16.to_le_bytes());
/// #     bytes[96..100].copy_from_slice(&227u32.to_le_bytes());
/// #     bytes[105..107].copy_from_slice(&20u16.to_le_bytes());
/// #     bytes
/// # };
/// let mut read = Cursor::new(bytes);
/// let header = reader::read_header(&mut read).unwrap();
/// let mut source = RawByteSource::new(read, header, Options::default());
/// assert_eq!(0, source.header().number_of_points());
/// assert!(source.vlr(0).is_err());
/// ```
#[derive(Debug)]
pub struct RawByteSource<R: Read + Seek> {
    read: R,
    header: Header,
    vlrs: RecordWalk,
    evlrs: RecordWalk,
    buffer: Vec<u8>,
}

impl<R: Read + Seek> RawByteSource<R> {
    /// Creates a new source from a reader and the header already read from it.
    ///
    /// The header should not be for compressed data, but that is left to the caller to check.
    pub fn new(read: R, header: Header, options: Options) -> RawByteSource<R> {
        log::debug!("reading uncompressed points");
        RawByteSource {
            read,
            vlrs: RecordWalk::vlrs(&header, options.vlr_offset_cache()),
            evlrs: RecordWalk::evlrs(&header, options.vlr_offset_cache()),
            buffer: vec![0; usize::from(header.point_data_record_length())],
            header,
        }
    }
}

impl<R: Read + Seek> PointSource for RawByteSource<R> {
    fn header(&self) -> &Header {
        &self.header
    }

    fn vlr(&mut self, index: u32) -> Result<Vlr> {
        if index >= self.vlrs.count() {
            return Err(Error::VlrIndex {
                index,
                count: self.vlrs.count(),
            });
        }
        self.vlrs.read(&mut self.read, index)
    }

    fn evlr(&mut self, index: u32) -> Result<Vlr> {
        if index >= self.evlrs.count() {
            return Err(Error::EvlrIndex {
                index,
                count: self.evlrs.count(),
            });
        }
        self.evlrs.read(&mut self.read, index)
    }

    fn point(&mut self, index: u64) -> Result<Point> {
        if let Some(point) = out_of_range(&self.header, index) {
            return Ok(point);
        }
        let offset = match point_offset(&self.header, index) {
            Ok(offset) => offset,
            Err(point) => return Ok(point),
        };
        log::trace!("reading point {} at byte {}", index, offset);
        let _ = self.read.seek(SeekFrom::Start(offset))?;
        let result = self.read.read_exact(&mut self.buffer);
        decode_or_zero(result, &self.buffer, &self.header, index)
    }
}
