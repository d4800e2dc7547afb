use super::{decode_or_zero, out_of_range, PointSource, RecordWalk};
use crate::{laz::is_laszip_vlr, Error, Header, Options, Point, Result, Vlr};
use laz::{LasZipDecompressor, LazVlr};
use std::{
    fs::File,
    io::{BufReader, Seek, SeekFrom},
    path::{Path, PathBuf},
};

/// Reads laszip-compressed point data through a [LasZipDecompressor].
///
/// The header and variable length records of a laz file are not compressed, so they are read
/// directly, the same way [RawByteSource](super::RawByteSource) reads them. Each decompressed
/// record is decoded with [Point::decode].
///
/// Reading points in order is cheap. Jumping around means seeking the decompressor to the start
/// of the chunk holding the point and decompressing up to it.
#[allow(missing_debug_implementations)]
pub struct CompressedSource {
    read: BufReader<File>,
    header: Header,
    vlrs: RecordWalk,
    evlrs: RecordWalk,
    decompressor: LasZipDecompressor<'static, BufReader<File>>,
    buffer: Vec<u8>,
    next: Option<u64>,
}

impl CompressedSource {
    /// Creates a new compressed source.
    ///
    /// `read` is the already-open file that `header` was read from. The decompressor gets its own
    /// handle on `path`.
    ///
    /// Fails with [Error::BackendOpenFailure] if the header is not for compressed data, if there
    /// is no usable laszip vlr, or if the decompressor cannot be created.
    pub fn new(
        mut read: BufReader<File>,
        path: &Path,
        header: Header,
        options: Options,
    ) -> Result<CompressedSource> {
        let failure = |reason: String| Error::BackendOpenFailure {
            path: PathBuf::from(path),
            reason,
        };
        if !header.is_compressed() {
            return Err(failure(
                "the point data format id does not carry the laszip compression bit".to_string(),
            ));
        }
        let mut vlrs = RecordWalk::vlrs(&header, options.vlr_offset_cache());
        let mut laz_vlr = None;
        for index in 0..vlrs.count() {
            let vlr = vlrs.read(&mut read, index)?;
            if is_laszip_vlr(&vlr) {
                laz_vlr = Some(LazVlr::try_from(&vlr).map_err(|err| failure(err.to_string()))?);
                break;
            }
        }
        let laz_vlr = laz_vlr.ok_or_else(|| failure("no laszip vlr".to_string()))?;
        if laz_vlr.items_size() != u64::from(header.point_data_record_length()) {
            return Err(failure(format!(
                "laszip items are {} bytes, but point records are {} bytes",
                laz_vlr.items_size(),
                header.point_data_record_length()
            )));
        }

        let mut points = File::open(path)
            .map(BufReader::new)
            .map_err(|err| Error::from_open(err, path.into()))?;
        let _ = points.seek(SeekFrom::Start(u64::from(header.offset_to_point_data())))?;
        let decompressor =
            LasZipDecompressor::new(points, laz_vlr).map_err(|err| failure(err.to_string()))?;
        log::debug!("reading laszip-compressed points from {}", path.display());
        Ok(CompressedSource {
            read,
            evlrs: RecordWalk::evlrs(&header, options.vlr_offset_cache()),
            vlrs,
            decompressor,
            buffer: vec![0; usize::from(header.point_data_record_length())],
            header,
            next: Some(0),
        })
    }
}

impl PointSource for CompressedSource {
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
        if self.next != Some(index) {
            log::trace!("seeking decompressor to point {}", index);
            self.next = None;
            self.decompressor.seek(index)?;
        }
        let result = self.decompressor.decompress_one(&mut self.buffer);
        self.next = result.is_ok().then_some(index + 1);
        decode_or_zero(result, &self.buffer, &self.header, index)
    }
}
