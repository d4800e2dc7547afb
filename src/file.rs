//! Open a las or laz file and read its records by index.

#[cfg(feature = "laz")]
use crate::reader::CompressedSource;
use crate::{
    point::Format,
    reader::{self, PointSource, RawByteSource},
    Error, Header, Point, Result, Version, Vlr,
};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Options for opening a [LidarFile].
///
/// # Examples
///
/// ```
/// use las_reader::Options;
/// let options = Options::default().with_vlr_offset_cache(true);
/// assert!(options.vlr_offset_cache());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    vlr_offset_cache: bool,
}

impl Options {
    /// Keep the byte offset of every variable length record after the first lookup.
    ///
    /// Without the cache, reading vlr `n` walks records zero through `n - 1` every time. The
    /// records returned are the same either way.
    pub fn with_vlr_offset_cache(mut self, vlr_offset_cache: bool) -> Options {
        self.vlr_offset_cache = vlr_offset_cache;
        self
    }

    /// Is the vlr offset cache on?
    pub fn vlr_offset_cache(&self) -> bool {
        self.vlr_offset_cache
    }
}

/// Which backend reads a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    Las,
    Laz,
}

impl Backend {
    fn from_path(path: &Path) -> Result<Backend> {
        match path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("las") => Ok(Backend::Las),
            Some("laz") => Ok(Backend::Laz),
            _ => Err(Error::UnknownExtension(path.into())),
        }
    }
}

/// An open las or laz file.
///
/// The header is read once, when the file is opened. Every other accessor seeks and reads, so
/// calling one twice returns the same thing twice, at the same cost. The file is closed when the
/// `LidarFile` is dropped.
///
/// # Examples
///
/// ```no_run
/// use las_reader::LidarFile;
/// let mut file = LidarFile::open("points.las").unwrap();
/// for index in 0..file.point_count() {
///     let (x, y, z) = file.get_scaled_xyz(index).unwrap();
///     println!("{} {} {} (class {})", x, y, z, file.get_point_class(index).unwrap());
/// }
/// ```
#[allow(missing_debug_implementations)]
pub struct LidarFile {
    path: Option<PathBuf>,
    source: Box<dyn PointSource>,
}

impl LidarFile {
    /// Opens a file with the default [Options].
    ///
    /// Files ending in `.las` are read with a [RawByteSource], and files ending in `.laz` with a
    /// [CompressedSource](crate::reader::CompressedSource). The extension is matched without
    /// regard to case; anything else is an [Error::UnknownExtension].
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::{Error, LidarFile};
    /// assert!(matches!(LidarFile::open("points.xyz"), Err(Error::UnknownExtension(_))));
    /// assert!(matches!(LidarFile::open("does-not-exist.las"), Err(Error::FileNotFound(_))));
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<LidarFile> {
        LidarFile::open_with_options(path, Options::default())
    }

    /// Opens a file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: Options) -> Result<LidarFile> {
        let path = path.as_ref();
        let backend = Backend::from_path(path)?;
        let mut read = File::open(path)
            .map(BufReader::new)
            .map_err(|err| Error::from_open(err, path.into()))?;
        let header = reader::read_header(&mut read)?;
        log::debug!("opening {} with the {:?} backend", path.display(), backend);
        let source: Box<dyn PointSource> = match backend {
            Backend::Las => {
                if header.is_compressed() {
                    return Err(Error::CompressedDataInRawFile(path.into()));
                }
                Box::new(RawByteSource::new(read, header, options))
            }
            #[cfg(feature = "laz")]
            Backend::Laz => Box::new(CompressedSource::new(read, path, header, options)?),
            #[cfg(not(feature = "laz"))]
            Backend::Laz => return Err(Error::LaszipNotEnabled),
        };
        Ok(LidarFile {
            path: Some(path.into()),
            source,
        })
    }

    /// Wraps any point source.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_reader::{reader::{self, RawByteSource}, LidarFile, Options};
    /// # let bytes = {
    /// #     let mut bytes = vec![0u8; 227];
    /// #     bytes[..4].copy_from_slice(b"LASF");
    /// #     bytes[24] = 1;
    /// #     bytes[94..96].copy_from_slice(&227u16.to_le_bytes());
    /// #     bytes[105..107].copy_from_slice(&20u16.to_le_bytes());
    /// #     bytes
    /// # };
    /// let mut read = Cursor::new(bytes);
    /// let header = reader::read_header(&mut read).unwrap();
    /// let file = LidarFile::from_source(RawByteSource::new(read, header, Options::default()));
    /// assert_eq!(None, file.path());
    /// assert_eq!(0, file.point_count());
    /// ```
    pub fn from_source<S: PointSource + 'static>(source: S) -> LidarFile {
        LidarFile {
            path: None,
            source: Box::new(source),
        }
    }

    /// Returns the path this file was opened from, if it was opened from a path.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the header.
    pub fn header(&self) -> &Header {
        self.source.header()
    }

    /// Returns the las version.
    pub fn version(&self) -> Version {
        self.header().version()
    }

    /// Returns the point format.
    pub fn point_format(&self) -> Format {
        self.header().point_format()
    }

    /// Returns the number of variable length records.
    ///
    /// This is the count the header declares, which may be zero even where the las version
    /// requires records to be present.
    pub fn vlr_count(&self) -> u32 {
        self.header().number_of_variable_length_records()
    }

    /// Reads a variable length record.
    pub fn get_vlr(&mut self, index: u32) -> Result<Vlr> {
        self.source.vlr(index)
    }

    /// Reads every variable length record.
    pub fn vlrs(&mut self) -> Result<Vec<Vlr>> {
        (0..self.vlr_count()).map(|i| self.get_vlr(i)).collect()
    }

    /// Returns the number of extended variable length records, always zero before las 1.4.
    pub fn evlr_count(&self) -> u32 {
        self.header().number_of_evlrs()
    }

    /// Reads an extended variable length record.
    pub fn get_evlr(&mut self, index: u32) -> Result<Vlr> {
        self.source.evlr(index)
    }

    /// Returns the number of point records.
    pub fn point_count(&self) -> u64 {
        self.header().number_of_points()
    }

    /// Reads a point record.
    ///
    /// An index at or past [LidarFile::point_count] is not an error: it is logged, and an
    /// all-zero record of the file's format is returned. A record cut short by the end of the
    /// file is treated the same way.
    pub fn get_point(&mut self, index: u64) -> Result<Point> {
        self.source.point(index)
    }

    /// Reads a point and returns its scaled and offset coordinates.
    pub fn get_scaled_xyz(&mut self, index: u64) -> Result<(f64, f64, f64)> {
        let point = self.get_point(index)?;
        Ok(point.scaled(self.header().transforms()).into())
    }

    /// Reads a point and returns its class.
    ///
    /// For point formats zero through five this is the low five bits of the classification byte;
    /// the flag bits above them are dropped. See [Point::class_code].
    pub fn get_point_class(&mut self, index: u64) -> Result<u8> {
        self.get_point(index).map(|point| point.class_code())
    }

    /// Reads a point and returns its return number.
    ///
    /// Three bits wide for point formats zero through five, four bits for six through ten.
    pub fn get_return_number(&mut self, index: u64) -> Result<u8> {
        self.get_point(index).map(|point| point.return_number())
    }

    /// Returns the largest return number the point format can hold, 5 or 15.
    pub fn get_return_max(&self) -> u8 {
        self.point_format().return_max()
    }

    /// Returns a human-readable dump of the header.
    pub fn get_metadata(&self) -> String {
        match self.path() {
            Some(path) => format!("path: {}\n{}", path.display(), self.header()),
            None => self.header().to_string(),
        }
    }

    /// Returns an iterator over every point record, in order.
    pub fn records(&mut self) -> Records<'_> {
        Records {
            index: 0,
            count: self.point_count(),
            file: self,
        }
    }

    /// Finds and parses the laszip vlr, if there is one.
    #[cfg(feature = "laz")]
    pub fn laz_vlr(&mut self) -> Result<Option<laz::LazVlr>> {
        for index in 0..self.vlr_count() {
            let vlr = self.get_vlr(index)?;
            if crate::laz::is_laszip_vlr(&vlr) {
                return laz::LazVlr::try_from(&vlr).map(Some);
            }
        }
        Ok(None)
    }
}

/// An iterator over the point records of a [LidarFile].
///
/// Created by [LidarFile::records].
#[allow(missing_debug_implementations)]
pub struct Records<'a> {
    file: &'a mut LidarFile,
    index: u64,
    count: u64,
}

impl Iterator for Records<'_> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Result<Point>> {
        if self.index < self.count {
            let point = self.file.get_point(self.index);
            self.index += 1;
            Some(point)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.count - self.index).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}
