//! Read [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! point cloud data, versions 1.0 through 1.4, compressed or not.
//!
//! # Opening a file
//!
//! Open a `.las` or `.laz` file with [LidarFile::open]. The extension picks the backend:
//!
//! ```no_run
//! use las_reader::LidarFile;
//! let file = LidarFile::open("points.las").unwrap();
//! println!("{} points of format {}", file.point_count(), file.point_format());
//! ```
//!
//! Reading `.laz` files needs the `laz` feature, which is on by default.
//!
//! # Reading records
//!
//! Every record is read by index, and nothing is cached between calls:
//!
//! ```no_run
//! use las_reader::LidarFile;
//! let mut file = LidarFile::open("points.laz").unwrap();
//! let (x, y, z) = file.get_scaled_xyz(0).unwrap();
//! let point = file.get_point(0).unwrap();
//! println!("({}, {}, {}) is class {}", x, y, z, point.class_code());
//! for index in 0..file.vlr_count() {
//!     let vlr = file.get_vlr(index).unwrap();
//!     println!("{} {}", vlr.user_id, vlr.record_id);
//! }
//! ```
//!
//! Reading past the last point is not an error. The index is logged and a zeroed record comes
//! back, see [LidarFile::get_point].
//!
//! # Logging
//!
//! This crate logs through the [log](https://docs.rs/log) facade: `debug` for what was opened and
//! how, `warn` for files that are malformed but still readable, and `trace` for every seek.

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod feature;
pub mod header;
pub mod layout;
#[cfg(feature = "laz")]
pub mod laz;
pub mod point;
pub mod raw;
pub mod reader;
pub mod vlr;

mod bounds;
mod error;
mod file;
#[cfg(test)]
mod testing;
mod transform;
mod utils;
mod vector;
mod version;

pub use crate::bounds::Bounds;
pub use crate::error::Error;
pub use crate::feature::Feature;
pub use crate::file::{LidarFile, Options, Records};
pub use crate::header::{GlobalEncoding, GpsTimeType, Header};
pub use crate::point::Point;
pub use crate::transform::Transform;
pub use crate::vector::Vector;
pub use crate::version::Version;
pub use crate::vlr::Vlr;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
