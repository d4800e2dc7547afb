//! Byte builders for unit tests.

use crate::layout;
use byteorder::{LittleEndian, WriteBytesExt};

/// Writes a header, byte by byte, the way it sits on disk.
#[derive(Clone, Debug)]
pub(crate) struct HeaderBytes {
    major: u8,
    minor: u8,
    header_size: Option<u16>,
    point_format: u8,
    record_length: Option<u16>,
    point_count: u64,
    legacy_point_count: Option<u32>,
    vlr_count: u32,
    offset_to_point_data: Option<u32>,
    scale: [f64; 3],
    offset: [f64; 3],
    evlrs: (u64, u32),
}

impl HeaderBytes {
    /// Minor versions we can't read are written with the las 1.4 layout.
    pub(crate) fn new(major: u8, minor: u8) -> HeaderBytes {
        HeaderBytes {
            major,
            minor,
            header_size: None,
            point_format: 0,
            record_length: None,
            point_count: 0,
            legacy_point_count: None,
            vlr_count: 0,
            offset_to_point_data: None,
            scale: [0.001; 3],
            offset: [0.; 3],
            evlrs: (0, 0),
        }
    }

    pub(crate) fn header_size(mut self, header_size: u16) -> HeaderBytes {
        self.header_size = Some(header_size);
        self
    }

    pub(crate) fn point_format(mut self, point_format: u8) -> HeaderBytes {
        self.point_format = point_format;
        self
    }

    pub(crate) fn record_length(mut self, record_length: u16) -> HeaderBytes {
        self.record_length = Some(record_length);
        self
    }

    pub(crate) fn point_count(mut self, point_count: u64) -> HeaderBytes {
        self.point_count = point_count;
        self
    }

    pub(crate) fn legacy_point_count(mut self, legacy_point_count: u32) -> HeaderBytes {
        self.legacy_point_count = Some(legacy_point_count);
        self
    }

    pub(crate) fn vlr_count(mut self, vlr_count: u32) -> HeaderBytes {
        self.vlr_count = vlr_count;
        self
    }

    pub(crate) fn offset_to_point_data(mut self, offset_to_point_data: u32) -> HeaderBytes {
        self.offset_to_point_data = Some(offset_to_point_data);
        self
    }

    pub(crate) fn scale(mut self, x: f64, y: f64, z: f64) -> HeaderBytes {
        self.scale = [x, y, z];
        self
    }

    pub(crate) fn offset(mut self, x: f64, y: f64, z: f64) -> HeaderBytes {
        self.offset = [x, y, z];
        self
    }

    pub(crate) fn evlrs(mut self, start: u64, count: u32) -> HeaderBytes {
        self.evlrs = (start, count);
        self
    }

    fn size(&self) -> u16 {
        layout::header_size(self.minor).unwrap_or(layout::HEADER_SIZES[4])
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        let size = self.size();
        let header_size = self.header_size.unwrap_or(size);
        let record_length = self.record_length.unwrap_or_else(|| {
            layout::record_size(self.point_format & 0x3F).unwrap_or(layout::RECORD_SIZES[0])
        });
        let legacy_point_count = self
            .legacy_point_count
            .unwrap_or_else(|| u32::try_from(self.point_count).unwrap_or(0));

        let mut bytes = Vec::with_capacity(usize::from(size));
        bytes.extend_from_slice(b"LASF");
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.extend_from_slice(&[0; 16]);
        bytes.push(self.major);
        bytes.push(self.minor);
        bytes.extend_from_slice(&[0; 64]);
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.write_u16::<LittleEndian>(header_size).unwrap();
        bytes
            .write_u32::<LittleEndian>(self.offset_to_point_data.unwrap_or(u32::from(size)))
            .unwrap();
        bytes.write_u32::<LittleEndian>(self.vlr_count).unwrap();
        bytes.push(self.point_format);
        bytes.write_u16::<LittleEndian>(record_length).unwrap();
        bytes.write_u32::<LittleEndian>(legacy_point_count).unwrap();
        bytes.write_u32::<LittleEndian>(legacy_point_count).unwrap();
        bytes.extend_from_slice(&[0; 16]);
        for &n in self.scale.iter().chain(&self.offset) {
            bytes.write_f64::<LittleEndian>(n).unwrap();
        }
        bytes.extend_from_slice(&[0; 48]);
        debug_assert_eq!(227, bytes.len());
        if size > 227 {
            bytes.write_u64::<LittleEndian>(0).unwrap();
        }
        if size > 235 {
            bytes.write_u64::<LittleEndian>(self.evlrs.0).unwrap();
            bytes.write_u32::<LittleEndian>(self.evlrs.1).unwrap();
            bytes.write_u64::<LittleEndian>(self.point_count).unwrap();
            bytes.write_u64::<LittleEndian>(self.point_count).unwrap();
            bytes.extend_from_slice(&[0; 112]);
        }
        debug_assert_eq!(usize::from(size), bytes.len());
        bytes
    }
}

/// Writes a variable length record with the 1.0 signature.
pub(crate) fn vlr_bytes(record_id: u16, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes
        .write_u16::<LittleEndian>(layout::VLR_SIGNATURE_1_0)
        .unwrap();
    let mut user_id = [0; 16];
    user_id[..4].copy_from_slice(b"test");
    bytes.extend_from_slice(&user_id);
    bytes.write_u16::<LittleEndian>(record_id).unwrap();
    bytes
        .write_u16::<LittleEndian>(u16::try_from(data.len()).unwrap())
        .unwrap();
    bytes.extend_from_slice(&[0; 32]);
    bytes.extend_from_slice(data);
    bytes
}

/// Writes an extended variable length record.
pub(crate) fn evlr_bytes(record_id: u16, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_u16::<LittleEndian>(0).unwrap();
    let mut user_id = [0; 16];
    user_id[..4].copy_from_slice(b"test");
    bytes.extend_from_slice(&user_id);
    bytes.write_u16::<LittleEndian>(record_id).unwrap();
    bytes.write_u64::<LittleEndian>(data.len() as u64).unwrap();
    bytes.extend_from_slice(&[0; 32]);
    bytes.extend_from_slice(data);
    bytes
}
