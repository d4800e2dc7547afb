//! Builds small las and laz files on disk.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use las_reader::layout::{self, POINT_LAYOUTS};
use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

const VLR_HEADER_SIZE: usize = 54;

/// A file, described field by field, that can be written as las or laz.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub major: u8,
    pub minor: u8,
    pub format: u8,
    pub extra_bytes: u16,
    pub scale: [f64; 3],
    pub offset: [f64; 3],
    pub records: Vec<Vec<u8>>,
    pub vlrs: Vec<(String, u16, Vec<u8>)>,
    pub evlrs: Vec<(String, u16, Vec<u8>)>,
    pub point_count: Option<u64>,
    pub legacy_point_count: Option<u32>,
    pub vlr_count: Option<u32>,
    pub vlr_signature: u16,
}

impl Fixture {
    pub fn new(major: u8, minor: u8, format: u8) -> Fixture {
        Fixture {
            major,
            minor,
            format,
            extra_bytes: 0,
            scale: [0.01; 3],
            offset: [0.; 3],
            records: Vec::new(),
            vlrs: Vec::new(),
            evlrs: Vec::new(),
            point_count: None,
            legacy_point_count: None,
            vlr_count: None,
            vlr_signature: 0xAABB,
        }
    }

    /// Adds `n` points, each made by [record].
    pub fn points(mut self, n: u32) -> Fixture {
        for i in 0..n {
            self.records.push(record(self.format, self.extra_bytes, i));
        }
        self
    }

    pub fn record(mut self, record: Vec<u8>) -> Fixture {
        self.records.push(record);
        self
    }

    pub fn vlr(mut self, user_id: &str, record_id: u16, data: &[u8]) -> Fixture {
        self.vlrs.push((user_id.to_string(), record_id, data.to_vec()));
        self
    }

    pub fn evlr(mut self, user_id: &str, record_id: u16, data: &[u8]) -> Fixture {
        self.evlrs.push((user_id.to_string(), record_id, data.to_vec()));
        self
    }

    pub fn record_length(&self) -> u16 {
        POINT_LAYOUTS[usize::from(self.format)].size + self.extra_bytes
    }

    fn header_size(&self) -> u16 {
        layout::header_size(self.minor).unwrap_or(375)
    }

    fn vlrs_len(vlrs: &[(String, u16, Vec<u8>)]) -> usize {
        vlrs.iter()
            .map(|(_, _, data)| VLR_HEADER_SIZE + data.len())
            .sum()
    }

    /// The file as uncompressed las.
    pub fn las_bytes(&self) -> Vec<u8> {
        let offset_to_point_data = usize::from(self.header_size()) + Fixture::vlrs_len(&self.vlrs);
        let point_data_len = self.records.len() * usize::from(self.record_length());
        let mut bytes = self.header(
            self.format,
            offset_to_point_data,
            self.vlrs.len(),
            offset_to_point_data + point_data_len,
        );
        for (user_id, record_id, data) in &self.vlrs {
            bytes.extend(vlr(self.vlr_signature, user_id, *record_id, data));
        }
        for record in &self.records {
            bytes.extend(record);
        }
        for (user_id, record_id, data) in &self.evlrs {
            bytes.extend(evlr(user_id, *record_id, data));
        }
        bytes
    }

    /// The file as laszip-compressed laz, with the laszip vlr appended after any others.
    #[cfg(feature = "laz")]
    pub fn laz_bytes(&self) -> Vec<u8> {
        use laz::{LasZipCompressor, LazItemRecordBuilder, LazVlr};

        let items =
            LazItemRecordBuilder::default_for_point_format_id(self.format, self.extra_bytes)
                .unwrap();
        let laz_vlr = LazVlr::from_laz_items(items);
        let mut laz_vlr_data = Vec::new();
        laz_vlr.write_to(&mut laz_vlr_data).unwrap();
        let mut vlrs = self.vlrs.clone();
        vlrs.push((
            LazVlr::USER_ID.to_string(),
            LazVlr::RECORD_ID,
            laz_vlr_data,
        ));

        let offset_to_point_data = usize::from(self.header_size()) + Fixture::vlrs_len(&vlrs);
        let mut bytes = self.header(self.format | 0x80, offset_to_point_data, vlrs.len(), 0);
        for (user_id, record_id, data) in &vlrs {
            bytes.extend(vlr(self.vlr_signature, user_id, *record_id, data));
        }
        let mut cursor = Cursor::new(bytes);
        cursor.set_position(offset_to_point_data as u64);
        let mut compressor = LasZipCompressor::new(cursor, laz_vlr).unwrap();
        for record in &self.records {
            compressor.compress_one(record).unwrap();
        }
        compressor.done().unwrap();
        compressor.into_inner().into_inner()
    }

    /// Writes the las bytes to `name` in `dir`.
    pub fn write_las(&self, dir: &TempDir, name: &str) -> PathBuf {
        write(dir.path(), name, &self.las_bytes())
    }

    /// Writes the laz bytes to `name` in `dir`.
    #[cfg(feature = "laz")]
    pub fn write_laz(&self, dir: &TempDir, name: &str) -> PathBuf {
        write(dir.path(), name, &self.laz_bytes())
    }

    fn header(
        &self,
        format: u8,
        offset_to_point_data: usize,
        vlr_count: usize,
        start_of_first_evlr: usize,
    ) -> Vec<u8> {
        let size = self.header_size();
        let point_count = self
            .point_count
            .unwrap_or(self.records.len() as u64);
        let legacy_point_count = self
            .legacy_point_count
            .unwrap_or_else(|| u32::try_from(point_count).unwrap_or(0));
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"LASF");
        bytes.write_u16::<LittleEndian>(7).unwrap();
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.extend_from_slice(&[0; 16]);
        bytes.push(self.major);
        bytes.push(self.minor);
        bytes.extend_from_slice(&padded::<32>("FIXTURE"));
        bytes.extend_from_slice(&padded::<32>("las-reader tests"));
        bytes.write_u16::<LittleEndian>(1).unwrap();
        bytes.write_u16::<LittleEndian>(2024).unwrap();
        bytes.write_u16::<LittleEndian>(size).unwrap();
        bytes
            .write_u32::<LittleEndian>(offset_to_point_data as u32)
            .unwrap();
        bytes
            .write_u32::<LittleEndian>(self.vlr_count.unwrap_or(vlr_count as u32))
            .unwrap();
        bytes.push(format);
        bytes.write_u16::<LittleEndian>(self.record_length()).unwrap();
        bytes.write_u32::<LittleEndian>(legacy_point_count).unwrap();
        bytes.write_u32::<LittleEndian>(legacy_point_count).unwrap();
        bytes.extend_from_slice(&[0; 16]);
        for &n in self.scale.iter().chain(&self.offset) {
            bytes.write_f64::<LittleEndian>(n).unwrap();
        }
        for _ in 0..3 {
            bytes.write_f64::<LittleEndian>(1000.).unwrap();
            bytes.write_f64::<LittleEndian>(0.).unwrap();
        }
        if size > 227 {
            bytes.write_u64::<LittleEndian>(0).unwrap();
        }
        if size > 235 {
            let evlrs = u32::try_from(self.evlrs.len()).unwrap();
            let start = if evlrs > 0 { start_of_first_evlr } else { 0 };
            bytes.write_u64::<LittleEndian>(start as u64).unwrap();
            bytes.write_u32::<LittleEndian>(evlrs).unwrap();
            bytes.write_u64::<LittleEndian>(point_count).unwrap();
            bytes.write_u64::<LittleEndian>(point_count).unwrap();
            bytes.extend_from_slice(&[0; 112]);
        }
        assert_eq!(usize::from(size), bytes.len());
        bytes
    }
}

/// A point record whose fields are all derived from `i`.
///
/// The raw coordinates are `100 * i + 1`, `100 * i + 2` and `100 * i + 3`, the intensity is `i`,
/// and the point is return `i % 2 + 1` of two, class 2. Gps time is `i + 0.5` and the color is
/// `(i, 2 * i, 3 * i)`, if the format has them. Extra bytes are all `0xEB`.
pub fn record(format: u8, extra_bytes: u16, i: u32) -> Vec<u8> {
    let layout = POINT_LAYOUTS[usize::from(format)];
    let mut bytes = vec![0; usize::from(layout.size)];
    let coordinate = i32::try_from(i).unwrap() * 100;
    put(&mut bytes, 0, &(coordinate + 1).to_le_bytes());
    put(&mut bytes, 4, &(coordinate + 2).to_le_bytes());
    put(&mut bytes, 8, &(coordinate + 3).to_le_bytes());
    put(&mut bytes, 12, &(i as u16).to_le_bytes());
    let return_number = (i % 2 + 1) as u8;
    if format < 6 {
        bytes[14] = return_number | (2 << 3);
        bytes[15] = 2;
    } else {
        bytes[14] = return_number | (2 << 4);
        bytes[16] = 2;
    }
    if let Some(offset) = layout.gps_time {
        put(&mut bytes, offset, &(f64::from(i) + 0.5).to_le_bytes());
    }
    if let Some(offset) = layout.color {
        let red = i as u16;
        put(&mut bytes, offset, &red.to_le_bytes());
        put(&mut bytes, offset + 2, &(red * 2).to_le_bytes());
        put(&mut bytes, offset + 4, &(red * 3).to_le_bytes());
    }
    if let Some(offset) = layout.nir {
        put(&mut bytes, offset, &7u16.to_le_bytes());
    }
    bytes.extend(std::iter::repeat(0xEB).take(usize::from(extra_bytes)));
    bytes
}

fn put(bytes: &mut [u8], offset: u16, value: &[u8]) {
    let offset = usize::from(offset);
    bytes[offset..offset + value.len()].copy_from_slice(value);
}

fn padded<const N: usize>(s: &str) -> [u8; N] {
    let mut bytes = [0; N];
    bytes[..s.len()].copy_from_slice(s.as_bytes());
    bytes
}

fn vlr(signature: u16, user_id: &str, record_id: u16, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_u16::<LittleEndian>(signature).unwrap();
    bytes.extend_from_slice(&padded::<16>(user_id));
    bytes.write_u16::<LittleEndian>(record_id).unwrap();
    bytes
        .write_u16::<LittleEndian>(u16::try_from(data.len()).unwrap())
        .unwrap();
    bytes.extend_from_slice(&padded::<32>("a vlr"));
    bytes.extend_from_slice(data);
    bytes
}

fn evlr(user_id: &str, record_id: u16, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_u16::<LittleEndian>(0).unwrap();
    bytes.extend_from_slice(&padded::<16>(user_id));
    bytes.write_u16::<LittleEndian>(record_id).unwrap();
    bytes.write_u64::<LittleEndian>(data.len() as u64).unwrap();
    bytes.extend_from_slice(&padded::<32>("an evlr"));
    bytes.extend_from_slice(data);
    bytes
}

fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
