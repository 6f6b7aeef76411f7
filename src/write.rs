//! Write an rla image to a file.
//!
//! First, describe the image, then open a writer and pass it the scan lines:
//! ```no_run
//!     use rla::prelude::*;
//!
//!     let image = ImageDescription::new((64, 32), 4, SampleType::U8)
//!         .with_attribute(attributes::names::USER_NAME, "me");
//!
//!     let mut writer = RlaWriter::create("image.rla", image, WriteOptions::default()).unwrap();
//!
//!     for y in 0 .. 32 {
//!         writer.write_scan_line(y, &[0_u8; 64 * 4]).unwrap();
//!     }
//!
//!     writer.finish().unwrap();
//! ```
//!
//! The pixel bytes are stored as passed, without run length encoding.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufWriter, Seek};
use std::path::Path;
use crate::error::{Error, Result, UnitResult};
use crate::io::{Data, Tracking, Write, attempt_delete_file_on_write_error};
use crate::math::Vec2;
use crate::meta::ImageDescription;
use crate::meta::attribute::IntegerBounds;
use crate::meta::header::{RlaHeader, HeaderContext, write_offset_table_placeholder};
use crate::time::{Clock, SystemClock};


/// The program name that is written into the header by default.
pub const DEFAULT_PROGRAM_NAME: &'static str = concat!("rla ", env!("CARGO_PKG_VERSION"));

/// How an image is added to a file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum OpenMode {

    /// Create a new file containing only this image.
    Create,

    /// Append another image to a file. Not supported by rla.
    AppendSubImage,

    /// Append a smaller resolution level to a file. Not supported by rla.
    AppendMipLevel,
}

/// Configures how the header is written.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions<C> {

    /// The name of the program that created the file.
    pub program_name: Cow<'static, str>,

    /// Only `OpenMode::Create` is supported.
    pub mode: OpenMode,

    /// Tells the creation date of the file.
    pub clock: C,
}

/// An open rla file that accepts scan lines.
/// The offset table is completed when calling `finish`.
#[derive(Debug)]
pub struct RlaWriter<W> {
    write: Tracking<W>,
    header: RlaHeader,
    data_window: IntegerBounds,
    scan_line_byte_size: usize,
    offset_table_position: usize,

    /// Ordered bottom to top, as in the file.
    scan_line_offsets: Vec<i32>,
}


impl Default for WriteOptions<SystemClock> {
    fn default() -> Self {
        WriteOptions {
            program_name: Cow::Borrowed(DEFAULT_PROGRAM_NAME),
            mode: OpenMode::Create,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> WriteOptions<C> {

    /// Write a different program name into the header.
    pub fn with_program_name(self, program_name: impl Into<Cow<'static, str>>) -> Self {
        Self { program_name: program_name.into(), ..self }
    }

    /// Specify how the image is added to the file.
    pub fn with_mode(self, mode: OpenMode) -> Self {
        Self { mode, ..self }
    }

    /// Use a different clock for the creation date, for example a fixed `Timestamp`.
    pub fn with_clock<D: Clock>(self, clock: D) -> WriteOptions<D> {
        WriteOptions { program_name: self.program_name, mode: self.mode, clock }
    }
}


/// Fail for anything that cannot be written to an rla file.
fn check_supported(image: &ImageDescription, mode: OpenMode) -> UnitResult {
    if mode != OpenMode::Create {
        return Err(Error::unsupported("rla does not support subimages or MIP levels"));
    }

    image.validate()
}

impl RlaWriter<BufWriter<File>> {

    /// Create a buffered file and write the header to it.
    /// Validates the image before the file is created.
    /// If the header cannot be written, attempts to delete the partially written file.
    pub fn create(path: impl AsRef<Path>, image: ImageDescription, options: WriteOptions<impl Clock>) -> Result<Self> {
        let path = path.as_ref();
        check_supported(&image, options.mode)?;

        let file_name = path.to_string_lossy();
        attempt_delete_file_on_write_error(path, |file| {
            Self::new(BufWriter::new(file), &file_name, image, options)
        })
    }
}

impl<W: Write + Seek> RlaWriter<W> {

    /// Write the header and a zero offset for each scan line,
    /// starting at the current position of the stream.
    /// Scan line offsets are absolute positions in the stream.
    /// The file name is stored in the header.
    pub fn new(write: W, file_name: &str, image: ImageDescription, options: WriteOptions<impl Clock>) -> Result<Self> {
        check_supported(&image, options.mode)?;

        let header = RlaHeader::new(&image, &HeaderContext {
            file_name,
            program_name: &options.program_name,
            created: options.clock.now(),
        });

        let mut write = Tracking::at_stream_position(write)?;
        header.write(&mut write)?;

        let offset_table_position = write.byte_position();
        let height = image.size().height();
        write_offset_table_placeholder(&mut write, height)?;

        Ok(RlaWriter {
            write, header,
            data_window: image.data_window,
            scan_line_byte_size: image.scan_line_byte_size(),
            offset_table_position,
            scan_line_offsets: vec![0; height],
        })
    }

    /// The header that was written to the file.
    pub fn header(&self) -> &RlaHeader {
        &self.header
    }

    /// Append the bytes of the scan line at the absolute `y` coordinate,
    /// which must lie inside the data window.
    /// Contains all channels of all pixels in the row, exactly `width * bytes_per_pixel` bytes.
    pub fn write_scan_line(&mut self, y: i32, bytes: &[u8]) -> UnitResult {
        let Vec2(_, height) = self.data_window.size;
        let row = i64::from(y) - i64::from(self.data_window.position.y());

        if row < 0 || row >= height as i64 {
            return Err(Error::invalid("scan line outside of data window"));
        }

        if bytes.len() != self.scan_line_byte_size {
            return Err(Error::invalid("scan line byte size"));
        }

        let offset = i32::try_from(self.write.byte_position())
            .map_err(|_| Error::unsupported("scan line offset exceeds 32-bit range"))?;

        // the bottom scan line comes first in the offset table
        self.scan_line_offsets[height - 1 - row as usize] = offset;
        u8::write_slice(&mut self.write, bytes)
    }

    /// Replace the offset table with the positions of the written scan lines and flush.
    /// Scan lines that were never written keep a zero offset.
    /// Returns the byte stream, positioned after the last written byte.
    pub fn finish(mut self) -> Result<W> {
        let end_position = self.write.byte_position();

        self.write.seek_write_to(self.offset_table_position)?;
        i32::write_slice(&mut self.write, &self.scan_line_offsets)?;

        self.write.seek_to(end_position)?;
        self.write.flush()?;
        Ok(self.write.into_inner())
    }
}
