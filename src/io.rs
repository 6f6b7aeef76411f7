
//! Specialized binary output and input.
//! Uses the error handling for this crate.
//! All multi-byte values are big-endian, as rla files require.

pub use ::std::io::{Read, Write};
use lebe::prelude::*;
use ::half::f16;
use crate::error::{Error, Result, UnitResult, IoResult};
use std::io::{Seek, SeekFrom};
use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;


/// Create the file at the specified path and pass it to the closure.
/// If the file cannot be created, returns `Error::SinkCreation`.
/// If the closure returns an error, attempts to delete the partially written file.
pub fn attempt_delete_file_on_write_error<T>(path: &Path, write: impl FnOnce(File) -> Result<T>) -> Result<T> {
    let file = File::create(path).map_err(|source| Error::SinkCreation {
        path: path.to_path_buf(), source
    })?;

    match write(file) {
        Err(error) => {
            let _deleted = std::fs::remove_file(path); // ignore deletion errors
            Err(error)
        },

        ok => ok,
    }
}


/// Keep track of what byte we are at.
/// Used to skip back to a previous place after writing some information.
#[derive(Debug)]
pub struct Tracking<T> {

    /// Do not expose to prevent seeking without updating position
    inner: T,

    position: usize,
}

impl<T: Write> Write for Tracking<T> {
    fn write(&mut self, buffer: &[u8]) -> IoResult<usize> {
        let count = self.inner.write(buffer)?;
        self.position += count;
        Ok(count)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.inner.flush()
    }
}

impl<T> Tracking<T> {

    /// If `inner` is a reference, if must never be seeked directly,
    /// but only through this `Tracking` instance.
    pub fn new(inner: T) -> Self {
        Tracking { inner, position: 0 }
    }

    /// Current number of bytes written.
    pub fn byte_position(&self) -> usize {
        self.position
    }

    /// Give up tracking and return the wrapped value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write + Seek> Tracking<T> {

    /// Start tracking at the current position of the stream,
    /// so that all positions are absolute, even if the stream already contains bytes.
    pub fn at_stream_position(mut inner: T) -> Result<Self> {
        let position = usize::try_from(inner.stream_position()?)
            .map_err(|_| Error::unsupported("stream position exceeds address range"))?;

        Ok(Tracking { inner, position })
    }

    /// Move the writing cursor to the specified byte index, without writing anything.
    pub fn seek_to(&mut self, target_position: usize) -> IoResult<()> {
        self.inner.seek(SeekFrom::Start(target_position as u64))?;
        self.position = target_position;
        Ok(())
    }

    /// Move the writing cursor to the specified target byte index.
    /// If seeking forward, this will write zeroes.
    pub fn seek_write_to(&mut self, target_position: usize) -> IoResult<()> {
        if target_position < self.position {
            self.inner.seek(SeekFrom::Start(target_position as u64))?;
        }
        else if target_position > self.position {
            std::io::copy(
                &mut std::io::repeat(0).take((target_position - self.position) as u64),
                self
            )?;
        }

        self.position = target_position;
        Ok(())
    }
}


/// Generic trait that defines common binary operations such as reading and writing for this type.
pub trait Data: Sized + Default + Clone {
    const BYTE_SIZE: usize = ::std::mem::size_of::<Self>();

    /// Read a value of type `Self`.
    fn read(read: &mut impl Read) -> Result<Self>;

    /// Read as many values of type `Self` as fit into the specified slice.
    /// If the slice cannot be filled completely, returns `Error::Invalid`.
    fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> UnitResult;

    /// Write this value to the writer.
    fn write(self, write: &mut impl Write) -> UnitResult;

    /// Write all values of that slice to the writer.
    fn write_slice(write: &mut impl Write, slice: &[Self]) -> UnitResult;
}


macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            #[inline]
            fn read(read: &mut impl Read) -> Result<Self> {
                Ok(read.read_from_big_endian()?)
            }

            #[inline]
            fn write(self, write: &mut impl Write) -> Result<()> {
                write.write_as_big_endian(&self)?;
                Ok(())
            }

            #[inline]
            fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> Result<()> {
                read.read_from_big_endian_into(slice)?;
                Ok(())
            }

            #[inline]
            fn write_slice(write: &mut impl Write, slice: &[Self]) -> Result<()> {
                write.write_as_big_endian(slice)?;
                Ok(())
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(i8);
implement_data_for_primitive!(i16);
implement_data_for_primitive!(u16);
implement_data_for_primitive!(u32);
implement_data_for_primitive!(i32);
implement_data_for_primitive!(f32);
implement_data_for_primitive!(f64);


impl Data for f16 {
    #[inline]
    fn read(read: &mut impl Read) -> Result<Self> {
        u16::read(read).map(f16::from_bits)
    }

    #[inline]
    fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> Result<()> {
        for value in slice {
            *value = f16::read(read)?;
        }

        Ok(())
    }

    #[inline]
    fn write(self, write: &mut impl Write) -> Result<()> {
        self.to_bits().write(write)
    }

    #[inline]
    fn write_slice(write: &mut impl Write, slice: &[Self]) -> Result<()> {
        for value in slice {
            value.write(write)?;
        }

        Ok(())
    }
}
