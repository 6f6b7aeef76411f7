
//! Error type definitions.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::PathBuf;
pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;
use std::convert::TryFrom;
use std::error;
use std::fmt;

/// A result that may contain an rla error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains an rla error.
pub type UnitResult = Result<()>;


/// An error that may happen while opening an rla file for writing,
/// or while reading an rla header back.
/// Distinguishes between invalid image descriptions, unsupported features, and system errors.
#[derive(Debug)]
pub enum Error {

    /// The image has no pixels in at least one dimension.
    InvalidResolution {

        /// The requested width.
        width: usize,

        /// The requested height.
        height: usize,
    },

    /// The image has more than one slice. Contains the requested depth.
    UnsupportedDimensionality(usize),

    /// The output file could not be created.
    SinkCreation {

        /// The file that was requested.
        path: PathBuf,

        /// Why the operating system refused.
        source: IoError,
    },

    /// The contents of the image or file are valid,
    /// but cannot be represented by this format or this library.
    NotSupported(Cow<'static, str>),

    /// The contents of the image or file contradict each other,
    /// or a file contains less bytes than expected.
    Invalid(Cow<'static, str>),

    /// The underlying byte stream could not be read or written.
    Io(IoError),
}


impl Error {

    /// Create an error of the variant `Invalid`.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }

    /// Create an error of the variant `NotSupported`.
    pub(crate) fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Error::NotSupported(message.into())
    }
}

/// Enable using the `?` operator on `std::io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        if error.kind() == ErrorKind::UnexpectedEof {
            Error::invalid("reference to missing bytes")
        }
        else {
            Error::Io(error)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidResolution { width, height } => write!(
                formatter, "image resolution must be at least 1x1, you asked for {} x {}",
                width, height
            ),

            Error::UnsupportedDimensionality(depth) => write!(
                formatter, "rla does not support volume images (depth > 1), you asked for depth {}",
                depth
            ),

            Error::SinkCreation { path, source } => write!(
                formatter, "could not open file \"{}\": {}",
                path.display(), source
            ),

            Error::NotSupported(message) => write!(formatter, "not supported: {}", message),
            Error::Invalid(message) => write!(formatter, "invalid: {}", message),
            Error::Io(error) => error.fmt(formatter),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::SinkCreation { source, .. } => Some(source),
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}


/// Convert a coordinate to the 16-bit integer used in rla headers,
/// returning an error if it does not fit.
pub(crate) fn i64_to_i16(value: i64, error_message: &'static str) -> Result<i16> {
    i16::try_from(value).map_err(|_| Error::invalid(error_message))
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn eof_is_invalid(){
        let error = Error::from(IoError::new(ErrorKind::UnexpectedEof, "eof"));
        assert!(matches!(error, Error::Invalid(_)));

        let error = Error::from(IoError::new(ErrorKind::PermissionDenied, "nope"));
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn messages_name_the_problem(){
        let message = Error::InvalidResolution { width: 0, height: 7 }.to_string();
        assert!(message.contains("0 x 7"), "{}", message);

        let message = Error::UnsupportedDimensionality(4).to_string();
        assert!(message.contains("depth 4"), "{}", message);
    }

    #[test]
    fn coordinate_range(){
        assert_eq!(i64_to_i16(-32768, "x").unwrap(), i16::MIN);
        assert!(i64_to_i16(40_000, "x").is_err());
    }
}
