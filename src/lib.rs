#![forbid(unsafe_code)]
#![forbid(
    clippy::all,
    clippy::restriction,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]

#![warn(missing_docs)]

//! Write Wavefront rla images.
//! Describe the image with `meta::ImageDescription`,
//! then pass the scan lines to a `write::RlaWriter`.


pub mod io;
pub mod math;
pub mod time;
pub mod meta;
pub mod write;
pub mod error;

#[macro_use]
extern crate smallvec;


/// Re-exports of the types commonly required for writing an rla file.
pub mod prelude {
    // main exports
    pub use crate::meta::ImageDescription;
    pub use crate::write::{RlaWriter, WriteOptions, OpenMode};

    // core data types
    pub use crate::meta::attribute::{SampleType, IntegerBounds, AttributeValue, Text};
    pub use crate::meta::header::RlaHeader;
    pub use crate::time::{Timestamp, Clock, SystemClock};

    // secondary data types
    pub use crate::meta;
    pub use crate::meta::attributes;
    pub use crate::error;

    // re-export external stuff
    pub use half::f16;
}
