//! Wall-clock time, as an explicit input to header construction.

use chrono::{DateTime, Datelike, Local, Timelike, Utc};


/// A calendar date and time of day, with minute precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Timestamp {

    /// The full year, for example `2011`.
    pub year: i32,

    /// Months 1 - 12 are valid.
    pub month: u8,

    /// Days 1 - 31 are valid.
    pub day: u8,

    /// Hours 0 - 23 are valid.
    pub hour: u8,

    /// Minutes 0 - 59 are valid.
    pub minute: u8,
}

/// Tells the current time. Replace the `SystemClock` to produce reproducible files.
pub trait Clock {

    /// The point in time the header is created at.
    fn now(&self) -> Timestamp;
}

/// Reads the operating system clock, in the local time zone.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_date_time(&Local::now())
    }
}

/// A fixed point in time is a clock that never advances.
impl Clock for Timestamp {
    fn now(&self) -> Timestamp { *self }
}


/// The three-letter abbreviations that replace the month number in rla dates.
const MONTH_ABBREVIATIONS: [&[u8; 3]; 12] = [
    b"JAN", b"FEB", b"MAR", b"APR", b"MAY", b"JUN",
    b"JUL", b"AUG", b"SEP", b"OCT", b"NOV", b"DEC",
];

impl Timestamp {

    /// Take the calendar fields of any date and time, discarding seconds.
    pub fn from_date_time(time: &(impl Datelike + Timelike)) -> Self {
        Timestamp {
            year: time.year(),
            month: time.month() as u8,
            day: time.day() as u8,
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Convert seconds since 1970-01-01 00:00 UTC to a calendar date in UTC.
    /// Returns `None` if the date is out of range.
    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(seconds, 0).map(|time| Self::from_date_time(&time))
    }

    /// Render the date as stored in rla headers, for example `MAR 17 14:05 2011`.
    /// The month is first printed as two digits followed by two spaces,
    /// and then the digits and the first space are overwritten by the abbreviation.
    /// Months outside of 1 - 12 keep their numeric text.
    pub fn to_rla_date(&self) -> String {
        let mut date = format!(
            "{:02}  {:02} {:02}:{:02} {:04}",
            self.month, self.day, self.hour, self.minute, self.year
        ).into_bytes();

        if let Some(abbreviation) = (self.month as usize).checked_sub(1).and_then(|index| MONTH_ABBREVIATIONS.get(index)) {
            date[.. 3].copy_from_slice(*abbreviation);
        }

        // only ascii bytes were written
        date.into_iter().map(char::from).collect()
    }
}
