//! Contains all meta data attributes.
//! An image description can have any number of [`AttributeValue`]s, including custom attributes.

use smallvec::SmallVec;
use half::f16;
use crate::io::Data;
use crate::math::Vec2;
use std::borrow::Borrow;
use std::convert::TryFrom;
use std::hash::{Hash, Hasher};


/// Contains one of all possible attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {

    /// A string of byte-chars.
    Text(Text),

    /// 32-bit signed integer
    I32(i32),

    /// 32-bit float
    F32(f32),

    /// 64-bit float
    F64(f64),

    /// 2D integer vector.
    IntVec2(Vec2<i32>),

    /// 2D float vector.
    FloatVec2(Vec2<f32>),

    /// 3D float vector.
    FloatVec3((f32, f32, f32)),
}

/// A byte array with each byte being a char.
/// This is not UTF an must be constructed from a standard string.
#[derive(Clone, PartialEq, Ord, PartialOrd, Default)] // hash implemented manually
pub struct Text {
    bytes: TextBytes,
}

/// The raw bytes that make up a string in an rla header.
/// Each `u8` is a single char.
pub type TextBytes = SmallVec<[u8; 24]>;

/// A byte slice, interpreted as text.
pub type TextSlice = [u8];

/// The type of samples in one channel, as described by the caller.
#[derive(Clone, Debug, Eq, PartialEq, Copy, Hash)]
pub enum SampleType {

    /// 8-bit unsigned integer values.
    U8,

    /// 8-bit signed integer values.
    I8,

    /// 16-bit unsigned integer values.
    U16,

    /// 16-bit signed integer values.
    I16,

    /// 32-bit unsigned integer values.
    U32,

    /// 32-bit signed integer values.
    I32,

    /// 16-bit float values.
    F16,

    /// 32-bit float values. The only type that rla treats as floating point.
    F32,

    /// 64-bit float values.
    F64,
}

/// A rectangular section anywhere in 2D integer space.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default, Hash)]
pub struct IntegerBounds {

    /// The top left corner of this rectangle.
    pub position: Vec2<i32>,

    /// How many pixels to include in this rectangle.
    /// Extends to the right and downwards.
    /// Does not include the actual boundary, just like `Vec::len()`.
    pub size: Vec2<usize>,
}


impl Text {

    /// Create a `Text` from an `str` reference.
    /// Returns `None` if this string contains unsupported chars.
    pub fn new_or_none(string: impl AsRef<str>) -> Option<Self> {
        let vec : Option<TextBytes> = string.as_ref().chars()
            .map(|character| u8::try_from(character as u64).ok())
            .collect();

        vec.map(Self::from_bytes_unchecked)
    }

    /// Create a `Text` from an `str` reference,
    /// replacing each unsupported char with a question mark.
    pub fn new_lossy(string: impl AsRef<str>) -> Self {
        Self::from_bytes_unchecked(
            string.as_ref().chars()
                .map(|character| u8::try_from(character as u64).unwrap_or(b'?'))
                .collect()
        )
    }

    /// Create a `Text` from a slice of bytes,
    /// without checking any of the bytes.
    pub fn from_slice_unchecked(text: &TextSlice) -> Self {
        Self::from_bytes_unchecked(SmallVec::from_slice(text))
    }

    /// Create a `Text` from the specified bytes object,
    /// without checking any of the bytes.
    pub fn from_bytes_unchecked(bytes: TextBytes) -> Self {
        Text { bytes }
    }

    /// The internal ASCII bytes this text is made of.
    pub fn as_slice(&self) -> &TextSlice {
        self.bytes.as_slice()
    }

    /// Whether this text contains no chars.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Iterate over the individual chars in this text, similar to `String::chars()`.
    /// Does not do any heap-allocation but borrows from this instance instead.
    pub fn chars(&self) -> impl '_ + Iterator<Item = char> {
        self.bytes.iter().map(|&byte| byte as char)
    }

    /// Compare this `rla::Text` with a plain `&str`.
    pub fn eq(&self, string: &str) -> bool {
        string.chars().eq(self.chars())
    }

    /// Compare this `rla::Text` with a plain `&str` ignoring capitalization.
    pub fn eq_case_insensitive(&self, string: &str) -> bool {
        let self_chars = self.chars().map(|char| char.to_ascii_lowercase());
        let string_chars = string.chars().flat_map(|ch| ch.to_lowercase());

        string_chars.eq(self_chars)
    }
}

impl Eq for Text {}

impl Borrow<TextSlice> for Text {
    fn borrow(&self) -> &TextSlice {
        self.as_slice()
    }
}

// forwarding implementation. guarantees `text.borrow().hash() == text.hash()` (required for Borrow)
impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state)
    }
}

impl<'s> From<&'s str> for Text {

    /// Replaces each unsupported character with a question mark.
    fn from(str: &'s str) -> Self {
        Self::new_lossy(str)
    }
}

impl ::std::fmt::Debug for Text {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(f, "rla::Text(\"{}\")", self)
    }
}

// automatically implements to_string for us
impl ::std::fmt::Display for Text {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        use std::fmt::Write;

        for &byte in self.bytes.iter() {
            f.write_char(byte as char)?;
        }

        Ok(())
    }
}


impl SampleType {

    /// How many bytes a single sample takes up.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            SampleType::U8 => u8::BYTE_SIZE,
            SampleType::I8 => i8::BYTE_SIZE,
            SampleType::U16 => u16::BYTE_SIZE,
            SampleType::I16 => i16::BYTE_SIZE,
            SampleType::U32 => u32::BYTE_SIZE,
            SampleType::I32 => i32::BYTE_SIZE,
            SampleType::F16 => f16::BYTE_SIZE,
            SampleType::F32 => f32::BYTE_SIZE,
            SampleType::F64 => f64::BYTE_SIZE,
        }
    }

    /// How many bits a single sample takes up.
    pub fn bits_per_sample(&self) -> usize {
        self.bytes_per_sample() * 8
    }
}


impl AttributeValue {

    /// Return the contained value if this is an integer attribute.
    pub fn to_i32(&self) -> Option<i32> {
        match *self {
            AttributeValue::I32(value) => Some(value),
            _ => None,
        }
    }

    /// Return the contained value if this is a scalar number attribute.
    /// Integers are converted to floats.
    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            AttributeValue::F64(value) => Some(value),
            AttributeValue::F32(value) => Some(f64::from(value)),
            AttributeValue::I32(value) => Some(f64::from(value)),
            _ => None,
        }
    }

    /// Return the contained text if this is a text attribute.
    pub fn to_text(&self) -> Option<&Text> {
        match self {
            AttributeValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Return the components if this is a float vector with two or three components.
    pub fn to_float_components(&self) -> Option<SmallVec<[f32; 3]>> {
        match *self {
            AttributeValue::FloatVec2(Vec2(x, y)) => Some(smallvec![x, y]),
            AttributeValue::FloatVec3((x, y, z)) => Some(smallvec![x, y, z]),
            _ => None,
        }
    }
}

impl From<Text> for AttributeValue { fn from(value: Text) -> Self { AttributeValue::Text(value) } }
impl From<&str> for AttributeValue { fn from(value: &str) -> Self { AttributeValue::Text(Text::from(value)) } }
impl From<i32> for AttributeValue { fn from(value: i32) -> Self { AttributeValue::I32(value) } }
impl From<f32> for AttributeValue { fn from(value: f32) -> Self { AttributeValue::F32(value) } }
impl From<f64> for AttributeValue { fn from(value: f64) -> Self { AttributeValue::F64(value) } }
impl From<Vec2<i32>> for AttributeValue { fn from(value: Vec2<i32>) -> Self { AttributeValue::IntVec2(value) } }
impl From<Vec2<f32>> for AttributeValue { fn from(value: Vec2<f32>) -> Self { AttributeValue::FloatVec2(value) } }
impl From<(f32, f32, f32)> for AttributeValue { fn from(value: (f32, f32, f32)) -> Self { AttributeValue::FloatVec3(value) } }


impl IntegerBounds {

    /// Create a box with a size starting at zero.
    pub fn from_dimensions(size: impl Into<Vec2<usize>>) -> Self {
        Self::new(Vec2(0,0), size)
    }

    /// Create a box with a size and an origin point.
    pub fn new(start: impl Into<Vec2<i32>>, size: impl Into<Vec2<usize>>) -> Self {
        Self { position: start.into(), size: size.into() }
    }

    /// Returns the maximum coordinate that a value in this rectangle may have.
    /// Computed with 64-bit integers, so this never overflows.
    pub fn max(self) -> Vec2<i64> {
        self.position.to_i64() + self.size.to_i64() - Vec2(1, 1)
    }
}
