//! The fixed-layout header at the start of every rla file.
//! Every field is written individually, in file order, with big-endian integers.

use crate::io::*;
use crate::error::*;
use crate::meta::ImageDescription;
use crate::meta::attribute::Text;
use crate::meta::attributes::{Attributes, names};
use crate::time::Timestamp;


/// A text field with a fixed byte size in the header.
/// Longer texts are cut off, shorter texts are padded with zeroes.
/// A text that fills the whole field has no terminating zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedText<const SIZE: usize> {
    bytes: [u8; SIZE],
}

/// The header revision that this library writes.
pub const REVISION: i16 = 0xFFFE_u16 as i16;

/// The default chromaticities, as defined by NTSC.
pub mod ntsc {

    /// Red primary.
    pub const RED: &'static str = "0.67 0.08";

    /// Green primary.
    pub const GREEN: &'static str = "0.21 0.71";

    /// Blue primary.
    pub const BLUE: &'static str = "0.14 0.33";

    /// White point.
    pub const WHITE: &'static str = "0.31 0.316";
}


/// All fields of a Wavefront rla header.
/// The field names match the names in the format description.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RlaHeader {
    pub window_left: i16,
    pub window_right: i16,
    pub window_bottom: i16,
    pub window_top: i16,

    pub active_left: i16,
    pub active_right: i16,
    pub active_bottom: i16,
    pub active_top: i16,

    pub frame_number: i16,
    pub color_channel_type: i16,
    pub color_channel_count: i16,
    pub matte_channel_count: i16,
    pub aux_channel_count: i16,
    pub revision: i16,

    pub gamma: FixedText<16>,
    pub red_chroma: FixedText<24>,
    pub green_chroma: FixedText<24>,
    pub blue_chroma: FixedText<24>,
    pub white_point: FixedText<24>,

    pub job_number: i32,
    pub file_name: FixedText<128>,
    pub description: FixedText<128>,
    pub program_name: FixedText<64>,
    pub machine_name: FixedText<32>,
    pub user_name: FixedText<32>,
    pub date_created: FixedText<20>,
    pub aspect: FixedText<24>,
    pub aspect_ratio: FixedText<8>,
    pub color_channel: FixedText<32>,
    pub field_rendered: i16,
    pub time: FixedText<12>,
    pub filter: FixedText<32>,

    pub color_channel_bits: i16,
    pub matte_channel_type: i16,
    pub matte_channel_bits: i16,
    pub aux_channel_type: i16,
    pub aux_channel_bits: i16,
    pub aux_data: FixedText<32>,
    pub reserved: FixedText<36>,
    pub next_offset: i32,
}

/// The inputs of the header that do not come from the image description.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderContext<'s> {

    /// The name of the file the header is written to.
    pub file_name: &'s str,

    /// The name of the program that writes the file.
    pub program_name: &'s str,

    /// When the file is created.
    pub created: Timestamp,
}


impl<const SIZE: usize> FixedText<SIZE> {

    /// The number of bytes this field occupies in the header.
    pub const BYTE_SIZE: usize = SIZE;

    /// A field filled with zeroes.
    pub fn zeroed() -> Self {
        FixedText { bytes: [0; SIZE] }
    }

    /// Copy as many bytes as fit into the field.
    /// If the text is at least as long as the field, no terminating zero remains.
    pub fn truncated(text: &[u8]) -> Self {
        let mut field = Self::zeroed();
        let length = text.len().min(SIZE);
        field.bytes[.. length].copy_from_slice(&text[.. length]);
        field
    }

    /// Copy as many bytes as fit into the field while keeping the last byte zero,
    /// like text formatted into a buffer of this size.
    pub fn terminated(text: &[u8]) -> Self {
        let mut field = Self::zeroed();
        let length = text.len().min(SIZE.saturating_sub(1));
        field.bytes[.. length].copy_from_slice(&text[.. length]);
        field
    }

    /// All bytes of the field, including the zero padding.
    pub fn as_bytes(&self) -> &[u8; SIZE] {
        &self.bytes
    }

    /// The bytes before the first zero.
    pub fn content(&self) -> &[u8] {
        let end = self.bytes.iter().position(|&byte| byte == 0).unwrap_or(SIZE);
        &self.bytes[.. end]
    }

    /// The bytes before the first zero, as a text.
    pub fn to_text(&self) -> Text {
        Text::from_slice_unchecked(self.content())
    }

    /// Without validation, write this instance to the byte stream.
    pub fn write(&self, write: &mut impl Write) -> UnitResult {
        u8::write_slice(write, &self.bytes)
    }

    /// Read the value without validating.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        let mut field = Self::zeroed();
        u8::read_slice(read, &mut field.bytes)?;
        Ok(field)
    }
}

impl<const SIZE: usize> Default for FixedText<SIZE> {
    fn default() -> Self { Self::zeroed() }
}

impl<const SIZE: usize> ::std::fmt::Debug for FixedText<SIZE> {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(f, "FixedText<{}>(\"{}\")", SIZE, self.to_text())
    }
}


/// Format a float like `printf("%.10f")` does, used for gamma and aspect ratio.
pub fn format_decimal(value: f64) -> String {
    format!("{:.10}", value)
}

/// The gamma field contents, derived from the color space attributes.
/// Empty unless the color space is `Linear` or `GammaCorrected`.
pub fn gamma_text(attributes: &Attributes) -> String {
    match attributes.text(names::COLOR_SPACE) {
        Some(space) if space.eq_case_insensitive("Linear") => "1.0".to_string(),
        Some(space) if space.eq_case_insensitive("GammaCorrected") => format_decimal(attributes.float_or(names::GAMMA, 1.0)),
        _ => String::new(),
    }
}

/// The chromaticity field contents of the attribute with the specified name.
/// Float vectors with two or three components are written with four decimal places,
/// anything else falls back to the default.
pub fn chromaticity_text(attributes: &Attributes, name: &str, default: &str) -> String {
    let components = attributes.find(name).and_then(|value| value.to_float_components());

    match components {
        Some(components) => components.iter()
            .map(|component| format!("{:.4}", component))
            .collect::<Vec<_>>().join(" "),

        None => default.to_string(),
    }
}


impl RlaHeader {

    /// Number of bytes this header occupies in an rla file.
    pub fn byte_size() -> usize {
        // coordinates, frame number, channel counts and types, revision
        14 * i16::BYTE_SIZE

        + FixedText::<16>::BYTE_SIZE + 4 * FixedText::<24>::BYTE_SIZE
        + i32::BYTE_SIZE

        + 2 * FixedText::<128>::BYTE_SIZE + FixedText::<64>::BYTE_SIZE
        + 2 * FixedText::<32>::BYTE_SIZE + FixedText::<20>::BYTE_SIZE
        + FixedText::<24>::BYTE_SIZE + FixedText::<8>::BYTE_SIZE
        + FixedText::<32>::BYTE_SIZE + i16::BYTE_SIZE
        + FixedText::<12>::BYTE_SIZE + FixedText::<32>::BYTE_SIZE

        // bit depths and types of the groups
        + 5 * i16::BYTE_SIZE

        + FixedText::<32>::BYTE_SIZE + FixedText::<36>::BYTE_SIZE
        + i32::BYTE_SIZE
    }

    /// A header with all numbers zero and all texts empty.
    pub fn zeroed() -> Self {
        RlaHeader {
            window_left: 0, window_right: 0, window_bottom: 0, window_top: 0,
            active_left: 0, active_right: 0, active_bottom: 0, active_top: 0,
            frame_number: 0, color_channel_type: 0,
            color_channel_count: 0, matte_channel_count: 0, aux_channel_count: 0,
            revision: 0,
            gamma: FixedText::zeroed(),
            red_chroma: FixedText::zeroed(), green_chroma: FixedText::zeroed(),
            blue_chroma: FixedText::zeroed(), white_point: FixedText::zeroed(),
            job_number: 0,
            file_name: FixedText::zeroed(), description: FixedText::zeroed(),
            program_name: FixedText::zeroed(), machine_name: FixedText::zeroed(),
            user_name: FixedText::zeroed(), date_created: FixedText::zeroed(),
            aspect: FixedText::zeroed(), aspect_ratio: FixedText::zeroed(),
            color_channel: FixedText::zeroed(), field_rendered: 0,
            time: FixedText::zeroed(), filter: FixedText::zeroed(),
            color_channel_bits: 0, matte_channel_type: 0, matte_channel_bits: 0,
            aux_channel_type: 0, aux_channel_bits: 0,
            aux_data: FixedText::zeroed(), reserved: FixedText::zeroed(),
            next_offset: 0,
        }
    }

    /// Build the header for an image.
    /// Does not validate the image description:
    /// coordinates that exceed 16 bits wrap around, as in other rla writers.
    pub fn new(image: &ImageDescription, context: &HeaderContext<'_>) -> Self {
        let attributes = &image.attributes;
        let display = image.display_window;
        let data = image.data_window;

        let display_max = display.max();
        let display_size = display.size.to_i64();
        let data_max = data.max();
        let data_size = data.size.to_i64();

        // rla y coordinates grow upwards
        let window_left = i64::from(display.position.x());
        let window_right = display_max.x();
        let window_bottom = -i64::from(display.position.y());
        let window_top = display_size.height() - i64::from(display.position.y()) - 1;

        let active_left = i64::from(data.position.x());
        let active_right = data_max.x();
        let active_bottom = -i64::from(data.position.y());
        let active_top = data_size.height() - i64::from(data.position.y()) - 1;

        let groups = image.channel_groups();

        fn text_attribute<'a>(attributes: &'a Attributes, name: &str) -> &'a [u8] {
            attributes.non_empty_text(name).map(Text::as_slice).unwrap_or_default()
        }

        let color_channel = attributes.text(names::COLOR_CHANNEL)
            .map_or_else(|| Text::from("rgb"), Text::clone);

        let aspect_ratio = data_size.width() as f32 / data_size.height() as f32;

        RlaHeader {
            window_left: window_left as i16,
            window_right: window_right as i16,
            window_bottom: window_bottom as i16,
            window_top: window_top as i16,

            active_left: active_left as i16,
            active_right: active_right as i16,
            active_bottom: active_bottom as i16,
            active_top: active_top as i16,

            frame_number: attributes.int_or(names::FRAME_NUMBER, 0) as i16,

            color_channel_type: groups.color.pixel_kind.type_code(),
            color_channel_count: groups.color.channel_count as i16,
            matte_channel_count: groups.matte.channel_count as i16,
            aux_channel_count: groups.aux.channel_count as i16,
            revision: REVISION,

            gamma: FixedText::terminated(gamma_text(attributes).as_bytes()),
            red_chroma: FixedText::terminated(chromaticity_text(attributes, names::RED_CHROMA, ntsc::RED).as_bytes()),
            green_chroma: FixedText::terminated(chromaticity_text(attributes, names::GREEN_CHROMA, ntsc::GREEN).as_bytes()),
            blue_chroma: FixedText::terminated(chromaticity_text(attributes, names::BLUE_CHROMA, ntsc::BLUE).as_bytes()),
            white_point: FixedText::terminated(chromaticity_text(attributes, names::WHITE_POINT, ntsc::WHITE).as_bytes()),

            job_number: attributes.int_or(names::JOB_NUMBER, 0),
            file_name: FixedText::truncated(Text::new_lossy(context.file_name).as_slice()),
            description: FixedText::truncated(text_attribute(attributes, names::DESCRIPTION)),
            program_name: FixedText::terminated(Text::new_lossy(context.program_name).as_slice()),
            machine_name: FixedText::truncated(text_attribute(attributes, names::MACHINE_NAME)),
            user_name: FixedText::truncated(text_attribute(attributes, names::USER_NAME)),
            date_created: FixedText::terminated(context.created.to_rla_date().as_bytes()),
            aspect: FixedText::truncated(text_attribute(attributes, names::ASPECT)),
            aspect_ratio: FixedText::terminated(format_decimal(f64::from(aspect_ratio)).as_bytes()),
            color_channel: FixedText::terminated(color_channel.as_slice()),
            field_rendered: attributes.int_or(names::FIELD_RENDERED, 0) as i16,
            time: FixedText::truncated(text_attribute(attributes, names::TIME)),
            filter: FixedText::truncated(text_attribute(attributes, names::FILTER)),

            color_channel_bits: groups.color.bit_depth as i16,
            matte_channel_type: groups.matte.pixel_kind.type_code(),
            matte_channel_bits: groups.matte.bit_depth as i16,
            aux_channel_type: groups.aux.pixel_kind.type_code(),
            aux_channel_bits: groups.aux.bit_depth as i16,
            aux_data: FixedText::truncated(text_attribute(attributes, names::AUX_DATA)),
            reserved: FixedText::zeroed(),
            next_offset: 0,
        }
    }

    /// Without validation, write this instance to the byte stream.
    /// Each field is written separately, in file order.
    pub fn write(&self, write: &mut impl Write) -> UnitResult {
        self.window_left.write(write)?;
        self.window_right.write(write)?;
        self.window_bottom.write(write)?;
        self.window_top.write(write)?;

        self.active_left.write(write)?;
        self.active_right.write(write)?;
        self.active_bottom.write(write)?;
        self.active_top.write(write)?;

        self.frame_number.write(write)?;
        self.color_channel_type.write(write)?;
        self.color_channel_count.write(write)?;
        self.matte_channel_count.write(write)?;
        self.aux_channel_count.write(write)?;
        self.revision.write(write)?;

        self.gamma.write(write)?;
        self.red_chroma.write(write)?;
        self.green_chroma.write(write)?;
        self.blue_chroma.write(write)?;
        self.white_point.write(write)?;

        self.job_number.write(write)?;
        self.file_name.write(write)?;
        self.description.write(write)?;
        self.program_name.write(write)?;
        self.machine_name.write(write)?;
        self.user_name.write(write)?;
        self.date_created.write(write)?;
        self.aspect.write(write)?;
        self.aspect_ratio.write(write)?;
        self.color_channel.write(write)?;
        self.field_rendered.write(write)?;
        self.time.write(write)?;
        self.filter.write(write)?;

        self.color_channel_bits.write(write)?;
        self.matte_channel_type.write(write)?;
        self.matte_channel_bits.write(write)?;
        self.aux_channel_type.write(write)?;
        self.aux_channel_bits.write(write)?;
        self.aux_data.write(write)?;
        self.reserved.write(write)?;
        self.next_offset.write(write)?;
        Ok(())
    }

    /// Read the value without validating.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        Ok(RlaHeader {
            window_left: i16::read(read)?,
            window_right: i16::read(read)?,
            window_bottom: i16::read(read)?,
            window_top: i16::read(read)?,

            active_left: i16::read(read)?,
            active_right: i16::read(read)?,
            active_bottom: i16::read(read)?,
            active_top: i16::read(read)?,

            frame_number: i16::read(read)?,
            color_channel_type: i16::read(read)?,
            color_channel_count: i16::read(read)?,
            matte_channel_count: i16::read(read)?,
            aux_channel_count: i16::read(read)?,
            revision: i16::read(read)?,

            gamma: FixedText::read(read)?,
            red_chroma: FixedText::read(read)?,
            green_chroma: FixedText::read(read)?,
            blue_chroma: FixedText::read(read)?,
            white_point: FixedText::read(read)?,

            job_number: i32::read(read)?,
            file_name: FixedText::read(read)?,
            description: FixedText::read(read)?,
            program_name: FixedText::read(read)?,
            machine_name: FixedText::read(read)?,
            user_name: FixedText::read(read)?,
            date_created: FixedText::read(read)?,
            aspect: FixedText::read(read)?,
            aspect_ratio: FixedText::read(read)?,
            color_channel: FixedText::read(read)?,
            field_rendered: i16::read(read)?,
            time: FixedText::read(read)?,
            filter: FixedText::read(read)?,

            color_channel_bits: i16::read(read)?,
            matte_channel_type: i16::read(read)?,
            matte_channel_bits: i16::read(read)?,
            aux_channel_type: i16::read(read)?,
            aux_channel_bits: i16::read(read)?,
            aux_data: FixedText::read(read)?,
            reserved: FixedText::read(read)?,
            next_offset: i32::read(read)?,
        })
    }

    /// The channel groups as stored in this header.
    pub fn channel_counts(&self) -> (i16, i16, i16) {
        (self.color_channel_count, self.matte_channel_count, self.aux_channel_count)
    }
}

/// Write one zero offset per scan line, directly after the header.
/// The offsets are replaced by the real scan line positions when the file is finished.
pub fn write_offset_table_placeholder(write: &mut impl Write, height: usize) -> UnitResult {
    for _ in 0 .. height {
        0_i32.write(write)?;
    }

    Ok(())
}
