//! Describes an image that should be written to an rla file,
//! independent of the rla format, and derives the rla header from it.

pub mod attribute;
pub mod attributes;
pub mod channels;
pub mod header;


use ::smallvec::SmallVec;
use crate::error::*;
use crate::math::*;
use self::attribute::*;
use self::attributes::Attributes;
use self::channels::ChannelGroups;


/// List of per-channel sample types.
pub type SampleTypes = SmallVec<[SampleType; 5]>;

/// Everything the rla header is derived from.
/// Owned by the caller, the header construction only reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageDescription {

    /// The rectangle of pixels that is actually stored in the file.
    /// The rla active window.
    pub data_window: IntegerBounds,

    /// The full frame that the data window is placed inside of.
    /// The rla window.
    pub display_window: IntegerBounds,

    /// The number of slices of a volume image. Zero is treated as one.
    /// Rla supports only flat images.
    pub depth: usize,

    /// How many channels each pixel contains.
    pub channel_count: usize,

    /// The sample type of each channel. If empty, all channels use `sample_type`.
    /// If shorter than the channel count, the missing channels use `sample_type`.
    pub channel_sample_types: SampleTypes,

    /// The sample type of all channels without an explicit sample type.
    pub sample_type: SampleType,

    /// Named meta data, see `attributes::names` for the names that end up in the header.
    pub attributes: Attributes,
}


impl ImageDescription {

    /// Create a flat image located at the origin,
    /// with the display window matching the data window,
    /// and all channels having the same sample type.
    pub fn new(size: impl Into<Vec2<usize>>, channel_count: usize, sample_type: SampleType) -> Self {
        let bounds = IntegerBounds::from_dimensions(size);

        ImageDescription {
            data_window: bounds,
            display_window: bounds,
            depth: 1,
            channel_count,
            channel_sample_types: SmallVec::new(),
            sample_type,
            attributes: Attributes::new(),
        }
    }

    /// Set the sample type of each channel. Also sets the channel count.
    pub fn with_channel_sample_types(self, sample_types: impl Into<SampleTypes>) -> Self {
        let channel_sample_types = sample_types.into();
        Self { channel_count: channel_sample_types.len(), channel_sample_types, ..self }
    }

    /// Set the position of the data window, keeping its size.
    pub fn with_data_position(mut self, position: impl Into<Vec2<i32>>) -> Self {
        self.data_window.position = position.into();
        self
    }

    /// Set the full frame that contains the data window.
    pub fn with_display_window(self, display_window: IntegerBounds) -> Self {
        Self { display_window, ..self }
    }

    /// Set the number of slices.
    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }

    /// Add a named attribute, replacing any attribute with the same name.
    pub fn with_attribute(mut self, name: impl Into<Text>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// The number of pixels in each dimension of the data window.
    pub fn size(&self) -> Vec2<usize> {
        self.data_window.size
    }

    /// The sample type of the channel at the specified index.
    pub fn channel_sample_type(&self, channel_index: usize) -> SampleType {
        self.channel_sample_types.get(channel_index).copied().unwrap_or(self.sample_type)
    }

    /// Partition the channels into color, matte and auxiliary channels.
    /// Uses the per-channel sample types if any are specified,
    /// and guesses from the channel count otherwise.
    pub fn channel_groups(&self) -> ChannelGroups {
        if self.channel_sample_types.is_empty() {
            ChannelGroups::from_channel_count(self.channel_count, self.sample_type)
        }
        else {
            let types: SampleTypes = (0 .. self.channel_count)
                .map(|index| self.channel_sample_type(index)).collect();

            ChannelGroups::from_channel_types(&types)
        }
    }

    /// The number of bytes that one pixel of all channels needs.
    pub fn bytes_per_pixel(&self) -> usize {
        (0 .. self.channel_count)
            .map(|index| self.channel_sample_type(index).bytes_per_sample())
            .sum()
    }

    /// The number of bytes that one row of pixels needs.
    pub fn scan_line_byte_size(&self) -> usize {
        self.bytes_per_pixel() * self.size().width()
    }

    /// Check whether this image can be stored in an rla file.
    /// Checks resolution first, then depth, then whether all values fit the 16-bit header fields.
    pub fn validate(&self) -> UnitResult {
        let Vec2(width, height) = self.size();

        if width < 1 || height < 1 {
            return Err(Error::InvalidResolution { width, height });
        }

        if self.depth > 1 {
            return Err(Error::UnsupportedDimensionality(self.depth));
        }

        validate_window(self.display_window, "display window coordinates exceed 16-bit range")?;
        validate_window(self.data_window, "data window coordinates exceed 16-bit range")?;

        if self.channel_count > i16::MAX as usize {
            return Err(Error::invalid("too many channels"));
        }

        Ok(())
    }
}

/// The rla window edges must fit into 16-bit integers.
fn validate_window(window: IntegerBounds, error_message: &'static str) -> UnitResult {
    let position = window.position.to_i64();
    let max = window.max();

    i64_to_i16(position.x(), error_message)?;
    i64_to_i16(max.x(), error_message)?;
    i64_to_i16(-position.y(), error_message)?;
    i64_to_i16(window.size.to_i64().height() - position.y() - 1, error_message)?;
    Ok(())
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::meta::channels::PixelKind;

    #[test]
    fn resolution_must_not_be_empty() {
        let error = ImageDescription::new((0, 4), 3, SampleType::U8).validate().unwrap_err();
        assert!(matches!(error, Error::InvalidResolution { width: 0, height: 4 }));

        let error = ImageDescription::new((4, 0), 3, SampleType::U8).validate().unwrap_err();
        assert!(matches!(error, Error::InvalidResolution { width: 4, height: 0 }));
    }

    #[test]
    fn resolution_is_checked_before_depth() {
        let error = ImageDescription::new((0, 0), 3, SampleType::U8).with_depth(2).validate().unwrap_err();
        assert!(matches!(error, Error::InvalidResolution { .. }));
    }

    #[test]
    fn volumes_are_unsupported() {
        let image = ImageDescription::new((4, 4), 3, SampleType::U8);
        assert!(image.clone().with_depth(0).validate().is_ok());
        assert!(image.clone().with_depth(1).validate().is_ok());

        let error = image.with_depth(3).validate().unwrap_err();
        assert!(matches!(error, Error::UnsupportedDimensionality(3)));
    }

    #[test]
    fn coordinates_must_fit_header() {
        let image = ImageDescription::new((40_000, 2), 3, SampleType::U8);
        assert!(matches!(image.validate(), Err(Error::Invalid(_))));

        let image = ImageDescription::new((16, 16), 3, SampleType::U8)
            .with_data_position((-32_768, 0));

        assert!(image.clone().with_display_window(IntegerBounds::from_dimensions((16, 16))).validate().is_ok());

        let image = image.with_data_position((0, -32_768));
        assert!(matches!(image.validate(), Err(Error::Invalid(_))), "bottom edge is the negated y position");
    }

    #[test]
    fn missing_channel_types_fall_back_to_global_type() {
        let mut image = ImageDescription::new((2, 2), 4, SampleType::F32);
        image.channel_sample_types = smallvec![ SampleType::U8, SampleType::U8 ];

        assert_eq!(image.channel_sample_type(1), SampleType::U8);
        assert_eq!(image.channel_sample_type(2), SampleType::F32);
        assert_eq!(image.bytes_per_pixel(), 1 + 1 + 4 + 4);
        assert_eq!(image.scan_line_byte_size(), 20);

        let groups = image.channel_groups();
        assert_eq!(groups.color.channel_count, 2);
        assert_eq!(groups.matte.channel_count, 2);
        assert_eq!(groups.matte.pixel_kind, PixelKind::Float);
    }

    #[test]
    fn explicit_types_set_channel_count() {
        let image = ImageDescription::new((2, 2), 0, SampleType::U8)
            .with_channel_sample_types(vec![ SampleType::F16, SampleType::F16, SampleType::F16, SampleType::U8 ]);

        assert_eq!(image.channel_count, 4);
        assert_eq!(image.channel_groups().color.bit_depth, 16);
        assert_eq!(image.channel_groups().matte.bit_depth, 8);
    }
}
