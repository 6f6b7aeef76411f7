//! Partition the channels of an image into the three rla channel groups:
//! color, matte, and auxiliary. Each group stores samples of one type only.

use crate::meta::attribute::SampleType;


/// Which of the three rla groups a channel belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GroupKind {

    /// Visible color data, either luminance or red, green and blue.
    Color,

    /// Alpha or coverage data.
    Matte,

    /// Arbitrary additional per-pixel data.
    Aux,
}

/// How the samples of a group are interpreted by rla readers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PixelKind {

    /// Integer samples of any size.
    Byte,

    /// 32-bit float samples.
    Float,
}

/// A run of consecutive channels that share one sample type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ChannelGroup {

    /// Color, matte or auxiliary.
    pub kind: GroupKind,

    /// Float or integer samples.
    pub pixel_kind: PixelKind,

    /// The number of bits in a single sample of this group.
    pub bit_depth: usize,

    /// How many channels this group contains. May be zero.
    pub channel_count: usize,
}

/// The color, matte, and auxiliary groups of an image, in this order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ChannelGroups {

    /// The first channels of the image.
    pub color: ChannelGroup,

    /// The channels directly following the color channels.
    pub matte: ChannelGroup,

    /// All channels after the matte channels.
    pub aux: ChannelGroup,
}


impl PixelKind {

    /// Only 32-bit floats are stored as rla floats, everything else is stored as bytes.
    pub fn of(sample_type: SampleType) -> Self {
        match sample_type {
            SampleType::F32 => PixelKind::Float,
            _ => PixelKind::Byte,
        }
    }

    /// The channel type code in an rla header.
    pub fn type_code(self) -> i16 {
        match self {
            PixelKind::Byte => 0,
            PixelKind::Float => 4,
        }
    }
}

impl ChannelGroup {

    /// A group without channels.
    pub fn empty(kind: GroupKind) -> Self {
        ChannelGroup { kind, pixel_kind: PixelKind::Byte, bit_depth: 0, channel_count: 0 }
    }

    /// A group of channels which all contain samples of the specified type.
    pub fn new(kind: GroupKind, sample_type: SampleType, channel_count: usize) -> Self {
        ChannelGroup {
            kind, channel_count,
            pixel_kind: PixelKind::of(sample_type),
            bit_depth: sample_type.bits_per_sample(),
        }
    }

    /// Whether this group contains no channels.
    pub fn is_empty(&self) -> bool {
        self.channel_count == 0
    }
}

impl ChannelGroups {

    /// Derive the groups from a sample type for each channel.
    /// The color group takes the first channels of equal type, but at most three.
    /// The matte group takes the following channels of equal type.
    /// The auxiliary group takes everything else, typed by its first channel.
    /// Never fails, but produces empty groups when the channels run out.
    pub fn from_channel_types(channel_types: &[SampleType]) -> Self {
        fn equal_run(types: &[SampleType], max: usize) -> usize {
            types.first().map_or(0, |first| {
                types.iter().take(max).take_while(|&sample_type| sample_type == first).count()
            })
        }

        let color_count = equal_run(channel_types, 3);
        let after_color = &channel_types[color_count ..];

        let matte_count = equal_run(after_color, usize::MAX);
        let after_matte = &after_color[matte_count ..];

        let group = |kind, types: &[SampleType], count: usize| match types.first() {
            Some(&sample_type) => ChannelGroup::new(kind, sample_type, count),
            None => ChannelGroup::empty(kind),
        };

        ChannelGroups {
            color: group(GroupKind::Color, channel_types, color_count),
            matte: group(GroupKind::Matte, after_color, matte_count),
            aux: group(GroupKind::Aux, after_matte, after_matte.len()),
        }
    }

    /// Derive the groups from the channel count alone,
    /// with all channels containing samples of the specified type.
    /// With at least three channels, the first three are color, otherwise the first one is luminance.
    /// Then, one matte channel follows if available, and all other channels are auxiliary.
    ///
    /// An image without any channels still gets a single luminance channel,
    /// as in other rla writers.
    pub fn from_channel_count(channel_count: usize, sample_type: SampleType) -> Self {
        let mut remaining = channel_count as i64;

        let color_count = if remaining >= 3 { 3 } else { 1 };
        remaining -= color_count;

        let matte_count = if remaining > 0 { 1 } else { 0 };
        remaining -= matte_count;

        let aux_count = remaining.max(0);

        ChannelGroups {
            color: ChannelGroup::new(GroupKind::Color, sample_type, color_count as usize),
            matte: ChannelGroup::new(GroupKind::Matte, sample_type, matte_count as usize),
            aux: ChannelGroup::new(GroupKind::Aux, sample_type, aux_count as usize),
        }
    }

    /// Number of channels in all three groups.
    pub fn channel_count(&self) -> usize {
        self.color.channel_count + self.matte.channel_count + self.aux.channel_count
    }

    /// The three groups, in file order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelGroup> {
        vec![ &self.color, &self.matte, &self.aux ].into_iter()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use super::SampleType::*;

    fn counts(groups: ChannelGroups) -> (usize, usize, usize) {
        (groups.color.channel_count, groups.matte.channel_count, groups.aux.channel_count)
    }

    #[test]
    fn uniform_explicit_types_are_color_only_up_to_three() {
        for channel_count in 1 ..= 3 {
            let groups = ChannelGroups::from_channel_types(&vec![F32; channel_count]);
            assert_eq!(counts(groups), (channel_count, 0, 0));
            assert_eq!(groups.color.pixel_kind, PixelKind::Float);
            assert_eq!(groups.color.bit_depth, 32);
            assert!(groups.matte.is_empty() && groups.aux.is_empty());
        }
    }

    #[test]
    fn uniform_explicit_types_beyond_three_spill_into_matte() {
        for channel_count in 4 ..= 8 {
            let groups = ChannelGroups::from_channel_types(&vec![U8; channel_count]);
            assert_eq!(groups.color.channel_count, 3);
            assert_eq!(groups.channel_count(), channel_count);
            assert_eq!(counts(groups), (3, channel_count - 3, 0));
        }
    }

    #[test]
    fn explicit_type_runs_are_recovered() {
        let groups = ChannelGroups::from_channel_types(&[U8, U8, U8, U16, F32, F32]);
        assert_eq!(counts(groups), (3, 1, 2));

        assert_eq!(groups.color.pixel_kind, PixelKind::Byte);
        assert_eq!(groups.color.bit_depth, 8);
        assert_eq!(groups.matte.pixel_kind, PixelKind::Byte);
        assert_eq!(groups.matte.bit_depth, 16);
        assert_eq!(groups.aux.pixel_kind, PixelKind::Float);
        assert_eq!(groups.aux.bit_depth, 32);

        assert_eq!(counts(ChannelGroups::from_channel_types(&[F16, U8, U8, U8, F32])), (1, 3, 1));
        assert_eq!(counts(ChannelGroups::from_channel_types(&[F32, F32, U8])), (2, 1, 0));
        assert_eq!(counts(ChannelGroups::from_channel_types(&[F32, U8])), (1, 1, 0));
        assert_eq!(counts(ChannelGroups::from_channel_types(&[F32, U8, F32])), (1, 1, 1));
    }

    #[test]
    fn aux_takes_every_remaining_channel() {
        let groups = ChannelGroups::from_channel_types(&[F32, U8, U16, F16, U8]);
        assert_eq!(counts(groups), (1, 1, 3));
        assert_eq!(groups.aux.bit_depth, 16);
    }

    #[test]
    fn only_f32_is_float() {
        assert_eq!(PixelKind::of(F16), PixelKind::Byte);
        assert_eq!(PixelKind::of(F64), PixelKind::Byte);
        assert_eq!(PixelKind::of(F32), PixelKind::Float);
        assert_eq!(PixelKind::Float.type_code(), 4);
        assert_eq!(PixelKind::Byte.type_code(), 0);
    }

    #[test]
    fn no_explicit_channels() {
        let groups = ChannelGroups::from_channel_types(&[]);
        assert_eq!(counts(groups), (0, 0, 0));
        assert_eq!(groups.color.bit_depth, 0);
    }

    #[test]
    fn global_type_heuristic() {
        let expected = [
            (1, (1, 0, 0)),
            (2, (1, 1, 0)),
            (3, (3, 0, 0)),
            (4, (3, 1, 0)),
            (5, (3, 1, 1)),
            (6, (3, 1, 2)),
            (7, (3, 1, 3)),
            (8, (3, 1, 4)),
        ];

        for &(channel_count, groups) in &expected {
            assert_eq!(counts(ChannelGroups::from_channel_count(channel_count, U8)), groups, "{} channels", channel_count);
        }
    }

    #[test]
    fn global_type_applies_to_all_groups() {
        let groups = ChannelGroups::from_channel_count(1, F32);
        for group in groups.iter() {
            assert_eq!(group.pixel_kind, PixelKind::Float);
            assert_eq!(group.bit_depth, 32);
        }

        assert_eq!(groups.iter().map(|group| group.kind).collect::<Vec<_>>(), [GroupKind::Color, GroupKind::Matte, GroupKind::Aux]);
    }

    #[test]
    fn zero_channels_still_have_luminance() {
        assert_eq!(counts(ChannelGroups::from_channel_count(0, U16)), (1, 0, 0));
    }
}
