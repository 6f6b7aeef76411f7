//! Contains the collection of named attributes attached to an image description,
//! and the names of all attributes that affect the rla header.

use std::collections::HashMap;
use crate::meta::attribute::*;


/// The names of all attributes that are copied into the rla header.
pub mod names {

    /// Integer, the frame number of this image in a sequence.
    pub const FRAME_NUMBER: &'static str = "rla:FrameNumber";

    /// Text, `Linear` or `GammaCorrected` select the gamma field contents.
    pub const COLOR_SPACE: &'static str = "oiio:ColorSpace";

    /// Float, written when the color space is `GammaCorrected`.
    pub const GAMMA: &'static str = "oiio:Gamma";

    /// Float vector, the red primary.
    pub const RED_CHROMA: &'static str = "rla:RedChroma";

    /// Float vector, the green primary.
    pub const GREEN_CHROMA: &'static str = "rla:GreenChroma";

    /// Float vector, the blue primary.
    pub const BLUE_CHROMA: &'static str = "rla:BlueChroma";

    /// Float vector, the white point.
    pub const WHITE_POINT: &'static str = "rla:WhitePoint";

    /// Integer.
    pub const JOB_NUMBER: &'static str = "rla:JobNumber";

    /// Text, free form description.
    pub const DESCRIPTION: &'static str = "ImageDescription";

    /// Text.
    pub const MACHINE_NAME: &'static str = "rla:MachineName";

    /// Text.
    pub const USER_NAME: &'static str = "rla:UserName";

    /// Text, a named aspect format.
    pub const ASPECT: &'static str = "rla:Aspect";

    /// Text, the color channel label, `rgb` if absent.
    pub const COLOR_CHANNEL: &'static str = "rla:ColorChannel";

    /// Integer, non-zero if the image was rendered in fields.
    pub const FIELD_RENDERED: &'static str = "rla:FieldRendered";

    /// Text, the render time.
    pub const TIME: &'static str = "rla:Time";

    /// Text, the filter that was used for rendering.
    pub const FILTER: &'static str = "rla:Filter";

    /// Text, describes the auxiliary channels.
    pub const AUX_DATA: &'static str = "rla:AuxData";
}


/// Named attributes of an image. Any name may be used,
/// but only the names in the `names` module end up in the rla header.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Attributes {

    /// All attributes, by name.
    pub map: HashMap<Text, AttributeValue>,
}

impl Attributes {

    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attribute, replacing any attribute with the same name.
    pub fn with(mut self, name: impl Into<Text>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set the attribute, replacing any attribute with the same name.
    pub fn insert(&mut self, name: impl Into<Text>, value: impl Into<AttributeValue>) {
        self.map.insert(name.into(), value.into());
    }

    /// Look up an attribute by its exact name.
    pub fn find(&self, name: &str) -> Option<&AttributeValue> {
        self.map.get(name.as_bytes())
    }

    /// The integer value of the attribute,
    /// or the default if it is missing or not an integer.
    pub fn int_or(&self, name: &str, default: i32) -> i32 {
        self.find(name).and_then(AttributeValue::to_i32).unwrap_or(default)
    }

    /// The numeric value of the attribute,
    /// or the default if it is missing or not a number.
    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.find(name).and_then(AttributeValue::to_f64).unwrap_or(default)
    }

    /// The text value of the attribute, if it is present and a text.
    pub fn text(&self, name: &str) -> Option<&Text> {
        self.find(name).and_then(AttributeValue::to_text)
    }

    /// The text value of the attribute, if it is present, a text, and not empty.
    pub fn non_empty_text(&self, name: &str) -> Option<&Text> {
        self.text(name).filter(|text| !text.is_empty())
    }
}
