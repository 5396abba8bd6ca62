//! Wire format for per-tick partial updates.
//!
//! Each record carries an element id plus only the properties that changed
//! this tick, under short keys:
//!
//! ```json
//! {"id":"card-3","y":48.5,"o":0.75}
//! ```
//!
//! A receiver must treat a missing key as "unchanged", never as a reset.

use serde::{Deserialize, Serialize};

use crate::element::{
    AnimatedElement, ColorProperty, NumericProperty, Property, PropertyDiff, PropertyValue,
};
use crate::error::Result;

/// One element's changes for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonAnimatedElement {
    pub id: String,
    #[serde(rename = "x", default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(rename = "y", default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(rename = "sx", default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(rename = "sy", default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "bc", default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(rename = "o", default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl JsonAnimatedElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Build a record from a diff map.
    pub fn from_diff(id: &str, diff: &PropertyDiff) -> Self {
        let mut record = Self::new(id);
        for (property, value) in diff {
            match (property, value) {
                (Property::OffsetX, PropertyValue::Number(v)) => record.offset_x = Some(*v),
                (Property::OffsetY, PropertyValue::Number(v)) => record.offset_y = Some(*v),
                (Property::ScaleX, PropertyValue::Number(v)) => record.scale_x = Some(*v),
                (Property::ScaleY, PropertyValue::Number(v)) => record.scale_y = Some(*v),
                (Property::Rotation, PropertyValue::Number(v)) => record.rotation = Some(*v),
                (Property::Opacity, PropertyValue::Number(v)) => record.opacity = Some(*v),
                (Property::Value, PropertyValue::Number(v)) => record.value = Some(*v),
                (Property::Color, PropertyValue::Color(c)) => record.color = Some(c.clone()),
                (Property::BackgroundColor, PropertyValue::Color(c)) => {
                    record.background_color = Some(c.clone())
                }
                // Mismatched value kinds never come out of `AnimatedElement::diff`.
                _ => {}
            }
        }
        record
    }

    /// True when the record carries no property at all.
    pub fn is_empty(&self) -> bool {
        self.offset_x.is_none()
            && self.offset_y.is_none()
            && self.scale_x.is_none()
            && self.scale_y.is_none()
            && self.rotation.is_none()
            && self.color.is_none()
            && self.background_color.is_none()
            && self.opacity.is_none()
            && self.value.is_none()
    }

    /// Patch `element` with the fields present in this record.
    ///
    /// Absent fields leave the element untouched. This is what a receiving
    /// renderer does with each record.
    pub fn apply_to(&self, element: &mut AnimatedElement) {
        let numbers = [
            (NumericProperty::OffsetX, self.offset_x),
            (NumericProperty::OffsetY, self.offset_y),
            (NumericProperty::ScaleX, self.scale_x),
            (NumericProperty::ScaleY, self.scale_y),
            (NumericProperty::Rotation, self.rotation),
            (NumericProperty::Opacity, self.opacity),
            (NumericProperty::Value, self.value),
        ];
        for (property, value) in numbers {
            if let Some(value) = value {
                element.set_number(property, value);
            }
        }
        if let Some(color) = &self.color {
            element.set_color(ColorProperty::Color, Some(color.clone()));
        }
        if let Some(color) = &self.background_color {
            element.set_color(ColorProperty::BackgroundColor, Some(color.clone()));
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Serialize a tick's batch as a JSON array.
pub fn encode_batch(batch: &[JsonAnimatedElement]) -> Result<String> {
    Ok(serde_json::to_string(batch)?)
}

/// Parse a JSON array produced by [`encode_batch`].
pub fn decode_batch(json: &str) -> Result<Vec<JsonAnimatedElement>> {
    Ok(serde_json::from_str(json)?)
}
