//! Tracked entities with independently animated properties.
//!
//! An [`AnimatedElement`] carries nine current values:
//!
//! ```text
//! offsetX  offsetY  scaleX  scaleY  rotation  opacity  value   (numbers)
//! color  backgroundColor                                       (CSS colors)
//! ```
//!
//! Each value may be driven by an [`AnimationState`]. While a state is set,
//! the value is only written by [`AnimatedElement::update`]; setting a value
//! directly drops the state for that property.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interpolate::{ColorInterpolator, NumberInterpolator};
use crate::state::{AnimationState, Millis};

/// Every animatable property, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    OffsetX,
    OffsetY,
    ScaleX,
    ScaleY,
    Rotation,
    Color,
    BackgroundColor,
    Opacity,
    Value,
}

impl Property {
    pub const ALL: [Property; 9] = [
        Self::OffsetX,
        Self::OffsetY,
        Self::ScaleX,
        Self::ScaleY,
        Self::Rotation,
        Self::Color,
        Self::BackgroundColor,
        Self::Opacity,
        Self::Value,
    ];

    /// Long property key, as used in diff maps.
    pub fn key(&self) -> &'static str {
        match self {
            Self::OffsetX => "offsetX",
            Self::OffsetY => "offsetY",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Rotation => "rotation",
            Self::Color => "color",
            Self::BackgroundColor => "backgroundColor",
            Self::Opacity => "opacity",
            Self::Value => "value",
        }
    }

    /// Short key used on the wire.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::OffsetX => "x",
            Self::OffsetY => "y",
            Self::ScaleX => "sx",
            Self::ScaleY => "sy",
            Self::Rotation => "r",
            Self::Color => "c",
            Self::BackgroundColor => "bc",
            Self::Opacity => "o",
            Self::Value => "v",
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color | Self::BackgroundColor)
    }
}

/// Properties holding numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericProperty {
    OffsetX = 0,
    OffsetY = 1,
    ScaleX = 2,
    ScaleY = 3,
    Rotation = 4,
    Opacity = 5,
    Value = 6,
}

impl NumericProperty {
    pub const ALL: [NumericProperty; 7] = [
        Self::OffsetX,
        Self::OffsetY,
        Self::ScaleX,
        Self::ScaleY,
        Self::Rotation,
        Self::Opacity,
        Self::Value,
    ];

    /// Value a fresh element starts with.
    pub fn default_value(self) -> f64 {
        match self {
            Self::ScaleX | Self::ScaleY | Self::Opacity => 1.0,
            Self::OffsetX | Self::OffsetY | Self::Rotation | Self::Value => 0.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl From<NumericProperty> for Property {
    fn from(p: NumericProperty) -> Self {
        match p {
            NumericProperty::OffsetX => Self::OffsetX,
            NumericProperty::OffsetY => Self::OffsetY,
            NumericProperty::ScaleX => Self::ScaleX,
            NumericProperty::ScaleY => Self::ScaleY,
            NumericProperty::Rotation => Self::Rotation,
            NumericProperty::Opacity => Self::Opacity,
            NumericProperty::Value => Self::Value,
        }
    }
}

/// Properties holding CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorProperty {
    Color = 0,
    BackgroundColor = 1,
}

impl ColorProperty {
    pub const ALL: [ColorProperty; 2] = [Self::Color, Self::BackgroundColor];

    fn index(self) -> usize {
        self as usize
    }
}

impl From<ColorProperty> for Property {
    fn from(p: ColorProperty) -> Self {
        match p {
            ColorProperty::Color => Self::Color,
            ColorProperty::BackgroundColor => Self::BackgroundColor,
        }
    }
}

/// A property's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Color(String),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<&str> {
        match self {
            Self::Color(c) => Some(c),
            Self::Number(_) => None,
        }
    }
}

/// Changed properties mapped to their current values.
pub type PropertyDiff = BTreeMap<Property, PropertyValue>;

/// An entity whose visual properties are tweened over time.
///
/// `Clone` copies everything including running tweens; use
/// [`AnimatedElement::snapshot`] for a value-only copy to diff against.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedElement {
    id: String,
    numbers: [f64; 7],
    colors: [Option<String>; 2],
    number_states: [Option<AnimationState<f64>>; 7],
    color_states: [Option<AnimationState<String>>; 2],
}

impl AnimatedElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            numbers: NumericProperty::ALL.map(NumericProperty::default_value),
            colors: [None, None],
            number_states: Default::default(),
            color_states: Default::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_number(mut self, property: NumericProperty, value: f64) -> Self {
        self.set_number(property, value);
        self
    }

    pub fn with_color(mut self, property: ColorProperty, value: impl Into<String>) -> Self {
        self.set_color(property, Some(value.into()));
        self
    }

    pub fn with_number_animation(
        mut self,
        property: NumericProperty,
        state: AnimationState<f64>,
    ) -> Self {
        self.animate_number(property, state);
        self
    }

    pub fn with_color_animation(
        mut self,
        property: ColorProperty,
        state: AnimationState<String>,
    ) -> Self {
        self.animate_color(property, state);
        self
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    pub fn number(&self, property: NumericProperty) -> f64 {
        self.numbers[property.index()]
    }

    pub fn color_of(&self, property: ColorProperty) -> Option<&str> {
        self.colors[property.index()].as_deref()
    }

    pub fn offset_x(&self) -> f64 {
        self.number(NumericProperty::OffsetX)
    }

    pub fn offset_y(&self) -> f64 {
        self.number(NumericProperty::OffsetY)
    }

    pub fn scale_x(&self) -> f64 {
        self.number(NumericProperty::ScaleX)
    }

    pub fn scale_y(&self) -> f64 {
        self.number(NumericProperty::ScaleY)
    }

    pub fn rotation(&self) -> f64 {
        self.number(NumericProperty::Rotation)
    }

    pub fn opacity(&self) -> f64 {
        self.number(NumericProperty::Opacity)
    }

    pub fn value(&self) -> f64 {
        self.number(NumericProperty::Value)
    }

    pub fn color(&self) -> Option<&str> {
        self.color_of(ColorProperty::Color)
    }

    pub fn background_color(&self) -> Option<&str> {
        self.color_of(ColorProperty::BackgroundColor)
    }

    /// Write a value directly, dropping any tween on that property.
    pub fn set_number(&mut self, property: NumericProperty, value: f64) {
        self.number_states[property.index()] = None;
        self.numbers[property.index()] = value;
    }

    /// Write a color directly, dropping any tween on that property.
    pub fn set_color(&mut self, property: ColorProperty, value: Option<String>) {
        self.color_states[property.index()] = None;
        self.colors[property.index()] = value;
    }

    // ------------------------------------------------------------------
    // Tweens
    // ------------------------------------------------------------------

    pub fn number_state(&self, property: NumericProperty) -> Option<&AnimationState<f64>> {
        self.number_states[property.index()].as_ref()
    }

    pub fn number_state_mut(
        &mut self,
        property: NumericProperty,
    ) -> Option<&mut AnimationState<f64>> {
        self.number_states[property.index()].as_mut()
    }

    pub fn color_state(&self, property: ColorProperty) -> Option<&AnimationState<String>> {
        self.color_states[property.index()].as_ref()
    }

    pub fn color_state_mut(
        &mut self,
        property: ColorProperty,
    ) -> Option<&mut AnimationState<String>> {
        self.color_states[property.index()].as_mut()
    }

    /// Drive a numeric property with a tween, replacing any previous one.
    pub fn animate_number(&mut self, property: NumericProperty, state: AnimationState<f64>) {
        self.number_states[property.index()] = Some(state);
    }

    /// Drive a color property with a tween, replacing any previous one.
    pub fn animate_color(&mut self, property: ColorProperty, state: AnimationState<String>) {
        self.color_states[property.index()] = Some(state);
    }

    /// Drop every tween, leaving values where they are.
    pub fn clear_animations(&mut self) {
        self.number_states = Default::default();
        self.color_states = Default::default();
    }

    pub fn has_animations(&self) -> bool {
        self.number_states.iter().any(Option::is_some)
            || self.color_states.iter().any(Option::is_some)
    }

    /// True when every tween on this element has reached its end value.
    pub fn is_settled(&self, now: Millis) -> bool {
        self.number_states
            .iter()
            .flatten()
            .all(|s| s.is_settled(now))
            && self.color_states.iter().flatten().all(|s| s.is_settled(now))
    }

    /// Advance every tweened property to `now`.
    ///
    /// Properties without a tween are left untouched.
    pub fn update(&mut self, now: Millis) {
        for (value, state) in self.numbers.iter_mut().zip(&self.number_states) {
            if let Some(state) = state {
                *value = state.interpolate(now, &NumberInterpolator);
            }
        }
        for (value, state) in self.colors.iter_mut().zip(&self.color_states) {
            if let Some(state) = state {
                *value = Some(state.interpolate(now, &ColorInterpolator));
            }
        }
    }

    // ------------------------------------------------------------------
    // Diffing
    // ------------------------------------------------------------------

    /// Properties whose value differs from `previous`.
    ///
    /// Numbers compare with exact inequality. Colors are only reported when
    /// both sides are non-empty and textually different, so a color
    /// appearing or disappearing is not reported.
    pub fn diff(&self, previous: &AnimatedElement) -> PropertyDiff {
        let mut diff = PropertyDiff::new();

        for property in NumericProperty::ALL {
            let current = self.number(property);
            if current != previous.number(property) {
                diff.insert(property.into(), PropertyValue::Number(current));
            }
        }

        for property in ColorProperty::ALL {
            let current = self.color_of(property).filter(|c| !c.is_empty());
            let before = previous.color_of(property).filter(|c| !c.is_empty());
            if let (Some(current), Some(before)) = (current, before) {
                if current != before {
                    diff.insert(property.into(), PropertyValue::Color(current.to_string()));
                }
            }
        }

        diff
    }

    /// Every property with a value, for a receiver that has seen nothing yet.
    pub fn full_diff(&self) -> PropertyDiff {
        let mut diff: PropertyDiff = NumericProperty::ALL
            .iter()
            .map(|p| (Property::from(*p), PropertyValue::Number(self.number(*p))))
            .collect();
        for property in ColorProperty::ALL {
            if let Some(color) = self.color_of(property).filter(|c| !c.is_empty()) {
                diff.insert(property.into(), PropertyValue::Color(color.to_string()));
            }
        }
        diff
    }

    /// Value-only copy of this element, without tweens.
    pub fn snapshot(&self) -> AnimatedElement {
        Self {
            id: self.id.clone(),
            numbers: self.numbers,
            colors: self.colors.clone(),
            number_states: Default::default(),
            color_states: Default::default(),
        }
    }
}
