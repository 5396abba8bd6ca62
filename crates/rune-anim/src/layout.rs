//! Layout strategies.
//!
//! A [`LayoutStrategy`] decides where each displayed element is heading. The
//! engine calls it once per tick, right before advancing and diffing:
//!
//! ```text
//! apply_start_time(now)   anchor tweens created this tick at `now`
//! apply_layout(elements)  assign or refresh per-property tweens
//! ```
//!
//! Strategies only create a tween when an element's target changes, so an
//! element that is already heading to (or sitting at) its slot keeps its
//! running tween. With `immediate` set, values are written directly and no
//! tween is created.

use serde::{Deserialize, Serialize};

use crate::easing::{EasingCurve, EasingFunction, EasingMode};
use crate::element::{AnimatedElement, NumericProperty};
use crate::state::{AnimationState, Millis};

/// Timing and container settings shared by every layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Tween duration in milliseconds.
    pub duration: Millis,
    pub curve: EasingCurve,
    /// Write targets directly instead of tweening.
    pub immediate: bool,
    pub width: f64,
    pub height: f64,
    /// Start time given to tweens created by the next layout pass.
    pub start_time: Millis,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            duration: 300.0,
            curve: EasingCurve::new(EasingFunction::Cubic, EasingMode::Out),
            immediate: false,
            width: 0.0,
            height: 0.0,
            start_time: 0.0,
        }
    }
}

/// Assigns target tweens to an ordered list of elements.
pub trait LayoutStrategy: Send {
    /// Assign or refresh each element's tweens.
    fn apply_layout(&mut self, elements: &mut [AnimatedElement]);

    fn settings(&self) -> &LayoutSettings;

    fn settings_mut(&mut self) -> &mut LayoutSettings;

    /// Anchor tweens created from now on at `now`.
    fn apply_start_time(&mut self, now: Millis) {
        self.settings_mut().start_time = now;
    }

    fn set_dimensions(&mut self, width: f64, height: f64) {
        let settings = self.settings_mut();
        settings.width = width;
        settings.height = height;
    }

    fn immediate(&self) -> bool {
        self.settings().immediate
    }

    fn set_immediate(&mut self, immediate: bool) {
        self.settings_mut().immediate = immediate;
    }

    fn duration(&self) -> Millis {
        self.settings().duration
    }

    fn easing_function(&self) -> EasingFunction {
        self.settings().curve.function
    }

    fn easing_mode(&self) -> EasingMode {
        self.settings().curve.mode
    }
}

/// Move `property` toward `target` according to `settings`.
///
/// A running tween that already ends at `target` is left alone; otherwise a
/// new tween starts from the current value.
pub fn retarget(
    element: &mut AnimatedElement,
    property: NumericProperty,
    target: f64,
    settings: &LayoutSettings,
) {
    let current = element.number(property);

    if settings.immediate {
        if current != target || element.number_state(property).is_some() {
            element.set_number(property, target);
        }
        return;
    }

    match element.number_state_mut(property) {
        Some(state) if *state.end_value() == target => {}
        Some(state) => state.apply(
            current,
            target,
            settings.start_time,
            settings.duration,
            settings.curve,
        ),
        None if current == target => {}
        None => element.animate_number(
            property,
            AnimationState::new(
                current,
                target,
                settings.start_time,
                settings.duration,
                settings.curve,
            ),
        ),
    }
}

/// A vertical list: element `i` sits `i * (item_height + spacing)` down.
#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    pub settings: LayoutSettings,
    pub item_height: f64,
    pub spacing: f64,
}

impl StackLayout {
    pub fn new(item_height: f64, spacing: f64) -> Self {
        Self {
            settings: LayoutSettings::default(),
            item_height,
            spacing,
        }
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl LayoutStrategy for StackLayout {
    fn apply_layout(&mut self, elements: &mut [AnimatedElement]) {
        let pitch = self.item_height + self.spacing;
        for (i, element) in elements.iter_mut().enumerate() {
            retarget(element, NumericProperty::OffsetX, 0.0, &self.settings);
            retarget(element, NumericProperty::OffsetY, i as f64 * pitch, &self.settings);
        }
    }

    fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut LayoutSettings {
        &mut self.settings
    }
}

/// Row-major cells, `columns` per row, splitting the container width.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub settings: LayoutSettings,
    pub columns: usize,
    /// Row height; square cells when `None`.
    pub row_height: Option<f64>,
}

impl GridLayout {
    pub fn new(columns: usize) -> Self {
        Self {
            settings: LayoutSettings::default(),
            columns: columns.max(1),
            row_height: None,
        }
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = Some(row_height);
        self
    }

    fn cell_size(&self) -> (f64, f64) {
        let width = self.settings.width / self.columns as f64;
        (width, self.row_height.unwrap_or(width))
    }
}

impl LayoutStrategy for GridLayout {
    fn apply_layout(&mut self, elements: &mut [AnimatedElement]) {
        let (cell_w, cell_h) = self.cell_size();
        for (i, element) in elements.iter_mut().enumerate() {
            let col = (i % self.columns) as f64;
            let row = (i / self.columns) as f64;
            retarget(element, NumericProperty::OffsetX, col * cell_w, &self.settings);
            retarget(element, NumericProperty::OffsetY, row * cell_h, &self.settings);
        }
    }

    fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut LayoutSettings {
        &mut self.settings
    }
}

/// Elements evenly spaced on a circle centred in the container, each
/// rotated to face outward.
#[derive(Debug, Clone, Default)]
pub struct RadialLayout {
    pub settings: LayoutSettings,
    /// Gap between the circle and the container edge.
    pub padding: f64,
    /// Angle of the first element, in degrees.
    pub start_angle: f64,
}

impl RadialLayout {
    pub fn new(padding: f64) -> Self {
        Self {
            settings: LayoutSettings::default(),
            padding,
            start_angle: -90.0,
        }
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }

    fn radius(&self) -> f64 {
        (self.settings.width.min(self.settings.height) / 2.0 - self.padding).max(0.0)
    }
}

impl LayoutStrategy for RadialLayout {
    fn apply_layout(&mut self, elements: &mut [AnimatedElement]) {
        if elements.is_empty() {
            return;
        }
        let cx = self.settings.width / 2.0;
        let cy = self.settings.height / 2.0;
        let radius = self.radius();
        let step = 360.0 / elements.len() as f64;

        for (i, element) in elements.iter_mut().enumerate() {
            let angle = self.start_angle + i as f64 * step;
            let rad = angle.to_radians();
            retarget(element, NumericProperty::OffsetX, cx + radius * rad.cos(), &self.settings);
            retarget(element, NumericProperty::OffsetY, cy + radius * rad.sin(), &self.settings);
            retarget(element, NumericProperty::Rotation, angle + 90.0, &self.settings);
        }
    }

    fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut LayoutSettings {
        &mut self.settings
    }
}
