//! Rune Motion configuration system
//!
//! This crate provides centralized configuration for the motion driver,
//! loading settings from `rune-motion.toml` with environment variable
//! overrides on top.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rune_anim::{
    EasingCurve, EngineConfig, GridLayout, LayoutSettings, LayoutStrategy, RadialLayout,
    StackLayout,
};
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "rune-motion.toml";

/// Main configuration structure for Rune Motion
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Engine tunables
    pub engine: EngineSection,
    /// Default layout for ungrouped elements and groups
    pub layout: LayoutConfig,
    /// Simulated workload for the driver binary
    pub demo: DemoConfig,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSection {
    /// Ungrouped elements displayed per tick
    pub max_displayed_items: usize,
    /// Evaluate elements on the rayon pool
    pub parallel: bool,
    /// Minimum number of displayed elements before fanning out
    pub parallel_threshold: usize,
}

/// Which built-in layout to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Stack,
    Grid,
    Radial,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stack => "stack",
            Self::Grid => "grid",
            Self::Radial => "radial",
        };
        f.write_str(name)
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stack" | "list" => Ok(Self::Stack),
            "grid" => Ok(Self::Grid),
            "radial" | "dial" => Ok(Self::Radial),
            other => Err(format!("Unknown layout kind: {}", other)),
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub kind: LayoutKind,
    /// Tween duration in milliseconds
    pub duration_ms: f64,
    /// Easing family name (e.g. "cubic", "quint", "elastic")
    pub easing: String,
    /// Easing mode name ("in", "out", "in-out")
    pub mode: String,
    /// Write targets directly instead of tweening
    pub immediate: bool,
    /// Container width in pixels
    pub width: f64,
    /// Container height in pixels
    pub height: f64,
    /// Stack row height
    pub item_height: f64,
    /// Gap between stack rows
    pub spacing: f64,
    /// Grid column count
    pub columns: usize,
    /// Radial inset from the container edge
    pub padding: f64,
}

/// Driver workload configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Ungrouped elements to register
    pub elements: usize,
    /// Ticks to simulate
    pub ticks: usize,
    /// Simulated time between ticks in milliseconds
    pub frame_ms: f64,
    /// Members of the demo group (0 disables the group)
    pub group_size: usize,
    /// Display cap of the demo group
    pub group_max_displayed: Option<usize>,
}

impl Default for EngineSection {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            max_displayed_items: engine.max_displayed_items,
            parallel: engine.parallel,
            parallel_threshold: engine.parallel_threshold,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Stack,
            duration_ms: 300.0,
            easing: "cubic".to_string(),
            mode: "out".to_string(),
            immediate: false,
            width: 800.0,
            height: 600.0,
            item_height: 40.0,
            spacing: 8.0,
            columns: 3,
            padding: 24.0,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            elements: 12,
            ticks: 40,
            frame_ms: 16.0,
            group_size: 6,
            group_max_displayed: Some(4),
        }
    }
}

impl EngineSection {
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_displayed_items: self.max_displayed_items,
            parallel: self.parallel,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

impl LayoutConfig {
    /// Resolve the configured easing names.
    pub fn curve(&self) -> rune_anim::Result<EasingCurve> {
        EasingCurve::parse(&self.easing, &self.mode)
    }

    pub fn settings(&self) -> rune_anim::Result<LayoutSettings> {
        Ok(LayoutSettings {
            duration: self.duration_ms,
            curve: self.curve()?,
            immediate: self.immediate,
            width: self.width,
            height: self.height,
            start_time: 0.0,
        })
    }

    /// Construct the configured layout strategy.
    pub fn build(&self) -> rune_anim::Result<Box<dyn LayoutStrategy>> {
        let settings = self.settings()?;
        let layout: Box<dyn LayoutStrategy> = match self.kind {
            LayoutKind::Stack => {
                Box::new(StackLayout::new(self.item_height, self.spacing).with_settings(settings))
            }
            LayoutKind::Grid => Box::new(GridLayout::new(self.columns).with_settings(settings)),
            LayoutKind::Radial => Box::new(RadialLayout::new(self.padding).with_settings(settings)),
        };
        Ok(layout)
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl MotionConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune-motion.toml configuration file
    ///
    /// # Returns
    /// * `Ok(MotionConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (rune-motion.toml in the
    /// current directory) or return default configuration if it doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Engine settings
        if let Ok(val) = std::env::var("MOTION_MAX_DISPLAYED") {
            if let Ok(max) = val.parse::<usize>() {
                self.engine.max_displayed_items = max;
            }
        }
        if let Ok(val) = std::env::var("MOTION_PARALLEL") {
            self.engine.parallel = parse_flag(&val);
        }

        // Layout settings
        if let Ok(val) = std::env::var("MOTION_LAYOUT") {
            if let Ok(kind) = val.parse::<LayoutKind>() {
                self.layout.kind = kind;
            }
        }
        if let Ok(val) = std::env::var("MOTION_IMMEDIATE") {
            self.layout.immediate = parse_flag(&val);
        }

        // Demo settings
        if let Ok(val) = std::env::var("MOTION_TICKS") {
            if let Ok(ticks) = val.parse::<usize>() {
                self.demo.ticks = ticks;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune-motion.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
