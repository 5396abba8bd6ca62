//! Time-driven property tweening with diff-only change propagation.
//!
//! This crate provides:
//! - **Easing**: the Penner curve table, ten families by three modes
//! - **Tweens**: [`AnimationState`] evaluates one property at a given time
//! - **Elements**: nine animatable properties per [`AnimatedElement`]
//! - **Layouts**: strategies that decide where displayed elements head
//! - **Engine**: advances everything per tick and emits only what changed
//!
//! # Architecture
//!
//! ```text
//! AnimationEngine
//!   ├── ungrouped elements ── default LayoutStrategy
//!   ├── AnimatedElementGroup* ── own or default LayoutStrategy
//!   └── snapshot store (id → last emitted AnimatedElement)
//!
//! update(now) ──▶ Vec<JsonAnimatedElement> ──▶ encode_batch ──▶ renderer
//! ```

pub mod easing;
pub mod element;
pub mod engine;
pub mod error;
pub mod events;
pub mod group;
pub mod interpolate;
pub mod layout;
pub mod state;
pub mod wire;

pub use easing::{EasingCurve, EasingFunction, EasingMode, ease};
pub use element::{
    AnimatedElement, ColorProperty, NumericProperty, Property, PropertyDiff, PropertyValue,
};
pub use engine::{AnimationEngine, EngineConfig};
pub use error::{AnimError, Result};
pub use events::{EngineState, ListenerId, StateChange};
pub use group::{AnimatedElementGroup, GroupId};
pub use interpolate::{ColorInterpolator, Interpolator, NumberInterpolator};
pub use layout::{GridLayout, LayoutSettings, LayoutStrategy, RadialLayout, StackLayout};
pub use state::{AnimationState, Millis};
pub use wire::{JsonAnimatedElement, decode_batch, encode_batch};
