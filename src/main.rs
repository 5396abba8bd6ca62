use std::io::Write;

use anyhow::{Context, Result};
use log::info;
use rune_anim::{
    AnimatedElement, AnimatedElementGroup, AnimationEngine, AnimationState, ColorProperty,
    EngineState, NumericProperty, RadialLayout, encode_batch,
};
use rune_config::{LayoutKind, MotionConfig};

const PALETTE: [&str; 4] = ["#1e88e5", "#43a047", "#fb8c00", "#8e24aa"];

fn load_config() -> Result<MotionConfig> {
    let path = std::env::args().find_map(|a| a.strip_prefix("--config=").map(str::to_string));
    let mut config = match path {
        Some(path) => MotionConfig::load_from_file(&path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading {path}"))?,
        None => MotionConfig::load_or_default(),
    };
    config.merge_with_env();

    for arg in std::env::args() {
        if let Some(kind) = arg.strip_prefix("--layout=") {
            config.layout.kind = kind.parse::<LayoutKind>().map_err(anyhow::Error::msg)?;
        } else if arg == "--immediate" {
            config.layout.immediate = true;
        } else if arg == "--sequential" {
            config.engine.parallel = false;
        }
    }
    Ok(config)
}

/// An element that fades in while shifting from grey to its palette color.
fn demo_element(id: String, index: usize, config: &MotionConfig) -> Result<AnimatedElement> {
    let curve = config.layout.curve()?;
    let duration = config.layout.duration_ms * 2.0;
    let color = PALETTE[index % PALETTE.len()];
    Ok(AnimatedElement::new(id)
        .with_number(NumericProperty::Opacity, 0.0)
        .with_color(ColorProperty::BackgroundColor, "#9e9e9e")
        .with_number_animation(
            NumericProperty::Opacity,
            AnimationState::new(0.0, 1.0, 0.0, duration, curve),
        )
        .with_color_animation(
            ColorProperty::BackgroundColor,
            AnimationState::new("#9e9e9e".to_string(), color.to_string(), 0.0, duration, curve),
        ))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    info!(
        "layout={} easing={}/{} elements={} ticks={}",
        config.layout.kind,
        config.layout.easing,
        config.layout.mode,
        config.demo.elements,
        config.demo.ticks
    );

    let mut engine = AnimationEngine::with_config(config.engine.to_engine_config());
    engine.set_layout(Some(config.layout.build()?));
    engine.subscribe(|change| info!("engine {} -> {}", change.previous, change.current));

    for i in 0..config.demo.elements {
        engine.register(demo_element(format!("item-{i}"), i, &config)?)?;
    }

    if config.demo.group_size > 0 {
        let dial = RadialLayout::new(config.layout.padding).with_settings(config.layout.settings()?);
        let mut members = Vec::with_capacity(config.demo.group_size);
        for i in 0..config.demo.group_size {
            members.push(demo_element(format!("dial-{i}"), i, &config)?);
        }
        let mut group = AnimatedElementGroup::new().with_layout(dial).with_elements(members);
        group.set_max_displayed(config.demo.group_max_displayed);
        engine.register_group(group)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    engine.start();
    let mut now = 0.0;
    for tick in 0..config.demo.ticks {
        now = tick as f64 * config.demo.frame_ms;
        let batch = engine.update(now);
        if !batch.is_empty() {
            writeln!(out, "{}", encode_batch(&batch)?)?;
        }
        if !engine.has_active_animations(now) {
            engine.on_completed();
            break;
        }
    }

    if engine.state() == EngineState::Running {
        engine.stop();
    }
    info!("finished at {now} ms with {} tracked elements", engine.get_all().len());
    Ok(())
}
