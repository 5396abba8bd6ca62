//! End-to-end ticking scenarios through the public API.

use rune_anim::{
    AnimatedElement, AnimatedElementGroup, AnimationEngine, AnimationState, ColorProperty,
    EasingCurve, EasingFunction, EasingMode, EngineConfig, EngineState, GridLayout,
    JsonAnimatedElement, LayoutSettings, LayoutStrategy, NumericProperty, RadialLayout,
    StackLayout, decode_batch, encode_batch,
};

const T0: f64 = 10_000.0;

fn linear() -> EasingCurve {
    EasingCurve::new(EasingFunction::Linear, EasingMode::InOut)
}

fn quick_settings() -> LayoutSettings {
    LayoutSettings {
        duration: 200.0,
        curve: linear(),
        width: 400.0,
        height: 400.0,
        ..LayoutSettings::default()
    }
}

fn record<'a>(batch: &'a [JsonAnimatedElement], id: &str) -> Option<&'a JsonAnimatedElement> {
    batch.iter().find(|r| r.id == id)
}

#[test]
fn linear_slide_reports_progress_then_stops() {
    let mut engine = AnimationEngine::new();
    let element = AnimatedElement::new("slider").with_number_animation(
        NumericProperty::OffsetX,
        AnimationState::new(0.0, 100.0, T0, 1000.0, linear()),
    );
    engine.register(element).unwrap();

    // At the start time the value equals what was registered.
    assert!(engine.update(T0).is_empty());
    assert_eq!(engine.element("slider").unwrap().offset_x(), 0.0);

    let mid = engine.update(T0 + 500.0);
    assert_eq!(record(&mid, "slider").and_then(|r| r.offset_x), Some(50.0));

    let end = engine.update(T0 + 1000.0);
    assert_eq!(record(&end, "slider").and_then(|r| r.offset_x), Some(100.0));

    assert!(engine.update(T0 + 2000.0).is_empty());
    assert_eq!(engine.element("slider").unwrap().offset_x(), 100.0);
}

#[test]
fn unchanged_element_is_silent_on_second_tick() {
    let mut engine = AnimationEngine::new();
    engine
        .register(AnimatedElement::new("idle").with_number(NumericProperty::Value, 3.0))
        .unwrap();

    assert!(engine.update(T0).is_empty());
    assert!(engine.update(T0 + 16.0).is_empty());
}

#[test]
fn duplicate_id_keeps_one_entry_and_one_snapshot() {
    let mut engine = AnimationEngine::new();
    assert!(engine.register(AnimatedElement::new("dup")).unwrap());
    assert!(!engine.register(AnimatedElement::new("dup")).unwrap());

    assert_eq!(engine.get_all(), vec!["dup".to_string()]);
    assert_eq!(engine.elements().len(), 1);
    assert!(engine.snapshot("dup").is_some());
}

#[test]
fn group_cap_only_touches_displayed_prefix() {
    let mut engine = AnimationEngine::new();
    let members = (0..5).map(|i| {
        AnimatedElement::new(format!("item-{i}")).with_number_animation(
            NumericProperty::Opacity,
            AnimationState::new(1.0, 0.0, T0, 100.0, linear()),
        )
    });
    let gid = engine
        .register_group(AnimatedElementGroup::new().with_max_displayed(2).with_elements(members))
        .unwrap();

    let batch = engine.update(T0 + 100.0);
    let mut ids: Vec<&str> = batch.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["item-0", "item-1"]);

    let group = engine.group(gid).unwrap();
    for hidden in &group.elements()[2..] {
        assert_eq!(hidden.opacity(), 1.0);
        assert_eq!(engine.snapshot(hidden.id()).unwrap().opacity(), 1.0);
    }
}

#[test]
fn color_tween_ends_on_target_value() {
    let mut engine = AnimationEngine::new();
    let element = AnimatedElement::new("swatch")
        .with_color(ColorProperty::BackgroundColor, "#000000")
        .with_color_animation(
            ColorProperty::BackgroundColor,
            AnimationState::new("#000000".to_string(), "white".to_string(), T0, 100.0, linear()),
        );
    engine.register(element).unwrap();

    let end = engine.update(T0 + 100.0);
    let swatch = record(&end, "swatch").unwrap();
    assert_eq!(swatch.background_color.as_deref(), Some("white"));
    assert_eq!(swatch.offset_x, None);

    let json = encode_batch(&end).unwrap();
    assert_eq!(json, r#"[{"id":"swatch","bc":"white"}]"#);
}

#[test]
fn mid_color_is_blended() {
    let mut engine = AnimationEngine::new();
    let element = AnimatedElement::new("fade")
        .with_color(ColorProperty::Color, "#000000")
        .with_color_animation(
            ColorProperty::Color,
            AnimationState::new("#000000".to_string(), "#ffffff".to_string(), T0, 100.0, linear()),
        );
    engine.register(element).unwrap();

    let batch = engine.update(T0 + 50.0);
    let color = record(&batch, "fade").and_then(|r| r.color.clone()).unwrap();
    assert!(color.starts_with('#'));
    assert_ne!(color, "#000000");
    assert_ne!(color, "#ffffff");
}

#[test]
fn receiver_rebuilds_state_from_patches() {
    let mut engine = AnimationEngine::new();
    engine.set_layout(Some(Box::new(
        StackLayout::new(30.0, 10.0).with_settings(quick_settings()),
    )));
    for i in 0..4 {
        engine.register(AnimatedElement::new(format!("row-{i}"))).unwrap();
    }

    let mut mirror: Vec<AnimatedElement> =
        engine.elements().iter().map(AnimatedElement::snapshot).collect();

    for step in 0..=4 {
        let wire = encode_batch(&engine.update(T0 + step as f64 * 50.0)).unwrap();
        for patch in decode_batch(&wire).unwrap() {
            let target = mirror.iter_mut().find(|e| e.id() == patch.id).unwrap();
            patch.apply_to(target);
        }
    }

    for (sent, live) in mirror.iter().zip(engine.elements()) {
        assert_eq!(sent.offset_y(), live.offset_y());
    }
    assert_eq!(mirror[3].offset_y(), 120.0);
    assert!(!engine.has_active_animations(T0 + 200.0));
}

#[test]
fn group_layout_overrides_engine_default() {
    let mut engine = AnimationEngine::new();
    engine.set_layout(Some(Box::new(
        StackLayout::new(10.0, 0.0).with_settings(LayoutSettings {
            immediate: true,
            ..quick_settings()
        }),
    )));

    let mut grid = GridLayout::new(2).with_settings(quick_settings());
    grid.set_immediate(true);
    let grid_group = AnimatedElementGroup::new()
        .with_layout(grid)
        .with_elements((0..3).map(|i| AnimatedElement::new(format!("cell-{i}"))));
    let plain_group = AnimatedElementGroup::new()
        .with_elements((0..2).map(|i| AnimatedElement::new(format!("plain-{i}"))));

    engine.register_group(grid_group).unwrap();
    engine.register_group(plain_group).unwrap();

    let batch = engine.update(T0);
    let cell = record(&batch, "cell-1").unwrap();
    assert_eq!(cell.offset_x, Some(200.0));
    let cell = record(&batch, "cell-2").unwrap();
    assert_eq!(cell.offset_x, None);
    assert_eq!(cell.offset_y, Some(200.0));

    // Group without a layout of its own falls back to the engine's.
    assert_eq!(record(&batch, "plain-1").and_then(|r| r.offset_y), Some(10.0));
    assert!(record(&batch, "plain-0").is_none());
}

#[test]
fn radial_layout_settles_on_circle() {
    let mut engine = AnimationEngine::new();
    let radial = RadialLayout::new(0.0).with_settings(quick_settings());
    engine
        .register_group(
            AnimatedElementGroup::new()
                .with_layout(radial)
                .with_elements((0..4).map(|i| AnimatedElement::new(format!("petal-{i}")))),
        )
        .unwrap();

    engine.update(T0);
    engine.update(T0 + 200.0);

    let ids = engine.get_all();
    assert_eq!(ids.len(), 4);
    for id in &ids {
        let petal = engine.element(id).unwrap();
        let dx = petal.offset_x() - 200.0;
        let dy = petal.offset_y() - 200.0;
        assert!(((dx * dx + dy * dy).sqrt() - 200.0).abs() < 1e-6);
    }
}

#[test]
fn lifecycle_is_independent_of_ticking() {
    let mut engine = AnimationEngine::with_config(EngineConfig {
        parallel: false,
        ..EngineConfig::default()
    });
    engine
        .register(AnimatedElement::new("a").with_number_animation(
            NumericProperty::Rotation,
            AnimationState::new(0.0, 90.0, T0, 100.0, linear()),
        ))
        .unwrap();

    engine.start();
    engine.update(T0 + 50.0);
    engine.pause();
    let paused = engine.update(T0 + 100.0);
    assert_eq!(paused.len(), 1);

    if !engine.has_active_animations(T0 + 100.0) {
        engine.on_completed();
    }
    assert_eq!(engine.state(), EngineState::Completed);
    let states: Vec<EngineState> = engine.drain_events().into_iter().map(|c| c.current).collect();
    assert_eq!(
        states,
        [EngineState::Running, EngineState::Paused, EngineState::Completed]
    );
}

#[test]
fn large_tick_runs_in_parallel() {
    let mut engine = AnimationEngine::with_config(EngineConfig {
        max_displayed_items: 1_000,
        parallel: true,
        parallel_threshold: 8,
    });
    for i in 0..500 {
        engine
            .register(AnimatedElement::new(format!("p{i}")).with_number_animation(
                NumericProperty::ScaleX,
                AnimationState::new(1.0, 2.0, T0, 100.0, linear()),
            ))
            .unwrap();
    }

    let batch = engine.update(T0 + 100.0);
    assert_eq!(batch.len(), 500);
    assert!(batch.iter().all(|r| r.scale_x == Some(2.0) && r.scale_y.is_none()));
    assert!(engine.update(T0 + 100.0).is_empty());
}
