/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune-motion.toml
    let config = rune_config::MotionConfig::load();

    println!("=== Rune Motion Configuration ===\n");

    println!("Engine Settings:");
    println!("  Max Displayed Items: {}", config.engine.max_displayed_items);
    println!("  Parallel: {}", config.engine.parallel);
    println!("  Parallel Threshold: {}", config.engine.parallel_threshold);
    println!();

    println!("Layout Settings:");
    println!("  Kind: {}", config.layout.kind);
    println!("  Duration: {} ms", config.layout.duration_ms);
    match config.layout.curve() {
        Ok(curve) => println!("  Easing: {} / {}", curve.function, curve.mode),
        Err(e) => println!("  Easing: invalid ({})", e),
    }
    println!("  Immediate: {}", config.layout.immediate);
    println!("  Container: {} x {}", config.layout.width, config.layout.height);
    println!();

    println!("Demo Settings:");
    println!("  Elements: {}", config.demo.elements);
    println!("  Ticks: {}", config.demo.ticks);
    println!("  Frame: {} ms", config.demo.frame_ms);
    println!("  Group Size: {}", config.demo.group_size);
    println!("  Group Max Displayed: {:?}", config.demo.group_max_displayed);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
