//! Presets command implementation.

use walkmap::Preset;

/// Print every built-in preset with its settings.
pub fn cmd_presets() {
    println!("Available presets:");
    for preset in Preset::all() {
        let config = preset.config();
        println!(
            "  {:<12} density {:<5} scale {:<5} cutoff {}",
            preset.name(),
            config.density,
            config.scale,
            config.cutoff_area
        );
    }
}
