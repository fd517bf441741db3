//! Walk command implementation.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Args;
use tracing::{Level, event};

use walkmap::{
    Affine, Line, Preset, Scheduler, SvgSurface, extract_features_from_svg, extract_viewbox,
    generate,
};

use super::common::{JsonOutput, OutputFormat, read_input, scaled_viewbox};
use super::config::{ConfigOverrides, load_overrides, resolve};

#[derive(Args, Debug)]
pub struct WalkArgs {
    /// SVG file with the map polygons (`-` reads stdin)
    pub svg: PathBuf,

    /// Start from a built-in region preset
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// YAML or JSON file with walk settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Steps per unit of polygon area
    #[arg(long)]
    pub density: Option<f64>,

    /// Maximum step length
    #[arg(long)]
    pub scale: Option<f64>,

    /// Skip polygons with a smaller area
    #[arg(long)]
    pub cutoff_area: Option<f64>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Display units per SVG unit
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f64,

    /// Pause before segments are drawn, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl WalkArgs {
    fn flag_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            preset: None,
            density: self.density,
            scale: self.scale,
            cutoff_area: self.cutoff_area,
            seed: self.seed,
        }
    }
}

/// Execute the walk command.
pub fn cmd_walk(args: &WalkArgs) -> anyhow::Result<()> {
    if !(args.zoom.is_finite() && args.zoom > 0.0) {
        anyhow::bail!("--zoom must be a positive number, got {}", args.zoom);
    }

    let svg_content = read_input(&args.svg)?;
    let features = extract_features_from_svg(&svg_content)
        .with_context(|| format!("Failed to load polygons from {}", args.svg.display()))?;

    let file = args.config.as_deref().map(load_overrides).transpose()?;
    let config = resolve(args.preset, file.as_ref(), &args.flag_overrides())?;

    event!(
        Level::INFO,
        "Walking [{}] features (density {}, scale {}, cutoff {})",
        features.len(),
        config.density,
        config.scale,
        config.cutoff_area
    );

    let start = Instant::now();
    let projection = Affine::zoom(args.zoom);
    let mut rng = config.rng();
    let segments = generate(&features, &projection, &config, &mut rng);
    event!(
        Level::INFO,
        "Generated [{}] segments in {:.2}ms",
        segments.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let schedule = Scheduler::new(Duration::from_millis(args.delay_ms)).schedule(segments.iter().copied());

    let rendered = match args.format {
        OutputFormat::Svg => {
            let view_box = scaled_viewbox(extract_viewbox(&svg_content).as_deref(), args.zoom);
            let mut surface = SvgSurface::new(view_box).with_stroke_width(0.5 * args.zoom);
            let summary = schedule.run_to_end(&mut surface);
            event!(Level::INFO, "Drew [{}] lines", summary.drawn);
            surface.into_document()
        }
        OutputFormat::Json => {
            let mut surface: Vec<(Line, String)> = Vec::new();
            let summary = schedule.run_to_end(&mut surface);
            event!(Level::INFO, "Drew [{}] lines", summary.drawn);
            let output = JsonOutput::new(&config, features.len(), segments.len(), summary, surface);
            serde_json::to_string_pretty(&output)?
        }
    };

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
