//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use walkmap::{Line, RenderSummary, WalkConfig};

/// Output format for drawn segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}

/// A drawn line in JSON output.
#[derive(Serialize)]
pub struct JsonLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
}

/// JSON output: the resolved config plus every drawn line.
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub config: &'a WalkConfig,
    pub features: usize,
    pub generated: usize,
    pub dropped: usize,
    pub lines: Vec<JsonLine>,
}

impl<'a> JsonOutput<'a> {
    pub fn new(
        config: &'a WalkConfig,
        features: usize,
        generated: usize,
        summary: RenderSummary,
        drawn: Vec<(Line, String)>,
    ) -> Self {
        let lines = drawn
            .into_iter()
            .map(|(line, stroke)| JsonLine {
                x1: line.x1,
                y1: line.y1,
                x2: line.x2,
                y2: line.y2,
                stroke,
            })
            .collect();
        Self {
            config,
            features,
            generated,
            dropped: summary.dropped,
            lines,
        }
    }
}

/// Read an input file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read SVG from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Scale a `min-x min-y width height` viewBox to match a zoom factor.
///
/// Missing or malformed viewBoxes fall back to a square 1000 units wide.
pub fn scaled_viewbox(view_box: Option<&str>, zoom: f64) -> String {
    let numbers: Option<Vec<f64>> = view_box.map(|vb| {
        vb.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect()
    });

    match numbers.as_deref() {
        Some([x, y, w, h]) => format!("{} {} {} {}", x * zoom, y * zoom, w * zoom, h * zoom),
        _ => "0 0 1000 1000".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewbox_scales_with_zoom() {
        assert_eq!(scaled_viewbox(Some("0 0 200 100"), 2.0), "0 0 400 200");
        assert_eq!(scaled_viewbox(Some("10,5, 20,20"), 1.0), "10 5 20 20");
    }

    #[test]
    fn viewbox_fallback() {
        assert_eq!(scaled_viewbox(None, 3.0), "0 0 1000 1000");
        assert_eq!(scaled_viewbox(Some("0 0 wide"), 1.0), "0 0 1000 1000");
    }
}
