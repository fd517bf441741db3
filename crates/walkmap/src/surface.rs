//! Drawing surfaces that walks are rendered onto.
//!
//! A surface only ever grows: each call appends one line primitive.

use std::fmt::Write as _;

use crate::geometry::Line;

/// Something that accepts straight line primitives.
pub trait Surface {
    /// Append one line with the given stroke colour.
    fn append_line(&mut self, line: Line, stroke: &str);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn append_line(&mut self, line: Line, stroke: &str) {
        (**self).append_line(line, stroke)
    }
}

/// Records every append, mostly useful for tests and JSON output.
impl Surface for Vec<(Line, String)> {
    fn append_line(&mut self, line: Line, stroke: &str) {
        self.push((line, stroke.to_string()));
    }
}

/// Builds an SVG document out of `<line>` elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    view_box: String,
    stroke_width: f64,
    body: String,
    count: usize,
}

impl SvgSurface {
    pub fn new(view_box: impl Into<String>) -> Self {
        Self {
            view_box: view_box.into(),
            stroke_width: 0.5,
            body: String::new(),
            count: 0,
        }
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Number of lines appended so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Finish the document.
    pub fn into_document(self) -> String {
        let mut svg = String::with_capacity(self.body.len() + 256);
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}">
<g stroke-width="{}" stroke-linecap="round" fill="none">
"#,
            self.view_box, self.stroke_width
        ));
        svg.push_str(&self.body);
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn append_line(&mut self, line: Line, stroke: &str) {
        // Writing to a String can't fail
        let _ = writeln!(
            self.body,
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\"/>",
            line.x1, line.y1, line.x2, line.y2, stroke
        );
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_surface_writes_lines() {
        let mut surface = SvgSurface::new("0 0 200 200");
        assert!(surface.is_empty());
        surface.append_line(Line::new(1.0, 2.0, 3.0, 4.5), "#3366cc");
        surface.append_line(Line::new(0.0, 0.0, 0.0, 0.0), "#dc3912");
        assert_eq!(surface.len(), 2);

        let doc = surface.into_document();
        assert!(doc.contains(r#"viewBox="0 0 200 200""#));
        assert!(doc.contains(
            r##"<line x1="1.00" y1="2.00" x2="3.00" y2="4.50" stroke="#3366cc"/>"##
        ));
        assert_eq!(doc.matches("<line").count(), 2);
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn recording_surface_through_reference() {
        fn draw<S: Surface>(mut surface: S) {
            surface.append_line(Line::new(0.0, 0.0, 1.0, 0.0), "red");
        }

        let mut recorded: Vec<(Line, String)> = Vec::new();
        draw(&mut recorded);
        assert_eq!(recorded, vec![(Line::new(0.0, 0.0, 1.0, 0.0), "red".to_string())]);
    }
}
