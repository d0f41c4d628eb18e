//! Drawing surfaces.
//!
//! A [`Surface`] is a pixel-space 2D target with a handful of stroke primitives plus an
//! associated info (caption) region. The renderer never touches anything else.
//!
//! Two implementations ship with the crate:
//!
//! - [`Recorder`]: keeps the command list in memory (tests, headless hosts).
//! - [`SvgSurface`]: accumulates SVG elements and renders a standalone document.

use std::fmt::Write as _;

/// Stroke style in pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
}

/// A pixel-space drawing target.
///
/// Coordinates are pixels with the origin at the top-left corner and y growing downward.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self, width: f64, height: f64);

    fn line(&mut self, from: [f64; 2], to: [f64; 2], stroke: Stroke<'_>);

    /// Full circle outline.
    fn arc(&mut self, center: [f64; 2], radius: f64, stroke: Stroke<'_>);

    fn polyline(&mut self, points: &[[f64; 2]], closed: bool, stroke: Stroke<'_>);

    fn fill_text(&mut self, text: &str, at: [f64; 2], color: &str);

    /// Replace the caption shown next to the drawing.
    fn set_info(&mut self, text: &str);
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: String,
        width: f64,
    },
    Arc {
        center: [f64; 2],
        radius: f64,
        color: String,
        width: f64,
    },
    Polyline {
        points: Vec<[f64; 2]>,
        closed: bool,
        color: String,
        width: f64,
    },
    Text {
        text: String,
        at: [f64; 2],
        color: String,
    },
}

/// In-memory surface: the commands since the last `clear`, plus counters.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    info: String,
    clears: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn since the last `clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    /// Number of `clear` calls; every full redraw starts with exactly one.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// The most recent polyline, if any.
    pub fn last_polyline(&self) -> Option<&[[f64; 2]]> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.commands.clear();
        self.clears += 1;
    }

    fn line(&mut self, from: [f64; 2], to: [f64; 2], stroke: Stroke<'_>) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn arc(&mut self, center: [f64; 2], radius: f64, stroke: Stroke<'_>) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn polyline(&mut self, points: &[[f64; 2]], closed: bool, stroke: Stroke<'_>) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn fill_text(&mut self, text: &str, at: [f64; 2], color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            color: color.to_string(),
        });
    }

    fn set_info(&mut self, text: &str) {
        self.info.clear();
        self.info.push_str(text);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Surface that builds an SVG document.
///
/// Numbers are written with two decimals; that is well below a pixel and keeps files small.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
    info: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            info: String::new(),
        }
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    /// The full `<svg>` document for what is currently drawn.
    pub fn to_document(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut doc = String::with_capacity(self.body.len() + 256);
        // `write!` into a String cannot fail.
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#
        );
        if !self.info.is_empty() {
            let _ = writeln!(doc, "<desc>{}</desc>", escape_xml(&self.info));
        }
        doc.push_str(&self.body);
        doc.push_str("</svg>\n");
        doc
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
    }

    fn line(&mut self, from: [f64; 2], to: [f64; 2], stroke: Stroke<'_>) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            from[0],
            from[1],
            to[0],
            to[1],
            escape_xml(stroke.color),
            stroke.width
        );
    }

    fn arc(&mut self, center: [f64; 2], radius: f64, stroke: Stroke<'_>) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            center[0],
            center[1],
            radius,
            escape_xml(stroke.color),
            stroke.width
        );
    }

    fn polyline(&mut self, points: &[[f64; 2]], closed: bool, stroke: Stroke<'_>) {
        let tag = if closed { "polygon" } else { "polyline" };
        let mut pts = String::with_capacity(points.len() * 16);
        for (k, p) in points.iter().enumerate() {
            if k > 0 {
                pts.push(' ');
            }
            let _ = write!(pts, "{:.2},{:.2}", p[0], p[1]);
        }
        let _ = writeln!(
            self.body,
            r#"<{tag} points="{pts}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            escape_xml(stroke.color),
            stroke.width
        );
    }

    fn fill_text(&mut self, text: &str, at: [f64; 2], color: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" fill="{}" font-family="Inter, sans-serif" font-size="16">{}</text>"#,
            at[0],
            at[1],
            escape_xml(color),
            escape_xml(text)
        );
    }

    fn set_info(&mut self, text: &str) {
        self.info.clear();
        self.info.push_str(text);
    }
}
