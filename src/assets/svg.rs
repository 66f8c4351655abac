//! Minimal SVG markup builder with deterministic number formatting.

use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Append a coordinate: integers without a fraction, everything else with
/// the shortest representation that round-trips.
#[inline]
pub fn write_num(buf: &mut String, n: f64) {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        let _ = write!(buf, "{}", n as i64);
    } else {
        let mut buffer = ryu::Buffer::new();
        buf.push_str(buffer.format(n));
    }
}

/// Append ` name="value"` with a numeric value.
#[inline]
fn write_num_attr(buf: &mut String, name: &str, n: f64) {
    buf.push(' ');
    buf.push_str(name);
    buf.push_str("=\"");
    write_num(buf, n);
    buf.push('"');
}

/// Text styling for a `<text>` element. Anchored at its middle.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub font_family: &'a str,
    pub font_size: f64,
    pub bold: bool,
    pub fill: &'a str,
}

/// Accumulates SVG markup. Writing to a `String` cannot fail, so the builder
/// methods are infallible.
#[derive(Debug)]
pub struct SvgBuilder {
    buf: String,
}

impl SvgBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        let mut buf = String::with_capacity(2048);
        buf.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        write_num_attr(&mut buf, "width", width);
        write_num_attr(&mut buf, "height", height);
        buf.push_str(r#" viewBox="0 0 "#);
        write_num(&mut buf, width);
        buf.push(' ');
        write_num(&mut buf, height);
        buf.push_str("\">");
        Self { buf }
    }

    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    /// Full-canvas rectangle with the given paint (`#rrggbb` or `url(#id)`).
    pub fn background(&mut self, paint: &str) -> &mut Self {
        let _ = write!(
            self.buf,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(paint)
        );
        self
    }

    /// Rounded rectangle filled and stroked in one color.
    #[allow(clippy::too_many_arguments)]
    pub fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: &str,
        stroke_width: f64,
    ) -> &mut Self {
        let buf = &mut self.buf;
        buf.push_str("<rect");
        write_num_attr(buf, "x", x);
        write_num_attr(buf, "y", y);
        write_num_attr(buf, "width", width);
        write_num_attr(buf, "height", height);
        write_num_attr(buf, "rx", radius);
        write_num_attr(buf, "ry", radius);
        let color = escape_xml(color);
        let _ = write!(buf, r#" fill="{color}" stroke="{color}""#);
        write_num_attr(buf, "stroke-width", stroke_width);
        buf.push_str("/>");
        self
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle<'_>) -> &mut Self {
        let buf = &mut self.buf;
        buf.push_str("<text");
        write_num_attr(buf, "x", x);
        write_num_attr(buf, "y", y);
        let _ = write!(buf, r#" font-family="{}""#, escape_xml(style.font_family));
        write_num_attr(buf, "font-size", style.font_size);
        if style.bold {
            buf.push_str(r#" font-weight="bold""#);
        }
        let _ = write!(
            buf,
            r#" fill="{}" text-anchor="middle">{}</text>"#,
            escape_xml(style.fill),
            escape_xml(content)
        );
        self
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_num() {
        let mut buf = String::new();
        for n in [30.0, 562.5, -20.0, 0.1] {
            write_num(&mut buf, n);
            buf.push(',');
        }
        assert_eq!(buf, "30,562.5,-20,0.1,");
    }

    #[test]
    fn test_rounded_rect_attributes() {
        let mut svg = SvgBuilder::new(10.0, 10.0);
        svg.rounded_rect(30.0, 60.0, 180.0, 80.0, 8.0, "#667eea", 2.0);
        assert!(svg.finish().contains(
            r##"<rect x="30" y="60" width="180" height="80" rx="8" ry="8" fill="#667eea" stroke="#667eea" stroke-width="2"/>"##
        ));
    }

    #[test]
    fn test_builder_output() {
        let mut svg = SvgBuilder::new(200.0, 562.5);
        svg.background("#1a1a2e").text(
            100.0,
            50.0,
            "A < B",
            &TextStyle {
                font_family: "Arial, sans-serif",
                font_size: 16.0,
                bold: true,
                fill: "#ffffff",
            },
        );
        let markup = svg.finish();
        assert!(markup.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="562.5""#));
        assert!(markup.contains(r#"font-weight="bold""#));
        assert!(markup.contains(">A &lt; B</text>"));
        assert!(markup.ends_with("</svg>"));
    }
}
