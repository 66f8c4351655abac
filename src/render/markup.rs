//! Built-in renderer for XHTML templates.
//!
//! Supported subset:
//!
//! - `<body style="width: ..; height: ..">` sized in `px`, `pt` or `in`; the
//!   size must match the presentation's slide size. `background-image: url(..)`
//!   becomes a stretched picture background, `background`/`background-color`
//!   a solid one.
//! - Only elements with `position: absolute` are drawn. `left`, `top`,
//!   `width` and `height` are relative to the nearest positioned ancestor.
//! - `class="placeholder"` elements are reported as placeholders (named by
//!   `id`) and not drawn.
//! - `<img src>` becomes a picture; `src` is relative to the template.
//! - `p`, `h1`-`h6`, `div`, `span` and `li` with text become text boxes;
//!   a `div` with a background color becomes a filled (optionally rounded)
//!   rectangle carrying its text.
//!
//! Styling comes from inline `style` attributes only. The markup must be
//! well-formed XML.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::{Path, PathBuf};

use super::error::{RenderError, Result};
use super::style::{InlineStyle, parse_length};
use super::{Placeholder, RenderedPage, TemplateRenderer};
use crate::common::unit::{Emu, Inches, Rect};
use crate::common::xml::resolve_entity;
use crate::ooxml::pptx::{
    Geometry, ImageFormat, MutablePresentation, SlideBackground, TextAlign, VerticalAnchor,
};

const MAX_DEPTH: usize = 256;
const SIZE_TOLERANCE_IN: f64 = 0.01;
const TEXT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "div", "span", "li"];
const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "template"];
/// Browser default font size (16px).
const DEFAULT_FONT_PT: f64 = 12.0;
const LINE_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: String, attrs: Vec<(String, String)>) -> Self {
        Self {
            name,
            attrs,
            children: Vec::new(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn style(&self) -> InlineStyle {
        InlineStyle::parse(self.attr("style").unwrap_or_default())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|token| token == class))
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First descendant named `name`, in document order.
    fn find(&self, name: &str) -> Option<&Element> {
        for child in self.elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Rendered text: whitespace collapsed, `<br/>` and block children as
    /// line breaks. Positioned descendants draw themselves and are skipped.
    fn text_content(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        raw.split('\n')
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => {
                    out.extend(text.chars().map(|c| if c == '\n' { ' ' } else { c }));
                },
                Node::Element(el) => {
                    if el.name == "br" {
                        out.push('\n');
                        continue;
                    }
                    if el.style().is_absolute() || SKIPPED_TAGS.contains(&el.name.as_str()) {
                        continue;
                    }
                    let block = matches!(el.name.as_str(), "p" | "div" | "li")
                        || el.name.starts_with('h') && el.name.len() == 2;
                    if block {
                        out.push('\n');
                    }
                    el.collect_text(out);
                    if block {
                        out.push('\n');
                    }
                },
            }
        }
    }
}

fn element_from(e: &BytesStart<'_>) -> std::result::Result<Element, String> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_ascii_lowercase();
        let value = attr.unescape_value().map_err(|err| err.to_string())?;
        attrs.push((key, value.into_owned()));
    }
    Ok(Element::new(name, attrs))
}

/// Parse a document into an element tree under a synthetic root.
fn parse_document(xml: &str) -> std::result::Result<Element, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack = vec![Element::new("#document".to_string(), Vec::new())];

    loop {
        let event = reader.read_event().map_err(|err| {
            format!(
                "XML parsing error at position {}: {}",
                reader.buffer_position(),
                err
            )
        })?;

        match event {
            Event::Start(ref e) => {
                if stack.len() > MAX_DEPTH {
                    return Err(format!("maximum nesting depth {} exceeded", MAX_DEPTH));
                }
                stack.push(element_from(e)?);
            },
            Event::Empty(ref e) => {
                let el = element_from(e)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Element(el));
                }
            },
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err("unexpected closing tag".to_string());
                }
                if let Some(el) = stack.pop()
                    && let Some(parent) = stack.last_mut()
                {
                    parent.children.push(Node::Element(el));
                }
            },
            Event::Text(ref e) => {
                let text = std::str::from_utf8(e).map_err(|err| err.to_string())?;
                if let Some(top) = stack.last_mut() {
                    top.push_text(text);
                }
            },
            Event::CData(ref e) => {
                let text = std::str::from_utf8(e).map_err(|err| err.to_string())?;
                if let Some(top) = stack.last_mut() {
                    top.push_text(text);
                }
            },
            Event::GeneralRef(ref e) => {
                let name = std::str::from_utf8(e).map_err(|err| err.to_string())?;
                let ch = resolve_entity(name).ok_or_else(|| format!("unknown entity &{};", name))?;
                if let Some(top) = stack.last_mut() {
                    top.push_text(ch.encode_utf8(&mut [0; 4]));
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if stack.len() != 1 {
        return Err(format!("{} unclosed element(s)", stack.len() - 1));
    }
    stack
        .pop()
        .ok_or_else(|| "empty document".to_string())
}

/// Something drawn on the page, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text {
        rect: Rect<Inches>,
        text: String,
        font_size: f64,
        bold: bool,
        italic: bool,
        color: Option<String>,
        font: Option<String>,
        align: TextAlign,
        anchor: VerticalAnchor,
        /// Background of a boxed `div`
        fill: Option<String>,
        corner_radius: Option<Inches>,
    },
    Rectangle {
        rect: Rect<Inches>,
        fill: String,
        corner_radius: Option<Inches>,
    },
    Picture {
        rect: Rect<Inches>,
        data: Vec<u8>,
        format: ImageFormat,
        description: String,
    },
}

/// A fully parsed template, ready to be appended as a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePage {
    pub background: Option<SlideBackground>,
    pub items: Vec<PageItem>,
    pub placeholders: Vec<Placeholder>,
}

impl TemplatePage {
    /// Append the page as a new slide.
    pub fn apply(self, pres: &mut MutablePresentation) -> RenderedPage {
        let slide_index = pres.slide_count();
        let slide = pres.add_slide();
        if let Some(background) = self.background {
            slide.set_background(background);
        }

        for item in self.items {
            match item {
                PageItem::Text {
                    rect,
                    text,
                    font_size,
                    bold,
                    italic,
                    color,
                    font,
                    align,
                    anchor,
                    fill,
                    corner_radius,
                } => {
                    let bounds = rect.convert::<Emu>();
                    let shape = match fill {
                        Some(fill) => {
                            let shape = slide.add_shape(geometry(corner_radius), bounds);
                            shape.fill(&fill).text_content(&text);
                            shape
                        },
                        None => slide.add_text_box(&text, bounds),
                    };
                    shape
                        .font_size(font_size)
                        .bold(bold)
                        .italic(italic)
                        .align(align)
                        .anchor(anchor);
                    if let Some(color) = color {
                        shape.color(&color);
                    }
                    if let Some(font) = font {
                        shape.font(&font);
                    }
                },
                PageItem::Rectangle {
                    rect,
                    fill,
                    corner_radius,
                } => {
                    slide
                        .add_shape(geometry(corner_radius), rect.convert::<Emu>())
                        .fill(&fill);
                },
                PageItem::Picture {
                    rect,
                    data,
                    format,
                    description,
                } => {
                    slide.add_image(data, format, rect.convert::<Emu>(), &description);
                },
            }
        }

        RenderedPage {
            slide_index,
            placeholders: self.placeholders,
        }
    }
}

fn geometry(corner_radius: Option<Inches>) -> Geometry {
    match corner_radius {
        Some(radius) if radius.value() > 0.0 => Geometry::RoundRect {
            radius: Emu::from(radius),
        },
        _ => Geometry::Rect,
    }
}

/// Renderer for the XHTML subset described in the module docs.
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer;

impl MarkupRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a template without touching any presentation.
    ///
    /// `slide_size` is the expected body size in inches.
    pub fn parse(&self, template: &Path, slide_size: (Inches, Inches)) -> Result<TemplatePage> {
        if !template.is_file() {
            return Err(RenderError::TemplateNotFound(template.to_path_buf()));
        }
        let source = std::fs::read_to_string(template)?;
        let document = parse_document(&source).map_err(|message| RenderError::Markup {
            path: template.to_path_buf(),
            message,
        })?;
        let body = document
            .find("body")
            .ok_or_else(|| RenderError::NoMarkup(template.to_path_buf()))?;

        let mut walker = PageWalker {
            template,
            base_dir: template.parent().unwrap_or_else(|| Path::new("")),
            slide_size,
            items: Vec::new(),
            placeholders: Vec::new(),
        };
        let background = walker.body(body)?;
        walker.walk(body, Inches(0.0), Inches(0.0))?;

        log::debug!(
            "{}: {} items, {} placeholders",
            template.display(),
            walker.items.len(),
            walker.placeholders.len()
        );
        Ok(TemplatePage {
            background,
            items: walker.items,
            placeholders: walker.placeholders,
        })
    }
}

impl TemplateRenderer for MarkupRenderer {
    fn render(&self, template: &Path, pres: &mut MutablePresentation) -> Result<RenderedPage> {
        let page = self.parse(template, pres.slide_size_inches())?;
        let rendered = page.apply(pres);
        log::info!(
            "rendered {} as slide {} ({} placeholder(s))",
            template.display(),
            rendered.slide_index + 1,
            rendered.placeholders.len()
        );
        Ok(rendered)
    }
}

struct PageWalker<'a> {
    template: &'a Path,
    base_dir: &'a Path,
    slide_size: (Inches, Inches),
    items: Vec<PageItem>,
    placeholders: Vec<Placeholder>,
}

impl PageWalker<'_> {
    fn markup_error(&self, message: String) -> RenderError {
        RenderError::Markup {
            path: self.template.to_path_buf(),
            message,
        }
    }

    /// Check the body size and read the slide background.
    fn body(&self, body: &Element) -> Result<Option<SlideBackground>> {
        let style = body.style();
        if let (Some(width), Some(height)) = (style.length("width"), style.length("height")) {
            let (slide_width, slide_height) = self.slide_size;
            if (width - slide_width).value().abs() > SIZE_TOLERANCE_IN
                || (height - slide_height).value().abs() > SIZE_TOLERANCE_IN
            {
                return Err(RenderError::LayoutMismatch {
                    path: self.template.to_path_buf(),
                    body_width: width.value(),
                    body_height: height.value(),
                    slide_width: slide_width.value(),
                    slide_height: slide_height.value(),
                });
            }
        }

        if let Some(url) = style.background_image() {
            let (data, _) = self.load_image(&url)?;
            return SlideBackground::picture(data)
                .map(Some)
                .ok_or_else(|| self.markup_error(format!("unsupported background image '{}'", url)));
        }
        Ok(style.background_color().map(SlideBackground::solid))
    }

    /// Shapes and placeholders need a positive size on both axes.
    fn check_extent(&self, what: &str, w: Inches, h: Inches) -> Result<()> {
        if w.value() > 0.0 && h.value() > 0.0 {
            Ok(())
        } else {
            Err(self.markup_error(format!("{what} has a non-positive size {w} x {h}")))
        }
    }

    fn load_image(&self, src: &str) -> Result<(Vec<u8>, ImageFormat)> {
        let path: PathBuf = self.base_dir.join(src);
        if !path.is_file() {
            return Err(RenderError::ImageNotFound {
                template: self.template.to_path_buf(),
                image: path,
            });
        }
        let data = std::fs::read(&path)?;
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| self.markup_error(format!("unsupported image format '{}'", src)))?;
        Ok((data, format))
    }

    fn walk(&mut self, parent: &Element, origin_x: Inches, origin_y: Inches) -> Result<()> {
        for el in parent.elements() {
            if SKIPPED_TAGS.contains(&el.name.as_str()) {
                continue;
            }
            let style = el.style();
            if !style.is_absolute() {
                self.walk(el, origin_x, origin_y)?;
                continue;
            }

            let x = origin_x + style.length("left").unwrap_or_default();
            let y = origin_y + style.length("top").unwrap_or_default();
            let width = style.length("width");
            let height = style.length("height");

            if el.has_class("placeholder") {
                let (Some(w), Some(h)) = (width, height) else {
                    return Err(self.markup_error(format!(
                        "placeholder '{}' needs a width and a height",
                        el.attr("id").unwrap_or_default()
                    )));
                };
                self.check_extent(
                    &format!("placeholder '{}'", el.attr("id").unwrap_or_default()),
                    w,
                    h,
                )?;
                self.placeholders.push(Placeholder {
                    name: el.attr("id").map(str::to_string),
                    rect: Rect::new(x, y, w, h),
                });
                continue;
            }

            if el.name == "img" {
                let src = el
                    .attr("src")
                    .ok_or_else(|| self.markup_error("<img> without src".to_string()))?;
                let (Some(w), Some(h)) = (width, height) else {
                    return Err(self.markup_error(format!("image '{}' needs a width and a height", src)));
                };
                self.check_extent(&format!("image '{}'", src), w, h)?;
                let (data, format) = self.load_image(src)?;
                self.items.push(PageItem::Picture {
                    rect: Rect::new(x, y, w, h),
                    data,
                    format,
                    description: el.attr("alt").unwrap_or(src).to_string(),
                });
                continue;
            }

            self.element(el, &style, x, y, width, height)?;
            self.walk(el, x, y)?;
        }
        Ok(())
    }

    fn element(
        &mut self,
        el: &Element,
        style: &InlineStyle,
        x: Inches,
        y: Inches,
        width: Option<Inches>,
        height: Option<Inches>,
    ) -> Result<()> {
        let fill = if el.name == "div" {
            style.background_color()
        } else {
            None
        };
        let corner_radius = style.get("border-radius").and_then(parse_length);
        let text = if TEXT_TAGS.contains(&el.name.as_str()) {
            el.text_content()
        } else {
            String::new()
        };

        if text.is_empty() {
            if let (Some(fill), Some(w), Some(h)) = (fill, width, height) {
                self.check_extent(&format!("<{}> box", el.name), w, h)?;
                self.items.push(PageItem::Rectangle {
                    rect: Rect::new(x, y, w, h),
                    fill,
                    corner_radius,
                });
            }
            return Ok(());
        }

        let font_size = style.font_size().unwrap_or(DEFAULT_FONT_PT);
        let lines = text.lines().count().max(1) as f64;
        // Without a width, text runs to the right edge of the slide.
        let w = width.unwrap_or(self.slide_size.0 - x);
        let h = height.unwrap_or(Inches(lines * font_size * LINE_HEIGHT / 72.0));
        self.check_extent(&format!("<{}> text", el.name), w, h)?;
        let align = match style.get("text-align") {
            Some("center") => TextAlign::Center,
            Some("right") | Some("end") => TextAlign::Right,
            _ => TextAlign::Left,
        };
        let centered = matches!(style.get("align-items"), Some("center"))
            || matches!(style.get("vertical-align"), Some("middle"));

        self.items.push(PageItem::Text {
            rect: Rect::new(x, y, w, h),
            text,
            font_size,
            bold: style.is_bold() || matches!(el.name.as_str(), "h1" | "h2" | "h3"),
            italic: style.is_italic(),
            color: style.color(),
            font: style.font_family(),
            align,
            anchor: if centered {
                VerticalAnchor::Middle
            } else {
                VerticalAnchor::Top
            },
            fill,
            corner_radius,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    const TABLE_PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>t</title></head>
<body style="width: 720pt; height: 405pt; background: #1a1a2e;">
  <h1 style="position: absolute; left: 48px; top: 24px; width: 864px; font-size: 32px; color: #ffffff;">Tools &amp; Roles</h1>
  <div class="placeholder" id="table-area" style="position: absolute; left: 48px; top: 96px; width: 864px; height: 384px;"></div>
  <div style="position: absolute; left: 0; top: 520px; width: 960px; height: 20px; background-color: #667eea;"></div>
</body>
</html>"#;

    #[test]
    fn test_parse_placeholders_and_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "page.html", TABLE_PAGE);

        let page = MarkupRenderer::new()
            .parse(&path, (Inches(10.0), Inches(5.625)))
            .unwrap();
        assert_eq!(page.background, Some(SlideBackground::solid("1A1A2E")));
        assert_eq!(page.placeholders.len(), 1);
        let ph = &page.placeholders[0];
        assert_eq!(ph.name.as_deref(), Some("table-area"));
        assert_eq!(ph.rect, Rect::new(Inches(0.5), Inches(1.0), Inches(9.0), Inches(4.0)));

        assert_eq!(page.items.len(), 2);
        match &page.items[0] {
            PageItem::Text {
                text, font_size, bold, ..
            } => {
                assert_eq!(text, "Tools & Roles");
                assert_eq!(*font_size, 24.0);
                assert!(*bold);
            },
            other => panic!("unexpected item {other:?}"),
        }
        assert!(matches!(&page.items[1], PageItem::Rectangle { fill, .. } if fill == "667EEA"));
    }

    #[test]
    fn test_render_appends_one_slide() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "page.html", TABLE_PAGE);
        let mut pres = MutablePresentation::new();

        let rendered = MarkupRenderer::new().render(&path, &mut pres).unwrap();
        assert_eq!(rendered.slide_index, 0);
        assert_eq!(pres.slide_count(), 1);
        assert_eq!(pres.slide(0).unwrap().shape_count(), 2);
        assert!(rendered.placeholder("table-area").is_some());

        // stable across renders
        let again = MarkupRenderer::new().render(&path, &mut pres).unwrap();
        assert_eq!(again.slide_index, 1);
        assert_eq!(again.placeholders, rendered.placeholders);
    }

    #[test]
    fn test_layout_mismatch_appends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "wide.html",
            r#"<html><body style="width: 1280px; height: 720px;"></body></html>"#,
        );
        let mut pres = MutablePresentation::new();
        let err = MarkupRenderer::new().render(&path, &mut pres).unwrap_err();
        assert!(matches!(err, RenderError::LayoutMismatch { .. }));
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn test_missing_template_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let mut pres = MutablePresentation::new();
        let err = MarkupRenderer::new()
            .render(&dir.path().join("nope.html"), &mut pres)
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(_)));

        let path = write(dir.path(), "nobody.html", "<html><head/></html>");
        let err = MarkupRenderer::new().render(&path, &mut pres).unwrap_err();
        assert!(matches!(err, RenderError::NoMarkup(_)));

        let path = write(dir.path(), "broken.html", "<html><body><p></body></html>");
        let err = MarkupRenderer::new().render(&path, &mut pres).unwrap_err();
        assert!(matches!(err, RenderError::Markup { .. }));
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn test_images_resolve_relative_to_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("flowchart.png"), PNG_1X1).unwrap();
        fs::write(dir.path().join("cover.png"), PNG_1X1).unwrap();
        let path = write(
            dir.path(),
            "flow.html",
            r#"<html><body style="width: 960px; height: 540px; background-image: url('cover.png');">
<img src="flowchart.png" alt="process" style="position: absolute; left: 30px; top: 200px; width: 900px; height: 128px;"/>
</body></html>"#,
        );

        let mut pres = MutablePresentation::new();
        MarkupRenderer::new().render(&path, &mut pres).unwrap();
        let slide = pres.slide(0).unwrap();
        assert!(matches!(slide.background(), Some(SlideBackground::Picture { .. })));
        assert!(slide.shapes()[0].is_picture());

        let missing = write(
            dir.path(),
            "missing.html",
            r#"<html><body><img src="gone.png" style="position: absolute; width: 10px; height: 10px;"/></body></html>"#,
        );
        let err = MarkupRenderer::new().render(&missing, &mut pres).unwrap_err();
        assert!(matches!(err, RenderError::ImageNotFound { .. }));
        assert_eq!(pres.slide_count(), 1);
    }

    #[test]
    fn test_rejects_non_positive_extents() {
        let dir = tempfile::tempdir().unwrap();
        let size = (Inches(10.0), Inches(5.625));

        let offslide = write(
            dir.path(),
            "offslide.html",
            r#"<html><body><p style="position: absolute; left: 1000px; top: 10px;">Late</p></body></html>"#,
        );
        let err = MarkupRenderer::new().parse(&offslide, size).unwrap_err();
        assert!(matches!(err, RenderError::Markup { ref message, .. } if message.contains("<p> text")));

        let flat = write(
            dir.path(),
            "flat.html",
            r#"<html><body><div class="placeholder" id="area" style="position: absolute; left: 48px; top: 96px; width: 864px; height: 0;"></div></body></html>"#,
        );
        let err = MarkupRenderer::new().parse(&flat, size).unwrap_err();
        assert!(matches!(err, RenderError::Markup { ref message, .. } if message.contains("placeholder 'area'")));

        let mut pres = MutablePresentation::new();
        assert!(MarkupRenderer::new().render(&offslide, &mut pres).is_err());
        assert_eq!(pres.slide_count(), 0);

        // text starting inside the slide keeps its implied width
        let edge = write(
            dir.path(),
            "edge.html",
            r#"<html><body><p style="position: absolute; left: 864px; top: 10px;">Edge</p></body></html>"#,
        );
        let page = MarkupRenderer::new().parse(&edge, size).unwrap();
        assert!(matches!(&page.items[0], PageItem::Text { rect, .. } if rect.w == Inches(1.0)));
    }

    #[test]
    fn test_nested_positions_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "nested.html",
            r#"<html><body>
<div style="position: absolute; left: 96px; top: 96px; width: 480px; height: 96px; background: #2d2d44; border-radius: 12px;">
  <p style="position: absolute; left: 12px; top: 12px; font-weight: bold;">Line one<br/>line   two</p>
</div>
</body></html>"#,
        );
        let page = MarkupRenderer::new()
            .parse(&path, (Inches(10.0), Inches(5.625)))
            .unwrap();
        assert_eq!(page.items.len(), 2);
        match &page.items[0] {
            PageItem::Rectangle { corner_radius, .. } => {
                assert_eq!(*corner_radius, Some(Inches(0.125)));
            },
            other => panic!("unexpected item {other:?}"),
        }
        match &page.items[1] {
            PageItem::Text { rect, text, .. } => {
                assert_eq!(text, "Line one\nline two");
                assert_eq!(rect.x, Inches(1.125));
                assert_eq!(rect.y, Inches(1.125));
            },
            other => panic!("unexpected item {other:?}"),
        }
    }
}
