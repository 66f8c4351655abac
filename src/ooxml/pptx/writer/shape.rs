/// Shape types and their DrawingML serialization.
use crate::common::unit::{Emu, Rect, pt_to_emu_f64};
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

pub use super::super::format::{ImageFormat, LineStyle, TextAlign, TextFormat, VerticalAnchor};
use super::table::TableFrame;

/// Preset geometry of an auto shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Rect,
    /// Rounded rectangle with an absolute corner radius.
    RoundRect { radius: Emu },
}

/// A shape on a slide (text box, auto shape, picture or table).
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID
    pub(crate) shape_id: u32,
    /// Shape type
    pub(crate) shape_type: ShapeType,
}

/// Text content shared by text boxes and auto shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ShapeText {
    pub(crate) text: String,
    pub(crate) format: TextFormat,
    pub(crate) align: TextAlign,
    pub(crate) anchor: VerticalAnchor,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    TextBox {
        bounds: Rect<Emu>,
        body: ShapeText,
    },
    AutoShape {
        geometry: Geometry,
        bounds: Rect<Emu>,
        fill: Option<String>,
        line: Option<LineStyle>,
        body: Option<ShapeText>,
    },
    Picture {
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Rect<Emu>,
        description: String,
    },
    Table(TableFrame),
}

impl MutableShape {
    pub(crate) fn new_text_box(shape_id: u32, text: String, bounds: Rect<Emu>) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::TextBox {
                bounds,
                body: ShapeText {
                    text,
                    ..ShapeText::default()
                },
            },
        }
    }

    pub(crate) fn new_auto_shape(shape_id: u32, geometry: Geometry, bounds: Rect<Emu>) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::AutoShape {
                geometry,
                bounds,
                fill: None,
                line: None,
                body: None,
            },
        }
    }

    pub(crate) fn new_picture(
        shape_id: u32,
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Rect<Emu>,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Picture {
                data,
                format,
                bounds,
                description,
            },
        }
    }

    pub(crate) fn new_table(shape_id: u32, table: TableFrame) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Table(table),
        }
    }

    /// Shape ID, unique within its slide.
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Position and size in EMUs.
    pub fn bounds(&self) -> Rect<Emu> {
        match &self.shape_type {
            ShapeType::TextBox { bounds, .. }
            | ShapeType::AutoShape { bounds, .. }
            | ShapeType::Picture { bounds, .. } => *bounds,
            ShapeType::Table(table) => table.bounds,
        }
    }

    /// Text of a text box or labelled auto shape.
    pub fn text(&self) -> Option<&str> {
        self.body().map(|b| b.text.as_str())
    }

    /// Character formatting of the shape's text.
    pub fn text_format(&self) -> Option<&TextFormat> {
        self.body().map(|b| &b.format)
    }

    pub fn is_table(&self) -> bool {
        matches!(self.shape_type, ShapeType::Table(_))
    }

    pub fn is_picture(&self) -> bool {
        matches!(self.shape_type, ShapeType::Picture { .. })
    }

    /// Table model if this shape is a table.
    pub fn table(&self) -> Option<&TableFrame> {
        match &self.shape_type {
            ShapeType::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Preset geometry if this shape is an auto shape.
    pub fn geometry(&self) -> Option<Geometry> {
        match &self.shape_type {
            ShapeType::AutoShape { geometry, .. } => Some(*geometry),
            _ => None,
        }
    }

    fn body(&self) -> Option<&ShapeText> {
        match &self.shape_type {
            ShapeType::TextBox { body, .. } => Some(body),
            ShapeType::AutoShape { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Text body to modify. Auto shapes get an empty one on first use;
    /// pictures and tables have none.
    fn body_mut(&mut self) -> Option<&mut ShapeText> {
        match &mut self.shape_type {
            ShapeType::TextBox { body, .. } => Some(body),
            ShapeType::AutoShape { body, .. } => Some(body.get_or_insert_with(ShapeText::default)),
            _ => None,
        }
    }

    /// Builder method: set the label text of an auto shape (or replace a text box's text).
    pub fn text_content(&mut self, text: &str) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.text = text.to_string();
        }
        self
    }

    /// Set text formatting for this shape.
    pub fn set_text_format(&mut self, format: TextFormat) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.format = format;
        }
        self
    }

    /// Builder method: set font.
    pub fn font(&mut self, font: &str) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.format.font = Some(font.to_string());
        }
        self
    }

    /// Builder method: set font size in points.
    pub fn font_size(&mut self, size: f64) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.format.size = Some(size);
        }
        self
    }

    /// Builder method: set bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.format.bold = Some(bold);
        }
        self
    }

    /// Builder method: set italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.format.italic = Some(italic);
        }
        self
    }

    /// Builder method: set text color.
    pub fn color(&mut self, color: &str) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.format.color = Some(color.to_string());
        }
        self
    }

    /// Builder method: set paragraph alignment.
    pub fn align(&mut self, align: TextAlign) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.align = align;
        }
        self
    }

    /// Builder method: set vertical anchoring.
    pub fn anchor(&mut self, anchor: VerticalAnchor) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.anchor = anchor;
        }
        self
    }

    /// Builder method: set the solid fill of an auto shape.
    pub fn fill(&mut self, color: &str) -> &mut Self {
        if let ShapeType::AutoShape { fill, .. } = &mut self.shape_type {
            *fill = Some(color.to_string());
        }
        self
    }

    /// Builder method: set the outline of an auto shape.
    pub fn line(&mut self, style: LineStyle) -> &mut Self {
        if let ShapeType::AutoShape { line, .. } = &mut self.shape_type {
            *line = Some(style);
        }
        self
    }

    /// Get image data if this shape is a picture.
    pub(crate) fn image_data(&self) -> Option<(&[u8], ImageFormat)> {
        match &self.shape_type {
            ShapeType::Picture { data, format, .. } => Some((data.as_slice(), *format)),
            _ => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the relationship ID of their image part.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox { bounds, body } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Text Box {}"/>"#,
                    self.shape_id, self.shape_id
                )?;
                xml.push_str("<p:cNvSpPr txBox=\"1\"/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, "a:xfrm", bounds)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("<a:noFill/>");
                xml.push_str("</p:spPr>");

                write_text_body(xml, "p:txBody", body)?;
                xml.push_str("</p:sp>");
            },
            ShapeType::AutoShape {
                geometry,
                bounds,
                fill,
                line,
                body,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                let name = match geometry {
                    Geometry::Rect => "Rectangle",
                    Geometry::RoundRect { .. } => "Rounded Rectangle",
                };
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="{} {}"/>"#,
                    self.shape_id, name, self.shape_id
                )?;
                xml.push_str("<p:cNvSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, "a:xfrm", bounds)?;
                match geometry {
                    Geometry::Rect => {
                        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                    },
                    Geometry::RoundRect { radius } => {
                        write!(
                            xml,
                            r#"<a:prstGeom prst="roundRect"><a:avLst><a:gd name="adj" fmla="val {}"/></a:avLst></a:prstGeom>"#,
                            round_rect_adjust(*radius, bounds)
                        )?;
                    },
                }

                match fill {
                    Some(color) => write_solid_fill(xml, color)?,
                    None => xml.push_str("<a:noFill/>"),
                }
                match line {
                    Some(style) => write_line(xml, "a:ln", style)?,
                    None => xml.push_str("<a:ln><a:noFill/></a:ln>"),
                }
                xml.push_str("</p:spPr>");

                if let Some(body) = body {
                    write_text_body(xml, "p:txBody", body)?;
                }
                xml.push_str("</p:sp>");
            },
            ShapeType::Picture {
                bounds,
                description,
                ..
            } => {
                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.shape_id,
                    self.shape_id,
                    escape_xml(description)
                )?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rel_id.unwrap_or_default())?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, "a:xfrm", bounds)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            },
            ShapeType::Table(table) => table.to_xml(xml, self.shape_id)?,
        }

        Ok(())
    }
}

/// `adj` guide of a roundRect: the radius as a fraction of the shorter side,
/// in 1/100000 units, capped at the preset maximum of one half.
fn round_rect_adjust(radius: Emu, bounds: &Rect<Emu>) -> i64 {
    let shorter = bounds.w.value().min(bounds.h.value());
    if shorter <= 0 {
        return 0;
    }
    (radius.value() * 100_000 / shorter).clamp(0, 50_000)
}

/// Transform element; shapes use `a:xfrm`, graphic frames `p:xfrm`.
pub(crate) fn write_xfrm(xml: &mut String, tag: &str, bounds: &Rect<Emu>) -> Result<()> {
    write!(xml, "<{}>", tag)?;
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, bounds.x.value(), bounds.y.value())?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, bounds.w.value(), bounds.h.value())?;
    write!(xml, "</{}>", tag)?;
    Ok(())
}

pub(crate) fn write_solid_fill(xml: &mut String, color: &str) -> Result<()> {
    write!(
        xml,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        escape_xml(color)
    )?;
    Ok(())
}

/// Outline element (`a:ln`, or a table cell's `a:lnL`/`a:lnR`/`a:lnT`/`a:lnB`).
pub(crate) fn write_line(xml: &mut String, tag: &str, style: &LineStyle) -> Result<()> {
    write!(xml, r#"<{} w="{}">"#, tag, pt_to_emu_f64(style.width_pt))?;
    write_solid_fill(xml, &style.color)?;
    write!(xml, "</{}>", tag)?;
    Ok(())
}

/// `a:rPr` (or `a:endParaRPr`) carrying the character formatting.
pub(crate) fn write_run_props(xml: &mut String, tag: &str, format: &TextFormat) -> Result<()> {
    write!(xml, "<{} lang=\"en-US\" dirty=\"0\"", tag)?;

    if let Some(size) = format.size {
        write!(xml, " sz=\"{}\"", (size * 100.0).round() as u32)?;
    }
    if let Some(true) = format.bold {
        xml.push_str(" b=\"1\"");
    }
    if let Some(true) = format.italic {
        xml.push_str(" i=\"1\"");
    }

    if format.color.is_none() && format.font.is_none() {
        xml.push_str("/>");
        return Ok(());
    }

    xml.push('>');
    if let Some(ref color) = format.color {
        write_solid_fill(xml, color)?;
    }
    if let Some(ref font) = format.font {
        let font = escape_xml(font);
        write!(
            xml,
            r#"<a:latin typeface="{font}"/><a:ea typeface="{font}"/><a:cs typeface="{font}"/>"#
        )?;
    }
    write!(xml, "</{}>", tag)?;
    Ok(())
}

/// Paragraphs of a text body, one per line of `text`.
pub(crate) fn write_paragraphs(
    xml: &mut String,
    text: &str,
    format: &TextFormat,
    align: TextAlign,
) -> Result<()> {
    for line in text.split('\n') {
        xml.push_str("<a:p>");
        write!(xml, r#"<a:pPr algn="{}"/>"#, align.as_ooxml())?;
        if !line.is_empty() {
            xml.push_str("<a:r>");
            write_run_props(xml, "a:rPr", format)?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(line))?;
            xml.push_str("</a:r>");
        }
        write_run_props(xml, "a:endParaRPr", format)?;
        xml.push_str("</a:p>");
    }
    Ok(())
}

fn write_text_body(xml: &mut String, tag: &str, body: &ShapeText) -> Result<()> {
    write!(xml, "<{}>", tag)?;
    write!(
        xml,
        r#"<a:bodyPr wrap="square" lIns="0" tIns="0" rIns="0" bIns="0" rtlCol="0" anchor="{}"><a:noAutofit/></a:bodyPr>"#,
        body.anchor.as_ooxml()
    )?;
    xml.push_str("<a:lstStyle/>");
    write_paragraphs(xml, &body.text, &body.format, body.align)?;
    write!(xml, "</{}>", tag)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect<Emu> {
        Rect::new(Emu(914_400), Emu(457_200), Emu(3_657_600), Emu(411_480))
    }

    #[test]
    fn test_solid_fill_escapes_value() {
        let mut xml = String::new();
        write_solid_fill(&mut xml, r#"667EEA" x="1"#).unwrap();
        assert_eq!(
            xml,
            r#"<a:solidFill><a:srgbClr val="667EEA&quot; x=&quot;1"/></a:solidFill>"#
        );
    }

    #[test]
    fn test_text_box_xml() {
        let mut shape = MutableShape::new_text_box(2, "A & B".to_string(), bounds());
        shape
            .font_size(13.0)
            .bold(true)
            .color("FFFFFF")
            .align(TextAlign::Center)
            .anchor(VerticalAnchor::Middle);

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"<a:off x="914400" y="457200"/>"#));
        assert!(xml.contains(r#"sz="1300" b="1""#));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains(r#"anchor="ctr""#));
        assert!(xml.contains("<a:t>A &amp; B</a:t>"));
    }

    #[test]
    fn test_multiline_text_splits_paragraphs() {
        let shape = MutableShape::new_text_box(2, "one\ntwo".to_string(), bounds());
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert_eq!(xml.matches("<a:p>").count(), 2);
    }

    #[test]
    fn test_round_rect_adjust() {
        // 0.05in radius on a 0.45in tall box
        let rect = Rect::new(Emu(0), Emu(0), Emu(3_657_600), Emu(411_480));
        assert_eq!(round_rect_adjust(Emu(45_720), &rect), 11_111);
        assert_eq!(round_rect_adjust(Emu(10_000_000), &rect), 50_000);
    }

    #[test]
    fn test_auto_shape_xml() {
        let mut shape =
            MutableShape::new_auto_shape(3, Geometry::RoundRect { radius: Emu(45_720) }, bounds());
        shape
            .fill("667eea")
            .line(LineStyle::new("667eea", 1.0))
            .text_content("Step")
            .bold(true);

        assert_eq!(shape.text(), Some("Step"));
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"prst="roundRect""#));
        assert!(xml.contains(r#"<a:gd name="adj" fmla="val 11111"/>"#));
        assert!(xml.contains(r#"<a:ln w="12700"><a:solidFill><a:srgbClr val="667eea"/>"#));
        assert!(xml.contains("<p:txBody>"));
    }

    #[test]
    fn test_picture_uses_rel_id() {
        let shape = MutableShape::new_picture(
            4,
            vec![0x89, b'P', b'N', b'G'],
            ImageFormat::Png,
            bounds(),
            "flow".to_string(),
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(shape.is_picture());
        assert!(shape.text().is_none());
    }
}
