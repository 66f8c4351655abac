/// Slide types and implementation for PPTX presentations.
use crate::common::unit::{Emu, Rect};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::backgrounds::SlideBackground;

use super::super::format::ImageFormat;
use super::relmap::RelationshipMapper;
use super::shape::{Geometry, MutableShape, ShapeType};
use super::table::TableFrame;

/// IDs: 1 = the slide's group shape, user shapes start at 2.
const FIRST_SHAPE_ID: u32 = 2;

/// A mutable slide in a presentation.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique within the presentation, starts at 256)
    pub(crate) slide_id: u32,
    /// Shapes on the slide, in z-order
    pub(crate) shapes: Vec<MutableShape>,
    pub(crate) background: Option<SlideBackground>,
}

impl MutableSlide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
            background: None,
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Set a background for the slide.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidesmith::ooxml::pptx::{MutablePresentation, SlideBackground};
    ///
    /// let mut pres = MutablePresentation::new();
    /// let slide = pres.add_slide();
    /// slide.set_background(SlideBackground::solid("1A1A2E"));
    /// assert!(slide.background().is_some());
    /// ```
    pub fn set_background(&mut self, background: SlideBackground) {
        self.background = Some(background);
    }

    pub fn background(&self) -> Option<&SlideBackground> {
        self.background.as_ref()
    }

    fn push(&mut self, shape: MutableShape) -> &mut MutableShape {
        let index = self.shapes.len();
        self.shapes.push(shape);
        &mut self.shapes[index]
    }

    fn next_shape_id(&self) -> u32 {
        self.shapes.len() as u32 + FIRST_SHAPE_ID
    }

    /// Add a text box. Returns the shape for builder-style formatting.
    pub fn add_text_box(&mut self, text: &str, bounds: Rect<Emu>) -> &mut MutableShape {
        let shape = MutableShape::new_text_box(self.next_shape_id(), text.to_string(), bounds);
        self.push(shape)
    }

    /// Add an auto shape with the given preset geometry.
    pub fn add_shape(&mut self, geometry: Geometry, bounds: Rect<Emu>) -> &mut MutableShape {
        let shape = MutableShape::new_auto_shape(self.next_shape_id(), geometry, bounds);
        self.push(shape)
    }

    /// Add a filled rectangle.
    pub fn add_rectangle(&mut self, bounds: Rect<Emu>, fill_color: &str) -> &mut MutableShape {
        let shape = self.add_shape(Geometry::Rect, bounds);
        shape.fill(fill_color);
        shape
    }

    /// Add a picture from encoded image bytes (PNG, JPEG, GIF, BMP or TIFF).
    pub fn add_picture(
        &mut self,
        data: Vec<u8>,
        bounds: Rect<Emu>,
        description: &str,
    ) -> Result<&mut MutableShape> {
        let format = ImageFormat::detect_from_bytes(&data).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("unrecognized image data for '{}'", description))
        })?;
        Ok(self.add_image(data, format, bounds, description))
    }

    /// Add a picture whose format is already known.
    pub fn add_image(
        &mut self,
        data: Vec<u8>,
        format: ImageFormat,
        bounds: Rect<Emu>,
        description: &str,
    ) -> &mut MutableShape {
        let shape = MutableShape::new_picture(
            self.next_shape_id(),
            data,
            format,
            bounds,
            description.to_string(),
        );
        self.push(shape)
    }

    /// Add a table inside a graphic frame.
    pub fn add_table(&mut self, table: TableFrame) -> &mut MutableShape {
        let shape = MutableShape::new_table(self.next_shape_id(), table);
        self.push(shape)
    }

    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn table_count(&self) -> usize {
        self.shapes.iter().filter(|s| s.is_table()).count()
    }

    /// Images of picture shapes, in shape order.
    pub(crate) fn collect_images(&self) -> Vec<(&[u8], ImageFormat)> {
        self.shapes.iter().filter_map(|s| s.image_data()).collect()
    }

    pub(crate) fn background_image(&self) -> Option<(&[u8], ImageFormat)> {
        self.background.as_ref().and_then(|bg| bg.image_data())
    }

    /// Generate slide XML using the relationship IDs recorded for this slide.
    pub(crate) fn to_xml(&self, slide_index: usize, rel_mapper: &RelationshipMapper) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");

        // Background must come before spTree
        if let Some(ref background) = self.background {
            let bg_rel_id = rel_mapper.background_id(slide_index);
            if background.image_data().is_some() && bg_rel_id.is_none() {
                return Err(OoxmlError::Xml(format!(
                    "missing background relationship for slide {}",
                    slide_index
                )));
            }
            xml.push_str(&background.to_xml(bg_rel_id));
        }

        xml.push_str("<p:spTree>");
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str(r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm>"#);
        xml.push_str("</p:grpSpPr>");

        let mut image_index = 0;
        for shape in &self.shapes {
            let rel_id = if let ShapeType::Picture { .. } = shape.shape_type {
                let id = rel_mapper.image_id(slide_index, image_index).ok_or_else(|| {
                    OoxmlError::Xml(format!(
                        "missing image relationship for shape {} on slide {}",
                        shape.shape_id, slide_index
                    ))
                })?;
                image_index += 1;
                Some(id)
            } else {
                None
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}
