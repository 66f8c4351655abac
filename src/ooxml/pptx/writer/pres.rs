/// Presentation writer for PPTX.
use crate::common::unit::{Emu, Inches};
use crate::ooxml::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

use super::super::format::ImageFormat;
use super::slide::MutableSlide;

/// Slide dimensions offered by PowerPoint's "Slide Size" presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlideLayout {
    /// 10 x 5.625 in
    #[default]
    #[serde(rename = "16x9")]
    Widescreen16x9,
    /// 10 x 7.5 in
    #[serde(rename = "4x3")]
    Standard4x3,
    /// 10 x 6.25 in
    #[serde(rename = "16x10")]
    Widescreen16x10,
}

impl SlideLayout {
    /// Width and height in EMUs.
    pub fn dimensions(&self) -> (Emu, Emu) {
        match self {
            Self::Widescreen16x9 => (Emu(9_144_000), Emu(5_143_500)),
            Self::Standard4x3 => (Emu(9_144_000), Emu(6_858_000)),
            Self::Widescreen16x10 => (Emu(9_144_000), Emu(5_715_000)),
        }
    }

    fn ooxml_type(&self) -> &'static str {
        match self {
            Self::Widescreen16x9 => "screen16x9",
            Self::Standard4x3 => "screen4x3",
            Self::Widescreen16x10 => "screen16x10",
        }
    }
}

/// A mutable PowerPoint presentation for writing.
///
/// The presentation is the single owner of all slides; pipeline stages borrow
/// it mutably one after another.
///
/// # Examples
///
/// ```rust
/// use slidesmith::common::unit::{Emu, Inches, Rect};
/// use slidesmith::ooxml::pptx::{MutablePresentation, SlideLayout};
///
/// let mut pres = MutablePresentation::with_layout(SlideLayout::Widescreen16x9);
/// let slide = pres.add_slide();
/// let bounds = Rect::new(Inches(0.5), Inches(0.5), Inches(9.0), Inches(1.0)).convert::<Emu>();
/// slide.add_text_box("Hello", bounds).font_size(28.0).bold(true);
///
/// assert_eq!(pres.slide_count(), 1);
/// assert_eq!(pres.slide_size_inches(), (Inches(10.0), Inches(5.625)));
/// ```
#[derive(Debug)]
pub struct MutablePresentation {
    pub(crate) slides: Vec<MutableSlide>,
    layout: SlideLayout,
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) created: Option<DateTime<Utc>>,
}

impl MutablePresentation {
    /// Create a new empty 16:9 presentation.
    pub fn new() -> Self {
        Self::with_layout(SlideLayout::default())
    }

    pub fn with_layout(layout: SlideLayout) -> Self {
        Self {
            slides: Vec::new(),
            layout,
            title: None,
            author: None,
            created: None,
        }
    }

    /// Append a new blank slide.
    pub fn add_slide(&mut self) -> &mut MutableSlide {
        let index = self.slides.len();
        let slide_id = (index + 256) as u32;
        self.slides.push(MutableSlide::new(slide_id));
        &mut self.slides[index]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get a slide by index (0-based).
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    /// Get a mutable reference to a slide by index (0-based).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut MutableSlide> {
        self.slides.get_mut(index)
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Slide width in EMUs.
    pub fn slide_width(&self) -> Emu {
        self.layout.dimensions().0
    }

    /// Slide height in EMUs.
    pub fn slide_height(&self) -> Emu {
        self.layout.dimensions().1
    }

    /// Slide width and height in inches.
    pub fn slide_size_inches(&self) -> (Inches, Inches) {
        let (w, h) = self.layout.dimensions();
        (Inches::from(w), Inches::from(h))
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_author(&mut self, author: &str) {
        self.author = Some(author.to_string());
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Creation timestamp written to the core properties. Without one the
    /// package carries no timestamps at all.
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = Some(created);
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// Collect all images (backgrounds first, then pictures) from all slides.
    pub(crate) fn collect_all_images(&self) -> Vec<(usize, &[u8], ImageFormat)> {
        let mut all_images = Vec::new();

        for (slide_index, slide) in self.slides.iter().enumerate() {
            if let Some((data, format)) = slide.background_image() {
                all_images.push((slide_index, data, format));
            }
            for (data, format) in slide.collect_images() {
                all_images.push((slide_index, data, format));
            }
        }

        all_images
    }

    /// Generate presentation.xml content.
    ///
    /// `slide_rel_ids` holds the relationship ID of every slide, in order.
    pub(crate) fn generate_presentation_xml(&self, slide_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        xml.push_str("<p:sldMasterIdLst>");
        xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        let (width, height) = self.layout.dimensions();
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}" type="{}"/>"#,
            width.value(),
            height.value(),
            self.layout.ooxml_type()
        )?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_presentation() {
        let pres = MutablePresentation::new();
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), Emu(9_144_000));
        assert_eq!(pres.slide_height(), Emu(5_143_500));
    }

    #[test]
    fn test_layout_sizes() {
        let pres = MutablePresentation::with_layout(SlideLayout::Standard4x3);
        assert_eq!(pres.slide_size_inches(), (Inches(10.0), Inches(7.5)));
        let pres = MutablePresentation::with_layout(SlideLayout::Widescreen16x10);
        assert_eq!(pres.slide_size_inches(), (Inches(10.0), Inches(6.25)));
    }

    #[test]
    fn test_add_slide_ids() {
        let mut pres = MutablePresentation::new();
        assert_eq!(pres.add_slide().slide_id(), 256);
        assert_eq!(pres.add_slide().slide_id(), 257);
        assert_eq!(pres.slide_count(), 2);
        assert!(pres.slide_mut(2).is_none());
    }

    #[test]
    fn test_presentation_xml() {
        let mut pres = MutablePresentation::new();
        pres.add_slide();
        pres.add_slide();

        let xml = pres
            .generate_presentation_xml(&["rId2".to_string(), "rId3".to_string()])
            .unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="5143500" type="screen16x9"/>"#));
    }

    #[test]
    fn test_layout_from_yaml_name() {
        let layout: SlideLayout = serde_saphyr::from_str("4x3").unwrap();
        assert_eq!(layout, SlideLayout::Standard4x3);
    }
}
