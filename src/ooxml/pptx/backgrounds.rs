//! Slide backgrounds.
//!
//! Templates either paint a flat color behind the slide or stretch a
//! pre-rendered gradient bitmap over it.

use super::format::ImageFormat;

/// Slide background configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideBackground {
    /// Solid color background
    Solid {
        /// RGB color in hexadecimal format (e.g., "1A1A2E")
        color: String,
    },
    /// Picture background stretched over the whole slide
    Picture {
        /// Image data (embedded in the package)
        image_data: Vec<u8>,
        format: ImageFormat,
    },
}

impl SlideBackground {
    pub fn solid(color: impl Into<String>) -> Self {
        SlideBackground::Solid {
            color: color.into(),
        }
    }

    /// Create a picture background, detecting the image format from its bytes.
    ///
    /// Returns `None` for data that is not a recognized image.
    pub fn picture(image_data: Vec<u8>) -> Option<Self> {
        let format = ImageFormat::detect_from_bytes(&image_data)?;
        Some(SlideBackground::Picture { image_data, format })
    }

    /// Image bytes if this is a picture background.
    pub(crate) fn image_data(&self) -> Option<(&[u8], ImageFormat)> {
        match self {
            SlideBackground::Picture { image_data, format } => Some((image_data, *format)),
            SlideBackground::Solid { .. } => None,
        }
    }

    /// `<p:bg>` element. Picture backgrounds need the image relationship ID.
    pub(crate) fn to_xml(&self, rel_id: Option<&str>) -> String {
        let mut xml = String::with_capacity(256);
        xml.push_str("<p:bg><p:bgPr>");

        match self {
            SlideBackground::Solid { color } => {
                xml.push_str("<a:solidFill><a:srgbClr val=\"");
                xml.push_str(color);
                xml.push_str("\"/></a:solidFill>");
            },
            SlideBackground::Picture { .. } => {
                xml.push_str("<a:blipFill dpi=\"0\" rotWithShape=\"1\">");
                xml.push_str("<a:blip r:embed=\"");
                xml.push_str(rel_id.unwrap_or_default());
                xml.push_str("\"/>");
                xml.push_str("<a:srcRect/><a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</a:blipFill>");
            },
        }

        xml.push_str("<a:effectLst/></p:bgPr></p:bg>");
        xml
    }
}
