//! Serialization of a [`MutablePresentation`] into an OPC package.
//!
//! Part layout:
//!
//! - `/ppt/presentation.xml` relates to the master (`rId1`), every slide in
//!   order, then the theme
//! - one master, one blank layout and one theme
//! - `/ppt/slides/slideN.xml`, each relating to the layout (`rId1`) and its
//!   images
//! - `/ppt/media/imageN.ext`, one part per distinct image
//! - `/docProps/core.xml` and `/docProps/app.xml`

use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackURI, PackageWriter, Part};
use crate::ooxml::pptx::template;
use chrono::SecondsFormat;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use super::pres::MutablePresentation;
use super::relmap::RelationshipMapper;

const PRESENTATION_URI: &str = "/ppt/presentation.xml";
const MASTER_URI: &str = "/ppt/slideMasters/slideMaster1.xml";
const LAYOUT_URI: &str = "/ppt/slideLayouts/slideLayout1.xml";
const THEME_URI: &str = "/ppt/theme/theme1.xml";
const CORE_URI: &str = "/docProps/core.xml";
const APP_URI: &str = "/docProps/app.xml";

impl MutablePresentation {
    /// Build the OPC package for this presentation.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut package = OpcPackage::new();

        let presentation_uri = PackURI::new(PRESENTATION_URI)?;
        let master_uri = PackURI::new(MASTER_URI)?;
        let layout_uri = PackURI::new(LAYOUT_URI)?;
        let theme_uri = PackURI::new(THEME_URI)?;
        let core_uri = PackURI::new(CORE_URI)?;
        let app_uri = PackURI::new(APP_URI)?;

        package.relate_to(&presentation_uri, rt::OFFICE_DOCUMENT);
        package.relate_to(&core_uri, rt::CORE_PROPERTIES);
        package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        // Media: one part per distinct image, numbered by first use
        let mut media: HashMap<&[u8], PackURI> = HashMap::new();
        for (_, data, format) in self.collect_all_images() {
            if media.contains_key(data) {
                continue;
            }
            let uri = PackURI::new(format!(
                "/ppt/media/image{}.{}",
                media.len() + 1,
                format.extension()
            ))?;
            package.add_part(Part::new(uri.clone(), format.mime_type(), data.to_vec()))?;
            media.insert(data, uri);
        }

        // Slides
        let mut rel_mapper = RelationshipMapper::new();
        let mut slide_uris = Vec::with_capacity(self.slides.len());
        for (slide_index, slide) in self.slides.iter().enumerate() {
            let slide_uri = PackURI::new(format!("/ppt/slides/slide{}.xml", slide_index + 1))?;
            let mut part = Part::new(slide_uri.clone(), ct::PML_SLIDE, Vec::new());
            part.relate_to(&layout_uri, rt::SLIDE_LAYOUT);

            if let Some((data, _)) = slide.background_image()
                && let Some(uri) = media.get(data)
            {
                rel_mapper.add_background(slide_index, part.relate_to(uri, rt::IMAGE));
            }
            for (image_index, (data, _)) in slide.collect_images().into_iter().enumerate() {
                if let Some(uri) = media.get(data) {
                    rel_mapper.add_image(slide_index, image_index, part.relate_to(uri, rt::IMAGE));
                }
            }

            part.set_blob(slide.to_xml(slide_index, &rel_mapper)?.into_bytes());
            package.add_part(part)?;
            slide_uris.push(slide_uri);
        }

        // Presentation part: master, slides, theme
        let mut pres_part = Part::new(presentation_uri, ct::PML_PRESENTATION_MAIN, Vec::new());
        pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);
        let slide_rel_ids: Vec<String> = slide_uris
            .iter()
            .map(|uri| pres_part.relate_to(uri, rt::SLIDE))
            .collect();
        pres_part.relate_to(&theme_uri, rt::THEME);
        pres_part.set_blob(self.generate_presentation_xml(&slide_rel_ids)?.into_bytes());
        package.add_part(pres_part)?;

        let mut master = Part::xml(master_uri.clone(), ct::PML_SLIDE_MASTER, template::slide_master_xml());
        master.relate_to(&layout_uri, rt::SLIDE_LAYOUT);
        master.relate_to(&theme_uri, rt::THEME);
        package.add_part(master)?;

        let mut layout = Part::xml(layout_uri, ct::PML_SLIDE_LAYOUT, template::blank_layout_xml());
        layout.relate_to(&master_uri, rt::SLIDE_MASTER);
        package.add_part(layout)?;

        package.add_part(Part::xml(theme_uri, ct::OFC_THEME, template::theme_xml()))?;
        package.add_part(Part::xml(core_uri, ct::OPC_CORE_PROPERTIES, self.core_props_xml()?))?;
        package.add_part(Part::xml(
            app_uri,
            ct::OFC_EXTENDED_PROPERTIES,
            template::app_props_xml(self.slide_count()),
        ))?;

        Ok(package)
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        Ok(PackageWriter::to_bytes(&package)?)
    }

    /// Write the presentation to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn core_props_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        ));
        if let Some(ref title) = self.title {
            write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
        }
        if let Some(ref author) = self.author {
            write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(author))?;
            write!(
                xml,
                "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
                escape_xml(author)
            )?;
        }
        if let Some(created) = self.created {
            let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
            write!(
                xml,
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#
            )?;
            write!(
                xml,
                r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#
            )?;
        }
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::unit::{Emu, Rect};
    use crate::ooxml::pptx::SlideBackground;
    use chrono::TimeZone;
    use std::io::{Cursor, Read};

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample() -> MutablePresentation {
        let mut pres = MutablePresentation::new();
        pres.set_title("Deck & Co");
        pres.set_author("slidesmith");
        pres.set_created(chrono::Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());

        let rect = Rect::new(Emu(0), Emu(0), Emu(914_400), Emu(914_400));
        let first = pres.add_slide();
        first.set_background(SlideBackground::picture(PNG.to_vec()).unwrap());
        first.add_text_box("Title", rect);
        let second = pres.add_slide();
        second.add_picture(PNG.to_vec(), rect, "same image").unwrap();
        pres
    }

    fn part_names(package: &OpcPackage) -> Vec<String> {
        package
            .iter_parts()
            .map(|p| p.partname().to_string())
            .collect()
    }

    #[test]
    fn test_package_parts() {
        let package = sample().to_package().unwrap();
        let names = part_names(&package);
        for expected in [
            "/ppt/presentation.xml",
            "/ppt/slideMasters/slideMaster1.xml",
            "/ppt/slideLayouts/slideLayout1.xml",
            "/ppt/theme/theme1.xml",
            "/ppt/slides/slide1.xml",
            "/ppt/slides/slide2.xml",
            "/ppt/media/image1.png",
            "/docProps/core.xml",
            "/docProps/app.xml",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        // identical bytes share one media part
        assert_eq!(names.iter().filter(|n| n.starts_with("/ppt/media/")).count(), 1);
        assert_eq!(package.rels().len(), 3);
    }

    #[test]
    fn test_presentation_rels_order() {
        let package = sample().to_package().unwrap();
        let pres = package
            .iter_parts()
            .find(|p| p.partname().as_str() == PRESENTATION_URI)
            .unwrap();
        let targets: Vec<&str> = pres.rels().iter().map(|r| r.target_ref()).collect();
        assert_eq!(
            targets,
            vec![
                "slideMasters/slideMaster1.xml",
                "slides/slide1.xml",
                "slides/slide2.xml",
                "theme/theme1.xml"
            ]
        );
    }

    #[test]
    fn test_core_props() {
        let xml = sample().core_props_xml().unwrap();
        assert!(xml.contains("<dc:title>Deck &amp; Co</dc:title>"));
        assert!(xml.contains("<dc:creator>slidesmith</dc:creator>"));
        assert!(xml.contains(">2025-01-02T03:04:05Z</dcterms:created>"));
    }

    #[test]
    fn test_to_bytes_is_zip_and_deterministic() {
        let pres = sample();
        let bytes = pres.to_bytes().unwrap();
        assert_eq!(bytes, pres.to_bytes().unwrap());

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content_types = String::new();
        archive
            .by_name("[Content_Types].xml")
            .unwrap()
            .read_to_string(&mut content_types)
            .unwrap();
        assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(archive.by_name("ppt/slides/_rels/slide2.xml.rels").is_ok());
    }
}
