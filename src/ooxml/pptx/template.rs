//! Fixed parts of a generated presentation.
//!
//! A deck built from templates only needs one slide master, one blank layout
//! and one theme; slides carry all visible content themselves.

const NS_DECL: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

const EMPTY_SP_TREE: &str = concat!(
    "<p:spTree>",
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    "</p:spTree>",
);

/// Slide master referencing the single layout as `rId1`.
pub fn slide_master_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "<p:sldMaster {ns}>",
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>{tree}</p:cSld>"#,
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
            r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>",
        ),
        ns = NS_DECL,
        tree = EMPTY_SP_TREE,
    )
}

/// Blank slide layout.
pub fn blank_layout_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<p:sldLayout {ns} type="blank" preserve="1">"#,
            r#"<p:cSld name="Blank">{tree}</p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sldLayout>",
        ),
        ns = NS_DECL,
        tree = EMPTY_SP_TREE,
    )
}

/// Dark theme matching the palette the asset generator draws with.
pub fn theme_xml() -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Slidesmith">"#,
    );
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="Slidesmith">"#);
    xml.push_str(r#"<a:dk1><a:srgbClr val="1A1A2E"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>"#);
    xml.push_str(r#"<a:dk2><a:srgbClr val="2D2D44"/></a:dk2>"#);
    xml.push_str(r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#);
    for (name, color) in [
        ("accent1", "667EEA"),
        ("accent2", "764BA2"),
        ("accent3", "00D4AA"),
        ("accent4", "F093FB"),
        ("accent5", "555555"),
        ("accent6", "FFC000"),
        ("hlink", "667EEA"),
        ("folHlink", "764BA2"),
    ] {
        xml.push_str(&format!(
            r#"<a:{name}><a:srgbClr val="{color}"/></a:{name}>"#
        ));
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Slidesmith">"#);
    for group in ["majorFont", "minorFont"] {
        xml.push_str(&format!(
            r#"<a:{group}><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:{group}>"#
        ));
    }
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Slidesmith">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        xml.push_str(&format!(
            r#"<a:ln w="{width}"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#
        ));
    }
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements>");
    xml.push_str("</a:theme>");
    xml
}

/// Extended properties (`docProps/app.xml`).
pub fn app_props_xml(slide_count: usize) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>slidesmith</Application>",
            "<PresentationFormat>On-screen Show</PresentationFormat>",
            "<Slides>{}</Slides>",
            "</Properties>",
        ),
        slide_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_references_layout() {
        let xml = slide_master_xml();
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains("<p:clrMap "));
    }

    #[test]
    fn test_theme_has_all_scheme_sections() {
        let xml = theme_xml();
        for section in ["<a:clrScheme", "<a:fontScheme", "<a:fmtScheme", "<a:folHlink>"] {
            assert!(xml.contains(section), "missing {section}");
        }
    }

    #[test]
    fn test_app_props_slide_count() {
        assert!(app_props_xml(11).contains("<Slides>11</Slides>"));
    }
}
