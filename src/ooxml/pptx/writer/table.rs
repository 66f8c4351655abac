/// DrawingML tables hosted in a `p:graphicFrame`.
use crate::common::unit::{Emu, Rect};
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

use super::super::format::{LineStyle, TextAlign, TextFormat, VerticalAnchor};
use super::shape::{write_line, write_paragraphs, write_solid_fill, write_xfrm};

const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

/// Fully resolved formatting of one table cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFormat {
    pub fill: Option<String>,
    pub text: TextFormat,
    pub align: TextAlign,
    pub anchor: VerticalAnchor,
    /// Border applied to all four edges.
    pub border: Option<LineStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCellXml {
    pub text: String,
    pub format: CellFormat,
}

impl TableCellXml {
    pub fn new(text: impl Into<String>, format: CellFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

/// A rectangular table with explicit column widths and row heights in EMUs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFrame {
    pub(crate) bounds: Rect<Emu>,
    pub(crate) col_widths: Vec<Emu>,
    pub(crate) row_heights: Vec<Emu>,
    pub(crate) rows: Vec<Vec<TableCellXml>>,
    pub(crate) first_row_header: bool,
}

impl TableFrame {
    /// Build a table frame.
    ///
    /// Every row must have one cell per column width, and there must be one
    /// height per row.
    pub fn new(
        bounds: Rect<Emu>,
        col_widths: Vec<Emu>,
        row_heights: Vec<Emu>,
        rows: Vec<Vec<TableCellXml>>,
    ) -> Result<Self> {
        if col_widths.is_empty() || rows.is_empty() {
            return Err(OoxmlError::InvalidFormat(
                "table needs at least one row and one column".to_string(),
            ));
        }
        if rows.len() != row_heights.len() {
            return Err(OoxmlError::InvalidFormat(format!(
                "table has {} rows but {} row heights",
                rows.len(),
                row_heights.len()
            )));
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != col_widths.len())
        {
            return Err(OoxmlError::InvalidFormat(format!(
                "table row {} has {} cells, expected {}",
                index,
                row.len(),
                col_widths.len()
            )));
        }

        Ok(Self {
            bounds,
            col_widths,
            row_heights,
            rows,
            first_row_header: true,
        })
    }

    /// Whether the first row is flagged as a header row (`firstRow`).
    pub fn with_header_row(mut self, first_row_header: bool) -> Self {
        self.first_row_header = first_row_header;
        self
    }

    pub fn bounds(&self) -> Rect<Emu> {
        self.bounds
    }

    pub fn col_widths(&self) -> &[Emu] {
        &self.col_widths
    }

    pub fn row_heights(&self) -> &[Emu] {
        &self.row_heights
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.col_widths.len()
    }

    /// Cell at (row, column).
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCellXml> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub(crate) fn to_xml(&self, xml: &mut String, shape_id: u32) -> Result<()> {
        xml.push_str("<p:graphicFrame>");
        xml.push_str("<p:nvGraphicFramePr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Table {}"/>"#,
            shape_id, shape_id
        )?;
        xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGraphicFramePr>");

        write_xfrm(xml, "p:xfrm", &self.bounds)?;

        xml.push_str("<a:graphic>");
        write!(xml, r#"<a:graphicData uri="{}">"#, TABLE_URI)?;
        xml.push_str("<a:tbl>");
        write!(
            xml,
            r#"<a:tblPr firstRow="{}" bandRow="0"/>"#,
            u8::from(self.first_row_header)
        )?;

        xml.push_str("<a:tblGrid>");
        for width in &self.col_widths {
            write!(xml, r#"<a:gridCol w="{}"/>"#, width.value())?;
        }
        xml.push_str("</a:tblGrid>");

        for (row, height) in self.rows.iter().zip(&self.row_heights) {
            write!(xml, r#"<a:tr h="{}">"#, height.value())?;
            for cell in row {
                write_cell(xml, cell)?;
            }
            xml.push_str("</a:tr>");
        }

        xml.push_str("</a:tbl>");
        xml.push_str("</a:graphicData>");
        xml.push_str("</a:graphic>");
        xml.push_str("</p:graphicFrame>");
        Ok(())
    }
}

fn write_cell(xml: &mut String, cell: &TableCellXml) -> Result<()> {
    let format = &cell.format;
    xml.push_str("<a:tc>");
    xml.push_str("<a:txBody><a:bodyPr/><a:lstStyle/>");
    write_paragraphs(xml, &cell.text, &format.text, format.align)?;
    xml.push_str("</a:txBody>");

    write!(xml, r#"<a:tcPr anchor="{}">"#, format.anchor.as_ooxml())?;
    if let Some(ref border) = format.border {
        for tag in ["a:lnL", "a:lnR", "a:lnT", "a:lnB"] {
            write_line(xml, tag, border)?;
        }
    }
    if let Some(ref fill) = format.fill {
        write_solid_fill(xml, fill)?;
    }
    xml.push_str("</a:tcPr>");
    xml.push_str("</a:tc>");
    Ok(())
}

/// Split `total` into parts proportional to `ratios`.
///
/// Boundaries are rounded cumulatively, so the parts always sum to exactly
/// `total` and each part is within one EMU of `total * ratio`.
pub fn split_extent(total: Emu, ratios: &[f64]) -> Vec<Emu> {
    let sum: f64 = ratios.iter().sum();
    if ratios.is_empty() || sum <= 0.0 {
        return Vec::new();
    }

    let mut parts = Vec::with_capacity(ratios.len());
    let mut acc = 0.0;
    let mut prev = 0i64;
    for (index, ratio) in ratios.iter().enumerate() {
        acc += ratio;
        let boundary = if index + 1 == ratios.len() {
            total.value()
        } else {
            (total.value() as f64 * acc / sum).round() as i64
        };
        parts.push(Emu(boundary - prev));
        prev = boundary;
    }
    parts
}
