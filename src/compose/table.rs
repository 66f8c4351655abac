//! Table injection into a placeholder.

use serde::{Deserialize, Serialize};

use super::check_color;
use super::error::{ComposeError, Result};
use crate::common::step::normalize_hex;
use crate::common::unit::{Emu, Inches, Rect};
use crate::ooxml::pptx::{
    CellFormat, LineStyle, MutableSlide, TableCellXml, TableFrame, TextAlign, TextFormat,
    VerticalAnchor, split_extent,
};

const RATIO_TOLERANCE: f64 = 1e-6;

/// Optional overrides for a cell's look. Unset fields fall through to the
/// next layer (cell over header over table defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub fill: Option<String>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub font_size: Option<f64>,
}

impl CellStyle {
    fn check_colors(&self, scope: &str) -> Result<()> {
        if let Some(fill) = &self.fill {
            check_color(&format!("{scope} fill"), fill)?;
        }
        if let Some(color) = &self.color {
            check_color(&format!("{scope} text"), color)?;
        }
        Ok(())
    }

    /// `self` layered over `base`.
    pub fn over(&self, base: &CellStyle) -> CellStyle {
        CellStyle {
            fill: self.fill.clone().or_else(|| base.fill.clone()),
            color: self.color.clone().or_else(|| base.color.clone()),
            bold: self.bold.or(base.bold),
            font_size: self.font_size.or(base.font_size),
        }
    }
}

/// One table cell: plain text, or text with its own styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    Plain(String),
    Styled {
        text: String,
        #[serde(default)]
        fill: Option<String>,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        bold: Option<bool>,
        #[serde(default)]
        font_size: Option<f64>,
    },
}

impl TableCell {
    pub fn text(&self) -> &str {
        match self {
            TableCell::Plain(text) | TableCell::Styled { text, .. } => text,
        }
    }

    pub fn style(&self) -> CellStyle {
        match self {
            TableCell::Plain(_) => CellStyle::default(),
            TableCell::Styled {
                fill,
                color,
                bold,
                font_size,
                ..
            } => CellStyle {
                fill: fill.clone(),
                color: color.clone(),
                bold: *bold,
                font_size: *font_size,
            },
        }
    }

    /// Styled cell builder starting from plain text.
    pub fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        TableCell::Styled {
            text: text.into(),
            fill: style.fill,
            color: style.color,
            bold: style.bold,
            font_size: style.font_size,
        }
    }
}

impl From<&str> for TableCell {
    fn from(text: &str) -> Self {
        TableCell::Plain(text.to_string())
    }
}

/// Table-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub border_color: String,
    pub border_width_pt: f64,
    pub fill: String,
    pub color: String,
    pub font_size: f64,
    pub align: TextAlign,
    pub valign: VerticalAnchor,
    /// Styling for every cell of the first row
    pub header: Option<CellStyle>,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            border_color: "555555".to_string(),
            border_width_pt: 1.0,
            fill: "2D2D44".to_string(),
            color: "FFFFFF".to_string(),
            font_size: 11.0,
            align: TextAlign::Center,
            valign: VerticalAnchor::Middle,
            header: None,
        }
    }
}

impl TableStyle {
    fn base(&self) -> CellStyle {
        CellStyle {
            fill: Some(self.fill.clone()),
            color: Some(self.color.clone()),
            bold: Some(false),
            font_size: Some(self.font_size),
        }
    }

    /// Final formatting of a cell in row `row`.
    pub fn resolve(&self, row: usize, cell: &TableCell) -> CellFormat {
        let base = self.base();
        let layered = match (&self.header, row) {
            (Some(header), 0) => cell.style().over(&header.over(&base)),
            _ => cell.style().over(&base),
        };
        CellFormat {
            fill: layered.fill.as_deref().map(normalize_hex),
            text: TextFormat {
                size: layered.font_size,
                bold: layered.bold,
                color: layered.color.as_deref().map(normalize_hex),
                ..TextFormat::default()
            },
            align: self.align,
            anchor: self.valign,
            border: Some(LineStyle::new(
                normalize_hex(&self.border_color),
                self.border_width_pt,
            )),
        }
    }
}

/// A table to place in a page's first placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePayload {
    pub rows: Vec<Vec<TableCell>>,
    /// Fraction of the placeholder width per column; sums to 1.0.
    pub column_ratios: Vec<f64>,
    #[serde(default)]
    pub style: TableStyle,
}

impl TablePayload {
    pub fn new(rows: Vec<Vec<TableCell>>, column_ratios: Vec<f64>) -> Self {
        Self {
            rows,
            column_ratios,
            style: TableStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(ComposeError::InvalidTable("table has no rows".to_string()));
        }
        let columns = self.column_ratios.len();
        if columns == 0 {
            return Err(ComposeError::InvalidTable("no column ratios".to_string()));
        }
        if let Some((index, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns)
        {
            return Err(ComposeError::InvalidTable(format!(
                "row {} has {} cells but {} column ratios are declared",
                index,
                row.len(),
                columns
            )));
        }
        if self.column_ratios.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(ComposeError::InvalidTable(
                "column ratios must be positive".to_string(),
            ));
        }
        let sum: f64 = self.column_ratios.iter().sum();
        if (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(ComposeError::InvalidTable(format!(
                "column ratios sum to {} instead of 1",
                sum
            )));
        }

        let style = &self.style;
        check_color("table border", &style.border_color)?;
        check_color("table fill", &style.fill)?;
        check_color("table text", &style.color)?;
        if let Some(header) = &style.header {
            header.check_colors("header")?;
        }
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                cell.style().check_colors(&format!("cell ({r}, {c})"))?;
            }
        }
        Ok(())
    }

    /// Column widths for a placeholder of width `width`.
    pub fn column_widths(&self, width: Inches) -> Vec<Emu> {
        split_extent(Emu::from(width), &self.column_ratios)
    }

    /// Lay the table out over `rect`: fixed column ratios, equal row heights.
    pub fn to_frame(&self, rect: Rect<Inches>) -> Result<TableFrame> {
        self.validate()?;
        let bounds = rect.convert::<Emu>();
        let col_widths = split_extent(bounds.w, &self.column_ratios);
        let row_heights = split_extent(bounds.h, &vec![1.0; self.rows.len()]);
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .map(|cell| TableCellXml::new(cell.text(), self.style.resolve(r, cell)))
                    .collect()
            })
            .collect();

        let header = self.style.header.is_some();
        Ok(TableFrame::new(bounds, col_widths, row_heights, rows)?.with_header_row(header))
    }
}

/// Add the table to `slide`, filling `rect` exactly.
pub(crate) fn inject_table(
    slide: &mut MutableSlide,
    rect: Rect<Inches>,
    payload: &TablePayload,
) -> Result<()> {
    let frame = payload.to_frame(rect)?;
    log::debug!(
        "table {}x{} at ({}, {}) size {} x {}",
        frame.row_count(),
        frame.column_count(),
        rect.x,
        rect.y,
        rect.w,
        rect.h
    );
    slide.add_table(frame);
    Ok(())
}
