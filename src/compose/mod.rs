//! Overlay composition: tables and step stacks placed inside the first
//! placeholder of a rendered page.
//!
//! Overlays are positioned in inches relative to the placeholder and never
//! resize it. A page without placeholders is left untouched. Composition is
//! not idempotent: composing the same page twice adds the overlay twice.

pub mod error;
pub mod steps;
pub mod table;

pub use error::{ComposeError, Result};
pub use steps::{PositionedStep, StepLayout, StepsPayload, layout_steps, stack_height};
pub use table::{CellStyle, TableCell, TablePayload, TableStyle};

use serde::{Deserialize, Serialize};

use crate::common::step::is_hex_color;
use crate::common::unit::Inches;
use crate::ooxml::pptx::MutablePresentation;
use crate::render::RenderedPage;

/// Content injected into a page after rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Payload {
    #[default]
    None,
    Table(TablePayload),
    Steps(StepsPayload),
}

impl Payload {
    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }

    /// Checks that do not depend on the rendered page.
    pub fn validate(&self) -> Result<()> {
        match self {
            Payload::Table(table) => table.validate(),
            Payload::Steps(steps) => steps.validate(),
            Payload::None => Ok(()),
        }
    }
}

/// Colors end up in DrawingML `srgbClr` attributes, which take six hex digits.
pub(crate) fn check_color(field: &str, value: &str) -> Result<()> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(ComposeError::InvalidColor {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// What to do when a step stack is taller than its placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Place the stack as laid out
    Allow,
    /// Place the stack and log a warning
    #[default]
    Warn,
    /// Fail the page
    Reject,
}

/// A step stack that did not fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overflow {
    pub required: Inches,
    pub available: Inches,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositionReport {
    pub slide_index: usize,
    /// Shapes added to the slide (a table counts as one)
    pub shapes_added: usize,
    /// Name of the placeholder used, if any
    pub placeholder: Option<String>,
    pub overflow: Option<Overflow>,
}

impl CompositionReport {
    fn untouched(slide_index: usize) -> Self {
        Self {
            slide_index,
            shapes_added: 0,
            placeholder: None,
            overflow: None,
        }
    }
}

/// Applies payloads to rendered pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Composer {
    pub overflow: OverflowPolicy,
}

impl Composer {
    pub fn new(overflow: OverflowPolicy) -> Self {
        Self { overflow }
    }

    pub fn compose(
        &self,
        pres: &mut MutablePresentation,
        page: &RenderedPage,
        payload: &Payload,
    ) -> Result<CompositionReport> {
        let slide_index = page.slide_index;
        if payload.is_none() {
            return Ok(CompositionReport::untouched(slide_index));
        }
        let Some(ph) = page.placeholders.first() else {
            log::debug!("slide {}: no placeholder, overlay skipped", slide_index + 1);
            return Ok(CompositionReport::untouched(slide_index));
        };
        let slide = pres
            .slide_mut(slide_index)
            .ok_or(ComposeError::SlideNotFound(slide_index))?;

        let mut report = CompositionReport {
            slide_index,
            shapes_added: 0,
            placeholder: ph.name.clone(),
            overflow: None,
        };

        match payload {
            Payload::None => {},
            Payload::Table(table) => {
                table::inject_table(slide, ph.rect, table)?;
                report.shapes_added = 1;
            },
            Payload::Steps(steps) => {
                steps.validate()?;
                let placed = layout_steps(&steps.steps, ph.rect, &steps.layout);
                let required = stack_height(&placed, ph.rect);
                if required.value() > ph.rect.h.value() + 1e-9 {
                    let overflow = Overflow {
                        required,
                        available: ph.rect.h,
                    };
                    match self.overflow {
                        OverflowPolicy::Allow => {},
                        OverflowPolicy::Warn => {
                            log::warn!(
                                "slide {}: step stack needs {:.2}in, placeholder is {:.2}in",
                                slide_index + 1,
                                required.value(),
                                ph.rect.h.value()
                            );
                        },
                        OverflowPolicy::Reject => {
                            return Err(ComposeError::Overflow {
                                required: required.value(),
                                available: ph.rect.h.value(),
                            });
                        },
                    }
                    report.overflow = Some(overflow);
                }
                report.shapes_added = steps::draw_steps(slide, &placed, &steps.layout);
            },
        }

        log::info!(
            "slide {}: composed {} shape(s) into placeholder {}",
            slide_index + 1,
            report.shapes_added,
            report.placeholder.as_deref().unwrap_or("#0")
        );
        Ok(report)
    }
}

/// Compose with the default policy (warn on overflow).
pub fn compose(
    pres: &mut MutablePresentation,
    page: &RenderedPage,
    payload: &Payload,
) -> Result<CompositionReport> {
    Composer::default().compose(pres, page, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::step::StepDescriptor;
    use crate::common::unit::Rect;
    use crate::render::Placeholder;

    fn page_with(pres: &mut MutablePresentation, h: f64) -> RenderedPage {
        let slide_index = pres.slide_count();
        pres.add_slide();
        RenderedPage {
            slide_index,
            placeholders: vec![Placeholder {
                name: Some("area".to_string()),
                rect: Rect::new(Inches(0.5), Inches(1.0), Inches(9.0), Inches(h)),
            }],
        }
    }

    fn tall_steps() -> Payload {
        let steps = (0..10)
            .map(|i| StepDescriptor::step(format!("step {i}"), "667eea"))
            .collect();
        Payload::Steps(StepsPayload::new(steps))
    }

    #[test]
    fn test_zero_placeholders_is_noop() {
        let mut pres = MutablePresentation::new();
        pres.add_slide();
        let page = RenderedPage {
            slide_index: 0,
            placeholders: Vec::new(),
        };
        let payload = Payload::Table(TablePayload::new(vec![vec!["a".into()]], vec![1.0]));

        let report = compose(&mut pres, &page, &payload).unwrap();
        assert_eq!(report.shapes_added, 0);
        assert_eq!(pres.slide(0).unwrap().shape_count(), 0);
    }

    #[test]
    fn test_table_lands_in_placeholder() {
        let mut pres = MutablePresentation::new();
        let page = page_with(&mut pres, 4.0);
        let payload = Payload::Table(TablePayload::new(
            vec![vec!["a".into(), "b".into()], vec!["c".into(), "d".into()]],
            vec![0.5, 0.5],
        ));

        let report = compose(&mut pres, &page, &payload).unwrap();
        assert_eq!(report.placeholder.as_deref(), Some("area"));
        let slide = pres.slide(0).unwrap();
        assert_eq!(slide.table_count(), 1);
        assert_eq!(
            slide.shapes()[0].bounds(),
            page.placeholders[0].rect.convert::<crate::common::unit::Emu>()
        );
    }

    #[test]
    fn test_invalid_table_adds_nothing() {
        let mut pres = MutablePresentation::new();
        let page = page_with(&mut pres, 4.0);
        let payload = Payload::Table(TablePayload::new(vec![vec!["a".into()]], vec![0.5, 0.5]));
        assert!(matches!(
            compose(&mut pres, &page, &payload),
            Err(ComposeError::InvalidTable(_))
        ));
        assert_eq!(pres.slide(0).unwrap().shape_count(), 0);
    }

    #[test]
    fn test_bad_step_color_adds_nothing() {
        let mut pres = MutablePresentation::new();
        let page = page_with(&mut pres, 4.0);
        let payload = Payload::Steps(StepsPayload::new(vec![
            StepDescriptor::step("a", "667eea"),
            StepDescriptor::step("b", r#"#667eea" bogus="1"#),
        ]));
        assert!(matches!(payload.validate(), Err(ComposeError::InvalidColor { .. })));
        assert!(matches!(
            compose(&mut pres, &page, &payload),
            Err(ComposeError::InvalidColor { .. })
        ));
        assert_eq!(pres.slide(0).unwrap().shape_count(), 0);
    }

    #[test]
    fn test_overflow_policies() {
        // ten boxes need 0.15 + 9 * 0.5 + 0.45 = 5.1in
        let mut pres = MutablePresentation::new();
        let page = page_with(&mut pres, 4.0);

        let report = Composer::new(OverflowPolicy::Warn)
            .compose(&mut pres, &page, &tall_steps())
            .unwrap();
        let overflow = report.overflow.unwrap();
        assert!((overflow.required.value() - 5.1).abs() < 1e-9);
        assert_eq!(report.shapes_added, 20);

        let page = page_with(&mut pres, 4.0);
        let report = Composer::new(OverflowPolicy::Allow)
            .compose(&mut pres, &page, &tall_steps())
            .unwrap();
        assert!(report.overflow.is_some());

        let page = page_with(&mut pres, 4.0);
        let err = Composer::new(OverflowPolicy::Reject)
            .compose(&mut pres, &page, &tall_steps())
            .unwrap_err();
        assert!(matches!(err, ComposeError::Overflow { .. }));
        assert_eq!(pres.slide(page.slide_index).unwrap().shape_count(), 0);
    }

    #[test]
    fn test_missing_slide() {
        let mut pres = MutablePresentation::new();
        let page = RenderedPage {
            slide_index: 3,
            placeholders: vec![Placeholder {
                name: None,
                rect: Rect::new(Inches(0.0), Inches(0.0), Inches(1.0), Inches(1.0)),
            }],
        };
        assert!(matches!(
            compose(&mut pres, &page, &tall_steps()),
            Err(ComposeError::SlideNotFound(3))
        ));
    }

    #[test]
    fn test_payload_from_yaml() {
        let yaml = "type: table\ncolumn_ratios: [0.5, 0.5]\nrows:\n  - [a, b]\n";
        let payload: Payload = serde_saphyr::from_str(yaml).unwrap();
        assert!(matches!(payload, Payload::Table(_)));
        assert!(payload.validate().is_ok());
    }
}
