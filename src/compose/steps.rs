//! Vertical step stacks drawn inside a placeholder.

use serde::{Deserialize, Serialize};

use super::check_color;
use super::error::Result;
use crate::common::step::StepDescriptor;
use crate::common::unit::{Emu, Inches, Rect};
use crate::ooxml::pptx::{Geometry, LineStyle, MutableSlide, TextAlign, VerticalAnchor};

/// Geometry of the stack, in inches or as fractions of the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepLayout {
    /// Left edge of the column as a fraction of the placeholder width
    pub x_ratio: f64,
    /// Column width as a fraction of the placeholder width
    pub width_ratio: f64,
    /// Gap between the placeholder top and the first item
    pub top_padding: Inches,
    pub box_height: Inches,
    pub box_advance: Inches,
    pub separator_height: Inches,
    pub separator_advance: Inches,
    pub corner_radius: Inches,
    pub label_font_size: f64,
    pub label_color: String,
    pub separator_font_size: f64,
    pub line_width_pt: f64,
}

impl Default for StepLayout {
    fn default() -> Self {
        Self {
            x_ratio: 0.3,
            width_ratio: 0.4,
            top_padding: Inches(0.15),
            box_height: Inches(0.45),
            box_advance: Inches(0.5),
            separator_height: Inches(0.25),
            separator_advance: Inches(0.3),
            corner_radius: Inches(0.05),
            label_font_size: 13.0,
            label_color: "FFFFFF".to_string(),
            separator_font_size: 18.0,
            line_width_pt: 1.0,
        }
    }
}

/// A step with its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedStep<'a> {
    pub step: &'a StepDescriptor,
    pub rect: Rect<Inches>,
}

/// Stack `steps` top to bottom inside `origin`.
///
/// Boxes and separators share one column; each item advances a cursor that
/// starts just below the placeholder's top edge. Nothing is clipped or scaled.
pub fn layout_steps<'a>(
    steps: &'a [StepDescriptor],
    origin: Rect<Inches>,
    layout: &StepLayout,
) -> Vec<PositionedStep<'a>> {
    let x = origin.x + origin.w * layout.x_ratio;
    let w = origin.w * layout.width_ratio;

    steps
        .iter()
        .scan(origin.y + layout.top_padding, |cursor, step| {
            let (height, advance) = if step.is_separator {
                (layout.separator_height, layout.separator_advance)
            } else {
                (layout.box_height, layout.box_advance)
            };
            let rect = Rect::new(x, *cursor, w, height);
            *cursor += advance;
            Some(PositionedStep { step, rect })
        })
        .collect()
}

/// Height the stack occupies below the placeholder top.
pub fn stack_height(positioned: &[PositionedStep<'_>], origin: Rect<Inches>) -> Inches {
    positioned
        .last()
        .map(|last| last.rect.bottom() - origin.y)
        .unwrap_or_default()
}

/// The steps of a step overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsPayload {
    pub steps: Vec<StepDescriptor>,
    #[serde(default)]
    pub layout: StepLayout,
}

impl StepsPayload {
    pub fn new(steps: Vec<StepDescriptor>) -> Self {
        Self {
            steps,
            layout: StepLayout::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_color("step label", &self.layout.label_color)?;
        for (index, step) in self.steps.iter().enumerate() {
            check_color(&format!("step {index}"), &step.color)?;
        }
        Ok(())
    }
}

/// Draw positioned steps. Returns the number of shapes added.
pub(crate) fn draw_steps(
    slide: &mut MutableSlide,
    positioned: &[PositionedStep<'_>],
    layout: &StepLayout,
) -> usize {
    let before = slide.shape_count();
    for item in positioned {
        let bounds = item.rect.convert::<Emu>();
        let color = item.step.hex_color();
        if item.step.is_separator {
            slide
                .add_text_box(&item.step.text, bounds)
                .font_size(layout.separator_font_size)
                .bold(true)
                .color(&color)
                .align(TextAlign::Center)
                .anchor(VerticalAnchor::Middle);
        } else {
            slide
                .add_shape(
                    Geometry::RoundRect {
                        radius: Emu::from(layout.corner_radius),
                    },
                    bounds,
                )
                .fill(&color)
                .line(LineStyle::new(color.clone(), layout.line_width_pt));
            slide
                .add_text_box(&item.step.text, bounds)
                .font_size(layout.label_font_size)
                .bold(true)
                .color(&layout.label_color)
                .align(TextAlign::Center)
                .anchor(VerticalAnchor::Middle);
        }
    }
    slide.shape_count() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ComposeError;

    fn close(a: Inches, b: f64) -> bool {
        (a.value() - b).abs() < 1e-9
    }

    fn process() -> Vec<StepDescriptor> {
        vec![
            StepDescriptor::step("Plan", "667eea"),
            StepDescriptor::separator("↓", "f093fb"),
            StepDescriptor::step("Build", "667eea"),
            StepDescriptor::separator("↓", "f093fb"),
            StepDescriptor::step("Done", "764ba2"),
        ]
    }

    #[test]
    fn test_layout_positions() {
        let origin = Rect::new(Inches(0.5), Inches(1.0), Inches(9.0), Inches(4.0));
        let steps = process();
        let placed = layout_steps(&steps, origin, &StepLayout::default());

        assert_eq!(placed.len(), 5);
        for item in &placed {
            assert!(close(item.rect.x, 3.2));
            assert!(close(item.rect.w, 3.6));
        }
        let tops: Vec<f64> = placed.iter().map(|p| p.rect.y.value()).collect();
        let expected = [1.15, 1.65, 1.95, 2.45, 2.75];
        for (top, want) in tops.iter().zip(expected) {
            assert!((top - want).abs() < 1e-9, "{top} != {want}");
        }
        assert!(close(placed[0].rect.h, 0.45));
        assert!(close(placed[1].rect.h, 0.25));
        assert!(close(stack_height(&placed, origin), 2.2));
    }

    #[test]
    fn test_empty_stack() {
        let origin = Rect::new(Inches(0.0), Inches(0.0), Inches(1.0), Inches(1.0));
        let placed = layout_steps(&[], origin, &StepLayout::default());
        assert!(placed.is_empty());
        assert_eq!(stack_height(&placed, origin), Inches(0.0));
    }

    #[test]
    fn test_validate_colors() {
        assert!(StepsPayload::new(process()).validate().is_ok());

        let mut named = process();
        named[2] = StepDescriptor::step("Build", "red");
        let err = StepsPayload::new(named).validate().unwrap_err();
        assert!(matches!(err, ComposeError::InvalidColor { ref field, .. } if field == "step 2"));

        let mut payload = StepsPayload::new(process());
        payload.layout.label_color = "white".to_string();
        assert!(matches!(payload.validate(), Err(ComposeError::InvalidColor { .. })));
    }

    #[test]
    fn test_draw_steps_shape_count() {
        let mut pres = crate::ooxml::pptx::MutablePresentation::new();
        let slide = pres.add_slide();
        let origin = Rect::new(Inches(0.5), Inches(1.0), Inches(9.0), Inches(4.0));
        let steps = process();
        let layout = StepLayout::default();
        let placed = layout_steps(&steps, origin, &layout);

        // three boxes with a label each, two separators
        assert_eq!(draw_steps(slide, &placed, &layout), 8);
        let label = &slide.shapes()[1];
        assert_eq!(label.text(), Some("Plan"));
        assert_eq!(label.text_format().and_then(|f| f.size), Some(13.0));
        assert_eq!(slide.shapes()[2].text_format().and_then(|f| f.color.clone()), Some("F093FB".to_string()));
    }
}
