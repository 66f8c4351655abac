//! Horizontal flowchart: rounded boxes joined by arrow glyphs.

use serde::{Deserialize, Serialize};

use super::svg::{SvgBuilder, TextStyle};
use crate::common::step::StepDescriptor;

/// Canvas and box geometry of a flowchart, in SVG pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowchartLayout {
    pub width: f64,
    pub height: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub arrow_width: f64,
    pub start_x: f64,
    pub corner_radius: f64,
    pub stroke_width: f64,
    pub background: String,
    pub font_family: String,
    pub font_size: f64,
    pub text_color: String,
    pub arrow_glyph: String,
    pub arrow_font_size: f64,
    pub arrow_color: String,
}

impl Default for FlowchartLayout {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 200.0,
            box_width: 180.0,
            box_height: 80.0,
            arrow_width: 50.0,
            start_x: 30.0,
            corner_radius: 8.0,
            stroke_width: 2.0,
            background: "#1a1a2e".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 16.0,
            text_color: "#ffffff".to_string(),
            arrow_glyph: "→".to_string(),
            arrow_font_size: 28.0,
            arrow_color: "#f093fb".to_string(),
        }
    }
}

impl FlowchartLayout {
    /// Top edge shared by all boxes: the boxes are vertically centered.
    pub fn start_y(&self) -> f64 {
        (self.height - self.box_height) / 2.0
    }
}

/// A flowchart asset: the ordered steps and how to draw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowchartSpec {
    pub steps: Vec<StepDescriptor>,
    #[serde(default)]
    pub layout: FlowchartLayout,
}

/// A box placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowBox<'a> {
    pub x: f64,
    pub y: f64,
    pub step: &'a StepDescriptor,
}

/// An arrow glyph between two boxes; `(x, y)` is its text anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowArrow {
    pub x: f64,
    pub y: f64,
}

impl FlowchartSpec {
    pub fn new(steps: Vec<StepDescriptor>) -> Self {
        Self {
            steps,
            layout: FlowchartLayout::default(),
        }
    }

    /// The six-step "think, describe, implement, verify" process.
    pub fn default_process() -> Self {
        Self::new(vec![
            StepDescriptor::step("想清楚要什么", "#667eea"),
            StepDescriptor::step("描述给AI", "#667eea"),
            StepDescriptor::step("AI快速实现", "#667eea"),
            StepDescriptor::step("验证效果", "#667eea"),
            StepDescriptor::step("满意？\n否则返回修改", "#00d4aa"),
            StepDescriptor::step("✅ 完成", "#764ba2"),
        ])
    }

    /// Steps drawn as boxes. Explicit separators are dropped since arrows
    /// are implied between consecutive boxes.
    fn box_steps(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter().filter(|s| !s.is_separator)
    }

    /// Place boxes and arrows left to right.
    ///
    /// For N boxes there are exactly N - 1 arrows.
    pub fn layout(&self) -> (Vec<FlowBox<'_>>, Vec<FlowArrow>) {
        let l = &self.layout;
        let y = l.start_y();
        let count = self.box_steps().count();

        let mut boxes = Vec::with_capacity(count);
        let mut arrows = Vec::with_capacity(count.saturating_sub(1));
        let mut x = l.start_x;
        for (index, step) in self.box_steps().enumerate() {
            boxes.push(FlowBox { x, y, step });
            x += l.box_width;
            if index + 1 < count {
                arrows.push(FlowArrow {
                    x: x + l.arrow_width / 2.0,
                    y: y + l.box_height / 2.0 + 10.0,
                });
                x += l.arrow_width;
            }
        }
        (boxes, arrows)
    }

    /// Horizontal centers of the boxes.
    pub fn box_centers(&self) -> Vec<f64> {
        let half = self.layout.box_width / 2.0;
        self.layout().0.iter().map(|b| b.x + half).collect()
    }

    /// Baselines for the lines of a box label: line `i` of `n` sits at
    /// `center - (n - 1) * 10 + i * 20 + 6`.
    pub fn line_baselines(&self, line_count: usize) -> Vec<f64> {
        let center = self.layout.start_y() + self.layout.box_height / 2.0;
        let n = line_count as f64;
        (0..line_count)
            .map(|i| center - (n - 1.0) * 10.0 + i as f64 * 20.0 + 6.0)
            .collect()
    }

    pub fn svg(&self, width: f64, height: f64) -> String {
        let l = &self.layout;
        let text_style = TextStyle {
            font_family: &l.font_family,
            font_size: l.font_size,
            bold: true,
            fill: &l.text_color,
        };
        let arrow_style = TextStyle {
            font_family: &l.font_family,
            font_size: l.arrow_font_size,
            bold: true,
            fill: &l.arrow_color,
        };

        let mut svg = SvgBuilder::new(width, height);
        svg.background(&l.background);

        let (boxes, arrows) = self.layout();
        for flow_box in &boxes {
            svg.rounded_rect(
                flow_box.x,
                flow_box.y,
                l.box_width,
                l.box_height,
                l.corner_radius,
                &flow_box.step.css_color(),
                l.stroke_width,
            );
            let lines: Vec<&str> = flow_box.step.text.split('\n').collect();
            let cx = flow_box.x + l.box_width / 2.0;
            for (line, baseline) in lines.iter().zip(self.line_baselines(lines.len())) {
                svg.text(cx, baseline, line, &text_style);
            }
        }
        for arrow in &arrows {
            svg.text(arrow.x, arrow.y, &l.arrow_glyph, &arrow_style);
        }

        svg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_centers() {
        let centers = FlowchartSpec::default_process().box_centers();
        assert_eq!(&centers[..3], &[120.0, 350.0, 580.0]);
        assert_eq!(centers.len(), 6);
    }

    #[test]
    fn test_arrow_count_and_position() {
        let spec = FlowchartSpec::default_process();
        let (boxes, arrows) = spec.layout();
        assert_eq!(boxes.len(), 6);
        assert_eq!(arrows.len(), 5);
        assert_eq!(arrows[0], FlowArrow { x: 235.0, y: 110.0 });
        assert_eq!(boxes[0].y, 60.0);
    }

    #[test]
    fn test_explicit_separators_are_skipped() {
        let spec = FlowchartSpec::new(vec![
            StepDescriptor::step("a", "#667eea"),
            StepDescriptor::separator("↓", "#f093fb"),
            StepDescriptor::step("b", "#667eea"),
        ]);
        let (boxes, arrows) = spec.layout();
        assert_eq!(boxes.len(), 2);
        assert_eq!(arrows.len(), 1);
    }

    #[test]
    fn test_line_baselines() {
        let spec = FlowchartSpec::default_process();
        assert_eq!(spec.line_baselines(1), vec![106.0]);
        assert_eq!(spec.line_baselines(2), vec![96.0, 116.0]);
    }

    #[test]
    fn test_svg_structure() {
        let spec = FlowchartSpec::default_process();
        let svg = spec.svg(1400.0, 200.0);
        assert_eq!(svg.matches("<rect x=").count(), 6);
        assert_eq!(svg.matches(">→</text>").count(), 5);
        assert!(svg.contains(r##"<rect x="30" y="60" width="180" height="80" rx="8" ry="8" fill="#667eea""##));
        assert!(svg.contains(">否则返回修改</text>"));
        assert_eq!(svg, spec.svg(1400.0, 200.0));
    }

    #[test]
    fn test_empty_flowchart() {
        let spec = FlowchartSpec::new(Vec::new());
        let (boxes, arrows) = spec.layout();
        assert!(boxes.is_empty() && arrows.is_empty());
    }
}
