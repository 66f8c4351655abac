//! Ordered process steps shared by the flowchart asset and the step overlay.

use serde::{Deserialize, Serialize};

/// One entry of a step sequence.
///
/// Horizontal flowcharts draw separators implicitly between boxes and skip
/// explicit separator entries; vertical step stacks draw them as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub text: String,
    /// Hex RGB color, with or without a leading `#`.
    pub color: String,
    #[serde(default)]
    pub is_separator: bool,
}

impl StepDescriptor {
    pub fn step(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
            is_separator: false,
        }
    }

    pub fn separator(glyph: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: glyph.into(),
            color: color.into(),
            is_separator: true,
        }
    }

    /// Color without the leading `#`, upper-cased, as DrawingML expects.
    pub fn hex_color(&self) -> String {
        normalize_hex(&self.color)
    }

    /// Color with a leading `#`, as SVG expects.
    pub fn css_color(&self) -> String {
        format!("#{}", self.color.trim().trim_start_matches('#'))
    }
}

/// Whether `color` is six hex digits, optionally preceded by `#`.
pub fn is_hex_color(color: &str) -> bool {
    let digits = color.strip_prefix('#').unwrap_or(color);
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Strip a leading `#` and upper-case a hex color.
pub fn normalize_hex(color: &str) -> String {
    color.trim().trim_start_matches('#').to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_forms() {
        let step = StepDescriptor::step("Plan", "#667eea");
        assert_eq!(step.hex_color(), "667EEA");
        assert_eq!(step.css_color(), "#667eea");
        assert_eq!(StepDescriptor::separator("↓", "f093fb").css_color(), "#f093fb");
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("667eea"));
        assert!(is_hex_color("#F093FB"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("##667eea"));
        assert!(!is_hex_color("667eeg"));
        assert!(!is_hex_color(r#"#667eea" bogus="1"#));
    }

    #[test]
    fn test_separator_defaults_false_in_yaml() {
        let step: StepDescriptor = serde_saphyr::from_str("text: Plan\ncolor: '#667eea'\n").unwrap();
        assert!(!step.is_separator);
    }
}
