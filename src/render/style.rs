//! The subset of inline CSS understood by the markup renderer.

use crate::common::step::normalize_hex;
use crate::common::unit::{Inches, Pt, Px};

/// Declarations of one `style` attribute, in source order. Later
/// declarations of the same property win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    decls: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn parse(style: &str) -> Self {
        let decls = style
            .split(';')
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim().trim_end_matches("!important").trim();
                (!name.is_empty() && !value.is_empty()).then(|| (name, value.to_string()))
            })
            .collect();
        Self { decls }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.decls
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn length(&self, name: &str) -> Option<Inches> {
        self.get(name).and_then(parse_length)
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self.get("position"), Some("absolute") | Some("fixed"))
    }

    /// Font size in points (`px` values convert at 0.75 pt per px).
    pub fn font_size(&self) -> Option<f64> {
        self.length("font-size").map(|len| Pt::from(len).value())
    }

    pub fn color(&self) -> Option<String> {
        self.get("color").and_then(parse_color)
    }

    /// Solid background color from `background-color`, or from a
    /// `background` shorthand without an image.
    pub fn background_color(&self) -> Option<String> {
        if let Some(color) = self.get("background-color").and_then(parse_color) {
            return Some(color);
        }
        self.get("background")
            .filter(|bg| !bg.contains("url(") && !bg.contains("gradient("))
            .and_then(|bg| bg.split_whitespace().find_map(parse_color))
    }

    /// `url(..)` of `background-image` or the `background` shorthand.
    pub fn background_image(&self) -> Option<String> {
        ["background-image", "background"]
            .iter()
            .find_map(|name| self.get(name).and_then(parse_url))
    }

    pub fn is_bold(&self) -> bool {
        match self.get("font-weight") {
            Some("bold") | Some("bolder") => true,
            Some(weight) => weight.parse::<u32>().is_ok_and(|w| w >= 600),
            None => false,
        }
    }

    pub fn is_italic(&self) -> bool {
        matches!(self.get("font-style"), Some("italic") | Some("oblique"))
    }

    /// First family of `font-family`, unquoted.
    pub fn font_family(&self) -> Option<String> {
        self.get("font-family")?
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .find(|f| !f.is_empty())
            .map(str::to_string)
    }
}

/// Parse a CSS length in `px`, `pt` or `in`. Unitless zero is accepted.
pub fn parse_length(value: &str) -> Option<Inches> {
    let value = value.trim();
    let (number, unit) = value
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .map(|i| value.split_at(i))
        .unwrap_or((value, ""));
    let number: f64 = number.trim().parse().ok()?;
    match unit {
        "px" => Some(Inches::from(Px(number))),
        "pt" => Some(Inches::from(Pt(number))),
        "in" => Some(Inches(number)),
        "" if number == 0.0 => Some(Inches(0.0)),
        _ => None,
    }
}

/// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or a basic color keyword into
/// upper-case hex without `#`.
pub fn parse_color(value: &str) -> Option<String> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            6 => Some(normalize_hex(hex)),
            3 => Some(hex.chars().flat_map(|c| [c, c]).collect::<String>().to_ascii_uppercase()),
            _ => None,
        };
    }
    if let Some(args) = value
        .strip_prefix("rgb(")
        .or_else(|| value.strip_prefix("rgba("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels: Vec<u8> = args
            .split(',')
            .take(3)
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .ok()?;
        if channels.len() != 3 {
            return None;
        }
        return Some(format!("{:02X}{:02X}{:02X}", channels[0], channels[1], channels[2]));
    }
    let named = match value.to_ascii_lowercase().as_str() {
        "white" => "FFFFFF",
        "black" => "000000",
        "red" => "FF0000",
        "green" => "008000",
        "blue" => "0000FF",
        "gray" | "grey" => "808080",
        _ => return None,
    };
    Some(named.to_string())
}

fn parse_url(value: &str) -> Option<String> {
    let start = value.find("url(")? + 4;
    let end = start + value[start..].find(')')?;
    let url = value[start..end]
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    (!url.is_empty()).then(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let style = InlineStyle::parse("position: absolute; left: 48px; top:96px;; color: #fff; color: #667eea");
        assert!(style.is_absolute());
        assert_eq!(style.length("left"), Some(Inches(0.5)));
        assert_eq!(style.length("top"), Some(Inches(1.0)));
        assert_eq!(style.color().as_deref(), Some("667EEA"));
    }

    #[test]
    fn test_lengths() {
        assert_eq!(parse_length("720pt"), Some(Inches(10.0)));
        assert_eq!(parse_length("960px"), Some(Inches(10.0)));
        assert_eq!(parse_length("0"), Some(Inches(0.0)));
        assert_eq!(parse_length("50%"), None);
        assert_eq!(parse_length("auto"), None);
    }

    #[test]
    fn test_colors() {
        assert_eq!(parse_color("#abc").as_deref(), Some("AABBCC"));
        assert_eq!(parse_color("rgb(26, 26, 46)").as_deref(), Some("1A1A2E"));
        assert_eq!(parse_color("white").as_deref(), Some("FFFFFF"));
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn test_background() {
        let style = InlineStyle::parse("background: url('gradient-cover.png') no-repeat");
        assert_eq!(style.background_image().as_deref(), Some("gradient-cover.png"));
        assert_eq!(style.background_color(), None);

        let style = InlineStyle::parse("background: #1a1a2e");
        assert_eq!(style.background_color().as_deref(), Some("1A1A2E"));
    }

    #[test]
    fn test_font() {
        let style = InlineStyle::parse("font-size: 24px; font-weight: 700; font-family: 'Microsoft YaHei', Arial");
        assert_eq!(style.font_size(), Some(18.0));
        assert!(style.is_bold());
        assert_eq!(style.font_family().as_deref(), Some("Microsoft YaHei"));
    }
}
