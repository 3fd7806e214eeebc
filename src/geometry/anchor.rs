//! Directional anchors for crop placement.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal alignment of the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAnchor {
    /// Keep the left edge
    Left,
    /// Trim equally from both sides
    #[default]
    Center,
    /// Keep the right edge
    Right,
}

/// Vertical alignment of the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    /// Keep the top edge
    Up,
    /// Trim equally from top and bottom
    #[default]
    Center,
    /// Keep the bottom edge
    Down,
}

impl HorizontalAnchor {
    /// Offset of a window of `extent` pixels inside `total` pixels.
    pub fn offset(self, total: u32, extent: u32) -> u32 {
        let slack = total.saturating_sub(extent);
        match self {
            HorizontalAnchor::Left => 0,
            HorizontalAnchor::Center => slack / 2,
            HorizontalAnchor::Right => slack,
        }
    }
}

impl VerticalAnchor {
    /// Offset of a window of `extent` pixels inside `total` pixels.
    pub fn offset(self, total: u32, extent: u32) -> u32 {
        let slack = total.saturating_sub(extent);
        match self {
            VerticalAnchor::Up => 0,
            VerticalAnchor::Center => slack / 2,
            VerticalAnchor::Down => slack,
        }
    }
}

/// Where the crop window sits when the source must shrink on one axis.
///
/// The two axes are independent. Parsed once from user input with
/// [`AnchorSpec::parse`]; conflicting directions on one axis are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnchorSpec {
    /// Horizontal alignment
    pub horizontal: HorizontalAnchor,
    /// Vertical alignment
    pub vertical: VerticalAnchor,
}

impl AnchorSpec {
    /// Create an anchor from its two axes.
    pub fn new(horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Centred on both axes.
    pub fn center() -> Self {
        Self::default()
    }

    /// Parse an anchor string.
    ///
    /// Accepts compact letter codes (`"lu"`, `"rd"`, `"c"`, `""`) and word
    /// tokens separated by `-`, `_`, `,`, `+` or whitespace
    /// (`"left-top"`, `"bottom right"`, `"center"`). Case-insensitive.
    ///
    /// # Example
    ///
    /// ```
    /// use photopage::{AnchorSpec, HorizontalAnchor, VerticalAnchor};
    ///
    /// let anchor = AnchorSpec::parse("lu").unwrap();
    /// assert_eq!(anchor.horizontal, HorizontalAnchor::Left);
    /// assert_eq!(anchor.vertical, VerticalAnchor::Up);
    ///
    /// assert!(AnchorSpec::parse("left-right").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut builder = AxisBuilder::new(s);

        let lowered = s.trim().to_lowercase();
        for token in lowered
            .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | ',' | '+'))
            .filter(|t| !t.is_empty())
        {
            match token {
                "left" => builder.horizontal(HorizontalAnchor::Left)?,
                "right" => builder.horizontal(HorizontalAnchor::Right)?,
                "up" | "top" => builder.vertical(VerticalAnchor::Up)?,
                "down" | "bottom" => builder.vertical(VerticalAnchor::Down)?,
                "center" | "centre" | "middle" => {}
                letters if letters.chars().all(|c| "lrudc".contains(c)) => {
                    for c in letters.chars() {
                        match c {
                            'l' => builder.horizontal(HorizontalAnchor::Left)?,
                            'r' => builder.horizontal(HorizontalAnchor::Right)?,
                            'u' => builder.vertical(VerticalAnchor::Up)?,
                            'd' => builder.vertical(VerticalAnchor::Down)?,
                            _ => {}
                        }
                    }
                }
                other => {
                    return Err(Error::InvalidAnchor(
                        s.to_string(),
                        format!("unknown direction '{}'", other),
                    ))
                }
            }
        }

        Ok(builder.finish())
    }

    /// Canonical compact code, e.g. `"lu"`, `"d"`, or `"c"` when centred.
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(2);
        match self.horizontal {
            HorizontalAnchor::Left => code.push('l'),
            HorizontalAnchor::Right => code.push('r'),
            HorizontalAnchor::Center => {}
        }
        match self.vertical {
            VerticalAnchor::Up => code.push('u'),
            VerticalAnchor::Down => code.push('d'),
            VerticalAnchor::Center => {}
        }
        if code.is_empty() {
            code.push('c');
        }
        code
    }
}

impl fmt::Display for AnchorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for AnchorSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Accumulates directions and rejects opposing ones.
struct AxisBuilder<'a> {
    input: &'a str,
    horizontal: Option<HorizontalAnchor>,
    vertical: Option<VerticalAnchor>,
}

impl<'a> AxisBuilder<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            horizontal: None,
            vertical: None,
        }
    }

    fn horizontal(&mut self, anchor: HorizontalAnchor) -> Result<()> {
        match self.horizontal {
            Some(existing) if existing != anchor => Err(Error::InvalidAnchor(
                self.input.to_string(),
                "left and right are mutually exclusive".into(),
            )),
            _ => {
                self.horizontal = Some(anchor);
                Ok(())
            }
        }
    }

    fn vertical(&mut self, anchor: VerticalAnchor) -> Result<()> {
        match self.vertical {
            Some(existing) if existing != anchor => Err(Error::InvalidAnchor(
                self.input.to_string(),
                "up and down are mutually exclusive".into(),
            )),
            _ => {
                self.vertical = Some(anchor);
                Ok(())
            }
        }
    }

    fn finish(self) -> AnchorSpec {
        AnchorSpec::new(
            self.horizontal.unwrap_or_default(),
            self.vertical.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letter_codes() {
        let anchor = AnchorSpec::parse("rd").unwrap();
        assert_eq!(anchor.horizontal, HorizontalAnchor::Right);
        assert_eq!(anchor.vertical, VerticalAnchor::Down);

        let anchor = AnchorSpec::parse("u").unwrap();
        assert_eq!(anchor.horizontal, HorizontalAnchor::Center);
        assert_eq!(anchor.vertical, VerticalAnchor::Up);

        assert_eq!(AnchorSpec::parse("c").unwrap(), AnchorSpec::center());
        assert_eq!(AnchorSpec::parse("").unwrap(), AnchorSpec::center());
    }

    #[test]
    fn test_parse_words() {
        let anchor = AnchorSpec::parse("Left-Top").unwrap();
        assert_eq!(anchor, AnchorSpec::new(HorizontalAnchor::Left, VerticalAnchor::Up));

        let anchor = AnchorSpec::parse("bottom right").unwrap();
        assert_eq!(
            anchor,
            AnchorSpec::new(HorizontalAnchor::Right, VerticalAnchor::Down)
        );

        // "center" must not be read as the letters c-e-n-t-e-r
        assert_eq!(AnchorSpec::parse("center").unwrap(), AnchorSpec::center());
    }

    #[test]
    fn test_parse_conflicts() {
        assert!(matches!(
            AnchorSpec::parse("lr"),
            Err(Error::InvalidAnchor(..))
        ));
        assert!(matches!(
            AnchorSpec::parse("up,down"),
            Err(Error::InvalidAnchor(..))
        ));
        // Repeating the same direction is harmless
        assert!(AnchorSpec::parse("ll").is_ok());
    }

    #[test]
    fn test_parse_unknown_token() {
        let err = AnchorSpec::parse("north").unwrap_err();
        assert!(err.to_string().contains("north"));
    }

    #[test]
    fn test_code_roundtrip() {
        for code in ["c", "l", "r", "u", "d", "lu", "ld", "ru", "rd"] {
            assert_eq!(AnchorSpec::parse(code).unwrap().code(), code);
        }
        assert_eq!(AnchorSpec::parse("top-left").unwrap().to_string(), "lu");
    }

    #[test]
    fn test_axis_offsets() {
        assert_eq!(HorizontalAnchor::Left.offset(100, 60), 0);
        assert_eq!(HorizontalAnchor::Center.offset(100, 60), 20);
        assert_eq!(HorizontalAnchor::Right.offset(100, 60), 40);
        assert_eq!(VerticalAnchor::Center.offset(101, 60), 20);
        assert_eq!(VerticalAnchor::Down.offset(50, 60), 0);
    }
}
