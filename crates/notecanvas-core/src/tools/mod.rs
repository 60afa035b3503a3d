//! Drawing tools and how each one strokes the surface.

use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Smallest accepted brush thickness.
pub const MIN_THICKNESS: f64 = 1.0;
/// Largest accepted brush thickness.
pub const MAX_THICKNESS: f64 = 60.0;
/// Thickness used when nothing else was chosen.
pub const DEFAULT_THICKNESS: f64 = 4.0;

/// Toolbar colour swatches.
pub const PALETTE: [(&str, SerializableColor); 5] = [
    ("Black", SerializableColor::new(0x00, 0x00, 0x00, 0xff)),
    ("Red", SerializableColor::new(0xff, 0x00, 0x00, 0xff)),
    ("Blue", SerializableColor::new(0x00, 0x00, 0xff, 0xff)),
    ("Green", SerializableColor::new(0x00, 0xaa, 0x00, 0xff)),
    ("Orange", SerializableColor::new(0xff, 0x99, 0x00, 0xff)),
];

/// Toolbar thickness presets.
pub const THICKNESS_PRESETS: [(&str, f64); 4] = [
    ("Extra Fine", 2.0),
    ("Fine", 4.0),
    ("Medium", 6.0),
    ("Thick", 8.0),
];

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Highlighter,
    Eraser,
    /// Placeholder for text entry; it never puts ink on the surface.
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Pen,
        ToolKind::Highlighter,
        ToolKind::Eraser,
        ToolKind::Text,
    ];

    /// Lowercase identifier used in persisted settings and the web API.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Highlighter => "highlighter",
            ToolKind::Eraser => "eraser",
            ToolKind::Text => "text",
        }
    }

    /// Toolbar tooltip.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen Tool",
            ToolKind::Highlighter => "Highlighter",
            ToolKind::Eraser => "Eraser",
            ToolKind::Text => "Text Tool",
        }
    }

    /// Whether pointer input with this tool produces pixels.
    pub fn draws(self) -> bool {
        !matches!(self, ToolKind::Text)
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| format!("unknown tool: {s}"))
    }
}

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Fully resolved paint parameters for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: SerializableColor,
    pub width: f64,
    /// Global alpha in `0.0..=1.0`, applied on top of the colour's own alpha.
    pub opacity: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// The user's current tool choice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: SerializableColor,
    pub thickness: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            color: SerializableColor::black(),
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl ToolSettings {
    /// Set the thickness, clamped to the accepted range.
    ///
    /// Non-finite input falls back to the default.
    pub fn set_thickness(&mut self, thickness: f64) {
        let thickness = if thickness.is_finite() {
            thickness
        } else {
            DEFAULT_THICKNESS
        };
        self.thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    /// Resolve the paint for the next segment.
    ///
    /// `background` is the surface fill, which the eraser paints with.
    /// Returns `None` for tools that do not draw.
    pub fn stroke_style(&self, background: SerializableColor) -> Option<StrokeStyle> {
        let style = match self.tool {
            ToolKind::Pen => StrokeStyle {
                color: self.color,
                width: self.thickness,
                opacity: 1.0,
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
            ToolKind::Highlighter => StrokeStyle {
                color: self.color,
                width: self.thickness * 3.0,
                opacity: 0.3,
                cap: LineCap::Square,
                join: LineJoin::Round,
            },
            ToolKind::Eraser => StrokeStyle {
                color: background,
                width: self.thickness * 4.0,
                opacity: 1.0,
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
            ToolKind::Text => return None,
        };
        Some(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: SerializableColor = SerializableColor::white();

    #[test]
    fn test_pen_style() {
        let settings = ToolSettings {
            tool: ToolKind::Pen,
            color: SerializableColor::new(0, 0, 255, 255),
            thickness: 6.0,
        };
        let style = settings.stroke_style(WHITE).unwrap();
        assert_eq!(style.color, SerializableColor::new(0, 0, 255, 255));
        assert_eq!(style.width, 6.0);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.cap, LineCap::Round);
        assert_eq!(style.join, LineJoin::Round);
    }

    #[test]
    fn test_highlighter_style() {
        let settings = ToolSettings {
            tool: ToolKind::Highlighter,
            color: SerializableColor::from_hex("#ff0000").unwrap(),
            thickness: 4.0,
        };
        let style = settings.stroke_style(WHITE).unwrap();
        assert_eq!(style.width, 12.0);
        assert_eq!(style.opacity, 0.3);
        assert_eq!(style.color, SerializableColor::new(255, 0, 0, 255));
        assert_eq!(style.cap, LineCap::Square);
        assert_eq!(style.join, LineJoin::Round);
    }

    #[test]
    fn test_eraser_paints_background() {
        let background = SerializableColor::new(250, 250, 240, 255);
        let settings = ToolSettings {
            tool: ToolKind::Eraser,
            color: SerializableColor::new(255, 0, 0, 255),
            thickness: 2.0,
        };
        let style = settings.stroke_style(background).unwrap();
        assert_eq!(style.color, background);
        assert_eq!(style.width, 8.0);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.cap, LineCap::Round);
    }

    #[test]
    fn test_text_has_no_stroke() {
        let settings = ToolSettings {
            tool: ToolKind::Text,
            ..ToolSettings::default()
        };
        assert!(settings.stroke_style(WHITE).is_none());
        assert!(!ToolKind::Text.draws());
    }

    #[test]
    fn test_thickness_is_clamped() {
        let mut settings = ToolSettings::default();
        settings.set_thickness(0.0);
        assert_eq!(settings.thickness, MIN_THICKNESS);
        settings.set_thickness(500.0);
        assert_eq!(settings.thickness, MAX_THICKNESS);
        settings.set_thickness(f64::NAN);
        assert_eq!(settings.thickness, DEFAULT_THICKNESS);
    }

    #[test]
    fn test_tool_kind_parse() {
        assert_eq!("highlighter".parse::<ToolKind>(), Ok(ToolKind::Highlighter));
        assert!("brush".parse::<ToolKind>().is_err());
        assert_eq!(
            serde_json::to_string(&ToolKind::Eraser).unwrap(),
            "\"eraser\""
        );
    }

    #[test]
    fn test_presets_match_palette_hex() {
        assert_eq!(PALETTE[3].1.to_hex(), "#00aa00");
        assert_eq!(THICKNESS_PRESETS[1].1, DEFAULT_THICKNESS);
    }
}
