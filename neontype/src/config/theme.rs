use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// General theme
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub cursor: CursorTheme,
    pub frame: FrameTheme,
}

/// Colors of the typing text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    pub untyped: Color,
    pub correct: Color,
    pub wrong: Color,
    /// Used for flashes on committed words and combo milestones
    pub accent: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            untyped: Color::DarkGray,
            correct: Color::Cyan,
            wrong: Color::LightRed,
            accent: Color::LightMagenta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorTheme {
    pub color: Color,
    pub text: Color,
}

impl Default for CursorTheme {
    fn default() -> Self {
        Self {
            color: Color::White,
            text: Color::Black,
        }
    }
}

/// Colors of borders and the countdown gauge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameTheme {
    pub border: Color,
    pub gauge: Color,
    /// Gauge color once less than a quarter of the time is left
    pub gauge_low: Color,
}

impl Default for FrameTheme {
    fn default() -> Self {
        Self {
            border: Color::Magenta,
            gauge: Color::Cyan,
            gauge_low: Color::LightRed,
        }
    }
}
