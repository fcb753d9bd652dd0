//! Static font-metric tables and the fixed style of the big-text display.
//!
//! Character widths are in em units at regular weight (400). Heavier or lighter
//! weights are approximated with a uniform width factor, see
//! [`FontWeight::width_factor`]. All tables cover ASCII 0x20..=0x7E (95 printable
//! characters), index = `(char as usize) - 32`; anything else falls back to the
//! table's average width.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Style parameters
// ────────────────────────────────────────────────────────────────────────────

/// Font families the display can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    /// The platform UI sans-serif stack (San Francisco / Segoe UI / Roboto).
    SystemUi,
    /// Humanist sans-serif.
    Inter,
    /// Condensed display sans-serif.
    Oswald,
}

impl FontFamily {
    /// CSS `font-family` value the rendering layer must use for this family.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::SystemUi => {
                "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, sans-serif"
            }
            FontFamily::Inter => "Inter, sans-serif",
            FontFamily::Oswald => "Oswald, sans-serif",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontFamily::SystemUi => "system-ui",
            FontFamily::Inter => "inter",
            FontFamily::Oswald => "oswald",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("unknown font family '{0}' (expected system-ui, inter or oswald)")]
pub struct UnknownFontFamily(String);

impl FromStr for FontFamily {
    type Err = UnknownFontFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system-ui" | "system" | "sans-serif" => Ok(FontFamily::SystemUi),
            "inter" => Ok(FontFamily::Inter),
            "oswald" => Ok(FontFamily::Oswald),
            other => Err(UnknownFontFamily(other.to_string())),
        }
    }
}

/// CSS-style numeric font weight (100–900).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const REGULAR: FontWeight = FontWeight(400);
    pub const BLACK: FontWeight = FontWeight(900);

    /// Horizontal growth of glyph advances relative to regular weight.
    ///
    /// Black (900) sets roughly 14% wider than regular; thin weights narrow
    /// by the same slope.
    pub fn width_factor(&self) -> f32 {
        let weight = self.0.clamp(100, 900) as f32;
        1.0 + (weight - Self::REGULAR.0 as f32) / 500.0 * 0.14
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Style the display renders with. Fixed for the lifetime of a fit computation.
///
/// Every measurement request carries these parameters so the measured extents
/// match what is finally drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleParams {
    pub family: FontFamily,
    pub weight: FontWeight,
    /// Line box height as a multiple of the font size.
    pub line_height: f32,
    pub align: TextAlign,
}

impl Default for StyleParams {
    /// Heavy, tight, centered: system UI font at weight 900 with 1.1 line height.
    fn default() -> Self {
        StyleParams {
            family: FontFamily::SystemUi,
            weight: FontWeight::BLACK,
            line_height: 1.1,
            align: TextAlign::Center,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family at regular weight.
///
/// `widths[i]` = advance of ASCII character `(i + 32)`, 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback advance for characters outside printable ASCII.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Advance of a single character in em units.
    pub fn advance(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Width of a string set on one line, in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.advance(c)).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// System UI sans-serif, modelled on Roboto's advances.
static SYSTEM_UI_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.26, 0.32, 0.62, 0.56, 0.73, 0.62, 0.17, 0.34, 0.35, 0.43, 0.57, 0.20, 0.28, 0.26, 0.41,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.24, 0.21, 0.51, 0.55, 0.52, 0.47, 0.90,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.65, 0.62, 0.65, 0.66, 0.57, 0.55, 0.68, 0.71, 0.27, 0.55, 0.63, 0.54, 0.87,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.71, 0.69, 0.63, 0.69, 0.62, 0.59, 0.60, 0.65, 0.64, 0.89, 0.63, 0.60, 0.60,
        // [     \     ]     ^     _     `
        0.27, 0.41, 0.27, 0.42, 0.45, 0.31,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.54, 0.56, 0.52, 0.56, 0.53, 0.35, 0.56, 0.55, 0.24, 0.24, 0.51, 0.24, 0.88,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.55, 0.57, 0.56, 0.57, 0.34, 0.52, 0.33, 0.55, 0.48, 0.75, 0.50, 0.47, 0.50,
        // {     |     }     ~
        0.34, 0.24, 0.34, 0.68,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// Inter.
static INTER_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.28, 0.30, 0.38, 0.62, 0.62, 0.86, 0.68, 0.22, 0.36, 0.36, 0.50, 0.62, 0.26, 0.44, 0.26, 0.36,
        // 0     1     2     3     4     5     6     7     8     9
        0.62, 0.62, 0.62, 0.62, 0.62, 0.62, 0.62, 0.62, 0.62, 0.62,
        // :     ;     <     =     >     ?     @
        0.26, 0.26, 0.62, 0.62, 0.62, 0.51, 0.96,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.71, 0.64, 0.72, 0.71, 0.58, 0.56, 0.74, 0.74, 0.28, 0.53, 0.66, 0.53, 0.90,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.75, 0.77, 0.62, 0.77, 0.64, 0.62, 0.62, 0.73, 0.71, 1.00, 0.67, 0.68, 0.64,
        // [     \     ]     ^     _     `
        0.36, 0.36, 0.36, 0.44, 0.45, 0.30,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.55, 0.60, 0.54, 0.60, 0.57, 0.34, 0.60, 0.58, 0.24, 0.24, 0.53, 0.24, 0.86,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.58, 0.58, 0.60, 0.60, 0.36, 0.51, 0.35, 0.58, 0.53, 0.80, 0.52, 0.53, 0.52,
        // {     |     }     ~
        0.36, 0.26, 0.36, 0.62,
    ],
    average_char_width: 0.55,
    space_width: 0.28,
};

/// Oswald. Condensed; roughly two thirds of the system UI advances.
static OSWALD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.17, 0.20, 0.26, 0.38, 0.38, 0.61, 0.46, 0.15, 0.23, 0.23, 0.27, 0.40, 0.19, 0.23, 0.19, 0.21,
        // 0     1     2     3     4     5     6     7     8     9
        0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38,
        // :     ;     <     =     >     ?     @
        0.19, 0.19, 0.40, 0.40, 0.40, 0.34, 0.69,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.46, 0.41, 0.41, 0.46, 0.38, 0.34, 0.46, 0.46, 0.17, 0.27, 0.41, 0.36, 0.53,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.46, 0.49, 0.38, 0.49, 0.41, 0.34, 0.38, 0.46, 0.46, 0.61, 0.41, 0.41, 0.38,
        // [     \     ]     ^     _     `
        0.19, 0.21, 0.19, 0.32, 0.38, 0.23,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.38, 0.38, 0.34, 0.38, 0.38, 0.21, 0.38, 0.38, 0.15, 0.15, 0.36, 0.15, 0.56,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.38, 0.38, 0.38, 0.38, 0.23, 0.30, 0.27, 0.38, 0.34, 0.49, 0.34, 0.34, 0.30,
        // {     |     }     ~
        0.23, 0.18, 0.23, 0.40,
    ],
    average_char_width: 0.35,
    space_width: 0.17,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(family: &FontFamily) -> &'static FontMetricTable {
    match family {
        FontFamily::SystemUi => &SYSTEM_UI_TABLE,
        FontFamily::Inter => &INTER_TABLE,
        FontFamily::Oswald => &OSWALD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
