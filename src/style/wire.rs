//! Transport encoding of resolved styles.
//!
//! The backend consumes every numeric style attribute as a unit-free numeric
//! string and renames several keys (`color` → `font_color`, `justify` →
//! `justify_content`). `underline` is derived on encode — true iff the
//! decoration contains the underline marker — and folded back into the
//! decoration on decode. Absent or unparseable wire values fall back to the
//! kind's intrinsic size or the global defaults, never to an error.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{defaults, BorderLine, FontStyle, Justify, ResolvedStyle, TextAlign, UNDERLINE_MARKER};
use crate::field::FieldKind;
use crate::registry;

/// Transport form of a [`ResolvedStyle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireStyle {
    /// Font family name
    pub font_family: String,
    /// Font size as a numeric string
    pub font_size: String,
    /// Font weight as a numeric string
    pub font_weight: String,
    /// Font slant
    pub font_style: FontStyle,
    /// Decoration tokens
    pub text_decoration: String,
    /// Derived underline flag
    pub underline: bool,
    /// Horizontal text alignment
    pub text_align: TextAlign,
    /// Vertical content justification
    pub justify_content: Justify,
    /// Foreground color
    pub font_color: String,
    /// Background color
    pub background_color: String,
    /// Border color
    pub border_color: String,
    /// Border width as a numeric string
    pub border_width: String,
    /// Border line style
    pub border_style: BorderLine,
    /// Border radius as a numeric string
    pub border_radius: String,
    /// Padding as a numeric string
    pub padding: String,
    /// Margin as a numeric string
    pub margin: String,
    /// Width as a numeric string
    pub width: String,
    /// Height as a numeric string
    pub height: String,
}

/// Format a numeric attribute for the wire: whole values lose the fraction.
pub(crate) fn encode_num(v: f32) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Parse a wire numeric string, falling back when absent or malformed.
fn decode_num(raw: &str, fallback: f32, attr: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            debug!("wire {attr} {raw:?} unparseable, using {fallback}");
            fallback
        }
    }
}

/// Encode a resolved style into its transport form.
pub fn to_wire(style: &ResolvedStyle, _kind: &FieldKind) -> WireStyle {
    WireStyle {
        font_family: style.font_family.clone(),
        font_size: encode_num(style.font_size),
        font_weight: encode_num(style.font_weight as f32),
        font_style: style.font_style,
        text_decoration: style.text_decoration.clone(),
        underline: style.is_underlined(),
        text_align: style.text_align,
        justify_content: style.justify,
        font_color: style.color.clone(),
        background_color: style.background.clone(),
        border_color: style.border_color.clone(),
        border_width: encode_num(style.border_width),
        border_style: style.border_style,
        border_radius: encode_num(style.border_radius),
        padding: encode_num(style.padding),
        margin: encode_num(style.margin),
        width: encode_num(style.width),
        height: encode_num(style.height),
    }
}

/// Decode a transport style back into the in-memory form.
pub fn from_wire(wire: &WireStyle, kind: &FieldKind) -> ResolvedStyle {
    let intrinsic = registry::intrinsic_size(kind, kind.date_subtype());

    let mut text_decoration = wire.text_decoration.clone();
    if wire.underline && !text_decoration.contains(UNDERLINE_MARKER) {
        if text_decoration.is_empty() || text_decoration == "none" {
            text_decoration = UNDERLINE_MARKER.to_string();
        } else {
            text_decoration = format!("{} {}", text_decoration, UNDERLINE_MARKER);
        }
    }

    ResolvedStyle {
        font_family: wire.font_family.clone(),
        font_size: decode_num(&wire.font_size, defaults::FONT_SIZE, "font_size"),
        font_weight: decode_num(&wire.font_weight, defaults::FONT_WEIGHT as f32, "font_weight")
            as u16,
        font_style: wire.font_style,
        text_decoration,
        text_align: wire.text_align,
        justify: wire.justify_content,
        color: wire.font_color.clone(),
        background: wire.background_color.clone(),
        border_color: wire.border_color.clone(),
        border_width: decode_num(&wire.border_width, defaults::BORDER_WIDTH, "border_width"),
        border_style: wire.border_style,
        border_radius: decode_num(&wire.border_radius, defaults::BORDER_RADIUS, "border_radius"),
        padding: decode_num(&wire.padding, defaults::PADDING, "padding"),
        margin: decode_num(&wire.margin, defaults::MARGIN, "margin"),
        width: decode_num(&wire.width, intrinsic.width, "width"),
        height: decode_num(&wire.height, intrinsic.height, "height"),
    }
}
