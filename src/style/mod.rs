//! Style resolution for placed fields.
//!
//! A field's final appearance comes from folding an ordered chain of partial
//! [`StyleLayer`]s: the explicit per-field override, a computed snapshot
//! inherited from the live-rendered instance, the kind's base constants, and
//! the absolute global defaults. The fold is the single place precedence is
//! decided — adding a tier means adding one layer to the chain, not touching
//! every attribute.
//!
//! Resolution is total: malformed input falls back to the next layer and
//! ultimately to the global defaults, so [`resolve`] cannot fail.

pub mod wire;

use serde::{Deserialize, Serialize};

use crate::field::FieldKind;
use crate::geometry::Size;
use crate::registry;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left-aligned
    Left,
    /// Center-aligned
    Center,
    /// Right-aligned
    Right,
}

/// Vertical content justification inside the field box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    /// Content at the top
    Start,
    /// Content centered
    Center,
    /// Content at the bottom
    End,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright
    Normal,
    /// Italic
    Italic,
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderLine {
    /// No visible border
    None,
    /// Solid line
    Solid,
    /// Dashed line
    Dashed,
}

/// Marker token inside a decoration string that denotes underlining.
pub const UNDERLINE_MARKER: &str = "underline";

/// Global absolute defaults, the last tier of the precedence chain.
pub mod defaults {
    /// Default font family
    pub const FONT_FAMILY: &str = "Sarabun";
    /// Default font size
    pub const FONT_SIZE: f32 = 14.0;
    /// Default font weight
    pub const FONT_WEIGHT: u16 = 400;
    /// Default text color
    pub const COLOR: &str = "#000000";
    /// Default background
    pub const BACKGROUND: &str = "transparent";
    /// Default border color
    pub const BORDER_COLOR: &str = "#c4c4c4";
    /// Default border width
    pub const BORDER_WIDTH: f32 = 1.0;
    /// Default border radius
    pub const BORDER_RADIUS: f32 = 2.0;
    /// Default padding
    pub const PADDING: f32 = 4.0;
    /// Default margin
    pub const MARGIN: f32 = 0.0;
}

/// The complete, no-gaps style of one field.
///
/// Every attribute is concrete; totality is guaranteed by construction
/// through [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    /// Font family name
    pub font_family: String,
    /// Font size in page-relative units
    pub font_size: f32,
    /// CSS-style numeric font weight
    pub font_weight: u16,
    /// Font slant
    pub font_style: FontStyle,
    /// Decoration tokens, e.g. `"none"` or `"underline"`
    pub text_decoration: String,
    /// Horizontal text alignment
    pub text_align: TextAlign,
    /// Vertical content justification
    pub justify: Justify,
    /// Foreground color
    pub color: String,
    /// Background color
    pub background: String,
    /// Border color
    pub border_color: String,
    /// Border width
    pub border_width: f32,
    /// Border line style
    pub border_style: BorderLine,
    /// Border corner radius
    pub border_radius: f32,
    /// Inner padding
    pub padding: f32,
    /// Outer margin
    pub margin: f32,
    /// Resolved width
    pub width: f32,
    /// Resolved height
    pub height: f32,
}

impl ResolvedStyle {
    /// Whether the decoration contains the underline marker.
    pub fn is_underlined(&self) -> bool {
        self.text_decoration.contains(UNDERLINE_MARKER)
    }
}

/// One partial tier of the style precedence chain.
///
/// Width and height are kept as raw strings because overrides arrive from
/// the editor as unit-suffixed (`"120px"`) or bare (`"120"`) values; parsing
/// happens once, at the end of the fold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleLayer {
    /// Font family, if this tier sets it
    pub font_family: Option<String>,
    /// Font size, if set
    pub font_size: Option<f32>,
    /// Font weight, if set
    pub font_weight: Option<u16>,
    /// Font slant, if set
    pub font_style: Option<FontStyle>,
    /// Decoration tokens, if set
    pub text_decoration: Option<String>,
    /// Horizontal alignment, if set
    pub text_align: Option<TextAlign>,
    /// Vertical justification, if set
    pub justify: Option<Justify>,
    /// Foreground color, if set
    pub color: Option<String>,
    /// Background color, if set
    pub background: Option<String>,
    /// Border color, if set
    pub border_color: Option<String>,
    /// Border width, if set
    pub border_width: Option<f32>,
    /// Border line style, if set
    pub border_style: Option<BorderLine>,
    /// Border radius, if set
    pub border_radius: Option<f32>,
    /// Padding, if set
    pub padding: Option<f32>,
    /// Margin, if set
    pub margin: Option<f32>,
    /// Raw width value, unit-suffixed or bare
    pub width: Option<String>,
    /// Raw height value, unit-suffixed or bare
    pub height: Option<String>,
}

impl StyleLayer {
    /// Merge this layer over a lower-priority one: every attribute keeps the
    /// first defined value.
    pub fn over(self, lower: StyleLayer) -> StyleLayer {
        StyleLayer {
            font_family: self.font_family.or(lower.font_family),
            font_size: self.font_size.or(lower.font_size),
            font_weight: self.font_weight.or(lower.font_weight),
            font_style: self.font_style.or(lower.font_style),
            text_decoration: self.text_decoration.or(lower.text_decoration),
            text_align: self.text_align.or(lower.text_align),
            justify: self.justify.or(lower.justify),
            color: self.color.or(lower.color),
            background: self.background.or(lower.background),
            border_color: self.border_color.or(lower.border_color),
            border_width: self.border_width.or(lower.border_width),
            border_style: self.border_style.or(lower.border_style),
            border_radius: self.border_radius.or(lower.border_radius),
            padding: self.padding.or(lower.padding),
            margin: self.margin.or(lower.margin),
            width: self.width.or(lower.width),
            height: self.height.or(lower.height),
        }
    }
}

/// Per-kind base constants, the tier below computed defaults.
fn type_base(kind: &FieldKind) -> StyleLayer {
    match kind {
        FieldKind::Signature => StyleLayer {
            border_style: Some(BorderLine::Dashed),
            justify: Some(Justify::Center),
            ..Default::default()
        },
        FieldKind::Checkbox | FieldKind::Radio => StyleLayer {
            font_size: Some(12.0),
            border_style: Some(BorderLine::None),
            ..Default::default()
        },
        FieldKind::Stamp | FieldKind::Eseal => StyleLayer {
            border_style: Some(BorderLine::None),
            justify: Some(Justify::Center),
            ..Default::default()
        },
        FieldKind::DayPart | FieldKind::MonthPart | FieldKind::YearPart => StyleLayer {
            text_align: Some(TextAlign::Center),
            ..Default::default()
        },
        _ => StyleLayer::default(),
    }
}

/// The absolute global tier. Complete except for width/height, which always
/// resolve through the dimension rule.
fn base_layer() -> StyleLayer {
    StyleLayer {
        font_family: Some(defaults::FONT_FAMILY.to_string()),
        font_size: Some(defaults::FONT_SIZE),
        font_weight: Some(defaults::FONT_WEIGHT),
        font_style: Some(FontStyle::Normal),
        text_decoration: Some("none".to_string()),
        text_align: Some(TextAlign::Left),
        justify: Some(Justify::Start),
        color: Some(defaults::COLOR.to_string()),
        background: Some(defaults::BACKGROUND.to_string()),
        border_color: Some(defaults::BORDER_COLOR.to_string()),
        border_width: Some(defaults::BORDER_WIDTH),
        border_style: Some(BorderLine::Solid),
        border_radius: Some(defaults::BORDER_RADIUS),
        padding: Some(defaults::PADDING),
        margin: Some(defaults::MARGIN),
        width: None,
        height: None,
    }
}

/// Parse a length value: a bare number or a `px`-suffixed one.
///
/// Returns `None` for anything unparseable or negative; callers fall back to
/// the intrinsic dimension.
pub fn parse_length(raw: &str) -> Option<f32> {
    let trimmed = raw.trim().trim_end_matches("px").trim();
    match trimmed.parse::<f32>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => None,
    }
}

/// Resolve the complete style for one field.
///
/// Precedence, highest first: explicit override, computed defaults snapshot,
/// kind base constants, global defaults. Width and height follow the
/// dimension rule: a parseable override wins, otherwise the kind's intrinsic
/// size — with the three date-part kinds always forced to the fixed
/// sub-input size, whatever was inherited.
pub fn resolve(
    kind: &FieldKind,
    explicit: Option<&StyleLayer>,
    computed: Option<&StyleLayer>,
) -> ResolvedStyle {
    let tiers = [
        explicit.cloned().unwrap_or_default(),
        computed.cloned().unwrap_or_default(),
        type_base(kind),
        base_layer(),
    ];
    let folded = tiers
        .into_iter()
        .reduce(|upper, lower| upper.over(lower))
        .unwrap_or_default();

    let intrinsic = registry::intrinsic_size(kind, kind.date_subtype());
    let (width, height) = if kind.date_subtype().is_some() {
        (intrinsic.width, intrinsic.height)
    } else {
        (
            folded
                .width
                .as_deref()
                .and_then(parse_length)
                .unwrap_or(intrinsic.width),
            folded
                .height
                .as_deref()
                .and_then(parse_length)
                .unwrap_or(intrinsic.height),
        )
    };

    // base_layer() is complete for every non-dimension attribute, so the
    // unwrap_or branches below are unreachable in practice
    ResolvedStyle {
        font_family: folded
            .font_family
            .unwrap_or_else(|| defaults::FONT_FAMILY.to_string()),
        font_size: folded.font_size.unwrap_or(defaults::FONT_SIZE),
        font_weight: folded.font_weight.unwrap_or(defaults::FONT_WEIGHT),
        font_style: folded.font_style.unwrap_or(FontStyle::Normal),
        text_decoration: folded
            .text_decoration
            .unwrap_or_else(|| "none".to_string()),
        text_align: folded.text_align.unwrap_or(TextAlign::Left),
        justify: folded.justify.unwrap_or(Justify::Start),
        color: folded.color.unwrap_or_else(|| defaults::COLOR.to_string()),
        background: folded
            .background
            .unwrap_or_else(|| defaults::BACKGROUND.to_string()),
        border_color: folded
            .border_color
            .unwrap_or_else(|| defaults::BORDER_COLOR.to_string()),
        border_width: folded.border_width.unwrap_or(defaults::BORDER_WIDTH),
        border_style: folded.border_style.unwrap_or(BorderLine::Solid),
        border_radius: folded.border_radius.unwrap_or(defaults::BORDER_RADIUS),
        padding: folded.padding.unwrap_or(defaults::PADDING),
        margin: folded.margin.unwrap_or(defaults::MARGIN),
        width,
        height,
    }
}

/// Grow an option-bearing field with its option count.
///
/// Checkbox and radio fields consume one [`registry::OPTION_ROW_HEIGHT`] row
/// per option plus [`registry::OPTION_LIST_PADDING`]; height never shrinks
/// below the base, so the result is monotone in `option_count` and equals
/// `base` at zero options. Other kinds pass through unchanged. Pure and
/// idempotent for fixed inputs.
pub fn dynamic_size(kind: &FieldKind, base: Size, option_count: usize) -> Size {
    match kind {
        FieldKind::Checkbox | FieldKind::Radio if option_count > 0 => {
            let grown =
                option_count as f32 * registry::OPTION_ROW_HEIGHT + registry::OPTION_LIST_PADDING;
            base.with_height(base.height.max(grown))
        }
        _ => base,
    }
}
