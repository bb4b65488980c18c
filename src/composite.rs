//! Composite date fields.
//!
//! A date field is drawn once but rendered and submitted as three positioned
//! sub-inputs (day, month, year). Sub-inputs are never placed independently:
//! their identifiers and positions are derived here from the parent field,
//! and [`parent_id_from_sub_input`] is a strict left inverse of
//! [`sub_input_ids`].

use crate::field::DateSubtype;
use crate::geometry::Point;
use crate::registry;

/// Identifier suffix of the day sub-input.
pub const DAY_SUFFIX: &str = "_dd";
/// Identifier suffix of the month sub-input.
pub const MONTH_SUFFIX: &str = "_mm";
/// Identifier suffix of the year sub-input.
pub const YEAR_SUFFIX: &str = "_yyyy";

/// Horizontal layout of the three sub-inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeSpacing {
    /// Width of one sub-input
    pub input_width: f32,
    /// Gap between adjacent sub-inputs
    pub gap: f32,
}

impl Default for CompositeSpacing {
    fn default() -> Self {
        Self {
            input_width: registry::DATE_SUB_INPUT_SIZE.width,
            gap: 6.0,
        }
    }
}

impl CompositeSpacing {
    /// Total width of the composite: three inputs and two gaps.
    pub fn total_width(&self) -> f32 {
        3.0 * self.input_width + 2.0 * self.gap
    }

    /// Horizontal stride from one sub-input to the next.
    pub fn stride(&self) -> f32 {
        self.input_width + self.gap
    }
}

/// The three derived sub-input identifiers of one date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubInputIds {
    /// Day input id
    pub day: String,
    /// Month input id
    pub month: String,
    /// Year input id
    pub year: String,
}

impl DateSubtype {
    /// The identifier suffix of this subtype.
    pub fn suffix(&self) -> &'static str {
        match self {
            DateSubtype::Day => DAY_SUFFIX,
            DateSubtype::Month => MONTH_SUFFIX,
            DateSubtype::Year => YEAR_SUFFIX,
        }
    }

    /// Zero-based horizontal slot of this subtype.
    fn slot(&self) -> f32 {
        match self {
            DateSubtype::Day => 0.0,
            DateSubtype::Month => 1.0,
            DateSubtype::Year => 2.0,
        }
    }
}

/// Derive the three sub-input identifiers from a parent date field id.
pub fn sub_input_ids(parent_id: &str) -> SubInputIds {
    SubInputIds {
        day: format!("{parent_id}{DAY_SUFFIX}"),
        month: format!("{parent_id}{MONTH_SUFFIX}"),
        year: format!("{parent_id}{YEAR_SUFFIX}"),
    }
}

/// Recover the parent id and subtype from a sub-input identifier.
///
/// Returns `None` for identifiers without a recognized suffix; this is the
/// inverse of [`sub_input_ids`] for all three subtypes.
pub fn parent_id_from_sub_input(id: &str) -> Option<(String, DateSubtype)> {
    for subtype in [DateSubtype::Year, DateSubtype::Month, DateSubtype::Day] {
        if let Some(parent) = id.strip_suffix(subtype.suffix()) {
            if !parent.is_empty() {
                return Some((parent.to_string(), subtype));
            }
        }
    }
    None
}

/// Position of one sub-input relative to the parent's base position.
///
/// Offsets are purely horizontal: the month input sits one stride to the
/// right of the day input, the year two strides.
pub fn sub_input_offset(base: Point, subtype: DateSubtype, spacing: &CompositeSpacing) -> Point {
    base.shifted_x(subtype.slot() * spacing.stride())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_input_ids() {
        let ids = sub_input_ids("field_42");
        assert_eq!(ids.day, "field_42_dd");
        assert_eq!(ids.month, "field_42_mm");
        assert_eq!(ids.year, "field_42_yyyy");
    }

    #[test]
    fn test_parent_id_round_trip() {
        let ids = sub_input_ids("sign_date");
        assert_eq!(
            parent_id_from_sub_input(&ids.day),
            Some(("sign_date".to_string(), DateSubtype::Day))
        );
        assert_eq!(
            parent_id_from_sub_input(&ids.month),
            Some(("sign_date".to_string(), DateSubtype::Month))
        );
        assert_eq!(
            parent_id_from_sub_input(&ids.year),
            Some(("sign_date".to_string(), DateSubtype::Year))
        );
    }

    #[test]
    fn test_parent_id_rejects_unrecognized() {
        assert_eq!(parent_id_from_sub_input("field_42"), None);
        assert_eq!(parent_id_from_sub_input("field_42_zz"), None);
        // suffix alone has no parent
        assert_eq!(parent_id_from_sub_input("_dd"), None);
    }

    #[test]
    fn test_offsets_are_horizontal_strides() {
        let spacing = CompositeSpacing {
            input_width: 40.0,
            gap: 10.0,
        };
        let base = Point::new(100.0, 200.0);
        let day = sub_input_offset(base, DateSubtype::Day, &spacing);
        let month = sub_input_offset(base, DateSubtype::Month, &spacing);
        let year = sub_input_offset(base, DateSubtype::Year, &spacing);

        assert_eq!(day, base);
        assert_eq!(month.x, 150.0);
        assert_eq!(year.x, 200.0);
        // year offset is exactly twice the month offset
        assert_eq!(year.x - base.x, 2.0 * (month.x - base.x));
        assert_eq!(day.y, 200.0);
        assert_eq!(year.y, 200.0);
    }

    #[test]
    fn test_total_width() {
        let spacing = CompositeSpacing {
            input_width: 40.0,
            gap: 10.0,
        };
        assert_eq!(spacing.total_width(), 140.0);
        let default = CompositeSpacing::default();
        assert_eq!(
            default.total_width(),
            3.0 * default.input_width + 2.0 * default.gap
        );
    }
}
