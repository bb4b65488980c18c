//! Composite date field derivation properties.

use proptest::prelude::*;

use signfield::composite::{
    parent_id_from_sub_input, sub_input_ids, sub_input_offset, CompositeSpacing,
};
use signfield::field::DateSubtype;
use signfield::geometry::Point;

proptest! {
    #[test]
    fn sub_input_ids_invert_for_all_subtypes(parent in "[a-z][a-z0-9_]{0,30}") {
        let ids = sub_input_ids(&parent);
        prop_assert_eq!(
            parent_id_from_sub_input(&ids.day),
            Some((parent.clone(), DateSubtype::Day))
        );
        prop_assert_eq!(
            parent_id_from_sub_input(&ids.month),
            Some((parent.clone(), DateSubtype::Month))
        );
        prop_assert_eq!(
            parent_id_from_sub_input(&ids.year),
            Some((parent.clone(), DateSubtype::Year))
        );
    }

    #[test]
    fn year_offset_is_twice_month_offset(
        x in 0.0f32..1000.0,
        y in 0.0f32..1000.0,
        width in 1.0f32..200.0,
        gap in 0.0f32..50.0,
    ) {
        let spacing = CompositeSpacing { input_width: width, gap };
        let base = Point::new(x, y);
        let month = sub_input_offset(base, DateSubtype::Month, &spacing);
        let year = sub_input_offset(base, DateSubtype::Year, &spacing);
        prop_assert_eq!(year.x - base.x, 2.0 * (month.x - base.x));
        // purely horizontal
        prop_assert_eq!(month.y, base.y);
        prop_assert_eq!(year.y, base.y);
    }

    #[test]
    fn total_width_is_three_inputs_two_gaps(
        width in 1.0f32..200.0,
        gap in 0.0f32..50.0,
    ) {
        let spacing = CompositeSpacing { input_width: width, gap };
        prop_assert_eq!(spacing.total_width(), 3.0 * width + 2.0 * gap);
    }
}

#[test]
fn ids_without_known_suffix_are_not_sub_inputs() {
    for id in ["plain", "date_field", "x_ddd", "field_YY", ""] {
        assert_eq!(parent_id_from_sub_input(id), None, "id {id:?}");
    }
}
