//! Static registry of per-kind intrinsic geometry and configuration defaults.
//!
//! Both lookups are total over [`FieldKind`]: an unrecognized kind yields a
//! generic fallback rather than an error, so the style resolver never has a
//! failure path.

use crate::field::{DateSubtype, FieldKind};
use crate::geometry::Size;

/// Fallback size for unrecognized kinds.
pub const FALLBACK_SIZE: Size = Size {
    width: 100.0,
    height: 30.0,
};

/// Fixed size of one date sub-input, regardless of the parent date field.
pub const DATE_SUB_INPUT_SIZE: Size = Size {
    width: 46.0,
    height: 32.0,
};

/// Height consumed by one checkbox/radio option row.
pub const OPTION_ROW_HEIGHT: f32 = 22.0;

/// Constant vertical padding around an option list.
pub const OPTION_LIST_PADDING: f32 = 8.0;

/// Intrinsic width/height of a kind, before any override.
///
/// The `subtype` argument only matters for the `Date` kind family; the three
/// date-part kinds and any explicit subtype resolve to the fixed
/// [`DATE_SUB_INPUT_SIZE`].
pub fn intrinsic_size(kind: &FieldKind, subtype: Option<DateSubtype>) -> Size {
    if subtype.is_some() || kind.date_subtype().is_some() {
        return DATE_SUB_INPUT_SIZE;
    }
    match kind {
        FieldKind::Text => Size::new(120.0, 28.0),
        FieldKind::Signature => Size::new(140.0, 60.0),
        FieldKind::Date => Size::new(150.0, 32.0),
        FieldKind::Select => Size::new(120.0, 32.0),
        FieldKind::Checkbox | FieldKind::Radio => Size::new(110.0, 24.0),
        FieldKind::Stamp => Size::new(100.0, 100.0),
        FieldKind::DocNumber => Size::new(140.0, 28.0),
        FieldKind::MoreFile => Size::new(160.0, 36.0),
        FieldKind::Eseal => Size::new(120.0, 120.0),
        // date parts handled above
        FieldKind::DayPart | FieldKind::MonthPart | FieldKind::YearPart => DATE_SUB_INPUT_SIZE,
        FieldKind::Unknown(_) => FALLBACK_SIZE,
    }
}

/// One date sub-input's behavioral defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputSpec {
    /// Placeholder text shown in the empty input
    pub placeholder: String,
    /// Maximum number of characters
    pub max_length: u32,
    /// Whether the sub-input must be filled
    pub required: bool,
}

impl DateInputSpec {
    fn new(placeholder: &str, max_length: u32) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            max_length,
            required: true,
        }
    }
}

/// Type-specific behavioral configuration, one variant per kind family.
///
/// Each variant carries only the attributes relevant to its kinds; there are
/// no optional keys to backfill because a field is always constructed with
/// its kind's defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeConfig {
    /// Text input settings
    Text {
        /// Whether the field must be filled
        required: bool,
        /// Maximum number of characters
        max_length: u32,
        /// Minimum number of visible lines
        min_lines: u32,
    },
    /// Option-bearing kinds: checkbox, radio, select
    Options {
        /// Whether at least one option must be chosen
        required: bool,
        /// Option labels, in display order
        options: Vec<String>,
    },
    /// Attached-file settings
    File {
        /// Whether an attachment is mandatory
        required: bool,
        /// Maximum file size in megabytes
        max_size_mb: u32,
        /// Accepted file extensions
        accept: Vec<String>,
        /// Whether the file is embedded into the submission
        embed: bool,
    },
    /// Composite date field: one spec per sub-input
    Date {
        /// Whether the date must be filled
        required: bool,
        /// Day sub-input
        day: DateInputSpec,
        /// Month sub-input
        month: DateInputSpec,
        /// Year sub-input
        year: DateInputSpec,
    },
    /// Kinds with only a required flag: signature, stamp, doc-number, e-seal
    Simple {
        /// Whether the field must be filled
        required: bool,
    },
    /// Fallback for unrecognized kinds
    Generic,
}

impl TypeConfig {
    /// The required flag, false for `Generic`.
    pub fn required(&self) -> bool {
        match self {
            TypeConfig::Text { required, .. }
            | TypeConfig::Options { required, .. }
            | TypeConfig::File { required, .. }
            | TypeConfig::Date { required, .. }
            | TypeConfig::Simple { required } => *required,
            TypeConfig::Generic => false,
        }
    }

    /// Set the required flag where one exists.
    pub fn set_required(&mut self, value: bool) {
        match self {
            TypeConfig::Text { required, .. }
            | TypeConfig::Options { required, .. }
            | TypeConfig::File { required, .. }
            | TypeConfig::Date { required, .. }
            | TypeConfig::Simple { required } => *required = value,
            TypeConfig::Generic => {}
        }
    }
}

/// Default configuration for a kind.
pub fn type_defaults(kind: &FieldKind) -> TypeConfig {
    match kind {
        FieldKind::Text | FieldKind::DocNumber => TypeConfig::Text {
            required: false,
            max_length: 255,
            min_lines: 1,
        },
        FieldKind::DayPart | FieldKind::MonthPart | FieldKind::YearPart => TypeConfig::Text {
            required: true,
            max_length: 4,
            min_lines: 1,
        },
        FieldKind::Checkbox | FieldKind::Radio | FieldKind::Select => TypeConfig::Options {
            required: false,
            options: Vec::new(),
        },
        FieldKind::MoreFile => TypeConfig::File {
            required: false,
            max_size_mb: 10,
            accept: vec![".pdf".to_string(), ".jpg".to_string(), ".png".to_string()],
            embed: true,
        },
        FieldKind::Date => TypeConfig::Date {
            required: false,
            day: DateInputSpec::new("DD", 2),
            month: DateInputSpec::new("MM", 2),
            year: DateInputSpec::new("YYYY", 4),
        },
        FieldKind::Signature | FieldKind::Stamp | FieldKind::Eseal => {
            TypeConfig::Simple { required: true }
        }
        FieldKind::Unknown(_) => TypeConfig::Generic,
    }
}
