//! The placed-field data model.
//!
//! A [`FieldElement`] is one user-configurable item drawn onto a template
//! page: a text box, a signature area, a composite date field, and so on.
//! Its kind is fixed at creation; position, size, style and configuration
//! are adjustable through the builder-style setters.

use crate::geometry::Rect;
use crate::registry::{self, TypeConfig};
use crate::style::StyleLayer;

/// Field kind — the closed set of placeable field types.
///
/// The three date-part kinds exist only as projections of a parent `Date`
/// field (see [`crate::composite`]); callers never place them directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text input
    Text,
    /// Hand-drawn or uploaded signature
    Signature,
    /// Composite date field (three positioned sub-inputs)
    Date,
    /// Day sub-input of a date field
    DayPart,
    /// Month sub-input of a date field
    MonthPart,
    /// Year sub-input of a date field
    YearPart,
    /// Dropdown selection
    Select,
    /// Checkbox group
    Checkbox,
    /// Radio button group
    Radio,
    /// Company stamp image
    Stamp,
    /// Document running number
    DocNumber,
    /// Attached file
    MoreFile,
    /// Electronic seal
    Eseal,
    /// Unrecognized kind — kept so registry lookups stay total
    Unknown(String),
}

/// Which of the three date sub-inputs a date-part kind represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSubtype {
    /// Day-of-month input
    Day,
    /// Month input
    Month,
    /// Four-digit year input
    Year,
}

impl FieldKind {
    /// The canonical name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Signature => "signature",
            FieldKind::Date => "date",
            FieldKind::DayPart => "day",
            FieldKind::MonthPart => "month",
            FieldKind::YearPart => "year",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Stamp => "stamp",
            FieldKind::DocNumber => "doc_no",
            FieldKind::MoreFile => "more_file",
            FieldKind::Eseal => "eseal",
            FieldKind::Unknown(name) => name,
        }
    }

    /// Parse a kind from its canonical name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => FieldKind::Text,
            "signature" => FieldKind::Signature,
            "date" => FieldKind::Date,
            "day" => FieldKind::DayPart,
            "month" => FieldKind::MonthPart,
            "year" => FieldKind::YearPart,
            "select" => FieldKind::Select,
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            "stamp" => FieldKind::Stamp,
            "doc_no" => FieldKind::DocNumber,
            "more_file" => FieldKind::MoreFile,
            "eseal" => FieldKind::Eseal,
            other => FieldKind::Unknown(other.to_string()),
        }
    }

    /// The date subtype, if this is one of the three date-part kinds.
    pub fn date_subtype(&self) -> Option<DateSubtype> {
        match self {
            FieldKind::DayPart => Some(DateSubtype::Day),
            FieldKind::MonthPart => Some(DateSubtype::Month),
            FieldKind::YearPart => Some(DateSubtype::Year),
            _ => None,
        }
    }

    /// Whether this kind carries an option list (grows with option count).
    pub fn is_option_bearing(&self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio | FieldKind::Select)
    }
}

/// The workflow-step association of a placed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAssignment {
    /// Bound to one workflow step, by flow index
    Step(String),
    /// Applies to every workflow step; expanded at aggregation time
    AllSteps,
    /// Not yet assigned — the validator rejects this where an
    /// association is required
    Unassigned,
}

/// The current value of a placed field, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value entered yet
    #[default]
    None,
    /// Text content (text, doc-number, date parts)
    Text(String),
    /// Checked option labels (checkbox)
    Checked(Vec<String>),
    /// Selected option label (radio, select)
    Choice(String),
}

impl FieldValue {
    /// Whether no value has been entered.
    pub fn is_none(&self) -> bool {
        matches!(self, FieldValue::None)
    }

    /// The text form used in mapping entries, if one applies.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => Some(s),
            _ => None,
        }
    }
}

/// One placed, user-configurable item on a template page.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldElement {
    /// Stable identifier, unique within the template
    pub id: String,
    kind: FieldKind,
    /// Zero-based page index
    pub page: usize,
    /// Position and size in page-relative units
    pub rect: Rect,
    /// Partial style override; gaps resolve through the precedence chain
    pub style_override: StyleLayer,
    /// Style snapshot inherited from the live-rendered instance, supplied
    /// by the editor
    pub computed_style: Option<StyleLayer>,
    /// Type configuration, initialized from type defaults
    pub config: TypeConfig,
    /// Current value, if any
    pub value: FieldValue,
    /// Workflow-step association
    pub assignment: StepAssignment,
}

impl FieldElement {
    /// Place a new field. Configuration starts from the kind's defaults.
    pub fn new(id: impl Into<String>, kind: FieldKind, page: usize, rect: Rect) -> Self {
        let config = registry::type_defaults(&kind);
        Self {
            id: id.into(),
            kind,
            page,
            rect,
            style_override: StyleLayer::default(),
            computed_style: None,
            config,
            value: FieldValue::None,
            assignment: StepAssignment::Unassigned,
        }
    }

    /// The field's kind. Immutable after creation.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Set the workflow-step association.
    pub fn with_assignment(mut self, assignment: StepAssignment) -> Self {
        self.assignment = assignment;
        self
    }

    /// Bind to one workflow step by flow index.
    pub fn with_step(self, flow_index: impl Into<String>) -> Self {
        self.with_assignment(StepAssignment::Step(flow_index.into()))
    }

    /// Set the partial style override.
    pub fn with_style(mut self, style: StyleLayer) -> Self {
        self.style_override = style;
        self
    }

    /// Attach the computed style snapshot from the live instance.
    pub fn with_computed_style(mut self, style: StyleLayer) -> Self {
        self.computed_style = Some(style);
        self
    }

    /// Set the current value.
    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.value = value;
        self
    }

    /// Mark the field required or optional.
    pub fn with_required(mut self, required: bool) -> Self {
        self.config.set_required(required);
        self
    }

    /// Replace the option list (checkbox/radio/select only; ignored
    /// elsewhere so the builder stays total).
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        if let TypeConfig::Options { options: opts, .. } = &mut self.config {
            *opts = options;
        }
        self
    }

    /// Set the maximum text length (text fields only).
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        if let TypeConfig::Text { max_length: ml, .. } = &mut self.config {
            *ml = max_length;
        }
        self
    }

    /// Number of options, zero for non-option kinds.
    pub fn option_count(&self) -> usize {
        match &self.config {
            TypeConfig::Options { options, .. } => options.len(),
            _ => 0,
        }
    }
}
