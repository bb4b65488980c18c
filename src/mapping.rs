//! Aggregation of placed fields into wire-ready mapping buckets.
//!
//! [`build_mappings`] walks every placed field, classifies it into exactly
//! one of the nine mapping categories, resolves its geometry and style
//! through the registry/resolver/wire pipeline, and emits one entry per
//! associated workflow step. A field tagged "applies to all steps" fans out
//! into one entry per known step index; a field with no association is kept
//! with an unset index and left for the validator to reject.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::composite::{self, CompositeSpacing};
use crate::field::{DateSubtype, FieldElement, FieldKind, FieldValue, StepAssignment};
use crate::geometry::Size;
use crate::registry::{DateInputSpec, TypeConfig};
use crate::style::wire::{encode_num, to_wire, WireStyle};
use crate::style::{dynamic_size, resolve};

/// Page and position of one entry, transport-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePlacement {
    /// Zero-based page index as a numeric string
    pub page: String,
    /// X coordinate as a numeric string
    pub x: String,
    /// Y coordinate as a numeric string
    pub y: String,
}

impl WirePlacement {
    fn of(field: &FieldElement) -> Self {
        Self {
            page: field.page.to_string(),
            x: encode_num(field.rect.origin.x),
            y: encode_num(field.rect.origin.y),
        }
    }
}

/// One text-category mapping entry (free text, select results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether the field must be filled
    pub required: bool,
    /// Maximum characters, numeric string
    pub max_length: String,
    /// Minimum visible lines, numeric string
    pub min_lines: String,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style
    pub style: WireStyle,
    /// Current value, if any
    pub value: Option<String>,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One positioned sub-input inside a date-time entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateInputEntry {
    /// Derived sub-input identifier
    pub id: String,
    /// Placeholder text
    pub placeholder: String,
    /// Maximum characters, numeric string
    pub max_length: String,
    /// Whether the sub-input must be filled
    pub required: bool,
    /// X coordinate as a numeric string
    pub x: String,
    /// Y coordinate as a numeric string
    pub y: String,
}

/// One date-time-category mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether the date must be filled
    pub required: bool,
    /// Day, month and year sub-inputs, in order
    pub inputs: Vec<DateInputEntry>,
    /// Page and position of the composite
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style (sub-input sized)
    pub style: WireStyle,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One signature-category mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether the signature is mandatory
    pub required: bool,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style
    pub style: WireStyle,
    /// Captured signature data, if any
    pub value: Option<String>,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One option row of a checkbox/radio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRow {
    /// Option label
    pub label: String,
    /// Whether the option is selected
    pub checked: bool,
}

/// One checkbox-category mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether at least one option must be chosen
    pub required: bool,
    /// Option rows in display order
    pub options: Vec<OptionRow>,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style, option-count grown
    pub style: WireStyle,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One radio-category mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether a choice is mandatory
    pub required: bool,
    /// Option rows in display order
    pub options: Vec<OptionRow>,
    /// Selected option label, if any
    pub selected: Option<String>,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style, option-count grown
    pub style: WireStyle,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One stamp-category mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether the stamp is mandatory
    pub required: bool,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style
    pub style: WireStyle,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One doc-number-category mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNumberEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether the number is mandatory
    pub required: bool,
    /// Maximum characters, numeric string
    pub max_length: String,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style
    pub style: WireStyle,
    /// Current value, if any
    pub value: Option<String>,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One attached-file mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether an attachment is mandatory
    pub required: bool,
    /// Maximum file size in megabytes, numeric string
    pub max_file_size: String,
    /// Accepted file extensions
    pub accept: Vec<String>,
    /// Whether the file is embedded into the submission
    pub embed: bool,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style
    pub style: WireStyle,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// One e-seal-category mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsealEntry {
    /// Display label (the field identifier)
    pub label: String,
    /// Whether the seal is mandatory
    pub required: bool,
    /// Page and position
    #[serde(flatten)]
    pub placement: WirePlacement,
    /// Transport style
    pub style: WireStyle,
    /// Associated workflow-step index
    pub flow_index: Option<String>,
}

/// The nine category buckets, keyed with the backend's stable wire names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MappingSet {
    /// Text fields (free text, select results)
    #[serde(rename = "mapping_text")]
    pub text: Vec<TextEntry>,
    /// Composite date fields
    #[serde(rename = "mapping_date_time")]
    pub date_time: Vec<DateTimeEntry>,
    /// Signature areas
    #[serde(rename = "mapping_signature")]
    pub signature: Vec<SignatureEntry>,
    /// Checkbox groups
    #[serde(rename = "mapping_checkbox")]
    pub checkbox: Vec<CheckboxEntry>,
    /// Radio groups
    #[serde(rename = "mapping_radiobox")]
    pub radiobox: Vec<RadioEntry>,
    /// Company stamps
    #[serde(rename = "mapping_stamp")]
    pub stamp: Vec<StampEntry>,
    /// Document numbers
    #[serde(rename = "mapping_doc_no")]
    pub doc_no: Vec<DocNumberEntry>,
    /// Attached files
    #[serde(rename = "mapping_more_file")]
    pub more_file: Vec<FileEntry>,
    /// Electronic seals
    #[serde(rename = "mapping_eseal")]
    pub eseal: Vec<EsealEntry>,
}

impl MappingSet {
    /// Total number of entries across all nine categories.
    pub fn len(&self) -> usize {
        self.text.len()
            + self.date_time.len()
            + self.signature.len()
            + self.checkbox.len()
            + self.radiobox.len()
            + self.stamp.len()
            + self.doc_no.len()
            + self.more_file.len()
            + self.eseal.len()
    }

    /// Whether no entries were aggregated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a signature entry is bound to the given step index.
    pub fn has_signature_for_step(&self, flow_index: &str) -> bool {
        self.signature
            .iter()
            .any(|e| e.flow_index.as_deref() == Some(flow_index))
    }

    /// Whether an e-seal entry is bound to the given step index.
    pub fn has_eseal_for_step(&self, flow_index: &str) -> bool {
        self.eseal
            .iter()
            .any(|e| e.flow_index.as_deref() == Some(flow_index))
    }

    /// Whether any entry of any category is bound to the given step index.
    pub fn has_any_for_step(&self, flow_index: &str) -> bool {
        let wanted = Some(flow_index);
        self.text.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.date_time.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.signature.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.checkbox.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.radiobox.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.stamp.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.doc_no.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.more_file.iter().any(|e| e.flow_index.as_deref() == wanted)
            || self.eseal.iter().any(|e| e.flow_index.as_deref() == wanted)
    }
}

/// Step indices one field's entries should be emitted under.
fn target_indices(
    assignment: &StepAssignment,
    expand_all_steps: bool,
    known_step_indices: &[String],
) -> Vec<Option<String>> {
    match assignment {
        StepAssignment::Step(idx) => vec![Some(idx.clone())],
        StepAssignment::AllSteps if expand_all_steps && !known_step_indices.is_empty() => {
            known_step_indices.iter().cloned().map(Some).collect()
        }
        // unassigned (or unexpandable all-steps) fields are kept with an
        // unset index; the validator decides whether that is acceptable
        StepAssignment::AllSteps | StepAssignment::Unassigned => vec![None],
    }
}

/// Resolve a field's transport style, with option-bearing growth applied.
fn wire_style_of(field: &FieldElement) -> WireStyle {
    let mut resolved = resolve(
        field.kind(),
        Some(&field.style_override),
        field.computed_style.as_ref(),
    );
    let grown = dynamic_size(
        field.kind(),
        Size::new(resolved.width, resolved.height),
        field.option_count(),
    );
    resolved.width = grown.width;
    resolved.height = grown.height;
    to_wire(&resolved, field.kind())
}

fn option_rows(options: &[String], value: &FieldValue) -> Vec<OptionRow> {
    options
        .iter()
        .map(|label| OptionRow {
            label: label.clone(),
            checked: match value {
                FieldValue::Checked(checked) => checked.contains(label),
                FieldValue::Choice(choice) => choice == label,
                _ => false,
            },
        })
        .collect()
}

fn date_input(id: String, spec: &DateInputSpec, x: f32, y: f32) -> DateInputEntry {
    DateInputEntry {
        id,
        placeholder: spec.placeholder.clone(),
        max_length: spec.max_length.to_string(),
        required: spec.required,
        x: encode_num(x),
        y: encode_num(y),
    }
}

/// Expand one date field into its three positioned sub-inputs.
fn date_inputs(field: &FieldElement) -> Vec<DateInputEntry> {
    let ids = composite::sub_input_ids(&field.id);
    let spacing = CompositeSpacing::default();
    let (day_spec, month_spec, year_spec) = match &field.config {
        TypeConfig::Date { day, month, year, .. } => (day.clone(), month.clone(), year.clone()),
        _ => {
            let TypeConfig::Date { day, month, year, .. } =
                crate::registry::type_defaults(&FieldKind::Date)
            else {
                unreachable!("date defaults are always a Date config");
            };
            (day, month, year)
        }
    };

    [
        (ids.day, DateSubtype::Day, day_spec),
        (ids.month, DateSubtype::Month, month_spec),
        (ids.year, DateSubtype::Year, year_spec),
    ]
    .into_iter()
    .map(|(id, subtype, spec)| {
        let pos = composite::sub_input_offset(field.rect.origin, subtype, &spacing);
        date_input(id, &spec, pos.x, pos.y)
    })
    .collect()
}

/// Aggregate all placed fields into the nine category buckets.
///
/// Every field lands in exactly one category. Fields of unrecognized kind
/// are skipped (with a debug log line) so aggregation stays total; date
/// sub-input kinds never appear here because they exist only as projections
/// of their parent date field.
pub fn build_mappings(
    fields: &[FieldElement],
    expand_all_steps: bool,
    known_step_indices: &[String],
) -> MappingSet {
    let mut set = MappingSet::default();

    for field in fields {
        let indices = target_indices(&field.assignment, expand_all_steps, known_step_indices);
        let placement = WirePlacement::of(field);
        let style = wire_style_of(field);
        let required = field.config.required();
        let label = field.id.clone();

        for flow_index in indices {
            match field.kind() {
                FieldKind::Text | FieldKind::Select => {
                    let (max_length, min_lines) = match &field.config {
                        TypeConfig::Text {
                            max_length,
                            min_lines,
                            ..
                        } => (*max_length, *min_lines),
                        _ => (255, 1),
                    };
                    set.text.push(TextEntry {
                        label: label.clone(),
                        required,
                        max_length: max_length.to_string(),
                        min_lines: min_lines.to_string(),
                        placement: placement.clone(),
                        style: style.clone(),
                        value: field.value.as_text().map(str::to_string),
                        flow_index,
                    });
                }
                FieldKind::Date => {
                    set.date_time.push(DateTimeEntry {
                        label: label.clone(),
                        required,
                        inputs: date_inputs(field),
                        placement: placement.clone(),
                        style: style.clone(),
                        flow_index,
                    });
                }
                FieldKind::Signature => {
                    set.signature.push(SignatureEntry {
                        label: label.clone(),
                        required,
                        placement: placement.clone(),
                        style: style.clone(),
                        value: field.value.as_text().map(str::to_string),
                        flow_index,
                    });
                }
                FieldKind::Checkbox => {
                    let options = match &field.config {
                        TypeConfig::Options { options, .. } => {
                            option_rows(options, &field.value)
                        }
                        _ => Vec::new(),
                    };
                    set.checkbox.push(CheckboxEntry {
                        label: label.clone(),
                        required,
                        options,
                        placement: placement.clone(),
                        style: style.clone(),
                        flow_index,
                    });
                }
                FieldKind::Radio => {
                    let options = match &field.config {
                        TypeConfig::Options { options, .. } => {
                            option_rows(options, &field.value)
                        }
                        _ => Vec::new(),
                    };
                    let selected = match &field.value {
                        FieldValue::Choice(choice) => Some(choice.clone()),
                        _ => None,
                    };
                    set.radiobox.push(RadioEntry {
                        label: label.clone(),
                        required,
                        options,
                        selected,
                        placement: placement.clone(),
                        style: style.clone(),
                        flow_index,
                    });
                }
                FieldKind::Stamp => {
                    set.stamp.push(StampEntry {
                        label: label.clone(),
                        required,
                        placement: placement.clone(),
                        style: style.clone(),
                        flow_index,
                    });
                }
                FieldKind::DocNumber => {
                    let max_length = match &field.config {
                        TypeConfig::Text { max_length, .. } => *max_length,
                        _ => 255,
                    };
                    set.doc_no.push(DocNumberEntry {
                        label: label.clone(),
                        required,
                        max_length: max_length.to_string(),
                        placement: placement.clone(),
                        style: style.clone(),
                        value: field.value.as_text().map(str::to_string),
                        flow_index,
                    });
                }
                FieldKind::MoreFile => {
                    let (max_size_mb, accept, embed) = match &field.config {
                        TypeConfig::File {
                            max_size_mb,
                            accept,
                            embed,
                            ..
                        } => (*max_size_mb, accept.clone(), *embed),
                        _ => (10, Vec::new(), true),
                    };
                    set.more_file.push(FileEntry {
                        label: label.clone(),
                        required,
                        max_file_size: max_size_mb.to_string(),
                        accept,
                        embed,
                        placement: placement.clone(),
                        style: style.clone(),
                        flow_index,
                    });
                }
                FieldKind::Eseal => {
                    set.eseal.push(EsealEntry {
                        label: label.clone(),
                        required,
                        placement: placement.clone(),
                        style: style.clone(),
                        flow_index,
                    });
                }
                FieldKind::DayPart | FieldKind::MonthPart | FieldKind::YearPart => {
                    debug!("field '{}' is a date projection, skipping", field.id);
                }
                FieldKind::Unknown(name) => {
                    debug!("field '{}' has unknown kind '{}', skipping", field.id, name);
                }
            }
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElement;
    use crate::geometry::Rect;

    fn text_field(id: &str) -> FieldElement {
        FieldElement::new(id, FieldKind::Text, 0, Rect::new(10.0, 20.0, 120.0, 28.0))
    }

    #[test]
    fn test_classification_is_exclusive() {
        let fields = vec![
            text_field("t1").with_step("0"),
            FieldElement::new("s1", FieldKind::Signature, 0, Rect::default()).with_step("0"),
            FieldElement::new("e1", FieldKind::Eseal, 1, Rect::default()).with_step("1"),
        ];
        let set = build_mappings(&fields, false, &[]);
        assert_eq!(set.text.len(), 1);
        assert_eq!(set.signature.len(), 1);
        assert_eq!(set.eseal.len(), 1);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_all_steps_expansion() {
        let steps: Vec<String> = ["0", "1", "2"].iter().map(|s| s.to_string()).collect();
        let fields = vec![text_field("t1").with_assignment(StepAssignment::AllSteps)];
        let set = build_mappings(&fields, true, &steps);
        assert_eq!(set.text.len(), 3);
        let indices: Vec<_> = set.text.iter().map(|e| e.flow_index.clone()).collect();
        assert_eq!(
            indices,
            vec![
                Some("0".to_string()),
                Some("1".to_string()),
                Some("2".to_string())
            ]
        );
        // identical content apart from the index
        assert!(set.text.windows(2).all(|w| {
            w[0].label == w[1].label && w[0].style == w[1].style && w[0].placement == w[1].placement
        }));
    }

    #[test]
    fn test_all_steps_without_expansion_keeps_one_unset_entry() {
        let fields = vec![text_field("t1").with_assignment(StepAssignment::AllSteps)];
        let set = build_mappings(&fields, false, &[]);
        assert_eq!(set.text.len(), 1);
        assert_eq!(set.text[0].flow_index, None);
    }

    #[test]
    fn test_unassigned_field_kept_with_unset_index() {
        let set = build_mappings(&[text_field("t1")], false, &[]);
        assert_eq!(set.text.len(), 1);
        assert_eq!(set.text[0].flow_index, None);
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let fields = vec![FieldElement::new(
            "x1",
            FieldKind::Unknown("hologram".to_string()),
            0,
            Rect::default(),
        )];
        let set = build_mappings(&fields, false, &[]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_date_field_expands_to_three_inputs() {
        let fields = vec![
            FieldElement::new("d1", FieldKind::Date, 2, Rect::new(100.0, 50.0, 150.0, 32.0))
                .with_step("1"),
        ];
        let set = build_mappings(&fields, false, &[]);
        assert_eq!(set.date_time.len(), 1);
        let entry = &set.date_time[0];
        assert_eq!(entry.inputs.len(), 3);
        assert_eq!(entry.inputs[0].id, "d1_dd");
        assert_eq!(entry.inputs[1].id, "d1_mm");
        assert_eq!(entry.inputs[2].id, "d1_yyyy");
        assert_eq!(entry.inputs[0].x, "100");
        // month and year stride to the right, same y
        let spacing = CompositeSpacing::default();
        assert_eq!(entry.inputs[1].x, encode_num(100.0 + spacing.stride()));
        assert_eq!(entry.inputs[2].x, encode_num(100.0 + 2.0 * spacing.stride()));
        assert!(entry.inputs.iter().all(|i| i.y == "50"));
    }

    #[test]
    fn test_checkbox_options_and_growth() {
        let fields = vec![FieldElement::new(
            "c1",
            FieldKind::Checkbox,
            0,
            Rect::new(0.0, 0.0, 110.0, 24.0),
        )
        .with_options(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        .with_value(FieldValue::Checked(vec!["b".to_string()]))
        .with_step("0")];
        let set = build_mappings(&fields, false, &[]);
        let entry = &set.checkbox[0];
        assert_eq!(entry.options.len(), 3);
        assert!(!entry.options[0].checked);
        assert!(entry.options[1].checked);
        // 3 options * 22 + 8 padding
        assert_eq!(entry.style.height, "74");
    }

    #[test]
    fn test_radio_selected_value() {
        let fields = vec![FieldElement::new("r1", FieldKind::Radio, 0, Rect::default())
            .with_options(vec!["yes".to_string(), "no".to_string()])
            .with_value(FieldValue::Choice("no".to_string()))
            .with_step("0")];
        let set = build_mappings(&fields, false, &[]);
        let entry = &set.radiobox[0];
        assert_eq!(entry.selected.as_deref(), Some("no"));
        assert!(entry.options[1].checked);
    }

    #[test]
    fn test_select_lands_in_text_category() {
        let fields = vec![FieldElement::new("sel", FieldKind::Select, 0, Rect::default())
            .with_options(vec!["x".to_string()])
            .with_value(FieldValue::Choice("x".to_string()))
            .with_step("0")];
        let set = build_mappings(&fields, false, &[]);
        assert_eq!(set.text.len(), 1);
        assert_eq!(set.text[0].value.as_deref(), Some("x"));
    }

    #[test]
    fn test_step_lookups() {
        let fields = vec![
            FieldElement::new("s1", FieldKind::Signature, 0, Rect::default()).with_step("1"),
            text_field("t1").with_step("0"),
        ];
        let set = build_mappings(&fields, false, &[]);
        assert!(set.has_signature_for_step("1"));
        assert!(!set.has_signature_for_step("0"));
        assert!(set.has_any_for_step("0"));
        assert!(!set.has_any_for_step("2"));
    }

    #[test]
    fn test_wire_bucket_names() {
        let set = build_mappings(&[text_field("t1").with_step("0")], false, &[]);
        let json = serde_json::to_value(&set).unwrap();
        for key in [
            "mapping_text",
            "mapping_date_time",
            "mapping_signature",
            "mapping_checkbox",
            "mapping_radiobox",
            "mapping_stamp",
            "mapping_doc_no",
            "mapping_more_file",
            "mapping_eseal",
        ] {
            assert!(json.get(key).is_some(), "missing wire key {key}");
        }
    }
}
