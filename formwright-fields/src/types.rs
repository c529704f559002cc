//! Core form types: templates, sections, fields and submissions.
//!
//! All types serialize via serde using the camelCase keys of the persisted
//! layout (`createdAt`, `templateId`, ...). A field's kind-specific
//! attributes are flattened next to its common attributes and selected by
//! the `type` tag.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldsError;
use crate::ids::{FieldId, OptionId, SectionId, SubmissionId, TemplateId};

/// Submitted values keyed by field id.
pub type FormData = BTreeMap<FieldId, serde_json::Value>;

/// Heading rank of a label field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelSize {
    /// Largest heading
    H1,
    /// Medium heading
    #[default]
    H2,
    /// Smallest heading
    H3,
}

impl FromStr for LabelSize {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h1" => Ok(Self::H1),
            "h2" => Ok(Self::H2),
            "h3" => Ok(Self::H3),
            other => Err(FieldsError::invalid_attribute("label size", other)),
        }
    }
}

/// Presentation of a boolean field. Both variants accept the same values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BooleanVariant {
    #[default]
    Checkbox,
    Toggle,
}

impl FromStr for BooleanVariant {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkbox" => Ok(Self::Checkbox),
            "toggle" => Ok(Self::Toggle),
            other => Err(FieldsError::invalid_attribute("boolean variant", other)),
        }
    }
}

/// A single choice of an enum field.
///
/// `value` is what gets submitted. Uniqueness of values within one field is
/// not checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    pub id: OptionId,
    pub label: String,
    pub value: String,
}

impl FieldOption {
    /// Create an option with a fresh id.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(),
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The kind of a field and the attributes that only make sense for that kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Static heading. Never submitted, never validated.
    Label { size: LabelSize },
    Text {
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Numeric input with optional inclusive bounds.
    Number {
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean {
        #[serde(default)]
        required: bool,
        #[serde(default)]
        variant: BooleanVariant,
    },
    /// Choice among a fixed list of options.
    Enum {
        #[serde(default)]
        required: bool,
        #[serde(default)]
        options: Vec<FieldOption>,
    },
}

impl FieldKind {
    /// The names accepted by [`FieldKind::default_for`], in palette order.
    pub const NAMES: [&'static str; 5] = ["label", "text", "number", "boolean", "enum"];

    /// A kind with default attributes, looked up by its tag name.
    ///
    /// Labels default to a medium heading and booleans to a checkbox.
    pub fn default_for(name: &str) -> Result<Self, FieldsError> {
        match name {
            "label" => Ok(Self::Label {
                size: LabelSize::default(),
            }),
            "text" => Ok(Self::Text {
                required: false,
                placeholder: None,
            }),
            "number" => Ok(Self::Number {
                required: false,
                placeholder: None,
                min: None,
                max: None,
            }),
            "boolean" => Ok(Self::Boolean {
                required: false,
                variant: BooleanVariant::default(),
            }),
            "enum" => Ok(Self::Enum {
                required: false,
                options: Vec::new(),
            }),
            other => Err(FieldsError::unknown_kind(other)),
        }
    }

    /// The `type` tag of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Label { .. } => "label",
            Self::Text { .. } => "text",
            Self::Number { .. } => "number",
            Self::Boolean { .. } => "boolean",
            Self::Enum { .. } => "enum",
        }
    }

    /// Whether values must be present. Always false for labels.
    pub fn required(&self) -> bool {
        match self {
            Self::Label { .. } => false,
            Self::Text { required, .. }
            | Self::Number { required, .. }
            | Self::Boolean { required, .. }
            | Self::Enum { required, .. } => *required,
        }
    }

    /// Set the required flag. Returns false (and changes nothing) for labels.
    pub fn set_required(&mut self, value: bool) -> bool {
        match self {
            Self::Label { .. } => false,
            Self::Text { required, .. }
            | Self::Number { required, .. }
            | Self::Boolean { required, .. }
            | Self::Enum { required, .. } => {
                *required = value;
                true
            }
        }
    }

    /// Builder form of [`FieldKind::set_required`].
    pub fn with_required(mut self, value: bool) -> Self {
        self.set_required(value);
        self
    }
}

impl FromStr for FieldKind {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::default_for(s)
    }
}

/// The atomic form element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    /// Zero-based display position within the owning section
    pub order: usize,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    /// Create a field with a fresh id at order 0.
    pub fn new(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: FieldId::new(),
            label: label.into(),
            order: 0,
            kind,
        }
    }

    pub fn required(&self) -> bool {
        self.kind.required()
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Labels are display-only; every other kind takes a value.
    pub fn is_submittable(&self) -> bool {
        !matches!(self.kind, FieldKind::Label { .. })
    }
}

/// A named, ordered group of fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    /// Position within the owning template
    pub order: usize,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Section {
    /// Create an empty section with a fresh id.
    pub fn new(title: impl Into<String>, order: usize) -> Self {
        Self {
            id: SectionId::new(),
            title: title.into(),
            order,
            fields: Vec::new(),
        }
    }

    /// Fields in display order. Ties keep their stored position.
    pub fn sorted_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.order);
        fields
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }
}

/// The top-level reusable form definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Create an empty template stamped with the current time.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TemplateId::new(),
            name: name.into(),
            description,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`. Never moves it backwards, even if the clock does.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| &s.id == id)
    }

    /// Sections in display order.
    pub fn sorted_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Every field of the template in display order: sections by `order`,
    /// then fields by `order` within each section.
    pub fn fields_in_order(&self) -> Vec<&Field> {
        self.sorted_sections()
            .into_iter()
            .flat_map(|s| s.sorted_fields())
            .collect()
    }

    /// Find a field anywhere in the template.
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.sections.iter().find_map(|s| s.field(id))
    }
}

/// A completed, validated instance of a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub template_id: TemplateId,
    pub data: FormData,
    pub submitted_at: DateTime<Utc>,
}

impl FormSubmission {
    /// Create a submission stamped with the current time.
    pub fn new(template_id: TemplateId, data: FormData) -> Self {
        Self {
            id: SubmissionId::new(),
            template_id,
            data,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_template() -> Template {
        let mut template = Template::new("Onboarding", Some("New hire form".into()));
        let mut personal = Section::new("Personal", 0);
        let mut name = Field::new(
            "Name",
            FieldKind::Text {
                required: true,
                placeholder: Some("Full name".into()),
            },
        );
        name.order = 0;
        let mut age = Field::new(
            "Age",
            FieldKind::Number {
                required: false,
                placeholder: None,
                min: Some(18.0),
                max: Some(65.0),
            },
        );
        age.order = 1;
        personal.fields = vec![name, age];

        let mut prefs = Section::new("Preferences", 1);
        let mut color = Field::new(
            "Color",
            FieldKind::Enum {
                required: false,
                options: vec![FieldOption::new("red", "Red"), FieldOption::new("blue", "Blue")],
            },
        );
        color.order = 0;
        prefs.fields = vec![color];

        template.sections = vec![personal, prefs];
        template
    }

    #[test]
    fn field_json_is_flat_and_tagged() {
        let field = Field::new(
            "Subscribe",
            FieldKind::Boolean {
                required: true,
                variant: BooleanVariant::Toggle,
            },
        );
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "boolean");
        assert_eq!(value["variant"], "toggle");
        assert_eq!(value["required"], true);
        assert_eq!(value["label"], "Subscribe");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn label_field_has_no_required_attribute() {
        let field = Field::new("Header", FieldKind::Label { size: LabelSize::H1 });
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["size"], "h1");
        assert!(value.get("required").is_none());
        assert!(!field.required());
        assert!(!field.is_submittable());
    }

    #[test]
    fn stray_attributes_from_other_kinds_are_dropped() {
        let input = json!({
            "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "label": "Name",
            "order": 0,
            "type": "text",
            "required": true,
            "min": 3,
            "options": []
        });
        let field: Field = serde_json::from_value(input).unwrap();
        assert_eq!(
            field.kind,
            FieldKind::Text {
                required: true,
                placeholder: None
            }
        );
        let back = serde_json::to_value(&field).unwrap();
        assert!(back.get("min").is_none());
        assert!(back.get("options").is_none());
    }

    #[test]
    fn unknown_kind_tag_is_rejected() {
        let input = json!({
            "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "label": "When",
            "order": 0,
            "type": "date"
        });
        assert!(serde_json::from_value::<Field>(input).is_err());
    }

    #[test]
    fn number_bounds_accept_integers() {
        let input = json!({
            "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "label": "Age",
            "order": 2,
            "type": "number",
            "min": 18,
            "max": 65
        });
        let field: Field = serde_json::from_value(input).unwrap();
        match field.kind {
            FieldKind::Number { min, max, required, .. } => {
                assert_eq!(min, Some(18.0));
                assert_eq!(max, Some(65.0));
                assert!(!required);
            }
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn template_json_round_trip() {
        let template = sample_template();
        let json = serde_json::to_string_pretty(&template).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        let parsed: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(template, parsed);
        assert_eq!(parsed.updated_at, template.updated_at);
    }

    #[test]
    fn template_yaml_round_trip() {
        let template = sample_template();
        let yaml = serde_yaml_ng::to_string(&template).unwrap();
        let parsed: Template = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(template, parsed);
    }

    #[test]
    fn submission_round_trip() {
        let template = sample_template();
        let name_id = template.sections[0].fields[0].id;
        let mut data = FormData::new();
        data.insert(name_id, json!("Ada"));
        let submission = FormSubmission::new(template.id, data);
        let json = serde_json::to_string(&submission).unwrap();
        assert!(json.contains("\"templateId\""));
        assert!(json.contains("\"submittedAt\""));
        let parsed: FormSubmission = serde_json::from_str(&json).unwrap();
        assert_eq!(submission, parsed);
    }

    #[test]
    fn fields_in_order_follows_order_not_position() {
        let mut template = sample_template();
        template.sections.swap(0, 1);
        template.sections[1].fields.swap(0, 1);
        template.sections[1].fields[0].order = 0;
        template.sections[1].fields[1].order = 1;

        let labels: Vec<&str> = template
            .fields_in_order()
            .iter()
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Age", "Name", "Color"]);
    }

    #[test]
    fn touch_never_goes_backwards() {
        let mut template = sample_template();
        let future = Utc::now() + chrono::Duration::hours(1);
        template.updated_at = future;
        template.touch();
        assert_eq!(template.updated_at, future);

        let mut fresh = sample_template();
        let before = fresh.updated_at;
        fresh.touch();
        assert!(fresh.updated_at >= before);
    }

    #[test]
    fn default_kinds_from_names() {
        for name in FieldKind::NAMES {
            let kind = FieldKind::default_for(name).unwrap();
            assert_eq!(kind.name(), name);
            assert!(!kind.required());
        }
        assert_eq!(
            FieldKind::default_for("label").unwrap(),
            FieldKind::Label {
                size: LabelSize::H2
            }
        );
        assert!(FieldKind::default_for("date").is_err());
    }

    #[test]
    fn set_required_ignores_labels() {
        let mut label = FieldKind::Label { size: LabelSize::H3 };
        assert!(!label.set_required(true));
        assert!(!label.required());

        let text = FieldKind::default_for("text").unwrap().with_required(true);
        assert!(text.required());
    }

    #[test]
    fn attribute_parsing() {
        assert_eq!("h3".parse::<LabelSize>().unwrap(), LabelSize::H3);
        assert!("h4".parse::<LabelSize>().is_err());
        assert_eq!(
            "toggle".parse::<BooleanVariant>().unwrap(),
            BooleanVariant::Toggle
        );
        assert!("radio".parse::<BooleanVariant>().is_err());
        assert_eq!("number".parse::<FieldKind>().unwrap().name(), "number");
        assert!("checkbox".parse::<FieldKind>().is_err());
    }
}
