//! Typed schema model for multi-step forms. Schemas are static,
//! caller-owned documents (JSON or YAML); the engine never mutates them.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::core::condition::ConditionalExpression;
use crate::error::SchemaError;

/// Closed set of field type tags. Tags outside the set deserialize as
/// `Unknown` and render through the fallback text control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Number,
    Currency,
    Date,
    Textarea,
    Select,
    Country,
    Radio,
    Checkbox,
    CheckboxGroup,
    IconSelect,
    File,
    #[serde(other)]
    Unknown,
}

/// Option for select, radio, checkbox-group and icon-select fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            icon: None,
            disabled: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Validation rules attached to a field. The engine enforces `pattern`
/// (with `pattern_message`) and `min`; the remaining bounds are carried for
/// schema fidelity and authoring tooling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldValidation {
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
    pub pattern_message: Option<String>,
    pub custom: Option<String>,
}

/// Single data-bearing input unit. `id` is unique per schema; `name` is the
/// dotted path into form data and may intentionally collide across steps to
/// share state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ConditionalExpression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Accepted extensions for file inputs, e.g. ".pdf,.jpg,.png".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    /// Maximum file size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Document template variable this field maps to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_variable: Option<String>,
    /// Name of another field to prefill from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefill_from: Option<String>,
}

impl Field {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            help_text: None,
            required: false,
            disabled: false,
            readonly: false,
            default_value: None,
            validation: None,
            show_if: None,
            options: Vec::new(),
            accept: None,
            max_size: None,
            multiple: false,
            rows: None,
            template_variable: None,
            prefill_from: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_show_if(mut self, condition: ConditionalExpression) -> Self {
        self.show_if = Some(condition);
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>, message: Option<String>) -> Self {
        let validation = self.validation.get_or_insert_with(FieldValidation::default);
        validation.pattern = Some(pattern.into());
        validation.pattern_message = message;
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.validation.get_or_insert_with(FieldValidation::default).min = Some(min);
        self
    }

    pub fn with_default_value(mut self, value: impl Into<JsonValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Titled grouping of fields within a step. Layout only; sections do not
/// create a nested data scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ConditionalExpression>,
}

impl Section {
    pub fn new(id: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            fields,
            layout: None,
            columns: None,
            show_if: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_show_if(mut self, condition: ConditionalExpression) -> Self {
        self.show_if = Some(condition);
        self
    }
}

/// Step-level validation rule carried from the original schema format.
/// The engine validates per field; these are available to callers that
/// implement cross-field checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepValidation {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_validator: Option<String>,
}

/// One page of the wizard. A step carries either sections or flat fields,
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<StepValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ConditionalExpression>,
}

impl Step {
    pub fn with_fields(id: impl Into<String>, title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            sections: None,
            fields: Some(fields),
            validation_rules: Vec::new(),
            show_if: None,
        }
    }

    pub fn with_sections(
        id: impl Into<String>,
        title: impl Into<String>,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            sections: Some(sections),
            fields: None,
            validation_rules: Vec::new(),
            show_if: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_show_if(mut self, condition: ConditionalExpression) -> Self {
        self.show_if = Some(condition);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub validate_on_blur: bool,
    pub validate_on_change: bool,
    pub show_errors_on_submit: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_on_blur: false,
            validate_on_change: false,
            show_errors_on_submit: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ConditionalActionType {
    Show,
    Hide,
    Enable,
    Disable,
    SetValue,
    SetOptions,
    SetRequired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalAction {
    #[serde(rename = "type")]
    pub action_type: ConditionalActionType,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
}

/// Schema-level conditional rule. Carried for schema fidelity; step, section
/// and field visibility goes through their own `show_if` expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    pub id: String,
    pub condition: ConditionalExpression,
    pub actions: Vec<ConditionalAction>,
}

/// Immutable definition of a multi-step form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub version: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditionals: Vec<ConditionalRule>,
}

impl FormSchema {
    pub fn new(id: impl Into<String>, title: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: id.into(),
            version: 1,
            title: title.into(),
            description: None,
            steps,
            validation: ValidationConfig::default(),
            conditionals: Vec::new(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Iterate every field declared anywhere in the schema, in document
    /// order, ignoring visibility.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.steps.iter().flat_map(|step| {
            step.fields
                .iter()
                .flatten()
                .chain(step.sections.iter().flatten().flat_map(|s| s.fields.iter()))
        })
    }

    /// JSON Schema document for the form-definition format itself, for
    /// authoring and template validation tooling.
    pub fn json_schema_document() -> JsonValue {
        serde_json::to_value(schema_for!(FormSchema)).unwrap_or(JsonValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldType, FormSchema};

    #[test]
    fn loads_a_json_schema_document() {
        let raw = r#"{
            "id": "visa-proof-of-funds",
            "version": 1,
            "title": "Proof of Funds Application",
            "steps": [
                {
                    "id": "destination",
                    "title": "Destination",
                    "fields": [
                        {
                            "id": "dest-country",
                            "name": "visa.destination",
                            "type": "country",
                            "label": "Destination Country",
                            "required": true
                        },
                        {
                            "id": "dest-other",
                            "name": "visa.destinationOther",
                            "type": "text",
                            "label": "Other Destination",
                            "showIf": {
                                "field": "visa.destination",
                                "operator": "equals",
                                "value": "other"
                            }
                        }
                    ]
                }
            ]
        }"#;

        let schema = FormSchema::from_json_str(raw).expect("schema should parse");
        assert_eq!(schema.steps.len(), 1);
        let fields: Vec<_> = schema.all_fields().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_type, FieldType::Country);
        assert!(fields[1].show_if.is_some());
    }

    #[test]
    fn unknown_field_type_tags_fall_back() {
        let raw = r#"{
            "id": "f", "name": "f", "type": "rich-text", "label": "Notes"
        }"#;
        let field: super::Field = serde_json::from_str(raw).expect("field should parse");
        assert_eq!(field.field_type, FieldType::Unknown);
    }

    #[test]
    fn kebab_case_tags_round_trip() {
        assert_eq!(
            serde_json::to_string(&FieldType::CheckboxGroup).expect("serialize"),
            "\"checkbox-group\""
        );
        assert_eq!(
            serde_json::to_string(&FieldType::IconSelect).expect("serialize"),
            "\"icon-select\""
        );
    }

    #[test]
    fn loads_a_yaml_schema_document() {
        let raw = "
id: financing
version: 1
title: Financing Application
steps:
  - id: amounts
    title: Amounts
    sections:
      - id: loan
        title: Loan
        fields:
          - id: amount
            name: loan.amount
            type: currency
            label: Loan Amount
            required: true
            validation:
              min: 1000
";
        let schema = FormSchema::from_yaml_str(raw).expect("schema should parse");
        let fields: Vec<_> = schema.all_fields().collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields[0].validation.as_ref().and_then(|v| v.min),
            Some(1000.0)
        );
    }

    #[test]
    fn json_schema_document_is_generated() {
        let doc = FormSchema::json_schema_document();
        assert!(doc.is_object());
    }
}
