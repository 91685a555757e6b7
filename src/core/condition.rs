use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::core::data::FormData;
use crate::core::path::FieldPath;
use crate::core::value::Value;

/// Nested expressions deeper than this evaluate fail-open. Schemas are
/// tree-shaped by construction; the cap only guards against authoring
/// mistakes.
pub const MAX_CONDITION_DEPTH: usize = 64;

/// Operators accepted in schema documents. The engine interprets the six the
/// original form runtime handled; the rest deserialize fine and evaluate
/// fail-open (see `evaluate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConditionalOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    GreaterThanOrEquals,
    LessThanOrEquals,
    In,
    NotIn,
    IsEmpty,
    IsNotEmpty,
}

/// Boolean-valued rule over form data controlling visibility of a step,
/// section or field. `and` children narrow the primary comparison, then `or`
/// children widen the narrowed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionalExpression {
    /// Dotted path into the full form data, not a step-local scope.
    pub field: String,
    pub operator: ConditionalOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<ConditionalExpression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<ConditionalExpression>,
}

impl ConditionalExpression {
    pub fn new(field: impl Into<String>, operator: ConditionalOperator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
            and: Vec::new(),
            or: Vec::new(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::new(field, ConditionalOperator::Equals).with_value(value)
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::new(field, ConditionalOperator::NotEquals).with_value(value)
    }

    pub fn is_empty(field: impl Into<String>) -> Self {
        Self::new(field, ConditionalOperator::IsEmpty)
    }

    pub fn is_not_empty(field: impl Into<String>) -> Self {
        Self::new(field, ConditionalOperator::IsNotEmpty)
    }

    pub fn with_value(mut self, value: impl Into<JsonValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_and(mut self, child: ConditionalExpression) -> Self {
        self.and.push(child);
        self
    }

    pub fn with_or(mut self, child: ConditionalExpression) -> Self {
        self.or.push(child);
        self
    }
}

/// Evaluate a conditional expression against the full form data. Pure and
/// deterministic; repeated calls with identical inputs yield identical
/// output.
pub fn evaluate(expr: &ConditionalExpression, data: &FormData) -> bool {
    evaluate_at(expr, data, 0)
}

fn evaluate_at(expr: &ConditionalExpression, data: &FormData, depth: usize) -> bool {
    if depth > MAX_CONDITION_DEPTH {
        tracing::warn!(
            field = %expr.field,
            "conditional expression exceeds depth cap, evaluating fail-open"
        );
        return true;
    }

    let resolved = data
        .get(&FieldPath::parse_lossy(&expr.field))
        .cloned()
        .unwrap_or(Value::Null);

    let primary = match expr.operator {
        ConditionalOperator::Equals => equals(&resolved, expr.value.as_ref()),
        ConditionalOperator::NotEquals => !equals(&resolved, expr.value.as_ref()),
        ConditionalOperator::Contains => contains(&resolved, expr.value.as_ref()),
        ConditionalOperator::IsEmpty => resolved.is_missing(),
        ConditionalOperator::IsNotEmpty => !resolved.is_missing(),
        ConditionalOperator::In => is_in(&resolved, expr.value.as_ref()),
        // Operators the engine does not interpret evaluate true so a schema
        // using them degrades to "always visible" rather than hiding content.
        _ => true,
    };

    let mut result = primary;
    if !expr.and.is_empty() {
        result = result && expr.and.iter().all(|child| evaluate_at(child, data, depth + 1));
    }
    if !expr.or.is_empty() {
        result = result || expr.or.iter().any(|child| evaluate_at(child, data, depth + 1));
    }
    result
}

fn equals(resolved: &Value, comparison: Option<&JsonValue>) -> bool {
    let comparison = comparison
        .map(|value| Value::from_json(value.clone()))
        .unwrap_or(Value::Null);
    *resolved == comparison
}

fn contains(resolved: &Value, comparison: Option<&JsonValue>) -> bool {
    let Value::Text(haystack) = resolved else {
        return false;
    };
    let Some(comparison) = comparison else {
        return false;
    };
    let needle = match comparison {
        JsonValue::String(text) => text.clone(),
        other => Value::from_json(other.clone()).to_display_string(),
    };
    haystack.contains(needle.as_str())
}

fn is_in(resolved: &Value, comparison: Option<&JsonValue>) -> bool {
    let Some(JsonValue::Array(items)) = comparison else {
        return false;
    };
    items
        .iter()
        .any(|item| Value::from_json(item.clone()) == *resolved)
}
