use crate::controls::{FieldControl, RawInput, RenderedInput, WidgetKind};
use crate::core::value::Value;
use crate::schema::Field;

/// Numeric control for number and currency fields. Empty input stays an
/// empty string (so required/min checks can tell "cleared" from zero);
/// unparsable input is kept as text for the validator to reject.
pub struct NumberControl;

impl FieldControl for NumberControl {
    fn coerce(&self, _field: &Field, current: Option<&Value>, raw: RawInput) -> Value {
        match raw {
            RawInput::Text(text) => {
                if text.is_empty() {
                    Value::Text(String::new())
                } else {
                    match text.trim().parse::<f64>() {
                        Ok(number) => Value::Number(number),
                        Err(_) => Value::Text(text),
                    }
                }
            }
            _ => current.cloned().unwrap_or(Value::Null),
        }
    }

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput {
        let mut rendered = RenderedInput::base(WidgetKind::Number, field, error);
        rendered.display_value = value.map(Value::to_display_string).unwrap_or_default();
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::NumberControl;
    use crate::controls::{FieldControl, RawInput};
    use crate::core::value::Value;
    use crate::schema::{Field, FieldType};

    fn field() -> Field {
        Field::new("amt", "amount", FieldType::Number, "Amount")
    }

    #[test]
    fn empty_input_becomes_empty_text() {
        let coerced = NumberControl.coerce(&field(), None, RawInput::Text(String::new()));
        assert_eq!(coerced, Value::Text(String::new()));
    }

    #[test]
    fn numeric_input_parses() {
        let coerced = NumberControl.coerce(&field(), None, RawInput::Text("1500.5".to_string()));
        assert_eq!(coerced, Value::Number(1500.5));
    }

    #[test]
    fn unparsable_input_stays_text() {
        let coerced = NumberControl.coerce(&field(), None, RawInput::Text("12abc".to_string()));
        assert_eq!(coerced, Value::Text("12abc".to_string()));
    }

    #[test]
    fn renders_whole_numbers_without_fraction() {
        let value = Value::Number(42.0);
        let rendered = NumberControl.render(&field(), Some(&value), None);
        assert_eq!(rendered.display_value, "42");
    }
}
