use crate::controls::{FieldControl, RawInput, RenderedInput, WidgetKind};
use crate::core::value::Value;
use crate::schema::Field;

/// Raw-string control backing text, email, phone, textarea and date fields,
/// and the fallback for unrecognized type tags. Dates are ISO strings; no
/// parsing happens here.
pub struct TextControl {
    widget: WidgetKind,
}

impl TextControl {
    pub fn new(widget: WidgetKind) -> Self {
        Self { widget }
    }
}

impl FieldControl for TextControl {
    fn coerce(&self, _field: &Field, current: Option<&Value>, raw: RawInput) -> Value {
        match raw {
            RawInput::Text(text) => Value::Text(text),
            _ => current.cloned().unwrap_or(Value::Null),
        }
    }

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput {
        let mut rendered = RenderedInput::base(self.widget, field, error);
        rendered.display_value = value.map(Value::to_display_string).unwrap_or_default();
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::TextControl;
    use crate::controls::{FieldControl, RawInput, WidgetKind};
    use crate::core::value::Value;
    use crate::schema::{Field, FieldType};

    #[test]
    fn passes_text_through_unchanged() {
        let control = TextControl::new(WidgetKind::Text);
        let field = Field::new("f", "f", FieldType::Text, "F");
        let coerced = control.coerce(&field, None, RawInput::Text("  raw  ".to_string()));
        assert_eq!(coerced, Value::from("  raw  "));
    }

    #[test]
    fn foreign_raw_input_keeps_the_current_value() {
        let control = TextControl::new(WidgetKind::Text);
        let field = Field::new("f", "f", FieldType::Text, "F");
        let current = Value::from("kept");
        let coerced = control.coerce(&field, Some(&current), RawInput::Toggle(true));
        assert_eq!(coerced, current);
    }
}
