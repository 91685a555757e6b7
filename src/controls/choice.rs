use crate::controls::{FieldControl, RawInput, RenderedInput, WidgetKind};
use crate::core::value::Value;
use crate::schema::Field;

/// Single-choice control backing radio groups and icon grids. Exactly one
/// of the option set may be selected; values outside the set are ignored.
pub struct ChoiceControl {
    widget: WidgetKind,
}

impl ChoiceControl {
    pub fn new(widget: WidgetKind) -> Self {
        Self { widget }
    }
}

impl FieldControl for ChoiceControl {
    fn coerce(&self, field: &Field, current: Option<&Value>, raw: RawInput) -> Value {
        match raw {
            RawInput::Text(choice) => {
                if field.options.iter().any(|opt| opt.value == choice) {
                    Value::Text(choice)
                } else {
                    current.cloned().unwrap_or(Value::Null)
                }
            }
            _ => current.cloned().unwrap_or(Value::Null),
        }
    }

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput {
        let mut rendered = RenderedInput::base(self.widget, field, error);
        rendered.display_value = value.map(Value::to_display_string).unwrap_or_default();
        rendered.selected_values = match &rendered.display_value {
            text if text.is_empty() => Vec::new(),
            text => vec![text.clone()],
        };
        rendered.options = field.options.clone();
        rendered
    }
}
