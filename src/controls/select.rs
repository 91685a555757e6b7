use crate::controls::{FieldControl, RawInput, RenderedInput, WidgetKind};
use crate::core::value::Value;
use crate::schema::{Field, SelectOption};

/// Built-in option list for the `country` field type, independent of any
/// field-level options.
pub fn country_options() -> Vec<SelectOption> {
    [
        ("canada", "Canada"),
        ("uk", "United Kingdom"),
        ("usa", "United States"),
        ("australia", "Australia"),
        ("germany", "Germany"),
        ("france", "France"),
        ("ireland", "Ireland"),
        ("netherlands", "Netherlands"),
        ("cyprus", "Cyprus"),
        ("uae", "United Arab Emirates"),
        ("other", "Other"),
    ]
    .into_iter()
    .map(|(value, label)| SelectOption::new(value, label))
    .collect()
}

/// Dropdown control. The `country` variant always renders the built-in
/// country list; the plain variant renders the field's own options.
pub struct SelectControl {
    country: bool,
}

impl SelectControl {
    pub fn plain() -> Self {
        Self { country: false }
    }

    pub fn country() -> Self {
        Self { country: true }
    }
}

impl FieldControl for SelectControl {
    fn coerce(&self, _field: &Field, current: Option<&Value>, raw: RawInput) -> Value {
        match raw {
            RawInput::Text(text) => Value::Text(text),
            _ => current.cloned().unwrap_or(Value::Null),
        }
    }

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput {
        let mut rendered = RenderedInput::base(WidgetKind::Select, field, error);
        rendered.display_value = value.map(Value::to_display_string).unwrap_or_default();
        rendered.selected_values = match &rendered.display_value {
            text if text.is_empty() => Vec::new(),
            text => vec![text.clone()],
        };
        rendered.options = if self.country {
            country_options()
        } else {
            field.options.clone()
        };
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectControl, country_options};
    use crate::controls::FieldControl;
    use crate::core::value::Value;
    use crate::schema::{Field, FieldType, SelectOption};

    #[test]
    fn country_renders_the_builtin_list_regardless_of_field_options() {
        let field = Field::new("c", "visa.destination", FieldType::Country, "Destination")
            .with_options(vec![SelectOption::new("ignored", "Ignored")]);
        let rendered = SelectControl::country().render(&field, None, None);
        assert_eq!(rendered.options, country_options());
        assert_eq!(rendered.options.len(), 11);
    }

    #[test]
    fn plain_select_renders_field_options_and_selection() {
        let field = Field::new("s", "s", FieldType::Select, "S").with_options(vec![
            SelectOption::new("a", "A"),
            SelectOption::new("b", "B"),
        ]);
        let value = Value::from("b");
        let rendered = SelectControl::plain().render(&field, Some(&value), None);
        assert_eq!(rendered.options.len(), 2);
        assert_eq!(rendered.selected_values, vec!["b".to_string()]);
    }
}
