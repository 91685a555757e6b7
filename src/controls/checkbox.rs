use crate::controls::{FieldControl, RawInput, RenderedInput, WidgetKind};
use crate::core::value::Value;
use crate::schema::Field;

/// Boolean toggle.
pub struct CheckboxControl;

impl FieldControl for CheckboxControl {
    fn coerce(&self, _field: &Field, current: Option<&Value>, raw: RawInput) -> Value {
        match raw {
            RawInput::Toggle(checked) => Value::Bool(checked),
            _ => current.cloned().unwrap_or(Value::Null),
        }
    }

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput {
        let mut rendered = RenderedInput::base(WidgetKind::Checkbox, field, error);
        rendered.checked = value.map(Value::is_truthy).unwrap_or(false);
        rendered
    }
}

/// Multi-select over a fixed option set, stored as a list of option values.
/// Ticking appends (never duplicates), unticking removes; first-added order
/// is preserved.
pub struct CheckboxGroupControl;

impl FieldControl for CheckboxGroupControl {
    fn coerce(&self, _field: &Field, current: Option<&Value>, raw: RawInput) -> Value {
        let RawInput::ToggleOption { value, on } = raw else {
            return current.cloned().unwrap_or(Value::Null);
        };

        let mut selected: Vec<String> = current
            .and_then(Value::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_text().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if on {
            if !selected.iter().any(|existing| *existing == value) {
                selected.push(value);
            }
        } else {
            selected.retain(|existing| *existing != value);
        }

        Value::List(selected.into_iter().map(Value::Text).collect())
    }

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput {
        let mut rendered = RenderedInput::base(WidgetKind::CheckboxGroup, field, error);
        rendered.selected_values = value
            .and_then(Value::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_text().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        rendered.options = field.options.clone();
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckboxControl, CheckboxGroupControl};
    use crate::controls::{FieldControl, RawInput};
    use crate::core::value::Value;
    use crate::schema::{Field, FieldType, SelectOption};

    fn group() -> Field {
        Field::new("g", "docs", FieldType::CheckboxGroup, "Documents").with_options(vec![
            SelectOption::new("passport", "Passport"),
            SelectOption::new("bank", "Bank Statement"),
        ])
    }

    #[test]
    fn checkbox_toggles_a_boolean() {
        let field = Field::new("c", "accepted", FieldType::Checkbox, "Accepted");
        assert_eq!(
            CheckboxControl.coerce(&field, None, RawInput::Toggle(true)),
            Value::Bool(true)
        );
        let current = Value::Bool(true);
        assert_eq!(
            CheckboxControl.coerce(&field, Some(&current), RawInput::Toggle(false)),
            Value::Bool(false)
        );
    }

    #[test]
    fn group_adds_without_duplicating() {
        let tick = |current: Option<&Value>, value: &str| {
            CheckboxGroupControl.coerce(
                &group(),
                current,
                RawInput::ToggleOption {
                    value: value.to_string(),
                    on: true,
                },
            )
        };

        let once = tick(None, "passport");
        let twice = tick(Some(&once), "passport");
        assert_eq!(twice, Value::List(vec![Value::from("passport")]));

        let both = tick(Some(&twice), "bank");
        assert_eq!(
            both,
            Value::List(vec![Value::from("passport"), Value::from("bank")])
        );
    }

    #[test]
    fn group_removes_on_untick() {
        let current = Value::List(vec![Value::from("passport"), Value::from("bank")]);
        let removed = CheckboxGroupControl.coerce(
            &group(),
            Some(&current),
            RawInput::ToggleOption {
                value: "passport".to_string(),
                on: false,
            },
        );
        assert_eq!(removed, Value::List(vec![Value::from("bank")]));
    }
}
