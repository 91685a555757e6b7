use crate::controls::{FieldControl, RawInput, RenderedInput, WidgetKind};
use crate::core::value::Value;
use crate::schema::Field;

/// File picker. Only the first selected file is kept; an empty selection
/// clears the field.
pub struct FileControl;

impl FieldControl for FileControl {
    fn coerce(&self, _field: &Field, current: Option<&Value>, raw: RawInput) -> Value {
        match raw {
            RawInput::FilesSelected(files) => files
                .into_iter()
                .next()
                .map(Value::File)
                .unwrap_or(Value::Null),
            _ => current.cloned().unwrap_or(Value::Null),
        }
    }

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput {
        let mut rendered = RenderedInput::base(WidgetKind::FilePicker, field, error);
        rendered.file = value.and_then(Value::as_file).cloned();
        rendered.display_value = rendered
            .file
            .as_ref()
            .map(|file| file.name.clone())
            .unwrap_or_default();
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::FileControl;
    use crate::controls::{FieldControl, RawInput};
    use crate::core::value::{FileHandle, Value};
    use crate::schema::{Field, FieldType};

    fn field() -> Field {
        Field::new("f", "statement", FieldType::File, "Bank Statement")
    }

    #[test]
    fn keeps_only_the_first_selected_file() {
        let files = vec![
            FileHandle::new("statement.pdf", 1024),
            FileHandle::new("extra.pdf", 2048),
        ];
        let coerced = FileControl.coerce(&field(), None, RawInput::FilesSelected(files));
        assert_eq!(coerced, Value::File(FileHandle::new("statement.pdf", 1024)));
    }

    #[test]
    fn empty_selection_clears_the_field() {
        let current = Value::File(FileHandle::new("old.pdf", 10));
        let coerced =
            FileControl.coerce(&field(), Some(&current), RawInput::FilesSelected(Vec::new()));
        assert_eq!(coerced, Value::Null);
    }
}
