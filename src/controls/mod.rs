//! Field controls: one implementation per field type tag owning its value
//! coercion and render-data mapping, selected through a registry so new
//! types plug in without touching dispatch.

pub mod checkbox;
pub mod choice;
pub mod file;
pub mod number;
pub mod select;
pub mod text;

use std::collections::HashMap;

use crate::core::data::FormData;
use crate::core::value::{FileHandle, Value};
use crate::schema::{Field, FieldType, SelectOption, Step};
use crate::validate::Errors;
use crate::visibility;

pub use checkbox::{CheckboxControl, CheckboxGroupControl};
pub use choice::ChoiceControl;
pub use file::FileControl;
pub use number::NumberControl;
pub use select::{SelectControl, country_options};
pub use text::TextControl;

/// What the presentation layer reports when the user interacts with a
/// rendered input.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Text typed into a text-like input, or the chosen value of a
    /// select/radio group.
    Text(String),
    /// Checkbox toggled.
    Toggle(bool),
    /// One option of a checkbox group ticked or unticked.
    ToggleOption { value: String, on: bool },
    /// Files picked in a file input, in selection order.
    FilesSelected(Vec<FileHandle>),
}

/// Widget family the presentation layer should draw for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Text,
    Email,
    Phone,
    Number,
    TextArea,
    Select,
    RadioGroup,
    IconGrid,
    Checkbox,
    CheckboxGroup,
    FilePicker,
    Date,
}

/// Pure render data for one input: everything the presentation layer needs
/// to draw the field and its error, with no drawing of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInput {
    pub widget: WidgetKind,
    pub id: String,
    pub name: String,
    pub label: String,
    pub display_value: String,
    pub checked: bool,
    pub selected_values: Vec<String>,
    pub options: Vec<SelectOption>,
    pub file: Option<FileHandle>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub error: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub rows: u32,
    pub accept: Option<String>,
}

impl RenderedInput {
    pub fn base(widget: WidgetKind, field: &Field, error: Option<&str>) -> Self {
        Self {
            widget,
            id: field.id.clone(),
            name: field.name.clone(),
            label: field.label.clone(),
            display_value: String::new(),
            checked: false,
            selected_values: Vec::new(),
            options: Vec::new(),
            file: None,
            placeholder: field.placeholder.clone(),
            help_text: field.help_text.clone(),
            error: error.map(str::to_string),
            required: field.required,
            disabled: field.disabled,
            rows: field.rows.unwrap_or(3),
            accept: field.accept.clone(),
        }
    }
}

/// A field type's input behavior: how raw interaction coerces into a stored
/// value, and how the stored value maps back to render data.
pub trait FieldControl: Send + Sync {
    fn coerce(&self, field: &Field, current: Option<&Value>, raw: RawInput) -> Value;

    fn render(&self, field: &Field, value: Option<&Value>, error: Option<&str>) -> RenderedInput;
}

/// Registry keyed on the field type tag. `Default` wires up the builtin
/// controls; `register` adds or overrides a control without modifying
/// dispatch. Unregistered tags fall back to the plain text control.
pub struct ControlRegistry {
    controls: HashMap<FieldType, Box<dyn FieldControl>>,
    fallback: Box<dyn FieldControl>,
}

impl ControlRegistry {
    pub fn empty() -> Self {
        Self {
            controls: HashMap::new(),
            fallback: Box::new(TextControl::new(WidgetKind::Text)),
        }
    }

    pub fn register(&mut self, field_type: FieldType, control: Box<dyn FieldControl>) {
        self.controls.insert(field_type, control);
    }

    pub fn control_for(&self, field_type: FieldType) -> &dyn FieldControl {
        self.controls
            .get(&field_type)
            .map(Box::as_ref)
            .unwrap_or(self.fallback.as_ref())
    }

    /// Coerce raw interaction into a stored value. Disabled fields reject
    /// interaction: `None` means "ignore this input".
    pub fn apply_input(
        &self,
        field: &Field,
        current: Option<&Value>,
        raw: RawInput,
    ) -> Option<Value> {
        if field.disabled {
            return None;
        }
        Some(self.control_for(field.field_type).coerce(field, current, raw))
    }

    pub fn render_field(
        &self,
        field: &Field,
        value: Option<&Value>,
        error: Option<&str>,
    ) -> RenderedInput {
        self.control_for(field.field_type).render(field, value, error)
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(FieldType::Text, Box::new(TextControl::new(WidgetKind::Text)));
        registry.register(FieldType::Email, Box::new(TextControl::new(WidgetKind::Email)));
        registry.register(FieldType::Phone, Box::new(TextControl::new(WidgetKind::Phone)));
        registry.register(
            FieldType::Textarea,
            Box::new(TextControl::new(WidgetKind::TextArea)),
        );
        registry.register(FieldType::Date, Box::new(TextControl::new(WidgetKind::Date)));
        registry.register(FieldType::Number, Box::new(NumberControl));
        registry.register(FieldType::Currency, Box::new(NumberControl));
        registry.register(FieldType::Select, Box::new(SelectControl::plain()));
        registry.register(FieldType::Country, Box::new(SelectControl::country()));
        registry.register(
            FieldType::Radio,
            Box::new(ChoiceControl::new(WidgetKind::RadioGroup)),
        );
        registry.register(
            FieldType::IconSelect,
            Box::new(ChoiceControl::new(WidgetKind::IconGrid)),
        );
        registry.register(FieldType::Checkbox, Box::new(CheckboxControl));
        registry.register(FieldType::CheckboxGroup, Box::new(CheckboxGroupControl));
        registry.register(FieldType::File, Box::new(FileControl));
        registry
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<RenderedInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStep {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub sections: Vec<RenderedSection>,
}

impl RenderedStep {
    /// All rendered fields across sections, in layout order.
    pub fn fields(&self) -> impl Iterator<Item = &RenderedInput> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }
}

/// Assemble one step's visible sections and fields into pure render data.
/// A flat-field step renders as a single untitled section.
pub fn render_step(
    step: &Step,
    data: &FormData,
    errors: &Errors,
    registry: &ControlRegistry,
) -> RenderedStep {
    let mut sections = Vec::new();

    if let Some(fields) = &step.fields {
        let rendered = render_fields(fields, data, errors, registry);
        if !rendered.is_empty() {
            sections.push(RenderedSection {
                id: format!("{}__fields", step.id),
                title: None,
                description: None,
                fields: rendered,
            });
        }
    }

    for section in visibility::visible_sections(step, data) {
        sections.push(RenderedSection {
            id: section.id.clone(),
            title: section.title.clone(),
            description: section.description.clone(),
            fields: render_fields(&section.fields, data, errors, registry),
        });
    }

    RenderedStep {
        id: step.id.clone(),
        title: step.title.clone(),
        description: step.description.clone(),
        sections,
    }
}

fn render_fields(
    fields: &[Field],
    data: &FormData,
    errors: &Errors,
    registry: &ControlRegistry,
) -> Vec<RenderedInput> {
    fields
        .iter()
        .filter(|field| visibility::field_visible(field, data))
        .map(|field| {
            let path = crate::core::path::FieldPath::parse_lossy(&field.name);
            let value = data.get(&path);
            let error = errors.get(&field.name).map(String::as_str);
            registry.render_field(field, value, error)
        })
        .collect()
}
