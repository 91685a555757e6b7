//! Visible-subset computation. Steps, sections and fields with no condition
//! are visible unconditionally; the visible subsets are recomputed from
//! scratch on every form-data change.

use crate::core::condition::evaluate;
use crate::core::data::FormData;
use crate::schema::{Field, FormSchema, Section, Step};

pub fn step_visible(step: &Step, data: &FormData) -> bool {
    step.show_if.as_ref().is_none_or(|cond| evaluate(cond, data))
}

pub fn section_visible(section: &Section, data: &FormData) -> bool {
    section
        .show_if
        .as_ref()
        .is_none_or(|cond| evaluate(cond, data))
}

pub fn field_visible(field: &Field, data: &FormData) -> bool {
    field.show_if.as_ref().is_none_or(|cond| evaluate(cond, data))
}

/// Ordered, order-preserving subset of schema steps visible for the current
/// data. Visible steps form the contiguous navigable sequence.
pub fn visible_steps<'a>(schema: &'a FormSchema, data: &FormData) -> Vec<&'a Step> {
    schema
        .steps
        .iter()
        .filter(|step| step_visible(step, data))
        .collect()
}

pub fn visible_sections<'a>(step: &'a Step, data: &FormData) -> Vec<&'a Section> {
    step.sections
        .iter()
        .flatten()
        .filter(|section| section_visible(section, data))
        .collect()
}

/// Fields of a step that are currently visible: flat fields first, then the
/// fields of each visible section, all filtered by their own conditions.
/// This is the field set the step validator runs against.
pub fn visible_fields<'a>(step: &'a Step, data: &FormData) -> Vec<&'a Field> {
    let mut fields: Vec<&Field> = step.fields.iter().flatten().collect();
    for section in step.sections.iter().flatten() {
        if section_visible(section, data) {
            fields.extend(section.fields.iter());
        }
    }
    fields
        .into_iter()
        .filter(|field| field_visible(field, data))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{visible_fields, visible_steps};
    use crate::core::condition::ConditionalExpression;
    use crate::core::data::FormData;
    use crate::core::path::FieldPath;
    use crate::core::value::Value;
    use crate::schema::{Field, FieldType, FormSchema, Section, Step};

    fn set(data: &FormData, path: &str, value: Value) -> FormData {
        data.set(&FieldPath::parse_lossy(path), value)
    }

    fn three_step_schema() -> FormSchema {
        FormSchema::new(
            "demo",
            "Demo",
            vec![
                Step::with_fields(
                    "s1",
                    "One",
                    vec![Field::new("q", "answer", FieldType::Radio, "Answer")],
                ),
                Step::with_fields(
                    "s2",
                    "Two",
                    vec![Field::new("extra", "extra", FieldType::Text, "Extra")],
                )
                .with_show_if(ConditionalExpression::equals("answer", "yes")),
                Step::with_fields(
                    "s3",
                    "Three",
                    vec![Field::new("done", "done", FieldType::Checkbox, "Done")],
                ),
            ],
        )
    }

    #[test]
    fn unconditioned_steps_are_always_visible() {
        let schema = three_step_schema();
        let data = set(&FormData::new(), "answer", Value::from("yes"));
        assert_eq!(visible_steps(&schema, &data).len(), 3);
    }

    #[test]
    fn conditional_step_drops_out_when_condition_is_false() {
        let schema = three_step_schema();
        let data = set(&FormData::new(), "answer", Value::from("no"));
        let steps = visible_steps(&schema, &data);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].id, "s1");
        assert_eq!(steps[1].id, "s3");
    }

    #[test]
    fn hidden_section_fields_are_excluded() {
        let always = Field::new("a", "a", FieldType::Text, "A");
        let gated = Field::new("b", "b", FieldType::Text, "B");
        let step = Step::with_sections(
            "s",
            "S",
            vec![
                Section::new("visible", vec![always]),
                Section::new("hidden", vec![gated])
                    .with_show_if(ConditionalExpression::equals("mode", "expert")),
            ],
        );

        let fields = visible_fields(&step, &FormData::new());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id, "a");

        let expert = set(&FormData::new(), "mode", Value::from("expert"));
        assert_eq!(visible_fields(&step, &expert).len(), 2);
    }

    #[test]
    fn field_level_conditions_apply_within_visible_sections() {
        let plain = Field::new("a", "a", FieldType::Text, "A");
        let gated = Field::new("b", "b", FieldType::Text, "B")
            .with_show_if(ConditionalExpression::is_not_empty("a"));
        let step = Step::with_fields("s", "S", vec![plain, gated]);

        assert_eq!(visible_fields(&step, &FormData::new()).len(), 1);
        let filled = set(&FormData::new(), "a", Value::from("x"));
        assert_eq!(visible_fields(&step, &filled).len(), 2);
    }
}
