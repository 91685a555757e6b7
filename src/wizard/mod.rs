//! Wizard controller: step index, form data, errors and busy flags held in
//! one explicit state machine with pure transitions, so the wizard logic is
//! testable without any rendering layer.

pub mod event;
pub mod runner;

pub use event::{Effect, WizardEvent};
pub use runner::{WizardHooks, dispatch, run_effects};

use crate::controls::{ControlRegistry, RenderedStep, render_step};
use crate::core::data::FormData;
use crate::core::path::FieldPath;
use crate::core::value::Value;
use crate::schema::{Field, FormSchema, Step};
use crate::validate::{Errors, validate_step};
use crate::visibility;

pub struct WizardController {
    schema: FormSchema,
    registry: ControlRegistry,
    data: FormData,
    step_index: usize,
    errors: Errors,
    submitting: bool,
    saving_draft: bool,
    submit_error: Option<String>,
    draft_error: Option<String>,
}

impl WizardController {
    pub fn new(schema: FormSchema) -> Self {
        Self::with_initial_data(schema, FormData::new())
    }

    pub fn with_initial_data(schema: FormSchema, mut data: FormData) -> Self {
        apply_default_values(&schema, &mut data);
        Self {
            schema,
            registry: ControlRegistry::default(),
            data,
            step_index: 0,
            errors: Errors::new(),
            submitting: false,
            saving_draft: false,
            submit_error: None,
            draft_error: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn registry_mut(&mut self) -> &mut ControlRegistry {
        &mut self.registry
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_saving_draft(&self) -> bool {
        self.saving_draft
    }

    /// Message of the last failed submit, kept until the field data changes
    /// or a later submit succeeds. This is the retryable error state the
    /// presentation layer surfaces.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn draft_error(&self) -> Option<&str> {
        self.draft_error.as_deref()
    }

    /// Visible steps for the current data, recomputed on every call. The
    /// contiguous navigable sequence: indices here are what `step_index`
    /// addresses.
    pub fn visible_steps(&self) -> Vec<&Step> {
        visibility::visible_steps(&self.schema, &self.data)
    }

    /// The step the wizard is on, resolved against the freshly recomputed
    /// visible list with the index clamped to its end.
    pub fn current_step(&self) -> Option<&Step> {
        let steps = self.visible_steps();
        let index = clamp_index(self.step_index, steps.len());
        steps.get(index).copied()
    }

    /// 1-based position and visible total, for progress indicators.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.visible_steps().len();
        (clamp_index(self.step_index, total) + 1, total)
    }

    pub fn is_first_step(&self) -> bool {
        clamp_index(self.step_index, self.visible_steps().len()) == 0
    }

    pub fn is_last_step(&self) -> bool {
        let total = self.visible_steps().len();
        clamp_index(self.step_index, total) + 1 == total
    }

    pub fn field_value(&self, name: &str) -> Option<&Value> {
        self.data.get(&FieldPath::parse_lossy(name))
    }

    pub fn render_current_step(&self) -> Option<RenderedStep> {
        self.current_step()
            .map(|step| render_step(step, &self.data, &self.errors, &self.registry))
    }

    /// Apply one external trigger and return the outbound effects it
    /// produced. Pure state transition apart from tracing.
    pub fn handle(&mut self, event: WizardEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            WizardEvent::FieldChanged { name, raw } => {
                let coerced = self.find_field(&name).and_then(|field| {
                    let current = self.data.get(&FieldPath::parse_lossy(&name));
                    self.registry.apply_input(field, current, raw)
                });
                if let Some(value) = coerced {
                    self.write_field(&name, value);
                }
            }
            WizardEvent::SetField { name, value } => {
                self.write_field(&name, value);
            }
            WizardEvent::Next => {
                let errors = {
                    let Some(step) = self.current_step() else {
                        return effects;
                    };
                    let fields = visibility::visible_fields(step, &self.data);
                    validate_step(&fields, &self.data)
                };
                if !errors.is_empty() {
                    self.errors = errors;
                    return effects;
                }
                self.errors = Errors::new();

                if self.is_last_step() {
                    self.submitting = true;
                    effects.push(Effect::Submit(self.data.clone()));
                } else {
                    self.step_index = clamp_index(self.step_index, self.visible_steps().len()) + 1;
                    effects.push(Effect::ScrollToTop);
                }
            }
            WizardEvent::Previous => {
                let index = clamp_index(self.step_index, self.visible_steps().len());
                if index > 0 {
                    self.step_index = index - 1;
                    effects.push(Effect::ScrollToTop);
                }
            }
            WizardEvent::SaveDraft => {
                // Deliberately not guarded against re-entrancy: the busy
                // flag is for the presentation layer to disable the control.
                self.saving_draft = true;
                let index = clamp_index(self.step_index, self.visible_steps().len());
                effects.push(Effect::SaveDraft(self.data.clone(), index));
            }
            WizardEvent::Cancel => {
                if self.is_first_step() {
                    effects.push(Effect::Cancelled);
                }
            }
            WizardEvent::SubmitFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => {
                        self.submit_error = None;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "form submission failed");
                        self.submit_error = Some(err.message().to_string());
                    }
                }
            }
            WizardEvent::DraftFinished(result) => {
                self.saving_draft = false;
                match result {
                    Ok(()) => {
                        self.draft_error = None;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "draft save failed");
                        self.draft_error = Some(err.message().to_string());
                    }
                }
            }
        }
        effects
    }

    fn write_field(&mut self, name: &str, value: Value) {
        let path = FieldPath::parse_lossy(name);
        self.data = self.data.set(&path, value);
        // Errors clear the instant the offending field changes.
        self.errors.shift_remove(name);
        self.submit_error = None;

        // A visibility condition may have flipped: clamp the index so it
        // always addresses the recomputed visible list.
        let total = self.visible_steps().len();
        self.step_index = clamp_index(self.step_index, total);
    }

    fn find_field(&self, name: &str) -> Option<&Field> {
        self.schema.all_fields().find(|field| field.name == name)
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

fn apply_default_values(schema: &FormSchema, data: &mut FormData) {
    for field in schema.all_fields() {
        let Some(default) = &field.default_value else {
            continue;
        };
        let path = FieldPath::parse_lossy(&field.name);
        if data.get(&path).is_none() {
            data.set_in_place(&path, Value::from_json(default.clone()));
        }
    }
}
