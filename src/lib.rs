//! Schema-driven multi-step form engine: conditional visibility, dotted-path
//! form data, per-type field controls, step validation and a wizard
//! controller with explicit submit/draft effects.

pub mod controls;
pub mod core;
pub mod error;
pub mod schema;
pub mod validate;
pub mod visibility;
pub mod wizard;

pub use controls::{
    ControlRegistry, FieldControl, RawInput, RenderedInput, RenderedSection, RenderedStep,
    WidgetKind, country_options, render_step,
};
pub use crate::core::condition::{ConditionalExpression, ConditionalOperator, evaluate};
pub use crate::core::data::FormData;
pub use crate::core::path::{FieldPath, FieldPathParseError};
pub use crate::core::value::{FileHandle, Value};
pub use error::{HookError, SchemaError};
pub use schema::{
    Field, FieldType, FieldValidation, FormSchema, Section, SelectOption, Step, ValidationConfig,
};
pub use validate::{Errors, validate_step};
pub use wizard::{Effect, WizardController, WizardEvent, WizardHooks, dispatch, run_effects};
