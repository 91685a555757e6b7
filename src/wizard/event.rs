use crate::controls::RawInput;
use crate::core::data::FormData;
use crate::core::value::Value;
use crate::error::HookError;

/// External triggers the controller reacts to. Field edits and navigation
/// come from the presentation layer; the `*Finished` completions are fed
/// back by whoever executed the matching effect.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// User interacted with a rendered field; the value goes through the
    /// field's control for coercion.
    FieldChanged { name: String, raw: RawInput },
    /// Programmatic write, bypassing coercion.
    SetField { name: String, value: Value },
    Next,
    Previous,
    SaveDraft,
    Cancel,
    SubmitFinished(Result<(), HookError>),
    DraftFinished(Result<(), HookError>),
}

/// Outbound work the controller requests but does not perform itself.
/// `Submit` and `SaveDraft` are expected to complete asynchronously and be
/// answered with the matching `*Finished` event; until then the relevant
/// busy flag stays set.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Submit(FormData),
    SaveDraft(FormData, usize),
    Cancelled,
    ScrollToTop,
}
