use crate::core::data::FormData;
use crate::error::HookError;
use crate::wizard::event::{Effect, WizardEvent};
use crate::wizard::WizardController;

/// Caller-supplied side effects of the wizard: submission, draft
/// persistence and abandonment. The error contract is the caller's own;
/// the engine only records the failure and clears the busy flag.
pub trait WizardHooks {
    fn on_submit(&mut self, data: &FormData) -> Result<(), HookError>;

    fn on_save_draft(&mut self, _data: &FormData, _step: usize) -> Result<(), HookError> {
        Ok(())
    }

    fn on_cancel(&mut self) {}
}

/// Drive effects against the hooks and feed the matching completion back
/// into the controller. Synchronous analogue of dispatching the submit and
/// draft calls to a background executor: a caller running them truly
/// asynchronously feeds the `*Finished` events in whenever they resolve,
/// and the busy flags stay set until then.
pub fn run_effects(
    controller: &mut WizardController,
    effects: Vec<Effect>,
    hooks: &mut dyn WizardHooks,
) {
    for effect in effects {
        match effect {
            Effect::Submit(data) => {
                let result = hooks.on_submit(&data);
                let _ = controller.handle(WizardEvent::SubmitFinished(result));
            }
            Effect::SaveDraft(data, step) => {
                let result = hooks.on_save_draft(&data, step);
                let _ = controller.handle(WizardEvent::DraftFinished(result));
            }
            Effect::Cancelled => hooks.on_cancel(),
            // Presentation concern; nothing to do headless.
            Effect::ScrollToTop => {}
        }
    }
}

/// Handle one event and immediately run whatever effects it produced.
pub fn dispatch(
    controller: &mut WizardController,
    event: WizardEvent,
    hooks: &mut dyn WizardHooks,
) {
    let effects = controller.handle(event);
    run_effects(controller, effects, hooks);
}
