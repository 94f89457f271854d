//! Busy buttons and form submission

use folio_dom::{Document, Fragment, FragmentNode, NodeId};

use super::{LoadingStates, Task};
use crate::selectors;
use crate::state::ButtonBusyState;
use crate::EnhanceError;

const BUSY_CLASS: &str = "btn-loading";

fn busy_content() -> Fragment {
    [
        FragmentNode::element("span").class("loading-spinner"),
        FragmentNode::text("Loading..."),
    ]
    .into_iter()
    .collect()
}

impl LoadingStates {
    pub(super) fn setup_forms(&mut self, doc: &Document) {
        self.click_targets
            .extend(doc.query_selector_all(&selectors::BUSY_BUTTONS));
        self.forms.extend(doc.query_selector_all(&selectors::FORMS));
    }

    /// Whether `button` is currently busy
    pub fn is_busy(&self, button: NodeId) -> bool {
        self.buttons.get(&button).is_some_and(|s| s.busy)
    }

    /// Disable `button` and show a spinner.
    ///
    /// The original content is captured on the first call only, so
    /// repeated busy transitions always restore the pre-busy markup.
    pub fn show_button_busy(&mut self, doc: &mut Document, button: NodeId) -> Result<(), EnhanceError> {
        let el = doc.element(button)?;
        let replace_content = el.is("button") || el.has_class("text-button");

        let state = self
            .buttons
            .entry(button)
            .or_insert_with(|| ButtonBusyState::new(doc.tree().snapshot_children(button)));
        state.busy = true;

        doc.add_class(button, &[BUSY_CLASS])?;
        doc.set_attribute(button, "disabled", "")?;
        if replace_content {
            doc.set_content(button, &busy_content())?;
        }
        tracing::debug!(%button, "button busy");
        Ok(())
    }

    /// Re-enable `button`, restore its original content verbatim and
    /// cancel any pending auto-clear.
    pub fn hide_button_busy(&mut self, doc: &mut Document, button: NodeId) -> Result<(), EnhanceError> {
        doc.remove_class(button, &[BUSY_CLASS])?;
        doc.remove_attribute(button, "disabled")?;

        if let Some(state) = self.buttons.get_mut(&button) {
            if let Some(timer) = state.auto_clear.take() {
                self.timers.cancel(timer);
            }
            if state.busy {
                doc.set_content(button, &state.original)?;
            }
            state.busy = false;
        }
        tracing::debug!(%button, "button restored");
        Ok(())
    }

    /// The form's submission finished: clear its submit control.
    pub fn complete_submission(&mut self, doc: &mut Document, form: NodeId) -> Result<(), EnhanceError> {
        match doc.query_selector_in(form, &selectors::SUBMIT_CONTROLS) {
            Some(submit) => self.hide_button_busy(doc, submit),
            None => Ok(()),
        }
    }

    pub(super) fn on_click(&mut self, doc: &mut Document, target: NodeId) -> Result<(), EnhanceError> {
        let Some(button) = self.click_target_for(doc, target) else {
            return Ok(());
        };
        // Plain navigation stays untouched
        if doc.element(button)?.is("a") && !Self::in_form(doc, button) {
            tracing::debug!(%button, "navigation link click ignored");
            return Ok(());
        }
        // Disabled controls do not receive clicks
        if self.is_busy(button) {
            return Ok(());
        }

        self.show_button_busy(doc, button)?;

        if let Some(timeout) = self.config.busy_timeout {
            let timer = self.timers.schedule(self.clock, timeout, Task::ClearBusy(button));
            if let Some(state) = self.buttons.get_mut(&button) {
                if let Some(stale) = state.auto_clear.replace(timer) {
                    self.timers.cancel(stale);
                }
            }
        }
        Ok(())
    }

    pub(super) fn on_submit(&mut self, doc: &mut Document, form: NodeId) -> Result<(), EnhanceError> {
        if !self.forms.contains(&form) {
            return Ok(());
        }
        match doc.query_selector_in(form, &selectors::SUBMIT_CONTROLS) {
            Some(submit) => self.show_button_busy(doc, submit),
            None => Ok(()),
        }
    }
}
