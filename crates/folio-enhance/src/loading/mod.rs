//! Loading State Coordinator
//!
//! Owns every loading affordance on a page: image skeletons, `data-skeleton`
//! placeholders, busy buttons and overlays. All state lives in maps keyed by
//! [`NodeId`]; nothing is stashed in element attributes.
//!
//! The coordinator never waits. The host forwards browser events through
//! [`LoadingStates::handle_event`] and moves time forward with
//! [`LoadingStates::advance`], which runs due timers (placeholder removal,
//! busy auto-clear).

mod buttons;
mod images;
mod overlay;
mod skeletons;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use folio_dom::{Document, NodeId};

use crate::config::LoadingConfig;
use crate::selectors;
use crate::state::{ButtonBusyState, TrackedElement, VisualState};
use crate::timers::TimerQueue;
use crate::{EnhanceError, PageEvent};

/// Deferred work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// Drop a faded-out image placeholder
    RemovePlaceholder { element: NodeId, placeholder: NodeId },
    /// Auto-clear a clicked button
    ClearBusy(NodeId),
}

/// Loading-state coordinator
#[derive(Debug)]
pub struct LoadingStates {
    config: LoadingConfig,
    clock: Duration,
    timers: TimerQueue<Task>,
    tracked: HashMap<NodeId, TrackedElement>,
    buttons: HashMap<NodeId, ButtonBusyState>,
    click_targets: HashSet<NodeId>,
    forms: HashSet<NodeId>,
}

impl LoadingStates {
    pub fn new(config: LoadingConfig) -> Self {
        Self {
            config,
            clock: Duration::ZERO,
            timers: TimerQueue::new(),
            tracked: HashMap::new(),
            buttons: HashMap::new(),
            click_targets: HashSet::new(),
            forms: HashSet::new(),
        }
    }

    pub fn config(&self) -> &LoadingConfig {
        &self.config
    }

    /// Scan the document once: wrap lazy images, register buttons and
    /// forms, hide `data-skeleton` elements behind placeholders.
    pub fn initialize(&mut self, doc: &mut Document) -> Result<(), EnhanceError> {
        self.setup_images(doc)?;
        self.setup_forms(doc);
        self.setup_skeletons(doc)?;
        tracing::debug!(
            tracked = self.tracked.len(),
            buttons = self.click_targets.len(),
            forms = self.forms.len(),
            "loading states initialized"
        );
        Ok(())
    }

    /// React to a browser event. Events for nodes the coordinator does not
    /// manage are ignored.
    pub fn handle_event(&mut self, doc: &mut Document, event: PageEvent) -> Result<(), EnhanceError> {
        match event {
            PageEvent::Load(target) => self.on_load_success(doc, target),
            PageEvent::Error(target) => self.on_load_failure(doc, target),
            PageEvent::Click(target) => self.on_click(doc, target),
            PageEvent::Submit(form) => self.on_submit(doc, form),
        }
    }

    /// Move the clock forward and run every timer that came due.
    /// A failing task is logged and does not stop the others.
    pub fn advance(&mut self, doc: &mut Document, elapsed: Duration) {
        self.clock += elapsed;
        for task in self.timers.take_due(self.clock) {
            let result = match task {
                Task::RemovePlaceholder { element, placeholder } => {
                    self.remove_placeholder(doc, element, placeholder);
                    Ok(())
                }
                Task::ClearBusy(button) => {
                    if let Some(state) = self.buttons.get_mut(&button) {
                        state.auto_clear = None;
                    }
                    self.hide_button_busy(doc, button)
                }
            };
            if let Err(err) = result {
                tracing::warn!(?task, %err, "timer task failed");
            }
        }
    }

    /// Elapsed coordinator time
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Timers still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Visual state of a tracked element (None once forgotten)
    pub fn state(&self, element: NodeId) -> Option<VisualState> {
        self.tracked.get(&element).map(|t| t.state)
    }

    /// Active placeholder of a tracked element
    pub fn placeholder(&self, element: NodeId) -> Option<NodeId> {
        self.tracked.get(&element).and_then(|t| t.placeholder)
    }

    pub fn tracked(&self, element: NodeId) -> Option<&TrackedElement> {
        self.tracked.get(&element)
    }

    /// Detach a placeholder and forget its element. Safe to call again.
    fn remove_placeholder(&mut self, doc: &mut Document, element: NodeId, placeholder: NodeId) {
        if doc.tree_mut().detach(placeholder) {
            tracing::debug!(%element, %placeholder, "placeholder removed");
        }
        if self
            .tracked
            .get(&element)
            .is_some_and(|t| t.placeholder == Some(placeholder))
        {
            self.tracked.remove(&element);
        }
    }

    /// Nearest registered click target at or above `target`
    fn click_target_for(&self, doc: &Document, target: NodeId) -> Option<NodeId> {
        std::iter::once(target)
            .chain(doc.tree().ancestors(target))
            .find(|id| self.click_targets.contains(id))
    }

    fn in_form(doc: &Document, element: NodeId) -> bool {
        doc.closest(element, &selectors::FORMS).is_some()
    }
}

impl Default for LoadingStates {
    fn default() -> Self {
        Self::new(LoadingConfig::default())
    }
}
