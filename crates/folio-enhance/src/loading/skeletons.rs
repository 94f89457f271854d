//! `data-skeleton` placeholders

use folio_dom::{Document, NodeId};

use super::LoadingStates;
use crate::selectors;
use crate::state::{SkeletonKind, TrackedElement, TrackedKind, VisualState};
use crate::EnhanceError;

impl LoadingStates {
    pub(super) fn setup_skeletons(&mut self, doc: &mut Document) -> Result<(), EnhanceError> {
        for element in doc.query_selector_all(&selectors::SKELETON_TARGETS) {
            if self.tracked.contains_key(&element) {
                continue;
            }
            self.create_skeleton_for(doc, element)?;
        }
        Ok(())
    }

    /// Hide `element` and insert a placeholder of its `data-skeleton` kind
    /// right before it.
    pub fn create_skeleton_for(&mut self, doc: &mut Document, element: NodeId) -> Result<NodeId, EnhanceError> {
        if self.tracked.contains_key(&element) {
            return Err(EnhanceError::AlreadyWrapped(element));
        }
        let kind = SkeletonKind::from_attr(doc.get_attribute(element, "data-skeleton").unwrap_or(""));
        let parent = doc.tree().parent(element).ok_or(EnhanceError::Detached(element))?;

        let mut tracked = TrackedElement::new(TrackedKind::Generic);
        let placeholder = doc.create_element_with_class("div", kind.class_name());
        if kind == SkeletonKind::Image {
            let height = doc.offset_height(element);
            doc.set_style_property(placeholder, "height", &format!("{height}px"))?;
        }

        tracked.prior_display = doc.style_property(element, "display");
        doc.set_style_property(element, "display", "none")?;
        doc.tree_mut().insert_before(parent, placeholder, Some(element))?;

        tracked.placeholder = Some(placeholder);
        tracked.advance(element, VisualState::SkeletonShown)?;
        self.tracked.insert(element, tracked);
        Ok(placeholder)
    }

    /// Swap the placeholder created for `element` back out, restore its own
    /// inline `display` and fade it in. Returns false when `element` has no
    /// active placeholder.
    pub fn reveal_tracked(&mut self, doc: &mut Document, element: NodeId) -> Result<bool, EnhanceError> {
        let Some(tracked) = self.tracked.get_mut(&element) else {
            return Ok(false);
        };
        if tracked.kind != TrackedKind::Generic || tracked.state != VisualState::SkeletonShown {
            return Ok(false);
        }
        let Some(placeholder) = tracked.placeholder else {
            return Ok(false);
        };
        tracked.advance(element, VisualState::Loaded)?;
        let display = tracked.prior_display.take().unwrap_or_default();

        doc.tree_mut().detach(placeholder);
        doc.set_style_property(element, "display", &display)?;
        doc.add_class(element, &["fade-in", "loaded"])?;

        self.tracked.remove(&element);
        Ok(true)
    }
}
