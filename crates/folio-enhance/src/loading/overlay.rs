//! Busy overlays

use folio_dom::{Document, FragmentNode, NodeId};

use super::LoadingStates;
use crate::selectors;
use crate::EnhanceError;

impl LoadingStates {
    /// Cover `element` with a spinner overlay and return the overlay.
    ///
    /// A statically positioned element becomes `position: relative` first so
    /// the overlay's absolute box anchors to it.
    pub fn attach_overlay(&mut self, doc: &mut Document, element: NodeId, dark: bool) -> Result<NodeId, EnhanceError> {
        doc.element(element)?;
        if doc.computed_position(element) == "static" {
            doc.set_style_property(element, "position", "relative")?;
        }

        let class = if dark { "loading-overlay dark" } else { "loading-overlay" };
        let overlay = FragmentNode::element("div")
            .class(class)
            .child(FragmentNode::element("div").class("loading-spinner"));
        let ids = doc.append_fragment(element, &overlay.into())?;
        ids.first().copied().ok_or(EnhanceError::Detached(element))
    }

    /// Remove the overlay inside `element`, if any
    pub fn detach_overlay(&mut self, doc: &mut Document, element: NodeId) -> bool {
        match doc.query_selector_in(element, &selectors::LOADING_OVERLAY) {
            Some(overlay) => doc.tree_mut().detach(overlay),
            None => false,
        }
    }
}
