//! Image skeletons

use folio_dom::{Document, Fragment, FragmentNode, NodeId};

use super::{LoadingStates, Task};
use crate::selectors;
use crate::state::{TrackedElement, TrackedKind, VisualState};
use crate::EnhanceError;

const WRAPPER_CLASS: &str = "image-loading-wrapper";
const SKELETON_CLASS: &str = "image-skeleton";
const SKELETON_STYLE: &str = "position: absolute; top: 0; left: 0; right: 0; bottom: 0; z-index: 1;";

/// Inline notice shown inside a failed image's placeholder
fn failure_notice() -> Fragment {
    FragmentNode::element("div")
        .attr("style", "text-align: center; padding: 20px; color: #999; font-size: 12px;")
        .with_text("Failed to load")
        .into()
}

/// CSS length for a `width`/`height` attribute: bare numbers are pixels
fn dimension(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() && v.parse::<f64>().is_ok() => format!("{v}px"),
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "auto".to_string(),
    }
}

impl LoadingStates {
    pub(super) fn setup_images(&mut self, doc: &mut Document) -> Result<(), EnhanceError> {
        for img in doc.query_selector_all(&selectors::LAZY_IMAGES) {
            if self.is_wrapped(doc, img) {
                continue;
            }
            self.wrap_with_skeleton(doc, img)?;
        }
        Ok(())
    }

    fn is_wrapped(&self, doc: &Document, img: NodeId) -> bool {
        self.tracked.contains_key(&img)
            || doc
                .tree()
                .parent(img)
                .is_some_and(|p| doc.has_class(p, WRAPPER_CLASS))
    }

    /// Put a skeleton over `img` until it loads.
    ///
    /// An image that is already complete (cache hit) goes straight to
    /// `Loaded` and never gets a placeholder.
    pub fn wrap_with_skeleton(&mut self, doc: &mut Document, img: NodeId) -> Result<(), EnhanceError> {
        if self.is_wrapped(doc, img) {
            return Err(EnhanceError::AlreadyWrapped(img));
        }
        let el = doc.element(img)?;
        let (width, height) = (dimension(el.get_attr("width")), dimension(el.get_attr("height")));
        let parent = doc.tree().parent(img).ok_or(EnhanceError::Detached(img))?;

        let mut tracked = TrackedElement::new(TrackedKind::Image);
        if doc.is_complete(img) {
            tracked.advance(img, VisualState::Loaded)?;
            self.tracked.insert(img, tracked);
            return Ok(());
        }

        let wrapper = doc.create_element_with_class("div", WRAPPER_CLASS);
        doc.set_attribute(
            wrapper,
            "style",
            &format!("position: relative; display: inline-block; width: {width}; height: {height};"),
        )?;
        let skeleton = doc.create_element_with_class("div", SKELETON_CLASS);
        doc.set_attribute(skeleton, "style", SKELETON_STYLE)?;

        doc.add_class(img, &["fade-in"])?;

        let tree = doc.tree_mut();
        tree.insert_before(parent, wrapper, Some(img))?;
        tree.append_child(wrapper, img)?;
        tree.append_child(wrapper, skeleton)?;

        tracked.placeholder = Some(skeleton);
        tracked.advance(img, VisualState::SkeletonShown)?;
        self.tracked.insert(img, tracked);
        Ok(())
    }

    /// Image finished loading: fade in, then drop the placeholder after the
    /// grace delay. Repeated calls do nothing.
    ///
    /// `data-skeleton` elements only come back through
    /// [`LoadingStates::reveal_tracked`], so their load events are ignored.
    pub fn on_load_success(&mut self, doc: &mut Document, img: NodeId) -> Result<(), EnhanceError> {
        let Some(tracked) = self.tracked.get_mut(&img).filter(|t| t.kind == TrackedKind::Image) else {
            return Ok(());
        };
        match tracked.state {
            VisualState::Loaded => return Ok(()),
            VisualState::Error => {
                tracing::debug!(%img, "load after error ignored");
                return Ok(());
            }
            VisualState::Pending | VisualState::SkeletonShown => {}
        }
        tracked.advance(img, VisualState::Loaded)?;
        let placeholder = tracked.placeholder;

        doc.add_class(img, &["loaded"])?;
        if let Some(placeholder) = placeholder {
            doc.set_style_property(placeholder, "opacity", "0")?;
            self.timers.schedule(
                self.clock,
                self.config.fade_delay,
                Task::RemovePlaceholder { element: img, placeholder },
            );
        }
        Ok(())
    }

    /// Image failed: swap the placeholder content for a failure notice.
    /// The placeholder stays; `Error` is terminal.
    pub fn on_load_failure(&mut self, doc: &mut Document, img: NodeId) -> Result<(), EnhanceError> {
        let Some(tracked) = self.tracked.get_mut(&img).filter(|t| t.kind == TrackedKind::Image) else {
            return Ok(());
        };
        if tracked.state.is_terminal() {
            tracing::debug!(%img, state = ?tracked.state, "error event ignored");
            return Ok(());
        }
        tracked.advance(img, VisualState::Error)?;
        tracing::warn!(%img, src = doc.get_attribute(img, "src").unwrap_or(""), "image failed to load");

        if let Some(placeholder) = tracked.placeholder {
            doc.set_content(placeholder, &failure_notice())?;
        }
        Ok(())
    }
}
