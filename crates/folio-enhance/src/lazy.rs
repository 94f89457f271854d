//! Lazy image loading
//!
//! Defers fetching `img[loading="lazy"]` until the image nears the viewport.
//! The real resource is fetched by a detached probe (the host performs the
//! request); only after the probe decodes is the visible element's `src`
//! swapped, so a half-loaded image never flashes on screen.

use std::collections::HashSet;

use folio_dom::{DOMRect, Document, NodeId};

use crate::config::{LazyConfig, ObserverSupport};
use crate::observer::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverOptions};
use crate::selectors;
use crate::EnhanceError;

/// Fetch the host should start for an image that came into range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub target: NodeId,
    pub src: String,
}

/// Lazy image loader
#[derive(Debug)]
pub struct LazyImages {
    /// None when the runtime has no intersection observation
    observer: Option<IntersectionObserver>,
    /// Images with a probe in flight
    probing: HashSet<NodeId>,
}

impl LazyImages {
    pub fn new(config: LazyConfig, support: ObserverSupport) -> Self {
        let observer = match support {
            ObserverSupport::Available => Some(IntersectionObserver::new(IntersectionObserverOptions {
                root_margin: config.root_margin,
                thresholds: vec![config.threshold],
            })),
            ObserverSupport::Unavailable => None,
        };
        Self {
            observer,
            probing: HashSet::new(),
        }
    }

    /// Whether lazy behaviour is on at all
    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    /// Mark every lazy image and start observing it
    pub fn initialize(&mut self, doc: &mut Document) -> Result<(), EnhanceError> {
        let Some(observer) = self.observer.as_mut() else {
            tracing::debug!("intersection observation unavailable, lazy images disabled");
            return Ok(());
        };
        let images = doc.query_selector_all(&selectors::LAZY_IMAGES);
        for &img in &images {
            doc.add_class(img, &["blur-up"])?;
            observer.observe(img);
        }
        tracing::debug!(count = images.len(), "lazy images observed");
        Ok(())
    }

    pub fn is_observing(&self, img: NodeId) -> bool {
        self.observer.as_ref().is_some_and(|o| o.is_observing(img))
    }

    /// Recompute intersections for the current viewport and return the
    /// probes to start.
    pub fn update_viewport(&mut self, doc: &Document, viewport: DOMRect) -> Vec<ProbeRequest> {
        let Some(observer) = self.observer.as_mut() else {
            return Vec::new();
        };
        observer.check_intersections(viewport, |id| doc.layout_box(id));
        let entries = observer.take_entries();
        self.handle_intersection(doc, &entries)
    }

    /// Turn intersecting entries into probes; at most one per image
    pub fn handle_intersection(&mut self, doc: &Document, entries: &[IntersectionObserverEntry]) -> Vec<ProbeRequest> {
        let Some(observer) = self.observer.as_ref() else {
            return Vec::new();
        };
        let mut probes = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let target = entry.target;
            if !observer.is_observing(target) || self.probing.contains(&target) {
                continue;
            }
            let src = doc
                .get_attribute(target, "data-src")
                .or_else(|| doc.get_attribute(target, "src"))
                .filter(|s| !s.is_empty());
            let Some(src) = src else {
                tracing::debug!(%target, "lazy image without a source");
                continue;
            };
            self.probing.insert(target);
            probes.push(ProbeRequest { target, src: src.to_string() });
        }
        probes
    }

    /// The probe for `img` decoded: swap the source in and stop observing.
    /// Returns false when no probe was in flight for `img`.
    pub fn probe_loaded(&mut self, doc: &mut Document, img: NodeId, src: &str) -> Result<bool, EnhanceError> {
        if !self.probing.remove(&img) {
            return Ok(false);
        }
        doc.set_attribute(img, "src", src)?;
        doc.add_class(img, &["loaded"])?;
        if let Some(observer) = self.observer.as_mut() {
            observer.unobserve(img);
        }
        tracing::debug!(%img, src, "lazy image swapped in");
        Ok(true)
    }

    /// The probe for `img` failed. The image stays observed, so the next
    /// intersection retries.
    pub fn probe_failed(&mut self, img: NodeId) {
        if self.probing.remove(&img) {
            tracing::debug!(%img, "lazy probe failed");
        }
    }
}

impl Default for LazyImages {
    fn default() -> Self {
        Self::new(LazyConfig::default(), ObserverSupport::default())
    }
}
