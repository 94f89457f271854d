//! Intersection Observer
//!
//! Tracks whether observed elements intersect the (margin-expanded) viewport
//! and queues entries when an element crosses one of the thresholds.

use std::collections::HashMap;

use folio_dom::{DOMRect, NodeId, RootMargin};

/// Intersection observer options
#[derive(Debug, Clone)]
pub struct IntersectionObserverOptions {
    /// Grows (or shrinks) the root box before intersecting
    pub root_margin: RootMargin,
    /// Ratios at which a change is reported, ascending
    pub thresholds: Vec<f64>,
}

impl Default for IntersectionObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            thresholds: vec![0.0],
        }
    }
}

/// Intersection observer entry
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverEntry {
    pub target: NodeId,
    pub bounding_client_rect: DOMRect,
    pub intersection_rect: DOMRect,
    pub root_bounds: DOMRect,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

/// Intersection observer
#[derive(Debug)]
pub struct IntersectionObserver {
    options: IntersectionObserverOptions,
    /// Last reported ratio per target (None = never reported)
    observed: HashMap<NodeId, Option<f64>>,
    pending_entries: Vec<IntersectionObserverEntry>,
}

impl IntersectionObserver {
    pub fn new(mut options: IntersectionObserverOptions) -> Self {
        options.thresholds.retain(|t| (0.0..=1.0).contains(t));
        if options.thresholds.is_empty() {
            options.thresholds.push(0.0);
        }
        options.thresholds.sort_by(f64::total_cmp);
        Self {
            options,
            observed: HashMap::new(),
            pending_entries: Vec::new(),
        }
    }

    /// Observe an element; the next check always reports it once
    pub fn observe(&mut self, target: NodeId) {
        self.observed.entry(target).or_insert(None);
    }

    /// Stop observing
    pub fn unobserve(&mut self, target: NodeId) {
        self.observed.remove(&target);
        self.pending_entries.retain(|e| e.target != target);
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.contains_key(&target)
    }

    fn ratio(rect: &DOMRect, root: &DOMRect) -> (f64, Option<DOMRect>) {
        let intersection = rect.intersection(root);
        let ratio = match intersection {
            Some(i) if rect.area() > 0.0 => (i.area() / rect.area()).min(1.0),
            Some(_) => 1.0,
            // A zero-area box inside the root still counts as fully visible
            None if rect.area() == 0.0
                && rect.x >= root.x
                && rect.right() <= root.right()
                && rect.y >= root.y
                && rect.bottom() <= root.bottom() =>
            {
                1.0
            }
            None => 0.0,
        };
        (ratio, intersection)
    }

    /// Recompute intersections against `viewport`. Targets without a layout
    /// box are skipped until one is known.
    pub fn check_intersections(
        &mut self,
        viewport: DOMRect,
        rect_of: impl Fn(NodeId) -> Option<DOMRect>,
    ) {
        let root = viewport.expand(&self.options.root_margin);
        let thresholds = &self.options.thresholds;
        let min_threshold = thresholds[0];

        let mut targets: Vec<NodeId> = self.observed.keys().copied().collect();
        targets.sort();

        for target in targets {
            let Some(rect) = rect_of(target) else {
                continue;
            };
            let (ratio, intersection) = Self::ratio(&rect, &root);

            let Some(last_ratio) = self.observed.get_mut(&target) else {
                continue;
            };
            let should_notify = match *last_ratio {
                Some(lr) => thresholds
                    .iter()
                    .any(|&t| (lr < t && ratio >= t) || (lr >= t && ratio < t)),
                None => true,
            };

            if should_notify {
                *last_ratio = Some(ratio);
                self.pending_entries.push(IntersectionObserverEntry {
                    target,
                    bounding_client_rect: rect,
                    intersection_rect: intersection.unwrap_or_default(),
                    root_bounds: root,
                    intersection_ratio: ratio,
                    is_intersecting: ratio > 0.0 && ratio >= min_threshold,
                });
            }
        }
    }

    /// Take pending entries
    pub fn take_entries(&mut self) -> Vec<IntersectionObserverEntry> {
        std::mem::take(&mut self.pending_entries)
    }
}
