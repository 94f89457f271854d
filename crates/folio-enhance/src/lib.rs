//! Folio page enhancements
//!
//! Progressive enhancement for the site's pages:
//!
//! - [`LoadingStates`]: image skeletons, `data-skeleton` placeholders, busy
//!   buttons and overlays
//! - [`LazyImages`]: intersection-triggered image fetches
//!
//! Nothing runs on load. The host page calls [`initialize`] once when the
//! document is ready, then forwards events and time.
//!
//! # Example
//! ```rust,ignore
//! use folio_enhance::{initialize, EnhanceOptions, PageEvent};
//!
//! let mut page = initialize(&mut doc, EnhanceOptions::default())?;
//! for probe in page.lazy.update_viewport(&doc, viewport) {
//!     host.fetch_image(probe);
//! }
//! page.dispatch(&mut doc, PageEvent::Load(hero_image))?;
//! page.advance(&mut doc, frame_time);
//! ```

mod config;
mod lazy;
mod loading;
mod observer;
mod selectors;
mod state;
mod timers;

use std::time::Duration;

use folio_dom::{Document, DomError, NodeId};

pub use config::{
    EnhanceOptions, LazyConfig, LoadingConfig, ObserverSupport, BUSY_TIMEOUT, FADE_DELAY, LAZY_ROOT_MARGIN,
    LAZY_THRESHOLD,
};
pub use lazy::{LazyImages, ProbeRequest};
pub use loading::LoadingStates;
pub use observer::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverOptions};
pub use state::{ButtonBusyState, SkeletonKind, TrackedElement, TrackedKind, VisualState};
pub use timers::{TimerId, TimerQueue};

/// Browser events the host forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Resource of an element finished loading
    Load(NodeId),
    /// Resource of an element failed
    Error(NodeId),
    /// Click on an element (or one of its descendants)
    Click(NodeId),
    /// Form submission
    Submit(NodeId),
}

/// Enhancement errors
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("element {0} already has a placeholder")]
    AlreadyWrapped(NodeId),

    #[error("element {0} is not attached to a parent")]
    Detached(NodeId),

    #[error("element {element}: cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        element: NodeId,
        from: VisualState,
        to: VisualState,
    },
}

/// Both enhancers, wired to one document
#[derive(Debug)]
pub struct Enhancements {
    pub loading: LoadingStates,
    pub lazy: LazyImages,
}

impl Enhancements {
    /// Forward a browser event to the loading states
    pub fn dispatch(&mut self, doc: &mut Document, event: PageEvent) -> Result<(), EnhanceError> {
        self.loading.handle_event(doc, event)
    }

    /// Advance timers
    pub fn advance(&mut self, doc: &mut Document, elapsed: Duration) {
        self.loading.advance(doc, elapsed);
    }
}

/// Set up every enhancement on a ready document.
///
/// Call once from the page's startup sequence. Skeletons are inserted
/// before lazy images are observed.
pub fn initialize(doc: &mut Document, options: EnhanceOptions) -> Result<Enhancements, EnhanceError> {
    let mut loading = LoadingStates::new(options.loading);
    loading.initialize(doc)?;

    let mut lazy = LazyImages::new(options.lazy, options.observer);
    lazy.initialize(doc)?;

    tracing::info!(url = doc.url(), lazy = lazy.is_active(), "page enhancements ready");
    Ok(Enhancements { loading, lazy })
}
