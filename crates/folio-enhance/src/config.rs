//! Enhancement configuration

use std::time::Duration;

use folio_dom::RootMargin;

/// Grace period between the fade-in starting and the placeholder leaving the tree
pub const FADE_DELAY: Duration = Duration::from_millis(300);

/// Safety net that clears a clicked button's busy state
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(3000);

/// Pre-trigger margin for lazy images
pub const LAZY_ROOT_MARGIN: RootMargin = RootMargin {
    top: 50.0,
    right: 0.0,
    bottom: 50.0,
    left: 0.0,
};

/// Visible fraction that counts as intersecting for lazy images
pub const LAZY_THRESHOLD: f64 = 0.1;

/// Loading-state timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingConfig {
    /// Delay before a faded-out image placeholder is removed
    pub fade_delay: Duration,

    /// Auto-clear delay for busy buttons entered by click (None = never)
    pub busy_timeout: Option<Duration>,
}

impl LoadingConfig {
    /// Zero delays everywhere; timers fire on the next `advance`
    pub fn immediate() -> Self {
        Self {
            fade_delay: Duration::ZERO,
            busy_timeout: Some(Duration::ZERO),
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            fade_delay: FADE_DELAY,
            busy_timeout: Some(BUSY_TIMEOUT),
        }
    }
}

/// Lazy image observation
#[derive(Debug, Clone, PartialEq)]
pub struct LazyConfig {
    pub root_margin: RootMargin,
    pub threshold: f64,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            root_margin: LAZY_ROOT_MARGIN,
            threshold: LAZY_THRESHOLD,
        }
    }
}

/// Whether the runtime offers intersection observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserverSupport {
    #[default]
    Available,
    Unavailable,
}

impl From<bool> for ObserverSupport {
    fn from(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

/// Everything `initialize` needs
#[derive(Debug, Clone, Default)]
pub struct EnhanceOptions {
    pub loading: LoadingConfig,
    pub lazy: LazyConfig,
    pub observer: ObserverSupport,
}
