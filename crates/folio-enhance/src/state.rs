//! Per-element loading state

use folio_dom::{Fragment, NodeId};

use crate::timers::TimerId;
use crate::EnhanceError;

/// Visual state of a tracked element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    /// Registered, placeholder not yet in the tree
    Pending,
    /// Placeholder visible
    SkeletonShown,
    /// Content visible (terminal)
    Loaded,
    /// Load failed, failure notice shown (terminal)
    Error,
}

impl VisualState {
    /// Allowed edges. `Pending -> Loaded` is the cache-hit path where the
    /// skeleton is skipped entirely.
    pub fn can_become(self, next: VisualState) -> bool {
        use VisualState::*;
        matches!(
            (self, next),
            (Pending, SkeletonShown) | (Pending, Loaded) | (SkeletonShown, Loaded) | (SkeletonShown, Error)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, VisualState::Loaded | VisualState::Error)
    }
}

/// What kind of content a placeholder stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedKind {
    /// `img` wrapped with an overlaying skeleton
    Image,
    /// `[data-skeleton]` element hidden behind a sibling placeholder
    Generic,
}

/// Element under skeleton management
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedElement {
    pub kind: TrackedKind,
    pub state: VisualState,
    pub placeholder: Option<NodeId>,
    /// Inline `display` the element had before it was hidden
    pub prior_display: Option<String>,
}

impl TrackedElement {
    pub fn new(kind: TrackedKind) -> Self {
        Self {
            kind,
            state: VisualState::Pending,
            placeholder: None,
            prior_display: None,
        }
    }

    /// Move to `next`, rejecting edges outside the state machine
    pub fn advance(&mut self, element: NodeId, next: VisualState) -> Result<(), EnhanceError> {
        if !self.state.can_become(next) {
            return Err(EnhanceError::InvalidTransition {
                element,
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(%element, from = ?self.state, to = ?next, "visual state");
        self.state = next;
        Ok(())
    }
}

/// `data-skeleton` placeholder flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonKind {
    Text,
    TextShort,
    TextMedium,
    Image,
    Block,
}

impl SkeletonKind {
    /// Map a `data-skeleton` value; unknown values get the generic block
    pub fn from_attr(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "text-short" => Self::TextShort,
            "text-medium" => Self::TextMedium,
            "image" => Self::Image,
            _ => Self::Block,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Text => "text-skeleton",
            Self::TextShort => "text-skeleton short",
            Self::TextMedium => "text-skeleton medium",
            Self::Image => "image-skeleton",
            Self::Block => "skeleton",
        }
    }
}

/// Busy bookkeeping for one button
#[derive(Debug, Clone)]
pub struct ButtonBusyState {
    /// Content before the first busy transition
    pub original: Fragment,
    pub busy: bool,
    /// Pending auto-clear timer
    pub auto_clear: Option<TimerId>,
}

impl ButtonBusyState {
    pub fn new(original: Fragment) -> Self {
        Self {
            original,
            busy: false,
            auto_clear: None,
        }
    }
}
