//! Event types
//!
//! Tagged control signals plus the kind discriminant used for filtering
//! and logging. Update transforms are boxed `FnOnce` values, so an event
//! is consumed exactly once by the engine's transition function.

use std::fmt;

/// Transform applied to the container by update events.
///
/// Transforms must be total: the engine does not recover from a panicking
/// transform.
pub type UpdateFn<C> = Box<dyn FnOnce(C) -> C + Send>;

/// A control signal driving the paging engine
pub enum Event<C> {
    /// Restart from the empty container; clears the last fetched page
    Reload,
    /// Fetch the next page relative to the current state
    NextPage,
    /// Mutate the container without invoking the loader; the result is
    /// published to consumers
    Update(UpdateFn<C>),
    /// Mutate the container without publishing the result. The new value
    /// persists internally and is visible to subsequent events. Useful for
    /// direct UI updates, like a favorite toggle stored in the model while
    /// the cell is refreshed manually.
    UpdateSilent(UpdateFn<C>),
}

impl<C> Event<C> {
    /// Create an update event from a transform
    pub fn update(transform: impl FnOnce(C) -> C + Send + 'static) -> Self {
        Self::Update(Box::new(transform))
    }

    /// Create a silent update event from a transform
    pub fn update_silent(transform: impl FnOnce(C) -> C + Send + 'static) -> Self {
        Self::UpdateSilent(Box::new(transform))
    }

    /// The kind discriminant of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Reload => EventKind::Reload,
            Self::NextPage => EventKind::NextPage,
            Self::Update(_) => EventKind::Update,
            Self::UpdateSilent(_) => EventKind::UpdateSilent,
        }
    }

    /// Check if this is an update-class event
    pub fn is_update(&self) -> bool {
        self.kind().is_update()
    }

    /// Check if this event invokes the page loader
    pub fn triggers_fetch(&self) -> bool {
        self.kind().triggers_fetch()
    }

    /// Check if the committed state is published for this event
    pub fn propagates(&self) -> bool {
        self.kind().propagates()
    }
}

impl<C> fmt::Debug for Event<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind())
    }
}

/// Kind discriminant of an [`Event`].
///
/// Events carrying transforms compare equal by kind only, which is what
/// eligibility filtering and logging need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Restart from empty state
    Reload,
    /// Fetch the next page
    NextPage,
    /// Published in-place mutation
    Update,
    /// Unpublished in-place mutation
    UpdateSilent,
}

impl EventKind {
    /// Check if this is an update-class kind
    pub fn is_update(self) -> bool {
        matches!(self, Self::Update | Self::UpdateSilent)
    }

    /// Check if this kind invokes the page loader
    pub fn triggers_fetch(self) -> bool {
        matches!(self, Self::Reload | Self::NextPage)
    }

    /// Check if the committed state is published for this kind
    pub fn propagates(self) -> bool {
        !matches!(self, Self::UpdateSilent)
    }
}
